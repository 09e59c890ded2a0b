// ==========================================
// 설비투자비 실적 관리 - 저장 계층 오류 타입
// ==========================================
// 도구: thiserror 파생 매크로
// ==========================================

use thiserror::Error;

/// 저장 계층 오류 타입
#[derive(Error, Debug)]
pub enum RepositoryError {
    // ===== 데이터베이스 오류 =====
    #[error("레코드 없음: {entity} id={id}")]
    NotFound { entity: String, id: i64 },

    #[error("데이터베이스 연결 실패: {0}")]
    DatabaseConnectionError(String),

    #[error("데이터베이스 락 획득 실패: {0}")]
    LockError(String),

    #[error("데이터베이스 트랜잭션 실패: {0}")]
    DatabaseTransactionError(String),

    #[error("데이터베이스 질의 실패: {0}")]
    DatabaseQueryError(String),

    #[error("유일 제약 위반: {0}")]
    UniqueConstraintViolation(String),

    #[error("외래키 제약 위반: {0}")]
    ForeignKeyViolation(String),

    // ===== 통용 오류 =====
    #[error("내부 오류: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// From<rusqlite::Error> 구현
impl From<rusqlite::Error> for RepositoryError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(_, Some(msg)) => {
                if msg.contains("UNIQUE") {
                    RepositoryError::UniqueConstraintViolation(msg)
                } else if msg.contains("FOREIGN KEY") {
                    RepositoryError::ForeignKeyViolation(msg)
                } else {
                    RepositoryError::DatabaseQueryError(msg)
                }
            }
            _ => RepositoryError::DatabaseQueryError(err.to_string()),
        }
    }
}

/// Result 타입 별칭
pub type RepositoryResult<T> = Result<T, RepositoryError>;
