// ==========================================
// 설비투자비 실적 관리 - API 계층 오류 타입
// ==========================================
// 역할: API 오류 정의, Repository 오류를 호출자 친화적 오류로 변환
// 정책: 저장 실패는 명확히 보고한다 - 데이터를 조용히 버리지 않는다
// ==========================================

use crate::repository::error::RepositoryError;
use thiserror::Error;

/// API 계층 오류 타입
#[derive(Error, Debug)]
pub enum ApiError {
    // ===== 입력/업무 규칙 오류 =====
    #[error("무효 입력: {0}")]
    InvalidInput(String),

    #[error("데이터 없음: {0}")]
    NotFound(String),

    // ===== 데이터 접근 오류 =====
    #[error("데이터베이스 오류: {0}")]
    DatabaseError(String),

    #[error("데이터베이스 트랜잭션 실패: {0}")]
    DatabaseTransactionError(String),

    // ===== 통용 오류 =====
    #[error("내부 오류: {0}")]
    InternalError(String),
}

// Repository 오류 -> API 오류 변환
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{} id={}", entity, id))
            }
            RepositoryError::DatabaseTransactionError(msg) => {
                ApiError::DatabaseTransactionError(msg)
            }
            RepositoryError::LockError(msg) | RepositoryError::DatabaseConnectionError(msg) => {
                ApiError::DatabaseError(msg)
            }
            other => ApiError::DatabaseError(other.to_string()),
        }
    }
}

/// Result 타입 별칭
pub type ApiResult<T> = Result<T, ApiError>;
