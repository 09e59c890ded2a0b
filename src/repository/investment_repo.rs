// ==========================================
// 설비투자비 실적 관리 - 투자 레코드 저장소
// ==========================================
// 원칙: Repository 는 업무 로직을 갖지 않는다
// 원칙: 레코드 저장과 월별 배분 교체는 단일 트랜잭션이다
//       (과거 구현의 upsert → delete → insert 분리는 부분 실패 창이 있었음)
// ==========================================

use crate::db;
use crate::domain::investment::{InvestmentRecord, MonthlyAllocation};
use crate::domain::types::{year_month_or_none, YearMonth};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension, Row, Transaction};
use std::sync::{Arc, Mutex, MutexGuard};

// ==========================================
// InvestmentRepository - 투자 레코드 저장소
// ==========================================

/// 투자 레코드 저장소
/// 역할: investment / investment_monthly 두 테이블의 CRUD 관리
pub struct InvestmentRepository {
    conn: Arc<Mutex<Connection>>,
}

impl InvestmentRepository {
    /// 새 저장소 인스턴스 생성
    ///
    /// # 인자
    /// - db_path: 데이터베이스 파일 경로
    ///
    /// # 반환
    /// - Ok(InvestmentRepository): 저장소 인스턴스 (스키마 부트스트랩 포함)
    /// - Err: 데이터베이스 연결 오류
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = db::open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        db::init_schema(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 기존 연결로 저장소 인스턴스 생성
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 데이터베이스 연결 획득
    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 현재 시각 문자열 ("YYYY-MM-DD HH:MM")
    fn now_stamp() -> String {
        chrono::Local::now().format("%Y-%m-%d %H:%M").to_string()
    }

    // ==========================================
    // 저장 (레코드 + 월별 배분, 단일 트랜잭션)
    // ==========================================

    /// 신규 레코드 등록
    ///
    /// # 인자
    /// - record: 저장할 레코드 (id/타임스탬프는 무시되고 저장소가 부여)
    /// - allocations: 월별 배분 행 (investment_id 는 새 id 로 치환됨)
    ///
    /// # 반환
    /// - Ok(i64): 부여된 레코드 id
    /// - Err: 데이터베이스 오류 (트랜잭션 전체 롤백)
    pub fn create(
        &self,
        record: &InvestmentRecord,
        allocations: &[MonthlyAllocation],
    ) -> RepositoryResult<i64> {
        let mut conn = self.get_conn()?;
        let tx = conn
            .transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        let now = Self::now_stamp();
        tx.execute(
            r#"
            INSERT INTO investment (
                invest_type, product, corporation, purpose, invest_item,
                order_target, order_actual, setup_target, setup_actual,
                mass_target, mass_actual, delay_reason,
                base_amount, order_price_target, order_price_actual,
                saving_target, saving_actual,
                reduce_1, reduce_2, reduce_3, reduce_4, reduce_5,
                reduce_6, reduce_7, reduce_8, reduce_9,
                saving_total, activity, created_at, updated_at
            ) VALUES (
                ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12,
                ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20, ?21, ?22,
                ?23, ?24, ?25, ?26, ?27, ?28, ?29, ?30
            )
            "#,
            record_params(record, &now, &now),
        )?;
        let id = tx.last_insert_rowid();

        insert_allocations(&tx, id, allocations)?;

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        tracing::info!("투자 레코드 등록 완료: id={}", id);
        Ok(id)
    }

    /// 기존 레코드 갱신
    ///
    /// 월별 배분은 삭제 후 전량 재삽입된다 (교체 의미론, 병합 아님).
    ///
    /// # 반환
    /// - Err(NotFound): 해당 id 의 레코드가 없음
    pub fn update(
        &self,
        id: i64,
        record: &InvestmentRecord,
        allocations: &[MonthlyAllocation],
    ) -> RepositoryResult<()> {
        let mut conn = self.get_conn()?;
        let tx = conn
            .transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        let now = Self::now_stamp();
        let affected = tx.execute(
            r#"
            UPDATE investment SET
                invest_type = ?1, product = ?2, corporation = ?3, purpose = ?4,
                invest_item = ?5,
                order_target = ?6, order_actual = ?7, setup_target = ?8,
                setup_actual = ?9, mass_target = ?10, mass_actual = ?11,
                delay_reason = ?12,
                base_amount = ?13, order_price_target = ?14, order_price_actual = ?15,
                saving_target = ?16, saving_actual = ?17,
                reduce_1 = ?18, reduce_2 = ?19, reduce_3 = ?20, reduce_4 = ?21,
                reduce_5 = ?22, reduce_6 = ?23, reduce_7 = ?24, reduce_8 = ?25,
                reduce_9 = ?26,
                saving_total = ?27, activity = ?28, updated_at = ?30
            WHERE id = ?31
            "#,
            rusqlite::params_from_iter(
                record_param_values(record, "", &now)
                    .into_iter()
                    .chain(std::iter::once(rusqlite::types::Value::Integer(id))),
            ),
        )?;

        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "investment".to_string(),
                id,
            });
        }

        tx.execute("DELETE FROM investment_monthly WHERE investment_id = ?1", params![id])?;
        insert_allocations(&tx, id, allocations)?;

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        tracing::info!("투자 레코드 갱신 완료: id={}", id);
        Ok(())
    }

    /// 레코드 삭제 (월별 배분 포함)
    ///
    /// # 반환
    /// - Err(NotFound): 해당 id 의 레코드가 없음
    pub fn delete(&self, id: i64) -> RepositoryResult<()> {
        let mut conn = self.get_conn()?;
        let tx = conn
            .transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        let affected = tx.execute("DELETE FROM investment WHERE id = ?1", params![id])?;
        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "investment".to_string(),
                id,
            });
        }
        // 외래키 CASCADE 가 꺼진 연결에서도 정합성이 깨지지 않도록 명시 삭제
        tx.execute("DELETE FROM investment_monthly WHERE investment_id = ?1", params![id])?;

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        tracing::info!("투자 레코드 삭제 완료: id={}", id);
        Ok(())
    }

    // ==========================================
    // 조회
    // ==========================================

    /// id 로 단건 조회
    pub fn find_by_id(&self, id: i64) -> RepositoryResult<Option<InvestmentRecord>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM investment WHERE id = ?1",
            RECORD_COLUMNS
        ))?;

        let record = stmt.query_row(params![id], map_investment_row).optional()?;
        Ok(record)
    }

    /// 전체 레코드 조회 (최신 등록 우선, id 내림차순)
    pub fn list_all(&self) -> RepositoryResult<Vec<InvestmentRecord>> {
        let conn = self.get_conn()?;
        let mut stmt = stmt_list_all(&conn)?;

        let records = stmt
            .query_map([], map_investment_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }

    /// 특정 레코드의 월별 배분 조회 (연월 오름차순)
    pub fn find_allocations(&self, id: i64) -> RepositoryResult<Vec<MonthlyAllocation>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT investment_id, year_month, monthly_target, monthly_actual
            FROM investment_monthly
            WHERE investment_id = ?1
            ORDER BY year_month
            "#,
        )?;

        let allocations = stmt
            .query_map(params![id], map_allocation_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(allocations)
    }

    /// 전체 월별 배분 조회
    pub fn list_allocations(&self) -> RepositoryResult<Vec<MonthlyAllocation>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT investment_id, year_month, monthly_target, monthly_actual
            FROM investment_monthly
            ORDER BY investment_id, year_month
            "#,
        )?;

        let allocations = stmt
            .query_map([], map_allocation_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(allocations)
    }
}

// ==========================================
// 내부 헬퍼
// ==========================================

/// SELECT 컬럼 목록 (map_investment_row 의 인덱스와 1:1)
const RECORD_COLUMNS: &str = "id, invest_type, product, corporation, purpose, invest_item, \
     order_target, order_actual, setup_target, setup_actual, mass_target, mass_actual, \
     delay_reason, base_amount, order_price_target, order_price_actual, \
     saving_target, saving_actual, \
     reduce_1, reduce_2, reduce_3, reduce_4, reduce_5, reduce_6, reduce_7, reduce_8, reduce_9, \
     saving_total, activity, created_at, updated_at";

fn stmt_list_all(conn: &Connection) -> rusqlite::Result<rusqlite::Statement<'_>> {
    conn.prepare(&format!(
        "SELECT {} FROM investment ORDER BY id DESC",
        RECORD_COLUMNS
    ))
}

/// 행 -> 도메인 레코드 매핑
///
/// 분류 라벨이 손상된 행은 기본값으로 보정하고 경고를 남긴다 (조회는 끊지 않음).
fn map_investment_row(row: &Row<'_>) -> rusqlite::Result<InvestmentRecord> {
    let parse_label = |idx: usize| -> rusqlite::Result<String> { row.get(idx) };

    let invest_type_raw = parse_label(1)?;
    let product_raw = parse_label(2)?;
    let purpose_raw = parse_label(4)?;

    let invest_type = invest_type_raw.parse().unwrap_or_else(|e| {
        tracing::warn!("투자 유형 라벨 보정: {}", e);
        Default::default()
    });
    let product = product_raw.parse().unwrap_or_else(|e| {
        tracing::warn!("제품 라벨 보정: {}", e);
        Default::default()
    });
    let purpose = purpose_raw.parse().unwrap_or_else(|e| {
        tracing::warn!("투자 목적 라벨 보정: {}", e);
        Default::default()
    });

    let month_at = |idx: usize| -> rusqlite::Result<Option<YearMonth>> {
        let raw: Option<String> = row.get(idx)?;
        Ok(year_month_or_none(raw.as_deref()))
    };

    Ok(InvestmentRecord {
        id: row.get(0)?,
        invest_type,
        product,
        corporation: row.get(3)?,
        purpose,
        invest_item: row.get(5)?,
        order_target: month_at(6)?,
        order_actual: month_at(7)?,
        setup_target: month_at(8)?,
        setup_actual: month_at(9)?,
        mass_target: month_at(10)?,
        mass_actual: month_at(11)?,
        delay_reason: row.get(12)?,
        base_amount: row.get(13)?,
        order_price_target: row.get(14)?,
        order_price_actual: row.get(15)?,
        saving_target: row.get(16)?,
        saving_actual: row.get(17)?,
        reductions: [
            row.get(18)?,
            row.get(19)?,
            row.get(20)?,
            row.get(21)?,
            row.get(22)?,
            row.get(23)?,
            row.get(24)?,
            row.get(25)?,
            row.get(26)?,
        ],
        saving_total: row.get(27)?,
        activity: row.get(28)?,
        created_at: row.get(29)?,
        updated_at: row.get(30)?,
    })
}

fn map_allocation_row(row: &Row<'_>) -> rusqlite::Result<MonthlyAllocation> {
    let ym_raw: String = row.get(1)?;
    let year_month = ym_raw.parse().map_err(|e: String| {
        rusqlite::Error::FromSqlConversionFailure(
            1,
            rusqlite::types::Type::Text,
            Box::new(std::io::Error::new(std::io::ErrorKind::InvalidData, e)),
        )
    })?;

    Ok(MonthlyAllocation {
        investment_id: row.get(0)?,
        year_month,
        monthly_target: row.get(2)?,
        monthly_actual: row.get(3)?,
    })
}

/// INSERT 용 파라미터 (created_at + updated_at 포함 30개)
fn record_params(
    record: &InvestmentRecord,
    created_at: &str,
    updated_at: &str,
) -> impl rusqlite::Params {
    rusqlite::params_from_iter(record_param_values(record, created_at, updated_at))
}

/// 레코드 필드 -> SQL 값 목록
///
/// 순서: INSERT/UPDATE 문의 ?1 ~ ?30 (29번째 created_at 는 UPDATE 에서 바인딩만 되고
/// SET 절에 없으므로 무해하다)
fn record_param_values(
    record: &InvestmentRecord,
    created_at: &str,
    updated_at: &str,
) -> Vec<rusqlite::types::Value> {
    use rusqlite::types::Value;

    let month_value = |m: &Option<YearMonth>| -> Value {
        match m {
            Some(ym) => Value::Text(ym.to_string()),
            None => Value::Null,
        }
    };

    let mut values = vec![
        Value::Text(record.invest_type.as_str().to_string()),
        Value::Text(record.product.as_str().to_string()),
        Value::Text(record.corporation.clone()),
        Value::Text(record.purpose.as_str().to_string()),
        Value::Text(record.invest_item.clone()),
        month_value(&record.order_target),
        month_value(&record.order_actual),
        month_value(&record.setup_target),
        month_value(&record.setup_actual),
        month_value(&record.mass_target),
        month_value(&record.mass_actual),
        Value::Text(record.delay_reason.clone()),
        Value::Real(record.base_amount),
        Value::Real(record.order_price_target),
        Value::Real(record.order_price_actual),
        Value::Real(record.saving_target),
        Value::Real(record.saving_actual),
    ];
    values.extend(record.reductions.iter().map(|v| Value::Real(*v)));
    values.push(Value::Real(record.saving_total));
    values.push(Value::Text(record.activity.clone()));
    values.push(Value::Text(created_at.to_string()));
    values.push(Value::Text(updated_at.to_string()));
    values
}

/// 월별 배분 일괄 삽입 (investment_id 는 저장소가 치환)
fn insert_allocations(
    tx: &Transaction<'_>,
    id: i64,
    allocations: &[MonthlyAllocation],
) -> RepositoryResult<()> {
    let mut stmt = tx.prepare(
        r#"
        INSERT INTO investment_monthly (investment_id, year_month, monthly_target, monthly_actual)
        VALUES (?1, ?2, ?3, ?4)
        "#,
    )?;
    for alloc in allocations {
        stmt.execute(params![
            id,
            alloc.year_month.to_string(),
            alloc.monthly_target,
            alloc.monthly_actual
        ])?;
    }
    Ok(())
}
