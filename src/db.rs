// ==========================================
// 설비투자비 실적 관리 - SQLite 연결 초기화
// ==========================================
// 목표:
// - 모든 Connection::open 의 PRAGMA 동작 통일 (외래키 켜짐/꺼짐 혼재 방지)
// - busy_timeout 통일, 동시 쓰기 시 간헐적 busy 오류 완화
// - 스키마 부트스트랩 단일화 (본 코드와 테스트가 같은 DDL 사용)
// ==========================================

use rusqlite::Connection;
use rusqlite::OptionalExtension;
use std::time::Duration;

/// 기본 busy_timeout (밀리초)
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// 현재 코드가 기대하는 schema_version
pub const CURRENT_SCHEMA_VERSION: i64 = 1;

/// SQLite 연결에 공통 PRAGMA 적용
///
/// 설명:
/// - foreign_keys 는 "연결마다" 따로 켜야 함
/// - busy_timeout 도 "연결마다" 따로 설정해야 함
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// SQLite 연결을 열고 공통 설정 적용
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// 스키마 부트스트랩
///
/// 투자 실적 레코드(investment)와 월별 배분(investment_monthly) 두 테이블을 생성한다.
/// investment_monthly 는 (investment_id, year_month) 복합 키이며,
/// 레코드 삭제 시 배분 행도 함께 삭제된다 (ON DELETE CASCADE).
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS investment (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            invest_type TEXT NOT NULL,
            product TEXT NOT NULL,
            corporation TEXT NOT NULL,
            purpose TEXT NOT NULL,
            invest_item TEXT NOT NULL DEFAULT '',
            order_target TEXT,
            order_actual TEXT,
            setup_target TEXT,
            setup_actual TEXT,
            mass_target TEXT,
            mass_actual TEXT,
            delay_reason TEXT NOT NULL DEFAULT '',
            base_amount REAL NOT NULL DEFAULT 0,
            order_price_target REAL NOT NULL DEFAULT 0,
            order_price_actual REAL NOT NULL DEFAULT 0,
            saving_target REAL NOT NULL DEFAULT 0,
            saving_actual REAL NOT NULL DEFAULT 0,
            reduce_1 REAL NOT NULL DEFAULT 0,
            reduce_2 REAL NOT NULL DEFAULT 0,
            reduce_3 REAL NOT NULL DEFAULT 0,
            reduce_4 REAL NOT NULL DEFAULT 0,
            reduce_5 REAL NOT NULL DEFAULT 0,
            reduce_6 REAL NOT NULL DEFAULT 0,
            reduce_7 REAL NOT NULL DEFAULT 0,
            reduce_8 REAL NOT NULL DEFAULT 0,
            reduce_9 REAL NOT NULL DEFAULT 0,
            saving_total REAL NOT NULL DEFAULT 0,
            activity TEXT NOT NULL DEFAULT '',
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS investment_monthly (
            investment_id INTEGER NOT NULL,
            year_month TEXT NOT NULL,
            monthly_target REAL NOT NULL DEFAULT 0,
            monthly_actual REAL NOT NULL DEFAULT 0,
            PRIMARY KEY (investment_id, year_month),
            FOREIGN KEY (investment_id) REFERENCES investment(id) ON DELETE CASCADE
        );

        INSERT OR IGNORE INTO schema_version (version) VALUES (1);
        "#,
    )?;
    Ok(())
}

/// schema_version 조회 (테이블이 없으면 None)
pub fn read_schema_version(conn: &Connection) -> rusqlite::Result<Option<i64>> {
    let has_table: bool = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version' LIMIT 1",
            [],
            |_row| Ok(true),
        )
        .optional()?
        .unwrap_or(false);

    if !has_table {
        return Ok(None);
    }

    let v: Option<i64> =
        conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| row.get(0))?;
    Ok(v)
}
