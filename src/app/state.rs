// ==========================================
// 설비투자비 실적 관리 - 애플리케이션 상태
// ==========================================
// 역할: 애플리케이션 수준의 공유 상태와 API 인스턴스 관리
// ==========================================

use std::sync::{Arc, Mutex};

use crate::api::{DashboardApi, InvestmentApi};
use crate::config::ReportingCatalog;
use crate::db;
use crate::repository::InvestmentRepository;

/// 애플리케이션 상태
///
/// 모든 API 인스턴스와 공유 자원을 포함한다
pub struct AppState {
    /// 데이터베이스 경로
    pub db_path: String,

    /// 투자 레코드 API
    pub investment_api: Arc<InvestmentApi>,

    /// 대시보드 API
    pub dashboard_api: Arc<DashboardApi>,
}

impl AppState {
    /// 새 AppState 인스턴스 생성
    ///
    /// # 인자
    /// - db_path: 데이터베이스 파일 경로
    ///
    /// # 설명
    /// 이 메서드는:
    /// 1. 공유 연결을 열고 공통 PRAGMA 와 스키마를 적용
    /// 2. Repository 를 초기화
    /// 3. 기본 카탈로그로 모든 API 인스턴스 생성
    pub fn new(db_path: String) -> Result<Self, String> {
        Self::with_catalog(db_path, ReportingCatalog::default())
    }

    /// 카탈로그를 지정해서 AppState 생성 (배포 환경별 덮어쓰기용)
    pub fn with_catalog(db_path: String, catalog: ReportingCatalog) -> Result<Self, String> {
        tracing::info!("AppState 초기화, 데이터베이스 경로: {}", db_path);

        // 공유 연결 생성 (PRAGMA 통일 + 스키마 부트스트랩)
        let conn = db::open_sqlite_connection(&db_path)
            .map_err(|e| format!("데이터베이스를 열 수 없음: {}", e))?;
        db::init_schema(&conn).map_err(|e| format!("스키마 초기화 실패: {}", e))?;
        let conn = Arc::new(Mutex::new(conn));

        // ==========================================
        // Repository 계층 초기화
        // ==========================================
        let investment_repo = Arc::new(InvestmentRepository::from_connection(conn));

        // ==========================================
        // API 계층 초기화
        // ==========================================
        let investment_api = Arc::new(InvestmentApi::new(
            Arc::clone(&investment_repo),
            catalog.clone(),
        ));
        let dashboard_api = Arc::new(DashboardApi::new(investment_repo, catalog));

        tracing::info!("AppState 초기화 완료");

        Ok(Self {
            db_path,
            investment_api,
            dashboard_api,
        })
    }
}

/// 기본 데이터베이스 경로
///
/// 사용자 로컬 데이터 디렉터리 아래 invest-breakthrough/invest.db.
/// 디렉터리 생성에 실패하면 현재 디렉터리로 떨어진다.
pub fn get_default_db_path() -> String {
    let base = dirs::data_local_dir().unwrap_or_else(|| std::path::PathBuf::from("."));
    let dir = base.join("invest-breakthrough");
    if let Err(e) = std::fs::create_dir_all(&dir) {
        tracing::warn!("데이터 디렉터리 생성 실패({}), 현재 디렉터리 사용", e);
        return "invest.db".to_string();
    }
    dir.join("invest.db").to_string_lossy().to_string()
}
