// ==========================================
// 설비투자비 실적 관리 - 애플리케이션 계층
// ==========================================
// 역할: 상태 조립 (composition root)
// ==========================================

pub mod state;

pub use state::{get_default_db_path, AppState};
