// ==========================================
// 설비투자비 한계돌파 실적 관리 시스템 - 실행 진입점
// ==========================================
// 기술 스택: Rust + SQLite
// 라이브러리 모드의 상태 점검용 진입점: DB 를 열고 현황을 출력한다
// ==========================================

use invest_breakthrough::app::{get_default_db_path, AppState};
use invest_breakthrough::engine::FilterSpec;
use invest_breakthrough::logging;

fn main() {
    // 로그 시스템 초기화
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{}", invest_breakthrough::APP_NAME);
    tracing::info!("시스템 버전: {}", invest_breakthrough::VERSION);
    tracing::info!("==================================================");

    // 데이터베이스 경로 (인자 우선, 없으면 기본 경로)
    let db_path = std::env::args().nth(1).unwrap_or_else(get_default_db_path);
    tracing::info!("데이터베이스 사용: {}", db_path);

    // AppState 생성
    let app_state = match AppState::new(db_path) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!("AppState 초기화 실패: {}", e);
            std::process::exit(1);
        }
    };

    // 현황 요약 출력
    match app_state.dashboard_api.overview(&FilterSpec::all()) {
        Ok(overview) => {
            tracing::info!("등록 레코드: {}건", overview.totals.count);
            tracing::info!(
                "Base 금액 합계: {:.1}억원 / 절감 목표: {:.1}억원 / 절감 실적: {:.1}억원",
                overview.totals.base_amount,
                overview.totals.saving_target,
                overview.totals.saving_actual
            );
        }
        Err(e) => {
            tracing::error!("대시보드 조회 실패: {}", e);
            std::process::exit(1);
        }
    }
}
