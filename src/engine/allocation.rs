// ==========================================
// 설비투자비 실적 관리 - 월별 배분 엔진
// ==========================================
// 역할: 레코드의 절감 목표/실적 총액을 고정 지평(24개월) 위에 배치
// 모델: 단일 발생 시점 모델 - 기간에 걸쳐 나누지 않고,
//       발주 목표 월에 목표 전액, 발주 실적 월에 실적 전액이 실린다
// 원칙: 무상태 엔진, 동일 입력이면 동일 출력 (교체 의미론의 전제)
// ==========================================

use crate::domain::investment::{InvestmentRecord, MonthlyAllocation};
use crate::domain::types::YearMonth;

// ==========================================
// MonthlyAllocator - 월별 배분 엔진
// ==========================================
#[derive(Debug, Default)]
pub struct MonthlyAllocator;

impl MonthlyAllocator {
    /// 새 배분 엔진 생성
    pub fn new() -> Self {
        Self
    }

    /// 지평 전체에 대한 배분 행 생성
    ///
    /// # 인자
    /// - record: 대상 레코드 (order_target/order_actual, saving_target/saving_actual 사용)
    /// - horizon: 고정 지평 연월 목록 (오름차순 24개)
    ///
    /// # 반환
    /// 지평의 모든 월에 대해 1행씩. 발주 월이 지평에 있으면 그 월에 전액,
    /// 나머지 월은 0. 발주 월이 비어 있거나 지평 밖이면 해당 축은 전부 0
    /// (오류가 아님 - 레코드 합계에는 그대로 남는다).
    pub fn allocate(
        &self,
        record: &InvestmentRecord,
        horizon: &[YearMonth],
    ) -> Vec<MonthlyAllocation> {
        horizon
            .iter()
            .map(|&month| MonthlyAllocation {
                investment_id: record.id,
                year_month: month,
                monthly_target: if record.order_target == Some(month) {
                    record.saving_target
                } else {
                    0.0
                },
                monthly_actual: if record.order_actual == Some(month) {
                    record.saving_actual
                } else {
                    0.0
                },
            })
            .collect()
    }
}
