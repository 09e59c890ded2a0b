// ==========================================
// 설비투자비 실적 관리 - 누적 시계열 엔진
// ==========================================
// 역할: 월별 배분 행을 합산한 월별 시계열과 차트 오버레이용
//       누적(prefix sum) 시계열 생성
// 입력: 월별 배분 엔진의 출력 (호출자가 선택한 레코드 부분집합으로 제한)
// 원칙: 누적 합은 매 단계에서 소수 2자리로 반올림한다
//       (부동소수 오차가 표시 누적값에 번지는 것을 막기 위함)
// ==========================================

use crate::domain::investment::MonthlyAllocation;
use crate::domain::types::YearMonth;
use serde::{Deserialize, Serialize};

// ==========================================
// MonthlySeries - 월별 합계 시계열
// ==========================================
// months / target / actual 은 같은 길이의 평행 시퀀스
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySeries {
    pub months: Vec<YearMonth>,
    pub target: Vec<f64>,
    pub actual: Vec<f64>,
}

// ==========================================
// CumulativeSeries - 누적 시계열
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CumulativeSeries {
    pub target: Vec<f64>,
    pub actual: Vec<f64>,
}

// ==========================================
// CumulativeSeriesBuilder - 누적 시계열 엔진
// ==========================================
#[derive(Debug, Default)]
pub struct CumulativeSeriesBuilder;

impl CumulativeSeriesBuilder {
    /// 새 시계열 엔진 생성
    pub fn new() -> Self {
        Self
    }

    /// 배분 행 합산 -> 월별 시계열
    ///
    /// # 인자
    /// - allocations: 선택된 부분집합의 월별 배분 행 (여러 레코드 혼합 가능)
    /// - months: 출력할 연월 목록 (지평 전체 24개 또는 1개년 12개)
    ///
    /// # 반환
    /// 각 월의 목표/실적 합계 (소수 2자리 반올림). months 에 없는 연월의
    /// 배분은 버려진다 (지평 밖 발주 월은 원래 전부 0 이므로 손실 없음).
    pub fn monthly_series(
        &self,
        allocations: &[&MonthlyAllocation],
        months: &[YearMonth],
    ) -> MonthlySeries {
        let mut target = Vec::with_capacity(months.len());
        let mut actual = Vec::with_capacity(months.len());

        for &month in months {
            let mut t = 0.0;
            let mut a = 0.0;
            for alloc in allocations.iter().filter(|al| al.year_month == month) {
                t += alloc.monthly_target;
                a += alloc.monthly_actual;
            }
            target.push(round2(t));
            actual.push(round2(a));
        }

        MonthlySeries {
            months: months.to_vec(),
            target,
            actual,
        }
    }

    /// 누적(prefix sum) 시퀀스
    ///
    /// 각 항목은 해당 인덱스까지의 누계이며, 매 단계 소수 2자리로 반올림된다.
    pub fn cumulative(&self, values: &[f64]) -> Vec<f64> {
        let mut running = 0.0;
        values
            .iter()
            .map(|v| {
                running = round2(running + v);
                running
            })
            .collect()
    }

    /// 월별 시계열 -> 누적 목표/실적 평행 시퀀스
    pub fn build(&self, series: &MonthlySeries) -> CumulativeSeries {
        CumulativeSeries {
            target: self.cumulative(&series.target),
            actual: self.cumulative(&series.actual),
        }
    }
}

/// 소수 2자리 반올림
fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
