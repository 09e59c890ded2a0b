// ==========================================
// 설비투자비 실적 관리 - 절감율 판정 엔진
// ==========================================
// 역할: 레코드 1건의 절감율 목표/실적과 신호등 판정
// 원칙: 무상태 엔진, 모든 메서드는 순수 함수
// 원칙: 수치 보정은 입력 경계에서 끝났으므로 여기서는 오류가 없다
// ==========================================

use crate::domain::investment::InvestmentRecord;
use crate::domain::types::{Product, Signal};
use serde::{Deserialize, Serialize};

/// 절감율 목표 (%): ES 제품
pub const RATE_TARGET_HIGH: f64 = 50.0;

/// 절감율 목표 (%): 그 외 제품
pub const RATE_TARGET_STANDARD: f64 = 30.0;

// ==========================================
// DerivedMetrics - 파생 지표
// ==========================================
// 저장되지 않고 조회 시마다 계산된다
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    /// 절감율 목표 (%)
    pub rate_target: f64,
    /// 절감율 실적 (%). Base 금액이 없으면 None ("데이터 없음")
    pub rate_actual: Option<f64>,
    /// 신호등 판정
    pub signal: Signal,
}

// ==========================================
// MetricDeriver - 절감율 판정 엔진
// ==========================================
#[derive(Debug, Default)]
pub struct MetricDeriver;

impl MetricDeriver {
    /// 새 판정 엔진 생성
    pub fn new() -> Self {
        Self
    }

    /// 절감율 목표: 제품만으로 결정된다
    pub fn rate_target(&self, product: Product) -> f64 {
        if product == Product::EnergySolution {
            RATE_TARGET_HIGH
        } else {
            RATE_TARGET_STANDARD
        }
    }

    /// 절감율 실적 (%, 소수 1자리 반올림)
    ///
    /// # 반환
    /// - None: Base 금액이 0 이하 (판정 불가)
    /// - Some(0.0): Base 금액은 있으나 절감 실적이 0
    pub fn rate_actual(&self, base_amount: f64, saving_actual: f64) -> Option<f64> {
        if base_amount <= 0.0 {
            return None;
        }
        Some(round1(saving_actual / base_amount * 100.0))
    }

    /// 레코드 1건의 파생 지표 계산
    pub fn derive(&self, record: &InvestmentRecord) -> DerivedMetrics {
        let rate_target = self.rate_target(record.product);
        let rate_actual = self.rate_actual(record.base_amount, record.saving_actual);

        let signal = match rate_actual {
            None => Signal::Gray,
            Some(actual) if actual >= rate_target => Signal::Green,
            Some(_) => Signal::Yellow,
        };

        DerivedMetrics {
            rate_target,
            rate_actual,
            signal,
        }
    }
}

/// 소수 1자리 반올림
fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::InvestType;

    fn record(product: Product, base: f64, saving_actual: f64) -> InvestmentRecord {
        InvestmentRecord {
            invest_type: InvestType::Expansion,
            product,
            base_amount: base,
            saving_actual,
            ..Default::default()
        }
    }

    #[test]
    fn test_rate_target_제품별() {
        let deriver = MetricDeriver::new();
        assert_eq!(deriver.rate_target(Product::EnergySolution), 50.0);
        assert_eq!(deriver.rate_target(Product::Kitchen), 30.0);
        assert_eq!(deriver.rate_target(Product::Components), 30.0);
    }

    #[test]
    fn test_es_달성_green() {
        // ES, Base 10, 절감 6 -> 목표 50 / 실적 60.0 / Green
        let deriver = MetricDeriver::new();
        let m = deriver.derive(&record(Product::EnergySolution, 10.0, 6.0));
        assert_eq!(m.rate_target, 50.0);
        assert_eq!(m.rate_actual, Some(60.0));
        assert_eq!(m.signal, Signal::Green);
    }

    #[test]
    fn test_일반제품_미달_yellow() {
        // 일반 제품, Base 10, 절감 2 -> 목표 30 / 실적 20.0 / Yellow
        let deriver = MetricDeriver::new();
        let m = deriver.derive(&record(Product::Living, 10.0, 2.0));
        assert_eq!(m.rate_target, 30.0);
        assert_eq!(m.rate_actual, Some(20.0));
        assert_eq!(m.signal, Signal::Yellow);
    }

    #[test]
    fn test_base없음_gray() {
        // Base 0 이면 절감 실적이 있어도 판정 불가
        let deriver = MetricDeriver::new();
        let m = deriver.derive(&record(Product::Kitchen, 0.0, 5.0));
        assert_eq!(m.rate_actual, None);
        assert_eq!(m.signal, Signal::Gray);
    }

    #[test]
    fn test_절감실적0_수치0() {
        // Base 가 있으면 절감 0 도 "0.0%" 로 판정된다 (데이터 없음 아님)
        let deriver = MetricDeriver::new();
        let m = deriver.derive(&record(Product::Kitchen, 10.0, 0.0));
        assert_eq!(m.rate_actual, Some(0.0));
        assert_eq!(m.signal, Signal::Yellow);
    }

    #[test]
    fn test_경계값_목표와동일() {
        // 실적율 == 목표율 은 Green
        let deriver = MetricDeriver::new();
        let m = deriver.derive(&record(Product::Kitchen, 10.0, 3.0));
        assert_eq!(m.rate_actual, Some(30.0));
        assert_eq!(m.signal, Signal::Green);
    }

    #[test]
    fn test_반올림_소수1자리() {
        let deriver = MetricDeriver::new();
        // 1/3 -> 33.333..% -> 33.3
        assert_eq!(deriver.rate_actual(3.0, 1.0), Some(33.3));
    }
}
