// ==========================================
// 설비투자비 실적 관리 - 집계/필터 엔진
// ==========================================
// 역할: 레코드 집합에 대한 등치 필터, 수치 필드 합산, 차원별 그룹 집계
// 원칙: 필터 조건은 불변 값(FilterSpec)으로 호출마다 명시적으로 전달된다
//       (과거 구현의 암묵적 전역 화면 상태를 대체)
// 원칙: 그룹 표시 순서는 카탈로그가 결정하며 데이터 순서와 무관하다
// ==========================================

use crate::config::ReportingCatalog;
use crate::domain::investment::InvestmentRecord;
use crate::domain::types::{InvestType, Product, Purpose, ReduceCategory};
use serde::{Deserialize, Serialize};

// ==========================================
// FilterSpec - 등치 필터 조건
// ==========================================
// 비어 있는 필드는 전체 일치 (와일드카드), 채워진 필드는 AND 결합
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    pub product: Option<Product>,
    pub corporation: Option<String>,
    pub invest_type: Option<InvestType>,
    pub purpose: Option<Purpose>,
}

impl FilterSpec {
    /// 전체 일치 필터
    pub fn all() -> Self {
        Self::default()
    }

    /// 레코드가 필터를 통과하는지 판정
    pub fn matches(&self, record: &InvestmentRecord) -> bool {
        self.product.map_or(true, |p| record.product == p)
            && self
                .corporation
                .as_ref()
                .map_or(true, |c| record.corporation == *c)
            && self.invest_type.map_or(true, |t| record.invest_type == t)
            && self.purpose.map_or(true, |p| record.purpose == p)
    }
}

// ==========================================
// NumericField - 합산 가능한 수치 필드
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NumericField {
    BaseAmount,
    OrderPriceTarget,
    OrderPriceActual,
    SavingTarget,
    SavingActual,
    Reduce(ReduceCategory),
}

impl NumericField {
    /// 레코드에서 해당 필드 값 추출
    pub fn value_of(&self, record: &InvestmentRecord) -> f64 {
        match self {
            NumericField::BaseAmount => record.base_amount,
            NumericField::OrderPriceTarget => record.order_price_target,
            NumericField::OrderPriceActual => record.order_price_actual,
            NumericField::SavingTarget => record.saving_target,
            NumericField::SavingActual => record.saving_actual,
            NumericField::Reduce(category) => record.reduction(*category),
        }
    }
}

// ==========================================
// GroupDimension - 그룹 집계 차원
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GroupDimension {
    Product,
    Corporation,
    InvestType,
    Purpose,
}

/// 그룹 1개의 합산 결과
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupSum {
    /// 그룹 라벨 (제품명/법인코드/유형/목적)
    pub label: String,
    /// 그룹에 속한 레코드 수
    pub count: usize,
    /// 요청 필드의 합계 (억원)
    pub sum: f64,
}

/// 투자 유형별 KPI 요약 (대시보드 상단)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeSummary {
    pub invest_type: InvestType,
    pub count: usize,
    pub base_amount: f64,
    pub saving_actual: f64,
}

/// 절감 활동 카테고리 분해 (절감 실적 합계 + ①~⑨ 카테고리 합계)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub total_saving_actual: f64,
    /// ①~⑨ 순서의 카테고리 합계
    pub categories: [f64; 9],
}

// ==========================================
// InvestmentAggregator - 집계/필터 엔진
// ==========================================
// 무상태 엔진: 카탈로그(그룹 순서)만 들고 있고 데이터는 호출마다 받는다
pub struct InvestmentAggregator {
    catalog: ReportingCatalog,
}

impl InvestmentAggregator {
    /// 새 집계 엔진 생성
    pub fn new(catalog: ReportingCatalog) -> Self {
        Self { catalog }
    }

    /// 필터 적용 (제한 연산)
    pub fn apply<'a>(
        &self,
        records: &'a [InvestmentRecord],
        filter: &FilterSpec,
    ) -> Vec<&'a InvestmentRecord> {
        records.iter().filter(|r| filter.matches(r)).collect()
    }

    /// 부분집합에 대한 수치 필드 합산
    pub fn sum_field(&self, records: &[&InvestmentRecord], field: NumericField) -> f64 {
        records.iter().map(|r| field.value_of(r)).sum()
    }

    /// 차원별 그룹 합산
    ///
    /// 차원의 정규 값 목록(카탈로그 순서)마다 filter-then-sum 을 반복한다.
    /// 법인 차원은 카탈로그에 없는 법인 코드를 버린다 (원 시스템과 동일).
    pub fn group_sums(
        &self,
        records: &[&InvestmentRecord],
        dimension: GroupDimension,
        field: NumericField,
    ) -> Vec<GroupSum> {
        self.group_labels(dimension)
            .into_iter()
            .map(|label| {
                let members: Vec<&&InvestmentRecord> = records
                    .iter()
                    .filter(|r| Self::group_label(r, dimension) == label)
                    .collect();
                GroupSum {
                    count: members.len(),
                    sum: members.iter().map(|r| field.value_of(r)).sum(),
                    label,
                }
            })
            .collect()
    }

    /// 투자 유형별 KPI 요약 (건수 / Base 금액 / 절감 실적)
    pub fn type_summary(&self, records: &[&InvestmentRecord]) -> Vec<TypeSummary> {
        InvestType::ALL
            .iter()
            .map(|&invest_type| {
                let members: Vec<&&InvestmentRecord> = records
                    .iter()
                    .filter(|r| r.invest_type == invest_type)
                    .collect();
                TypeSummary {
                    invest_type,
                    count: members.len(),
                    base_amount: members.iter().map(|r| r.base_amount).sum(),
                    saving_actual: members.iter().map(|r| r.saving_actual).sum(),
                }
            })
            .collect()
    }

    /// 절감 활동 카테고리 분해
    pub fn category_breakdown(&self, records: &[&InvestmentRecord]) -> CategoryBreakdown {
        let mut categories = [0.0; 9];
        for record in records {
            for (slot, amount) in categories.iter_mut().zip(record.reductions.iter()) {
                *slot += amount;
            }
        }
        CategoryBreakdown {
            total_saving_actual: records.iter().map(|r| r.saving_actual).sum(),
            categories,
        }
    }

    /// 차원의 정규 그룹 라벨 목록 (표시 순서 고정)
    fn group_labels(&self, dimension: GroupDimension) -> Vec<String> {
        match dimension {
            GroupDimension::Product => self
                .catalog
                .products
                .iter()
                .map(|p| p.as_str().to_string())
                .collect(),
            GroupDimension::Corporation => self.catalog.all_corporations_ordered(),
            GroupDimension::InvestType => InvestType::ALL
                .iter()
                .map(|t| t.as_str().to_string())
                .collect(),
            GroupDimension::Purpose => self
                .catalog
                .purposes
                .iter()
                .map(|p| p.as_str().to_string())
                .collect(),
        }
    }

    /// 레코드가 속하는 그룹의 라벨
    fn group_label(record: &InvestmentRecord, dimension: GroupDimension) -> String {
        match dimension {
            GroupDimension::Product => record.product.as_str().to_string(),
            GroupDimension::Corporation => record.corporation.clone(),
            GroupDimension::InvestType => record.invest_type.as_str().to_string(),
            GroupDimension::Purpose => record.purpose.as_str().to_string(),
        }
    }
}
