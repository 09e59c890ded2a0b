// ==========================================
// 설비투자비 실적 관리 - 대시보드 API
// ==========================================
// 역할: 필터/그룹 집계 뷰와 월별·누적 시계열 뷰 제공
// 구조: API 계층 -> 엔진 계층 (집계/시계열) / 저장 계층 (조회)
// 출력은 전부 동작 없는 직렬화 가능 데이터
// ==========================================

use std::collections::HashSet;
use std::sync::Arc;

use crate::api::error::ApiResult;
use crate::config::ReportingCatalog;
use crate::domain::investment::{InvestmentRecord, MonthlyAllocation};
use crate::domain::types::YearMonth;
use crate::engine::{
    CategoryBreakdown, CumulativeSeriesBuilder, FilterSpec, GroupDimension, GroupSum,
    InvestmentAggregator, NumericField, TypeSummary,
};
use crate::repository::InvestmentRepository;
use serde::{Deserialize, Serialize};

// ==========================================
// 조회 응답 타입
// ==========================================

/// 전체 합계 (필터 적용 후)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TotalSummary {
    pub count: usize,
    pub base_amount: f64,
    pub saving_target: f64,
    pub saving_actual: f64,
}

/// 그룹 1개의 목표/실적 쌍 (제품별/법인별/유형별 차트 행)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupPair {
    pub label: String,
    pub count: usize,
    pub target: f64,
    pub actual: f64,
}

/// 월별 + 누적 시계열 뷰
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySeriesView {
    /// "YYYY-MM" 라벨 (오름차순)
    pub months: Vec<String>,
    pub target: Vec<f64>,
    pub actual: Vec<f64>,
    /// 매 단계 소수 2자리 반올림된 누적 시퀀스
    pub cumulative_target: Vec<f64>,
    pub cumulative_actual: Vec<f64>,
}

/// 대시보드 한 화면 분량의 집계 응답
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardOverview {
    /// 적용된 필터 (응답에 같이 싣는다)
    pub filter: FilterSpec,
    pub totals: TotalSummary,
    /// 투자 유형별 KPI (확장/경상)
    pub type_summaries: Vec<TypeSummary>,
    /// 제품별 Base 금액/절감 실적
    pub base_by_product: Vec<GroupPair>,
    /// 제품별 절감 목표/실적
    pub saving_by_product: Vec<GroupPair>,
    /// 법인별 절감 목표/실적 (KR 고정 선두, 이후 사전순)
    pub saving_by_corporation: Vec<GroupPair>,
    /// 투자 유형별 절감 목표/실적
    pub saving_by_type: Vec<GroupPair>,
    /// 절감 활동 카테고리 분해
    pub category_breakdown: CategoryBreakdown,
    /// 지평 첫 연도 12개월의 월별/누적 시계열
    pub monthly: MonthlySeriesView,
}

// ==========================================
// DashboardApi - 대시보드 API
// ==========================================
pub struct DashboardApi {
    repo: Arc<InvestmentRepository>,
    catalog: ReportingCatalog,
    aggregator: InvestmentAggregator,
    series_builder: CumulativeSeriesBuilder,
}

impl DashboardApi {
    /// 새 API 인스턴스 생성
    pub fn new(repo: Arc<InvestmentRepository>, catalog: ReportingCatalog) -> Self {
        let aggregator = InvestmentAggregator::new(catalog.clone());
        Self {
            repo,
            catalog,
            aggregator,
            series_builder: CumulativeSeriesBuilder::new(),
        }
    }

    /// 대시보드 집계 조회
    ///
    /// 필터는 호출마다 명시적으로 전달되는 불변 값이다.
    pub fn overview(&self, filter: &FilterSpec) -> ApiResult<DashboardOverview> {
        let records = self.repo.list_all()?;
        let subset = self.aggregator.apply(&records, filter);

        let totals = TotalSummary {
            count: subset.len(),
            base_amount: self.aggregator.sum_field(&subset, NumericField::BaseAmount),
            saving_target: self.aggregator.sum_field(&subset, NumericField::SavingTarget),
            saving_actual: self.aggregator.sum_field(&subset, NumericField::SavingActual),
        };

        let monthly = self.series_view(
            &subset,
            &self.catalog.horizon_for_year(self.catalog.first_year()),
        )?;

        let overview = DashboardOverview {
            filter: filter.clone(),
            totals,
            type_summaries: self.aggregator.type_summary(&subset),
            base_by_product: self.group_pair(
                &subset,
                GroupDimension::Product,
                NumericField::BaseAmount,
                NumericField::SavingActual,
            ),
            saving_by_product: self.group_pair(
                &subset,
                GroupDimension::Product,
                NumericField::SavingTarget,
                NumericField::SavingActual,
            ),
            saving_by_corporation: self.group_pair(
                &subset,
                GroupDimension::Corporation,
                NumericField::SavingTarget,
                NumericField::SavingActual,
            ),
            saving_by_type: self.group_pair(
                &subset,
                GroupDimension::InvestType,
                NumericField::SavingTarget,
                NumericField::SavingActual,
            ),
            category_breakdown: self.aggregator.category_breakdown(&subset),
            monthly,
        };
        Ok(overview)
    }

    /// 임의 차원/필드의 그룹 합산 조회
    pub fn group_sums(
        &self,
        filter: &FilterSpec,
        dimension: GroupDimension,
        field: NumericField,
    ) -> ApiResult<Vec<GroupSum>> {
        let records = self.repo.list_all()?;
        let subset = self.aggregator.apply(&records, filter);
        Ok(self.aggregator.group_sums(&subset, dimension, field))
    }

    /// 월별/누적 시계열 조회
    ///
    /// # 인자
    /// - year: Some 이면 해당 연도 12개월, None 이면 지평 전체 24개월
    pub fn monthly_series(
        &self,
        filter: &FilterSpec,
        year: Option<i32>,
    ) -> ApiResult<MonthlySeriesView> {
        let records = self.repo.list_all()?;
        let subset = self.aggregator.apply(&records, filter);

        let months = match year {
            Some(y) => self.catalog.horizon_for_year(y),
            None => self.catalog.horizon(),
        };
        self.series_view(&subset, &months)
    }

    /// 목표/실적 두 필드를 같은 그룹 순서로 묶는다
    fn group_pair(
        &self,
        subset: &[&InvestmentRecord],
        dimension: GroupDimension,
        target_field: NumericField,
        actual_field: NumericField,
    ) -> Vec<GroupPair> {
        let targets = self.aggregator.group_sums(subset, dimension, target_field);
        let actuals = self.aggregator.group_sums(subset, dimension, actual_field);

        targets
            .into_iter()
            .zip(actuals)
            .map(|(t, a)| GroupPair {
                label: t.label,
                count: t.count,
                target: t.sum,
                actual: a.sum,
            })
            .collect()
    }

    /// 부분집합의 월별 + 누적 시계열
    ///
    /// 레코드 부분집합의 id 로 배분 하위 저장소를 제한한 뒤,
    /// 배분 행을 월별로 합산하고 누적을 얹는다.
    fn series_view(
        &self,
        subset: &[&InvestmentRecord],
        months: &[YearMonth],
    ) -> ApiResult<MonthlySeriesView> {
        let ids: HashSet<i64> = subset.iter().map(|r| r.id).collect();
        let allocations = self.repo.list_allocations()?;
        let selected: Vec<&MonthlyAllocation> = allocations
            .iter()
            .filter(|a| ids.contains(&a.investment_id))
            .collect();

        let series = self.series_builder.monthly_series(&selected, months);
        let cumulative = self.series_builder.build(&series);

        Ok(MonthlySeriesView {
            months: series.months.iter().map(|m| m.to_string()).collect(),
            target: series.target,
            actual: series.actual,
            cumulative_target: cumulative.target,
            cumulative_actual: cumulative.actual,
        })
    }
}
