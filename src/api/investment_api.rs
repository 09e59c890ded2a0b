// ==========================================
// 설비투자비 실적 관리 - 투자 레코드 API
// ==========================================
// 역할: 입력 폼 -> 도메인 레코드 변환(관용적 수치 보정), 저장/조회/삭제
// 정책: 저장 = 레코드 upsert + 월별 배분 전량 교체, 단일 트랜잭션
// 정책: saving_total 은 입력을 무시하고 ①~⑨ 합계로 재계산한다
// ==========================================

use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::config::ReportingCatalog;
use crate::domain::investment::{InvestmentRecord, MonthlyAllocation};
use crate::domain::types::{
    non_negative_or_zero, year_month_or_none, InvestType, Product, Purpose, Signal,
};
use crate::engine::{MetricDeriver, MonthlyAllocator};
use crate::repository::InvestmentRepository;
use serde::{Deserialize, Serialize};

// ==========================================
// InvestmentForm - 입력 폼
// ==========================================
// 분류 필드는 고정 열거형으로 강타입, 금액/연월 필드는 화면 입력 그대로의
// 문자열을 받아 단일 보정 단계(non_negative_or_zero / year_month_or_none)를
// 통과시킨다. 보정 정책: 빈 값/해석 불가/음수는 0 (거부하지 않음).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InvestmentForm {
    pub invest_type: InvestType,
    pub product: Product,
    pub corporation: String,
    pub purpose: Purpose,
    pub invest_item: String,

    pub order_target: Option<String>,
    pub order_actual: Option<String>,
    pub setup_target: Option<String>,
    pub setup_actual: Option<String>,
    pub mass_target: Option<String>,
    pub mass_actual: Option<String>,
    pub delay_reason: String,

    pub base_amount: Option<String>,
    pub order_price_target: Option<String>,
    pub order_price_actual: Option<String>,
    pub saving_target: Option<String>,
    pub saving_actual: Option<String>,

    /// ①~⑨ 카테고리 입력
    pub reductions: [Option<String>; 9],

    pub activity: String,
}

impl InvestmentForm {
    /// 폼 -> 도메인 레코드 변환 (수치 보정 + saving_total 재계산)
    pub fn to_record(&self) -> InvestmentRecord {
        let mut reductions = [0.0; 9];
        for (slot, raw) in reductions.iter_mut().zip(self.reductions.iter()) {
            *slot = non_negative_or_zero(raw.as_deref());
        }

        let mut record = InvestmentRecord {
            id: 0,
            invest_type: self.invest_type,
            product: self.product,
            corporation: self.corporation.clone(),
            purpose: self.purpose,
            invest_item: self.invest_item.clone(),
            order_target: year_month_or_none(self.order_target.as_deref()),
            order_actual: year_month_or_none(self.order_actual.as_deref()),
            setup_target: year_month_or_none(self.setup_target.as_deref()),
            setup_actual: year_month_or_none(self.setup_actual.as_deref()),
            mass_target: year_month_or_none(self.mass_target.as_deref()),
            mass_actual: year_month_or_none(self.mass_actual.as_deref()),
            delay_reason: self.delay_reason.clone(),
            base_amount: non_negative_or_zero(self.base_amount.as_deref()),
            order_price_target: non_negative_or_zero(self.order_price_target.as_deref()),
            order_price_actual: non_negative_or_zero(self.order_price_actual.as_deref()),
            saving_target: non_negative_or_zero(self.saving_target.as_deref()),
            saving_actual: non_negative_or_zero(self.saving_actual.as_deref()),
            reductions,
            saving_total: 0.0,
            activity: self.activity.clone(),
            created_at: String::new(),
            updated_at: String::new(),
        };
        // 합계는 항상 재계산 (누적이 아니라 대입)
        record.saving_total = record.reduction_sum();
        record
    }
}

// ==========================================
// InvestmentView - 조회용 파생 뷰
// ==========================================
// 원본 필드 + 파생 지표. 동작 없는 직렬화 가능 데이터이므로
// 프로세스/네트워크 경계를 그대로 넘을 수 있다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvestmentView {
    #[serde(flatten)]
    pub record: InvestmentRecord,

    /// 절감율 목표 (%) - 제품만으로 파생, 저장되지 않음
    pub rate_target: f64,
    /// 절감율 실적 (%) - Base 금액이 없으면 None
    pub rate_actual: Option<f64>,
    /// 신호등 판정
    pub signal: Signal,
    /// 표시용 타임스탬프 (갱신 시각, 없으면 등록 시각)
    pub display_timestamp: String,
}

// ==========================================
// InvestmentApi - 투자 레코드 API
// ==========================================
pub struct InvestmentApi {
    repo: Arc<InvestmentRepository>,
    catalog: ReportingCatalog,
    deriver: MetricDeriver,
    allocator: MonthlyAllocator,
}

impl InvestmentApi {
    /// 새 API 인스턴스 생성
    pub fn new(repo: Arc<InvestmentRepository>, catalog: ReportingCatalog) -> Self {
        Self {
            repo,
            catalog,
            deriver: MetricDeriver::new(),
            allocator: MonthlyAllocator::new(),
        }
    }

    /// 레코드 저장 (신규 등록 또는 갱신)
    ///
    /// 수치 보정 -> saving_total 재계산 -> 월별 배분 재생성 -> 단일 트랜잭션 저장.
    ///
    /// # 인자
    /// - id: None 이면 신규 등록, Some 이면 해당 레코드 갱신
    /// - form: 입력 폼
    ///
    /// # 반환
    /// - Ok(i64): 저장된 레코드 id
    /// - Err(NotFound): 갱신 대상 없음
    /// - Err: 저장 실패 (트랜잭션 롤백, 부분 저장 없음)
    pub fn save(&self, id: Option<i64>, form: &InvestmentForm) -> ApiResult<i64> {
        let record = form.to_record();

        // 카탈로그에 없는 법인은 저장은 하되 경고를 남긴다 (원 시스템은 무검증)
        if !record.corporation.is_empty()
            && !self.catalog.is_known_corporation(record.product, &record.corporation)
        {
            tracing::warn!(
                "카탈로그 외 법인 코드: product={}, corporation={}",
                record.product,
                record.corporation
            );
        }

        let allocations = self.allocator.allocate(&record, &self.catalog.horizon());

        let saved_id = match id {
            Some(existing) => {
                self.repo.update(existing, &record, &allocations)?;
                existing
            }
            None => self.repo.create(&record, &allocations)?,
        };
        Ok(saved_id)
    }

    /// 단건 조회 (파생 지표 포함)
    ///
    /// # 반환
    /// - Err(NotFound): 해당 id 없음 - 기본값 레코드를 돌려주지 않는다
    pub fn get(&self, id: i64) -> ApiResult<InvestmentView> {
        let record = self
            .repo
            .find_by_id(id)?
            .ok_or_else(|| ApiError::NotFound(format!("investment id={}", id)))?;
        Ok(self.to_view(record))
    }

    /// 전체 조회 (최신 등록 우선)
    pub fn list(&self) -> ApiResult<Vec<InvestmentView>> {
        let records = self.repo.list_all()?;
        Ok(records.into_iter().map(|r| self.to_view(r)).collect())
    }

    /// 레코드 삭제 (월별 배분 동반 삭제)
    pub fn delete(&self, id: i64) -> ApiResult<()> {
        self.repo.delete(id)?;
        Ok(())
    }

    /// 레코드의 월별 배분 조회 (연월 오름차순, 지평 전체)
    pub fn list_allocations(&self, id: i64) -> ApiResult<Vec<MonthlyAllocation>> {
        if self.repo.find_by_id(id)?.is_none() {
            return Err(ApiError::NotFound(format!("investment id={}", id)));
        }
        Ok(self.repo.find_allocations(id)?)
    }

    /// 레코드 -> 파생 뷰
    fn to_view(&self, record: InvestmentRecord) -> InvestmentView {
        let metrics = self.deriver.derive(&record);
        let display_timestamp = record.display_timestamp().to_string();
        InvestmentView {
            rate_target: metrics.rate_target,
            rate_actual: metrics.rate_actual,
            signal: metrics.signal,
            display_timestamp,
            record,
        }
    }
}
