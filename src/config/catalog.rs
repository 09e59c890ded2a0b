// ==========================================
// 설비투자비 실적 관리 - 리포팅 카탈로그
// ==========================================
// 역할: 제품/법인/목적/배분 지평 등 리포팅 기준 정보의 단일 출처
// 원칙: 법인 표시 순서는 데이터 순서가 아니라 설정 시점에 고정된다
// ==========================================
// 주의: 과거 개정판마다 제품별 법인 목록이 조금씩 달랐다.
// 여기의 기본값(Default)이 최신 개정판 기준의 확정 목록이다.
// ==========================================

use crate::domain::types::{Product, Purpose, YearMonth};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 리포팅 카탈로그
///
/// 대시보드/조회 화면이 공유하는 고정 기준 정보.
/// 배포 환경별 덮어쓰기가 필요하면 JSON 으로 주입한다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportingCatalog {
    /// 제품 목록 (고정 표시 순서)
    pub products: Vec<Product>,

    /// 제품별 법인 목록
    pub corporations: HashMap<Product, Vec<String>>,

    /// 투자 목적 목록 (고정 표시 순서)
    pub purposes: Vec<Purpose>,

    /// 배분 지평 연도 (연속 2개년)
    pub horizon_years: [i32; 2],

    /// 법인 집계에서 맨 앞에 고정되는 법인
    pub pinned_corporation: String,
}

impl Default for ReportingCatalog {
    fn default() -> Self {
        let mut corporations = HashMap::new();
        corporations.insert(
            Product::Kitchen,
            to_strings(&["KR", "TR", "MN", "IN_T", "IL_N", "IL_P", "VH", "RA"]),
        );
        corporations.insert(
            Product::BuiltInCooking,
            to_strings(&["KR", "MN", "IL_N", "MZ", "VH"]),
        );
        corporations.insert(
            Product::Living,
            to_strings(&["KR", "PN", "TH", "VH", "IL_N", "IL_P", "TN", "MX", "EG", "RA"]),
        );
        corporations.insert(
            Product::EnergySolution,
            to_strings(&["KR", "TA", "IL_N", "IL_P", "TH", "SR", "AZ", "AT", "AL"]),
        );
        corporations.insert(
            Product::Components,
            to_strings(&["KR", "TA", "PN", "TR", "TH", "IL_N", "VH", "MN"]),
        );

        Self {
            products: Product::ALL.to_vec(),
            corporations,
            purposes: Purpose::ALL.to_vec(),
            horizon_years: [2026, 2027],
            pinned_corporation: "KR".to_string(),
        }
    }
}

impl ReportingCatalog {
    /// JSON 설정에서 카탈로그 로드 (배포 환경별 덮어쓰기용)
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let catalog: ReportingCatalog = serde_json::from_str(json)?;
        Ok(catalog)
    }

    /// 제품별 법인 목록 조회
    pub fn corporations_for(&self, product: Product) -> &[String] {
        self.corporations
            .get(&product)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// 법인이 해당 제품 카탈로그에 등록되어 있는지
    pub fn is_known_corporation(&self, product: Product, corporation: &str) -> bool {
        self.corporations_for(product)
            .iter()
            .any(|c| c == corporation)
    }

    /// 전체 법인의 정규 표시 순서
    ///
    /// 고정 법인(KR)을 맨 앞에 두고, 나머지는 전 제품 목록의 합집합을
    /// 사전순으로 정렬한다. 데이터 입력 순서와 무관하게 결정적이다.
    pub fn all_corporations_ordered(&self) -> Vec<String> {
        let mut rest: Vec<String> = self
            .corporations
            .values()
            .flatten()
            .filter(|c| **c != self.pinned_corporation)
            .cloned()
            .collect();
        rest.sort();
        rest.dedup();

        let mut ordered = Vec::with_capacity(rest.len() + 1);
        ordered.push(self.pinned_corporation.clone());
        ordered.extend(rest);
        ordered
    }

    /// 배분 지평 첫 연도
    pub fn first_year(&self) -> i32 {
        self.horizon_years[0]
    }

    /// 배분 지평 전체 (2개년 × 12개월 = 24개 연월, 오름차순)
    pub fn horizon(&self) -> Vec<YearMonth> {
        self.horizon_years
            .iter()
            .flat_map(|&year| (1..=12).filter_map(move |month| YearMonth::new(year, month)))
            .collect()
    }

    /// 특정 연도의 12개 연월 (대시보드 월별 차트용)
    pub fn horizon_for_year(&self, year: i32) -> Vec<YearMonth> {
        (1..=12).filter_map(|month| YearMonth::new(year, month)).collect()
    }
}

fn to_strings(codes: &[&str]) -> Vec<String> {
    codes.iter().map(|c| c.to_string()).collect()
}
