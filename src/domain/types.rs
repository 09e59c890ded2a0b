// ==========================================
// 설비투자비 실적 관리 - 도메인 타입 정의
// ==========================================
// 분류 값은 전부 고정 열거형이며, 저장/표시 문자열은 한글 라벨을 사용한다.
// 금액 단위: 억원
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 투자 유형 (Invest Type)
// ==========================================
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InvestType {
    #[default]
    #[serde(rename = "확장")]
    Expansion, // 확장
    #[serde(rename = "경상")]
    Recurring, // 경상
}

impl InvestType {
    /// 저장/표시용 라벨
    pub fn as_str(&self) -> &'static str {
        match self {
            InvestType::Expansion => "확장",
            InvestType::Recurring => "경상",
        }
    }

    /// 전체 유형 (고정 표시 순서)
    pub const ALL: [InvestType; 2] = [InvestType::Expansion, InvestType::Recurring];
}

impl fmt::Display for InvestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InvestType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "확장" => Ok(InvestType::Expansion),
            "경상" => Ok(InvestType::Recurring),
            other => Err(format!("알 수 없는 투자 유형: {}", other)),
        }
    }
}

// ==========================================
// 제품 (Product)
// ==========================================
// 절감율 목표가 제품만으로 결정됨 (ES=50%, 그 외=30%)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Product {
    #[default]
    #[serde(rename = "키친")]
    Kitchen, // 키친
    #[serde(rename = "빌트인쿠킹")]
    BuiltInCooking, // 빌트인쿠킹
    #[serde(rename = "리빙")]
    Living, // 리빙
    #[serde(rename = "부품")]
    Components, // 부품
    #[serde(rename = "ES")]
    EnergySolution, // ES
}

impl Product {
    /// 저장/표시용 라벨
    pub fn as_str(&self) -> &'static str {
        match self {
            Product::Kitchen => "키친",
            Product::BuiltInCooking => "빌트인쿠킹",
            Product::Living => "리빙",
            Product::Components => "부품",
            Product::EnergySolution => "ES",
        }
    }

    /// 전체 제품 (고정 표시 순서)
    pub const ALL: [Product; 5] = [
        Product::Kitchen,
        Product::BuiltInCooking,
        Product::Living,
        Product::Components,
        Product::EnergySolution,
    ];
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Product {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "키친" => Ok(Product::Kitchen),
            "빌트인쿠킹" => Ok(Product::BuiltInCooking),
            "리빙" => Ok(Product::Living),
            "부품" => Ok(Product::Components),
            "ES" => Ok(Product::EnergySolution),
            other => Err(format!("알 수 없는 제품: {}", other)),
        }
    }
}

// ==========================================
// 투자 목적 (Purpose)
// ==========================================
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Purpose {
    #[default]
    #[serde(rename = "신규라인")]
    NewLine, // 신규라인
    #[serde(rename = "자동화")]
    Automation, // 자동화
    #[serde(rename = "라인 개조")]
    LineRemodel, // 라인 개조
    #[serde(rename = "Overhaul")]
    Overhaul, // Overhaul
    #[serde(rename = "신모델 대응")]
    NewModel, // 신모델 대응
    #[serde(rename = "T/Time 향상")]
    TaktTime, // T/Time 향상
    #[serde(rename = "고장 수리")]
    Repair, // 고장 수리
    #[serde(rename = "안전")]
    Safety, // 안전
    #[serde(rename = "설비 이설")]
    Relocation, // 설비 이설
    #[serde(rename = "노후 교체")]
    AgingReplace, // 노후 교체
    #[serde(rename = "설비 개선")]
    EquipImprove, // 설비 개선
    #[serde(rename = "기타")]
    Others, // 기타
}

impl Purpose {
    /// 저장/표시용 라벨
    pub fn as_str(&self) -> &'static str {
        match self {
            Purpose::NewLine => "신규라인",
            Purpose::Automation => "자동화",
            Purpose::LineRemodel => "라인 개조",
            Purpose::Overhaul => "Overhaul",
            Purpose::NewModel => "신모델 대응",
            Purpose::TaktTime => "T/Time 향상",
            Purpose::Repair => "고장 수리",
            Purpose::Safety => "안전",
            Purpose::Relocation => "설비 이설",
            Purpose::AgingReplace => "노후 교체",
            Purpose::EquipImprove => "설비 개선",
            Purpose::Others => "기타",
        }
    }

    /// 전체 목적 (고정 표시 순서)
    pub const ALL: [Purpose; 12] = [
        Purpose::NewLine,
        Purpose::Automation,
        Purpose::LineRemodel,
        Purpose::Overhaul,
        Purpose::NewModel,
        Purpose::TaktTime,
        Purpose::Repair,
        Purpose::Safety,
        Purpose::Relocation,
        Purpose::AgingReplace,
        Purpose::EquipImprove,
        Purpose::Others,
    ];
}

impl fmt::Display for Purpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Purpose {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Purpose::ALL
            .iter()
            .find(|p| p.as_str() == s)
            .copied()
            .ok_or_else(|| format!("알 수 없는 투자 목적: {}", s))
    }
}

// ==========================================
// 절감 활동 카테고리 (Reduce Category)
// ==========================================
// 9개 고정 카테고리, reduce_1 ~ reduce_9 컬럼에 대응
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReduceCategory {
    NewTech,      // ①신기술/신공법
    LowCostParts, // ②염가형 부품
    ChinaLocal,   // ③중국/Local 설비
    CnKrCollabo,  // ④중국/한국 Collabo
    ContainerMin, // ⑤컨테이너(FR) 최소화
    TravelMin,    // ⑥출장인원 최소화
    IdleEquip,    // ⑦유휴설비
    SpecOptimize, // ⑧사양 최적화
    Others,       // ⑨기타
}

impl ReduceCategory {
    /// 전체 카테고리 (①~⑨ 순서)
    pub const ALL: [ReduceCategory; 9] = [
        ReduceCategory::NewTech,
        ReduceCategory::LowCostParts,
        ReduceCategory::ChinaLocal,
        ReduceCategory::CnKrCollabo,
        ReduceCategory::ContainerMin,
        ReduceCategory::TravelMin,
        ReduceCategory::IdleEquip,
        ReduceCategory::SpecOptimize,
        ReduceCategory::Others,
    ];

    /// reductions 배열 인덱스 (0-based)
    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|c| c == self).unwrap_or(0)
    }

    /// i18n 라벨 키 (locales/*.yml 의 reduce.r1 ~ reduce.r9)
    pub fn label_key(&self) -> String {
        format!("reduce.r{}", self.index() + 1)
    }
}

// ==========================================
// 신호등 (Signal)
// ==========================================
// 절감율 실적 vs 목표 비교 결과의 3단계 분류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Signal {
    Green,  // 목표 달성 (실적율 >= 목표율)
    Yellow, // 목표 미달
    Gray,   // 판정 불가 (Base 금액 없음)
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Signal::Green => write!(f, "GREEN"),
            Signal::Yellow => write!(f, "YELLOW"),
            Signal::Gray => write!(f, "GRAY"),
        }
    }
}

// ==========================================
// 연월 (YearMonth)
// ==========================================
// "YYYY-MM" 형식의 일정/배분 키. 월은 1~12 범위만 허용.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    /// 연월 생성 (월 범위 검증)
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if (1..=12).contains(&month) {
            Some(Self { year, month })
        } else {
            None
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (y, m) = s
            .split_once('-')
            .ok_or_else(|| format!("연월 형식 오류: {}", s))?;
        let year: i32 = y.parse().map_err(|_| format!("연월 형식 오류: {}", s))?;
        let month: u32 = m.parse().map_err(|_| format!("연월 형식 오류: {}", s))?;
        YearMonth::new(year, month).ok_or_else(|| format!("월 범위 오류: {}", s))
    }
}

impl TryFrom<String> for YearMonth {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<YearMonth> for String {
    fn from(ym: YearMonth) -> Self {
        ym.to_string()
    }
}

// ==========================================
// 관용적 수치 보정 (Permissive Coercion)
// ==========================================

/// 금액/카테고리 입력을 비음수 실수로 보정
///
/// 정책: 비어 있거나, 숫자로 해석되지 않거나, 음수이면 0.0 으로 본다.
/// 입력 오류를 거부하지 않고 0으로 취급하는 것은 원 시스템의 의도된 동작이며,
/// 집계 합계가 이 정책에 의존한다.
pub fn non_negative_or_zero(raw: Option<&str>) -> f64 {
    let Some(s) = raw else { return 0.0 };
    let s = s.trim();
    if s.is_empty() {
        return 0.0;
    }
    match s.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => v,
        _ => {
            tracing::debug!("수치 입력 보정: {:?} -> 0", s);
            0.0
        }
    }
}

/// 연월 입력 보정: 빈 값/형식 오류는 None
///
/// 배분 지평 밖의 연월도 오류가 아니므로 여기서는 범위 검증을 하지 않는다.
pub fn year_month_or_none(raw: Option<&str>) -> Option<YearMonth> {
    let s = raw?.trim();
    if s.is_empty() {
        return None;
    }
    match s.parse::<YearMonth>() {
        Ok(ym) => Some(ym),
        Err(_) => {
            tracing::debug!("연월 입력 보정: {:?} -> None", s);
            None
        }
    }
}
