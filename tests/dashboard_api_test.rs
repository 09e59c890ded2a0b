// ==========================================
// DashboardApi 통합 테스트
// ==========================================
// 테스트 범위:
// 1. 필터: 전체 일치 / AND 결합 / 제한 연산
// 2. 그룹 집계: 제품별 / 법인별(KR 선두) / 유형별, 분할 법칙
// 3. KPI / 카테고리 분해
// 4. 월별 + 누적 시계열 (매 단계 반올림)
// ==========================================


use invest_breakthrough::domain::types::{InvestType, Product, Purpose};
use invest_breakthrough::engine::{FilterSpec, GroupDimension, NumericField};
use test_helpers::{build_form, ApiTestEnv};

/// 표준 데이터셋 적재
///
/// 키친/KR 확장, 키친/TR 경상, ES/KR 확장, 리빙/TH 경상
fn seed(env: &ApiTestEnv) {
    let forms = [
        build_form(
            InvestType::Expansion,
            Product::Kitchen,
            "KR",
            Purpose::NewLine,
            10.0,
            4.5,
            3.0,
            Some("2026-03"),
            Some("2026-04"),
        ),
        build_form(
            InvestType::Recurring,
            Product::Kitchen,
            "TR",
            Purpose::Automation,
            5.0,
            2.0,
            1.0,
            Some("2026-03"),
            Some("2026-06"),
        ),
        build_form(
            InvestType::Expansion,
            Product::EnergySolution,
            "KR",
            Purpose::Safety,
            8.0,
            4.0,
            4.0,
            Some("2026-10"),
            Some("2026-10"),
        ),
        build_form(
            InvestType::Recurring,
            Product::Living,
            "TH",
            Purpose::Automation,
            2.0,
            1.0,
            0.5,
            Some("2027-01"),
            None,
        ),
    ];
    for form in &forms {
        env.investment_api.save(None, form).expect("저장 실패");
    }
}

// ==========================================
// 전체 집계
// ==========================================

#[test]
fn test_overview_전체() {
    let env = ApiTestEnv::new().expect("테스트 환경 생성 실패");
    seed(&env);

    let overview = env.dashboard_api.overview(&FilterSpec::all()).expect("조회 실패");
    assert_eq!(overview.totals.count, 4);
    assert_eq!(overview.totals.base_amount, 25.0);
    assert_eq!(overview.totals.saving_target, 11.5);
    assert_eq!(overview.totals.saving_actual, 8.5);

    // KPI: 확장 2건 / 경상 2건
    assert_eq!(overview.type_summaries.len(), 2);
    assert_eq!(overview.type_summaries[0].invest_type, InvestType::Expansion);
    assert_eq!(overview.type_summaries[0].count, 2);
    assert_eq!(overview.type_summaries[0].base_amount, 18.0);
    assert_eq!(overview.type_summaries[0].saving_actual, 7.0);
    assert_eq!(overview.type_summaries[1].count, 2);
}

#[test]
fn test_overview_빈데이터() {
    let env = ApiTestEnv::new().expect("테스트 환경 생성 실패");

    let overview = env.dashboard_api.overview(&FilterSpec::all()).expect("조회 실패");
    assert_eq!(overview.totals.count, 0);
    assert_eq!(overview.totals.saving_actual, 0.0);
    assert_eq!(overview.monthly.months.len(), 12);
    assert!(overview.monthly.cumulative_actual.iter().all(|v| *v == 0.0));
}

// ==========================================
// 필터
// ==========================================

#[test]
fn test_overview_필터_AND결합() {
    let env = ApiTestEnv::new().expect("테스트 환경 생성 실패");
    seed(&env);

    let filter = FilterSpec {
        product: Some(Product::Kitchen),
        ..Default::default()
    };
    let overview = env.dashboard_api.overview(&filter).expect("조회 실패");
    assert_eq!(overview.totals.count, 2);
    assert_eq!(overview.totals.base_amount, 15.0);

    // 제품 + 법인 AND
    let filter = FilterSpec {
        product: Some(Product::Kitchen),
        corporation: Some("KR".to_string()),
        ..Default::default()
    };
    let overview = env.dashboard_api.overview(&filter).expect("조회 실패");
    assert_eq!(overview.totals.count, 1);
    assert_eq!(overview.totals.saving_actual, 3.0);

    // 응답에 적용 필터가 실린다
    assert_eq!(overview.filter, filter);
}

#[test]
fn test_분할법칙_제품차원() {
    // 무필터 합계 == 제품별 분할 합계의 합
    let env = ApiTestEnv::new().expect("테스트 환경 생성 실패");
    seed(&env);

    let total = env
        .dashboard_api
        .overview(&FilterSpec::all())
        .expect("조회 실패")
        .totals
        .saving_actual;

    let groups = env
        .dashboard_api
        .group_sums(&FilterSpec::all(), GroupDimension::Product, NumericField::SavingActual)
        .expect("조회 실패");
    let grouped: f64 = groups.iter().map(|g| g.sum).sum();
    assert!((grouped - total).abs() < 1e-9);
}

// ==========================================
// 그룹 집계
// ==========================================

#[test]
fn test_제품별_집계순서() {
    let env = ApiTestEnv::new().expect("테스트 환경 생성 실패");
    seed(&env);

    let overview = env.dashboard_api.overview(&FilterSpec::all()).expect("조회 실패");
    let products: Vec<&str> = overview
        .saving_by_product
        .iter()
        .map(|g| g.label.as_str())
        .collect();
    // 카탈로그 고정 순서 (데이터 순서 아님)
    assert_eq!(products, vec!["키친", "빌트인쿠킹", "리빙", "부품", "ES"]);

    assert_eq!(overview.saving_by_product[0].target, 6.5); // 키친
    assert_eq!(overview.saving_by_product[0].actual, 4.0);
    assert_eq!(overview.saving_by_product[4].actual, 4.0); // ES
    assert_eq!(overview.saving_by_product[1].actual, 0.0); // 빌트인쿠킹 (데이터 없음)
}

#[test]
fn test_법인별_집계_KR선두() {
    let env = ApiTestEnv::new().expect("테스트 환경 생성 실패");
    seed(&env);

    let overview = env.dashboard_api.overview(&FilterSpec::all()).expect("조회 실패");
    let corps = &overview.saving_by_corporation;

    // KR 고정 선두 + 이후 사전순
    assert_eq!(corps[0].label, "KR");
    assert_eq!(corps[0].count, 2);
    assert_eq!(corps[0].target, 8.5);
    assert_eq!(corps[0].actual, 7.0);
    for pair in corps[1..].windows(2) {
        assert!(pair[0].label < pair[1].label);
    }
}

#[test]
fn test_카테고리분해() {
    let env = ApiTestEnv::new().expect("테스트 환경 생성 실패");

    let mut form = build_form(
        InvestType::Expansion,
        Product::Kitchen,
        "KR",
        Purpose::NewLine,
        10.0,
        4.0,
        4.0,
        None,
        None,
    );
    form.reductions[0] = Some("1".to_string());
    form.reductions[3] = Some("2".to_string());
    form.reductions[8] = Some("1".to_string());
    env.investment_api.save(None, &form).expect("저장 실패");

    let overview = env.dashboard_api.overview(&FilterSpec::all()).expect("조회 실패");
    assert_eq!(overview.category_breakdown.total_saving_actual, 4.0);
    assert_eq!(overview.category_breakdown.categories[0], 1.0);
    assert_eq!(overview.category_breakdown.categories[3], 2.0);
    assert_eq!(overview.category_breakdown.categories[8], 1.0);
    assert_eq!(overview.category_breakdown.categories[1], 0.0);
}

// ==========================================
// 월별 + 누적 시계열
// ==========================================

#[test]
fn test_월별시계열_단일월배치() {
    let env = ApiTestEnv::new().expect("테스트 환경 생성 실패");
    seed(&env);

    let overview = env.dashboard_api.overview(&FilterSpec::all()).expect("조회 실패");
    let monthly = &overview.monthly;

    assert_eq!(monthly.months.len(), 12);
    assert_eq!(monthly.months[0], "2026-01");
    assert_eq!(monthly.months[11], "2026-12");

    // 2026-03: 목표 4.5 + 2.0, 2026-10: ES 4.0/4.0
    assert_eq!(monthly.target[2], 6.5);
    assert_eq!(monthly.actual[3], 3.0);
    assert_eq!(monthly.actual[5], 1.0);
    assert_eq!(monthly.target[9], 4.0);
    assert_eq!(monthly.actual[9], 4.0);

    // 리빙 레코드의 목표(2027-01)는 2026 시계열 밖
    assert_eq!(monthly.target.iter().sum::<f64>(), 10.5);
}

#[test]
fn test_누적시계열() {
    let env = ApiTestEnv::new().expect("테스트 환경 생성 실패");
    seed(&env);

    let overview = env.dashboard_api.overview(&FilterSpec::all()).expect("조회 실패");
    let monthly = &overview.monthly;

    // 3월(4.5+2.0 목표) 이전 누적은 0, 이후부터 포함
    assert_eq!(monthly.cumulative_target[1], 0.0);
    assert_eq!(monthly.cumulative_target[2], 6.5);
    assert_eq!(monthly.cumulative_target[9], 10.5);
    assert_eq!(monthly.cumulative_target[11], 10.5);

    assert_eq!(monthly.cumulative_actual[2], 0.0);
    assert_eq!(monthly.cumulative_actual[3], 3.0);
    assert_eq!(monthly.cumulative_actual[5], 4.0);
    assert_eq!(monthly.cumulative_actual[9], 8.0);
}

#[test]
fn test_월별시계열_지평전체와필터() {
    let env = ApiTestEnv::new().expect("테스트 환경 생성 실패");
    seed(&env);

    // 지평 전체 (24개월) - 2027-01 목표가 보인다
    let series = env
        .dashboard_api
        .monthly_series(&FilterSpec::all(), None)
        .expect("조회 실패");
    assert_eq!(series.months.len(), 24);
    assert_eq!(series.months[12], "2027-01");
    assert_eq!(series.target[12], 1.0);
    assert_eq!(series.cumulative_target[23], 11.5);

    // 필터 적용: ES 만
    let filter = FilterSpec {
        product: Some(Product::EnergySolution),
        ..Default::default()
    };
    let series = env
        .dashboard_api
        .monthly_series(&filter, Some(2026))
        .expect("조회 실패");
    assert_eq!(series.target.iter().sum::<f64>(), 4.0);
    assert_eq!(series.cumulative_actual[11], 4.0);
}
