// ==========================================
// InvestmentApi 통합 테스트
// ==========================================
// 테스트 범위:
// 1. 저장 수명주기: save(신규/갱신), get, list, delete
// 2. 합계 재계산: saving_total == ①~⑨ 합계 (대입, 누적 아님)
// 3. 파생 지표: rate_target / rate_actual / signal
// 4. 월별 배분: 단일 월 배치, 저장 시 전량 교체
// 5. 오류: 없는 id 에 대한 NotFound
// ==========================================


use invest_breakthrough::api::{ApiError, InvestmentForm};
use invest_breakthrough::domain::types::{InvestType, Product, Purpose, Signal};
use test_helpers::{build_form, minimal_form, ApiTestEnv};

// ==========================================
// 저장 수명주기
// ==========================================

#[test]
fn test_save_신규등록() {
    let env = ApiTestEnv::new().expect("테스트 환경 생성 실패");

    let id = env
        .investment_api
        .save(None, &minimal_form())
        .expect("저장 실패");
    assert!(id > 0);

    let view = env.investment_api.get(id).expect("조회 실패");
    assert_eq!(view.record.id, id);
    assert_eq!(view.record.product, Product::Kitchen);
    assert_eq!(view.record.corporation, "KR");
    assert_eq!(view.record.base_amount, 10.0);
    assert!(!view.record.created_at.is_empty());
    assert!(!view.display_timestamp.is_empty());
}

#[test]
fn test_save_갱신() {
    let env = ApiTestEnv::new().expect("테스트 환경 생성 실패");
    let id = env
        .investment_api
        .save(None, &minimal_form())
        .expect("저장 실패");

    let mut form = minimal_form();
    form.invest_item = "갱신된 항목".to_string();
    form.saving_actual = Some("6".to_string());
    let saved_id = env.investment_api.save(Some(id), &form).expect("갱신 실패");
    assert_eq!(saved_id, id);

    let view = env.investment_api.get(id).expect("조회 실패");
    assert_eq!(view.record.invest_item, "갱신된 항목");
    assert_eq!(view.record.saving_actual, 6.0);

    // 갱신 후에도 레코드는 1건
    assert_eq!(env.investment_api.list().expect("조회 실패").len(), 1);
}

#[test]
fn test_list_최신등록우선() {
    let env = ApiTestEnv::new().expect("테스트 환경 생성 실패");
    let first = env.investment_api.save(None, &minimal_form()).expect("저장 실패");
    let second = env.investment_api.save(None, &minimal_form()).expect("저장 실패");

    let views = env.investment_api.list().expect("조회 실패");
    assert_eq!(views.len(), 2);
    assert_eq!(views[0].record.id, second);
    assert_eq!(views[1].record.id, first);
}

#[test]
fn test_delete_배분동반삭제() {
    let env = ApiTestEnv::new().expect("테스트 환경 생성 실패");
    let id = env.investment_api.save(None, &minimal_form()).expect("저장 실패");

    env.investment_api.delete(id).expect("삭제 실패");

    assert!(matches!(
        env.investment_api.get(id).unwrap_err(),
        ApiError::NotFound(_)
    ));
    assert!(matches!(
        env.investment_api.list_allocations(id).unwrap_err(),
        ApiError::NotFound(_)
    ));
}

// ==========================================
// 오류: NotFound
// ==========================================

#[test]
fn test_없는레코드_notfound() {
    let env = ApiTestEnv::new().expect("테스트 환경 생성 실패");

    // 조회: 기본값 레코드가 아니라 NotFound 를 돌려준다
    assert!(matches!(
        env.investment_api.get(999).unwrap_err(),
        ApiError::NotFound(_)
    ));

    // 갱신/삭제도 동일
    assert!(matches!(
        env.investment_api.save(Some(999), &minimal_form()).unwrap_err(),
        ApiError::NotFound(_)
    ));
    assert!(matches!(
        env.investment_api.delete(999).unwrap_err(),
        ApiError::NotFound(_)
    ));
}

// ==========================================
// 합계 재계산 (saving_total)
// ==========================================

#[test]
fn test_saving_total_재계산() {
    let env = ApiTestEnv::new().expect("테스트 환경 생성 실패");

    // ①~⑨ = {1,0,0,2,0,0,0,0,1} -> 합계 4
    let mut form = minimal_form();
    form.reductions[0] = Some("1".to_string());
    form.reductions[3] = Some("2".to_string());
    form.reductions[8] = Some("1".to_string());

    let id = env.investment_api.save(None, &form).expect("저장 실패");
    let view = env.investment_api.get(id).expect("조회 실패");
    assert_eq!(view.record.saving_total, 4.0);

    // 전부 0 으로 다시 저장하면 합계도 0 (재계산이지 누적이 아님)
    let form = minimal_form();
    env.investment_api.save(Some(id), &form).expect("갱신 실패");
    let view = env.investment_api.get(id).expect("조회 실패");
    assert_eq!(view.record.saving_total, 0.0);
}

#[test]
fn test_수치보정_저장경계() {
    let env = ApiTestEnv::new().expect("테스트 환경 생성 실패");

    let mut form = minimal_form();
    form.base_amount = Some("숫자아님".to_string()); // -> 0
    form.saving_actual = Some("-1".to_string()); // -> 0
    form.reductions[4] = Some("".to_string()); // -> 0

    let id = env.investment_api.save(None, &form).expect("저장 실패");
    let view = env.investment_api.get(id).expect("조회 실패");
    assert_eq!(view.record.base_amount, 0.0);
    assert_eq!(view.record.saving_actual, 0.0);
    assert_eq!(view.record.reductions[4], 0.0);
    // Base 없음 -> 판정 불가
    assert_eq!(view.rate_actual, None);
    assert_eq!(view.signal, Signal::Gray);
}

// ==========================================
// 파생 지표 (rate_target / rate_actual / signal)
// ==========================================

#[test]
fn test_파생지표_es_green() {
    // ES, Base 10, 절감 6 -> 목표 50 / 실적 60.0 / Green
    let env = ApiTestEnv::new().expect("테스트 환경 생성 실패");
    let form = build_form(
        InvestType::Expansion,
        Product::EnergySolution,
        "KR",
        Purpose::Automation,
        10.0,
        5.0,
        6.0,
        None,
        None,
    );
    let id = env.investment_api.save(None, &form).expect("저장 실패");

    let view = env.investment_api.get(id).expect("조회 실패");
    assert_eq!(view.rate_target, 50.0);
    assert_eq!(view.rate_actual, Some(60.0));
    assert_eq!(view.signal, Signal::Green);
}

#[test]
fn test_파생지표_일반제품_yellow() {
    // 일반 제품, Base 10, 절감 2 -> 목표 30 / 실적 20.0 / Yellow
    let env = ApiTestEnv::new().expect("테스트 환경 생성 실패");
    let form = build_form(
        InvestType::Recurring,
        Product::Living,
        "TH",
        Purpose::Repair,
        10.0,
        3.0,
        2.0,
        None,
        None,
    );
    let id = env.investment_api.save(None, &form).expect("저장 실패");

    let view = env.investment_api.get(id).expect("조회 실패");
    assert_eq!(view.rate_target, 30.0);
    assert_eq!(view.rate_actual, Some(20.0));
    assert_eq!(view.signal, Signal::Yellow);
}

#[test]
fn test_파생지표_base없음_gray() {
    // Base 0, 절감 5 -> 판정 불가 / Gray
    let env = ApiTestEnv::new().expect("테스트 환경 생성 실패");
    let form = build_form(
        InvestType::Expansion,
        Product::Kitchen,
        "KR",
        Purpose::NewLine,
        0.0,
        0.0,
        5.0,
        None,
        None,
    );
    let id = env.investment_api.save(None, &form).expect("저장 실패");

    let view = env.investment_api.get(id).expect("조회 실패");
    assert_eq!(view.rate_actual, None);
    assert_eq!(view.signal, Signal::Gray);
}

// ==========================================
// 월별 배분
// ==========================================

#[test]
fn test_배분_단일월배치() {
    let env = ApiTestEnv::new().expect("테스트 환경 생성 실패");
    let id = env.investment_api.save(None, &minimal_form()).expect("저장 실패");

    let allocations = env.investment_api.list_allocations(id).expect("배분 조회 실패");
    // 지평 전체 (2026~2027, 24개월) 가 빠짐없이 존재
    assert_eq!(allocations.len(), 24);

    // 목표는 2026-03 에 전액, 실적은 2026-04 에 전액, 나머지는 0
    for alloc in &allocations {
        let ym = alloc.year_month.to_string();
        assert_eq!(alloc.monthly_target, if ym == "2026-03" { 4.5 } else { 0.0 });
        assert_eq!(alloc.monthly_actual, if ym == "2026-04" { 3.0 } else { 0.0 });
    }

    // 지평 합계 == 레코드 총액
    let target_sum: f64 = allocations.iter().map(|a| a.monthly_target).sum();
    let actual_sum: f64 = allocations.iter().map(|a| a.monthly_actual).sum();
    assert_eq!(target_sum, 4.5);
    assert_eq!(actual_sum, 3.0);
}

#[test]
fn test_배분_저장시전량교체() {
    let env = ApiTestEnv::new().expect("테스트 환경 생성 실패");
    let id = env.investment_api.save(None, &minimal_form()).expect("저장 실패");

    // 발주 월 변경 후 재저장 -> 이전 월의 금액은 남지 않는다
    let mut form = minimal_form();
    form.order_target = Some("2026-08".to_string());
    form.saving_target = Some("7".to_string());
    env.investment_api.save(Some(id), &form).expect("갱신 실패");

    let allocations = env.investment_api.list_allocations(id).expect("배분 조회 실패");
    assert_eq!(allocations.len(), 24);
    for alloc in &allocations {
        let ym = alloc.year_month.to_string();
        assert_eq!(alloc.monthly_target, if ym == "2026-08" { 7.0 } else { 0.0 });
    }

    // 동일 폼 재저장은 동일 배분 (멱등)
    env.investment_api.save(Some(id), &form).expect("갱신 실패");
    let again = env.investment_api.list_allocations(id).expect("배분 조회 실패");
    assert_eq!(again, allocations);
}

#[test]
fn test_배분_지평밖발주월() {
    let env = ApiTestEnv::new().expect("테스트 환경 생성 실패");

    // 2025-12 는 지평 밖 - 배분은 전부 0 이지만 레코드 총액은 유지
    let mut form = minimal_form();
    form.order_target = Some("2025-12".to_string());
    form.order_actual = None;
    let id = env.investment_api.save(None, &form).expect("저장 실패");

    let allocations = env.investment_api.list_allocations(id).expect("배분 조회 실패");
    assert!(allocations.iter().all(|a| a.monthly_target == 0.0));

    let view = env.investment_api.get(id).expect("조회 실패");
    assert_eq!(view.record.saving_target, 4.5);
}

// ==========================================
// 표시용 타임스탬프
// ==========================================

#[test]
fn test_display_timestamp() {
    let env = ApiTestEnv::new().expect("테스트 환경 생성 실패");
    let id = env.investment_api.save(None, &minimal_form()).expect("저장 실패");

    let view = env.investment_api.get(id).expect("조회 실패");
    // 저장소는 등록 시 updated_at 도 함께 기록한다
    assert_eq!(view.display_timestamp, view.record.updated_at);
}

// ==========================================
// 폼 기본값
// ==========================================

#[test]
fn test_빈폼_저장가능() {
    // 금액이 전부 비어 있어도 보정 정책에 따라 0 으로 저장된다
    let env = ApiTestEnv::new().expect("테스트 환경 생성 실패");
    let id = env
        .investment_api
        .save(None, &InvestmentForm::default())
        .expect("저장 실패");

    let view = env.investment_api.get(id).expect("조회 실패");
    assert_eq!(view.record.base_amount, 0.0);
    assert_eq!(view.record.saving_total, 0.0);
    assert_eq!(view.record.order_target, None);
    assert_eq!(view.signal, Signal::Gray);
}
