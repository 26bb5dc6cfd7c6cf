//! 오리피스/마찰 모델 회귀 테스트.
use flow_header_toolbox::engine::{friction, orifice, pipe_reynolds, FlowParameters, HeaderType};

fn params(pipe_diameter_mm: f64, flow_lps: f64, header_len_mm: f64) -> FlowParameters {
    FlowParameters {
        pipe_diameter_mm,
        flow_lps,
        header_len_mm,
        header_type: HeaderType::Pressure,
    }
}

#[test]
fn orifice_known_case() {
    // 10mm, 20 kPa => 약 0.303 L/s (Cd=0.61)
    let q = orifice::flow_from_drop_lps(10.0, 20.0);
    assert!((q - 0.303).abs() < 0.005, "q={q}");
}

#[test]
fn orifice_round_trip_within_one_percent() {
    for &d in &[4.0, 6.0, 10.0, 16.0, 25.0, 40.0] {
        for &q in &[0.25, 0.5, 1.0, 2.0, 5.0] {
            let drop = orifice::drop_from_flow_kpa(q, d);
            let q2 = orifice::flow_from_drop_lps(d, drop);
            assert!(
                (q2 - q).abs() <= q * 0.01,
                "round trip d={d} q={q} => {q2}"
            );
        }
    }
}

#[test]
fn orifice_negative_drop_clamps_to_zero() {
    assert_eq!(orifice::flow_from_drop_lps(10.0, -5.0), 0.0);
}

#[test]
fn orifice_degenerate_inputs() {
    assert_eq!(orifice::drop_from_flow_kpa(0.0, 10.0), 0.0);
    assert_eq!(orifice::flow_from_drop_lps(0.0, 20.0), 0.0);
    assert_eq!(orifice::drop_from_flow_kpa(1.0, 0.0), 0.0);
}

#[test]
fn orifice_monotonic_in_drop() {
    let q1 = orifice::flow_from_drop_lps(40.0, 1.0);
    let q100 = orifice::flow_from_drop_lps(40.0, 100.0);
    assert!(q1 * 10.0 <= q100, "q1={q1} q100={q100}");
}

#[test]
fn friction_known_case() {
    // 1000mm 구간, 150mm 내경, 6 L/s => 약 0.0084 kPa (Swamee-Jain)
    let drop = friction::friction_drop_kpa(1000.0, 150.0, 6.0);
    assert!((drop - 0.0084).abs() < 0.0005, "drop={drop}");
}

#[test]
fn friction_zero_for_degenerate_inputs() {
    assert_eq!(friction::friction_drop_kpa(0.0, 150.0, 6.0), 0.0);
    assert_eq!(friction::friction_drop_kpa(-100.0, 150.0, 6.0), 0.0);
    assert_eq!(friction::friction_drop_kpa(1000.0, 0.0, 6.0), 0.0);
    assert_eq!(friction::friction_drop_kpa(1000.0, 150.0, 0.0), 0.0);
    assert_eq!(friction::friction_drop_kpa(1000.0, 150.0, -1.0), 0.0);
}

#[test]
fn friction_non_negative() {
    for &len in &[10.0, 150.0, 1000.0, 5000.0] {
        for &id in &[25.0, 50.0, 150.0] {
            for &q in &[0.01, 0.5, 6.0, 60.0] {
                let drop = friction::friction_drop_kpa(len, id, q);
                assert!(drop >= 0.0 && drop.is_finite(), "len={len} id={id} q={q}");
            }
        }
    }
}

#[test]
fn friction_laminar_regime() {
    // 150mm 내경에 0.05 L/s 는 Re < 4000 층류 구간이다.
    let drop = friction::friction_drop_kpa(1000.0, 150.0, 0.05);
    assert!(drop > 0.0 && drop < 1e-4, "drop={drop}");
}

#[test]
fn reynolds_display_value() {
    // 150mm, 6.309 L/s => Re ≈ 5.36e4
    let re = pipe_reynolds(&params(150.0, 6.309, 1000.0));
    assert!((re - 53_552.0).abs() < 500.0, "Re={re}");
}

#[test]
fn reynolds_zero_for_degenerate_inputs() {
    assert_eq!(pipe_reynolds(&params(0.0, 6.309, 1000.0)), 0.0);
    assert_eq!(pipe_reynolds(&params(150.0, 0.0, 1000.0)), 0.0);
}
