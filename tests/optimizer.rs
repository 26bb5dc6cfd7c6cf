//! 테이퍼/간격 탐색 종단 시나리오 테스트.
use std::time::Instant;

use flow_header_toolbox::engine::{
    optimize, optimize_with_target, row_count_for_spacing, row_flows, taper_layout,
    uniformity_error_pct, DesignError, DesignRules, FlowParameters, HeaderType, HoleLayout,
};

fn params(pipe_diameter_mm: f64, flow_lps: f64, header_len_mm: f64) -> FlowParameters {
    FlowParameters {
        pipe_diameter_mm,
        flow_lps,
        header_len_mm,
        header_type: HeaderType::Pressure,
    }
}

#[test]
fn feasible_design_accepts_coarsest_spacing() {
    let p = params(150.0, 6.309, 1200.0);
    let rules = DesignRules::default();
    let outcome = optimize(&p, &rules).expect("design");

    assert_eq!(outcome.spacing_mm, 150.0);
    assert_eq!(outcome.layout.len(), row_count_for_spacing(1200.0, 150.0));
    assert!(outcome.uniformity_error_pct <= 5.0, "err={}", outcome.uniformity_error_pct);
    assert!(
        outcome.reference_pressure_kpa > 0.5 && outcome.reference_pressure_kpa < 200.0,
        "p_ref={}",
        outcome.reference_pressure_kpa
    );

    // 마지막 열 위치 + 간격이 헤더 길이의 1% 이내여야 한다.
    let last = outcome.layout.holes().last().expect("rows");
    let covered = last.axial_pos_mm() + outcome.spacing_mm;
    assert!((covered - 1200.0).abs() <= 12.0, "covered={covered}");

    // 완성 레이아웃의 드릴은 모두 허용 목록에서 나와야 한다.
    for hole in outcome.layout.holes() {
        assert!(
            rules.allowable_drill_sizes_mm.contains(&hole.hole_diameter_mm),
            "diameter {} not in drill set",
            hole.hole_diameter_mm
        );
    }

    let flows = row_flows(&outcome.layout, &p).expect("flows");
    assert_eq!(flows.len(), outcome.layout.len());
    let total: f64 = flows.iter().sum();
    assert!((total - 6.309).abs() <= 1e-4, "total={total}");
}

#[test]
fn suction_design_mirrors_pressure() {
    let p = FlowParameters {
        header_type: HeaderType::Suction,
        ..params(150.0, 6.309, 1200.0)
    };
    let outcome = optimize(&p, &DesignRules::default()).expect("design");
    assert_eq!(outcome.spacing_mm, 150.0);
    assert!(
        outcome.reference_pressure_kpa >= -200.0 && outcome.reference_pressure_kpa <= -0.5,
        "p_ref={}",
        outcome.reference_pressure_kpa
    );
    assert!(outcome.uniformity_error_pct <= 5.0);
}

#[test]
fn taper_engages_on_high_velocity_header() {
    // 30mm 배관에 3 L/s 면 마찰 구배가 커서 최대 드릴 균일 배치로는 목표를 넘는다.
    let p = params(30.0, 3.0, 1200.0);
    let rules = DesignRules::default();
    let outcome = optimize(&p, &rules).expect("design");

    assert!(outcome.taper_steps > 0, "taper did not engage");
    assert!(outcome.uniformity_error_pct <= 5.0, "err={}", outcome.uniformity_error_pct);
    for hole in outcome.layout.holes() {
        assert!(hole.hole_diameter_mm < 16.0, "row {} kept {}", hole.row_index, hole.hole_diameter_mm);
        assert!(rules.allowable_drill_sizes_mm.contains(&hole.hole_diameter_mm));
    }
}

#[test]
fn taper_outcome_is_best_layout_seen() {
    let p = params(30.0, 3.0, 1200.0);
    let sizes = DesignRules::default().sizes_descending();
    let blank = HoleLayout::with_uniform_rows(8, 150.0, 16.0);
    let outcome = taper_layout(&blank, &sizes, &p, 5.0).expect("taper");

    let history = &outcome.error_history_pct;
    assert_eq!(history.len() as u32, outcome.steps + 1);
    assert!(history[0] > 5.0, "initial err={}", history[0]);
    assert!(outcome.uniformity_error_pct <= 5.0);
    // 반환된 오차는 탐색 중 관측한 어떤 중간 레이아웃보다 나빠질 수 없다.
    for (i, err) in history.iter().enumerate() {
        assert!(
            outcome.uniformity_error_pct <= err + 1e-12,
            "step {i}: returned {} > seen {err}",
            outcome.uniformity_error_pct
        );
    }
}

#[test]
fn taper_without_reducible_rows_returns_unchanged() {
    let p = params(30.0, 2.5, 1200.0);
    let blank = HoleLayout::with_uniform_rows(8, 150.0, 16.0);
    let outcome = taper_layout(&blank, &[16.0], &p, 5.0).expect("taper");
    assert_eq!(outcome.steps, 0);
    assert!(outcome.uniformity_error_pct > 5.0, "err={}", outcome.uniformity_error_pct);
    assert!(outcome.layout.holes().iter().all(|h| h.hole_diameter_mm == 16.0));
}

#[test]
fn single_oversized_drill_exhausts_all_spacings() {
    let p = params(30.0, 2.5, 1200.0);
    let rules = DesignRules {
        row_count: 10,
        allowable_drill_sizes_mm: vec![16.0],
    };
    let err = optimize(&p, &rules).expect_err("must exhaust");
    assert!(matches!(err, DesignError::NotConverged(_)), "err={err:?}");
}

#[test]
fn relaxed_target_accepts_single_drill_layout() {
    // target_cv_pct 는 설정으로 노출되는 유일한 수락 기준이다.
    let p = params(30.0, 2.5, 1200.0);
    let rules = DesignRules {
        row_count: 10,
        allowable_drill_sizes_mm: vec![16.0],
    };
    let outcome = optimize_with_target(&p, &rules, 50.0).expect("relaxed design");
    assert_eq!(outcome.spacing_mm, 150.0);
    assert!(outcome.uniformity_error_pct > 5.0 && outcome.uniformity_error_pct <= 50.0);
}

#[test]
fn pathological_flow_fails_fast() {
    // 작은 짧은 헤더로 63.1 L/s: 어떤 간격에서도 괄호를 잡을 수 없다.
    let p = params(50.0, 63.1, 100.0);
    let started = Instant::now();
    let err = optimize(&p, &DesignRules::default()).expect_err("must fail");
    assert!(matches!(err, DesignError::NotConverged(_)), "err={err:?}");
    assert!(started.elapsed().as_secs_f64() < 1.0, "took {:?}", started.elapsed());
}

#[test]
fn invalid_parameters_rejected_eagerly() {
    let rules = DesignRules::default();
    let bad = [
        params(0.0, 6.309, 1200.0),
        params(150.0, 0.0, 1200.0),
        params(150.0, 6.309, -1.0),
    ];
    for p in bad {
        let err = optimize(&p, &rules).expect_err("must reject");
        assert!(matches!(err, DesignError::InvalidParameter(_)), "err={err:?}");
    }
    let empty_rules = DesignRules {
        row_count: 10,
        allowable_drill_sizes_mm: Vec::new(),
    };
    let err = optimize(&params(150.0, 6.309, 1200.0), &empty_rules).expect_err("must reject");
    assert!(matches!(err, DesignError::InvalidParameter(_)));
    let negative_rules = DesignRules {
        row_count: 10,
        allowable_drill_sizes_mm: vec![16.0, -4.0],
    };
    let err = optimize(&params(150.0, 6.309, 1200.0), &negative_rules).expect_err("must reject");
    assert!(matches!(err, DesignError::InvalidParameter(_)));
}

#[test]
fn uniformity_zero_for_degenerate_layouts() {
    let p = params(150.0, 6.309, 1200.0);
    assert_eq!(uniformity_error_pct(&HoleLayout::with_uniform_rows(0, 150.0, 16.0), &p), 0.0);
    assert_eq!(uniformity_error_pct(&HoleLayout::with_uniform_rows(1, 150.0, 16.0), &p), 0.0);
    // 해를 구할 수 없는 레이아웃도 실패 대신 0을 반환한다.
    let unsolvable = params(150.0, 60.0, 1200.0);
    assert_eq!(
        uniformity_error_pct(&HoleLayout::with_uniform_rows(8, 150.0, 16.0), &unsolvable),
        0.0
    );
}
