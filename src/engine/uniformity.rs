use crate::engine::layout::HoleLayout;
use crate::engine::params::FlowParameters;
use crate::engine::row_flow;

/// 유량 목록의 모집단 변동계수 [%]. 항목이 1개 이하이거나 평균이 0이면 0.
pub fn coefficient_of_variation_pct(flows_lps: &[f64]) -> f64 {
    if flows_lps.len() <= 1 {
        return 0.0;
    }
    let n = flows_lps.len() as f64;
    let mean = flows_lps.iter().sum::<f64>() / n;
    if mean == 0.0 {
        return 0.0;
    }
    let variance = flows_lps.iter().map(|q| (q - mean) * (q - mean)).sum::<f64>() / n;
    100.0 * variance.sqrt() / mean
}

/// 레이아웃의 균일도 오차 [CV %].
///
/// 실패하지 않는다. 열이 1개 이하이거나 해를 구할 수 없는 퇴화 입력은 0을
/// 반환한다. 설계 실패 자체는 `optimize` 쪽 결과로 보고된다.
pub fn uniformity_error_pct(layout: &HoleLayout, params: &FlowParameters) -> f64 {
    if layout.len() <= 1 {
        return 0.0;
    }
    match row_flow::solve_row_flows(layout, params) {
        Ok(solution) => {
            let cv = coefficient_of_variation_pct(&solution.flows_lps);
            if cv.is_finite() {
                cv
            } else {
                0.0
            }
        }
        Err(_) => 0.0,
    }
}
