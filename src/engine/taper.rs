use crate::engine::layout::HoleLayout;
use crate::engine::params::FlowParameters;
use crate::engine::row_flow::{self, RowFlowError};
use crate::engine::uniformity;

/// 테이퍼 탐색 결과와 반복 메타데이터.
#[derive(Debug, Clone)]
pub struct TaperOutcome {
    /// 관측한 것 중 가장 균일한 레이아웃
    pub layout: HoleLayout,
    /// 해당 레이아웃의 균일도 오차 [CV %]
    pub uniformity_error_pct: f64,
    /// 해당 레이아웃의 기준 압력 [kPa]
    pub reference_pressure_kpa: f64,
    /// 수행한 드릴 축소 단계 수
    pub steps: u32,
    /// 반복별 균일도 오차 이력 [CV %]. 외부 관측 계층이 기록할 수 있게 남긴다.
    pub error_history_pct: Vec<f64>,
}

/// 모든 열을 가장 큰 허용 드릴로 채운 뒤, 목표 균일도에 들 때까지
/// 유량이 가장 큰 열의 드릴을 한 단계씩 줄이는 탐욕 탐색.
///
/// 동률이면 낮은 열 번호를 먼저 줄인다. 더 줄일 열이 없으면 그때까지
/// 관측한 최선의 레이아웃을 반환하고, 수락 여부는 호출자가 정한다.
/// 전체 반복은 열 수 × 드릴 종수로 제한해 진동해도 반드시 끝난다.
pub fn taper_layout(
    blank: &HoleLayout,
    drill_sizes_mm: &[f64],
    params: &FlowParameters,
    target_cv_pct: f64,
) -> Result<TaperOutcome, RowFlowError> {
    if blank.is_empty() {
        return Ok(TaperOutcome {
            layout: blank.clone(),
            uniformity_error_pct: 0.0,
            reference_pressure_kpa: 0.0,
            steps: 0,
            error_history_pct: Vec::new(),
        });
    }

    let mut sizes = drill_sizes_mm.to_vec();
    sizes.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));
    sizes.dedup();

    let mut layout = match sizes.first() {
        Some(&largest) => {
            let mut l = blank.clone();
            for hole in blank.holes() {
                l = l.with_hole_diameter(hole.row_index, largest);
            }
            l
        }
        None => blank.clone(),
    };

    let max_steps = (layout.len() * sizes.len().max(1)) as u32;
    let mut history = Vec::new();
    let mut steps = 0u32;
    let mut best_layout = layout.clone();
    let mut best_cv = f64::INFINITY;
    let mut best_reference_kpa = 0.0;

    loop {
        let solution = row_flow::solve_row_flows(&layout, params)?;
        let cv = uniformity::coefficient_of_variation_pct(&solution.flows_lps);
        if !cv.is_finite() {
            return Err(RowFlowError::NonFinite);
        }
        history.push(cv);
        if cv < best_cv {
            best_cv = cv;
            best_layout = layout.clone();
            best_reference_kpa = solution.reference_pressure_kpa;
        }
        if cv <= target_cv_pct || steps >= max_steps {
            break;
        }

        // 축소 가능한 열 중 유량이 가장 큰 열을 고른다.
        let mut pick: Option<(usize, f64)> = None;
        for (i, hole) in layout.holes().iter().enumerate() {
            let at = sizes.iter().position(|s| *s == hole.hole_diameter_mm);
            let reducible = matches!(at, Some(p) if p + 1 < sizes.len());
            if !reducible {
                continue;
            }
            let q = solution.flows_lps[i];
            if pick.map_or(true, |(_, best_q)| q > best_q) {
                pick = Some((i, q));
            }
        }
        let (row, _) = match pick {
            Some(p) => p,
            None => break,
        };
        let current = layout.holes()[row].hole_diameter_mm;
        let next = match sizes.iter().position(|s| *s == current) {
            Some(p) => sizes[p + 1],
            None => break,
        };
        layout = layout.with_hole_diameter(row, next);
        steps += 1;
    }

    Ok(TaperOutcome {
        layout: best_layout,
        uniformity_error_pct: best_cv,
        reference_pressure_kpa: best_reference_kpa,
        steps,
        error_history_pct: history,
    })
}
