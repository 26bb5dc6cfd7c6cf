use crate::engine::layout::HoleLayout;
use crate::engine::params::{DesignRules, FlowParameters, UNIFORMITY_TARGET_PCT};
use crate::engine::row_flow::{self, RowFlowError};
use crate::engine::taper;

/// 후보 열 간격 목록 [mm]. 굵은 간격(적은 타공)부터 시도한다.
pub const SPACING_CANDIDATES_MM: [f64; 6] = [150.0, 120.0, 100.0, 80.0, 60.0, 50.0];

/// 설계 요청 한 건의 실패 오류.
#[derive(Debug)]
pub enum DesignError {
    /// 입력값 오류. 솔버를 돌리기 전에 검출되며 재시도하지 않는다.
    InvalidParameter(&'static str),
    /// 어떤 간격/테이퍼 조합도 목표 균일도를 만족하지 못함
    NotConverged(String),
}

impl std::fmt::Display for DesignError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DesignError::InvalidParameter(msg) => write!(f, "입력 오류: {msg}"),
            DesignError::NotConverged(msg) => write!(f, "설계 미수렴: {msg}"),
        }
    }
}

impl std::error::Error for DesignError {}

impl From<RowFlowError> for DesignError {
    fn from(value: RowFlowError) -> Self {
        DesignError::NotConverged(value.to_string())
    }
}

/// 설계 결과와 탐색 메타데이터.
#[derive(Debug, Clone)]
pub struct DesignOutcome {
    pub layout: HoleLayout,
    /// 채택된 열 간격 [mm]
    pub spacing_mm: f64,
    /// 최종 균일도 오차 [CV %]
    pub uniformity_error_pct: f64,
    /// 수렴한 기준 압력 [kPa]
    pub reference_pressure_kpa: f64,
    /// 테이퍼 탐색이 수행한 드릴 축소 단계 수
    pub taper_steps: u32,
}

/// 주어진 간격으로 헤더 길이 안에 들어가는 열 수.
/// 위치는 0, s, 2s, … 로 배치되므로 floor(길이/간격)개가 들어간다.
pub fn row_count_for_spacing(header_len_mm: f64, spacing_mm: f64) -> usize {
    if header_len_mm <= 0.0 || spacing_mm <= 0.0 {
        return 0;
    }
    (header_len_mm / spacing_mm).floor() as usize
}

fn validate(params: &FlowParameters, rules: &DesignRules) -> Result<(), DesignError> {
    if params.pipe_diameter_mm <= 0.0 {
        return Err(DesignError::InvalidParameter("배관 내경은 0보다 커야 합니다."));
    }
    if params.flow_lps <= 0.0 {
        return Err(DesignError::InvalidParameter("전체 유량은 0보다 커야 합니다."));
    }
    if params.header_len_mm <= 0.0 {
        return Err(DesignError::InvalidParameter("헤더 길이는 0보다 커야 합니다."));
    }
    if rules.allowable_drill_sizes_mm.is_empty() {
        return Err(DesignError::InvalidParameter("허용 드릴 목록이 비어 있습니다."));
    }
    if rules.allowable_drill_sizes_mm.iter().any(|d| *d <= 0.0) {
        return Err(DesignError::InvalidParameter("드릴 직경은 0보다 커야 합니다."));
    }
    Ok(())
}

/// 기본 균일도 목표(5%)로 타공 레이아웃을 설계한다.
pub fn optimize(
    params: &FlowParameters,
    rules: &DesignRules,
) -> Result<DesignOutcome, DesignError> {
    optimize_with_target(params, rules, UNIFORMITY_TARGET_PCT)
}

/// 명시한 균일도 목표로 타공 레이아웃을 설계한다.
///
/// 후보 간격을 굵은 쪽부터 시도해 빈 레이아웃이 되는 간격은 건너뛰고,
/// 처음으로 목표를 만족한 레이아웃을 즉시 반환한다. 어느 간격에서
/// 유량 괄호를 잡지 못하면 그 간격만 버리고 다음 후보로 넘어간다.
/// 모든 후보가 실패하면 설계 전체가 미수렴이다.
pub fn optimize_with_target(
    params: &FlowParameters,
    rules: &DesignRules,
    target_cv_pct: f64,
) -> Result<DesignOutcome, DesignError> {
    validate(params, rules)?;
    let sizes = rules.sizes_descending();
    let largest = match sizes.first() {
        Some(&d) => d,
        None => return Err(DesignError::InvalidParameter("허용 드릴 목록이 비어 있습니다.")),
    };

    for &spacing in SPACING_CANDIDATES_MM.iter() {
        let rows = row_count_for_spacing(params.header_len_mm, spacing);
        if rows == 0 {
            continue;
        }
        let blank = HoleLayout::with_uniform_rows(rows, spacing, largest);
        let outcome = match taper::taper_layout(&blank, &sizes, params, target_cv_pct) {
            Ok(o) => o,
            // 이 간격은 요청 유량을 수력적으로 낼 수 없다. 다음 후보로.
            Err(_) => continue,
        };
        if outcome.uniformity_error_pct <= target_cv_pct {
            return Ok(DesignOutcome {
                layout: outcome.layout,
                spacing_mm: spacing,
                uniformity_error_pct: outcome.uniformity_error_pct,
                reference_pressure_kpa: outcome.reference_pressure_kpa,
                taper_steps: outcome.steps,
            });
        }
    }
    Err(DesignError::NotConverged(format!(
        "목표 균일도 {:.1}% 를 만족하는 간격이 없습니다 (시도한 간격 {:?} mm).",
        target_cv_pct, SPACING_CANDIDATES_MM
    )))
}

/// 레이아웃의 열별 토출 유량을 열 순서대로 반환한다. 표 표시/내보내기 용.
pub fn row_flows(layout: &HoleLayout, params: &FlowParameters) -> Result<Vec<f64>, DesignError> {
    Ok(row_flow::solve_row_flows(layout, params)?.flows_lps)
}
