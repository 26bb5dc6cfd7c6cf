use crate::engine::friction;
use crate::engine::layout::HoleLayout;
use crate::engine::orifice;
use crate::engine::params::{FlowParameters, HeaderType};

/// 질량수지 허용 오차 [L/s]
pub const MASS_BALANCE_TOL_LPS: f64 = 1e-4;

/// 이분법 반복 상한.
pub const MAX_BISECTION_STEPS: u32 = 100;

/// 가압 헤더 기준압 탐색 구간 [kPa] (약한 쪽, 강한 쪽)
const PRESSURE_BRACKET_KPA: (f64, f64) = (0.5, 200.0);

/// 흡입 헤더 기준압 탐색 구간 [kPa] (약한 쪽, 강한 쪽)
const SUCTION_BRACKET_KPA: (f64, f64) = (-0.5, -200.0);

/// 열 유량 솔버 오류.
#[derive(Debug)]
pub enum RowFlowError {
    /// 탐색 구간 전체에서 후보 총유량이 목표를 넘기만 하거나 모자라기만 함
    NoBracket { target_lps: f64 },
    /// 반복 상한 안에 질량수지가 수렴하지 않음
    IterationLimit,
    /// 계산 도중 NaN/∞ 발생
    NonFinite,
}

impl std::fmt::Display for RowFlowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RowFlowError::NoBracket { target_lps } => write!(
                f,
                "탐색 구간 안에서 목표 유량 {target_lps} L/s 의 해를 괄호로 잡을 수 없습니다."
            ),
            RowFlowError::IterationLimit => write!(f, "이분법 반복 상한 안에 수렴하지 않았습니다."),
            RowFlowError::NonFinite => write!(f, "계산 도중 유한하지 않은 값이 발생했습니다."),
        }
    }
}

impl std::error::Error for RowFlowError {}

/// 열 유량 해와 솔버 메타데이터.
#[derive(Debug, Clone)]
pub struct RowFlowSolution {
    /// 열 순서대로의 토출 유량 [L/s]
    pub flows_lps: Vec<f64>,
    /// 수렴한 기준 압력 [kPa]. 가압 헤더는 공급압, 흡입 헤더는 말단 흡입압.
    pub reference_pressure_kpa: f64,
    /// 이분법 반복 횟수
    pub iterations: u32,
}

/// 시험 기준압에 대해 헤더를 따라 전진 스윕하며 열별 유량 후보를 계산한다.
///
/// 각 열의 국부 압력은 직전 구간의 마찰손실로부터 나오며, 구간 유량은
/// 배관에 아직 남아 있는 유량(목표 유량 - 상류에서 빠져나간 합)이다.
fn sweep(layout: &HoleLayout, params: &FlowParameters, reference_kpa: f64) -> Vec<f64> {
    let holes = layout.holes();
    let mut flows = Vec::with_capacity(holes.len());
    let mut local_kpa = reference_kpa;
    let mut taken_lps = 0.0;
    for (i, hole) in holes.iter().enumerate() {
        let drop_kpa = match params.header_type {
            HeaderType::Pressure => local_kpa,
            HeaderType::Suction => -local_kpa,
        };
        let q = orifice::flow_from_drop_lps(hole.hole_diameter_mm, drop_kpa);
        flows.push(q);
        taken_lps += q;
        if i + 1 < holes.len() {
            let remaining_lps = (params.flow_lps - taken_lps).max(0.0);
            let seg_drop =
                friction::friction_drop_kpa(hole.spacing_mm, params.pipe_diameter_mm, remaining_lps);
            local_kpa = match params.header_type {
                HeaderType::Pressure => local_kpa - seg_drop,
                HeaderType::Suction => local_kpa + seg_drop,
            };
        }
    }
    flows
}

/// 레이아웃과 유동 조건에 대한 열별 토출 유량을 계산한다.
///
/// 기준 압력 하나를 미지수로 두는 1차원 경계값 문제다. 후보 총유량은
/// 구동압 크기에 단조이므로 고정 구간에서 이분법으로 질량수지
/// `|Σq - flow_lps| ≤ 1e-4 L/s` 를 맞춘다. 구간 안에 부호 변화가 없으면
/// 요청 유량을 수력적으로 낼 수 없는 구성이므로 수렴 실패로 보고한다.
pub fn solve_row_flows(
    layout: &HoleLayout,
    params: &FlowParameters,
) -> Result<RowFlowSolution, RowFlowError> {
    if layout.is_empty() {
        return Ok(RowFlowSolution {
            flows_lps: Vec::new(),
            reference_pressure_kpa: 0.0,
            iterations: 0,
        });
    }

    let (weak, strong) = match params.header_type {
        HeaderType::Pressure => PRESSURE_BRACKET_KPA,
        HeaderType::Suction => SUCTION_BRACKET_KPA,
    };
    let candidate_total = |p: f64| sweep(layout, params, p).iter().sum::<f64>();

    let weak_total = candidate_total(weak);
    let strong_total = candidate_total(strong);
    if !weak_total.is_finite() || !strong_total.is_finite() {
        return Err(RowFlowError::NonFinite);
    }
    if weak_total - params.flow_lps > MASS_BALANCE_TOL_LPS
        || params.flow_lps - strong_total > MASS_BALANCE_TOL_LPS
    {
        return Err(RowFlowError::NoBracket {
            target_lps: params.flow_lps,
        });
    }

    // lo는 유량이 모자라는 쪽, hi는 넘치는 쪽을 추적한다.
    let mut lo = weak;
    let mut hi = strong;
    for step in 1..=MAX_BISECTION_STEPS {
        let mid = 0.5 * (lo + hi);
        let total = candidate_total(mid);
        if !total.is_finite() {
            return Err(RowFlowError::NonFinite);
        }
        if (total - params.flow_lps).abs() <= MASS_BALANCE_TOL_LPS {
            let flows = sweep(layout, params, mid);
            if flows.iter().any(|q| !q.is_finite()) {
                return Err(RowFlowError::NonFinite);
            }
            return Ok(RowFlowSolution {
                flows_lps: flows,
                reference_pressure_kpa: mid,
                iterations: step,
            });
        }
        if total < params.flow_lps {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    Err(RowFlowError::IterationLimit)
}
