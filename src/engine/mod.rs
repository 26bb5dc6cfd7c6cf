//! 타공 헤더 수력 설계 엔진.
//!
//! 순수 계산만 담당한다. 입출력과 표시 문자열은 상위 계층 몫이다.

pub mod friction;
pub mod layout;
pub mod optimizer;
pub mod orifice;
pub mod params;
pub mod row_flow;
pub mod taper;
pub mod uniformity;

pub use friction::pipe_reynolds;
pub use layout::{HoleLayout, HoleSpec};
pub use optimizer::{
    optimize, optimize_with_target, row_count_for_spacing, row_flows, DesignError, DesignOutcome,
    SPACING_CANDIDATES_MM,
};
pub use params::{
    DesignRules, FlowParameters, HeaderType, DEFAULT_DRILL_SIZES_MM, DEFAULT_ROW_COUNT,
    UNIFORMITY_TARGET_PCT,
};
pub use row_flow::{solve_row_flows, RowFlowError, RowFlowSolution};
pub use taper::{taper_layout, TaperOutcome};
pub use uniformity::{coefficient_of_variation_pct, uniformity_error_pct};
