/// 예리한 모서리 오리피스의 토출 계수.
const DISCHARGE_COEFF: f64 = 0.61;

/// 물 밀도 [kg/m3]
const WATER_DENSITY_KG_M3: f64 = 1000.0;

/// 주어진 차압에서 오리피스를 통과하는 유량을 계산한다.
///
/// Q = Cd·A·sqrt(2·ΔP/ρ). 음수 차압은 0으로 간주한다(역류 모델 없음).
pub fn flow_from_drop_lps(diameter_mm: f64, drop_kpa: f64) -> f64 {
    if diameter_mm <= 0.0 {
        return 0.0;
    }
    let drop_pa = drop_kpa.max(0.0) * 1000.0;
    let diameter_m = diameter_mm / 1000.0;
    let area = std::f64::consts::PI * diameter_m * diameter_m / 4.0;
    let velocity = (2.0 * drop_pa / WATER_DENSITY_KG_M3).sqrt();
    DISCHARGE_COEFF * area * velocity * 1000.0
}

/// 목표 유량을 흘리는 데 필요한 오리피스 차압을 계산한다. `flow_from_drop_lps`의 역함수.
pub fn drop_from_flow_kpa(flow_lps: f64, diameter_mm: f64) -> f64 {
    if diameter_mm <= 0.0 || flow_lps == 0.0 {
        return 0.0;
    }
    let diameter_m = diameter_mm / 1000.0;
    let area = std::f64::consts::PI * diameter_m * diameter_m / 4.0;
    let velocity = (flow_lps / 1000.0) / (DISCHARGE_COEFF * area);
    WATER_DENSITY_KG_M3 * velocity * velocity / 2.0 / 1000.0
}
