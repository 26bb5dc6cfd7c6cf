use std::io::{self, Write};

use crate::app::AppError;
use crate::config::Config;
use crate::engine::{self, FlowParameters, HeaderType};
use crate::i18n::{keys, Translator};

/// US GPM → L/s 환산 계수.
const GPM_TO_LPS: f64 = 0.0631;

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    DesignHeader,
    Orifice,
    Settings,
    Exit,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu(tr: &Translator) -> Result<MenuChoice, AppError> {
    println!("{}", tr.t(keys::MAIN_MENU_TITLE));
    println!("{}", tr.t(keys::MAIN_MENU_DESIGN));
    println!("{}", tr.t(keys::MAIN_MENU_ORIFICE));
    println!("{}", tr.t(keys::MAIN_MENU_SETTINGS));
    println!("{}", tr.t(keys::MAIN_MENU_EXIT));
    loop {
        let sel = read_line(tr.t(keys::PROMPT_MENU_SELECT))?;
        match sel.trim() {
            "1" => return Ok(MenuChoice::DesignHeader),
            "2" => return Ok(MenuChoice::Orifice),
            "3" => return Ok(MenuChoice::Settings),
            "0" => return Ok(MenuChoice::Exit),
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

/// 타공 헤더 설계 메뉴를 처리한다.
pub fn handle_design(tr: &Translator, cfg: &Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::DESIGN_HEADING));
    println!("{}", tr.t(keys::HELP_DESIGN));

    let pipe_diameter_mm = read_f64(tr, tr.t(keys::PROMPT_PIPE_DIAMETER))?;
    println!("{}", tr.t(keys::FLOW_UNIT_OPTIONS));
    let unit = read_line(tr.t(keys::PROMPT_SELECT))?;
    let flow_value = read_f64(tr, tr.t(keys::PROMPT_FLOW_VALUE))?;
    let flow_lps = if unit.trim() == "2" {
        flow_value * GPM_TO_LPS
    } else {
        flow_value
    };
    let header_len_mm = read_f64(tr, tr.t(keys::PROMPT_HEADER_LENGTH))?;
    println!("{}", tr.t(keys::HEADER_TYPE_OPTIONS));
    let mode = read_line(tr.t(keys::PROMPT_SELECT))?;
    let header_type = if mode.trim() == "2" {
        HeaderType::Suction
    } else {
        HeaderType::Pressure
    };

    let params = FlowParameters {
        pipe_diameter_mm,
        flow_lps,
        header_len_mm,
        header_type,
    };
    let rules = cfg.design.rules();

    match engine::optimize_with_target(&params, &rules, cfg.design.target_cv_pct) {
        Ok(outcome) => {
            let flows = engine::row_flows(&outcome.layout, &params)?;
            println!("{}", tr.t(keys::RESULT_TABLE_HEADER));
            for (hole, flow) in outcome.layout.holes().iter().zip(flows.iter()) {
                println!(
                    "{:>4} {:>11.1} {:>9.1} {:>9.3}",
                    hole.row_index,
                    hole.axial_pos_mm(),
                    hole.hole_diameter_mm,
                    flow
                );
            }
            println!("{} {:.0} mm", tr.t(keys::RESULT_SPACING), outcome.spacing_mm);
            println!(
                "{} {:.0}",
                tr.t(keys::RESULT_REYNOLDS),
                engine::pipe_reynolds(&params)
            );
            println!(
                "{} {:.2} %",
                tr.t(keys::RESULT_UNIFORMITY),
                outcome.uniformity_error_pct
            );
            println!(
                "{} {:.2} kPa",
                tr.t(keys::RESULT_REFERENCE_PRESSURE),
                outcome.reference_pressure_kpa
            );
            println!("{} {}", tr.t(keys::RESULT_TAPER_STEPS), outcome.taper_steps);
            let circumference_mm = std::f64::consts::PI * params.pipe_diameter_mm;
            println!(
                "{} {:.0} mm × {:.0} mm",
                tr.t(keys::RESULT_SHEET),
                circumference_mm,
                params.header_len_mm
            );
        }
        Err(err) => println!("{} {err}", tr.t(keys::DESIGN_FAILED)),
    }
    Ok(())
}

/// 오리피스 계산기 메뉴를 처리한다.
pub fn handle_orifice(tr: &Translator) -> Result<(), AppError> {
    println!("{}", tr.t(keys::ORIFICE_HEADING));
    println!("{}", tr.t(keys::HELP_ORIFICE));
    println!("{}", tr.t(keys::ORIFICE_OPTIONS));
    let sel = read_line(tr.t(keys::PROMPT_SELECT))?;
    match sel.trim() {
        "1" => {
            let diameter = read_f64(tr, tr.t(keys::PROMPT_ORIFICE_DIAMETER))?;
            let flow = read_f64(tr, tr.t(keys::PROMPT_ORIFICE_FLOW))?;
            let drop = engine::orifice::drop_from_flow_kpa(flow, diameter);
            println!("{} {:.3} kPa", tr.t(keys::RESULT_ORIFICE_DROP), drop);
        }
        "2" => {
            let diameter = read_f64(tr, tr.t(keys::PROMPT_ORIFICE_DIAMETER))?;
            let drop = read_f64(tr, tr.t(keys::PROMPT_ORIFICE_DROP))?;
            let flow = engine::orifice::flow_from_drop_lps(diameter, drop);
            println!("{} {:.3} L/s", tr.t(keys::RESULT_ORIFICE_FLOW), flow);
        }
        _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
    }
    Ok(())
}

/// 설정 메뉴를 처리한다.
pub fn handle_settings(tr: &Translator, cfg: &mut Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::SETTINGS_HEADING));
    println!("{} {}", tr.t(keys::SETTINGS_CURRENT_LANGUAGE), cfg.language);
    println!(
        "{} {:?}",
        tr.t(keys::SETTINGS_DRILL_SET),
        cfg.design.allowable_drill_sizes_mm
    );
    println!("{} {}", tr.t(keys::SETTINGS_ROW_COUNT), cfg.design.row_count);
    println!(
        "{} {:.1}",
        tr.t(keys::SETTINGS_TARGET_CV),
        cfg.design.target_cv_pct
    );
    println!("{}", tr.t(keys::SETTINGS_LANGUAGE_OPTIONS));
    let sel = read_line(tr.t(keys::SETTINGS_PROMPT_CHANGE))?;
    if sel.trim().is_empty() {
        return Ok(());
    }
    match sel.trim() {
        "1" => cfg.language = "auto".to_string(),
        "2" => cfg.language = "ko".to_string(),
        "3" => cfg.language = "en-us".to_string(),
        _ => {
            println!("{}", tr.t(keys::SETTINGS_INVALID));
            return Ok(());
        }
    }
    println!("{} {}", tr.t(keys::SETTINGS_SAVED), cfg.language);
    Ok(())
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush().map_err(AppError::Io)?;
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).map_err(AppError::Io)?;
    Ok(buf)
}

fn read_f64(tr: &Translator, prompt: &str) -> Result<f64, AppError> {
    loop {
        let s = read_line(prompt)?;
        match s.trim().parse::<f64>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}
