use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_DESIGN: &str = "main_menu.design";
    pub const MAIN_MENU_ORIFICE: &str = "main_menu.orifice";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const PROMPT_SELECT: &str = "prompt.select";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";
    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";

    pub const DESIGN_HEADING: &str = "design.heading";
    pub const HELP_DESIGN: &str = "help.design";
    pub const PROMPT_PIPE_DIAMETER: &str = "design.prompt_pipe_diameter";
    pub const FLOW_UNIT_OPTIONS: &str = "design.flow_unit_options";
    pub const PROMPT_FLOW_VALUE: &str = "design.prompt_flow_value";
    pub const PROMPT_HEADER_LENGTH: &str = "design.prompt_header_length";
    pub const HEADER_TYPE_OPTIONS: &str = "design.header_type_options";
    pub const RESULT_TABLE_HEADER: &str = "design.result_table_header";
    pub const RESULT_SPACING: &str = "design.result_spacing";
    pub const RESULT_REYNOLDS: &str = "design.result_reynolds";
    pub const RESULT_UNIFORMITY: &str = "design.result_uniformity";
    pub const RESULT_REFERENCE_PRESSURE: &str = "design.result_reference_pressure";
    pub const RESULT_TAPER_STEPS: &str = "design.result_taper_steps";
    pub const RESULT_SHEET: &str = "design.result_sheet";
    pub const DESIGN_FAILED: &str = "design.failed";

    pub const ORIFICE_HEADING: &str = "orifice.heading";
    pub const HELP_ORIFICE: &str = "help.orifice";
    pub const ORIFICE_OPTIONS: &str = "orifice.options";
    pub const PROMPT_ORIFICE_DIAMETER: &str = "orifice.prompt_diameter";
    pub const PROMPT_ORIFICE_FLOW: &str = "orifice.prompt_flow";
    pub const PROMPT_ORIFICE_DROP: &str = "orifice.prompt_drop";
    pub const RESULT_ORIFICE_DROP: &str = "orifice.result_drop";
    pub const RESULT_ORIFICE_FLOW: &str = "orifice.result_flow";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_CURRENT_LANGUAGE: &str = "settings.current_language";
    pub const SETTINGS_LANGUAGE_OPTIONS: &str = "settings.language_options";
    pub const SETTINGS_PROMPT_CHANGE: &str = "settings.prompt_change";
    pub const SETTINGS_INVALID: &str = "settings.invalid";
    pub const SETTINGS_SAVED: &str = "settings.saved";
    pub const SETTINGS_DRILL_SET: &str = "settings.drill_set";
    pub const SETTINGS_ROW_COUNT: &str = "settings.row_count";
    pub const SETTINGS_TARGET_CV: &str = "settings.target_cv";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ko,
    En,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("en") {
            Language::En
        } else {
            Language::Ko
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::Ko => "ko",
            Language::En => "en",
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 언어 코드(ko/en)에 따라 번역기를 생성한다. 알 수 없는 코드는 ko로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리(locales/ 등)를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let overrides = pack_dir
            .and_then(|dir| load_overrides(dir, lang_code))
            .or_else(|| load_overrides("locales", lang_code))
            .or_else(|| built_in_pack(lang_code));
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    pub fn language_code(&self) -> &'static str {
        self.lang.as_code()
    }

    /// 키를 조회해 문자열을 반환한다. 언어팩에 없으면 None.
    pub fn lookup(&self, key: &str) -> Option<String> {
        self.overrides.as_ref().and_then(|m| m.get(key).cloned())
    }

    /// 번역을 가져온다. 영어 번역이 없으면 한국어 문자열을 폴백한다.
    pub fn t(&self, key: &str) -> &'static str {
        if let Some(ref map) = self.overrides {
            if let Some(v) = map.get(key) {
                return Box::leak(v.clone().into_boxed_str());
            }
        }
        match self.lang {
            Language::En => en(key).unwrap_or_else(|| ko(key)),
            Language::Ko => ko(key),
        }
    }
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en-us".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "ko" => Some("ko".into()),
        "ko-kr" => Some("ko-kr".into()),
        "en" => Some("en".into()),
        "en-us" => Some("en-us".into()),
        "en-uk" => Some("en-us".into()),
        "auto" | "" => None,
        other if other.starts_with("ko") => Some("ko".into()),
        other if other.starts_with("en") => Some("en-us".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "ko" => Some("ko".into()),
        "en" => Some("en".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(loc) = get_locale() {
        if let Some(lang) = normalize_locale_string(&loc) {
            return Some(lang);
        }
    }
    if let Ok(lang) = std::env::var("LANG") {
        if let Some(code) = normalize_locale_string(&lang) {
            return Some(code);
        }
    }
    if let Ok(lang) = std::env::var("LC_ALL") {
        if let Some(code) = normalize_locale_string(&lang) {
            return Some(code);
        }
    }
    None
}

/// TOML 기반 언어팩을 로드한다. 형식: key = "value" 로 구성된 플랫 맵.
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let try_load = |code: &str| -> Option<HashMap<String, String>> {
        let path = Path::new(dir).join(format!("{code}.toml"));
        let content = fs::read_to_string(path).ok()?;
        parse_toml_to_map(&content)
    };

    // 1) full code (e.g., en-us)
    if let Some(map) = try_load(lang) {
        return Some(map);
    }
    // 2) base code (e.g., en)
    if let Some((base, _)) = lang.split_once(['-', '_']) {
        if let Some(map) = try_load(base) {
            return Some(map);
        }
    }
    None
}

fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

/// 내장 언어팩(파일이 없어도 동작하도록 빌드 시 포함).
fn built_in_pack(lang: &str) -> Option<HashMap<String, String>> {
    match lang.to_lowercase().as_str() {
        "en-us" | "en" => parse_toml_to_map(include_str!("../locales/en-us.toml")),
        "ko-kr" | "ko" => parse_toml_to_map(include_str!("../locales/ko-kr.toml")),
        _ => None,
    }
}

fn ko(key: &str) -> &'static str {
    use keys::*;
    match key {
        ERROR_PREFIX => "오류",
        APP_EXIT => "프로그램을 종료합니다.",
        MAIN_MENU_TITLE => "\n=== Flow Header Toolbox ===",
        MAIN_MENU_DESIGN => "1) 타공 헤더 설계",
        MAIN_MENU_ORIFICE => "2) 오리피스 계산기",
        MAIN_MENU_SETTINGS => "3) 설정",
        MAIN_MENU_EXIT => "0) 종료",
        PROMPT_MENU_SELECT => "메뉴 선택: ",
        PROMPT_SELECT => "선택: ",
        INVALID_SELECTION_RETRY => "잘못된 입력입니다. 다시 선택하세요.",
        ERROR_INVALID_NUMBER => "숫자를 입력하세요.",
        DESIGN_HEADING => "\n-- 타공 헤더 설계 --",
        HELP_DESIGN => "도움말: 배관 내경[mm], 전체 유량, 헤더 길이[mm], 운전 모드를 입력하면 드릴 표를 출력합니다.",
        PROMPT_PIPE_DIAMETER => "배관 내경 [mm]: ",
        FLOW_UNIT_OPTIONS => "유량 단위: 1=L/s 2=US GPM",
        PROMPT_FLOW_VALUE => "유량 값: ",
        PROMPT_HEADER_LENGTH => "헤더 길이 [mm]: ",
        HEADER_TYPE_OPTIONS => "운전 모드: 1=가압 2=흡입",
        RESULT_TABLE_HEADER => "  열    위치[mm]  드릴[mm]  유량[L/s]",
        RESULT_SPACING => "열 간격:",
        RESULT_REYNOLDS => "레이놀즈수:",
        RESULT_UNIFORMITY => "균일도 오차:",
        RESULT_REFERENCE_PRESSURE => "기준 압력:",
        RESULT_TAPER_STEPS => "드릴 축소 단계:",
        RESULT_SHEET => "전개 판재 크기:",
        DESIGN_FAILED => "설계 실패:",
        ORIFICE_HEADING => "\n-- 오리피스 계산기 --",
        HELP_ORIFICE => "도움말: 단일 오리피스의 유량↔차압을 Cd=0.61 기준으로 계산합니다.",
        ORIFICE_OPTIONS => "1) 유량 → 차압  2) 차압 → 유량",
        PROMPT_ORIFICE_DIAMETER => "오리피스 직경 [mm]: ",
        PROMPT_ORIFICE_FLOW => "유량 [L/s]: ",
        PROMPT_ORIFICE_DROP => "차압 [kPa]: ",
        RESULT_ORIFICE_DROP => "필요 차압:",
        RESULT_ORIFICE_FLOW => "통과 유량:",
        SETTINGS_HEADING => "\n-- 설정 --",
        SETTINGS_CURRENT_LANGUAGE => "현재 언어:",
        SETTINGS_LANGUAGE_OPTIONS => "1) auto  2) ko  3) en-us",
        SETTINGS_PROMPT_CHANGE => "변경할 번호(취소하려면 엔터): ",
        SETTINGS_INVALID => "잘못된 입력이므로 변경하지 않습니다.",
        SETTINGS_SAVED => "언어가 변경되었습니다(다음 실행부터 적용):",
        SETTINGS_DRILL_SET => "허용 드릴 [mm]:",
        SETTINGS_ROW_COUNT => "권장 열 수 상한:",
        SETTINGS_TARGET_CV => "균일도 목표 [CV %]:",
        _ => "[missing translation]",
    }
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "Error",
        APP_EXIT => "Exiting application.",
        MAIN_MENU_TITLE => "\n=== Flow Header Toolbox ===",
        MAIN_MENU_DESIGN => "1) Perforated header design",
        MAIN_MENU_ORIFICE => "2) Orifice calculator",
        MAIN_MENU_SETTINGS => "3) Settings",
        MAIN_MENU_EXIT => "0) Exit",
        PROMPT_MENU_SELECT => "Select menu: ",
        PROMPT_SELECT => "Select: ",
        INVALID_SELECTION_RETRY => "Invalid input. Please try again.",
        ERROR_INVALID_NUMBER => "Please enter a number.",
        DESIGN_HEADING => "\n-- Perforated Header Design --",
        HELP_DESIGN => "Help: enter pipe ID [mm], total flow, header length [mm] and mode to get the drill table.",
        PROMPT_PIPE_DIAMETER => "Pipe inner diameter [mm]: ",
        FLOW_UNIT_OPTIONS => "Flow unit: 1=L/s 2=US GPM",
        PROMPT_FLOW_VALUE => "Flow value: ",
        PROMPT_HEADER_LENGTH => "Header length [mm]: ",
        HEADER_TYPE_OPTIONS => "Mode: 1=Pressure 2=Suction",
        RESULT_TABLE_HEADER => " row     pos[mm] drill[mm] flow[L/s]",
        RESULT_SPACING => "Row spacing:",
        RESULT_REYNOLDS => "Reynolds number:",
        RESULT_UNIFORMITY => "Uniformity error:",
        RESULT_REFERENCE_PRESSURE => "Reference pressure:",
        RESULT_TAPER_STEPS => "Drill reduction steps:",
        RESULT_SHEET => "Sheet size:",
        DESIGN_FAILED => "Design failed:",
        ORIFICE_HEADING => "\n-- Orifice Calculator --",
        HELP_ORIFICE => "Help: single-orifice flow <-> pressure drop with Cd = 0.61.",
        ORIFICE_OPTIONS => "1) Flow -> drop  2) Drop -> flow",
        PROMPT_ORIFICE_DIAMETER => "Orifice diameter [mm]: ",
        PROMPT_ORIFICE_FLOW => "Flow [L/s]: ",
        PROMPT_ORIFICE_DROP => "Pressure drop [kPa]: ",
        RESULT_ORIFICE_DROP => "Required drop:",
        RESULT_ORIFICE_FLOW => "Flow through:",
        SETTINGS_HEADING => "\n-- Settings --",
        SETTINGS_CURRENT_LANGUAGE => "Current language:",
        SETTINGS_LANGUAGE_OPTIONS => "1) auto  2) ko  3) en-us",
        SETTINGS_PROMPT_CHANGE => "Enter number to change (enter to cancel): ",
        SETTINGS_INVALID => "Invalid input; language unchanged.",
        SETTINGS_SAVED => "Language changed (applies from next launch):",
        SETTINGS_DRILL_SET => "Allowed drills [mm]:",
        SETTINGS_ROW_COUNT => "Recommended row cap:",
        SETTINGS_TARGET_CV => "Uniformity target [CV %]:",
        _ => return None,
    })
}
