use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::engine::{
    DesignRules, DEFAULT_DRILL_SIZES_MM, DEFAULT_ROW_COUNT, UNIFORMITY_TARGET_PCT,
};

/// 설계 기본값 설정. `[design]` 테이블로 저장된다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignDefaults {
    /// 권장 열 수 상한 (정보용)
    pub row_count: usize,
    /// 허용 드릴 직경 목록 [mm]
    pub allowable_drill_sizes_mm: Vec<f64>,
    /// 테이퍼 탐색 수락 기준 [CV %]
    pub target_cv_pct: f64,
}

impl Default for DesignDefaults {
    fn default() -> Self {
        Self {
            row_count: DEFAULT_ROW_COUNT,
            allowable_drill_sizes_mm: DEFAULT_DRILL_SIZES_MM.to_vec(),
            target_cv_pct: UNIFORMITY_TARGET_PCT,
        }
    }
}

impl DesignDefaults {
    /// 엔진에 넘길 설계 규칙으로 변환한다.
    pub fn rules(&self) -> DesignRules {
        DesignRules {
            row_count: self.row_count,
            allowable_drill_sizes_mm: self.allowable_drill_sizes_mm.clone(),
        }
    }
}

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// 언어 코드 (auto/ko/en-us 등)
    pub language: String,
    pub design: DesignDefaults,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: "auto".to_string(),
            design: DesignDefaults::default(),
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug)]
pub enum ConfigError {
    /// 파일 입출력 오류
    Io(std::io::Error),
    /// TOML 역직렬화 오류
    Serde(toml::de::Error),
    /// TOML 직렬화 오류
    Serialize(toml::ser::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "파일 입출력 오류: {e}"),
            ConfigError::Serde(e) => write!(f, "설정 파싱 오류: {e}"),
            ConfigError::Serialize(e) => write!(f, "설정 직렬화 오류: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        ConfigError::Io(value)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(value: toml::de::Error) -> Self {
        ConfigError::Serde(value)
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(value: toml::ser::Error) -> Self {
        ConfigError::Serialize(value)
    }
}

/// config.toml을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default() -> Result<Config, ConfigError> {
    let path = Path::new("config.toml");
    if path.exists() {
        let content = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&content)?;
        Ok(cfg)
    } else {
        let cfg = Config::default();
        save_config(&cfg)?;
        Ok(cfg)
    }
}

fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    let content = toml::to_string_pretty(cfg)?;
    fs::write("config.toml", content)?;
    Ok(())
}

impl Config {
    /// 설정을 config.toml에 저장한다.
    pub fn save(&self) -> Result<(), ConfigError> {
        save_config(self)
    }
}
