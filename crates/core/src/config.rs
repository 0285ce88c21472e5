//! 설정 관리 -- clfstat.toml 파싱 및 런타임 설정
//!
//! [`ClfstatConfig`]는 모든 단계의 설정을 담는 최상위 구조체입니다.
//! 설정 파일이 없어도 기본값만으로 동작합니다.
//!
//! # 설정 로딩 우선순위
//! 1. CLI 인자 (최고 우선)
//! 2. 환경변수 (`CLFSTAT_REPORT_OUTPUT_DIR=out` 형식)
//! 3. 설정 파일 (`clfstat.toml`)
//! 4. 기본값 (`Default` 구현)
//!
//! # 사용 예시
//! ```no_run
//! # fn example() -> Result<(), clfstat_core::error::ClfstatError> {
//! use clfstat_core::config::ClfstatConfig;
//!
//! // 파일에서 로드 + 환경변수 오버라이드
//! let config = ClfstatConfig::load("clfstat.toml")?;
//!
//! // TOML 문자열에서 직접 파싱
//! let config = ClfstatConfig::parse("[report]\ntop_n = 5")?;
//! # Ok(())
//! # }
//! ```

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ClfstatError, ConfigError};
use crate::types::DecodeErrorPolicy;

/// clfstat 통합 설정
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClfstatConfig {
    /// 일반 설정 (로깅)
    #[serde(default)]
    pub general: GeneralConfig,
    /// 라인 파서 설정
    #[serde(default)]
    pub parser: ParserConfig,
    /// 리포트 출력 설정
    #[serde(default)]
    pub report: ReportConfig,
}

impl ClfstatConfig {
    /// TOML 파일에서 설정을 로드하고 환경변수 오버라이드를 적용합니다.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ClfstatError> {
        let mut config = Self::from_file(path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// 설정 파일이 주어지면 로드하고, 없으면 기본값에 환경변수만 적용합니다.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ClfstatError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let mut config = Self::default();
                config.apply_env_overrides();
                config.validate()?;
                Ok(config)
            }
        }
    }

    /// TOML 파일에서 설정을 로드합니다 (환경변수 오버라이드 없음).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ClfstatError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ClfstatError::Config(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                })
            } else {
                ClfstatError::Io(e)
            }
        })?;
        let config = Self::parse(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// TOML 문자열에서 설정을 파싱합니다.
    pub fn parse(toml_str: &str) -> Result<Self, ClfstatError> {
        toml::from_str(toml_str).map_err(|e| {
            ClfstatError::Config(ConfigError::ParseFailed {
                reason: e.to_string(),
            })
        })
    }

    /// 환경변수로 설정값을 오버라이드합니다.
    ///
    /// 환경변수 네이밍 규칙: `CLFSTAT_{SECTION}_{FIELD}`
    /// 예: `CLFSTAT_PARSER_ON_DECODE_ERROR=replace`
    pub fn apply_env_overrides(&mut self) {
        // General
        override_string(&mut self.general.log_level, "CLFSTAT_GENERAL_LOG_LEVEL");
        override_string(&mut self.general.log_format, "CLFSTAT_GENERAL_LOG_FORMAT");

        // Parser
        override_parsed(
            &mut self.parser.on_decode_error,
            "CLFSTAT_PARSER_ON_DECODE_ERROR",
        );

        // Report
        override_string(&mut self.report.output_dir, "CLFSTAT_REPORT_OUTPUT_DIR");
        override_parsed(&mut self.report.top_n, "CLFSTAT_REPORT_TOP_N");
        override_parsed(
            &mut self.report.retain_events,
            "CLFSTAT_REPORT_RETAIN_EVENTS",
        );
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), ClfstatError> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.general.log_level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_level".to_owned(),
                reason: format!("must be one of: {}", valid_levels.join(", ")),
            }
            .into());
        }

        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&self.general.log_format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_format".to_owned(),
                reason: format!("must be one of: {}", valid_formats.join(", ")),
            }
            .into());
        }

        if self.report.output_dir.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "report.output_dir".to_owned(),
                reason: "output directory must not be empty".to_owned(),
            }
            .into());
        }

        if self.report.top_n == 0 {
            return Err(ConfigError::InvalidValue {
                field: "report.top_n".to_owned(),
                reason: "must be at least 1".to_owned(),
            }
            .into());
        }

        Ok(())
    }
}

/// 일반 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// 로그 레벨 (trace, debug, info, warn, error)
    pub log_level: String,
    /// 로그 형식 (json, pretty)
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_owned(),
            log_format: "pretty".to_owned(),
        }
    }
}

/// 라인 파서 설정
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// UTF-8로 디코딩할 수 없는 바이트 처리 정책 (skip, replace, fail)
    pub on_decode_error: DecodeErrorPolicy,
}

/// 리포트 출력 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// 출력 디렉토리 (없으면 생성)
    pub output_dir: String,
    /// 상위 주소/경로 목록 길이
    pub top_n: usize,
    /// 이벤트 전체를 메모리에 보관할지 여부
    ///
    /// `false`이면 단일 패스로 집계와 CSV 기록을 동시에 수행합니다.
    pub retain_events: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: "output".to_owned(),
            top_n: 10,
            retain_events: true,
        }
    }
}

// --- 환경변수 오버라이드 헬퍼 ---

fn override_string(target: &mut String, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val;
    }
}

fn override_parsed<T: FromStr>(target: &mut T, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<T>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                expected = std::any::type_name::<T>(),
                "failed to parse env var, ignoring"
            ),
        }
    }
}
