//! 로그 파이프라인 설정
//!
//! [`PipelineConfig`]는 core의 [`ClfstatConfig`](clfstat_core::config::ClfstatConfig)에서
//! 파이프라인이 실제로 사용하는 값만 추려 담습니다.
//!
//! # 사용 예시
//! ```ignore
//! use clfstat_core::config::ClfstatConfig;
//! use clfstat_log_pipeline::config::PipelineConfig;
//!
//! let core_config = ClfstatConfig::default();
//! let config = PipelineConfig::from_core(&core_config);
//! ```

use std::path::PathBuf;

use clfstat_core::config::ClfstatConfig;
use clfstat_core::types::DecodeErrorPolicy;
use serde::{Deserialize, Serialize};

use crate::error::LogPipelineError;

/// 로그 파이프라인 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// 디코딩할 수 없는 바이트 처리 정책
    pub on_decode_error: DecodeErrorPolicy,
    /// 리포트 출력 디렉토리
    pub output_dir: PathBuf,
    /// 상위 주소/경로 목록 길이
    pub top_n: usize,
    /// 이벤트 전체를 메모리에 보관할지 여부 (`false`이면 단일 패스 스트리밍)
    pub retain_events: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            on_decode_error: DecodeErrorPolicy::Skip,
            output_dir: PathBuf::from("output"),
            top_n: 10,
            retain_events: true,
        }
    }
}

impl PipelineConfig {
    /// core 설정에서 파이프라인 설정을 생성합니다.
    pub fn from_core(core: &ClfstatConfig) -> Self {
        Self {
            on_decode_error: core.parser.on_decode_error,
            output_dir: PathBuf::from(&core.report.output_dir),
            top_n: core.report.top_n,
            retain_events: core.report.retain_events,
        }
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), LogPipelineError> {
        if self.top_n == 0 {
            return Err(LogPipelineError::Config {
                field: "top_n".to_owned(),
                reason: "must be at least 1".to_owned(),
            });
        }

        if self.output_dir.as_os_str().is_empty() {
            return Err(LogPipelineError::Config {
                field: "output_dir".to_owned(),
                reason: "output directory must not be empty".to_owned(),
            });
        }

        Ok(())
    }
}

/// 파이프라인 설정 빌더
#[derive(Default)]
pub struct PipelineConfigBuilder {
    config: PipelineConfig,
}

impl PipelineConfigBuilder {
    /// 새 빌더를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 디코딩 에러 정책을 설정합니다.
    pub fn on_decode_error(mut self, policy: DecodeErrorPolicy) -> Self {
        self.config.on_decode_error = policy;
        self
    }

    /// 출력 디렉토리를 설정합니다.
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.output_dir = dir.into();
        self
    }

    /// 상위 목록 길이를 설정합니다.
    pub fn top_n(mut self, n: usize) -> Self {
        self.config.top_n = n;
        self
    }

    /// 이벤트 보관 여부를 설정합니다.
    pub fn retain_events(mut self, retain: bool) -> Self {
        self.config.retain_events = retain;
        self
    }

    /// 설정을 검증하고 `PipelineConfig`를 생성합니다.
    pub fn build(self) -> Result<PipelineConfig, LogPipelineError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = PipelineConfig::default();
        config.validate().unwrap();
        assert_eq!(config.output_dir, PathBuf::from("output"));
        assert_eq!(config.top_n, 10);
    }

    #[test]
    fn from_core_preserves_values() {
        let mut core = ClfstatConfig::default();
        core.parser.on_decode_error = DecodeErrorPolicy::Fail;
        core.report.output_dir = "/tmp/reports".to_owned();
        core.report.top_n = 5;
        core.report.retain_events = false;

        let config = PipelineConfig::from_core(&core);
        assert_eq!(config.on_decode_error, DecodeErrorPolicy::Fail);
        assert_eq!(config.output_dir, PathBuf::from("/tmp/reports"));
        assert_eq!(config.top_n, 5);
        assert!(!config.retain_events);
    }

    #[test]
    fn validate_rejects_zero_top_n() {
        let config = PipelineConfig {
            top_n: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn builder_creates_valid_config() {
        let config = PipelineConfigBuilder::new()
            .output_dir("reports")
            .top_n(3)
            .retain_events(false)
            .on_decode_error(DecodeErrorPolicy::Replace)
            .build()
            .unwrap();
        assert_eq!(config.output_dir, PathBuf::from("reports"));
        assert_eq!(config.top_n, 3);
        assert!(!config.retain_events);
        assert_eq!(config.on_decode_error, DecodeErrorPolicy::Replace);
    }

    #[test]
    fn builder_rejects_empty_output_dir() {
        let result = PipelineConfigBuilder::new().output_dir("").build();
        assert!(result.is_err());
    }
}
