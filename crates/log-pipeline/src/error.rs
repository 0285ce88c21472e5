//! 로그 파이프라인 에러 타입
//!
//! [`LogPipelineError`]는 수집, 파싱, 리포트 기록 중 발생하는 모든 에러를 표현합니다.
//! `From<LogPipelineError> for ClfstatError` 변환이 구현되어 있어
//! 상위 레이어에서 `?` 연산자로 자연스럽게 전파할 수 있습니다.

use clfstat_core::error::ClfstatError;

/// 로그 파이프라인 도메인 에러
#[derive(Debug, thiserror::Error)]
pub enum LogPipelineError {
    /// 입력 로그 파일을 열 수 없음
    #[error("cannot open log file {path}: {source}")]
    Open {
        /// 입력 파일 경로
        path: String,
        /// 원인 I/O 에러
        #[source]
        source: std::io::Error,
    },

    /// UTF-8 디코딩 실패 (`fail` 정책에서만 발생)
    #[error("invalid utf-8 in {path} at line {line}")]
    Decode {
        /// 입력 파일 경로
        path: String,
        /// 1부터 시작하는 라인 번호
        line: usize,
    },

    /// 패턴에는 매칭되었지만 필드 값을 해석할 수 없음
    #[error("parse error: field '{field}' value '{value}': {reason}")]
    Parse {
        /// 필드명 (status, size)
        field: &'static str,
        /// 원본 텍스트
        value: String,
        /// 실패 사유
        reason: String,
    },

    /// 설정 에러
    #[error("config error: {field}: {reason}")]
    Config {
        /// 설정 필드명
        field: String,
        /// 에러 사유
        reason: String,
    },

    /// CSV 기록 에러
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON 직렬화 에러
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O 에러
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// 정규식 컴파일 에러
    #[error("regex error: {0}")]
    Regex(#[from] regex::Error),
}

impl From<LogPipelineError> for ClfstatError {
    fn from(err: LogPipelineError) -> Self {
        match err {
            LogPipelineError::Io(e) => ClfstatError::Io(e),
            other => ClfstatError::Pipeline(other.to_string()),
        }
    }
}
