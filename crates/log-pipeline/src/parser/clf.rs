//! Common Log Format 라인 매처
//!
//! 한 줄의 텍스트에서 고정 패턴으로 6개의 필드를 추출합니다.
//!
//! # 패턴
//! ```text
//! <ip> <ignored> <ignored> [<time>] "<method> <path> <ignored>" <status:3자리> <size 또는 ->
//! ```
//!
//! 매칭은 accept/reject 둘 중 하나이며, 부분 매칭이나 에러 상태는 없습니다.
//! 패턴은 라인 어디에서든 처음 매칭되는 위치를 찾습니다 (앵커 없음).
//!
//! # 사용 예시
//! ```ignore
//! use clfstat_log_pipeline::parser::ClfParser;
//!
//! let parser = ClfParser::new()?;
//! let event = parser.parse_line(
//!     r#"127.0.0.1 - - [10/Oct/2023:13:55:36 -0700] "GET /index.html HTTP/1.1" 200 1024"#,
//! )?;
//! assert_eq!(event.unwrap().status, 200);
//! ```

use regex::Regex;

use clfstat_core::types::LogEvent;

use super::normalize::normalize;
use crate::error::LogPipelineError;

/// CLF 요청 라인 패턴
const CLF_PATTERN: &str = concat!(
    r#"(?P<ip>\S+) \S+ \S+ \[(?P<time>[^\]]+)\] "#,
    r#""(?P<method>\S+) (?P<path>\S+) \S+" (?P<status>\d{3}) (?P<size>\S+)"#,
);

/// 매칭된 라인의 원본 필드 (아직 타입 변환 전)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawFields<'a> {
    pub ip: &'a str,
    pub time: &'a str,
    pub method: &'a str,
    pub path: &'a str,
    pub status: &'a str,
    pub size: &'a str,
}

/// Common Log Format 파서
///
/// 정규식은 생성 시 한 번만 컴파일됩니다.
#[derive(Debug, Clone)]
pub struct ClfParser {
    pattern: Regex,
}

impl ClfParser {
    /// 새 파서를 생성합니다.
    pub fn new() -> Result<Self, LogPipelineError> {
        Ok(Self {
            pattern: Regex::new(CLF_PATTERN)?,
        })
    }

    /// 라인에서 원본 필드를 추출합니다. 매칭되지 않으면 `None`.
    pub fn match_line<'a>(&self, line: &'a str) -> Option<RawFields<'a>> {
        let caps = self.pattern.captures(line)?;
        Some(RawFields {
            ip: caps.name("ip")?.as_str(),
            time: caps.name("time")?.as_str(),
            method: caps.name("method")?.as_str(),
            path: caps.name("path")?.as_str(),
            status: caps.name("status")?.as_str(),
            size: caps.name("size")?.as_str(),
        })
    }

    /// 라인을 매칭하고 필드를 정규화합니다.
    ///
    /// - 매칭 실패: `Ok(None)`
    /// - 매칭은 되었지만 status/size 해석 실패: `Err(LogPipelineError::Parse)`
    pub fn parse_line(&self, line: &str) -> Result<Option<LogEvent>, LogPipelineError> {
        match self.match_line(line) {
            Some(raw) => normalize(&raw).map(Some),
            None => Ok(None),
        }
    }
}
