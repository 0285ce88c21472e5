//! 필드 정규화 -- 매칭된 원본 텍스트를 타입이 있는 [`LogEvent`]로 변환합니다.
//!
//! - `status`: 3자리 정수, 100..=999 범위만 허용
//! - `size`: `-`는 0, 그 외에는 부호 없는 정수
//!
//! 패턴에는 매칭되었지만 위 규칙을 만족하지 못하는 라인은
//! [`LogPipelineError::Parse`]를 반환하며, 수집기는 해당 라인을 건너뜁니다.

use clfstat_core::types::LogEvent;

use super::clf::RawFields;
use crate::error::LogPipelineError;

/// 응답 크기가 없음을 나타내는 값
pub const NO_SIZE_SENTINEL: &str = "-";

/// 유효한 HTTP 상태 코드 범위
const STATUS_RANGE: std::ops::RangeInclusive<u16> = 100..=999;

/// 원본 필드를 [`LogEvent`]로 변환합니다.
pub fn normalize(raw: &RawFields<'_>) -> Result<LogEvent, LogPipelineError> {
    Ok(LogEvent {
        source_address: raw.ip.to_owned(),
        timestamp: raw.time.to_owned(),
        method: raw.method.to_owned(),
        path: raw.path.to_owned(),
        status: parse_status(raw.status)?,
        size: parse_size(raw.size)?,
    })
}

fn parse_status(text: &str) -> Result<u16, LogPipelineError> {
    let status: u16 = text.parse().map_err(|e: std::num::ParseIntError| {
        LogPipelineError::Parse {
            field: "status",
            value: text.to_owned(),
            reason: e.to_string(),
        }
    })?;

    if !STATUS_RANGE.contains(&status) {
        return Err(LogPipelineError::Parse {
            field: "status",
            value: text.to_owned(),
            reason: format!(
                "out of range ({}-{})",
                STATUS_RANGE.start(),
                STATUS_RANGE.end()
            ),
        });
    }

    Ok(status)
}

fn parse_size(text: &str) -> Result<u64, LogPipelineError> {
    if text == NO_SIZE_SENTINEL {
        return Ok(0);
    }

    text.parse().map_err(|e: std::num::ParseIntError| LogPipelineError::Parse {
        field: "size",
        value: text.to_owned(),
        reason: e.to_string(),
    })
}
