//! 도메인 타입 -- 파싱된 접근 로그 이벤트와 집계 결과
//!
//! 파이프라인의 각 단계(수집, 집계, 리포트)가 이 타입들을 주고받습니다.

use std::fmt;
use std::str::FromStr;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// 접근 로그 이벤트
///
/// Common Log Format 라인 하나가 성공적으로 파싱된 결과입니다.
/// 생성 이후에는 변경되지 않습니다.
///
/// 직렬화 시 필드명은 CSV 헤더 `ip,time,method,path,status,size`와 같습니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEvent {
    /// 클라이언트 주소 (라인의 첫 번째 토큰)
    #[serde(rename = "ip")]
    pub source_address: String,
    /// `[` `]` 사이의 원본 타임스탬프 (파싱하지 않음)
    #[serde(rename = "time")]
    pub timestamp: String,
    /// HTTP 메서드
    pub method: String,
    /// 요청 경로
    pub path: String,
    /// HTTP 상태 코드 (100..=999)
    pub status: u16,
    /// 응답 크기 (바이트, `-`는 0)
    pub size: u64,
}

impl fmt::Display for LogEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] \"{} {}\" {} {}",
            self.source_address, self.timestamp, self.method, self.path, self.status, self.size,
        )
    }
}

/// 상태 코드별 발생 횟수
///
/// 처음 등장한 순서를 유지하며, JSON에서는 문자열 키 객체로 직렬화됩니다
/// (`{"200": 3, "404": 1}`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusCounts(pub Vec<(u16, u64)>);

impl StatusCounts {
    /// 서로 다른 상태 코드 개수
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// 특정 상태 코드의 발생 횟수
    pub fn get(&self, status: u16) -> Option<u64> {
        self.0
            .iter()
            .find(|(code, _)| *code == status)
            .map(|(_, count)| *count)
    }

    /// 모든 상태 코드 횟수의 합
    pub fn total(&self) -> u64 {
        self.0.iter().map(|(_, count)| count).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(u16, u64)> {
        self.0.iter()
    }
}

impl Serialize for StatusCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (code, count) in self.iter() {
            map.serialize_entry(&code.to_string(), count)?;
        }
        map.end()
    }
}

/// 집계 요약
///
/// 수집이 끝난 뒤 한 번 계산되는 불변 스냅샷입니다.
/// `summary.json`의 필드명과 직렬화 형태를 그대로 따릅니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// 입력 로그 파일 경로
    #[serde(rename = "file")]
    pub source_file: String,
    /// 파싱된 이벤트 수
    #[serde(rename = "total_lines_parsed")]
    pub total_parsed: usize,
    /// 가장 많이 등장한 클라이언트 주소 (주소, 횟수)
    #[serde(rename = "top_ips")]
    pub top_addresses: Vec<(String, u64)>,
    /// 가장 많이 요청된 경로 (경로, 횟수)
    pub top_paths: Vec<(String, u64)>,
    /// 상태 코드별 횟수 (전체, 개수 제한 없음)
    #[serde(rename = "status_codes")]
    pub status_counts: StatusCounts,
}

/// 디코딩할 수 없는 바이트를 만났을 때의 처리 정책
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecodeErrorPolicy {
    /// 잘못된 바이트 시퀀스를 버립니다 (기본값)
    #[default]
    Skip,
    /// 잘못된 바이트 시퀀스를 U+FFFD로 치환합니다
    Replace,
    /// 실행을 중단합니다
    Fail,
}

impl DecodeErrorPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Skip => "skip",
            Self::Replace => "replace",
            Self::Fail => "fail",
        }
    }
}

impl fmt::Display for DecodeErrorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DecodeErrorPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "skip" => Ok(Self::Skip),
            "replace" => Ok(Self::Replace),
            "fail" => Ok(Self::Fail),
            _ => Err(format!(
                "invalid decode error policy: {s} (expected: skip, replace, fail)"
            )),
        }
    }
}
