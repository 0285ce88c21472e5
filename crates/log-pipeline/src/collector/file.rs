//! 파일 기반 이벤트 수집기
//!
//! 로그 파일을 처음부터 끝까지 한 번 읽어 매칭된 라인을 이벤트로 변환합니다.
//!
//! # 라인 처리 규칙
//! - 디코딩: [`DecodeErrorPolicy`]에 따름 (`fail`이면 즉시 중단)
//! - 매칭 실패: 조용히 건너뜀 (카운트/로그 없음)
//! - 필드 해석 실패: 건너뛰고 `debug` 레벨로 기록
//! - 파일 열기 실패: [`LogPipelineError::Open`]으로 즉시 중단

use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::Path;

use tracing::debug;

use clfstat_core::types::{DecodeErrorPolicy, LogEvent};

use super::LineReader;
use crate::error::LogPipelineError;
use crate::parser::{ClfParser, decode_line};

/// 입력 로그 파일을 엽니다.
///
/// 디렉토리는 `File::open`이 성공하더라도 읽기 전에 [`LogPipelineError::Open`]으로 거부합니다.
pub fn open_input(path: &Path) -> Result<File, LogPipelineError> {
    let open_error = |source: std::io::Error| LogPipelineError::Open {
        path: path.display().to_string(),
        source,
    };

    let file = File::open(path).map_err(open_error)?;
    if file.metadata().map_err(open_error)?.is_dir() {
        return Err(open_error(std::io::Error::new(
            ErrorKind::IsADirectory,
            "is a directory",
        )));
    }
    Ok(file)
}

/// 파일 기반 이벤트 수집기
///
/// 이벤트를 벡터로 모으는 [`collect`](Self::collect)와,
/// 이벤트를 하나씩 콜백으로 넘기는 [`for_each_event`](Self::for_each_event)를 제공합니다.
pub struct EventCollector {
    /// CLF 라인 파서
    parser: ClfParser,
    /// 디코딩 에러 정책
    policy: DecodeErrorPolicy,
}

impl EventCollector {
    /// 새 수집기를 생성합니다.
    pub fn new(policy: DecodeErrorPolicy) -> Result<Self, LogPipelineError> {
        Ok(Self {
            parser: ClfParser::new()?,
            policy,
        })
    }

    /// 파일의 모든 이벤트를 파일 순서대로 수집합니다.
    pub fn collect(&self, path: &Path) -> Result<Vec<LogEvent>, LogPipelineError> {
        let mut events = Vec::new();
        self.for_each_event(path, |event| {
            events.push(event);
            Ok(())
        })?;
        Ok(events)
    }

    /// 메모리 리더 등 임의의 [`BufRead`]에서 이벤트를 수집합니다.
    pub fn collect_from_reader<R: BufRead>(
        &self,
        reader: R,
        source: &str,
    ) -> Result<Vec<LogEvent>, LogPipelineError> {
        let mut events = Vec::new();
        self.for_each_event_in_reader(reader, source, |event| {
            events.push(event);
            Ok(())
        })?;
        Ok(events)
    }

    /// 파일을 읽으며 파싱된 이벤트마다 `on_event`를 호출합니다.
    ///
    /// 이벤트를 보관하지 않으므로 단일 패스 집계에 사용합니다.
    /// 생성된 이벤트 수를 반환합니다.
    pub fn for_each_event<F>(&self, path: &Path, on_event: F) -> Result<usize, LogPipelineError>
    where
        F: FnMut(LogEvent) -> Result<(), LogPipelineError>,
    {
        let file = open_input(path)?;
        self.for_each_event_in_reader(BufReader::new(file), &path.display().to_string(), on_event)
    }

    /// 임의의 [`BufRead`]에서 이벤트마다 `on_event`를 호출합니다.
    pub fn for_each_event_in_reader<R, F>(
        &self,
        reader: R,
        source: &str,
        mut on_event: F,
    ) -> Result<usize, LogPipelineError>
    where
        R: BufRead,
        F: FnMut(LogEvent) -> Result<(), LogPipelineError>,
    {
        let mut lines = LineReader::new(reader);
        let mut produced = 0usize;

        while let Some(line) = lines.next_line()? {
            let text = decode_line(line.bytes, self.policy).map_err(|_| {
                LogPipelineError::Decode {
                    path: source.to_owned(),
                    line: line.number,
                }
            })?;

            match self.parser.parse_line(&text) {
                Ok(Some(event)) => {
                    on_event(event)?;
                    produced += 1;
                }
                Ok(None) => {}
                Err(e @ LogPipelineError::Parse { .. }) => {
                    debug!(source, line = line.number, error = %e, "skipping line with malformed fields");
                }
                Err(e) => return Err(e),
            }
        }

        debug!(
            source,
            lines = lines.lines_read(),
            events = produced,
            "log collection finished"
        );

        Ok(produced)
    }
}
