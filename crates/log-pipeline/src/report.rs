//! 리포트 기록 -- 이벤트 테이블(`events.csv`)과 요약(`summary.json`)을 출력합니다.
//!
//! 출력 디렉토리는 없으면 생성되며, 이미 있어도 그대로 사용합니다.
//! 두 파일은 매 실행마다 덮어씁니다.
//!
//! # 출력 형식
//! - `events.csv`: 헤더 `ip,time,method,path,status,size`, 최소 인용(minimal quoting), CRLF 줄바꿈
//! - `summary.json`: `file`, `total_lines_parsed`, `top_ips`, `top_paths`, `status_codes`
//!   (들여쓰기 2칸)

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use clfstat_core::types::{LogEvent, Summary};

use crate::error::LogPipelineError;

/// 이벤트 테이블 파일명
pub const EVENTS_FILE_NAME: &str = "events.csv";
/// 요약 파일명
pub const SUMMARY_FILE_NAME: &str = "summary.json";
/// 이벤트 테이블 헤더
pub const CSV_HEADER: [&str; 6] = ["ip", "time", "method", "path", "status", "size"];

/// 기록된 리포트 파일 경로
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    pub events_csv: PathBuf,
    pub summary_json: PathBuf,
}

/// 리포트 기록기
#[derive(Debug, Clone)]
pub struct ReportWriter {
    output_dir: PathBuf,
}

impl ReportWriter {
    /// 출력 디렉토리를 지정해 기록기를 생성합니다. 디렉토리는 기록 시점에 생성됩니다.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// 출력 디렉토리
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// 기록될 파일 경로
    pub fn paths(&self) -> ReportPaths {
        ReportPaths {
            events_csv: self.output_dir.join(EVENTS_FILE_NAME),
            summary_json: self.output_dir.join(SUMMARY_FILE_NAME),
        }
    }

    /// 출력 디렉토리를 생성합니다 (이미 있으면 무시).
    pub fn prepare(&self) -> Result<(), LogPipelineError> {
        std::fs::create_dir_all(&self.output_dir)?;
        Ok(())
    }

    /// 이벤트 테이블과 요약을 모두 기록합니다.
    pub fn write(
        &self,
        events: &[LogEvent],
        summary: &Summary,
    ) -> Result<ReportPaths, LogPipelineError> {
        self.prepare()?;
        self.write_events(events)?;
        self.write_summary(summary)?;
        Ok(self.paths())
    }

    /// 이벤트 테이블을 기록합니다.
    pub fn write_events(&self, events: &[LogEvent]) -> Result<PathBuf, LogPipelineError> {
        let mut sink = self.open_event_sink()?;
        for event in events {
            sink.write(event)?;
        }
        sink.finish()?;
        Ok(self.paths().events_csv)
    }

    /// 요약을 기록합니다.
    pub fn write_summary(&self, summary: &Summary) -> Result<PathBuf, LogPipelineError> {
        let path = self.paths().summary_json;
        let mut writer = BufWriter::new(File::create(&path)?);
        serde_json::to_writer_pretty(&mut writer, summary)?;
        writer.flush()?;
        debug!(path = %path.display(), total = summary.total_parsed, "summary written");
        Ok(path)
    }

    /// 이벤트를 한 행씩 기록하는 싱크를 엽니다. 헤더는 즉시 기록됩니다.
    pub fn open_event_sink(&self) -> Result<EventCsvSink<BufWriter<File>>, LogPipelineError> {
        self.prepare()?;
        let file = File::create(self.paths().events_csv)?;
        EventCsvSink::new(BufWriter::new(file))
    }
}

/// `events.csv` 행 단위 기록기
pub struct EventCsvSink<W: Write> {
    writer: csv::Writer<W>,
    rows: usize,
}

impl<W: Write> EventCsvSink<W> {
    /// 헤더를 기록하고 싱크를 생성합니다.
    pub fn new(inner: W) -> Result<Self, LogPipelineError> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .terminator(csv::Terminator::CRLF)
            .from_writer(inner);
        writer.write_record(CSV_HEADER)?;
        Ok(Self { writer, rows: 0 })
    }

    /// 이벤트 한 행을 기록합니다.
    pub fn write(&mut self, event: &LogEvent) -> Result<(), LogPipelineError> {
        self.writer.serialize(event)?;
        self.rows += 1;
        Ok(())
    }

    /// 지금까지 기록한 행 수 (헤더 제외)
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// 버퍼를 비우고 내부 writer를 반환합니다.
    pub fn finish(self) -> Result<W, LogPipelineError> {
        self.writer
            .into_inner()
            .map_err(|e| LogPipelineError::Io(e.into_error()))
    }
}
