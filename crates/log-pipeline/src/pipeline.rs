//! 파이프라인 오케스트레이션 -- 수집/집계/리포트 기록의 전체 흐름을 관리합니다.
//!
//! # 실행 모드
//! - 보관 모드 (`retain_events = true`): 이벤트 전체를 수집한 뒤 집계하고 기록합니다.
//! - 스트리밍 모드 (`retain_events = false`): 이벤트마다 집계 카운터와 CSV 싱크에
//!   바로 반영하며, 이벤트 벡터를 보관하지 않습니다.
//!
//! 두 모드의 출력 파일은 바이트 단위로 동일합니다.
//!
//! ```text
//! EventCollector -> Aggregator -> ReportWriter
//!   (Matcher +        (counts)     (events.csv, summary.json)
//!    Normalizer)
//! ```

use std::io::BufReader;
use std::path::{Component, Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::aggregate::Aggregator;
use crate::collector::{EventCollector, open_input};
use crate::config::PipelineConfig;
use crate::error::LogPipelineError;
use crate::report::ReportWriter;

/// 한 번의 실행 결과
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    /// 파싱된 이벤트 수
    pub events_parsed: usize,
    /// 기록된 이벤트 테이블 경로
    pub csv_path: PathBuf,
    /// 기록된 요약 경로
    pub summary_path: PathBuf,
}

/// 접근 로그 파이프라인
///
/// # 사용 예시
/// ```ignore
/// use clfstat_log_pipeline::{AccessLogPipeline, PipelineConfigBuilder};
///
/// let config = PipelineConfigBuilder::new().output_dir("output").build()?;
/// let report = AccessLogPipeline::new(config)?.run(Path::new("access.log"))?;
/// println!("{} events", report.events_parsed);
/// ```
pub struct AccessLogPipeline {
    config: PipelineConfig,
    collector: EventCollector,
    writer: ReportWriter,
}

impl AccessLogPipeline {
    /// 설정을 검증하고 파이프라인을 생성합니다.
    pub fn new(config: PipelineConfig) -> Result<Self, LogPipelineError> {
        config.validate()?;
        let collector = EventCollector::new(config.on_decode_error)?;
        let writer = ReportWriter::new(&config.output_dir);
        Ok(Self {
            config,
            collector,
            writer,
        })
    }

    /// 현재 설정을 반환합니다.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// 로그 파일 하나를 처리하고 리포트를 기록합니다.
    pub fn run(&self, log_file: &Path) -> Result<RunReport, LogPipelineError> {
        info!(
            path = %log_file.display(),
            output_dir = %self.writer.output_dir().display(),
            retain_events = self.config.retain_events,
            policy = %self.config.on_decode_error,
            "processing access log"
        );

        let report = if self.config.retain_events {
            self.run_retained(log_file)?
        } else {
            self.run_streaming(log_file)?
        };

        info!(
            events = report.events_parsed,
            csv = %report.csv_path.display(),
            summary = %report.summary_path.display(),
            "reports written"
        );

        Ok(report)
    }

    fn run_retained(&self, log_file: &Path) -> Result<RunReport, LogPipelineError> {
        let events = self.collector.collect(log_file)?;
        let summary = Aggregator::from_events(&events, self.config.top_n)
            .summarize(source_name(log_file));
        let paths = self.writer.write(&events, &summary)?;

        Ok(RunReport {
            events_parsed: events.len(),
            csv_path: paths.events_csv,
            summary_path: paths.summary_json,
        })
    }

    fn run_streaming(&self, log_file: &Path) -> Result<RunReport, LogPipelineError> {
        let source = log_file.display().to_string();
        // 입력을 먼저 연다. 열기 실패(디렉토리 포함) 시 출력 파일은 만들어지지 않는다
        let file = open_input(log_file)?;

        let mut aggregator = Aggregator::new(self.config.top_n);
        let mut sink = self.writer.open_event_sink()?;

        let produced =
            self.collector
                .for_each_event_in_reader(BufReader::new(file), &source, |event| {
                    aggregator.observe(&event);
                    sink.write(&event)
                })?;
        sink.finish()?;

        let summary = aggregator.summarize(source_name(log_file));
        self.writer.write_summary(&summary)?;
        let paths = self.writer.paths();

        Ok(RunReport {
            events_parsed: produced,
            csv_path: paths.events_csv,
            summary_path: paths.summary_json,
        })
    }
}

/// summary의 `file` 값. 경로를 정규화합니다.
///
/// `.` 구성요소와 중복/후행 구분자를 제거합니다 (`./logs//access.log` -> `logs/access.log`).
/// `..`는 해석하지 않고 그대로 둡니다.
pub fn source_name(path: &Path) -> String {
    let normalized: PathBuf = path
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();
    if normalized.as_os_str().is_empty() {
        return ".".to_owned();
    }
    normalized.display().to_string()
}
