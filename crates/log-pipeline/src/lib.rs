#![doc = include_str!("../README.md")]
//!
//! # 모듈 구성
//!
//! - [`parser`]: CLF 라인 매처, 필드 정규화, 바이트 디코딩 정책
//! - [`collector`]: 파일을 한 줄씩 읽어 이벤트로 변환
//! - [`aggregate`]: 주소/경로/상태 코드 빈도 집계
//! - [`report`]: `events.csv` / `summary.json` 기록
//! - [`pipeline`]: 전체 흐름 오케스트레이션 (보관 모드 / 스트리밍 모드)
//! - [`config`]: 파이프라인 설정 (core 설정에서 파생)
//! - [`error`]: 도메인 에러 타입
//!
//! # 아키텍처
//!
//! ```text
//! File -> LineReader -> decode -> ClfParser -> Aggregator -> ReportWriter
//!                         |           |             |             |
//!                   skip/replace   match +     top-N counts   CSV + JSON
//!                     /fail       normalize
//! ```

pub mod aggregate;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod report;

pub mod collector;
pub mod parser;

// --- 주요 타입 re-export ---

// 파이프라인
pub use pipeline::{AccessLogPipeline, RunReport};

// 설정
pub use config::{PipelineConfig, PipelineConfigBuilder};

// 에러
pub use error::LogPipelineError;

// 파서
pub use parser::{ClfParser, RawFields};

// 수집기
pub use collector::EventCollector;

// 집계
pub use aggregate::{Aggregator, FrequencyCounter};

// 리포트
pub use report::{EventCsvSink, ReportPaths, ReportWriter};
