//! 통합 테스트 -- 파이프라인 전체 흐름 검증
//!
//! 로그 파일 읽기부터 `events.csv` / `summary.json` 기록까지의 전체 파이프라인을 검증합니다.

use std::path::{Path, PathBuf};

use clfstat_core::types::{DecodeErrorPolicy, LogEvent};
use clfstat_log_pipeline::{
    AccessLogPipeline, Aggregator, EventCollector, LogPipelineError, PipelineConfigBuilder,
};

const REFERENCE_LOG: &str = concat!(
    "127.0.0.1 - - [10/Oct/2023:13:55:36 -0700] \"GET /index.html HTTP/1.1\" 200 1024\n",
    "10.0.0.5 - - [10/Oct/2023:13:55:37 -0700] \"GET /missing HTTP/1.1\" 404 -\n",
    "127.0.0.1 - - [10/Oct/2023:13:55:38 -0700] \"POST /login HTTP/1.1\" 302 0\n",
    "garbage line without a request section\n",
    "192.168.1.9 - frank [10/Oct/2023:13:55:39 -0700] \"GET /index.html HTTP/1.0\" 200 2326\n",
    "127.0.0.1 - - [10/Oct/2023:13:55:40 -0700] \"GET /a,b HTTP/1.1\" 500 12\n",
    "\n",
);

/// 테스트용 로그 파일과 출력 디렉토리
struct Fixture {
    _dir: tempfile::TempDir,
    log: PathBuf,
    root: PathBuf,
}

impl Fixture {
    fn new(contents: &[u8]) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("access.log");
        std::fs::write(&log, contents).unwrap();
        let root = dir.path().to_path_buf();
        Self {
            _dir: dir,
            log,
            root,
        }
    }

    fn out(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

fn run(log: &Path, out: &Path, retain: bool, policy: DecodeErrorPolicy) -> Result<usize, LogPipelineError> {
    let config = PipelineConfigBuilder::new()
        .output_dir(out)
        .retain_events(retain)
        .on_decode_error(policy)
        .build()?;
    Ok(AccessLogPipeline::new(config)?.run(log)?.events_parsed)
}

fn read_summary(out: &Path) -> serde_json::Value {
    let text = std::fs::read_to_string(out.join("summary.json")).unwrap();
    serde_json::from_str(&text).unwrap()
}

fn read_csv_events(out: &Path) -> Vec<LogEvent> {
    let mut reader = csv::Reader::from_path(out.join("events.csv")).unwrap();
    reader.deserialize().map(|row| row.unwrap()).collect()
}

#[test]
fn reference_log_produces_expected_reports() {
    let fx = Fixture::new(REFERENCE_LOG.as_bytes());
    let out = fx.out("output");

    let parsed = run(&fx.log, &out, true, DecodeErrorPolicy::Skip).unwrap();
    assert_eq!(parsed, 5);

    let summary = read_summary(&out);
    assert_eq!(summary["total_lines_parsed"], 5);
    assert_eq!(summary["file"], fx.log.display().to_string());
    assert_eq!(summary["top_ips"][0], serde_json::json!(["127.0.0.1", 3]));
    assert_eq!(summary["top_paths"][0], serde_json::json!(["/index.html", 2]));
    assert_eq!(
        summary["status_codes"],
        serde_json::json!({"200": 2, "404": 1, "302": 1, "500": 1})
    );
}

#[test]
fn csv_round_trip_reproduces_event_sequence() {
    let fx = Fixture::new(REFERENCE_LOG.as_bytes());
    let out = fx.out("output");
    run(&fx.log, &out, true, DecodeErrorPolicy::Skip).unwrap();

    let expected = EventCollector::new(DecodeErrorPolicy::Skip)
        .unwrap()
        .collect(&fx.log)
        .unwrap();
    let from_csv = read_csv_events(&out);
    assert_eq!(from_csv, expected);
    // 쉼표가 들어간 경로는 인용되어 그대로 복원된다
    assert_eq!(from_csv[4].path, "/a,b");
}

#[test]
fn csv_header_and_line_endings() {
    let fx = Fixture::new(REFERENCE_LOG.as_bytes());
    let out = fx.out("output");
    run(&fx.log, &out, true, DecodeErrorPolicy::Skip).unwrap();

    let text = std::fs::read_to_string(out.join("events.csv")).unwrap();
    assert!(text.starts_with("ip,time,method,path,status,size\r\n"));
    assert!(text.contains("10.0.0.5,10/Oct/2023:13:55:37 -0700,GET,/missing,404,0\r\n"));
}

#[test]
fn produced_events_satisfy_field_invariants() {
    let fx = Fixture::new(REFERENCE_LOG.as_bytes());
    let events = EventCollector::new(DecodeErrorPolicy::Skip)
        .unwrap()
        .collect(&fx.log)
        .unwrap();
    assert!(!events.is_empty());
    for event in &events {
        assert!((100..=999).contains(&event.status), "{event}");
    }
}

#[test]
fn status_counts_sum_to_total_and_top_lists_are_capped() {
    let mut log = String::new();
    for i in 0..30 {
        log.push_str(&format!(
            "10.0.{i}.1 - - [10/Oct/2023:13:55:36 -0700] \"GET /page/{i} HTTP/1.1\" {} {i}\n",
            200 + (i % 4)
        ));
    }
    let fx = Fixture::new(log.as_bytes());
    let out = fx.out("output");
    run(&fx.log, &out, true, DecodeErrorPolicy::Skip).unwrap();

    let summary = read_summary(&out);
    assert_eq!(summary["top_ips"].as_array().unwrap().len(), 10);
    assert_eq!(summary["top_paths"].as_array().unwrap().len(), 10);

    let statuses = summary["status_codes"].as_object().unwrap();
    assert_eq!(statuses.len(), 4);
    let sum: u64 = statuses.values().map(|v| v.as_u64().unwrap()).sum();
    assert_eq!(sum, 30);
}

#[test]
fn repeated_runs_are_byte_identical() {
    let fx = Fixture::new(REFERENCE_LOG.as_bytes());
    let out = fx.out("output");

    run(&fx.log, &out, true, DecodeErrorPolicy::Skip).unwrap();
    let first_summary = std::fs::read(out.join("summary.json")).unwrap();
    let first_csv = std::fs::read(out.join("events.csv")).unwrap();

    run(&fx.log, &out, true, DecodeErrorPolicy::Skip).unwrap();
    assert_eq!(std::fs::read(out.join("summary.json")).unwrap(), first_summary);
    assert_eq!(std::fs::read(out.join("events.csv")).unwrap(), first_csv);
}

#[test]
fn streaming_and_retained_outputs_are_identical() {
    let fx = Fixture::new(REFERENCE_LOG.as_bytes());
    let retained = fx.out("retained");
    let streamed = fx.out("streamed");

    let a = run(&fx.log, &retained, true, DecodeErrorPolicy::Skip).unwrap();
    let b = run(&fx.log, &streamed, false, DecodeErrorPolicy::Skip).unwrap();
    assert_eq!(a, b);

    for name in ["events.csv", "summary.json"] {
        assert_eq!(
            std::fs::read(retained.join(name)).unwrap(),
            std::fs::read(streamed.join(name)).unwrap(),
            "{name} differs between modes"
        );
    }
}

#[test]
fn empty_log_writes_header_and_empty_summary() {
    let fx = Fixture::new(b"");
    let out = fx.out("output");
    assert_eq!(run(&fx.log, &out, true, DecodeErrorPolicy::Skip).unwrap(), 0);

    let csv = std::fs::read_to_string(out.join("events.csv")).unwrap();
    assert_eq!(csv, "ip,time,method,path,status,size\r\n");

    let summary = read_summary(&out);
    assert_eq!(summary["total_lines_parsed"], 0);
    assert_eq!(summary["top_ips"], serde_json::json!([]));
    assert_eq!(summary["status_codes"], serde_json::json!({}));
}

#[test]
fn existing_output_dir_is_reused() {
    let fx = Fixture::new(REFERENCE_LOG.as_bytes());
    let out = fx.out("output");
    std::fs::create_dir_all(&out).unwrap();
    std::fs::write(out.join("events.csv"), "stale").unwrap();

    run(&fx.log, &out, true, DecodeErrorPolicy::Skip).unwrap();
    let csv = std::fs::read_to_string(out.join("events.csv")).unwrap();
    assert!(csv.starts_with("ip,"));
}

#[test]
fn missing_input_is_open_error() {
    let fx = Fixture::new(b"");
    let err = run(
        &fx.root.join("nope.log"),
        &fx.out("output"),
        true,
        DecodeErrorPolicy::Skip,
    )
    .unwrap_err();
    assert!(matches!(err, LogPipelineError::Open { .. }));
}

#[test]
fn decode_policies_behave_as_configured() {
    let mut bytes = REFERENCE_LOG.as_bytes().to_vec();
    bytes.extend_from_slice(b"8.8.8.8 - - [t] \"GET /caf\xE9 HTTP/1.1\" 200 7\n");
    let fx = Fixture::new(&bytes);

    let skip = fx.out("skip");
    assert_eq!(run(&fx.log, &skip, true, DecodeErrorPolicy::Skip).unwrap(), 6);
    assert_eq!(read_csv_events(&skip)[5].path, "/caf");

    let replace = fx.out("replace");
    assert_eq!(run(&fx.log, &replace, true, DecodeErrorPolicy::Replace).unwrap(), 6);
    assert_eq!(read_csv_events(&replace)[5].path, "/caf\u{FFFD}");

    let err = run(&fx.log, &fx.out("fail"), true, DecodeErrorPolicy::Fail).unwrap_err();
    assert!(matches!(err, LogPipelineError::Decode { line: 8, .. }));
}

#[test]
fn aggregator_matches_pipeline_summary() {
    let fx = Fixture::new(REFERENCE_LOG.as_bytes());
    let events = EventCollector::new(DecodeErrorPolicy::Skip)
        .unwrap()
        .collect(&fx.log)
        .unwrap();
    let summary = Aggregator::from_events(&events, 10).summarize(fx.log.display().to_string());

    let out = fx.out("output");
    run(&fx.log, &out, true, DecodeErrorPolicy::Skip).unwrap();
    assert_eq!(read_summary(&out), serde_json::to_value(&summary).unwrap());
}

#[test]
fn carriage_return_terminated_log_is_split_per_line() {
    let log = REFERENCE_LOG.replace('\n', "\r");
    let fx = Fixture::new(log.as_bytes());
    let out = fx.out("output");

    assert_eq!(run(&fx.log, &out, true, DecodeErrorPolicy::Skip).unwrap(), 5);
    assert_eq!(read_summary(&out)["top_ips"][0], serde_json::json!(["127.0.0.1", 3]));
    let events = read_csv_events(&out);
    assert_eq!(events[0].path, "/index.html");
    assert_eq!(events[4].path, "/a,b");

    let lf = fx.out("lf");
    std::fs::write(&fx.log, REFERENCE_LOG).unwrap();
    run(&fx.log, &lf, true, DecodeErrorPolicy::Skip).unwrap();
    assert_eq!(
        std::fs::read(out.join("events.csv")).unwrap(),
        std::fs::read(lf.join("events.csv")).unwrap()
    );
}

#[test]
fn carriage_return_inside_request_breaks_the_record() {
    let fx = Fixture::new(
        b"1.2.3.4 - - [10/Oct/2023:13:55:36 -0700] \"GET /a\rb HTTP/1.1\" 200 1\n\
          5.6.7.8 - - [10/Oct/2023:13:55:37 -0700] \"GET /ok HTTP/1.1\" 200 2\r\n",
    );
    let out = fx.out("output");

    for retain in [true, false] {
        assert_eq!(run(&fx.log, &out, retain, DecodeErrorPolicy::Skip).unwrap(), 1);
        let events = read_csv_events(&out);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].path, "/ok");
    }
}

#[test]
fn summary_file_name_is_normalized() {
    let fx = Fixture::new(REFERENCE_LOG.as_bytes());
    let out = fx.out("output");
    let messy = PathBuf::from(format!("{}/.//access.log", fx.root.display()));
    assert!(messy.exists());

    run(&messy, &out, false, DecodeErrorPolicy::Skip).unwrap();
    assert_eq!(read_summary(&out)["file"], fx.log.display().to_string());
}

#[test]
fn directory_input_is_rejected_before_writing() {
    let fx = Fixture::new(b"");
    let out = fx.out("output");

    for retain in [true, false] {
        let err = run(&fx.root, &out, retain, DecodeErrorPolicy::Skip).unwrap_err();
        assert!(matches!(err, LogPipelineError::Open { .. }));
        assert!(!out.exists());
    }
}
