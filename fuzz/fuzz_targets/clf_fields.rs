#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use clfstat_log_pipeline::parser::ClfParser;
use clfstat_log_pipeline::Aggregator;

/// 퍼저용 구조적 입력 -- 필드를 조합해 CLF 라인을 만든다
#[derive(Arbitrary, Debug)]
struct FuzzLine {
    ip: String,
    time: String,
    method: String,
    path: String,
    status: u16,
    size: Option<u64>,
}

impl FuzzLine {
    fn render(&self) -> String {
        let size = self
            .size
            .map(|s| s.to_string())
            .unwrap_or_else(|| "-".to_owned());
        format!(
            "{} - - [{}] \"{} {} HTTP/1.1\" {:03} {}",
            self.ip, self.time, self.method, self.path, self.status, size
        )
    }
}

fuzz_target!(|lines: Vec<FuzzLine>| {
    let Ok(parser) = ClfParser::new() else {
        return;
    };

    let mut aggregator = Aggregator::new(10);
    for line in lines.iter().take(64) {
        if let Ok(Some(event)) = parser.parse_line(&line.render()) {
            assert!((100..=999).contains(&event.status));
            aggregator.observe(&event);
        }
    }

    // summary는 항상 JSON으로 직렬화 가능해야 한다
    let summary = aggregator.summarize("fuzz.log");
    let json = serde_json::to_string(&summary).unwrap_or_default();
    assert!(json.contains("\"total_lines_parsed\""));
});
