#![no_main]

use clfstat_log_pipeline::parser::ClfParser;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(parser) = ClfParser::new() else {
        return;
    };
    let line = String::from_utf8_lossy(data);

    // 크래시나 패닉 없이 Ok 또는 Err을 반환해야 한다
    if let Ok(Some(event)) = parser.parse_line(&line) {
        assert!((100..=999).contains(&event.status));
    }
});
