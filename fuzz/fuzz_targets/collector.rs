#![no_main]

use clfstat_core::types::DecodeErrorPolicy;
use clfstat_log_pipeline::{Aggregator, EventCollector};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    for policy in [
        DecodeErrorPolicy::Skip,
        DecodeErrorPolicy::Replace,
        DecodeErrorPolicy::Fail,
    ] {
        let Ok(collector) = EventCollector::new(policy) else {
            return;
        };
        let Ok(events) = collector.collect_from_reader(data, "fuzz.log") else {
            // fail 정책에서만 에러가 허용된다
            assert_eq!(policy, DecodeErrorPolicy::Fail);
            continue;
        };

        let summary = Aggregator::from_events(&events, 10).summarize("fuzz.log");
        assert_eq!(summary.total_parsed, events.len());
        assert_eq!(summary.status_counts.total(), events.len() as u64);
        assert!(summary.top_addresses.len() <= 10);
        assert!(summary.top_paths.len() <= 10);
    }
});
