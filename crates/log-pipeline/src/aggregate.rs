//! 빈도 집계 -- 주소, 경로, 상태 코드별 등장 횟수를 계산합니다.
//!
//! [`Aggregator`]는 단일 패스 카운터입니다. 이벤트를 하나씩 [`observe`](Aggregator::observe)
//! 하거나, 이벤트 목록 전체로 [`from_events`](Aggregator::from_events)를 호출합니다.
//!
//! 상위 N개 목록은 횟수 내림차순이며, 횟수가 같으면 먼저 등장한 키가 앞에 옵니다.

use std::collections::HashMap;
use std::hash::Hash;

use clfstat_core::types::{LogEvent, StatusCounts, Summary};

/// 기본 상위 목록 길이
pub const DEFAULT_TOP_N: usize = 10;

/// 등장 순서를 보존하는 빈도 카운터
#[derive(Debug, Clone)]
pub struct FrequencyCounter<K> {
    /// 키 -> `counts` 인덱스
    index: HashMap<K, usize>,
    /// (키, 횟수), 첫 등장 순서
    counts: Vec<(K, u64)>,
}

impl<K: Eq + Hash + Clone> FrequencyCounter<K> {
    pub fn new() -> Self {
        Self {
            index: HashMap::new(),
            counts: Vec::new(),
        }
    }

    /// 키의 등장 횟수를 1 증가시킵니다.
    pub fn increment(&mut self, key: &K) {
        match self.index.get(key) {
            Some(&slot) => self.counts[slot].1 += 1,
            None => {
                self.index.insert(key.clone(), self.counts.len());
                self.counts.push((key.clone(), 1));
            }
        }
    }

    /// 서로 다른 키의 개수
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// 횟수 내림차순 상위 `n`개. 동률은 첫 등장 순서.
    pub fn most_common(&self, n: usize) -> Vec<(K, u64)> {
        let mut ranked = self.counts.clone();
        // 안정 정렬이므로 동률은 첫 등장 순서를 유지한다
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(n);
        ranked
    }

    /// 모든 (키, 횟수)를 첫 등장 순서로 반환합니다.
    pub fn into_counts(self) -> Vec<(K, u64)> {
        self.counts
    }
}

impl<K: Eq + Hash + Clone> Default for FrequencyCounter<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// 접근 로그 집계기
#[derive(Debug, Clone)]
pub struct Aggregator {
    top_n: usize,
    total: usize,
    addresses: FrequencyCounter<String>,
    paths: FrequencyCounter<String>,
    statuses: FrequencyCounter<u16>,
}

impl Aggregator {
    /// 상위 목록 길이를 지정해 새 집계기를 생성합니다.
    pub fn new(top_n: usize) -> Self {
        Self {
            top_n,
            total: 0,
            addresses: FrequencyCounter::new(),
            paths: FrequencyCounter::new(),
            statuses: FrequencyCounter::new(),
        }
    }

    /// 이벤트 목록 전체를 집계합니다.
    pub fn from_events(events: &[LogEvent], top_n: usize) -> Self {
        let mut aggregator = Self::new(top_n);
        for event in events {
            aggregator.observe(event);
        }
        aggregator
    }

    /// 이벤트 하나를 카운터에 반영합니다.
    pub fn observe(&mut self, event: &LogEvent) {
        self.total += 1;
        self.addresses.increment(&event.source_address);
        self.paths.increment(&event.path);
        self.statuses.increment(&event.status);
    }

    /// 지금까지 반영된 이벤트 수
    pub fn total(&self) -> usize {
        self.total
    }

    /// 집계 결과를 [`Summary`]로 만듭니다.
    pub fn summarize(self, source_file: impl Into<String>) -> Summary {
        Summary {
            source_file: source_file.into(),
            total_parsed: self.total,
            top_addresses: self.addresses.most_common(self.top_n),
            top_paths: self.paths.most_common(self.top_n),
            status_counts: StatusCounts(self.statuses.into_counts()),
        }
    }
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new(DEFAULT_TOP_N)
    }
}
