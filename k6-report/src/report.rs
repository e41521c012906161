use askama::Template;

use crate::format::{format_bytes, format_count, format_duration, format_percent};
use crate::plan::TestEntry;
use crate::summary::Summary;

/// Failure rate above which a test is flagged on the overview.
const WARNING_FAILURE_RATE: f64 = 0.05;

/// Timing metrics shown on the detail page, in table order.
const TIMING_METRICS: [&str; 7] = [
    "http_req_duration",
    "http_req_blocked",
    "http_req_connecting",
    "http_req_sending",
    "http_req_waiting",
    "http_req_receiving",
    "iteration_duration",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Status {
    Success,
    Warning,
    Error,
}

impl Status {
    /// A loaded test passes unless its failure rate exceeds the warning
    /// threshold. The boundary is exclusive: exactly 5% still passes.
    pub(crate) fn classify(summary: &Summary) -> Self {
        if summary.stat("http_req_failed", "rate") > WARNING_FAILURE_RATE {
            return Self::Warning;
        }
        Self::Success
    }

    pub(crate) fn css_class(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }

    pub(crate) fn badge(self) -> &'static str {
        match self {
            Self::Success => "Passed",
            Self::Warning => "Warning",
            Self::Error => "Error",
        }
    }
}

/// Running totals across all loaded summaries.
///
/// The failed-request count is an estimate: `trunc(rate * count)` per test,
/// since the summary export carries a rate, not an exact failure count.
#[derive(Debug, Default, PartialEq)]
pub(crate) struct Totals {
    requests: f64,
    errors: u64,
}

impl Totals {
    pub(crate) fn record(&mut self, summary: &Summary) {
        let requests = summary.stat("http_reqs", "count");
        let rate = summary.stat("http_req_failed", "rate");
        self.requests += requests;
        self.errors = self.errors.saturating_add((rate * requests).trunc() as u64);
    }

    pub(crate) fn requests(&self) -> f64 {
        self.requests
    }

    pub(crate) fn errors(&self) -> u64 {
        self.errors
    }

    /// Overall success percentage; 0% when nothing ran at all.
    pub(crate) fn success_rate(&self) -> f64 {
        if self.requests <= 0.0 {
            return 0.0;
        }
        (self.requests - self.errors as f64) / self.requests * 100.0
    }
}

/// One overview card. `error` is set (and the metric fields left empty)
/// when the summary never loaded.
#[derive(Debug)]
pub(crate) struct Card {
    pub name: String,
    pub status: Status,
    pub error: Option<String>,
    pub requests: String,
    pub avg_duration: String,
    pub p95_duration: String,
    pub error_rate: String,
    pub iterations: String,
    pub vus_max: String,
    pub detail_page: String,
}

impl Card {
    pub(crate) fn from_summary(entry: &TestEntry, summary: &Summary) -> Self {
        Self {
            name: entry.name.to_string(),
            status: Status::classify(summary),
            error: None,
            requests: format_count(summary.stat("http_reqs", "count")),
            avg_duration: format_duration(summary.stat("http_req_duration", "avg")),
            p95_duration: format_duration(summary.stat("http_req_duration", "p(95)")),
            error_rate: format_percent(summary.stat("http_req_failed", "rate")),
            iterations: format_count(summary.stat("iterations", "count")),
            vus_max: format_count(summary.stat("vus_max", "max")),
            detail_page: entry.detail_page(),
        }
    }

    pub(crate) fn error(entry: &TestEntry, message: String) -> Self {
        Self {
            name: entry.name.to_string(),
            status: Status::Error,
            error: Some(message),
            requests: String::new(),
            avg_duration: String::new(),
            p95_duration: String::new(),
            error_rate: String::new(),
            iterations: String::new(),
            vus_max: String::new(),
            detail_page: String::new(),
        }
    }
}

#[derive(Template)]
#[template(path = "index.html")]
pub(crate) struct IndexPage {
    pub generated_at: String,
    pub tests_total: usize,
    pub total_requests: String,
    pub success_rate: String,
    pub total_errors: u64,
    pub cards: Vec<Card>,
}

#[derive(Template)]
#[template(path = "detail.html")]
pub(crate) struct DetailPage {
    pub name: String,
    pub requests: String,
    pub error_rate: String,
    pub iterations: String,
    pub vus_max: String,
    pub data_received: String,
    pub data_sent: String,
    pub rows: Vec<TimingRow>,
}

#[derive(Debug)]
pub(crate) struct TimingRow {
    pub metric: &'static str,
    pub avg: String,
    pub min: String,
    pub med: String,
    pub max: String,
    pub p90: String,
    pub p95: String,
}

pub(crate) fn detail_page(entry: &TestEntry, summary: &Summary) -> DetailPage {
    let rows = TIMING_METRICS
        .into_iter()
        .filter_map(|metric| {
            let t = summary.timing(metric);
            if t.is_empty() {
                return None;
            }
            Some(TimingRow {
                metric,
                avg: format_duration(t.avg),
                min: format_duration(t.min),
                med: format_duration(t.med),
                max: format_duration(t.max),
                p90: format_duration(t.p90),
                p95: format_duration(t.p95),
            })
        })
        .collect();

    DetailPage {
        name: entry.name.to_string(),
        requests: format_count(summary.stat("http_reqs", "count")),
        error_rate: format_percent(summary.stat("http_req_failed", "rate")),
        iterations: format_count(summary.stat("iterations", "count")),
        vus_max: format_count(summary.stat("vus_max", "max")),
        data_received: format_bytes(summary.stat("data_received", "count")),
        data_sent: format_bytes(summary.stat("data_sent", "count")),
        rows,
    }
}
