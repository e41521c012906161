/// One report entry: which summary file to look for and how to label it.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TestEntry {
    pub file: &'static str,
    pub name: &'static str,
}

impl TestEntry {
    /// Detail page file name: the `-summary.json` suffix replaced with `.html`.
    pub(crate) fn detail_page(&self) -> String {
        let base = self
            .file
            .strip_suffix("-summary.json")
            .or_else(|| self.file.strip_suffix(".json"))
            .unwrap_or(self.file);
        format!("{base}.html")
    }
}

/// The k6 test suite, in display order. The overview renders a card per
/// entry even when the summary file never showed up.
pub(crate) fn default_plan() -> Vec<TestEntry> {
    vec![
        TestEntry {
            file: "00-script1-summary.json",
            name: "00. Simple Script",
        },
        TestEntry {
            file: "01-ramp-summary.json",
            name: "01. Ramping Load",
        },
        TestEntry {
            file: "02-http-requests-summary.json",
            name: "02. HTTP Requests",
        },
        TestEntry {
            file: "03-checks-summary.json",
            name: "03. Checks & Validations",
        },
        TestEntry {
            file: "04-thresholds-summary.json",
            name: "04. Thresholds",
        },
        TestEntry {
            file: "05-stages-summary.json",
            name: "05. Load Stages",
        },
        TestEntry {
            file: "api-load-test-summary.json",
            name: "API Load Test",
        },
        TestEntry {
            file: "spike-test-summary.json",
            name: "Spike Test",
        },
    ]
}
