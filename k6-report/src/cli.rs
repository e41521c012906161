use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "k6-report",
    version,
    about = "Render k6 summary JSON files into a static HTML report",
    long_about = "k6-report reads the end-of-test summary JSON files written by k6 and renders a static HTML dashboard: an overview page with one card per test plus a detail page per test with full percentile breakdowns.\n\nMissing or malformed summaries degrade the report (the test is shown with an error card); they never fail the run."
)]
pub struct Cli {
    /// Directory containing the `*-summary.json` files written by k6
    #[arg(long, env = "RESULTS_DIR", default_value = "test-results")]
    pub(crate) results_dir: PathBuf,

    /// Directory to write the generated report into (created if missing)
    #[arg(long, env = "REPORT_OUT", default_value = "docs")]
    pub(crate) out: PathBuf,
}
