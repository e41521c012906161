use std::path::Path;

use anyhow::{Context, Result};
use askama::Template as _;

use crate::cli::Cli;
use crate::format::format_count;
use crate::plan::{self, TestEntry};
use crate::report::{self, Card, IndexPage, Totals};
use crate::summary::Summary;

pub fn run(cli: Cli) -> Result<()> {
    let generated_at =
        humantime::format_rfc3339_seconds(std::time::SystemTime::now()).to_string();
    generate(&cli.results_dir, &cli.out, &plan::default_plan(), &generated_at)
}

/// Renders the whole report: one detail page per loaded summary plus the
/// overview. Missing or malformed summaries become error cards; only
/// output-side failures abort the run.
pub(crate) fn generate(
    results_dir: &Path,
    out_dir: &Path,
    plan: &[TestEntry],
    generated_at: &str,
) -> Result<()> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("create output directory {}", out_dir.display()))?;

    let mut totals = Totals::default();
    let mut cards = Vec::with_capacity(plan.len());

    for entry in plan {
        match load_entry(results_dir, entry) {
            Ok(summary) => {
                println!("loaded {} ({} metrics)", entry.file, summary.metric_count());
                totals.record(&summary);
                cards.push(Card::from_summary(entry, &summary));

                let page = report::detail_page(entry, &summary);
                let html = page
                    .render()
                    .with_context(|| format!("render detail page for {}", entry.name))?;
                let out_path = out_dir.join(entry.detail_page());
                std::fs::write(&out_path, html)
                    .with_context(|| format!("write {}", out_path.display()))?;
            }
            Err(message) => {
                println!("WARN: {message}");
                cards.push(Card::error(entry, message));
            }
        }
    }

    let index = IndexPage {
        generated_at: generated_at.to_string(),
        tests_total: plan.len(),
        total_requests: format_count(totals.requests()),
        success_rate: format!("{:.1}%", totals.success_rate()),
        total_errors: totals.errors(),
        cards,
    };
    let html = index.render().context("render index page")?;
    let index_path = out_dir.join("index.html");
    std::fs::write(&index_path, html)
        .with_context(|| format!("write {}", index_path.display()))?;

    println!("report written: {}", index_path.display());
    println!(
        "  tests: {} | requests: {} | success rate: {:.1}%",
        plan.len(),
        format_count(totals.requests()),
        totals.success_rate()
    );

    Ok(())
}

/// The error message doubles as the card text on the overview, so it
/// distinguishes a missing file from an unparseable one.
fn load_entry(results_dir: &Path, entry: &TestEntry) -> Result<Summary, String> {
    let path = results_dir.join(entry.file);
    if !path.exists() {
        return Err(format!("summary not found: {}", entry.file));
    }
    Summary::load(&path).map_err(|err| format!("failed to parse {}: {err:#}", entry.file))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_results(dir: &Path) {
        let good = serde_json::json!({
            "metrics": {
                "http_reqs": { "values": { "count": 100.0, "rate": 10.0 } },
                "http_req_duration": {
                    "values": { "avg": 5.0, "min": 1.0, "med": 4.0, "max": 20.0,
                                "p(90)": 9.0, "p(95)": 12.0 }
                },
                "http_req_failed": { "values": { "rate": 0.01 } },
                "iterations": { "values": { "count": 100.0 } },
                "vus_max": { "values": { "max": 10.0 } }
            }
        });
        let body = match serde_json::to_vec(&good) {
            Ok(v) => v,
            Err(err) => panic!("serialize fixture: {err}"),
        };
        if let Err(err) = std::fs::write(dir.join("00-script1-summary.json"), body) {
            panic!("write fixture: {err}");
        }
        if let Err(err) = std::fs::write(dir.join("01-ramp-summary.json"), b"not json {") {
            panic!("write fixture: {err}");
        }
    }

    fn plan() -> Vec<TestEntry> {
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
                file: "spike-test-summary.json",
                name: "Spike Test",
            },
        ]
    }

    #[test]
    fn generate_degrades_on_missing_and_malformed_summaries() -> anyhow::Result<()> {
        let tmp = tempfile::tempdir()?;
        let results = tmp.path().join("results");
        let out = tmp.path().join("docs");
        std::fs::create_dir_all(&results)?;
        write_results(&results);

        generate(&results, &out, &plan(), "2026-08-29T00:00:00Z")?;

        let index = std::fs::read_to_string(out.join("index.html"))?;
        assert!(index.contains("00. Simple Script"));
        assert!(index.contains("failed to parse 01-ramp-summary.json"));
        assert!(index.contains("summary not found: spike-test-summary.json"));

        // Detail pages exist only for summaries that loaded.
        assert!(out.join("00-script1.html").exists());
        assert!(!out.join("01-ramp.html").exists());
        assert!(!out.join("spike-test.html").exists());

        Ok(())
    }

    #[test]
    fn generate_is_deterministic_for_fixed_timestamp() -> anyhow::Result<()> {
        let tmp = tempfile::tempdir()?;
        let results = tmp.path().join("results");
        std::fs::create_dir_all(&results)?;
        write_results(&results);

        let out_a = tmp.path().join("a");
        let out_b = tmp.path().join("b");
        generate(&results, &out_a, &plan(), "2026-08-29T00:00:00Z")?;
        generate(&results, &out_b, &plan(), "2026-08-29T00:00:00Z")?;

        let a = std::fs::read_to_string(out_a.join("index.html"))?;
        let b = std::fs::read_to_string(out_b.join("index.html"))?;
        assert_eq!(a, b);

        let a = std::fs::read_to_string(out_a.join("00-script1.html"))?;
        let b = std::fs::read_to_string(out_b.join("00-script1.html"))?;
        assert_eq!(a, b);

        Ok(())
    }

    #[test]
    fn generate_with_empty_results_dir_still_writes_index() -> anyhow::Result<()> {
        let tmp = tempfile::tempdir()?;
        let results = tmp.path().join("results");
        let out = tmp.path().join("docs");
        std::fs::create_dir_all(&results)?;

        generate(&results, &out, &plan(), "2026-08-29T00:00:00Z")?;

        let index = std::fs::read_to_string(out.join("index.html"))?;
        // Zero requests renders a 0.0% success rate, not a division fault.
        assert!(index.contains("0.0%"));
        Ok(())
    }
}
