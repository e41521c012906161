use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;

/// End-of-test summary as exported by k6: a `metrics` table keyed by
/// metric name. Everything else in the file is ignored.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct Summary {
    #[serde(default)]
    metrics: HashMap<String, Metric>,
}

/// A single metric entry. Depending on the k6 version the statistics sit
/// either directly on the object or nested under a `values` key; `value`
/// resolves both shapes.
#[derive(Debug, Default, Deserialize)]
#[serde(transparent)]
pub(crate) struct Metric(serde_json::Map<String, Value>);

impl Summary {
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).with_context(|| format!("read {}", path.display()))?;
        serde_json::from_slice(&bytes).with_context(|| format!("parse {}", path.display()))
    }

    pub(crate) fn metric_count(&self) -> usize {
        self.metrics.len()
    }

    /// Numeric statistic for `metric`, or 0.0 when the metric, the
    /// statistic, or the whole table is absent or non-numeric.
    pub(crate) fn stat(&self, metric: &str, stat: &str) -> f64 {
        self.metrics.get(metric).map_or(0.0, |m| m.value(stat))
    }

    /// Per-statistic timing snapshot used by the detail table.
    pub(crate) fn timing(&self, metric: &str) -> Timing {
        Timing {
            avg: self.stat(metric, "avg"),
            min: self.stat(metric, "min"),
            med: self.stat(metric, "med"),
            max: self.stat(metric, "max"),
            p90: self.stat(metric, "p(90)"),
            p95: self.stat(metric, "p(95)"),
        }
    }
}

impl Metric {
    fn value(&self, stat: &str) -> f64 {
        let table = match self.0.get("values") {
            Some(Value::Object(values)) => values,
            _ => &self.0,
        };
        table.get(stat).and_then(Value::as_f64).unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct Timing {
    pub avg: f64,
    pub min: f64,
    pub med: f64,
    pub max: f64,
    pub p90: f64,
    pub p95: f64,
}

impl Timing {
    /// True when every statistic is zero/absent. Such metrics are dropped
    /// from the detail table instead of rendering an all-zero row.
    pub(crate) fn is_empty(&self) -> bool {
        [self.avg, self.min, self.med, self.max, self.p90, self.p95]
            .iter()
            .all(|v| *v == 0.0)
    }
}
