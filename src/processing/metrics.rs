//! Loosely-typed achievement metrics and their display formatting

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Metric key -> value, as written in the profile
pub type MetricsRecord = BTreeMap<String, MetricValue>;

/// A metric value as it appears in profile JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Int(i64),
    Float(f64),
    Text(String),
    Other(serde_json::Value),
}

impl MetricValue {
    /// Numeric, or a string carrying at least one digit
    pub fn is_quantifiable(&self) -> bool {
        match self {
            MetricValue::Int(_) | MetricValue::Float(_) => true,
            MetricValue::Text(text) => text.chars().any(|c| c.is_ascii_digit()),
            MetricValue::Other(_) => false,
        }
    }

    /// Generic display form used inside generated bullets.
    ///
    /// Fractions in (0, 1) become whole percentages, whole floats drop their
    /// decimal part, strings pass through untouched.
    pub fn format_generic(&self) -> String {
        match self {
            MetricValue::Int(value) => value.to_string(),
            MetricValue::Float(value) => format_float(*value),
            MetricValue::Text(text) => text.clone(),
            MetricValue::Other(value) => value.to_string(),
        }
    }

    /// The value as written in the profile: no percentage or rounding applied
    pub fn raw_string(&self) -> String {
        match self {
            MetricValue::Int(value) => value.to_string(),
            MetricValue::Float(value) => format!("{:?}", value),
            MetricValue::Text(text) => text.clone(),
            MetricValue::Other(value) => value.to_string(),
        }
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_generic())
    }
}

impl From<i64> for MetricValue {
    fn from(value: i64) -> Self {
        MetricValue::Int(value)
    }
}

impl From<f64> for MetricValue {
    fn from(value: f64) -> Self {
        MetricValue::Float(value)
    }
}

impl From<&str> for MetricValue {
    fn from(value: &str) -> Self {
        MetricValue::Text(value.to_string())
    }
}

fn format_float(value: f64) -> String {
    if value > 0.0 && value < 1.0 {
        format!("{}%", (value * 100.0) as i64)
    } else if value.fract() == 0.0 && value.is_finite() {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// Display intent for [`format_metric`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricKind {
    Percentage,
    Count,
    Time,
    Currency,
}

/// Format a metric for a specific kind of display
pub fn format_metric(value: &MetricValue, kind: MetricKind) -> String {
    match (kind, value) {
        (MetricKind::Percentage, MetricValue::Float(v)) => format!("{}%", (v * 100.0) as i64),
        (MetricKind::Percentage, other) => format!("{}%", other.format_generic()),
        (MetricKind::Count, other) => other.format_generic(),
        (MetricKind::Time, MetricValue::Int(v)) => format!("{} hours", v),
        (MetricKind::Time, other) => other.format_generic(),
        (MetricKind::Currency, MetricValue::Int(v)) => format!("${}", group_thousands(*v)),
        (MetricKind::Currency, MetricValue::Float(v)) => format!("${}", group_thousands(v.round() as i64)),
        (MetricKind::Currency, other) => other.format_generic(),
    }
}

fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if value < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Metric keys consulted, in order, when an angle needs any number at all
pub const METRIC_PRIORITY: [&str; 13] = [
    "incidents_reduced",
    "risks_mitigated",
    "vulnerabilities",
    "time_saved",
    "automation_percent",
    "cost_savings",
    "revenue",
    "value",
    "roi",
    "team_size",
    "people_trained",
    "endpoints",
    "systems",
];

/// First present key among `keys`, formatted
pub fn first_present(metrics: &MetricsRecord, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|key| metrics.get(*key))
        .map(MetricValue::format_generic)
}

/// First quantifiable metric by [`METRIC_PRIORITY`], then by key order
pub fn first_quantifiable(metrics: &MetricsRecord) -> Option<String> {
    METRIC_PRIORITY
        .iter()
        .filter_map(|key| metrics.get(*key))
        .chain(metrics.values())
        .find(|value| value.is_quantifiable())
        .map(MetricValue::format_generic)
}
