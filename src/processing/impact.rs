//! Multi-angle impact bullet generation
//!
//! One responsibility statement is rephrased from up to four angles. Each
//! angle fires on its own predicate over the metrics, the posting and the
//! responsibility text, and is scored by how strongly the posting asks for
//! that kind of impact.

use crate::error::{Result, TailorError};
use crate::letter::templates::fill_template;
use crate::processing::lexical;
use crate::processing::metrics::{first_present, first_quantifiable, MetricsRecord};
use crate::processing::text_processor::JobDescription;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Angle {
    Security,
    Efficiency,
    Team,
    Business,
    General,
}

impl Angle {
    pub const ALL: [Angle; 5] = [
        Angle::Security,
        Angle::Efficiency,
        Angle::Team,
        Angle::Business,
        Angle::General,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Angle::Security => "security",
            Angle::Efficiency => "efficiency",
            Angle::Team => "team",
            Angle::Business => "business",
            Angle::General => "general",
        }
    }

    /// Action verbs for this angle, strongest first
    pub fn verbs(&self) -> &'static [&'static str] {
        match self {
            Angle::Security | Angle::General => &[
                "Implemented", "Configured", "Deployed", "Established", "Secured",
                "Detected", "Investigated", "Analyzed", "Identified", "Mitigated",
                "Patched", "Hardened", "Monitored", "Audited", "Remediated",
                "Eliminated", "Reduced", "Prevented", "Fortified", "Strengthened",
            ],
            Angle::Efficiency => &[
                "Automated", "Streamlined", "Optimized", "Accelerated", "Reduced",
                "Eliminated", "Decreased", "Saved", "Improved", "Enhanced",
            ],
            Angle::Team => &[
                "Trained", "Mentored", "Led", "Coordinated", "Managed", "Directed",
                "Guided", "Coached", "Collaborated", "Facilitated", "Supported",
            ],
            Angle::Business => &[
                "Delivered", "Generated", "Drove", "Increased", "Captured",
                "Protected", "Recovered", "Maximized",
            ],
        }
    }

    pub fn lead_verb(&self) -> &'static str {
        self.verbs()[0]
    }

    fn template(&self) -> &'static str {
        match self {
            Angle::Security => {
                "{verb} {responsibility}, reducing security incidents by {metric} and strengthening the organization's defensive posture."
            }
            Angle::Efficiency => {
                "{verb} {responsibility}, saving {metric} of manual effort through streamlined, repeatable workflows."
            }
            Angle::Team => "{verb} {responsibility}, upskilling {metric} team members on security best practices.",
            Angle::Business => "{verb} {responsibility}, delivering {metric} in measurable business value.",
            Angle::General => "{verb} {responsibility}{details}.",
        }
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Angle {
    type Err = TailorError;

    fn from_str(s: &str) -> Result<Self> {
        let lowered = s.trim().to_lowercase();
        Angle::ALL
            .iter()
            .copied()
            .find(|angle| angle.as_str() == lowered)
            .ok_or_else(|| {
                let known: Vec<&str> = Angle::ALL.iter().map(|a| a.as_str()).collect();
                TailorError::unknown_variant("angle", s, &known)
            })
    }
}

/// Relevance score given to the fallback bullet
const GENERAL_SCORE: f32 = 0.5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactVariant {
    pub angle: Angle,
    pub bullet: String,
    pub score: f32,
}

/// Every phrasing generated for one responsibility
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactVariantSet {
    /// In angle declaration order; never empty
    pub variants: Vec<ImpactVariant>,
    pub recommended: Angle,
    pub count: usize,
}

impl ImpactVariantSet {
    fn from_variants(variants: Vec<ImpactVariant>) -> Self {
        // Strictly-greater keeps the earliest angle on ties
        let mut recommended = &variants[0];
        for variant in &variants[1..] {
            if variant.score > recommended.score {
                recommended = variant;
            }
        }
        let recommended = recommended.angle;
        let count = variants.len();
        Self {
            variants,
            recommended,
            count,
        }
    }

    pub fn get(&self, angle: Angle) -> Option<&str> {
        self.variants
            .iter()
            .find(|v| v.angle == angle)
            .map(|v| v.bullet.as_str())
    }

    pub fn score(&self, angle: Angle) -> Option<f32> {
        self.variants.iter().find(|v| v.angle == angle).map(|v| v.score)
    }

    pub fn recommended_bullet(&self) -> &str {
        self.get(self.recommended).unwrap_or_default()
    }

    pub fn angles(&self) -> Vec<Angle> {
        self.variants.iter().map(|v| v.angle).collect()
    }
}

/// Inputs for one bullet generation call
#[derive(Debug, Clone, Copy)]
pub struct ImpactRequest<'a> {
    pub responsibility: &'a str,
    pub metrics: &'a MetricsRecord,
    pub job: Option<&'a JobDescription>,
    /// Extra text about the role, checked alongside the responsibility
    pub context: Option<&'a str>,
}

impl<'a> ImpactRequest<'a> {
    pub fn new(responsibility: &'a str, metrics: &'a MetricsRecord) -> Self {
        Self {
            responsibility,
            metrics,
            job: None,
            context: None,
        }
    }

    pub fn with_job(mut self, job: &'a JobDescription) -> Self {
        self.job = Some(job);
        self
    }

    pub fn with_context(mut self, context: &'a str) -> Self {
        self.context = Some(context);
        self
    }
}

/// Generate every applicable phrasing of a responsibility
pub fn generate_impact_variants(request: &ImpactRequest<'_>) -> ImpactVariantSet {
    let metrics = request.metrics;
    let job_lower = request.job.map(|job| job.lowered()).unwrap_or("");
    let duty_lower = match request.context {
        Some(context) => format!("{} {}", request.responsibility, context).to_lowercase(),
        None => request.responsibility.to_lowercase(),
    };
    let has_metric = |key: &str| metrics.contains_key(key);

    let mut variants = Vec::new();

    let security_fires = metrics
        .keys()
        .any(|key| lexical::contains_any(key, &["incidents", "risks", "vulnerabilities"]))
        || lexical::contains(job_lower, "incident");
    if security_fires {
        let metric = first_present(metrics, &["incidents_reduced", "risks_mitigated", "vulnerabilities"])
            .or_else(|| first_quantifiable(metrics))
            .unwrap_or_else(|| "X%".to_string());
        let score = if lexical::contains(job_lower, "incident") { 1.0 } else { 0.8 };
        variants.push(render_variant(Angle::Security, request.responsibility, &metric, score));
    }

    let efficiency_fires = has_metric("time_saved")
        || lexical::contains(job_lower, "automated")
        || lexical::contains(&duty_lower, "automation");
    if efficiency_fires {
        let metric = first_present(metrics, &["time_saved", "automation_percent"])
            .unwrap_or_else(|| "X hours".to_string());
        let score = if lexical::contains_any(job_lower, &["automated", "streamline"]) {
            1.0
        } else {
            0.7
        };
        variants.push(render_variant(Angle::Efficiency, request.responsibility, &metric, score));
    }

    let team_fires = has_metric("team_size") || has_metric("people_trained") || lexical::contains(&duty_lower, "trained");
    if team_fires {
        let metric = first_present(metrics, &["team_size", "people_trained"]).unwrap_or_else(|| "X".to_string());
        let score = if lexical::contains_any(job_lower, &["team", "trained"]) {
            1.0
        } else {
            0.6
        };
        variants.push(render_variant(Angle::Team, request.responsibility, &metric, score));
    }

    let business_keys = ["cost_savings", "revenue", "value", "roi"];
    if business_keys.iter().any(|key| has_metric(key)) {
        let metric = first_present(metrics, &business_keys).unwrap_or_else(|| "X".to_string());
        variants.push(render_variant(Angle::Business, request.responsibility, &metric, 1.0));
    }

    if variants.is_empty() {
        variants.push(general_variant(request.responsibility, metrics));
    }

    let set = ImpactVariantSet::from_variants(variants);
    debug!(
        "Generated {} impact variants for '{}', recommended: {}",
        set.count, request.responsibility, set.recommended
    );
    set
}

fn render_variant(angle: Angle, responsibility: &str, metric: &str, score: f32) -> ImpactVariant {
    let bullet = fill_template(
        angle.template(),
        &[
            ("verb", angle.lead_verb()),
            ("responsibility", responsibility),
            ("metric", metric),
        ],
    );
    ImpactVariant { angle, bullet, score }
}

fn general_variant(responsibility: &str, metrics: &MetricsRecord) -> ImpactVariant {
    let pairs: Vec<String> = metrics
        .iter()
        .take(2)
        .map(|(key, value)| format!("{}: {}", key, value.raw_string()))
        .collect();
    let details = if pairs.is_empty() {
        String::new()
    } else {
        format!(" ({})", pairs.join(", "))
    };

    let bullet = Angle::General
        .template()
        .replace("{verb}", Angle::General.lead_verb())
        .replace("{responsibility}", responsibility)
        .replace("{details}", &details);

    ImpactVariant {
        angle: Angle::General,
        bullet,
        score: GENERAL_SCORE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::metrics::MetricValue;

    fn metrics(entries: &[(&str, MetricValue)]) -> MetricsRecord {
        entries.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
    }

    #[test]
    fn test_empty_inputs_give_general_only() {
        let empty = MetricsRecord::new();
        let job = JobDescription::empty();
        let set = generate_impact_variants(&ImpactRequest::new("firewall rules across 30 endpoints", &empty).with_job(&job));

        assert_eq!(set.count, 1);
        assert_eq!(set.angles(), vec![Angle::General]);
        assert_eq!(set.recommended, Angle::General);
        assert_eq!(set.recommended_bullet(), "Implemented firewall rules across 30 endpoints.");
    }

    #[test]
    fn test_security_angle_uses_incident_metric() {
        let m = metrics(&[("incidents_reduced", MetricValue::Float(0.4)), ("endpoints", MetricValue::Int(30))]);
        let job = JobDescription::new("Own incident triage for the SOC");
        let set = generate_impact_variants(&ImpactRequest::new("MFA rollout across 30 endpoints", &m).with_job(&job));

        let bullet = set.get(Angle::Security).unwrap();
        assert!(bullet.starts_with("Implemented MFA rollout across 30 endpoints"));
        assert!(bullet.contains("by 40%"));
        assert_eq!(set.score(Angle::Security), Some(1.0));
        assert_eq!(set.recommended, Angle::Security);
    }

    #[test]
    fn test_responsibility_braces_stay_literal() {
        let m = metrics(&[("incidents_reduced", MetricValue::Float(0.4))]);
        let job = JobDescription::new("Own incident triage for the SOC");
        let set = generate_impact_variants(&ImpactRequest::new("templated {metric} alerts", &m).with_job(&job));

        let bullet = set.get(Angle::Security).unwrap();
        assert!(bullet.starts_with("Implemented templated {metric} alerts, reducing"));
    }

    #[test]
    fn test_security_falls_back_to_placeholder() {
        let m = MetricsRecord::new();
        let job = JobDescription::new("Incident response analyst");
        let set = generate_impact_variants(&ImpactRequest::new("alert triage", &m).with_job(&job));
        assert!(set.get(Angle::Security).unwrap().contains("by X%"));
    }

    #[test]
    fn test_security_falls_back_to_quantifiable_metric() {
        let m = metrics(&[("vulnerability_count", MetricValue::Int(7)), ("endpoints", MetricValue::from("120+"))]);
        let job = JobDescription::new("incident handling");
        let set = generate_impact_variants(&ImpactRequest::new("patching", &m).with_job(&job));
        assert!(set.get(Angle::Security).unwrap().contains("by 120+"));
    }

    #[test]
    fn test_multiple_angles_and_scores() {
        let m = metrics(&[
            ("risks_mitigated", MetricValue::Int(12)),
            ("time_saved", MetricValue::from("10 hours/week")),
            ("team_size", MetricValue::Int(6)),
            ("cost_savings", MetricValue::from("$40,000")),
        ]);
        let set = generate_impact_variants(&ImpactRequest::new("a log pipeline", &m));

        assert_eq!(
            set.angles(),
            vec![Angle::Security, Angle::Efficiency, Angle::Team, Angle::Business]
        );
        assert_eq!(set.score(Angle::Security), Some(0.8));
        assert_eq!(set.score(Angle::Efficiency), Some(0.7));
        assert_eq!(set.score(Angle::Team), Some(0.6));
        assert_eq!(set.score(Angle::Business), Some(1.0));
        assert_eq!(set.recommended, Angle::Business);
        assert!(set.get(Angle::Efficiency).unwrap().starts_with("Automated a log pipeline, saving 10 hours/week"));
        assert!(set.get(Angle::Team).unwrap().starts_with("Trained a log pipeline, upskilling 6 team"));
        assert!(set.get(Angle::Business).unwrap().contains("delivering $40,000"));
    }

    #[test]
    fn test_ties_recommend_earliest_angle() {
        let m = metrics(&[("incidents_reduced", MetricValue::Int(5)), ("revenue", MetricValue::Int(100))]);
        let job = JobDescription::new("incident response team");
        let set = generate_impact_variants(&ImpactRequest::new("x", &m).with_job(&job));
        assert_eq!(set.score(Angle::Security), Some(1.0));
        assert_eq!(set.score(Angle::Business), Some(1.0));
        assert_eq!(set.recommended, Angle::Security);
    }

    #[test]
    fn test_responsibility_and_context_predicates() {
        let m = MetricsRecord::new();
        let set = generate_impact_variants(&ImpactRequest::new("trained analysts on playbook automation", &m));
        assert_eq!(set.angles(), vec![Angle::Efficiency, Angle::Team]);
        assert!(set.get(Angle::Efficiency).unwrap().contains("saving X hours"));
        assert!(set.get(Angle::Team).unwrap().contains("upskilling X team"));

        let set = generate_impact_variants(&ImpactRequest::new("runbooks", &m).with_context("security automation program"));
        assert_eq!(set.angles(), vec![Angle::Efficiency]);
    }

    #[test]
    fn test_general_appends_two_metrics() {
        let m = metrics(&[
            ("alpha", MetricValue::Int(1)),
            ("beta", MetricValue::Float(0.25)),
            ("gamma", MetricValue::Int(3)),
        ]);
        let set = generate_impact_variants(&ImpactRequest::new("hardened servers", &m));
        assert_eq!(set.recommended_bullet(), "Implemented hardened servers (alpha: 1, beta: 0.25).");
    }

    #[test]
    fn test_general_keeps_raw_float_values() {
        let m = metrics(&[("alpha", MetricValue::Float(0.25)), ("beta", MetricValue::Float(3.0))]);
        let set = generate_impact_variants(&ImpactRequest::new("hardened servers", &m));
        assert_eq!(set.recommended_bullet(), "Implemented hardened servers (alpha: 0.25, beta: 3.0).");
    }

    #[test]
    fn test_angle_parsing() {
        assert_eq!("Team".parse::<Angle>().unwrap(), Angle::Team);
        assert!("teams".parse::<Angle>().unwrap_err().to_string().contains("did you mean 'team'"));
    }
}
