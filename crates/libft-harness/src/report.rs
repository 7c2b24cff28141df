//! Report generation for conformance results.

use libft_membrane::HealingSnapshot;
use serde::{Deserialize, Serialize};

use crate::fixtures::FixtureFile;
use crate::verify::VerificationSummary;

/// Provenance of one fixture file used in a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureDigest {
    pub path: String,
    pub family: String,
    pub cases: usize,
    pub sha256: String,
}

impl From<&FixtureFile> for FixtureDigest {
    fn from(file: &FixtureFile) -> Self {
        Self {
            path: file.path.display().to_string(),
            family: file.set.family.clone(),
            cases: file.set.cases.len(),
            sha256: file.sha256.clone(),
        }
    }
}

/// Healing counters captured at the end of a run.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct HealingCounts {
    pub total_heals: u64,
    pub safe_defaults: u64,
    pub variant_upgrades: u64,
}

impl From<HealingSnapshot> for HealingCounts {
    fn from(s: HealingSnapshot) -> Self {
        Self {
            total_heals: s.total_heals,
            safe_defaults: s.safe_defaults,
            variant_upgrades: s.variant_upgrades,
        }
    }
}

/// A conformance report: what ran, against which fixtures, and the outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConformanceReport {
    /// Report title.
    pub title: String,
    /// Runtime modes tested.
    pub mode: String,
    /// Timestamp (UTC).
    pub timestamp: String,
    pub fixtures: Vec<FixtureDigest>,
    pub healing: HealingCounts,
    /// Verification summary.
    pub summary: VerificationSummary,
}

impl ConformanceReport {
    /// Render the report as markdown.
    #[must_use]
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("# {}\n\n", self.title));
        out.push_str(&format!("- Mode: {}\n", self.mode));
        out.push_str(&format!("- Timestamp: {}\n", self.timestamp));
        out.push_str(&format!("- Total: {}\n", self.summary.total));
        out.push_str(&format!("- Passed: {}\n", self.summary.passed));
        out.push_str(&format!("- Failed: {}\n", self.summary.failed));
        out.push_str(&format!(
            "- Heals: {} (safe defaults {}, upgrades {})\n\n",
            self.healing.total_heals, self.healing.safe_defaults, self.healing.variant_upgrades
        ));

        out.push_str("## Fixtures\n\n");
        out.push_str("| File | Family | Cases | SHA-256 |\n");
        out.push_str("|------|--------|-------|---------|\n");
        for f in &self.fixtures {
            out.push_str(&format!(
                "| {} | {} | {} | `{}` |\n",
                f.path, f.family, f.cases, f.sha256
            ));
        }

        out.push_str("\n## Results\n\n");
        out.push_str("| Case | Function | Status |\n");
        out.push_str("|------|----------|--------|\n");
        for r in &self.summary.results {
            let status = if r.passed { "PASS" } else { "FAIL" };
            out.push_str(&format!("| {} | {} | {} |\n", r.case_name, r.function, status));
        }

        let failures: Vec<_> = self.summary.failures().collect();
        if !failures.is_empty() {
            out.push_str("\n## Failures\n");
            for r in failures {
                out.push_str(&format!("\n### {}\n\n```diff\n", r.case_name));
                out.push_str(r.diff.as_deref().unwrap_or_default());
                out.push_str("```\n");
            }
        }
        out
    }

    /// Render the report as JSON.
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verify::VerificationResult;

    fn report(passed: bool) -> ConformanceReport {
        ConformanceReport {
            title: String::from("libft Conformance Report"),
            mode: String::from("strict+hardened"),
            timestamp: String::from("2026-01-01T00:00:00.000Z"),
            fixtures: vec![FixtureDigest {
                path: String::from("fixtures/string.json"),
                family: String::from("string"),
                cases: 1,
                sha256: String::from("ab12"),
            }],
            healing: HealingCounts::default(),
            summary: VerificationSummary::from_results(vec![VerificationResult {
                case_name: String::from("len"),
                function: String::from("strlen"),
                passed,
                expected: String::from("3"),
                actual: String::from(if passed { "3" } else { "4" }),
                diff: (!passed).then(|| String::from("-3\n+4\n")),
                healing_action: None,
            }]),
        }
    }

    #[test]
    fn markdown_lists_fixtures_and_results() {
        let md = report(true).to_markdown();
        assert!(md.starts_with("# libft Conformance Report\n"));
        assert!(md.contains("| fixtures/string.json | string | 1 | `ab12` |"));
        assert!(md.contains("| len | strlen | PASS |"));
        assert!(!md.contains("## Failures"));
    }

    #[test]
    fn markdown_includes_failure_diffs() {
        let md = report(false).to_markdown();
        assert!(md.contains("## Failures"));
        assert!(md.contains("```diff\n-3\n+4\n```"));
    }

    #[test]
    fn json_is_parsable() {
        let json = report(true).to_json();
        let v: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        assert_eq!(v["summary"]["total"], 1);
        assert_eq!(v["fixtures"][0]["sha256"], "ab12");
    }
}
