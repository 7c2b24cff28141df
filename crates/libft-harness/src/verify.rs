//! Output comparison and verification.

use serde::{Deserialize, Serialize};

/// Result of verifying a single fixture case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationResult {
    /// Name of the test case.
    pub case_name: String,
    /// Function exercised by the case.
    pub function: String,
    /// Whether the case passed.
    pub passed: bool,
    /// Expected output (compact JSON).
    pub expected: String,
    /// Actual output from our implementation (compact JSON).
    pub actual: String,
    /// Diff if the case failed.
    pub diff: Option<String>,
    /// Healing the membrane recorded while the case ran, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub healing_action: Option<String>,
}

/// Aggregate verification summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationSummary {
    /// Total cases run.
    pub total: usize,
    /// Cases passed.
    pub passed: usize,
    /// Cases failed.
    pub failed: usize,
    /// Individual results.
    pub results: Vec<VerificationResult>,
}

impl VerificationSummary {
    /// Build a summary from a list of results.
    #[must_use]
    pub fn from_results(results: Vec<VerificationResult>) -> Self {
        let total = results.len();
        let passed = results.iter().filter(|r| r.passed).count();
        let failed = total - passed;
        Self {
            total,
            passed,
            failed,
            results,
        }
    }

    /// Returns true if all cases passed.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// Failed results only.
    pub fn failures(&self) -> impl Iterator<Item = &VerificationResult> {
        self.results.iter().filter(|r| !r.passed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(name: &str, passed: bool) -> VerificationResult {
        VerificationResult {
            case_name: name.to_string(),
            function: String::from("strlen"),
            passed,
            expected: String::from("1"),
            actual: String::from(if passed { "1" } else { "2" }),
            diff: None,
            healing_action: None,
        }
    }

    #[test]
    fn summary_counts() {
        let summary = VerificationSummary::from_results(vec![
            result("a", true),
            result("b", false),
            result("c", true),
        ]);
        assert_eq!((summary.total, summary.passed, summary.failed), (3, 2, 1));
        assert!(!summary.all_passed());
        let failed: Vec<_> = summary.failures().map(|r| r.case_name.as_str()).collect();
        assert_eq!(failed, ["b"]);
    }

    #[test]
    fn empty_summary_passes() {
        assert!(VerificationSummary::from_results(Vec::new()).all_passed());
    }
}
