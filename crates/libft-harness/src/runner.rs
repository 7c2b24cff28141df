//! Test execution engine.

use libft_membrane::heal::{HealingAction, HealingSnapshot, global_healing_policy};

use crate::diff;
use crate::exec::execute_fixture_case;
use crate::fixtures::{FixtureCase, FixtureSet};
use crate::verify::VerificationResult;

/// Runs a fixture set and collects verification results.
pub struct TestRunner {
    /// Name of the test campaign.
    pub campaign: String,
    /// Mode being tested (strict or hardened).
    pub mode: String,
}

impl TestRunner {
    /// Create a new test runner.
    #[must_use]
    pub fn new(campaign: impl Into<String>, mode: impl Into<String>) -> Self {
        Self {
            campaign: campaign.into(),
            mode: mode.into(),
        }
    }

    /// Run all fixtures in a set that apply to this runner's mode.
    pub fn run(&self, fixture_set: &FixtureSet) -> Vec<VerificationResult> {
        fixture_set
            .cases
            .iter()
            .filter(|case| mode_matches(&self.mode, &case.mode))
            .map(|case| self.run_case(case))
            .collect()
    }

    fn run_case(&self, case: &FixtureCase) -> VerificationResult {
        let expected = case.expected_output.to_string();
        let case_name = if case.mode.eq_ignore_ascii_case("both") {
            format!("{} [{}]", case.name, self.mode)
        } else {
            case.name.clone()
        };

        let before = global_healing_policy().snapshot();
        let (passed, actual) = match execute_fixture_case(&case.function, &case.inputs, &self.mode) {
            Ok(value) => (value == case.expected_output, value.to_string()),
            Err(err) => (false, format!("error:{err}")),
        };
        let diff = (!passed).then(|| diff::render_diff(&expected, &actual));
        let healing_action = healing_since(&before).map(|a| a.as_str().to_string());

        VerificationResult {
            case_name,
            function: case.function.clone(),
            passed,
            expected,
            actual,
            diff,
            healing_action,
        }
    }
}

/// Strongest action recorded since `before`; an upgrade outranks a safe default.
fn healing_since(before: &HealingSnapshot) -> Option<HealingAction> {
    let now = global_healing_policy().snapshot();
    if now.variant_upgrades > before.variant_upgrades {
        Some(HealingAction::UpgradeToSafeVariant)
    } else if now.safe_defaults > before.safe_defaults {
        Some(HealingAction::ReturnSafeDefault)
    } else {
        None
    }
}

fn mode_matches(active_mode: &str, case_mode: &str) -> bool {
    let active = active_mode.to_ascii_lowercase();
    let case = case_mode.to_ascii_lowercase();
    case == active || case == "both"
}
