//! Pipeline orchestration.
//!
//! [`Explorer`] wires the evaluator, the trajectory generator, and the
//! renderers behind one configured entry point, which is what the CLI
//! and integration tests drive. Each request is a single synchronous
//! parse → evaluate → generate run; there is no shared mutable state
//! between runs.

use std::io::Write;

use num_bigint::BigUint;
use serde::Deserialize;

use crate::diagnostics::HailstoneError;
use crate::eval;
use crate::render::{self, LogPoint};
use crate::sequence::Trajectory;

/// Process-wide tunables. All fields have serde defaults so a partial
/// JSON config file overrides only what it names.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Limits {
    /// Maximum estimated decimal digits an exponentiation may produce.
    pub digit_budget: u32,
    /// Maximum trajectory elements rendered by the truncated listing.
    pub display_limit: usize,
    /// Defensive cap on trajectory length for full-sequence consumers.
    pub step_ceiling: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            digit_budget: 10_000,
            display_limit: 10_000,
            step_ceiling: 10_000_000,
        }
    }
}

/// Sequence statistics reported by [`Explorer::summary`].
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    /// Number of steps taken to reach 1, i.e. sequence length excluding
    /// the starting value.
    pub steps: usize,
    /// Largest value visited along the trajectory.
    pub peak: BigUint,
}

/// The configured parse → evaluate → generate pipeline.
#[derive(Debug, Clone, Default)]
pub struct Explorer {
    limits: Limits,
}

impl Explorer {
    pub fn new(limits: Limits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Evaluates a free-form numeric string into a validated positive
    /// integer under the configured digit budget.
    pub fn evaluate(&self, text: &str) -> Result<BigUint, HailstoneError> {
        eval::evaluate(text, self.limits.digit_budget)
    }

    /// Natural-log plot series for a validated start value.
    pub fn log_points(&self, start: &BigUint) -> Result<Vec<LogPoint>, HailstoneError> {
        render::log_points(start, self.limits.step_ceiling)
    }

    /// Truncated decimal listing for a validated start value.
    pub fn listing(&self, start: &BigUint) -> Vec<String> {
        render::listing(start, self.limits.display_limit)
    }

    /// Full CSV export for a validated start value.
    pub fn export_csv<W: Write>(
        &self,
        start: &BigUint,
        writer: &mut W,
    ) -> Result<usize, HailstoneError> {
        render::export_csv(start, self.limits.step_ceiling, writer)
    }

    /// Walks the trajectory once, counting steps and tracking the peak.
    pub fn summary(&self, start: &BigUint) -> Result<Summary, HailstoneError> {
        let mut peak = start.clone();
        let mut count = 0usize;
        for (index, value) in Trajectory::new(start.clone()).enumerate() {
            if index >= self.limits.step_ceiling {
                return Err(HailstoneError::resource_exceeded(format!(
                    "trajectory did not reach 1 within {} steps",
                    self.limits.step_ceiling
                )));
            }
            if value > peak {
                peak = value;
            }
            count = index + 1;
        }
        Ok(Summary {
            steps: count.saturating_sub(1),
            peak,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_limits_match_the_documented_tunables() {
        let limits = Limits::default();
        assert_eq!(limits.digit_budget, 10_000);
        assert_eq!(limits.display_limit, 10_000);
        assert_eq!(limits.step_ceiling, 10_000_000);
    }

    #[test]
    fn partial_config_overrides_only_named_fields() {
        let limits: Limits = serde_json::from_str(r#"{ "digit_budget": 50 }"#).unwrap();
        assert_eq!(limits.digit_budget, 50);
        assert_eq!(limits.display_limit, 10_000);
    }

    #[test]
    fn unknown_config_fields_are_rejected() {
        assert!(serde_json::from_str::<Limits>(r#"{ "digit_buget": 50 }"#).is_err());
    }

    #[test]
    fn end_to_end_pipeline_for_27() {
        let explorer = Explorer::default();
        let n = explorer.evaluate("27").unwrap();
        let summary = explorer.summary(&n).unwrap();
        assert_eq!(summary.steps, 111);
        assert_eq!(summary.peak, BigUint::from(9232u32));

        let points = explorer.log_points(&n).unwrap();
        assert_eq!(points.len(), 112);

        let listing = explorer.listing(&n);
        assert_eq!(listing.len(), 112); // under the display limit, no sentinel
    }

    #[test]
    fn tight_budget_rejects_what_default_accepts() {
        let explorer = Explorer::new(Limits {
            digit_budget: 10,
            ..Limits::default()
        });
        assert!(explorer.evaluate("10^25").is_err());
        assert!(Explorer::default().evaluate("10^25").is_ok());
    }

    #[test]
    fn tight_ceiling_surfaces_resource_error() {
        let explorer = Explorer::new(Limits {
            step_ceiling: 10,
            ..Limits::default()
        });
        let n = explorer.evaluate("27").unwrap();
        assert!(explorer.summary(&n).is_err());
    }
}
