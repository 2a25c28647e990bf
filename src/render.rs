//! Trajectory consumers.
//!
//! Three independent policies over the raw lazy sequence, each bounding
//! its own work:
//!
//! - [`log_points`]: natural log of every element with a zero-based step
//!   index, for magnitude-scaled plotting.
//! - [`listing`]: at most `display_limit` decimal strings, then a single
//!   truncation sentinel. Consumption stops at the limit; the rest of
//!   the trajectory is never computed.
//! - [`export_csv`]: the full `Step,Value` table streamed to a writer.
//!
//! `log_points` and `export_csv` walk the whole trajectory, so both
//! enforce the defensive step ceiling and surface a breach as the
//! distinct resource error — never as invalid input.

use std::io::Write;

use num_bigint::BigUint;
use num_traits::ToPrimitive;
use serde::Serialize;

use crate::diagnostics::HailstoneError;
use crate::sequence::Trajectory;

/// One plot point: zero-based step index and the natural log of the
/// trajectory value at that step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LogPoint {
    pub step: usize,
    pub ln: f64,
}

/// Natural-log series of the trajectory, computed in lockstep with
/// generation.
pub fn log_points(start: &BigUint, step_ceiling: usize) -> Result<Vec<LogPoint>, HailstoneError> {
    let mut points = Vec::new();
    for (step, value) in Trajectory::new(start.clone()).enumerate() {
        if step >= step_ceiling {
            return Err(ceiling_breach(step_ceiling));
        }
        points.push(LogPoint {
            step,
            ln: ln_big(&value),
        });
    }
    Ok(points)
}

/// Decimal rendering truncated at `display_limit` elements. When the
/// trajectory continues past the limit, exactly one sentinel string is
/// appended and no further elements are pulled.
pub fn listing(start: &BigUint, display_limit: usize) -> Vec<String> {
    let mut rendered = Vec::new();
    for (index, value) in Trajectory::new(start.clone()).enumerate() {
        if index >= display_limit {
            rendered.push(truncation_sentinel(display_limit));
            break;
        }
        rendered.push(value.to_string());
    }
    rendered
}

/// The marker appended to a truncated listing.
pub fn truncation_sentinel(display_limit: usize) -> String {
    format!("... (truncated at {display_limit} items)")
}

/// Streams the full trajectory as two-column CSV (`Step,Value`) and
/// returns the number of data rows written.
pub fn export_csv<W: Write>(
    start: &BigUint,
    step_ceiling: usize,
    writer: &mut W,
) -> Result<usize, HailstoneError> {
    writeln!(writer, "Step,Value")?;
    let mut rows = 0usize;
    for (step, value) in Trajectory::new(start.clone()).enumerate() {
        if step >= step_ceiling {
            return Err(ceiling_breach(step_ceiling));
        }
        writeln!(writer, "{step},{value}")?;
        rows += 1;
    }
    Ok(rows)
}

fn ceiling_breach(step_ceiling: usize) -> HailstoneError {
    HailstoneError::resource_exceeded(format!(
        "trajectory did not reach 1 within {step_ceiling} steps"
    ))
}

/// Natural log of a positive `BigUint`. Values representable as a finite
/// f64 take the direct path; anything larger is split into its top 64
/// bits plus a power-of-two shift, since ln(top << shift) is
/// ln(top) + shift * ln(2).
fn ln_big(value: &BigUint) -> f64 {
    match value.to_f64() {
        Some(f) if f.is_finite() && f > 0.0 => f.ln(),
        _ => {
            let shift = value.bits().saturating_sub(64);
            let top = (value >> shift).to_f64().unwrap_or(f64::MAX);
            top.ln() + shift as f64 * std::f64::consts::LN_2
        }
    }
}
