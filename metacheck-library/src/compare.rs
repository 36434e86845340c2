//! Comparison rules applied to each extracted field.

use metacheck_core::reference::parse_millis;

/// Result of comparing one extracted value with its reference value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// Perfect match
    Exact,
    /// Duration differs, but by less than the tolerance
    WithinTolerance { delta_ms: u64 },
    /// Mismatch, with a description of the difference
    Mismatch(String),
}

impl CheckOutcome {
    pub fn is_ok(&self) -> bool {
        !matches!(self, CheckOutcome::Mismatch(_))
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            CheckOutcome::Mismatch(msg) => Some(msg),
            _ => None,
        }
    }
}

/// Case-sensitive equality, where two absent values also match
pub fn compare_exact(expected: Option<&str>, actual: Option<&str>) -> CheckOutcome {
    match (expected, actual) {
        (Some(e), Some(a)) if e == a => CheckOutcome::Exact,
        (None, None) => CheckOutcome::Exact,
        (Some(e), Some(a)) => CheckOutcome::Mismatch(format!("expected {e:?}, got {a:?}")),
        (Some(e), None) => CheckOutcome::Mismatch(format!("expected {e:?}, value missing")),
        (None, Some(a)) => CheckOutcome::Mismatch(format!("expected no value, got {a:?}")),
    }
}

/// Millisecond durations match when they differ by strictly less than
/// `tolerance_ms`
pub fn compare_duration(
    expected: Option<&str>,
    actual: Option<&str>,
    tolerance_ms: u64,
) -> CheckOutcome {
    let (expected, actual) = match (expected, actual) {
        (Some(e), Some(a)) => (e, a),
        (None, None) => return CheckOutcome::Exact,
        (Some(e), None) => {
            return CheckOutcome::Mismatch(format!("expected {e}ms, duration missing"));
        }
        (None, Some(a)) => {
            return CheckOutcome::Mismatch(format!("expected no duration, got {a:?}"));
        }
    };

    let Some(expected_ms) = parse_millis(expected) else {
        return CheckOutcome::Mismatch(format!("reference duration {expected:?} is not an integer"));
    };
    let Some(actual_ms) = parse_millis(actual) else {
        return CheckOutcome::Mismatch(format!("extracted duration {actual:?} is not an integer"));
    };

    let delta_ms = expected_ms.abs_diff(actual_ms);
    if delta_ms == 0 {
        CheckOutcome::Exact
    } else if delta_ms < tolerance_ms {
        CheckOutcome::WithinTolerance { delta_ms }
    } else {
        CheckOutcome::Mismatch(format!(
            "duration differs by {delta_ms}ms (tolerance {tolerance_ms}ms)"
        ))
    }
}
