//! The schedule-deviation tolerance rule.
//!
//! A symmetric tolerance window (default 10 minutes) applies independently
//! to each side-delta of a day: early entry, late exit, late entry, early
//! exit.
//!
//! THE AUTHORITATIVE RULE — all-or-nothing, not an allowance:
//!
//! * deviation <= tolerance  => the side contributes **zero**;
//! * deviation >  tolerance  => the side contributes its **full** value,
//!   NOT the value minus the tolerance.
//!
//! So a 10-minute delay deducts nothing, while an 11-minute delay deducts
//! eleven minutes (not one). The same applies to the overtime sides: 10
//! extra minutes credit nothing, 11 extra minutes credit eleven. Every
//! deduction and credit in the normalizer flows through
//! [`apply_tolerance`]; nothing else may reimplement the comparison.

/// Applies the tolerance window to one side-delta, in minutes.
///
/// # Example
///
/// ```
/// use timecard_engine::calculation::apply_tolerance;
///
/// assert_eq!(apply_tolerance(9, 10), 0);   // forgiven
/// assert_eq!(apply_tolerance(10, 10), 0);  // still forgiven
/// assert_eq!(apply_tolerance(11, 10), 11); // counts in full
/// ```
pub fn apply_tolerance(delta_minutes: i64, tolerance_minutes: i64) -> i64 {
    if delta_minutes.abs() <= tolerance_minutes {
        0
    } else {
        delta_minutes
    }
}
