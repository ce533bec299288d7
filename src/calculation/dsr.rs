//! Weekly-rest (DSR) forfeiture under Law 605/49, strict mode.
//!
//! The period is partitioned into weeks and a week forfeits its paid rest
//! day when at least one unjustified absence falls inside it. Several
//! absences in one week still forfeit only that week's single rest day.
//! The forfeiture is additional to the per-day deduction already applied in
//! labor cost, so one absence has a two-day monetary impact.

use chrono::{Datelike, Days, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::WeekStart;
use crate::models::Period;

/// One week of the assessment breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DsrWeek {
    /// Week start, clamped to the period.
    pub start: NaiveDate,
    /// Week end, clamped to the period.
    pub end: NaiveDate,
    /// Unjustified absences that fell inside this week.
    pub absences_in_week: u32,
    /// Whether the week's rest day was forfeited.
    pub forfeited: bool,
    /// The absence dates.
    pub dates: Vec<NaiveDate>,
}

/// The full DSR assessment for a period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DsrAssessment {
    /// Number of weeks whose rest day was forfeited.
    pub forfeited_weeks: u32,
    /// `salary / 30` per forfeited week, full precision.
    pub forfeiture_amount: Decimal,
    /// Per-week breakdown in chronological order.
    pub weeks: Vec<DsrWeek>,
}

/// Assesses DSR forfeiture for the period.
///
/// Weeks run Sunday through Saturday by default (CLT art. 67 reading);
/// Monday-start is configurable. Weeks at the edges are clamped to the
/// period, and absence dates outside the period are ignored.
///
/// # Example
///
/// ```
/// use timecard_engine::calculation::assess_dsr;
/// use timecard_engine::config::WeekStart;
/// use timecard_engine::models::Period;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let period = Period {
///     start_date: NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2026, 6, 30).unwrap(),
/// };
/// let absences = vec![NaiveDate::from_ymd_opt(2026, 6, 10).unwrap()];
/// let assessment = assess_dsr(Decimal::from(3500), &absences, &period, WeekStart::Sunday);
/// assert_eq!(assessment.forfeited_weeks, 1);
/// ```
pub fn assess_dsr(
    salary: Decimal,
    absence_dates: &[NaiveDate],
    period: &Period,
    week_start: WeekStart,
) -> DsrAssessment {
    let daily_rate = salary / Decimal::from(30);

    let mut weeks = Vec::new();
    let mut forfeited_weeks = 0u32;

    let mut cursor = align_to_week_start(period.start_date, week_start);
    while cursor <= period.end_date {
        let week_end = cursor
            .checked_add_days(Days::new(6))
            .unwrap_or(period.end_date);

        let start = cursor.max(period.start_date);
        let end = week_end.min(period.end_date);

        let mut dates: Vec<NaiveDate> = absence_dates
            .iter()
            .copied()
            .filter(|d| *d >= start && *d <= end)
            .collect();
        dates.sort_unstable();
        dates.dedup();

        let forfeited = !dates.is_empty();
        if forfeited {
            forfeited_weeks += 1;
        }

        weeks.push(DsrWeek {
            start,
            end,
            absences_in_week: dates.len() as u32,
            forfeited,
            dates,
        });

        cursor = match week_end.checked_add_days(Days::new(1)) {
            Some(next) => next,
            None => break,
        };
    }

    DsrAssessment {
        forfeited_weeks,
        forfeiture_amount: daily_rate * Decimal::from(forfeited_weeks),
        weeks,
    }
}

/// Walks back from a date to the configured week start.
fn align_to_week_start(date: NaiveDate, week_start: WeekStart) -> NaiveDate {
    let back = match week_start {
        WeekStart::Sunday => date.weekday().num_days_from_sunday(),
        WeekStart::Monday => date.weekday().num_days_from_monday(),
    };
    date.checked_sub_days(Days::new(u64::from(back))).unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 6, d).unwrap()
    }

    fn june_2026() -> Period {
        Period {
            start_date: date(1),
            end_date: date(30),
        }
    }

    #[test]
    fn test_no_absences_no_forfeiture() {
        let assessment = assess_dsr(dec("3500"), &[], &june_2026(), WeekStart::Sunday);
        assert_eq!(assessment.forfeited_weeks, 0);
        assert_eq!(assessment.forfeiture_amount, Decimal::ZERO);
        assert!(assessment.weeks.iter().all(|w| !w.forfeited));
    }

    #[test]
    fn test_one_absence_forfeits_one_week() {
        let assessment = assess_dsr(
            dec("3500"),
            &[date(10)],
            &june_2026(),
            WeekStart::Sunday,
        );
        assert_eq!(assessment.forfeited_weeks, 1);
        assert_eq!(assessment.forfeiture_amount, dec("3500") / dec("30"));

        let forfeited: Vec<&DsrWeek> =
            assessment.weeks.iter().filter(|w| w.forfeited).collect();
        assert_eq!(forfeited.len(), 1);
        // June 10 2026 is a Wednesday; its Sunday-start week is Jun 7-13.
        assert_eq!(forfeited[0].start, date(7));
        assert_eq!(forfeited[0].end, date(13));
        assert_eq!(forfeited[0].dates, vec![date(10)]);
    }

    #[test]
    fn test_multiple_absences_same_week_forfeit_once() {
        let assessment = assess_dsr(
            dec("3500"),
            &[date(8), date(9), date(10)],
            &june_2026(),
            WeekStart::Sunday,
        );
        assert_eq!(assessment.forfeited_weeks, 1);
        assert_eq!(assessment.forfeiture_amount, dec("3500") / dec("30"));
        let week = assessment.weeks.iter().find(|w| w.forfeited).unwrap();
        assert_eq!(week.absences_in_week, 3);
    }

    #[test]
    fn test_four_absences_across_three_weeks_forfeit_three() {
        // Weeks of Jun 1, Jun 8 (x2) and Jun 22.
        let assessment = assess_dsr(
            dec("3500"),
            &[date(2), date(9), date(11), date(24)],
            &june_2026(),
            WeekStart::Sunday,
        );
        assert_eq!(assessment.forfeited_weeks, 3);
        assert_eq!(
            assessment.forfeiture_amount,
            dec("3500") / dec("30") * dec("3")
        );
    }

    #[test]
    fn test_weeks_are_clamped_to_period() {
        let assessment = assess_dsr(dec("3500"), &[], &june_2026(), WeekStart::Sunday);
        let first = assessment.weeks.first().unwrap();
        let last = assessment.weeks.last().unwrap();
        // June 1 2026 is a Monday, so the first clamped week is Jun 1-6.
        assert_eq!(first.start, date(1));
        assert_eq!(first.end, date(6));
        assert_eq!(last.end, date(30));
    }

    #[test]
    fn test_partition_covers_period_without_overlap() {
        for week_start in [WeekStart::Sunday, WeekStart::Monday] {
            let assessment = assess_dsr(dec("3500"), &[], &june_2026(), week_start);
            let mut expected = date(1);
            for week in &assessment.weeks {
                assert_eq!(week.start, expected, "{:?}", week_start);
                expected = week.end.checked_add_days(Days::new(1)).unwrap();
            }
            assert_eq!(expected, date(30).checked_add_days(Days::new(1)).unwrap());
        }
    }

    #[test]
    fn test_monday_start_weeks() {
        // With Monday-start weeks, Jun 7 (a Sunday) belongs to the week of
        // Jun 1-7 rather than opening a new one.
        let assessment = assess_dsr(
            dec("3500"),
            &[date(7)],
            &june_2026(),
            WeekStart::Monday,
        );
        let week = assessment.weeks.iter().find(|w| w.forfeited).unwrap();
        assert_eq!(week.start, date(1));
        assert_eq!(week.end, date(7));
    }

    #[test]
    fn test_absences_outside_period_ignored() {
        let outside = NaiveDate::from_ymd_opt(2026, 5, 28).unwrap();
        let assessment = assess_dsr(dec("3500"), &[outside], &june_2026(), WeekStart::Sunday);
        assert_eq!(assessment.forfeited_weeks, 0);
    }
}
