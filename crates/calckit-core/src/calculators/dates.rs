//! Calendar differences and ages
//!
//! A gap is decomposed by anchors rather than by dividing a day count:
//! whole years first, then whole months from the year anchor, then the
//! remaining days from the month anchor. Adding months clamps to the end of
//! shorter months, so Jan 31 + 1 month is the last day of February.

use chrono::{Local, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeResult {
    pub years: u32,
    /// 0..=11
    pub months: u32,
    /// Days left over after the month anchor, at most 30
    pub days: u32,
    pub total_days: i64,
    /// The end date preceded the start date; components describe the swapped range
    pub reversed: bool,
}

fn plural(n: impl Into<i64>, unit: &str) -> String {
    let n = n.into();
    if n == 1 {
        format!("{n} {unit}")
    } else {
        format!("{n} {unit}s")
    }
}

impl AgeResult {
    /// "Rex is 3 Years, 1 Month, 2 Days" or "Age: 3 Years, ..." without a name
    pub fn describe(&self, name: Option<&str>) -> String {
        match name.map(str::trim).filter(|n| !n.is_empty()) {
            Some(name) => format!("{name} is {}", self.components()),
            None => format!("Age: {}", self.components()),
        }
    }

    fn components(&self) -> String {
        format!(
            "{}, {}, {}",
            plural(self.years, "Year"),
            plural(self.months, "Month"),
            plural(self.days, "Day")
        )
    }
}

impl fmt::Display for AgeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} total)",
            self.components(),
            plural(self.total_days, "Day")
        )?;
        if self.reversed {
            write!(f, ", end date is before start date")?;
        }
        Ok(())
    }
}

fn add_months(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_add_months(Months::new(months))
        .unwrap_or(NaiveDate::MAX)
}

/// Largest `n` with `from + n months <= to`; requires `from <= to`
fn whole_months_between(from: NaiveDate, to: NaiveDate) -> u32 {
    use chrono::Datelike;

    let calendar = (to.year() - from.year()) * 12 + to.month() as i32 - from.month() as i32;
    let guess = calendar.max(0) as u32;
    if guess > 0 && add_months(from, guess) > to {
        guess - 1
    } else {
        guess
    }
}

/// Years, months and days between two dates, plus the total day count
pub fn date_difference(start: NaiveDate, end: NaiveDate) -> AgeResult {
    let (from, to, reversed) = if end < start {
        (end, start, true)
    } else {
        (start, end, false)
    };

    let years = whole_months_between(from, to) / 12;
    let month_anchor = add_months(from, years * 12);
    let months = whole_months_between(month_anchor, to);
    let day_anchor = add_months(month_anchor, months);

    AgeResult {
        years,
        months,
        days: (to - day_anchor).num_days() as u32,
        total_days: (to - from).num_days(),
        reversed,
    }
}

/// Age on `today` of someone born on `birth_date`; `None` for future birth dates
pub fn age_on(birth_date: NaiveDate, today: NaiveDate) -> Option<AgeResult> {
    if birth_date > today {
        return None;
    }
    Some(date_difference(birth_date, today))
}

/// Age as of the local calendar date
pub fn age_from_birth_date(birth_date: NaiveDate) -> Option<AgeResult> {
    age_on(birth_date, Local::now().date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_leap_year_difference() {
        let result = date_difference(date(2020, 1, 1), date(2021, 3, 15));
        assert_eq!(
            result,
            AgeResult {
                years: 1,
                months: 2,
                days: 14,
                total_days: 439,
                reversed: false,
            }
        );
    }

    #[test]
    fn test_same_day() {
        let result = date_difference(date(2024, 6, 1), date(2024, 6, 1));
        assert_eq!((result.years, result.months, result.days), (0, 0, 0));
        assert_eq!(result.total_days, 0);
    }

    #[test]
    fn test_month_end_clamping() {
        let result = date_difference(date(2021, 1, 31), date(2021, 3, 1));
        assert_eq!((result.years, result.months, result.days), (0, 1, 1));
        assert_eq!(result.total_days, 29);
    }

    #[test]
    fn test_leap_day_birthday() {
        let result = date_difference(date(2020, 2, 29), date(2021, 2, 28));
        assert_eq!((result.years, result.months, result.days), (1, 0, 0));
    }

    #[test]
    fn test_one_day_short_of_a_year() {
        let result = date_difference(date(2022, 5, 10), date(2023, 5, 9));
        assert_eq!((result.years, result.months, result.days), (0, 11, 29));
    }

    #[test]
    fn test_reversed_range() {
        let forward = date_difference(date(2020, 1, 1), date(2021, 3, 15));
        let backward = date_difference(date(2021, 3, 15), date(2020, 1, 1));
        assert!(backward.reversed);
        assert_eq!(
            (backward.years, backward.months, backward.days, backward.total_days),
            (forward.years, forward.months, forward.days, forward.total_days)
        );
    }

    #[test]
    fn test_age_on() {
        let age = age_on(date(1990, 8, 20), date(2024, 8, 19)).unwrap();
        assert_eq!(age.years, 33);
        assert_eq!(age.months, 11);
        assert!(age_on(date(2030, 1, 1), date(2024, 1, 1)).is_none());
    }

    #[test]
    fn test_descriptions() {
        let age = date_difference(date(2021, 1, 1), date(2024, 2, 2));
        assert_eq!(age.describe(Some("Rex")), "Rex is 3 Years, 1 Month, 1 Day");
        assert_eq!(age.describe(Some("  ")), "Age: 3 Years, 1 Month, 1 Day");
        assert_eq!(
            date_difference(date(2024, 1, 2), date(2024, 1, 1)).to_string(),
            "0 Years, 0 Months, 1 Day (1 Day total), end date is before start date"
        );
    }
}
