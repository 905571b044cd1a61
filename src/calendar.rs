use chrono::{Datelike, Months, NaiveDate};

/// Add `n` calendar months, clamping to the last day of the target month
/// when it is shorter than `date`'s day-of-month.
pub fn add_months(date: NaiveDate, n: u32) -> Option<NaiveDate> {
    date.checked_add_months(Months::new(n))
}

/// Subtract `n` calendar months with the same clamping as [`add_months`].
pub fn sub_months(date: NaiveDate, n: u32) -> Option<NaiveDate> {
    date.checked_sub_months(Months::new(n))
}

/// First day of the month following `date`.
pub fn first_of_next_month(date: NaiveDate) -> Option<NaiveDate> {
    date.with_day(1)?.checked_add_months(Months::new(1))
}

/// Number of days in the month containing `date`.
pub fn days_in_month(date: NaiveDate) -> u32 {
    u32::from(date.num_days_in_month())
}

pub fn last_day_of_month(date: NaiveDate) -> Option<NaiveDate> {
    date.with_day(days_in_month(date))
}

/// The `i`-th monthly anchor of `anchor`, used to segment by-count periods.
///
/// When the target month is too short to hold the anchor day the boundary
/// moves to the first day of the following month instead of clamping.
pub fn month_boundary(anchor: NaiveDate, i: u32) -> Option<NaiveDate> {
    let candidate = add_months(anchor, i)?;
    if anchor.day() <= days_in_month(candidate) {
        Some(candidate)
    } else {
        first_of_next_month(candidate)
    }
}

/// Whole calendar months from `start` to `end`.
///
/// A month only counts once `end`'s day-of-month reaches `start`'s, so
/// 2021-01-31 to 2021-04-30 is two months. Negative spans count toward zero.
pub fn whole_months_between(start: NaiveDate, end: NaiveDate) -> i64 {
    let start_month = i64::from(start.year()) * 12 + i64::from(start.month0());
    let end_month = i64::from(end.year()) * 12 + i64::from(end.month0());
    let mut months = end_month - start_month;
    if months > 0 && end.day() < start.day() {
        months -= 1;
    } else if months < 0 && end.day() > start.day() {
        months += 1;
    }
    months
}
