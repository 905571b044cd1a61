use chrono::NaiveDate;
use contract_periods::calendar::{
    add_months, days_in_month, first_of_next_month, last_day_of_month, month_boundary, sub_months,
    whole_months_between,
};

fn d(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn add_months_clamps_to_short_month() {
    assert_eq!(add_months(d(2021, 1, 31), 1), Some(d(2021, 2, 28)));
    assert_eq!(add_months(d(2020, 1, 31), 1), Some(d(2020, 2, 29)));
    assert_eq!(add_months(d(2021, 1, 15), 13), Some(d(2022, 2, 15)));
}

#[test]
fn sub_months_clamps_to_short_month() {
    // 2022-03-29 minus 13 months has no Feb 29th to land on.
    assert_eq!(sub_months(d(2022, 3, 29), 13), Some(d(2021, 2, 28)));
    assert_eq!(sub_months(d(2022, 3, 1), 13), Some(d(2021, 2, 1)));
}

#[test]
fn month_lengths_follow_leap_years() {
    assert_eq!(days_in_month(d(2020, 2, 10)), 29);
    assert_eq!(days_in_month(d(2021, 2, 10)), 28);
    assert_eq!(days_in_month(d(1900, 2, 1)), 28);
    assert_eq!(days_in_month(d(2000, 2, 1)), 29);
    assert_eq!(days_in_month(d(2021, 4, 30)), 30);
    assert_eq!(days_in_month(d(2021, 12, 31)), 31);
}

#[test]
fn month_edges() {
    assert_eq!(last_day_of_month(d(2020, 2, 1)), Some(d(2020, 2, 29)));
    assert_eq!(first_of_next_month(d(2021, 12, 15)), Some(d(2022, 1, 1)));
}

#[test]
fn boundary_skips_to_first_of_next_month_instead_of_clamping() {
    let anchor = d(2021, 7, 31);
    assert_eq!(month_boundary(anchor, 0), Some(anchor));
    assert_eq!(month_boundary(anchor, 1), Some(d(2021, 8, 31)));
    assert_eq!(month_boundary(anchor, 2), Some(d(2021, 10, 1)));
    assert_eq!(month_boundary(anchor, 3), Some(d(2021, 10, 31)));
    assert_eq!(month_boundary(anchor, 7), Some(d(2022, 3, 1)));
}

#[test]
fn whole_months_only_count_completed_months() {
    assert_eq!(whole_months_between(d(2021, 1, 31), d(2021, 4, 30)), 2);
    assert_eq!(whole_months_between(d(2021, 1, 28), d(2024, 1, 27)), 35);
    assert_eq!(whole_months_between(d(2021, 2, 1), d(2024, 1, 31)), 35);
    assert_eq!(whole_months_between(d(2020, 1, 15), d(2020, 1, 20)), 0);
    assert_eq!(whole_months_between(d(2021, 3, 15), d(2021, 1, 20)), -1);
}
