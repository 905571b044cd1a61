use chrono::{Datelike, NaiveDate};
use contract_periods::calendar::{month_boundary, whole_months_between};
use contract_periods::Period;
use proptest::prelude::*;

fn any_date() -> impl Strategy<Value = NaiveDate> {
    (1990i32..2060, 1u32..=12, 1u32..=31).prop_filter_map("valid civil date", |(y, m, d)| {
        NaiveDate::from_ymd_opt(y, m, d)
    })
}

proptest! {
    #[test]
    fn by_count_periods_are_contiguous(from in any_date(), count in 1u32..72) {
        let period = Period::by_count(from, count).unwrap();
        let periods = period.monthly_periods();

        prop_assert_eq!(periods.len() as u32, count);
        prop_assert_eq!(periods[0].from, from);
        for pair in periods.windows(2) {
            prop_assert!(pair[0].from <= pair[0].to);
            prop_assert_eq!(pair[0].to.succ_opt(), Some(pair[1].from));
            prop_assert_eq!(pair[0].months + 1, pair[1].months);
        }
    }

    #[test]
    fn by_count_periods_start_on_month_boundaries(from in any_date(), count in 1u32..72) {
        let period = Period::by_count(from, count).unwrap();
        for (i, p) in period.monthly_periods().iter().enumerate() {
            prop_assert_eq!(Some(p.from), month_boundary(from, i as u32));
        }
        let next = month_boundary(from, count).unwrap();
        prop_assert_eq!(period.to().succ_opt(), Some(next));
    }

    #[test]
    fn by_range_covers_the_by_count_term(from in any_date(), count in 1u32..72) {
        let by_count = Period::by_count(from, count).unwrap();
        let to = by_count.to();
        let by_range = Period::by_range(from, to).unwrap();

        prop_assert_eq!(by_range.number_of_months(), count);
        prop_assert_eq!(
            by_range.number_of_months() as i64,
            whole_months_between(from, to) + 1
        );
        prop_assert_eq!(by_range.monthly_periods()[0].from, from);
        prop_assert_eq!(by_range.to(), to);
        for pair in by_range.monthly_periods().windows(2) {
            prop_assert!(pair[0].from <= pair[0].to);
            prop_assert_eq!(pair[0].to.succ_opt(), Some(pair[1].from));
        }

        // Only a truncated end day changes the end rule for 29th..31st anchors.
        if from.day() <= 28 || to.day() + 1 == from.day() {
            prop_assert_eq!(&by_range, &by_count);
        }
    }

    #[test]
    fn period_starts_keep_anchor_or_first_of_month(from in any_date(), count in 1u32..72) {
        let period = Period::by_count(from, count).unwrap();
        for p in period.monthly_periods() {
            prop_assert!(p.from.day() == from.day() || p.from.day() == 1);
        }
    }

    #[test]
    fn construction_is_idempotent(from in any_date(), count in 1u32..72) {
        prop_assert_eq!(Period::by_count(from, count), Period::by_count(from, count));
    }
}
