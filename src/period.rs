use crate::calendar;
use crate::error::InvalidArgument;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// One contiguous, inclusive sub-interval of a [`Period`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MonthlyPeriod {
    /// 1-based month index within the owning period.
    pub months: u32,
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl MonthlyPeriod {
    pub fn new(months: u32, from: NaiveDate, to: NaiveDate) -> Self {
        Self { months, from, to }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }

    pub fn num_days(&self) -> i64 {
        (self.to - self.from).num_days() + 1
    }
}

/// How far a [`Period`] extends past its start date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Span {
    /// A fixed number of monthly periods.
    Months(u32),
    /// Up to and including an end date that must sit on a monthly boundary.
    Until(NaiveDate),
}

/// Picks the inclusive end of a monthly period from its index and start.
///
/// Chosen once per [`Period`] and applied to every month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EndRule {
    /// By count: end the day before the next monthly boundary of `anchor`.
    Boundary { anchor: NaiveDate },
    /// By range, anchor on the 1st: each period is a whole calendar month.
    WholeMonth,
    /// By range, anchor on the 2nd..=28th: the day exists in every month.
    SameDay,
    /// By range, anchor on the 29th..=31st: end on the range end's day,
    /// truncated to the month's last day. A truncated month makes the next
    /// period start on the 1st.
    MonthEnd { end_day: u32 },
}

impl EndRule {
    fn for_range(from: NaiveDate, to: NaiveDate) -> Self {
        match from.day() {
            1 => EndRule::WholeMonth,
            2..=28 => EndRule::SameDay,
            _ => EndRule::MonthEnd { end_day: to.day() },
        }
    }

    fn period_end(self, months: u32, from: NaiveDate) -> Option<NaiveDate> {
        match self {
            EndRule::Boundary { anchor } => calendar::month_boundary(anchor, months)?.pred_opt(),
            EndRule::WholeMonth => calendar::last_day_of_month(from),
            EndRule::SameDay => calendar::add_months(from, 1)?.pred_opt(),
            EndRule::MonthEnd { end_day } => {
                let month = if from.day() == 1 {
                    from
                } else {
                    calendar::add_months(from, 1)?
                };
                month.with_day(end_day.min(calendar::days_in_month(month)))
            }
        }
    }
}

/// A contract term split into consecutive monthly periods.
///
/// The monthly periods are computed once at construction and never change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Period {
    from: NaiveDate,
    number_of_months: u32,
    monthly_periods: Vec<MonthlyPeriod>,
}

impl Period {
    pub fn new(from: NaiveDate, span: Span) -> Result<Self, InvalidArgument> {
        let (number_of_months, rule) = match span {
            Span::Months(0) => return Err(InvalidArgument::ZeroMonths),
            Span::Months(count) => (count, EndRule::Boundary { anchor: from }),
            Span::Until(to) => (Self::months_until(from, to)?, EndRule::for_range(from, to)),
        };

        let monthly_periods = Self::segment(from, number_of_months, rule)?;

        if let Span::Until(to) = span {
            if monthly_periods.last().map(|p| p.to) != Some(to) {
                return Err(InvalidArgument::MisalignedRange { from, to });
            }
        }

        Ok(Self {
            from,
            number_of_months,
            monthly_periods,
        })
    }

    pub fn by_count(from: NaiveDate, number_of_months: u32) -> Result<Self, InvalidArgument> {
        Self::new(from, Span::Months(number_of_months))
    }

    pub fn by_range(from: NaiveDate, to: NaiveDate) -> Result<Self, InvalidArgument> {
        Self::new(from, Span::Until(to))
    }

    pub fn from(&self) -> NaiveDate {
        self.from
    }

    /// Inclusive end of the last monthly period.
    pub fn to(&self) -> NaiveDate {
        self.monthly_periods
            .last()
            .map(|p| p.to)
            .unwrap_or(self.from)
    }

    pub fn number_of_months(&self) -> u32 {
        self.number_of_months
    }

    pub fn monthly_periods(&self) -> &[MonthlyPeriod] {
        &self.monthly_periods
    }

    /// The monthly period with 1-based index `months`.
    pub fn month(&self, months: u32) -> Option<&MonthlyPeriod> {
        let idx = usize::try_from(months.checked_sub(1)?).ok()?;
        self.monthly_periods.get(idx)
    }

    pub fn month_containing(&self, date: NaiveDate) -> Option<&MonthlyPeriod> {
        let idx = self
            .monthly_periods
            .partition_point(|p| p.to < date);
        self.monthly_periods.get(idx).filter(|p| p.contains(date))
    }

    /// Month count for a by-range period, after checking that `to` sits on
    /// a monthly boundary of `from`.
    fn months_until(from: NaiveDate, to: NaiveDate) -> Result<u32, InvalidArgument> {
        if to < from {
            return Err(InvalidArgument::EndBeforeStart { from, to });
        }
        let next = to.succ_opt().ok_or(InvalidArgument::OutOfRange(to))?;
        let on_anchor = from.day() == next.day();
        let truncated = next.day() == 1 && from.day() > to.day();
        if !(on_anchor || truncated) {
            return Err(InvalidArgument::MisalignedRange { from, to });
        }

        let months = calendar::whole_months_between(from, to) + 1;
        u32::try_from(months).map_err(|_| InvalidArgument::OutOfRange(to))
    }

    fn segment(
        from: NaiveDate,
        count: u32,
        rule: EndRule,
    ) -> Result<Vec<MonthlyPeriod>, InvalidArgument> {
        let mut periods = Vec::with_capacity(count as usize);
        let mut start = from;

        for months in 1..=count {
            let end = rule
                .period_end(months, start)
                .ok_or(InvalidArgument::OutOfRange(start))?;
            trace!(months, %start, %end, "monthly period");
            periods.push(MonthlyPeriod::new(months, start, end));
            if months < count {
                start = end.succ_opt().ok_or(InvalidArgument::OutOfRange(end))?;
            }
        }

        Ok(periods)
    }
}

/// Loosely-typed period request, as it arrives from JSON or a form.
///
/// Exactly one of `number_of_months` and `to` must be given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodRequest {
    #[serde(default)]
    pub from: Option<NaiveDate>,
    #[serde(default)]
    pub number_of_months: Option<u32>,
    #[serde(default)]
    pub to: Option<NaiveDate>,
}

impl PeriodRequest {
    pub fn span(&self) -> Result<Span, InvalidArgument> {
        match (self.number_of_months, self.to) {
            (Some(count), None) => Ok(Span::Months(count)),
            (None, Some(to)) => Ok(Span::Until(to)),
            (Some(_), Some(_)) => Err(InvalidArgument::ConflictingFields("number_of_months", "to")),
            (None, None) => Err(InvalidArgument::MissingField("number_of_months")),
        }
    }

    pub fn into_period(self) -> Result<Period, InvalidArgument> {
        let from = self.from.ok_or(InvalidArgument::MissingField("from"))?;
        Period::new(from, self.span()?)
    }
}
