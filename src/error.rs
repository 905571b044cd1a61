use chrono::NaiveDate;
use std::fmt;

/// Rejection of caller-supplied data.
///
/// Every variant is a caller bug or corrupt input; nothing here is
/// transient, so callers should surface it rather than retry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidArgument {
    MissingField(&'static str),
    ConflictingFields(&'static str, &'static str),
    ZeroMonths,
    EndBeforeStart {
        from: NaiveDate,
        to: NaiveDate,
    },
    /// The day after `to` is neither the anchor day of `from` nor the
    /// first of a month too short to hold it.
    MisalignedRange {
        from: NaiveDate,
        to: NaiveDate,
    },
    ZeroTriggerMonth,
    ZeroWindow,
    OutOfRange(NaiveDate),
}

impl fmt::Display for InvalidArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidArgument::MissingField(field) => write!(f, "[{field}] is required."),
            InvalidArgument::ConflictingFields(a, b) => {
                write!(f, "[{a}] and [{b}] cannot both be given.")
            }
            InvalidArgument::ZeroMonths => write!(f, "[number_of_months] must be at least 1."),
            InvalidArgument::EndBeforeStart { from, to } => {
                write!(f, "period end {to} is before period start {from}")
            }
            InvalidArgument::MisalignedRange { from, to } => write!(
                f,
                "period {from} to {to} does not end on a monthly boundary of {from}"
            ),
            InvalidArgument::ZeroTriggerMonth => write!(f, "[trigger_month] must be at least 1."),
            InvalidArgument::ZeroWindow => write!(f, "[window_days] must be at least 1."),
            InvalidArgument::OutOfRange(date) => {
                write!(f, "calendar arithmetic from {date} leaves the supported date range")
            }
        }
    }
}

impl std::error::Error for InvalidArgument {}
