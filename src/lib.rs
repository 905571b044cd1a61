pub mod calendar;
pub mod config;
pub mod contract;
pub mod error;
pub mod period;
pub mod scan;

pub use config::{ConfigError, ScanConfig};
pub use contract::{Contract, ContractId};
pub use error::InvalidArgument;
pub use period::{MonthlyPeriod, Period, PeriodRequest, Span};
pub use scan::{AnniversaryScanner, candidate_start_dates, find_anniversary_matches, is_anniversary};
