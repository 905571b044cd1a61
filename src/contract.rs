use crate::error::InvalidArgument;
use crate::period::Period;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub type ContractId = i64;

/// A contract as supplied by the caller's data source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contract {
    pub id: ContractId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl Contract {
    pub fn new(id: ContractId, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            id,
            start_date,
            end_date,
        }
    }

    /// Monthly breakdown of the contract term.
    pub fn period(&self) -> Result<Period, InvalidArgument> {
        Period::by_range(self.start_date, self.end_date)
    }
}
