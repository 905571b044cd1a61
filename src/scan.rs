use crate::calendar;
use crate::config::ScanConfig;
use crate::contract::{Contract, ContractId};
use crate::error::InvalidArgument;
use chrono::{Days, NaiveDate};
use rayon::prelude::*;
use std::ops::RangeInclusive;
use tracing::{debug, warn};

/// Start dates whose `trigger_month`-th monthly period could begin on
/// `today`, newest first.
///
/// This is a coarse pre-filter: month-end truncation can shift the true
/// period start, so every hit still needs [`is_anniversary`].
pub fn candidate_start_dates(
    today: NaiveDate,
    trigger_month: u32,
    window_days: u32,
) -> Result<Vec<NaiveDate>, InvalidArgument> {
    let window = start_date_window(today, trigger_month, window_days)?;
    let reference = *window.end();
    (0..window_days)
        .map(|i| {
            reference
                .checked_sub_days(Days::new(u64::from(i)))
                .ok_or(InvalidArgument::OutOfRange(reference))
        })
        .collect()
}

fn start_date_window(
    today: NaiveDate,
    trigger_month: u32,
    window_days: u32,
) -> Result<RangeInclusive<NaiveDate>, InvalidArgument> {
    if trigger_month == 0 {
        return Err(InvalidArgument::ZeroTriggerMonth);
    }
    if window_days == 0 {
        return Err(InvalidArgument::ZeroWindow);
    }

    let reference = calendar::sub_months(today, trigger_month - 1)
        .ok_or(InvalidArgument::OutOfRange(today))?;
    let earliest = reference
        .checked_sub_days(Days::new(u64::from(window_days - 1)))
        .ok_or(InvalidArgument::OutOfRange(reference))?;

    debug!(%today, trigger_month, window_days, %earliest, %reference, "anniversary window");
    Ok(earliest..=reference)
}

/// Whether `contract`'s `trigger_month`-th monthly period starts on `today`.
///
/// Fails when the contract's stored dates do not form a valid period.
pub fn is_anniversary(
    contract: &Contract,
    today: NaiveDate,
    trigger_month: u32,
) -> Result<bool, InvalidArgument> {
    let period = contract.period().inspect_err(|err| {
        warn!(contract_id = contract.id, error = %err, "contract dates rejected");
    })?;
    Ok(period
        .monthly_periods()
        .iter()
        .any(|p| p.months == trigger_month && p.from == today))
}

/// Ids of the `candidates` entering month `trigger_month` of their term on
/// `today`, in candidate order.
pub fn find_anniversary_matches(
    today: NaiveDate,
    trigger_month: u32,
    window_days: u32,
    candidates: &[Contract],
) -> Result<Vec<ContractId>, InvalidArgument> {
    let window = start_date_window(today, trigger_month, window_days)?;

    let mut matches = Vec::new();
    for contract in candidates
        .iter()
        .filter(|c| window.contains(&c.start_date))
    {
        if is_anniversary(contract, today, trigger_month)? {
            matches.push(contract.id);
        }
    }

    debug!(candidates = candidates.len(), matches = matches.len(), "anniversary scan");
    Ok(matches)
}

/// Scanner bound to a validated [`ScanConfig`].
#[derive(Debug, Clone, Copy)]
pub struct AnniversaryScanner {
    config: ScanConfig,
}

impl AnniversaryScanner {
    pub fn new(config: ScanConfig) -> Result<Self, InvalidArgument> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    pub fn scan(
        &self,
        today: NaiveDate,
        candidates: &[Contract],
    ) -> Result<Vec<ContractId>, InvalidArgument> {
        find_anniversary_matches(
            today,
            self.config.trigger_month,
            self.config.window_days,
            candidates,
        )
    }

    /// Same result as [`scan`](Self::scan), evaluating contracts on the
    /// rayon pool.
    pub fn scan_par(
        &self,
        today: NaiveDate,
        candidates: &[Contract],
    ) -> Result<Vec<ContractId>, InvalidArgument> {
        let trigger_month = self.config.trigger_month;
        let window = start_date_window(today, trigger_month, self.config.window_days)?;

        let hits: Vec<Option<ContractId>> = candidates
            .par_iter()
            .filter(|c| window.contains(&c.start_date))
            .map(|c| is_anniversary(c, today, trigger_month).map(|hit| hit.then_some(c.id)))
            .collect::<Result<_, InvalidArgument>>()?;

        let matches: Vec<ContractId> = hits.into_iter().flatten().collect();
        debug!(candidates = candidates.len(), matches = matches.len(), "parallel anniversary scan");
        Ok(matches)
    }
}
