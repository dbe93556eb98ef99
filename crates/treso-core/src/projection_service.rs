//! Turns the flat movement list into the balance series rendered by the forecast view.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use treso_domain::{CashTransaction, ConfidenceStatus, DateWindow, TransactionKind};

use crate::CoreError;

pub const DEFAULT_HORIZON_DAYS: u32 = 30;
pub const DEFAULT_BUCKET_DAYS: u32 = 7;
/// Ten years. Longer horizons are rejected.
pub const MAX_HORIZON_DAYS: u32 = 3650;

/// Horizon and bucket width of a projection, both in days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProjectionSettings {
    pub horizon_days: u32,
    pub bucket_days: u32,
}

impl ProjectionSettings {
    pub fn new(horizon_days: u32, bucket_days: u32) -> Result<Self, CoreError> {
        let settings = Self {
            horizon_days,
            bucket_days,
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.horizon_days == 0 {
            return Err(CoreError::Validation(
                "projection horizon must be at least one day".into(),
            ));
        }
        if self.horizon_days > MAX_HORIZON_DAYS {
            return Err(CoreError::Validation(format!(
                "projection horizon must not exceed {MAX_HORIZON_DAYS} days"
            )));
        }
        if self.bucket_days == 0 {
            return Err(CoreError::Validation(
                "bucket width must be at least one day".into(),
            ));
        }
        Ok(())
    }
}

impl Default for ProjectionSettings {
    fn default() -> Self {
        Self {
            horizon_days: DEFAULT_HORIZON_DAYS,
            bucket_days: DEFAULT_BUCKET_DAYS,
        }
    }
}

/// Aggregated forecast movements for one time bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectionBucket {
    pub window: DateWindow,
    pub inflow: u64,
    pub outflow: u64,
    pub entry_count: usize,
    /// Balance after this bucket, carried from the previous bucket.
    pub running_balance: i64,
}

impl ProjectionBucket {
    pub fn net(&self) -> i64 {
        to_signed(self.inflow).saturating_sub(to_signed(self.outflow))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BalanceProjection {
    pub today: NaiveDate,
    pub window: DateWindow,
    /// Realized balance as of `today`; anchor of every bucket.
    pub baseline: i64,
    pub buckets: Vec<ProjectionBucket>,
    /// Forecast inflow, every confidence tier.
    pub total_inflow: u64,
    /// Forecast inflow already confirmed.
    pub confirmed_inflow: u64,
    /// Forecast outflow, every confidence tier.
    pub total_outflow: u64,
    pub projected_balance: i64,
    /// Pessimistic balance: only confirmed inflows are credited, every outflow is owed.
    pub minimum_balance: i64,
}

impl BalanceProjection {
    /// Lowest running balance across buckets, with the bucket where it occurs.
    pub fn lowest_point(&self) -> Option<&ProjectionBucket> {
        self.buckets.iter().min_by_key(|bucket| bucket.running_balance)
    }
}

/// Totals per (direction, category) for the report tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub kind: TransactionKind,
    pub category: String,
    pub amount: u64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusTotal {
    pub status: ConfidenceStatus,
    pub inflow: u64,
    pub outflow: u64,
    pub count: usize,
}

/// Sum of realized inflows minus realized outflows up to and including `as_of`.
pub fn realized_balance(entries: &[CashTransaction], as_of: NaiveDate) -> i64 {
    entries
        .iter()
        .filter(|entry| entry.is_realized(as_of))
        .fold(0i64, |acc, entry| acc.saturating_add(entry.signed_amount()))
}

pub struct ProjectionService;

impl ProjectionService {
    /// Builds the bucketed projection over `[today, today + horizon)`.
    ///
    /// Only forecast entries (not realized as of `today`) dated inside the window are
    /// projected; realized entries are already part of the baseline. Unrealized entries
    /// dated before `today` are left out.
    pub fn project(
        entries: &[CashTransaction],
        today: NaiveDate,
        settings: ProjectionSettings,
    ) -> Result<BalanceProjection, CoreError> {
        settings.validate()?;
        let window = DateWindow::starting_at(today, settings.horizon_days)?;
        let baseline = realized_balance(entries, today);
        let forecast: Vec<&CashTransaction> = entries
            .iter()
            .filter(|entry| !entry.is_realized(today) && window.contains(entry.date))
            .collect();

        let mut running = baseline;
        let mut buckets = Vec::new();
        for chunk in window.split(settings.bucket_days) {
            let mut bucket = ProjectionBucket {
                window: chunk,
                inflow: 0,
                outflow: 0,
                entry_count: 0,
                running_balance: running,
            };
            for entry in forecast.iter().filter(|entry| chunk.contains(entry.date)) {
                match entry.kind {
                    TransactionKind::Encaissement => {
                        bucket.inflow = bucket.inflow.saturating_add(entry.amount)
                    }
                    TransactionKind::Decaissement => {
                        bucket.outflow = bucket.outflow.saturating_add(entry.amount)
                    }
                }
                bucket.entry_count += 1;
            }
            running = running.saturating_add(bucket.net());
            bucket.running_balance = running;
            buckets.push(bucket);
        }

        let mut total_inflow = 0u64;
        let mut confirmed_inflow = 0u64;
        let mut total_outflow = 0u64;
        for entry in &forecast {
            match entry.kind {
                TransactionKind::Encaissement => {
                    total_inflow = total_inflow.saturating_add(entry.amount);
                    if entry.status == ConfidenceStatus::Confirmed {
                        confirmed_inflow = confirmed_inflow.saturating_add(entry.amount);
                    }
                }
                TransactionKind::Decaissement => {
                    total_outflow = total_outflow.saturating_add(entry.amount)
                }
            }
        }

        let projected_balance = baseline
            .saturating_add(to_signed(total_inflow))
            .saturating_sub(to_signed(total_outflow));
        let minimum_balance = baseline
            .saturating_add(to_signed(confirmed_inflow))
            .saturating_sub(to_signed(total_outflow));

        debug!(
            %today,
            horizon = settings.horizon_days,
            forecast_entries = forecast.len(),
            projected_balance,
            minimum_balance,
            "balance projection computed"
        );

        Ok(BalanceProjection {
            today,
            window,
            baseline,
            buckets,
            total_inflow,
            confirmed_inflow,
            total_outflow,
            projected_balance,
            minimum_balance,
        })
    }

    /// Totals per direction and category for every entry dated inside `window`,
    /// largest first.
    pub fn category_breakdown(entries: &[CashTransaction], window: DateWindow) -> Vec<CategoryTotal> {
        let mut totals: BTreeMap<(TransactionKind, String), (u64, usize)> = BTreeMap::new();
        for entry in entries.iter().filter(|entry| window.contains(entry.date)) {
            let slot = totals
                .entry((entry.kind, entry.category.clone()))
                .or_insert((0, 0));
            slot.0 = slot.0.saturating_add(entry.amount);
            slot.1 += 1;
        }
        let mut rows: Vec<CategoryTotal> = totals
            .into_iter()
            .map(|((kind, category), (amount, count))| CategoryTotal {
                kind,
                category,
                amount,
                count,
            })
            .collect();
        rows.sort_by(|a, b| b.amount.cmp(&a.amount));
        rows
    }

    /// Forecast totals per confidence tier for entries inside `window` not realized as of
    /// `today`. Every tier is listed, empty ones included.
    pub fn status_breakdown(
        entries: &[CashTransaction],
        window: DateWindow,
        today: NaiveDate,
    ) -> Vec<StatusTotal> {
        ConfidenceStatus::ALL
            .iter()
            .map(|status| {
                let mut row = StatusTotal {
                    status: *status,
                    inflow: 0,
                    outflow: 0,
                    count: 0,
                };
                for entry in entries.iter().filter(|entry| {
                    entry.status == *status
                        && window.contains(entry.date)
                        && !entry.is_realized(today)
                }) {
                    match entry.kind {
                        TransactionKind::Encaissement => {
                            row.inflow = row.inflow.saturating_add(entry.amount)
                        }
                        TransactionKind::Decaissement => {
                            row.outflow = row.outflow.saturating_add(entry.amount)
                        }
                    }
                    row.count += 1;
                }
                row
            })
            .collect()
    }
}

fn to_signed(amount: u64) -> i64 {
    i64::try_from(amount).unwrap_or(i64::MAX)
}
