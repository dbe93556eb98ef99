//! Application context owning the ledger store, preferences and clock.

use std::{fs, path::Path, sync::Arc};

use chrono::NaiveDate;
use tracing::{info, warn};
use uuid::Uuid;

use treso_config::Config;
use treso_core::{
    BalanceProjection, Clock, ProjectionSettings, TransactionForm, TransactionLedger,
};
use treso_domain::{CashTransaction, TransactionDraft, SOURCE_PREVISIONNEL};

use crate::{errors::Result, utils::system_clock::SystemClock};

/// Top-level owner of the forecast state. Components borrow the ledger from here
/// instead of reaching for a global.
pub struct AppContext {
    config: Config,
    ledger: TransactionLedger,
    clock: Arc<dyn Clock>,
}

impl AppContext {
    pub fn new(config: Config, clock: Arc<dyn Clock>) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ledger: TransactionLedger::new(),
            clock,
        })
    }

    pub fn with_system_clock(config: Config) -> Result<Self> {
        Self::new(config, Arc::new(SystemClock))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn ledger(&self) -> &TransactionLedger {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut TransactionLedger {
        &mut self.ledger
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn current_balance(&self) -> i64 {
        self.ledger.current_balance(self.today())
    }

    /// Projection over the configured horizon.
    pub fn projection(&self) -> Result<BalanceProjection> {
        let settings = self.config.projection_settings()?;
        self.projection_with(settings)
    }

    pub fn projection_with(&self, settings: ProjectionSettings) -> Result<BalanceProjection> {
        Ok(self.ledger.projection(self.today(), settings)?)
    }

    /// Validates raw form input and records it as a manual entry.
    pub fn submit_form(&mut self, form: TransactionForm) -> Result<Uuid> {
        let mut draft = form.into_draft().map_err(|err| {
            warn!(error = %err, "cash movement form rejected");
            err
        })?;
        if draft.source == SOURCE_PREVISIONNEL {
            draft.source = self.config.default_source.clone();
        }
        Ok(self.ledger.add(draft))
    }

    /// Records the confirmed inflow produced by an invoice payment.
    pub fn record_invoice_payment(
        &mut self,
        invoice_number: &str,
        client_name: &str,
        amount: u64,
        date: NaiveDate,
    ) -> Uuid {
        let draft = TransactionDraft::from_invoice_payment(invoice_number, client_name, amount, date);
        let id = self.ledger.add(draft);
        info!(%id, invoice = invoice_number, amount, "invoice payment recorded in cash ledger");
        id
    }

    /// Replaces the ledger content with `drafts`, assigning fresh ids. Returns the count.
    pub fn load_drafts(&mut self, drafts: Vec<TransactionDraft>) -> usize {
        let entries: Vec<CashTransaction> = drafts
            .into_iter()
            .map(|draft| CashTransaction::from_draft(Uuid::new_v4(), draft))
            .collect();
        let count = entries.len();
        self.ledger.replace_all(entries);
        info!(count, "cash ledger loaded");
        count
    }

    /// Reads a JSON array of drafts from `path` and loads it.
    pub fn load_drafts_from_path(&mut self, path: &Path) -> Result<usize> {
        let data = fs::read_to_string(path)?;
        let drafts: Vec<TransactionDraft> = serde_json::from_str(&data)?;
        Ok(self.load_drafts(drafts))
    }
}
