//! Checks applied to raw form input before anything reaches the ledger store.

use chrono::NaiveDate;

use treso_domain::{ConfidenceStatus, TransactionDraft, TransactionKind};

use crate::CoreError;

/// Raw text captured by the "new movement" form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionForm {
    pub kind: String,
    pub category: String,
    pub description: String,
    pub amount: String,
    pub date: String,
    pub status: String,
    pub reference: String,
}

impl TransactionForm {
    /// Validates every field and builds a manual draft.
    pub fn into_draft(self) -> Result<TransactionDraft, CoreError> {
        let kind = TransactionKind::parse(&self.kind).ok_or_else(|| {
            CoreError::Validation(format!("unknown movement type `{}`", self.kind.trim()))
        })?;
        let category = required("catégorie", &self.category)?;
        let amount = parse_amount(&self.amount)?;
        let date = parse_date(&self.date)?;
        let status = if self.status.trim().is_empty() {
            ConfidenceStatus::Expected
        } else {
            ConfidenceStatus::parse(&self.status).ok_or_else(|| {
                CoreError::Validation(format!("unknown status `{}`", self.status.trim()))
            })?
        };

        let mut draft = TransactionDraft::manual(kind, category, amount, date, status)
            .with_description(self.description.trim());
        let reference = self.reference.trim();
        if !reference.is_empty() {
            draft = draft.with_reference(reference);
        }
        Ok(draft)
    }
}

/// Parses a whole FCFA amount. Accepts digit grouping with spaces, dots or underscores
/// and an optional `FCFA`/`XOF` suffix; rejects signs, decimals and empty input.
pub fn parse_amount(raw: &str) -> Result<u64, CoreError> {
    let trimmed = raw.trim();
    let without_suffix = trimmed
        .strip_suffix("FCFA")
        .or_else(|| trimmed.strip_suffix("XOF"))
        .unwrap_or(trimmed);
    let digits: String = without_suffix
        .chars()
        .filter(|ch| !matches!(ch, ' ' | '\u{a0}' | '\u{202f}' | '_' | '.'))
        .collect();
    if digits.is_empty() {
        return Err(CoreError::Validation("montant is required".into()));
    }
    if !digits.chars().all(|ch| ch.is_ascii_digit()) {
        return Err(CoreError::Validation(format!(
            "montant `{trimmed}` must be a non-negative whole number"
        )));
    }
    digits
        .parse::<u64>()
        .map_err(|_| CoreError::Validation(format!("montant `{trimmed}` is out of range")))
}

/// Accepts `YYYY-MM-DD` or `DD/MM/YYYY`.
pub fn parse_date(raw: &str) -> Result<NaiveDate, CoreError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("date is required".into()));
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%d/%m/%Y"))
        .map_err(|_| CoreError::Validation(format!("invalid date `{trimmed}`")))
}

fn required(field: &str, value: &str) -> Result<String, CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(CoreError::Validation(format!("{field} is required")))
    } else {
        Ok(trimmed.to_string())
    }
}
