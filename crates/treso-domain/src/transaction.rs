//! Domain models for forecasted and realized cash movements.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Origin tag applied to entries typed in by hand on the forecast screen.
pub const SOURCE_PREVISIONNEL: &str = "previsionnel";
/// Origin tag applied to entries derived from an invoice payment.
pub const SOURCE_FACTURE: &str = "facture";
/// Category used for entries derived from an invoice payment.
pub const CATEGORY_INVOICE_PAYMENT: &str = "Paiement facture";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CashTransaction {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    #[serde(rename = "categorie")]
    pub category: String,
    pub description: String,
    /// Integer FCFA units; the direction lives in `kind`.
    #[serde(rename = "montant")]
    pub amount: u64,
    pub date: NaiveDate,
    pub status: ConfidenceStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(default = "default_source")]
    pub source: String,
    #[serde(rename = "isManual", default)]
    pub is_manual: bool,
}

impl CashTransaction {
    pub fn from_draft(id: Uuid, draft: TransactionDraft) -> Self {
        Self {
            id,
            kind: draft.kind,
            category: draft.category,
            description: draft.description,
            amount: draft.amount,
            date: draft.date,
            status: draft.status,
            reference: draft.reference,
            source: draft.source,
            is_manual: draft.is_manual,
        }
    }

    pub fn is_inflow(&self) -> bool {
        self.kind == TransactionKind::Encaissement
    }

    /// Amount with the direction applied: positive for inflows, negative for outflows.
    pub fn signed_amount(&self) -> i64 {
        self.kind.apply_sign(self.amount)
    }

    /// A movement counts toward the cash balance once it is confirmed and its date has
    /// been reached.
    pub fn is_realized(&self, as_of: NaiveDate) -> bool {
        self.status == ConfidenceStatus::Confirmed && self.date <= as_of
    }

    /// Drops the identifier, producing the draft this entry could have been created from.
    pub fn to_draft(&self) -> TransactionDraft {
        TransactionDraft {
            kind: self.kind,
            category: self.category.clone(),
            description: self.description.clone(),
            amount: self.amount,
            date: self.date,
            status: self.status,
            reference: self.reference.clone(),
            source: self.source.clone(),
            is_manual: self.is_manual,
        }
    }
}

fn default_source() -> String {
    SOURCE_PREVISIONNEL.to_string()
}

/// Direction of a cash movement.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money received.
    Encaissement,
    /// Money paid out.
    Decaissement,
}

impl TransactionKind {
    pub fn apply_sign(self, amount: u64) -> i64 {
        let value = i64::try_from(amount).unwrap_or(i64::MAX);
        match self {
            TransactionKind::Encaissement => value,
            TransactionKind::Decaissement => -value,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "encaissement" | "inflow" | "in" => Some(TransactionKind::Encaissement),
            "decaissement" | "décaissement" | "outflow" | "out" => {
                Some(TransactionKind::Decaissement)
            }
            _ => None,
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransactionKind::Encaissement => "Encaissement",
            TransactionKind::Decaissement => "Décaissement",
        };
        f.write_str(label)
    }
}

/// Confidence tier attached to a movement.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceStatus {
    Confirmed,
    Expected,
    Uncertain,
}

impl ConfidenceStatus {
    pub const ALL: [ConfidenceStatus; 3] = [
        ConfidenceStatus::Confirmed,
        ConfidenceStatus::Expected,
        ConfidenceStatus::Uncertain,
    ];

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "confirmed" | "confirme" | "confirmé" => Some(ConfidenceStatus::Confirmed),
            "expected" | "prevu" | "prévu" => Some(ConfidenceStatus::Expected),
            "uncertain" | "incertain" => Some(ConfidenceStatus::Uncertain),
            _ => None,
        }
    }
}

impl fmt::Display for ConfidenceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ConfidenceStatus::Confirmed => "Confirmé",
            ConfidenceStatus::Expected => "Prévu",
            ConfidenceStatus::Uncertain => "Incertain",
        };
        f.write_str(label)
    }
}

/// A cash movement that has not been assigned an identifier yet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransactionDraft {
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    #[serde(rename = "categorie")]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "montant")]
    pub amount: u64,
    pub date: NaiveDate,
    pub status: ConfidenceStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(default = "default_source")]
    pub source: String,
    #[serde(rename = "isManual", default)]
    pub is_manual: bool,
}

impl TransactionDraft {
    /// Entry typed in by a user on the forecast screen.
    pub fn manual(
        kind: TransactionKind,
        category: impl Into<String>,
        amount: u64,
        date: NaiveDate,
        status: ConfidenceStatus,
    ) -> Self {
        Self {
            kind,
            category: category.into(),
            description: String::new(),
            amount,
            date,
            status,
            reference: None,
            source: default_source(),
            is_manual: true,
        }
    }

    /// Confirmed inflow recorded when an invoice payment is registered.
    pub fn from_invoice_payment(
        invoice_number: impl Into<String>,
        client_name: &str,
        amount: u64,
        date: NaiveDate,
    ) -> Self {
        let invoice_number = invoice_number.into();
        Self {
            kind: TransactionKind::Encaissement,
            category: CATEGORY_INVOICE_PAYMENT.to_string(),
            description: format!("Paiement {invoice_number} - {client_name}"),
            amount,
            date,
            status: ConfidenceStatus::Confirmed,
            reference: Some(invoice_number),
            source: SOURCE_FACTURE.to_string(),
            is_manual: false,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }
}

/// Partial field replacement applied by the store's update operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionPatch {
    pub kind: Option<TransactionKind>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub amount: Option<u64>,
    pub date: Option<NaiveDate>,
    pub status: Option<ConfidenceStatus>,
    /// `Some(None)` clears the reference.
    pub reference: Option<Option<String>>,
    pub source: Option<String>,
    pub is_manual: Option<bool>,
}

impl TransactionPatch {
    pub fn status(status: ConfidenceStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn apply(self, target: &mut CashTransaction) {
        if let Some(kind) = self.kind {
            target.kind = kind;
        }
        if let Some(category) = self.category {
            target.category = category;
        }
        if let Some(description) = self.description {
            target.description = description;
        }
        if let Some(amount) = self.amount {
            target.amount = amount;
        }
        if let Some(date) = self.date {
            target.date = date;
        }
        if let Some(status) = self.status {
            target.status = status;
        }
        if let Some(reference) = self.reference {
            target.reference = reference;
        }
        if let Some(source) = self.source {
            target.source = source;
        }
        if let Some(is_manual) = self.is_manual {
            target.is_manual = is_manual;
        }
    }
}
