//! Credit notes (avoirs) issued against invoices.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreditNote {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub number: String,
    pub invoice_number: String,
    pub client_name: String,
    pub amount: u64,
    pub status: CreditNoteStatus,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl CreditNote {
    pub fn new(
        number: impl Into<String>,
        invoice_number: impl Into<String>,
        client_name: impl Into<String>,
        amount: u64,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            number: number.into(),
            invoice_number: invoice_number.into(),
            client_name: client_name.into(),
            amount,
            status: CreditNoteStatus::Pending,
            date,
            reason: None,
        }
    }

    pub fn with_status(mut self, status: CreditNoteStatus) -> Self {
        self.status = status;
        self
    }
}

/// Closed set of credit-note states. No transition graph is enforced.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CreditNoteStatus {
    Pending,
    Refunded,
    Applied,
    Cancelled,
}

impl fmt::Display for CreditNoteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CreditNoteStatus::Pending => "En attente",
            CreditNoteStatus::Refunded => "Remboursé",
            CreditNoteStatus::Applied => "Imputé",
            CreditNoteStatus::Cancelled => "Annulé",
        };
        f.write_str(label)
    }
}
