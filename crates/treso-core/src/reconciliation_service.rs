//! Read-side aggregation over bookings and credit notes. Nothing here mutates its input.

use std::collections::HashMap;

use serde::Serialize;
use tracing::warn;

use treso_domain::{BookingGroup, ContainerRecord, CreditNote, CreditNoteStatus};

/// Credit-note amounts split by status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CreditNoteTotals {
    /// Everything except cancelled notes.
    pub non_cancelled: u64,
    pub applied: u64,
    pub pending: u64,
    pub refunded: u64,
    pub count: usize,
}

/// Credit notes issued against a single invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvoiceCreditNotes {
    pub invoice_number: String,
    pub notes: Vec<CreditNote>,
    pub totals: CreditNoteTotals,
}

pub struct ReconciliationService;

impl ReconciliationService {
    /// Groups container records by booking number, in order of first appearance.
    ///
    /// Client, vessel, shipping line and dates come from the first member of each
    /// booking. Members that disagree are logged but do not change the result.
    pub fn group_by_booking(records: &[ContainerRecord]) -> Vec<BookingGroup> {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut groups: Vec<BookingGroup> = Vec::new();
        for record in records {
            match index.get(record.booking_number.as_str()) {
                Some(&slot) => {
                    let group = &mut groups[slot];
                    if let Some(first) = group.containers.first() {
                        if !first.shares_booking_metadata(record) {
                            warn!(
                                booking = %record.booking_number,
                                container = %record.container_number,
                                "container metadata differs from first booking member"
                            );
                        }
                    }
                    group.push(record.clone());
                }
                None => {
                    index.insert(record.booking_number.as_str(), groups.len());
                    groups.push(BookingGroup::seeded_by(record.clone()));
                }
            }
        }
        groups
    }

    pub fn credit_note_totals(notes: &[CreditNote]) -> CreditNoteTotals {
        let mut totals = CreditNoteTotals::default();
        for note in notes {
            totals.count += 1;
            match note.status {
                CreditNoteStatus::Cancelled => continue,
                CreditNoteStatus::Applied => {
                    totals.applied = totals.applied.saturating_add(note.amount)
                }
                CreditNoteStatus::Pending => {
                    totals.pending = totals.pending.saturating_add(note.amount)
                }
                CreditNoteStatus::Refunded => {
                    totals.refunded = totals.refunded.saturating_add(note.amount)
                }
            }
            totals.non_cancelled = totals.non_cancelled.saturating_add(note.amount);
        }
        totals
    }

    /// Groups credit notes by the invoice they were issued against, in order of first
    /// appearance.
    pub fn credit_notes_by_invoice(notes: &[CreditNote]) -> Vec<InvoiceCreditNotes> {
        let mut order: Vec<String> = Vec::new();
        let mut grouped: HashMap<String, Vec<CreditNote>> = HashMap::new();
        for note in notes {
            let bucket = grouped.entry(note.invoice_number.clone()).or_insert_with(|| {
                order.push(note.invoice_number.clone());
                Vec::new()
            });
            bucket.push(note.clone());
        }
        order
            .into_iter()
            .filter_map(|invoice_number| {
                let notes = grouped.remove(&invoice_number)?;
                let totals = Self::credit_note_totals(&notes);
                Some(InvoiceCreditNotes {
                    invoice_number,
                    notes,
                    totals,
                })
            })
            .collect()
    }

    /// Outstanding amount owed by a client: invoiced − paid − applied credit notes.
    pub fn client_balance(invoiced: u64, paid: u64, applied_credit_notes: u64) -> i64 {
        to_signed(invoiced)
            .saturating_sub(to_signed(paid))
            .saturating_sub(to_signed(applied_credit_notes))
    }

    /// Same as [`client_balance`](Self::client_balance), deducting only the notes whose
    /// status is `applied`.
    pub fn client_balance_with_notes(invoiced: u64, paid: u64, notes: &[CreditNote]) -> i64 {
        let applied = Self::credit_note_totals(notes).applied;
        Self::client_balance(invoiced, paid, applied)
    }
}

fn to_signed(amount: u64) -> i64 {
    i64::try_from(amount).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn note(invoice: &str, amount: u64, status: CreditNoteStatus) -> CreditNote {
        let date = NaiveDate::from_ymd_opt(2024, 4, 2).unwrap();
        CreditNote::new("AV-1", invoice, "SDV", amount, date).with_status(status)
    }

    #[test]
    fn totals_split_by_status() {
        let notes = vec![
            note("FAC-1", 100, CreditNoteStatus::Applied),
            note("FAC-1", 50, CreditNoteStatus::Pending),
            note("FAC-2", 30, CreditNoteStatus::Cancelled),
            note("FAC-3", 20, CreditNoteStatus::Refunded),
        ];
        let totals = ReconciliationService::credit_note_totals(&notes);
        assert_eq!(totals.non_cancelled, 170);
        assert_eq!(totals.applied, 100);
        assert_eq!(totals.pending, 50);
        assert_eq!(totals.refunded, 20);
        assert_eq!(totals.count, 4);
    }

    #[test]
    fn groups_notes_per_invoice_in_first_seen_order() {
        let notes = vec![
            note("FAC-2", 10, CreditNoteStatus::Pending),
            note("FAC-1", 100, CreditNoteStatus::Applied),
            note("FAC-2", 5, CreditNoteStatus::Applied),
        ];
        let grouped = ReconciliationService::credit_notes_by_invoice(&notes);
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[0].invoice_number, "FAC-2");
        assert_eq!(grouped[0].notes.len(), 2);
        assert_eq!(grouped[0].totals.applied, 5);
        assert_eq!(grouped[1].totals.non_cancelled, 100);
    }

    #[test]
    fn client_balance_can_go_negative() {
        assert_eq!(ReconciliationService::client_balance(1_000, 400, 100), 500);
        assert_eq!(ReconciliationService::client_balance(100, 100, 50), -50);
    }

    #[test]
    fn booking_metadata_comes_from_first_member() {
        let mut first = ContainerRecord::new("MSKU1", "BK1", "Client A");
        first.vessel = Some("MSC Alpha".into());
        let mut second = ContainerRecord::new("MSKU2", "BK1", "Client B");
        second.vessel = Some("MSC Beta".into());
        let groups = ReconciliationService::group_by_booking(&[first, second]);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].client_name, "Client A");
        assert_eq!(groups[0].vessel.as_deref(), Some("MSC Alpha"));
        assert_eq!(groups[0].container_count, 2);
    }
}
