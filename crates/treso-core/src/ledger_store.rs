//! In-memory store holding every forecasted or realized cash movement.

use std::fmt;

use chrono::NaiveDate;
use tracing::debug;
use uuid::Uuid;

use treso_domain::{CashTransaction, TransactionDraft, TransactionPatch};

use crate::{
    projection_service::{realized_balance, BalanceProjection, ProjectionService, ProjectionSettings},
    CoreError,
};

/// Zero-argument change listener. Subscribers re-read the store through its accessors.
pub type Subscriber = Box<dyn FnMut() + Send>;

/// Handle returned by [`TransactionLedger::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Single source of truth for cash movements, owned by the application context.
///
/// Mutations are synchronous; every successful mutation notifies the subscribers in
/// registration order before returning. Operations on unknown ids are silent no-ops.
#[derive(Default)]
pub struct TransactionLedger {
    entries: Vec<CashTransaction>,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

impl TransactionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store pre-filled with `drafts`, without notifying anyone.
    pub fn with_entries(drafts: impl IntoIterator<Item = TransactionDraft>) -> Self {
        let mut ledger = Self::new();
        for draft in drafts {
            let id = ledger.fresh_id();
            ledger.entries.push(CashTransaction::from_draft(id, draft));
        }
        ledger
    }

    /// Assigns an identifier to `draft`, appends it and returns the new id.
    pub fn add(&mut self, draft: TransactionDraft) -> Uuid {
        let id = self.fresh_id();
        debug!(%id, kind = %draft.kind, amount = draft.amount, "cash transaction added");
        self.entries.push(CashTransaction::from_draft(id, draft));
        self.notify();
        id
    }

    /// Merges `patch` into the entry matching `id`. Returns `false` when no entry matched.
    pub fn update(&mut self, id: Uuid, patch: TransactionPatch) -> bool {
        let Some(index) = self.entries.iter().position(|entry| entry.id == id) else {
            debug!(%id, "update ignored, unknown transaction");
            return false;
        };
        patch.apply(&mut self.entries[index]);
        debug!(%id, "cash transaction updated");
        self.notify();
        true
    }

    /// Like [`update`](Self::update) but reports an unknown id as an error.
    pub fn try_update(&mut self, id: Uuid, patch: TransactionPatch) -> Result<(), CoreError> {
        if self.update(id, patch) {
            Ok(())
        } else {
            Err(CoreError::TransactionNotFound(id))
        }
    }

    /// Removes the entry matching `id`. Deleting an absent id is not an error.
    pub fn delete(&mut self, id: Uuid) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        if self.entries.len() == before {
            return false;
        }
        debug!(%id, "cash transaction deleted");
        self.notify();
        true
    }

    /// Swaps the whole content for `entries` (backend sync or seed data). Notifies once.
    pub fn replace_all(&mut self, entries: Vec<CashTransaction>) {
        debug!(count = entries.len(), "ledger content replaced");
        self.entries = entries;
        self.notify();
    }

    pub fn get(&self, id: Uuid) -> Option<&CashTransaction> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Raw entries in insertion order.
    pub fn entries(&self) -> &[CashTransaction] {
        &self.entries
    }

    /// Every entry relevant to the forecast view, confirmed and forecast alike, by date.
    pub fn all_for_tresorerie(&self) -> Vec<CashTransaction> {
        let mut entries = self.entries.clone();
        entries.sort_by_key(|entry| entry.date);
        entries
    }

    /// Realized entries only, for historical reporting.
    pub fn past_transactions(&self, as_of: NaiveDate) -> Vec<CashTransaction> {
        let mut entries: Vec<_> = self
            .entries
            .iter()
            .filter(|entry| entry.is_realized(as_of))
            .cloned()
            .collect();
        entries.sort_by_key(|entry| entry.date);
        entries
    }

    /// Realized inflows minus realized outflows up to and including `as_of`.
    pub fn current_balance(&self, as_of: NaiveDate) -> i64 {
        realized_balance(&self.entries, as_of)
    }

    pub fn projection(
        &self,
        today: NaiveDate,
        settings: ProjectionSettings,
    ) -> Result<BalanceProjection, CoreError> {
        ProjectionService::project(&self.entries, today, settings)
    }

    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut() + Send + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Returns `false` when the handle was already released.
    pub fn unsubscribe(&mut self, subscription: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(id, _)| *id != subscription);
        self.subscribers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    fn notify(&mut self) {
        for (_, callback) in self.subscribers.iter_mut() {
            callback();
        }
    }

    fn fresh_id(&self) -> Uuid {
        loop {
            let candidate = Uuid::new_v4();
            if self.get(candidate).is_none() {
                return candidate;
            }
        }
    }
}

impl fmt::Debug for TransactionLedger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransactionLedger")
            .field("entries", &self.entries)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    use chrono::Datelike;
    use treso_domain::{ConfidenceStatus, TransactionKind};

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn draft(kind: TransactionKind, amount: u64, day: u32, status: ConfidenceStatus) -> TransactionDraft {
        TransactionDraft::manual(kind, "Divers", amount, date(2024, 6, day), status)
    }

    fn counting_subscriber(ledger: &mut TransactionLedger) -> (SubscriptionId, Arc<AtomicUsize>) {
        let hits = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&hits);
        let id = ledger.subscribe(move || {
            seen.fetch_add(1, Ordering::SeqCst);
        });
        (id, hits)
    }

    #[test]
    fn add_assigns_unique_ids_and_keeps_fields() {
        let mut ledger = TransactionLedger::new();
        let input = draft(TransactionKind::Encaissement, 1_000, 3, ConfidenceStatus::Expected);
        let a = ledger.add(input.clone());
        let b = ledger.add(input.clone());
        assert_ne!(a, b);
        let stored = ledger.get(a).expect("stored");
        assert_eq!(stored.to_draft(), input);
    }

    #[test]
    fn mutations_notify_subscribers_synchronously() {
        let mut ledger = TransactionLedger::new();
        let (_, hits) = counting_subscriber(&mut ledger);

        let id = ledger.add(draft(TransactionKind::Decaissement, 500, 4, ConfidenceStatus::Expected));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert!(ledger.update(id, TransactionPatch::status(ConfidenceStatus::Confirmed)));
        assert_eq!(hits.load(Ordering::SeqCst), 2);
        assert!(ledger.delete(id));
        assert_eq!(hits.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn unknown_ids_are_silent_noops() {
        let mut ledger = TransactionLedger::new();
        ledger.add(draft(TransactionKind::Decaissement, 500, 4, ConfidenceStatus::Expected));
        let (_, hits) = counting_subscriber(&mut ledger);
        let before = ledger.all_for_tresorerie();

        let ghost = Uuid::new_v4();
        assert!(!ledger.update(ghost, TransactionPatch::status(ConfidenceStatus::Uncertain)));
        assert!(!ledger.delete(ghost));
        assert_eq!(ledger.all_for_tresorerie(), before);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
        assert!(matches!(
            ledger.try_update(ghost, TransactionPatch::default()),
            Err(CoreError::TransactionNotFound(id)) if id == ghost
        ));
    }

    #[test]
    fn delete_is_idempotent() {
        let mut ledger = TransactionLedger::new();
        let keep = ledger.add(draft(TransactionKind::Encaissement, 10, 1, ConfidenceStatus::Confirmed));
        let removed = ledger.add(draft(TransactionKind::Encaissement, 20, 2, ConfidenceStatus::Confirmed));
        assert!(ledger.delete(removed));
        let after_first = ledger.all_for_tresorerie();
        assert!(!ledger.delete(removed));
        assert_eq!(ledger.all_for_tresorerie(), after_first);
        assert!(ledger.get(keep).is_some());
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let mut ledger = TransactionLedger::new();
        let (subscription, hits) = counting_subscriber(&mut ledger);
        assert!(ledger.unsubscribe(subscription));
        assert!(!ledger.unsubscribe(subscription));
        ledger.add(draft(TransactionKind::Encaissement, 10, 1, ConfidenceStatus::Confirmed));
        assert_eq!(hits.load(Ordering::SeqCst), 0);
        assert_eq!(ledger.subscriber_count(), 0);
    }

    #[test]
    fn views_sort_by_date() {
        let mut ledger = TransactionLedger::new();
        ledger.add(draft(TransactionKind::Encaissement, 30, 20, ConfidenceStatus::Confirmed));
        ledger.add(draft(TransactionKind::Decaissement, 10, 5, ConfidenceStatus::Confirmed));
        ledger.add(draft(TransactionKind::Encaissement, 20, 10, ConfidenceStatus::Expected));

        let dates: Vec<_> = ledger.all_for_tresorerie().iter().map(|t| t.date.day0()).collect();
        assert_eq!(dates, vec![4, 9, 19]);

        let past = ledger.past_transactions(date(2024, 6, 15));
        assert_eq!(past.len(), 1);
        assert_eq!(past[0].amount, 10);
    }

    #[test]
    fn with_entries_does_not_need_subscribers() {
        let ledger = TransactionLedger::with_entries(vec![
            draft(TransactionKind::Encaissement, 100, 1, ConfidenceStatus::Confirmed),
            draft(TransactionKind::Decaissement, 40, 2, ConfidenceStatus::Confirmed),
        ]);
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.current_balance(date(2024, 6, 30)), 60);
    }
}
