use log::debug;

use crate::domain::{NewTransaction, Transaction, TransactionPatch};

use super::seed_transactions;

/// Authoritative in-memory list of transactions, most recently added first.
///
/// The store performs no validation and never fails: callers validate input
/// before calling [`LedgerStore::add`].
#[derive(Debug, Clone, Default)]
pub struct LedgerStore {
    transactions: Vec<Transaction>,
}

impl LedgerStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the seed transactions.
    pub fn seeded() -> Self {
        Self::from_transactions(seed_transactions())
    }

    /// Create a store from an existing listing (most recent first).
    pub fn from_transactions(transactions: Vec<Transaction>) -> Self {
        Self { transactions }
    }

    /// Current snapshot, most recently added first.
    pub fn list(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn get(&self, id: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Assign a fresh id and prepend the transaction.
    pub fn add(&mut self, transaction: NewTransaction) -> Transaction {
        let mut id = Transaction::generate_id();
        // Ids must stay unique among held transactions
        while self.get(&id).is_some() {
            id = Transaction::generate_id();
        }

        let transaction = transaction.with_id(id);
        debug!(
            "Adding transaction {} ({} cents, {})",
            transaction.id, transaction.amount, transaction.category
        );
        self.transactions.insert(0, transaction.clone());
        transaction
    }

    /// Remove the transaction with the given id.
    /// Returns `None` and leaves the ledger untouched if no such id exists.
    pub fn remove(&mut self, id: &str) -> Option<Transaction> {
        let position = self.transactions.iter().position(|t| t.id == id)?;
        debug!("Removing transaction {}", id);
        Some(self.transactions.remove(position))
    }

    /// Apply a partial update in place. Id and position are unchanged.
    pub fn update(&mut self, id: &str, patch: TransactionPatch) -> Option<Transaction> {
        let transaction = self.transactions.iter_mut().find(|t| t.id == id)?;
        transaction.apply(patch);
        debug!("Updated transaction {}", id);
        Some(transaction.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_transaction(description: &str, amount: i64) -> NewTransaction {
        NewTransaction::new(description, amount, "Misc", "2025-11-01")
    }

    #[test]
    fn test_new_store_is_empty() {
        let store = LedgerStore::new();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_seeded_store() {
        let store = LedgerStore::seeded();
        let ids: Vec<_> = store.list().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn test_add_prepends() {
        let mut store = LedgerStore::new();
        let first = store.add(new_transaction("first", 100));
        let second = store.add(new_transaction("second", -200));

        assert_eq!(store.list(), &[second, first]);
    }

    #[test]
    fn test_add_assigns_unused_id() {
        let mut store = LedgerStore::seeded();
        let before: Vec<_> = store.list().iter().map(|t| t.id.clone()).collect();

        let added = store.add(new_transaction("coffee", -500));

        assert!(!before.contains(&added.id));
        assert_eq!(store.get(&added.id), Some(&added));
    }

    #[test]
    fn test_add_accepts_unvalidated_fields() {
        let mut store = LedgerStore::new();
        let added = store.add(NewTransaction::new("", 0, "", "not a date"));
        assert_eq!(added.description, "");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_remove_existing() {
        let mut store = LedgerStore::seeded();
        let removed = store.remove("3");

        assert_eq!(removed.map(|t| t.description), Some("Combustível".to_string()));
        assert_eq!(store.len(), 4);
        assert!(store.get("3").is_none());
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut store = LedgerStore::seeded();
        let before = store.list().to_vec();

        assert!(store.remove("does-not-exist").is_none());
        assert_eq!(store.list(), before.as_slice());
    }

    #[test]
    fn test_update_keeps_id_and_position() {
        let mut store = LedgerStore::seeded();
        let updated = store
            .update(
                "2",
                TransactionPatch {
                    description: Some("Feira".into()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.id, "2");
        assert_eq!(store.list()[1].description, "Feira");
        assert_eq!(store.list()[1].amount, -15000);
    }

    #[test]
    fn test_update_missing() {
        let mut store = LedgerStore::new();
        assert!(store.update("1", TransactionPatch::default()).is_none());
    }
}
