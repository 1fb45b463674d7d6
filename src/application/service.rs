use log::info;

use crate::domain::{
    CategoryTotal, FinancialSummary, Transaction, TransactionPatch, group_expenses_by_category,
    summarize,
};
use crate::storage::LedgerStore;

use super::{AppError, FinancialReport, TransactionDraft, build_report};

/// Application service over a ledger store.
/// The store is injected by the caller, so several consumers can share one ledger.
pub struct TrackerService<'a> {
    store: &'a mut LedgerStore,
}

impl<'a> TrackerService<'a> {
    pub fn new(store: &'a mut LedgerStore) -> Self {
        Self { store }
    }

    /// Current transactions, most recent first.
    pub fn transactions(&self) -> &[Transaction] {
        self.store.list()
    }

    /// Validate a draft and record it.
    pub fn record(&mut self, draft: &TransactionDraft) -> Result<Transaction, AppError> {
        let new = draft.validate()?;
        let transaction = self.store.add(new);
        info!(
            "Recorded transaction {}: {}",
            transaction.id, transaction.description
        );
        Ok(transaction)
    }

    /// Remove a transaction. Unknown ids are ignored.
    pub fn remove(&mut self, id: &str) -> Option<Transaction> {
        let removed = self.store.remove(id);
        match &removed {
            Some(transaction) => info!("Removed transaction {}", transaction.id),
            None => info!("No transaction with id {}, nothing removed", id),
        }
        removed
    }

    pub fn update(&mut self, id: &str, patch: TransactionPatch) -> Result<Transaction, AppError> {
        self.store
            .update(id, patch)
            .ok_or_else(|| AppError::TransactionNotFound(id.to_string()))
    }

    pub fn summary(&self) -> FinancialSummary {
        summarize(self.store.list())
    }

    pub fn expenses_by_category(&self) -> Vec<CategoryTotal> {
        group_expenses_by_category(self.store.list())
    }

    pub fn report(&self) -> FinancialReport {
        build_report(self.store.list())
    }
}
