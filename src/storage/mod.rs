// In-memory ledger storage.
// State lives for the process lifetime and starts from the seed set.

mod ledger_store;
mod seed;

pub use ledger_store::LedgerStore;
pub use seed::seed_transactions;
