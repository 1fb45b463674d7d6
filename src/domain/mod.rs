mod ledger;
pub mod money;
mod transaction;

pub use ledger::*;
pub use money::{Cents, Locale, ParseCentsError, format_cents, format_currency, format_date, parse_cents};
pub use transaction::*;
