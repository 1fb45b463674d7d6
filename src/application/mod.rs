// Application layer - use cases over the in-memory ledger.

pub mod error;
pub mod reporting;
pub mod service;
pub mod validation;

pub use error::*;
pub use reporting::*;
pub use service::*;
pub use validation::*;
