use thiserror::Error;

/// Raw form input rejected before it reaches the ledger.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please fill in description, amount and category")]
    MissingFields,

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid date '{0}'. Use YYYY-MM-DD")]
    InvalidDate(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Transaction not found: {0}")]
    TransactionNotFound(String),

    #[error("API error: {0}")]
    Api(String),
}
