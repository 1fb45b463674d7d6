use chrono::{NaiveDate, Utc};

use crate::domain::{NewTransaction, parse_cents};

use super::ValidationError;

/// Unvalidated input for a new transaction, as typed by the user.
#[derive(Debug, Clone, Default)]
pub struct TransactionDraft {
    pub description: String,
    /// Amount text; positive for income, negative for expense. `,` or `.` decimals.
    pub amount: String,
    pub category: String,
    /// `YYYY-MM-DD`; today's UTC date when omitted
    pub date: Option<String>,
}

impl TransactionDraft {
    pub fn new(
        description: impl Into<String>,
        amount: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            description: description.into(),
            amount: amount.into(),
            category: category.into(),
            date: None,
        }
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    /// Check required fields and parse the amount.
    pub fn validate(&self) -> Result<NewTransaction, ValidationError> {
        let description = self.description.trim();
        let amount = self.amount.trim();
        let category = self.category.trim();

        if description.is_empty() || amount.is_empty() || category.is_empty() {
            return Err(ValidationError::MissingFields);
        }

        let amount_cents =
            parse_cents(amount).map_err(|_| ValidationError::InvalidAmount(amount.to_string()))?;

        let date = match self.date.as_deref().map(str::trim) {
            Some(date) => NaiveDate::parse_from_str(date, "%Y-%m-%d")
                .map_err(|_| ValidationError::InvalidDate(date.to_string()))?,
            None => Utc::now().date_naive(),
        };

        Ok(NewTransaction::new(
            description,
            amount_cents,
            category,
            date.format("%Y-%m-%d").to_string(),
        ))
    }
}
