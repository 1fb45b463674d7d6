use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Cents, money};

pub type TransactionId = String;

/// A single signed monetary event.
/// Positive amounts are income, negative amounts are expenses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub description: String,
    /// Amount in cents; serialized as decimal currency units
    #[serde(with = "money::units")]
    pub amount: Cents,
    /// Free-text label used for expense grouping (e.g. "Alimentação", "Transporte")
    pub category: String,
    /// Calendar date, `YYYY-MM-DD` by convention
    pub date: String,
}

/// A transaction that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTransaction {
    pub description: String,
    #[serde(with = "money::units")]
    pub amount: Cents,
    pub category: String,
    pub date: String,
}

/// Partial update of a transaction's fields. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        default,
        with = "money::units::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub amount: Option<Cents>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl NewTransaction {
    pub fn new(
        description: impl Into<String>,
        amount: Cents,
        category: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            description: description.into(),
            amount,
            category: category.into(),
            date: date.into(),
        }
    }

    /// Attach an identifier, producing a stored transaction.
    pub fn with_id(self, id: impl Into<TransactionId>) -> Transaction {
        Transaction {
            id: id.into(),
            description: self.description,
            amount: self.amount,
            category: self.category,
            date: self.date,
        }
    }
}

impl Transaction {
    /// Generate a fresh collision-resistant identifier.
    pub fn generate_id() -> TransactionId {
        Uuid::new_v4().to_string()
    }

    pub fn is_income(&self) -> bool {
        self.amount > 0
    }

    pub fn is_expense(&self) -> bool {
        self.amount < 0
    }

    pub fn apply(&mut self, patch: TransactionPatch) {
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(amount) = patch.amount {
            self.amount = amount;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
    }
}

impl TransactionPatch {
    pub fn is_empty(&self) -> bool {
        self.description.is_none()
            && self.amount.is_none()
            && self.category.is_none()
            && self.date.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn groceries() -> Transaction {
        NewTransaction::new("Compra no supermercado", -15000, "Alimentação", "2025-10-15")
            .with_id("2")
    }

    #[test]
    fn test_income_and_expense() {
        let expense = groceries();
        assert!(expense.is_expense());
        assert!(!expense.is_income());

        let zero = NewTransaction::new("Nothing", 0, "Misc", "2025-10-01").with_id("z");
        assert!(!zero.is_expense());
        assert!(!zero.is_income());
    }

    #[test]
    fn test_apply_patch_only_touches_present_fields() {
        let mut transaction = groceries();
        transaction.apply(TransactionPatch {
            amount: Some(-17500),
            ..Default::default()
        });

        assert_eq!(transaction.amount, -17500);
        assert_eq!(transaction.id, "2");
        assert_eq!(transaction.description, "Compra no supermercado");
        assert_eq!(transaction.category, "Alimentação");
    }

    #[test]
    fn test_generated_ids_differ() {
        assert_ne!(Transaction::generate_id(), Transaction::generate_id());
    }

    #[test]
    fn test_json_amount_in_units() {
        let json = serde_json::to_value(groceries()).unwrap();
        assert_eq!(json["amount"], serde_json::json!(-150.0));

        let parsed: Transaction = serde_json::from_str(
            r#"{"id":"9","description":"Freelance","amount":500.5,"category":"Trabalho Extra","date":"2025-10-30"}"#,
        )
        .unwrap();
        assert_eq!(parsed.amount, 50050);
    }

    #[test]
    fn test_patch_serializes_only_present_fields() {
        let patch = TransactionPatch {
            category: Some("Lazer".into()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_string(&patch).unwrap(),
            r#"{"category":"Lazer"}"#
        );
        assert!(TransactionPatch::default().is_empty());
    }
}
