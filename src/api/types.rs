use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{CategoryTotal, Cents, Transaction, category_map, money, summarize};

/// Result envelope for every API call: exactly one of `data` or `error` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            data: None,
            error: Some(message.into()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.data.is_some()
    }

    pub fn into_result(self) -> Result<T, String> {
        match (self.data, self.error) {
            (Some(data), _) => Ok(data),
            (None, Some(error)) => Err(error),
            (None, None) => Err("Empty response".to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiStatus {
    pub status: String,
    pub version: String,
    pub timestamp: String,
}

/// Body of `GET /summary`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteSummary {
    #[serde(with = "money::units")]
    pub revenues: Cents,
    #[serde(with = "money::units")]
    pub expenses: Cents,
    #[serde(with = "money::units")]
    pub balance: Cents,
    #[serde(with = "category_units")]
    pub categories: BTreeMap<String, Cents>,
}

impl RemoteSummary {
    /// Build the summary body the backend is expected to return for these transactions.
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let summary = summarize(transactions);
        Self {
            revenues: summary.revenues,
            expenses: summary.expenses,
            balance: summary.balance,
            categories: category_map(transactions),
        }
    }

    /// Category totals largest first; equal totals stay in name order.
    pub fn categories_by_amount(&self) -> Vec<CategoryTotal> {
        let mut totals: Vec<CategoryTotal> = self
            .categories
            .iter()
            .map(|(category, amount)| CategoryTotal {
                category: category.clone(),
                amount: *amount,
            })
            .collect();
        totals.sort_by(|a, b| b.amount.cmp(&a.amount));
        totals
    }
}

mod category_units {
    use std::collections::BTreeMap;

    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use crate::domain::Cents;

    pub fn serialize<S: Serializer>(
        categories: &BTreeMap<String, Cents>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        categories
            .iter()
            .map(|(category, cents)| (category, *cents as f64 / 100.0))
            .collect::<BTreeMap<_, _>>()
            .serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<BTreeMap<String, Cents>, D::Error> {
        let raw = BTreeMap::<String, f64>::deserialize(deserializer)?;
        Ok(raw
            .into_iter()
            .map(|(category, units)| (category, (units * 100.0).round() as Cents))
            .collect())
    }
}
