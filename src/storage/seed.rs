use crate::domain::{NewTransaction, Transaction};

/// The fixed transaction set every session starts from, in listing order.
pub fn seed_transactions() -> Vec<Transaction> {
    vec![
        NewTransaction::new("Salário", 300000, "Salário", "2025-10-01").with_id("1"),
        NewTransaction::new("Compra no supermercado", -15000, "Alimentação", "2025-10-15")
            .with_id("2"),
        NewTransaction::new("Combustível", -8000, "Transporte", "2025-10-20").with_id("3"),
        NewTransaction::new("Restaurante", -4500, "Alimentação", "2025-10-25").with_id("4"),
        NewTransaction::new("Freelance", 50000, "Trabalho Extra", "2025-10-30").with_id("5"),
    ]
}
