// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use anyhow::Result;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use pocketbook::api::{ApiStatus, LoginResponse, RemoteSummary, User};
use pocketbook::domain::{Cents, NewTransaction, Transaction, TransactionPatch};
use serde_json::{Value, json};
use tokio::net::TcpListener;

/// Helper to build a transaction with a fixed id
pub fn transaction(id: &str, amount: Cents, category: &str) -> Transaction {
    NewTransaction::new(format!("{} {}", category, id), amount, category, "2025-10-01").with_id(id)
}

/// Test fixture: the worked example (salary, two food expenses, one transport)
pub fn worked_example() -> Vec<Transaction> {
    vec![
        transaction("1", 300000, "Salary"),
        transaction("2", -15000, "Food"),
        transaction("3", -8000, "Transport"),
        transaction("4", -4500, "Food"),
    ]
}

/// In-memory state of the mock backend
#[derive(Clone, Default)]
pub struct MockBackend {
    pub transactions: Arc<Mutex<Vec<Transaction>>>,
}

impl MockBackend {
    pub fn with_transactions(transactions: Vec<Transaction>) -> Self {
        Self {
            transactions: Arc::new(Mutex::new(transactions)),
        }
    }

    pub fn snapshot(&self) -> Vec<Transaction> {
        self.transactions.lock().unwrap().clone()
    }

    /// Router implementing the backend contract under `/api`
    pub fn router(&self) -> Router {
        Router::new()
            .route("/api/auth/login", post(login))
            .route(
                "/api/transactions",
                get(list_transactions).post(create_transaction),
            )
            .route(
                "/api/transactions/:id",
                put(update_transaction).delete(delete_transaction),
            )
            .route("/api/summary", get(summary))
            .route("/api/status", get(status))
            .with_state(self.clone())
    }
}

/// Serve a router on an ephemeral local port and return its `/api` base URL
pub async fn spawn_backend(router: Router) -> Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    Ok(format!("http://{}/api", addr))
}

/// Base URL of a port nothing is listening on
pub async fn unreachable_base_url() -> Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(format!("http://{}/api", addr))
}

fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Transaction not found" })),
    )
        .into_response()
}

async fn login(Json(body): Json<Value>) -> Response {
    let email = body["email"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();

    if email.is_empty() || password.is_empty() {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "Invalid credentials" })),
        )
            .into_response();
    }

    Json(LoginResponse {
        token: "test-token".into(),
        user: User {
            id: "1".into(),
            email: email.into(),
            name: "Test User".into(),
        },
    })
    .into_response()
}

async fn list_transactions(State(backend): State<MockBackend>) -> Json<Vec<Transaction>> {
    Json(backend.snapshot())
}

async fn create_transaction(
    State(backend): State<MockBackend>,
    Json(new): Json<NewTransaction>,
) -> Response {
    let created = new.with_id(Transaction::generate_id());
    backend.transactions.lock().unwrap().push(created.clone());
    (StatusCode::CREATED, Json(created)).into_response()
}

async fn update_transaction(
    State(backend): State<MockBackend>,
    Path(id): Path<String>,
    Json(patch): Json<TransactionPatch>,
) -> Response {
    let mut transactions = backend.transactions.lock().unwrap();
    match transactions.iter_mut().find(|t| t.id == id) {
        Some(transaction) => {
            transaction.apply(patch);
            Json(transaction.clone()).into_response()
        }
        None => not_found(),
    }
}

async fn delete_transaction(
    State(backend): State<MockBackend>,
    Path(id): Path<String>,
) -> Response {
    let mut transactions = backend.transactions.lock().unwrap();
    match transactions.iter().position(|t| t.id == id) {
        Some(position) => {
            transactions.remove(position);
            Json(json!({ "message": "Transaction deleted" })).into_response()
        }
        None => not_found(),
    }
}

async fn summary(State(backend): State<MockBackend>) -> Json<RemoteSummary> {
    Json(RemoteSummary::from_transactions(&backend.snapshot()))
}

async fn status() -> Json<ApiStatus> {
    Json(ApiStatus {
        status: "online".into(),
        version: "1.0.0".into(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}
