// Client for the finance backend's JSON API.

mod client;
mod types;

pub use client::{ApiClient, DEFAULT_BASE_URL};
pub use types::*;
