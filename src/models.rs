use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Persistent state: one count of students per class label.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppData {
    pub counts: BTreeMap<String, u32>,
}

/// Body of `POST /api/count`. `quantity` carries the raw input text so the
/// server owns validation (must parse as an integer >= 1).
#[derive(Debug, Deserialize)]
pub struct CountRequest {
    pub label: String,
    pub quantity: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteRequest {
    pub label: String,
}

/// Form-encoded fallbacks for the no-script paths.
#[derive(Debug, Deserialize)]
pub struct CountForm {
    pub label: String,
    pub quantity: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteForm {
    pub label: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct EntryRow {
    pub label: String,
    pub students: u32,
    pub category: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub students: u32,
}

/// Full snapshot the page renders from: per-label rows in store order, the
/// five category totals (zeros included), and the overall total.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryResponse {
    pub entries: Vec<EntryRow>,
    pub categories: Vec<CategoryTotal>,
    pub total: u32,
}
