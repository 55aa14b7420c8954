use serde::Serialize;

use crate::config::CleanerConfig;
use crate::pipeline::CleaningSummary;

#[derive(Debug, Clone, Serialize)]
pub struct CleanData {
    pub dry_run: bool,
    pub run_id: String,
    pub path: Option<String>,
    pub source_used: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_path: Option<String>,
    pub message: String,
    pub summary: CleaningSummary,
    pub issues: Vec<CleanIssue>,
    pub config: CleanerConfig,
}

/// A dropped row. Rows with an unresolved merchant are kept and not listed here.
#[derive(Debug, Clone, Serialize)]
pub struct CleanIssue {
    pub row: usize,
    pub field: String,
    pub code: String,
    pub received: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct InspectData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<DateInspection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant: Option<MerchantInspection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<AmountInspection>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DateInspection {
    pub input: String,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AmountInspection {
    pub input: String,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refund: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MerchantInspection {
    pub input: String,
    pub key: String,
    pub merchant: String,
    pub resolved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched: Option<CatalogEntryRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unresolved_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nearest: Option<CatalogEntryRow>,
    pub max_edit_distance: Option<usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CatalogData {
    pub family_count: usize,
    pub entry_count: usize,
    pub identifiers: Vec<String>,
    pub entries: Vec<CatalogEntryRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CatalogEntryRow {
    pub priority: usize,
    pub family: String,
    pub kind: String,
    pub canonical_base: String,
    pub canonical_output: String,
}
