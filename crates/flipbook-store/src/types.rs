//! Brochure record types (camelCase on the wire, as the frontend expects).

use serde::{Deserialize, Serialize};

/// A stored brochure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrochureRecord {
    pub id: String,
    #[serde(rename = "userId")]
    pub owner_id: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "imageURLs")]
    pub image_urls: Vec<String>,
    /// Final AI content, stored verbatim.
    #[serde(rename = "aiResponse")]
    pub ai_response: Option<serde_json::Value>,
    #[serde(rename = "createdAt")]
    pub created_at: i64,
    #[serde(rename = "updatedAt")]
    pub updated_at: i64,
}

/// Input for inserting a brochure.
#[derive(Debug, Clone, Default)]
pub struct NewBrochure {
    pub owner_id: String,
    pub title: String,
    pub description: String,
    pub image_urls: Vec<String>,
    pub ai_response: Option<serde_json::Value>,
}

/// Storage statistics.
#[derive(Debug, Clone, Serialize)]
pub struct StoreStats {
    #[serde(rename = "totalBrochures")]
    pub total_brochures: i64,
    #[serde(rename = "dbPath")]
    pub db_path: String,
    #[serde(rename = "dbSizeMb")]
    pub db_size_mb: f64,
}
