use serde::{Deserialize, Serialize};

use crate::improver::{Category, OutputLength, Platform, Tone};

/// Request body for an improvement run.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImprovePromptRequest {
    pub user_id: String,
    pub prompt: String,
    pub category: Category,
    pub tone: Tone,
    pub platform: Platform,
    pub length: OutputLength,
}

/// Query string for the history listing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryQuery {
    pub user_id: String,
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsQuery {
    pub user_id: String,
}

/// Dashboard aggregates for one user.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptStats {
    pub total_prompts: usize,
    pub avg_quality: Option<f64>,
}
