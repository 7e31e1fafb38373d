use rand::Rng;
use time::OffsetDateTime;

use crate::improver::{ImprovedPrompt, ImproveRequest};
use crate::store::SavedPrompt;

use super::dto::PromptStats;

const ID_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Short uppercase alphanumeric id, matching the stored prompt layout.
pub fn new_prompt_id() -> String {
    let mut rng = rand::thread_rng();
    (0..6)
        .map(|_| ID_CHARSET[rng.gen_range(0..ID_CHARSET.len())] as char)
        .collect()
}

pub fn build_saved_prompt(
    user_id: &str,
    request: &ImproveRequest,
    improved: ImprovedPrompt,
) -> SavedPrompt {
    SavedPrompt {
        id: new_prompt_id(),
        user_id: user_id.into(),
        original_prompt: request.original_prompt.clone(),
        improved_prompt: improved.improved_prompt,
        category: request.category,
        tone: request.tone,
        platform: request.platform,
        length: request.length,
        timestamp: OffsetDateTime::now_utc(),
        scores: improved.scores,
        explanation: improved.explanation,
    }
}

/// Case-insensitive substring match over the original text, the improved
/// text, and the category name. An empty query keeps everything.
pub fn search_prompts(prompts: Vec<SavedPrompt>, query: &str) -> Vec<SavedPrompt> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return prompts;
    }
    prompts
        .into_iter()
        .filter(|p| {
            p.original_prompt.to_lowercase().contains(&needle)
                || p.improved_prompt.to_lowercase().contains(&needle)
                || p.category.as_str().to_lowercase().contains(&needle)
        })
        .collect()
}

/// Mean of the per-prompt average score; `None` when there is nothing to
/// average.
pub fn quality_stats(prompts: &[SavedPrompt]) -> PromptStats {
    let total_prompts = prompts.len();
    let avg_quality = if prompts.is_empty() {
        None
    } else {
        let sum: f64 = prompts
            .iter()
            .map(|p| (p.scores.clarity + p.scores.detail + p.scores.creativity) / 3.0)
            .sum();
        Some(sum / total_prompts as f64)
    };
    PromptStats {
        total_prompts,
        avg_quality,
    }
}
