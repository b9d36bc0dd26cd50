//! Relevance checker: embeds keywords and the product description in the prompt
//! and returns the model's raw reply for the normalizer.

use tracing::{debug, info};

use crate::errors::AppError;
use crate::llm_client::CompletionModel;
use crate::product::ProductDescription;
use crate::relevance::models::Keyword;
use crate::relevance::prompts::RELEVANCE_PROMPT_TEMPLATE;

/// Fills the relevance template. Keywords are rendered as a JSON array of strings.
pub fn build_prompt(keywords: &[Keyword], description: &ProductDescription) -> String {
    let keyword_list = serde_json::to_string(keywords).unwrap_or_else(|_| "[]".to_string());
    RELEVANCE_PROMPT_TEMPLATE
        .replace("{keywords}", &keyword_list)
        .replace("{description}", description.as_str())
}

/// Sends the relevance prompt and returns the trimmed reply text.
pub async fn check_relevance(
    keywords: &[Keyword],
    description: &ProductDescription,
    model: &dyn CompletionModel,
) -> Result<String, AppError> {
    let prompt = build_prompt(keywords, description);
    info!("Checking relevance of {} keywords", keywords.len());
    debug!(
        "Keywords: {}",
        keywords.iter().map(Keyword::as_str).collect::<Vec<_>>().join(" | ")
    );

    let reply = model.complete(&prompt).await?;
    debug!("Relevant content from model:\n{reply}");
    Ok(reply)
}
