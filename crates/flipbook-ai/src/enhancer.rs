//! Stage 2: enhanced title and description.

use tracing::{debug, warn};

use crate::parser::extract_labeled_field;
use crate::providers::GenAiClient;
use crate::types::EnhancedContent;

pub const TITLE_LABEL: &str = "Enhanced Title";
pub const DESCRIPTION_LABEL: &str = "Enhanced Description";

fn enhance_prompt(title: &str, description: &str) -> String {
    format!(
        "Enhance the following title and description to make them more professional, engaging, and suitable for a brochure:\n\n\
         Original Title: {title}\n\
         Original Description: {description}\n\n\
         Requirements:\n\
         1. Create a compelling, professional title (15-25 words)\n\
         2. Create a detailed, engaging description (50-100 words)\n\
         3. Make it suitable for a business brochure\n\
         4. Keep the original meaning but enhance the language\n\
         5. Return in this exact format:\n\
         {TITLE_LABEL}: [your enhanced title]\n\
         {DESCRIPTION_LABEL}: [your enhanced description]"
    )
}

/// Read both fields from model text. Each missing field falls back to its own
/// original value, independently of the other.
pub fn parse_enhanced_content(text: &str, title: &str, description: &str) -> EnhancedContent {
    let enhanced_title = extract_labeled_field(text, TITLE_LABEL, Some(DESCRIPTION_LABEL))
        .unwrap_or_else(|| title.to_string());
    let enhanced_description = extract_labeled_field(text, DESCRIPTION_LABEL, None)
        .unwrap_or_else(|| description.to_string());

    EnhancedContent {
        enhanced_title,
        enhanced_description,
    }
}

/// Enhance the user's copy. Returns it unchanged when the model is unavailable or fails.
pub async fn enhance_content(ai: &GenAiClient, title: &str, description: &str) -> EnhancedContent {
    if !ai.is_available() {
        debug!("AI unavailable, keeping original title and description");
        return EnhancedContent::unchanged(title, description);
    }

    match ai.generate(&enhance_prompt(title, description)).await {
        Ok(text) => parse_enhanced_content(&text, title, description),
        Err(e) => {
            warn!("Enhancing title and description failed: {}", e);
            EnhancedContent::unchanged(title, description)
        }
    }
}
