//! Stage 3: fuse enhanced copy and image descriptions into the final layout.

use tracing::{debug, warn};

use crate::parser::{extract_labeled_field, parse_layout};
use crate::providers::GenAiClient;
use crate::types::{EnhancedContent, FinalBrochureContent, ImageDescription};

pub const TITLE_LABEL: &str = "FINAL TITLE";
pub const DESCRIPTION_LABEL: &str = "FINAL DESCRIPTION";
pub const LAYOUT_LABEL: &str = "IMAGE LAYOUT";

/// Used only when the model answered but left out the title label.
pub const FALLBACK_FINAL_TITLE: &str = "Enhanced Title";
/// Used only when the model answered but left out the description label.
pub const FALLBACK_FINAL_DESCRIPTION: &str = "Enhanced Description";

fn finalize_prompt(enhanced: &EnhancedContent, descriptions: &[ImageDescription]) -> String {
    let image_details = descriptions
        .iter()
        .map(|img| {
            format!(
                "Image {}: {}\n   AI Description: {}",
                img.image_number, img.image_url, img.description
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "You are a professional brochure designer. Analyze the following content and optimize it for the best brochure layout:\n\n\
         ENHANCED CONTENT:\n\
         Title: {title}\n\
         Description: {description}\n\n\
         IMAGE ANALYSIS:\n\
         {image_details}\n\n\
         TASK: Create the final optimized brochure content by:\n\
         1. Refine the title and description if needed\n\
         2. Analyze each image and suggest the best order/position\n\
         3. Explain why each image fits in that position\n\
         4. Ensure the flow makes sense for a professional brochure\n\n\
         Return in this exact format:\n\
         {TITLE_LABEL}: [optimized title]\n\
         {DESCRIPTION_LABEL}: [optimized description]\n\
         {LAYOUT_LABEL}:\n\
         Position 1: [image number] - [why it fits here]\n\
         Position 2: [image number] - [why it fits here]\n\
         Position 3: [image number] - [why it fits here]\n\
         [continue for all images]",
        title = enhanced.enhanced_title,
        description = enhanced.enhanced_description,
    )
}

/// Read the final content out of a successful model reply.
pub fn parse_final_content(text: &str, descriptions: &[ImageDescription]) -> FinalBrochureContent {
    let final_title = extract_labeled_field(text, TITLE_LABEL, Some(DESCRIPTION_LABEL))
        .unwrap_or_else(|| FALLBACK_FINAL_TITLE.to_string());
    let final_description = extract_labeled_field(text, DESCRIPTION_LABEL, Some(LAYOUT_LABEL))
        .unwrap_or_else(|| FALLBACK_FINAL_DESCRIPTION.to_string());

    FinalBrochureContent {
        final_title,
        final_description,
        image_layout: parse_layout(text, descriptions),
    }
}

/// Produce the final brochure content; never fails.
///
/// Unavailable or failed calls keep the enhanced copy with the identity layout.
pub async fn finalize(
    ai: &GenAiClient,
    enhanced: &EnhancedContent,
    descriptions: &[ImageDescription],
) -> FinalBrochureContent {
    if !ai.is_available() {
        debug!("AI unavailable, keeping enhanced copy and input image order");
        return FinalBrochureContent::fallback(enhanced, descriptions);
    }

    match ai.generate(&finalize_prompt(enhanced, descriptions)).await {
        Ok(text) => parse_final_content(&text, descriptions),
        Err(e) => {
            warn!("Final brochure optimization failed: {}", e);
            FinalBrochureContent::fallback(enhanced, descriptions)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::testing::{client_with, MockGenerator};
    use crate::types::{identity_layout, DEFAULT_REASONING};

    fn enhanced() -> EnhancedContent {
        EnhancedContent::unchanged("A", "B")
    }

    fn descriptions(n: usize) -> Vec<ImageDescription> {
        (1..=n)
            .map(|i| ImageDescription {
                image_url: format!("https://img.example.com/{}.png", i),
                image_number: i,
                description: format!("Photo {}", i),
            })
            .collect()
    }

    const REPLY: &str = "FINAL TITLE: Harbourside Living\n\
                         FINAL DESCRIPTION: Calm, bright and close to the water.\n\
                         IMAGE LAYOUT:\n\
                         Position 1: 2 - Wide exterior sets the scene\n\
                         Position 2: 1 - Interior detail follows";

    #[tokio::test]
    async fn test_unavailable_fallback() {
        let result = finalize(&GenAiClient::unavailable(), &enhanced(), &descriptions(2)).await;
        assert_eq!(result.final_title, "A");
        assert_eq!(result.final_description, "B");
        assert_eq!(result.image_layout, identity_layout(&descriptions(2)));
    }

    #[tokio::test]
    async fn test_call_failure_echoes_enhanced_copy() {
        let client = client_with(Arc::new(MockGenerator::failing()), &["m"]);
        let result = finalize(&client, &enhanced(), &descriptions(2)).await;
        assert_eq!(
            result,
            FinalBrochureContent {
                final_title: "A".into(),
                final_description: "B".into(),
                image_layout: identity_layout(&descriptions(2)),
            }
        );
    }

    #[tokio::test]
    async fn test_parses_reply() {
        let client = client_with(Arc::new(MockGenerator::replying(REPLY)), &["m"]);
        let result = finalize(&client, &enhanced(), &descriptions(2)).await;

        assert_eq!(result.final_title, "Harbourside Living");
        assert_eq!(result.final_description, "Calm, bright and close to the water.");
        assert_eq!(result.image_layout[0].suggested_position, 2);
        assert_eq!(result.image_layout[0].reasoning, "Interior detail follows");
        assert_eq!(result.image_layout[1].suggested_position, 1);
        assert_eq!(result.image_layout[1].reasoning, "Wide exterior sets the scene");
    }

    #[tokio::test]
    async fn test_missing_labels_use_literal_fallbacks() {
        let client = client_with(
            Arc::new(MockGenerator::replying("Looks great, no changes needed.")),
            &["m"],
        );
        let result = finalize(&client, &enhanced(), &descriptions(1)).await;

        assert_eq!(result.final_title, FALLBACK_FINAL_TITLE);
        assert_eq!(result.final_description, FALLBACK_FINAL_DESCRIPTION);
        assert_eq!(result.image_layout[0].reasoning, DEFAULT_REASONING);
    }

    #[tokio::test]
    async fn test_repeatable_for_identical_replies() {
        let client = client_with(Arc::new(MockGenerator::replying(REPLY)), &["m"]);
        let first = finalize(&client, &enhanced(), &descriptions(2)).await;
        let second = finalize(&client, &enhanced(), &descriptions(2)).await;
        assert_eq!(first, second);
    }

    #[test]
    fn test_prompt_lists_every_image() {
        let prompt = finalize_prompt(&enhanced(), &descriptions(3));
        assert!(prompt.contains("Title: A"));
        assert!(prompt.contains("Image 3: https://img.example.com/3.png"));
        assert!(prompt.contains("AI Description: Photo 2"));
        assert!(prompt.contains("FINAL TITLE: [optimized title]"));
    }
}
