//! Stage 1: one short description per image.

use futures::future::join_all;
use tracing::{debug, warn};

use crate::providers::GenAiClient;
use crate::types::ImageDescription;

/// Descriptions longer than this are cut down.
pub const MAX_DESCRIPTION_WORDS: usize = 25;
/// Words kept when a description is cut down.
pub const TRUNCATED_DESCRIPTION_WORDS: usize = 20;

/// Templated description used whenever the model gives nothing usable.
pub fn fallback_description(image_number: usize) -> String {
    format!(
        "Professional image {} showcasing quality and style.",
        image_number
    )
}

fn describe_prompt(image_url: &str) -> String {
    format!(
        "Analyze this image: {}\n\
         Provide a concise, professional description in exactly 20 words.\n\
         Focus on the main subject, style, mood, and any notable features that would be relevant for a brochure.\n\
         Be descriptive but concise. Return only the description, no additional text.",
        image_url
    )
}

/// Keep model output near the 20-word target.
pub fn clamp_description(text: &str) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() > MAX_DESCRIPTION_WORDS {
        format!("{}...", words[..TRUNCATED_DESCRIPTION_WORDS].join(" "))
    } else {
        text.trim().to_string()
    }
}

/// Describe every image. Output order and numbering mirror the input; never fails.
pub async fn describe_images(ai: &GenAiClient, image_urls: &[String]) -> Vec<ImageDescription> {
    if !ai.is_available() {
        debug!("AI unavailable, using templated descriptions for {} images", image_urls.len());
        return image_urls
            .iter()
            .enumerate()
            .map(|(index, url)| ImageDescription {
                image_url: url.clone(),
                image_number: index + 1,
                description: fallback_description(index + 1),
            })
            .collect();
    }

    let tasks = image_urls
        .iter()
        .enumerate()
        .map(|(index, url)| describe_one(ai, url, index + 1));
    join_all(tasks).await
}

async fn describe_one(ai: &GenAiClient, image_url: &str, image_number: usize) -> ImageDescription {
    let description = match ai.generate(&describe_prompt(image_url)).await {
        Ok(text) if !text.trim().is_empty() => clamp_description(&text),
        Ok(_) => {
            warn!("Empty description for image {}, using template", image_number);
            fallback_description(image_number)
        }
        Err(e) => {
            warn!("Describing image {} failed: {}", image_number, e);
            fallback_description(image_number)
        }
    };

    ImageDescription {
        image_url: image_url.to_string(),
        image_number,
        description,
    }
}
