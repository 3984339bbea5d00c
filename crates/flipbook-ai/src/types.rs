//! Brochure content types (camelCase on the wire).

use serde::{Deserialize, Serialize};

/// Reasoning attached to every entry of the identity layout.
pub const DEFAULT_REASONING: &str = "Default positioning";

/// Short description of one image, in input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDescription {
    #[serde(rename = "imageUrl")]
    pub image_url: String,
    /// 1-based position of the image in the accepted input list.
    #[serde(rename = "imageNumber")]
    pub image_number: usize,
    pub description: String,
}

/// Title and description after the enhancement stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnhancedContent {
    #[serde(rename = "enhancedTitle")]
    pub enhanced_title: String,
    #[serde(rename = "enhancedDescription")]
    pub enhanced_description: String,
}

impl EnhancedContent {
    /// The user's own copy, passed through untouched.
    pub fn unchanged(title: &str, description: &str) -> Self {
        Self {
            enhanced_title: title.to_string(),
            enhanced_description: description.to_string(),
        }
    }
}

/// An image description with its proposed slot in the brochure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageLayoutEntry {
    #[serde(flatten)]
    pub image: ImageDescription,
    /// 1-based slot. Not required to be unique or contiguous across a layout.
    #[serde(rename = "suggestedPosition")]
    pub suggested_position: usize,
    pub reasoning: String,
}

impl ImageLayoutEntry {
    /// Entry that keeps the image in its input slot.
    pub fn identity(image: &ImageDescription) -> Self {
        Self {
            image: image.clone(),
            suggested_position: image.image_number,
            reasoning: DEFAULT_REASONING.to_string(),
        }
    }
}

/// Terminal artifact of the pipeline, persisted verbatim as the AI response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalBrochureContent {
    #[serde(rename = "finalTitle")]
    pub final_title: String,
    #[serde(rename = "finalDescription")]
    pub final_description: String,
    #[serde(rename = "imageLayout")]
    pub image_layout: Vec<ImageLayoutEntry>,
}

impl FinalBrochureContent {
    /// Enhanced copy with every image left in place.
    pub fn fallback(enhanced: &EnhancedContent, descriptions: &[ImageDescription]) -> Self {
        Self {
            final_title: enhanced.enhanced_title.clone(),
            final_description: enhanced.enhanced_description.clone(),
            image_layout: identity_layout(descriptions),
        }
    }
}

/// Layout where each image keeps its input position with the default reasoning.
pub fn identity_layout(descriptions: &[ImageDescription]) -> Vec<ImageLayoutEntry> {
    descriptions.iter().map(ImageLayoutEntry::identity).collect()
}

/// Incoming brochure creation request.
#[derive(Debug, Clone, Deserialize)]
pub struct BrochureRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, rename = "imageUrls")]
    pub image_urls: Vec<String>,
}

/// Pipeline result together with the image references it accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrochureOutcome {
    pub image_urls: Vec<String>,
    pub content: FinalBrochureContent,
}
