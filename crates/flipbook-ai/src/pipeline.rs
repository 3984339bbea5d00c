//! Brochure creation use case: describe → enhance → finalize.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info};
use url::Url;

use crate::describer::describe_images;
use crate::enhancer::enhance_content;
use crate::finalizer::finalize;
use crate::providers::GenAiClient;
use crate::types::{BrochureOutcome, FinalBrochureContent};

/// Keep only references that parse as absolute URLs, in input order.
pub fn filter_valid_image_urls(image_urls: &[String]) -> Vec<String> {
    image_urls
        .iter()
        .filter(|u| {
            let ok = Url::parse(u).is_ok();
            if !ok {
                debug!("Dropping invalid image reference {:?}", u);
            }
            ok
        })
        .cloned()
        .collect()
}

/// Runs the three generation stages against a shared capability client.
#[derive(Clone)]
pub struct BrochurePipeline {
    ai: Arc<GenAiClient>,
}

impl BrochurePipeline {
    pub fn new(ai: Arc<GenAiClient>) -> Self {
        Self { ai }
    }

    pub fn ai(&self) -> &GenAiClient {
        &self.ai
    }

    /// Build the final brochure content for a request.
    pub async fn build_brochure(
        &self,
        title: &str,
        description: &str,
        image_urls: &[String],
    ) -> FinalBrochureContent {
        self.run(title, description, image_urls).await.content
    }

    /// Like [`build_brochure`](Self::build_brochure), also returning the accepted image URLs.
    pub async fn run(&self, title: &str, description: &str, image_urls: &[String]) -> BrochureOutcome {
        let start = Instant::now();
        let image_urls = filter_valid_image_urls(image_urls);

        // Describing and enhancing are independent of each other.
        let (descriptions, enhanced) = tokio::join!(
            describe_images(&self.ai, &image_urls),
            enhance_content(&self.ai, title, description),
        );
        let content = finalize(&self.ai, &enhanced, &descriptions).await;

        info!(
            "Brochure content built: {} images, ai={}, {}ms",
            image_urls.len(),
            self.ai.is_available(),
            start.elapsed().as_millis()
        );

        BrochureOutcome {
            image_urls,
            content,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::describer::fallback_description;
    use crate::testing::{client_with, MockGenerator};
    use crate::types::DEFAULT_REASONING;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_filter_valid_image_urls() {
        let input = strings(&["not a url", "https://x/img.png", "", "/relative.png", "s3://bucket/a.jpg"]);
        assert_eq!(
            filter_valid_image_urls(&input),
            strings(&["https://x/img.png", "s3://bucket/a.jpg"])
        );
    }

    #[tokio::test]
    async fn test_drops_invalid_references() {
        let pipeline = BrochurePipeline::new(Arc::new(GenAiClient::unavailable()));
        let outcome = pipeline
            .run("T", "D", &strings(&["not a url", "https://x/img.png"]))
            .await;

        assert_eq!(outcome.image_urls, strings(&["https://x/img.png"]));
        assert_eq!(outcome.content.final_title, "T");
        assert_eq!(outcome.content.final_description, "D");
        assert_eq!(outcome.content.image_layout.len(), 1);

        let entry = &outcome.content.image_layout[0];
        assert_eq!(entry.image.image_number, 1);
        assert_eq!(entry.image.image_url, "https://x/img.png");
        assert_eq!(entry.image.description, fallback_description(1));
        assert_eq!(entry.suggested_position, 1);
        assert_eq!(entry.reasoning, DEFAULT_REASONING);
    }

    #[tokio::test]
    async fn test_no_images() {
        let pipeline = BrochurePipeline::new(Arc::new(GenAiClient::unavailable()));
        let content = pipeline.build_brochure("T", "D", &[]).await;
        assert!(content.image_layout.is_empty());
    }

    #[tokio::test]
    async fn test_full_run_with_model() {
        let mock = Arc::new(
            MockGenerator::failing()
                .route("Analyze this image: https://cdn.example.com/pool.jpg", "Turquoise pool under palms.")
                .route("Analyze this image: https://cdn.example.com/lobby.jpg", "Marble lobby with warm light.")
                .route(
                    "Enhance the following title",
                    "Enhanced Title: Resort Escape\nEnhanced Description: Unwind in style.",
                )
                .route(
                    "professional brochure designer",
                    "FINAL TITLE: Resort Escape by the Sea\n\
                     FINAL DESCRIPTION: Unwind in style by the water.\n\
                     IMAGE LAYOUT:\n\
                     Position 1: 2 - Welcoming first impression\n\
                     Position 2: 1 - Leisure highlight",
                ),
        );
        let pipeline = BrochurePipeline::new(Arc::new(client_with(mock.clone(), &["m"])));

        let images = strings(&["https://cdn.example.com/pool.jpg", "https://cdn.example.com/lobby.jpg"]);
        let content = pipeline.build_brochure("Resort", "Nice hotel", &images).await;

        assert_eq!(content.final_title, "Resort Escape by the Sea");
        assert_eq!(content.final_description, "Unwind in style by the water.");
        assert_eq!(content.image_layout[0].image.description, "Turquoise pool under palms.");
        assert_eq!(content.image_layout[0].suggested_position, 2);
        assert_eq!(content.image_layout[1].image.description, "Marble lobby with warm light.");
        assert_eq!(content.image_layout[1].suggested_position, 1);
        // Two image calls, one enhancement, one finalization.
        assert_eq!(mock.calls(), 4);
    }

    #[tokio::test]
    async fn test_every_stage_failing_still_produces_content() {
        let mock = Arc::new(MockGenerator::failing());
        let pipeline = BrochurePipeline::new(Arc::new(client_with(mock, &["a", "b"])));

        let content = pipeline
            .build_brochure("T", "D", &strings(&["https://x/1.png", "https://x/2.png"]))
            .await;
        assert_eq!(content.final_title, "T");
        assert_eq!(content.final_description, "D");
        assert_eq!(content.image_layout[1].image.description, fallback_description(2));
        assert_eq!(content.image_layout[1].suggested_position, 2);
    }
}
