use crate::{
    config::StudioConfig,
    error::{GenerationError, Result},
    gemini::transport::ContentGenerator,
    models::{
        AspectRatio, Content, GenerateContentRequest, GenerateContentResponse, GeneratedImage,
        GenerationConfig, ImageConfig, ModelTier, Part, ReferenceImage,
    },
};
use std::sync::Arc;

#[derive(Clone)]
pub struct ImageClient {
    generator: Arc<dyn ContentGenerator>,
    config: StudioConfig,
}

impl ImageClient {
    pub fn new(generator: Arc<dyn ContentGenerator>, config: StudioConfig) -> Self {
        Self { generator, config }
    }

    pub fn config(&self) -> &StudioConfig {
        &self.config
    }

    /// One round trip, one image. Failures come back raw; no retries.
    pub async fn generate_one(
        &self,
        reference_image: Option<&str>,
        prompt: &str,
        tier: ModelTier,
        aspect_ratio: AspectRatio,
    ) -> Result<GeneratedImage> {
        let model_id = self.config.image_model(tier);
        let request = build_image_request(reference_image, prompt, aspect_ratio);

        log::info!(
            "Generating image with model: {} (aspect {})",
            model_id,
            aspect_ratio
        );

        let response = self.generator.generate_content(model_id, &request).await?;
        extract_image(&response)
    }
}

pub fn build_image_request(
    reference_image: Option<&str>,
    prompt: &str,
    aspect_ratio: AspectRatio,
) -> GenerateContentRequest {
    let mut parts = vec![Part::text(prompt)];
    if let Some(payload) = reference_image.filter(|p| !p.trim().is_empty()) {
        let reference = ReferenceImage::parse(payload);
        parts.push(Part::inline(reference.mime_type, reference.data));
    }

    GenerateContentRequest {
        contents: vec![Content::user(parts)],
        generation_config: Some(GenerationConfig {
            response_modalities: Some(vec!["IMAGE".to_string(), "TEXT".to_string()]),
            image_config: Some(ImageConfig {
                aspect_ratio: aspect_ratio.as_str().to_string(),
            }),
            ..Default::default()
        }),
    }
}

/// Pulls the image out of the first candidate only.
///
/// Text without an image is a refusal; a missing candidate or an empty part
/// list is `NoImageProduced`.
pub fn extract_image(response: &GenerateContentResponse) -> Result<GeneratedImage> {
    let parts = match response
        .candidates
        .first()
        .and_then(|candidate| candidate.content.as_ref())
    {
        Some(content) if !content.parts.is_empty() => &content.parts,
        _ => {
            log::warn!("Response carried no candidate parts");
            return Err(GenerationError::NoImageProduced);
        }
    };

    if let Some(inline) = parts
        .iter()
        .filter_map(|part| part.inline_data.as_ref())
        .find(|inline| !inline.data.is_empty())
    {
        return Ok(GeneratedImage::from_base64(&inline.data));
    }

    let text: Vec<&str> = parts
        .iter()
        .filter_map(|part| part.text.as_deref())
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .collect();

    if text.is_empty() {
        log::warn!("Response parts carried neither image nor text");
        Err(GenerationError::NoImageProduced)
    } else {
        let refusal = text.join(" ");
        log::warn!("Model returned text instead of an image: {}", refusal);
        Err(GenerationError::ModelRefusal(refusal))
    }
}
