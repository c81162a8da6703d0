use crate::{
    config::StudioConfig,
    error::{GenerationError, Result},
    gemini::transport::ContentGenerator,
    models::{
        Content, GenerateContentRequest, GenerationConfig, Part, Persona, ReferenceImage,
        StoryPlan,
    },
    prompts::{compile_analysis_prompt, compile_story_prompt},
};
use serde::de::DeserializeOwned;
use serde_json::json;
use std::sync::Arc;

/// Text-model calls that return structured JSON: persona analysis and story planning.
#[derive(Clone)]
pub struct PersonaClient {
    generator: Arc<dyn ContentGenerator>,
    config: StudioConfig,
}

impl PersonaClient {
    pub fn new(generator: Arc<dyn ContentGenerator>, config: StudioConfig) -> Self {
        Self { generator, config }
    }

    pub async fn analyze(&self, image_payload: &str) -> Result<Persona> {
        let reference = ReferenceImage::parse(image_payload);
        if reference.data.is_empty() {
            return Err(GenerationError::InvalidInput(
                "Reference image payload is empty".into(),
            ));
        }

        let parts = vec![
            Part::inline(reference.mime_type, reference.data),
            Part::text(compile_analysis_prompt()),
        ];

        log::info!("Analyzing reference image with model: {}", self.config.text_model);
        let persona: Persona = self.generate_json(parts, persona_schema()).await?;
        log::info!("Persona created: {} ({})", persona.nickname, persona.occupation);
        Ok(persona)
    }

    pub async fn plan_story(
        &self,
        persona: &Persona,
        scenario: Option<&str>,
        scene_count: usize,
    ) -> Result<StoryPlan> {
        if scene_count == 0 {
            return Err(GenerationError::InvalidInput(
                "A story needs at least one scene".into(),
            ));
        }

        let prompt = compile_story_prompt(persona, scenario, scene_count);
        log::info!(
            "Planning a {}-scene story for {} with model: {}",
            scene_count,
            persona.nickname,
            self.config.text_model
        );

        let mut plan: StoryPlan = self
            .generate_json(vec![Part::text(prompt)], story_schema())
            .await?;
        plan.scenes.retain(|scene| !scene.trim().is_empty());
        if plan.scenes.is_empty() {
            return Err(GenerationError::Response("Story plan contained no scenes".into()));
        }
        if plan.scenes.len() != scene_count {
            log::warn!(
                "Asked for {} scenes, model planned {}",
                scene_count,
                plan.scenes.len()
            );
        }
        Ok(plan)
    }

    async fn generate_json<T: DeserializeOwned>(
        &self,
        parts: Vec<Part>,
        schema: serde_json::Value,
    ) -> Result<T> {
        let request = GenerateContentRequest {
            contents: vec![Content::user(parts)],
            generation_config: Some(GenerationConfig {
                response_mime_type: Some("application/json".to_string()),
                response_schema: Some(schema),
                ..Default::default()
            }),
        };

        let response = self
            .generator
            .generate_content(&self.config.text_model, &request)
            .await?;
        let text = response
            .first_text()
            .ok_or_else(|| GenerationError::Response("Empty structured response".into()))?;

        log::debug!("Structured response: {}", text);
        serde_json::from_str(strip_code_fence(&text))
            .map_err(|e| GenerationError::Response(format!("Malformed JSON from model: {}", e)))
    }
}

/// Some models wrap JSON in a markdown fence even in JSON mode.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    match trimmed.strip_prefix("```") {
        Some(rest) => {
            let body = rest.strip_prefix("json").unwrap_or(rest);
            body.strip_suffix("```").unwrap_or(body).trim()
        }
        None => trimmed,
    }
}

fn persona_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "nickname": { "type": "STRING" },
            "ageRange": { "type": "STRING" },
            "occupation": { "type": "STRING" },
            "personality": { "type": "STRING" },
            "lifestyle": { "type": "STRING" },
            "vibe": { "type": "STRING" },
            "description": { "type": "STRING" },
            "tags": { "type": "ARRAY", "items": { "type": "STRING" } }
        },
        "required": [
            "nickname", "ageRange", "occupation", "personality",
            "lifestyle", "vibe", "description", "tags"
        ]
    })
}

fn story_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "title": { "type": "STRING" },
            "scenes": { "type": "ARRAY", "items": { "type": "STRING" } }
        },
        "required": ["title", "scenes"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_markdown_fences() {
        assert_eq!(strip_code_fence("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fence("```\n[]\n```"), "[]");
        assert_eq!(strip_code_fence("  {\"a\":1} "), "{\"a\":1}");
    }

    #[test]
    fn persona_schema_requires_every_field() {
        let schema = persona_schema();
        assert_eq!(schema["required"].as_array().unwrap().len(), 8);
        assert_eq!(schema["properties"]["tags"]["type"], "ARRAY");
    }
}
