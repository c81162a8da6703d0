pub mod batch;
pub mod image_client;
pub mod persona_client;
pub mod transport;

use crate::{
    classify::classify,
    config::StudioConfig,
    credentials::{resolve_credential, Credential, CredentialStore},
    error::Result,
    logger::Stopwatch,
    models::{
        AspectRatio, BatchItem, CameraSettings, CreationAttributes, GeneratedImage, ModelTier,
        Persona, StoryPlan, DEFAULT_STORY_SCENES,
    },
    prompts::{compile_reference_prompt, compile_scene_variant_prompt, compile_studio_prompt},
};
use std::sync::Arc;

pub use image_client::ImageClient;
pub use persona_client::PersonaClient;
pub use transport::{ContentGenerator, HttpContentGenerator};

/// Entry point for every studio operation.
///
/// Single-unit operations classify their failure before returning it; the
/// batch operations follow the rules in [`batch`].
#[derive(Clone)]
pub struct PersonaStudio {
    image_client: ImageClient,
    persona_client: PersonaClient,
}

impl PersonaStudio {
    /// Builds a studio backed by the HTTP transport, using an explicit credential.
    pub fn new(credential: Credential, config: StudioConfig) -> Result<Self> {
        let generator = HttpContentGenerator::new(credential, &config)?;
        Ok(Self::with_generator(Arc::new(generator), config))
    }

    pub fn with_generator(generator: Arc<dyn ContentGenerator>, config: StudioConfig) -> Self {
        Self {
            image_client: ImageClient::new(generator.clone(), config.clone()),
            persona_client: PersonaClient::new(generator, config),
        }
    }

    pub fn image(&self) -> &ImageClient {
        &self.image_client
    }

    pub fn persona(&self) -> &PersonaClient {
        &self.persona_client
    }

    pub async fn generate_reference_image(
        &self,
        attributes: &CreationAttributes,
        tier: ModelTier,
        aspect_ratio: AspectRatio,
    ) -> Result<GeneratedImage> {
        let prompt = compile_reference_prompt(attributes);
        self.image_client
            .generate_one(None, &prompt, tier, aspect_ratio)
            .await
            .map_err(|e| classify(e, Some(tier)))
    }

    pub async fn analyze_persona(&self, image_payload: &str) -> Result<Persona> {
        self.persona_client
            .analyze(image_payload)
            .await
            .map_err(|e| classify(e, None))
    }

    pub async fn plan_story(&self, persona: &Persona, scenario: Option<&str>) -> Result<StoryPlan> {
        self.plan_story_with_length(persona, scenario, DEFAULT_STORY_SCENES)
            .await
    }

    pub async fn plan_story_with_length(
        &self,
        persona: &Persona,
        scenario: Option<&str>,
        scene_count: usize,
    ) -> Result<StoryPlan> {
        self.persona_client
            .plan_story(persona, scenario, scene_count)
            .await
            .map_err(|e| classify(e, None))
    }

    pub async fn generate_studio_image(
        &self,
        reference_image: &str,
        persona: &Persona,
        camera: &CameraSettings,
        tier: ModelTier,
        aspect_ratio: AspectRatio,
    ) -> Result<GeneratedImage> {
        let prompt = compile_studio_prompt(persona, camera);
        self.image_client
            .generate_one(Some(reference_image), &prompt, tier, aspect_ratio)
            .await
            .map_err(|e| classify(e, Some(tier)))
    }

    /// Renders every prompt as-is against the reference image.
    pub async fn generate_batch(
        &self,
        reference_image: &str,
        prompts: &[String],
        tier: ModelTier,
        aspect_ratio: AspectRatio,
    ) -> Result<Vec<BatchItem>> {
        batch::generate_batch(&self.image_client, reference_image, prompts, tier, aspect_ratio)
            .await
    }

    /// Wraps each scene in the identity-preserving prompt, renders the batch,
    /// and pairs every image with the scene text it came from.
    pub async fn generate_scene_batch(
        &self,
        reference_image: &str,
        persona: &Persona,
        scenes: &[String],
        tier: ModelTier,
        aspect_ratio: AspectRatio,
    ) -> Result<Vec<BatchItem>> {
        if scenes.is_empty() {
            return Ok(Vec::new());
        }

        let prompts: Vec<String> = scenes
            .iter()
            .map(|scene| compile_scene_variant_prompt(persona, scene))
            .collect();

        let _stopwatch = Stopwatch::start(format!("scene batch of {}", scenes.len()));
        let mut results =
            batch::settle_all(&self.image_client, reference_image, &prompts, tier, aspect_ratio)
                .await;
        for (result, scene) in results.iter_mut().zip(scenes) {
            result.prompt = scene.clone();
        }
        batch::aggregate(results, tier)
    }
}

/// Hands out studios bound to whichever credential is current.
#[derive(Clone)]
pub struct ClientProvider {
    store: Arc<dyn CredentialStore>,
    config: StudioConfig,
}

impl ClientProvider {
    pub fn new(store: Arc<dyn CredentialStore>, config: StudioConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &StudioConfig {
        &self.config
    }

    /// Re-resolves the credential on every call, so a newly registered key
    /// applies to the next operation.
    pub fn get_client(&self) -> Result<PersonaStudio> {
        let credential = resolve_credential(self.store.as_ref(), &self.config.api_key_env)?;
        PersonaStudio::new(credential, self.config.clone())
    }
}
