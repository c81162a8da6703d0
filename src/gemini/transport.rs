use crate::{
    config::StudioConfig,
    credentials::Credential,
    error::{GenerationError, Result, ServiceError},
    models::{ErrorEnvelope, GenerateContentRequest, GenerateContentResponse},
};
use async_trait::async_trait;

/// The one outbound operation the studio needs from the generation service.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse>;
}

/// Talks to the REST `generateContent` endpoint with `reqwest`.
#[derive(Clone)]
pub struct HttpContentGenerator {
    http: reqwest::Client,
    base_url: String,
    credential: Credential,
}

impl HttpContentGenerator {
    pub fn new(credential: Credential, config: &StudioConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| GenerationError::Config(format!("Cannot build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            credential,
        })
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.base_url, model)
    }
}

/// Builds a structured error from a non-success status and its body.
pub fn parse_error_body(status: u16, body: &str) -> ServiceError {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => {
            let mut err = ServiceError::new(envelope.error.message)
                .with_status(envelope.error.code.unwrap_or(status));
            if let Some(reason) = envelope.error.status {
                err = err.with_reason(reason);
            }
            err
        }
        Err(_) => {
            let message = if body.trim().is_empty() {
                format!("HTTP {}", status)
            } else {
                body.trim().to_string()
            };
            ServiceError::new(message).with_status(status)
        }
    }
}

#[async_trait]
impl ContentGenerator for HttpContentGenerator {
    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let url = self.endpoint(model);
        log::debug!("POST {}", url);

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", self.credential.expose())
            .json(request)
            .send()
            .await
            .map_err(|e| {
                log::error!("Transport failure calling {}: {}", model, e);
                GenerationError::Request(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = parse_error_body(status.as_u16(), &body);
            log::error!("Generation service error for {}: {}", model, err);
            return Err(GenerationError::Service(err));
        }

        response
            .json::<GenerateContentResponse>()
            .await
            .map_err(|e| GenerationError::Response(e.to_string()))
    }
}
