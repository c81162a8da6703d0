use persona_studio::{
    AspectRatio, Content, ContentGenerator, Credential, GenerateContentRequest, GenerationError,
    HttpContentGenerator, ModelTier, Part, PersonaStudio, StudioConfig,
};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PRO_PATH: &str = "/v1beta/models/gemini-3-pro-image-preview:generateContent";
const STANDARD_PATH: &str = "/v1beta/models/gemini-2.5-flash-image:generateContent";

fn config_for(server: &MockServer) -> StudioConfig {
    StudioConfig::new()
        .with_base_url(format!("{}/v1beta", server.uri()))
        .with_timeout_secs(5)
}

fn image_response(data: &str) -> serde_json::Value {
    json!({
        "candidates": [{
            "content": {
                "role": "model",
                "parts": [{ "inlineData": { "mimeType": "image/png", "data": data } }]
            },
            "finishReason": "STOP"
        }]
    })
}

fn request(prompt: &str) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content::user(vec![Part::text(prompt)])],
        generation_config: None,
    }
}

#[tokio::test]
async fn generate_content_decodes_image_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(STANDARD_PATH))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_partial_json(json!({
            "contents": [{ "role": "user", "parts": [{ "text": "a quiet harbor" }] }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(image_response("QUJD")))
        .expect(1)
        .mount(&server)
        .await;

    let generator =
        HttpContentGenerator::new(Credential::new("test-key"), &config_for(&server)).unwrap();
    let response = generator
        .generate_content("gemini-2.5-flash-image", &request("a quiet harbor"))
        .await
        .unwrap();

    let part = &response.candidates[0].content.as_ref().unwrap().parts[0];
    assert_eq!(part.inline_data.as_ref().unwrap().data, "QUJD");
}

#[tokio::test]
async fn studio_image_round_trips_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(STANDARD_PATH))
        .and(header("x-goog-api-key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(image_response("QUJD")))
        .mount(&server)
        .await;

    let studio = PersonaStudio::new(Credential::new("test-key"), config_for(&server)).unwrap();
    let items = studio
        .generate_batch(
            "data:image/png;base64,AAAA",
            &["walking the dog".to_string()],
            ModelTier::Standard,
            AspectRatio::default(),
        )
        .await
        .unwrap();

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].prompt, "walking the dog");
    assert_eq!(items[0].image.data_uri, "data:image/png;base64,QUJD");
    assert_eq!(items[0].image.decode().unwrap(), b"ABC".to_vec());
}

#[tokio::test]
async fn wrong_key_is_not_matched() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(STANDARD_PATH))
        .and(header("x-goog-api-key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(image_response("QUJD")))
        .expect(0)
        .mount(&server)
        .await;

    let generator =
        HttpContentGenerator::new(Credential::new("other-key"), &config_for(&server)).unwrap();
    let err = generator
        .generate_content("gemini-2.5-flash-image", &request("a quiet harbor"))
        .await
        .unwrap_err();

    match err {
        GenerationError::Service(service) => assert_eq!(service.status, Some(404)),
        other => panic!("expected a service error, got {:?}", other),
    }
}

#[tokio::test]
async fn forbidden_pro_batch_requires_billing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(PRO_PATH))
        .and(header("x-goog-api-key", "test-key"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": {
                "code": 403,
                "message": "The caller does not have permission",
                "status": "PERMISSION_DENIED"
            }
        })))
        .mount(&server)
        .await;

    let studio = PersonaStudio::new(Credential::new("test-key"), config_for(&server)).unwrap();
    let prompts = vec!["on a rooftop".to_string(), "at a cafe".to_string()];

    let err = studio
        .generate_batch(
            "data:image/png;base64,AAAA",
            &prompts,
            ModelTier::Pro,
            AspectRatio::default(),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, GenerationError::BillingRequired(_)));
}

#[tokio::test]
async fn forbidden_envelope_keeps_structured_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(STANDARD_PATH))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": {
                "code": 403,
                "message": "The caller does not have permission",
                "status": "PERMISSION_DENIED"
            }
        })))
        .mount(&server)
        .await;

    let generator =
        HttpContentGenerator::new(Credential::new("test-key"), &config_for(&server)).unwrap();
    let err = generator
        .generate_content("gemini-2.5-flash-image", &request("a quiet harbor"))
        .await
        .unwrap_err();

    match err {
        GenerationError::Service(service) => {
            assert_eq!(service.status, Some(403));
            assert_eq!(service.reason.as_deref(), Some("PERMISSION_DENIED"));
            assert_eq!(service.message, "The caller does not have permission");
        }
        other => panic!("expected a service error, got {:?}", other),
    }
}
