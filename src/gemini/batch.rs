use crate::{
    classify::{classify, is_permission_denied},
    error::Result,
    gemini::image_client::ImageClient,
    logger::Stopwatch,
    models::{AspectRatio, BatchItem, GenerationResult, ModelTier},
};
use futures::future::join_all;

/// Runs every prompt concurrently and returns each outcome in dispatch order.
pub async fn settle_all(
    images: &ImageClient,
    reference_image: &str,
    prompts: &[String],
    tier: ModelTier,
    aspect_ratio: AspectRatio,
) -> Vec<GenerationResult> {
    let units = prompts.iter().map(|prompt| async move {
        let outcome = images
            .generate_one(Some(reference_image), prompt, tier, aspect_ratio)
            .await;
        GenerationResult {
            prompt: prompt.clone(),
            outcome,
        }
    });

    join_all(units).await
}

/// Applies the fatal scan, then keeps the successes in order.
pub fn aggregate(results: Vec<GenerationResult>, tier: ModelTier) -> Result<Vec<BatchItem>> {
    if let Some(fatal) = results
        .iter()
        .filter_map(|result| result.outcome.as_ref().err())
        .find(|err| is_permission_denied(err))
    {
        log::error!("Batch aborted by permission failure: {}", fatal);
        return Err(classify(fatal.clone(), Some(tier)));
    }

    let dispatched = results.len();
    let mut items = Vec::with_capacity(dispatched);
    for result in results {
        match result.outcome {
            Ok(image) => items.push(BatchItem {
                image,
                prompt: result.prompt,
            }),
            Err(err) => log::warn!("Dropping failed unit \"{}\": {}", result.prompt, err),
        }
    }

    log::info!(
        "Batch settled: {} dispatched, {} succeeded, {} dropped",
        dispatched,
        items.len(),
        dispatched - items.len()
    );
    Ok(items)
}

pub async fn generate_batch(
    images: &ImageClient,
    reference_image: &str,
    prompts: &[String],
    tier: ModelTier,
    aspect_ratio: AspectRatio,
) -> Result<Vec<BatchItem>> {
    if prompts.is_empty() {
        return Ok(Vec::new());
    }

    let _stopwatch = Stopwatch::start(format!("batch of {}", prompts.len()));
    let results = settle_all(images, reference_image, prompts, tier, aspect_ratio).await;
    aggregate(results, tier)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{GenerationError, ServiceError};
    use crate::models::GeneratedImage;

    fn ok(prompt: &str) -> GenerationResult {
        GenerationResult {
            prompt: prompt.to_string(),
            outcome: Ok(GeneratedImage::from_base64(prompt)),
        }
    }

    fn failed(prompt: &str, err: GenerationError) -> GenerationResult {
        GenerationResult {
            prompt: prompt.to_string(),
            outcome: Err(err),
        }
    }

    #[test]
    fn drops_non_fatal_failures_in_order() {
        let results = vec![
            ok("a"),
            failed("b", GenerationError::ModelRefusal("no".to_string())),
            ok("c"),
            failed("d", GenerationError::NoImageProduced),
            failed("e", ServiceError::new("internal").with_status(500).into()),
        ];
        let items = aggregate(results, ModelTier::Standard).unwrap();
        let prompts: Vec<&str> = items.iter().map(|i| i.prompt.as_str()).collect();
        assert_eq!(prompts, vec!["a", "c"]);
    }

    #[test]
    fn first_permission_failure_aborts() {
        let results = vec![
            ok("a"),
            failed("b", ServiceError::new("slow down").with_status(429).into()),
            failed("c", ServiceError::new("denied").with_status(403).into()),
            ok("d"),
        ];
        assert!(matches!(
            aggregate(results.clone(), ModelTier::Pro),
            Err(GenerationError::BillingRequired(_))
        ));
        assert!(matches!(
            aggregate(results, ModelTier::Standard),
            Err(GenerationError::AccessDenied(_))
        ));
    }

    #[test]
    fn rate_limits_alone_are_dropped() {
        let results = vec![
            failed("a", ServiceError::new("slow down").with_status(429).into()),
            ok("b"),
        ];
        let items = aggregate(results, ModelTier::Standard).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].prompt, "b");
    }
}
