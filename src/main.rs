use persona_studio::{
    logger, AspectRatio, ClientProvider, FileCredentialStore, ModelTier,
    ReferenceImage, StudioConfig,
};
use std::env;
use std::fs;
use std::path::Path;
use std::sync::Arc;

const USAGE: &str = "usage: persona-studio <reference-image> [scenario] [--tier standard|pro] [--aspect W:H] [--out DIR]";

struct Args {
    reference: String,
    scenario: Option<String>,
    tier: ModelTier,
    aspect_ratio: AspectRatio,
    out_dir: String,
}

fn parse_args() -> Result<Args, Box<dyn std::error::Error>> {
    let mut positional = Vec::new();
    let mut tier = ModelTier::Standard;
    let mut aspect_ratio = AspectRatio::Portrait3x4;
    let mut out_dir = "generated".to_string();

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--tier" => tier = args.next().ok_or(USAGE)?.parse()?,
            "--aspect" => aspect_ratio = args.next().ok_or(USAGE)?.parse()?,
            "--out" => out_dir = args.next().ok_or(USAGE)?,
            _ => positional.push(arg),
        }
    }

    let mut positional = positional.into_iter();
    let reference = positional.next().ok_or(USAGE)?;
    Ok(Args {
        reference,
        scenario: positional.next(),
        tier,
        aspect_ratio,
        out_dir,
    })
}

fn mime_for(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase) {
        Some(ext) if ext == "jpg" || ext == "jpeg" => "image/jpeg",
        Some(ext) if ext == "webp" => "image/webp",
        _ => "image/png",
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dotenv_loaded = dotenv::dotenv().is_ok();
    logger::init()?;
    if !dotenv_loaded {
        log::debug!("No .env file found, using system environment variables");
    }

    let args = parse_args()?;
    let config = StudioConfig::from_env();
    logger::log_config_info(&config);

    let key_file = env::var("STUDIO_KEY_FILE").unwrap_or_else(|_| ".persona-studio/api_key".into());
    let provider = ClientProvider::new(Arc::new(FileCredentialStore::new(key_file)), config);

    let path = Path::new(&args.reference);
    let bytes = fs::read(path)?;
    let reference = ReferenceImage::from_bytes(&bytes, mime_for(path));
    let reference_uri = format!("data:{};base64,{}", reference.mime_type, reference.data);
    log::info!("Loaded reference image {} ({} bytes)", path.display(), bytes.len());

    let studio = provider.get_client()?;
    let persona = studio.analyze_persona(&reference_uri).await?;
    log::info!("Persona: {} - {}", persona.nickname, persona.description);

    let studio = provider.get_client()?;
    let plan = studio.plan_story(&persona, args.scenario.as_deref()).await?;
    log::info!("Story \"{}\" with {} scenes", plan.title, plan.scenes.len());
    for (i, scene) in plan.scenes.iter().enumerate() {
        log::info!("  {}. {}", i + 1, scene);
    }

    let studio = provider.get_client()?;
    let items = studio
        .generate_scene_batch(&reference_uri, &persona, &plan.scenes, args.tier, args.aspect_ratio)
        .await?;

    fs::create_dir_all(&args.out_dir)?;
    for (i, item) in items.iter().enumerate() {
        let filename = Path::new(&args.out_dir).join(format!(
            "{}_{:02}_{}.png",
            persona.nickname.to_lowercase().replace(' ', "_"),
            i + 1,
            chrono::Utc::now().timestamp()
        ));
        fs::write(&filename, item.image.decode()?)?;
        log::info!("Saved {} ({})", filename.display(), item.prompt);
    }

    log::info!(
        "Rendered {} of {} scenes into {}",
        items.len(),
        plan.scenes.len(),
        args.out_dir
    );
    Ok(())
}
