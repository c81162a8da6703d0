use crate::models::{CameraSettings, CreationAttributes, Persona};

const IDENTITY_LOCK: &str = "Use the attached reference photo as the single source of identity. \
Preserve the exact face, facial features, hair color and hairstyle, skin tone and body type of \
the person in the reference. Do not change who they are.";

const STYLE_SUFFIX: &str = "Shot as a candid, high-resolution photograph with natural lighting, \
realistic skin texture and a cohesive color grade. No text, watermarks or borders.";

pub fn compile_reference_prompt(attributes: &CreationAttributes) -> String {
    format!(
        "Create a photorealistic portrait photograph of a single person.\n\n\
         ATTRIBUTES:\n\
         - Gender: {gender}\n\
         - Age: {age}\n\
         - Ethnicity: {ethnicity}\n\
         - Build: {build}\n\
         - Height: {height}\n\
         - Eye color: {eye_color}\n\n\
         HAIR AND STYLE:\n\
         - Hair: {hair_color}, {hair_style}\n\
         - Fashion style: {fashion_style}\n\
         - Overall vibe: {vibe}\n\n\
         COMPOSITION:\n\
         - Front-facing, head and shoulders to mid-torso framing\n\
         - Neutral, softly lit studio background\n\
         - Sharp focus on the eyes, shallow depth of field\n\
         - The face must be clearly visible so it can serve as an identity reference",
        gender = attributes.gender,
        age = attributes.age,
        ethnicity = attributes.ethnicity,
        build = attributes.build,
        height = attributes.height,
        eye_color = attributes.eye_color,
        hair_color = attributes.hair_color,
        hair_style = attributes.hair_style,
        fashion_style = attributes.fashion_style,
        vibe = attributes.vibe,
    )
}

pub fn describe_rotation(rotation: f32) -> String {
    if rotation < -10.0 {
        format!("profile-left view, head turned {:.1} degrees to the left", rotation.abs())
    } else if rotation > 10.0 {
        format!("profile-right view, head turned {:.1} degrees to the right", rotation)
    } else {
        "front-facing view".to_string()
    }
}

pub fn describe_vertical(vertical: f32) -> &'static str {
    if vertical < -0.3 {
        "low-angle shot"
    } else if vertical > 0.3 {
        "high-angle shot"
    } else {
        "eye-level shot"
    }
}

pub fn describe_zoom(zoom: f32) -> &'static str {
    if zoom > 7.0 {
        "extreme close-up"
    } else if zoom > 3.0 {
        "medium close-up"
    } else {
        "full-body shot"
    }
}

pub fn describe_lens(is_wide_angle: bool) -> &'static str {
    if is_wide_angle {
        "wide-angle lens (24mm) with visible environmental context"
    } else {
        "portrait lens (85mm) with soft background compression"
    }
}

pub fn compile_studio_prompt(persona: &Persona, camera: &CameraSettings) -> String {
    format!(
        "{identity}\n\n\
         CAMERA:\n\
         - Angle: {rotation}\n\
         - Height: {vertical}\n\
         - Framing: {zoom}\n\
         - Lens: {lens}\n\n\
         SUBJECT:\n\
         - {nickname}, {age_range}, {occupation}\n\
         - Personality: {personality}\n\
         - Vibe: {vibe}\n\n\
         Clean studio backdrop. {style}",
        identity = IDENTITY_LOCK,
        rotation = describe_rotation(camera.rotation),
        vertical = describe_vertical(camera.vertical),
        zoom = describe_zoom(camera.zoom),
        lens = describe_lens(camera.is_wide_angle),
        nickname = persona.nickname,
        age_range = persona.age_range,
        occupation = persona.occupation,
        personality = persona.personality,
        vibe = persona.vibe,
        style = STYLE_SUFFIX,
    )
}

pub fn compile_scene_variant_prompt(persona: &Persona, scene_text: &str) -> String {
    format!(
        "{identity}\n\n\
         SCENE:\n{scene}\n\n\
         The person is {nickname} ({age_range}, {occupation}); keep their {vibe} vibe.\n\n\
         {style}",
        identity = IDENTITY_LOCK,
        scene = scene_text.trim(),
        nickname = persona.nickname,
        age_range = persona.age_range,
        occupation = persona.occupation,
        vibe = persona.vibe,
        style = STYLE_SUFFIX,
    )
}

pub fn compile_analysis_prompt() -> &'static str {
    "Analyze the person in this photo and invent a plausible, fictional persona for them. \
     Return a nickname, an age range (for example \"25-30\"), an occupation, a personality, a \
     lifestyle, an overall vibe, a one-line description, and three to six short lowercase tags. \
     Base it only on what is visible; do not identify the real person."
}

pub fn compile_story_prompt(persona: &Persona, scenario: Option<&str>, scene_count: usize) -> String {
    let scenario = match scenario.map(str::trim).filter(|s| !s.is_empty()) {
        Some(text) => format!("The story follows this scenario: {}", text),
        None => "Pick a scenario that fits their lifestyle.".to_string(),
    };
    let tags = if persona.tags.is_empty() {
        "none".to_string()
    } else {
        persona.tags.join(", ")
    };

    format!(
        "Plan a photo story of exactly {count} scenes for this persona.\n\n\
         PERSONA:\n\
         - Nickname: {nickname}\n\
         - Age range: {age_range}\n\
         - Occupation: {occupation}\n\
         - Personality: {personality}\n\
         - Lifestyle: {lifestyle}\n\
         - Vibe: {vibe}\n\
         - Description: {description}\n\
         - Tags: {tags}\n\n\
         {scenario}\n\n\
         Give the story a short title. Each scene is one or two sentences describing the \
         setting, action, outfit and lighting of a single photo, written so it can be rendered \
         on its own.",
        count = scene_count,
        nickname = persona.nickname,
        age_range = persona.age_range,
        occupation = persona.occupation,
        personality = persona.personality,
        lifestyle = persona.lifestyle,
        vibe = persona.vibe,
        description = persona.description,
        tags = tags,
        scenario = scenario,
    )
}
