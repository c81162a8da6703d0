use serde::{Deserialize, Serialize};

/// A synthetic identity derived from a reference image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Persona {
    pub nickname: String,
    pub age_range: String,
    pub occupation: String,
    pub personality: String,
    pub lifestyle: String,
    pub vibe: String,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Attributes used to create a reference portrait from scratch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreationAttributes {
    pub gender: String,
    pub age: String,
    pub ethnicity: String,
    pub build: String,
    pub height: String,
    pub eye_color: String,
    pub hair_color: String,
    pub hair_style: String,
    pub fashion_style: String,
    pub vibe: String,
}

/// Virtual camera placement for studio shots.
///
/// `rotation` is in degrees (negative turns the subject's profile left),
/// `vertical` is a normalized tilt where negative looks up at the subject,
/// and `zoom` grows from full-body framing towards a close-up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraSettings {
    pub rotation: f32,
    pub vertical: f32,
    pub zoom: f32,
    pub is_wide_angle: bool,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            rotation: 0.0,
            vertical: 0.0,
            zoom: 0.0,
            is_wide_angle: false,
        }
    }
}

impl CameraSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rotation(mut self, degrees: f32) -> Self {
        self.rotation = degrees;
        self
    }

    pub fn with_vertical(mut self, vertical: f32) -> Self {
        self.vertical = vertical;
        self
    }

    pub fn with_zoom(mut self, zoom: f32) -> Self {
        self.zoom = zoom;
        self
    }

    pub fn with_wide_angle(mut self, enabled: bool) -> Self {
        self.is_wide_angle = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn persona_reads_camel_case_analysis_output() {
        let json = r#"{
            "nickname": "Mika",
            "ageRange": "25-30",
            "occupation": "Barista",
            "personality": "Warm",
            "lifestyle": "Urban",
            "vibe": "Cozy",
            "description": "A barista who loves film cameras."
        }"#;
        let persona: Persona = serde_json::from_str(json).unwrap();
        assert_eq!(persona.age_range, "25-30");
        assert!(persona.tags.is_empty());
    }
}
