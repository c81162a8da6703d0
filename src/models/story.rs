use serde::{Deserialize, Serialize};

pub const DEFAULT_STORY_SCENES: usize = 4;

/// A short photo story: an ordered list of scene descriptions for one persona.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryPlan {
    #[serde(default)]
    pub title: String,
    pub scenes: Vec<String>,
}
