use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::util::easing::EasingFunction;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Animation", inline)]
#[serde(default)]
/// Timing shared by every chart.
pub struct AnimationOptions {
    /// Easing curve applied to every transition.
    #[schemars(title = "Easing")]
    pub easing: EasingFunction,
    /// Seed for color allocation; `None` draws from the OS.
    #[schemars(skip)]
    pub color_seed: Option<u64>,
}

impl Default for AnimationOptions {
    fn default() -> Self {
        Self {
            easing: EasingFunction::DEFAULT,
            color_seed: None,
        }
    }
}
