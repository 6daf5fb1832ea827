use serde::{Deserialize, Serialize};

/// RGBA color in the 0-255 range expected by the map renderer.
pub type Rgba = [u8; 4];

/// Pre-styled entry handed to the renderer, positions are `[longitude, latitude]`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderRecord {
    pub id: String,
    pub position: [f64; 2],
    pub original_position: [f64; 2],
    pub color: Rgba,
    /// Meters.
    pub radius: f64,
    pub icon: String,
    pub visible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster_size: Option<usize>,
}
