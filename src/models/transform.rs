//! Transform of the externally owned scene item and the placement the
//! engine writes back each tick.

use serde::{Deserialize, Serialize};

use super::geometry::{CropInsets, Vec2};

/// Anchor of the item's position, as a bitset of edges. Empty means centered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Alignment(pub u32);

impl Alignment {
    pub const CENTER: Alignment = Alignment(0);
    pub const LEFT: Alignment = Alignment(1 << 0);
    pub const RIGHT: Alignment = Alignment(1 << 1);
    pub const TOP: Alignment = Alignment(1 << 2);
    pub const BOTTOM: Alignment = Alignment(1 << 3);
    pub const TOP_LEFT: Alignment = Alignment((1 << 2) | (1 << 0));
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BoundsType {
    #[default]
    None,
    Stretch,
    ScaleInner,
    ScaleOuter,
    ScaleToWidth,
    ScaleToHeight,
    MaxOnly,
}

/// Full item transform. Doubles as the per-cycle snapshot restored on
/// deactivation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemTransform {
    pub position: Vec2,
    pub scale: Vec2,
    pub rotation: f32,
    pub alignment: Alignment,
    pub bounds_type: BoundsType,
    pub bounds_alignment: Alignment,
    pub bounds: Vec2,
    pub crop: CropInsets,
}

impl Default for ItemTransform {
    fn default() -> Self {
        Self {
            position: Vec2::default(),
            scale: Vec2::splat(1.0),
            rotation: 0.0,
            alignment: Alignment::TOP_LEFT,
            bounds_type: BoundsType::None,
            bounds_alignment: Alignment::CENTER,
            bounds: Vec2::default(),
            crop: CropInsets::default(),
        }
    }
}

/// Scale and top-left position computed for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub scale: Vec2,
    pub position: Vec2,
}
