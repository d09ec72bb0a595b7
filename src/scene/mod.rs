//! Access to the externally owned scene: the targeted item and the canvas.

pub mod memory;

use crate::capture::selector::CaptureSource;
use crate::models::geometry::{CanvasSize, ContentSize, Vec2};
use crate::models::transform::{Alignment, ItemTransform, Placement};

pub trait SceneItem {
    fn capture_source(&self) -> &CaptureSource;
    fn content_size(&self) -> ContentSize;
    fn transform(&self) -> ItemTransform;
    /// Writes back every field of a previously captured transform.
    fn restore(&mut self, transform: &ItemTransform);
    fn set_alignment(&mut self, alignment: Alignment);
    fn set_position(&mut self, position: Vec2);
    fn apply_placement(&mut self, placement: &Placement);
}

pub trait SceneHost: Send {
    /// The configured item in the current scene, `None` once it is gone.
    fn target(&mut self) -> Option<&mut dyn SceneItem>;
    /// Canvas size, `None` when video is not configured yet.
    fn canvas_size(&self) -> Option<CanvasSize>;
}

pub use memory::{MemoryItem, MemoryScene};
