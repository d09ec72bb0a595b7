//! In-process scene with a single item. Backs the headless binary and the
//! engine tests.

use crate::capture::selector::CaptureSource;
use crate::models::geometry::{CanvasSize, ContentSize, Vec2};
use crate::models::transform::{Alignment, ItemTransform, Placement};

use super::{SceneHost, SceneItem};

#[derive(Debug, Clone)]
pub struct MemoryItem {
    pub source: CaptureSource,
    pub content: ContentSize,
    pub transform: ItemTransform,
    pub restores: usize,
    pub placements: usize,
}

impl MemoryItem {
    pub fn new(source: CaptureSource, content: ContentSize) -> Self {
        Self {
            source,
            content,
            transform: ItemTransform::default(),
            restores: 0,
            placements: 0,
        }
    }
}

impl SceneItem for MemoryItem {
    fn capture_source(&self) -> &CaptureSource {
        &self.source
    }

    fn content_size(&self) -> ContentSize {
        self.content
    }

    fn transform(&self) -> ItemTransform {
        self.transform
    }

    fn restore(&mut self, transform: &ItemTransform) {
        self.transform = *transform;
        self.restores += 1;
    }

    fn set_alignment(&mut self, alignment: Alignment) {
        self.transform.alignment = alignment;
    }

    fn set_position(&mut self, position: Vec2) {
        self.transform.position = position;
    }

    fn apply_placement(&mut self, placement: &Placement) {
        log::debug!(
            "placement scale=({:.3}, {:.3}) pos=({:.1}, {:.1})",
            placement.scale.x,
            placement.scale.y,
            placement.position.x,
            placement.position.y
        );
        self.transform.scale = placement.scale;
        self.transform.position = placement.position;
        self.placements += 1;
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryScene {
    pub canvas: Option<CanvasSize>,
    pub item: Option<MemoryItem>,
}

impl MemoryScene {
    pub fn new(canvas: CanvasSize, item: MemoryItem) -> Self {
        Self {
            canvas: Some(canvas),
            item: Some(item),
        }
    }
}

impl SceneHost for MemoryScene {
    fn target(&mut self) -> Option<&mut dyn SceneItem> {
        self.item.as_mut().map(|item| item as &mut dyn SceneItem)
    }

    fn canvas_size(&self) -> Option<CanvasSize> {
        self.canvas
    }
}
