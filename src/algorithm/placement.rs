//! Zoom and clamp placement of the item on the canvas.
//!
//! The follow point is pushed to the canvas center, then the top-left corner
//! is clamped per axis so an item larger than the canvas never exposes empty
//! canvas and an item smaller than the canvas is centered.

use crate::models::geometry::{CanvasSize, ContentPoint, ContentSize, CropInsets, Vec2};
use crate::models::transform::Placement;

#[derive(Debug, Clone, Copy)]
pub struct PlacementInput {
    /// Raw animation progress; eased here.
    pub progress: f64,
    /// Maximum zoom. Values at or below 1 pan without zooming.
    pub zoom_factor: f64,
    /// Scale the visible content up to cover the whole canvas.
    pub cover: bool,
    pub original_scale: Vec2,
    pub content: ContentSize,
    pub crop: CropInsets,
    pub canvas: CanvasSize,
    pub follow: ContentPoint,
}

/// `3t² − 2t³`, zero slope at both ends.
pub fn smoothstep(t: f64) -> f64 {
    t * t * (3.0 - 2.0 * t)
}

pub fn eased_zoom(progress: f64, zoom_factor: f64) -> f64 {
    let tt = smoothstep(progress.clamp(0.0, 1.0));
    let target = if zoom_factor.is_finite() {
        zoom_factor.max(1.0)
    } else {
        1.0
    };
    1.0 + (target - 1.0) * tt
}

/// Smallest uniform scale at which the visible content covers the canvas.
pub fn cover_scale(visible: (f64, f64), canvas: CanvasSize) -> f64 {
    let (vis_w, vis_h) = visible;
    (canvas.width / vis_w).max(canvas.height / vis_h)
}

/// Clamps or centers one axis of the item's top-left corner.
pub fn clamp_axis(top_left: f64, item_size: f64, canvas_size: f64) -> f64 {
    if item_size >= canvas_size {
        top_left.clamp(canvas_size - item_size, 0.0)
    } else {
        (canvas_size - item_size) * 0.5
    }
}

/// Returns `None` for empty content; the caller then restores only the
/// baseline position.
pub fn compute_placement(input: &PlacementInput) -> Option<Placement> {
    if input.content.is_empty() {
        return None;
    }

    let z = eased_zoom(input.progress, input.zoom_factor);
    let (vis_w, vis_h) = input.content.visible(input.crop);

    let scale = if input.cover {
        let cover = cover_scale((vis_w, vis_h), input.canvas);
        Vec2::new(
            input.original_scale.x.max(cover) * z,
            input.original_scale.y.max(cover) * z,
        )
    } else {
        Vec2::new(input.original_scale.x * z, input.original_scale.y * z)
    };

    // Normalize against the full content, then land inside the cropped area.
    let rel_x = (input.follow.x / input.content.width as f64).clamp(0.0, 1.0);
    let rel_y = (input.follow.y / input.content.height as f64).clamp(0.0, 1.0);
    let crop_left = input.crop.left as f64;
    let crop_top = input.crop.top as f64;
    let adj_x = crop_left + rel_x * vis_w;
    let adj_y = crop_top + rel_y * vis_h;

    let top_left_x = input.canvas.width * 0.5 - (adj_x - crop_left) * scale.x;
    let top_left_y = input.canvas.height * 0.5 - (adj_y - crop_top) * scale.y;

    let item_w = vis_w * scale.x;
    let item_h = vis_h * scale.y;

    Some(Placement {
        scale,
        position: Vec2::new(
            clamp_axis(top_left_x, item_w, input.canvas.width),
            clamp_axis(top_left_y, item_h, input.canvas.height),
        ),
    })
}
