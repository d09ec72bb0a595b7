//! Device → content coordinate mapping.

use crate::models::geometry::{ContentPoint, ContentSize, DevicePoint, DeviceRect};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MappedCursor {
    pub position: ContentPoint,
    /// Whether the cursor was inside the region before being clamped onto it.
    pub inside: bool,
}

/// Maps a device-space cursor into the content pixels of a source that
/// captures `region`.
///
/// Once the region resolves a value is always produced: a cursor outside the
/// region is pinned to the nearest edge pixel and reported with
/// `inside == false`. Missing or degenerate regions and empty content yield
/// `None`.
pub fn map_cursor(
    cursor: DevicePoint,
    region: Option<DeviceRect>,
    content: ContentSize,
) -> Option<MappedCursor> {
    let region = region?;
    if region.is_degenerate() || content.is_empty() {
        return None;
    }

    let inside = region.contains(cursor);
    let left = region.left as f64;
    let top = region.top as f64;
    let width = region.width() as f64;
    let height = region.height() as f64;

    // [left, right) in whole device pixels: the last addressable column is right - 1.
    let clamped_x = cursor.x.clamp(left, left + width - 1.0);
    let clamped_y = cursor.y.clamp(top, top + height - 1.0);

    let rel_x = (clamped_x - left) / width;
    let rel_y = (clamped_y - top) / height;

    Some(MappedCursor {
        position: ContentPoint::new(
            rel_x * content.width as f64,
            rel_y * content.height as f64,
        ),
        inside,
    })
}
