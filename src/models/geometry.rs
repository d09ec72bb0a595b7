//! Plain geometry shared by the mapper, the placement math and the scene
//! host: device rectangles, content sizes, crop insets and 2D vectors.

use serde::{Deserialize, Serialize};

/// Pointer position in device (screen) pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DevicePoint {
    pub x: f64,
    pub y: f64,
}

impl DevicePoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Capture region in device pixels, right/bottom exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl DeviceRect {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(self) -> i64 {
        self.right as i64 - self.left as i64
    }

    pub fn height(self) -> i64 {
        self.bottom as i64 - self.top as i64
    }

    pub fn is_degenerate(self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }

    pub fn contains(self, point: DevicePoint) -> bool {
        point.x >= self.left as f64
            && point.x < self.right as f64
            && point.y >= self.top as f64
            && point.y < self.bottom as f64
    }
}

/// Point in the content pixel space of the zoomed source.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ContentPoint {
    pub x: f64,
    pub y: f64,
}

impl ContentPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Source dimensions in content pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContentSize {
    pub width: u32,
    pub height: u32,
}

impl ContentSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn center(self) -> ContentPoint {
        ContentPoint::new(self.width as f64 * 0.5, self.height as f64 * 0.5)
    }

    /// Size left after cropping. An axis cropped to nothing (or less) keeps
    /// its full extent.
    pub fn visible(self, crop: CropInsets) -> (f64, f64) {
        let vis_w = self.width as i64 - crop.left as i64 - crop.right as i64;
        let vis_h = self.height as i64 - crop.top as i64 - crop.bottom as i64;
        (
            if vis_w > 0 { vis_w as f64 } else { self.width as f64 },
            if vis_h > 0 { vis_h as f64 } else { self.height as f64 },
        )
    }
}

/// Output composition size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

impl CanvasSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self::new(1920.0, 1080.0)
    }
}

/// Pixels trimmed from each edge of the content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CropInsets {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn splat(v: f64) -> Self {
        Self { x: v, y: v }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_contains_is_right_bottom_exclusive() {
        let rect = DeviceRect::new(0, 0, 100, 50);
        assert!(rect.contains(DevicePoint::new(0.0, 0.0)));
        assert!(rect.contains(DevicePoint::new(99.5, 49.5)));
        assert!(!rect.contains(DevicePoint::new(100.0, 10.0)));
        assert!(!rect.contains(DevicePoint::new(10.0, 50.0)));
        assert!(!rect.contains(DevicePoint::new(-1.0, 10.0)));
    }

    #[test]
    fn degenerate_rects_are_detected() {
        assert!(DeviceRect::new(10, 10, 10, 20).is_degenerate());
        assert!(DeviceRect::new(10, 10, 20, 5).is_degenerate());
        assert!(!DeviceRect::new(-1920, 0, 0, 1080).is_degenerate());
    }

    #[test]
    fn visible_size_subtracts_crop_and_falls_back_when_overcropped() {
        let size = ContentSize::new(1920, 1080);
        let crop = CropInsets {
            left: 100,
            top: 40,
            right: 20,
            bottom: 40,
        };
        assert_eq!(size.visible(crop), (1800.0, 1000.0));

        let overcrop = CropInsets {
            left: 1000,
            top: 0,
            right: 1000,
            bottom: 1080,
        };
        assert_eq!(size.visible(overcrop), (1920.0, 1080.0));
    }
}
