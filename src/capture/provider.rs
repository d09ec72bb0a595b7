//! The capture-layer seam: where the pointer is, and which device rectangle a
//! capture source is looking at. One implementation per platform.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::models::geometry::{DevicePoint, DeviceRect};

use super::selector::{match_monitor, match_window, CaptureSource, MonitorInfo, WindowInfo};

pub trait CaptureProvider: Send {
    /// Device rectangle observed by `source`, or `None` when the display or
    /// window cannot be found.
    fn resolve_region(&self, source: &CaptureSource) -> Option<DeviceRect>;

    /// Current pointer position, or `None` when the platform cannot tell.
    fn cursor_position(&self) -> Option<DevicePoint>;
}

/// Snapshot of enumerated displays and top-level windows.
#[derive(Debug, Clone, Default)]
pub struct DisplayCatalog {
    pub monitors: Vec<MonitorInfo>,
    pub windows: Vec<WindowInfo>,
}

impl DisplayCatalog {
    pub fn resolve(&self, source: &CaptureSource) -> Option<DeviceRect> {
        match source {
            CaptureSource::Display { monitor } => match_monitor(monitor, &self.monitors),
            CaptureSource::Window { window } => match_window(window, &self.windows),
            CaptureSource::Other => None,
        }
    }
}

/// Last pointer position published by the input hook thread.
pub type SharedPointer = Arc<Mutex<Option<DevicePoint>>>;

/// Resolves sources against a fixed catalog and reads the pointer the hook
/// thread keeps up to date.
#[derive(Debug, Clone)]
pub struct CatalogProvider {
    catalog: DisplayCatalog,
    pointer: SharedPointer,
}

impl CatalogProvider {
    pub fn new(catalog: DisplayCatalog, pointer: SharedPointer) -> Self {
        Self { catalog, pointer }
    }

    pub fn catalog(&self) -> &DisplayCatalog {
        &self.catalog
    }
}

impl CaptureProvider for CatalogProvider {
    fn resolve_region(&self, source: &CaptureSource) -> Option<DeviceRect> {
        self.catalog.resolve(source)
    }

    fn cursor_position(&self) -> Option<DevicePoint> {
        *self.pointer.lock()
    }
}
