//! Resolution of capture sources against enumerated displays and windows.

use serde::{Deserialize, Serialize};

use crate::models::geometry::DeviceRect;

/// How a display-capture source names its monitor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "by", rename_all = "camelCase")]
pub enum MonitorSelector {
    /// Device name such as `\\.\DISPLAY2`.
    Device { name: String },
    /// Position in enumeration order.
    Index { index: i64 },
}

/// `title:class:exe` selector of a window-capture source. Empty parts match
/// anything.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WindowSelector {
    pub title: String,
    pub class: String,
    pub exe: String,
}

/// Kind of content source, resolved once when the source is registered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum CaptureSource {
    Display { monitor: MonitorSelector },
    Window { window: WindowSelector },
    /// Anything that is not a screen capture; never maps the cursor.
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorInfo {
    pub device: String,
    pub rect: DeviceRect,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowInfo {
    pub title: String,
    pub class: String,
    pub exe: String,
    pub visible: bool,
    pub rect: DeviceRect,
}

pub fn match_monitor(selector: &MonitorSelector, monitors: &[MonitorInfo]) -> Option<DeviceRect> {
    match selector {
        MonitorSelector::Device { name } => monitors
            .iter()
            .find(|monitor| {
                monitor.device == *name
                    || display_number(name)
                        .is_some_and(|want| display_number(&monitor.device) == Some(want))
            })
            .map(|monitor| monitor.rect),
        MonitorSelector::Index { index } => {
            let len = monitors.len() as i64;
            // Zero-based first, then one-based for selectors counted from 1.
            let position = if (0..len).contains(index) {
                *index
            } else if (1..=len).contains(index) {
                index - 1
            } else {
                return None;
            };
            monitors.get(position as usize).map(|monitor| monitor.rect)
        }
    }
}

/// Number following `DISPLAY` in a device name.
fn display_number(device: &str) -> Option<u32> {
    let upper = device.to_ascii_uppercase();
    let start = upper.find("DISPLAY")? + "DISPLAY".len();
    let digits: String = upper[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

/// Splits from the right so titles containing `:` survive.
pub fn parse_window_selector(selector: &str) -> WindowSelector {
    let mut parsed = WindowSelector::default();
    let Some((rest, exe)) = selector.rsplit_once(':').filter(|(rest, _)| !rest.is_empty()) else {
        parsed.title = selector.to_string();
        return parsed;
    };
    parsed.exe = exe.to_string();

    match rest.rsplit_once(':').filter(|(title, _)| !title.is_empty()) {
        Some((title, class)) => {
            parsed.title = title.to_string();
            parsed.class = class.to_string();
        }
        None => parsed.title = rest.to_string(),
    }
    parsed
}

pub fn match_window(selector: &WindowSelector, windows: &[WindowInfo]) -> Option<DeviceRect> {
    let want_title = selector.title.trim().to_lowercase();
    let want_class = selector.class.trim();
    let want_exe = selector.exe.trim();

    windows
        .iter()
        .filter(|window| window.visible)
        .find(|window| {
            (want_exe.is_empty() || window.exe.eq_ignore_ascii_case(want_exe))
                && (want_class.is_empty() || window.class.eq_ignore_ascii_case(want_class))
                && (want_title.is_empty() || window.title.to_lowercase().contains(&want_title))
        })
        .map(|window| window.rect)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monitors() -> Vec<MonitorInfo> {
        vec![
            MonitorInfo {
                device: r"\\.\DISPLAY1".to_string(),
                rect: DeviceRect::new(0, 0, 1920, 1080),
            },
            MonitorInfo {
                device: r"\\.\DISPLAY2".to_string(),
                rect: DeviceRect::new(1920, 0, 4480, 1440),
            },
        ]
    }

    #[test]
    fn monitor_by_exact_device_name() {
        let selector = MonitorSelector::Device {
            name: r"\\.\DISPLAY2".to_string(),
        };
        assert_eq!(
            match_monitor(&selector, &monitors()),
            Some(DeviceRect::new(1920, 0, 4480, 1440))
        );
    }

    #[test]
    fn monitor_by_display_number() {
        let selector = MonitorSelector::Device {
            name: "DISPLAY1".to_string(),
        };
        assert_eq!(
            match_monitor(&selector, &monitors()),
            Some(DeviceRect::new(0, 0, 1920, 1080))
        );
        let missing = MonitorSelector::Device {
            name: "DISPLAY7".to_string(),
        };
        assert_eq!(match_monitor(&missing, &monitors()), None);
    }

    #[test]
    fn monitor_by_index_prefers_zero_based() {
        let zero = MonitorSelector::Index { index: 0 };
        assert_eq!(
            match_monitor(&zero, &monitors()),
            Some(DeviceRect::new(0, 0, 1920, 1080))
        );
        let one_based_last = MonitorSelector::Index { index: 2 };
        assert_eq!(
            match_monitor(&one_based_last, &monitors()),
            Some(DeviceRect::new(1920, 0, 4480, 1440))
        );
        assert_eq!(match_monitor(&MonitorSelector::Index { index: 3 }, &monitors()), None);
        assert_eq!(match_monitor(&MonitorSelector::Index { index: -1 }, &monitors()), None);
        assert_eq!(match_monitor(&zero, &[]), None);
    }

    #[test]
    fn parses_window_selector_parts() {
        let parsed = parse_window_selector("Untitled - Notepad:Notepad:notepad.exe");
        assert_eq!(parsed.title, "Untitled - Notepad");
        assert_eq!(parsed.class, "Notepad");
        assert_eq!(parsed.exe, "notepad.exe");

        let title_only = parse_window_selector("Just a title");
        assert_eq!(title_only.title, "Just a title");
        assert!(title_only.class.is_empty() && title_only.exe.is_empty());

        let two_parts = parse_window_selector("Editor:code.exe");
        assert_eq!(two_parts.title, "Editor");
        assert_eq!(two_parts.exe, "code.exe");
        assert!(two_parts.class.is_empty());
    }

    #[test]
    fn window_matching_rules() {
        let windows = vec![
            WindowInfo {
                title: "Hidden Notepad".to_string(),
                class: "Notepad".to_string(),
                exe: "notepad.exe".to_string(),
                visible: false,
                rect: DeviceRect::new(0, 0, 10, 10),
            },
            WindowInfo {
                title: "notes.txt - Notepad".to_string(),
                class: "Notepad".to_string(),
                exe: "Notepad.exe".to_string(),
                visible: true,
                rect: DeviceRect::new(100, 100, 900, 700),
            },
        ];

        let selector = parse_window_selector("NOTEPAD:notepad:NOTEPAD.EXE");
        assert_eq!(
            match_window(&selector, &windows),
            Some(DeviceRect::new(100, 100, 900, 700))
        );

        let wrong_exe = parse_window_selector("Notepad:Notepad:wordpad.exe");
        assert_eq!(match_window(&wrong_exe, &windows), None);
    }
}
