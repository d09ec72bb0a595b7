//! Global input hooks through rdev.
//!
//! One named thread runs `rdev::listen` for the lifetime of the process. It
//! publishes the pointer position for the capture provider and turns key and
//! button events into [`InputEdge`]s carrying the modifier set held after the
//! edge.

use std::thread::JoinHandle;

use crate::capture::provider::{DisplayCatalog, SharedPointer};
use crate::capture::selector::MonitorInfo;
use crate::error::{Result, ZoomError};
use crate::models::geometry::{DevicePoint, DeviceRect};

use super::keys::{KeyCode, Modifier, MouseButton, Side};
use super::modifiers::ModifierTracker;
use super::trigger::InputEdge;

pub const HOOK_THREAD_NAME: &str = "zoomtrack-hook";

/// Spawns the hook thread. `sink` runs on that thread for every key or
/// button edge and must not block for long.
pub fn spawn_hook_thread<F>(pointer: SharedPointer, mut sink: F) -> Result<JoinHandle<()>>
where
    F: FnMut(InputEdge) + Send + 'static,
{
    std::thread::Builder::new()
        .name(HOOK_THREAD_NAME.to_string())
        .spawn(move || {
            let mut tracker = ModifierTracker::new();
            if let Err(e) = rdev::listen(move |event| {
                if let Some(edge) = translate(&event.event_type, &mut tracker, &pointer) {
                    sink(edge);
                }
            }) {
                log::error!("rdev::listen error: {e:?}");
            }
        })
        .map_err(|e| ZoomError::Hook(format!("failed to spawn hook thread: {e}")))
}

/// Catalog with the primary display at the origin, named `DISPLAY1`.
pub fn primary_display_catalog() -> Result<DisplayCatalog> {
    let (width, height) =
        rdev::display_size().map_err(|e| ZoomError::Hook(format!("display size: {e:?}")))?;
    let width = i32::try_from(width).unwrap_or(i32::MAX);
    let height = i32::try_from(height).unwrap_or(i32::MAX);
    log::info!("primary display {width}x{height}");
    Ok(DisplayCatalog {
        monitors: vec![MonitorInfo {
            device: "DISPLAY1".to_string(),
            rect: DeviceRect::new(0, 0, width, height),
        }],
        windows: Vec::new(),
    })
}

/// Updates hook-side state for one event and returns the edge it produces.
pub fn translate(
    event: &rdev::EventType,
    tracker: &mut ModifierTracker,
    pointer: &SharedPointer,
) -> Option<InputEdge> {
    match event {
        rdev::EventType::MouseMove { x, y } => {
            *pointer.lock() = Some(DevicePoint::new(*x, *y));
            None
        }
        rdev::EventType::KeyPress(key) => {
            let key = key_from_rdev(*key);
            let modifiers = tracker.apply(key, true);
            Some(InputEdge::key_down(key, modifiers))
        }
        rdev::EventType::KeyRelease(key) => {
            let key = key_from_rdev(*key);
            let modifiers = tracker.apply(key, false);
            Some(InputEdge::key_up(key, modifiers))
        }
        rdev::EventType::ButtonPress(button) => {
            button_from_rdev(*button).map(|b| InputEdge::button_down(b, tracker.current()))
        }
        rdev::EventType::ButtonRelease(button) => {
            button_from_rdev(*button).map(|b| InputEdge::button_up(b, tracker.current()))
        }
        rdev::EventType::Wheel { .. } => None,
    }
}

pub fn button_from_rdev(button: rdev::Button) -> Option<MouseButton> {
    match button {
        rdev::Button::Left => Some(MouseButton::Left),
        rdev::Button::Right => Some(MouseButton::Right),
        rdev::Button::Middle => Some(MouseButton::Middle),
        // Windows reports XBUTTON1/2 as 1/2, X11 as buttons 8/9.
        rdev::Button::Unknown(1 | 8) => Some(MouseButton::X1),
        rdev::Button::Unknown(2 | 9) => Some(MouseButton::X2),
        rdev::Button::Unknown(_) => None,
    }
}

pub fn key_from_rdev(key: rdev::Key) -> KeyCode {
    use rdev::Key;

    match key {
        Key::ControlLeft => KeyCode::Mod(Modifier::Ctrl, Side::Left),
        Key::ControlRight => KeyCode::Mod(Modifier::Ctrl, Side::Right),
        Key::Alt => KeyCode::Mod(Modifier::Alt, Side::Left),
        Key::AltGr => KeyCode::Mod(Modifier::Alt, Side::Right),
        Key::ShiftLeft => KeyCode::Mod(Modifier::Shift, Side::Left),
        Key::ShiftRight => KeyCode::Mod(Modifier::Shift, Side::Right),
        Key::MetaLeft => KeyCode::Mod(Modifier::Meta, Side::Left),
        Key::MetaRight => KeyCode::Mod(Modifier::Meta, Side::Right),

        Key::F1 => KeyCode::F(1),
        Key::F2 => KeyCode::F(2),
        Key::F3 => KeyCode::F(3),
        Key::F4 => KeyCode::F(4),
        Key::F5 => KeyCode::F(5),
        Key::F6 => KeyCode::F(6),
        Key::F7 => KeyCode::F(7),
        Key::F8 => KeyCode::F(8),
        Key::F9 => KeyCode::F(9),
        Key::F10 => KeyCode::F(10),
        Key::F11 => KeyCode::F(11),
        Key::F12 => KeyCode::F(12),

        Key::Space => KeyCode::Space,
        Key::Return => KeyCode::Return,
        Key::Escape => KeyCode::Escape,
        Key::Tab => KeyCode::Tab,
        Key::Backspace => KeyCode::Backspace,
        Key::LeftArrow => KeyCode::Left,
        Key::RightArrow => KeyCode::Right,
        Key::UpArrow => KeyCode::Up,
        Key::DownArrow => KeyCode::Down,
        Key::Insert => KeyCode::Insert,
        Key::Delete => KeyCode::Delete,
        Key::Home => KeyCode::Home,
        Key::End => KeyCode::End,
        Key::PageUp => KeyCode::PageUp,
        Key::PageDown => KeyCode::PageDown,

        Key::Num0 => KeyCode::Char('0'),
        Key::Num1 => KeyCode::Char('1'),
        Key::Num2 => KeyCode::Char('2'),
        Key::Num3 => KeyCode::Char('3'),
        Key::Num4 => KeyCode::Char('4'),
        Key::Num5 => KeyCode::Char('5'),
        Key::Num6 => KeyCode::Char('6'),
        Key::Num7 => KeyCode::Char('7'),
        Key::Num8 => KeyCode::Char('8'),
        Key::Num9 => KeyCode::Char('9'),

        Key::KeyA => KeyCode::Char('A'),
        Key::KeyB => KeyCode::Char('B'),
        Key::KeyC => KeyCode::Char('C'),
        Key::KeyD => KeyCode::Char('D'),
        Key::KeyE => KeyCode::Char('E'),
        Key::KeyF => KeyCode::Char('F'),
        Key::KeyG => KeyCode::Char('G'),
        Key::KeyH => KeyCode::Char('H'),
        Key::KeyI => KeyCode::Char('I'),
        Key::KeyJ => KeyCode::Char('J'),
        Key::KeyK => KeyCode::Char('K'),
        Key::KeyL => KeyCode::Char('L'),
        Key::KeyM => KeyCode::Char('M'),
        Key::KeyN => KeyCode::Char('N'),
        Key::KeyO => KeyCode::Char('O'),
        Key::KeyP => KeyCode::Char('P'),
        Key::KeyQ => KeyCode::Char('Q'),
        Key::KeyR => KeyCode::Char('R'),
        Key::KeyS => KeyCode::Char('S'),
        Key::KeyT => KeyCode::Char('T'),
        Key::KeyU => KeyCode::Char('U'),
        Key::KeyV => KeyCode::Char('V'),
        Key::KeyW => KeyCode::Char('W'),
        Key::KeyX => KeyCode::Char('X'),
        Key::KeyY => KeyCode::Char('Y'),
        Key::KeyZ => KeyCode::Char('Z'),

        Key::Unknown(code) => KeyCode::Other(code),
        _ => KeyCode::Other(0),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;

    use super::*;
    use crate::input::keys::Modifiers;
    use crate::input::trigger::{EdgeDevice, EdgeKind};

    fn pointer() -> SharedPointer {
        Arc::new(Mutex::new(None))
    }

    #[test]
    fn move_updates_pointer_without_edge() {
        let pointer = pointer();
        let mut tracker = ModifierTracker::new();
        let edge = translate(
            &rdev::EventType::MouseMove { x: 10.0, y: 20.0 },
            &mut tracker,
            &pointer,
        );
        assert_eq!(edge, None);
        assert_eq!(*pointer.lock(), Some(DevicePoint::new(10.0, 20.0)));
    }

    #[test]
    fn key_edges_carry_modifiers_after_the_edge() {
        let pointer = pointer();
        let mut tracker = ModifierTracker::new();

        let ctrl = translate(
            &rdev::EventType::KeyPress(rdev::Key::ControlLeft),
            &mut tracker,
            &pointer,
        )
        .expect("edge");
        assert_eq!(ctrl.modifiers, Modifiers::NONE.with(Modifier::Ctrl));

        let f1 = translate(&rdev::EventType::KeyPress(rdev::Key::F1), &mut tracker, &pointer)
            .expect("edge");
        assert_eq!(f1.kind, EdgeKind::Down);
        assert_eq!(f1.device, EdgeDevice::Key(KeyCode::F(1)));
        assert_eq!(f1.modifiers, Modifiers::NONE.with(Modifier::Ctrl));

        let released = translate(
            &rdev::EventType::KeyRelease(rdev::Key::ControlLeft),
            &mut tracker,
            &pointer,
        )
        .expect("edge");
        assert_eq!(released.modifiers, Modifiers::NONE);
    }

    #[test]
    fn side_buttons_map_on_both_platform_numberings() {
        assert_eq!(button_from_rdev(rdev::Button::Unknown(1)), Some(MouseButton::X1));
        assert_eq!(button_from_rdev(rdev::Button::Unknown(9)), Some(MouseButton::X2));
        assert_eq!(button_from_rdev(rdev::Button::Unknown(42)), None);
    }
}
