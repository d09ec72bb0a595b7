//! Device-independent key, button and modifier vocabulary plus hotkey text
//! parsing ("Ctrl+F1", "Alt+Win").

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ZoomError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    Ctrl,
    Alt,
    Shift,
    Meta,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

/// Keys a trigger can bind to. Letters are stored uppercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    F(u8),
    Space,
    Return,
    Escape,
    Tab,
    Backspace,
    Left,
    Right,
    Up,
    Down,
    Insert,
    Delete,
    Home,
    End,
    PageUp,
    PageDown,
    Mod(Modifier, Side),
    Other(u32),
}

impl KeyCode {
    pub fn modifier(self) -> Option<Modifier> {
        match self {
            KeyCode::Mod(modifier, _) => Some(modifier),
            _ => None,
        }
    }
}

impl FromStr for KeyCode {
    type Err = ZoomError;

    fn from_str(token: &str) -> Result<Self> {
        let lower = token.trim().to_ascii_lowercase();
        let mut chars = lower.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if c.is_ascii_alphanumeric() {
                return Ok(KeyCode::Char(c.to_ascii_uppercase()));
            }
        }

        if let Some(number) = lower.strip_prefix('f') {
            if let Ok(n) = number.parse::<u8>() {
                if (1..=24).contains(&n) {
                    return Ok(KeyCode::F(n));
                }
            }
        }

        let key = match lower.as_str() {
            "space" => KeyCode::Space,
            "return" | "enter" => KeyCode::Return,
            "esc" | "escape" => KeyCode::Escape,
            "tab" => KeyCode::Tab,
            "backspace" => KeyCode::Backspace,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "ins" | "insert" => KeyCode::Insert,
            "del" | "delete" => KeyCode::Delete,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pgup" | "pageup" => KeyCode::PageUp,
            "pgdown" | "pagedown" => KeyCode::PageDown,
            _ => return Err(ZoomError::InvalidHotkey(token.to_string())),
        };
        Ok(key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    X1,
    X2,
}

impl FromStr for MouseButton {
    type Err = ZoomError;

    fn from_str(name: &str) -> Result<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "left" => Ok(MouseButton::Left),
            "right" => Ok(MouseButton::Right),
            "middle" => Ok(MouseButton::Middle),
            "x1" => Ok(MouseButton::X1),
            "x2" => Ok(MouseButton::X2),
            _ => Err(ZoomError::UnknownMouseButton(name.to_string())),
        }
    }
}

/// Set of held modifiers. Left and right keys collapse into one flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        alt: false,
        shift: false,
        meta: false,
    };

    pub fn is_empty(self) -> bool {
        self == Self::NONE
    }

    pub fn contains(self, modifier: Modifier) -> bool {
        match modifier {
            Modifier::Ctrl => self.ctrl,
            Modifier::Alt => self.alt,
            Modifier::Shift => self.shift,
            Modifier::Meta => self.meta,
        }
    }

    pub fn with(mut self, modifier: Modifier) -> Self {
        self.set(modifier, true);
        self
    }

    pub fn set(&mut self, modifier: Modifier, held: bool) {
        match modifier {
            Modifier::Ctrl => self.ctrl = held,
            Modifier::Alt => self.alt = held,
            Modifier::Shift => self.shift = held,
            Modifier::Meta => self.meta = held,
        }
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = [
            (self.ctrl, "Ctrl"),
            (self.alt, "Alt"),
            (self.shift, "Shift"),
            (self.meta, "Win"),
        ];
        let held: Vec<&str> = names
            .iter()
            .filter_map(|(on, name)| on.then_some(*name))
            .collect();
        if held.is_empty() {
            f.write_str("none")
        } else {
            f.write_str(&held.join("+"))
        }
    }
}

fn modifier_from_token(token: &str) -> Option<Modifier> {
    match token.to_ascii_lowercase().as_str() {
        "ctrl" | "control" => Some(Modifier::Ctrl),
        "alt" | "option" => Some(Modifier::Alt),
        "shift" => Some(Modifier::Shift),
        "win" | "meta" | "super" | "cmd" => Some(Modifier::Meta),
        _ => None,
    }
}

/// Parsed hotkey text. `key` is `None` for modifier-only hotkeys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hotkey {
    pub modifiers: Modifiers,
    pub key: Option<KeyCode>,
}

pub fn parse_hotkey(text: &str) -> Result<Hotkey> {
    let tokens: Vec<&str> = text
        .split('+')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .collect();
    if tokens.is_empty() {
        return Err(ZoomError::InvalidHotkey(text.to_string()));
    }

    let mut modifiers = Modifiers::NONE;
    let mut key = None;
    for token in tokens {
        if let Some(modifier) = modifier_from_token(token) {
            modifiers.set(modifier, true);
            continue;
        }
        if key.is_some() {
            return Err(ZoomError::InvalidHotkey(text.to_string()));
        }
        key = Some(token.parse::<KeyCode>()?);
    }

    Ok(Hotkey { modifiers, key })
}
