use derive_more::{Deref, From, Into};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use strum::{Display as StrumDisplay, EnumString};
use thiserror::Error;

/// A position in host pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Host viewport size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScreenSize {
    pub width: u32,
    pub height: u32,
}

impl ScreenSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// height / width, used to make hit regions circular on screen.
    pub fn aspect(&self) -> f64 {
        self.height as f64 / self.width as f64
    }

    pub fn center(&self) -> Point {
        Point::new(self.width as f64 * 0.5, self.height as f64 * 0.5)
    }

    /// Pixel position as a fraction of the viewport.
    pub fn normalize(&self, p: Point) -> Point {
        Point::new(p.x / self.width as f64, p.y / self.height as f64)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, StrumDisplay)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    X1,
    X2,
}

/// Device class reported by a raw (relative motion) input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, StrumDisplay)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum RawDevice {
    Mouse,
    Keyboard,
    Hid,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    EnumString,
    StrumDisplay,
    SerializeDisplay,
    DeserializeFromStr,
)]
#[strum(ascii_case_insensitive)]
pub enum Key {
    // Modifiers sort first so chords print as "Shift+E".
    #[strum(to_string = "Ctrl", serialize = "Control")]
    Control,
    Shift,
    Alt,
    #[strum(to_string = "Escape", serialize = "Esc")]
    Escape,
    Enter,
    Space,
    Tab,
    Backspace,
    Up,
    Down,
    Left,
    Right,
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,
    #[strum(to_string = "0")]
    Digit0,
    #[strum(to_string = "1")]
    Digit1,
    #[strum(to_string = "2")]
    Digit2,
    #[strum(to_string = "3")]
    Digit3,
    #[strum(to_string = "4")]
    Digit4,
    #[strum(to_string = "5")]
    Digit5,
    #[strum(to_string = "6")]
    Digit6,
    #[strum(to_string = "7")]
    Digit7,
    #[strum(to_string = "8")]
    Digit8,
    #[strum(to_string = "9")]
    Digit9,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseKeyError {
    #[error("unknown key '{0}'")]
    UnknownKey(String),
    #[error("empty key sequence")]
    Empty,
}

/// An unordered chord of keys, written as `Shift+Space`.
#[derive(
    Debug, Clone, PartialEq, Eq, Default, Deref, From, Into, SerializeDisplay, DeserializeFromStr,
)]
pub struct KeySequence(BTreeSet<Key>);

impl KeySequence {
    pub fn insert(&mut self, key: Key) -> bool {
        self.0.insert(key)
    }

    pub fn remove(&mut self, key: Key) -> bool {
        self.0.remove(&key)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

impl FromIterator<Key> for KeySequence {
    fn from_iter<T: IntoIterator<Item = Key>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl FromStr for KeySequence {
    type Err = ParseKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let keys = s
            .split('+')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| {
                Key::from_str(part).map_err(|_| ParseKeyError::UnknownKey(part.to_string()))
            })
            .collect::<Result<BTreeSet<_>, _>>()?;

        if keys.is_empty() {
            return Err(ParseKeyError::Empty);
        }
        Ok(Self(keys))
    }
}

impl fmt::Display for KeySequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for key in &self.0 {
            if !first {
                f.write_str("+")?;
            }
            write!(f, "{key}")?;
            first = false;
        }
        Ok(())
    }
}

/// One discrete event from the host's message stream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerMove(Point),
    RawMotion { device: RawDevice, dx: i32, dy: i32 },
    ButtonDown { button: MouseButton, at: Point },
    ButtonUp { button: MouseButton, at: Point },
    DoubleClick { button: MouseButton, at: Point },
    Scroll(i32),
    KeyDown(Key),
    KeyUp(Key),
    FocusLost,
}

/// Tracks which keys are currently held so activation chords can be matched.
#[derive(Debug, Default)]
pub struct KeyTracker {
    pressed: KeySequence,
}

impl KeyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when the event pressed a key that was not already held.
    pub fn observe(&mut self, event: &InputEvent) -> bool {
        match *event {
            InputEvent::KeyDown(key) => self.pressed.insert(key),
            InputEvent::KeyUp(key) => {
                self.pressed.remove(key);
                false
            }
            _ => false,
        }
    }

    pub fn chord(&self) -> &KeySequence {
        &self.pressed
    }

    pub fn clear(&mut self) {
        self.pressed.clear();
    }
}
