use crate::input::{InputEvent, Key, MouseButton, Point, RawDevice};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One line of the protocol spoken between `pinput` and the overlay daemon,
/// e.g. `move 640 360`, `down left 640 360` or `keydown escape`. Keywords
/// are case-insensitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Show,
    Hide,
    Toggle,
    Input(InputEvent),
    Resize { width: u32, height: u32 },
    DeviceReady { width: u32, height: u32 },
    DeviceLost,
    ActionMode(bool),
    Scale(f64),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseCommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command '{0}'")]
    Unknown(String),
    #[error("'{command}' expects {expected}")]
    Arguments {
        command: String,
        expected: &'static str,
    },
    #[error("invalid value '{0}'")]
    Value(String),
}

fn value<T: FromStr>(token: &str) -> Result<T, ParseCommandError> {
    token
        .parse()
        .map_err(|_| ParseCommandError::Value(token.to_string()))
}

/// Pixel coordinate; `nan` and `inf` parse as floats but are not positions.
fn coordinate(token: &str) -> Result<f64, ParseCommandError> {
    let v: f64 = value(token)?;
    if v.is_finite() {
        Ok(v)
    } else {
        Err(ParseCommandError::Value(token.to_string()))
    }
}

fn toggle_value(token: &str) -> Result<bool, ParseCommandError> {
    match token.to_ascii_lowercase().as_str() {
        "on" | "true" | "1" => Ok(true),
        "off" | "false" | "0" => Ok(false),
        _ => Err(ParseCommandError::Value(token.to_string())),
    }
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let (head, args) = tokens.split_first().ok_or(ParseCommandError::Empty)?;
        let name = head.to_ascii_lowercase();

        let arity = |expected: &'static str| ParseCommandError::Arguments {
            command: name.clone(),
            expected,
        };

        let command = match (name.as_str(), args) {
            ("show", []) => Self::Show,
            ("hide", []) => Self::Hide,
            ("toggle", []) => Self::Toggle,
            ("focus-lost", []) => Self::Input(InputEvent::FocusLost),
            ("device-lost", []) => Self::DeviceLost,
            ("move", [x, y]) => {
                let at = Point::new(coordinate(x)?, coordinate(y)?);
                Self::Input(InputEvent::PointerMove(at))
            }
            ("down" | "up" | "dblclick", [button, x, y]) => {
                let button: MouseButton = value(button)?;
                let at = Point::new(coordinate(x)?, coordinate(y)?);
                Self::Input(match name.as_str() {
                    "down" => InputEvent::ButtonDown { button, at },
                    "up" => InputEvent::ButtonUp { button, at },
                    _ => InputEvent::DoubleClick { button, at },
                })
            }
            ("scroll", [delta]) => Self::Input(InputEvent::Scroll(value(delta)?)),
            ("raw", [device, dx, dy]) => {
                let device: RawDevice = value(device)?;
                Self::Input(InputEvent::RawMotion {
                    device,
                    dx: value(dx)?,
                    dy: value(dy)?,
                })
            }
            ("keydown", [key]) => Self::Input(InputEvent::KeyDown(value::<Key>(key)?)),
            ("keyup", [key]) => Self::Input(InputEvent::KeyUp(value::<Key>(key)?)),
            ("resize", [w, h]) => Self::Resize {
                width: value(w)?,
                height: value(h)?,
            },
            ("device-ready", [w, h]) => Self::DeviceReady {
                width: value(w)?,
                height: value(h)?,
            },
            ("action-mode", [flag]) => Self::ActionMode(toggle_value(flag)?),
            ("scale", [factor]) => Self::Scale(value(factor)?),

            ("show" | "hide" | "toggle" | "focus-lost" | "device-lost", _) => {
                return Err(arity("no arguments"));
            }
            ("move", _) => return Err(arity("X Y")),
            ("down" | "up" | "dblclick", _) => return Err(arity("BUTTON X Y")),
            ("scroll", _) => return Err(arity("DELTA")),
            ("raw", _) => return Err(arity("DEVICE DX DY")),
            ("keydown" | "keyup", _) => return Err(arity("KEY")),
            ("resize" | "device-ready", _) => return Err(arity("WIDTH HEIGHT")),
            ("action-mode", _) => return Err(arity("on|off")),
            ("scale", _) => return Err(arity("FACTOR")),
            _ => return Err(ParseCommandError::Unknown(head.to_string())),
        };
        Ok(command)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Show => write!(f, "show"),
            Self::Hide => write!(f, "hide"),
            Self::Toggle => write!(f, "toggle"),
            Self::DeviceLost => write!(f, "device-lost"),
            Self::Resize { width, height } => write!(f, "resize {width} {height}"),
            Self::DeviceReady { width, height } => write!(f, "device-ready {width} {height}"),
            Self::ActionMode(on) => write!(f, "action-mode {}", if *on { "on" } else { "off" }),
            Self::Scale(factor) => write!(f, "scale {factor}"),
            Self::Input(event) => match event {
                InputEvent::PointerMove(p) => write!(f, "move {} {}", p.x, p.y),
                InputEvent::RawMotion { device, dx, dy } => write!(f, "raw {device} {dx} {dy}"),
                InputEvent::ButtonDown { button, at } => {
                    write!(f, "down {button} {} {}", at.x, at.y)
                }
                InputEvent::ButtonUp { button, at } => write!(f, "up {button} {} {}", at.x, at.y),
                InputEvent::DoubleClick { button, at } => {
                    write!(f, "dblclick {button} {} {}", at.x, at.y)
                }
                InputEvent::Scroll(delta) => write!(f, "scroll {delta}"),
                InputEvent::KeyDown(key) => write!(f, "keydown {key}"),
                InputEvent::KeyUp(key) => write!(f, "keyup {key}"),
                InputEvent::FocusLost => write!(f, "focus-lost"),
            },
        }
    }
}
