use pinput::input::InputEvent;
use pinput::protocol::Command;

/// Everything that can change the overlay, funneled through one channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppEvent {
    Show,
    Hide,
    Toggle,
    Input(InputEvent),
    Resize { width: u32, height: u32 },
    DeviceReady { width: u32, height: u32 },
    DeviceLost,
    SetActionMode(bool),
    SetScale(f64),
    ConfigReload,
    Tick,
}

impl From<Command> for AppEvent {
    fn from(command: Command) -> Self {
        match command {
            Command::Show => AppEvent::Show,
            Command::Hide => AppEvent::Hide,
            Command::Toggle => AppEvent::Toggle,
            Command::Input(event) => AppEvent::Input(event),
            Command::Resize { width, height } => AppEvent::Resize { width, height },
            Command::DeviceReady { width, height } => AppEvent::DeviceReady { width, height },
            Command::DeviceLost => AppEvent::DeviceLost,
            Command::ActionMode(on) => AppEvent::SetActionMode(on),
            Command::Scale(factor) => AppEvent::SetScale(factor),
        }
    }
}
