use clap::{Parser, Subcommand};
use pinput::SOCKET_PATH;
use pinput::input::{InputEvent, Key, MouseButton, Point, RawDevice};
use pinput::protocol::Command;
use std::io::{BufRead, Write};
use std::os::unix::net::UnixStream;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pinput", version, about = "Drive the pinwheel overlay daemon", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Show the wheel
    Show,
    /// Hide the wheel
    Hide,
    /// Show the wheel if hidden, hide it otherwise
    Toggle,
    /// Pointer moved to pixel position X Y
    Move { x: f64, y: f64 },
    /// Mouse button pressed at X Y
    Down { button: MouseButton, x: f64, y: f64 },
    /// Mouse button released at X Y
    Up { button: MouseButton, x: f64, y: f64 },
    /// Mouse button double-clicked at X Y
    Dblclick { button: MouseButton, x: f64, y: f64 },
    /// Scroll wheel moved
    Scroll {
        #[arg(allow_negative_numbers = true)]
        delta: i32,
    },
    /// Raw relative motion from a device
    Raw {
        device: RawDevice,
        #[arg(allow_negative_numbers = true)]
        dx: i32,
        #[arg(allow_negative_numbers = true)]
        dy: i32,
    },
    /// Key pressed
    Keydown { key: Key },
    /// Key released
    Keyup { key: Key },
    /// Host window lost focus
    FocusLost,
    /// Host viewport resized
    Resize { width: u32, height: u32 },
    /// Render device (re)created with the given back buffer size
    DeviceReady { width: u32, height: u32 },
    /// Render device lost
    DeviceLost,
    /// Enable or disable action mode
    ActionMode {
        #[arg(value_parser = ["on", "off"])]
        state: String,
    },
    /// Set the wheel scale
    Scale { factor: f64 },
    /// Send every line of a script file (stdin when omitted)
    Replay { file: Option<PathBuf> },
}

impl Commands {
    fn into_command(self) -> Option<Command> {
        let command = match self {
            Self::Show => Command::Show,
            Self::Hide => Command::Hide,
            Self::Toggle => Command::Toggle,
            Self::Move { x, y } => Command::Input(InputEvent::PointerMove(Point::new(x, y))),
            Self::Down { button, x, y } => Command::Input(InputEvent::ButtonDown {
                button,
                at: Point::new(x, y),
            }),
            Self::Up { button, x, y } => Command::Input(InputEvent::ButtonUp {
                button,
                at: Point::new(x, y),
            }),
            Self::Dblclick { button, x, y } => Command::Input(InputEvent::DoubleClick {
                button,
                at: Point::new(x, y),
            }),
            Self::Scroll { delta } => Command::Input(InputEvent::Scroll(delta)),
            Self::Raw { device, dx, dy } => {
                Command::Input(InputEvent::RawMotion { device, dx, dy })
            }
            Self::Keydown { key } => Command::Input(InputEvent::KeyDown(key)),
            Self::Keyup { key } => Command::Input(InputEvent::KeyUp(key)),
            Self::FocusLost => Command::Input(InputEvent::FocusLost),
            Self::Resize { width, height } => Command::Resize { width, height },
            Self::DeviceReady { width, height } => Command::DeviceReady { width, height },
            Self::DeviceLost => Command::DeviceLost,
            Self::ActionMode { state } => Command::ActionMode(state == "on"),
            Self::Scale { factor } => Command::Scale(factor),
            Self::Replay { .. } => return None,
        };
        Some(command)
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut stream = UnixStream::connect(SOCKET_PATH).map_err(|e| {
        anyhow::anyhow!(
            "Failed to connect to pinwheel daemon at {}: {}. Is pinwheel running?",
            SOCKET_PATH,
            e
        )
    })?;

    match cli.command {
        Commands::Replay { file } => replay(&mut stream, file),
        other => match other.into_command() {
            Some(command) => send_command(&mut stream, &command),
            None => Ok(()),
        },
    }
}

fn replay(stream: &mut UnixStream, file: Option<PathBuf>) -> anyhow::Result<()> {
    let reader: Box<dyn BufRead> = match file {
        Some(path) => Box::new(std::io::BufReader::new(fs_err::File::open(path)?)),
        None => Box::new(std::io::stdin().lock()),
    };

    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let command: Command = trimmed
            .parse()
            .map_err(|e| anyhow::anyhow!("line {}: {}", number + 1, e))?;
        send_command(stream, &command)?;
    }
    Ok(())
}

fn send_command(stream: &mut UnixStream, command: &Command) -> anyhow::Result<()> {
    log::debug!("sending '{}'", command);
    writeln!(stream, "{}", command)?;
    Ok(())
}
