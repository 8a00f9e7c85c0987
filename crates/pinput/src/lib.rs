pub mod input;
pub mod protocol;
pub mod queue;

pub const SOCKET_PATH: &str = "/tmp/pinwheel.sock";
