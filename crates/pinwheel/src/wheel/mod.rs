use std::f64::consts::PI;
use std::time::Duration;

pub mod anim;
pub mod catalog;
pub mod hit;
pub mod model;
pub mod router;
pub mod view;

pub use anim::AnimationTimer;
pub use catalog::{Catalog, ConfigCatalog, ItemName};
pub use hit::{Hit, HitParams};
pub use model::{Wheel, WheelError, WheelState};
pub use view::{DrawCommand, Frame};

// Sizes are authored in pixels of a 1920 wide reference screen and
// expressed as fractions of its width.
pub const REF_SCREEN_WIDTH: f64 = 1920.0;

pub const WHEEL_SIZE: f64 = 870.0;
pub const WHEEL_RADIUS: f64 = 0.5 * WHEEL_SIZE / REF_SCREEN_WIDTH; // outer hit radius
pub const MIDDLE_CIRCLE_SIZE: f64 = 250.0;
pub const MIDDLE_CIRCLE_RADIUS: f64 = 0.5 * MIDDLE_CIRCLE_SIZE / REF_SCREEN_WIDTH; // dead zone

pub const TEX_BACKGROUND_SIZE: f64 = 1024.0;
pub const TEX_ITEM_SIZE: f64 = 160.0;
pub const TEX_LOGO_SIZE: f64 = MIDDLE_CIRCLE_SIZE - 80.0;
pub const TEX_CURSOR_SIZE: f64 = 32.0;
pub const ITEM_ORBIT_RADIUS: f64 = 0.5 * (WHEEL_SIZE + MIDDLE_CIRCLE_SIZE) / 2.0 / REF_SCREEN_WIDTH;

pub const MAX_SECTORS: usize = 12;
pub const START_OFFSET: f64 = -PI / 2.0;

pub const FADE_IN_DURATION: Duration = Duration::from_millis(300);
pub const HOVER_DURATION: Duration = Duration::from_millis(500);
