use super::anim::AnimationTimer;
use super::catalog::Catalog;
use super::hit::{self, Hit, HitParams};
use super::{FADE_IN_DURATION, HOVER_DURATION, MAX_SECTORS};
use crate::sys::host::Host;
use pinput::input::{Key, Point, ScreenSize};
use std::time::Instant;
use strum::Display as StrumDisplay;
use thiserror::Error;

/// Uninitialized until render resources exist; Visible only from Ready.
#[derive(Debug, Clone, Copy, PartialEq, Eq, StrumDisplay)]
pub enum WheelState {
    Uninitialized,
    Ready,
    Visible,
}

#[derive(Debug, Error, PartialEq)]
pub enum WheelError {
    #[error("catalog has no items")]
    EmptyCatalog,
    #[error("catalog has {0} items, at most {max} are supported", max = MAX_SECTORS)]
    TooManySectors(usize),
    #[error("wheel scale must be a positive number, got {0}")]
    InvalidScale(f64),
    #[error("favorite item {0} is not in the catalog")]
    InvalidFavorite(usize),
}

#[derive(Debug, Clone, Copy)]
pub struct WheelSettings {
    pub scale: f64,
    pub action_mode: bool,
    pub cancel_key: Key,
}

impl Default for WheelSettings {
    fn default() -> Self {
        Self {
            scale: 1.0,
            action_mode: false,
            cancel_key: Key::Escape,
        }
    }
}

/// Per-session interaction flags, all cleared when the wheel hides.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Interaction {
    pub dragging: bool,
    pub camera_passthrough: bool,
    pub left_held: bool,
    pub escape_armed: bool,
    pub over_wheel: bool,
}

pub struct Wheel<C, H> {
    pub(super) state: WheelState,
    pub(super) catalog: C,
    pub(super) host: H,
    /// Wheel center as a fraction of the screen.
    pub(super) position: Point,
    /// Last known pointer, in pixels.
    pub(super) pointer: Point,
    pub(super) drag_anchor: Point,
    pub(super) screen: ScreenSize,
    pub(super) scale: f64,
    pub(super) hovered: Option<usize>,
    pub(super) flags: Interaction,
    pub(super) action_mode: bool,
    pub(super) cancel_key: Key,
    pub(super) last_selection: Option<usize>,
    pub(super) fade_in: AnimationTimer,
    pub(super) hover: AnimationTimer,
    pub(super) epoch: Instant,
}

fn check_scale(scale: f64) -> Result<(), WheelError> {
    if scale.is_finite() && scale > 0.0 {
        Ok(())
    } else {
        Err(WheelError::InvalidScale(scale))
    }
}

fn check_catalog(catalog: &impl Catalog) -> Result<(), WheelError> {
    let count = catalog.sector_count();
    match catalog.favorite() {
        _ if count == 0 => Err(WheelError::EmptyCatalog),
        _ if count > MAX_SECTORS => Err(WheelError::TooManySectors(count)),
        Some(fav) if fav >= count => Err(WheelError::InvalidFavorite(fav)),
        _ => Ok(()),
    }
}

impl<C: Catalog, H: Host> Wheel<C, H> {
    pub fn new(catalog: C, host: H, settings: WheelSettings) -> Result<Self, WheelError> {
        check_catalog(&catalog)?;
        check_scale(settings.scale)?;

        Ok(Self {
            state: WheelState::Uninitialized,
            catalog,
            host,
            position: Point::new(0.5, 0.5),
            pointer: Point::default(),
            drag_anchor: Point::default(),
            screen: ScreenSize::default(),
            scale: settings.scale,
            hovered: None,
            flags: Interaction::default(),
            action_mode: settings.action_mode,
            cancel_key: settings.cancel_key,
            last_selection: None,
            fade_in: AnimationTimer::new(FADE_IN_DURATION),
            hover: AnimationTimer::new(HOVER_DURATION),
            epoch: Instant::now(),
        })
    }

    pub fn state(&self) -> WheelState {
        self.state
    }

    pub fn is_visible(&self) -> bool {
        self.state == WheelState::Visible
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn pointer(&self) -> Point {
        self.pointer
    }

    pub fn screen_size(&self) -> ScreenSize {
        self.screen
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn interaction(&self) -> Interaction {
        self.flags
    }

    pub fn is_action_mode(&self) -> bool {
        self.action_mode
    }

    pub fn cancel_key(&self) -> Key {
        self.cancel_key
    }

    /// Item committed by the most recent left-button release.
    pub fn last_selection(&self) -> Option<usize> {
        self.last_selection
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Render resources finished loading.
    pub fn resources_loaded(&mut self) {
        if self.state == WheelState::Uninitialized {
            self.state = WheelState::Ready;
            log::debug!("wheel resources ready");
        }
    }

    /// Render resources went away (device loss or teardown).
    pub fn resources_released(&mut self) {
        if self.state == WheelState::Uninitialized {
            return;
        }
        self.hide();
        self.state = WheelState::Uninitialized;
        log::debug!("wheel resources released");
    }

    pub fn set_screen_size(&mut self, width: u32, height: u32) {
        let size = ScreenSize::new(width, height);
        if size.is_empty() {
            log::warn!("ignoring empty screen size {}x{}", width, height);
            return;
        }
        self.screen = size;
    }

    pub fn set_scale(&mut self, scale: f64) -> Result<(), WheelError> {
        check_scale(scale)?;
        self.scale = scale;
        Ok(())
    }

    pub fn enable_action_mode(&mut self, enable: bool) {
        self.action_mode = enable;
    }

    pub fn set_cancel_key(&mut self, key: Key) {
        self.cancel_key = key;
    }

    /// Swap in a new catalog. The hover is re-evaluated while visible.
    pub fn set_catalog(&mut self, catalog: C) -> Result<(), WheelError> {
        check_catalog(&catalog)?;
        self.catalog = catalog;
        if self.is_visible() {
            self.update_hover(Instant::now());
        }
        Ok(())
    }

    pub fn show(&mut self) {
        self.show_at(Instant::now());
    }

    pub fn show_at(&mut self, now: Instant) {
        if self.state != WheelState::Ready {
            log::debug!("show ignored in state {}", self.state);
            return;
        }
        self.state = WheelState::Visible;
        self.fade_in.start_at(now);

        if self.action_mode {
            self.position = Point::new(0.5, 0.5);
            match self.host.center_cursor() {
                Ok(()) => self.pointer = self.screen.center(),
                Err(e) => log::warn!("could not center pointer: {}", e),
            }
        } else {
            match self.host.cursor_position() {
                Some(at) => self.pointer = at,
                None => log::debug!("no pointer reading, keeping {:?}", self.pointer),
            }
            self.position = if self.screen.is_empty() {
                Point::new(0.5, 0.5)
            } else {
                self.screen.normalize(self.pointer)
            };
        }

        self.update_hover(now);
        log::info!(
            "wheel shown at ({:.3}, {:.3}), hovering {:?}",
            self.position.x,
            self.position.y,
            self.hovered
        );
    }

    pub fn hide(&mut self) {
        if self.state != WheelState::Visible {
            return;
        }
        self.state = WheelState::Ready;
        self.flags = Interaction::default();
        self.hovered = None;
        log::info!("wheel hidden");
    }

    pub(super) fn hit_params(&self) -> HitParams {
        HitParams {
            center: self.position,
            scale: self.scale,
            aspect: self.screen.aspect(),
            sectors: self.catalog.sector_count(),
        }
    }

    /// Re-run the hit test for the current pointer.
    pub(super) fn update_hover(&mut self, now: Instant) {
        let hit = if self.screen.is_empty() {
            Hit::OUTSIDE
        } else {
            let params = self.hit_params();
            let pointer = self.screen.normalize(self.pointer);
            hit::hit_test(pointer, &params, |i| self.catalog.is_enabled(i))
        };

        let previous = self.hovered;
        self.flags.over_wheel = hit.over_wheel;
        self.hovered = hit.sector;

        if hit.sector.is_some() && hit.sector != previous {
            self.hover.start_at(now);
            log::trace!("hovering sector {:?}", hit.sector);
        }
    }
}
