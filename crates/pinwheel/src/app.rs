use crate::config::{self, Config};
use crate::events::AppEvent;
use crate::sys::host::SimulatedHost;
use crate::wheel::model::WheelSettings;
use crate::wheel::view::{self, DrawCommand, Frame};
use crate::wheel::{ConfigCatalog, Wheel, WheelError};
use pinput::input::{InputEvent, KeySequence, KeyTracker};
use pinput::queue::KeyQueue;
use std::time::Instant;

/// What one render tick produced.
#[derive(Debug, Default, PartialEq)]
pub struct TickOutput {
    /// Key chord handed to the host this tick, if one was queued.
    pub sent: Option<KeySequence>,
    /// Empty while the wheel is hidden.
    pub commands: Vec<DrawCommand>,
}

/// The overlay as the host sees it: one owner for the wheel, the activation
/// chord and the outgoing key queue. Only the event loop touches it.
pub struct Overlay {
    wheel: Wheel<ConfigCatalog, SimulatedHost>,
    tracker: KeyTracker,
    show_keys: KeySequence,
    queue: KeyQueue,
}

impl Overlay {
    pub fn new(config: &Config, host: SimulatedHost) -> Result<Self, WheelError> {
        let queue = host.queue().clone();
        let settings = WheelSettings {
            scale: config.scale,
            action_mode: config.action_mode,
            cancel_key: config.cancel_key,
        };
        let wheel = Wheel::new(ConfigCatalog::from_config(config), host, settings)?;

        Ok(Self {
            wheel,
            tracker: KeyTracker::new(),
            show_keys: config.show_keys.clone(),
            queue,
        })
    }

    pub fn wheel(&self) -> &Wheel<ConfigCatalog, SimulatedHost> {
        &self.wheel
    }

    pub fn show_keys(&self) -> &KeySequence {
        &self.show_keys
    }

    pub fn handle(&mut self, event: AppEvent) {
        match event {
            AppEvent::Show => self.wheel.show(),
            AppEvent::Hide => self.wheel.hide(),
            AppEvent::Toggle => {
                if self.wheel.is_visible() {
                    self.wheel.hide();
                } else {
                    self.wheel.show();
                }
            }
            AppEvent::Input(input) => {
                let consumed = self.dispatch_input(&input);
                log::debug!(
                    "{:?} {}",
                    input,
                    if consumed { "consumed" } else { "passed to host" }
                );
            }
            AppEvent::Resize { width, height } => self.resize(width, height),
            AppEvent::DeviceReady { width, height } => {
                self.resize(width, height);
                self.wheel.resources_loaded();
            }
            AppEvent::DeviceLost => self.wheel.resources_released(),
            AppEvent::SetActionMode(enable) => {
                self.wheel.enable_action_mode(enable);
                log::info!("action mode {}", if enable { "on" } else { "off" });
            }
            AppEvent::SetScale(scale) => {
                if let Err(e) = self.wheel.set_scale(scale) {
                    log::warn!("{}", e);
                }
            }
            AppEvent::ConfigReload => match config::load_config() {
                Ok(new_config) => match self.apply_config(&new_config) {
                    Ok(()) => log::info!("Configuration reloaded"),
                    Err(e) => log::error!("Failed to apply config: {}", e),
                },
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
            AppEvent::Tick => {
                let output = self.tick(Instant::now());
                if !output.commands.is_empty() {
                    log::trace!("frame: {:?}", output.commands);
                }
            }
        }
    }

    /// Host message hook. Returns true when the host must not see the event.
    pub fn dispatch_input(&mut self, event: &InputEvent) -> bool {
        if let InputEvent::FocusLost = event {
            self.tracker.clear();
            return self.wheel.process_input(event);
        }

        let new_press = self.tracker.observe(event);
        match *event {
            InputEvent::PointerMove(at)
            | InputEvent::ButtonDown { at, .. }
            | InputEvent::ButtonUp { at, .. }
            | InputEvent::DoubleClick { at, .. } => self.wheel.host_mut().track_cursor(at),
            _ => {}
        }

        if self.wheel.is_visible() {
            return self.wheel.process_input(event);
        }

        if new_press && *self.tracker.chord() == self.show_keys {
            log::debug!("activation chord {} pressed", self.show_keys);
            self.wheel.show();
            return true;
        }
        false
    }

    /// Delivers at most one queued key chord, then snapshots the wheel.
    pub fn tick(&mut self, now: Instant) -> TickOutput {
        let sent = self.queue.pop();
        if let Some(keys) = &sent {
            log::info!("sending {} to host", keys);
        }

        let commands = Frame::capture(&self.wheel, now)
            .map(|frame| view::build(&frame, self.wheel.catalog()))
            .unwrap_or_default();

        TickOutput { sent, commands }
    }

    /// Swaps in a reloaded configuration. Nothing changes if it is rejected.
    pub fn apply_config(&mut self, config: &Config) -> Result<(), WheelError> {
        if !config.scale.is_finite() || config.scale <= 0.0 {
            return Err(WheelError::InvalidScale(config.scale));
        }
        self.wheel.set_catalog(ConfigCatalog::from_config(config))?;
        self.wheel.set_scale(config.scale)?;
        self.wheel.enable_action_mode(config.action_mode);
        self.wheel.set_cancel_key(config.cancel_key);
        self.show_keys = config.show_keys.clone();
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.wheel.set_screen_size(width, height);
        let size = self.wheel.screen_size();
        self.wheel.host_mut().set_viewport(size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wheel::WheelState;
    use pinput::input::{Key, MouseButton, Point};
    use std::time::Duration;

    fn overlay() -> Overlay {
        let mut overlay = Overlay::new(&Config::default(), SimulatedHost::default()).unwrap();
        overlay.handle(AppEvent::DeviceReady {
            width: 1920,
            height: 1080,
        });
        overlay
    }

    fn press_show_chord(overlay: &mut Overlay) -> (bool, bool) {
        let shift = overlay.dispatch_input(&InputEvent::KeyDown(Key::Shift));
        let space = overlay.dispatch_input(&InputEvent::KeyDown(Key::Space));
        (shift, space)
    }

    #[test]
    fn test_device_events_gate_the_wheel() {
        let mut overlay = Overlay::new(&Config::default(), SimulatedHost::default()).unwrap();
        overlay.handle(AppEvent::Show);
        assert_eq!(overlay.wheel().state(), WheelState::Uninitialized);

        overlay.handle(AppEvent::DeviceReady {
            width: 1280,
            height: 720,
        });
        overlay.handle(AppEvent::Show);
        assert!(overlay.wheel().is_visible());

        overlay.handle(AppEvent::DeviceLost);
        assert_eq!(overlay.wheel().state(), WheelState::Uninitialized);
    }

    #[test]
    fn test_show_chord_opens_wheel_at_pointer() {
        let mut overlay = overlay();
        assert!(!overlay.dispatch_input(&InputEvent::PointerMove(Point::new(480.0, 270.0))));

        assert_eq!(press_show_chord(&mut overlay), (false, true));
        assert!(overlay.wheel().is_visible());
        assert_eq!(overlay.wheel().position(), Point::new(0.25, 0.25));
    }

    #[test]
    fn test_held_chord_does_not_retrigger() {
        let mut overlay = overlay();
        press_show_chord(&mut overlay);
        overlay.handle(AppEvent::Hide);

        // key repeat while still held
        assert!(!overlay.dispatch_input(&InputEvent::KeyDown(Key::Space)));
        assert!(!overlay.wheel().is_visible());

        overlay.dispatch_input(&InputEvent::KeyUp(Key::Space));
        assert!(overlay.dispatch_input(&InputEvent::KeyDown(Key::Space)));
        assert!(overlay.wheel().is_visible());
    }

    #[test]
    fn test_partial_or_extra_keys_do_not_show() {
        let mut overlay = overlay();
        assert!(!overlay.dispatch_input(&InputEvent::KeyDown(Key::Space)));
        overlay.dispatch_input(&InputEvent::KeyUp(Key::Space));

        overlay.dispatch_input(&InputEvent::KeyDown(Key::Control));
        assert_eq!(press_show_chord(&mut overlay), (false, false));
        assert!(!overlay.wheel().is_visible());
    }

    #[test]
    fn test_focus_lost_forgets_held_keys() {
        let mut overlay = overlay();
        overlay.dispatch_input(&InputEvent::KeyDown(Key::Shift));
        assert!(!overlay.dispatch_input(&InputEvent::FocusLost));

        // Shift was released while unfocused; Space alone is not the chord
        assert!(!overlay.dispatch_input(&InputEvent::KeyDown(Key::Space)));
        assert!(!overlay.wheel().is_visible());
    }

    #[test]
    fn test_focus_lost_hides_and_drops_pending_keys() {
        let mut overlay = overlay();
        overlay.queue.push("Ctrl+1".parse().unwrap());
        overlay.handle(AppEvent::Show);

        overlay.handle(AppEvent::Input(InputEvent::FocusLost));
        assert!(!overlay.wheel().is_visible());
        assert_eq!(overlay.tick(Instant::now()).sent, None);
    }

    #[test]
    fn test_selection_is_sent_on_following_ticks() {
        let mut overlay = overlay();
        overlay.dispatch_input(&InputEvent::PointerMove(Point::new(960.0, 540.0)));
        press_show_chord(&mut overlay);

        // straight up is the first item
        let up = Point::new(960.0, 240.0);
        assert!(overlay.dispatch_input(&InputEvent::PointerMove(up)));
        assert!(overlay.dispatch_input(&InputEvent::ButtonDown {
            button: MouseButton::Left,
            at: up,
        }));
        assert!(overlay.dispatch_input(&InputEvent::ButtonUp {
            button: MouseButton::Left,
            at: up,
        }));
        assert!(!overlay.wheel().is_visible());

        let first = overlay.tick(Instant::now());
        assert_eq!(first.sent, Some("Ctrl+1".parse().unwrap()));
        assert!(first.commands.is_empty());
        assert_eq!(overlay.tick(Instant::now()).sent, None);
    }

    #[test]
    fn test_queue_drains_one_chord_per_tick() {
        let mut overlay = overlay();
        overlay.queue.push("F1".parse().unwrap());
        overlay.queue.push("F2".parse().unwrap());

        let now = Instant::now();
        assert_eq!(overlay.tick(now).sent, Some("F1".parse().unwrap()));
        assert_eq!(overlay.tick(now).sent, Some("F2".parse().unwrap()));
        assert_eq!(overlay.tick(now).sent, None);
    }

    #[test]
    fn test_visible_tick_draws_the_wheel() {
        let mut overlay = overlay();
        let t0 = Instant::now();
        assert!(overlay.tick(t0).commands.is_empty());

        overlay.handle(AppEvent::Show);
        let commands = overlay.tick(t0 + Duration::from_millis(16)).commands;
        // background and six items; no favorite, nothing hovered
        assert_eq!(commands.len(), 7);
        assert!(matches!(commands[0], DrawCommand::Background { .. }));
        assert!(
            !commands
                .iter()
                .any(|c| matches!(c, DrawCommand::CenterLogo { .. }))
        );
    }

    #[test]
    fn test_toggle_and_action_mode() {
        let mut overlay = overlay();
        overlay.handle(AppEvent::SetActionMode(true));
        overlay.handle(AppEvent::Toggle);
        assert!(overlay.wheel().is_visible());
        assert_eq!(overlay.wheel().pointer(), Point::new(960.0, 540.0));

        let commands = overlay.tick(Instant::now()).commands;
        assert!(matches!(
            commands.last(),
            Some(DrawCommand::Cursor { .. })
        ));

        overlay.handle(AppEvent::Toggle);
        assert!(!overlay.wheel().is_visible());
    }

    #[test]
    fn test_invalid_runtime_scale_is_ignored() {
        let mut overlay = overlay();
        overlay.handle(AppEvent::SetScale(-2.0));
        assert_eq!(overlay.wheel().scale(), 1.0);

        overlay.handle(AppEvent::SetScale(0.75));
        assert_eq!(overlay.wheel().scale(), 0.75);
    }

    #[test]
    fn test_zero_resize_keeps_previous_size() {
        let mut overlay = overlay();
        overlay.handle(AppEvent::Resize {
            width: 0,
            height: 0,
        });
        assert_eq!(
            overlay.wheel().screen_size(),
            pinput::input::ScreenSize::new(1920, 1080)
        );
    }

    #[test]
    fn test_apply_config_is_all_or_nothing() {
        let mut overlay = overlay();

        let bad = Config {
            favorite: Some(9),
            cancel_key: Key::Q,
            ..Config::default()
        };
        assert_eq!(
            overlay.apply_config(&bad),
            Err(WheelError::InvalidFavorite(9))
        );
        assert_eq!(overlay.wheel().cancel_key(), Key::Escape);

        let mut good = Config {
            scale: 1.25,
            show_keys: "Alt+W".parse().unwrap(),
            ..Config::default()
        };
        good.items.truncate(3);
        overlay.apply_config(&good).unwrap();
        assert_eq!(overlay.wheel().scale(), 1.25);
        assert_eq!(overlay.show_keys(), &"Alt+W".parse::<KeySequence>().unwrap());

        overlay.dispatch_input(&InputEvent::KeyDown(Key::Alt));
        assert!(overlay.dispatch_input(&InputEvent::KeyDown(Key::W)));
        assert!(overlay.wheel().is_visible());
    }
}
