use super::catalog::Catalog;
use super::model::Wheel;
use crate::sys::host::Host;
use pinput::input::{InputEvent, Key, MouseButton, Point, RawDevice};
use std::time::Instant;

impl<C: Catalog, H: Host> Wheel<C, H> {
    /// Decides whether the wheel keeps `event` (`true`) or the host must
    /// still see it (`false`).
    pub fn process_input(&mut self, event: &InputEvent) -> bool {
        self.process_input_at(event, Instant::now())
    }

    pub fn process_input_at(&mut self, event: &InputEvent, now: Instant) -> bool {
        let consumed = match *event {
            // focus loss closes the wheel from any state
            InputEvent::FocusLost => {
                self.host.clear_pending_keys();
                self.hide();
                false
            }
            _ if !self.is_visible() => false,

            InputEvent::PointerMove(at) => self.on_pointer_move(at, now),
            InputEvent::RawMotion { device, .. } => {
                self.action_mode && device == RawDevice::Mouse
            }
            InputEvent::ButtonDown {
                button: MouseButton::Left,
                ..
            } => self.on_left_down(),
            InputEvent::ButtonUp {
                button: MouseButton::Left,
                ..
            } => self.on_left_up(),
            InputEvent::ButtonDown {
                button: MouseButton::Right,
                ..
            } => self.on_right_down(),
            InputEvent::ButtonUp {
                button: MouseButton::Right,
                at,
            } => self.on_right_up(at),
            InputEvent::ButtonDown { .. }
            | InputEvent::ButtonUp { .. }
            | InputEvent::DoubleClick { .. }
            | InputEvent::Scroll(_) => {
                self.hide();
                false
            }
            InputEvent::KeyDown(key) => self.on_key_down(key),
            InputEvent::KeyUp(key) => self.on_key_up(key),
        };

        log::trace!(
            "{:?} {}",
            event,
            if consumed { "consumed" } else { "forwarded" }
        );
        consumed
    }

    fn on_pointer_move(&mut self, at: Point, now: Instant) -> bool {
        if !(at.x.is_finite() && at.y.is_finite()) {
            log::warn!("ignoring pointer at ({}, {})", at.x, at.y);
            return false;
        }
        self.pointer = at;
        if self.flags.camera_passthrough {
            return false;
        }

        self.update_hover(now);

        if self.flags.dragging {
            self.position.x += (at.x - self.drag_anchor.x) / self.screen.width as f64;
            self.position.y += (at.y - self.drag_anchor.y) / self.screen.height as f64;
            self.drag_anchor = at;
            return true;
        }

        self.flags.over_wheel || self.action_mode
    }

    /// Selection happens on release; the press only claims the button.
    fn on_left_down(&mut self) -> bool {
        self.flags.left_held = true;
        if self.action_mode || self.flags.over_wheel {
            return true;
        }
        self.flags.camera_passthrough = true;
        false
    }

    fn on_left_up(&mut self) -> bool {
        if !self.flags.left_held {
            return false;
        }

        let selected = self.hovered.or_else(|| self.catalog.favorite());
        self.last_selection = selected;
        if let Some(item) = selected {
            let name = self.catalog.name(item).map_or("?", |n| n.as_str());
            match self.catalog.key_bind(item) {
                Some(keys) => {
                    log::info!("selected {} ({}) -> {}", name, item, keys);
                    self.host.send_keys(&keys);
                }
                None => log::info!("selected {} ({}) has no key bind", name, item),
            }
        }

        // the host started a camera drag with this button; let it finish it
        let bypass = self.flags.camera_passthrough;
        self.hide();
        !bypass
    }

    fn on_right_down(&mut self) -> bool {
        if self.action_mode {
            return true;
        }
        if self.flags.over_wheel {
            self.flags.dragging = true;
            self.drag_anchor = self.pointer;
            return true;
        }
        self.flags.camera_passthrough = true;
        false
    }

    fn on_right_up(&mut self, at: Point) -> bool {
        if self.action_mode {
            return true;
        }
        if self.flags.dragging {
            self.flags.dragging = false;
            return true;
        }
        if self.flags.camera_passthrough {
            self.pointer = at;
            self.flags.camera_passthrough = false;
        }
        false
    }

    fn on_key_down(&mut self, key: Key) -> bool {
        if key == self.cancel_key {
            self.flags.escape_armed = true;
            return true;
        }
        self.hide();
        false
    }

    fn on_key_up(&mut self, key: Key) -> bool {
        if key == self.cancel_key && self.flags.escape_armed {
            self.hide();
            return true;
        }
        false
    }
}
