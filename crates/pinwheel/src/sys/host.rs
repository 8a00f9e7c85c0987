use pinput::input::{KeySequence, Point, ScreenSize};
use pinput::queue::KeyQueue;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HostError {
    #[error("pointer position is not available")]
    PointerUnavailable,
    #[error("host viewport has no size")]
    NoViewport,
}

/// The pieces of the host application the wheel talks back to.
pub trait Host {
    /// Current system pointer position in viewport pixels.
    fn cursor_position(&self) -> Option<Point>;
    /// Warp the system pointer to the middle of the viewport.
    fn center_cursor(&mut self) -> Result<(), HostError>;
    /// Queue a synthesized key chord for the host. Fire and forget.
    fn send_keys(&mut self, keys: &KeySequence);
    /// Drop any synthesized input that has not been delivered yet.
    fn clear_pending_keys(&mut self);
}

/// Host stand-in for the daemon: it learns the pointer from forwarded
/// events and hands synthesized keys to a [`KeyQueue`].
#[derive(Debug, Clone, Default)]
pub struct SimulatedHost {
    cursor: Option<Point>,
    viewport: ScreenSize,
    queue: KeyQueue,
}

impl SimulatedHost {
    pub fn new(queue: KeyQueue) -> Self {
        Self {
            cursor: None,
            viewport: ScreenSize::default(),
            queue,
        }
    }

    pub fn track_cursor(&mut self, at: Point) {
        self.cursor = Some(at);
    }

    pub fn set_viewport(&mut self, viewport: ScreenSize) {
        self.viewport = viewport;
    }

    pub fn queue(&self) -> &KeyQueue {
        &self.queue
    }
}

impl Host for SimulatedHost {
    fn cursor_position(&self) -> Option<Point> {
        self.cursor
    }

    fn center_cursor(&mut self) -> Result<(), HostError> {
        if self.viewport.is_empty() {
            return Err(HostError::NoViewport);
        }
        self.cursor = Some(self.viewport.center());
        Ok(())
    }

    fn send_keys(&mut self, keys: &KeySequence) {
        self.queue.push(keys.clone());
    }

    fn clear_pending_keys(&mut self) {
        self.queue.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_cursor_needs_a_viewport() {
        let mut host = SimulatedHost::default();
        assert!(matches!(host.center_cursor(), Err(HostError::NoViewport)));
        assert_eq!(host.cursor_position(), None);

        host.set_viewport(ScreenSize::new(800, 600));
        host.center_cursor().unwrap();
        assert_eq!(host.cursor_position(), Some(Point::new(400.0, 300.0)));
    }

    #[test]
    fn test_keys_go_through_the_shared_queue() {
        let queue = KeyQueue::new();
        let mut host = SimulatedHost::new(queue.clone());

        host.send_keys(&"Ctrl+4".parse().unwrap());
        assert_eq!(queue.len(), 1);

        host.clear_pending_keys();
        assert!(queue.is_empty());
    }
}
