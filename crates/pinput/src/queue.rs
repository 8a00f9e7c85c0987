use crate::input::KeySequence;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

/// Pending synthesized key sequences waiting for the next render tick.
///
/// Cloning yields another handle to the same queue.
#[derive(Debug, Clone, Default)]
pub struct KeyQueue {
    pending: Arc<Mutex<VecDeque<KeySequence>>>,
}

impl KeyQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, keys: KeySequence) {
        self.pending.lock().push_back(keys);
    }

    /// Takes the oldest pending sequence, one per tick.
    pub fn pop(&self) -> Option<KeySequence> {
        self.pending.lock().pop_front()
    }

    pub fn clear(&self) {
        let dropped = {
            let mut pending = self.pending.lock();
            let n = pending.len();
            pending.clear();
            n
        };
        if dropped > 0 {
            log::debug!("Dropped {} pending key sequence(s)", dropped);
        }
    }

    pub fn len(&self) -> usize {
        self.pending.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.lock().is_empty()
    }
}
