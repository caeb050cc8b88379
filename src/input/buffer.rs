use std::collections::VecDeque;

use crate::game::Direction;

/// Bounded FIFO of movement intents
///
/// Decouples UI-rate input polling from tick-rate consumption: the loop
/// pushes every polled movement intent, the engine pops at most one per
/// tick. Pushes beyond capacity are dropped so a burst of key presses can
/// never build up unbounded input lag. Immediate commands (quit, pause,
/// enter, backend switches) are never buffered.
#[derive(Debug, Clone)]
pub struct InputBuffer {
    queue: VecDeque<Direction>,
    capacity: usize,
}

impl InputBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            queue: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Buffer one movement intent. Returns false when the buffer is at
    /// capacity and the intent was dropped.
    pub fn push(&mut self, intent: Direction) -> bool {
        if self.queue.len() >= self.capacity {
            return false;
        }
        self.queue.push_back(intent);
        true
    }

    /// Remove and return the oldest buffered intent
    pub fn pop(&mut self) -> Option<Direction> {
        self.queue.pop_front()
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo_order() {
        let mut buffer = InputBuffer::new(3);
        assert!(buffer.push(Direction::Up));
        assert!(buffer.push(Direction::Left));
        assert!(buffer.push(Direction::Down));

        assert_eq!(buffer.pop(), Some(Direction::Up));
        assert_eq!(buffer.pop(), Some(Direction::Left));
        assert_eq!(buffer.pop(), Some(Direction::Down));
        assert_eq!(buffer.pop(), None);
    }

    #[test]
    fn test_overflow_dropped_without_reordering() {
        let mut buffer = InputBuffer::new(3);
        buffer.push(Direction::Up);
        buffer.push(Direction::Left);
        buffer.push(Direction::Down);

        assert!(!buffer.push(Direction::Right));
        assert_eq!(buffer.len(), 3);

        assert_eq!(buffer.pop(), Some(Direction::Up));
        assert_eq!(buffer.pop(), Some(Direction::Left));
        assert_eq!(buffer.pop(), Some(Direction::Down));
        assert_eq!(buffer.pop(), None);
    }

    #[test]
    fn test_pop_frees_capacity() {
        let mut buffer = InputBuffer::new(2);
        buffer.push(Direction::Up);
        buffer.push(Direction::Down);
        assert!(!buffer.push(Direction::Left));

        assert_eq!(buffer.pop(), Some(Direction::Up));
        assert!(buffer.push(Direction::Left));
        assert_eq!(buffer.pop(), Some(Direction::Down));
        assert_eq!(buffer.pop(), Some(Direction::Left));
    }

    #[test]
    fn test_clear() {
        let mut buffer = InputBuffer::new(3);
        buffer.push(Direction::Up);
        buffer.push(Direction::Down);
        buffer.clear();
        assert!(buffer.is_empty());
        assert_eq!(buffer.pop(), None);
    }
}
