use super::direction::Direction;
use super::state::Position;

/// The snake in the arena
///
/// Segment i always equals the pre-move position of segment i-1, so the body
/// trails the head by construction. Cloning duplicates the full segment
/// storage; no two snakes ever alias.
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    body: Vec<Position>,
    direction: Direction,
    /// Hard cap on growth, bounded by arena capacity
    max_length: usize,
}

impl Snake {
    /// Create a new snake with given head position, facing `direction`, with
    /// `length` segments trailing away from the direction of travel.
    pub fn new(head: Position, direction: Direction, length: usize, max_length: usize) -> Self {
        let mut body = vec![head];

        let (dx, dy) = direction.delta();
        let (back_dx, back_dy) = (-dx, -dy);

        for i in 1..length {
            let prev = body[i - 1];
            body.push(prev.moved_by(back_dx, back_dy));
        }

        Self {
            body,
            direction,
            max_length,
        }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// All segments, head first
    pub fn segments(&self) -> &[Position] {
        &self.body
    }

    /// Body segments (excluding head)
    pub fn body_segments(&self) -> &[Position] {
        &self.body[1..]
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Check if position collides with the snake body (excluding head)
    pub fn collides_with_body(&self, pos: Position) -> bool {
        self.body_segments().contains(&pos)
    }

    /// Check if position lies on any segment, head included
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Request a turn, taking effect on the next `advance()`. A request for
    /// the reverse of the current direction is ignored (the snake would
    /// otherwise fold through its own neck).
    pub fn change_direction(&mut self, dir: Direction) {
        if self.direction.is_opposite(dir) {
            return;
        }
        self.direction = dir;
    }

    /// Advance one cell in the current direction: the head moves by the
    /// direction's unit vector and every other segment shifts to its
    /// predecessor's previous position. Length is preserved. The head is not
    /// clamped to the arena; bounds are judged by the collision check.
    pub fn advance(&mut self) {
        let new_head = self.head().moved_in_direction(self.direction);
        self.body.insert(0, new_head);
        self.body.pop();
    }

    /// Append a duplicate of the current tail, so the extension becomes
    /// visible one move later. Returns false without growing when the snake
    /// is already at `max_length` (the arena-full win signal).
    pub fn grow(&mut self) -> bool {
        if self.body.len() >= self.max_length {
            return false;
        }
        let tail = *self.body.last().expect("snake body is never empty");
        self.body.push(tail);
        true
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}
