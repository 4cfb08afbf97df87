/// Seconds left to finish the maze.
///
/// Once expired it stays expired; extra time granted afterwards is ignored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Countdown {
    remaining: f32,
    expired: bool,
}

impl Countdown {
    pub fn new(secs: f32) -> Self {
        Self {
            remaining: secs.max(0.0),
            expired: false,
        }
    }

    /// Seconds left, never negative.
    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    pub fn is_expired(&self) -> bool {
        self.expired
    }

    /// Grant extra time, unless already expired.
    pub fn add(&mut self, secs: f32) {
        if !self.expired {
            self.remaining += secs.max(0.0);
        }
    }

    /// Advance by `dt` seconds. Returns `true` on the tick that expires it.
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.expired {
            return false;
        }
        self.remaining = (self.remaining - dt.max(0.0)).max(0.0);
        if self.remaining <= 0.0 {
            self.expired = true;
            return true;
        }
        false
    }
}
