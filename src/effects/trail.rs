//! Trailing ball history for the comet-tail effect

use std::collections::VecDeque;

use glam::Vec2;

/// Fixed-length sliding window of past ball positions (oldest first)
#[derive(Debug, Clone, PartialEq)]
pub struct TrailHistory {
    positions: VecDeque<Vec2>,
}

impl TrailHistory {
    /// Create a full window where every slot holds `start`
    pub fn new(length: usize, start: Vec2) -> Self {
        Self {
            positions: std::iter::repeat_n(start, length).collect(),
        }
    }

    /// Evict the oldest sample and append `pos` as the newest
    pub fn push(&mut self, pos: Vec2) {
        if self.positions.is_empty() {
            return;
        }
        self.positions.pop_front();
        self.positions.push_back(pos);
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn newest(&self) -> Option<Vec2> {
        self.positions.back().copied()
    }

    /// Positions from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.positions.iter().copied()
    }
}
