//! Players and the rotating turn queue

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::board::Colour;

/// A seat in the game
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub colour: Colour,
    /// Session/user id bound to this seat
    pub user_id: String,
    /// 0 = not rolled this turn, 1..=6 = rolled and unconsumed
    pub die: u8,
}

impl Player {
    pub fn new(colour: impl Into<Colour>, user_id: impl Into<String>) -> Self {
        Self {
            colour: colour.into(),
            user_id: user_id.into(),
            die: 0,
        }
    }

    pub fn has_rolled(&self) -> bool {
        self.die != 0
    }

    pub fn reset_die(&mut self) {
        self.die = 0;
    }
}

/// Ordered players; the front is always the current player
#[derive(Clone, Debug, Default)]
pub struct TurnQueue {
    players: VecDeque<Player>,
}

impl TurnQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Current player
    pub fn current(&self) -> Option<&Player> {
        self.players.front()
    }

    pub fn current_mut(&mut self) -> Option<&mut Player> {
        self.players.front_mut()
    }

    /// Append at the tail (joins play last)
    pub fn push(&mut self, player: Player) {
        self.players.push_back(player);
    }

    /// Rotate: head moves to the tail
    pub fn advance(&mut self) {
        if let Some(player) = self.players.pop_front() {
            self.players.push_back(player);
        }
    }

    /// Remove by user id, keeping everyone else in order
    pub fn remove(&mut self, user_id: &str) -> Option<Player> {
        let index = self.players.iter().position(|p| p.user_id == user_id)?;
        self.players.remove(index)
    }

    pub fn find_by_user(&self, user_id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.user_id == user_id)
    }

    pub fn find_by_colour(&self, colour: &Colour) -> Option<&Player> {
        self.players.iter().find(|p| &p.colour == colour)
    }

    /// Players in turn order, current first
    pub fn iter(&self) -> impl Iterator<Item = &Player> + '_ {
        self.players.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn queue(colours: &[&str]) -> TurnQueue {
        let mut q = TurnQueue::new();
        for (i, &c) in colours.iter().enumerate() {
            q.push(Player::new(c, format!("user-{}", i)));
        }
        q
    }

    fn order(q: &TurnQueue) -> Vec<&str> {
        q.iter().map(|p| p.colour.as_str()).collect()
    }

    #[test]
    fn test_empty_queue_has_no_current() {
        let q = TurnQueue::new();
        assert!(q.current().is_none());
    }

    #[test]
    fn test_advance_rotates() {
        let mut q = queue(&["red", "green", "blue"]);
        assert_eq!(q.current().unwrap().colour.as_str(), "red");
        q.advance();
        assert_eq!(order(&q), vec!["green", "blue", "red"]);
        q.advance();
        q.advance();
        assert_eq!(order(&q), vec!["red", "green", "blue"]);
    }

    #[test]
    fn test_remove_preserves_order() {
        let mut q = queue(&["red", "green", "blue", "yellow"]);
        let removed = q.remove("user-1").unwrap();
        assert_eq!(removed.colour.as_str(), "green");
        assert_eq!(order(&q), vec!["red", "blue", "yellow"]);
    }

    #[test]
    fn test_remove_head_changes_current() {
        let mut q = queue(&["red", "green", "blue"]);
        q.remove("user-0");
        assert_eq!(q.current().unwrap().colour.as_str(), "green");
    }

    #[test]
    fn test_remove_unknown() {
        let mut q = queue(&["red"]);
        assert!(q.remove("nobody").is_none());
        assert_eq!(q.len(), 1);
    }
}
