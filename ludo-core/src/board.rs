//! Track geometry and counter occupancy

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::BoardError;

/// Number of trackable zones (0..=27)
pub const ZONE_COUNT: usize = 28;

/// Move target meaning "left the track"; not a zone
pub const FINISH: usize = ZONE_COUNT;

/// Shared staging zone for unplaced and captured counters
pub const HOME_ZONE: usize = 0;

/// Every zone index divisible by this is safe
pub const SAFE_INTERVAL: usize = 7;

/// Check if a zone index is a safe zone (7, 14, 21; and home)
pub fn is_safe_zone(index: usize) -> bool {
    index % SAFE_INTERVAL == 0
}

/// Player colour, also used as the owner tag of a counter
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Colour(String);

impl Colour {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Colour {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Colour {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One track position: an unordered multiset of owner tags
#[derive(Clone, Debug, Default)]
pub struct Zone {
    counters: FxHashMap<Colour, usize>,
}

impl Zone {
    /// Total counters resting here, all owners
    pub fn total(&self) -> usize {
        self.counters.values().sum()
    }

    /// Counters of one owner resting here
    pub fn count(&self, owner: &Colour) -> usize {
        self.counters.get(owner).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }

    /// Iterate (owner, count) pairs
    pub fn owners(&self) -> impl Iterator<Item = (&Colour, usize)> + '_ {
        self.counters.iter().map(|(owner, &n)| (owner, n))
    }

    /// Whether this zone stops `mover` from passing through.
    ///
    /// Blocked means two or more counters that are not all the mover's.
    /// The safe-zone carve-out is applied by the caller, which knows the index.
    pub fn blocks(&self, mover: &Colour) -> bool {
        let total = self.total();
        total >= 2 && self.count(mover) < total
    }

    fn insert(&mut self, owner: &Colour) {
        *self.counters.entry(owner.clone()).or_insert(0) += 1;
    }

    fn take(&mut self, owner: &Colour) -> bool {
        match self.counters.get_mut(owner) {
            Some(n) if *n > 1 => {
                *n -= 1;
                true
            }
            Some(_) => {
                self.counters.remove(owner);
                true
            }
            None => false,
        }
    }
}

/// The shared track
#[derive(Clone, Debug)]
pub struct Board {
    zones: Vec<Zone>,
}

impl Board {
    pub fn new() -> Self {
        Self {
            zones: vec![Zone::default(); ZONE_COUNT],
        }
    }

    /// Get zone by index
    pub fn zone(&self, index: usize) -> Option<&Zone> {
        self.zones.get(index)
    }

    /// Iterate zones in track order
    pub fn zones(&self) -> impl Iterator<Item = (usize, &Zone)> + '_ {
        self.zones.iter().enumerate()
    }

    /// Insert one counter of `owner` into `index`
    pub fn place(&mut self, owner: &Colour, index: usize) -> Result<(), BoardError> {
        let zone = self
            .zones
            .get_mut(index)
            .ok_or(BoardError::ZoneOutOfRange(index))?;
        zone.insert(owner);
        Ok(())
    }

    /// Remove exactly one counter of `owner` from `index`
    pub fn remove(&mut self, owner: &Colour, index: usize) -> Result<(), BoardError> {
        let zone = self
            .zones
            .get_mut(index)
            .ok_or(BoardError::ZoneOutOfRange(index))?;
        if zone.take(owner) {
            Ok(())
        } else {
            Err(BoardError::NoSuchCounter {
                owner: owner.clone(),
                zone: index,
            })
        }
    }

    /// Owner tags at `index`, one entry per counter
    pub fn occupants(&self, index: usize) -> Vec<Colour> {
        self.zones
            .get(index)
            .map(|zone| {
                zone.owners()
                    .flat_map(|(owner, n)| std::iter::repeat(owner.clone()).take(n))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Drop every counter of `owner`; returns how many were removed
    pub fn remove_all(&mut self, owner: &Colour) -> usize {
        self.zones
            .iter_mut()
            .map(|zone| zone.counters.remove(owner).unwrap_or(0))
            .sum()
    }

    /// Zone indices holding at least one counter of `owner`
    pub fn positions_of<'a>(&'a self, owner: &'a Colour) -> impl Iterator<Item = usize> + 'a {
        self.zones
            .iter()
            .enumerate()
            .filter(move |(_, zone)| zone.count(owner) > 0)
            .map(|(index, _)| index)
    }

    /// Counters of `owner` anywhere on the track
    pub fn count_of(&self, owner: &Colour) -> usize {
        self.zones.iter().map(|zone| zone.count(owner)).sum()
    }

    /// First zone strictly between `origin` and `target` that blocks `mover`
    pub fn first_block(&self, mover: &Colour, origin: usize, target: usize) -> Option<usize> {
        (origin + 1..target.min(ZONE_COUNT))
            .filter(|&index| !is_safe_zone(index))
            .find(|&index| self.zones[index].blocks(mover))
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red() -> Colour {
        Colour::from("red")
    }

    fn green() -> Colour {
        Colour::from("green")
    }

    #[test]
    fn test_safe_zones() {
        assert!(is_safe_zone(0));
        assert!(is_safe_zone(7));
        assert!(is_safe_zone(14));
        assert!(is_safe_zone(21));
        assert!(!is_safe_zone(1));
        assert!(!is_safe_zone(27));
    }

    #[test]
    fn test_place_and_remove() {
        let mut board = Board::new();
        board.place(&red(), 3).unwrap();
        board.place(&red(), 3).unwrap();
        board.place(&green(), 3).unwrap();

        assert_eq!(board.zone(3).unwrap().total(), 3);
        assert_eq!(board.occupants(3).len(), 3);

        board.remove(&red(), 3).unwrap();
        assert_eq!(board.zone(3).unwrap().count(&red()), 1);
        board.remove(&red(), 3).unwrap();
        assert_eq!(board.zone(3).unwrap().count(&red()), 0);
        assert_eq!(board.occupants(3), vec![green()]);
    }

    #[test]
    fn test_remove_missing_counter() {
        let mut board = Board::new();
        board.place(&green(), 5).unwrap();
        assert_eq!(
            board.remove(&red(), 5),
            Err(BoardError::NoSuchCounter { owner: red(), zone: 5 })
        );
        // Untouched
        assert_eq!(board.zone(5).unwrap().count(&green()), 1);
    }

    #[test]
    fn test_zone_out_of_range() {
        let mut board = Board::new();
        assert_eq!(board.place(&red(), FINISH), Err(BoardError::ZoneOutOfRange(FINISH)));
    }

    #[test]
    fn test_zone_unbounded() {
        let mut board = Board::new();
        for _ in 0..100 {
            board.place(&red(), HOME_ZONE).unwrap();
        }
        assert_eq!(board.zone(HOME_ZONE).unwrap().total(), 100);
    }

    #[test]
    fn test_blocking_rules() {
        let mut zone = Zone::default();
        zone.insert(&green());
        assert!(!zone.blocks(&red())); // single counter never blocks
        zone.insert(&green());
        assert!(zone.blocks(&red()));
        assert!(!zone.blocks(&green())); // own pair
        zone.insert(&red());
        assert!(zone.blocks(&green())); // mixed
    }

    #[test]
    fn test_first_block_skips_safe_zones() {
        let mut board = Board::new();
        board.place(&green(), 7).unwrap();
        board.place(&green(), 7).unwrap();
        assert_eq!(board.first_block(&red(), 5, 10), None);

        board.place(&green(), 8).unwrap();
        board.place(&green(), 8).unwrap();
        assert_eq!(board.first_block(&red(), 5, 10), Some(8));
        // Endpoints are excluded
        assert_eq!(board.first_block(&red(), 5, 8), None);
    }

    #[test]
    fn test_remove_all() {
        let mut board = Board::new();
        board.place(&red(), 0).unwrap();
        board.place(&red(), 4).unwrap();
        board.place(&red(), 4).unwrap();
        board.place(&green(), 4).unwrap();

        assert_eq!(board.remove_all(&red()), 3);
        assert_eq!(board.count_of(&red()), 0);
        assert_eq!(board.count_of(&green()), 1);
        assert!(board.zone(0).unwrap().is_empty());
    }

    #[test]
    fn test_positions_of() {
        let mut board = Board::new();
        board.place(&red(), 0).unwrap();
        board.place(&red(), 12).unwrap();
        board.place(&green(), 9).unwrap();
        let positions: Vec<_> = board.positions_of(&red()).collect();
        assert_eq!(positions, vec![0, 12]);
    }
}
