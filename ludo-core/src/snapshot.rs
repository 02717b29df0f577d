//! Read-only game views for presentation layers

use serde::Serialize;
use std::collections::BTreeMap;

use crate::board::{is_safe_zone, Colour};
use crate::game::Game;

/// Occupancy of one zone
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ZoneView {
    pub index: usize,
    pub safe: bool,
    pub counters: BTreeMap<Colour, usize>,
}

/// Public view of a seated player (session ids are not exposed)
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PlayerView {
    pub colour: Colour,
    pub on_board: usize,
    pub finished: usize,
}

/// Copy of everything a client needs to draw the game
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    pub zones: Vec<ZoneView>,
    pub finished: BTreeMap<Colour, usize>,
    pub current_colour: Option<Colour>,
    /// Pending die of the current player (0 = not rolled)
    pub die: u8,
    /// Seated players in turn order, current first
    pub players: Vec<PlayerView>,
    pub number_of_players: usize,
    pub counters_per_player: usize,
    pub winners: Vec<Colour>,
    /// Counter slots per zone for drawing; never limits play
    pub layout_slots: usize,
    pub turns_taken: u64,
}

impl GameSnapshot {
    pub fn from_game(game: &Game) -> Self {
        let zones = game
            .board()
            .zones()
            .map(|(index, zone)| ZoneView {
                index,
                safe: is_safe_zone(index),
                counters: zone.owners().map(|(c, n)| (c.clone(), n)).collect(),
            })
            .collect();

        let players: Vec<PlayerView> = game
            .players()
            .map(|p| PlayerView {
                colour: p.colour.clone(),
                on_board: game.board().count_of(&p.colour),
                finished: game.finished_count(&p.colour),
            })
            .collect();

        let finished = players
            .iter()
            .filter(|p| p.finished > 0)
            .map(|p| (p.colour.clone(), p.finished))
            .collect();

        let config = game.config();
        let current = game.current_player();

        Self {
            zones,
            finished,
            current_colour: current.map(|p| p.colour.clone()),
            die: current.map_or(0, |p| p.die),
            players,
            number_of_players: config.number_of_players,
            counters_per_player: config.counters_per_player,
            winners: game.winners(),
            layout_slots: layout_slots(config.total_counters()),
            turns_taken: game.turns_taken(),
        }
    }

    /// Counters of `colour` in zone `index`
    pub fn counters_at(&self, index: usize, colour: &Colour) -> usize {
        self.zones
            .get(index)
            .and_then(|z| z.counters.get(colour).copied())
            .unwrap_or(0)
    }
}

/// Smallest square grid that fits every counter in one zone
fn layout_slots(total_counters: usize) -> usize {
    let mut side = 0;
    while side * side < total_counters {
        side += 1;
    }
    side * side
}
