//! Die sources
//!
//! The engine only asks for "the next face"; where it comes from is pluggable
//! so seeded games and scripted test sequences share one code path.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::fmt::Debug;

/// Faces on the die
pub const DIE_FACES: u8 = 6;

/// Produces die faces in 1..=DIE_FACES
pub trait DieSource: Debug + Send {
    fn next_face(&mut self) -> u8;
}

/// Uniform die backed by ChaCha8
#[derive(Clone, Debug)]
pub struct RandomDie {
    rng: ChaCha8Rng,
}

impl RandomDie {
    /// Seeded die, or entropy when `seed` is None
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => ChaCha8Rng::seed_from_u64(s),
            None => ChaCha8Rng::from_entropy(),
        };
        Self { rng }
    }
}

impl DieSource for RandomDie {
    fn next_face(&mut self) -> u8 {
        self.rng.gen_range(1..=DIE_FACES)
    }
}

/// Cycles through a fixed list of faces
#[derive(Clone, Debug)]
pub struct ScriptedDie {
    faces: Vec<u8>,
    next: usize,
}

impl ScriptedDie {
    /// Faces outside 1..=6 are clamped into range
    pub fn new(faces: impl IntoIterator<Item = u8>) -> Self {
        let mut faces: Vec<u8> = faces
            .into_iter()
            .map(|f| f.clamp(1, DIE_FACES))
            .collect();
        if faces.is_empty() {
            faces.push(1);
        }
        Self { faces, next: 0 }
    }
}

impl DieSource for ScriptedDie {
    fn next_face(&mut self) -> u8 {
        let face = self.faces[self.next];
        self.next = (self.next + 1) % self.faces.len();
        face
    }
}
