//! RNG module - piece selection for the current/next buffer
//!
//! The game shows exactly one piece of lookahead. On every spawn the "next"
//! piece becomes "current" and a fresh "next" is drawn. Draws are either
//! uniform random from a seeded LCG (same seed, same game) or a fixed cyclic
//! sequence for scripted play.

use crate::types::PieceKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // High bits of an LCG are far better distributed than the low ones.
        (self.next_u32() >> 16) % max.max(1)
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Where new pieces come from
#[derive(Debug, Clone)]
pub enum PieceSource {
    /// Uniform draw over all seven kinds
    Random(SimpleRng),
    /// Fixed sequence, repeated forever
    Sequence { pieces: Vec<PieceKind>, index: usize },
}

impl PieceSource {
    fn draw(&mut self) -> PieceKind {
        match self {
            PieceSource::Random(rng) => {
                PieceKind::ALL[rng.next_range(PieceKind::ALL.len() as u32) as usize]
            }
            PieceSource::Sequence { pieces, index } => {
                let piece = pieces[*index % pieces.len()];
                *index = (*index + 1) % pieces.len();
                piece
            }
        }
    }
}

/// Two-slot piece buffer: the piece to spawn and one piece of lookahead
#[derive(Debug, Clone)]
pub struct PieceQueue {
    current: PieceKind,
    next: PieceKind,
    source: PieceSource,
}

impl PieceQueue {
    /// Seeded random queue
    pub fn new(seed: u32) -> Self {
        Self::from_source(PieceSource::Random(SimpleRng::new(seed)))
    }

    /// Queue that cycles through `pieces` in order.
    ///
    /// An empty sequence falls back to the catalog order.
    pub fn sequence(pieces: impl IntoIterator<Item = PieceKind>) -> Self {
        let mut pieces: Vec<PieceKind> = pieces.into_iter().collect();
        if pieces.is_empty() {
            pieces = PieceKind::ALL.to_vec();
        }
        Self::from_source(PieceSource::Sequence { pieces, index: 0 })
    }

    fn from_source(mut source: PieceSource) -> Self {
        let current = source.draw();
        let next = source.draw();
        Self {
            current,
            next,
            source,
        }
    }

    /// The piece to spawn
    pub fn current(&self) -> PieceKind {
        self.current
    }

    /// The lookahead piece shown in the preview
    pub fn next(&self) -> PieceKind {
        self.next
    }

    /// Promote next to current and draw a new next; returns the new current
    pub fn advance(&mut self) -> PieceKind {
        self.current = self.next;
        self.next = self.source.draw();
        self.current
    }
}

impl Default for PieceQueue {
    fn default() -> Self {
        Self::new(1)
    }
}
