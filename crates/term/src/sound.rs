//! Terminal bell as a sound sink.
//!
//! A terminal has one sound, so only line clears ring it; move, rotate and
//! drop cues are dropped to keep the bell meaningful.

use std::io::{self, Write};

use crate::core::SoundSink;
use crate::types::SoundCue;

/// Rings BEL on `W` for every line-clear cue.
pub struct BellSink<W: Write = io::Stdout> {
    out: W,
    rung: u32,
}

impl BellSink {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> BellSink<W> {
    pub fn new(out: W) -> Self {
        Self { out, rung: 0 }
    }

    /// Number of bells written so far
    pub fn rung(&self) -> u32 {
        self.rung
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> SoundSink for BellSink<W> {
    fn play(&mut self, cue: SoundCue) {
        match cue {
            SoundCue::SingleLineClear | SoundCue::DoubleLineClear | SoundCue::TripleLineClear => {
                // A lost bell is not worth stopping the game for.
                if self.out.write_all(b"\x07").and_then(|_| self.out.flush()).is_ok() {
                    self.rung += 1;
                }
            }
            SoundCue::Move | SoundCue::Rotate | SoundCue::HardDrop => {}
        }
    }
}
