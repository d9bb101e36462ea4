//! Audible cues, rendered as terminal bells.

use std::io::{stderr, Write};

/// The two cues the game emits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// Food was eaten
    Eat,
    /// The game ended
    GameOver,
}

/// Plays cues on the controlling terminal
pub struct SoundPlayer {
    muted: bool,
}

impl SoundPlayer {
    pub fn new(muted: bool) -> Self {
        Self { muted }
    }

    /// Best effort; a terminal that swallows BEL just stays silent
    pub fn play(&self, cue: Cue) {
        if self.muted {
            return;
        }

        let bells: &[u8] = match cue {
            Cue::Eat => b"\x07",
            Cue::GameOver => b"\x07\x07",
        };

        let mut out = stderr();
        let _ = out.write_all(bells);
        let _ = out.flush();
    }
}
