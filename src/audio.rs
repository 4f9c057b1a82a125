//! Sound cues for engine events.
//!
//! Each [`GameEvent`] maps to a short phrase of MIDI notes. A terminal has no
//! synthesiser, so the front end only rings the bell for cues flagged
//! [`Cue::rings_bell`]; the note table is kept so a richer backend can play it.

use crate::types::GameEvent;

/// One note: MIDI number, how long it sounds, and the pause before the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tone {
    pub note: u8,
    pub duration_ms: u32,
    pub gap_ms: u32,
}

const fn tone(note: u8, duration_ms: u32, gap_ms: u32) -> Tone {
    Tone {
        note,
        duration_ms,
        gap_ms,
    }
}

const MOVE: [Tone; 1] = [tone(60, 50, 0)];
const ROTATE: [Tone; 1] = [tone(75, 50, 0)];
const DROP: [Tone; 1] = [tone(40, 100, 0)];
const HOLD: [Tone; 1] = [tone(65, 100, 0)];
const CLEAR: [Tone; 3] = [tone(72, 80, 50), tone(76, 80, 50), tone(79, 150, 0)];
const GAME_OVER: [Tone; 3] = [tone(55, 300, 250), tone(51, 300, 250), tone(48, 800, 0)];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Move,
    Rotate,
    Drop,
    Hold,
    Clear,
    GameOver,
}

impl Cue {
    /// Cue for an engine event. A hard drop is voiced by the lock that follows it.
    pub fn for_event(event: GameEvent) -> Option<Cue> {
        match event {
            GameEvent::Moved => Some(Cue::Move),
            GameEvent::Rotated => Some(Cue::Rotate),
            GameEvent::HardDropped => None,
            GameEvent::Held => Some(Cue::Hold),
            GameEvent::Locked => Some(Cue::Drop),
            GameEvent::LinesCleared(_) => Some(Cue::Clear),
            GameEvent::GameOver => Some(Cue::GameOver),
        }
    }

    pub fn tones(self) -> &'static [Tone] {
        match self {
            Cue::Move => &MOVE,
            Cue::Rotate => &ROTATE,
            Cue::Drop => &DROP,
            Cue::Hold => &HOLD,
            Cue::Clear => &CLEAR,
            Cue::GameOver => &GAME_OVER,
        }
    }

    /// Total playing time including gaps
    pub fn duration_ms(self) -> u32 {
        self.tones().iter().map(|t| t.duration_ms + t.gap_ms).sum()
    }

    pub fn rings_bell(self) -> bool {
        matches!(self, Cue::Clear | Cue::GameOver)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_event_but_hard_drop_has_a_cue() {
        assert_eq!(Cue::for_event(GameEvent::Moved), Some(Cue::Move));
        assert_eq!(Cue::for_event(GameEvent::LinesCleared(4)), Some(Cue::Clear));
        assert_eq!(Cue::for_event(GameEvent::HardDropped), None);
    }

    #[test]
    fn phrases() {
        assert_eq!(Cue::Move.tones(), &[tone(60, 50, 0)]);
        assert_eq!(Cue::Clear.tones().len(), 3);
        assert_eq!(Cue::Clear.duration_ms(), 80 + 50 + 80 + 50 + 150);
        assert_eq!(Cue::GameOver.tones()[2].note, 48);
    }

    #[test]
    fn only_big_moments_ring() {
        assert!(Cue::Clear.rings_bell());
        assert!(Cue::GameOver.rings_bell());
        assert!(!Cue::Drop.rings_bell());
        assert!(!Cue::Move.rings_bell());
    }
}
