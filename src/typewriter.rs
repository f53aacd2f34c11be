pub const TYPE_MS: f64 = 60.0;
pub const DELETE_MS: f64 = 40.0;
pub const HOLD_MS: f64 = 1000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Typing,
    Holding,
    Deleting,
}

/// Types each word out, holds it, deletes it and moves to the next, forever.
#[derive(Debug, Clone)]
pub struct Typewriter {
    words: Vec<Vec<char>>,
    word: usize,
    shown: usize,
    phase: Phase,
    pending_ms: f64,
}

impl Typewriter {
    pub fn new<S: AsRef<str>>(words: &[S]) -> Self {
        Self {
            words: words.iter().map(|w| w.as_ref().chars().collect()).collect(),
            word: 0,
            shown: 0,
            phase: Phase::Typing,
            pending_ms: 0.0,
        }
    }

    pub fn text(&self) -> String {
        self.words
            .get(self.word)
            .map(|w| w[..self.shown].iter().collect())
            .unwrap_or_default()
    }

    fn step_ms(&self) -> f64 {
        match self.phase {
            Phase::Typing => TYPE_MS,
            Phase::Holding => HOLD_MS,
            Phase::Deleting => DELETE_MS,
        }
    }

    /// Advances by `elapsed_ms`, taking as many steps as fit. Returns whether the
    /// visible text changed.
    pub fn advance(&mut self, elapsed_ms: f64) -> bool {
        if self.words.is_empty() {
            return false;
        }
        let before = (self.word, self.shown);
        self.pending_ms += elapsed_ms.max(0.0);
        while self.pending_ms >= self.step_ms() {
            self.pending_ms -= self.step_ms();
            self.step();
        }
        before != (self.word, self.shown)
    }

    fn step(&mut self) {
        let len = self.words[self.word].len();
        match self.phase {
            Phase::Typing => {
                self.shown = (self.shown + 1).min(len);
                if self.shown == len {
                    self.phase = Phase::Holding;
                }
            }
            // the hold ends with the first deletion
            Phase::Holding => {
                self.shown = self.shown.saturating_sub(1);
                self.phase = Phase::Deleting;
            }
            Phase::Deleting if self.shown > 0 => self.shown -= 1,
            Phase::Deleting => {
                self.word = (self.word + 1) % self.words.len();
                self.phase = Phase::Typing;
            }
        }
    }
}
