use std::fmt;

pub const WORDS_PER_MINUTE: f64 = 130.0;
pub const TARGET_MINUTES: f64 = 2.0;
const OVER_LIMIT_SLACK_MINUTES: f64 = 0.2;

/// Spoken-length estimate for a script.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScriptTiming {
    pub words: usize,
    pub minutes: f64,
}

impl ScriptTiming {
    pub fn measure(text: &str) -> Self {
        let words = text.split_whitespace().count();
        Self {
            words,
            minutes: words as f64 / WORDS_PER_MINUTE,
        }
    }

    pub fn is_over_limit(&self) -> bool {
        self.minutes > TARGET_MINUTES + OVER_LIMIT_SLACK_MINUTES
    }

    pub fn hint(&self) -> Option<&'static str> {
        self.is_over_limit()
            .then_some("Trim ~20 seconds for a tighter delivery.")
    }
}

impl fmt::Display for ScriptTiming {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} words · ~{:.1} min", self.words, self.minutes)
    }
}
