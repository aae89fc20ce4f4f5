//! Caller-side pitch text: the prompt sent to the model, the offline script
//! used when generation fails, and spoken-length estimates.

mod fallback;
mod prompt;
mod timing;

pub use fallback::build_fallback_script;
pub use prompt::build_prompt;
pub use timing::{ScriptTiming, TARGET_MINUTES, WORDS_PER_MINUTE};

use serde::{Deserialize, Serialize};

pub const DEFAULT_HACKATHON: &str = "DemoPitch AI Hackathon";

/// Project details a demo script is written from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PitchContext {
    pub project_name: String,
    pub problem: String,
    pub solution: String,
    pub tech_stack: String,
    pub target_users: String,
    #[serde(default)]
    pub hackathon_name: String,
}

impl PitchContext {
    /// Trims every field and fills in [`DEFAULT_HACKATHON`] when no event
    /// name was given.
    pub fn normalized(&self) -> Self {
        let hackathon_name = match self.hackathon_name.trim() {
            "" => DEFAULT_HACKATHON.to_string(),
            name => name.to_string(),
        };
        Self {
            project_name: self.project_name.trim().to_string(),
            problem: self.problem.trim().to_string(),
            solution: self.solution.trim().to_string(),
            tech_stack: self.tech_stack.trim().to_string(),
            target_users: self.target_users.trim().to_string(),
            hackathon_name,
        }
    }
}

#[cfg(test)]
pub(crate) fn sample_context() -> PitchContext {
    PitchContext {
        project_name: "Tidewatch".to_string(),
        problem: "Harbor crews learn about storm surges too late.".to_string(),
        solution: "Tidewatch fuses buoy feeds into a five-minute early warning.".to_string(),
        tech_stack: "Rust, tokio and a Gemini summarizer".to_string(),
        target_users: "harbor masters".to_string(),
        hackathon_name: String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_trims_and_defaults_hackathon() {
        let context = PitchContext {
            project_name: "  Tidewatch ".to_string(),
            hackathon_name: "   ".to_string(),
            ..sample_context()
        };
        let normalized = context.normalized();
        assert_eq!(normalized.project_name, "Tidewatch");
        assert_eq!(normalized.hackathon_name, DEFAULT_HACKATHON);

        let named = PitchContext {
            hackathon_name: " Rust Fest ".to_string(),
            ..sample_context()
        };
        assert_eq!(named.normalized().hackathon_name, "Rust Fest");
    }
}
