use super::PitchContext;
use indoc::formatdoc;

/// Prompt asking the model for a two-minute spoken demo script.
pub fn build_prompt(context: &PitchContext) -> String {
    let context = context.normalized();
    formatdoc! {"
        You are a confident hackathon presenter preparing a two-minute spoken script for the {hackathon} demo stage.
        Structure the script with these titled sections: Introduction, Problem, Solution Walkthrough, Tech Stack, What We Learned, Closing Invitation.
        Use a clear, conversational tone that sounds like live narration.
        Project: {project}
        Problem: {problem}
        Solution: {solution}
        Tech Stack: {tech_stack}
        Target Users: {target_users}
        Highlight why the audience should care, keep the pace around 2 minutes (~250-270 words), and end with a strong invite to judges.",
        hackathon = context.hackathon_name,
        project = context.project_name,
        problem = context.problem,
        solution = context.solution,
        tech_stack = context.tech_stack,
        target_users = context.target_users,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pitch::{sample_context, DEFAULT_HACKATHON};

    #[test]
    fn test_prompt_carries_every_field() {
        let prompt = build_prompt(&sample_context());

        assert!(prompt.starts_with("You are a confident hackathon presenter"));
        assert!(prompt.contains(&format!("for the {} demo stage", DEFAULT_HACKATHON)));
        assert!(prompt.contains("\nProject: Tidewatch\n"));
        assert!(prompt.contains("\nTarget Users: harbor masters\n"));
        assert!(prompt.ends_with("end with a strong invite to judges."));
        assert_eq!(prompt.lines().count(), 9);
    }

    #[test]
    fn test_prompt_lists_script_sections_in_order() {
        let prompt = build_prompt(&sample_context());
        assert!(prompt.contains(
            "Introduction, Problem, Solution Walkthrough, Tech Stack, What We Learned, Closing Invitation."
        ));
    }
}
