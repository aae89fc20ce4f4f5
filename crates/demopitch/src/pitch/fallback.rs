use super::PitchContext;
use indoc::formatdoc;

/// Template script with the same sections the model is asked for, filled
/// straight from `context`. Needs no network.
pub fn build_fallback_script(context: &PitchContext) -> String {
    let context = context.normalized();
    formatdoc! {"
        Introduction
        Hi everyone at {hackathon}, we are thrilled to show you {project}, built in under 48 hours to push what is possible with accessible AI tooling.

        Problem
        {problem}

        Solution Walkthrough
        {solution}

        Tech Stack
        Under the hood we combined {tech_stack}. Each choice kept us shipping quickly without sacrificing reliability.

        What We Learned
        Shipping fast forced us to distill the signal: listen to {target_users}, automate the boring parts, and leave time for polish.

        Closing Invitation
        Thanks for spending a slice of your demo tour with {project}. We would love to continue the conversation, so swing by after judging to try it firsthand.",
        hackathon = context.hackathon_name,
        project = context.project_name,
        problem = context.problem,
        solution = context.solution,
        tech_stack = context.tech_stack,
        target_users = context.target_users,
    }
}
