use console::style;
use demopitch::providers::canonical::{candidate_names, model_families, strip_version_suffix};
use demopitch::providers::ApiRevision;

fn render_candidates(requested: &str) -> String {
    let base = strip_version_suffix(requested);
    let mut out = format!("Base form: {}\n\nTry order:\n", base);

    let candidates = candidate_names(requested);
    let mut attempt = 0;
    for revision in ApiRevision::ALL {
        for candidate in &candidates {
            attempt += 1;
            out.push_str(&format!("  {:>2}. {}/{}\n", attempt, revision, candidate));
        }
    }

    out.push_str("\nCatalog families:\n");
    for family in model_families(requested) {
        out.push_str(&format!("  {}\n", family));
    }
    out
}

pub fn handle_candidates(requested: &str) {
    let rendered = render_candidates(requested);
    for line in rendered.lines() {
        if line.ends_with(':') {
            println!("{}", style(line).cyan().bold());
        } else {
            println!("{}", line);
        }
    }
}
