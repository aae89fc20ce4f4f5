use once_cell::sync::Lazy;
use regex::Regex;

static STRIP_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"-latest$").unwrap(),
        Regex::new(r"-preview-tts(-\d+)*$").unwrap(),
        Regex::new(r"-preview(-\d+)*$").unwrap(),
        Regex::new(r"-00[1-9]$").unwrap(),
    ]
});

/// Suffixes appended to the base form, in retry priority order.
pub const CANDIDATE_SUFFIXES: &[&str] = &[
    "",
    "-latest",
    "-preview",
    "-preview-tts",
    "-001",
    "-002",
    "-003",
    "-exp",
    "-preview-05-20",
    "-preview-06-05",
    "-preview-09-2025",
];

const FAMILY_DELIMITER: char = '-';

/// Strip naming-convention suffixes until none match.
///
/// Runs to a fixpoint so stacked suffixes such as `-preview-002` or
/// `-001-latest` collapse completely, which also makes the function idempotent.
pub fn strip_version_suffix(model: &str) -> String {
    let mut result = model.to_string();

    let mut changed = true;
    while changed {
        let before = result.clone();
        for pattern in STRIP_PATTERNS.iter() {
            result = pattern.replace(&result, "").to_string();
        }
        changed = result != before;
    }

    result
}

/// Ordered, de-duplicated list of model names worth trying for `model`.
///
/// The raw name comes first, then the bare base form, then the base form with
/// each of [`CANDIDATE_SUFFIXES`] appended.
pub fn candidate_names(model: &str) -> Vec<String> {
    let base = strip_version_suffix(model);

    let mut candidates: Vec<String> = Vec::with_capacity(CANDIDATE_SUFFIXES.len() + 2);
    let ordered = [model.to_string(), base.clone()]
        .into_iter()
        .chain(CANDIDATE_SUFFIXES.iter().map(|suffix| format!("{}{}", base, suffix)));

    for name in ordered {
        if !name.is_empty() && !candidates.contains(&name) {
            candidates.push(name);
        }
    }

    candidates
}

/// Coarse family prefixes used to search a model catalog.
///
/// Always yields the base form. When it has more than two `-` separated
/// segments, the prefix without the last segment is added as well, e.g.
/// `gemini-1.5-flash-8b` also yields `gemini-1.5-flash`.
pub fn model_families(model: &str) -> Vec<String> {
    let base = strip_version_suffix(model);
    let mut families = vec![base.clone()];

    let segments: Vec<&str> = base.split(FAMILY_DELIMITER).collect();
    if segments.len() > 2 {
        let broader = segments[..segments.len() - 1].join("-");
        if !families.contains(&broader) {
            families.push(broader);
        }
    }

    families.retain(|family| !family.is_empty());
    families
}
