mod name_builder;

pub use name_builder::{
    candidate_names, model_families, strip_version_suffix, CANDIDATE_SUFFIXES,
};
