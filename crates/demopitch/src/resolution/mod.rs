//! Model-name resolution: try candidate names across API revisions, stop at
//! the first success or fatal error, and suggest catalog alternatives when
//! nothing matched.

pub mod catalog;
pub mod resolver;
pub mod suggest;

pub use catalog::CatalogCache;
pub use resolver::{LatestResolution, ModelResolver, Resolution, ResolutionError};
pub use suggest::{suggest_models, MAX_SUGGESTIONS};
