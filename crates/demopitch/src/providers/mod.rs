pub mod base;
pub mod canonical;
pub mod errors;
pub mod formats;
pub mod google;

pub use base::{ApiRevision, GenerativeApi};
pub use errors::{classify_error_message, ErrorClass, ProviderError};
pub use google::GoogleClient;
