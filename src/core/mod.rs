//! Core view models, normalizers and the pipeline abstraction

pub mod change;
pub mod config;
pub mod error;
pub mod finance;
pub mod log;
pub mod news;
pub mod resource;
pub mod series;
pub mod weather;

// Re-export main types for cleaner imports
pub use change::ChangeSummary;
pub use error::{FetchError, FetchResult, ProviderPayload};
pub use resource::{Pipeline, Resource, ResourceState};
