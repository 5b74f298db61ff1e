pub mod error;
pub mod qa;
pub mod rounding;
pub mod scrape;

// Re-exports pratiques pour simplifier les imports ailleurs
pub use error::DomainError;
pub use rounding::round_to;
