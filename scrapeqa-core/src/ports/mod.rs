// scrapeqa-core/src/ports/mod.rs

pub mod document_source;

pub use document_source::DocumentSource;
