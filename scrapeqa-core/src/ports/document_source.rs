// scrapeqa-core/src/ports/document_source.rs

// Contrat de lecture des fichiers produits par un scraper.
// Le domaine ne sait pas si le JSON vient du disque, d'un bucket ou d'un test.

use async_trait::async_trait;
use serde_json::Value;
use std::path::Path;

use crate::infrastructure::error::InfrastructureError;

#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Loads and parses one JSON document.
    ///
    /// A missing document must map to `InputNotFound`, an unparseable one to
    /// `MalformedInput`.
    async fn load(&self, path: &Path) -> Result<Value, InfrastructureError>;
}
