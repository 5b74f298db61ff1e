// scrapeqa-core/src/infrastructure/fs.rs

use async_trait::async_trait;
use serde_json::Value;
use std::io::Write;
use std::path::Path;
use tracing::{debug, instrument};

use crate::infrastructure::error::InfrastructureError;
use crate::ports::DocumentSource;

/// Reads scraper outputs from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsDocumentSource;

#[async_trait]
impl DocumentSource for FsDocumentSource {
    #[instrument(skip(self))]
    async fn load(&self, path: &Path) -> Result<Value, InfrastructureError> {
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                InfrastructureError::InputNotFound(path.display().to_string())
            } else {
                InfrastructureError::Io(e)
            }
        })?;
        debug!(bytes = content.len(), "document read");

        serde_json::from_str(&content).map_err(|e| InfrastructureError::MalformedInput {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }
}

/// Write content to a file atomically using a temporary file.
///
/// The temporary file lives in the target's directory so the final rename
/// stays on one filesystem. Readers see either the old file or the new one.
pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(
    path: P,
    content: C,
) -> Result<(), InfrastructureError> {
    let path = path.as_ref();
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut temp_file = tempfile::NamedTempFile::new_in(parent)?;
    temp_file.write_all(content.as_ref())?;
    temp_file
        .persist(path)
        .map_err(|e| InfrastructureError::Io(e.error))?;

    Ok(())
}
