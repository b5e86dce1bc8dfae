use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::errors::{BioGraphsError, Result};

/// Read a packaged resource from a bincode encoded file.
///
/// A missing or unreadable file results in [`BioGraphsError::LoadingResource`],
/// content that can't be decoded in [`BioGraphsError::CorruptResource`].
pub fn load_resource<T>(path: &Path) -> Result<T>
where
    T: DeserializeOwned,
{
    debug!("Loading resource from {}", path.to_string_lossy());
    let f = std::fs::File::open(path).map_err(|source| BioGraphsError::LoadingResource {
        path: path.to_string_lossy().to_string(),
        source,
    })?;
    let input = BufReader::new(f);
    bincode::deserialize_from(input).map_err(|source| BioGraphsError::CorruptResource {
        path: path.to_string_lossy().to_string(),
        source,
    })
}

/// Write a resource as bincode encoded file.
///
/// The content is written to a temporary file in the same directory first, which is then
/// renamed, so an existing resource is never left half-written.
pub fn save_resource<T>(value: &T, path: &Path) -> Result<()>
where
    T: Serialize,
{
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => std::env::current_dir()?,
    };
    std::fs::create_dir_all(&parent)?;

    let tmp = tempfile::NamedTempFile::new_in(&parent)?;
    {
        let mut writer = BufWriter::new(tmp.as_file());
        bincode::serialize_into(&mut writer, value)?;
        writer.flush()?;
    }
    tmp.persist(path)?;
    debug!("Saved resource to {}", path.to_string_lossy());
    Ok(())
}
