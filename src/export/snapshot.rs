use crate::error::Result;
use crate::stats::RawSnapshot;
use std::fs;
use std::path::Path;

/// Write the response body verbatim, replacing any earlier snapshot
pub fn write_snapshot<P: AsRef<Path>>(snapshot: &RawSnapshot, path: P) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, &snapshot.body)?;

    tracing::debug!(
        path = %path.display(),
        bytes = snapshot.body.len(),
        fetched_at = %snapshot.fetched_at.to_rfc3339(),
        "Saved raw snapshot"
    );
    Ok(())
}
