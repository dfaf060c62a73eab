use super::types::Collection;
use anyhow::Context;
use serde::Serialize;
use std::path::Path;

/// Render the collection as 4-space-indented JSON.
///
/// Deterministic: the same collection always renders to the same bytes.
pub fn to_pretty_json(collection: &Collection) -> anyhow::Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    collection.serialize(&mut ser)?;
    Ok(String::from_utf8(buf)?)
}

/// Write the collection to `path`. The write is a plain open/truncate/write
/// with no partial-write recovery: the export is idempotent and safely
/// re-runnable.
pub fn write_collection(collection: &Collection, path: impl AsRef<Path>) -> anyhow::Result<()> {
    let path = path.as_ref();
    let json = to_pretty_json(collection)?;
    std::fs::write(path, json)
        .with_context(|| format!("failed to write collection to {}", path.display()))?;
    Ok(())
}
