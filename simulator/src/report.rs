use anyhow::Context;
use rspcore::batch::ResultTable;
use std::fs;
use std::path::Path;

/// Writes the scored table as pretty-printed JSON, creating parent
/// directories as needed.
pub fn write_json<P: AsRef<Path>>(path: P, table: &ResultTable) -> anyhow::Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating report directory {}", parent.display()))?;
        }
    }
    let payload = serde_json::to_string_pretty(table).context("serializing result table")?;
    fs::write(path, payload)
        .with_context(|| format!("writing result table {}", path.display()))?;
    Ok(())
}
