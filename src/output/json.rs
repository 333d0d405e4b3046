use anyhow::Result;
use serde::Serialize;

/// Pretty-printed JSON for any calculator record.
pub fn render_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
