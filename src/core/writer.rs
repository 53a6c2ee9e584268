use crate::domain::ports::Storage;
use crate::utils::error::Result;
use serde::Serialize;

/// Renders the roster as a pretty-printed JSON array (2-space indent).
pub fn render_json<T: Serialize>(students: &[T]) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(students)?)
}

/// Replaces the file at `path` with the rendered roster.
pub async fn write_dataset<S: Storage, T: Serialize + Sync>(
    storage: &S,
    path: &str,
    students: &[T],
) -> Result<()> {
    let json_data = render_json(students)?;
    tracing::debug!("Writing {} bytes to {}", json_data.len(), path);
    storage.write_file(path, &json_data).await
}
