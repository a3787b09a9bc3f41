use std::path::{Path, PathBuf};

use super::SummarizerApi;
use crate::error::Result;
use crate::model::DownloadFormat;

/// File name a downloaded summary is saved under: `summary_{id}.{format}`.
pub fn download_file_name(summary_id: &str, format: DownloadFormat) -> String {
    let safe_id: String = summary_id
        .chars()
        .map(|c| if matches!(c, '/' | '\\' | ':') { '_' } else { c })
        .collect();
    format!("summary_{safe_id}.{}", format.extension())
}

/// Write a downloaded body into `dir`. The bytes go to a hidden staging file
/// first and are renamed into place, so a failed write never leaves a
/// truncated `summary_*` file behind.
pub async fn save_download(
    dir: &Path,
    summary_id: &str,
    format: DownloadFormat,
    bytes: &[u8],
) -> Result<PathBuf> {
    tokio::fs::create_dir_all(dir).await?;

    let name = download_file_name(summary_id, format);
    let target = dir.join(&name);
    let staging = dir.join(format!(".{name}.part"));

    if let Err(e) = tokio::fs::write(&staging, bytes).await {
        let _ = tokio::fs::remove_file(&staging).await;
        return Err(e.into());
    }
    if let Err(e) = tokio::fs::rename(&staging, &target).await {
        let _ = tokio::fs::remove_file(&staging).await;
        return Err(e.into());
    }

    tracing::debug!(bytes = bytes.len(), "saved {}", target.display());
    Ok(target)
}

/// Fetch a summary file and save it into `dir`. No retry.
pub async fn download_to<A: SummarizerApi>(
    api: &A,
    dir: &Path,
    summary_id: &str,
    format: DownloadFormat,
) -> Result<PathBuf> {
    let bytes = api.download_summary(summary_id, format).await?;
    save_download(dir, summary_id, format, &bytes).await
}
