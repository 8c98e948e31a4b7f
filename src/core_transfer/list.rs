use std::io;
use std::path::Path;

use log::warn;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use super::TransferOutcome;
use crate::constants::EMPTY_DIRECTORY_PLACEHOLDER;

/// Writes the names of the regular files in `root`, joined by single
/// spaces, to the data stream. Directories, symlinks and device files
/// are excluded. Enumeration order is whatever the filesystem yields.
///
/// An `Err` is a data-stream transport failure; filesystem trouble is
/// reported through the outcome instead.
pub async fn send_listing<W>(data: &mut W, root: &Path) -> io::Result<TransferOutcome>
where
    W: AsyncWrite + Unpin,
{
    let mut entries = match tokio::fs::read_dir(root).await {
        Ok(entries) => entries,
        Err(e) => {
            warn!("could not open directory {}: {}", root.display(), e);
            return Ok(TransferOutcome::DirectoryUnavailable);
        }
    };

    let mut names: Vec<String> = Vec::new();
    loop {
        match entries.next_entry().await {
            Ok(Some(entry)) => {
                // file_type() does not follow symlinks, so links are
                // excluded along with everything else non-regular.
                match entry.file_type().await {
                    Ok(file_type) if file_type.is_file() => {
                        names.push(entry.file_name().to_string_lossy().into_owned());
                    }
                    Ok(_) => {}
                    Err(e) => {
                        warn!("skipping unreadable entry in {}: {}", root.display(), e);
                    }
                }
            }
            Ok(None) => break,
            Err(e) => {
                warn!("error enumerating {}: {}", root.display(), e);
                return Ok(TransferOutcome::DirectoryUnavailable);
            }
        }
    }

    let payload = if names.is_empty() {
        EMPTY_DIRECTORY_PLACEHOLDER.to_string()
    } else {
        names.join(" ")
    };
    data.write_all(payload.as_bytes()).await?;
    data.flush().await?;

    Ok(TransferOutcome::Success)
}
