use std::io;
use std::path::Path;

use log::{error, warn};
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncWrite, AsyncWriteExt};

use super::TransferOutcome;

/// Streams the file at `path` to the data stream in `chunk_size` chunks,
/// forwarding each chunk as it is read. Memory use stays bounded by the
/// chunk size regardless of file size; a zero-length file terminates on
/// its first read with nothing written.
///
/// An `Err` is a data-stream transport failure; open and read failures
/// are reported through the outcome instead.
pub async fn send_file<W>(data: &mut W, path: &Path, chunk_size: usize) -> io::Result<TransferOutcome>
where
    W: AsyncWrite + Unpin,
{
    let mut file = match File::open(path).await {
        Ok(file) => file,
        Err(e) => {
            warn!("could not open {}: {}", path.display(), e);
            return Ok(TransferOutcome::NotFound);
        }
    };

    let mut buffer = vec![0u8; chunk_size];
    loop {
        let bytes_read = match file.read(&mut buffer).await {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) => {
                error!("error reading {}: {}", path.display(), e);
                return Ok(TransferOutcome::ReadError);
            }
        };
        data.write_all(&buffer[..bytes_read]).await?;
    }
    data.flush().await?;

    Ok(TransferOutcome::Success)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[tokio::test]
    async fn file_bytes_round_trip_exactly() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, b"hello").unwrap();

        let mut sink = Cursor::new(Vec::new());
        let outcome = send_file(&mut sink, &path, 512).await.unwrap();
        assert_eq!(outcome, TransferOutcome::Success);
        assert_eq!(sink.into_inner(), b"hello");
    }

    #[tokio::test]
    async fn payload_larger_than_chunk_is_streamed_whole() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.bin");
        let contents: Vec<u8> = (0..2000u32).map(|i| (i % 251) as u8).collect();
        std::fs::write(&path, &contents).unwrap();

        let mut sink = Cursor::new(Vec::new());
        // Chunk smaller than the payload forces several reads, the last
        // one short.
        let outcome = send_file(&mut sink, &path, 512).await.unwrap();
        assert_eq!(outcome, TransferOutcome::Success);
        assert_eq!(sink.into_inner(), contents);
    }

    #[tokio::test]
    async fn zero_length_file_succeeds_with_nothing_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty");
        std::fs::write(&path, b"").unwrap();

        let mut sink = Cursor::new(Vec::new());
        let outcome = send_file(&mut sink, &path, 512).await.unwrap();
        assert_eq!(outcome, TransferOutcome::Success);
        assert!(sink.into_inner().is_empty());
    }

    #[tokio::test]
    async fn missing_file_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = Cursor::new(Vec::new());
        let outcome = send_file(&mut sink, &dir.path().join("absent"), 512)
            .await
            .unwrap();
        assert_eq!(outcome, TransferOutcome::NotFound);
        assert!(sink.into_inner().is_empty());
    }
}
