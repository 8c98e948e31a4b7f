use std::io;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;

/// Receives one control message into `buf`, returning the number of
/// bytes read. One read call is one logical message; the peer closing
/// before sending yields zero bytes. The peer may fragment, in which
/// case only the first fragment is seen.
pub async fn read_message(
    stream: &mut TcpStream,
    buf: &mut [u8],
    deadline: Option<Duration>,
) -> io::Result<usize> {
    match deadline {
        Some(limit) => match timeout(limit, stream.read(buf)).await {
            Ok(result) => result,
            Err(_) => Err(io::Error::new(
                io::ErrorKind::TimedOut,
                "control stream read timed out",
            )),
        },
        None => stream.read(buf).await,
    }
}

/// Writes one status message to the control stream.
pub async fn send_status(stream: &mut TcpStream, message: &str) -> io::Result<()> {
    stream.write_all(message.as_bytes()).await?;
    stream.flush().await?;
    Ok(())
}

/// Strips directory traversal sequences and leading slashes so that a
/// requested filename stays inside the served directory. The replace
/// runs to fixpoint: one pass would let `....//` collapse into `../`.
pub fn sanitize_filename(input: &str) -> String {
    let mut sanitized = input.to_string();
    loop {
        let pass = sanitized.replace("../", "").replace("..\\", "");
        if pass == sanitized {
            break;
        }
        sanitized = pass;
    }
    sanitized.trim_start_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_removes_traversal_sequences() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "etc/passwd");
        assert_eq!(sanitize_filename("/etc/passwd"), "etc/passwd");
        assert_eq!(sanitize_filename("notes.txt"), "notes.txt");
    }

    #[test]
    fn sanitize_is_not_bypassed_by_nested_traversal() {
        // A single replace pass would leave "../etc/passwd" here.
        assert_eq!(sanitize_filename("....//etc/passwd"), "etc/passwd");
        assert_eq!(sanitize_filename("....\\\\windows"), "windows");
        assert_eq!(sanitize_filename(".../...//secret"), "secret");
    }
}
