pub mod list;
pub mod retrieve;

/// Result of one transfer operation. Drives the final control-stream
/// status only; the payload has already gone to the data stream by the
/// time the outcome is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferOutcome {
    Success,
    NotFound,
    ReadError,
    DirectoryUnavailable,
}
