// src/constants.rs

/// Ports below this floor are reserved for privileged services.
pub const PRIVILEGED_PORT_FLOOR: u16 = 1024;
pub const MAX_PORT: u16 = 65535;

/// Default size of the control-message scratch buffer and of each file
/// chunk forwarded on the data stream.
pub const DEFAULT_CHUNK_SIZE: usize = 512;

/// Greeting sent on the control stream right after accept.
pub const GREETING: &str = "ftserved: connected, awaiting callback address";

// Final per-session status strings, one per outcome. The remote client
// tells "file missing" from "server malfunction" by wording alone, so
// every status is distinct.
pub const STATUS_MALFORMED: &str = "badly formed request";
pub const STATUS_TRANSFER_COMPLETE: &str = "transfer complete";
pub const STATUS_NOT_FOUND: &str = "requested file not found";
pub const STATUS_READ_ERROR: &str = "error while reading requested file";
pub const STATUS_LIST_ERROR: &str = "unable to read server directory";
pub const STATUS_TRANSFER_FAILED: &str = "file transfer failed";

/// Sent on the data stream in place of an empty listing, so an empty
/// directory is communicated rather than silent.
pub const EMPTY_DIRECTORY_PLACEHOLDER: &str = "directory contains no files";
