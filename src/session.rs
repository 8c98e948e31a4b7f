use std::io;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use log::{debug, error, info, warn};
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;

use crate::config::ServerConfig;
use crate::constants::{
    GREETING, STATUS_LIST_ERROR, STATUS_MALFORMED, STATUS_NOT_FOUND, STATUS_READ_ERROR,
    STATUS_TRANSFER_COMPLETE, STATUS_TRANSFER_FAILED,
};
use crate::core_protocol::command::{self, Action};
use crate::core_protocol::handshake::{self, Callback};
use crate::core_protocol::ProtocolError;
use crate::core_transfer::{list, retrieve, TransferOutcome};
use crate::helpers::{read_message, sanitize_filename, send_status};

/// Reasons a single session is torn down early. None of these touch the
/// listener; the accept loop keeps running.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("protocol violation: {0}")]
    Protocol(#[from] ProtocolError),

    #[error("could not open data connection to {authority}: {source}")]
    Connect {
        authority: String,
        source: io::Error,
    },

    #[error("control stream error: {0}")]
    ControlIo(#[from] io::Error),
}

/// One accepted client interaction, from accept to both-streams-closed.
///
/// The session owns its control stream outright and acquires the data
/// stream during the handshake; nothing is shared with other sessions,
/// and no state survives past `handle`.
pub struct Session {
    control: TcpStream,
    data_stream: Option<TcpStream>,
    callback: Option<Callback>,
    action: Option<Action>,
    peer: SocketAddr,
    root_dir: PathBuf,
    chunk_size: usize,
    read_timeout: Option<Duration>,
}

impl Session {
    pub fn new(control: TcpStream, peer: SocketAddr, config: &ServerConfig) -> Self {
        Self {
            control,
            data_stream: None,
            callback: None,
            action: None,
            peer,
            root_dir: PathBuf::from(&config.root_dir),
            chunk_size: config.chunk_size,
            read_timeout: config.read_timeout_secs.map(Duration::from_secs),
        }
    }

    /// Drives the session state machine: greet, handshake, read one
    /// command, run the transfer, report the status. Both streams are
    /// closed on the way out regardless of outcome.
    pub async fn handle(mut self) -> Result<(), SessionError> {
        let result = self.run().await;
        self.shutdown().await;
        result
    }

    async fn run(&mut self) -> Result<(), SessionError> {
        // Greeting delivery is informational; failure is logged and the
        // session carries on to the handshake.
        if let Err(e) = send_status(&mut self.control, GREETING).await {
            warn!("greeting not delivered to {}: {}", self.peer, e);
        }

        self.open_data_connection().await?;

        let action = self.read_command().await?;

        let status = match &action {
            Action::Malformed => STATUS_MALFORMED,
            Action::Get(filename) if filename.is_empty() => STATUS_MALFORMED,
            action => match self.run_transfer(action).await {
                Ok(outcome) => status_for(outcome),
                Err(e) => {
                    error!("data stream to {} failed mid-transfer: {}", self.peer, e);
                    STATUS_TRANSFER_FAILED
                }
            },
        };

        info!(
            "session with {} (callback {:?}): action {:?} -> \"{}\"",
            self.peer, self.callback, self.action, status
        );
        send_status(&mut self.control, status).await?;
        Ok(())
    }

    /// Handshake step: one control message announcing `<host> <port>`,
    /// then a single dial-back attempt. No retries.
    async fn open_data_connection(&mut self) -> Result<(), SessionError> {
        let mut buf = vec![0u8; self.chunk_size];
        let received = read_message(&mut self.control, &mut buf, self.read_timeout).await?;
        let callback = handshake::parse_callback(&buf[..received])?;
        let authority = callback.authority()?;

        debug!("dialing data connection to {}", authority);
        let data_stream =
            TcpStream::connect(authority.as_str())
                .await
                .map_err(|source| SessionError::Connect {
                    authority: authority.clone(),
                    source,
                })?;
        info!("data connection to {} established", authority);

        self.callback = Some(callback);
        self.data_stream = Some(data_stream);
        Ok(())
    }

    /// Command step: a fresh read on the control stream, separate from
    /// the handshake message.
    async fn read_command(&mut self) -> Result<Action, SessionError> {
        let mut buf = vec![0u8; self.chunk_size];
        let received = read_message(&mut self.control, &mut buf, self.read_timeout).await?;
        let action = command::parse_command(&buf[..received]);
        self.action = Some(action.clone());
        Ok(action)
    }

    async fn run_transfer(&mut self, action: &Action) -> io::Result<TransferOutcome> {
        let Session {
            data_stream,
            root_dir,
            chunk_size,
            ..
        } = self;
        // The handshake precedes every transfer, so the data stream is
        // established here.
        let Some(data) = data_stream.as_mut() else {
            return Err(io::Error::new(
                io::ErrorKind::NotConnected,
                "data stream not established",
            ));
        };

        match action {
            Action::List => list::send_listing(data, root_dir).await,
            Action::Get(filename) => {
                let path = root_dir.join(sanitize_filename(filename));
                // Resolve links before checking containment; a path that
                // cannot be resolved is left as-is and fails at open.
                let base = root_dir.canonicalize().unwrap_or_else(|_| root_dir.clone());
                let resolved = path.canonicalize().unwrap_or_else(|_| path.clone());
                if !resolved.starts_with(&base) {
                    warn!(
                        "request for {} escapes the served directory",
                        resolved.display()
                    );
                    return Ok(TransferOutcome::NotFound);
                }
                retrieve::send_file(data, &resolved, *chunk_size).await
            }
            Action::Malformed => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "malformed request reached the transfer engine",
            )),
        }
    }

    /// The control and data streams are independent resources; each is
    /// shut down on its own and a failure on one does not skip the other.
    async fn shutdown(&mut self) {
        if let Some(mut data_stream) = self.data_stream.take() {
            if let Err(e) = data_stream.shutdown().await {
                debug!("data stream shutdown for {}: {}", self.peer, e);
            }
        }
        if let Err(e) = self.control.shutdown().await {
            debug!("control stream shutdown for {}: {}", self.peer, e);
        }
        info!("session with {} closed", self.peer);
    }
}

/// Deterministic outcome-to-status mapping, one fixed string per value.
fn status_for(outcome: TransferOutcome) -> &'static str {
    match outcome {
        TransferOutcome::Success => STATUS_TRANSFER_COMPLETE,
        TransferOutcome::NotFound => STATUS_NOT_FOUND,
        TransferOutcome::ReadError => STATUS_READ_ERROR,
        TransferOutcome::DirectoryUnavailable => STATUS_LIST_ERROR,
    }
}
