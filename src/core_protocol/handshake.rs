use super::error::ProtocolError;

/// The data-connection address a client announces in its first control
/// message. The port token is kept verbatim; a bogus value fails at
/// connect time, not here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Callback {
    pub host: String,
    pub port: Option<String>,
}

impl Callback {
    /// Joins host and port into a dialable `host:port` authority.
    pub fn authority(&self) -> Result<String, ProtocolError> {
        match &self.port {
            Some(port) => Ok(format!("{}:{}", self.host, port)),
            None => Err(ProtocolError::MissingCallbackPort),
        }
    }
}

/// Splits a callback announcement of the form `<host> <port>` on the
/// first space. Everything after that space is the port token, taken
/// verbatim up to the end of the message. A message without a space
/// yields a callback with no port; an empty message is a protocol error.
pub fn parse_callback(message: &[u8]) -> Result<Callback, ProtocolError> {
    if message.is_empty() {
        return Err(ProtocolError::MissingCallbackAddress);
    }

    match message.iter().position(|&b| b == b' ') {
        Some(split) => Ok(Callback {
            host: String::from_utf8_lossy(&message[..split]).into_owned(),
            port: Some(String::from_utf8_lossy(&message[split + 1..]).into_owned()),
        }),
        None => Ok(Callback {
            host: String::from_utf8_lossy(message).into_owned(),
            port: None,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_host_and_port_on_first_space() {
        let callback = parse_callback(b"127.0.0.1 50001").unwrap();
        assert_eq!(callback.host, "127.0.0.1");
        assert_eq!(callback.port.as_deref(), Some("50001"));
        assert_eq!(callback.authority().unwrap(), "127.0.0.1:50001");
    }

    #[test]
    fn port_token_is_taken_verbatim_to_message_end() {
        // Only the first space splits; the rest belongs to the port token.
        let callback = parse_callback(b"somehost 50001 trailing").unwrap();
        assert_eq!(callback.host, "somehost");
        assert_eq!(callback.port.as_deref(), Some("50001 trailing"));
    }

    #[test]
    fn message_without_space_has_no_port() {
        let callback = parse_callback(b"localhost").unwrap();
        assert_eq!(callback.host, "localhost");
        assert_eq!(callback.port, None);
        assert_eq!(
            callback.authority(),
            Err(ProtocolError::MissingCallbackPort)
        );
    }

    #[test]
    fn empty_message_is_missing_address() {
        assert_eq!(
            parse_callback(b""),
            Err(ProtocolError::MissingCallbackAddress)
        );
    }

    #[test]
    fn non_numeric_port_token_is_deferred_to_connect() {
        // No numeric validation at this layer.
        let callback = parse_callback(b"localhost notaport").unwrap();
        assert_eq!(callback.authority().unwrap(), "localhost:notaport");
    }
}
