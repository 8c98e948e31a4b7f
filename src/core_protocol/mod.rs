pub mod command;
pub mod error;
pub mod handshake;

pub use command::Action;
pub use error::ProtocolError;
pub use handshake::Callback;
