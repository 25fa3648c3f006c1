//! # machunt protocols
//!
//! Typed projection of device command output.
//!
//! Every parser accepts a [`CommandOutput`](machunt_common::session::CommandOutput),
//! either raw IOS CLI text or a genie-shaped structured tree, and yields typed
//! records or a [`ParseError`]. Nothing here performs I/O.

pub mod interfaces;
pub mod intf_name;
pub mod neighbors;
pub mod version;

use machunt_common::network::AddressError;
use machunt_common::session::SessionError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("{command}: missing field '{field}'")]
    MissingField {
        command: &'static str,
        field: &'static str,
    },
    #[error("{command}: malformed line '{line}'")]
    MalformedLine { command: &'static str, line: String },
    #[error("{command}: {detail}")]
    Schema {
        command: &'static str,
        detail: String,
    },
    #[error("{command}: bad hardware address on {interface}: {source}")]
    InvalidAddress {
        command: &'static str,
        interface: String,
        #[source]
        source: AddressError,
    },
}

impl From<ParseError> for SessionError {
    fn from(err: ParseError) -> Self {
        SessionError::Parse(err.to_string())
    }
}
