//! The crate-level error type.

use thiserror::Error;

use crate::decode::DecodeError;
use crate::transport::TransportError;

/// Any failure of a request followed by a decode.
///
/// Lets a caller `?` both steps in one function:
///
/// ```no_run
/// use lensed::decode::decode_as;
/// use lensed::dispatch::get;
///
/// fn origin() -> Result<serde_json::Value, lensed::Error> {
///     let response = decode_as::<serde_json::Value>(get("http://httpbin.org/ip")?)?;
///     Ok(response.into_body())
/// }
/// ```
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The transport could not complete the exchange.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The body could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_conversions() {
        let error: Error = DecodeError::ParseFailure("eof".to_string()).into();
        assert!(matches!(error, Error::Decode(_)));

        let error: Error = TransportError::Io("reset".to_string()).into();
        assert_eq!(error.to_string(), "I/O error: reset");
    }
}
