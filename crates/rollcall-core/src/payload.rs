//! Display value codec.
//!
//! A display value is the string payload encoded into the renderable
//! artifact: the session token and the epoch counter joined by a fixed
//! separator. Rendering is a pure function of (token, epoch); parsing
//! recovers both parts from scanned text.

use thiserror::Error;

/// Separator between the token and the epoch in a display value.
pub const SEPARATOR: char = '|';

/// Build the display value for a token at an epoch.
///
/// Pure function: identical inputs always yield byte-identical output.
pub fn render(token: &str, epoch: u64) -> String {
    format!("{token}{SEPARATOR}{epoch}")
}

/// A display value recovered from scanned text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedPayload {
    /// Session token part.
    pub token: String,

    /// Epoch counter part.
    pub epoch: u64,
}

/// Errors from parsing scanned text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PayloadError {
    /// The text contains no separator.
    #[error("missing separator in scanned text")]
    MissingSeparator,

    /// The epoch part is not a decimal integer.
    #[error("invalid epoch: {text:?}")]
    InvalidEpoch {
        /// The malformed epoch text.
        text: String,
    },
}

impl ScannedPayload {
    /// Parse scanned text into token and epoch.
    ///
    /// Splits at the last separator, so tokens that themselves contain the
    /// separator round-trip through [`render`].
    pub fn parse(text: &str) -> Result<Self, PayloadError> {
        let (token, epoch_text) =
            text.rsplit_once(SEPARATOR).ok_or(PayloadError::MissingSeparator)?;

        let epoch = epoch_text
            .parse::<u64>()
            .map_err(|_| PayloadError::InvalidEpoch { text: epoch_text.to_string() })?;

        Ok(Self { token: token.to_string(), epoch })
    }
}
