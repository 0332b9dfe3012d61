//! Fuzz target for the display value codec
//!
//! # Strategy
//!
//! - Raw text: Arbitrary strings straight through `parse`, including
//!   separator spam, huge numerals, and non-ASCII
//! - Round trips: Arbitrary (token, epoch) pairs rendered then parsed back
//!
//! # Invariants
//!
//! - `parse` NEVER panics, whatever the input
//! - render → parse recovers the original token and epoch exactly, even
//!   when the token itself contains separators
//! - A successful parse re-renders to text that parses to the same parts

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use rollcall_core::{ScannedPayload, payload};

#[derive(Debug, Clone, Arbitrary)]
enum PayloadInput {
    /// Arbitrary text for the parser.
    Raw(String),
    /// A well-formed pair rendered first.
    RoundTrip { token: String, epoch: u64 },
}

fuzz_target!(|input: PayloadInput| {
    match input {
        PayloadInput::Raw(text) => {
            if let Ok(scanned) = ScannedPayload::parse(&text) {
                let rendered = payload::render(&scanned.token, scanned.epoch);
                let again = ScannedPayload::parse(&rendered);
                assert_eq!(
                    again.as_ref().ok(),
                    Some(&scanned),
                    "re-rendered parse diverged for {text:?}"
                );
            }
        },
        PayloadInput::RoundTrip { token, epoch } => {
            let rendered = payload::render(&token, epoch);
            match ScannedPayload::parse(&rendered) {
                Ok(scanned) => {
                    assert_eq!(scanned.token, token);
                    assert_eq!(scanned.epoch, epoch);
                },
                Err(error) => panic!("round trip failed for {rendered:?}: {error}"),
            }
        },
    }
});
