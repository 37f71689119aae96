//! Handling of Base 64-encoded data.
//!
//! Because there are different dialects of Base 64 and applications again
//! place slight differences atop those, the module provides a number of
//! structs that describe flavors of Base 64 used within a certain context.
//! That is, you don’t have to remember how an application uses Base 64
//! exactly but just pick your application.

use std::fmt;
use base64::Engine;
use base64::engine::general_purpose::{GeneralPurpose, STANDARD};

pub use base64::DecodeError;


//------------ Summary -------------------------------------------------------

/// The flavor used for public keys in textual certificate summaries.
///
/// This uses the standard alphabet with padding and breaks the output into
/// lines of 64 characters. Only complete groups of three octets are
/// encoded. One or two octets left over at the end of the data are not
/// part of the output, so no padding characters ever appear.
pub struct Summary;

impl Summary {
    const ENGINE: GeneralPurpose = STANDARD;
    const LINE_LEN: usize = 64;

    /// Returns the encoded lines joined by line feeds.
    ///
    /// There is no line feed after the last line.
    pub fn encode(self, data: &[u8]) -> String {
        let whole = data.len() - data.len() % 3;
        let encoded = Self::ENGINE.encode(&data[..whole]);
        let mut res = String::with_capacity(
            encoded.len() + encoded.len() / Self::LINE_LEN
        );
        // Base 64 output is pure ASCII, so byte chunks are char chunks.
        for (idx, line) in encoded.as_bytes().chunks(Self::LINE_LEN)
            .enumerate()
        {
            if idx > 0 {
                res.push('\n');
            }
            res.extend(line.iter().map(|&ch| ch as char));
        }
        res
    }

    pub fn display(self, data: &[u8]) -> impl fmt::Display + '_ {
        SummaryDisplay(data)
    }
}

struct SummaryDisplay<'a>(&'a [u8]);

impl fmt::Display for SummaryDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&Summary.encode(self.0))
    }
}


//------------ Serde --------------------------------------------------------

/// The flavor used for serialization of objects in this crate.
///
/// This flavor is used whenever Base 64 is used for serialization of
/// binary objects in this crate.
///
/// It uses the standard alphabet with padding and no white space allowed.
pub struct Serde;

impl Serde {
    const ENGINE: GeneralPurpose = STANDARD;

    pub fn decode(self, input: &str) -> Result<Vec<u8>, DecodeError> {
        Self::ENGINE.decode(input)
    }

    pub fn encode(self, data: &[u8]) -> String {
        Self::ENGINE.encode(data)
    }
}


//============ Tests =========================================================
