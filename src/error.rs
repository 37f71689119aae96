//! Error handling for certificates and named data.
//!
//! Three kinds of errors exist. An [`EncodingError`] happens when the
//! fields of a certificate cannot be turned into their binary form. A
//! [`DecodingError`] happens when a payload violates the certificate
//! grammar. A [`ValidationError`] is produced by a
//! [`Validator`][crate::validator::Validator] when it rejects a data
//! packet. The codec itself never creates the latter, it only hands it on.

use std::{error, fmt, io};
use std::convert::Infallible;
use bcder::decode::DecodeError;
use crate::data::SignatureType;
use crate::name::Name;
use crate::x509::{Time, ValidityPeriodError};


//------------ EncodingError -------------------------------------------------

/// The fields of a certificate could not be encoded.
#[derive(Debug)]
pub struct EncodingError {
    inner: EncodingErrorKind,
}

#[derive(Debug)]
enum EncodingErrorKind {
    /// A time value cannot be expressed as a GeneralizedTime.
    TimeOutOfRange(Time),

    /// Writing the encoded data failed.
    Io(io::Error),
}

impl EncodingError {
    pub(crate) fn time_out_of_range(time: Time) -> Self {
        EncodingError { inner: EncodingErrorKind::TimeOutOfRange(time) }
    }
}

impl From<io::Error> for EncodingError {
    fn from(err: io::Error) -> Self {
        EncodingError { inner: EncodingErrorKind::Io(err) }
    }
}

impl fmt::Display for EncodingError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.inner {
            EncodingErrorKind::TimeOutOfRange(ref time) => {
                write!(
                    f, "time {} cannot be encoded as GeneralizedTime",
                    time.timestamp_millis()
                )
            }
            EncodingErrorKind::Io(ref err) => {
                write!(f, "failed to write encoded data: {}", err)
            }
        }
    }
}

impl error::Error for EncodingError { }


//------------ DecodingError -------------------------------------------------

/// A payload could not be decoded.
///
/// The error keeps the underlying BER decoding error which knows the
/// position in the payload where decoding failed, plus a short description
/// of what was being decoded.
#[derive(Debug)]
pub struct DecodingError {
    context: &'static str,
    inner: DecodeError<Infallible>,
}

impl DecodingError {
    pub(crate) fn new(
        context: &'static str, inner: DecodeError<Infallible>
    ) -> Self {
        DecodingError { context, inner }
    }

    /// Returns a description of the value that failed to decode.
    pub fn context(&self) -> &'static str {
        self.context
    }

    /// Returns the underlying decoding error.
    pub fn decode_error(&self) -> &DecodeError<Infallible> {
        &self.inner
    }
}

impl From<DecodeError<Infallible>> for DecodingError {
    fn from(err: DecodeError<Infallible>) -> Self {
        Self::new("certificate", err)
    }
}

impl fmt::Display for DecodingError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "malformed {}: {}", self.context, self.inner)
    }
}

impl error::Error for DecodingError { }


//------------ ValidationError -----------------------------------------------

/// A validator rejected a data packet.
#[derive(Debug)]
pub struct ValidationError {
    inner: ValidationErrorKind,
}

#[derive(Debug)]
enum ValidationErrorKind {
    MissingSignature,
    UnsupportedSignatureType(SignatureType),
    MissingKeyLocator,
    UnknownKey(Name),
    InvalidSignature,
    Validity(Name, ValidityPeriodError),
    Anchor(Name, DecodingError),
}

impl ValidationError {
    pub(crate) fn missing_signature() -> Self {
        ValidationError { inner: ValidationErrorKind::MissingSignature }
    }

    pub(crate) fn unsupported(signature_type: SignatureType) -> Self {
        ValidationError {
            inner: ValidationErrorKind::UnsupportedSignatureType(
                signature_type
            )
        }
    }

    pub(crate) fn missing_key_locator() -> Self {
        ValidationError { inner: ValidationErrorKind::MissingKeyLocator }
    }

    pub(crate) fn unknown_key(key: Name) -> Self {
        ValidationError { inner: ValidationErrorKind::UnknownKey(key) }
    }

    pub(crate) fn invalid_signature() -> Self {
        ValidationError { inner: ValidationErrorKind::InvalidSignature }
    }

    pub(crate) fn validity(anchor: Name, err: ValidityPeriodError) -> Self {
        ValidationError {
            inner: ValidationErrorKind::Validity(anchor, err)
        }
    }

    pub(crate) fn anchor(anchor: Name, err: DecodingError) -> Self {
        ValidationError { inner: ValidationErrorKind::Anchor(anchor, err) }
    }

    /// Returns whether the signature itself was found to be wrong.
    pub fn is_invalid_signature(&self) -> bool {
        matches!(self.inner, ValidationErrorKind::InvalidSignature)
    }

    /// Returns whether no trust anchor matched the key locator.
    pub fn is_unknown_key(&self) -> bool {
        matches!(self.inner, ValidationErrorKind::UnknownKey(_))
    }

    /// Returns whether the signature type isn’t accepted.
    pub fn is_unsupported(&self) -> bool {
        matches!(
            self.inner, ValidationErrorKind::UnsupportedSignatureType(_)
        )
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.inner {
            ValidationErrorKind::MissingSignature => {
                f.write_str("data is not signed")
            }
            ValidationErrorKind::UnsupportedSignatureType(ref t) => {
                write!(f, "unsupported signature type {}", t)
            }
            ValidationErrorKind::MissingKeyLocator => {
                f.write_str("signature has no key locator")
            }
            ValidationErrorKind::UnknownKey(ref name) => {
                write!(f, "no trust anchor for key {}", name)
            }
            ValidationErrorKind::InvalidSignature => {
                f.write_str("signature verification failed")
            }
            ValidationErrorKind::Validity(ref name, ref err) => {
                write!(f, "trust anchor {}: {}", name, err)
            }
            ValidationErrorKind::Anchor(ref name, ref err) => {
                write!(f, "trust anchor {}: {}", name, err)
            }
        }
    }
}

impl error::Error for ValidationError { }
