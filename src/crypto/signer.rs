//! A generic interface to a signer.

use std::fmt;
use bytes::Bytes;
use crate::data::SignatureInfo;


//------------ Signer --------------------------------------------------------

/// A type that allow creating signatures.
pub trait Signer {
    /// The type used for identifying keys.
    type KeyId;

    /// An operational error happened in the signer.
    type Error: fmt::Debug + fmt::Display;

    /// Returns the signature info for signatures made with the given key.
    ///
    /// The info is part of the signed portion of a data packet, so it has
    /// to be known before the actual signing starts.
    fn signature_info(
        &self,
        key: &Self::KeyId
    ) -> Result<SignatureInfo, SigningError<Self::Error>>;

    /// Signs data.
    fn sign<D: AsRef<[u8]> + ?Sized>(
        &self,
        key: &Self::KeyId,
        data: &D
    ) -> Result<Bytes, SigningError<Self::Error>>;
}

impl<T: Signer> Signer for &T {
    type KeyId = T::KeyId;
    type Error = T::Error;

    fn signature_info(
        &self,
        key: &Self::KeyId
    ) -> Result<SignatureInfo, SigningError<Self::Error>> {
        (*self).signature_info(key)
    }

    fn sign<D: AsRef<[u8]> + ?Sized>(
        &self,
        key: &Self::KeyId,
        data: &D
    ) -> Result<Bytes, SigningError<Self::Error>> {
        (*self).sign(key, data)
    }
}


//------------ SigningError --------------------------------------------------

#[derive(Clone, Debug)]
pub enum SigningError<S> {
    /// A key with the given key ID doesn’t exist.
    KeyNotFound,

    /// An error happened during signing.
    Signer(S)
}

impl<S> From<S> for SigningError<S> {
    fn from(err: S) -> Self {
        SigningError::Signer(err)
    }
}

impl<S: fmt::Display> fmt::Display for SigningError<S> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use self::SigningError::*;

        match *self {
            KeyNotFound => write!(f, "key not found"),
            Signer(ref s) => s.fmt(f)
        }
    }
}

impl<S: fmt::Debug + fmt::Display> std::error::Error for SigningError<S> { }
