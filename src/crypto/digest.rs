//! Digest algorithm and operations.

use std::convert::Infallible;
use bytes::Bytes;
use ring::digest;
use crate::data::{SignatureInfo, SignatureType};
use super::signer::{Signer, SigningError};

// Re-export the things from ring for actual digest generation.
pub use ring::digest::Digest;


/// Returns the SHA-256 digest of `data`.
pub fn sha256(data: &[u8]) -> Digest {
    digest::digest(&digest::SHA256, data)
}


//------------ DigestSigner --------------------------------------------------

/// A signer that “signs” by attaching a SHA-256 digest.
///
/// There are no keys involved, so the key identifier is `()`. Such
/// signatures only detect corruption, anyone can create them.
#[derive(Clone, Copy, Debug, Default)]
pub struct DigestSigner;

impl Signer for DigestSigner {
    type KeyId = ();
    type Error = Infallible;

    fn signature_info(
        &self,
        _key: &()
    ) -> Result<SignatureInfo, SigningError<Self::Error>> {
        Ok(SignatureInfo::new(SignatureType::DigestSha256, None))
    }

    fn sign<D: AsRef<[u8]> + ?Sized>(
        &self,
        _key: &(),
        data: &D
    ) -> Result<Bytes, SigningError<Self::Error>> {
        Ok(Bytes::copy_from_slice(sha256(data.as_ref()).as_ref()))
    }
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn digest_signature() {
        let sig = DigestSigner.sign(&(), b"hello").unwrap();
        assert_eq!(sig.len(), 32);
        assert_eq!(sig.as_ref(), sha256(b"hello").as_ref());
        assert_ne!(sig, DigestSigner.sign(&(), b"hellp").unwrap());
        assert_eq!(
            DigestSigner.signature_info(&()).unwrap().signature_type(),
            SignatureType::DigestSha256
        );
    }
}
