//! Signing related implementations.
//!

pub use self::digest::{sha256, Digest, DigestSigner};
pub use self::keys::{PublicKey, PublicKeyFormat, VerificationError};
pub use self::signer::{Signer, SigningError};
pub use self::softsigner::{KeyError, SoftSigner};

pub mod digest;
pub mod keys;
pub mod signer;
pub mod softsigner;

