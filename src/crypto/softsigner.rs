//! A signer keeping its keys in memory.
//!
//! This is meant for applications that sign with software keys, such as
//! the encyclopedia producers. Validating data doesn’t need it.

use std::{error, fmt};
use bytes::Bytes;
use log::debug;
use ring::error::{KeyRejected, Unspecified};
use ring::rand::SystemRandom;
use ring::signature::{
    self, EcdsaKeyPair, KeyPair as _, RsaKeyPair,
    ECDSA_P256_SHA256_ASN1_SIGNING,
};
use crate::data::{SignatureInfo, SignatureType};
use crate::name::Name;
use super::keys::{PublicKey, PublicKeyFormat};
use super::signer::{Signer, SigningError};


//------------ SoftSigner ----------------------------------------------------

/// A _ring_ based signer.
///
/// Keys are identified by the name that goes into the key locator of the
/// signatures made with them. RSA keys can only be imported while ECDSA
/// P-256 keys can also be created.
pub struct SoftSigner {
    keys: Vec<(Name, KeyPair)>,
    rng: SystemRandom,
}

impl SoftSigner {
    pub fn new() -> Self {
        SoftSigner {
            keys: Vec::new(),
            rng: SystemRandom::new(),
        }
    }

    /// Creates a new key named `name`.
    ///
    /// An existing key of the same name is replaced.
    pub fn create_key(
        &mut self, name: Name, algorithm: PublicKeyFormat
    ) -> Result<(), KeyError> {
        let pkcs8 = match algorithm {
            PublicKeyFormat::EcdsaP256 => {
                EcdsaKeyPair::generate_pkcs8(
                    &ECDSA_P256_SHA256_ASN1_SIGNING, &self.rng
                )?
            }
            PublicKeyFormat::Rsa => {
                return Err(KeyError::UnsupportedAlgorithm(algorithm))
            }
        };
        self.key_from_pkcs8(name, algorithm, pkcs8.as_ref())
    }

    /// Imports a PKCS #8 encoded private key under `name`.
    ///
    /// RSA keys need to be at least 2048 bits long. An existing key of the
    /// same name is replaced.
    pub fn key_from_pkcs8(
        &mut self, name: Name, algorithm: PublicKeyFormat, der: &[u8]
    ) -> Result<(), KeyError> {
        let key = match algorithm {
            PublicKeyFormat::Rsa => {
                KeyPair::Rsa(RsaKeyPair::from_pkcs8(der)?)
            }
            PublicKeyFormat::EcdsaP256 => {
                KeyPair::Ecdsa(EcdsaKeyPair::from_pkcs8(
                    &ECDSA_P256_SHA256_ASN1_SIGNING, der, &self.rng
                )?)
            }
        };
        debug!("Adding {} key {}", algorithm, name);
        self.keys.retain(|(item, _)| *item != name);
        self.keys.push((name, key));
        Ok(())
    }

    /// Returns the public key for the key named `name`.
    pub fn public_key(&self, name: &Name) -> Result<PublicKey, KeyError> {
        self.get_key(name).map(KeyPair::public_key).ok_or(
            KeyError::KeyNotFound
        )
    }

    /// Removes a key. Returns whether the key existed.
    pub fn destroy_key(&mut self, name: &Name) -> bool {
        let len = self.keys.len();
        self.keys.retain(|(item, _)| item != name);
        len != self.keys.len()
    }

    fn get_key(&self, name: &Name) -> Option<&KeyPair> {
        self.keys.iter().find(|(item, _)| item == name).map(|(_, key)| key)
    }
}

impl Signer for SoftSigner {
    type KeyId = Name;
    type Error = Unspecified;

    fn signature_info(
        &self, key: &Name
    ) -> Result<SignatureInfo, SigningError<Unspecified>> {
        let pair = self.get_key(key).ok_or(SigningError::KeyNotFound)?;
        Ok(SignatureInfo::new(pair.signature_type(), Some(key.clone())))
    }

    fn sign<D: AsRef<[u8]> + ?Sized>(
        &self, key: &Name, data: &D
    ) -> Result<Bytes, SigningError<Unspecified>> {
        let pair = self.get_key(key).ok_or(SigningError::KeyNotFound)?;
        pair.sign(&self.rng, data.as_ref()).map_err(Into::into)
    }
}

impl Default for SoftSigner {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SoftSigner {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(
            self.keys.iter().map(|(name, _)| name)
        ).finish()
    }
}


//------------ KeyPair -------------------------------------------------------

/// A key pair kept by the signer.
enum KeyPair {
    Rsa(RsaKeyPair),
    Ecdsa(EcdsaKeyPair),
}

impl KeyPair {
    fn public_key(&self) -> PublicKey {
        match *self {
            KeyPair::Rsa(ref key) => {
                PublicKey::new(
                    PublicKeyFormat::Rsa,
                    Bytes::copy_from_slice(key.public_key().as_ref())
                )
            }
            KeyPair::Ecdsa(ref key) => {
                PublicKey::new(
                    PublicKeyFormat::EcdsaP256,
                    Bytes::copy_from_slice(key.public_key().as_ref())
                )
            }
        }
    }

    fn signature_type(&self) -> SignatureType {
        match *self {
            KeyPair::Rsa(_) => SignatureType::Sha256WithRsa,
            KeyPair::Ecdsa(_) => SignatureType::Sha256WithEcdsa,
        }
    }

    fn sign(
        &self, rng: &SystemRandom, data: &[u8]
    ) -> Result<Bytes, Unspecified> {
        match *self {
            KeyPair::Rsa(ref key) => {
                let mut sig = vec![0; key.public().modulus_len()];
                key.sign(&signature::RSA_PKCS1_SHA256, rng, data, &mut sig)?;
                Ok(sig.into())
            }
            KeyPair::Ecdsa(ref key) => {
                Ok(Bytes::copy_from_slice(key.sign(rng, data)?.as_ref()))
            }
        }
    }
}


//------------ KeyError ------------------------------------------------------

/// A key could not be created, imported, or found.
#[derive(Debug)]
pub enum KeyError {
    /// There is no key of the given name.
    KeyNotFound,

    /// Keys of this algorithm cannot be created.
    UnsupportedAlgorithm(PublicKeyFormat),

    /// The key material was rejected.
    Rejected(KeyRejected),

    /// Generating the key failed.
    Generate,
}

impl From<KeyRejected> for KeyError {
    fn from(err: KeyRejected) -> Self {
        KeyError::Rejected(err)
    }
}

impl From<Unspecified> for KeyError {
    fn from(_: Unspecified) -> Self {
        KeyError::Generate
    }
}

impl fmt::Display for KeyError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            KeyError::KeyNotFound => f.write_str("key not found"),
            KeyError::UnsupportedAlgorithm(alg) => {
                write!(f, "cannot create {} keys", alg)
            }
            KeyError::Rejected(ref err) => {
                write!(f, "key rejected: {}", err)
            }
            KeyError::Generate => f.write_str("failed to generate key"),
        }
    }
}

impl error::Error for KeyError { }


//============ Tests =========================================================
