//! Types and parameters of keys.

use std::{error, fmt};
use bcder::{decode, encode, BitString, Mode, Oid};
use bcder::decode::DecodeError;
use bcder::encode::{PrimitiveContent, Values};
use bytes::Bytes;
use ring::signature;
use ring::error::Unspecified;
use crate::data::SignatureType;
use crate::oid;
use crate::x509::take_end;


//------------ PublicKeyFormat -----------------------------------------------

/// The formats of public keys that can be verified.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum PublicKeyFormat {
    /// An RSA public key.
    Rsa,

    /// An ECDSA public key on the P-256 curve.
    EcdsaP256,
}

/// # ASN.1 Algorithm Identifiers
///
/// The format of the public key is identified in the
/// `SubjectPublicKeyInfo` through an algorithm identifier defined with this
/// ASN.1:
///
/// ```txt
/// AlgorithmIdentifier ::= SEQUENCE {
///      algorithm          OBJECT IDENTIFIER,
///      parameters         ANY DEFINED BY algorithm OPTIONAL }
/// ```
///
/// For `rsaEncryption` defined in [RFC 4055], the parameters should be
/// NULL but we also accept them to be absent. For `ecPublicKey` from
/// [RFC 5480], they need to be the `secp256r1` named curve.
///
/// [RFC 4055]: https://tools.ietf.org/html/rfc4055
/// [RFC 5480]: https://tools.ietf.org/html/rfc5480
impl PublicKeyFormat {
    /// Takes and returns a algorithm identifier.
    ///
    /// Returns a malformed error if the algorithm isn’t one of the allowed
    /// algorithms or if the value isn’t correctly encoded.
    pub fn take_from<S: decode::Source>(
        cons: &mut decode::Constructed<S>
    ) -> Result<Self, DecodeError<S::Error>> {
        cons.take_sequence(Self::from_constructed)
    }

    /// Parses the algorithm identifier from the contents of its sequence.
    fn from_constructed<S: decode::Source>(
        cons: &mut decode::Constructed<S>
    ) -> Result<Self, DecodeError<S::Error>> {
        let alg = Oid::take_from(cons)?;
        if alg == oid::RSA_ENCRYPTION {
            cons.take_opt_null()?;
            Ok(PublicKeyFormat::Rsa)
        }
        else if alg == oid::EC_PUBLIC_KEY {
            let curve = Oid::take_from(cons)?;
            if curve == oid::SECP256R1 {
                Ok(PublicKeyFormat::EcdsaP256)
            }
            else {
                Err(cons.content_err("unsupported elliptic curve"))
            }
        }
        else {
            Err(cons.content_err("unsupported public key algorithm"))
        }
    }

    /// Returns a value encoder for the algorithm identifier.
    pub fn encode(self) -> impl encode::Values {
        match self {
            PublicKeyFormat::Rsa => {
                encode::Choice2::One(encode::sequence((
                    oid::RSA_ENCRYPTION.encode(),
                    ().encode(),
                )))
            }
            PublicKeyFormat::EcdsaP256 => {
                encode::Choice2::Two(encode::sequence((
                    oid::EC_PUBLIC_KEY.encode(),
                    oid::SECP256R1.encode(),
                )))
            }
        }
    }

    /// Returns whether keys of this format create signatures of `sig_type`.
    pub fn allows(self, sig_type: SignatureType) -> bool {
        matches!(
            (self, sig_type),
            (PublicKeyFormat::Rsa, SignatureType::Sha256WithRsa)
            | (PublicKeyFormat::EcdsaP256, SignatureType::Sha256WithEcdsa)
        )
    }
}

impl fmt::Display for PublicKeyFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match *self {
            PublicKeyFormat::Rsa => "RSA",
            PublicKeyFormat::EcdsaP256 => "ECDSA P-256",
        })
    }
}


//------------ PublicKey -----------------------------------------------------

/// A public key.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PublicKey {
    algorithm: PublicKeyFormat,
    bits: Bytes,
}

impl PublicKey {
    /// Creates a public key from the content of its bit string.
    ///
    /// For RSA, `bits` is the DER encoded `RSAPublicKey`. For ECDSA, it
    /// is the uncompressed curve point.
    pub fn new(algorithm: PublicKeyFormat, bits: impl Into<Bytes>) -> Self {
        PublicKey { algorithm, bits: bits.into() }
    }

    pub fn algorithm(&self) -> PublicKeyFormat {
        self.algorithm
    }

    /// Returns the content of the subject public key bit string.
    pub fn bits(&self) -> &[u8] {
        self.bits.as_ref()
    }

    /// Verifies a signature using this public key.
    ///
    /// RSA signatures use PKCS #1 v1.5 padding and need keys of at least
    /// 2048 bits. ECDSA signatures are expected in their ASN.1 form.
    pub fn verify(
        &self, message: &[u8], signature: &[u8]
    ) -> Result<(), VerificationError> {
        let alg: &'static dyn signature::VerificationAlgorithm = {
            match self.algorithm {
                PublicKeyFormat::Rsa => {
                    &signature::RSA_PKCS1_2048_8192_SHA256
                }
                PublicKeyFormat::EcdsaP256 => {
                    &signature::ECDSA_P256_SHA256_ASN1
                }
            }
        };
        signature::UnparsedPublicKey::new(alg, self.bits.as_ref())
            .verify(message, signature)
            .map_err(Into::into)
    }
}


/// # As `SubjectPublicKeyInfo`
///
/// Public keys are included in certificates as `SubjectPublicKeyInfo`
/// structures. As these contain the same information as `PublicKey`,
/// it can be decoded from such sequences.
impl PublicKey {
    pub fn decode<S: decode::IntoSource>(
        source: S
    ) -> Result<Self, DecodeError<<S::Source as decode::Source>::Error>> {
        Mode::Der.decode(source, |cons| {
            let res = Self::take_from(cons)?;
            take_end(cons)?;
            Ok(res)
        })
    }

    pub fn take_from<S: decode::Source>(
        cons: &mut decode::Constructed<S>
    ) -> Result<Self, DecodeError<S::Error>> {
        cons.take_sequence(|cons| {
            let algorithm = PublicKeyFormat::take_from(cons)?;
            let bits = BitString::take_from(cons)?;
            if bits.unused() != 0 {
                return Err(cons.content_err(
                    "public key bits not a multiple of eight"
                ))
            }
            Ok(PublicKey { algorithm, bits: bits.octet_bytes() })
        })
    }

    /// Returns a value encoder for the `SubjectPublicKeyInfo`.
    pub fn encode_ref(&self) -> impl encode::Values + '_ {
        encode::sequence((
            self.algorithm.encode(),
            BitString::new(0, self.bits.clone()).encode(),
        ))
    }

    /// Returns the DER encoded `SubjectPublicKeyInfo`.
    ///
    /// This is the form certificates carry.
    pub fn to_info_bytes(&self) -> Bytes {
        self.encode_ref().to_captured(Mode::Der).into_bytes()
    }
}


//------------ VerificationError ---------------------------------------------

/// An error happened while verifying a signature.
///
/// No further information is provided. This is on purpose.
#[derive(Clone, Copy, Debug)]
pub struct VerificationError;

impl From<Unspecified> for VerificationError {
    fn from(_: Unspecified) -> Self {
        VerificationError
    }
}

impl fmt::Display for VerificationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("signature verification failed")
    }
}

impl error::Error for VerificationError { }


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn decode_rsa_key() {
        let key = PublicKey::decode(
            include_bytes!("../../test-data/ndn/pubkey.der").as_ref()
        ).unwrap();
        assert_eq!(key.algorithm(), PublicKeyFormat::Rsa);
        assert!(!key.bits().is_empty());
        assert!(key.algorithm().allows(SignatureType::Sha256WithRsa));
        assert!(!key.algorithm().allows(SignatureType::Sha256WithEcdsa));
        assert!(!key.algorithm().allows(SignatureType::DigestSha256));
    }

    #[test]
    fn encode_subject_public_key_info() {
        for data in [
            include_bytes!("../../test-data/ndn/pubkey.der").as_ref(),
            include_bytes!("../../test-data/ndn/rsa-pubkey.der").as_ref(),
        ] {
            let key = PublicKey::decode(data).unwrap();
            assert_eq!(key.to_info_bytes().as_ref(), data);
        }

        let key = PublicKey::new(PublicKeyFormat::EcdsaP256, vec![4; 65]);
        let decoded = PublicKey::decode(key.to_info_bytes()).unwrap();
        assert_eq!(decoded, key);
    }

    #[test]
    fn verify_garbage() {
        let key = PublicKey::decode(
            include_bytes!("../../test-data/ndn/pubkey.der").as_ref()
        ).unwrap();
        assert!(key.verify(b"message", &[0u8; 128]).is_err());
    }

    #[test]
    fn reject_truncated_key() {
        let data = include_bytes!("../../test-data/ndn/pubkey.der");
        assert!(PublicKey::decode(&data[..data.len() - 1]).is_err());
    }

    #[test]
    fn reject_trailing_data() {
        let mut data = include_bytes!(
            "../../test-data/ndn/pubkey.der"
        ).to_vec();
        data.extend_from_slice(b"\x05\x00");
        assert!(PublicKey::decode(data.as_slice()).is_err());
    }
}
