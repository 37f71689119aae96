//! Named data objects.
//!
//! A [`Data`] packet binds a payload to a [`Name`] and, once signed, to the
//! key that vouches for it. The packet format used on the wire belongs to
//! the transport and is not modelled here. What is modelled is the part a
//! signature covers, which [`Data::signed_portion`] produces as a DER
//! encoding of name, content, freshness period, and signature info.

use std::fmt;
use std::time::Duration;
use bcder::{encode, Mode, OctetString};
use bcder::encode::{PrimitiveContent, Values};
use bytes::Bytes;
use log::debug;
use crate::crypto::{Signer, SigningError};
use crate::name::Name;


//------------ SignatureType -------------------------------------------------

/// The kind of signature attached to a data packet.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum SignatureType {
    /// A plain SHA-256 digest of the signed portion.
    ///
    /// This only protects against accidental corruption.
    DigestSha256,

    /// A PKCS #1 v1.5 signature with SHA-256.
    Sha256WithRsa,

    /// An ECDSA signature with SHA-256.
    Sha256WithEcdsa,
}

impl SignatureType {
    /// Returns the numeric code of the signature type.
    pub fn code(self) -> u64 {
        match self {
            SignatureType::DigestSha256 => 0,
            SignatureType::Sha256WithRsa => 1,
            SignatureType::Sha256WithEcdsa => 3,
        }
    }

    pub fn from_code(code: u64) -> Option<Self> {
        match code {
            0 => Some(SignatureType::DigestSha256),
            1 => Some(SignatureType::Sha256WithRsa),
            3 => Some(SignatureType::Sha256WithEcdsa),
            _ => None
        }
    }
}

impl fmt::Display for SignatureType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match *self {
            SignatureType::DigestSha256 => "DigestSha256",
            SignatureType::Sha256WithRsa => "SignatureSha256WithRsa",
            SignatureType::Sha256WithEcdsa => "SignatureSha256WithEcdsa",
        })
    }
}


//------------ SignatureInfo -------------------------------------------------

/// Information about a signature that is covered by the signature itself.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SignatureInfo {
    signature_type: SignatureType,
    key_locator: Option<Name>,
}

impl SignatureInfo {
    pub fn new(
        signature_type: SignatureType, key_locator: Option<Name>
    ) -> Self {
        SignatureInfo { signature_type, key_locator }
    }

    pub fn signature_type(&self) -> SignatureType {
        self.signature_type
    }

    /// Returns the name of the key or certificate used for signing.
    pub fn key_locator(&self) -> Option<&Name> {
        self.key_locator.as_ref()
    }

    fn encode_ref(&self) -> impl encode::Values + '_ {
        encode::sequence((
            self.signature_type.code().encode(),
            self.key_locator.as_ref().map(encode_name),
        ))
    }
}


//------------ Signature -----------------------------------------------------

/// A signature attached to a data packet.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Signature {
    info: SignatureInfo,
    value: Bytes,
}

impl Signature {
    pub fn new(info: SignatureInfo, value: Bytes) -> Self {
        Signature { info, value }
    }

    pub fn info(&self) -> &SignatureInfo {
        &self.info
    }

    pub fn value(&self) -> &Bytes {
        &self.value
    }
}


//------------ Data ----------------------------------------------------------

/// A named data object.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Data {
    name: Name,
    content: Bytes,
    freshness_period: Option<Duration>,
    signature: Option<Signature>,
}

impl Data {
    /// Creates a new, empty, and unsigned data packet.
    pub fn new(name: Name) -> Self {
        Data {
            name,
            content: Bytes::new(),
            freshness_period: None,
            signature: None,
        }
    }

    pub fn with_content(name: Name, content: impl Into<Bytes>) -> Self {
        let mut res = Self::new(name);
        res.set_content(content);
        res
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn content(&self) -> &Bytes {
        &self.content
    }

    /// Replaces the content.
    ///
    /// Any signature is dropped since it doesn’t cover the new content.
    pub fn set_content(&mut self, content: impl Into<Bytes>) {
        self.content = content.into();
        self.signature = None;
    }

    pub fn freshness_period(&self) -> Option<Duration> {
        self.freshness_period
    }

    /// Sets how long the data should be considered fresh by caches.
    ///
    /// Any signature is dropped since it doesn’t cover the new value.
    pub fn set_freshness_period(&mut self, period: Option<Duration>) {
        self.freshness_period = period;
        self.signature = None;
    }

    pub fn signature(&self) -> Option<&Signature> {
        self.signature.as_ref()
    }

    /// Attaches a signature received from elsewhere.
    ///
    /// The signature isn’t checked. Use a
    /// [`Validator`][crate::validator::Validator] for that.
    pub fn set_signature(&mut self, signature: Option<Signature>) {
        self.signature = signature
    }

    /// Returns the octets covered by a signature with the given info.
    pub fn signed_portion(&self, info: &SignatureInfo) -> Bytes {
        encode::sequence((
            encode_name(&self.name),
            OctetString::encode_slice(self.content.as_ref()),
            self.freshness_period.map(|period| {
                u64::try_from(period.as_millis()).unwrap_or(u64::MAX)
                    .encode()
            }),
            info.encode_ref(),
        )).to_captured(Mode::Der).into_bytes()
    }

    /// Signs the data with the given key.
    pub fn sign<S: Signer>(
        &mut self, signer: &S, key: &S::KeyId
    ) -> Result<(), SigningError<S::Error>> {
        let info = signer.signature_info(key)?;
        let value = signer.sign(key, &self.signed_portion(&info))?;
        debug!("signed {} using {}", self.name, info.signature_type());
        self.signature = Some(Signature::new(info, value));
        Ok(())
    }
}


//--- Display

impl fmt::Display for Data {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Name: {}", self.name)?;
        if let Some(period) = self.freshness_period {
            writeln!(
                f, "MetaInfo: [FreshnessPeriod: {}ms]", period.as_millis()
            )?;
        }
        writeln!(f, "Content: (size: {})", self.content.len())?;
        match self.signature {
            Some(ref sig) => {
                writeln!(
                    f, "Signature: (type: {}, value_length: {})",
                    sig.info().signature_type(), sig.value().len()
                )
            }
            None => writeln!(f, "Signature: (none)")
        }
    }
}


//------------ Helper Functions ----------------------------------------------

/// Returns an encoder for a name as a sequence of octet strings.
fn encode_name(name: &Name) -> impl encode::Values + '_ {
    encode::sequence(
        encode::iter(name.iter().map(|component| {
            OctetString::encode_slice(component.as_slice())
        }))
    )
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;
    use std::str::FromStr;
    use crate::crypto::DigestSigner;

    #[test]
    fn signature_type_codes() {
        for t in [
            SignatureType::DigestSha256, SignatureType::Sha256WithRsa,
            SignatureType::Sha256WithEcdsa
        ] {
            assert_eq!(SignatureType::from_code(t.code()), Some(t));
        }
        assert_eq!(SignatureType::from_code(2), None);
    }

    #[test]
    fn signed_portion_covers_fields() {
        let info = SignatureInfo::new(SignatureType::DigestSha256, None);
        let name = Name::from_str("/example/ndn/information").unwrap();
        let data = Data::with_content(name.clone(), "hello");
        let portion = data.signed_portion(&info);
        assert_eq!(portion, data.signed_portion(&info));
        assert_ne!(
            portion,
            Data::with_content(name.clone(), "hellp").signed_portion(&info)
        );
        assert_ne!(
            portion,
            Data::with_content(name.append("x"), "hello")
                .signed_portion(&info)
        );
        assert_ne!(
            portion,
            data.signed_portion(&SignatureInfo::new(
                SignatureType::Sha256WithRsa,
                Some(Name::from_str("/key").unwrap())
            ))
        );
    }

    #[test]
    fn set_content_drops_signature() {
        let mut data = Data::with_content(
            Name::from_str("/a").unwrap(), "b"
        );
        data.sign(&DigestSigner, &()).unwrap();
        assert!(data.signature().is_some());
        data.set_content("c");
        assert!(data.signature().is_none());
    }

    #[test]
    fn display() {
        let mut data = Data::with_content(
            Name::from_str("/example/ndn").unwrap(), "hello"
        );
        data.set_freshness_period(Some(Duration::from_secs(10)));
        data.sign(&DigestSigner, &()).unwrap();
        assert_eq!(
            data.to_string(),
            "Name: /example/ndn\n\
             MetaInfo: [FreshnessPeriod: 10000ms]\n\
             Content: (size: 5)\n\
             Signature: (type: DigestSha256, value_length: 32)\n"
        );
    }
}
