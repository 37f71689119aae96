//! Validation of signed data.
//!
//! A [`Validator`] decides whether a data packet can be trusted. Two
//! implementations are provided. [`AcceptAll`] trusts everything and is
//! only useful for testing. [`TrustAnchors`] checks signatures against a
//! set of certificates that are trusted unconditionally.

use log::{debug, info};
use crate::cert::Certificate;
use crate::crypto::sha256;
use crate::data::{Data, Signature, SignatureType};
use crate::error::ValidationError;
use crate::x509::Time;


//------------ Validator -----------------------------------------------------

/// A type that can decide whether to trust a data packet.
pub trait Validator {
    /// Validates the data packet.
    fn validate(&self, data: &Data) -> Result<(), ValidationError>;

    /// Validates the data packet and calls one of two closures.
    ///
    /// If the packet is accepted, `on_accept` is called with it. Otherwise
    /// `on_reject` receives the packet and the reason for rejecting it.
    fn validate_then<A, R>(&self, data: &Data, on_accept: A, on_reject: R)
    where
        Self: Sized,
        A: FnOnce(&Data),
        R: FnOnce(&Data, ValidationError),
    {
        match self.validate(data) {
            Ok(()) => on_accept(data),
            Err(err) => on_reject(data, err),
        }
    }
}

impl<V: Validator + ?Sized> Validator for &V {
    fn validate(&self, data: &Data) -> Result<(), ValidationError> {
        (*self).validate(data)
    }
}

impl<V: Validator + ?Sized> Validator for Box<V> {
    fn validate(&self, data: &Data) -> Result<(), ValidationError> {
        self.as_ref().validate(data)
    }
}


//------------ AcceptAll -----------------------------------------------------

/// A validator that accepts every data packet, signed or not.
#[derive(Clone, Copy, Debug, Default)]
pub struct AcceptAll;

impl Validator for AcceptAll {
    fn validate(&self, _data: &Data) -> Result<(), ValidationError> {
        Ok(())
    }
}


//------------ TrustAnchors --------------------------------------------------

/// A validator using a set of trusted certificates.
///
/// Digest signatures prove nothing about who produced the data. They are
/// rejected unless enabled via
/// [`set_accept_digest`][Self::set_accept_digest] and then accepted if the
/// digest is correct. Signatures made with a key are accepted if the key
/// locator names one of the anchors or something below it, the anchor is
/// currently valid, and the signature verifies with the anchor’s public
/// key. If several anchors
/// match, the one with the longest name is used.
#[derive(Clone, Debug, Default)]
pub struct TrustAnchors {
    anchors: Vec<Certificate>,

    /// Whether to accept data signed with a plain digest.
    accept_digest: bool,
}

impl TrustAnchors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a certificate as a trust anchor.
    pub fn add(&mut self, anchor: Certificate) {
        debug!("Adding trust anchor {}", anchor.name());
        self.anchors.push(anchor)
    }

    /// Returns whether digest signatures are accepted.
    pub fn accepts_digest(&self) -> bool {
        self.accept_digest
    }

    /// Sets whether digest signatures are accepted.
    pub fn set_accept_digest(&mut self, accept: bool) {
        self.accept_digest = accept
    }

    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Certificate> + '_ {
        self.anchors.iter()
    }

    /// Validates a data packet as if the current time was `now`.
    pub fn validate_at(
        &self, data: &Data, now: Time
    ) -> Result<(), ValidationError> {
        let res = self.check_signature(data, now);
        if let Err(ref err) = res {
            info!("Rejected data {}: {}", data.name(), err);
        }
        res
    }

    fn check_signature(
        &self, data: &Data, now: Time
    ) -> Result<(), ValidationError> {
        let signature = data.signature().ok_or_else(
            ValidationError::missing_signature
        )?;
        let signed = data.signed_portion(signature.info());
        match signature.info().signature_type() {
            SignatureType::DigestSha256 => {
                if !self.accept_digest {
                    return Err(ValidationError::unsupported(
                        SignatureType::DigestSha256
                    ))
                }
                let digest = sha256(signed.as_ref());
                if digest.as_ref() == signature.value().as_ref() {
                    Ok(())
                }
                else {
                    Err(ValidationError::invalid_signature())
                }
            }
            _ => self.check_key_signature(signature, signed.as_ref(), now)
        }
    }

    fn check_key_signature(
        &self, signature: &Signature, signed: &[u8], now: Time
    ) -> Result<(), ValidationError> {
        let sig_type = signature.info().signature_type();
        let locator = signature.info().key_locator().ok_or_else(
            ValidationError::missing_key_locator
        )?;
        let anchor = self.anchors.iter().filter(|anchor| {
            anchor.name().is_prefix_of(locator)
        }).max_by_key(|anchor| anchor.name().len()).ok_or_else(|| {
            ValidationError::unknown_key(locator.clone())
        })?;
        anchor.validity().verify_at(now).map_err(|err| {
            ValidationError::validity(anchor.name().clone(), err)
        })?;
        let key = anchor.public_key_info().to_public_key().map_err(|err| {
            ValidationError::anchor(anchor.name().clone(), err)
        })?;
        if !key.algorithm().allows(sig_type) {
            return Err(ValidationError::unsupported(sig_type))
        }
        key.verify(signed, signature.value().as_ref()).map_err(|_| {
            ValidationError::invalid_signature()
        })
    }
}

impl Validator for TrustAnchors {
    fn validate(&self, data: &Data) -> Result<(), ValidationError> {
        self.validate_at(data, Time::now())
    }
}

impl Extend<Certificate> for TrustAnchors {
    fn extend<T: IntoIterator<Item = Certificate>>(&mut self, iter: T) {
        iter.into_iter().for_each(|anchor| self.add(anchor))
    }
}

impl FromIterator<Certificate> for TrustAnchors {
    fn from_iter<T: IntoIterator<Item = Certificate>>(iter: T) -> Self {
        let mut res = Self::new();
        res.extend(iter);
        res
    }
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;
    use std::str::FromStr;
    use bytes::Bytes;
    use chrono::{TimeDelta, TimeZone, Utc};
    use crate::crypto::{DigestSigner, PublicKeyFormat, SoftSigner};
    use crate::data::{SignatureInfo, Signature};
    use crate::name::Name;
    use crate::x509::Validity;

    fn rsa_signer(name: &Name) -> SoftSigner {
        let mut signer = SoftSigner::new();
        signer.key_from_pkcs8(
            name.clone(), PublicKeyFormat::Rsa,
            include_bytes!("../test-data/ndn/rsa-key.pk8")
        ).unwrap();
        signer
    }

    fn ecdsa_signer(name: &Name) -> (SoftSigner, Bytes) {
        let mut signer = SoftSigner::new();
        signer.create_key(name.clone(), PublicKeyFormat::EcdsaP256).unwrap();
        let info = signer.public_key(name).unwrap().to_info_bytes();
        (signer, info)
    }

    fn anchor(name: &str, key_info: impl Into<Bytes>) -> Certificate {
        let mut cert = Certificate::new(Name::from_str(name).unwrap());
        cert.set_validity(Validity::from_duration(
            TimeDelta::try_days(1).unwrap()
        ));
        cert.set_public_key_info(key_info.into());
        cert
    }

    fn data(content: &'static str) -> Data {
        Data::with_content(
            Name::from_str("/example/ndn/information").unwrap(), content
        )
    }

    #[test]
    fn accept_all() {
        let mut accepted = false;
        AcceptAll.validate_then(
            &data("unsigned"), |_| accepted = true, |_, _| panic!()
        );
        assert!(accepted);
    }

    #[test]
    fn digest_signatures() {
        let mut anchors = TrustAnchors::new();
        let mut data = data("hello");
        assert!(anchors.validate(&data).is_err());

        data.sign(&DigestSigner, &()).unwrap();
        assert!(!anchors.accepts_digest());
        assert!(anchors.validate(&data).unwrap_err().is_unsupported());

        anchors.set_accept_digest(true);
        anchors.validate(&data).unwrap();

        let sig = data.signature().unwrap().clone();
        let mut value = sig.value().to_vec();
        value[0] ^= 0xff;
        data.set_signature(Some(Signature::new(
            sig.info().clone(), value.into()
        )));
        assert!(anchors.validate(&data).unwrap_err().is_invalid_signature());

        let mut rejected = None;
        anchors.validate_then(
            &data, |_| panic!(), |_, err| rejected = Some(err)
        );
        assert!(rejected.unwrap().is_invalid_signature());
    }

    #[test]
    fn rsa_signatures() {
        let key_name = Name::from_str("/example/KEY/rsa").unwrap();
        let anchors: TrustAnchors = [
            anchor("/example", Bytes::new()),
            anchor(
                "/example/KEY/rsa",
                include_bytes!("../test-data/ndn/rsa-pubkey.der").as_ref()
            ),
        ].into_iter().collect();

        let mut data = data("hello");
        data.sign(&rsa_signer(&key_name), &key_name).unwrap();
        anchors.validate(&data).unwrap();

        // Signed portion changes, signature doesn’t.
        let sig = data.signature().unwrap().clone();
        data.set_content("hellp");
        data.set_signature(Some(sig));
        assert!(anchors.validate(&data).unwrap_err().is_invalid_signature());

        // Falls back to the shorter anchor with its empty key.
        let other = Name::from_str("/example/KEY/other").unwrap();
        data.sign(&rsa_signer(&other), &other).unwrap();
        let err = anchors.validate(&data).unwrap_err();
        assert!(!err.is_invalid_signature());
        assert!(!err.is_unknown_key());
    }

    #[test]
    fn ecdsa_signatures() {
        let key_name = Name::from_str("/example/KEY/ec").unwrap();
        let locator = key_name.clone().append("self");
        let (signer, info) = ecdsa_signer(&locator);
        let mut anchors = TrustAnchors::new();
        anchors.add(anchor("/example/KEY/ec", info));

        let mut data = data("hello");
        data.sign(&signer, &locator).unwrap();
        anchors.validate(&data).unwrap();

        // RSA signature claiming an ECDSA anchor.
        data.sign(&rsa_signer(&key_name), &key_name).unwrap();
        let err = anchors.validate(&data).unwrap_err();
        assert!(!err.is_invalid_signature());
    }

    #[test]
    fn unknown_key() {
        let other = Name::from_str("/other/KEY/ec").unwrap();
        let (signer, info) = ecdsa_signer(&other);
        let mut anchors = TrustAnchors::new();
        anchors.add(anchor("/example/KEY/ec", info));

        let mut data = data("hello");
        data.sign(&signer, &other).unwrap();
        assert!(anchors.validate(&data).unwrap_err().is_unknown_key());

        let mut data = self::data("hello");
        data.set_signature(Some(Signature::new(
            SignatureInfo::new(SignatureType::Sha256WithEcdsa, None),
            Bytes::new()
        )));
        let err = anchors.validate(&data).unwrap_err();
        assert!(!err.is_unknown_key());
    }

    #[test]
    fn expired_anchor() {
        let root = Certificate::decode(
            Name::from_str("/tmp").unwrap(),
            Bytes::from_static(
                include_bytes!("../test-data/ndn/testbed-root.ndncert")
            )
        ).unwrap();
        let mut anchors = TrustAnchors::new();
        anchors.add(root);

        let mut data = data("hello");
        data.set_signature(Some(Signature::new(
            SignatureInfo::new(
                SignatureType::Sha256WithRsa,
                Some(Name::from_str("/tmp/KEY").unwrap())
            ),
            Bytes::from_static(&[0; 256])
        )));

        let err = anchors.validate(&data).unwrap_err();
        assert!(!err.is_invalid_signature());
        assert!(!err.is_unknown_key());

        let then = Time::new(
            Utc.with_ymd_and_hms(2014, 1, 1, 0, 0, 0).unwrap()
        );
        assert!(
            anchors.validate_at(&data, then).unwrap_err()
                .is_invalid_signature()
        );
    }
}
