//! NDN certificates.
//!
//! This module implements the certificates used by NDN to bind a public key
//! to a name. A certificate is an ordinary named data object whose content
//! is the DER encoding of the following structure:
//!
//! ```txt
//! Certificate ::= SEQUENCE {
//!     validity              SEQUENCE {
//!         notBefore             Time,
//!         notAfter              Time },
//!     subject               SEQUENCE OF SEQUENCE {
//!         type                  OBJECT IDENTIFIER,
//!         value                 PrintableString | UTF8String },
//!     subjectPublicKeyInfo  SubjectPublicKeyInfo,
//!     extensions            SEQUENCE OF SEQUENCE {
//!         extnID                OBJECT IDENTIFIER,
//!         critical              BOOLEAN DEFAULT FALSE,
//!         extnValue             OCTET STRING } OPTIONAL }
//! ```
//!
//! The name of the certificate is not part of that content. It is the name
//! of the data object carrying it.
//!
//! The main type of this module is [`Certificate`]. Its `Display`
//! implementation produces the textual summary used by NDN tools.

use std::{fmt, io};
use bcder::{decode, encode, Mode, OctetString};
use bcder::decode::DecodeError;
use bcder::encode::{PrimitiveContent, Values};
use bytes::Bytes;
use log::debug;
use crate::crypto::PublicKey;
use crate::data::Data;
use crate::error::{DecodingError, EncodingError};
use crate::name::Name;
use crate::util::base64;
use crate::x509::{
    encode_text, take_end, take_text, ObjectId, Time, Validity
};


//------------ Certificate ---------------------------------------------------

/// An NDN certificate.
///
/// A certificate is either built from its fields and then encoded via
/// [`encode`][Self::encode] or decoded from the content of a data object
/// via [`decode`][Self::decode] or [`from_data`][Self::from_data].
///
/// The encoded content is cached. Changing any of the fields that are part
/// of the content drops the cache, so [`content`][Self::content] returns
/// `None` until the certificate is encoded again.
#[derive(Clone, Debug, Default)]
pub struct Certificate {
    name: Name,
    validity: Validity,
    subject_descriptions: Vec<SubjectDescription>,
    public_key_info: PublicKeyInfo,
    extensions: Vec<Extension>,

    /// The encoded content if it is current.
    content: Option<Bytes>,
}

/// # Data Access
///
impl Certificate {
    /// Creates a new, empty certificate with the given name.
    ///
    /// Both validity times are set to the Unix epoch.
    pub fn new(name: Name) -> Self {
        Certificate { name, .. Default::default() }
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    /// Changes the name of the certificate.
    ///
    /// Since the name is not part of the content, this keeps the cache.
    pub fn set_name(&mut self, name: Name) {
        self.name = name
    }

    pub fn validity(&self) -> Validity {
        self.validity
    }

    pub fn set_validity(&mut self, validity: Validity) {
        self.validity = validity;
        self.content = None;
    }

    pub fn not_before(&self) -> Time {
        self.validity.not_before()
    }

    /// Sets the start of the validity period.
    ///
    /// The time isn’t checked against the end of the validity period.
    pub fn set_not_before(&mut self, time: Time) {
        self.validity.set_not_before(time);
        self.content = None;
    }

    pub fn not_after(&self) -> Time {
        self.validity.not_after()
    }

    pub fn set_not_after(&mut self, time: Time) {
        self.validity.set_not_after(time);
        self.content = None;
    }

    pub fn subject_descriptions(&self) -> &[SubjectDescription] {
        &self.subject_descriptions
    }

    /// Appends a subject description.
    ///
    /// Descriptions are kept in order. The same type may appear more than
    /// once.
    pub fn add_subject_description(
        &mut self, description: SubjectDescription
    ) {
        self.subject_descriptions.push(description);
        self.content = None;
    }

    pub fn public_key_info(&self) -> &PublicKeyInfo {
        &self.public_key_info
    }

    pub fn set_public_key_info(&mut self, info: impl Into<PublicKeyInfo>) {
        self.public_key_info = info.into();
        self.content = None;
    }

    pub fn extensions(&self) -> &[Extension] {
        &self.extensions
    }

    /// Appends an extension.
    pub fn add_extension(&mut self, extension: Extension) {
        self.extensions.push(extension);
        self.content = None;
    }

    /// Returns the encoded content if it is current.
    pub fn content(&self) -> Option<&Bytes> {
        self.content.as_ref()
    }
}


/// # Decoding and Encoding
///
impl Certificate {
    /// Decodes the content of a data object named `name`.
    pub fn decode(name: Name, content: Bytes) -> Result<Self, DecodingError> {
        let res = Mode::Der.decode(content.clone(), |cons| {
            let res = cons.take_sequence(|cons| {
                let validity = Validity::take_from(cons)?;
                let subject_descriptions = cons.take_sequence(|cons| {
                    let mut res = Vec::new();
                    while let Some(item) = SubjectDescription::take_opt_from(
                        cons
                    )? {
                        res.push(item)
                    }
                    Ok(res)
                })?;
                let public_key_info = PublicKeyInfo::take_from(cons)?;
                let extensions = cons.take_opt_sequence(|cons| {
                    let mut res = Vec::new();
                    while let Some(item) = Extension::take_opt_from(cons)? {
                        res.push(item)
                    }
                    Ok(res)
                })?.unwrap_or_default();
                Ok((
                    validity, subject_descriptions, public_key_info,
                    extensions
                ))
            })?;
            take_end(cons)?;
            Ok(res)
        });
        match res {
            Ok((
                validity, subject_descriptions, public_key_info, extensions
            )) => {
                Ok(Certificate {
                    name,
                    validity,
                    subject_descriptions,
                    public_key_info,
                    extensions,
                    content: Some(content),
                })
            }
            Err(err) => {
                debug!("Failed to decode certificate {}: {}", name, err);
                Err(DecodingError::new("certificate", err))
            }
        }
    }

    /// Decodes the certificate carried by a data object.
    pub fn from_data(data: &Data) -> Result<Self, DecodingError> {
        Self::decode(data.name().clone(), data.content().clone())
    }

    /// Encodes the certificate and returns the content.
    ///
    /// The content is always produced afresh from the fields, even for a
    /// decoded certificate. It is cached and can later be retrieved via
    /// [`content`][Self::content]. Encoding the same fields twice results
    /// in identical octets.
    pub fn encode(&mut self) -> Result<Bytes, EncodingError> {
        self.validity.check_encodable()?;
        let content = self.encode_ref().to_captured(Mode::Der).into_bytes();
        self.content = Some(content.clone());
        Ok(content)
    }

    /// Returns the encoded content without touching the cache.
    ///
    /// If the cache is current, the cached content is returned.
    pub fn to_bytes(&self) -> Result<Bytes, EncodingError> {
        if let Some(content) = self.content.as_ref() {
            return Ok(content.clone())
        }
        self.validity.check_encodable()?;
        Ok(self.encode_ref().to_captured(Mode::Der).into_bytes())
    }

    /// Writes the encoded content to `target`.
    pub fn write_encoded<W: io::Write>(
        &self, target: &mut W
    ) -> Result<(), EncodingError> {
        match self.content.as_ref() {
            Some(content) => target.write_all(content.as_ref())?,
            None => {
                self.validity.check_encodable()?;
                self.encode_ref().write_encoded(Mode::Der, target)?;
            }
        }
        Ok(())
    }

    /// Returns an unsigned data object carrying the certificate.
    pub fn to_data(&mut self) -> Result<Data, EncodingError> {
        let content = self.encode()?;
        Ok(Data::with_content(self.name.clone(), content))
    }

    /// Returns a value encoder for the content.
    ///
    /// The validity must have been checked to be encodable.
    fn encode_ref(&self) -> impl encode::Values + '_ {
        encode::sequence((
            self.validity.encode(),
            encode::sequence(encode::iter(
                self.subject_descriptions.iter().map(
                    SubjectDescription::encode_ref
                )
            )),
            self.public_key_info.encode_ref(),
            if self.extensions.is_empty() {
                None
            }
            else {
                Some(encode::sequence(encode::iter(
                    self.extensions.iter().map(Extension::encode_ref)
                )))
            }
        ))
    }
}


//--- PartialEq and Eq

impl PartialEq for Certificate {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.validity == other.validity
            && self.subject_descriptions == other.subject_descriptions
            && self.public_key_info == other.public_key_info
            && self.extensions == other.extensions
    }
}

impl Eq for Certificate { }


//--- Display

impl fmt::Display for Certificate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Certificate name:")?;
        writeln!(f, "  {}", self.name)?;
        writeln!(f, "Validity:")?;
        writeln!(f, "  NotBefore: {}", self.validity.not_before())?;
        writeln!(f, "  NotAfter: {}", self.validity.not_after())?;
        writeln!(f, "Subject Description:")?;
        for item in &self.subject_descriptions {
            writeln!(f, "  {}: {}", item.oid(), item.value())?;
        }
        writeln!(f, "Public key bits:")?;
        writeln!(
            f, "{}",
            base64::Summary.display(self.public_key_info.as_slice())
        )
    }
}


//--- Deserialize and Serialize

#[cfg(feature = "serde")]
#[derive(serde::Deserialize, serde::Serialize)]
struct SerdeCertificate {
    name: Name,
    content: String,
}

#[cfg(feature = "serde")]
impl serde::Serialize for Certificate {
    fn serialize<S: serde::Serializer>(
        &self, serializer: S
    ) -> Result<S::Ok, S::Error> {
        use serde::ser;

        let content = self.to_bytes().map_err(ser::Error::custom)?;
        SerdeCertificate {
            name: self.name.clone(),
            content: base64::Serde.encode(content.as_ref()),
        }.serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Certificate {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D
    ) -> Result<Self, D::Error> {
        use serde::de;

        let value = SerdeCertificate::deserialize(deserializer)?;
        let content = base64::Serde.decode(&value.content)
            .map_err(de::Error::custom)?;
        Certificate::decode(value.name, Bytes::from(content))
            .map_err(de::Error::custom)
    }
}


//------------ SubjectDescription --------------------------------------------

/// An attribute describing the holder of a certificate.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct SubjectDescription {
    oid: ObjectId,
    value: String,
}

impl SubjectDescription {
    pub fn new(oid: ObjectId, value: impl Into<String>) -> Self {
        SubjectDescription { oid, value: value.into() }
    }

    pub fn oid(&self) -> &ObjectId {
        &self.oid
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    fn take_opt_from<S: decode::Source>(
        cons: &mut decode::Constructed<S>
    ) -> Result<Option<Self>, DecodeError<S::Error>> {
        cons.take_opt_sequence(|cons| {
            Ok(SubjectDescription {
                oid: ObjectId::take_from(cons)?,
                value: take_text(cons)?,
            })
        })
    }

    fn encode_ref(&self) -> impl encode::Values + '_ {
        encode::sequence((
            self.oid.encode_ref(),
            encode_text(&self.value),
        ))
    }
}


//------------ Extension -----------------------------------------------------

/// A certificate extension.
///
/// The value is the already encoded content of the extension. It is
/// neither checked nor interpreted.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Extension {
    oid: ObjectId,
    critical: bool,
    value: Bytes,
}

impl Extension {
    pub fn new(
        oid: ObjectId, critical: bool, value: impl Into<Bytes>
    ) -> Self {
        Extension { oid, critical, value: value.into() }
    }

    pub fn oid(&self) -> &ObjectId {
        &self.oid
    }

    pub fn is_critical(&self) -> bool {
        self.critical
    }

    pub fn value(&self) -> &Bytes {
        &self.value
    }

    fn take_opt_from<S: decode::Source>(
        cons: &mut decode::Constructed<S>
    ) -> Result<Option<Self>, DecodeError<S::Error>> {
        cons.take_opt_sequence(|cons| {
            Ok(Extension {
                oid: ObjectId::take_from(cons)?,
                critical: cons.take_opt_bool()?.unwrap_or(false),
                value: OctetString::take_from(cons)?.into_bytes(),
            })
        })
    }

    fn encode_ref(&self) -> impl encode::Values + '_ {
        encode::sequence((
            self.oid.encode_ref(),
            self.critical.encode(),
            OctetString::encode_slice(self.value.as_ref()),
        ))
    }
}


//------------ PublicKeyInfo -------------------------------------------------

/// The encoded public key of a certificate.
///
/// This is normally a `SubjectPublicKeyInfo` sequence. The certificate
/// only requires it to be a single encoded value when decoding and writes
/// it out unchanged when encoding. Use
/// [`to_public_key`][Self::to_public_key] to actually parse it.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct PublicKeyInfo(Bytes);

impl PublicKeyInfo {
    pub fn new(bytes: Bytes) -> Self {
        PublicKeyInfo(bytes)
    }

    pub fn as_slice(&self) -> &[u8] {
        self.0.as_ref()
    }

    pub fn into_bytes(self) -> Bytes {
        self.0
    }

    /// Parses the octets as a public key.
    pub fn to_public_key(&self) -> Result<PublicKey, DecodingError> {
        PublicKey::decode(self.0.clone()).map_err(|err| {
            DecodingError::new("public key", err)
        })
    }

    fn take_from<S: decode::Source>(
        cons: &mut decode::Constructed<S>
    ) -> Result<Self, DecodeError<S::Error>> {
        cons.capture_one().map(|captured| {
            PublicKeyInfo(captured.into_bytes())
        })
    }

    fn encode_ref(&self) -> RawValue {
        RawValue(self.0.as_ref())
    }
}

impl From<Bytes> for PublicKeyInfo {
    fn from(bytes: Bytes) -> Self {
        PublicKeyInfo(bytes)
    }
}

impl From<&[u8]> for PublicKeyInfo {
    fn from(slice: &[u8]) -> Self {
        PublicKeyInfo(Bytes::copy_from_slice(slice))
    }
}

impl From<Vec<u8>> for PublicKeyInfo {
    fn from(vec: Vec<u8>) -> Self {
        PublicKeyInfo(vec.into())
    }
}

impl AsRef<[u8]> for PublicKeyInfo {
    fn as_ref(&self) -> &[u8] {
        self.0.as_ref()
    }
}


//------------ RawValue ------------------------------------------------------

/// Already encoded octets written as they are.
struct RawValue<'a>(&'a [u8]);

impl encode::Values for RawValue<'_> {
    fn encoded_len(&self, _mode: Mode) -> usize {
        self.0.len()
    }

    fn write_encoded<W: io::Write>(
        &self,
        _mode: Mode,
        target: &mut W
    ) -> Result<(), io::Error> {
        target.write_all(self.0)
    }
}


//============ Tests =========================================================
