//! Types borrowed from X.509 that NDN certificates are built from.
//!
//! NDN certificates use a slimmed down version of the X.509 certificate
//! structure. This module contains the building blocks shared with X.509:
//! time values and the validity period made from them, object identifiers,
//! and the string values used in subject descriptions.

use std::{error, fmt, io, ops, str};
use std::str::FromStr;
use std::time::SystemTime;
use bcder::{decode, encode};
use bcder::{Mode, Oid, Tag};
use bcder::decode::{ContentError, DecodeError, Source};
use bcder::encode::PrimitiveContent;
use bcder::string::{PrintableString, Utf8String};
use bytes::Bytes;
use chrono::{
    Datelike, DateTime, LocalResult, TimeDelta, Timelike, TimeZone, Utc
};
use crate::error::EncodingError;


//------------ Time ----------------------------------------------------------

/// A point in time as used by certificates.
///
/// Values are kept with nanosecond precision. When encoded, a fraction of
/// a second is added only if it isn’t zero. Conversion from and to the
/// epoch milliseconds used by the NDN APIs is available via
/// [`from_millis`][Self::from_millis] and
/// [`timestamp_millis`][Self::timestamp_millis].
///
/// The `Display` implementation uses the ISO 8601 basic format with six
/// fractional digits, e.g., `20131226T232254.000000`.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Time(DateTime<Utc>);

impl Time {
    pub fn new(dt: DateTime<Utc>) -> Self {
        Time(dt)
    }

    pub fn now() -> Self {
        Self::new(Utc::now())
    }

    /// Creates a time value from milliseconds since the Unix epoch.
    pub fn from_millis(millis: i64) -> Result<Self, TimeRangeError> {
        match Utc.timestamp_millis_opt(millis) {
            LocalResult::Single(dt) => Ok(Time(dt)),
            _ => Err(TimeRangeError(millis))
        }
    }

    /// Returns the number of milliseconds since the Unix epoch.
    pub fn timestamp_millis(self) -> i64 {
        self.0.timestamp_millis()
    }

    /// Returns whether the time can be expressed as a GeneralizedTime.
    ///
    /// GeneralizedTime has exactly four digits for the year.
    pub fn is_generalized_time(self) -> bool {
        (0..=9999).contains(&self.0.year())
    }

    pub fn take_from<S: decode::Source>(
        cons: &mut decode::Constructed<S>
    ) -> Result<Self, DecodeError<S::Error>> {
        cons.take_primitive(|tag, prim| {
            match tag {
                Tag::UTC_TIME => {
                    // YYMMDDHHMMSSZ
                    let year = read_two_char(prim)? as i32;
                    let year = if year >= 50 { year + 1900 }
                               else { year + 2000 };
                    let res = (
                        year,
                        read_two_char(prim)?,
                        read_two_char(prim)?,
                        read_two_char(prim)?,
                        read_two_char(prim)?,
                        read_two_char(prim)?,
                    );
                    if prim.take_u8()? != b'Z' {
                        return Err(prim.content_err(
                            "malformed time value"
                        ))
                    }
                    Self::from_parts(res, 0)
                        .map_err(|err| prim.content_err(err))
                }
                Tag::GENERALIZED_TIME => {
                    // YYYYMMDDHHMMSS[.f*]Z
                    let res = (
                        read_four_char(prim)? as i32,
                        read_two_char(prim)?,
                        read_two_char(prim)?,
                        read_two_char(prim)?,
                        read_two_char(prim)?,
                        read_two_char(prim)?,
                    );
                    let mut ch = prim.take_u8()?;
                    let mut nanos = 0;
                    if ch == b'.' {
                        let mut digits = 0;
                        ch = prim.take_u8()?;
                        while ch.is_ascii_digit() {
                            if digits < 9 {
                                nanos = nanos * 10 + u32::from(ch - b'0');
                                digits += 1;
                            }
                            ch = prim.take_u8()?;
                        }
                        if digits == 0 {
                            return Err(prim.content_err(
                                "malformed time value"
                            ))
                        }
                        nanos *= 10u32.pow(9 - digits);
                    }
                    if ch != b'Z' {
                        return Err(prim.content_err(
                            "malformed time value"
                        ))
                    }
                    Self::from_parts(res, nanos)
                        .map_err(|err| prim.content_err(err))
                }
                _ => {
                    Err(prim.content_err(
                        "malformed time value"
                    ))
                }
            }
        })
    }

    fn from_parts(
        parts: (i32, u32, u32, u32, u32, u32),
        nanos: u32,
    ) -> Result<Self, ContentError> {
        let dt = match Utc.with_ymd_and_hms(
            parts.0, parts.1, parts.2, parts.3, parts.4, parts.5
        ) {
            LocalResult::Single(dt) => dt,
            _ => return Err(ContentError::from_static("malformed time value"))
        };
        match dt.with_nanosecond(nanos) {
            Some(dt) => Ok(Time(dt)),
            None => Err(ContentError::from_static("malformed time value"))
        }
    }

    pub fn verify_not_before(
        &self,
        now: Time
    ) -> Result<(), ValidityPeriodError> {
        if now.0 < self.0 {
            Err(ValidityPeriodError::too_new())
        }
        else {
            Ok(())
        }
    }

    pub fn verify_not_after(
        &self,
        now: Time
    ) -> Result<(), ValidityPeriodError> {
        if now.0 > self.0 {
            Err(ValidityPeriodError::too_old())
        }
        else {
            Ok(())
        }
    }

    /// Returns an encoder for the time as a GeneralizedTime.
    ///
    /// The caller needs to make sure that the time can actually be
    /// encoded via [`is_generalized_time`][Self::is_generalized_time].
    pub fn encode_generalized_time(self) -> impl encode::Values {
        GeneralizedTime(self).encode()
    }
}


//--- Deref and AsRef

impl ops::Deref for Time {
    type Target = DateTime<Utc>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<DateTime<Utc>> for Time {
    fn as_ref(&self) -> &DateTime<Utc> {
        &self.0
    }
}


//--- From and TryFrom

impl From<DateTime<Utc>> for Time {
    fn from(time: DateTime<Utc>) -> Self {
        Time(time)
    }
}

impl From<Time> for DateTime<Utc> {
    fn from(time: Time) -> Self {
        time.0
    }
}

impl From<SystemTime> for Time {
    fn from(time: SystemTime) -> Self {
        Time(time.into())
    }
}

impl TryFrom<i64> for Time {
    type Error = TimeRangeError;

    fn try_from(millis: i64) -> Result<Self, Self::Error> {
        Self::from_millis(millis)
    }
}


//--- Add and Sub

impl ops::Add<TimeDelta> for Time {
    type Output = Self;

    fn add(self, duration: TimeDelta) -> Self::Output {
        Self::new(self.0 + duration)
    }
}

impl ops::Sub<TimeDelta> for Time {
    type Output = Self;

    fn sub(self, duration: TimeDelta) -> Self::Output {
        Self::new(self.0 - duration)
    }
}


//--- Display

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y%m%dT%H%M%S%.6f"))
    }
}


fn read_two_char<S: decode::Source>(
    source: &mut S
) -> Result<u32, DecodeError<S::Error>> {
    let mut s = [0u8; 2];
    s[0] = source.take_u8()?;
    s[1] = source.take_u8()?;
    let s = match str::from_utf8(&s[..]) {
        Ok(s) => s,
        Err(_err) => {
            return Err(source.content_err("malformed time value"))
        }
    };
    u32::from_str(s).map_err(|_err| {
        source.content_err("malformed time value")
    })
}


fn read_four_char<S: decode::Source>(
    source: &mut S
) -> Result<u32, DecodeError<S::Error>> {
    let mut s = [0u8; 4];
    s[0] = source.take_u8()?;
    s[1] = source.take_u8()?;
    s[2] = source.take_u8()?;
    s[3] = source.take_u8()?;
    let s = match str::from_utf8(&s[..]) {
        Ok(s) => s,
        Err(_err) => {
            return Err(source.content_err("malformed time value"))
        }
    };
    u32::from_str(s).map_err(|_err| {
        source.content_err("malformed time value")
    })
}


//------------ GeneralizedTime -----------------------------------------------

pub struct GeneralizedTime(Time);

impl GeneralizedTime {
    /// Returns the fractional seconds without trailing zeros.
    ///
    /// The string is empty for whole seconds.
    fn fraction(&self) -> String {
        let nanos = self.0.nanosecond().min(999_999_999);
        if nanos == 0 {
            return String::new()
        }
        let mut res = format!("{:09}", nanos);
        while res.ends_with('0') {
            res.pop();
        }
        res
    }
}

impl PrimitiveContent for GeneralizedTime {
    const TAG: Tag = Tag::GENERALIZED_TIME;

    fn encoded_len(&self, _: Mode) -> usize {
        // yyyyMMddhhmmss[.f*]Z
        match self.fraction().len() {
            0 => 15,
            len => 16 + len,
        }
    }

    fn write_encoded<W: io::Write>(
        &self, _: Mode, target: &mut W
    ) -> Result<(), io::Error> {
        write!(
            target, "{:04}{:02}{:02}{:02}{:02}{:02}",
            self.0.year(), self.0.month(), self.0.day(),
            self.0.hour(), self.0.minute(), self.0.second()
        )?;
        let fraction = self.fraction();
        if !fraction.is_empty() {
            write!(target, ".{}", fraction)?;
        }
        target.write_all(b"Z")
    }
}


/// Checks that a value has been read completely.
///
/// Returns an error if there is anything left in `cons`.
pub(crate) fn take_end<S: decode::Source>(
    cons: &mut decode::Constructed<S>
) -> Result<(), DecodeError<S::Error>> {
    if cons.capture_all()?.as_slice().is_empty() {
        Ok(())
    }
    else {
        Err(cons.content_err("trailing data"))
    }
}


//------------ Validity ------------------------------------------------------

/// The period of time a certificate is valid for.
///
/// Nothing requires `not_before` to be earlier than `not_after`.
#[derive(Clone, Debug, Copy, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Validity {
    not_before: Time,
    not_after: Time,
}

impl Validity {
    pub fn new(not_before: Time, not_after: Time) -> Self {
        Validity { not_before, not_after }
    }

    /// Creates a validity starting now and lasting for `duration`.
    pub fn from_duration(duration: TimeDelta) -> Self {
        let now = Time::now();
        Validity::new(now, now + duration)
    }

    pub fn not_before(self) -> Time {
        self.not_before
    }

    pub fn set_not_before(&mut self, time: Time) {
        self.not_before = time
    }

    pub fn not_after(self) -> Time {
        self.not_after
    }

    pub fn set_not_after(&mut self, time: Time) {
        self.not_after = time
    }

    pub fn take_from<S: decode::Source>(
        cons: &mut decode::Constructed<S>
    ) -> Result<Self, DecodeError<S::Error>> {
        cons.take_sequence(|cons| {
            Ok(Validity::new(
                Time::take_from(cons)?,
                Time::take_from(cons)?,
            ))
        })
    }

    pub fn verify(self) -> Result<(), ValidityPeriodError> {
        self.verify_at(Time::now())
    }

    pub fn verify_at(self, now: Time) -> Result<(), ValidityPeriodError> {
        self.not_before.verify_not_before(now)?;
        self.not_after.verify_not_after(now)?;
        Ok(())
    }

    /// Checks that both times can be encoded.
    pub fn check_encodable(self) -> Result<(), EncodingError> {
        for time in [self.not_before, self.not_after] {
            if !time.is_generalized_time() {
                return Err(EncodingError::time_out_of_range(time))
            }
        }
        Ok(())
    }

    /// Returns an encoder for the validity.
    ///
    /// Both times are always encoded as GeneralizedTime. You need to call
    /// [`check_encodable`][Self::check_encodable] first.
    pub fn encode(self) -> impl encode::Values {
        encode::sequence((
            self.not_before.encode_generalized_time(),
            self.not_after.encode_generalized_time(),
        ))
    }
}

impl Default for Validity {
    fn default() -> Self {
        let epoch = Time::new(DateTime::<Utc>::default());
        Validity::new(epoch, epoch)
    }
}


//------------ ObjectId ------------------------------------------------------

/// An object identifier given by its encoded content.
///
/// Unlike [`bcder::Oid`], this type can be created from and is displayed
/// in the common dotted decimal notation, e.g., `2.5.4.41`.
#[derive(Clone, Eq, Hash, PartialEq)]
pub struct ObjectId(Bytes);

impl ObjectId {
    /// Creates an object identifier from a BER-encoded identifier.
    pub fn from_oid<T: AsRef<[u8]>>(oid: &Oid<T>) -> Self {
        ObjectId(Bytes::copy_from_slice(oid.0.as_ref()))
    }

    /// Returns the content octets of the encoded identifier.
    pub fn as_slice(&self) -> &[u8] {
        self.0.as_ref()
    }

    pub fn take_from<S: decode::Source>(
        cons: &mut decode::Constructed<S>
    ) -> Result<Self, DecodeError<S::Error>> {
        Oid::take_from(cons).map(|oid| ObjectId(oid.0))
    }

    /// Returns the components of the identifier.
    ///
    /// The first two components are split out of the first encoded
    /// subidentifier.
    fn arcs(&self) -> Result<Vec<u64>, ObjectIdError> {
        let mut res = Vec::new();
        let mut value = 0u64;
        let mut pending = false;
        for &octet in self.0.iter() {
            value = value.checked_mul(128).ok_or(ObjectIdError)?
                | u64::from(octet & 0x7F);
            pending = octet & 0x80 != 0;
            if !pending {
                if res.is_empty() {
                    match value {
                        0..=39 => res.extend([0, value]),
                        40..=79 => res.extend([1, value - 40]),
                        _ => res.extend([2, value - 80]),
                    }
                }
                else {
                    res.push(value)
                }
                value = 0;
            }
        }
        if pending || res.is_empty() {
            return Err(ObjectIdError)
        }
        Ok(res)
    }

    fn push_arc(target: &mut Vec<u8>, value: u64) {
        let bits = 64 - (value | 1).leading_zeros();
        let mut shift = (bits - 1) / 7 * 7;
        while shift > 0 {
            target.push(((value >> shift) & 0x7F) as u8 | 0x80);
            shift -= 7;
        }
        target.push((value & 0x7F) as u8);
    }
}


//--- FromStr

impl FromStr for ObjectId {
    type Err = ObjectIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut arcs = s.split('.').map(|arc| {
            if arc.is_empty() || !arc.bytes().all(|ch| ch.is_ascii_digit()) {
                return Err(ObjectIdError)
            }
            u64::from_str(arc).map_err(|_| ObjectIdError)
        });
        let first = arcs.next().ok_or(ObjectIdError)??;
        let second = arcs.next().ok_or(ObjectIdError)??;
        if first > 2 || (first < 2 && second > 39) {
            return Err(ObjectIdError)
        }
        let mut res = Vec::new();
        Self::push_arc(
            &mut res,
            (first * 40).checked_add(second).ok_or(ObjectIdError)?
        );
        for arc in arcs {
            Self::push_arc(&mut res, arc?);
        }
        Ok(ObjectId(res.into()))
    }
}


//--- PartialEq

impl<T: AsRef<[u8]>> PartialEq<Oid<T>> for ObjectId {
    fn eq(&self, other: &Oid<T>) -> bool {
        self.0.as_ref() == other.0.as_ref()
    }
}


//--- Display and Debug

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.arcs() {
            Ok(arcs) => {
                let mut arcs = arcs.into_iter();
                if let Some(first) = arcs.next() {
                    write!(f, "{}", first)?;
                }
                for arc in arcs {
                    write!(f, ".{}", arc)?;
                }
                Ok(())
            }
            Err(_) => f.write_str("<invalid object identifier>")
        }
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "ObjectId({})", self)
    }
}


//--- PrimitiveContent

impl PrimitiveContent for ObjectId {
    const TAG: Tag = Tag::OID;

    fn encoded_len(&self, _mode: Mode) -> usize {
        self.0.len()
    }

    fn write_encoded<W: io::Write>(
        &self,
        _mode: Mode,
        target: &mut W
    ) -> Result<(), io::Error> {
        target.write_all(self.0.as_ref())
    }
}


//------------ Text Values ---------------------------------------------------

/// Returns an encoder for a string value.
///
/// If all characters of `value` are allowed in a PrintableString, the value
/// is encoded as one. Otherwise, a UTF8String is used.
pub fn encode_text(value: &str) -> impl encode::Values + '_ {
    if value.bytes().all(is_printable) {
        encode::Choice2::One(PrintableText(value).encode())
    }
    else {
        encode::Choice2::Two(Utf8Text(value).encode())
    }
}

/// Takes a PrintableString or UTF8String from the beginning of `cons`.
pub fn take_text<S: decode::Source>(
    cons: &mut decode::Constructed<S>
) -> Result<String, DecodeError<S::Error>> {
    cons.take_value(|tag, content| {
        let bytes = if tag == Tag::PRINTABLE_STRING {
            PrintableString::from_content(content)?.into_bytes()
        }
        else if tag == Tag::UTF8_STRING {
            Utf8String::from_content(content)?.into_bytes()
        }
        else {
            return Err(content.content_err(
                "unpermitted string variant in subject description"
            ))
        };
        String::from_utf8(bytes.to_vec()).map_err(|_| {
            content.content_err("invalid characters in string value")
        })
    })
}

/// Returns whether the character is allowed in a PrintableString.
fn is_printable(ch: u8) -> bool {
    ch.is_ascii_alphanumeric() || b" '()+,-./:=?".contains(&ch)
}

struct PrintableText<'a>(&'a str);

impl PrimitiveContent for PrintableText<'_> {
    const TAG: Tag = Tag::PRINTABLE_STRING;

    fn encoded_len(&self, _: Mode) -> usize {
        self.0.len()
    }

    fn write_encoded<W: io::Write>(
        &self, _: Mode, target: &mut W
    ) -> Result<(), io::Error> {
        target.write_all(self.0.as_bytes())
    }
}

struct Utf8Text<'a>(&'a str);

impl PrimitiveContent for Utf8Text<'_> {
    const TAG: Tag = Tag::UTF8_STRING;

    fn encoded_len(&self, _: Mode) -> usize {
        self.0.len()
    }

    fn write_encoded<W: io::Write>(
        &self, _: Mode, target: &mut W
    ) -> Result<(), io::Error> {
        target.write_all(self.0.as_bytes())
    }
}


//------------ TimeRangeError ------------------------------------------------

/// A millisecond value is outside the range of supported times.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TimeRangeError(i64);

impl fmt::Display for TimeRangeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "timestamp {} out of range", self.0)
    }
}

impl error::Error for TimeRangeError { }


//------------ ObjectIdError -------------------------------------------------

/// A string does not contain a valid object identifier.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ObjectIdError;

impl fmt::Display for ObjectIdError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("invalid object identifier")
    }
}

impl error::Error for ObjectIdError { }


//------------ ValidityPeriodError -------------------------------------------

/// An object is outside of its period of validity.
#[derive(Clone, Copy, Debug)]
pub struct ValidityPeriodError {
    /// Is the object too new?
    ///
    /// It is too old otherwise.
    too_new: bool,
}

impl ValidityPeriodError {
    fn too_new() -> Self {
        ValidityPeriodError { too_new: true }
    }

    fn too_old() -> Self {
        ValidityPeriodError { too_new: false }
    }

    pub fn is_too_new(self) -> bool {
        self.too_new
    }
}

impl fmt::Display for ValidityPeriodError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(
            if self.too_new {
                "certificate is not yet valid"
            }
            else {
                "certificate has expired"
            }
        )
    }
}

impl error::Error for ValidityPeriodError { }


//------------ Testing. One. Two. Three --------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use bcder::encode::Values;

    fn decode_time(
        data: &[u8]
    ) -> Result<Time, DecodeError<std::convert::Infallible>> {
        Mode::Der.decode(data, Time::take_from)
    }

    #[test]
    fn time_from_millis() {
        let time = Time::from_millis(1388100174000).unwrap();
        assert_eq!(time.year(), 2013);
        assert_eq!(time.month(), 12);
        assert_eq!(time.day(), 26);
        assert_eq!(time.hour(), 23);
        assert_eq!(time.minute(), 22);
        assert_eq!(time.second(), 54);
        assert_eq!(time.timestamp_millis(), 1388100174000);
        assert!(Time::from_millis(i64::MAX).is_err());
    }

    #[test]
    fn time_display() {
        assert_eq!(
            Time::from_millis(1388100174000).unwrap().to_string(),
            "20131226T232254.000000"
        );
        assert_eq!(
            Time::from_millis(1388100174123).unwrap().to_string(),
            "20131226T232254.123000"
        );
    }

    #[test]
    fn time_take_from() {
        let expected = Time::from_millis(1388100174000).unwrap();
        assert_eq!(decode_time(b"\x18\x0f20131226232254Z").unwrap(), expected);
        assert_eq!(decode_time(b"\x17\x0d131226232254Z").unwrap(), expected);
        assert_eq!(
            decode_time(b"\x18\x1320131226232254.125Z").unwrap(),
            Time::from_millis(1388100174125).unwrap()
        );
        assert!(decode_time(b"\x18\x0f20131226232254X").is_err());
        assert!(decode_time(b"\x18\x1020131226232254.Z").is_err());
        assert!(decode_time(b"\x18\x0f20131326232254Z").is_err());
        assert!(decode_time(b"\x04\x0f20131226232254Z").is_err());
    }

    #[test]
    fn validity_encode() {
        let validity = Validity::new(
            Time::from_millis(1388100174000).unwrap(),
            Time::from_millis(1388100174990).unwrap(),
        );
        validity.check_encodable().unwrap();
        let mut target = Vec::new();
        validity.encode().write_encoded(Mode::Der, &mut target).unwrap();
        assert_eq!(
            target,
            b"\x30\x25\
              \x18\x0f20131226232254Z\
              \x18\x1220131226232254.99Z".as_ref()
        );
        assert_eq!(
            Mode::Der.decode(target.as_slice(), Validity::take_from).unwrap(),
            validity
        );
    }

    #[test]
    fn validity_out_of_range() {
        let time = Time::from_millis(253402300800000).unwrap(); // year 10000
        assert!(!time.is_generalized_time());
        assert!(
            Validity::new(Time::now(), time).check_encodable().is_err()
        );
    }

    #[test]
    fn validity_verify_at() {
        let start = Time::from_millis(1383325882000).unwrap();
        let end = Time::from_millis(1414861882000).unwrap();
        let validity = Validity::new(start, end);
        assert!(validity.verify_at(start).is_ok());
        assert!(validity.verify_at(end).is_ok());
        assert!(validity.verify_at(start - TimeDelta::try_seconds(1).unwrap())
            .unwrap_err().is_too_new());
        assert!(!validity.verify_at(end + TimeDelta::try_seconds(1).unwrap())
            .unwrap_err().is_too_new());
    }

    #[test]
    fn object_id_from_str() {
        let oid = ObjectId::from_str("2.5.4.41").unwrap();
        assert_eq!(oid.as_slice(), b"\x55\x04\x29");
        assert_eq!(oid, crate::oid::AT_NAME);
        assert_eq!(
            ObjectId::from_str("1.3.6.1.5.32.1").unwrap().as_slice(),
            b"\x2b\x06\x01\x05\x20\x01"
        );
        assert_eq!(
            ObjectId::from_str("1.2.840.113549.1.1.1").unwrap(),
            crate::oid::RSA_ENCRYPTION
        );
        assert!(ObjectId::from_str("").is_err());
        assert!(ObjectId::from_str("2").is_err());
        assert!(ObjectId::from_str("3.1").is_err());
        assert!(ObjectId::from_str("1.40").is_err());
        assert!(ObjectId::from_str("1..2").is_err());
        assert!(ObjectId::from_str("1.2.x").is_err());
    }

    #[test]
    fn object_id_display() {
        for s in ["2.5.4.41", "1.3.6.1.5.32.1", "1.2.840.10045.3.1.7",
                  "2.999.3", "0.0"] {
            assert_eq!(ObjectId::from_str(s).unwrap().to_string(), s);
        }
        assert_eq!(
            ObjectId::from_oid(&crate::oid::SHA256).to_string(),
            "2.16.840.1.101.3.4.2.1"
        );
    }

    #[test]
    fn text_encode_and_take() {
        let mut target = Vec::new();
        encode_text("TEST NAME").write_encoded(Mode::Der, &mut target)
            .unwrap();
        assert_eq!(target, b"\x13\x09TEST NAME".as_ref());

        let mut target = Vec::new();
        encode_text("größe").write_encoded(Mode::Der, &mut target).unwrap();
        assert_eq!(target[0], 0x0c);
        assert_eq!(
            Mode::Der.decode(target.as_slice(), take_text).unwrap(),
            "größe"
        );
        assert!(
            Mode::Der.decode(b"\x04\x01a".as_ref(), take_text).is_err()
        );
    }
}
