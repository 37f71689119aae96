//! Hierarchical names.
//!
//! Every piece of named data is identified by a [`Name`], an ordered
//! sequence of [`Component`]s each of which is an arbitrary octet sequence.
//! Names are written as URIs: components are separated by slashes and
//! octets outside the unreserved characters of RFC 3986 are
//! percent-encoded. A component consisting only of periods gets three
//! additional periods so that `.` and `..` keep their usual meaning and the
//! empty component can be written as `...`.

use std::{error, fmt, ops, slice, str};
use bytes::Bytes;


//------------ Component -----------------------------------------------------

/// A single component of a name.
#[derive(Clone, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Component(Bytes);

impl Component {
    pub fn from_bytes(bytes: Bytes) -> Self {
        Component(bytes)
    }

    pub fn from_slice(slice: &[u8]) -> Self {
        Component(Bytes::copy_from_slice(slice))
    }

    pub fn as_slice(&self) -> &[u8] {
        self.0.as_ref()
    }

    pub fn into_bytes(self) -> Bytes {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parses a single component from its URI representation.
    pub fn from_uri(s: &str) -> Result<Self, NameError> {
        let s = s.as_bytes();
        if s.iter().all(|&ch| ch == b'.') {
            if s.len() < 3 {
                return Err(NameError::InvalidComponent)
            }
            return Ok(Component::from_slice(&s[3..]))
        }
        let mut res = Vec::with_capacity(s.len());
        let mut iter = s.iter();
        while let Some(&ch) = iter.next() {
            if ch == b'%' {
                let hi = iter.next().and_then(|&ch| hex_value(ch));
                let lo = iter.next().and_then(|&ch| hex_value(ch));
                match (hi, lo) {
                    (Some(hi), Some(lo)) => res.push(hi << 4 | lo),
                    _ => return Err(NameError::InvalidEscape)
                }
            }
            else {
                res.push(ch)
            }
        }
        Ok(Component(res.into()))
    }
}


//--- From

impl From<&str> for Component {
    fn from(s: &str) -> Self {
        Component::from_slice(s.as_bytes())
    }
}

impl From<&[u8]> for Component {
    fn from(s: &[u8]) -> Self {
        Component::from_slice(s)
    }
}

impl From<Bytes> for Component {
    fn from(bytes: Bytes) -> Self {
        Component(bytes)
    }
}


//--- AsRef

impl AsRef<[u8]> for Component {
    fn as_ref(&self) -> &[u8] {
        self.0.as_ref()
    }
}


//--- Display and Debug

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.0.iter().all(|&ch| ch == b'.') {
            f.write_str("...")?;
        }
        for &ch in self.0.iter() {
            if is_unreserved(ch) {
                write!(f, "{}", ch as char)?;
            }
            else {
                write!(f, "%{:02X}", ch)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Component({})", self)
    }
}


//------------ Name ----------------------------------------------------------

/// A hierarchical name.
///
/// The empty name is written as `/`.
#[derive(Clone, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Name {
    components: Vec<Component>,
}

impl Name {
    /// Creates a new, empty name.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_components(components: Vec<Component>) -> Self {
        Name { components }
    }

    /// Appends a component and returns the name for chaining.
    pub fn append(mut self, component: impl Into<Component>) -> Self {
        self.push(component);
        self
    }

    pub fn push(&mut self, component: impl Into<Component>) {
        self.components.push(component.into())
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&Component> {
        self.components.get(idx)
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn iter(&self) -> slice::Iter<Component> {
        self.components.iter()
    }

    /// Returns a name made of the first `len` components.
    ///
    /// If the name is shorter than `len`, the whole name is returned.
    pub fn prefix(&self, len: usize) -> Name {
        Name {
            components: self.components.iter().take(len).cloned().collect()
        }
    }

    /// Returns whether this name is a prefix of `other`.
    ///
    /// A name is a prefix of itself and the empty name is a prefix of
    /// every name.
    pub fn is_prefix_of(&self, other: &Name) -> bool {
        self.len() <= other.len()
            && self.components.iter().zip(other.components.iter())
                .all(|(left, right)| left == right)
    }
}


//--- FromStr

impl str::FromStr for Name {
    type Err = NameError;

    /// Parses a name from its URI representation.
    ///
    /// An optional `ndn:` scheme is accepted. Empty components produced by
    /// repeated or trailing slashes are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix("ndn:").unwrap_or(s);
        if s.contains(['?', '#']) {
            return Err(NameError::InvalidCharacter)
        }
        let mut res = Name::new();
        for part in s.split('/').filter(|part| !part.is_empty()) {
            res.push(Component::from_uri(part)?);
        }
        Ok(res)
    }
}


//--- Deref, AsRef, and IntoIterator

impl ops::Deref for Name {
    type Target = [Component];

    fn deref(&self) -> &Self::Target {
        &self.components
    }
}

impl AsRef<[Component]> for Name {
    fn as_ref(&self) -> &[Component] {
        &self.components
    }
}

impl<'a> IntoIterator for &'a Name {
    type Item = &'a Component;
    type IntoIter = slice::Iter<'a, Component>;

    fn into_iter(self) -> Self::IntoIter {
        self.components.iter()
    }
}

impl FromIterator<Component> for Name {
    fn from_iter<I: IntoIterator<Item = Component>>(iter: I) -> Self {
        Name { components: iter.into_iter().collect() }
    }
}


//--- Display and Debug

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.components.is_empty() {
            return f.write_str("/")
        }
        for component in &self.components {
            write!(f, "/{}", component)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Name({})", self)
    }
}


//--- Deserialize and Serialize

#[cfg(feature = "serde")]
impl serde::Serialize for Name {
    fn serialize<S: serde::Serializer>(
        &self, serializer: S
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Name {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D
    ) -> Result<Self, D::Error> {
        use serde::de;

        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}


//------------ Helper Functions ----------------------------------------------

fn is_unreserved(ch: u8) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, b'-' | b'.' | b'_' | b'~')
}

fn hex_value(ch: u8) -> Option<u8> {
    match ch {
        b'0'..=b'9' => Some(ch - b'0'),
        b'a'..=b'f' => Some(ch - b'a' + 10),
        b'A'..=b'F' => Some(ch - b'A' + 10),
        _ => None
    }
}


//------------ NameError -----------------------------------------------------

/// A string is not a valid name.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NameError {
    /// A percent sign isn’t followed by two hex digits.
    InvalidEscape,

    /// A component is `.` or `..`.
    InvalidComponent,

    /// The name contains a query or fragment.
    InvalidCharacter,
}

impl fmt::Display for NameError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match *self {
            NameError::InvalidEscape => "invalid percent-encoding in name",
            NameError::InvalidComponent => "invalid name component",
            NameError::InvalidCharacter => "invalid character in name",
        })
    }
}

impl error::Error for NameError { }


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn parse_and_display() {
        assert_eq!(Name::new().to_string(), "/");
        assert_eq!(Name::from_str("/").unwrap(), Name::new());
        assert_eq!(Name::from_str("").unwrap(), Name::new());

        let name = Name::from_str("/tmp").unwrap();
        assert_eq!(name.len(), 1);
        assert_eq!(name.to_string(), "/tmp");

        let name = Name::from_str("ndn:/example/ndn/information").unwrap();
        assert_eq!(name, Name::new().append("example").append("ndn")
            .append("information"));
        assert_eq!(name.to_string(), "/example/ndn/information");

        assert_eq!(
            Name::from_str("//a///b/").unwrap().to_string(),
            "/a/b"
        );
    }

    #[test]
    fn percent_encoding() {
        let name = Name::new().append("hello world").append(&b"\x00\xff"[..]);
        assert_eq!(name.to_string(), "/hello%20world/%00%FF");
        assert_eq!(Name::from_str("/hello%20world/%00%ff").unwrap(), name);
        assert_eq!(
            Name::from_str("/a%2Fb").unwrap().get(0).unwrap().as_slice(),
            b"a/b"
        );
        assert_eq!(
            Name::from_str("/%4").unwrap_err(), NameError::InvalidEscape
        );
        assert_eq!(
            Name::from_str("/%zz").unwrap_err(), NameError::InvalidEscape
        );
    }

    #[test]
    fn period_components() {
        let name = Name::new().append("").append(".").append("..");
        assert_eq!(name.to_string(), "/.../..../.....");
        assert_eq!(Name::from_str("/.../..../.....").unwrap(), name);
        assert_eq!(
            Name::from_str("/a/./b").unwrap_err(), NameError::InvalidComponent
        );
        assert_eq!(
            Name::from_str("/a/../b").unwrap_err(),
            NameError::InvalidComponent
        );
        assert!(Name::from_str("/a?b").is_err());
    }

    #[test]
    fn prefixes() {
        let name = Name::from_str("/example/penguin/information").unwrap();
        let prefix = Name::from_str("/example/penguin").unwrap();
        assert!(prefix.is_prefix_of(&name));
        assert!(name.is_prefix_of(&name));
        assert!(Name::new().is_prefix_of(&name));
        assert!(!name.is_prefix_of(&prefix));
        assert!(
            !Name::from_str("/example/ndn").unwrap().is_prefix_of(&name)
        );
        assert_eq!(name.prefix(2), prefix);
        assert_eq!(name.prefix(5), name);
    }

    #[test]
    #[cfg(feature = "serde")]
    fn serde_name() {
        let name = Name::from_str("/a/b%20c").unwrap();
        let json = serde_json::to_string(&name).unwrap();
        assert_eq!(json, "\"/a/b%20c\"");
        assert_eq!(serde_json::from_str::<Name>(&json).unwrap(), name);
    }
}
