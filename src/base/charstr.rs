//! Character strings.
//!
//! A character string is a sequence of up to 255 octets prefixed by a
//! single length octet. It is used by a number of record types, most
//! prominently TXT.

use super::wire::{parse_bytes, Compose, ComposeError, Parse, ParseError};
use bytes::Bytes;
use core::{fmt, str};
use octseq::builder::OctetsBuilder;
use octseq::parse::Parser;

//------------ CharStr -------------------------------------------------------

/// The content of a DNS character string.
///
/// The type guarantees that the content is no longer than 255 octets.
#[derive(Clone, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct CharStr(Bytes);

impl CharStr {
    /// The maximum length of the content.
    pub const MAX_LEN: usize = 255;

    /// Creates an empty character string.
    #[must_use]
    pub fn empty() -> Self {
        CharStr(Bytes::new())
    }

    /// Creates a character string from a bytes value.
    pub fn from_octets(octets: Bytes) -> Result<Self, CharStrError> {
        if octets.len() > CharStr::MAX_LEN {
            Err(CharStrError)
        } else {
            Ok(CharStr(octets))
        }
    }

    /// Creates a character string from a copy of an octets slice.
    pub fn from_slice(slice: &[u8]) -> Result<Self, CharStrError> {
        CharStr::from_octets(Bytes::copy_from_slice(slice))
    }

    /// Returns a reference to the content.
    pub fn as_slice(&self) -> &[u8] {
        self.0.as_ref()
    }

    /// Converts the character string into its content.
    pub fn into_octets(self) -> Bytes {
        self.0
    }

    /// Returns the length of the content.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether the content is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

//--- FromStr

impl str::FromStr for CharStr {
    type Err = CharStrError;

    /// Creates a character string from the UTF-8 encoding of a string.
    ///
    /// No escape sequences are interpreted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CharStr::from_slice(s.as_bytes())
    }
}

//--- AsRef

impl AsRef<[u8]> for CharStr {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

//--- Compose and Parse

impl Compose for CharStr {
    fn compose_len(&self) -> usize {
        self.0.len() + 1
    }

    fn compose<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError> {
        // The length is checked upon creation.
        target.append_slice(&[self.0.len() as u8])?;
        target.append_slice(self.0.as_ref())?;
        Ok(())
    }
}

impl Parse for CharStr {
    fn parse(parser: &mut Parser<'_, [u8]>) -> Result<Self, ParseError> {
        let len = usize::from(parser.parse_u8()?);
        parse_bytes(parser, len).map(CharStr)
    }
}

//--- Display and Debug

impl fmt::Display for CharStr {
    /// Formats the content with non-printable octets escaped.
    ///
    /// Printable ASCII is written as is, except for the backslash and
    /// double quote which are escaped with a backslash. Everything else is
    /// written as a backslash followed by three decimal digits.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for &ch in self.0.as_ref() {
            match ch {
                b'\\' | b'"' => write!(f, "\\{}", ch as char)?,
                0x20..=0x7E => write!(f, "{}", ch as char)?,
                _ => write!(f, "\\{:03}", ch)?,
            }
        }
        Ok(())
    }
}

impl fmt::Debug for CharStr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("CharStr")
            .field(&format_args!("{}", self))
            .finish()
    }
}

//------------ CharStrError --------------------------------------------------

/// A byte sequence does not represent a valid character string.
///
/// This can only mean that the sequence is longer than 255 bytes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CharStrError;

impl fmt::Display for CharStrError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("character string with more than 255 octets")
    }
}

impl std::error::Error for CharStrError {}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::wire::{decode, encode};

    #[test]
    fn length_limit() {
        assert!(CharStr::from_slice(&[b'x'; 255]).is_ok());
        assert_eq!(CharStr::from_slice(&[b'x'; 256]), Err(CharStrError));
        assert_eq!("a".repeat(256).parse::<CharStr>(), Err(CharStrError));
    }

    #[test]
    fn wire() {
        let s: CharStr = "hello".parse().unwrap();
        assert_eq!(encode(&s).unwrap(), b"\x05hello");
        assert_eq!(decode::<CharStr>(b"\x05hello!", 0), Ok((s, 6)));
        assert_eq!(encode(&CharStr::empty()).unwrap(), b"\0");
        assert_eq!(
            decode::<CharStr>(b"\x06hello", 0),
            Err(ParseError::ShortInput)
        );
    }

    #[test]
    fn display() {
        let s = CharStr::from_slice(b"a \"b\"\\\x07\xff").unwrap();
        assert_eq!(s.to_string(), "a \\\"b\\\"\\\\\\007\\255");
        assert_eq!(format!("{:?}", CharStr::empty()), "CharStr()");
    }
}
