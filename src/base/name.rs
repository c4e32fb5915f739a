//! Domain names.
//!
//! Names are kept in their presentation form as a sequence of labels
//! separated by dots, without a leading or trailing dot. The root name is
//! the empty sequence and is displayed as a single dot.
//!
//! On the wire, names are a sequence of length-prefixed labels terminated
//! by the empty root label. When parsing, compression pointers are followed
//! as long as they point to an earlier position in the message. When
//! composing, names are always written uncompressed.

use super::wire::{Compose, ComposeError, FormError, Parse, ParseError};
use core::{fmt, str};
use octseq::builder::OctetsBuilder;
use octseq::parse::Parser;
use std::string::String;

//------------ Name ----------------------------------------------------------

/// A domain name.
#[derive(Clone, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Name(String);

impl Name {
    /// The maximum length of a name in wire format.
    pub const MAX_LEN: usize = 255;

    /// The maximum length of a single label.
    pub const MAX_LABEL_LEN: usize = 63;

    /// Returns the root name.
    #[must_use]
    pub fn root() -> Self {
        Name(String::new())
    }

    /// Returns whether this is the root name.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the name as a dot-separated string without trailing dot.
    ///
    /// The root name is the empty string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns an iterator over the labels of the name.
    ///
    /// The root label is not included, so the root name has no labels.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.0.split('.').filter(|label| !label.is_empty())
    }

    /// Returns the number of labels, not counting the root label.
    pub fn label_count(&self) -> usize {
        self.labels().count()
    }
}

//--- FromStr

impl str::FromStr for Name {
    type Err = NameError;

    /// Creates a name from its dot-separated representation.
    ///
    /// A single leading and a single trailing dot are ignored. Both `""`
    /// and `"."` denote the root.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.strip_prefix('.').unwrap_or(s);
        let s = s.strip_suffix('.').unwrap_or(s);
        if s.is_empty() {
            return Ok(Name::root());
        }
        for label in s.split('.') {
            if label.is_empty() {
                return Err(NameError::EmptyLabel);
            }
            if label.len() > Name::MAX_LABEL_LEN {
                return Err(NameError::LongLabel);
            }
        }
        if s.len() + 2 > Name::MAX_LEN {
            return Err(NameError::LongName);
        }
        Ok(Name(s.into()))
    }
}

//--- Compose and Parse

impl Compose for Name {
    fn compose_len(&self) -> usize {
        self.labels().map(|label| label.len() + 1).sum::<usize>() + 1
    }

    fn compose<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError> {
        for label in self.labels() {
            // Labels decoded from non-UTF-8 data may have grown.
            let len = u8::try_from(label.len())
                .ok()
                .filter(|len| usize::from(*len) <= Name::MAX_LABEL_LEN)
                .ok_or(ComposeError::LongData)?;
            target.append_slice(&[len])?;
            target.append_slice(label.as_bytes())?;
        }
        target.append_slice(&[0])?;
        Ok(())
    }
}

impl Parse for Name {
    fn parse(parser: &mut Parser<'_, [u8]>) -> Result<Self, ParseError> {
        let mut res = NameBuilder::default();

        // Phase One: No compression pointers have been found yet.
        //
        // Labels are taken straight from the parser. If we encounter the
        // root label, we are done.
        let mut ptr = loop {
            match LabelType::parse(parser)? {
                LabelType::Normal(0) => return Ok(res.finish()),
                LabelType::Normal(len) => res.push(parser, len)?,
                LabelType::Compressed(ptr) => break ptr,
            }
        };

        // Phase Two: Compression has occured.
        //
        // The actual parser has reached the end of the name, so we continue
        // on a copy of it which we can move around freely.
        let mut parser = *parser;
        loop {
            // The pointer must point to before the pointer itself. Together
            // with the name length limit this guarantees termination.
            if ptr >= parser.pos() - 2 {
                return Err(
                    FormError::new("compression pointer points forward")
                        .into(),
                );
            }
            parser.seek(ptr)?;
            loop {
                match LabelType::parse(&mut parser)? {
                    LabelType::Normal(0) => return Ok(res.finish()),
                    LabelType::Normal(len) => res.push(&mut parser, len)?,
                    LabelType::Compressed(new_ptr) => {
                        ptr = new_ptr;
                        break;
                    }
                }
            }
        }
    }
}

//--- Display

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_root() {
            f.write_str(".")
        } else {
            f.write_str(&self.0)
        }
    }
}

//------------ NameBuilder ---------------------------------------------------

/// Collects labels while parsing and keeps track of the wire length.
#[derive(Default)]
struct NameBuilder {
    name: String,

    /// The wire length so far, not counting the root label.
    wire_len: usize,
}

impl NameBuilder {
    fn push(
        &mut self,
        parser: &mut Parser<'_, [u8]>,
        len: usize,
    ) -> Result<(), ParseError> {
        self.wire_len += len + 1;
        if self.wire_len + 1 > Name::MAX_LEN {
            return Err(FormError::new("long domain name").into());
        }
        let label = parser.peek(len)?;
        // The text form can’t express a dot inside a label.
        if label.contains(&b'.') {
            return Err(FormError::new("dot inside label").into());
        }
        if !self.name.is_empty() {
            self.name.push('.');
        }
        self.name.push_str(&String::from_utf8_lossy(label));
        parser.advance(len)?;
        Ok(())
    }

    fn finish(self) -> Name {
        Name(self.name)
    }
}

//------------ LabelType -----------------------------------------------------

/// The type of a label.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum LabelType {
    /// A normal label with its size in octets.
    Normal(usize),

    /// A compressed label with the position of where to continue.
    Compressed(usize),
}

impl LabelType {
    /// Attempts to take a label type from the beginning of `parser`.
    fn parse(parser: &mut Parser<'_, [u8]>) -> Result<Self, ParseError> {
        let ltype = parser.parse_u8()?;
        match ltype {
            0..=0x3F => Ok(LabelType::Normal(ltype.into())),
            0xC0..=0xFF => {
                let res = usize::from(parser.parse_u8()?);
                let res = res | ((usize::from(ltype) & 0x3F) << 8);
                Ok(LabelType::Compressed(res))
            }
            _ => Err(FormError::new("invalid label type").into()),
        }
    }
}

//------------ NameError -----------------------------------------------------

/// A domain name could not be created from a string.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NameError {
    /// The name contained an empty label.
    EmptyLabel,

    /// A label was longer than 63 octets.
    LongLabel,

    /// The name was longer than 255 octets in wire format.
    LongName,
}

impl fmt::Display for NameError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match *self {
            NameError::EmptyLabel => "empty label",
            NameError::LongLabel => "long label",
            NameError::LongName => "long domain name",
        })
    }
}

impl std::error::Error for NameError {}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::wire::{decode, encode};

    fn name(s: &str) -> Name {
        s.parse().unwrap()
    }

    #[test]
    fn from_str() {
        assert_eq!(name("example.com").as_str(), "example.com");
        assert_eq!(name("example.com."), name("example.com"));
        assert_eq!(name(".example.com"), name("example.com"));
        assert!(name(".").is_root());
        assert!(name("").is_root());
        assert_eq!("a..b".parse::<Name>(), Err(NameError::EmptyLabel));
        assert_eq!(
            "x".repeat(64).parse::<Name>(),
            Err(NameError::LongLabel)
        );
        let long = vec!["a".repeat(63); 4].join(".");
        assert_eq!(long.parse::<Name>(), Err(NameError::LongName));
        let fits = [&"a".repeat(63)[..], &"a".repeat(63), &"a".repeat(63),
                    &"a".repeat(61)].join(".");
        assert_eq!(name(&fits).compose_len(), 255);
    }

    #[test]
    fn display_and_labels() {
        assert_eq!(Name::root().to_string(), ".");
        assert_eq!(name("www.example.com").to_string(), "www.example.com");
        assert_eq!(
            name("www.example.com").labels().collect::<Vec<_>>(),
            ["www", "example", "com"]
        );
        assert_eq!(Name::root().label_count(), 0);
    }

    #[test]
    fn compose() {
        assert_eq!(encode(&Name::root()).unwrap(), b"\0");
        assert_eq!(
            encode(&name("www.example.com")).unwrap(),
            b"\x03www\x07example\x03com\0"
        );
        assert_eq!(name("www.example.com").compose_len(), 17);
    }

    #[test]
    fn parse_uncompressed() {
        let buf = b"\x03www\x07example\x03com\0\x05";
        assert_eq!(decode::<Name>(buf, 0), Ok((name("www.example.com"), 17)));
        assert_eq!(decode::<Name>(b"\0", 0), Ok((Name::root(), 1)));
        assert_eq!(
            decode::<Name>(b"\x03www\x07exam", 0),
            Err(ParseError::ShortInput)
        );
    }

    #[test]
    fn parse_compressed() {
        // "example.com" at 0, "www" + pointer to 0 at 13.
        let buf = b"\x07example\x03com\0\x03www\xc0\x00\xc0\x0d";
        assert_eq!(decode::<Name>(buf, 13), Ok((name("www.example.com"), 6)));
        // A pointer alone consumes exactly two octets, however many
        // jumps it leads to.
        assert_eq!(decode::<Name>(buf, 19), Ok((name("www.example.com"), 2)));
    }

    #[test]
    fn parse_bad_pointers() {
        // Points to itself.
        assert!(matches!(
            decode::<Name>(b"\xc0\x00", 0),
            Err(ParseError::Form(_))
        ));
        // Points forward.
        assert!(matches!(
            decode::<Name>(b"\xc0\x02\x00", 0),
            Err(ParseError::Form(_))
        ));
        // A pointer to an earlier pointer is fine.
        assert_eq!(
            decode::<Name>(b"\x01a\x00\xc0\x00\xc0\x03", 5),
            Ok((name("a"), 2))
        );
        // A label followed by a pointer back to the label loops.
        assert!(matches!(
            decode::<Name>(b"\x01a\xc0\x04\xc0\x00", 4),
            Err(ParseError::Form(_))
        ));
    }

    #[test]
    fn parse_bad_label_type() {
        assert!(matches!(
            decode::<Name>(b"\x40abc", 0),
            Err(ParseError::Form(_))
        ));
        assert!(matches!(
            decode::<Name>(b"\x80abc", 0),
            Err(ParseError::Form(_))
        ));
    }

    #[test]
    fn parse_long_name() {
        let mut buf = Vec::new();
        for _ in 0..5 {
            buf.push(63);
            buf.extend_from_slice(&[b'a'; 63]);
        }
        buf.push(0);
        assert!(matches!(decode::<Name>(&buf, 0), Err(ParseError::Form(_))));
    }

    #[test]
    fn parse_dot_in_label() {
        assert!(matches!(
            decode::<Name>(b"\x01.\x00", 0),
            Err(ParseError::Form(_))
        ));
        assert!(matches!(
            decode::<Name>(b"\x03a.b\x00", 0),
            Err(ParseError::Form(_))
        ));
        // Also behind a compression pointer.
        assert!(matches!(
            decode::<Name>(b"\x03a.b\x00\x01x\xc0\x00", 5),
            Err(ParseError::Form(_))
        ));
    }

    #[test]
    fn compose_len_matches_output() {
        for text in ["", "a", "www.example.com", "\u{fffd}.example"] {
            let owner = name(text);
            assert_eq!(encode(&owner).unwrap().len(), owner.compose_len());
        }
        let (res, _) = decode::<Name>(b"\x02\xff\xfe\x03com\0", 0).unwrap();
        assert_eq!(encode(&res).unwrap().len(), res.compose_len());
    }

    #[test]
    fn lossy_labels() {
        let (res, _) = decode::<Name>(b"\x02\xff\xfe\0", 0).unwrap();
        assert_eq!(res.as_str(), "\u{fffd}\u{fffd}");
    }
}
