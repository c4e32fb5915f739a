//! Record data for the TXT record.
//!
//! This is a private module. It’s content is re-exported by the parent.

use crate::base::charstr::CharStr;
use crate::base::iana::Rtype;
use crate::base::rdata::{ComposeRecordData, ParseRecordData, RecordData};
use crate::base::wire::{Compose, ComposeError, Parse, ParseError};
use bytes::Bytes;
use core::{fmt, slice};
use octseq::builder::OctetsBuilder;
use octseq::parse::Parser;

//------------ Txt ----------------------------------------------------------

/// TXT record data.
///
/// TXT records hold descriptive text. While it may appear as a single text,
/// it internally consists of a sequence of one or more
/// [character strings][CharStr]. Records with an empty sequence are
/// accepted, too.
///
/// The TXT record type is defined in [RFC 1035, section 3.3.14].
///
/// # `Display`
///
/// The `Display` implementation prints the sequence of character strings in
/// their quoted presentation format separated by a single space.
///
/// [RFC 1035, section 3.3.14]: https://tools.ietf.org/html/rfc1035#section-3.3.14
#[derive(Clone, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Txt(Vec<CharStr>);

impl Txt {
    /// The rtype of this record data type.
    pub(crate) const RTYPE: Rtype = Rtype::TXT;

    /// Creates a new Txt record from a single slice.
    ///
    /// If the slice is longer than 255 octets, it will be broken up into
    /// multiple character strings where all but the last string will be
    /// 255 octets long. An empty slice results in a single empty character
    /// string.
    #[must_use]
    pub fn build_from_slice(text: &[u8]) -> Self {
        if text.is_empty() {
            return Txt(vec![CharStr::empty()]);
        }
        Txt(text
            .chunks(CharStr::MAX_LEN)
            .map(|chunk| {
                // Chunks are never longer than a character string.
                CharStr::from_slice(chunk).unwrap_or_default()
            })
            .collect())
    }

    /// Creates new TXT record data from a sequence of character strings.
    #[must_use]
    pub fn from_charstrs(strings: Vec<CharStr>) -> Self {
        Txt(strings)
    }

    /// Returns an iterator over the character strings.
    pub fn iter(&self) -> slice::Iter<'_, CharStr> {
        self.0.iter()
    }

    /// Returns the number of character strings.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether there are no character strings at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the content of all character strings concatenated.
    pub fn text(&self) -> Bytes {
        let mut res = Vec::with_capacity(
            self.0.iter().map(CharStr::len).sum()
        );
        for s in &self.0 {
            res.extend_from_slice(s.as_slice());
        }
        res.into()
    }

    /// Parses character strings until the parser is exhausted.
    pub fn parse(parser: &mut Parser<'_, [u8]>) -> Result<Self, ParseError> {
        let mut res = Vec::new();
        while parser.remaining() > 0 {
            res.push(CharStr::parse(parser)?);
        }
        Ok(Txt(res))
    }
}

//--- From and IntoIterator

impl From<Vec<CharStr>> for Txt {
    fn from(strings: Vec<CharStr>) -> Self {
        Txt(strings)
    }
}

impl From<CharStr> for Txt {
    fn from(s: CharStr) -> Self {
        Txt(vec![s])
    }
}

impl<'a> IntoIterator for &'a Txt {
    type Item = &'a CharStr;
    type IntoIter = slice::Iter<'a, CharStr>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

//--- RecordData, ParseRecordData, ComposeRecordData

impl RecordData for Txt {
    fn rtype(&self) -> Rtype {
        Txt::RTYPE
    }
}

impl ParseRecordData for Txt {
    fn parse_rdata(
        rtype: Rtype,
        parser: &mut Parser<'_, [u8]>,
    ) -> Result<Option<Self>, ParseError> {
        if rtype == Txt::RTYPE {
            Self::parse(parser).map(Some)
        } else {
            Ok(None)
        }
    }
}

impl ComposeRecordData for Txt {
    fn rdlen(&self) -> usize {
        self.0.iter().map(|s| s.compose_len()).sum()
    }

    fn compose_rdata<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError> {
        self.0.iter().try_for_each(|s| s.compose(target))
    }
}

//--- Display

impl fmt::Display for Txt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut first = true;
        for s in &self.0 {
            if !first {
                f.write_str(" ")?;
            } else {
                first = false;
            }
            write!(f, "\"{}\"", s)?;
        }
        Ok(())
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::rdata::test::test_compose_parse;
    use crate::base::rdata::{decode_rdata, encode_rdata};

    #[test]
    fn txt_compose_parse() {
        let rdata = Txt::from_charstrs(vec![
            "v=spf1 -all".parse().unwrap(),
            CharStr::empty(),
            "x".parse().unwrap(),
        ]);
        test_compose_parse(&rdata);
        assert_eq!(rdata.to_string(), "\"v=spf1 -all\" \"\" \"x\"");
        assert_eq!(
            encode_rdata(&Txt::build_from_slice(b"ab")).unwrap(),
            b"\x00\x03\x02ab"
        );
    }

    #[test]
    fn build_from_long_slice() {
        let text = vec![b'a'; 600];
        let rdata = Txt::build_from_slice(&text);
        assert_eq!(
            rdata.iter().map(CharStr::len).collect::<Vec<_>>(),
            [255, 255, 90]
        );
        assert_eq!(rdata.text().as_ref(), text.as_slice());
        test_compose_parse(&rdata);
        assert_eq!(Txt::build_from_slice(b"").len(), 1);
    }

    #[test]
    fn parse_truncated_string() {
        assert_eq!(
            decode_rdata::<Txt>(Rtype::TXT, b"\x00\x03\x05ab", 0),
            Err(ParseError::ShortInput)
        );
        let (rdata, _) = decode_rdata::<Txt>(Rtype::TXT, b"\x00\x00", 0).unwrap();
        assert!(rdata.is_empty());
    }
}
