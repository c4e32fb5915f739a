//! Record data from [RFC 7553]: URI records.
//!
//! [RFC 7553]: https://tools.ietf.org/html/rfc7553

use crate::base::iana::Rtype;
use crate::base::rdata::{ComposeRecordData, ParseRecordData, RecordData};
use crate::base::wire::{
    parse_remaining, Compose, ComposeError, Parse, ParseError,
};
use bytes::Bytes;
use core::fmt;
use octseq::builder::OctetsBuilder;
use octseq::parse::Parser;

//------------ Uri ----------------------------------------------------------

/// Uri record data.
///
/// The record publishes a mapping from the owner name to a URI. The target
/// URI is stored as is without a length prefix and takes up the rest of
/// the record data.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Uri {
    priority: u16,
    weight: u16,
    target: Bytes,
}

impl Uri {
    /// The rtype of this record data type.
    pub(crate) const RTYPE: Rtype = Rtype::URI;

    #[must_use]
    pub fn new(priority: u16, weight: u16, target: Bytes) -> Self {
        Uri {
            priority,
            weight,
            target,
        }
    }

    pub fn priority(&self) -> u16 {
        self.priority
    }

    pub fn weight(&self) -> u16 {
        self.weight
    }

    /// Returns the raw octets of the target URI.
    pub fn target(&self) -> &Bytes {
        &self.target
    }

    pub fn parse(parser: &mut Parser<'_, [u8]>) -> Result<Self, ParseError> {
        Ok(Self::new(
            u16::parse(parser)?,
            u16::parse(parser)?,
            parse_remaining(parser)?,
        ))
    }
}

//--- FromStr

impl core::str::FromStr for Uri {
    type Err = IllegalUri;

    /// Creates URI data from its presentation format.
    ///
    /// This is the priority, the weight, and the target separated by white
    /// space. The target may be surrounded by double quotes.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let priority = parts.next().and_then(|p| p.parse().ok());
        let weight = parts.next().and_then(|w| w.parse().ok());
        let target = parts.next().map(|t| t.trim_matches('"'));
        match (priority, weight, target, parts.next()) {
            (Some(priority), Some(weight), Some(target), None) => {
                Ok(Uri::new(
                    priority,
                    weight,
                    Bytes::copy_from_slice(target.as_bytes()),
                ))
            }
            _ => Err(IllegalUri(())),
        }
    }
}

//--- RecordData, ParseRecordData, ComposeRecordData

impl RecordData for Uri {
    fn rtype(&self) -> Rtype {
        Uri::RTYPE
    }
}

impl ParseRecordData for Uri {
    fn parse_rdata(
        rtype: Rtype,
        parser: &mut Parser<'_, [u8]>,
    ) -> Result<Option<Self>, ParseError> {
        if rtype == Uri::RTYPE {
            Self::parse(parser).map(Some)
        } else {
            Ok(None)
        }
    }
}

impl ComposeRecordData for Uri {
    fn rdlen(&self) -> usize {
        4 + self.target.len()
    }

    fn compose_rdata<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError> {
        self.priority.compose(target)?;
        self.weight.compose(target)?;
        target.append_slice(self.target.as_ref())?;
        Ok(())
    }
}

//--- Display

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {} \"{}\"",
            self.priority,
            self.weight,
            String::from_utf8_lossy(self.target.as_ref())
        )
    }
}

//============ Error Types =================================================

/// URI record data could not be parsed from its text representation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct IllegalUri(());

impl fmt::Display for IllegalUri {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("illegal URI record data")
    }
}

impl std::error::Error for IllegalUri {}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::rdata::test::test_compose_parse;
    use crate::base::rdata::{decode_rdata, encode_rdata};

    #[test]
    fn uri_compose_parse() {
        let rdata: Uri = "10 1 \"ftp://ftp1.example.com/public\""
            .parse()
            .unwrap();
        test_compose_parse(&rdata);
        assert_eq!(rdata.target().as_ref(), b"ftp://ftp1.example.com/public");
        assert_eq!(
            rdata.to_string(),
            "10 1 \"ftp://ftp1.example.com/public\""
        );
    }

    #[test]
    fn uri_from_str_errors() {
        assert_eq!("10 \"x\"".parse::<Uri>(), Err(IllegalUri(())));
        assert_eq!("x 1 \"y\"".parse::<Uri>(), Err(IllegalUri(())));
        assert_eq!("1 2 \"y\" z".parse::<Uri>(), Err(IllegalUri(())));
        assert_eq!("".parse::<Uri>(), Err(IllegalUri(())));
        assert_eq!(
            IllegalUri(()).to_string(),
            "illegal URI record data"
        );
    }

    #[test]
    fn uri_length_from_rdlen() {
        let buf = b"\x00\x07\x00\x01\x00\x02abcXYZ";
        let (rdata, consumed) =
            decode_rdata::<Uri>(Rtype::URI, buf, 0).unwrap();
        assert_eq!(rdata.target().as_ref(), b"abc");
        assert_eq!(consumed, 9);
        assert_eq!(encode_rdata(&rdata).unwrap(), &buf[..9]);
    }
}
