//! EDNS options to signal the trust anchor key used in DNSSEC validation.
//!
//! The option in this module – [`KeyTag`] – is used by validating resolvers
//! when querying for DNSKEY records to indicate the key tags of the trust
//! anchor keys they will be using when validating responses.
//!
//! The option is defined in [RFC 8145](https://tools.ietf.org/html/rfc8145).

use super::super::iana::OptionCode;
use super::super::wire::{Compose, ComposeError, Parse, ParseError};
use super::{ComposeOptData, OptData, ParseOptData};
use core::fmt;
use octseq::builder::OctetsBuilder;
use octseq::parse::Parser;
use std::vec::Vec;

//------------ KeyTag -------------------------------------------------------

/// Option data for the edns-key-tag option.
///
/// The option contains a sequence of 16 bit key tags packed back to back.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct KeyTag(Vec<u16>);

impl KeyTag {
    /// The option code for this option.
    pub(super) const CODE: OptionCode = OptionCode::KEY_TAG;

    /// Creates a new value from a list of key tags.
    #[must_use]
    pub fn new(tags: Vec<u16>) -> Self {
        KeyTag(tags)
    }

    /// Returns the key tags.
    pub fn tags(&self) -> &[u16] {
        &self.0
    }

    /// Parses a value from its wire format.
    ///
    /// The data needs to be an even number of octets long.
    pub fn parse(parser: &mut Parser<'_, [u8]>) -> Result<Self, ParseError> {
        if parser.remaining() % 2 != 0 {
            return Err(ParseError::form_error("invalid key tag length"));
        }
        let mut tags = Vec::with_capacity(parser.remaining() / 2);
        while parser.remaining() > 0 {
            tags.push(u16::parse(parser)?);
        }
        Ok(KeyTag(tags))
    }
}

//--- From

impl From<Vec<u16>> for KeyTag {
    fn from(tags: Vec<u16>) -> Self {
        KeyTag(tags)
    }
}

//--- OptData

impl OptData for KeyTag {
    fn code(&self) -> OptionCode {
        Self::CODE
    }
}

impl ParseOptData for KeyTag {
    fn parse_option(
        code: OptionCode,
        parser: &mut Parser<'_, [u8]>,
    ) -> Result<Option<Self>, ParseError> {
        if code == Self::CODE {
            Self::parse(parser).map(Some)
        } else {
            Ok(None)
        }
    }
}

impl ComposeOptData for KeyTag {
    fn compose_len(&self) -> usize {
        self.0.len() * 2
    }

    fn compose_option<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError> {
        self.0.iter().try_for_each(|tag| tag.compose(target))
    }
}

//--- Display

impl fmt::Display for KeyTag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut first = true;

        for v in &self.0 {
            if first {
                write!(f, "{:#06x}", v)?;
                first = false;
            } else {
                write!(f, ", {:#06x}", v)?;
            }
        }

        Ok(())
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn wire() {
        let tags = KeyTag::new(vec![0x4f66, 0x0014]);
        let mut buf = Vec::new();
        tags.compose_option(&mut buf).unwrap();
        assert_eq!(buf, b"\x4f\x66\x00\x14");
        assert_eq!(tags.compose_len(), 4);
        assert_eq!(KeyTag::parse(&mut Parser::from_ref(buf.as_slice())), Ok(tags));
        assert!(KeyTag::parse(&mut Parser::from_ref(&b"\x01\x02\x03"[..])).is_err());
    }

    #[test]
    fn display() {
        assert_eq!(KeyTag::new(vec![20326, 1]).to_string(), "0x4f66, 0x0001");
    }
}
