//! CAA record data.
//!
//! This is defined in [RFC 8659](https://www.rfc-editor.org/rfc/rfc8659).

use crate::base::charstr::CharStr;
use crate::base::iana::Rtype;
use crate::base::rdata::{ComposeRecordData, ParseRecordData, RecordData};
use crate::base::wire::{
    parse_remaining, Compose, ComposeError, Parse, ParseError,
};
use bytes::Bytes;
use core::fmt;
use octseq::builder::OctetsBuilder;
use octseq::parse::Parser;

//------------ Caa ---------------------------------------------------------

/// Caa record data.
///
/// The Certification Authority Authorization (CAA) DNS Resource Record allows
/// a DNS domain name holder to specify one or more Certification Authorities
/// (CAs) authorized to issue certificates for that domain name.
///
/// The value is not length prefixed. It takes up whatever is left of the
/// record data after the tag.
///
/// The Caa record type is defined in [RFC 8659, section 4.1][1].
///
/// [1]: https://www.rfc-editor.org/rfc/rfc8659#section-4.1
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Caa {
    flags: u8,
    tag: CharStr,
    value: Bytes,
}

impl Caa {
    /// The rtype of this record data type.
    pub(crate) const RTYPE: Rtype = Rtype::CAA;

    /// The issuer critical flag.
    pub const ISSUER_CRITICAL: u8 = 0x80;

    /// Create a new CAA record data.
    #[must_use]
    pub fn new(flags: u8, tag: CharStr, value: Bytes) -> Self {
        Caa { flags, tag, value }
    }

    /// Get the flags of the CAA record.
    pub fn flags(&self) -> u8 {
        self.flags
    }

    /// Returns whether the issuer critical flag is set.
    pub fn issuer_critical(&self) -> bool {
        self.flags & Self::ISSUER_CRITICAL != 0
    }

    /// Sets or clears the issuer critical flag.
    pub fn set_issuer_critical(&mut self, set: bool) {
        if set {
            self.flags |= Self::ISSUER_CRITICAL
        } else {
            self.flags &= !Self::ISSUER_CRITICAL
        }
    }

    /// Get the tag of the CAA record.
    pub fn tag(&self) -> &CharStr {
        &self.tag
    }

    /// Get the value of the CAA record.
    pub fn value(&self) -> &Bytes {
        &self.value
    }

    pub fn parse(parser: &mut Parser<'_, [u8]>) -> Result<Self, ParseError> {
        let flags = u8::parse(parser)?;
        let tag = CharStr::parse(parser)?;
        let value = parse_remaining(parser)?;
        Ok(Caa::new(flags, tag, value))
    }
}

//--- RecordData, ParseRecordData, ComposeRecordData

impl RecordData for Caa {
    fn rtype(&self) -> Rtype {
        Caa::RTYPE
    }
}

impl ParseRecordData for Caa {
    fn parse_rdata(
        rtype: Rtype,
        parser: &mut Parser<'_, [u8]>,
    ) -> Result<Option<Self>, ParseError> {
        if rtype == Caa::RTYPE {
            Self::parse(parser).map(Some)
        } else {
            Ok(None)
        }
    }
}

impl ComposeRecordData for Caa {
    fn rdlen(&self) -> usize {
        1 + self.tag.compose_len() + self.value.len()
    }

    fn compose_rdata<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError> {
        self.flags.compose(target)?;
        self.tag.compose(target)?;
        target.append_slice(self.value.as_ref())?;
        Ok(())
    }
}

//--- Display

impl fmt::Display for Caa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} \"", self.flags, self.tag)?;
        for &ch in self.value.as_ref() {
            match ch {
                b'\\' | b'"' => write!(f, "\\{}", ch as char)?,
                0x20..=0x7E => write!(f, "{}", ch as char)?,
                _ => write!(f, "\\{:03}", ch)?,
            }
        }
        f.write_str("\"")
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::rdata::encode_rdata;
    use crate::base::rdata::test::test_compose_parse;

    #[test]
    fn caa_compose_parse() {
        let rdata = Caa::new(
            0,
            "issue".parse().unwrap(),
            Bytes::from_static(b"ca.example.net"),
        );
        test_compose_parse(&rdata);
        assert_eq!(
            encode_rdata(&rdata).unwrap(),
            b"\x00\x15\x00\x05issueca.example.net"
        );
        assert_eq!(rdata.to_string(), "0 issue \"ca.example.net\"");
    }

    #[test]
    fn issuer_critical() {
        let mut rdata =
            Caa::new(0, "iodef".parse().unwrap(), Bytes::new());
        assert!(!rdata.issuer_critical());
        rdata.set_issuer_critical(true);
        assert_eq!(rdata.flags(), 0x80);
        test_compose_parse(&rdata);
        rdata.set_issuer_critical(false);
        assert_eq!(rdata.flags(), 0);
    }
}
