//! Record data from [RFC 2782]: SRV records.
//!
//! This RFC defines the Srv record type.
//!
//! [RFC 2782]: https://tools.ietf.org/html/rfc2782

use crate::base::iana::Rtype;
use crate::base::name::Name;
use crate::base::rdata::{ComposeRecordData, ParseRecordData, RecordData};
use crate::base::wire::{Compose, ComposeError, Parse, ParseError};
use core::fmt;
use octseq::builder::OctetsBuilder;
use octseq::parse::Parser;

//------------ Srv ---------------------------------------------------------

/// Srv record data.
///
/// Srv records locate the servers for a specific service. The owner name
/// combines the service and protocol labels with the domain the service
/// lives in.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Srv {
    priority: u16,
    weight: u16,
    port: u16,
    target: Name,
}

impl Srv {
    /// The rtype of this record data type.
    pub(crate) const RTYPE: Rtype = Rtype::SRV;

    #[must_use]
    pub fn new(priority: u16, weight: u16, port: u16, target: Name) -> Self {
        Srv {
            priority,
            weight,
            port,
            target,
        }
    }

    pub fn priority(&self) -> u16 {
        self.priority
    }

    pub fn weight(&self) -> u16 {
        self.weight
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn target(&self) -> &Name {
        &self.target
    }

    pub fn parse(parser: &mut Parser<'_, [u8]>) -> Result<Self, ParseError> {
        Ok(Self::new(
            u16::parse(parser)?,
            u16::parse(parser)?,
            u16::parse(parser)?,
            Name::parse(parser)?,
        ))
    }
}

//--- RecordData, ParseRecordData, ComposeRecordData

impl RecordData for Srv {
    fn rtype(&self) -> Rtype {
        Srv::RTYPE
    }
}

impl ParseRecordData for Srv {
    fn parse_rdata(
        rtype: Rtype,
        parser: &mut Parser<'_, [u8]>,
    ) -> Result<Option<Self>, ParseError> {
        if rtype == Srv::RTYPE {
            Self::parse(parser).map(Some)
        } else {
            Ok(None)
        }
    }
}

impl ComposeRecordData for Srv {
    fn rdlen(&self) -> usize {
        6 + self.target.compose_len()
    }

    fn compose_rdata<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError> {
        self.priority.compose(target)?;
        self.weight.compose(target)?;
        self.port.compose(target)?;
        self.target.compose(target)
    }
}

//--- Display

impl fmt::Display for Srv {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.priority, self.weight, self.port, self.target
        )
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::rdata::encode_rdata;
    use crate::base::rdata::test::test_compose_parse;

    #[test]
    fn srv_compose_parse() {
        let rdata = Srv::new(10, 60, 5060, "sip.example.com".parse().unwrap());
        test_compose_parse(&rdata);
        assert_eq!(rdata.to_string(), "10 60 5060 sip.example.com");
        assert_eq!(
            encode_rdata(&Srv::new(1, 2, 3, Name::root())).unwrap(),
            b"\x00\x07\x00\x01\x00\x02\x00\x03\x00"
        );
    }
}
