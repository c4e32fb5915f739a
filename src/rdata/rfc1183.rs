//! Record data from [RFC 1183]: RP records.
//!
//! The other record types from this RFC are experimental or obsolete and
//! are treated as unknown record data.
//!
//! [RFC 1183]: https://tools.ietf.org/html/rfc1183

use crate::base::iana::Rtype;
use crate::base::name::Name;
use crate::base::rdata::{ComposeRecordData, ParseRecordData, RecordData};
use crate::base::wire::{Compose, ComposeError, Parse, ParseError};
use core::fmt;
use octseq::builder::OctetsBuilder;
use octseq::parse::Parser;

//------------ Rp -----------------------------------------------------------

/// Rp record data.
///
/// The Rp record names the person responsible for a domain. It holds the
/// mailbox of the person encoded as a domain name and the name of a
/// domain that has TXT records with further information. Either is the
/// root name if not available, which is also what `Default` produces.
///
/// The Rp record type is defined in [RFC 1183, section 2.2][1].
///
/// [1]: https://tools.ietf.org/html/rfc1183#section-2.2
#[derive(Clone, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Rp {
    mbox: Name,
    txt: Name,
}

impl Rp {
    /// The rtype of this record data type.
    pub(crate) const RTYPE: Rtype = Rtype::RP;

    /// Creates new RP record data from the mailbox and TXT domain names.
    #[must_use]
    pub fn new(mbox: Name, txt: Name) -> Self {
        Rp { mbox, txt }
    }

    /// The mailbox of the responsible person.
    pub fn mbox(&self) -> &Name {
        &self.mbox
    }

    /// The domain name with TXT records for the responsible person.
    pub fn txt(&self) -> &Name {
        &self.txt
    }

    pub fn parse(parser: &mut Parser<'_, [u8]>) -> Result<Self, ParseError> {
        Ok(Self::new(Name::parse(parser)?, Name::parse(parser)?))
    }
}

//--- RecordData, ParseRecordData, ComposeRecordData

impl RecordData for Rp {
    fn rtype(&self) -> Rtype {
        Rp::RTYPE
    }
}

impl ParseRecordData for Rp {
    fn parse_rdata(
        rtype: Rtype,
        parser: &mut Parser<'_, [u8]>,
    ) -> Result<Option<Self>, ParseError> {
        if rtype == Rp::RTYPE {
            Self::parse(parser).map(Some)
        } else {
            Ok(None)
        }
    }
}

impl ComposeRecordData for Rp {
    fn rdlen(&self) -> usize {
        self.mbox.compose_len() + self.txt.compose_len()
    }

    fn compose_rdata<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError> {
        self.mbox.compose(target)?;
        self.txt.compose(target)
    }
}

//--- Display

impl fmt::Display for Rp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.mbox, self.txt)
    }
}

//============ Testing =======================================================
