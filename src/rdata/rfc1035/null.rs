//! Record data for the NULL record.
//!
//! This is a private module. It’s content is re-exported by the parent.

use crate::base::iana::Rtype;
use crate::base::rdata::{ComposeRecordData, ParseRecordData, RecordData};
use crate::base::wire::{parse_remaining, ComposeError, ParseError};
use bytes::Bytes;
use core::fmt;
use octseq::builder::OctetsBuilder;
use octseq::parse::Parser;

//------------ Null ---------------------------------------------------------

/// Null record data.
///
/// Null records can contain whatever data. They are experimental and not
/// allowed in zone files.
///
/// The Null record type is defined in RFC 1035, section 3.3.10.
#[derive(Clone, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Null {
    data: Bytes,
}

impl Null {
    /// The rtype of this record data type.
    pub(crate) const RTYPE: Rtype = Rtype::NULL;

    /// Creates new NULL record data from the given octets.
    ///
    /// The function will fail if `data` is longer than 65,535 octets.
    pub fn from_octets(data: Bytes) -> Result<Self, LongNullData> {
        if data.len() > usize::from(u16::MAX) {
            Err(LongNullData(()))
        } else {
            Ok(Null { data })
        }
    }

    /// The raw content of the record.
    pub fn data(&self) -> &Bytes {
        &self.data
    }

    pub fn parse(parser: &mut Parser<'_, [u8]>) -> Result<Self, ParseError> {
        parse_remaining(parser).map(|data| Null { data })
    }
}

//--- AsRef

impl AsRef<[u8]> for Null {
    fn as_ref(&self) -> &[u8] {
        self.data.as_ref()
    }
}

//--- RecordData, ParseRecordData, ComposeRecordData

impl RecordData for Null {
    fn rtype(&self) -> Rtype {
        Null::RTYPE
    }
}

impl ParseRecordData for Null {
    fn parse_rdata(
        rtype: Rtype,
        parser: &mut Parser<'_, [u8]>,
    ) -> Result<Option<Self>, ParseError> {
        if rtype == Null::RTYPE {
            Self::parse(parser).map(Some)
        } else {
            Ok(None)
        }
    }
}

impl ComposeRecordData for Null {
    fn rdlen(&self) -> usize {
        self.data.len()
    }

    fn compose_rdata<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError> {
        target.append_slice(self.data.as_ref())?;
        Ok(())
    }
}

//--- Display

impl fmt::Display for Null {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "\\# {}", self.data.len())?;
        for ch in self.data.as_ref() {
            write!(f, " {:02x}", ch)?;
        }
        Ok(())
    }
}

//------------ LongNullData --------------------------------------------------

/// The octets sequence to be used for record data is too long.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LongNullData(());

impl fmt::Display for LongNullData {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("long record data")
    }
}

impl std::error::Error for LongNullData {}

//============ Testing =======================================================
