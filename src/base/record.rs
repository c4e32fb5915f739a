//! Resource Records.
//!
//! This module defines the types for the records found in the answer,
//! authority, and additional sections of a DNS message. The type
//! [`ResourceRecord`] contains an ordinary record with an owner, class,
//! TTL, and record data. Because the OPT pseudo record used by EDNS
//! repurposes the class and TTL fields, it is not a resource record but
//! has a type of its own, [`OptRecord`]. The enum [`Record`] covers both
//! shapes and is what the sections of a message consist of.

use super::iana::{Class, Rtype};
use super::name::Name;
use super::opt::OptRecord;
use super::rdata::{parse_len_rdata, ComposeRecordData, RecordData};
use super::wire::{Compose, ComposeError, FormError, Parse, ParseError};
use crate::rdata::AllRecordData;
use core::fmt;
use octseq::builder::OctetsBuilder;
use octseq::parse::Parser;

/// The bit in the class field of a record asking to flush cached records.
///
/// This is used by multicast DNS, see [RFC 6762], section 10.2.
///
/// [RFC 6762]: https://tools.ietf.org/html/rfc6762
pub const CACHE_FLUSH: u16 = 0x8000;

//------------ Record --------------------------------------------------------

/// A record in one of the record sections of a message.
///
/// Which of the two variants is used is determined by the record type: OPT
/// records become [`Record::Opt`], all other records [`Record::Normal`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Record {
    /// An ordinary resource record.
    Normal(ResourceRecord),

    /// An OPT record.
    Opt(OptRecord),
}

impl Record {
    /// Returns the record type of the record.
    pub fn rtype(&self) -> Rtype {
        match *self {
            Record::Normal(ref record) => record.rtype(),
            Record::Opt(_) => Rtype::OPT,
        }
    }

    /// Returns the owner of the record.
    ///
    /// This is always the root name for an OPT record.
    pub fn owner(&self) -> Name {
        match *self {
            Record::Normal(ref record) => record.owner().clone(),
            Record::Opt(_) => Name::root(),
        }
    }

    /// Returns a reference to the resource record if this is one.
    pub fn as_normal(&self) -> Option<&ResourceRecord> {
        match *self {
            Record::Normal(ref record) => Some(record),
            Record::Opt(_) => None,
        }
    }

    /// Returns a reference to the OPT record if this is one.
    pub fn as_opt(&self) -> Option<&OptRecord> {
        match *self {
            Record::Opt(ref record) => Some(record),
            Record::Normal(_) => None,
        }
    }
}

//--- From

impl From<ResourceRecord> for Record {
    fn from(record: ResourceRecord) -> Self {
        Record::Normal(record)
    }
}

impl From<OptRecord> for Record {
    fn from(record: OptRecord) -> Self {
        Record::Opt(record)
    }
}

//--- Compose and Parse

impl Compose for Record {
    fn compose_len(&self) -> usize {
        match *self {
            Record::Normal(ref record) => record.compose_len(),
            Record::Opt(ref record) => record.compose_len(),
        }
    }

    fn compose<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError> {
        match *self {
            Record::Normal(ref record) => record.compose(target),
            Record::Opt(ref record) => record.compose(target),
        }
    }
}

impl Parse for Record {
    fn parse(parser: &mut Parser<'_, [u8]>) -> Result<Self, ParseError> {
        let owner = Name::parse(parser)?;
        let rtype = Rtype::parse(parser)?;
        if rtype == Rtype::OPT {
            if !owner.is_root() {
                return Err(
                    FormError::new("OPT record with non-root owner").into()
                );
            }
            OptRecord::parse_fields(parser).map(Record::Opt)
        } else {
            ResourceRecord::parse_fields(owner, rtype, parser)
                .map(Record::Normal)
        }
    }
}

//--- Display

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Record::Normal(ref record) => fmt::Display::fmt(record, f),
            Record::Opt(ref record) => {
                write!(
                    f,
                    ".\t{}\tOPT\tversion {}",
                    record.udp_payload_size(),
                    record.version()
                )?;
                if record.dnssec_ok() {
                    f.write_str(" DO")?;
                }
                for option in record.options() {
                    write!(f, " {}", option)?;
                }
                Ok(())
            }
        }
    }
}

//------------ ResourceRecord ------------------------------------------------

/// A DNS resource record.
///
/// All information available through the DNS is stored in resource records.
/// They have a three part key of a domain name, resource record type, and
/// class. The domain name is called the *owner* of the record. The record
/// type is implied by the record data which is kept as [`AllRecordData`].
///
/// There is one more piece of data: the TTL or time to live. This value
/// says how long a record remains valid before it should be refreshed from
/// its original source.
///
/// Multicast DNS uses the top bit of the class field as the cache flush
/// flag. It is kept separately and never appears in the class itself.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ResourceRecord {
    /// The owner of the record.
    owner: Name,

    /// The class of the record.
    class: Class,

    /// Whether the cache flush bit is set.
    flush: bool,

    /// The time-to-live value of the record in seconds.
    ttl: u32,

    /// The record data. The value also specifies the record’s type.
    data: AllRecordData,
}

/// # Creation and Element Access
///
impl ResourceRecord {
    /// Creates a new record from its parts.
    #[must_use]
    pub fn new(
        owner: Name,
        class: Class,
        ttl: u32,
        data: impl Into<AllRecordData>,
    ) -> Self {
        ResourceRecord {
            owner,
            class,
            flush: false,
            ttl,
            data: data.into(),
        }
    }

    /// Returns a reference to the owner domain name.
    pub fn owner(&self) -> &Name {
        &self.owner
    }

    /// Returns the record type as determined by the record data.
    pub fn rtype(&self) -> Rtype {
        self.data.rtype()
    }

    /// Returns the record class.
    pub fn class(&self) -> Class {
        self.class
    }

    /// Sets the record’s class.
    pub fn set_class(&mut self, class: Class) {
        self.class = class
    }

    /// Returns whether the cache flush bit is set.
    pub fn flush(&self) -> bool {
        self.flush
    }

    /// Sets the cache flush bit.
    pub fn set_flush(&mut self, value: bool) {
        self.flush = value
    }

    /// Returns the record’s time-to-live in seconds.
    pub fn ttl(&self) -> u32 {
        self.ttl
    }

    /// Sets the record’s time-to-live.
    pub fn set_ttl(&mut self, ttl: u32) {
        self.ttl = ttl
    }

    /// Return a reference to the record data.
    pub fn data(&self) -> &AllRecordData {
        &self.data
    }

    /// Returns a mutable reference to the record data.
    pub fn data_mut(&mut self) -> &mut AllRecordData {
        &mut self.data
    }

    /// Trades the record for its record data.
    pub fn into_data(self) -> AllRecordData {
        self.data
    }

    /// Returns the wire value of the class field including the flush bit.
    fn class_field(&self) -> u16 {
        let class = self.class.to_int() & !CACHE_FLUSH;
        if self.flush {
            class | CACHE_FLUSH
        } else {
            class
        }
    }

    /// Parses the record after the owner name and record type.
    fn parse_fields(
        owner: Name,
        rtype: Rtype,
        parser: &mut Parser<'_, [u8]>,
    ) -> Result<Self, ParseError> {
        let class = u16::parse(parser)?;
        let ttl = u32::parse(parser)?;
        let data = match parse_len_rdata::<AllRecordData>(rtype, parser)? {
            Some(data) => data,
            None => return Err(FormError::new("unknown record type").into()),
        };
        Ok(ResourceRecord {
            owner,
            class: Class::from_int(class & !CACHE_FLUSH),
            flush: class & CACHE_FLUSH != 0,
            ttl,
            data,
        })
    }
}

//--- From

impl<Data: Into<AllRecordData>> From<(Name, Class, u32, Data)>
    for ResourceRecord
{
    fn from((owner, class, ttl, data): (Name, Class, u32, Data)) -> Self {
        Self::new(owner, class, ttl, data)
    }
}

impl<Data: Into<AllRecordData>> From<(Name, u32, Data)> for ResourceRecord {
    fn from((owner, ttl, data): (Name, u32, Data)) -> Self {
        Self::new(owner, Class::IN, ttl, data)
    }
}

//--- Compose and Parse

impl Compose for ResourceRecord {
    fn compose_len(&self) -> usize {
        // owner, type, class, TTL, RDLENGTH, data
        self.owner.compose_len() + 2 + 2 + 4 + 2 + self.data.rdlen()
    }

    fn compose<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError> {
        self.owner.compose(target)?;
        self.rtype().compose(target)?;
        self.class_field().compose(target)?;
        self.ttl.compose(target)?;
        self.data.compose_len_rdata(target)
    }
}

impl Parse for ResourceRecord {
    fn parse(parser: &mut Parser<'_, [u8]>) -> Result<Self, ParseError> {
        match Record::parse(parser)? {
            Record::Normal(record) => Ok(record),
            Record::Opt(_) => {
                Err(FormError::new("unexpected OPT record").into())
            }
        }
    }
}

//--- Display

impl fmt::Display for ResourceRecord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}",
            self.owner,
            self.ttl,
            self.class,
            self.rtype(),
            self.data
        )
    }
}

//============ Testing =======================================================
