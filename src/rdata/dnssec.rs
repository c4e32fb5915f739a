//! Record data from [RFC 4034]: DS, DNSKEY, RRSIG, and NSEC records.
//!
//! This RFC defines the record types for DNSSEC. The type bitmap used by
//! NSEC and NSEC3 records lives here, too.
//!
//! [RFC 4034]: https://tools.ietf.org/html/rfc4034

use crate::base::iana::Rtype;
use crate::base::name::Name;
use crate::base::rdata::{ComposeRecordData, ParseRecordData, RecordData};
use crate::base::wire::{
    parse_remaining, Compose, ComposeError, FormError, Parse, ParseError,
};
use bytes::Bytes;
use core::fmt;
use core::str::FromStr;
use octseq::builder::OctetsBuilder;
use octseq::parse::Parser;
use std::collections::BTreeSet;
use time::{Date, Month, PrimitiveDateTime, Time};

//------------ Dnskey --------------------------------------------------------

/// Dnskey record data.
///
/// The record holds a public key used by DNSSEC. The protocol field is
/// always 3 and is therefore not kept. Parsing data with any other value
/// fails.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Dnskey {
    flags: u16,
    algorithm: u8,
    public_key: Bytes,
}

impl Dnskey {
    /// The rtype of this record data type.
    pub(crate) const RTYPE: Rtype = Rtype::DNSKEY;

    /// The only valid value of the protocol field.
    pub const PROTOCOL: u8 = 3;

    /// The Zone Key flag.
    pub const ZONE_KEY: u16 = 0x0100;

    /// The Secure Entry Point flag.
    pub const SECURE_ENTRY_POINT: u16 = 0x0001;

    /// The Revoke flag from RFC 5011.
    pub const REVOKE: u16 = 0x0080;

    #[must_use]
    pub fn new(flags: u16, algorithm: u8, public_key: Bytes) -> Self {
        Dnskey {
            flags,
            algorithm,
            public_key,
        }
    }

    pub fn flags(&self) -> u16 {
        self.flags
    }

    pub fn protocol(&self) -> u8 {
        Self::PROTOCOL
    }

    pub fn algorithm(&self) -> u8 {
        self.algorithm
    }

    pub fn public_key(&self) -> &Bytes {
        &self.public_key
    }

    /// Returns whether the Revoke flag is set.
    ///
    /// See [RFC 5011, Section 3].
    ///
    /// [RFC 5011, Section 3]: https://tools.ietf.org/html/rfc5011#section-3
    pub fn is_revoked(&self) -> bool {
        self.flags & Self::REVOKE != 0
    }

    /// Returns whether the the Secure Entry Point (SEP) flag is set.
    ///
    /// See [RFC 4034, Section 2.1.1]:
    ///
    /// > This flag is only intended to be a hint to zone signing or
    /// > debugging software as to the intended use of this DNSKEY record;
    /// > validators MUST NOT alter their behavior during the signature
    /// > validation process in any way based on the setting of this bit.
    ///
    /// [RFC 4034, Section 2.1.1]: https://tools.ietf.org/html/rfc4034#section-2.1.1
    pub fn is_secure_entry_point(&self) -> bool {
        self.flags & Self::SECURE_ENTRY_POINT != 0
    }

    /// Returns whether the Zone Key flag is set.
    ///
    /// If the flag is not set, the key MUST NOT be used to verify RRSIGs that
    /// cover RRSETs. See [RFC 4034, Section 2.1.1].
    ///
    /// [RFC 4034, Section 2.1.1]: https://tools.ietf.org/html/rfc4034#section-2.1.1
    pub fn is_zone_key(&self) -> bool {
        self.flags & Self::ZONE_KEY != 0
    }

    /// Returns the key tag for this DNSKEY data.
    ///
    /// This is the checksum defined in appendix B of RFC 4034.
    pub fn key_tag(&self) -> u16 {
        let key = self.public_key.as_ref();
        if self.algorithm == 1 {
            // RSA/MD5 uses the third-to-last and second-to-last octets of
            // the key. Keys too short for that have a key tag of 0.
            let len = key.len();
            if len > 2 {
                u16::from_be_bytes([key[len - 3], key[len - 2]])
            } else {
                0
            }
        } else {
            // Treat record data as a octet sequence. Add octets at odd
            // indexes as they are, add octets at even indexes shifted left
            // by 8 bits.
            let mut res = u32::from(self.flags);
            res += u32::from(Self::PROTOCOL) << 8;
            res += u32::from(self.algorithm);
            for chunk in key.chunks(2) {
                res += u32::from(chunk[0]) << 8;
                if let Some(&x) = chunk.get(1) {
                    res += u32::from(x);
                }
            }
            res += (res >> 16) & 0xFFFF;
            (res & 0xFFFF) as u16
        }
    }

    pub fn parse(parser: &mut Parser<'_, [u8]>) -> Result<Self, ParseError> {
        let flags = u16::parse(parser)?;
        if u8::parse(parser)? != Self::PROTOCOL {
            return Err(FormError::new("DNSKEY protocol must be 3").into());
        }
        let algorithm = u8::parse(parser)?;
        Ok(Self::new(flags, algorithm, parse_remaining(parser)?))
    }
}

//--- RecordData, ParseRecordData, ComposeRecordData

impl RecordData for Dnskey {
    fn rtype(&self) -> Rtype {
        Dnskey::RTYPE
    }
}

impl ParseRecordData for Dnskey {
    fn parse_rdata(
        rtype: Rtype,
        parser: &mut Parser<'_, [u8]>,
    ) -> Result<Option<Self>, ParseError> {
        if rtype == Dnskey::RTYPE {
            Self::parse(parser).map(Some)
        } else {
            Ok(None)
        }
    }
}

impl ComposeRecordData for Dnskey {
    fn rdlen(&self) -> usize {
        4 + self.public_key.len()
    }

    fn compose_rdata<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError> {
        self.flags.compose(target)?;
        Self::PROTOCOL.compose(target)?;
        self.algorithm.compose(target)?;
        target.append_slice(self.public_key.as_ref())?;
        Ok(())
    }
}

//--- Display

impl fmt::Display for Dnskey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {} {} ", self.flags, Self::PROTOCOL, self.algorithm)?;
        write_hex(f, self.public_key.as_ref())
    }
}

//------------ Timestamp -----------------------------------------------------

/// A serial number used as the signature time in RRSIG records.
///
/// On the wire, the value is the number of seconds since the Unix epoch
/// modulo 2^32. The presentation format is either this integer or a date
/// in `YYYYMMDDHHmmSS` format.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Timestamp(u32);

impl Timestamp {
    /// Returns the timestamp as a raw integer.
    #[must_use]
    pub fn into_int(self) -> u32 {
        self.0
    }
}

//--- From and FromStr

impl From<u32> for Timestamp {
    fn from(item: u32) -> Self {
        Self(item)
    }
}

impl FromStr for Timestamp {
    type Err = IllegalSignatureTime;

    /// Parses a timestamp value from a string.
    ///
    /// The presentation format can either be their integer value or a
    /// specific date in `YYYYMMDDHHmmSS` format.
    fn from_str(src: &str) -> Result<Self, Self::Err> {
        if !src.is_ascii() {
            return Err(IllegalSignatureTime(()));
        }
        if src.len() == 14 {
            let year = u32::from_str(&src[0..4])
                .map_err(|_| IllegalSignatureTime(()))?
                as i32;
            let month = Month::try_from(
                u8::from_str(&src[4..6])
                    .map_err(|_| IllegalSignatureTime(()))?,
            )
            .map_err(|_| IllegalSignatureTime(()))?;
            let day = u8::from_str(&src[6..8])
                .map_err(|_| IllegalSignatureTime(()))?;
            let hour = u8::from_str(&src[8..10])
                .map_err(|_| IllegalSignatureTime(()))?;
            let minute = u8::from_str(&src[10..12])
                .map_err(|_| IllegalSignatureTime(()))?;
            let second = u8::from_str(&src[12..14])
                .map_err(|_| IllegalSignatureTime(()))?;
            Ok(Timestamp(
                PrimitiveDateTime::new(
                    Date::from_calendar_date(year, month, day)
                        .map_err(|_| IllegalSignatureTime(()))?,
                    Time::from_hms(hour, minute, second)
                        .map_err(|_| IllegalSignatureTime(()))?,
                )
                .assume_utc()
                .unix_timestamp() as u32,
            ))
        } else {
            u32::from_str(src)
                .map(Timestamp)
                .map_err(|_| IllegalSignatureTime(()))
        }
    }
}

//--- Compose and Parse

impl Compose for Timestamp {
    fn compose_len(&self) -> usize {
        4
    }

    fn compose<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError> {
        self.0.compose(target)
    }
}

impl Parse for Timestamp {
    fn parse(parser: &mut Parser<'_, [u8]>) -> Result<Self, ParseError> {
        u32::parse(parser).map(Self)
    }
}

//--- Display

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

//------------ Rrsig ---------------------------------------------------------

/// Rrsig record data.
///
/// The record holds the signature over a record set. The signature itself
/// is not length prefixed and takes up the rest of the record data.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Rrsig {
    type_covered: Rtype,
    algorithm: u8,
    labels: u8,
    original_ttl: u32,
    expiration: Timestamp,
    inception: Timestamp,
    key_tag: u16,
    signer_name: Name,
    signature: Bytes,
}

impl Rrsig {
    /// The rtype of this record data type.
    pub(crate) const RTYPE: Rtype = Rtype::RRSIG;

    #[allow(clippy::too_many_arguments)] // XXX Consider changing.
    #[must_use]
    pub fn new(
        type_covered: Rtype,
        algorithm: u8,
        labels: u8,
        original_ttl: u32,
        expiration: Timestamp,
        inception: Timestamp,
        key_tag: u16,
        signer_name: Name,
        signature: Bytes,
    ) -> Self {
        Rrsig {
            type_covered,
            algorithm,
            labels,
            original_ttl,
            expiration,
            inception,
            key_tag,
            signer_name,
            signature,
        }
    }

    pub fn type_covered(&self) -> Rtype {
        self.type_covered
    }

    pub fn algorithm(&self) -> u8 {
        self.algorithm
    }

    pub fn labels(&self) -> u8 {
        self.labels
    }

    pub fn original_ttl(&self) -> u32 {
        self.original_ttl
    }

    pub fn expiration(&self) -> Timestamp {
        self.expiration
    }

    pub fn inception(&self) -> Timestamp {
        self.inception
    }

    pub fn key_tag(&self) -> u16 {
        self.key_tag
    }

    pub fn signer_name(&self) -> &Name {
        &self.signer_name
    }

    pub fn signature(&self) -> &Bytes {
        &self.signature
    }

    pub fn parse(parser: &mut Parser<'_, [u8]>) -> Result<Self, ParseError> {
        let type_covered = Rtype::parse(parser)?;
        let algorithm = u8::parse(parser)?;
        let labels = u8::parse(parser)?;
        let original_ttl = u32::parse(parser)?;
        let expiration = Timestamp::parse(parser)?;
        let inception = Timestamp::parse(parser)?;
        let key_tag = u16::parse(parser)?;
        let signer_name = Name::parse(parser)?;
        let signature = parse_remaining(parser)?;
        Ok(Self::new(
            type_covered,
            algorithm,
            labels,
            original_ttl,
            expiration,
            inception,
            key_tag,
            signer_name,
            signature,
        ))
    }
}

//--- RecordData, ParseRecordData, ComposeRecordData

impl RecordData for Rrsig {
    fn rtype(&self) -> Rtype {
        Rrsig::RTYPE
    }
}

impl ParseRecordData for Rrsig {
    fn parse_rdata(
        rtype: Rtype,
        parser: &mut Parser<'_, [u8]>,
    ) -> Result<Option<Self>, ParseError> {
        if rtype == Rrsig::RTYPE {
            Self::parse(parser).map(Some)
        } else {
            Ok(None)
        }
    }
}

impl ComposeRecordData for Rrsig {
    fn rdlen(&self) -> usize {
        18 + self.signer_name.compose_len() + self.signature.len()
    }

    fn compose_rdata<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError> {
        self.type_covered.compose(target)?;
        self.algorithm.compose(target)?;
        self.labels.compose(target)?;
        self.original_ttl.compose(target)?;
        self.expiration.compose(target)?;
        self.inception.compose(target)?;
        self.key_tag.compose(target)?;
        self.signer_name.compose(target)?;
        target.append_slice(self.signature.as_ref())?;
        Ok(())
    }
}

//--- Display

impl fmt::Display for Rrsig {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {} {} {} ",
            self.type_covered,
            self.algorithm,
            self.labels,
            self.original_ttl,
            self.expiration,
            self.inception,
            self.key_tag,
            self.signer_name
        )?;
        write_hex(f, self.signature.as_ref())
    }
}

//------------ Nsec ----------------------------------------------------------

/// Nsec record data.
///
/// The record names the next owner name in the zone and lists the record
/// types present at the owner of the record.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Nsec {
    next_name: Name,
    types: RtypeBitmap,
}

impl Nsec {
    /// The rtype of this record data type.
    pub(crate) const RTYPE: Rtype = Rtype::NSEC;

    #[must_use]
    pub fn new(next_name: Name, types: RtypeBitmap) -> Self {
        Nsec { next_name, types }
    }

    pub fn next_name(&self) -> &Name {
        &self.next_name
    }

    pub fn types(&self) -> &RtypeBitmap {
        &self.types
    }

    pub fn parse(parser: &mut Parser<'_, [u8]>) -> Result<Self, ParseError> {
        Ok(Self::new(Name::parse(parser)?, RtypeBitmap::parse(parser)?))
    }
}

//--- RecordData, ParseRecordData, ComposeRecordData

impl RecordData for Nsec {
    fn rtype(&self) -> Rtype {
        Nsec::RTYPE
    }
}

impl ParseRecordData for Nsec {
    fn parse_rdata(
        rtype: Rtype,
        parser: &mut Parser<'_, [u8]>,
    ) -> Result<Option<Self>, ParseError> {
        if rtype == Nsec::RTYPE {
            Self::parse(parser).map(Some)
        } else {
            Ok(None)
        }
    }
}

impl ComposeRecordData for Nsec {
    fn rdlen(&self) -> usize {
        self.next_name.compose_len() + self.types.compose_len()
    }

    fn compose_rdata<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError> {
        self.next_name.compose(target)?;
        self.types.compose(target)
    }
}

//--- Display

impl fmt::Display for Nsec {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.next_name, self.types)
    }
}

//------------ Ds -----------------------------------------------------------

/// Ds record data.
///
/// The record refers to a DNSKEY record of a child zone via its key tag,
/// algorithm, and a digest of the key.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Ds {
    key_tag: u16,
    algorithm: u8,
    digest_type: u8,
    digest: Bytes,
}

impl Ds {
    /// The rtype of this record data type.
    pub(crate) const RTYPE: Rtype = Rtype::DS;

    #[must_use]
    pub fn new(
        key_tag: u16,
        algorithm: u8,
        digest_type: u8,
        digest: Bytes,
    ) -> Self {
        Ds {
            key_tag,
            algorithm,
            digest_type,
            digest,
        }
    }

    pub fn key_tag(&self) -> u16 {
        self.key_tag
    }

    pub fn algorithm(&self) -> u8 {
        self.algorithm
    }

    pub fn digest_type(&self) -> u8 {
        self.digest_type
    }

    pub fn digest(&self) -> &Bytes {
        &self.digest
    }

    pub fn parse(parser: &mut Parser<'_, [u8]>) -> Result<Self, ParseError> {
        Ok(Self::new(
            u16::parse(parser)?,
            u8::parse(parser)?,
            u8::parse(parser)?,
            parse_remaining(parser)?,
        ))
    }
}

//--- RecordData, ParseRecordData, ComposeRecordData

impl RecordData for Ds {
    fn rtype(&self) -> Rtype {
        Ds::RTYPE
    }
}

impl ParseRecordData for Ds {
    fn parse_rdata(
        rtype: Rtype,
        parser: &mut Parser<'_, [u8]>,
    ) -> Result<Option<Self>, ParseError> {
        if rtype == Ds::RTYPE {
            Self::parse(parser).map(Some)
        } else {
            Ok(None)
        }
    }
}

impl ComposeRecordData for Ds {
    fn rdlen(&self) -> usize {
        4 + self.digest.len()
    }

    fn compose_rdata<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError> {
        self.key_tag.compose(target)?;
        self.algorithm.compose(target)?;
        self.digest_type.compose(target)?;
        target.append_slice(self.digest.as_ref())?;
        Ok(())
    }
}

//--- Display

impl fmt::Display for Ds {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {} {} ",
            self.key_tag, self.algorithm, self.digest_type
        )?;
        write_hex(f, self.digest.as_ref())
    }
}

//------------ RtypeBitmap ---------------------------------------------------

/// The set of record types present at a name.
///
/// In wire format, the types are grouped into windows of 256 types by
/// their upper octet. Each window is encoded as the window number, the
/// length of the bitmap, and the bitmap itself with all trailing zero
/// octets removed. Windows without any types are left out.
///
/// The set is always kept in ascending order of the type values.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct RtypeBitmap(BTreeSet<Rtype>);

impl RtypeBitmap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a record type to the set.
    pub fn add(&mut self, rtype: Rtype) {
        self.0.insert(rtype);
    }

    pub fn contains(&self, rtype: Rtype) -> bool {
        self.0.contains(&rtype)
    }

    /// Returns an iterator over the types in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = Rtype> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the windows of the bitmap.
    ///
    /// Each item is the window number and the length of the bitmap in
    /// octets, i.e., the index of the last non-zero octet plus one.
    fn windows(&self) -> impl Iterator<Item = (u8, usize)> + '_ {
        let mut iter =
            self.0.iter().map(|rtype| split_rtype(*rtype)).peekable();
        core::iter::from_fn(move || {
            let (window, mut octet, _) = iter.next()?;
            while let Some(&(next_window, next_octet, _)) = iter.peek() {
                if next_window != window {
                    break;
                }
                octet = next_octet;
                iter.next();
            }
            Some((window, octet + 1))
        })
    }

    /// Parses a bitmap taking up the rest of the parser.
    pub fn parse(parser: &mut Parser<'_, [u8]>) -> Result<Self, ParseError> {
        let mut res = BTreeSet::new();
        while parser.remaining() > 0 {
            let window = u8::parse(parser)?;
            let len = usize::from(u8::parse(parser)?);
            // https://tools.ietf.org/html/rfc4034#section-4.1.2:
            //  Blocks with no types present MUST NOT be included.
            if len == 0 || len > 32 {
                return Err(
                    FormError::new("invalid NSEC bitmap window").into()
                );
            }
            let bitmap = parser.peek(len)?;
            for (i, octet) in bitmap.iter().enumerate() {
                for bit in 0..8 {
                    if octet & (0b1000_0000 >> bit) != 0 {
                        let value = (u16::from(window) << 8)
                            | ((i as u16) << 3)
                            | bit;
                        res.insert(Rtype::from_int(value));
                    }
                }
            }
            parser.advance(len)?;
        }
        Ok(RtypeBitmap(res))
    }
}

//--- FromIterator and Extend

impl FromIterator<Rtype> for RtypeBitmap {
    fn from_iter<I: IntoIterator<Item = Rtype>>(iter: I) -> Self {
        RtypeBitmap(iter.into_iter().collect())
    }
}

impl Extend<Rtype> for RtypeBitmap {
    fn extend<I: IntoIterator<Item = Rtype>>(&mut self, iter: I) {
        self.0.extend(iter)
    }
}

//--- Compose

impl Compose for RtypeBitmap {
    fn compose_len(&self) -> usize {
        self.windows().map(|(_, len)| len + 2).sum()
    }

    fn compose<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError> {
        for (window, len) in self.windows() {
            let mut buf = [0u8; 34];
            buf[0] = window;
            buf[1] = len as u8;
            for rtype in self.0.iter() {
                let (rtype_window, octet, mask) = split_rtype(*rtype);
                if rtype_window == window {
                    buf[octet + 2] |= mask;
                }
            }
            target.append_slice(&buf[..len + 2])?;
        }
        Ok(())
    }
}

//--- Display

impl fmt::Display for RtypeBitmap {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut iter = self.iter();
        if let Some(rtype) = iter.next() {
            rtype.fmt(f)?;
        }
        for rtype in iter {
            write!(f, " {}", rtype)?;
        }
        Ok(())
    }
}

//------------ Friendly Helper Functions -------------------------------------

/// Splits an Rtype value into window number, octet number, and octet mask.
fn split_rtype(rtype: Rtype) -> (u8, usize, u8) {
    let rtype = rtype.to_int();
    (
        (rtype >> 8) as u8,
        ((rtype & 0xFF) >> 3) as usize,
        0b1000_0000 >> (rtype & 0x07),
    )
}

/// Writes octets as upper case hex digits.
fn write_hex(f: &mut fmt::Formatter, data: &[u8]) -> fmt::Result {
    for ch in data {
        write!(f, "{:02X}", ch)?;
    }
    Ok(())
}

//============ Errors ========================================================

/// A signature time could not be parsed from its text representation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct IllegalSignatureTime(());

impl fmt::Display for IllegalSignatureTime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("illegal signature time")
    }
}

impl std::error::Error for IllegalSignatureTime {}

//============ Test ==========================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::rdata::test::test_compose_parse;
    use crate::base::rdata::{decode_rdata, encode_rdata};
    use crate::base::wire::encode;
    use rand::seq::SliceRandom;
    use rstest::rstest;

    fn bitmap(types: &[Rtype]) -> RtypeBitmap {
        types.iter().copied().collect()
    }

    #[test]
    fn dnskey_compose_parse() {
        let rdata = Dnskey::new(257, 13, Bytes::from_static(b"\x01\x02\x03"));
        test_compose_parse(&rdata);
        assert!(rdata.is_zone_key());
        assert!(rdata.is_secure_entry_point());
        assert!(!rdata.is_revoked());
        assert_eq!(
            encode_rdata(&rdata).unwrap(),
            b"\x00\x07\x01\x01\x03\x0d\x01\x02\x03"
        );
    }

    #[test]
    fn dnskey_bad_protocol() {
        let buf = b"\x00\x07\x01\x01\x02\x0d\x01\x02\x03";
        assert!(matches!(
            decode_rdata::<Dnskey>(Rtype::DNSKEY, buf, 0),
            Err(ParseError::Form(_))
        ));
    }

    #[test]
    fn dnskey_key_tag() {
        let rdata = Dnskey::new(257, 8, Bytes::from_static(b"\x01\x02\x03"));
        assert_eq!(rdata.key_tag(), 2059);
        let rdata = Dnskey::new(
            256, 1, Bytes::from_static(b"\xaa\xbb\xcc\xdd")
        );
        assert_eq!(rdata.key_tag(), 0xbbcc);
        assert_eq!(Dnskey::new(256, 1, Bytes::new()).key_tag(), 0);
    }

    #[test]
    fn rrsig_compose_parse() {
        let rdata = Rrsig::new(
            Rtype::A,
            8,
            2,
            3600,
            "20240201000000".parse().unwrap(),
            Timestamp::from(1704067200),
            12345,
            "example.com".parse().unwrap(),
            Bytes::from_static(b"signature"),
        );
        test_compose_parse(&rdata);
        assert_eq!(rdata.expiration().into_int(), 1706745600);
        assert_eq!(rdata.rdlen(), 18 + 13 + 9);
    }

    #[test]
    fn timestamp_from_str() {
        assert_eq!(
            "19700101000000".parse::<Timestamp>(),
            Ok(Timestamp::from(0))
        );
        assert_eq!("42".parse::<Timestamp>(), Ok(Timestamp::from(42)));
        assert!("20241301000000".parse::<Timestamp>().is_err());
        assert!("4294967296".parse::<Timestamp>().is_err());
        assert!("later".parse::<Timestamp>().is_err());
    }

    #[test]
    fn ds_compose_parse() {
        let rdata = Ds::new(60485, 5, 1, Bytes::from_static(b"\x2b\xb1\x83"));
        test_compose_parse(&rdata);
        assert_eq!(rdata.to_string(), "60485 5 1 2BB183");
    }

    #[test]
    fn nsec_compose_parse() {
        let rdata = Nsec::new(
            "host.example.com".parse().unwrap(),
            bitmap(&[Rtype::A, Rtype::MX, Rtype::RRSIG, Rtype::NSEC]),
        );
        test_compose_parse(&rdata);
        assert_eq!(rdata.to_string(), "host.example.com A MX RRSIG NSEC");
    }

    #[test]
    fn bitmap_wire() {
        // Example from RFC 4034, section 4.3.
        let types = bitmap(&[
            Rtype::A,
            Rtype::MX,
            Rtype::RRSIG,
            Rtype::NSEC,
            Rtype::from_int(1234),
        ]);
        let mut wire = b"\x00\x06\x40\x01\x00\x00\x00\x03\x04\x1b".to_vec();
        wire.extend_from_slice(&[0; 26]);
        wire.push(0x20);
        assert_eq!(types.compose_len(), wire.len());
        assert_eq!(encode(&types).unwrap(), wire);
        let mut parser = Parser::from_ref(&wire[..]);
        assert_eq!(RtypeBitmap::parse(&mut parser), Ok(types));
        assert_eq!(encode(&RtypeBitmap::new()).unwrap(), b"");
    }

    #[rstest]
    #[case(b"\x00\x00")]
    #[case(b"\x00\x21\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\
             \x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\
             \x00\x00\x00\x00\x01")]
    fn bitmap_bad_window(#[case] wire: &[u8]) {
        let mut parser = Parser::from_ref(wire);
        assert!(matches!(
            RtypeBitmap::parse(&mut parser),
            Err(ParseError::Form(_))
        ));
    }

    #[test]
    fn bitmap_short_window() {
        let mut parser = Parser::from_ref(&b"\x00\x02\x40"[..]);
        assert_eq!(
            RtypeBitmap::parse(&mut parser),
            Err(ParseError::ShortInput)
        );
    }

    #[test]
    fn bitmap_order_is_canonical() {
        let mut types: Vec<_> = (0..64)
            .map(|_| Rtype::from_int(rand::random::<u16>()))
            .collect();
        let mut sorted = types.clone();
        sorted.sort();
        sorted.dedup();
        types.shuffle(&mut rand::thread_rng());

        let bitmap: RtypeBitmap = types.into_iter().collect();
        let buf = encode(&bitmap).unwrap();
        assert_eq!(buf.len(), bitmap.compose_len());
        let parsed =
            RtypeBitmap::parse(&mut Parser::from_ref(buf.as_slice())).unwrap();
        assert_eq!(parsed.iter().collect::<Vec<_>>(), sorted);
    }
}
