//! The header of a DNS message.
//!
//! Each DNS message starts with a twelve octet long header section
//! containing some general information related to the message as well as
//! the number of records in each of the four sections that follow the header.
//! Its content and format are defined in section 4.1.1 of [RFC 1035].
//!
//! The header is split into two types: [`Header`] contains the ID, opcode,
//! flags, and response code while [`HeaderCounts`] contains the section
//! counts. The [`HeaderSection`] type wraps both of them into a single
//! type. When composing a [`Message`], the counts are always derived from
//! the sections, so a message only keeps a [`Header`].
//!
//! [RFC 1035]: https://tools.ietf.org/html/rfc1035
//! [`Message`]: super::message::Message

use super::iana::{Opcode, Rcode};
use super::wire::{Compose, ComposeError, Parse, ParseError};
use core::{fmt, str::FromStr};
use octseq::builder::OctetsBuilder;
use octseq::parse::Parser;

//------------ Flag masks ----------------------------------------------------

/// The mask of the AA bit in the 16 bit flag word.
pub const AUTHORITATIVE_ANSWER: u16 = 1 << 10;

/// The mask of the TC bit in the 16 bit flag word.
pub const TRUNCATED_RESPONSE: u16 = 1 << 9;

/// The mask of the RD bit in the 16 bit flag word.
pub const RECURSION_DESIRED: u16 = 1 << 8;

/// The mask of the RA bit in the 16 bit flag word.
pub const RECURSION_AVAILABLE: u16 = 1 << 7;

/// The mask of the AD bit in the 16 bit flag word.
pub const AUTHENTIC_DATA: u16 = 1 << 5;

/// The mask of the CD bit in the 16 bit flag word.
pub const CHECKING_DISABLED: u16 = 1 << 4;

/// The mask of the QR bit in the 16 bit flag word.
const RESPONSE: u16 = 1 << 15;

//------------ Header --------------------------------------------------

/// The first part of the header of a DNS message.
///
/// This type represents the information contained in the first four octets
/// of the header: the message ID, opcode, rcode, and the various flags. It
/// keeps those four octets in wire representation, i.e., in network byte
/// order. The data is layed out like this:
///
/// ```text
///                                 1  1  1  1  1  1
///   0  1  2  3  4  5  6  7  8  9  0  1  2  3  4  5
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// |                      ID                       |
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// |QR|   Opcode  |AA|TC|RD|RA|Z |AD|CD|   RCODE   |
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// ```
///
/// Methods are available for accessing each of these fields. The basic
/// structure and most of the fields are defined in [RFC 1035], except for
/// the AD and CD flags, which are defined in [RFC 4035].
///
/// [RFC 1035]: https://tools.ietf.org/html/rfc1035
/// [RFC 4035]: https://tools.ietf.org/html/rfc4035
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Header {
    /// The actual header in its wire format representation.
    ///
    /// This means that the ID field is in big endian.
    inner: [u8; 4],
}

/// # Creation and Conversion
///
impl Header {
    /// Creates a new header.
    ///
    /// The new header has all fields as either zero or false. Thus, the
    /// opcode will be [`Opcode::QUERY`] and the response code will be
    /// [`Rcode::NOERROR`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a reference to the underlying octets.
    pub fn as_slice(&self) -> &[u8] {
        &self.inner
    }
}

/// # Field Access
///
impl Header {
    /// Returns the value of the ID field.
    ///
    /// The ID field is an identifier chosen by whoever created a query
    /// and is copied into a response by a server. It allows matching
    /// incoming responses to their queries.
    pub fn id(self) -> u16 {
        u16::from_be_bytes([self.inner[0], self.inner[1]])
    }

    /// Sets the value of the ID field.
    pub fn set_id(&mut self, value: u16) {
        self.inner[..2].copy_from_slice(&value.to_be_bytes())
    }

    /// Sets the value of the ID field to a randomly chosen number.
    #[cfg(feature = "rand")]
    pub fn set_random_id(&mut self) {
        self.set_id(::rand::random())
    }

    /// Returns whether the QR bit is set.
    ///
    /// The bit is set for responses and clear for queries.
    pub fn qr(self) -> bool {
        self.get_bit(2, 7)
    }

    /// Sets the value of the QR bit.
    pub fn set_qr(&mut self, set: bool) {
        self.set_bit(2, 7, set)
    }

    /// Returns the value of the Opcode field.
    pub fn opcode(self) -> Opcode {
        Opcode::from_int((self.inner[2] >> 3) & 0x0F)
    }

    /// Sets the value of the opcode field.
    ///
    /// Only the lower four bits of the opcode are used.
    pub fn set_opcode(&mut self, opcode: Opcode) {
        self.inner[2] = self.inner[2] & 0x87 | ((opcode.to_int() & 0x0F) << 3);
    }

    /// Returns all flags contained in the header.
    pub fn flags(self) -> Flags {
        Flags {
            qr: self.qr(),
            aa: self.aa(),
            tc: self.tc(),
            rd: self.rd(),
            ra: self.ra(),
            ad: self.ad(),
            cd: self.cd(),
        }
    }

    /// Sets all flag bits.
    pub fn set_flags(&mut self, flags: Flags) {
        self.set_qr(flags.qr);
        self.set_aa(flags.aa);
        self.set_tc(flags.tc);
        self.set_rd(flags.rd);
        self.set_ra(flags.ra);
        self.set_ad(flags.ad);
        self.set_cd(flags.cd);
    }

    /// Returns the second 16 bit word of the header without the QR bit.
    ///
    /// The word contains the opcode, response code, and all flags other
    /// than QR. The flag masks defined in this module can be used to test
    /// it.
    pub fn flags_word(self) -> u16 {
        u16::from_be_bytes([self.inner[2], self.inner[3]]) & !RESPONSE
    }

    /// Sets the second 16 bit word of the header leaving the QR bit alone.
    pub fn set_flags_word(&mut self, word: u16) {
        let word = word & !RESPONSE
            | u16::from_be_bytes([self.inner[2], self.inner[3]]) & RESPONSE;
        self.inner[2..].copy_from_slice(&word.to_be_bytes())
    }

    /// Returns whether the AA bit is set.
    pub fn aa(self) -> bool {
        self.get_bit(2, 2)
    }

    /// Sets the value of the AA bit.
    pub fn set_aa(&mut self, set: bool) {
        self.set_bit(2, 2, set)
    }

    /// Returns whether the TC bit is set.
    pub fn tc(self) -> bool {
        self.get_bit(2, 1)
    }

    /// Sets the value of the TC bit.
    pub fn set_tc(&mut self, set: bool) {
        self.set_bit(2, 1, set)
    }

    /// Returns whether the RD bit is set.
    pub fn rd(self) -> bool {
        self.get_bit(2, 0)
    }

    /// Sets the value of the RD bit.
    pub fn set_rd(&mut self, set: bool) {
        self.set_bit(2, 0, set)
    }

    /// Returns whether the RA bit is set.
    pub fn ra(self) -> bool {
        self.get_bit(3, 7)
    }

    /// Sets the value of the RA bit.
    pub fn set_ra(&mut self, set: bool) {
        self.set_bit(3, 7, set)
    }

    /// Returns whether the reserved bit is set.
    ///
    /// This bit must be `false` in all queries and responses.
    pub fn z(self) -> bool {
        self.get_bit(3, 6)
    }

    /// Sets the value of the reserved bit.
    pub fn set_z(&mut self, set: bool) {
        self.set_bit(3, 6, set)
    }

    /// Returns whether the AD bit is set.
    pub fn ad(self) -> bool {
        self.get_bit(3, 5)
    }

    /// Sets the value of the AD bit.
    pub fn set_ad(&mut self, set: bool) {
        self.set_bit(3, 5, set)
    }

    /// Returns whether the CD bit is set.
    pub fn cd(self) -> bool {
        self.get_bit(3, 4)
    }

    /// Sets the value of the CD bit.
    pub fn set_cd(&mut self, set: bool) {
        self.set_bit(3, 4, set)
    }

    /// Returns the value of the RCODE field.
    ///
    /// The *response code* is used in a response to indicate what happened
    /// when processing the query.
    pub fn rcode(self) -> Rcode {
        Rcode::from_int(self.inner[3] & 0x0F)
    }

    /// Sets the value of the RCODE field.
    ///
    /// Only the lower four bits of the response code are used.
    pub fn set_rcode(&mut self, rcode: Rcode) {
        self.inner[3] = self.inner[3] & 0xF0 | (rcode.to_int() & 0x0F);
    }

    //--- Internal helpers

    /// Returns the value of the bit at the given position.
    ///
    /// The argument `offset` gives the byte offset of the underlying bytes
    /// slice and `bit` gives the number of the bit with the most significant
    /// bit being 7.
    fn get_bit(self, offset: usize, bit: usize) -> bool {
        self.inner[offset] & (1 << bit) != 0
    }

    /// Sets or resets the given bit.
    fn set_bit(&mut self, offset: usize, bit: usize, set: bool) {
        if set {
            self.inner[offset] |= 1 << bit
        } else {
            self.inner[offset] &= !(1 << bit)
        }
    }
}

//--- Compose and Parse

impl Compose for Header {
    fn compose_len(&self) -> usize {
        4
    }

    fn compose<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError> {
        target.append_slice(&self.inner)?;
        Ok(())
    }
}

impl Parse for Header {
    fn parse(parser: &mut Parser<'_, [u8]>) -> Result<Self, ParseError> {
        let mut res = Self::default();
        parser.parse_buf(&mut res.inner)?;
        Ok(res)
    }
}

//------------ Flags ---------------------------------------------------

/// The flags contained in the DNS message header.
///
/// This is a utility type that makes it easier to work with flags. It
/// contains only standard DNS message flags that are part of the
/// [`Header`], i.e., EDNS flags and the reserved Z bit are not included.
///
/// This type has a text notation and can be created from it as well. Each
/// flag that is set is represented by a two-letter token, which is the
/// uppercase version of the flag name. If mutliple flags are set, the
/// tokens are separated by space.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Flags {
    /// Query response: the message is a response rather than a query.
    pub qr: bool,

    /// Authoritative answer.
    pub aa: bool,

    /// Truncation.
    pub tc: bool,

    /// Recursion desired.
    pub rd: bool,

    /// Recursion available.
    pub ra: bool,

    /// Authentic data.
    pub ad: bool,

    /// Checking disabled.
    pub cd: bool,
}

impl Flags {
    /// Creates new flags.
    ///
    /// All flags will be unset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

//--- Display & FromStr

impl fmt::Display for Flags {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let tokens = [
            (self.qr, "QR"),
            (self.aa, "AA"),
            (self.tc, "TC"),
            (self.rd, "RD"),
            (self.ra, "RA"),
            (self.ad, "AD"),
            (self.cd, "CD"),
        ];
        let mut sep = "";
        for (_, token) in tokens.iter().filter(|(set, _)| *set) {
            write!(f, "{}{}", sep, token)?;
            sep = " ";
        }
        Ok(())
    }
}

impl FromStr for Flags {
    type Err = FlagsFromStrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut flags = Flags::new();
        for token in s.split(' ') {
            match token.to_ascii_uppercase().as_str() {
                "QR" => flags.qr = true,
                "AA" => flags.aa = true,
                "TC" => flags.tc = true,
                "RD" => flags.rd = true,
                "RA" => flags.ra = true,
                "AD" => flags.ad = true,
                "CD" => flags.cd = true,
                "" => {}
                _ => return Err(FlagsFromStrError),
            }
        }
        Ok(flags)
    }
}

//------------ HeaderCounts -------------------------------------------------

/// The section count part of the header section of a DNS message.
///
/// This part consists of four 16 bit counters for the number of entries in
/// the four sections of a DNS message.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct HeaderCounts {
    /// The actual headers in their wire-format representation.
    ///
    /// Ie., all values are stored big endian.
    inner: [u8; 8],
}

impl HeaderCounts {
    /// Creates a new value with all counters set to zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a reference to the raw octets slice of the header counts.
    pub fn as_slice(&self) -> &[u8] {
        &self.inner
    }

    /// Returns the value of the QDCOUNT field.
    pub fn qdcount(self) -> u16 {
        self.get_u16(0)
    }

    /// Sets the value of the QDCOUNT field.
    pub fn set_qdcount(&mut self, value: u16) {
        self.set_u16(0, value)
    }

    /// Returns the value of the ANCOUNT field.
    pub fn ancount(self) -> u16 {
        self.get_u16(2)
    }

    /// Sets the value of the ANCOUNT field.
    pub fn set_ancount(&mut self, value: u16) {
        self.set_u16(2, value)
    }

    /// Returns the value of the NSCOUNT field.
    pub fn nscount(self) -> u16 {
        self.get_u16(4)
    }

    /// Sets the value of the NSCOUNT field.
    pub fn set_nscount(&mut self, value: u16) {
        self.set_u16(4, value)
    }

    /// Returns the value of the ARCOUNT field.
    pub fn arcount(self) -> u16 {
        self.get_u16(6)
    }

    /// Sets the value of the ARCOUNT field.
    pub fn set_arcount(&mut self, value: u16) {
        self.set_u16(6, value)
    }

    /// Returns the total number of entries in all sections.
    pub fn total(self) -> usize {
        usize::from(self.qdcount())
            + usize::from(self.ancount())
            + usize::from(self.nscount())
            + usize::from(self.arcount())
    }

    //--- Internal helpers

    fn get_u16(self, offset: usize) -> u16 {
        u16::from_be_bytes([self.inner[offset], self.inner[offset + 1]])
    }

    fn set_u16(&mut self, offset: usize, value: u16) {
        self.inner[offset..offset + 2].copy_from_slice(&value.to_be_bytes())
    }
}

//--- Compose and Parse

impl Compose for HeaderCounts {
    fn compose_len(&self) -> usize {
        8
    }

    fn compose<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError> {
        target.append_slice(&self.inner)?;
        Ok(())
    }
}

impl Parse for HeaderCounts {
    fn parse(parser: &mut Parser<'_, [u8]>) -> Result<Self, ParseError> {
        let mut res = Self::default();
        parser.parse_buf(&mut res.inner)?;
        Ok(res)
    }
}

//------------ HeaderSection -------------------------------------------------

/// The complete header section of a DNS message.
///
/// Consists of a [`Header`] directly followed by a [`HeaderCounts`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct HeaderSection {
    header: Header,
    counts: HeaderCounts,
}

impl HeaderSection {
    /// The length of the header section in octets.
    pub const LEN: usize = 12;

    /// Creates a new header section from its two parts.
    #[must_use]
    pub fn new(header: Header, counts: HeaderCounts) -> Self {
        HeaderSection { header, counts }
    }

    /// Returns a reference to the header.
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Returns a mutable reference to the header.
    pub fn header_mut(&mut self) -> &mut Header {
        &mut self.header
    }

    /// Returns a reference to the header counts.
    pub fn counts(&self) -> &HeaderCounts {
        &self.counts
    }

    /// Returns a mutable reference to the header counts.
    pub fn counts_mut(&mut self) -> &mut HeaderCounts {
        &mut self.counts
    }
}

//--- Compose and Parse

impl Compose for HeaderSection {
    fn compose_len(&self) -> usize {
        Self::LEN
    }

    fn compose<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError> {
        self.header.compose(target)?;
        self.counts.compose(target)
    }
}

impl Parse for HeaderSection {
    fn parse(parser: &mut Parser<'_, [u8]>) -> Result<Self, ParseError> {
        // Check up front so a short header never consumes anything.
        if parser.remaining() < Self::LEN {
            return Err(ParseError::ShortInput);
        }
        Ok(HeaderSection {
            header: Header::parse(parser)?,
            counts: HeaderCounts::parse(parser)?,
        })
    }
}

//------------ FlagsFromStrError --------------------------------------------

/// An error happened when converting string to flags.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FlagsFromStrError;

impl fmt::Display for FlagsFromStrError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "illegal flags token")
    }
}

impl std::error::Error for FlagsFromStrError {}

//============ Testing ======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::wire::{decode, encode};
    use rstest::rstest;

    macro_rules! test_field {
        ($get:ident, $set:ident, $default:expr, $($value:expr),*) => {
            $({
                let mut h = Header::new();
                assert_eq!(h.$get(), $default);
                h.$set($value);
                assert_eq!(h.$get(), $value);
            })*
        }
    }

    #[test]
    fn header() {
        test_field!(id, set_id, 0, 0x1234);
        test_field!(qr, set_qr, false, true, false);
        test_field!(opcode, set_opcode, Opcode::QUERY, Opcode::NOTIFY);
        test_field!(
            flags,
            set_flags,
            Flags::new(),
            Flags {
                qr: true,
                ..Default::default()
            }
        );
        test_field!(aa, set_aa, false, true, false);
        test_field!(tc, set_tc, false, true, false);
        test_field!(rd, set_rd, false, true, false);
        test_field!(ra, set_ra, false, true, false);
        test_field!(z, set_z, false, true, false);
        test_field!(ad, set_ad, false, true, false);
        test_field!(cd, set_cd, false, true, false);
        test_field!(rcode, set_rcode, Rcode::NOERROR, Rcode::REFUSED);
    }

    #[rstest]
    #[case(Header::set_aa, AUTHORITATIVE_ANSWER)]
    #[case(Header::set_tc, TRUNCATED_RESPONSE)]
    #[case(Header::set_rd, RECURSION_DESIRED)]
    #[case(Header::set_ra, RECURSION_AVAILABLE)]
    #[case(Header::set_ad, AUTHENTIC_DATA)]
    #[case(Header::set_cd, CHECKING_DISABLED)]
    fn flag_masks(#[case] set: fn(&mut Header, bool), #[case] mask: u16) {
        let mut h = Header::new();
        set(&mut h, true);
        assert_eq!(h.flags_word(), mask);
        assert_eq!(
            encode(&h).unwrap()[2..],
            mask.to_be_bytes()
        );
    }

    #[test]
    fn bit_layout() {
        let mut h = Header::new();
        h.set_id(0xbeef);
        h.set_qr(true);
        h.set_opcode(Opcode::UPDATE);
        h.set_rd(true);
        h.set_rcode(Rcode::NXDOMAIN);
        assert_eq!(encode(&h).unwrap(), [0xbe, 0xef, 0xa9, 0x03]);
        assert_eq!(h.flags_word(), 0x2903);
    }

    #[test]
    fn flags_word_keeps_qr() {
        let mut h = Header::new();
        h.set_qr(true);
        h.set_flags_word(0xffff);
        assert!(h.qr() && h.aa() && h.cd() && h.z());
        assert_eq!(h.opcode(), Opcode::from_int(15));
        assert_eq!(h.flags_word(), 0x7fff);
        h.set_flags_word(0);
        assert!(h.qr());
        assert_eq!(h.flags_word(), 0);
    }

    #[test]
    fn flags_text() {
        let flags: Flags = "qr AA rd".parse().unwrap();
        assert!(flags.qr && flags.aa && flags.rd && !flags.tc);
        assert_eq!(flags.to_string(), "QR AA RD");
        assert_eq!(Flags::new().to_string(), "");
        assert_eq!("QR XX".parse::<Flags>(), Err(FlagsFromStrError));
    }

    #[test]
    fn counts() {
        let mut c = HeaderCounts {
            inner: [1, 2, 3, 4, 5, 6, 7, 8],
        };
        assert_eq!(c.qdcount(), 0x0102);
        assert_eq!(c.ancount(), 0x0304);
        assert_eq!(c.nscount(), 0x0506);
        assert_eq!(c.arcount(), 0x0708);
        c.set_qdcount(0x0807);
        c.set_ancount(0x0605);
        c.set_nscount(0x0403);
        c.set_arcount(0x0201);
        assert_eq!(c.inner, [8, 7, 6, 5, 4, 3, 2, 1]);
        assert_eq!(c.total(), 0x0807 + 0x0605 + 0x0403 + 0x0201);
    }

    #[test]
    fn section_wire() {
        let buf = b"\x01\x02\x81\x80\x00\x01\x00\x02\x00\x00\x00\x03";
        let (section, len) = decode::<HeaderSection>(buf, 0).unwrap();
        assert_eq!(len, 12);
        assert_eq!(section.header().id(), 0x0102);
        assert!(section.header().qr() && section.header().rd());
        assert!(section.header().ra());
        assert_eq!(section.counts().ancount(), 2);
        assert_eq!(section.counts().arcount(), 3);
        assert_eq!(encode(&section).unwrap(), buf);
        assert_eq!(
            decode::<HeaderSection>(&buf[..11], 0),
            Err(ParseError::ShortInput)
        );
    }
}
