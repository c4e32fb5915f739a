//! Record data from [RFC 5155]: NSEC3 records.
//!
//! This RFC defines the NSEC3 resource record for hashed authenticated
//! denial of existence.
//!
//! [RFC 5155]: https://tools.ietf.org/html/rfc5155

use super::dnssec::RtypeBitmap;
use crate::base::iana::Rtype;
use crate::base::rdata::{ComposeRecordData, ParseRecordData, RecordData};
use crate::base::wire::{
    parse_bytes, Compose, ComposeError, Parse, ParseError,
};
use bytes::Bytes;
use core::fmt;
use octseq::builder::OctetsBuilder;
use octseq::parse::Parser;

//------------ Nsec3 ---------------------------------------------------------

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Nsec3 {
    hash_algorithm: u8,
    flags: u8,
    iterations: u16,
    salt: Nsec3Salt,
    next_owner: OwnerHash,
    types: RtypeBitmap,
}

impl Nsec3 {
    /// The rtype of this record data type.
    pub(crate) const RTYPE: Rtype = Rtype::NSEC3;

    /// The Opt-Out flag.
    pub const OPT_OUT: u8 = 0x01;

    #[must_use]
    pub fn new(
        hash_algorithm: u8,
        flags: u8,
        iterations: u16,
        salt: Nsec3Salt,
        next_owner: OwnerHash,
        types: RtypeBitmap,
    ) -> Self {
        Nsec3 {
            hash_algorithm,
            flags,
            iterations,
            salt,
            next_owner,
            types,
        }
    }

    pub fn hash_algorithm(&self) -> u8 {
        self.hash_algorithm
    }

    pub fn flags(&self) -> u8 {
        self.flags
    }

    pub fn opt_out(&self) -> bool {
        self.flags & Self::OPT_OUT != 0
    }

    pub fn iterations(&self) -> u16 {
        self.iterations
    }

    pub fn salt(&self) -> &Nsec3Salt {
        &self.salt
    }

    pub fn next_owner(&self) -> &OwnerHash {
        &self.next_owner
    }

    pub fn types(&self) -> &RtypeBitmap {
        &self.types
    }

    pub fn parse(parser: &mut Parser<'_, [u8]>) -> Result<Self, ParseError> {
        let hash_algorithm = u8::parse(parser)?;
        let flags = u8::parse(parser)?;
        let iterations = u16::parse(parser)?;
        let salt = Nsec3Salt::parse(parser)?;
        let next_owner = OwnerHash::parse(parser)?;
        let types = RtypeBitmap::parse(parser)?;
        Ok(Self::new(
            hash_algorithm,
            flags,
            iterations,
            salt,
            next_owner,
            types,
        ))
    }
}

//--- RecordData, ParseRecordData, ComposeRecordData

impl RecordData for Nsec3 {
    fn rtype(&self) -> Rtype {
        Nsec3::RTYPE
    }
}

impl ParseRecordData for Nsec3 {
    fn parse_rdata(
        rtype: Rtype,
        parser: &mut Parser<'_, [u8]>,
    ) -> Result<Option<Self>, ParseError> {
        if rtype == Nsec3::RTYPE {
            Self::parse(parser).map(Some)
        } else {
            Ok(None)
        }
    }
}

impl ComposeRecordData for Nsec3 {
    fn rdlen(&self) -> usize {
        4 + self.salt.compose_len()
            + self.next_owner.compose_len()
            + self.types.compose_len()
    }

    fn compose_rdata<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError> {
        self.hash_algorithm.compose(target)?;
        self.flags.compose(target)?;
        self.iterations.compose(target)?;
        self.salt.compose(target)?;
        self.next_owner.compose(target)?;
        self.types.compose(target)
    }
}

//--- Display

impl fmt::Display for Nsec3 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {}",
            self.hash_algorithm,
            self.flags,
            self.iterations,
            self.salt,
            self.next_owner
        )?;
        if !self.types.is_empty() {
            write!(f, " {}", self.types)?;
        }
        Ok(())
    }
}

//------------ Nsec3Salt -----------------------------------------------------

/// The salt value of an NSEC3 record.
///
/// The salt can never be longer than 255 octets since its length is encoded
/// as a single octet.
///
/// The salt uses Base 16 (i.e., hex digits) as its representation format
/// with no whitespace allowed. An empty salt is displayed as a single dash.
#[derive(Clone, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Nsec3Salt(Bytes);

impl Nsec3Salt {
    /// The salt’s maximum length.
    pub const MAX_LEN: usize = 255;

    /// Creates an empty salt value.
    #[must_use]
    pub fn empty() -> Self {
        Nsec3Salt(Bytes::new())
    }

    /// Crates a new salt value from the given octets.
    ///
    /// Returns succesfully if `octets` can indeed be used as a
    /// character string, i.e., it is not longer than 255 bytes.
    pub fn from_octets(octets: Bytes) -> Result<Self, Nsec3SaltError> {
        if octets.len() > Nsec3Salt::MAX_LEN {
            Err(Nsec3SaltError(()))
        } else {
            Ok(Nsec3Salt(octets))
        }
    }

    /// Returns a reference to a slice of the salt.
    pub fn as_slice(&self) -> &[u8] {
        self.0.as_ref()
    }

    /// Converts the salt value into the underlying octets.
    pub fn into_octets(self) -> Bytes {
        self.0
    }
}

impl Compose for Nsec3Salt {
    fn compose_len(&self) -> usize {
        self.0.len() + 1
    }

    fn compose<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError> {
        target.append_slice(&[self.0.len() as u8])?;
        target.append_slice(self.0.as_ref())?;
        Ok(())
    }
}

impl Parse for Nsec3Salt {
    fn parse(parser: &mut Parser<'_, [u8]>) -> Result<Self, ParseError> {
        let len = usize::from(parser.parse_u8()?);
        parse_bytes(parser, len).map(Nsec3Salt)
    }
}

impl fmt::Display for Nsec3Salt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("-");
        }
        for ch in self.0.as_ref() {
            write!(f, "{:02X}", ch)?;
        }
        Ok(())
    }
}

//------------ OwnerHash -----------------------------------------------------

/// The hash over the next owner name.
///
/// This hash is used instead of the actual owner name in NSEC3 records.
///
/// The hash can never be longer than 255 octets since its length is encoded
/// as a single octet.
///
/// For its presentation format, the hash uses an unpadded Base 32 encoding
/// with the extended hex alphabet.
#[derive(Clone, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct OwnerHash(Bytes);

impl OwnerHash {
    /// The hash’s maximum length.
    pub const MAX_LEN: usize = 255;

    /// Creates a new owner hash from the given octets.
    ///
    /// Returns succesfully if `octets` can indeed be used as a
    /// character string, i.e., it is not longer than 255 bytes.
    pub fn from_octets(octets: Bytes) -> Result<Self, OwnerHashError> {
        if octets.len() > OwnerHash::MAX_LEN {
            Err(OwnerHashError(()))
        } else {
            Ok(OwnerHash(octets))
        }
    }

    /// Returns a reference to a slice of the hash.
    pub fn as_slice(&self) -> &[u8] {
        self.0.as_ref()
    }

    /// Converts the hash into the underlying octets.
    pub fn into_octets(self) -> Bytes {
        self.0
    }
}

impl Compose for OwnerHash {
    fn compose_len(&self) -> usize {
        self.0.len() + 1
    }

    fn compose<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError> {
        target.append_slice(&[self.0.len() as u8])?;
        target.append_slice(self.0.as_ref())?;
        Ok(())
    }
}

impl Parse for OwnerHash {
    fn parse(parser: &mut Parser<'_, [u8]>) -> Result<Self, ParseError> {
        let len = usize::from(parser.parse_u8()?);
        parse_bytes(parser, len).map(OwnerHash)
    }
}

impl fmt::Display for OwnerHash {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        const ALPHABET: &[u8; 32] = b"0123456789ABCDEFGHIJKLMNOPQRSTUV";

        // Feed octets into a bit buffer and write out five bits at a time.
        let mut buf = 0u16;
        let mut bits = 0;
        for &ch in self.0.as_ref() {
            buf = (buf << 8) | u16::from(ch);
            bits += 8;
            while bits >= 5 {
                bits -= 5;
                let idx = usize::from((buf >> bits) & 0x1F);
                write!(f, "{}", ALPHABET[idx] as char)?;
            }
        }
        if bits > 0 {
            let idx = usize::from((buf << (5 - bits)) & 0x1F);
            write!(f, "{}", ALPHABET[idx] as char)?;
        }
        Ok(())
    }
}

//============ Error Types ===================================================

//------------ Nsec3SaltError ------------------------------------------------

/// A byte sequence does not represent a valid NSEC3 salt.
///
/// This can only mean that the sequence is longer than 255 bytes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Nsec3SaltError(());

impl fmt::Display for Nsec3SaltError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("illegal NSEC3 salt")
    }
}

impl std::error::Error for Nsec3SaltError {}

//------------ OwnerHashError ------------------------------------------------

/// A byte sequence does not represent a valid owner hash.
///
/// This can only mean that the sequence is longer than 255 bytes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct OwnerHashError(());

impl fmt::Display for OwnerHashError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("illegal owner name hash")
    }
}

impl std::error::Error for OwnerHashError {}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::rdata::test::test_compose_parse;
    use crate::base::rdata::{decode_rdata, encode_rdata};

    #[test]
    fn nsec3_compose_parse() {
        let rdata = Nsec3::new(
            1,
            Nsec3::OPT_OUT,
            12,
            Nsec3Salt::from_octets(Bytes::from_static(b"\xaa\xbb\xcc\xdd"))
                .unwrap(),
            OwnerHash::from_octets(Bytes::from_static(b"\x01\x02\x03"))
                .unwrap(),
            [Rtype::A, Rtype::RRSIG].into_iter().collect(),
        );
        test_compose_parse(&rdata);
        assert!(rdata.opt_out());
        assert_eq!(rdata.to_string(), "1 1 12 AABBCCDD 04106 A RRSIG");
    }

    #[test]
    fn nsec3_wire() {
        let rdata = Nsec3::new(
            1,
            0,
            0,
            Nsec3Salt::empty(),
            OwnerHash::from_octets(Bytes::from_static(b"\xff")).unwrap(),
            RtypeBitmap::new(),
        );
        let buf = encode_rdata(&rdata).unwrap();
        assert_eq!(buf, b"\x00\x07\x01\x00\x00\x00\x00\x01\xff");
        let (parsed, consumed) =
            decode_rdata::<Nsec3>(Rtype::NSEC3, &buf, 0).unwrap();
        assert_eq!(parsed, rdata);
        assert_eq!(consumed, 9);
        assert_eq!(parsed.salt().to_string(), "-");
    }

    #[test]
    fn length_limits() {
        let long = Bytes::from(vec![0u8; 256]);
        assert!(Nsec3Salt::from_octets(long.clone()).is_err());
        assert!(OwnerHash::from_octets(long).is_err());
        let max = Bytes::from(vec![0u8; 255]);
        assert!(Nsec3Salt::from_octets(max.clone()).is_ok());
        assert!(OwnerHash::from_octets(max).is_ok());
    }

    #[test]
    fn truncated_salt() {
        assert_eq!(
            decode_rdata::<Nsec3>(
                Rtype::NSEC3,
                b"\x00\x06\x01\x00\x00\x00\x04\xaa",
                0
            ),
            Err(ParseError::ShortInput)
        );
    }
}
