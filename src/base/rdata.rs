//! Resource record data.
//!
//! Each resource record type has its own definition of the content and
//! formatting of its data. This module provides the basics for implementing
//! specific types for this record data. The concrete implementations for
//! well-known record types live in the top-level [crate::rdata] module.
//!
//! There are three traits herein: Any type that represents record data
//! implements [`RecordData`]. If the data can be written in wire format,
//! it also implements [`ComposeRecordData`]. If the data can also be parsed
//! from an existing message, the type in addition implements
//! [`ParseRecordData`].
//!
//! The module also provides a type, [`UnknownRecordData`], that can be used
//! to deal with record types whose specification is not known (or has not
//! been implemented yet).

use super::iana::Rtype;
use super::wire::{
    compose_len_prefix, parse_remaining, ComposeError, FormError, ParseError,
};
use bytes::Bytes;
use core::fmt;
use octseq::builder::OctetsBuilder;
use octseq::parse::Parser;

//----------- RecordData -----------------------------------------------------

/// A type that represents record data.
pub trait RecordData {
    /// Returns the record type associated with this record data instance.
    ///
    /// This is a method rather than an associated function to allow one
    /// type to be used for several real record types.
    fn rtype(&self) -> Rtype;
}

impl<T: RecordData> RecordData for &T {
    fn rtype(&self) -> Rtype {
        (*self).rtype()
    }
}

//----------- ComposeRecordData ----------------------------------------------

/// A type of record data that can be composed.
pub trait ComposeRecordData: RecordData {
    /// Returns the exact length of the record data in wire format.
    fn rdlen(&self) -> usize;

    /// Appends the wire format of the record data into `target`.
    fn compose_rdata<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError>;

    /// Appends the record data prefixed with its length.
    fn compose_len_rdata<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError> {
        compose_len_prefix(self.rdlen(), target)?;
        self.compose_rdata(target)
    }
}

impl<T: ComposeRecordData> ComposeRecordData for &T {
    fn rdlen(&self) -> usize {
        (*self).rdlen()
    }

    fn compose_rdata<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError> {
        (*self).compose_rdata(target)
    }
}

//------------ ParseRecordData -----------------------------------------------

/// A record data type that can be parsed from a message.
///
/// When record data types are generic – typically over a octets type – the
/// lifetime of the parser is not the lifetime of the data. That is why this
/// trait is implemented for each type by itself.
pub trait ParseRecordData: RecordData + Sized {
    /// Parses the record data.
    ///
    /// The record data is for a record of type `rtype`. The function may
    /// decide whether it wants to parse data for that type. It should return
    /// `Ok(None)` if it doesn’t.
    ///
    /// The `parser` is positioned at the beginning of the record data and is
    /// limited to the length of the data. The method only needs to parse as
    /// much data as it needs. The caller has to make sure to deal with data
    /// remaining in the parser.
    ///
    /// If the function doesn’t want to process the data, it must not touch
    /// the parser. In particual, it must not advance it.
    fn parse_rdata(
        rtype: Rtype,
        parser: &mut Parser<'_, [u8]>,
    ) -> Result<Option<Self>, ParseError>;
}

//------------ Length-prefixed Record Data ------------------------------------

/// Parses record data preceded by its 16 bit length.
///
/// The data itself is parsed from a parser limited to the announced length
/// which must be consumed completely. The outer parser always moves past
/// the data unless an error occurs.
pub fn parse_len_rdata<Data: ParseRecordData>(
    rtype: Rtype,
    parser: &mut Parser<'_, [u8]>,
) -> Result<Option<Data>, ParseError> {
    let rdlen = usize::from(parser.parse_u16_be()?);
    let mut rdata = parser.parse_parser(rdlen)?;
    let res = match Data::parse_rdata(rtype, &mut rdata)? {
        Some(res) => res,
        None => return Ok(None),
    };
    if rdata.remaining() != 0 {
        return Err(FormError::new("trailing data in record data").into());
    }
    Ok(Some(res))
}

/// Encodes record data including its length into a new vec.
///
/// The vec is allocated with exactly the announced length upfront.
pub fn encode_rdata<Data: ComposeRecordData + ?Sized>(
    data: &Data,
) -> Result<Vec<u8>, ComposeError> {
    let len = data.rdlen() + 2;
    let mut target = Vec::with_capacity(len);
    data.compose_len_rdata(&mut target)?;
    if target.len() != len {
        return Err(ComposeError::LengthMismatch);
    }
    Ok(target)
}

/// Decodes length-prefixed record data of the given type.
///
/// Returns the data and the number of octets consumed, i.e., the record
/// data length plus two. If `Data` doesn’t handle `rtype`, a form error
/// is returned.
pub fn decode_rdata<Data: ParseRecordData>(
    rtype: Rtype,
    buf: &[u8],
    offset: usize,
) -> Result<(Data, usize), ParseError> {
    let mut parser = Parser::from_ref(buf);
    parser.seek(offset)?;
    match parse_len_rdata(rtype, &mut parser)? {
        Some(data) => Ok((data, parser.pos() - offset)),
        None => Err(FormError::new("unexpected record type").into()),
    }
}

//------------ UnknownRecordData ---------------------------------------------

/// A type for parsing any type of record data.
///
/// This type accepts any record type and stores the plain, unparsed record
/// data as an octets sequence.
///
/// Because some record types allow compressed domain names in their record
/// data, this type cannot be used safely with these record types. For these
/// record types, the structure of the content needs to be known.
///
/// [RFC 3597] limits the types for which compressed names are allowed in the
/// record data to those defined in [RFC 1035] itself. Specific types for all
/// these record types exist in
/// [`rdata::rfc1035`][crate::rdata::rfc1035].
///
/// Ultimately, you should only use this type for record types for which there
/// is no implementation available in this crate.
///
/// [RFC 1035]: https://tools.ietf.org/html/rfc1035
/// [RFC 3597]: https://tools.ietf.org/html/rfc3597
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct UnknownRecordData {
    /// The record type of this data.
    rtype: Rtype,

    /// The record data.
    data: Bytes,
}

impl UnknownRecordData {
    /// Creates generic record data from a bytes value containing the data.
    pub fn from_octets(rtype: Rtype, data: Bytes) -> Self {
        UnknownRecordData { rtype, data }
    }

    /// Returns the record type this data is for.
    pub fn rtype(&self) -> Rtype {
        self.rtype
    }

    /// Returns a reference to the record data.
    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// Parses any record type as unknown record data.
    ///
    /// This takes everything that is left in the parser.
    pub fn parse_any(
        rtype: Rtype,
        parser: &mut Parser<'_, [u8]>,
    ) -> Result<Self, ParseError> {
        parse_remaining(parser).map(|data| Self::from_octets(rtype, data))
    }
}

//--- RecordData, ParseRecordData, and ComposeRecordData

impl RecordData for UnknownRecordData {
    fn rtype(&self) -> Rtype {
        self.rtype
    }
}

impl ParseRecordData for UnknownRecordData {
    fn parse_rdata(
        rtype: Rtype,
        parser: &mut Parser<'_, [u8]>,
    ) -> Result<Option<Self>, ParseError> {
        Self::parse_any(rtype, parser).map(Some)
    }
}

impl ComposeRecordData for UnknownRecordData {
    fn rdlen(&self) -> usize {
        self.data.len()
    }

    fn compose_rdata<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError> {
        // OPT data is never opaque. It lives in OptRecord.
        if self.rtype == Rtype::OPT {
            return Err(ComposeError::InvalidRtype(self.rtype));
        }
        target.append_slice(self.data.as_ref())?;
        Ok(())
    }
}

//--- Display

impl fmt::Display for UnknownRecordData {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "\\# {}", self.data.len())?;
        if !self.data.is_empty() {
            f.write_str(" ")?;
            for ch in self.data.as_ref() {
                write!(f, "{:02x}", ch)?;
            }
        }
        Ok(())
    }
}

//============ Testing =======================================================

#[cfg(test)]
pub(crate) mod test {
    use super::*;

    /// Checks that composing and parsing data results in the same value.
    ///
    /// Also checks that the announced length is exact.
    pub fn test_compose_parse<Data>(data: &Data)
    where
        Data: ComposeRecordData + ParseRecordData + fmt::Debug + PartialEq,
    {
        let buf = encode_rdata(data).unwrap();
        assert_eq!(buf.len(), data.rdlen() + 2);
        let (parsed, consumed) =
            decode_rdata::<Data>(data.rtype(), &buf, 0).unwrap();
        assert_eq!(&parsed, data);
        assert_eq!(consumed, buf.len());
    }

    #[test]
    fn unknown_compose_parse() {
        let data = UnknownRecordData::from_octets(
            Rtype::from_int(0xff12),
            Bytes::from_static(b"\x01\x02\x03"),
        );
        test_compose_parse(&data);
        assert_eq!(encode_rdata(&data).unwrap(), b"\x00\x03\x01\x02\x03");
    }

    #[test]
    fn unknown_refuses_opt() {
        let data = UnknownRecordData::from_octets(Rtype::OPT, Bytes::new());
        assert_eq!(
            encode_rdata(&data),
            Err(ComposeError::InvalidRtype(Rtype::OPT))
        );
    }

    #[test]
    fn len_rdata_bounds() {
        // Announced length is longer than the buffer.
        assert_eq!(
            decode_rdata::<UnknownRecordData>(Rtype::NULL, b"\x00\x05ab", 0),
            Err(ParseError::ShortInput)
        );
        // The outer parser only moves past the announced length.
        let (data, consumed) = decode_rdata::<UnknownRecordData>(
            Rtype::NULL,
            b"\xff\x00\x01ab",
            1,
        )
        .unwrap();
        assert_eq!(data.data().as_ref(), b"a");
        assert_eq!(consumed, 3);
    }

    #[test]
    fn display_unknown() {
        let data = UnknownRecordData::from_octets(
            Rtype::NULL,
            Bytes::from_static(b"\xde\xad"),
        );
        assert_eq!(data.to_string(), "\\# 2 dead");
        let data = UnknownRecordData::from_octets(Rtype::NULL, Bytes::new());
        assert_eq!(data.to_string(), "\\# 0");
    }
}
