//! Creating and consuming data in wire format.
//!
//! Composing always happens in two passes. First, the exact length of the
//! data is determined via [`Compose::compose_len`]. Then the data is
//! appended to a target that was sized for exactly this length. Parsing
//! works on a [`Parser`] atop the complete message so that compression
//! pointers can refer back to any earlier position.

use bytes::Bytes;
use core::fmt;
use octseq::builder::{OctetsBuilder, ShortBuf};
use octseq::parse::{Parser, ShortInput};
use std::net::{Ipv4Addr, Ipv6Addr};
use std::vec::Vec;

//------------ encode and decode ---------------------------------------------

/// Encodes a value into a newly allocated vec.
///
/// The vec is allocated with the exact length reported by the value's
/// [`compose_len`][Compose::compose_len] before anything is written.
pub fn encode<T: Compose + ?Sized>(value: &T) -> Result<Vec<u8>, ComposeError> {
    let len = value.compose_len();
    let mut target = Vec::with_capacity(len);
    value.compose(&mut target)?;
    if target.len() != len {
        return Err(ComposeError::LengthMismatch);
    }
    Ok(target)
}

/// Encodes a value into `buf` starting at `offset`.
///
/// Returns the number of octets written. Fails with
/// [`ComposeError::ShortBuf`] if the value doesn’t fit.
pub fn encode_into<T: Compose + ?Sized>(
    value: &T,
    buf: &mut [u8],
    offset: usize,
) -> Result<usize, ComposeError> {
    let mut target = SliceTarget::new(buf, offset)?;
    value.compose(&mut target)?;
    Ok(target.pos() - offset)
}

/// Decodes a value from `buf` starting at `offset`.
///
/// Returns the value and the number of octets consumed. Any compression
/// pointers are resolved against the whole of `buf`.
pub fn decode<T: Parse>(
    buf: &[u8],
    offset: usize,
) -> Result<(T, usize), ParseError> {
    let mut parser = Parser::from_ref(buf);
    parser.seek(offset)?;
    let res = T::parse(&mut parser)?;
    Ok((res, parser.pos() - offset))
}

/// Composes a 16 bit length prefix.
pub(crate) fn compose_len_prefix<Target: OctetsBuilder + ?Sized>(
    len: usize,
    target: &mut Target,
) -> Result<(), ComposeError> {
    u16::try_from(len)
        .map_err(|_| ComposeError::LongData)?
        .compose(target)
}

/// Takes `len` octets from the parser as an owned bytes value.
pub(crate) fn parse_bytes(
    parser: &mut Parser<'_, [u8]>,
    len: usize,
) -> Result<Bytes, ParseError> {
    let res = Bytes::copy_from_slice(parser.peek(len)?);
    parser.advance(len)?;
    Ok(res)
}

/// Takes all remaining octets from the parser.
pub(crate) fn parse_remaining(
    parser: &mut Parser<'_, [u8]>,
) -> Result<Bytes, ParseError> {
    let len = parser.remaining();
    parse_bytes(parser, len)
}

//------------ Compose -------------------------------------------------------

/// A type that can be composed into wire format.
pub trait Compose {
    /// Returns the exact number of octets `compose` will append.
    fn compose_len(&self) -> usize;

    /// Appends the wire format of the value to `target`.
    fn compose<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError>;
}

impl<'a, T: Compose + ?Sized> Compose for &'a T {
    fn compose_len(&self) -> usize {
        (*self).compose_len()
    }

    fn compose<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError> {
        (*self).compose(target)
    }
}

macro_rules! compose_to_be_bytes {
    ( $type:ident ) => {
        impl Compose for $type {
            fn compose_len(&self) -> usize {
                ($type::BITS >> 3) as usize
            }

            fn compose<Target: OctetsBuilder + ?Sized>(
                &self,
                target: &mut Target,
            ) -> Result<(), ComposeError> {
                target.append_slice(&self.to_be_bytes())?;
                Ok(())
            }
        }
    };
}

compose_to_be_bytes!(u8);
compose_to_be_bytes!(u16);
compose_to_be_bytes!(u32);

impl Compose for Ipv4Addr {
    fn compose_len(&self) -> usize {
        4
    }

    fn compose<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError> {
        target.append_slice(&self.octets())?;
        Ok(())
    }
}

impl Compose for Ipv6Addr {
    fn compose_len(&self) -> usize {
        16
    }

    fn compose<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError> {
        target.append_slice(&self.octets())?;
        Ok(())
    }
}

//------------ Parse ---------------------------------------------------------

/// A type that can extract a value from a parser.
///
/// If parsing fails and an error is returned, the parser’s position
/// should be considered to be undefined.
pub trait Parse: Sized {
    /// Extracts a value from the beginning of `parser`.
    fn parse(parser: &mut Parser<'_, [u8]>) -> Result<Self, ParseError>;
}

impl Parse for u8 {
    fn parse(parser: &mut Parser<'_, [u8]>) -> Result<Self, ParseError> {
        parser.parse_u8().map_err(Into::into)
    }
}

impl Parse for u16 {
    fn parse(parser: &mut Parser<'_, [u8]>) -> Result<Self, ParseError> {
        parser.parse_u16_be().map_err(Into::into)
    }
}

impl Parse for u32 {
    fn parse(parser: &mut Parser<'_, [u8]>) -> Result<Self, ParseError> {
        parser.parse_u32_be().map_err(Into::into)
    }
}

impl Parse for Ipv4Addr {
    fn parse(parser: &mut Parser<'_, [u8]>) -> Result<Self, ParseError> {
        let mut buf = [0u8; 4];
        parser.parse_buf(&mut buf)?;
        Ok(buf.into())
    }
}

impl Parse for Ipv6Addr {
    fn parse(parser: &mut Parser<'_, [u8]>) -> Result<Self, ParseError> {
        let mut buf = [0u8; 16];
        parser.parse_buf(&mut buf)?;
        Ok(buf.into())
    }
}

//------------ SliceTarget ---------------------------------------------------

/// An octets builder writing into a fixed slice at an explicit cursor.
///
/// Unlike a vec, the target never grows. Appending beyond the end of the
/// slice fails with [`ShortBuf`].
pub struct SliceTarget<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> SliceTarget<'a> {
    /// Creates a target writing into `buf` starting at `pos`.
    pub fn new(buf: &'a mut [u8], pos: usize) -> Result<Self, ShortBuf> {
        if pos > buf.len() {
            return Err(ShortBuf);
        }
        Ok(SliceTarget { buf, pos })
    }

    /// Returns the current cursor position.
    pub fn pos(&self) -> usize {
        self.pos
    }
}

impl<'a> OctetsBuilder for SliceTarget<'a> {
    type AppendError = ShortBuf;

    fn append_slice(&mut self, slice: &[u8]) -> Result<(), Self::AppendError> {
        let end = self.pos.checked_add(slice.len()).ok_or(ShortBuf)?;
        self.buf
            .get_mut(self.pos..end)
            .ok_or(ShortBuf)?
            .copy_from_slice(slice);
        self.pos = end;
        Ok(())
    }
}

//============ Error Types ===================================================

//------------ ComposeError --------------------------------------------------

/// An error happened while composing data.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ComposeError {
    /// The target ran out of space.
    ShortBuf,

    /// Data exceeded the size of its length field.
    LongData,

    /// An EDNS option had neither raw data nor a usable value.
    UnencodableOption(crate::base::iana::OptionCode),

    /// Record data cannot be composed for this record type.
    InvalidRtype(crate::base::iana::Rtype),

    /// The composed data differed in length from the announced length.
    LengthMismatch,
}

impl<T: Into<ShortBuf>> From<T> for ComposeError {
    fn from(_: T) -> Self {
        ComposeError::ShortBuf
    }
}

impl fmt::Display for ComposeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ComposeError::ShortBuf => f.write_str("short buffer"),
            ComposeError::LongData => f.write_str("long data"),
            ComposeError::UnencodableOption(code) => {
                write!(f, "cannot encode EDNS option {}", code)
            }
            ComposeError::InvalidRtype(rtype) => {
                write!(f, "cannot encode record data for type {}", rtype)
            }
            ComposeError::LengthMismatch => {
                f.write_str("composed length differs from announced length")
            }
        }
    }
}

impl std::error::Error for ComposeError {}

//------------ ParseError ----------------------------------------------------

/// An error happened while parsing data.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ParseError {
    /// An attempt was made to go beyond the end of the parser.
    ShortInput,

    /// A formatting error occurred.
    Form(FormError),
}

impl ParseError {
    /// Creates a new parse error as a form error with the given message.
    pub fn form_error(msg: &'static str) -> Self {
        FormError::new(msg).into()
    }
}

//--- From

impl From<ShortInput> for ParseError {
    fn from(_: ShortInput) -> Self {
        ParseError::ShortInput
    }
}

impl From<FormError> for ParseError {
    fn from(err: FormError) -> Self {
        ParseError::Form(err)
    }
}

//--- Display and Error

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ParseError::ShortInput => f.write_str("unexpected end of input"),
            ParseError::Form(ref err) => err.fmt(f),
        }
    }
}

impl std::error::Error for ParseError {}

//------------ FormError -----------------------------------------------------

/// A formatting error occured.
///
/// This is a generic error for all kinds of error cases that result in data
/// not being accepted. For diagnostics, the error is being given a static
/// string describing the error.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FormError(&'static str);

impl FormError {
    /// Creates a new form error value with the given diagnostics string.
    pub fn new(msg: &'static str) -> Self {
        FormError(msg)
    }
}

//--- Display and Error

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl std::error::Error for FormError {}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn compose_integers() {
        assert_eq!(encode(&0x12u8).unwrap(), b"\x12");
        assert_eq!(encode(&0x1234u16).unwrap(), b"\x12\x34");
        assert_eq!(encode(&0x1234_5678u32).unwrap(), b"\x12\x34\x56\x78");
        assert_eq!(0u32.compose_len(), 4);
    }

    #[test]
    fn decode_reports_consumed() {
        let buf = b"\xff\x12\x34\x56";
        assert_eq!(decode::<u16>(buf, 1).unwrap(), (0x1234, 2));
        assert_eq!(decode::<u32>(buf, 1), Err(ParseError::ShortInput));
        assert_eq!(decode::<u8>(buf, 5), Err(ParseError::ShortInput));
    }

    #[test]
    fn slice_target() {
        let mut buf = [0u8; 6];
        assert_eq!(encode_into(&0x0102u16, &mut buf, 1), Ok(2));
        assert_eq!(encode_into(&0x0304_0506u32, &mut buf, 2), Ok(4));
        assert_eq!(buf, [0, 1, 3, 4, 5, 6]);
        assert_eq!(
            encode_into(&0x0304_0506u32, &mut buf, 3),
            Err(ComposeError::ShortBuf)
        );
        assert_eq!(
            encode_into(&0u8, &mut buf, 7),
            Err(ComposeError::ShortBuf)
        );
    }

    #[test]
    fn addrs() {
        let addr = Ipv4Addr::new(192, 0, 2, 1);
        assert_eq!(encode(&addr).unwrap(), b"\xc0\x00\x02\x01");
        assert_eq!(decode::<Ipv4Addr>(b"\xc0\x00\x02\x01", 0), Ok((addr, 4)));
        let addr = Ipv6Addr::LOCALHOST;
        let (res, len) = decode::<Ipv6Addr>(&addr.octets(), 0).unwrap();
        assert_eq!((res, len), (addr, 16));
    }
}
