//! Record data for OPT records.
//!
//! OPT records are meta records used by EDNS to convey additional data
//! about clients, servers, and the query being performed. Because these
//! records are fundamental for modern DNS operations, they are here instead
//! of in the `rdata` module and the types defined for operating on them
//! differ from how other record types are handled.
//!
//! An OPT record repurposes the class and TTL fields of the record framing.
//! The class carries the UDP payload size the sender can handle, the TTL
//! carries the upper bits of the extended response code, the EDNS version,
//! and a 16 bit flag word. The record data is a sequence of options, each
//! consisting of a 16 bit option code, a 16 bit length, and the option data.
//!
//! Each option is represented by an [`EdnsOption`]. It carries the raw
//! option data, a structured value, or both. Raw data is always preferred
//! when composing. Options with a structured value have a type of their own
//! in a sub-module here, which are re-exported.
//!
//! See [RFC 6891] for the definition of EDNS and OPT records.
//!
//! [RFC 6891]: https://tools.ietf.org/html/rfc6891

pub use self::keepalive::TcpKeepalive;
pub use self::keytag::KeyTag;
pub use self::padding::Padding;
pub use self::subnet::ClientSubnet;

pub mod keepalive;
pub mod keytag;
pub mod padding;
pub mod subnet;

use super::iana::{OptionCode, Rtype};
use super::name::Name;
use super::wire::{
    compose_len_prefix, parse_bytes, Compose, ComposeError, Parse,
    ParseError,
};
use bytes::Bytes;
use core::fmt;
use octseq::builder::OctetsBuilder;
use octseq::parse::Parser;
use std::vec::Vec;

/// The mask of the DNSSEC OK bit in the EDNS flag word.
pub const DNSSEC_OK: u16 = 1 << 15;

//------------ OptRecord -----------------------------------------------------

/// An OPT record.
///
/// The owner of an OPT record is always the root name, so the type has no
/// owner field. It is composed as the root name and checked to be the root
/// name when parsed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OptRecord {
    /// The UDP payload size field from the record header.
    udp_payload_size: u16,

    /// The extended rcode.
    ext_rcode: u8,

    /// The EDNS version.
    version: u8,

    /// The EDNS flags.
    flags: u16,

    /// The options.
    options: Vec<EdnsOption>,
}

impl OptRecord {
    /// The UDP payload size used when none is given.
    pub const DEFAULT_UDP_PAYLOAD_SIZE: u16 = 4096;

    /// Creates a new OPT record with default values and no options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the UDP payload size.
    ///
    /// Through this field a sender of a message can signal the maximum size
    /// of UDP payload the sender is able to handle when receiving messages.
    /// This value refers to the abilities of the sender’s DNS implementation,
    /// not such things as network MTUs. Which means that the largest UDP
    /// payload that can actually be sent back to the sender may be smaller.
    pub fn udp_payload_size(&self) -> u16 {
        self.udp_payload_size
    }

    /// Sets the UDP payload size value.
    pub fn set_udp_payload_size(&mut self, value: u16) {
        self.udp_payload_size = value
    }

    /// Returns the extended rcode.
    ///
    /// These are the upper eight bits of the twelve bit response code. The
    /// lower four bits are in the message header.
    pub fn ext_rcode(&self) -> u8 {
        self.ext_rcode
    }

    /// Sets the extended rcode.
    pub fn set_ext_rcode(&mut self, value: u8) {
        self.ext_rcode = value
    }

    /// Returns the EDNS version of the OPT header.
    ///
    /// Only EDNS version 0 is currently defined.
    pub fn version(&self) -> u8 {
        self.version
    }

    /// Sets the EDNS version.
    pub fn set_version(&mut self, version: u8) {
        self.version = version
    }

    /// Returns the EDNS flag word.
    pub fn flags(&self) -> u16 {
        self.flags
    }

    /// Sets the EDNS flag word.
    pub fn set_flags(&mut self, flags: u16) {
        self.flags = flags
    }

    /// Returns whether the DNSSEC OK flag is set.
    pub fn dnssec_ok(&self) -> bool {
        self.flags & DNSSEC_OK != 0
    }

    /// Sets the DNSSEC OK flag.
    pub fn set_dnssec_ok(&mut self, value: bool) {
        if value {
            self.flags |= DNSSEC_OK
        } else {
            self.flags &= !DNSSEC_OK
        }
    }

    /// Returns the options.
    pub fn options(&self) -> &[EdnsOption] {
        &self.options
    }

    /// Appends an option.
    pub fn push(&mut self, option: EdnsOption) {
        self.options.push(option)
    }

    /// Returns the first option with the given code.
    pub fn first(&self, code: OptionCode) -> Option<&EdnsOption> {
        self.options.iter().find(|opt| opt.code() == code)
    }

    /// Returns the length of the record data.
    fn rdlen(&self) -> usize {
        self.options.iter().map(EdnsOption::compose_len).sum()
    }

    /// Parses the record after the owner name and record type.
    ///
    /// This is used when parsing records where the record type has to be
    /// known before deciding how to continue.
    pub(crate) fn parse_fields(
        parser: &mut Parser<'_, [u8]>,
    ) -> Result<Self, ParseError> {
        let udp_payload_size = u16::parse(parser)?;
        let ext_rcode = u8::parse(parser)?;
        let version = u8::parse(parser)?;
        let flags = u16::parse(parser)?;
        let rdlen = usize::from(u16::parse(parser)?);
        let mut data = parser.parse_parser(rdlen)?;
        let mut options = Vec::new();
        while data.remaining() > 0 {
            options.push(EdnsOption::parse(&mut data)?);
        }
        Ok(OptRecord {
            udp_payload_size,
            ext_rcode,
            version,
            flags,
            options,
        })
    }
}

//--- Default

impl Default for OptRecord {
    fn default() -> Self {
        Self {
            udp_payload_size: Self::DEFAULT_UDP_PAYLOAD_SIZE,
            ext_rcode: 0,
            version: 0,
            flags: 0,
            options: Vec::new(),
        }
    }
}

//--- Compose and Parse

impl Compose for OptRecord {
    fn compose_len(&self) -> usize {
        // root owner, type, class, TTL, RDLENGTH
        1 + 2 + 2 + 4 + 2 + self.rdlen()
    }

    fn compose<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError> {
        Name::root().compose(target)?;
        Rtype::OPT.compose(target)?;
        self.udp_payload_size.compose(target)?;
        self.ext_rcode.compose(target)?;
        self.version.compose(target)?;
        self.flags.compose(target)?;
        compose_len_prefix(self.rdlen(), target)?;
        self.options.iter().try_for_each(|opt| opt.compose(target))
    }
}

impl Parse for OptRecord {
    fn parse(parser: &mut Parser<'_, [u8]>) -> Result<Self, ParseError> {
        if !Name::parse(parser)?.is_root() {
            return Err(ParseError::form_error("OPT record with non-root owner"));
        }
        if Rtype::parse(parser)? != Rtype::OPT {
            return Err(ParseError::form_error("expected OPT record"));
        }
        Self::parse_fields(parser)
    }
}

//------------ EdnsOption ----------------------------------------------------

/// A single EDNS option.
///
/// The option keeps the raw option data, a structured value, or both. A
/// parsed option always has the raw data and, for the option codes that
/// have a structured value type, the value as well.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EdnsOption {
    /// The option code.
    code: OptionCode,

    /// The raw option data.
    data: Option<Bytes>,

    /// The structured option value.
    value: Option<OptionValue>,
}

impl EdnsOption {
    /// Creates an option from all its parts.
    ///
    /// The value is not checked against the code. Composing an option whose
    /// value is for a different code and that has no raw data fails.
    #[must_use]
    pub fn new(
        code: OptionCode,
        data: Option<Bytes>,
        value: Option<OptionValue>,
    ) -> Self {
        EdnsOption { code, data, value }
    }

    /// Creates an option with raw option data.
    #[must_use]
    pub fn from_data(code: OptionCode, data: Bytes) -> Self {
        Self::new(code, Some(data), None)
    }

    /// Creates an option from a structured value.
    #[must_use]
    pub fn from_value(value: impl Into<OptionValue>) -> Self {
        let value = value.into();
        Self::new(value.code(), None, Some(value))
    }

    /// Creates an option with neither data nor value.
    ///
    /// This is only composable for the TCP keepalive option, resulting in
    /// an option without a timeout, and the padding option, resulting in
    /// empty padding.
    #[must_use]
    pub fn empty(code: OptionCode) -> Self {
        Self::new(code, None, None)
    }

    /// Returns the option code.
    pub fn code(&self) -> OptionCode {
        self.code
    }

    /// Returns the raw option data if available.
    pub fn data(&self) -> Option<&Bytes> {
        self.data.as_ref()
    }

    /// Returns the structured value if available.
    pub fn value(&self) -> Option<&OptionValue> {
        self.value.as_ref()
    }

    /// Returns the client subnet value if this is such an option.
    pub fn client_subnet(&self) -> Option<&ClientSubnet> {
        match self.value {
            Some(OptionValue::ClientSubnet(ref value)) => Some(value),
            _ => None,
        }
    }

    /// Returns the TCP keepalive value if this is such an option.
    pub fn tcp_keepalive(&self) -> Option<TcpKeepalive> {
        match self.value {
            Some(OptionValue::TcpKeepalive(value)) => Some(value),
            _ => None,
        }
    }

    /// Returns the key tag value if this is such an option.
    pub fn key_tag(&self) -> Option<&KeyTag> {
        match self.value {
            Some(OptionValue::KeyTag(ref value)) => Some(value),
            _ => None,
        }
    }

    /// Returns the option data length.
    ///
    /// Returns `None` if the option cannot be composed.
    fn data_len(&self) -> Option<usize> {
        if let Some(data) = self.data.as_ref() {
            return Some(data.len());
        }
        match self.value {
            Some(ref value) if value.code() == self.code => {
                Some(value.compose_len())
            }
            Some(_) => None,
            None => match self.code {
                OptionCode::TCP_KEEPALIVE | OptionCode::PADDING => Some(0),
                _ => None,
            },
        }
    }
}

//--- Compose and Parse

impl Compose for EdnsOption {
    /// Returns the composed length.
    ///
    /// For an option that cannot be composed, this is the length of the
    /// option header only.
    fn compose_len(&self) -> usize {
        4 + self.data_len().unwrap_or(0)
    }

    fn compose<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError> {
        let len = self
            .data_len()
            .ok_or(ComposeError::UnencodableOption(self.code))?;
        self.code.compose(target)?;
        compose_len_prefix(len, target)?;
        match (self.data.as_ref(), self.value.as_ref()) {
            (Some(data), _) => {
                target.append_slice(data.as_ref())?;
                Ok(())
            }
            (None, Some(value)) => value.compose_option(target),
            (None, None) => Ok(()),
        }
    }
}

impl Parse for EdnsOption {
    fn parse(parser: &mut Parser<'_, [u8]>) -> Result<Self, ParseError> {
        let code = OptionCode::parse(parser)?;
        let len = usize::from(u16::parse(parser)?);
        let data = parse_bytes(parser, len)?;
        let value = OptionValue::parse_option(
            code,
            &mut Parser::from_ref(&data[..]),
        )?;
        Ok(EdnsOption {
            code,
            data: Some(data),
            value,
        })
    }
}

//--- Display

impl fmt::Display for EdnsOption {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match (self.value.as_ref(), self.data.as_ref()) {
            (Some(value), _) => write!(f, "{}: {}", self.code, value),
            (None, Some(data)) => {
                write!(f, "{}: ", self.code)?;
                for ch in data.as_ref() {
                    write!(f, "{:02x}", ch)?;
                }
                Ok(())
            }
            (None, None) => write!(f, "{}", self.code),
        }
    }
}

//------------ OptionValue ---------------------------------------------------

/// The structured value of an option.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum OptionValue {
    /// A client subnet option.
    ClientSubnet(ClientSubnet),

    /// A TCP keepalive option.
    TcpKeepalive(TcpKeepalive),

    /// A padding option.
    Padding(Padding),

    /// A key tag option.
    KeyTag(KeyTag),
}

impl OptData for OptionValue {
    fn code(&self) -> OptionCode {
        match *self {
            OptionValue::ClientSubnet(ref v) => v.code(),
            OptionValue::TcpKeepalive(ref v) => v.code(),
            OptionValue::Padding(ref v) => v.code(),
            OptionValue::KeyTag(ref v) => v.code(),
        }
    }
}

impl ParseOptData for OptionValue {
    fn parse_option(
        code: OptionCode,
        parser: &mut Parser<'_, [u8]>,
    ) -> Result<Option<Self>, ParseError> {
        // Padding carries no information, so it is left as raw data.
        Ok(match code {
            ClientSubnet::CODE => {
                ClientSubnet::parse_option(code, parser)?.map(Into::into)
            }
            TcpKeepalive::CODE => {
                TcpKeepalive::parse_option(code, parser)?.map(Into::into)
            }
            KeyTag::CODE => KeyTag::parse_option(code, parser)?.map(Into::into),
            _ => None,
        })
    }
}

impl ComposeOptData for OptionValue {
    fn compose_len(&self) -> usize {
        match *self {
            OptionValue::ClientSubnet(ref v) => v.compose_len(),
            OptionValue::TcpKeepalive(ref v) => v.compose_len(),
            OptionValue::Padding(ref v) => v.compose_len(),
            OptionValue::KeyTag(ref v) => v.compose_len(),
        }
    }

    fn compose_option<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError> {
        match *self {
            OptionValue::ClientSubnet(ref v) => v.compose_option(target),
            OptionValue::TcpKeepalive(ref v) => v.compose_option(target),
            OptionValue::Padding(ref v) => v.compose_option(target),
            OptionValue::KeyTag(ref v) => v.compose_option(target),
        }
    }
}

//--- From

impl From<ClientSubnet> for OptionValue {
    fn from(value: ClientSubnet) -> Self {
        OptionValue::ClientSubnet(value)
    }
}

impl From<TcpKeepalive> for OptionValue {
    fn from(value: TcpKeepalive) -> Self {
        OptionValue::TcpKeepalive(value)
    }
}

impl From<Padding> for OptionValue {
    fn from(value: Padding) -> Self {
        OptionValue::Padding(value)
    }
}

impl From<KeyTag> for OptionValue {
    fn from(value: KeyTag) -> Self {
        OptionValue::KeyTag(value)
    }
}

//--- Display

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            OptionValue::ClientSubnet(ref v) => v.fmt(f),
            OptionValue::TcpKeepalive(ref v) => v.fmt(f),
            OptionValue::Padding(ref v) => v.fmt(f),
            OptionValue::KeyTag(ref v) => v.fmt(f),
        }
    }
}

//------------ OptData -------------------------------------------------------

/// A type representing an OPT option.
///
/// The type needs to be able to report the option code to use for the
/// encoding via the [`code`][Self::code] method.
pub trait OptData {
    /// Returns the option code associated with this option.
    fn code(&self) -> OptionCode;
}

//------------ ParseOptData --------------------------------------------------

/// An OPT option that can be parsed from the record data.
pub trait ParseOptData: Sized {
    /// Parses the option code data.
    ///
    /// The data is for an option of type `code`. The function may decide
    /// whether it wants to parse data for that type. It should return
    /// `Ok(None)` if it doesn’t.
    ///
    /// The `parser` is positioned at the beginning of the option data and
    /// is limited to the length of the data.
    fn parse_option(
        code: OptionCode,
        parser: &mut Parser<'_, [u8]>,
    ) -> Result<Option<Self>, ParseError>;
}

//------------ ComposeOptData ------------------------------------------------

/// An OPT option that can be written to wire format.
pub trait ComposeOptData: OptData {
    /// Returns the length of the option data.
    fn compose_len(&self) -> usize;

    /// Appends the option data to `target`.
    fn compose_option<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError>;
}

//============ Testing =======================================================
