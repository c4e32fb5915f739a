//! EDNS option for carrying client subnet information.
//!
//! The option in this module – [`ClientSubnet`] – can be used by a resolver
//! to include information about the network a query originated from in its
//! own query to an authoritative server so it can tailor its response for
//! that network.
//!
//! The option is defined in [RFC 7871](https://tools.ietf.org/html/rfc7871)
//! which also includes some guidance on its use.

use super::super::iana::OptionCode;
use super::super::wire::{Compose, ComposeError, ParseError};
use super::{ComposeOptData, OptData, ParseOptData};
use core::fmt;
use octseq::builder::OctetsBuilder;
use octseq::parse::Parser;
use std::net::IpAddr;

//------------ ClientSubnet --------------------------------------------------

/// Option data for the client subnet option.
///
/// The option identifies the network through an address prefix, i.e., an
/// IP address of which only a certain number of left-side bits is
/// interpreted. The option uses two such numbers: The _source prefix length_
/// is the number of bits provided by the client when describing its network
/// and the _scope prefix length_ is the number of bits that the server
/// considered when providing the answer.
///
/// The address family is kept separately from the address. It is derived
/// from the address when creating a value but may be anything when the
/// value was parsed from the wire.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ClientSubnet {
    /// The address family, 1 for IPv4 and 2 for IPv6.
    family: u16,

    /// The source prefix length.
    source_prefix_len: u8,

    /// The scope prefix length.
    scope_prefix_len: u8,

    /// The address.
    addr: IpAddr,
}

impl ClientSubnet {
    /// The option code for this option.
    pub(super) const CODE: OptionCode = OptionCode::CLIENT_SUBNET;

    /// The address family value for IPv4.
    pub const FAMILY_IPV4: u16 = 1;

    /// The address family value for IPv6.
    pub const FAMILY_IPV6: u16 = 2;

    /// Creates a new client subnet value.
    ///
    /// The function is very forgiving regarding the arguments and corrects
    /// illegal values. That is, it limit the prefix lengths given to a number
    /// meaningful for the address family. It will also set all bits not
    /// covered by the source prefix length in the address to zero.
    #[must_use]
    pub fn new(
        source_prefix_len: u8,
        scope_prefix_len: u8,
        addr: IpAddr,
    ) -> ClientSubnet {
        let source_prefix_len = normalize_prefix_len(addr, source_prefix_len);
        let scope_prefix_len = normalize_prefix_len(addr, scope_prefix_len);
        ClientSubnet {
            family: match addr {
                IpAddr::V4(_) => Self::FAMILY_IPV4,
                IpAddr::V6(_) => Self::FAMILY_IPV6,
            },
            source_prefix_len,
            scope_prefix_len,
            addr: addr_apply_mask(addr, source_prefix_len),
        }
    }

    /// Returns the address family.
    pub fn family(&self) -> u16 {
        self.family
    }

    /// Returns the source prefix length.
    ///
    /// The source prefix length is the prefix length as specified by the
    /// client in a query.
    pub fn source_prefix_len(&self) -> u8 {
        self.source_prefix_len
    }

    /// Returns the scope prefix length.
    ///
    /// The scope prefix length is the prefix length used by the server for
    /// its answer.
    pub fn scope_prefix_len(&self) -> u8 {
        self.scope_prefix_len
    }

    /// Returns the address.
    pub fn addr(&self) -> IpAddr {
        self.addr
    }

    /// Parses a value from its wire format.
    ///
    /// The address octets are padded with zeros to four octets for family 1
    /// and to sixteen octets for any other family.
    pub fn parse(parser: &mut Parser<'_, [u8]>) -> Result<Self, ParseError> {
        let family = parser.parse_u16_be()?;
        let source_prefix_len = parser.parse_u8()?;
        let scope_prefix_len = parser.parse_u8()?;
        let len = parser.remaining();
        let addr = if family == Self::FAMILY_IPV4 {
            let mut buf = [0; 4];
            parser.parse_buf(buf.get_mut(..len).ok_or_else(addr_len_err)?)?;
            IpAddr::from(buf)
        } else {
            let mut buf = [0; 16];
            parser.parse_buf(buf.get_mut(..len).ok_or_else(addr_len_err)?)?;
            IpAddr::from(buf)
        };
        Ok(ClientSubnet {
            family,
            source_prefix_len,
            scope_prefix_len,
            addr,
        })
    }
}

//--- OptData

impl OptData for ClientSubnet {
    fn code(&self) -> OptionCode {
        Self::CODE
    }
}

impl ParseOptData for ClientSubnet {
    fn parse_option(
        code: OptionCode,
        parser: &mut Parser<'_, [u8]>,
    ) -> Result<Option<Self>, ParseError> {
        if code == Self::CODE {
            Self::parse(parser).map(Some)
        } else {
            Ok(None)
        }
    }
}

impl ComposeOptData for ClientSubnet {
    fn compose_len(&self) -> usize {
        prefix_bytes(self.source_prefix_len) + 4
    }

    fn compose_option<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError> {
        self.family.compose(target)?;
        self.source_prefix_len.compose(target)?;
        self.scope_prefix_len.compose(target)?;
        let prefix_bytes = prefix_bytes(self.source_prefix_len);
        let octets = match self.addr {
            IpAddr::V4(addr) => addr.octets().to_vec(),
            IpAddr::V6(addr) => addr.octets().to_vec(),
        };
        target.append_slice(
            octets.get(..prefix_bytes).ok_or(ComposeError::LongData)?,
        )?;
        Ok(())
    }
}

//--- Display

impl fmt::Display for ClientSubnet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.scope_prefix_len != 0 {
            write!(
                f,
                "{}/{}/{}",
                self.addr, self.source_prefix_len, self.scope_prefix_len
            )
        } else {
            write!(f, "{}/{}", self.addr, self.source_prefix_len)
        }
    }
}

//------------ Helper Functions ----------------------------------------------

fn addr_len_err() -> ParseError {
    ParseError::form_error("invalid address length in client subnet option")
}

/// Returns the number of bytes needed for a prefix of a given length
fn prefix_bytes(bits: u8) -> usize {
    (usize::from(bits) + 7) / 8
}

/// Only keeps the left-most `mask` bits and zeros out the rest.
fn apply_bit_mask(buf: &mut [u8], mask: usize) {
    // skip full bytes covered by prefix length
    let mut p = mask / 8;
    if p >= buf.len() {
        return;
    }

    // clear extra bits in a byte
    let bits = mask % 8;
    if bits != 0 {
        buf[p] &= 0xff << (8 - bits);
        p += 1;
    }

    // clear the rest bytes
    for octet in &mut buf[p..] {
        *octet = 0;
    }
}

/// Zeros out unused bits in a address prefix of the given length
fn addr_apply_mask(addr: IpAddr, len: u8) -> IpAddr {
    match addr {
        IpAddr::V4(a) => {
            let mut array = a.octets();
            apply_bit_mask(&mut array, len as usize);
            array.into()
        }
        IpAddr::V6(a) => {
            let mut array = a.octets();
            apply_bit_mask(&mut array, len as usize);
            array.into()
        }
    }
}

/// Limits a prefix length for the given address.
fn normalize_prefix_len(addr: IpAddr, len: u8) -> u8 {
    let max = match addr {
        IpAddr::V4(_) => 32,
        IpAddr::V6(_) => 128,
    };

    core::cmp::min(len, max)
}

//============ Testing =======================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{Ipv4Addr, Ipv6Addr};

    fn compose(value: &ClientSubnet) -> Vec<u8> {
        let mut target = Vec::new();
        value.compose_option(&mut target).unwrap();
        assert_eq!(target.len(), value.compose_len());
        target
    }

    #[test]
    fn new_masks_and_clamps() {
        let cs = ClientSubnet::new(
            24, 0, IpAddr::V4(Ipv4Addr::new(203, 0, 113, 77)),
        );
        assert_eq!(cs.addr(), IpAddr::V4(Ipv4Addr::new(203, 0, 113, 0)));
        assert_eq!(cs.family(), 1);

        let cs = ClientSubnet::new(
            20, 0, IpAddr::V4(Ipv4Addr::new(10, 255, 255, 1)),
        );
        assert_eq!(cs.addr(), IpAddr::V4(Ipv4Addr::new(10, 255, 240, 0)));

        let cs = ClientSubnet::new(
            200, 200, IpAddr::V6(Ipv6Addr::LOCALHOST),
        );
        assert_eq!(cs.source_prefix_len(), 128);
        assert_eq!(cs.scope_prefix_len(), 128);
        assert_eq!(cs.family(), 2);
    }

    #[test]
    fn wire() {
        let cs = ClientSubnet::new(
            24, 0, IpAddr::V4(Ipv4Addr::new(203, 0, 113, 0)),
        );
        let buf = compose(&cs);
        assert_eq!(buf, b"\x00\x01\x18\x00\xcb\x00\x71");
        let mut parser = Parser::from_ref(buf.as_slice());
        assert_eq!(ClientSubnet::parse(&mut parser), Ok(cs));
        assert_eq!(parser.remaining(), 0);
    }

    #[test]
    fn parse_pads_by_family() {
        let buf = b"\x00\x02\x20\x00\x20\x01\x0d\xb8";
        let cs = ClientSubnet::parse(&mut Parser::from_ref(&buf[..]))
            .unwrap();
        assert_eq!(cs.addr(), "2001:db8::".parse::<IpAddr>().unwrap());

        let buf = b"\x00\x07\x08\x00\x0a";
        let cs = ClientSubnet::parse(&mut Parser::from_ref(&buf[..]))
            .unwrap();
        assert_eq!(cs.family(), 7);
        assert!(cs.addr().is_ipv6());

        let buf = b"\x00\x01\x20\x00\x01\x02\x03\x04\x05";
        assert!(matches!(
            ClientSubnet::parse(&mut Parser::from_ref(&buf[..])),
            Err(ParseError::Form(_))
        ));
    }

    #[test]
    fn display() {
        let cs = ClientSubnet::new(
            24, 16, IpAddr::V4(Ipv4Addr::new(192, 0, 2, 0)),
        );
        assert_eq!(cs.to_string(), "192.0.2.0/24/16");
    }
}
