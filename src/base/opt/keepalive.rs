//! EDNS options to signal a variable TCP connection timeout.
//!
//! The option in this module – [`TcpKeepalive`] – allows a server to signal
//! to a client how long it should hold on to a TCP connection after having
//! received an answer.
//!
//! Note that his has nothing to do with the keepalive feature of TCP itself.
//!
//! This option is defined in [RFC 7828](https://tools.ietf.org/html/rfc7828).

use super::super::iana::OptionCode;
use super::super::wire::{Compose, ComposeError, Parse, ParseError};
use super::{ComposeOptData, OptData, ParseOptData};
use core::fmt;
use core::time::Duration;
use octseq::builder::OctetsBuilder;
use octseq::parse::Parser;

//------------ TcpKeepalive --------------------------------------------------

/// Option data for the edns-tcp-keepalive option.
///
/// The client includes the option without a value in its query to
/// indicate support for the option. The server then includes the option in
/// its response, including a 16-bit value that provides the idle time in
/// units of 100 milliseconds.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct TcpKeepalive(Option<u16>);

impl TcpKeepalive {
    /// The option code for this option.
    pub(super) const CODE: OptionCode = OptionCode::TCP_KEEPALIVE;

    /// Creates a new value from an optional idle timeout.
    ///
    /// The timeout is given in units of 100 milliseconds.
    #[must_use]
    pub fn new(timeout: Option<u16>) -> Self {
        TcpKeepalive(timeout)
    }

    /// Returns the idle timeout in units of 100 milliseconds.
    #[must_use]
    pub fn timeout(self) -> Option<u16> {
        self.0
    }

    /// Returns the idle timeout as a duration.
    #[must_use]
    pub fn duration(self) -> Option<Duration> {
        self.0.map(|t| Duration::from_millis(u64::from(t) * 100))
    }

    /// Parses an option data value from its wire format.
    pub fn parse(parser: &mut Parser<'_, [u8]>) -> Result<Self, ParseError> {
        match parser.remaining() {
            0 => Ok(Self::new(None)),
            2 => u16::parse(parser).map(|v| Self::new(Some(v))),
            _ => Err(ParseError::form_error("invalid TCP keepalive length")),
        }
    }
}

//--- OptData

impl OptData for TcpKeepalive {
    fn code(&self) -> OptionCode {
        Self::CODE
    }
}

impl ParseOptData for TcpKeepalive {
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

impl ComposeOptData for TcpKeepalive {
    fn compose_len(&self) -> usize {
        match self.0 {
            Some(_) => 2,
            None => 0,
        }
    }

    fn compose_option<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError> {
        match self.0 {
            Some(v) => v.compose(target),
            None => Ok(()),
        }
    }
}

//--- Display

impl fmt::Display for TcpKeepalive {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.0 {
            Some(v) => write!(f, "{}", v),
            None => write!(f, ""),
        }
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_lengths() {
        let parse = |buf: &[u8]| TcpKeepalive::parse(&mut Parser::from_ref(buf));
        assert_eq!(parse(b""), Ok(TcpKeepalive::new(None)));
        assert_eq!(parse(b"\x01\x2c"), Ok(TcpKeepalive::new(Some(300))));
        assert!(parse(b"\x01").is_err());
    }

    #[test]
    fn duration() {
        assert_eq!(
            TcpKeepalive::new(Some(15)).duration(),
            Some(Duration::from_millis(1500))
        );
        assert_eq!(TcpKeepalive::default().duration(), None);
    }
}
