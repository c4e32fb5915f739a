//! EDNS options for padding message sizes.
//!
//! The option in this module – [`Padding`] – allows to increase the
//! size of a DNS message to any desired value. This can be helpful with
//! confidentialty.
//!
//! The option is defined in [RFC 7830](https://tools.ietf.org/html/rfc7830).

use super::super::iana::OptionCode;
use super::super::wire::{ComposeError, ParseError};
use super::{ComposeOptData, OptData};
use core::fmt;
use octseq::builder::OctetsBuilder;

//------------ Padding -------------------------------------------------------

/// Option data for the padding option.
///
/// Since the content of the padding carries no meaning, the value only
/// keeps the number of padding octets. When composed, that many zero octets
/// are written. Received padding is not interpreted and only available as
/// the raw option data.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Padding(u16);

impl Padding {
    /// The option code for this option.
    pub(super) const CODE: OptionCode = OptionCode::PADDING;

    /// Creates padding of the given length.
    #[must_use]
    pub fn new(len: u16) -> Self {
        Padding(len)
    }

    /// Returns the number of padding octets.
    #[must_use]
    pub fn len(self) -> u16 {
        self.0
    }

    /// Returns whether this is zero-length padding.
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Creates padding from the content of a received option.
    ///
    /// Only the length of the data is kept.
    pub fn from_data(data: &[u8]) -> Result<Self, ParseError> {
        u16::try_from(data.len())
            .map(Padding)
            .map_err(|_| ParseError::form_error("long padding"))
    }
}

//--- OptData

impl OptData for Padding {
    fn code(&self) -> OptionCode {
        Self::CODE
    }
}

impl ComposeOptData for Padding {
    fn compose_len(&self) -> usize {
        self.0.into()
    }

    fn compose_option<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError> {
        const ZEROS: [u8; 64] = [0; 64];
        let mut len = usize::from(self.0);
        while len > 0 {
            let chunk = core::cmp::min(len, ZEROS.len());
            target.append_slice(&ZEROS[..chunk])?;
            len -= chunk;
        }
        Ok(())
    }
}

//--- Display

impl fmt::Display for Padding {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} octets", self.0)
    }
}
