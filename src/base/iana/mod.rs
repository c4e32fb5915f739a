//! IANA Definitions for DNS.
//!
//! This module contains types for parameters defined in IANA registries
//! that are relevant for the wire format codec.
//!
//! All types defined hereunder follow the same basic structure. They are
//! newtypes around the raw integer with associated constants for all
//! well-defined values. Any other integer is valid, too, and passes through
//! encoding and decoding unchanged. Converting to text uses the mnemonic if
//! there is one, otherwise either the decimal value or a generic prefixed
//! form such as `TYPE300` or `CLASS5`.
//!
//! Each type implements [`Compose`] and [`Parse`] for its wire format.
//!
//! [`Compose`]: crate::base::wire::Compose
//! [`Parse`]: crate::base::wire::Parse

pub use self::class::Class;
pub use self::opcode::Opcode;
pub use self::opt::OptionCode;
pub use self::rcode::Rcode;
pub use self::rtype::Rtype;

#[macro_use]
mod macros;

pub mod class;
pub mod opcode;
pub mod opt;
pub mod rcode;
pub mod rtype;
