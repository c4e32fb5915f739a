//! Resource data implementations.
//!
//! This module contains types for the record data of the record types this
//! crate knows how to encode and decode. Data for all other record types is
//! kept as raw octets in
//! [`UnknownRecordData`][crate::base::rdata::UnknownRecordData].
//!
//! The types are named identically to the [`Rtype`] constant they
//! implement. They are grouped into submodules for the RFCs they are
//! defined in or the area of the protocol they belong to. All types are
//! also re-exported at the top level here. Ie., for the AAAA record type,
//! you can simply `use domain_wire::rdata::Aaaa` instead of
//! `use domain_wire::rdata::aaaa::Aaaa`.
//!
//! The enum [`AllRecordData`] dispatches over all these types by record
//! type. This is what records parsed from a message contain.
//!
//! [`Rtype`]: crate::base::iana::Rtype

#[macro_use]
mod macros;

// The rdata_types! macro (defined in self::macros) reexports the record data
// types here and creates the AllRecordData enum containing all record types
// that can be parsed from a message.
//
// The macro also adds a variant for unknown record data for all types not
// listed.
rdata_types! {
    rfc1035::{
        A,
        Ns,
        Cname,
        Soa,
        Ptr,
        Hinfo,
        Mx,
        Txt,
        Null,
    }
    rfc1183::{
        Rp,
    }
    aaaa::{
        Aaaa,
    }
    srv::{
        Srv,
    }
    dnssec::{
        Ds,
        Rrsig,
        Nsec,
        Dnskey,
    }
    nsec3::{
        Nsec3,
    }
    rfc6672::{
        Dname,
    }
    uri::{
        Uri,
    }
    caa::{
        Caa,
    }
}

pub use self::dnssec::{IllegalSignatureTime, RtypeBitmap, Timestamp};
pub use self::nsec3::{Nsec3Salt, Nsec3SaltError, OwnerHash, OwnerHashError};
pub use self::rfc1035::LongNullData;
pub use self::uri::IllegalUri;

//============ Testing =======================================================
