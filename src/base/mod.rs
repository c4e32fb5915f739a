//! Basics.
//!
//! This module provides types and traits for working with DNS data in wire
//! format. The types allow creating such data from scratch, turning it into
//! octets, and getting it back out of received octets.
//!
//!
//! ## Parsing and Composing Messages
//!
//! In order to easily distinguish the process of creating and disecting
//! wire-format messages other forms of representation conversion such as
//! reading from a zone file, we use the term *parsing* for extracting data
//! from a wire-format representation and *composing* for producing such a
//! representation.
//!
//! The fundamental traits for this are [`Compose`] and [`Parse`] in the
//! [wire] module. Composing writes into any octets builder. Parsing happens
//! on an [`octseq`] parser over the complete buffer holding a message. This
//! way, compressed domain names can be followed to their earlier position in
//! the message. The [wire] module also provides the boundary functions
//! [`encode`][wire::encode] and [`decode`][wire::decode] that report the
//! number of octets written or consumed.
//!
//! Unless you are implementing your own record types, you are unlikely to
//! ever having to deal with parsing and composing directly. Instead, the
//! type [`Message`] takes care of complete messages, including the length
//! framing used on stream transports.
//!
//!
//! # Types for DNS Data
//!
//! The module contains a number of types for DNS data, both fundamental
//! and composed. Because they often come with a number of support types,
//! they are arranged in submodules. You will find detailed explanations for
//! all of them in their module. These are:
//!
//! * [charstr] for DNS character strings,
//! * [header] for the header of DNS messages,
//! * [iana] for the IANA-assigned parameters,
//! * [name] for domain names,
//! * [opt] for the record data of OPT records used in EDNS,
//! * [question] for questions,
//! * [rdata] for the basic traits of record data, and
//! * [record] for DNS resource records.
//!
//! The record data for the individual record types lives in the top-level
//! [rdata][crate::rdata] module.
//!
//! [`Compose`]: wire::Compose
//! [`Parse`]: wire::Parse
//! [`Message`]: message::Message

pub use self::charstr::CharStr;
pub use self::header::{Header, HeaderCounts, HeaderSection};
pub use self::iana::{Class, Opcode, OptionCode, Rcode, Rtype};
pub use self::message::Message;
pub use self::name::Name;
pub use self::opt::OptRecord;
pub use self::question::Question;
pub use self::rdata::{ComposeRecordData, ParseRecordData, RecordData};
pub use self::record::{Record, ResourceRecord};
pub use self::wire::{ComposeError, FormError, ParseError};

pub mod charstr;
pub mod header;
pub mod iana;
pub mod message;
pub mod name;
pub mod opt;
pub mod question;
pub mod rdata;
pub mod record;
pub mod wire;
