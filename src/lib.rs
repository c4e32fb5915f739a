//! Encoding and decoding of DNS messages in wire format.
//!
//! This crate turns DNS messages held as a tree of values into the exact
//! octets sent over UDP or TCP and parses received octets back into such a
//! tree. It covers the message header, questions, resource records with
//! record data for a range of record types, EDNS and its options, and the
//! length framing used for stream transports.
//!
//! The crate does not do any networking. It only ever deals with buffers
//! provided by the caller.
//!
//! # Modules
//!
//! * [base] contains the fundamental types: domain names, character
//!   strings, the message header, questions, records, EDNS OPT records, and
//!   complete messages, as well as the traits for composing and parsing
//!   wire data, and
//! * [rdata] contains types for the record data of the supported record
//!   types as well as [`AllRecordData`][rdata::AllRecordData] which
//!   dispatches over all of them.
//!
//! # Example
//!
//! ```
//! use domain_wire::base::iana::{Class, Rtype};
//! use domain_wire::base::{Message, Name, ResourceRecord};
//! use domain_wire::rdata::A;
//! use std::net::Ipv4Addr;
//!
//! let name: Name = "example.com".parse().unwrap();
//! let mut msg = Message::new();
//! msg.header_mut().set_qr(true);
//! msg.push_question((name.clone(), Rtype::A));
//! msg.push_answer(ResourceRecord::new(
//!     name, Class::IN, 300, A::new(Ipv4Addr::new(1, 2, 3, 4))
//! ));
//!
//! let buf = msg.encode().unwrap();
//! assert_eq!(buf.len(), msg.encoding_len());
//! let (parsed, consumed) = Message::decode(&buf, 0).unwrap();
//! assert_eq!(parsed, msg);
//! assert_eq!(consumed, buf.len());
//! ```
//!
//! # Reference of Feature Flags
//!
//! * `rand`: Enables a number of methods that rely on a random number
//!   generator being available in the system, such as picking a random
//!   message ID. This feature is enabled by default.
#![allow(renamed_and_removed_lints)]
#![allow(clippy::unknown_clippy_lints)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod base;
pub mod rdata;
