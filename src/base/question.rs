//! A single question in a DNS message.
//!
//! This module defines the type [`Question`] which represents an entry in
//! the question section of a DNS message.

use super::iana::{Class, Rtype};
use super::name::Name;
use super::wire::{Compose, ComposeError, Parse, ParseError};
use core::fmt;
use octseq::builder::OctetsBuilder;
use octseq::parse::Parser;

/// The bit in the class field of a question asking for a unicast response.
///
/// This is used by multicast DNS, see [RFC 6762], section 5.4.
///
/// [RFC 6762]: https://tools.ietf.org/html/rfc6762
pub const UNICAST_RESPONSE: u16 = 0x8000;

//------------ Question ------------------------------------------------------

/// A question in a DNS message.
///
/// In DNS, a question describes what is requested in a query. It consists
/// of three elements: a domain name, a record type, and a class. This type
/// represents such a question.
///
/// The top bit of the class field is used by multicast DNS to ask for a
/// unicast response. It is kept separately as a flag and never appears in
/// the class itself.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Question {
    /// The domain name of the question.
    qname: Name,

    /// The record type of the question.
    qtype: Rtype,

    /// The class of the quesiton.
    qclass: Class,

    /// Whether a unicast response is requested.
    unicast_response: bool,
}

/// # Creation and Conversion
///
impl Question {
    /// Creates a new question from its three componets.
    #[must_use]
    pub fn new(qname: Name, qtype: Rtype, qclass: Class) -> Self {
        Question {
            qname,
            qtype,
            qclass,
            unicast_response: false,
        }
    }

    /// Creates a new question from a name and record type, assuming class IN.
    #[must_use]
    pub fn new_in(qname: Name, qtype: Rtype) -> Self {
        Self::new(qname, qtype, Class::IN)
    }

    /// Converts the question into the qname.
    pub fn into_qname(self) -> Name {
        self.qname
    }
}

/// # Field Access
///
impl Question {
    /// Returns a reference to the domain nmae in the question,
    pub fn qname(&self) -> &Name {
        &self.qname
    }

    /// Returns the record type of the question.
    pub fn qtype(&self) -> Rtype {
        self.qtype
    }

    /// Returns the class of the question.
    pub fn qclass(&self) -> Class {
        self.qclass
    }

    /// Returns whether the question asks for a unicast response.
    pub fn unicast_response(&self) -> bool {
        self.unicast_response
    }

    /// Sets whether the question asks for a unicast response.
    pub fn set_unicast_response(&mut self, value: bool) {
        self.unicast_response = value
    }

    /// Returns the wire value of the class field including the QU bit.
    fn class_field(&self) -> u16 {
        let class = self.qclass.to_int() & !UNICAST_RESPONSE;
        if self.unicast_response {
            class | UNICAST_RESPONSE
        } else {
            class
        }
    }
}

//--- From

impl From<(Name, Rtype, Class)> for Question {
    fn from((name, rtype, class): (Name, Rtype, Class)) -> Self {
        Question::new(name, rtype, class)
    }
}

impl From<(Name, Rtype)> for Question {
    fn from((name, rtype): (Name, Rtype)) -> Self {
        Question::new_in(name, rtype)
    }
}

//--- Compose and Parse

impl Compose for Question {
    fn compose_len(&self) -> usize {
        self.qname.compose_len() + 4
    }

    fn compose<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError> {
        self.qname.compose(target)?;
        self.qtype.compose(target)?;
        self.class_field().compose(target)
    }
}

impl Parse for Question {
    fn parse(parser: &mut Parser<'_, [u8]>) -> Result<Self, ParseError> {
        let qname = Name::parse(parser)?;
        let qtype = Rtype::parse(parser)?;
        let class = u16::parse(parser)?;
        Ok(Question {
            qname,
            qtype,
            qclass: Class::from_int(class & !UNICAST_RESPONSE),
            unicast_response: class & UNICAST_RESPONSE != 0,
        })
    }
}

//--- Display

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}\t{}\t{}", self.qname, self.qclass, self.qtype)?;
        if self.unicast_response {
            f.write_str("\tQU")?;
        }
        Ok(())
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::wire::{decode, encode};

    fn example() -> Name {
        "example.com".parse().unwrap()
    }

    #[test]
    fn compose_parse() {
        let question = Question::new_in(example(), Rtype::A);
        let buf = encode(&question).unwrap();
        assert_eq!(buf, b"\x07example\x03com\x00\x00\x01\x00\x01");
        assert_eq!(buf.len(), question.compose_len());
        let (parsed, consumed) = decode::<Question>(&buf, 0).unwrap();
        assert_eq!(parsed, question);
        assert_eq!(consumed, buf.len());
    }

    #[test]
    fn unicast_response_bit() {
        let mut question = Question::new(example(), Rtype::PTR, Class::IN);
        question.set_unicast_response(true);
        let buf = encode(&question).unwrap();
        assert_eq!(&buf[buf.len() - 2..], b"\x80\x01");
        let (parsed, _) = decode::<Question>(&buf, 0).unwrap();
        assert!(parsed.unicast_response());
        assert_eq!(parsed.qclass(), Class::IN);
        assert_eq!(parsed, question);
    }

    #[test]
    fn short_input() {
        assert_eq!(
            decode::<Question>(b"\x07example\x03com\x00\x00\x01\x00", 0),
            Err(ParseError::ShortInput)
        );
    }

    #[test]
    fn display() {
        let mut question = Question::from((example(), Rtype::AAAA));
        assert_eq!(question.to_string(), "example.com\tIN\tAAAA");
        question.set_unicast_response(true);
        assert_eq!(question.to_string(), "example.com\tIN\tAAAA\tQU");
    }
}
