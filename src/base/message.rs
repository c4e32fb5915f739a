//! Accessing exisiting DNS messages.
//!
//! This module defines the [`Message`] type. It holds a complete DNS
//! message as a tree of values: the header plus the question, answer,
//! authority, and additional sections. A message is turned into its wire
//! format via [`Message::encode`] and parsed from it via
//! [`Message::decode`].
//!
//! The section counts of the header are never stored with the message.
//! They are always derived from the length of the sections when the message
//! is encoded.
//!
//! For connection-oriented transports such as TCP, messages are preceded by
//! their length as a 16 bit integer in network byte order. The functions
//! [`Message::stream_encode`] and [`Message::stream_decode`] deal with this
//! framing. The latter allows the caller to feed in a buffer that doesn’t
//! yet contain a complete frame.

use super::header::{Header, HeaderCounts, HeaderSection};
use super::opt::OptRecord;
use super::question::Question;
use super::record::Record;
use super::wire::{encode, Compose, ComposeError, Parse, ParseError};
use core::fmt;
use octseq::builder::OctetsBuilder;
use octseq::parse::Parser;
use tracing::{debug, trace};

//------------ Message -------------------------------------------------------

/// A DNS message.
///
/// The message consists of the header and four sections. The question
/// section contains [`Question`]s, the other three sections contain
/// [`Record`]s.
///
/// The header’s counts are not part of the message. Use
/// [`Message::counts`] to get the counts the message will be encoded with.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Message {
    /// The message header.
    header: Header,

    /// The question section.
    question: Vec<Question>,

    /// The answer section.
    answer: Vec<Record>,

    /// The authority section.
    authority: Vec<Record>,

    /// The additional section.
    additional: Vec<Record>,
}

/// # Creation and Header Access
///
impl Message {
    /// Creates a new, empty message with a default header.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new, empty message with the given header.
    #[must_use]
    pub fn with_header(header: Header) -> Self {
        Message {
            header,
            ..Default::default()
        }
    }

    /// Returns the message header.
    pub fn header(&self) -> Header {
        self.header
    }

    /// Returns a mutable reference to the message header.
    pub fn header_mut(&mut self) -> &mut Header {
        &mut self.header
    }

    /// Sets the message ID to a randomly chosen number.
    #[cfg(feature = "rand")]
    pub fn set_random_id(&mut self) {
        self.header.set_random_id()
    }

    /// Returns the header counts derived from the sections.
    ///
    /// Fails if any of the sections has more than 65535 entries.
    pub fn counts(&self) -> Result<HeaderCounts, ComposeError> {
        fn count(len: usize) -> Result<u16, ComposeError> {
            u16::try_from(len).map_err(|_| ComposeError::LongData)
        }

        let mut counts = HeaderCounts::new();
        counts.set_qdcount(count(self.question.len())?);
        counts.set_ancount(count(self.answer.len())?);
        counts.set_nscount(count(self.authority.len())?);
        counts.set_arcount(count(self.additional.len())?);
        Ok(counts)
    }

    /// Returns the complete header section as it will be encoded.
    pub fn header_section(&self) -> Result<HeaderSection, ComposeError> {
        Ok(HeaderSection::new(self.header, self.counts()?))
    }
}

/// # Section Access
///
impl Message {
    /// Returns the question section.
    pub fn question(&self) -> &[Question] {
        &self.question
    }

    /// Returns a mutable reference to the question section.
    pub fn question_mut(&mut self) -> &mut Vec<Question> {
        &mut self.question
    }

    /// Appends a question to the question section.
    pub fn push_question(&mut self, question: impl Into<Question>) {
        self.question.push(question.into())
    }

    /// Returns the answer section.
    pub fn answer(&self) -> &[Record] {
        &self.answer
    }

    /// Returns a mutable reference to the answer section.
    pub fn answer_mut(&mut self) -> &mut Vec<Record> {
        &mut self.answer
    }

    /// Appends a record to the answer section.
    pub fn push_answer(&mut self, record: impl Into<Record>) {
        self.answer.push(record.into())
    }

    /// Returns the authority section.
    pub fn authority(&self) -> &[Record] {
        &self.authority
    }

    /// Returns a mutable reference to the authority section.
    pub fn authority_mut(&mut self) -> &mut Vec<Record> {
        &mut self.authority
    }

    /// Appends a record to the authority section.
    pub fn push_authority(&mut self, record: impl Into<Record>) {
        self.authority.push(record.into())
    }

    /// Returns the additional section.
    pub fn additional(&self) -> &[Record] {
        &self.additional
    }

    /// Returns a mutable reference to the additional section.
    pub fn additional_mut(&mut self) -> &mut Vec<Record> {
        &mut self.additional
    }

    /// Appends a record to the additional section.
    pub fn push_additional(&mut self, record: impl Into<Record>) {
        self.additional.push(record.into())
    }

    /// Returns the first OPT record of the additional section if present.
    pub fn opt(&self) -> Option<&OptRecord> {
        self.additional.iter().find_map(Record::as_opt)
    }

    /// Returns an iterator over the records of all three record sections.
    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.answer
            .iter()
            .chain(self.authority.iter())
            .chain(self.additional.iter())
    }
}

/// # Encoding and Decoding
///
impl Message {
    /// Returns the length of the message in wire format.
    pub fn encoding_len(&self) -> usize {
        self.compose_len()
    }

    /// Encodes the message into a new vec.
    pub fn encode(&self) -> Result<Vec<u8>, ComposeError> {
        let res = encode(self);
        match res {
            Ok(ref buf) => {
                trace!(
                    "Encoded message id {} into {} octets",
                    self.header.id(),
                    buf.len()
                );
            }
            Err(ref err) => {
                debug!(
                    "Failed to encode message id {}: {err}",
                    self.header.id()
                );
            }
        }
        res
    }

    /// Decodes a message starting at `offset` in `buf`.
    ///
    /// Compression pointers are interpreted relative to the start of
    /// `buf`, so `buf` must start with the message’s header. Returns the
    /// message and the number of octets consumed.
    pub fn decode(
        buf: &[u8],
        offset: usize,
    ) -> Result<(Self, usize), ParseError> {
        let mut parser = Parser::from_ref(buf);
        let res = parser
            .seek(offset)
            .map_err(ParseError::from)
            .and_then(|_| Self::parse(&mut parser));
        match res {
            Ok(msg) => {
                let consumed = parser.pos() - offset;
                trace!(
                    "Decoded message id {} from {consumed} octets",
                    msg.header.id(),
                );
                Ok((msg, consumed))
            }
            Err(err) => {
                debug!(
                    "Failed to decode message at offset {}: {err}",
                    parser.pos()
                );
                Err(err)
            }
        }
    }

    /// Encodes the message preceded by its length.
    ///
    /// This is the framing used by DNS over TCP. Fails if the message is
    /// longer than 65535 octets.
    pub fn stream_encode(&self) -> Result<Vec<u8>, ComposeError> {
        let len = u16::try_from(self.compose_len())
            .map_err(|_| ComposeError::LongData)?;
        let mut target = Vec::with_capacity(usize::from(len) + 2);
        len.compose(&mut target)?;
        self.compose(&mut target)?;
        if target.len() != usize::from(len) + 2 {
            return Err(ComposeError::LengthMismatch);
        }
        trace!(
            "Encoded message id {} into frame of {} octets",
            self.header.id(),
            target.len()
        );
        Ok(target)
    }

    /// Decodes a length-prefixed message from the start of `buf`.
    ///
    /// Returns `Ok(None)` if `buf` doesn’t contain the complete frame yet.
    /// Otherwise returns the message and the length of the frame, i.e.,
    /// the message length plus two, so the caller can move on to the next
    /// frame.
    pub fn stream_decode(
        buf: &[u8],
    ) -> Result<Option<(Self, usize)>, ParseError> {
        let len = match buf.get(..2) {
            Some(len) => usize::from(u16::from_be_bytes([len[0], len[1]])),
            None => {
                trace!("Incomplete frame: need 2 octets, have {}", buf.len());
                return Ok(None);
            }
        };
        let frame = match buf.get(2..len + 2) {
            Some(frame) => frame,
            None => {
                trace!(
                    "Incomplete frame: need {} octets, have {}",
                    len + 2,
                    buf.len()
                );
                return Ok(None);
            }
        };
        let (msg, _) = Self::decode(frame, 0)?;
        Ok(Some((msg, len + 2)))
    }
}

//--- Compose and Parse

impl Compose for Message {
    fn compose_len(&self) -> usize {
        HeaderSection::LEN
            + self.question.iter().map(Compose::compose_len).sum::<usize>()
            + self.records().map(Compose::compose_len).sum::<usize>()
    }

    fn compose<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError> {
        self.header_section()?.compose(target)?;
        for question in &self.question {
            question.compose(target)?;
        }
        for record in self.records() {
            record.compose(target)?;
        }
        Ok(())
    }
}

impl Parse for Message {
    fn parse(parser: &mut Parser<'_, [u8]>) -> Result<Self, ParseError> {
        let section = HeaderSection::parse(parser)?;
        let counts = section.counts();
        let mut question =
            Vec::with_capacity(usize::from(counts.qdcount()));
        for _ in 0..counts.qdcount() {
            question.push(Question::parse(parser)?);
        }
        Ok(Message {
            header: *section.header(),
            question,
            answer: parse_records(parser, counts.ancount())?,
            authority: parse_records(parser, counts.nscount())?,
            additional: parse_records(parser, counts.arcount())?,
        })
    }
}

/// Parses a record section with `count` records.
fn parse_records(
    parser: &mut Parser<'_, [u8]>,
    count: u16,
) -> Result<Vec<Record>, ParseError> {
    let mut res = Vec::with_capacity(usize::from(count));
    for _ in 0..count {
        res.push(Record::parse(parser)?);
    }
    Ok(res)
}

//--- Display

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let header = self.header;
        writeln!(
            f,
            ";; ->>HEADER<<- opcode: {}, rcode: {}, id: {}",
            header.opcode(),
            header.rcode(),
            header.id()
        )?;
        write!(f, ";; flags: {}", header.flags())?;
        writeln!(
            f,
            "; QUERY: {}, ANSWER: {}, AUTHORITY: {}, ADDITIONAL: {}",
            self.question.len(),
            self.answer.len(),
            self.authority.len(),
            self.additional.len()
        )?;
        if !self.question.is_empty() {
            writeln!(f, "\n;; QUESTION SECTION:")?;
            for question in &self.question {
                writeln!(f, ";{}", question)?;
            }
        }
        for (name, section) in [
            ("ANSWER", &self.answer),
            ("AUTHORITY", &self.authority),
            ("ADDITIONAL", &self.additional),
        ] {
            if section.is_empty() {
                continue;
            }
            writeln!(f, "\n;; {} SECTION:", name)?;
            for record in section {
                writeln!(f, "{}", record)?;
            }
        }
        Ok(())
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::iana::{Class, Opcode, Rcode, Rtype};
    use crate::base::name::Name;
    use crate::base::record::ResourceRecord;
    use crate::rdata::{Cname, A};
    use std::net::Ipv4Addr;

    fn name(s: &str) -> Name {
        s.parse().unwrap()
    }

    fn response() -> Message {
        let mut msg = Message::new();
        msg.header_mut().set_id(0x1234);
        msg.header_mut().set_qr(true);
        msg.header_mut().set_rd(true);
        msg.header_mut().set_rcode(Rcode::NOERROR);
        msg.push_question((name("www.example.com"), Rtype::A));
        msg.push_answer(ResourceRecord::new(
            name("www.example.com"),
            Class::IN,
            3600,
            Cname::new(name("example.com")),
        ));
        msg.push_answer(ResourceRecord::new(
            name("example.com"),
            Class::IN,
            300,
            A::new(Ipv4Addr::new(192, 0, 2, 1)),
        ));
        msg.push_additional(OptRecord::new());
        msg
    }

    #[test]
    fn encode_decode() {
        let msg = response();
        let buf = msg.encode().unwrap();
        assert_eq!(buf.len(), msg.encoding_len());
        assert_eq!(&buf[..4], b"\x12\x34\x81\x00");
        assert_eq!(&buf[4..12], b"\x00\x01\x00\x02\x00\x00\x00\x01");
        let (parsed, consumed) = Message::decode(&buf, 0).unwrap();
        assert_eq!(consumed, buf.len());
        assert_eq!(parsed, msg);
        assert!(parsed.opt().is_some());
    }

    #[test]
    fn decode_at_offset() {
        let msg = response();
        let mut buf = vec![0xff, 0xff, 0xff];
        buf.extend_from_slice(&msg.encode().unwrap());
        // Names aren’t compressed, so the message parses at any offset.
        let (parsed, consumed) = Message::decode(&buf, 3).unwrap();
        assert_eq!(parsed, msg);
        assert_eq!(consumed, buf.len() - 3);
    }

    #[test]
    fn short_header() {
        assert_eq!(
            Message::decode(b"\x00\x01\x00\x00\x00\x00", 0),
            Err(ParseError::ShortInput)
        );
    }

    #[test]
    fn missing_records() {
        // Header announces an answer that isn’t there.
        assert_eq!(
            Message::decode(
                b"\x00\x01\x00\x00\x00\x00\x00\x01\x00\x00\x00\x00",
                0
            ),
            Err(ParseError::ShortInput)
        );
    }

    #[test]
    fn stream_framing() {
        let msg = response();
        let plain = msg.encode().unwrap();
        let framed = msg.stream_encode().unwrap();
        assert_eq!(framed.len(), plain.len() + 2);
        assert_eq!(
            &framed[..2],
            &u16::try_from(plain.len()).unwrap().to_be_bytes()
        );
        assert_eq!(&framed[2..], plain.as_slice());

        for len in 0..framed.len() {
            assert_eq!(Message::stream_decode(&framed[..len]), Ok(None));
        }
        let mut buf = framed.clone();
        buf.extend_from_slice(b"\x00\x0c");
        let (parsed, consumed) =
            Message::stream_decode(&buf).unwrap().unwrap();
        assert_eq!(parsed, msg);
        assert_eq!(consumed, framed.len());
        assert_eq!(Message::stream_decode(&buf[consumed..]), Ok(None));
    }

    #[test]
    fn display() {
        let mut msg = Message::new();
        msg.header_mut().set_opcode(Opcode::QUERY);
        msg.header_mut().set_rd(true);
        msg.push_question((name("example.com"), Rtype::MX));
        let text = msg.to_string();
        assert!(text.starts_with(
            ";; ->>HEADER<<- opcode: QUERY, rcode: NOERROR, id: 0\n"
        ));
        assert!(text.contains("; QUERY: 1, ANSWER: 0"));
        assert!(text.contains(";example.com\tIN\tMX\n"));
    }

    #[cfg(feature = "rand")]
    #[test]
    fn random_id_survives() {
        let mut msg = response();
        msg.set_random_id();
        let buf = msg.encode().unwrap();
        let (parsed, _) = Message::decode(&buf, 0).unwrap();
        assert_eq!(parsed.header().id(), msg.header().id());
    }
}
