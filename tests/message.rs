//! Encoding and decoding complete messages.

mod common;

use bytes::Bytes;
use common::{init_logging, name};
use domain_wire::base::iana::{Class, Opcode, OptionCode, Rcode, Rtype};
use domain_wire::base::opt::{ClientSubnet, EdnsOption, Padding};
use domain_wire::base::wire::{decode, encode};
use domain_wire::base::{
    ComposeError, HeaderSection, Message, Name, OptRecord, ParseError,
    Question, Record, ResourceRecord,
};
use domain_wire::rdata::{
    AllRecordData, Cname, Dnskey, Mx, Nsec, Nsec3, Nsec3Salt, OwnerHash,
    RtypeBitmap, Soa, Srv, Txt, A, Aaaa,
};
use rand::seq::SliceRandom;
use rand::Rng;
use rstest::rstest;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

fn round_trip(msg: &Message) -> Message {
    let buf = msg.encode().unwrap();
    assert_eq!(buf.len(), msg.encoding_len());
    let (parsed, consumed) = Message::decode(&buf, 0).unwrap();
    assert_eq!(consumed, buf.len());
    parsed
}

#[test]
fn example_com_a() {
    init_logging();
    let mut msg = Message::new();
    msg.push_question(Question::new(name("example.com"), Rtype::A, Class::IN));
    msg.push_answer(ResourceRecord::new(
        name("example.com"),
        Class::IN,
        300,
        A::new(Ipv4Addr::new(1, 2, 3, 4)),
    ));

    let buf = msg.encode().unwrap();
    let (section, _) = decode::<HeaderSection>(&buf, 0).unwrap();
    assert_eq!(section.counts().qdcount(), 1);
    assert_eq!(section.counts().ancount(), 1);
    assert_eq!(section.counts().nscount(), 0);
    assert_eq!(section.counts().arcount(), 0);

    let parsed = round_trip(&msg);
    assert_eq!(parsed.question(), msg.question());
    let answer = parsed.answer()[0].as_normal().unwrap();
    assert_eq!(answer.owner(), &name("example.com"));
    assert_eq!(answer.rtype(), Rtype::A);
    assert_eq!(answer.class(), Class::IN);
    assert_eq!(answer.ttl(), 300);
    assert_eq!(answer.data().to_string(), "1.2.3.4");
    assert_eq!(parsed, msg);
}

#[test]
fn opt_client_subnet() {
    init_logging();
    let mut opt = OptRecord::new();
    opt.set_udp_payload_size(4096);
    opt.set_dnssec_ok(true);
    opt.push(EdnsOption::from_value(ClientSubnet::new(
        24,
        0,
        IpAddr::V4(Ipv4Addr::new(203, 0, 113, 0)),
    )));
    let mut msg = Message::new();
    msg.push_question((name("example.com"), Rtype::AAAA));
    msg.push_additional(opt);

    let parsed = round_trip(&msg);
    let opt = parsed.opt().unwrap();
    assert_eq!(opt.udp_payload_size(), 4096);
    assert!(opt.dnssec_ok());
    let subnet = opt
        .first(OptionCode::CLIENT_SUBNET)
        .unwrap()
        .client_subnet()
        .unwrap();
    assert_eq!(subnet.family(), 1);
    assert_eq!(subnet.source_prefix_len(), 24);
    assert_eq!(subnet.scope_prefix_len(), 0);
    match subnet.addr() {
        IpAddr::V4(addr) => assert_eq!(addr.octets()[..3], [203, 0, 113]),
        IpAddr::V6(_) => panic!("expected an IPv4 address"),
    }
}

#[test]
fn dnskey_with_bad_protocol() {
    init_logging();
    let key = Bytes::from_static(b"\x03\x01\x00\x01\xab\xcd");
    let mut msg = Message::new();
    msg.push_answer(ResourceRecord::new(
        name("example.com"),
        Class::IN,
        3600,
        Dnskey::new(257, 8, key.clone()),
    ));
    let mut buf = msg.encode().unwrap();
    assert_eq!(round_trip(&msg), msg);

    // The protocol octet sits in front of the algorithm and the key.
    let pos = buf.len() - key.len() - 2;
    assert_eq!(buf[pos], 3);
    buf[pos] = 2;
    assert!(matches!(
        Message::decode(&buf, 0),
        Err(ParseError::Form(_))
    ));
}

#[test]
fn stream_framing() {
    init_logging();
    let mut msg = Message::new();
    msg.header_mut().set_id(4711);
    msg.push_question((name("example.org"), Rtype::MX));
    let plain = msg.encode().unwrap();
    let framed = msg.stream_encode().unwrap();
    assert_eq!(&framed[2..], plain.as_slice());

    // Shorter than length plus two is incomplete, not an error.
    assert_eq!(Message::stream_decode(&[]), Ok(None));
    assert_eq!(Message::stream_decode(&framed[..1]), Ok(None));
    assert_eq!(Message::stream_decode(&framed[..framed.len() - 1]), Ok(None));

    // The exact frame decodes to what decode makes of the payload.
    let (parsed, consumed) = Message::stream_decode(&framed).unwrap().unwrap();
    assert_eq!(consumed, framed.len());
    assert_eq!(parsed, Message::decode(&plain, 0).unwrap().0);
    assert_eq!(parsed, msg);
}

#[test]
fn unicast_response_and_cache_flush() {
    init_logging();
    let mut question =
        Question::new(name("printer.local"), Rtype::SRV, Class::IN);
    question.set_unicast_response(true);
    let mut record = ResourceRecord::new(
        name("printer.local"),
        Class::IN,
        120,
        Srv::new(0, 0, 631, name("host.local")),
    );
    record.set_flush(true);
    let mut msg = Message::new();
    msg.push_question(question);
    msg.push_answer(record);

    let parsed = round_trip(&msg);
    assert!(parsed.question()[0].unicast_response());
    assert_eq!(parsed.question()[0].qclass(), Class::IN);
    let answer = parsed.answer()[0].as_normal().unwrap();
    assert!(answer.flush());
    assert_eq!(answer.class(), Class::IN);
}

#[test]
fn nsec_bitmap_order() {
    init_logging();
    let mut types = vec![
        Rtype::NSEC,
        Rtype::A,
        Rtype::CAA,
        Rtype::MX,
        Rtype::RRSIG,
        Rtype::from_int(1234),
        Rtype::AAAA,
    ];
    types.shuffle(&mut rand::thread_rng());
    let bitmap: RtypeBitmap = types.iter().copied().collect();
    let mut msg = Message::new();
    msg.push_authority(ResourceRecord::new(
        name("alpha.example"),
        Class::IN,
        60,
        Nsec::new(name("beta.example"), bitmap.clone()),
    ));
    msg.push_authority(ResourceRecord::new(
        name("0p9mhaveqvm6t7vbl5lop2u3t2rp3tom.example"),
        Class::IN,
        60,
        Nsec3::new(
            1,
            0,
            0,
            Nsec3Salt::empty(),
            OwnerHash::from_octets(Bytes::from_static(b"\x01\x02")).unwrap(),
            bitmap,
        ),
    ));

    let parsed = round_trip(&msg);
    types.sort();
    for record in parsed.authority() {
        let bitmap = match record.as_normal().unwrap().data() {
            AllRecordData::Nsec(nsec) => nsec.types().clone(),
            AllRecordData::Nsec3(nsec3) => nsec3.types().clone(),
            other => panic!("unexpected record data {}", other),
        };
        assert_eq!(bitmap.iter().collect::<Vec<_>>(), types);
    }
}

#[test]
fn compression_pointer() {
    init_logging();
    let mut buf = Vec::new();
    // header: one question, one answer
    buf.extend_from_slice(b"\xbe\xef\x81\x80\x00\x01\x00\x01\x00\x00\x00\x00");
    // question at offset 12
    buf.extend_from_slice(b"\x07example\x03com\x00\x00\x01\x00\x01");
    // answer, owner is a pointer to offset 12
    let ptr_pos = buf.len();
    buf.extend_from_slice(b"\xc0\x0c\x00\x01\x00\x01\x00\x00\x0e\x10");
    buf.extend_from_slice(b"\x00\x04\xc0\x00\x02\x01");

    let (msg, consumed) = Message::decode(&buf, 0).unwrap();
    assert_eq!(consumed, buf.len());
    assert_eq!(msg.question()[0].qname(), &name("example.com"));
    assert_eq!(msg.answer()[0].owner(), name("example.com"));

    let (owner, consumed) = decode::<Name>(&buf, ptr_pos).unwrap();
    assert_eq!(owner, name("example.com"));
    assert_eq!(consumed, 2);

    // A pointer to itself must fail rather than loop.
    buf[ptr_pos + 1] = ptr_pos as u8;
    assert!(matches!(
        Message::decode(&buf, 0),
        Err(ParseError::Form(_))
    ));
}

#[test]
fn compression_pointer_in_rdata() {
    init_logging();
    let mut buf = Vec::new();
    buf.extend_from_slice(b"\x12\x34\x81\x80\x00\x01\x00\x01\x00\x00\x00\x00");
    buf.extend_from_slice(b"\x07example\x03com\x00\x00\x01\x00\x01");
    // CNAME www.example.com, the target ending in a pointer to offset 12
    buf.extend_from_slice(b"\xc0\x0c\x00\x05\x00\x01\x00\x00\x0e\x10");
    buf.extend_from_slice(b"\x00\x06\x03www\xc0\x0c");

    let (msg, consumed) = Message::decode(&buf, 0).unwrap();
    assert_eq!(consumed, buf.len());
    let record = msg.answer()[0].as_normal().unwrap();
    assert_eq!(record.owner(), &name("example.com"));
    assert_eq!(
        record.data(),
        &AllRecordData::Cname(Cname::new(name("www.example.com")))
    );

    // Encoding writes the target uncompressed.
    let out = msg.encode().unwrap();
    assert_eq!(out.len(), msg.encoding_len());
    assert_eq!(out.len(), buf.len() + 22);
    assert_eq!(round_trip(&msg), msg);
}

#[test]
fn dot_inside_label_is_rejected() {
    init_logging();
    let mut buf = Vec::new();
    buf.extend_from_slice(b"\x12\x34\x81\x80\x00\x00\x00\x01\x00\x00\x00\x00");
    // NS record whose target is a single label holding a dot
    buf.extend_from_slice(b"\x00\x00\x02\x00\x01\x00\x00\x0e\x10");
    buf.extend_from_slice(b"\x00\x05\x03a.b\x00");
    assert!(matches!(
        Message::decode(&buf, 0),
        Err(ParseError::Form(_))
    ));
}

#[test]
fn header_counts_are_derived() {
    init_logging();
    let mut msg = Message::new();
    msg.header_mut().set_opcode(Opcode::QUERY);
    msg.header_mut().set_rcode(Rcode::NXDOMAIN);
    msg.push_question((name("a.example"), Rtype::A));
    msg.push_question((name("b.example"), Rtype::AAAA));
    for i in 0..3u8 {
        msg.push_answer(ResourceRecord::new(
            name("a.example"),
            Class::IN,
            10,
            A::new(Ipv4Addr::new(192, 0, 2, i)),
        ));
    }
    msg.push_authority(ResourceRecord::new(
        name("example"),
        Class::IN,
        3600,
        Soa::new(
            name("ns.example"),
            name("hostmaster.example"),
            2024010101,
            7200,
            3600,
            1209600,
            300,
        ),
    ));
    msg.push_additional(ResourceRecord::new(
        name("b.example"),
        Class::IN,
        10,
        Aaaa::new(Ipv6Addr::LOCALHOST),
    ));
    msg.push_additional(OptRecord::new());

    let buf = msg.encode().unwrap();
    let (section, _) = decode::<HeaderSection>(&buf, 0).unwrap();
    assert_eq!(section.counts().qdcount(), 2);
    assert_eq!(section.counts().ancount(), 3);
    assert_eq!(section.counts().nscount(), 1);
    assert_eq!(section.counts().arcount(), 2);
    assert_eq!(section.header().rcode(), Rcode::NXDOMAIN);

    let parsed = round_trip(&msg);
    assert_eq!(parsed.counts().unwrap(), *section.counts());
    assert_eq!(parsed, msg);
}

#[rstest]
#[case::padding(EdnsOption::from_value(Padding::new(8)))]
#[case::opaque(EdnsOption::from_data(
    OptionCode::from_int(65001),
    Bytes::from_static(b"opaque")
))]
#[case::keepalive(EdnsOption::empty(OptionCode::TCP_KEEPALIVE))]
fn edns_options(#[case] option: EdnsOption) {
    init_logging();
    let mut opt = OptRecord::new();
    opt.push(option.clone());
    let record = Record::from(opt);
    let buf = encode(&record).unwrap();
    assert_eq!(buf.len(), domain_wire::base::wire::Compose::compose_len(&record));
    let (parsed, consumed) = decode::<Record>(&buf, 0).unwrap();
    assert_eq!(consumed, buf.len());
    let parsed = parsed.as_opt().unwrap();
    assert_eq!(parsed.options().len(), 1);
    assert_eq!(parsed.options()[0].code(), option.code());
}

#[test]
fn unencodable_option() {
    let mut opt = OptRecord::new();
    opt.push(EdnsOption::empty(OptionCode::from_int(65002)));
    let mut msg = Message::new();
    msg.push_additional(opt);
    assert_eq!(
        msg.encode(),
        Err(ComposeError::UnencodableOption(OptionCode::from_int(65002)))
    );
}

/// Returns a random name with up to four labels of up to twenty letters.
fn random_name(rng: &mut impl Rng) -> Name {
    let labels: Vec<String> = (0..rng.gen_range(0..=4))
        .map(|_| {
            (0..rng.gen_range(1..=20))
                .map(|_| char::from(rng.gen_range(b'a'..=b'z')))
                .collect()
        })
        .collect();
    labels.join(".").parse().unwrap()
}

#[test]
fn random_round_trips() {
    init_logging();
    let mut rng = rand::thread_rng();
    for _ in 0..100 {
        let mut msg = Message::new();
        msg.header_mut().set_id(rng.gen());
        msg.header_mut().set_qr(rng.gen());
        msg.header_mut().set_aa(rng.gen());
        msg.header_mut().set_rd(rng.gen());
        msg.push_question((random_name(&mut rng), Rtype::ANY));
        for _ in 0..rng.gen_range(0..4) {
            let data: AllRecordData = match rng.gen_range(0..4) {
                0 => A::new(Ipv4Addr::from(rng.gen::<u32>())).into(),
                1 => Mx::new(rng.gen(), random_name(&mut rng)).into(),
                2 => {
                    let len = rng.gen_range(0..600);
                    let text: Vec<u8> = (0..len).map(|_| rng.gen()).collect();
                    Txt::build_from_slice(&text).into()
                }
                _ => Aaaa::new(Ipv6Addr::from(rng.gen::<u128>())).into(),
            };
            msg.push_answer(ResourceRecord::new(
                random_name(&mut rng),
                Class::IN,
                rng.gen(),
                data,
            ));
        }
        assert_eq!(round_trip(&msg), msg);
    }
}
