//! Record data type from RFC 1035 that consist of a single domain name.
//!
//! This is a private module. It’s content is re-exported by the parent.

//------------ Cname --------------------------------------------------------

name_type! {
    /// CNAME record data.
    ///
    /// The CNAME record specifies the canonical or primary name for domain
    /// name alias.
    ///
    /// The CNAME type is defined in [RFC 1035, section 3.3.1][1].
    ///
    /// [1]: https://tools.ietf.org/html/rfc1035#section-3.3.1
    (Cname, CNAME, cname)
}

//------------ Ns -----------------------------------------------------------

name_type! {
    /// NS record data.
    ///
    /// NS records specify hosts that are authoritative for a class and domain.
    ///
    /// The NS record type is defined in [RFC 1035, section 3.3.11][1].
    ///
    /// [1]: https://tools.ietf.org/html/rfc1035#section-3.3.11
    (Ns, NS, nsdname)
}

//------------ Ptr ----------------------------------------------------------

name_type! {
    /// PTR record data.
    ///
    /// PRT records are used in special domains to point to some other location
    /// in the domain space.
    ///
    /// The PTR record type is defined in [RFC 1035, section 3.3.12][1].
    ///
    /// [1]: https://tools.ietf.org/html/rfc1035#section-3.3.12
    (Ptr, PTR, ptrdname)
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::iana::Rtype;
    use crate::base::rdata::test::test_compose_parse;
    use crate::base::rdata::{decode_rdata, encode_rdata, RecordData};
    use crate::base::wire::ParseError;

    #[test]
    fn name_types_compose_parse() {
        let ns: Ns = "ns1.example.com".parse().unwrap();
        test_compose_parse(&ns);
        assert_eq!(ns.rtype(), Rtype::NS);
        test_compose_parse(&Cname::new("www.example.com".parse().unwrap()));
        test_compose_parse(&Ptr::new("host.example.org".parse().unwrap()));
        assert_eq!(
            encode_rdata(&Ptr::new("a.b".parse().unwrap())).unwrap(),
            b"\x00\x05\x01a\x01b\x00"
        );
    }

    #[test]
    fn compressed_name_in_rdata() {
        // "example.com" at 0, then CNAME rdata holding a pointer to it.
        let buf = b"\x07example\x03com\x00\x00\x02\xc0\x00";
        let (cname, consumed) =
            decode_rdata::<Cname>(Rtype::CNAME, buf, 13).unwrap();
        assert_eq!(cname.cname().as_str(), "example.com");
        assert_eq!(consumed, 4);
    }

    #[test]
    fn wrong_rtype() {
        assert!(matches!(
            decode_rdata::<Ns>(Rtype::CNAME, b"\x00\x01\x00", 0),
            Err(ParseError::Form(_))
        ));
    }
}
