//! EDNS option codes.

//------------ OptionCode ----------------------------------------------------

int_enum! {
    /// DNS EDNS0 Option Codes (OPT).
    ///
    /// The record data of OPT records is a sequence of options. The type of
    /// each of these options is given through a 16 bit value called the
    /// option code.
    =>
    OptionCode, u16;

    /// Long-Lived Queries.
    (LLQ => 1, "LLQ")

    /// Update lease.
    (UL => 2, "UL")

    /// Name server identifier (RFC 5001).
    (NSID => 3, "NSID")

    /// DNSSEC algorithm understood (RFC 6975).
    (DAU => 5, "DAU")

    /// DS hash understood (RFC 6975).
    (DHU => 6, "DHU")

    /// NSEC3 hash understood (RFC 6975).
    (N3U => 7, "N3U")

    /// EDNS client subnet (RFC 7871).
    (CLIENT_SUBNET => 8, "CLIENT_SUBNET")

    /// EDNS expire (RFC 7314).
    (EXPIRE => 9, "EXPIRE")

    /// DNS cookie (RFC 7873).
    (COOKIE => 10, "COOKIE")

    /// TCP keepalive (RFC 7828).
    (TCP_KEEPALIVE => 11, "TCP_KEEPALIVE")

    /// Padding (RFC 7830).
    (PADDING => 12, "PADDING")

    /// CHAIN query requests (RFC 7901).
    (CHAIN => 13, "CHAIN")

    /// EDNS key tag (RFC 8145).
    (KEY_TAG => 14, "KEY_TAG")

    /// Extended DNS error (RFC 8914).
    (EXTENDED_ERROR => 15, "EXTENDED_ERROR")

    /// EDNS client tag.
    (CLIENT_TAG => 16, "CLIENT_TAG")

    /// EDNS server tag.
    (SERVER_TAG => 17, "SERVER_TAG")
}

int_enum_str_with_prefix!(OptionCode, "OPTION", u16, "unknown option code");

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn mnemonics() {
        assert_eq!(OptionCode::from_int(8), OptionCode::CLIENT_SUBNET);
        assert_eq!(OptionCode::KEY_TAG.to_string(), "KEY_TAG");
        assert_eq!(OptionCode::from_int(65001).to_string(), "OPTION65001");
        assert_eq!("padding".parse::<OptionCode>(), Ok(OptionCode::PADDING));
    }
}
