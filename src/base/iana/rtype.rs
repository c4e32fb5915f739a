//! Resource Record (RR) TYPEs

//------------ Rtype ---------------------------------------------------------

int_enum! {
    /// Resource Record Types.
    ///
    /// Each resource record has a 16 bit type value indicating what kind of
    /// information is represented by the record. A few additional types,
    /// called query types, can only be used in questions. This type
    /// represents both.
    ///
    /// Values without a mnemonic are displayed using the generic `TYPE`
    /// prefix followed by the decimal value, as are accepted when parsed
    /// from a string.
    =>
    Rtype, u16;

    /// A host address.
    (A => 1, "A")

    /// An authoritative name server.
    (NS => 2, "NS")

    (MD => 3, "MD")

    (MF => 4, "MF")

    /// The canonical name for an alias.
    (CNAME => 5, "CNAME")

    /// Marks the start of a zone of authority.
    (SOA => 6, "SOA")

    (MB => 7, "MB")

    (MG => 8, "MG")

    (MR => 9, "MR")

    /// Null record.
    (NULL => 10, "NULL")

    (WKS => 11, "WKS")

    /// A domain name pointer.
    (PTR => 12, "PTR")

    /// Host information.
    (HINFO => 13, "HINFO")

    (MINFO => 14, "MINFO")

    /// Mail exchange.
    (MX => 15, "MX")

    /// Text strings.
    (TXT => 16, "TXT")

    /// Responsible person (RFC 1183).
    (RP => 17, "RP")

    (AFSDB => 18, "AFSDB")

    (X25 => 19, "X25")

    (ISDN => 20, "ISDN")

    (RT => 21, "RT")

    (NSAP => 22, "NSAP")

    (NSAPPTR => 23, "NSAPPTR")

    (SIG => 24, "SIG")

    (KEY => 25, "KEY")

    (PX => 26, "PX")

    (GPOS => 27, "GPOS")

    /// An IPv6 host address (RFC 3596).
    (AAAA => 28, "AAAA")

    (LOC => 29, "LOC")

    (NXT => 30, "NXT")

    (EID => 31, "EID")

    (NIMLOC => 32, "NIMLOC")

    /// Server selection (RFC 2782).
    (SRV => 33, "SRV")

    (ATMA => 34, "ATMA")

    (NAPTR => 35, "NAPTR")

    (KX => 36, "KX")

    (CERT => 37, "CERT")

    (A6 => 38, "A6")

    /// Delegation name (RFC 6672).
    (DNAME => 39, "DNAME")

    (SINK => 40, "SINK")

    /// The EDNS pseudo-record (RFC 6891).
    (OPT => 41, "OPT")

    (APL => 42, "APL")

    /// Delegation signer (RFC 4034).
    (DS => 43, "DS")

    (SSHFP => 44, "SSHFP")

    (IPSECKEY => 45, "IPSECKEY")

    /// RRset signature (RFC 4034).
    (RRSIG => 46, "RRSIG")

    /// Next secure record (RFC 4034).
    (NSEC => 47, "NSEC")

    /// DNS public key (RFC 4034).
    (DNSKEY => 48, "DNSKEY")

    (DHCID => 49, "DHCID")

    /// Hashed next secure record (RFC 5155).
    (NSEC3 => 50, "NSEC3")

    (NSEC3PARAM => 51, "NSEC3PARAM")

    (TLSA => 52, "TLSA")

    (SMIMEA => 53, "SMIMEA")

    (HIP => 55, "HIP")

    (NINFO => 56, "NINFO")

    (RKEY => 57, "RKEY")

    (TALINK => 58, "TALINK")

    (CDS => 59, "CDS")

    (CDNSKEY => 60, "CDNSKEY")

    (OPENPGPKEY => 61, "OPENPGPKEY")

    (CSYNC => 62, "CSYNC")

    (ZONEMD => 63, "ZONEMD")

    (SVCB => 64, "SVCB")

    (HTTPS => 65, "HTTPS")

    (SPF => 99, "SPF")

    (UINFO => 100, "UINFO")

    (UID => 101, "UID")

    (GID => 102, "GID")

    (UNSPEC => 103, "UNSPEC")

    (NID => 104, "NID")

    (L32 => 105, "L32")

    (L64 => 106, "L64")

    (LP => 107, "LP")

    (EUI48 => 108, "EUI48")

    (EUI64 => 109, "EUI64")

    (TKEY => 249, "TKEY")

    (TSIG => 250, "TSIG")

    /// Incremental zone transfer.
    (IXFR => 251, "IXFR")

    /// Transfer of an entire zone.
    (AXFR => 252, "AXFR")

    (MAILB => 253, "MAILB")

    (MAILA => 254, "MAILA")

    /// A request for all records.
    (ANY => 255, "ANY")

    /// Uniform resource identifier (RFC 7553).
    (URI => 256, "URI")

    /// Certification authority authorization (RFC 8659).
    (CAA => 257, "CAA")

    (AVC => 258, "AVC")

    (DOA => 259, "DOA")

    (TA => 32768, "TA")

    (DLV => 32769, "DLV")
}

int_enum_str_with_prefix!(Rtype, "TYPE", u16, "unknown record type");

//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn lookup() {
        assert_eq!(Rtype::from_int(48), Rtype::DNSKEY);
        assert_eq!(Rtype::from_mnemonic(b"nsec3"), Some(Rtype::NSEC3));
        assert_eq!(Rtype::CAA.to_int(), 257);
        assert_eq!(Rtype::NULL.to_int(), 10);
    }

    #[test]
    fn unknown_passes_through() {
        let rtype = Rtype::from_int(65280);
        assert_eq!(rtype.to_mnemonic_str(), None);
        assert_eq!(rtype.to_string(), "TYPE65280");
        assert_eq!("TYPE65280".parse::<Rtype>(), Ok(rtype));
        assert_eq!("type1".parse::<Rtype>(), Ok(Rtype::A));
        assert_eq!(format!("{:?}", rtype), "Rtype(65280)");
        assert_eq!(format!("{:?}", Rtype::AAAA), "Rtype::AAAA");
    }
}
