//! DNS OpCodes

//------------ Opcode --------------------------------------------------------

int_enum! {
    /// DNS OpCodes.
    ///
    /// The opcode specifies the kind of query to be performed. It occupies
    /// four bits of the message header, so only values up to 15 can be
    /// encoded.
    =>
    Opcode, u8;

    /// A standard query.
    (QUERY => 0, "QUERY")

    /// An inverse query (IQUERY), obsoleted by RFC 3425.
    (IQUERY => 1, "IQUERY")

    /// A server status request.
    (STATUS => 2, "STATUS")

    /// A NOTIFY query (RFC 1996).
    (NOTIFY => 4, "NOTIFY")

    /// An UPDATE query (RFC 2136).
    (UPDATE => 5, "UPDATE")

    /// DNS Stateful operations (RFC 8490).
    (DSO => 6, "DSO")
}

int_enum_str_with_prefix!(Opcode, "OPCODE", u8, "unknown opcode");

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(Opcode::NOTIFY.to_string(), "NOTIFY");
        assert_eq!(Opcode::from_int(3).to_string(), "OPCODE3");
        assert_eq!("opcode3".parse::<Opcode>(), Ok(Opcode::from_int(3)));
    }
}
