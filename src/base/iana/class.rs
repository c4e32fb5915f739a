//! DNS CLASSes.

//------------ Class ---------------------------------------------------------

int_enum! {
    /// DNS CLASSes.
    ///
    /// The domain name space is partitioned into separate classes for
    /// different network types. In practice, only the IN class is really
    /// relevant.
    ///
    /// Classes are represented by a 16 bit value. On the wire, the top bit
    /// of the class field is overloaded by multicast DNS. Values of this
    /// type never include it; see [`Question`] and [`ResourceRecord`] for
    /// how the bit is split out.
    ///
    /// [`Question`]: crate::base::question::Question
    /// [`ResourceRecord`]: crate::base::record::ResourceRecord
    =>
    Class, u16;

    /// Internet (IN).
    (IN => 1, "IN")

    /// CSNET (CS), long obsolete.
    (CS => 2, "CS")

    /// Chaosnet (CH).
    (CH => 3, "CH")

    /// Hesiod (HS).
    (HS => 4, "HS")

    /// Query class None, used by UPDATE.
    (NONE => 0xFE, "NONE")

    /// Query class * (ANY).
    (ANY => 0xFF, "ANY")
}

int_enum_str_with_prefix!(Class, "CLASS", u16, "unknown class");

//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn debug() {
        assert_eq!(format!("{:?}", Class::IN), "Class::IN");
        assert_eq!(format!("{:?}", Class::from_int(69)), "Class(69)");
    }

    #[test]
    fn from_str_and_display() {
        assert_eq!("in".parse::<Class>(), Ok(Class::IN));
        assert_eq!("CLASS5".parse::<Class>(), Ok(Class::from_int(5)));
        assert_eq!("CLASS3".parse::<Class>(), Ok(Class::CH));
        assert!("CLASSX".parse::<Class>().is_err());
        assert!("FOO".parse::<Class>().is_err());
        assert_eq!(Class::from_int(5).to_string(), "CLASS5");
        assert_eq!(Class::ANY.to_string(), "ANY");
    }
}
