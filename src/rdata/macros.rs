//! Macros for use in rdata definitions.
//!
//! These macros are not public but are used by the super module only. This
//! is why function-like macros are here and not at the crate root.

//------------ rdata_types! --------------------------------------------------

/// Creates the modules for all record data types and the type dispatching
/// over them.
///
/// The macro takes a list of modules and, for each module, the record data
/// types it exports. All these types need to have an associated constant
/// `RTYPE` with their record type and an inherent `parse` function that
/// parses the record data from a parser limited to the data.
macro_rules! rdata_types {
    ( $(
        $module:ident::{ $( $rtype:ident ),* $(,)? }
    )* ) => {
        $(
            pub mod $module;
            pub use self::$module::{ $( $rtype ),* };
        )*

        //------------- AllRecordData ----------------------------------------

        /// Record data for all record types known to this crate.
        ///
        /// Record data of any other type is kept as the raw octets in the
        /// `Unknown` variant.
        #[derive(Clone, Debug, Eq, PartialEq)]
        #[non_exhaustive]
        pub enum AllRecordData {
            $( $( $rtype($rtype), )* )*
            Unknown($crate::base::rdata::UnknownRecordData),
        }

        impl AllRecordData {
            /// Parses record data of the given type.
            ///
            /// The parser must be limited to the record data. Types without
            /// a dedicated implementation end up as unknown record data.
            pub fn parse(
                rtype: $crate::base::iana::Rtype,
                parser: &mut octseq::parse::Parser<'_, [u8]>,
            ) -> Result<Self, $crate::base::wire::ParseError> {
                match rtype {
                    $( $(
                        $rtype::RTYPE => {
                            $rtype::parse(parser).map(AllRecordData::$rtype)
                        }
                    )* )*
                    _ => {
                        $crate::base::rdata::UnknownRecordData::parse_any(
                            rtype, parser
                        ).map(AllRecordData::Unknown)
                    }
                }
            }
        }

        //--- From

        $( $(
            impl From<$rtype> for AllRecordData {
                fn from(value: $rtype) -> Self {
                    AllRecordData::$rtype(value)
                }
            }
        )* )*

        impl From<$crate::base::rdata::UnknownRecordData> for AllRecordData {
            fn from(value: $crate::base::rdata::UnknownRecordData) -> Self {
                AllRecordData::Unknown(value)
            }
        }

        //--- RecordData, ParseRecordData, and ComposeRecordData

        impl $crate::base::rdata::RecordData for AllRecordData {
            fn rtype(&self) -> $crate::base::iana::Rtype {
                match *self {
                    $( $(
                        AllRecordData::$rtype(_) => $rtype::RTYPE,
                    )* )*
                    AllRecordData::Unknown(ref inner) => inner.rtype(),
                }
            }
        }

        impl $crate::base::rdata::ParseRecordData for AllRecordData {
            fn parse_rdata(
                rtype: $crate::base::iana::Rtype,
                parser: &mut octseq::parse::Parser<'_, [u8]>,
            ) -> Result<Option<Self>, $crate::base::wire::ParseError> {
                Self::parse(rtype, parser).map(Some)
            }
        }

        impl $crate::base::rdata::ComposeRecordData for AllRecordData {
            fn rdlen(&self) -> usize {
                match *self {
                    $( $(
                        AllRecordData::$rtype(ref inner) => {
                            $crate::base::rdata::ComposeRecordData::rdlen(
                                inner
                            )
                        }
                    )* )*
                    AllRecordData::Unknown(ref inner) => {
                        $crate::base::rdata::ComposeRecordData::rdlen(inner)
                    }
                }
            }

            fn compose_rdata<Target>(
                &self, target: &mut Target
            ) -> Result<(), $crate::base::wire::ComposeError>
            where Target: octseq::builder::OctetsBuilder + ?Sized {
                match *self {
                    $( $(
                        AllRecordData::$rtype(ref inner) => {
                            $crate::base::rdata::ComposeRecordData
                                ::compose_rdata(inner, target)
                        }
                    )* )*
                    AllRecordData::Unknown(ref inner) => {
                        $crate::base::rdata::ComposeRecordData
                            ::compose_rdata(inner, target)
                    }
                }
            }
        }

        //--- Display

        impl core::fmt::Display for AllRecordData {
            fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
                match *self {
                    $( $(
                        AllRecordData::$rtype(ref inner) => {
                            core::fmt::Display::fmt(inner, f)
                        }
                    )* )*
                    AllRecordData::Unknown(ref inner) => {
                        core::fmt::Display::fmt(inner, f)
                    }
                }
            }
        }
    }
}

//------------ name_type! ----------------------------------------------------

/// A macro for implementing a record data type with a single domain name.
///
/// Implements some basic methods plus the `RecordData`, `ParseRecordData`,
/// and `ComposeRecordData` traits.
macro_rules! name_type {
    ($(#[$attr:meta])* ( $target:ident, $rtype:ident, $field:ident )) => {
        $(#[$attr])*
        #[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
        pub struct $target {
            $field: $crate::base::name::Name,
        }

        impl $target {
            /// The rtype of this record data type.
            pub(crate) const RTYPE: $crate::base::iana::Rtype =
                $crate::base::iana::Rtype::$rtype;

            #[must_use]
            pub fn new($field: $crate::base::name::Name) -> Self {
                $target { $field }
            }

            pub fn $field(&self) -> &$crate::base::name::Name {
                &self.$field
            }

            pub fn parse(
                parser: &mut octseq::parse::Parser<'_, [u8]>,
            ) -> Result<Self, $crate::base::wire::ParseError> {
                <$crate::base::name::Name as $crate::base::wire::Parse>::parse(
                    parser
                ).map(Self::new)
            }
        }

        //--- From and FromStr

        impl From<$crate::base::name::Name> for $target {
            fn from(name: $crate::base::name::Name) -> Self {
                Self::new(name)
            }
        }

        impl core::str::FromStr for $target {
            type Err = $crate::base::name::NameError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.parse().map(Self::new)
            }
        }

        //--- RecordData, ParseRecordData, ComposeRecordData

        impl $crate::base::rdata::RecordData for $target {
            fn rtype(&self) -> $crate::base::iana::Rtype {
                Self::RTYPE
            }
        }

        impl $crate::base::rdata::ParseRecordData for $target {
            fn parse_rdata(
                rtype: $crate::base::iana::Rtype,
                parser: &mut octseq::parse::Parser<'_, [u8]>,
            ) -> Result<Option<Self>, $crate::base::wire::ParseError> {
                if rtype == Self::RTYPE {
                    Self::parse(parser).map(Some)
                } else {
                    Ok(None)
                }
            }
        }

        impl $crate::base::rdata::ComposeRecordData for $target {
            fn rdlen(&self) -> usize {
                $crate::base::wire::Compose::compose_len(&self.$field)
            }

            fn compose_rdata<Target>(
                &self, target: &mut Target
            ) -> Result<(), $crate::base::wire::ComposeError>
            where Target: octseq::builder::OctetsBuilder + ?Sized {
                $crate::base::wire::Compose::compose(&self.$field, target)
            }
        }

        //--- Display

        impl core::fmt::Display for $target {
            fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.$field, f)
            }
        }
    }
}
