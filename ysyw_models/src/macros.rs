/// Declares a validated string newtype.
macro_rules! nutype_string {
    ($(#[doc = $doc:literal])* $ident:ident(validate($($validate:tt)*))) => {
        $(#[doc = $doc])*
        #[::nutype::nutype(
            validate($($validate)*),
            derive(Debug, Clone, PartialEq, Eq, Hash, TryFrom, Deref, AsRef, Serialize, Deserialize)
        )]
        pub struct $ident(String);
    };
    ($(#[doc = $doc:literal])* $ident:ident(sensitive, validate($($validate:tt)*))) => {
        $(#[doc = $doc])*
        #[::nutype::nutype(
            validate($($validate)*),
            derive(Clone, PartialEq, Eq, Hash, TryFrom, Deref, AsRef, Serialize, Deserialize)
        )]
        pub struct $ident(String);
        $crate::macros::sensitive_debug!($ident);
    };
}

macro_rules! sensitive_debug {
    ($ident:ident $(<$($generics:ident),*>)?) => {
        impl $(<$($generics),*>)? ::std::fmt::Debug for $ident $(<$($generics),*>)? {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str("[sensitive]")
            }
        }
    };
}

pub(crate) use nutype_string;
pub(crate) use sensitive_debug;
