/// Declares a provider struct holding the given leaf values.
///
/// Every field type becomes buildable from the provider by cloning the
/// stored value. The generated struct has an additional `_cache` field that
/// must be initialized with `Default::default()`.
#[macro_export]
macro_rules! provider {
    ($(#[doc=$doc:literal])* $vis:vis $ident:ident {
        $( $field:ident: $ty:ty, )*
    }) => {
        $(#[doc=$doc])*
        $vis struct $ident {
            _cache: $crate::TypeMap,
            $( $field: $ty, )*
        }

        impl $crate::Provider for $ident {
            fn cache(&mut self) -> &mut $crate::TypeMap {
                &mut self._cache
            }
        }

        $(
            impl $crate::Build<$ident> for $ty {
                fn build(provider: &mut $ident) -> Self {
                    ::core::clone::Clone::clone(&provider.$field)
                }
            }
        )*
    };
}
