pub use ysyw_utils_derive::trace_instrument;

/// Returns the version of the workspace this binary was built from.
pub fn ysyw_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

pub trait Apply {
    /// Applies the function `f` only if `value` is `Some(...)` and provides the
    /// contained value to `f`.
    ///
    /// #### Example
    /// ```rust
    /// # use ysyw_utils::Apply;
    /// fn greet(greeting: String, name: Option<&str>) -> String {
    ///     greeting.apply_map(name, |slf, name| format!("{slf}, {name}"))
    /// }
    /// assert_eq!(greet("Hello".into(), None), "Hello");
    /// assert_eq!(greet("Hello".into(), Some("Max")), "Hello, Max");
    /// ```
    fn apply_map<U>(self, value: Option<U>, f: impl FnOnce(Self, U) -> Self) -> Self
    where
        Self: Sized,
    {
        match value {
            Some(value) => f(self, value),
            None => self,
        }
    }

    /// Applies the function `f` only if `condition` is `true`.
    fn apply_if(self, condition: bool, f: impl FnOnce(Self) -> Self) -> Self
    where
        Self: Sized,
    {
        if condition {
            f(self)
        } else {
            self
        }
    }
}

impl<T> Apply for T {}

#[macro_export]
macro_rules! assert_matches {
    ($expr:expr, $pat:pat) => {
        match ($expr) {
            $pat => (),
            val => ::core::panic!(
                "Assertion failed: Value {val:?} did not match pattern {}",
                ::core::stringify!($pat)
            ),
        }
    };
    ($expr:expr, $pat:pat if $pred:expr) => {{
        let val = $expr;
        match (&val) {
            $pat if $pred => (),
            #[allow(unused_variables, reason = "bindings are only used in the predicate")]
            $pat => ::core::panic!(
                "Assertion failed: Value {val:?} does not match predicate {}",
                ::core::stringify!($pred)
            ),
            _ => ::core::panic!(
                "Assertion failed: Value {val:?} did not match pattern {}",
                ::core::stringify!($pat)
            ),
        }
    }};
}
