use std::ops::Deref;

use macros::sensitive_debug;
use serde::{Deserialize, Serialize};

pub mod contact;
mod macros;
pub mod notice;

/// Wrapper for values that must never show up in logs.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sensitive<T>(pub T);
sensitive_debug!(Sensitive<T>);

impl<T> From<T> for Sensitive<T> {
    fn from(value: T) -> Self {
        Self(value)
    }
}

impl<T> Deref for Sensitive<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> Sensitive<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sensitive_debug_is_redacted() {
        let value = Sensitive("secret message".to_owned());
        assert_eq!(format!("{value:?}"), "[sensitive]");
        assert_eq!(*value, "secret message");
    }

    #[test]
    fn sensitive_serializes_inner_value() {
        let value = Sensitive("hello");
        assert_eq!(serde_json::to_string(&value).unwrap(), "\"hello\"");
    }
}
