//! Minimal compile-time dependency injection.
//!
//! A provider owns the leaf values (configuration, clients) and every service
//! derives [`Build`] to assemble itself from the provider. Built values are
//! cached per provider, so each service is constructed once and shared.

#[cfg(test)]
extern crate self as ysyw_di;

pub use typemap::TypeMap;
pub use ysyw_di_derive::Build;

mod macros;
mod typemap;

pub trait Provider: Sized {
    /// Cache of the values that have already been built by this provider.
    fn cache(&mut self) -> &mut TypeMap;
}

#[diagnostic::on_unimplemented(
    message = "The type `{Self}` cannot be built using the provider `{P}`",
    note = "Add `{Self}` to the provider `{P}` or derive `Build` for `{Self}` and make sure \
            all of its fields can be built as well"
)]
pub trait Build<P: Provider>: Clone + 'static {
    fn build(provider: &mut P) -> Self;
}

pub trait Provide: Provider {
    fn provide<T: Build<Self>>(&mut self) -> T {
        T::build(self)
    }
}

impl<P: Provider> Provide for P {}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    use super::*;

    #[derive(Debug, Clone)]
    struct Counter(Arc<AtomicUsize>);

    #[derive(Debug, Clone, Build)]
    struct Leaf {
        counter: Counter,
    }

    impl Leaf {
        fn id(&self) -> usize {
            self.counter.0.fetch_add(1, Ordering::Relaxed)
        }
    }

    #[derive(Debug, Clone, Build)]
    struct Root {
        a: Leaf,
        b: Leaf,
        #[di(default)]
        label: String,
    }

    crate::provider! {
        TestProvider { counter: Counter, }
    }

    #[test]
    fn build_shares_cached_values() {
        let mut provider = TestProvider {
            _cache: Default::default(),
            counter: Counter(Arc::new(AtomicUsize::new(0))),
        };

        let root: Root = provider.provide();
        root.a.id();
        root.b.id();

        assert_eq!(provider.counter.0.load(Ordering::Relaxed), 2);
        assert!(root.label.is_empty());
        assert!(provider.cache().get::<Leaf>().is_some());
    }
}
