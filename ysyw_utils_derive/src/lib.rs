use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, ItemFn};

/// Wraps a function in a `tracing` span and traces its invocation and its
/// return value.
///
/// Arguments are forwarded to `#[tracing::instrument]`, so sensitive
/// parameters must be excluded with `skip(...)`.
#[proc_macro_attribute]
pub fn trace_instrument(meta: TokenStream, input: TokenStream) -> TokenStream {
    let meta = proc_macro2::TokenStream::from(meta);
    let ItemFn {
        attrs,
        vis,
        sig,
        block,
    } = parse_macro_input!(input as ItemFn);

    let name = sig.ident.to_string();

    quote! {
        #[::tracing::instrument(level = "debug", ret(level = "trace"), #meta)]
        #(#attrs)*
        #vis #sig {
            ::tracing::trace!(function = #name, "call");
            #block
        }
    }
    .into()
}
