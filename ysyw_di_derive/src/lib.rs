use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, DeriveInput, Field, Fields};

/// Derives `ysyw_di::Build` for a struct.
///
/// Every field is built from the provider, except fields annotated with
/// `#[di(default)]`, which are initialized with `Default::default()`. The
/// built value is stored in the provider's cache and reused on subsequent
/// builds.
#[proc_macro_derive(Build, attributes(di))]
pub fn derive_build(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let ident = input.ident;

    let generics = input
        .generics
        .type_params()
        .map(|x| &x.ident)
        .collect::<Vec<_>>();

    let syn::Data::Struct(data) = input.data else {
        return quote! { ::core::compile_error!("Build can only be derived for structs"); }.into();
    };

    let bounds = data
        .fields
        .iter()
        .filter(|x| !is_default(x))
        .map(|Field { ty, .. }| quote! { #ty: ::ysyw_di::Build<__Provider> })
        .collect::<Vec<_>>();

    let build_field = |field: &Field| {
        if is_default(field) {
            quote! { ::core::default::Default::default() }
        } else {
            quote! { ::ysyw_di::Build::build(provider) }
        }
    };

    let build_expr = match &data.fields {
        Fields::Named(fields) => {
            let fields = fields.named.iter().map(|f| {
                let ident = &f.ident;
                let value = build_field(f);
                quote! { #ident: #value }
            });
            quote! { Self { #(#fields),* } }
        }
        Fields::Unnamed(fields) => {
            let fields = fields.unnamed.iter().map(build_field);
            quote! { Self( #(#fields),* ) }
        }
        Fields::Unit => quote! { Self },
    };

    quote! {
        impl<__Provider, #(#generics),*> ::ysyw_di::Build<__Provider> for #ident<#(#generics),*>
        where
            Self: ::core::clone::Clone + 'static,
            __Provider: ::ysyw_di::Provider,
            #(#bounds),*
        {
            fn build(provider: &mut __Provider) -> Self {
                if let ::core::option::Option::Some(cached) =
                    ::ysyw_di::Provider::cache(provider).get::<Self>()
                {
                    return ::core::clone::Clone::clone(cached);
                }

                let value: Self = #build_expr;
                ::ysyw_di::Provider::cache(provider)
                    .insert(::core::clone::Clone::clone(&value));
                value
            }
        }
    }
    .into()
}

fn is_default(field: &Field) -> bool {
    field.attrs.iter().any(|attr| {
        attr.path().is_ident("di")
            && attr
                .parse_args::<syn::Ident>()
                .is_ok_and(|arg| arg == "default")
    })
}
