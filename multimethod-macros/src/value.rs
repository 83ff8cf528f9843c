//! `#[derive(IntoValue)]` expansion.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    Data, DeriveInput, Field, Fields, Ident, LitStr, Token,
    parse::{Parse, ParseStream},
    parse_macro_input,
};

/// Arguments of a `#[value(...)]` field attribute.
#[derive(Default)]
struct FieldArgs {
    rename: Option<String>,
    skip: bool,
}

impl Parse for FieldArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut args = FieldArgs::default();

        while !input.is_empty() {
            let ident: Ident = input.parse()?;

            match ident.to_string().as_str() {
                "skip" => args.skip = true,
                "rename" => {
                    input.parse::<Token![=]>()?;
                    let lit: LitStr = input.parse()?;
                    args.rename = Some(lit.value());
                }
                other => {
                    return Err(syn::Error::new(
                        ident.span(),
                        format!("unknown value attribute: {}", other),
                    ));
                }
            }

            if input.peek(Token![,]) {
                input.parse::<Token![,]>()?;
            }
        }

        Ok(args)
    }
}

fn field_args(field: &Field) -> syn::Result<FieldArgs> {
    let mut merged = FieldArgs::default();
    for attr in field.attrs.iter().filter(|a| a.path().is_ident("value")) {
        let args: FieldArgs = attr.parse_args()?;
        merged.skip |= args.skip;
        if args.rename.is_some() {
            merged.rename = args.rename;
        }
    }
    Ok(merged)
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let data = match &input.data {
        Data::Struct(data) => data,
        _ => {
            return Err(syn::Error::new_spanned(
                name,
                "IntoValue can only be derived for structs",
            ));
        }
    };

    let mut bounds = Vec::new();
    let body = match &data.fields {
        Fields::Named(fields) => {
            let mut inserts = Vec::new();
            for field in &fields.named {
                let args = field_args(field)?;
                if args.skip {
                    continue;
                }
                let Some(ident) = field.ident.as_ref() else {
                    continue;
                };
                let key = args
                    .rename
                    .unwrap_or_else(|| ident.to_string().trim_start_matches("r#").to_owned());
                let ty = &field.ty;
                bounds.push(quote! { ::multimethod::Value: ::core::convert::From<#ty> });
                inserts.push(quote! {
                    map.insert(
                        ::std::string::String::from(#key),
                        ::multimethod::Value::from(value.#ident),
                    );
                });
            }
            quote! {
                #[allow(unused_mut)]
                let mut map = ::multimethod::Map::new();
                #(#inserts)*
                ::multimethod::Value::Map(map)
            }
        }
        Fields::Unnamed(fields) => {
            let mut elems = Vec::new();
            for (index, field) in fields.unnamed.iter().enumerate() {
                let args = field_args(field)?;
                if args.rename.is_some() {
                    return Err(syn::Error::new_spanned(
                        field,
                        "`rename` is only supported on named fields",
                    ));
                }
                if args.skip {
                    continue;
                }
                let index = syn::Index::from(index);
                let ty = &field.ty;
                bounds.push(quote! { ::multimethod::Value: ::core::convert::From<#ty> });
                elems.push(quote! { ::multimethod::Value::from(value.#index) });
            }
            quote! {
                ::multimethod::Value::List(::std::vec![#(#elems),*])
            }
        }
        Fields::Unit => quote! {
            let _ = value;
            ::multimethod::Value::Null
        },
    };

    let predicates = where_clause
        .into_iter()
        .flat_map(|w| w.predicates.iter())
        .map(|p| quote! { #p })
        .chain(bounds)
        .collect::<Vec<_>>();

    Ok(quote! {
        impl #impl_generics ::core::convert::From<#name #ty_generics> for ::multimethod::Value
        where
            #(#predicates,)*
        {
            fn from(value: #name #ty_generics) -> Self {
                #body
            }
        }
    })
}

/// Implementation of `#[derive(IntoValue)]`.
pub fn derive_into_value_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match expand(&input) {
        Ok(expanded) => TokenStream::from(expanded),
        Err(err) => err.to_compile_error().into(),
    }
}
