use proc_macro::TokenStream;

mod value;

/// Derive `From<Self> for multimethod::Value`.
///
/// - Named fields become a map keyed by field name. Use
///   `#[value(rename = "yearBorn")]` to change a key and `#[value(skip)]` to
///   leave a field out.
/// - Tuple structs become a list.
/// - Unit structs become `null`.
///
/// Every included field type must itself convert into `Value`.
#[proc_macro_derive(IntoValue, attributes(value))]
pub fn derive_into_value(input: TokenStream) -> TokenStream {
    value::derive_into_value_impl(input)
}
