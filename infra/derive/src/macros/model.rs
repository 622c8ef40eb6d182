use proc_macro2::TokenStream;
use quote::quote;
use syn::{Fields, Ident, ItemStruct};

/// Expands the `#[model]` attribute macro.
///
/// Injects missing common derives and emits the `Model` implementation that
/// fixes the declared field list for the annotated struct.
pub fn expand_model(args: TokenStream, input: ItemStruct) -> TokenStream {
    if !args.is_empty() {
        return syn::Error::new_spanned(args, "model takes no arguments").to_compile_error();
    }

    let Fields::Named(fields) = &input.fields else {
        return syn::Error::new_spanned(&input.ident, "model requires a struct with named fields")
            .to_compile_error();
    };

    let idents: Vec<&Ident> =
        fields.named.iter().filter_map(|field| field.ident.as_ref()).collect();
    let names: Vec<String> = idents.iter().map(|ident| field_name(ident)).collect();

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let derive_attr = missing_derives(&input);

    let copies = idents.iter().zip(&names).map(|(ident, key)| {
        quote! {
            if let Some(value) = fields.get(#key) {
                if let Ok(value) = ::corral_registry::value::from_value(value.clone()) {
                    model.#ident = value;
                }
            }
        }
    });

    let reads = idents.iter().zip(&names).map(|(ident, key)| {
        quote! { #key => ::corral_registry::value::to_value(&self.#ident).ok(), }
    });

    quote! {
        #derive_attr
        #input

        #[automatically_derived]
        impl #impl_generics ::corral_registry::Model for #name #ty_generics #where_clause {
            const FIELDS: &'static [&'static str] = &[#(#names),*];

            fn from_fields(fields: &::corral_registry::FieldMap) -> Self {
                let mut model = <Self as ::core::default::Default>::default();
                #(#copies)*
                model
            }

            fn field(&self, name: &str) -> ::core::option::Option<::corral_registry::Value> {
                match name {
                    #(#reads)*
                    _ => ::core::option::Option::None,
                }
            }
        }
    }
}

fn field_name(ident: &Ident) -> String {
    ident.to_string().trim_start_matches("r#").to_owned()
}

fn missing_derives(input: &ItemStruct) -> TokenStream {
    let derives = super::derived_trait_names(&input.attrs);

    let mut tokens = Vec::new();
    if !derives.contains("Debug") {
        tokens.push(quote! { Debug });
    }
    if !derives.contains("Default") {
        tokens.push(quote! { Default });
    }
    if !derives.contains("Serialize") {
        tokens.push(quote! { ::serde::Serialize });
    }
    if !derives.contains("Deserialize") {
        tokens.push(quote! { ::serde::Deserialize });
    }

    if tokens.is_empty() { quote! {} } else { quote! { #[derive(#(#tokens),*)] } }
}
