use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{Data, DeriveInput, Fields, Ident, Type, Variant};

struct VariantInfo<'a> {
    ident: &'a Ident,
    source: Option<(&'a Ident, &'a Type)>,
    has_context: bool,
}

/// Expands the `#[corral_error]` attribute macro.
pub fn expand_error(input: DeriveInput) -> TokenStream {
    let name = &input.ident;
    let trait_name = format_ident!("{}Ext", name);

    let Data::Enum(data) = &input.data else {
        return syn::Error::new_spanned(name, "corral_error can only decorate enums")
            .to_compile_error();
    };

    let variants: Vec<VariantInfo<'_>> = match data.variants.iter().map(parse_variant).collect() {
        Ok(variants) => variants,
        Err(err) => return err,
    };

    let derive_attr = missing_derives(&input);
    let context_trait = context_trait(name, &trait_name, &variants);
    let from_impls = variants.iter().filter_map(|info| from_impl(name, &trait_name, info));

    quote! {
        #[allow(non_shorthand_field_patterns)]
        #derive_attr
        #input

        #context_trait
        #(#from_impls)*

        #[allow(dead_code)]
        fn format_context(context: &Option<std::borrow::Cow<'static, str>>) -> std::borrow::Cow<'static, str> {
            context.as_ref().map_or(std::borrow::Cow::Borrowed(""), |c| std::borrow::Cow::Owned(format!(" ({c})")))
        }
    }
}

fn parse_variant(variant: &Variant) -> Result<VariantInfo<'_>, TokenStream> {
    let Fields::Named(fields) = &variant.fields else {
        return Err(syn::Error::new_spanned(
            variant,
            "corral_error requires named fields for message/source/context handling",
        )
        .to_compile_error());
    };

    let has_context = fields
        .named
        .iter()
        .any(|field| field.ident.as_ref().is_some_and(|ident| ident == "context"));

    let source = fields.named.iter().find_map(|field| {
        let ident = field.ident.as_ref()?;
        let named_source = ident == "source"
            || field.attrs.iter().any(|attr| {
                attr.path().is_ident("source") || attr.path().is_ident("from")
            });
        named_source.then_some((ident, &field.ty))
    });

    if source.is_some() && !has_context {
        return Err(syn::Error::new_spanned(
            variant,
            "corral_error requires `context: Option<Cow<'static, str>>` for variants with a source",
        )
        .to_compile_error());
    }

    Ok(VariantInfo { ident: &variant.ident, source, has_context })
}

fn missing_derives(input: &DeriveInput) -> TokenStream {
    let derives = super::derived_trait_names(&input.attrs);

    let mut tokens = Vec::new();
    if !derives.contains("Debug") {
        tokens.push(quote! { Debug });
    }
    if !derives.contains("Error") {
        tokens.push(quote! { ::thiserror::Error });
    }

    if tokens.is_empty() { quote! {} } else { quote! { #[derive(#(#tokens),*)] } }
}

fn context_trait(name: &Ident, trait_name: &Ident, variants: &[VariantInfo<'_>]) -> TokenStream {
    let arms = variants.iter().filter(|info| info.has_context).map(|info| {
        let ident = info.ident;
        quote! { #name::#ident { context: c, .. } => *c = Some(context.into()), }
    });

    quote! {
        pub trait #trait_name<T> {
            fn context(self, context: impl Into<std::borrow::Cow<'static, str>>) -> Result<T, #name>;
        }

        #[automatically_derived]
        impl<T> #trait_name<T> for Result<T, #name> {
            #[inline]
            fn context(self, context: impl Into<std::borrow::Cow<'static, str>>) -> Self {
                self.map_err(|mut e| {
                    #[allow(unreachable_patterns)]
                    match &mut e {
                        #(#arms)*
                        _ => {}
                    }
                    e
                })
            }
        }
    }
}

fn from_impl(name: &Ident, trait_name: &Ident, info: &VariantInfo<'_>) -> Option<TokenStream> {
    let (source_field, source_ty) = info.source?;
    let variant = info.ident;

    Some(quote! {
        #[automatically_derived]
        impl From<#source_ty> for #name {
            #[inline]
            fn from(#source_field: #source_ty) -> Self { Self::#variant { #source_field, context: None } }
        }

        impl<T> #trait_name<T> for std::result::Result<T, #source_ty> {
            #[inline]
            fn context(self, context: impl Into<std::borrow::Cow<'static, str>>) -> std::result::Result<T, #name> {
                self.map_err(|#source_field| #name::#variant { #source_field, context: Some(context.into()) })
            }
        }
    })
}
