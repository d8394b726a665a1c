use proc_macro2::{Span, TokenStream};
use quote::{format_ident, quote};
use syn::punctuated::Punctuated;
use syn::{Attribute, Item, LitStr, Token};

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    State,
    Request,
}

impl Kind {
    fn label(self) -> &'static str {
        match self {
            Kind::State => "state",
            Kind::Request => "request",
        }
    }

    fn derives(self) -> &'static [&'static str] {
        match self {
            Kind::State => &["Debug", "Clone", "PartialEq"],
            Kind::Request => &["Debug", "Clone"],
        }
    }
}

pub fn expand(kind: Kind, attr: TokenStream, mut item: Item) -> syn::Result<TokenStream> {
    let path = parse_path(kind, attr)?;

    let (attrs, ident, generics) = match &mut item {
        Item::Struct(s) => (&mut s.attrs, s.ident.clone(), s.generics.clone()),
        Item::Enum(e) => (&mut e.attrs, e.ident.clone(), e.generics.clone()),
        other => {
            return Err(syn::Error::new_spanned(
                other,
                format!("#[{}] applies to structs and enums", kind.label()),
            ))
        }
    };

    let present = derived_names(attrs);
    let missing: Vec<_> = kind
        .derives()
        .iter()
        .filter(|d| !present.iter().any(|p| p == *d))
        .map(|d| format_ident!("{}", d))
        .collect();
    if !missing.is_empty() {
        attrs.insert(0, syn::parse_quote!(#[derive(#(#missing),*)]));
    }

    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
    let doc = format!("Flux {} path.", kind.label());

    Ok(quote! {
        #item

        impl #impl_generics #ident #ty_generics #where_clause {
            #[doc = #doc]
            pub const PATH: &'static str = #path;
        }
    })
}

fn parse_path(kind: Kind, attr: TokenStream) -> syn::Result<String> {
    if attr.is_empty() {
        return Err(syn::Error::new(
            Span::call_site(),
            format!("#[{}] needs a path, e.g. #[{}(\"feed/posts\")]", kind.label(), kind.label()),
        ));
    }
    let lit: LitStr = syn::parse2(attr)?;
    let path = lit.value();
    if path.is_empty() {
        return Err(syn::Error::new(lit.span(), format!("{} path cannot be empty", kind.label())));
    }
    if path.starts_with('/') || path.ends_with('/') || path.contains("//") {
        return Err(syn::Error::new(lit.span(), "path levels must be non-empty"));
    }
    if path.split('/').any(|level| level == "+" || level == "#") {
        return Err(syn::Error::new(
            lit.span(),
            "wildcards belong in subscriptions, not in type paths",
        ));
    }
    Ok(path)
}

/// Last segment of every path inside existing `#[derive(...)]` attributes.
fn derived_names(attrs: &[Attribute]) -> Vec<String> {
    attrs
        .iter()
        .filter(|a| a.path().is_ident("derive"))
        .filter_map(|a| {
            a.parse_args_with(Punctuated::<syn::Path, Token![,]>::parse_terminated)
                .ok()
        })
        .flatten()
        .filter_map(|p| p.segments.last().map(|s| s.ident.to_string()))
        .collect()
}
