//! Crate path resolution for generated code.
//!
//! Detects whether the user depends on `swgen` (facade) or `swgen-core`
//! directly, and returns the appropriate path prefix for generated code.

use proc_macro2::TokenStream;
use proc_macro_crate::{crate_name, FoundCrate};
use quote::quote;

/// Returns the token stream for accessing `swgen_core` types.
///
/// If the user depends on `swgen`, returns `::swgen`.
/// Otherwise returns `::swgen_core`. Both crates alias themselves with
/// `extern crate self`, so the absolute path also works inside them.
pub fn swgen_core_path() -> TokenStream {
    if let Ok(found) = crate_name("swgen") {
        match found {
            FoundCrate::Itself => quote!(::swgen),
            FoundCrate::Name(name) => {
                let ident = syn::Ident::new(&name, proc_macro2::Span::call_site());
                quote!(::#ident)
            }
        }
    } else if let Ok(found) = crate_name("swgen-core") {
        match found {
            FoundCrate::Itself => quote!(::swgen_core),
            FoundCrate::Name(name) => {
                let ident = syn::Ident::new(&name, proc_macro2::Span::call_site());
                quote!(::#ident)
            }
        }
    } else {
        // Fallback - assume swgen_core is available (for error messages)
        quote!(::swgen_core)
    }
}
