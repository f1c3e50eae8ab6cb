//! Crate path resolution for dependency aliasing support.
//!
//! Converts the optional `#[schema(crate = "...")]` attribute value into the
//! tokens generated code uses to reach `nest_config`.

use proc_macro2::TokenStream;
use quote::quote;

/// Resolve the crate path from the parsed struct attribute.
///
/// Defaults to `::nest_config` when no override is present.
pub(crate) fn resolve(crate_path: Option<&syn::Path>) -> TokenStream {
    crate_path.map_or_else(|| quote! { ::nest_config }, |path| quote! { #path })
}
