//! Type introspection helpers.
//!
//! Shallow inspection of `syn::Type` values to recognise `Option<T>`.

use syn::{GenericArgument, PathArguments, Type};

/// Returns the inner type if `ty` is `Option<T>`.
///
/// The check is shallow: it inspects only the outermost path and accepts
/// fully-qualified forms such as `std::option::Option<T>`.
pub(crate) fn option_inner(ty: &Type) -> Option<&Type> {
    let Type::Path(p) = ty else {
        return None;
    };
    let last = p.path.segments.last()?;
    if last.ident != "Option" {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &last.arguments else {
        return None;
    };
    match args.args.first()? {
        GenericArgument::Type(inner) => Some(inner),
        _ => None,
    }
}
