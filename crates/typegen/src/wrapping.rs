//! List and non-null wrapping of base type expressions.

use crate::{expr::TypeExpr, type_ref::TypeRef};

/// Wraps `base` according to the declared GraphQL type reference.
///
/// Named references wrap to the base itself, nullable ones to `Option`.
/// List references become owning `Vec`s, nullable ones wrapped in `Option`.
/// A list in element position of another list is always rendered nullable:
/// servers may return `null` for an inner list wherever an element may be
/// absent, and the decoder must have somewhere to put it.
pub(crate) fn wrap(base: TypeExpr, ty: &TypeRef) -> TypeExpr {
    match ty {
        TypeRef::Named { non_null, .. } => nullable(base, *non_null),
        TypeRef::List { of, non_null } => {
            let sequence = TypeExpr::vec(wrap_element(base, of));
            nullable(sequence, *non_null)
        }
    }
}

fn wrap_element(base: TypeExpr, ty: &TypeRef) -> TypeExpr {
    match ty {
        TypeRef::Named { non_null, .. } => nullable(base, *non_null),
        TypeRef::List { of, .. } => TypeExpr::option(TypeExpr::vec(wrap_element(base, of))),
    }
}

fn nullable(expr: TypeExpr, non_null: bool) -> TypeExpr {
    if non_null {
        expr
    } else {
        TypeExpr::option(expr)
    }
}
