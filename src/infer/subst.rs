//! Occurs check and capture-avoiding substitution over types.

use crate::ast::types::Type;
use crate::ast::uid::Uid;

/// Whether `alpha` occurs anywhere in `ty`, as either variable kind.
/// Instantiation uses this to choose between the reach and solve rules.
pub fn occurs_in(alpha: Uid, ty: &Type) -> bool {
    match ty {
        Type::Unit => false,
        Type::Var(uid) | Type::Exists(uid) => *uid == alpha,
        Type::Forall(uid, body) => *uid == alpha || occurs_in(alpha, body),
        Type::Arrow(a, b) | Type::Sum(a, b) | Type::Product(a, b) => {
            occurs_in(alpha, a) || occurs_in(alpha, b)
        }
    }
}

/// `[replacement/alpha]ty`: substitute for both variable kinds, stopping
/// under a ∀-binder that shadows `alpha`.
pub fn substitute(ty: &Type, replacement: &Type, alpha: Uid) -> Type {
    match ty {
        Type::Unit => Type::Unit,
        Type::Var(uid) | Type::Exists(uid) if *uid == alpha => replacement.clone(),
        Type::Var(_) | Type::Exists(_) => ty.clone(),
        Type::Forall(uid, body) => {
            if *uid == alpha {
                ty.clone()
            } else {
                Type::Forall(*uid, Box::new(substitute(body, replacement, alpha)))
            }
        }
        Type::Arrow(a, b) => Type::Arrow(
            Box::new(substitute(a, replacement, alpha)),
            Box::new(substitute(b, replacement, alpha)),
        ),
        Type::Sum(a, b) => Type::Sum(
            Box::new(substitute(a, replacement, alpha)),
            Box::new(substitute(b, replacement, alpha)),
        ),
        Type::Product(a, b) => Type::Product(
            Box::new(substitute(a, replacement, alpha)),
            Box::new(substitute(b, replacement, alpha)),
        ),
    }
}
