//! The subtyping judgment `Γ ⊢ A <: B ⊣ Δ`.
//!
//! ```text
//! ──────────────── (<:Unit, <:Var, <:Exvar)
//!   Γ ⊢ A <: A ⊣ Γ
//!
//! ──────────────────── (numeric widening)
//!   Γ ⊢ int <: float ⊣ Γ      (likewise int <: complex, float <: complex)
//!
//!   Γ ⊢ B₁ <: A₁ ⊣ Θ    Θ ⊢ [Θ]A₂ <: [Θ]B₂ ⊣ Δ
//! ─────────────────────────────────────────────── (<:→)
//!        Γ ⊢ A₁ → A₂ <: B₁ → B₂ ⊣ Δ
//!
//!   Γ, ▷α̂, α̂ ⊢ [α̂/α]A₀ <: B ⊣ Δ, ▷α̂, Θ
//! ──────────────────────────────────────── (<:∀L)
//!        Γ ⊢ ∀α. A₀ <: B ⊣ Δ
//!
//!   Γ, β ⊢ A <: B₀ ⊣ Δ, β, Θ
//! ───────────────────────────── (<:∀R)
//!   Γ ⊢ A <: ∀β. B₀ ⊣ Δ
//! ```
//!
//! Rule order: reflexive/primitive cases, then the structural arrow rule,
//! then the two ∀ rules, then instantiation. An occurs-check failure makes
//! the instantiation rules inapplicable; when nothing applies the result
//! is a subtype error.

use crate::ast::types::Type;
use crate::ast::uid::Uid;
use crate::infer::context::{Context, Entry};
use crate::infer::error::{InferResult, TypeError, TypeErrorKind};
use crate::infer::subst::{occurs_in, substitute};
use crate::intern::Symbol;

/// Numeric widening: the one family of primitive subtyping rules that is
/// not plain reflexivity.
fn widens(a: Uid, b: Uid) -> bool {
    a.is_primitive()
        && b.is_primitive()
        && matches!(
            (a.name, b.name),
            (Symbol::INT, Symbol::FLOAT)
                | (Symbol::INT, Symbol::COMPLEX)
                | (Symbol::FLOAT, Symbol::COMPLEX)
        )
}

impl Context {
    pub fn subtype(&self, a: &Type, b: &Type) -> InferResult<Context> {
        self.trace_judgment("subtype", a, "<:", b);
        if !self.is_well_formed(a) {
            return Err(TypeError::new(TypeErrorKind::Malformed(a.clone())));
        }
        if !self.is_well_formed(b) {
            return Err(TypeError::new(TypeErrorKind::Malformed(b.clone())));
        }

        match (a, b) {
            (Type::Unit, Type::Unit) => {
                self.trace_rule("<:Unit");
                Ok(self.clone())
            }
            (Type::Var(ua), Type::Var(ub)) if ua == ub => {
                self.trace_rule("<:Var");
                Ok(self.clone())
            }
            (Type::Var(ua), Type::Var(ub)) if widens(*ua, *ub) => {
                self.trace_rule("<:Widen");
                Ok(self.clone())
            }
            (Type::Exists(ua), Type::Exists(ub)) if ua == ub => {
                self.trace_rule("<:Exvar");
                Ok(self.clone())
            }
            (Type::Arrow(a1, a2), Type::Arrow(b1, b2)) => {
                // Domains are contravariant; applying Θ before the second
                // premise propagates the domain's solutions.
                self.trace_rule("<:->");
                let theta = self.subtype(b1, a1)?;
                theta.subtype(&theta.apply(a2), &theta.apply(b2))
            }
            // ∀R comes first so that a quantifier on both sides introduces
            // the rigid variable before the flexible one; reflexivity on
            // ∀-types depends on this order.
            (_, Type::Forall(ub, body)) => {
                self.trace_rule("<:∀R");
                let universal = Entry::Universal(*ub);
                let theta = self.pushed(universal.clone());
                let delta = theta.subtype(a, body)?;
                Ok(delta.drop_from(&universal))
            }
            (Type::Forall(ua, body), _) => {
                self.trace_rule("<:∀L");
                let alpha = Uid::fresh(ua.name);
                let marker = Entry::Marker(alpha);
                let mut gamma = self.clone();
                gamma.push(marker.clone());
                gamma.push(Entry::unsolved(alpha));
                let instantiated = substitute(body, &Type::Exists(alpha), *ua);
                let delta = gamma.subtype(&instantiated, b)?;
                Ok(delta.drop_from(&marker))
            }
            (Type::Exists(ua), _) if self.has_unsolved(*ua) && !occurs_in(*ua, b) => {
                self.trace_rule("<:InstantiateL");
                self.inst_l(*ua, b).map_err(|err| {
                    self.trace_rule_fail("<:InstantiateL");
                    subtype_error(err, a, b)
                })
            }
            (_, Type::Exists(ub)) if self.has_unsolved(*ub) && !occurs_in(*ub, a) => {
                self.trace_rule("<:InstantiateR");
                self.inst_r(a, *ub).map_err(|err| {
                    self.trace_rule_fail("<:InstantiateR");
                    subtype_error(err, a, b)
                })
            }
            _ => Err(TypeError::new(TypeErrorKind::Subtype(a.clone(), b.clone()))),
        }
    }
}

/// An instantiation precondition failed: report the relation that could
/// not be established, unless a more specific error already exists.
fn subtype_error(err: TypeError, a: &Type, b: &Type) -> TypeError {
    match &err.kind {
        TypeErrorKind::Subtype(_, _) | TypeErrorKind::Malformed(_) => err,
        _ => TypeError::new(TypeErrorKind::Subtype(a.clone(), b.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reflexivity_on_primitives_and_unit() {
        let ctx = Context::new();
        assert!(ctx.subtype(&Type::int(), &Type::int()).is_ok());
        assert!(ctx.subtype(&Type::Unit, &Type::Unit).is_ok());
        assert!(ctx.subtype(&Type::bool(), &Type::bool()).is_ok());
    }

    #[test]
    fn numeric_widening_is_one_directional() {
        let ctx = Context::new();
        assert!(ctx.subtype(&Type::int(), &Type::float()).is_ok());
        assert!(ctx.subtype(&Type::int(), &Type::complex()).is_ok());
        assert!(ctx.subtype(&Type::float(), &Type::complex()).is_ok());

        assert!(ctx.subtype(&Type::float(), &Type::int()).is_err());
        assert!(ctx.subtype(&Type::complex(), &Type::int()).is_err());
        assert!(ctx.subtype(&Type::complex(), &Type::float()).is_err());
    }

    #[test]
    fn unrelated_primitives_do_not_relate() {
        let ctx = Context::new();
        assert!(ctx.subtype(&Type::string(), &Type::int()).is_err());
        assert!(ctx.subtype(&Type::bool(), &Type::float()).is_err());
    }

    #[test]
    fn arrow_domains_are_contravariant() {
        let ctx = Context::new();
        // (float -> int) <: (int -> int): needs int <: float on domains.
        let sub = Type::arrow(Type::float(), Type::int());
        let sup = Type::arrow(Type::int(), Type::int());
        assert!(ctx.subtype(&sub, &sup).is_ok());
        assert!(ctx.subtype(&sup, &sub).is_err());
    }

    #[test]
    fn arrow_codomains_are_covariant() {
        let ctx = Context::new();
        let sub = Type::arrow(Type::int(), Type::int());
        let sup = Type::arrow(Type::int(), Type::float());
        assert!(ctx.subtype(&sub, &sup).is_ok());
        assert!(ctx.subtype(&sup, &sub).is_err());
    }

    #[test]
    fn forall_left_instantiates_to_match() {
        let ctx = Context::new();
        let a = Uid::fresh(Symbol::EMPTY);
        // ∀a. a -> a  <:  int -> int
        let poly = Type::Forall(a, Box::new(Type::arrow(Type::Var(a), Type::Var(a))));
        let mono = Type::arrow(Type::int(), Type::int());
        assert!(ctx.subtype(&poly, &mono).is_ok());
    }

    #[test]
    fn reflexivity_on_quantified_types() {
        let ctx = Context::new();
        let a = Uid::fresh(Symbol::EMPTY);
        let poly = Type::Forall(a, Box::new(Type::arrow(Type::Var(a), Type::Var(a))));
        let delta = ctx.subtype(&poly, &poly).unwrap();
        assert_eq!(delta, ctx);
    }

    #[test]
    fn forall_right_requires_genuine_polymorphism() {
        let ctx = Context::new();
        let a = Uid::fresh(Symbol::EMPTY);
        let poly = Type::Forall(a, Box::new(Type::arrow(Type::Var(a), Type::Var(a))));
        let mono = Type::arrow(Type::int(), Type::int());
        // int -> int is not a subtype of ∀a. a -> a.
        assert!(ctx.subtype(&mono, &poly).is_err());
    }

    #[test]
    fn unsolved_existential_instantiates_left() {
        let alpha = Uid::fresh(Symbol::EMPTY);
        let mut ctx = Context::new();
        ctx.push(Entry::unsolved(alpha));

        let delta = ctx.subtype(&Type::Exists(alpha), &Type::int()).unwrap();
        assert_eq!(delta.solution(alpha), Some(&Type::int()));
    }

    #[test]
    fn unsolved_existential_instantiates_right() {
        let alpha = Uid::fresh(Symbol::EMPTY);
        let mut ctx = Context::new();
        ctx.push(Entry::unsolved(alpha));

        let delta = ctx.subtype(&Type::int(), &Type::Exists(alpha)).unwrap();
        assert_eq!(delta.solution(alpha), Some(&Type::int()));
    }

    #[test]
    fn occurs_check_blocks_circular_instantiation() {
        let alpha = Uid::fresh(Symbol::EMPTY);
        let mut ctx = Context::new();
        ctx.push(Entry::unsolved(alpha));

        // α̂ <: α̂ -> α̂ has no applicable rule.
        let circular = Type::arrow(Type::Exists(alpha), Type::Exists(alpha));
        assert!(ctx.subtype(&Type::Exists(alpha), &circular).is_err());
    }

    #[test]
    fn ill_formed_types_are_rejected() {
        let ctx = Context::new();
        let stranger = Uid::fresh(Symbol::EMPTY);
        let err = ctx.subtype(&Type::Var(stranger), &Type::int()).unwrap_err();
        assert!(matches!(err.kind, TypeErrorKind::Malformed(_)));
    }

    #[test]
    fn output_context_extends_input() {
        let alpha = Uid::fresh(Symbol::EMPTY);
        let beta = Uid::fresh(Symbol::EMPTY);
        let mut ctx = Context::new();
        ctx.push(Entry::unsolved(alpha));
        ctx.push(Entry::unsolved(beta));

        let delta = ctx.subtype(&Type::Exists(beta), &Type::int()).unwrap();
        // α̂ untouched, β̂ solved in place.
        assert!(delta.has_unsolved(alpha));
        assert_eq!(delta.solution(beta), Some(&Type::int()));
        assert_eq!(delta.entries().len(), 2);
    }
}
