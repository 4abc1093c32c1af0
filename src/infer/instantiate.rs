//! The instantiation judgments `Γ ⊢ α̂ :=< A ⊣ Δ` and `Γ ⊢ A =<: α̂ ⊣ Δ`.
//!
//! Both directions keep the invariant that α̂ appears unsolved in Γ, and
//! both decide solvability by position: a solution may only mention
//! entries to the *left* of the variable it solves.
//!
//! ```text
//!   Γ₀[α̂] ⊢ τ wf     τ monotype
//! ──────────────────────────────── (InstLSolve / InstRSolve)
//!   Γ₀[α̂] ⊢ α̂ :=< τ ⊣ Γ₀[α̂ = τ]
//!
//!   Γ[α̂₂, α̂₁, α̂ = α̂₁→α̂₂] ⊢ A₁ =<: α̂₁ ⊣ Θ    Θ ⊢ α̂₂ :=< [Θ]A₂ ⊣ Δ
//! ────────────────────────────────────────────────────────────────── (InstLArr)
//!   Γ[α̂] ⊢ α̂ :=< A₁ → A₂ ⊣ Δ
//!
//!   Γ[α̂][β̂] ⊢ α̂ :=< β̂ ⊣ Γ[α̂][β̂ = α̂]          (InstLReach)
//! ```
//!
//! A failed precondition surfaces as an error so the enclosing subtyping
//! rule falls through instead of silently succeeding.

use crate::ast::types::Type;
use crate::ast::uid::Uid;
use crate::infer::context::{Context, Entry};
use crate::infer::error::{InferResult, TypeError, TypeErrorKind};
use crate::infer::subst::substitute;

impl Context {
    /// Instantiate α̂ such that α̂ <: A.
    pub fn inst_l(&self, alpha: Uid, a: &Type) -> InferResult<Context> {
        self.trace_judgment("inst_l", &Type::Exists(alpha), ":=<", a);
        let target = Entry::unsolved(alpha);
        let (left, right) = self
            .split_at(&target)
            .ok_or_else(|| fail(alpha, a))?;

        // InstLSolve: A fits entirely left of α̂.
        if a.is_monotype() && left.is_well_formed(a) {
            self.trace_rule("InstLSolve");
            return Ok(self.splice(&target, vec![Entry::solved(alpha, a.clone())]));
        }

        match a {
            Type::Arrow(a1, a2) => {
                // Fresh variables go in *before* the solution so the
                // solution only references entries to its left.
                self.trace_rule("InstLArr");
                let alpha1 = Uid::fresh(alpha.name);
                let alpha2 = Uid::fresh(alpha.name);
                let arrow = Type::arrow(Type::Exists(alpha1), Type::Exists(alpha2));
                let gamma = self.splice(
                    &target,
                    vec![
                        Entry::unsolved(alpha2),
                        Entry::unsolved(alpha1),
                        Entry::solved(alpha, arrow),
                    ],
                );
                let theta = gamma.inst_r(a1, alpha1)?;
                let codomain = theta.apply(a2);
                theta.inst_l(alpha2, &codomain)
            }
            Type::Forall(beta, body) => {
                self.trace_rule("InstLAllR");
                let universal = Entry::Universal(*beta);
                let gamma = self.pushed(universal.clone());
                let delta = gamma.inst_l(alpha, body)?;
                Ok(delta.drop_from(&universal))
            }
            Type::Exists(beta) => {
                // InstLReach: β̂ lives to the right of α̂, so the right one
                // points at the left one.
                if right.has_unsolved(*beta) {
                    self.trace_rule("InstLReach");
                    Ok(self.splice(
                        &Entry::unsolved(*beta),
                        vec![Entry::solved(*beta, Type::Exists(alpha))],
                    ))
                } else {
                    self.trace_rule_fail("InstLReach");
                    Err(fail(alpha, a))
                }
            }
            _ => Err(fail(alpha, a)),
        }
    }

    /// Instantiate α̂ such that A <: α̂.
    pub fn inst_r(&self, a: &Type, alpha: Uid) -> InferResult<Context> {
        self.trace_judgment("inst_r", a, "=<:", &Type::Exists(alpha));
        let target = Entry::unsolved(alpha);
        let (left, right) = self
            .split_at(&target)
            .ok_or_else(|| fail(alpha, a))?;

        if a.is_monotype() && left.is_well_formed(a) {
            self.trace_rule("InstRSolve");
            return Ok(self.splice(&target, vec![Entry::solved(alpha, a.clone())]));
        }

        match a {
            Type::Arrow(a1, a2) => {
                // Contravariant swap relative to InstLArr.
                self.trace_rule("InstRArr");
                let alpha1 = Uid::fresh(alpha.name);
                let alpha2 = Uid::fresh(alpha.name);
                let arrow = Type::arrow(Type::Exists(alpha1), Type::Exists(alpha2));
                let gamma = self.splice(
                    &target,
                    vec![
                        Entry::unsolved(alpha2),
                        Entry::unsolved(alpha1),
                        Entry::solved(alpha, arrow),
                    ],
                );
                let theta = gamma.inst_l(alpha1, a1)?;
                let codomain = theta.apply(a2);
                theta.inst_r(&codomain, alpha2)
            }
            Type::Forall(beta, body) => {
                // The ∀ on the subtype side is eliminated with a flexible
                // variable behind a marker, not a rigid one.
                self.trace_rule("InstRAllL");
                let beta1 = Uid::fresh(beta.name);
                let marker = Entry::Marker(beta1);
                let mut gamma = self.clone();
                gamma.push(marker.clone());
                gamma.push(Entry::unsolved(beta1));
                let instantiated = substitute(body, &Type::Exists(beta1), *beta);
                let delta = gamma.inst_r(&instantiated, alpha)?;
                Ok(delta.drop_from(&marker))
            }
            Type::Exists(beta) => {
                if right.has_unsolved(*beta) {
                    self.trace_rule("InstRReach");
                    Ok(self.splice(
                        &Entry::unsolved(*beta),
                        vec![Entry::solved(*beta, Type::Exists(alpha))],
                    ))
                } else {
                    self.trace_rule_fail("InstRReach");
                    Err(fail(alpha, a))
                }
            }
            _ => Err(fail(alpha, a)),
        }
    }
}

fn fail(alpha: Uid, a: &Type) -> TypeError {
    TypeError::new(TypeErrorKind::Subtype(Type::Exists(alpha), a.clone()))
}
