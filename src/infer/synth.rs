//! The synthesis judgment `Γ ⊢ e ⇒ A ⊣ Δ` and application synthesis
//! `Γ ⊢ A • e ⇒⇒ C ⊣ Δ`.
//!
//! ```text
//!   Γ(x) = A                Γ, α̂, β̂, x:α̂ ⊢ e₀ ⇐ β̂ ⊣ Δ, x:α̂, Θ
//! ───────────── (Var)     ──────────────────────────────────────── (→I⇒)
//!   Γ ⊢ x ⇒ A ⊣ Γ           Γ ⊢ λx. e₀ ⇒ α̂ → β̂ ⊣ Δ
//!
//!   Γ ⊢ f ⇒ A ⊣ Θ    Θ ⊢ [Θ]A • a ⇒⇒ C ⊣ Δ
//! ──────────────────────────────────────────── (→E, per spine element)
//!   Γ ⊢ f(a) ⇒ C ⊣ Δ
//! ```
//!
//! The if rule types both branches and keeps whichever is the supertype
//! of the other; when neither direction holds the program needs an
//! annotation. Operators go through the monomorphic catalogue, with
//! subtyping connecting unsolved parameter types to the operand types;
//! this is how `λx. x+1` comes out at `int -> int`.

use crate::ast::operators::{infix_signature, is_comparison, prefix_signature};
use crate::ast::types::Type;
use crate::ast::uid::Uid;
use crate::ast::{Expr, Operator};
use crate::infer::context::{Context, Entry};
use crate::infer::error::{InferResult, TypeError, TypeErrorKind};
use crate::infer::subst::substitute;

impl Context {
    /// Infer a principal type for a closed, α-converted expression: the
    /// final context is applied to the synthesized type before reporting.
    pub fn synth_expr(&self, expr: &Expr) -> InferResult<Type> {
        let (ty, delta) = self.synth(expr)?;
        let applied = delta.apply(&ty);
        delta.trace_synth("toplevel", &applied);
        Ok(applied)
    }

    pub fn synth(&self, expr: &Expr) -> InferResult<(Type, Context)> {
        match expr {
            Expr::Unit(_) => {
                self.trace_rule("1I=>");
                Ok((Type::Unit, self.clone()))
            }
            Expr::Int { .. } => {
                self.trace_rule("intI=>");
                Ok((Type::int(), self.clone()))
            }
            Expr::Float { .. } => {
                self.trace_rule("floatI=>");
                Ok((Type::float(), self.clone()))
            }
            Expr::Complex { .. } => {
                self.trace_rule("complexI=>");
                Ok((Type::complex(), self.clone()))
            }
            Expr::Bool { .. } => {
                self.trace_rule("boolI=>");
                Ok((Type::bool(), self.clone()))
            }
            Expr::Str { .. } => {
                self.trace_rule("stringI=>");
                Ok((Type::string(), self.clone()))
            }
            Expr::Rune { .. } => {
                self.trace_rule("runeI=>");
                Ok((Type::rune(), self.clone()))
            }
            Expr::Var(ident) => {
                self.trace_rule("Var");
                match self.lookup_binding(ident.uid) {
                    Some(ty) => Ok((ty.clone(), self.clone())),
                    None => Err(TypeError::at(
                        TypeErrorKind::NotInContext(ident.uid),
                        ident.token.span,
                    )),
                }
            }
            Expr::If { cond, then, alt, .. } => self.synth_if(expr, cond, then, alt),
            Expr::Infix { op, left, right, .. } => self.synth_infix(expr, *op, left, right),
            Expr::Prefix { op, right, .. } => self.synth_prefix(expr, *op, right),
            Expr::Lambda { param, body, .. } => {
                self.trace_rule("->I=>");
                let alpha = Uid::fresh(param.uid.name);
                let beta = Uid::fresh(param.uid.name);
                let binding = Entry::binding(param.uid, Type::Exists(alpha));
                let mut gamma = self.clone();
                gamma.push(Entry::unsolved(alpha));
                gamma.push(Entry::unsolved(beta));
                gamma.push(binding.clone());

                let delta = gamma.check(body, &Type::Exists(beta))?;
                let fun_ty = Type::arrow(Type::Exists(alpha), Type::Exists(beta));
                Ok((fun_ty, delta.drop_from(&binding)))
            }
            Expr::Fix { name, body, .. } => {
                // The self type and the body type are separate variables;
                // applications of the binder inside the body solve the
                // self type, checking the body solves the other.
                self.trace_rule("fixI=>");
                let alpha = Uid::fresh(name.uid.name);
                let beta = Uid::fresh(name.uid.name);
                let binding = Entry::binding(name.uid, Type::Exists(alpha));
                let mut gamma = self.clone();
                gamma.push(Entry::unsolved(alpha));
                gamma.push(Entry::unsolved(beta));
                gamma.push(binding.clone());

                let delta = gamma.check(body, &Type::Exists(beta))?;
                Ok((Type::Exists(beta), delta.drop_from(&binding)))
            }
            Expr::Apply { func, spine, .. } => {
                self.trace_rule("->E");
                // A lambda-headed application is a desugared `let`: each
                // argument is synthesized and its type generalized over
                // the unsolved existentials it owns before binding the
                // parameter. This is what makes `let id = λa.a; id(id)`
                // come out polymorphic while λx. x(x) stays rejected.
                let mut ctx = self.clone();
                let mut fun: &Expr = func;
                let mut consumed = 0;
                while consumed < spine.len() {
                    let Expr::Lambda { param, body, .. } = fun else { break };
                    self.trace_rule("letI=>");
                    let (arg_ty, theta) = ctx.synth(spine[consumed])?;
                    let generalized = theta.generalize(&theta.apply(&arg_ty));
                    ctx = theta.pushed(Entry::binding(param.uid, generalized));
                    fun = body;
                    consumed += 1;
                }

                let (mut ty, mut ctx) = ctx.synth(fun)?;
                for &arg in &spine[consumed..] {
                    let applied = ctx.apply(&ty);
                    let (next_ty, next_ctx) = ctx.app_synth(&applied, arg)?;
                    ty = next_ty;
                    ctx = next_ctx;
                }
                Ok((ty, ctx))
            }
            Expr::Annot { body, ty, .. } => {
                if !self.is_well_formed(ty) {
                    return Err(TypeError::at(
                        TypeErrorKind::Malformed(ty.clone()),
                        expr.span(),
                    ));
                }
                self.trace_rule("Anno");
                let delta = self.check(body, ty).map_err(|err| err.located(body.span()))?;
                Ok((ty.clone(), delta))
            }
            // Stubs in the data model with no typing rules.
            Expr::Pair { .. } | Expr::Inject { .. } | Expr::EmptyVector(_) => {
                Err(TypeError::at(TypeErrorKind::Synth, expr.span()))
            }
        }
    }

    /// Application synthesis: the function type is already synthesized and
    /// context-applied; dispatch on its shape.
    fn app_synth(&self, ty: &Type, arg: &Expr) -> InferResult<(Type, Context)> {
        match ty {
            Type::Exists(alpha) if self.has_unsolved(*alpha) => {
                // α̂App: split α̂ into a fresh arrow in place.
                self.trace_rule("α̂App");
                let alpha1 = Uid::fresh(alpha.name);
                let alpha2 = Uid::fresh(alpha.name);
                let arrow = Type::arrow(Type::Exists(alpha1), Type::Exists(alpha2));
                let gamma = self.splice(
                    &Entry::unsolved(*alpha),
                    vec![
                        Entry::unsolved(alpha2),
                        Entry::unsolved(alpha1),
                        Entry::solved(*alpha, arrow),
                    ],
                );
                let delta = gamma
                    .check(arg, &Type::Exists(alpha1))
                    .map_err(|err| err.located(arg.span()))?;
                Ok((Type::Exists(alpha2), delta))
            }
            Type::Forall(uid, body) => {
                self.trace_rule("∀App");
                let alpha = Uid::fresh(uid.name);
                let gamma = self.pushed(Entry::unsolved(alpha));
                let instantiated = substitute(body, &Type::Exists(alpha), *uid);
                gamma.app_synth(&instantiated, arg)
            }
            Type::Arrow(domain, codomain) => {
                self.trace_rule("->App");
                let delta = self
                    .check(arg, domain)
                    .map_err(|err| err.located(arg.span()))?;
                Ok(((**codomain).clone(), delta))
            }
            _ => Err(TypeError::at(TypeErrorKind::Synth, arg.span())),
        }
    }

    /// The two if rules share their premises: check the condition, then
    /// keep whichever branch type is a supertype of the other.
    fn synth_if(
        &self,
        expr: &Expr,
        cond: &Expr,
        then: &Expr,
        alt: &Expr,
    ) -> InferResult<(Type, Context)> {
        self.trace_rule("if<:=>");
        let gamma = self
            .check(cond, &Type::bool())
            .map_err(|err| err.located(cond.span()))?;
        let (then_ty, theta) = gamma.synth(then)?;
        let (else_ty, theta1) = theta.synth(alt)?;

        let then_applied = theta1.apply(&then_ty);
        let else_applied = theta1.apply(&else_ty);
        match theta1.subtype(&then_applied, &else_applied) {
            Ok(delta) => Ok((else_applied, delta)),
            Err(_) => match theta1.subtype(&else_applied, &then_applied) {
                Ok(delta) => Ok((then_applied, delta)),
                Err(_) => Err(TypeError::at(
                    TypeErrorKind::BranchMismatch(then_applied, else_applied),
                    expr.span(),
                )),
            },
        }
    }

    fn synth_infix(
        &self,
        expr: &Expr,
        op: Operator,
        left: &Expr,
        right: &Expr,
    ) -> InferResult<(Type, Context)> {
        let (left_ty, gamma) = self.synth(left)?;
        let (right_ty, theta) = gamma.synth(right)?;

        if let Some(sig) = infix_signature(op.kind) {
            let psi = theta
                .subtype(&theta.apply(&left_ty), &sig.left)
                .map_err(|err| err.located(left.span()))?;
            let delta = psi
                .subtype(&psi.apply(&right_ty), &sig.right)
                .map_err(|err| err.located(right.span()))?;
            return Ok((sig.result, delta));
        }

        if is_comparison(op.kind) {
            // Two-sided like the if rule: the operands need a common type,
            // the result is always bool.
            let left_applied = theta.apply(&left_ty);
            let right_applied = theta.apply(&right_ty);
            return match theta.subtype(&left_applied, &right_applied) {
                Ok(delta) => Ok((Type::bool(), delta)),
                Err(_) => match theta.subtype(&right_applied, &left_applied) {
                    Ok(delta) => Ok((Type::bool(), delta)),
                    Err(_) => Err(TypeError::at(
                        TypeErrorKind::Subtype(left_applied, right_applied),
                        expr.span(),
                    )),
                },
            };
        }

        // Operator not in the catalogue (`::`, `>>`, `++`, …).
        Err(TypeError::at(TypeErrorKind::Synth, expr.span()))
    }

    /// Close a context-applied type over the unsolved existentials that
    /// belong to it alone. Variables still mentioned by a program-variable
    /// binding are shared with the environment and must stay flexible.
    fn generalize(&self, ty: &Type) -> Type {
        let mut free: Vec<Uid> = Vec::new();
        self.collect_generalizable(ty, &mut free);

        let mut result = ty.clone();
        for uid in free.iter().rev() {
            // A fresh binder keeps the quantified variable distinct from
            // the existential entry that stays behind in the context.
            let bound = Uid::fresh(uid.name);
            result = Type::Forall(bound, Box::new(substitute(&result, &Type::Var(bound), *uid)));
        }
        result
    }

    fn collect_generalizable(&self, ty: &Type, free: &mut Vec<Uid>) {
        match ty {
            Type::Unit | Type::Var(_) => {}
            Type::Exists(uid) => {
                if self.has_unsolved(*uid) && !free.contains(uid) && !self.env_mentions(*uid) {
                    free.push(*uid);
                }
            }
            Type::Forall(_, body) => self.collect_generalizable(body, free),
            Type::Arrow(a, b) | Type::Sum(a, b) | Type::Product(a, b) => {
                self.collect_generalizable(a, free);
                self.collect_generalizable(b, free);
            }
        }
    }

    fn env_mentions(&self, uid: Uid) -> bool {
        self.entries().iter().any(|entry| {
            matches!(entry, Entry::Binding { ty, .. }
                if crate::infer::subst::occurs_in(uid, &self.apply(ty)))
        })
    }

    fn synth_prefix(
        &self,
        expr: &Expr,
        op: Operator,
        right: &Expr,
    ) -> InferResult<(Type, Context)> {
        let sig = prefix_signature(op.kind)
            .ok_or_else(|| TypeError::at(TypeErrorKind::Synth, expr.span()))?;
        let (right_ty, gamma) = self.synth(right)?;
        let delta = gamma
            .subtype(&gamma.apply(&right_ty), &sig.operand)
            .map_err(|err| err.located(right.span()))?;
        Ok((sig.result, delta))
    }
}
