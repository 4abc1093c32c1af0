//! Rule-by-rule inference tracing (`--vtype`).
//!
//! Types are printed in fancy notation; every line goes to stderr so a
//! traced run still produces clean output on stdout.

use crate::ast::types::Type;
use crate::infer::context::Context;

impl Context {
    pub(crate) fn trace_rule(&self, name: &str) {
        if self.trace {
            eprintln!("\tapplying {}", name);
        }
    }

    pub(crate) fn trace_rule_fail(&self, name: &str) {
        if self.trace {
            eprintln!("\tfailed {}", name);
        }
    }

    pub(crate) fn trace_judgment(&self, judgment: &str, left: &Type, relation: &str, right: &Type) {
        if self.trace {
            eprintln!("{}: {} {} {}", judgment, left.fancy(), relation, right.fancy());
        }
    }

    pub(crate) fn trace_synth(&self, what: &str, ty: &Type) {
        if self.trace {
            eprintln!("synth: {} => {}", what, ty.fancy());
        }
    }
}
