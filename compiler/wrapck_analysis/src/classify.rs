//! Call classification.
//!
//! Rules are tried in a fixed order and the first match wins:
//!
//! 1. the callee's signature is allow-listed: wrapped
//! 2. the callee has a recorded verdict: that verdict
//! 3. the receiver is an interface: naked
//! 4. the callee is declared outside the scope: naked
//! 5. anything else is naked until proven otherwise
//!
//! Rule 1 wins even over interface dispatch, and rule 2 wins over the
//! scope boundary: a callee in an earlier unit that was proven wrapped
//! does not count as external.

use tracing::trace;
use wrapck_ir::{ExprId, SymbolId};

use crate::{Facade, FactStore, WrapPolicy, WrapVerdict};

/// Why a call counts as wrapped.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum WrapRule {
    /// The callee is an allow-listed wrapper.
    AllowListed,
    /// The callee's own verdict is wrapped.
    Inherited,
}

/// Why a call counts as naked.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NakedReason {
    /// Dispatch through an interface method.
    Interface,
    /// The callee is declared outside the analysis scope.
    External,
    /// The callee's own verdict is naked.
    CalleeNaked,
    /// In scope, but no verdict is known yet (recursion, unsummarized).
    Pending,
    /// No producing call could be identified.
    Unresolved,
}

impl NakedReason {
    pub fn as_str(self) -> &'static str {
        match self {
            NakedReason::Interface => "interface",
            NakedReason::External => "external",
            NakedReason::CalleeNaked => "callee-naked",
            NakedReason::Pending => "pending",
            NakedReason::Unresolved => "unresolved",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Classification {
    Wrapped(WrapRule),
    Naked(NakedReason),
}

impl Classification {
    pub fn is_wrapped(self) -> bool {
        matches!(self, Classification::Wrapped(_))
    }

    pub fn verdict(self) -> WrapVerdict {
        WrapVerdict::from_wrapped(self.is_wrapped())
    }

    pub fn naked_reason(self) -> Option<NakedReason> {
        match self {
            Classification::Naked(reason) => Some(reason),
            Classification::Wrapped(_) => None,
        }
    }
}

/// A classified call and the symbol it invokes, if known.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CallClass {
    pub symbol: Option<SymbolId>,
    pub classification: Classification,
}

/// Classify one call expression.
pub fn classify_call<F: FactStore + ?Sized>(
    facade: &Facade<'_>,
    policy: &WrapPolicy,
    facts: &F,
    call: ExprId,
) -> CallClass {
    let symbol = facade.callee_symbol(call);
    let classification = decide(facade, policy, facts, call, symbol);
    trace!(
        ?call,
        callee = symbol.and_then(|s| facade.qualified(s)).as_deref(),
        ?classification,
        "classified call"
    );
    CallClass {
        symbol,
        classification,
    }
}

fn decide<F: FactStore + ?Sized>(
    facade: &Facade<'_>,
    policy: &WrapPolicy,
    facts: &F,
    call: ExprId,
    symbol: Option<SymbolId>,
) -> Classification {
    let info = symbol.and_then(|s| facade.symbol(s));

    if info.is_some_and(|sym| policy.is_wrapper(&sym.signature)) {
        return Classification::Wrapped(WrapRule::AllowListed);
    }

    if let Some(verdict) = symbol.and_then(|s| facts.verdict(s)) {
        return match verdict {
            WrapVerdict::Wrapped => Classification::Wrapped(WrapRule::Inherited),
            WrapVerdict::Naked => Classification::Naked(NakedReason::CalleeNaked),
        };
    }

    if facade.receiver_is_interface(call) {
        return Classification::Naked(NakedReason::Interface);
    }

    let Some(symbol) = symbol else {
        return Classification::Naked(NakedReason::Unresolved);
    };

    match facade.symbol_scope(symbol) {
        Some(scope) if policy.in_scope(scope) => Classification::Naked(NakedReason::Pending),
        Some(_) => Classification::Naked(NakedReason::External),
        None => Classification::Naked(NakedReason::Unresolved),
    }
}
