//! Diagnostics for naked error sources.

use wrapck_diagnostic::{Diagnostic, ErrorCode};

use crate::classify::NakedReason;
use crate::summary::{ErrorSource, FunctionSummary};
use crate::{Facade, WrapPolicy};

pub const INTERFACE_TEMPLATE: &str = "error returned from an interface method is not wrapped";
pub const EXTERNAL_TEMPLATE: &str = "error returned from an external/unanalyzed unit is not wrapped";
pub const GENERIC_TEMPLATE: &str = "error returned is not wrapped";

/// Error code for a naked reason. Only interface dispatch and the scope
/// boundary have their own codes.
pub fn code_for(reason: NakedReason) -> ErrorCode {
    match reason {
        NakedReason::Interface => ErrorCode::E1001,
        NakedReason::External => ErrorCode::E1002,
        NakedReason::CalleeNaked | NakedReason::Pending | NakedReason::Unresolved => {
            ErrorCode::E1003
        }
    }
}

pub fn template_for(reason: NakedReason) -> &'static str {
    match code_for(reason) {
        ErrorCode::E1001 => INTERFACE_TEMPLATE,
        ErrorCode::E1002 => EXTERNAL_TEMPLATE,
        ErrorCode::E1003 => GENERIC_TEMPLATE,
    }
}

/// Build the diagnostic for one naked source of `summary`.
pub fn naked_source_diagnostic(
    facade: &Facade<'_>,
    policy: &WrapPolicy,
    summary: &FunctionSummary,
    source: &ErrorSource,
) -> Diagnostic {
    let reason = source
        .classification
        .naked_reason()
        .unwrap_or(NakedReason::Unresolved);
    let mut diag = Diagnostic::error(code_for(reason))
        .with_message(template_for(reason))
        .with_label(source.site, "returned here without wrapping");

    if let Some(origin) = source.origin.filter(|&origin| origin != source.site) {
        diag = diag.with_secondary_label(origin, "error produced by this call");
    }

    let callee = source
        .producer
        .and_then(|symbol| facade.qualified(symbol))
        .unwrap_or_else(|| "the callee".to_string());
    let note = match reason {
        NakedReason::Interface => {
            format!("`{callee}` is called through an interface, so its implementation is unknown")
        }
        NakedReason::External => format!(
            "`{callee}` is declared outside the analysis scope `{}`",
            policy.scope()
        ),
        NakedReason::CalleeNaked => format!("`{callee}` itself returns unwrapped errors"),
        NakedReason::Pending => format!("`{callee}` has no verdict yet (recursive call)"),
        NakedReason::Unresolved => "no producing call was found for this error".to_string(),
    };
    diag = diag
        .with_note(format!("in function `{}`", summary.name))
        .with_note(note);

    if let Some(wrapper) = policy.wrappers().first() {
        diag = diag.with_suggestion(format!("wrap the error with `{wrapper}`"));
    }
    diag
}
