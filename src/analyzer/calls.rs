//! Call-Site Extraction
//!
//! Token-adjacent-to-`(` heuristic: every dotted identifier chain directly
//! followed by an opening parenthesis counts as a call. Keywords written like
//! calls (`if(x)`, `print(...)`) are recorded too, and calls through aliases or
//! indirection are missed. Nothing is resolved.

use regex::Regex;
use std::sync::LazyLock;

use super::text::LineIndex;
use crate::types::CallSite;

static CALL_EXPR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([A-Za-z_]\w*(?:\.[A-Za-z_]\w*)*)\(").expect("valid call pattern")
});

/// Identifies the member whose body is being scanned.
#[derive(Debug, Clone, Copy)]
pub struct CallerContext<'a> {
    pub file_path: &'a str,
    pub caller_type: &'a str,
    pub caller_member: &'a str,
    /// 1-indexed line of the first body line
    pub first_line: usize,
}

/// Call expressions in `body`, in source order.
pub fn extract_call_sites(body: &str, ctx: CallerContext<'_>) -> Vec<CallSite> {
    let index = LineIndex::new(body);

    CALL_EXPR
        .captures_iter(body)
        .filter_map(|caps| caps.get(1))
        .map(|chain| {
            let (called_type, called_member) = split_chain(chain.as_str(), ctx.caller_type);
            CallSite {
                file_path: ctx.file_path.to_string(),
                caller_type: ctx.caller_type.to_string(),
                caller_member: ctx.caller_member.to_string(),
                called_type,
                called_member,
                line: ctx.first_line + index.line_of(chain.start()) - 1,
            }
        })
        .collect()
}

/// `a.b.c` -> (`a.b`, `c`); `c` -> (`own_type`, `c`)
fn split_chain(chain: &str, own_type: &str) -> (String, String) {
    match chain.rsplit_once('.') {
        Some((qualifier, member)) => (qualifier.to_string(), member.to_string()),
        None => (own_type.to_string(), chain.to_string()),
    }
}
