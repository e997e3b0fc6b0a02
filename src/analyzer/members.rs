//! Member Extraction
//!
//! Finds `def` / `async def` headers with their decorators, parameters and
//! return annotations. Scanning is line-oriented: decorator lines are held as
//! pending state until a header consumes them or another line discards them.

use regex::Regex;
use std::sync::LazyLock;

use super::blocks::block_end;
use super::calls::{CallerContext, extract_call_sites};
use super::docstring::extract_docstring;
use super::text::indent_width;
use crate::constants::analysis::{CLASS_REFERENCE_PARAM, STATIC_DECORATOR};
use crate::types::{CallSite, CodeMemberInfo, MemberKind, NO_RETURN_TYPE, Visibility};

/// Single-line function header. Parameters match lazily up to the first `)`
/// that is followed by an optional return annotation and the colon.
static FUNCTION_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([ \t]*)(async\s+)?def\s+([A-Za-z_]\w*)\s*\((.*?)\)\s*(?:->\s*([^:]+?))?\s*:")
        .expect("valid function header pattern")
});

static DECORATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([ \t]*)@([\w.]+)").expect("valid decorator pattern"));

/// Where a header must sit to be accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberScope {
    /// Indented inside a class body
    Class,
    /// Column 0
    Module,
}

impl MemberScope {
    fn accepts(&self, indent: &str) -> bool {
        match self {
            MemberScope::Class => !indent.is_empty(),
            MemberScope::Module => indent.is_empty(),
        }
    }

    fn kind(&self) -> MemberKind {
        match self {
            MemberScope::Class => MemberKind::Method,
            MemberScope::Module => MemberKind::Function,
        }
    }
}

/// A member plus the calls observed in its body.
#[derive(Debug, Clone)]
pub struct ExtractedMember {
    pub info: CodeMemberInfo,
    pub calls: Vec<CallSite>,
}

#[derive(Debug)]
struct FunctionHeader<'a> {
    indent: &'a str,
    is_async: bool,
    name: &'a str,
    params: &'a str,
    return_type: Option<&'a str>,
}

impl<'a> FunctionHeader<'a> {
    fn parse(line: &'a str) -> Option<Self> {
        let caps = FUNCTION_HEADER.captures(line)?;
        Some(Self {
            indent: caps.get(1).map_or("", |m| m.as_str()),
            is_async: caps.get(2).is_some(),
            name: caps.get(3)?.as_str(),
            params: caps.get(4).map_or("", |m| m.as_str()),
            return_type: caps.get(5).map(|m| m.as_str().trim()),
        })
    }
}

/// Owner and file of the members being scanned.
#[derive(Debug, Clone, Copy)]
pub struct MemberOwner<'a> {
    pub type_name: &'a str,
    pub file_path: &'a str,
}

/// Methods declared in a class body spanning `lines[first..=last]`.
pub fn extract_class_members(
    lines: &[&str],
    first: usize,
    last: usize,
    owner: MemberOwner<'_>,
) -> Vec<ExtractedMember> {
    scan_members(lines, first, last, MemberScope::Class, owner)
}

/// Column-0 functions anywhere in the file.
pub fn extract_module_functions(lines: &[&str], owner: MemberOwner<'_>) -> Vec<ExtractedMember> {
    if lines.is_empty() {
        return Vec::new();
    }
    scan_members(lines, 0, lines.len() - 1, MemberScope::Module, owner)
}

fn scan_members(
    lines: &[&str],
    first: usize,
    last: usize,
    scope: MemberScope,
    owner: MemberOwner<'_>,
) -> Vec<ExtractedMember> {
    let mut members = Vec::new();
    let mut pending: Vec<(&str, String)> = Vec::new();
    if lines.is_empty() {
        return members;
    }

    for idx in first..=last.min(lines.len() - 1) {
        let line = lines[idx];

        if let Some(caps) = DECORATOR.captures(line) {
            let indent = caps.get(1).map_or("", |m| m.as_str());
            if let Some(name) = caps.get(2) {
                pending.push((indent, name.as_str().to_string()));
            }
            continue;
        }

        let decorators = std::mem::take(&mut pending);
        let Some(header) = FunctionHeader::parse(line) else {
            continue;
        };
        if !scope.accepts(header.indent) {
            continue;
        }

        let decorators = decorators
            .into_iter()
            .filter(|(indent, _)| *indent == header.indent)
            .map(|(_, name)| name)
            .collect();

        members.push(build_member(lines, idx, header, decorators, scope, owner));
    }

    members
}

fn build_member(
    lines: &[&str],
    idx: usize,
    header: FunctionHeader<'_>,
    decorators: Vec<String>,
    scope: MemberScope,
    owner: MemberOwner<'_>,
) -> ExtractedMember {
    let parameters = parse_parameters(header.params);
    let end = block_end(lines, idx, indent_width(header.indent));
    let is_static = decorators.iter().any(|d| d == STATIC_DECORATOR)
        || parameters
            .first()
            .is_some_and(|p| parameter_name(p) == CLASS_REFERENCE_PARAM);

    let body = lines[idx..=end].join("\n");
    let calls = extract_call_sites(
        &body,
        CallerContext {
            file_path: owner.file_path,
            caller_type: owner.type_name,
            caller_member: header.name,
            first_line: idx + 1,
        },
    );

    let info = CodeMemberInfo {
        name: header.name.to_string(),
        kind: scope.kind(),
        return_type: header
            .return_type
            .filter(|r| !r.is_empty())
            .unwrap_or(NO_RETURN_TYPE)
            .to_string(),
        is_async: header.is_async,
        is_static,
        visibility: Visibility::from_name(header.name),
        decorators,
        signature: format!("{}({})", header.name, parameters.join(", ")),
        parameters,
        start_line: idx + 1,
        end_line: end + 1,
        docstring: extract_docstring(lines, idx + 1),
    };

    tracing::trace!(
        owner = owner.type_name,
        member = %info.name,
        start = info.start_line,
        end = info.end_line,
        "extracted member"
    );

    ExtractedMember { info, calls }
}

/// Naive comma split; defaults containing commas are split too.
fn parse_parameters(params: &str) -> Vec<String> {
    params
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(String::from)
        .collect()
}

/// `cls: type = x` -> `cls`
fn parameter_name(param: &str) -> &str {
    param.split([':', '=']).next().unwrap_or(param).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    const OWNER: MemberOwner<'static> = MemberOwner {
        type_name: "UserService",
        file_path: "app/user_service.py",
    };

    fn class_members(src: &str) -> Vec<CodeMemberInfo> {
        let lines: Vec<&str> = src.lines().collect();
        extract_class_members(&lines, 1, lines.len() - 1, OWNER)
            .into_iter()
            .map(|m| m.info)
            .collect()
    }

    #[test]
    fn test_method_header_fields() {
        let members = class_members(
            "class UserService:\n    async def fetch(self, user_id: int, *, cache=True) -> Optional[User]:\n        return None\n",
        );
        assert_eq!(members.len(), 1);
        let m = &members[0];
        assert_eq!(m.name, "fetch");
        assert_eq!(m.kind, MemberKind::Method);
        assert!(m.is_async);
        assert!(!m.is_static);
        assert_eq!(m.parameters, vec!["self", "user_id: int", "*", "cache=True"]);
        assert_eq!(m.return_type, "Optional[User]");
        assert_eq!(m.signature, "fetch(self, user_id: int, *, cache=True)");
        assert_eq!((m.start_line, m.end_line), (2, 3));
    }

    #[test]
    fn test_return_type_sentinel() {
        let members = class_members("class A:\n    def run(self):\n        pass");
        assert_eq!(members[0].return_type, NO_RETURN_TYPE);
    }

    #[test]
    fn test_static_by_decorator_even_with_self() {
        let members = class_members(
            "class A:\n    @staticmethod\n    def build(self, x):\n        return x",
        );
        assert_eq!(members[0].decorators, vec!["staticmethod"]);
        assert!(members[0].is_static);
    }

    #[test]
    fn test_static_by_class_reference_param() {
        let members = class_members(
            "class A:\n    def create(cls, name):\n        return cls(name)\n    def typed(cls: type) -> 'A':\n        pass",
        );
        assert!(members[0].is_static);
        assert!(members[1].is_static);
        assert_eq!(members[1].return_type, "'A'");
    }

    #[test]
    fn test_decorator_arguments_ignored() {
        let members = class_members(
            "class A:\n    @property\n    @cache.memoize(timeout=60)\n    def total(self):\n        return 1",
        );
        assert_eq!(members[0].decorators, vec!["property", "cache.memoize"]);
        assert!(!members[0].is_static);
    }

    #[test]
    fn test_decorator_discarded_by_intervening_line() {
        let members = class_members(
            "class A:\n    @staticmethod\n    x = 1\n    def f(self):\n        pass",
        );
        assert!(members[0].decorators.is_empty());
        assert!(!members[0].is_static);
    }

    #[test]
    fn test_private_visibility() {
        let members = class_members(
            "class A:\n    def __init__(self):\n        pass\n    def _helper(self):\n        pass\n    def public(self):\n        pass",
        );
        let vis: Vec<_> = members.iter().map(|m| m.visibility).collect();
        assert_eq!(
            vis,
            vec![Visibility::Private, Visibility::Private, Visibility::Public]
        );
    }

    #[test]
    fn test_docstring_on_following_line() {
        let members = class_members(
            "class A:\n    def f(self):\n        \"\"\"Does f.\"\"\"\n        return 1",
        );
        assert_eq!(members[0].docstring.as_deref(), Some("Does f."));
    }

    #[test]
    fn test_multiline_signature_not_matched() {
        let members = class_members(
            "class A:\n    def f(self,\n          x):\n        pass\n    def g(self):\n        pass",
        );
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].name, "g");
    }

    #[test]
    fn test_nested_parens_in_defaults() {
        let members = class_members("class A:\n    def f(self, x=dict(a=1)) -> int:\n        pass");
        assert_eq!(members[0].parameters, vec!["self", "x=dict(a=1)"]);
        assert_eq!(members[0].return_type, "int");
    }

    #[test]
    fn test_module_functions_column_zero_only() {
        let src = "@app.route('/')\ndef index():\n    def inner():\n        pass\n    return inner()\n\nclass A:\n    def m(self):\n        pass\n\nasync def main() -> None:\n    await index()";
        let lines: Vec<&str> = src.lines().collect();
        let members = extract_module_functions(&lines, OWNER);
        let names: Vec<_> = members.iter().map(|m| m.info.name.as_str()).collect();
        assert_eq!(names, vec!["index", "main"]);

        let index = &members[0].info;
        assert_eq!(index.kind, MemberKind::Function);
        assert_eq!(index.decorators, vec!["app.route"]);
        assert_eq!((index.start_line, index.end_line), (2, 6));

        let main = &members[1].info;
        assert!(main.is_async);
        assert_eq!(main.return_type, "None");
        assert_eq!((main.start_line, main.end_line), (11, 12));
    }

    #[test]
    fn test_calls_collected_per_member() {
        let src = "class A:\n    def f(self):\n        self.g()\n    def g(self):\n        helper()";
        let lines: Vec<&str> = src.lines().collect();
        let members = extract_class_members(&lines, 1, lines.len() - 1, OWNER);

        let f_calls: Vec<_> = members[0]
            .calls
            .iter()
            .map(|c| format!("{}.{}@{}", c.called_type, c.called_member, c.line))
            .collect();
        assert_eq!(f_calls, vec!["UserService.f@2", "self.g@3"]);
        assert_eq!(members[1].calls[1].called_type, "UserService");
        assert_eq!(members[1].calls[1].called_member, "helper");
        assert_eq!(members[1].calls[1].caller_member, "g");
    }

    #[test]
    fn test_parameter_name() {
        assert_eq!(parameter_name("cls"), "cls");
        assert_eq!(parameter_name("cls: type"), "cls");
        assert_eq!(parameter_name("x=1"), "x");
    }

    #[test]
    fn test_empty_input() {
        assert!(extract_module_functions(&[], OWNER).is_empty());
    }
}
