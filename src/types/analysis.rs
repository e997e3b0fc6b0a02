use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel recorded when a function carries no return annotation.
pub const NO_RETURN_TYPE: &str = "None";

/// Structural inventory of one analyzed source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileAnalysis {
    pub path: String,
    pub relative_path: String,
    pub file_name: String,
    pub size_bytes: usize,
    /// Rough LLM token estimate (`size_bytes / 4`)
    pub token_estimate: usize,
    /// Declared types in discovery order. The module container, when present,
    /// is always first.
    pub types: Vec<CodeTypeInfo>,
    /// Normalized import targets (`from a.b import c` -> `a.b`)
    pub imports: Vec<String>,
    /// Top-level package roots of `imports`
    pub dependencies: Vec<String>,
    pub classification: FileClassification,
}

impl FileAnalysis {
    /// The synthetic module container, if the file has module-level functions.
    pub fn module(&self) -> Option<&CodeTypeInfo> {
        self.types.first().filter(|t| t.kind == TypeKind::Module)
    }

    /// Declared classes, skipping the module container.
    pub fn classes(&self) -> impl Iterator<Item = &CodeTypeInfo> {
        self.types.iter().filter(|t| t.kind == TypeKind::Class)
    }

    pub fn member_count(&self) -> usize {
        self.types.iter().map(|t| t.members.len()).sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    Class,
    /// Synthetic container holding module-level functions
    Module,
}

impl TypeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeKind::Class => "class",
            TypeKind::Module => "module",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeTypeInfo {
    pub name: String,
    /// Same as `name`; namespaces are not resolved
    pub full_name: String,
    pub kind: TypeKind,
    pub base_type: Option<String>,
    /// Inherited names after the first (mixins, protocols)
    pub interfaces: Vec<String>,
    /// 1-indexed, inclusive
    pub start_line: usize,
    /// 1-indexed, inclusive
    pub end_line: usize,
    pub docstring: Option<String>,
    pub members: Vec<CodeMemberInfo>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberKind {
    Method,
    Function,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Private,
}

impl Visibility {
    /// Underscore prefix means private
    #[inline]
    pub fn from_name(name: &str) -> Self {
        if name.starts_with('_') {
            Visibility::Private
        } else {
            Visibility::Public
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeMemberInfo {
    pub name: String,
    pub kind: MemberKind,
    /// Annotated return type, or [`NO_RETURN_TYPE`]
    pub return_type: String,
    #[serde(rename = "async")]
    pub is_async: bool,
    #[serde(rename = "static")]
    pub is_static: bool,
    pub visibility: Visibility,
    pub decorators: Vec<String>,
    /// Raw parameter text, one entry per comma-separated segment
    pub parameters: Vec<String>,
    pub signature: String,
    pub start_line: usize,
    pub end_line: usize,
    pub docstring: Option<String>,
}

/// One textual call expression observed inside a member body.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CallSite {
    pub file_path: String,
    pub caller_type: String,
    pub caller_member: String,
    /// Qualifier before the last dot, or the caller's own type
    pub called_type: String,
    pub called_member: String,
    pub line: usize,
}

/// Architectural role of a file.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum FileClassification {
    #[default]
    Unknown,
    Test,
    View,
    Model,
    Controller,
    Service,
    Repository,
    Config,
}

impl FileClassification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Test => "test",
            Self::View => "view",
            Self::Model => "model",
            Self::Controller => "controller",
            Self::Service => "service",
            Self::Repository => "repository",
            Self::Config => "config",
        }
    }
}

impl fmt::Display for FileClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
