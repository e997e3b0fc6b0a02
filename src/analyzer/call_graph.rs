//! Cross-file Call Graph
//!
//! Aggregates the per-file call-site lists returned by `FileAnalyzer`. The
//! caller owns the graph and merges each file's calls after the file
//! completes, so analysis itself never touches shared state.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

use crate::types::CallSite;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CallGraph {
    calls: Vec<CallSite>,
}

/// Aggregate counts for reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallGraphSummary {
    pub total_calls: usize,
    pub files: usize,
    pub distinct_callers: usize,
    pub distinct_targets: usize,
    /// Most frequently called `type.member` targets, descending
    pub top_targets: Vec<(String, usize)>,
}

impl CallGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one file's call sites.
    pub fn merge(&mut self, calls: impl IntoIterator<Item = CallSite>) {
        self.calls.extend(calls);
    }

    pub fn calls(&self) -> &[CallSite] {
        &self.calls
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    /// Calls whose target member is `member`, optionally restricted to a
    /// called type.
    pub fn callers_of<'a>(
        &'a self,
        called_type: Option<&'a str>,
        member: &'a str,
    ) -> impl Iterator<Item = &'a CallSite> + 'a {
        self.calls.iter().filter(move |c| {
            c.called_member == member && called_type.is_none_or(|t| c.called_type == t)
        })
    }

    /// Calls made from `caller_type.caller_member`.
    pub fn callees_of<'a>(
        &'a self,
        caller_type: &'a str,
        caller_member: &'a str,
    ) -> impl Iterator<Item = &'a CallSite> + 'a {
        self.calls
            .iter()
            .filter(move |c| c.caller_type == caller_type && c.caller_member == caller_member)
    }

    /// Calls grouped by the file they were observed in.
    pub fn by_file(&self) -> BTreeMap<&str, Vec<&CallSite>> {
        let mut grouped: BTreeMap<&str, Vec<&CallSite>> = BTreeMap::new();
        for call in &self.calls {
            grouped.entry(call.file_path.as_str()).or_default().push(call);
        }
        grouped
    }

    pub fn summary(&self, top: usize) -> CallGraphSummary {
        let mut targets: HashMap<String, usize> = HashMap::new();
        let mut callers: HashSet<(&str, &str, &str)> = HashSet::new();

        for call in &self.calls {
            *targets
                .entry(format!("{}.{}", call.called_type, call.called_member))
                .or_insert(0) += 1;
            callers.insert((
                call.file_path.as_str(),
                call.caller_type.as_str(),
                call.caller_member.as_str(),
            ));
        }

        let distinct_targets = targets.len();
        let mut top_targets: Vec<(String, usize)> = targets.into_iter().collect();
        top_targets.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        top_targets.truncate(top);

        CallGraphSummary {
            total_calls: self.calls.len(),
            files: self.by_file().len(),
            distinct_callers: callers.len(),
            distinct_targets,
            top_targets,
        }
    }
}
