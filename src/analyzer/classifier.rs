//! File Classifier
//!
//! Assigns one architectural role to a file from naming, path and inheritance
//! conventions. Rules are an ordered table evaluated top to bottom; the first
//! match wins and `Unknown` is the fallback, so classification never fails.

use crate::types::{FileAnalysis, FileClassification, file_stem, normalize_separators};

/// Lowercased naming facts a rule can look at.
#[derive(Debug, Clone)]
pub struct FileFacts {
    pub name: String,
    pub stem: String,
    /// Directory segments of the project-relative path
    pub dirs: Vec<String>,
    pub base_types: Vec<String>,
}

impl FileFacts {
    pub fn from_analysis(analysis: &FileAnalysis) -> Self {
        let path = if analysis.relative_path.is_empty() {
            &analysis.path
        } else {
            &analysis.relative_path
        };
        let path = normalize_separators(path).to_lowercase();

        let mut dirs: Vec<String> = path
            .split('/')
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();
        dirs.pop();

        Self {
            name: analysis.file_name.to_lowercase(),
            stem: file_stem(&analysis.file_name).to_lowercase(),
            dirs,
            base_types: analysis
                .types
                .iter()
                .filter_map(|t| t.base_type.as_deref())
                .map(str::to_lowercase)
                .collect(),
        }
    }

    fn in_dir(&self, names: &[&str]) -> bool {
        self.dirs.iter().any(|d| names.contains(&d.as_str()))
    }

    fn stem_is(&self, names: &[&str]) -> bool {
        names.contains(&self.stem.as_str())
    }

    fn stem_ends_with(&self, suffixes: &[&str]) -> bool {
        suffixes.iter().any(|s| self.stem.ends_with(s))
    }
}

pub struct ClassificationRule {
    pub name: &'static str,
    pub label: FileClassification,
    pub matches: fn(&FileFacts) -> bool,
}

/// Naming and path rules in priority order.
pub const RULES: &[ClassificationRule] = &[
    ClassificationRule {
        name: "test-file",
        label: FileClassification::Test,
        matches: |f| {
            f.name.starts_with("test_")
                || f.stem.ends_with("_test")
                || f.stem_is(&["tests", "conftest"])
                || f.in_dir(&["tests", "test"])
        },
    },
    ClassificationRule {
        name: "view-layer",
        label: FileClassification::View,
        matches: |f| f.name.contains("view") || f.in_dir(&["views"]),
    },
    ClassificationRule {
        name: "model-layer",
        label: FileClassification::Model,
        matches: |f| f.name.contains("model") || f.in_dir(&["models"]),
    },
    ClassificationRule {
        name: "serializer-or-form",
        label: FileClassification::Model,
        matches: |f| {
            f.stem_is(&[
                "serializer",
                "serializers",
                "form",
                "forms",
                "schema",
                "schemas",
            ]) || f.stem_ends_with(&[
                "_serializer",
                "_serializers",
                "_form",
                "_forms",
                "_schema",
                "_schemas",
            ])
        },
    },
    ClassificationRule {
        name: "routing-or-admin",
        label: FileClassification::Controller,
        matches: |f| {
            f.stem_is(&["urls", "routes", "routing", "admin"]) || f.name.contains("controller")
        },
    },
    ClassificationRule {
        name: "service-layer",
        label: FileClassification::Service,
        matches: |f| f.name.contains("service") || f.in_dir(&["services"]),
    },
    ClassificationRule {
        name: "repository-layer",
        label: FileClassification::Repository,
        matches: |f| {
            f.name.contains("repositor")
                || f.stem.ends_with("_repo")
                || f.in_dir(&["repositories", "repository"])
        },
    },
    ClassificationRule {
        name: "config-entry-point",
        label: FileClassification::Config,
        matches: |f| {
            f.stem_is(&[
                "settings",
                "config",
                "configuration",
                "conf",
                "wsgi",
                "asgi",
                "manage",
                "apps",
                "setup",
            ])
        },
    },
];

/// Base-class substrings checked per declared type, in order.
const BASE_TYPE_HINTS: &[(&str, FileClassification)] = &[
    ("view", FileClassification::View),
    ("model", FileClassification::Model),
    ("test", FileClassification::Test),
];

pub fn classify(analysis: &FileAnalysis) -> FileClassification {
    classify_facts(&FileFacts::from_analysis(analysis))
}

pub fn classify_facts(facts: &FileFacts) -> FileClassification {
    if let Some(rule) = RULES.iter().find(|rule| (rule.matches)(facts)) {
        tracing::trace!(rule = rule.name, label = %rule.label, "classified by rule");
        return rule.label;
    }

    facts
        .base_types
        .iter()
        .find_map(|base| {
            BASE_TYPE_HINTS
                .iter()
                .find(|(hint, _)| base.contains(hint))
                .map(|(_, label)| *label)
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn facts(path: &str, bases: &[&str]) -> FileFacts {
        let path = normalize_separators(path).to_lowercase();
        let mut dirs: Vec<String> = path.split('/').map(String::from).collect();
        let name = dirs.pop().unwrap_or_default();
        FileFacts {
            stem: file_stem(&name).to_string(),
            name,
            dirs,
            base_types: bases.iter().map(|b| b.to_lowercase()).collect(),
        }
    }

    fn label(path: &str) -> FileClassification {
        classify_facts(&facts(path, &[]))
    }

    #[test]
    fn test_examples() {
        assert_eq!(label("app/user_service.py"), FileClassification::Service);
        assert_eq!(label("app/test_auth.py"), FileClassification::Test);
        assert_eq!(label("app/helpers.py"), FileClassification::Unknown);
    }

    #[test]
    fn test_test_conventions() {
        assert_eq!(label("auth_test.py"), FileClassification::Test);
        assert_eq!(label("conftest.py"), FileClassification::Test);
        assert_eq!(label("app/tests.py"), FileClassification::Test);
        assert_eq!(label("tests/helpers.py"), FileClassification::Test);
        assert_eq!(label(r"Project\Tests\fixtures.py"), FileClassification::Test);
    }

    #[test]
    fn test_test_outranks_other_layers() {
        assert_eq!(label("tests/views.py"), FileClassification::Test);
        assert_eq!(label("test_user_service.py"), FileClassification::Test);
    }

    #[test]
    fn test_layers_by_name_and_dir() {
        assert_eq!(label("shop/views.py"), FileClassification::View);
        assert_eq!(label("shop/views/cart.py"), FileClassification::View);
        assert_eq!(label("shop/Models.py"), FileClassification::Model);
        assert_eq!(label("shop/models/cart.py"), FileClassification::Model);
        assert_eq!(label("shop/serializers.py"), FileClassification::Model);
        assert_eq!(label("shop/order_forms.py"), FileClassification::Model);
        assert_eq!(label("shop/urls.py"), FileClassification::Controller);
        assert_eq!(label("shop/admin.py"), FileClassification::Controller);
        assert_eq!(label("shop/services/payment.py"), FileClassification::Service);
        assert_eq!(label("shop/order_repository.py"), FileClassification::Repository);
        assert_eq!(label("shop/order_repo.py"), FileClassification::Repository);
        assert_eq!(label("shop/settings.py"), FileClassification::Config);
        assert_eq!(label("manage.py"), FileClassification::Config);
    }

    #[test]
    fn test_view_outranks_model() {
        assert_eq!(label("model_views.py"), FileClassification::View);
    }

    #[test]
    fn test_platform_is_not_a_form() {
        assert_eq!(label("platform.py"), FileClassification::Unknown);
    }

    #[test]
    fn test_base_type_fallback() {
        let f = facts("shop/cart.py", &["generic.ListView"]);
        assert_eq!(classify_facts(&f), FileClassification::View);

        let f = facts("shop/cart.py", &["models.Model"]);
        assert_eq!(classify_facts(&f), FileClassification::Model);

        let f = facts("shop/cart.py", &["unittest.TestCase"]);
        assert_eq!(classify_facts(&f), FileClassification::Test);

        let f = facts("shop/cart.py", &["Exception", "TestCase"]);
        assert_eq!(classify_facts(&f), FileClassification::Test);

        let f = facts("shop/cart.py", &["Exception"]);
        assert_eq!(classify_facts(&f), FileClassification::Unknown);
    }

    #[test]
    fn test_rule_names_unique() {
        let mut names: Vec<_> = RULES.iter().map(|r| r.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), RULES.len());
    }
}
