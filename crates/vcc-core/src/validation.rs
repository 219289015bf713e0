//! # Validation Issues — Structured Parse Failures
//!
//! A payload that fails validation produces a tree of [`ValidationIssue`]s.
//! Most issues are leaves: a JSON Pointer into the instance plus a message.
//! A failed union (`anyOf` / `oneOf`) is different: none of its branches
//! matched, so the issue carries one nested issue list per branch.
//!
//! When an error message is rendered, the tree is flattened into a list of
//! [`Violation`]s. A union issue with branch detail is replaced by the
//! violations of its branches (recursively); a union issue without branch
//! detail is kept as-is so no path is ever dropped.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single validation issue, possibly carrying failed union branches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// JSON Pointer path to the violating value. Empty for the root.
    pub instance_path: String,
    /// Human-readable description of the violation.
    pub message: String,
    /// For union failures: the issues raised by each candidate branch,
    /// in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub union_branches: Vec<Vec<ValidationIssue>>,
}

impl ValidationIssue {
    /// Create a leaf issue.
    pub fn new(instance_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            instance_path: instance_path.into(),
            message: message.into(),
            union_branches: Vec::new(),
        }
    }

    /// Create a union issue with the issues of each failed branch.
    pub fn union(
        instance_path: impl Into<String>,
        message: impl Into<String>,
        branches: Vec<Vec<ValidationIssue>>,
    ) -> Self {
        Self {
            instance_path: instance_path.into(),
            message: message.into(),
            union_branches: branches,
        }
    }

    fn flatten_into(&self, out: &mut Vec<Violation>) {
        let branch_issues = self.union_branches.iter().flatten();
        let mut expanded = false;
        for issue in branch_issues {
            issue.flatten_into(out);
            expanded = true;
        }
        if !expanded {
            out.push(Violation {
                instance_path: self.instance_path.clone(),
                message: self.message.clone(),
            });
        }
    }
}

/// A flattened violation: one path, one message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// JSON Pointer path to the violating value. Empty for the root.
    pub instance_path: String,
    /// Human-readable description of the violation.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.instance_path.is_empty() {
            write!(f, "  (root): {}", self.message)
        } else {
            write!(f, "  {}: {}", self.instance_path, self.message)
        }
    }
}

/// The full set of issues raised while validating one payload.
#[derive(Error, Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[error("{}", render(.issues))]
pub struct ValidationIssues {
    issues: Vec<ValidationIssue>,
}

impl ValidationIssues {
    /// Wrap a list of top-level issues.
    pub fn new(issues: Vec<ValidationIssue>) -> Self {
        Self { issues }
    }

    /// Returns the number of top-level issues.
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    /// Returns true if there are no issues.
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Returns the top-level issues, union branches unexpanded.
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    /// Flatten every issue, expanding union branches recursively.
    pub fn flatten(&self) -> Vec<Violation> {
        let mut out = Vec::new();
        for issue in &self.issues {
            issue.flatten_into(&mut out);
        }
        out
    }

    /// Every violating instance path, in report order.
    pub fn paths(&self) -> Vec<String> {
        self.flatten()
            .into_iter()
            .map(|v| v.instance_path)
            .collect()
    }
}

fn render(issues: &[ValidationIssue]) -> String {
    let mut out = Vec::new();
    for issue in issues {
        issue.flatten_into(&mut out);
    }
    out.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaf_issues_render_one_per_line() {
        let issues = ValidationIssues::new(vec![
            ValidationIssue::new("/name", "expected string"),
            ValidationIssue::new("", "missing property \"id\""),
        ]);
        let rendered = issues.to_string();
        assert_eq!(
            rendered,
            "  /name: expected string\n  (root): missing property \"id\""
        );
    }

    #[test]
    fn test_union_branches_are_flattened_recursively() {
        let inner_union = ValidationIssue::union(
            "/a/b",
            "no branch matched",
            vec![
                vec![ValidationIssue::new("/a/b/x", "expected integer")],
                vec![ValidationIssue::new("/a/b/y", "expected boolean")],
            ],
        );
        let outer = ValidationIssue::union(
            "/a",
            "no branch matched",
            vec![vec![inner_union], vec![ValidationIssue::new("/a", "expected null")]],
        );
        let issues = ValidationIssues::new(vec![outer]);
        assert_eq!(issues.paths(), vec!["/a/b/x", "/a/b/y", "/a"]);
    }

    #[test]
    fn test_union_without_branch_detail_is_kept() {
        let issues = ValidationIssues::new(vec![ValidationIssue::union(
            "/v",
            "not valid under any schema",
            Vec::new(),
        )]);
        assert_eq!(issues.paths(), vec!["/v"]);
    }

    #[test]
    fn test_empty_issue_set() {
        let issues = ValidationIssues::default();
        assert!(issues.is_empty());
        assert_eq!(issues.len(), 0);
        assert!(issues.flatten().is_empty());
    }
}
