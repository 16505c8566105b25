//! Explained resolution results.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::access::AccessRight;

/// Which rule collection a rule was registered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    /// Identity or value based restriction on named fields.
    Security,
    /// Business-state restriction scoped to a model type.
    Logic,
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleKind::Security => f.write_str("security"),
            RuleKind::Logic => f.write_str("logic"),
        }
    }
}

/// One rule that matched a request, and what it returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchedRule {
    /// Collection the rule belongs to.
    pub kind: RuleKind,
    /// The rule's name.
    pub rule: String,
    /// Access the rule granted.
    pub right: AccessRight,
}

/// The full outcome of resolving one field request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    /// Most restrictive result across matching security rules.
    pub security: AccessRight,
    /// Most restrictive result across matching logic rules.
    pub logic: AccessRight,
    /// Most restrictive of `security` and `logic`.
    pub effective: AccessRight,
    /// Matching rules in evaluation order (security first).
    pub matched: Vec<MatchedRule>,
}

impl Decision {
    /// Returns whether no rule applied to the request.
    pub fn is_unrestricted_default(&self) -> bool {
        self.matched.is_empty()
    }

    /// Returns the rules that produced the effective right.
    pub fn deciding_rules(&self) -> impl Iterator<Item = &MatchedRule> {
        self.matched
            .iter()
            .filter(move |m| m.right == self.effective && m.right != AccessRight::All)
    }
}
