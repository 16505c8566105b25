//! Rule registry and resolution.
//!
//! Resolves the effective access right for a field request:
//! - Security rules are filtered by `matches` and reduced to the most
//!   restrictive result (default `All`)
//! - Logic rules are reduced the same way, independently
//! - The effective right is the most restrictive of the two
//!
//! A registry is mutated only while it is being set up (`&mut self`) and is
//! read-only afterwards, so it can be shared across threads behind an `Arc`.

use tracing::{debug, trace, warn};

use crate::access::AccessRight;
use crate::config::RegistryConfig;
use crate::decision::{Decision, MatchedRule, RuleKind};
use crate::error::Result;
use crate::field::FieldDescriptor;
use crate::request::FieldRequest;
use crate::rule::AccessRule;

/// Ordered collections of security and logic rules.
///
/// # Examples
///
/// ```
/// use fieldgate::{AccessRight, Field, FieldRequest, LogicRule, RuleRegistry};
///
/// struct Person {
///     age: u32,
/// }
///
/// let mut registry = RuleRegistry::new();
/// registry.add_logic_rule(LogicRule::new(|p: &Person| p.age > 30, AccessRight::ReadOnly));
///
/// let age = Field::new("age", |p: &Person| &p.age);
/// let older = Person { age: 31 };
/// let younger = Person { age: 29 };
///
/// assert_eq!(registry.rights_for(&FieldRequest::new(&older, &age))?, AccessRight::ReadOnly);
/// assert_eq!(registry.rights_for(&FieldRequest::new(&younger, &age))?, AccessRight::All);
/// # Ok::<(), fieldgate::AccessError>(())
/// ```
pub struct RuleRegistry {
    config: RegistryConfig,
    security_rules: Vec<Box<dyn AccessRule>>,
    logic_rules: Vec<Box<dyn AccessRule>>,
}

impl RuleRegistry {
    /// Creates an empty registry with default options.
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Creates an empty registry with the given options.
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            config,
            security_rules: Vec::new(),
            logic_rules: Vec::new(),
        }
    }

    /// Disables resolution logging (for testing).
    #[must_use]
    pub fn without_audit(mut self) -> Self {
        self.config.audit = false;
        self
    }

    /// Appends a security rule. No deduplication is performed.
    pub fn add_security_rule(&mut self, rule: impl AccessRule + 'static) -> &mut Self {
        self.security_rules.push(Box::new(rule));
        self
    }

    /// Appends a logic rule. No deduplication is performed.
    pub fn add_logic_rule(&mut self, rule: impl AccessRule + 'static) -> &mut Self {
        self.logic_rules.push(Box::new(rule));
        self
    }

    /// Builder form of [`add_security_rule`](Self::add_security_rule).
    #[must_use]
    pub fn with_security_rule(mut self, rule: impl AccessRule + 'static) -> Self {
        self.add_security_rule(rule);
        self
    }

    /// Builder form of [`add_logic_rule`](Self::add_logic_rule).
    #[must_use]
    pub fn with_logic_rule(mut self, rule: impl AccessRule + 'static) -> Self {
        self.add_logic_rule(rule);
        self
    }

    /// Resolves the effective access right for `request`.
    ///
    /// Returns [`AccessRight::All`] when no rule matches.
    ///
    /// # Errors
    ///
    /// The first error raised by a matching rule, unchanged. Remaining rules
    /// are not evaluated.
    pub fn rights_for(&self, request: &FieldRequest<'_>) -> Result<AccessRight> {
        let security = self.reduce(RuleKind::Security, request, None)?;
        let logic = self.reduce(RuleKind::Logic, request, None)?;
        let effective = security.most_restrictive(logic);

        self.audit_resolution(request, security, logic, effective);
        Ok(effective)
    }

    /// Resolves `request` and reports every matching rule's contribution.
    ///
    /// # Errors
    ///
    /// Same as [`rights_for`](Self::rights_for).
    pub fn decide(&self, request: &FieldRequest<'_>) -> Result<Decision> {
        let mut matched = Vec::new();
        let security = self.reduce(RuleKind::Security, request, Some(&mut matched))?;
        let logic = self.reduce(RuleKind::Logic, request, Some(&mut matched))?;
        let effective = security.most_restrictive(logic);

        self.audit_resolution(request, security, logic, effective);
        Ok(Decision {
            security,
            logic,
            effective,
            matched,
        })
    }

    /// Lists the rules that would be evaluated for `descriptor`, in order.
    pub fn matching_rules(&self, descriptor: &FieldDescriptor) -> Vec<(RuleKind, &str)> {
        let mut matching = Vec::new();
        for kind in [RuleKind::Security, RuleKind::Logic] {
            for rule in self.rules(kind) {
                if rule.matches(descriptor) {
                    matching.push((kind, rule.name()));
                }
            }
        }
        matching
    }

    /// Returns the number of registered security rules.
    pub fn security_rule_count(&self) -> usize {
        self.security_rules.len()
    }

    /// Returns the number of registered logic rules.
    pub fn logic_rule_count(&self) -> usize {
        self.logic_rules.len()
    }

    /// Returns the registry options.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    fn rules(&self, kind: RuleKind) -> &[Box<dyn AccessRule>] {
        match kind {
            RuleKind::Security => &self.security_rules,
            RuleKind::Logic => &self.logic_rules,
        }
    }

    /// Folds the matching rules of one kind into their most restrictive
    /// result. Non-matching rules are never evaluated.
    fn reduce(
        &self,
        kind: RuleKind,
        request: &FieldRequest<'_>,
        mut matched: Option<&mut Vec<MatchedRule>>,
    ) -> Result<AccessRight> {
        let descriptor = request.descriptor();
        let mut result = AccessRight::All;

        for rule in self.rules(kind).iter().filter(|r| r.matches(descriptor)) {
            let right = match rule.rights_for(request) {
                Ok(right) => right,
                Err(err) => {
                    if self.config.audit {
                        warn!(
                            registry = %self.config.name,
                            kind = %kind,
                            rule = rule.name(),
                            field = %descriptor,
                            error = %err,
                            error_kind = err.kind(),
                            "Access rule failed"
                        );
                    }
                    return Err(err);
                }
            };

            if self.config.audit {
                trace!(
                    registry = %self.config.name,
                    kind = %kind,
                    rule = rule.name(),
                    field = %descriptor,
                    right = %right,
                    "Access rule matched"
                );
            }

            if let Some(matched) = matched.as_deref_mut() {
                matched.push(MatchedRule {
                    kind,
                    rule: rule.name().to_string(),
                    right,
                });
            }
            result = result.most_restrictive(right);
        }

        Ok(result)
    }

    fn audit_resolution(
        &self,
        request: &FieldRequest<'_>,
        security: AccessRight,
        logic: AccessRight,
        effective: AccessRight,
    ) {
        if self.config.audit {
            debug!(
                registry = %self.config.name,
                field = %request.descriptor(),
                model = request.model_type_name(),
                principal = request.principal().map(|p| p.name.as_str()),
                security = %security,
                logic = %logic,
                effective = %effective,
                "Field access resolved"
            );
        }
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleRegistry")
            .field("config", &self.config)
            .field("security_rules", &rule_names(&self.security_rules))
            .field("logic_rules", &rule_names(&self.logic_rules))
            .finish()
    }
}

fn rule_names(rules: &[Box<dyn AccessRule>]) -> Vec<&str> {
    rules.iter().map(|r| r.name()).collect()
}
