//! # fieldgate: Field-Level Access Resolution
//!
//! Resolves how a single field of a model instance may be presented:
//! - **All** (read-write)
//! - **ReadOnly**
//! - **None** (hidden)
//!
//! by combining two independently registered kinds of rules:
//! - **Security rules**: identity or value based restrictions on named fields
//! - **Logic rules**: business-state restrictions scoped to a model type
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  FieldRequest                                │
//! │  (model + FieldDescriptor + value + caller)  │
//! └─────────────────┬───────────────────────────┘
//!                   │
//!                   ▼
//! ┌─────────────────────────────────────────────┐
//! │  RuleRegistry                                │
//! │  ├─ Security rules: matches → rights_for     │
//! │  │    reduce to most restrictive (def. All)  │
//! │  └─ Logic rules:    matches → rights_for     │
//! │       reduce to most restrictive (def. All)  │
//! └─────────────────┬───────────────────────────┘
//!                   │
//!                   ▼
//! ┌─────────────────────────────────────────────┐
//! │  AccessRight                                 │
//! │  min(security, logic)                        │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! Adding a logic rule can never loosen a security restriction, and vice
//! versa: each kind defaults to `All` when silent and the two results are
//! combined by "most restrictive wins".
//!
//! ## Examples
//!
//! ```
//! use fieldgate::{AccessRight, Field, FieldRequest, LogicRule, RuleRegistry, ValueRule};
//!
//! struct Person {
//!     name: String,
//!     age: u32,
//! }
//!
//! let mut registry = RuleRegistry::new();
//! registry
//!     .add_security_rule(ValueRule::for_str("name", |name| {
//!         if name.starts_with('J') { AccessRight::All } else { AccessRight::ReadOnly }
//!     }))
//!     .add_logic_rule(LogicRule::new(|p: &Person| p.age > 30, AccessRight::ReadOnly));
//!
//! let name = Field::new("name", |p: &Person| &p.name);
//! let jeremy = Person { name: "Jeremy".to_string(), age: 31 };
//!
//! // Security allows, logic limits: the logic rule wins.
//! let decision = registry.decide(&FieldRequest::new(&jeremy, &name))?;
//! assert_eq!(decision.security, AccessRight::All);
//! assert_eq!(decision.logic, AccessRight::ReadOnly);
//! assert_eq!(decision.effective, AccessRight::ReadOnly);
//! # Ok::<(), fieldgate::AccessError>(())
//! ```
//!
//! ## Concurrency
//!
//! Rules are added through `&mut self` during setup. Afterwards the registry
//! is only read, and `RuleRegistry: Send + Sync`, so it can be shared behind
//! an `Arc` by any number of threads.

pub mod access;
pub mod config;
pub mod decision;
pub mod error;
pub mod field;
pub mod identity;
pub mod logic;
pub mod registry;
pub mod request;
pub mod rule;
pub mod security;

// Re-export commonly used types
pub use access::{AccessRight, ParseAccessRightError};
pub use config::RegistryConfig;
pub use decision::{Decision, MatchedRule, RuleKind};
pub use error::{AccessError, Result};
pub use field::{Field, FieldDescriptor};
pub use identity::Principal;
pub use logic::LogicRule;
pub use registry::RuleRegistry;
pub use request::FieldRequest;
pub use rule::{AccessRule, FieldPattern};
pub use security::{OwnerTypeRule, RoleRule, ValueRule};
