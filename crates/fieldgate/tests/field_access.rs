//! End-to-end resolution through a registry holding one security rule and
//! one logic rule.

use fieldgate::{
    AccessError, AccessRight, AccessRule, Field, FieldDescriptor, FieldRequest, LogicRule,
    Principal, RoleRule, RuleKind, RuleRegistry,
};

struct PersonModel {
    name: String,
    age: u32,
}

struct PlayerModel {
    name: String,
    position: String,
}

struct TestInputModel {
    age: u32,
}

/// Names starting with "J" are editable, everything else is read-only.
struct JNameRule;

impl AccessRule for JNameRule {
    fn matches(&self, descriptor: &FieldDescriptor) -> bool {
        descriptor.name() == "name"
    }

    fn rights_for(&self, request: &FieldRequest<'_>) -> fieldgate::Result<AccessRight> {
        if request.value_as::<String>()?.starts_with('J') {
            Ok(AccessRight::All)
        } else {
            Ok(AccessRight::ReadOnly)
        }
    }
}

fn registry() -> RuleRegistry {
    let mut registry = RuleRegistry::new().without_audit();
    registry.add_security_rule(JNameRule);
    registry.add_logic_rule(LogicRule::new(
        |person: &PersonModel| person.age > 30,
        AccessRight::ReadOnly,
    ));
    registry
}

fn rights_for<T: 'static, V: 'static>(
    registry: &RuleRegistry,
    model: &T,
    field: &Field<T, V>,
) -> AccessRight {
    registry
        .rights_for(&FieldRequest::new(model, field))
        .expect("rules should evaluate")
}

fn person_age() -> Field<PersonModel, u32> {
    Field::new("age", |p: &PersonModel| &p.age)
}

fn person_name() -> Field<PersonModel, String> {
    Field::new("name", |p: &PersonModel| &p.name)
}

fn player_name() -> Field<PlayerModel, String> {
    Field::new("name", |p: &PlayerModel| &p.name)
}

fn player(name: &str) -> PlayerModel {
    PlayerModel {
        name: name.to_string(),
        position: "Forward".to_string(),
    }
}

#[test]
fn no_rules_of_any_kind_apply() {
    let registry = registry();
    let age = Field::new("age", |m: &TestInputModel| &m.age);

    assert_eq!(
        rights_for(&registry, &TestInputModel { age: 50 }, &age),
        AccessRight::All
    );
}

#[test]
fn logic_rule_applies_but_no_security() {
    let registry = registry();
    let age = person_age();

    let older = PersonModel {
        name: "Chad".to_string(),
        age: 31,
    };
    let younger = PersonModel {
        name: "Chad".to_string(),
        age: 29,
    };

    assert_eq!(rights_for(&registry, &older, &age), AccessRight::ReadOnly);
    assert_eq!(rights_for(&registry, &younger, &age), AccessRight::All);
}

#[test]
fn security_rule_applies_but_no_logic() {
    let registry = registry();
    let name = player_name();

    assert_eq!(
        rights_for(&registry, &player("Jeremy"), &name),
        AccessRight::All
    );
    assert_eq!(
        rights_for(&registry, &player("Chad"), &name),
        AccessRight::ReadOnly
    );
}

#[test]
fn unrelated_field_matches_neither_rule() {
    let registry = registry();
    let position = Field::new("position", |p: &PlayerModel| &p.position);
    let model = player("Chad");

    let decision = registry
        .decide(&FieldRequest::new(&model, &position))
        .unwrap();
    assert_eq!(decision.effective, AccessRight::All);
    assert!(decision.is_unrestricted_default());
}

#[test]
fn security_read_only_beats_permissive_logic() {
    let registry = registry();
    let name = person_name();

    // Age 20: logic rule matches (PersonModel) but allows; name "Chad" is limited.
    let model = PersonModel {
        name: "Chad".to_string(),
        age: 20,
    };

    let decision = registry.decide(&FieldRequest::new(&model, &name)).unwrap();
    assert_eq!(decision.security, AccessRight::ReadOnly);
    assert_eq!(decision.logic, AccessRight::All);
    assert_eq!(decision.effective, AccessRight::ReadOnly);
    assert_eq!(decision.matched.len(), 2);
}

#[test]
fn logic_read_only_beats_permissive_security() {
    let registry = registry();
    let name = person_name();

    let model = PersonModel {
        name: "Jeremy".to_string(),
        age: 45,
    };

    let decision = registry.decide(&FieldRequest::new(&model, &name)).unwrap();
    assert_eq!(decision.security, AccessRight::All);
    assert_eq!(decision.logic, AccessRight::ReadOnly);
    assert_eq!(decision.effective, AccessRight::ReadOnly);

    let deciding: Vec<RuleKind> = decision.deciding_rules().map(|m| m.kind).collect();
    assert_eq!(deciding, vec![RuleKind::Logic]);
}

#[test]
fn hidden_field_for_callers_without_role() {
    let mut registry = registry();
    registry.add_security_rule(RoleRule::new("name", "hr", AccessRight::None));

    let name = player_name();
    let model = player("Jeremy");
    let hr = Principal::new("pat").with_role("hr");

    let anonymous = FieldRequest::new(&model, &name);
    assert_eq!(registry.rights_for(&anonymous).unwrap(), AccessRight::None);
    assert_eq!(
        registry.rights_for(&anonymous.with_principal(&hr)).unwrap(),
        AccessRight::All
    );
}

#[test]
fn misconfigured_rule_fails_the_resolution() {
    let registry = registry();

    // A "name" field that is not a String trips JNameRule's value read.
    let code = Field::new("name", |m: &TestInputModel| &m.age);
    let model = TestInputModel { age: 7 };

    let err = registry
        .rights_for(&FieldRequest::new(&model, &code))
        .unwrap_err();
    assert!(matches!(err, AccessError::ValueTypeMismatch { field: "name", .. }));
}
