use formscope_types::{ActionResponse, Error, FieldErrors, ValidationErrorResponse, ValueSet};
use pretty_assertions::assert_eq;
use serde_json::json;

fn errors(pairs: &[(&str, &str)]) -> FieldErrors {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

// ── Classification ───────────────────────────────────────────────

#[test]
fn absent_data_is_no_response() {
    assert_eq!(ActionResponse::from_json(None).unwrap(), ActionResponse::NoResponse);
    assert_eq!(
        ActionResponse::from_json(Some(&json!(null))).unwrap(),
        ActionResponse::NoResponse
    );
}

#[test]
fn non_object_data_is_no_response() {
    assert_eq!(
        ActionResponse::from_json(Some(&json!("redirected"))).unwrap(),
        ActionResponse::NoResponse
    );
}

#[test]
fn data_without_field_errors_is_no_response() {
    let raw = json!({"ok": true, "subaction": "update"});
    assert_eq!(ActionResponse::from_json(Some(&raw)).unwrap(), ActionResponse::NoResponse);
}

#[test]
fn empty_field_errors_is_no_response() {
    let raw = json!({"fieldErrors": {}, "subaction": "update"});
    assert_eq!(ActionResponse::from_json(Some(&raw)).unwrap(), ActionResponse::NoResponse);
}

#[test]
fn populated_field_errors_is_validation_failure() {
    let raw = json!({
        "fieldErrors": {"email": "required"},
        "repopulateFields": {"email": ""},
        "subaction": "signup",
        "formIdentityTag": "login",
        "somethingElse": 1
    });
    let response = ActionResponse::from_json(Some(&raw)).unwrap();
    assert!(response.is_validation_failure());
    let failure = response.into_failure().unwrap();
    assert_eq!(failure.field_errors, errors(&[("email", "required")]));
    assert_eq!(failure.subaction.as_deref(), Some("signup"));
    assert_eq!(failure.form_identity_tag.as_deref(), Some("login"));
    assert_eq!(
        failure.repopulate_fields,
        Some(ValueSet::from_json(json!({"email": ""})).unwrap())
    );
}

#[test]
fn malformed_field_errors_is_an_error() {
    let raw = json!({"fieldErrors": {"email": 3}});
    let err = ActionResponse::from_json(Some(&raw)).unwrap_err();
    assert!(matches!(err, Error::InvalidPayload(msg) if msg.contains("email")));

    let raw = json!({"fieldErrors": ["email"]});
    assert!(ActionResponse::from_json(Some(&raw)).is_err());
}

#[test]
fn wrongly_typed_subaction_is_a_serialization_error() {
    let raw = json!({"fieldErrors": {"a": "b"}, "subaction": 5});
    let err = ActionResponse::from_json(Some(&raw)).unwrap_err();
    assert!(matches!(err, Error::Serialization(_)));
}

// ── Response helper ──────────────────────────────────────────────

#[test]
fn builder_serializes_to_the_matched_shape() {
    let response = ValidationErrorResponse::new(errors(&[("name", "too short")]))
        .with_subaction("rename")
        .with_form_identity_tag("profile");
    assert_eq!(
        response.to_json().unwrap(),
        json!({
            "fieldErrors": {"name": "too short"},
            "subaction": "rename",
            "formIdentityTag": "profile"
        })
    );
}

#[test]
fn builder_output_classifies_back_to_itself() {
    let response = ValidationErrorResponse::new(errors(&[("name", "too short")]))
        .with_repopulate_fields(ValueSet::from_json(json!({"name": "x"})).unwrap());
    let raw = response.to_json().unwrap();
    assert_eq!(
        ActionResponse::from_json(Some(&raw)).unwrap(),
        ActionResponse::ValidationFailure(response)
    );
}
