use formscope::{resolve_form_id, Error, FormId};

#[test]
fn explicit_id_wins_over_ambient() {
    let explicit = FormId::explicit("settings");
    let ambient = FormId::generate();
    let resolved = resolve_form_id(Some(&explicit), Some(&ambient), "use_field").unwrap();
    assert_eq!(resolved, explicit);
}

#[test]
fn ambient_id_used_without_explicit() {
    let ambient = FormId::generate();
    let resolved = resolve_form_id(None, Some(&ambient), "use_field").unwrap();
    assert_eq!(resolved, ambient);
}

#[test]
fn explicit_id_needs_no_ambient() {
    let explicit = FormId::explicit("standalone");
    assert_eq!(resolve_form_id(Some(&explicit), None, "use_field").unwrap(), explicit);
}

#[test]
fn missing_both_fails_naming_call_site() {
    let err = resolve_form_id(None, None, "use_is_submitting").unwrap_err();
    assert!(matches!(&err, Error::MissingFormContext { hook } if hook == "use_is_submitting"));
    assert!(err.to_string().contains("use_is_submitting"));
}

#[test]
fn empty_explicit_id_counts_as_absent() {
    let blank = FormId::explicit("");
    let ambient = FormId::generate();
    assert_eq!(resolve_form_id(Some(&blank), Some(&ambient), "use_field").unwrap(), ambient);

    let err = resolve_form_id(Some(&blank), None, "use_field").unwrap_err();
    assert!(matches!(err, Error::MissingFormContext { .. }));
}
