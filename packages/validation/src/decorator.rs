use std::sync::Arc;

use serde_json::{Map, Value};

use crate::component::{ComponentType, MountHook, SetState, State, ERRORS_KEY};
use crate::diagnostics::{Diagnostics, TracingDiagnostics};
use crate::errors::{DecorateError, ValidationErrors, ValidationErrorsExt};
use crate::flatten::flatten_errors;
use crate::key_validator::{validate_key, KeyValidation, Validations};

/// Decorate `component_type` so every state update is validated first.
///
/// Non-invocable rule entries are reported through [`TracingDiagnostics`].
pub fn state_validation<C: 'static>(
    component_type: Option<ComponentType<C>>,
) -> Result<ComponentType<C>, DecorateError> {
    state_validation_with(component_type, Arc::new(TracingDiagnostics))
}

/// Like [`state_validation`], reporting configuration warnings to `diagnostics`.
///
/// The returned type keeps the input's validations, default props, prop
/// types and state accessor. Its display name becomes `StateValidation(<name>)`, and its
/// state-update operation resets `errors`, fills it from the rules of the
/// keys present in the payload and then calls the original operation with
/// the augmented payload.
pub fn state_validation_with<C: 'static>(
    component_type: Option<ComponentType<C>>,
    diagnostics: Arc<dyn Diagnostics>,
) -> Result<ComponentType<C>, DecorateError> {
    let inner = component_type.ok_or(DecorateError::MissingComponent)?;

    let display_name = inner.display_name.clone();
    let validations = Arc::new(inner.state_validations.clone().unwrap_or_default());

    tracing::debug!(
        component = display_name.as_deref().unwrap_or("Component"),
        rules = validations.len(),
        "state validation attached"
    );

    let set_state: SetState<C> = {
        let original = Arc::clone(&inner.set_state);
        let display_name = display_name.clone();
        let validations = Arc::clone(&validations);
        let diagnostics = Arc::clone(&diagnostics);
        Arc::new(move |component: &mut C, mut state: State| {
            let errors = validate_state(&state, display_name.as_deref(), &validations, diagnostics.as_ref());
            state.insert(ERRORS_KEY.to_string(), Value::Object(errors));
            original(component, state)
        })
    };

    let on_mount: MountHook<C> = {
        let original = inner.on_mount.clone();
        let accessor = inner.state_accessor;
        let display_name = display_name.clone();
        Arc::new(move |component: &mut C| {
            if let Some(original) = &original {
                original(component);
            }
            let Some(accessor) = accessor else { return };
            let Some(state) = accessor(component) else { return };
            let errors = validate_state(state, display_name.as_deref(), &validations, diagnostics.as_ref());
            state.insert(ERRORS_KEY.to_string(), Value::Object(errors));
        })
    };

    Ok(ComponentType {
        display_name: Some(format!(
            "StateValidation({})",
            display_name.as_deref().unwrap_or("Component")
        )),
        state_validations: inner.state_validations,
        default_props: inner.default_props,
        prop_types: inner.prop_types,
        set_state,
        state_accessor: inner.state_accessor,
        on_mount: Some(on_mount),
    })
}

/// Build a fresh `errors` object for the keys of `state`.
///
/// Only keys whose rule produced at least one message get an entry. The
/// reserved `errors` key is never validated.
pub fn validate_state(
    state: &State,
    display_name: Option<&str>,
    validations: &Validations,
    diagnostics: &dyn Diagnostics,
) -> Map<String, Value> {
    let fields: Vec<&str> = state
        .keys()
        .map(String::as_str)
        .filter(|key| *key != ERRORS_KEY)
        .collect();

    let mut errors = ValidationErrors::new();
    for &key in &fields {
        let result = validate_key(
            KeyValidation {
                state,
                key,
                validations,
                display_name,
            },
            diagnostics,
        );
        if result.is_absent() {
            continue;
        }
        for message in flatten_errors(&result) {
            errors.add_error(key, message);
        }
    }
    errors.to_json(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{MockDiagnostics, NoopDiagnostics};
    use crate::errors::{errors_of, FieldError};
    use crate::key_validator::rule;
    use crate::test_helpers::{payload, RecordingForm};
    use serde_json::json;

    fn foo_fails_with(messages: &'static [&'static str]) -> Validations {
        Validations::new().rule(
            "foo",
            rule(move |_: &State, _: &str, _: Option<&str>| {
                messages.iter().map(|message| FieldError::new(*message)).collect::<Vec<_>>()
            }),
        )
    }

    fn foo_required() -> Validations {
        Validations::new().rule(
            "foo",
            rule(|state: &State, key: &str, _: Option<&str>| {
                match state.get(key).and_then(Value::as_str) {
                    Some(value) if !value.is_empty() => None,
                    _ => Some(FieldError::new("error")),
                }
            }),
        )
    }

    fn decorate(validations: Validations) -> ComponentType<RecordingForm> {
        let form = ComponentType::<RecordingForm>::of().with_state_validations(validations);
        state_validation_with(Some(form), Arc::new(NoopDiagnostics)).unwrap()
    }

    #[test]
    fn test_missing_component_type_is_rejected() {
        let result = state_validation::<RecordingForm>(None);
        assert_eq!(result.unwrap_err(), DecorateError::MissingComponent);
    }

    #[test]
    fn test_replaces_the_state_update_operation() {
        let form = ComponentType::<RecordingForm>::of();
        let original = Arc::clone(&form.set_state);

        let decorated = state_validation(Some(form)).unwrap();
        assert!(!Arc::ptr_eq(&original, &decorated.set_state));
    }

    #[test]
    fn test_errors_present_without_rules() {
        let decorated = state_validation(Some(ComponentType::<RecordingForm>::of())).unwrap();
        let mut form = RecordingForm::default();

        decorated.set_state(&mut form, Some(payload(json!({ "foo": "bar" }))));
        decorated.set_state(&mut form, None);

        assert_eq!(form.calls[0], payload(json!({ "foo": "bar", "errors": {} })));
        assert_eq!(form.calls[1], payload(json!({ "errors": {} })));
    }

    #[test]
    fn test_single_error_becomes_message_list() {
        let decorated = decorate(foo_fails_with(&["baz"]));
        let mut form = RecordingForm::default();

        decorated.set_state(&mut form, Some(payload(json!({ "foo": "bar" }))));
        assert_eq!(
            form.calls,
            vec![payload(json!({ "foo": "bar", "errors": { "foo": ["baz"] } }))]
        );
    }

    #[test]
    fn test_many_errors_keep_order() {
        let decorated = decorate(foo_fails_with(&["baz", "qux"]));
        let mut form = RecordingForm::default();

        decorated.set_state(&mut form, Some(payload(json!({ "foo": "bar" }))));
        assert_eq!(
            errors_of(&form.calls[0])["foo"],
            vec!["baz".to_string(), "qux".to_string()]
        );
    }

    #[test]
    fn test_errors_follow_payload_key_order() {
        let validations = Validations::new()
            .rule("alpha", rule(|_: &State, _: &str, _: Option<&str>| FieldError::new("a")))
            .rule("zulu", rule(|_: &State, _: &str, _: Option<&str>| FieldError::new("z")));
        let decorated = decorate(validations);
        let mut form = RecordingForm::default();

        decorated.set_state(&mut form, Some(payload(json!({ "zulu": 1, "mike": 2, "alpha": 3 }))));
        let errors = form.calls[0][ERRORS_KEY].as_object().cloned().unwrap();
        assert_eq!(errors.keys().collect::<Vec<_>>(), vec!["zulu", "alpha"]);
    }

    #[test]
    fn test_empty_error_list_leaves_no_entry() {
        let decorated = decorate(foo_fails_with(&[]));
        let mut form = RecordingForm::default();

        decorated.set_state(&mut form, Some(payload(json!({ "foo": "bar" }))));
        assert_eq!(form.calls[0][ERRORS_KEY], json!({}));
    }

    #[test]
    fn test_errors_reset_once_field_passes() {
        let decorated = decorate(foo_required());
        let mut form = RecordingForm::default();

        decorated.set_state(&mut form, Some(payload(json!({ "foo": "" }))));
        assert_eq!(errors_of(form.current())["foo"], vec!["error".to_string()]);

        decorated.set_state(&mut form, Some(payload(json!({ "foo": "bar" }))));
        assert!(errors_of(form.current()).get("foo").is_none());
        assert_eq!(form.current()["foo"], json!("bar"));
    }

    #[test]
    fn test_only_payload_keys_are_validated() {
        let validations = foo_required().rule(
            "name",
            rule(|_: &State, _: &str, _: Option<&str>| FieldError::new("never")),
        );
        let decorated = decorate(validations);
        let mut form = RecordingForm::default();

        decorated.set_state(&mut form, Some(payload(json!({ "foo": "" }))));
        decorated.set_state(&mut form, Some(payload(json!({ "other": 1 }))));

        assert_eq!(form.calls[0][ERRORS_KEY], json!({ "foo": ["error"] }));
        assert_eq!(form.calls[1][ERRORS_KEY], json!({}));
    }

    #[test]
    fn test_field_without_rule_gets_no_entry() {
        let decorated = decorate(foo_fails_with(&["baz"]));
        let mut form = RecordingForm::default();

        decorated.set_state(&mut form, Some(payload(json!({ "bar": 1, "foo": "x" }))));
        let errors = errors_of(&form.calls[0]);
        assert!(errors.get("bar").is_none());
        assert_eq!(errors["foo"], vec!["baz".to_string()]);
    }

    #[test]
    fn test_rule_sees_display_name_and_payload() {
        let validations = Validations::new().rule(
            "foo",
            rule(|state: &State, key: &str, display_name: Option<&str>| {
                assert_eq!(state["foo"], json!("bar"));
                assert_eq!(key, "foo");
                assert_eq!(display_name, Some("RecordingForm"));
            }),
        );
        let decorated = decorate(validations);
        let mut form = RecordingForm::default();

        decorated.set_state(&mut form, Some(payload(json!({ "foo": "bar" }))));
        assert_eq!(form.calls.len(), 1);
    }

    #[test]
    fn test_not_invocable_rule_warns_and_update_proceeds() {
        let mut diagnostics = MockDiagnostics::new();
        diagnostics
            .expect_warn()
            .withf(|key: &str, _: &str| key == "foo")
            .times(1)
            .return_const(());

        let form = ComponentType::<RecordingForm>::of()
            .with_state_validations(Validations::new().declare_value("foo", json!("/baz/")));
        let decorated = state_validation_with(Some(form), Arc::new(diagnostics)).unwrap();
        let mut component = RecordingForm::default();

        decorated.set_state(&mut component, Some(payload(json!({ "foo": "bar", "bar": 2 }))));
        assert_eq!(
            component.calls,
            vec![payload(json!({ "foo": "bar", "bar": 2, "errors": {} }))]
        );
    }

    #[test]
    fn test_caller_supplied_errors_are_replaced() {
        let decorated = decorate(foo_fails_with(&["baz"]));
        let mut form = RecordingForm::default();

        decorated.set_state(
            &mut form,
            Some(payload(json!({ "errors": { "stale": ["old"] }, "foo": "bar" }))),
        );
        assert_eq!(form.calls[0][ERRORS_KEY], json!({ "foo": ["baz"] }));
    }

    #[test]
    fn test_members_pass_through() {
        let decorated = decorate(foo_fails_with(&["baz"]));

        assert_eq!(decorated.display_name(), Some("StateValidation(RecordingForm)"));
        assert_eq!(
            decorated.state_validations().map(Validations::len),
            Some(1)
        );
        assert_eq!(
            decorated.default_props(),
            Some(&payload(json!({ "title": "Sign up" })))
        );
        assert_eq!(
            decorated.prop_types(),
            Some(&payload(json!({ "title": "string", "on_submit": "func" })))
        );
    }

    #[test]
    fn test_hand_declared_prop_types_pass_through() {
        let counter = ComponentType::new(|_: &mut u8, _: State| {})
            .with_prop_types(payload(json!({ "step": "number" })));
        let decorated = state_validation(Some(counter)).unwrap();

        assert_eq!(decorated.prop_types(), Some(&payload(json!({ "step": "number" }))));
    }

    #[test]
    fn test_unnamed_type_gets_placeholder_name() {
        let counter = ComponentType::new(|_: &mut u8, _: State| {});
        let decorated = state_validation(Some(counter)).unwrap();
        assert_eq!(decorated.display_name(), Some("StateValidation(Component)"));
    }

    #[test]
    fn test_decorating_twice_nests() {
        let once = decorate(foo_fails_with(&["baz"]));
        let twice = state_validation(Some(once)).unwrap();
        let mut form = RecordingForm::default();

        twice.set_state(&mut form, Some(payload(json!({ "foo": "bar" }))));
        assert_eq!(
            twice.display_name(),
            Some("StateValidation(StateValidation(RecordingForm))")
        );
        assert_eq!(form.calls[0][ERRORS_KEY], json!({ "foo": ["baz"] }));
    }

    #[test]
    fn test_mount_validates_initial_state() {
        let decorated = decorate(foo_fails_with(&["baz"]));
        let instance = decorated.mount(RecordingForm::with_state(json!({ "foo": "bar" })));

        let state = instance.component().state.clone().unwrap();
        assert_eq!(errors_of(&state)["foo"], vec!["baz".to_string()]);
        assert!(instance.component().calls.is_empty());
    }

    #[test]
    fn test_mount_seeds_empty_errors() {
        let decorated = decorate(foo_required());
        let instance = decorated.mount(RecordingForm::with_state(json!({ "foo": "bar" })));

        assert_eq!(
            instance.component().state,
            Some(payload(json!({ "foo": "bar", "errors": {} })))
        );
    }

    #[test]
    fn test_mount_without_state_is_untouched() {
        let decorated = decorate(foo_required());
        let instance = decorated.mount(RecordingForm::default());

        assert!(instance.component().state.is_none());
    }

    #[test]
    fn test_instance_routes_updates_through_decorated_type() {
        let decorated = decorate(foo_required());
        let mut instance = decorated.mount(RecordingForm::with_state(json!({ "foo": "bar" })));

        instance.set_state(Some(payload(json!({ "foo": "" }))));
        assert_eq!(errors_of(instance.component().current())["foo"], vec!["error".to_string()]);

        assert_eq!(
            instance.component_type().display_name(),
            Some("StateValidation(RecordingForm)")
        );
        instance.component_mut().calls.clear();

        instance.set_state(Some(payload(json!({ "foo": "ok" }))));
        let form = instance.into_inner();
        assert!(errors_of(form.current()).is_empty());
        assert_eq!(form.calls, vec![payload(json!({ "foo": "ok", "errors": {} }))]);
    }
}
