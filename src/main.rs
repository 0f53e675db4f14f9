mod setup;

use serde_json::{json, Value};
use setup::set_up_tracing;
use validation::{errors_of, state_validation, Component, ComponentType, State, Validations};

/// Sign-up form whose fields are validated on every update
#[derive(Debug, Default)]
struct SignUpForm {
    state: State,
}

impl Component for SignUpForm {
    const DISPLAY_NAME: Option<&'static str> = Some("SignUpForm");

    fn state_validations() -> Option<Validations> {
        Some(
            Validations::new()
                .rule("name", rules::required("Name"))
                .rule("email", rules::email())
                .rule("password", rules::password("Password"))
                .rule(
                    "nickname",
                    rules::differs_from("email", "Nickname must not be your email address"),
                )
                .declare_value("newsletter", json!(true)),
        )
    }

    fn set_state(&mut self, state: State) {
        self.state.extend(state);
    }

    fn state_mut(&mut self) -> Option<&mut State> {
        Some(&mut self.state)
    }
}

fn payload(value: Value) -> State {
    match value {
        Value::Object(map) => map,
        _ => State::new(),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    set_up_tracing();

    let form = state_validation(Some(ComponentType::<SignUpForm>::of()))?;
    tracing::info!(component = form.display_name().unwrap_or_default(), "component decorated");

    let mut instance = form.mount(SignUpForm {
        state: payload(json!({ "name": "" })),
    });

    let updates = [
        json!({ "email": "not-an-email", "password": "weak" }),
        json!({ "name": "Ada", "email": "ada@example.com", "nickname": "ada@example.com", "newsletter": false }),
        json!({ "password": "MyUniqueP@ssw0rd" }),
    ];
    for update in updates {
        instance.set_state(Some(payload(update)));
        let state = &instance.component().state;
        tracing::info!(failing_fields = errors_of(state).len(), "state updated");
        println!("{}", serde_json::to_string_pretty(state)?);
    }

    Ok(())
}
