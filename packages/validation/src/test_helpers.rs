use serde_json::{json, Value};

use crate::component::{Component, State};

pub fn payload(value: Value) -> State {
    value
        .as_object()
        .cloned()
        .expect("payload fixtures must be JSON objects")
}

/// Component that records every payload handed to its state-update
/// operation and shallow-merges it into its own state.
#[derive(Debug, Default)]
pub struct RecordingForm {
    pub state: Option<State>,
    pub calls: Vec<State>,
}

impl RecordingForm {
    pub fn with_state(value: Value) -> Self {
        Self {
            state: Some(payload(value)),
            calls: Vec::new(),
        }
    }

    pub fn current(&self) -> &State {
        self.state.as_ref().expect("no state set yet")
    }
}

impl Component for RecordingForm {
    const DISPLAY_NAME: Option<&'static str> = Some("RecordingForm");

    fn default_props() -> Option<State> {
        Some(payload(json!({ "title": "Sign up" })))
    }

    fn prop_types() -> Option<State> {
        Some(payload(json!({ "title": "string", "on_submit": "func" })))
    }

    fn set_state(&mut self, state: State) {
        self.calls.push(state.clone());
        self.state.get_or_insert_with(State::new).extend(state);
    }

    fn state_mut(&mut self) -> Option<&mut State> {
        self.state.as_mut()
    }
}
