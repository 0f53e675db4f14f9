use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::key_validator::Validations;

/// Field name → value. Keys keep insertion order.
pub type State = Map<String, Value>;

/// Reserved state field holding the per-field error messages
pub const ERRORS_KEY: &str = "errors";

/// State-update operation of a component type
pub type SetState<C> = Arc<dyn Fn(&mut C, State) + Send + Sync>;

/// Runs once when an instance is mounted
pub type MountHook<C> = Arc<dyn Fn(&mut C) + Send + Sync>;

/// Exposes an instance's current state, if it keeps one
pub type StateAccessor<C> = fn(&mut C) -> Option<&mut State>;

/// A stateful UI unit whose type can be described by a [`ComponentType`]
pub trait Component: Sized + 'static {
    const DISPLAY_NAME: Option<&'static str> = None;

    fn state_validations() -> Option<Validations> {
        None
    }

    fn default_props() -> Option<State> {
        None
    }

    /// Declared property contracts, kept opaque
    fn prop_types() -> Option<State> {
        None
    }

    /// Merge `state` into the component's state
    fn set_state(&mut self, state: State);

    fn state_mut(&mut self) -> Option<&mut State> {
        None
    }
}

/// Value-level description of a component type.
///
/// Decorators take one of these and hand back a new one; the instances they
/// are used with stay plain `C` values.
pub struct ComponentType<C> {
    pub(crate) display_name: Option<String>,
    pub(crate) state_validations: Option<Validations>,
    pub(crate) default_props: Option<State>,
    pub(crate) prop_types: Option<State>,
    pub(crate) set_state: SetState<C>,
    pub(crate) state_accessor: Option<StateAccessor<C>>,
    pub(crate) on_mount: Option<MountHook<C>>,
}

impl<C> ComponentType<C> {
    pub fn new<F>(set_state: F) -> Self
    where
        F: Fn(&mut C, State) + Send + Sync + 'static,
    {
        Self {
            display_name: None,
            state_validations: None,
            default_props: None,
            prop_types: None,
            set_state: Arc::new(set_state),
            state_accessor: None,
            on_mount: None,
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    pub fn with_state_validations(mut self, validations: Validations) -> Self {
        self.state_validations = Some(validations);
        self
    }

    pub fn with_default_props(mut self, default_props: State) -> Self {
        self.default_props = Some(default_props);
        self
    }

    pub fn with_prop_types(mut self, prop_types: State) -> Self {
        self.prop_types = Some(prop_types);
        self
    }

    pub fn with_state_accessor(mut self, accessor: StateAccessor<C>) -> Self {
        self.state_accessor = Some(accessor);
        self
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    pub fn state_validations(&self) -> Option<&Validations> {
        self.state_validations.as_ref()
    }

    pub fn default_props(&self) -> Option<&State> {
        self.default_props.as_ref()
    }

    pub fn prop_types(&self) -> Option<&State> {
        self.prop_types.as_ref()
    }

    /// Invoke the type's state-update operation on `component`.
    ///
    /// `None` is treated as an empty payload.
    pub fn set_state(&self, component: &mut C, state: Option<State>) {
        (self.set_state)(component, state.unwrap_or_default())
    }

    /// Run the type's mount hook over `component` and wrap it
    pub fn mount(&self, mut component: C) -> Instance<C> {
        if let Some(on_mount) = &self.on_mount {
            on_mount(&mut component);
        }
        Instance {
            component_type: self.clone(),
            component,
        }
    }
}

impl<C: Component> ComponentType<C> {
    /// Describe `C` from its [`Component`] implementation
    pub fn of() -> Self {
        let mut component_type = ComponentType::new(|component: &mut C, state: State| {
            component.set_state(state)
        })
        .with_state_accessor(C::state_mut);
        component_type.display_name = C::DISPLAY_NAME.map(str::to_string);
        component_type.state_validations = C::state_validations();
        component_type.default_props = C::default_props();
        component_type.prop_types = C::prop_types();
        component_type
    }
}

impl<C> Clone for ComponentType<C> {
    fn clone(&self) -> Self {
        Self {
            display_name: self.display_name.clone(),
            state_validations: self.state_validations.clone(),
            default_props: self.default_props.clone(),
            prop_types: self.prop_types.clone(),
            set_state: Arc::clone(&self.set_state),
            state_accessor: self.state_accessor,
            on_mount: self.on_mount.clone(),
        }
    }
}

impl<C> fmt::Debug for ComponentType<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentType")
            .field("display_name", &self.display_name)
            .field("state_validations", &self.state_validations)
            .field("default_props", &self.default_props)
            .field("prop_types", &self.prop_types)
            .finish_non_exhaustive()
    }
}

/// A mounted component together with the type it was mounted through
pub struct Instance<C> {
    component_type: ComponentType<C>,
    component: C,
}

impl<C> Instance<C> {
    pub fn set_state(&mut self, state: Option<State>) {
        self.component_type.set_state(&mut self.component, state)
    }

    pub fn component(&self) -> &C {
        &self.component
    }

    pub fn component_mut(&mut self) -> &mut C {
        &mut self.component
    }

    pub fn component_type(&self) -> &ComponentType<C> {
        &self.component_type
    }

    pub fn into_inner(self) -> C {
        self.component
    }
}
