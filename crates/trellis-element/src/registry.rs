use std::collections::HashMap;

use crate::capability::{Capabilities, CapabilitySet, CapabilityTable};
use crate::component::Component;
use crate::config::AppConfig;
use crate::error::ElementError;

pub type ComponentFactory = Box<dyn Fn() -> Box<dyn Component>>;

/// One registered component type: its factory, the attribute names that
/// trigger the attribute-changed hook, and the capabilities to compose.
pub struct Definition {
    pub(crate) observed: Vec<String>,
    pub(crate) capabilities: CapabilitySet,
    pub(crate) factory: ComponentFactory,
}

impl Definition {
    pub fn new<C: Component + 'static>(factory: impl Fn() -> C + 'static) -> Self {
        Self {
            observed: Vec::new(),
            capabilities: CapabilitySet::empty(),
            factory: Box::new(move || Box::new(factory()) as Box<dyn Component>),
        }
    }

    /// Declares the observed attributes, the `observedAttributes` list.
    pub fn observe<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.observed = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn capabilities(mut self, caps: CapabilitySet) -> Self {
        self.capabilities = caps;
        self
    }
}

/// Tag name → definition, plus the app configuration and capability table
/// every instance composes from.
pub struct Registry {
    config: AppConfig,
    capability_table: CapabilityTable,
    definitions: HashMap<String, Definition>,
}

impl Registry {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            capability_table: CapabilityTable::with_defaults(),
            definitions: HashMap::new(),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn define(
        &mut self,
        tag: impl Into<String>,
        definition: Definition,
    ) -> Result<(), ElementError> {
        let tag = tag.into();
        if self.definitions.contains_key(&tag) {
            return Err(ElementError::DuplicateTag(tag));
        }
        self.definitions.insert(tag, definition);
        Ok(())
    }

    pub fn definition(&self, tag: &str) -> Option<&Definition> {
        self.definitions.get(tag)
    }

    /// Swap seam for capability installers (e.g. a canned-data fetch).
    pub fn capability_table_mut(&mut self) -> &mut CapabilityTable {
        &mut self.capability_table
    }

    pub(crate) fn compose(&self, wanted: CapabilitySet) -> Capabilities {
        self.capability_table.compose(wanted, &self.config)
    }
}
