use std::fmt;

use serde_json::{Map, Value};
use trellis_core::{Scope, Store, value_text};
use trellis_net::{CookieJar, Fetch};

use crate::capability::Capabilities;
use crate::error::HookError;
use crate::events::{ElementEvent, EventBus};
use crate::render;

/// Snapshot of both stores at render time. `merged` is the property store
/// with attributes layered on top (attributes win).
pub struct Model {
    pub attribute: Map<String, Value>,
    pub property: Map<String, Value>,
    pub merged: Map<String, Value>,
}

impl Model {
    pub(crate) fn capture(attributes: &Store, properties: &Store) -> Self {
        let attribute = attributes.snapshot();
        let property = properties.snapshot();
        let mut merged = property.clone();
        for (key, value) in &attribute {
            merged.insert(key.clone(), value.clone());
        }
        Self {
            attribute,
            property,
            merged,
        }
    }

    pub fn value(&self, key: &str) -> Option<&Value> {
        self.merged.get(key)
    }

    /// Render text for `key`: the stored string as-is (already escaped), or
    /// the value's display form; empty when absent.
    pub fn text(&self, key: &str) -> String {
        self.merged.get(key).map(value_text).unwrap_or_default()
    }
}

/// One component type. The runtime drives these hooks through the platform
/// lifecycle; hook failures are reported through the component reporter and
/// never abort the lifecycle callback.
pub trait Component {
    fn connected(&mut self, cx: &mut Context<'_>) -> Result<(), HookError> {
        let _ = cx;
        Ok(())
    }

    fn disconnected(&mut self, cx: &mut Context<'_>) -> Result<(), HookError> {
        let _ = cx;
        Ok(())
    }

    fn attribute_changed(
        &mut self,
        cx: &mut Context<'_>,
        name: &str,
        old: Option<&str>,
        new: Option<&str>,
    ) -> Result<(), HookError> {
        let _ = (cx, name, old, new);
        Ok(())
    }

    /// Reserved: fires when an instance moves between documents.
    fn adopted(&mut self, cx: &mut Context<'_>) -> Result<(), HookError> {
        let _ = cx;
        Ok(())
    }

    /// Full markup for the instance, recomputed from the current model.
    /// Must be idempotent for unchanged state.
    fn render(&self, cx: &RenderContext<'_>) -> String;
}

/// What a lifecycle hook can reach: the instance's identity, stores,
/// capabilities, and event buses.
pub struct Context<'a> {
    pub(crate) uuid: &'a str,
    pub(crate) tag: &'a str,
    pub(crate) attributes: &'a Store,
    pub(crate) properties: &'a Store,
    pub(crate) caps: &'a Capabilities,
    pub(crate) events: &'a EventBus,
    pub(crate) clicks: &'a EventBus,
    pub(crate) scope: &'a Scope,
    pub(crate) render_requested: bool,
}

impl Context<'_> {
    pub fn uuid(&self) -> &str {
        self.uuid
    }

    pub fn tag(&self) -> &str {
        self.tag
    }

    pub fn attributes(&self) -> &Store {
        self.attributes
    }

    pub fn properties(&self) -> &Store {
        self.properties
    }

    pub fn net(&self) -> Option<&dyn Fetch> {
        self.caps.net.as_deref()
    }

    pub fn cookies(&self) -> Option<&CookieJar> {
        self.caps.cookie.as_deref()
    }

    /// `id="<uuid>-<key>"`, ready to interpolate into markup.
    pub fn target_attr(&self, key: &str) -> String {
        render::target_attr(self.uuid, key)
    }

    /// Asks the runtime for a full render once this hook returns.
    pub fn request_render(&mut self) {
        self.render_requested = true;
    }

    /// Registers cleanup to run at disconnect.
    pub fn on_disconnect(&self, f: impl FnOnce() + 'static) {
        self.scope.add_disposer(f);
    }

    pub fn emit(&self, event: ElementEvent) {
        self.events.emit(&event);
    }

    /// Document-level click notification carrying this instance's id.
    pub fn dispatch_click(&self) {
        self.clicks.emit(&ElementEvent::Clicked {
            uuid: self.uuid.to_string(),
        });
    }

    pub fn report(&self, error: &dyn fmt::Display) {
        report(self.tag, error);
    }

    pub fn debug(&self, message: &str) {
        log::debug!("{}> {message}", self.tag);
    }
}

/// Read-only view handed to `render`.
pub struct RenderContext<'a> {
    pub(crate) uuid: &'a str,
    pub(crate) model: Model,
}

impl RenderContext<'_> {
    pub fn uuid(&self) -> &str {
        self.uuid
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn text(&self, key: &str) -> String {
        self.model.text(key)
    }

    /// `id="<uuid>-<key>"`, ready to interpolate into markup.
    pub fn target_attr(&self, key: &str) -> String {
        render::target_attr(self.uuid, key)
    }
}

/// Component-scoped error reporter: logged, never re-thrown.
pub(crate) fn report(tag: &str, error: &dyn fmt::Display) {
    log::error!("{tag}> error: {error}");
}
