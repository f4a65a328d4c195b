use std::cell::RefCell;
use std::rc::Rc;

use slotmap::SecondaryMap;
use trellis_core::{ChangeKind, Scope, Signal, Store, bind};
use trellis_dom::{Dom, NodeKey};
use uuid::Uuid;

use crate::capability::Capabilities;
use crate::component::{Component, Context, Model, RenderContext, report};
use crate::error::{ElementError, HookError};
use crate::events::{ElementEvent, EventBus};
use crate::registry::Registry;
use crate::render;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Constructed,
    Connected,
    /// Terminal.
    Disconnected,
}

struct Instance {
    host: NodeKey,
    uuid: String,
    tag: String,
    stage: Signal<Stage>,
    attributes: Store,
    properties: Store,
    caps: Capabilities,
    events: EventBus,
    component: Rc<RefCell<Box<dyn Component>>>,
    observed: Vec<String>,
    scope: Scope,
}

/// Owns the document and every live instance, and adapts store mutations
/// and caller operations onto the component lifecycle.
pub struct Runtime {
    registry: Registry,
    dom: Rc<RefCell<Dom>>,
    instances: SecondaryMap<NodeKey, Instance>,
    clicks: EventBus,
}

impl Runtime {
    pub fn new(registry: Registry) -> Self {
        Self {
            registry,
            dom: Rc::new(RefCell::new(Dom::new())),
            instances: SecondaryMap::new(),
            clicks: EventBus::new(),
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn dom(&self) -> Rc<RefCell<Dom>> {
        self.dom.clone()
    }

    pub fn body(&self) -> NodeKey {
        self.dom.borrow().body()
    }

    /// Document-level listener for [`ElementEvent::Clicked`].
    pub fn on_click(&self, f: impl Fn(&ElementEvent) + 'static) {
        self.clicks.subscribe(f);
    }

    /// Constructs an instance of `tag`: generates its id, builds both
    /// stores, composes capabilities, wires store changes to the render
    /// dispatcher, and runs the first render pass.
    pub fn create(&mut self, tag: &str) -> Result<NodeKey, ElementError> {
        let definition = self
            .registry
            .definition(tag)
            .ok_or_else(|| ElementError::UnknownTag(tag.to_string()))?;

        let uuid = format!("{}-{}", self.registry.config().id, Uuid::new_v4());
        let host = self.dom.borrow_mut().create_element(tag);

        let attributes = Store::shallow();
        let properties = Store::deep();
        let events = EventBus::new();
        let caps = self.registry.compose(definition.capabilities);
        let component = Rc::new(RefCell::new((definition.factory)()));

        // Attribute mutations dispatch to the generic target, keyed by the
        // mutated name.
        attributes.subscribe({
            let dom = self.dom.clone();
            let events = events.clone();
            let uuid = uuid.clone();
            let tag = tag.to_string();
            move |change| {
                let mut dom = dom.borrow_mut();
                render::render_target(&mut dom, host, &tag, &events, &uuid, &change.key, &change.new);
            }
        });

        // Property mutations route array (and `items`) changes to the list
        // renderer; everything else to the generic one.
        properties.subscribe({
            let dom = self.dom.clone();
            let events = events.clone();
            let uuid = uuid.clone();
            let tag = tag.to_string();
            let store = properties.clone();
            move |change| {
                let mut dom = dom.borrow_mut();
                match change.kind {
                    ChangeKind::Items => {
                        let container = change.container_path();
                        let key = container.rsplit('.').next().unwrap_or(container);
                        let value = store
                            .get(container)
                            .unwrap_or_else(|| change.new.clone());
                        render::render_items_target(
                            &mut dom, host, &tag, &events, &uuid, key, &value,
                        );
                    }
                    ChangeKind::Field => {
                        render::render_target(
                            &mut dom, host, &tag, &events, &uuid, &change.key, &change.new,
                        );
                    }
                }
            }
        });

        self.instances.insert(
            host,
            Instance {
                host,
                uuid,
                tag: tag.to_string(),
                stage: Signal::new(Stage::Constructed),
                attributes,
                properties,
                caps,
                events,
                component,
                observed: definition.observed.clone(),
                scope: Scope::new(),
            },
        );

        self.render(host);
        Ok(host)
    }

    pub fn stage(&self, host: NodeKey) -> Option<Stage> {
        self.instances.get(host).map(|i| i.stage.get())
    }

    /// Observable handle on the instance's lifecycle stage.
    pub fn stage_signal(&self, host: NodeKey) -> Option<Signal<Stage>> {
        self.instances.get(host).map(|i| i.stage.clone())
    }

    pub fn uuid(&self, host: NodeKey) -> Option<String> {
        self.instances.get(host).map(|i| i.uuid.clone())
    }

    /// Instance-level lifecycle notifications.
    pub fn events(&self, host: NodeKey) -> Option<EventBus> {
        self.instances.get(host).map(|i| i.events.clone())
    }

    pub fn attributes(&self, host: NodeKey) -> Option<Store> {
        self.instances.get(host).map(|i| i.attributes.clone())
    }

    /// The instance's property store. Component logic may hold and write
    /// this handle at any time; writes after disconnect land in the store
    /// but render nowhere.
    pub fn properties(&self, host: NodeKey) -> Option<Store> {
        self.instances.get(host).map(|i| i.properties.clone())
    }

    /// Writes the DOM attribute and, when observed, runs the binder and the
    /// component hook. Binder failures are reported and leave the store
    /// unmodified for that key; nothing aborts the platform callback.
    pub fn set_attribute(
        &self,
        host: NodeKey,
        name: &str,
        value: &str,
    ) -> Result<(), ElementError> {
        let old = self.dom.borrow_mut().set_attribute(host, name, value)?;
        self.attribute_changed(host, name, old.as_deref(), Some(value));
        Ok(())
    }

    pub fn remove_attribute(&self, host: NodeKey, name: &str) -> Result<(), ElementError> {
        let old = self.dom.borrow_mut().remove_attribute(host, name)?;
        if old.is_some() {
            self.attribute_changed(host, name, old.as_deref(), None);
        }
        Ok(())
    }

    fn attribute_changed(&self, host: NodeKey, name: &str, old: Option<&str>, new: Option<&str>) {
        let Some(instance) = self.instances.get(host) else {
            return;
        };
        if !instance.observed.iter().any(|observed| observed == name) {
            return;
        }

        if let Err(error) = bind(&instance.attributes, name, new) {
            report(&instance.tag, &error);
            return;
        }

        let result = self.run_hook(instance, |component, cx| {
            component.attribute_changed(cx, name, old, new)
        });
        if let Err(error) = result {
            report(&instance.tag, &error);
        }

        instance.events.emit(&ElementEvent::AttributeChanged {
            name: name.to_string(),
        });
    }

    /// Attaches the host under `parent` and runs the connected flow.
    pub fn connect(&self, host: NodeKey, parent: NodeKey) -> Result<(), ElementError> {
        let Some(instance) = self.instances.get(host) else {
            return Err(ElementError::MissingInstance);
        };
        if instance.stage.get() == Stage::Disconnected {
            return Ok(());
        }

        {
            let mut dom = self.dom.borrow_mut();
            dom.detach(host)?;
            dom.append_child(parent, host)?;
        }
        instance.stage.set(Stage::Connected);
        instance.events.emit(&ElementEvent::Connected);

        if let Err(error) = self.run_hook(instance, |component, cx| component.connected(cx)) {
            report(&instance.tag, &error);
        }
        Ok(())
    }

    /// Clears rendered content and detaches the host. Terminal: the
    /// instance stays addressable, but lifecycle operations become no-ops.
    pub fn disconnect(&self, host: NodeKey) -> Result<(), ElementError> {
        let Some(instance) = self.instances.get(host) else {
            return Err(ElementError::MissingInstance);
        };
        if instance.stage.get() == Stage::Disconnected {
            return Ok(());
        }

        if let Err(error) = self.run_hook(instance, |component, cx| component.disconnected(cx)) {
            report(&instance.tag, &error);
        }

        {
            let mut dom = self.dom.borrow_mut();
            dom.clear_children(host)?;
            dom.detach(host)?;
        }
        instance.scope.dispose();
        instance.stage.set(Stage::Disconnected);
        instance.events.emit(&ElementEvent::Disconnected);
        Ok(())
    }

    /// Reserved transition; emits its event and calls the hook, nothing
    /// else.
    pub fn adopt(&self, host: NodeKey) {
        let Some(instance) = self.instances.get(host) else {
            return;
        };
        if let Err(error) = self.run_hook(instance, |component, cx| component.adopted(cx)) {
            report(&instance.tag, &error);
        }
        instance.events.emit(&ElementEvent::Adopted);
    }

    /// Synchronously recomputes the instance's full inner markup from the
    /// current model snapshot. Failures are reported, never propagated.
    pub fn render(&self, host: NodeKey) {
        let Some(instance) = self.instances.get(host) else {
            return;
        };
        if instance.stage.get() == Stage::Disconnected {
            return;
        }

        let markup = {
            let cx = RenderContext {
                uuid: &instance.uuid,
                model: Model::capture(&instance.attributes, &instance.properties),
            };
            instance.component.borrow().render(&cx)
        };

        let outcome = self.dom.borrow_mut().set_inner_markup(host, &markup);
        match outcome {
            Ok(()) => instance.events.emit(&ElementEvent::Rendered),
            Err(error) => report(&instance.tag, &error),
        }
    }

    /// Runs one hook with a fresh [`Context`], honoring a render request
    /// after the hook returns.
    fn run_hook(
        &self,
        instance: &Instance,
        f: impl FnOnce(&mut dyn Component, &mut Context<'_>) -> Result<(), HookError>,
    ) -> Result<(), HookError> {
        let mut cx = Context {
            uuid: &instance.uuid,
            tag: &instance.tag,
            attributes: &instance.attributes,
            properties: &instance.properties,
            caps: &instance.caps,
            events: &instance.events,
            clicks: &self.clicks,
            scope: &instance.scope,
            render_requested: false,
        };
        let component = instance.component.clone();
        let result = f(component.borrow_mut().as_mut(), &mut cx);
        let wants_render = cx.render_requested;
        drop(cx);

        if wants_render {
            self.render(instance.host);
        }
        result
    }
}
