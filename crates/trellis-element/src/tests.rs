#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use serde_json::{Value, json};

    use crate::prelude::*;

    /// Canned-data stand-in for the HTTP client.
    struct StubFetch {
        payload: Value,
    }

    impl Fetch for StubFetch {
        fn get(&self, _url: &str) -> Result<Value, NetError> {
            Ok(self.payload.clone())
        }
        fn post(&self, _url: &str, _body: &Value) -> Result<Value, NetError> {
            Ok(Value::Null)
        }
        fn put(&self, _url: &str, _body: &Value) -> Result<Value, NetError> {
            Ok(Value::Null)
        }
        fn delete(&self, _url: &str) -> Result<Value, NetError> {
            Ok(Value::Null)
        }
    }

    fn stub_net(registry: &mut Registry, payload: Value) {
        registry.capability_table_mut().install(
            "net",
            Box::new(move |_| CapabilityObject::Net(Rc::new(StubFetch {
                payload: payload.clone(),
            }))),
        );
    }

    /// The reference component: fetches on connect, then re-renders.
    struct Index;

    impl Component for Index {
        fn connected(&mut self, cx: &mut Context<'_>) -> Result<(), HookError> {
            let Some(net) = cx.net() else {
                return Ok(());
            };
            let fetched = net.get("/api/sample.json")?;
            let properties = cx.properties().clone();
            properties.set("title", fetched.get("title").cloned().unwrap_or(Value::Null))?;
            properties.set("description", json!("desc"))?;
            properties.set(
                "items",
                fetched.get("items").cloned().unwrap_or_else(|| json!([])),
            )?;
            cx.request_render();
            Ok(())
        }

        fn render(&self, cx: &RenderContext<'_>) -> String {
            format!(
                "<div><h1 {}>{}</h1><p><span>{}</span> and <span>{}</span></p><p>{}</p><ul {}></ul></div>",
                cx.target_attr("title"),
                cx.text("title"),
                cx.text("subject"),
                cx.text("object"),
                cx.text("description"),
                cx.target_attr("items"),
            )
        }
    }

    /// Renders its observed attribute into a dedicated target span.
    struct TargetDemo;

    impl Component for TargetDemo {
        fn render(&self, cx: &RenderContext<'_>) -> String {
            format!(
                "<div><span {}>{}</span></div>",
                cx.target_attr("subject"),
                cx.text("subject"),
            )
        }
    }

    struct Clicky;

    impl Component for Clicky {
        fn connected(&mut self, cx: &mut Context<'_>) -> Result<(), HookError> {
            cx.dispatch_click();
            Ok(())
        }
        fn render(&self, cx: &RenderContext<'_>) -> String {
            format!("<div>{}</div>", cx.uuid())
        }
    }

    fn index_runtime(payload: Value) -> Runtime {
        let mut registry = Registry::new(AppConfig::default());
        stub_net(&mut registry, payload);
        registry
            .define(
                "wc-index",
                Definition::new(|| Index)
                    .observe(["subject", "object"])
                    .capabilities(CapabilitySet::NET),
            )
            .unwrap();
        Runtime::new(registry)
    }

    #[test]
    fn end_to_end_attributes_connect_fetch_render() {
        let mut runtime = index_runtime(json!({"title": "T", "items": []}));
        let host = runtime.create("wc-index").unwrap();

        runtime.set_attribute(host, "subject", "Alice").unwrap();
        runtime.set_attribute(host, "object", "Bob").unwrap();
        let body = runtime.body();
        runtime.connect(host, body).unwrap();

        let markup = runtime.dom().borrow().inner_markup(host);
        assert!(markup.contains("Alice"));
        assert!(markup.contains("Bob"));
        assert!(markup.contains(">T</h1>"));
        assert_eq!(runtime.stage(host), Some(Stage::Connected));
    }

    #[test]
    fn first_render_pass_happens_at_construction() {
        let mut runtime = index_runtime(json!({}));
        let host = runtime.create("wc-index").unwrap();
        let markup = runtime.dom().borrow().inner_markup(host);
        assert!(markup.contains("<h1"));
    }

    #[test]
    fn render_is_idempotent() {
        let mut runtime = index_runtime(json!({"title": "T", "items": []}));
        let host = runtime.create("wc-index").unwrap();
        let body = runtime.body();
        runtime.connect(host, body).unwrap();

        let first = runtime.dom().borrow().inner_markup(host);
        runtime.render(host);
        let second = runtime.dom().borrow().inner_markup(host);
        assert_eq!(first, second);
    }

    #[test]
    fn observed_attribute_binds_and_emits() {
        let mut runtime = index_runtime(json!({}));
        let host = runtime.create("wc-index").unwrap();

        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_clone = seen.clone();
        runtime.events(host).unwrap().subscribe(move |event| {
            seen_clone.borrow_mut().push(event.clone());
        });

        runtime.set_attribute(host, "subject", "Alice").unwrap();
        assert_eq!(
            runtime.attributes(host).unwrap().get("subject"),
            Some(json!("Alice"))
        );
        assert!(seen.borrow().contains(&ElementEvent::AttributeChanged {
            name: "subject".into()
        }));
    }

    #[test]
    fn unobserved_attribute_is_ignored() {
        let mut runtime = index_runtime(json!({}));
        let host = runtime.create("wc-index").unwrap();

        runtime.set_attribute(host, "lang", "ko").unwrap();
        assert_eq!(runtime.attributes(host).unwrap().get("lang"), None);
        // the raw DOM attribute is still written
        assert_eq!(
            runtime.dom().borrow().attribute(host, "lang"),
            Some("ko")
        );
    }

    #[test]
    fn attribute_change_rerenders_its_target_only() {
        let mut registry = Registry::new(AppConfig::default());
        registry
            .define(
                "wc-target",
                Definition::new(|| TargetDemo).observe(["subject"]),
            )
            .unwrap();
        let mut runtime = Runtime::new(registry);
        let host = runtime.create("wc-target").unwrap();

        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_clone = seen.clone();
        runtime.events(host).unwrap().subscribe(move |event| {
            seen_clone.borrow_mut().push(event.clone());
        });

        runtime.set_attribute(host, "subject", "Alice").unwrap();
        let markup = runtime.dom().borrow().inner_markup(host);
        assert!(markup.contains(">Alice</span>"));
        assert!(seen.borrow().contains(&ElementEvent::TargetRendered {
            key: "subject".into()
        }));
    }

    #[test]
    fn missing_target_is_a_silent_no_op() {
        let mut runtime = index_runtime(json!({}));
        let host = runtime.create("wc-index").unwrap();

        let before = runtime.dom().borrow().inner_markup(host);
        // `subject` has no dedicated target node in Index's markup
        runtime.set_attribute(host, "subject", "Alice").unwrap();
        let after = runtime.dom().borrow().inner_markup(host);
        assert_eq!(before, after);
    }

    #[test]
    fn items_property_renders_as_list() {
        let mut runtime = index_runtime(json!({"title": "T", "items": []}));
        let host = runtime.create("wc-index").unwrap();
        let body = runtime.body();
        runtime.connect(host, body).unwrap();

        let properties = runtime.properties(host).unwrap();
        properties.set("items", json!(["one", "two"])).unwrap();

        let markup = runtime.dom().borrow().inner_markup(host);
        assert!(markup.contains("<li>one</li><li>two</li>"));

        // array-index assignment re-renders the same container
        properties.set("items.1", json!("zwei")).unwrap();
        let markup = runtime.dom().borrow().inner_markup(host);
        assert!(markup.contains("<li>one</li><li>zwei</li>"));
    }

    #[test]
    fn disconnect_clears_content_and_is_terminal() {
        let mut runtime = index_runtime(json!({"title": "T", "items": []}));
        let host = runtime.create("wc-index").unwrap();
        let body = runtime.body();
        runtime.connect(host, body).unwrap();
        runtime.disconnect(host).unwrap();

        assert_eq!(runtime.stage(host), Some(Stage::Disconnected));
        assert!(runtime.dom().borrow().inner_markup(host).is_empty());
        assert!(runtime.dom().borrow().inner_markup(body).is_empty());

        // terminal: re-connecting is a no-op
        runtime.connect(host, body).unwrap();
        assert_eq!(runtime.stage(host), Some(Stage::Disconnected));

        // attributeChanged stays re-entrant in any state; the binding lands
        // in the store and renders nowhere
        runtime.set_attribute(host, "subject", "late").unwrap();
        assert_eq!(
            runtime.attributes(host).unwrap().get("subject"),
            Some(json!("late"))
        );
        assert!(runtime.dom().borrow().inner_markup(host).is_empty());
    }

    #[test]
    fn late_property_write_after_disconnect_is_silent() {
        let mut runtime = index_runtime(json!({"title": "T", "items": []}));
        let host = runtime.create("wc-index").unwrap();
        let body = runtime.body();
        runtime.connect(host, body).unwrap();

        // component logic captured the store before disconnect
        let properties = runtime.properties(host).unwrap();
        runtime.disconnect(host).unwrap();

        // the write lands in the store, renders nowhere, and panics nowhere
        properties.set("title", json!("too late")).unwrap();
        assert_eq!(properties.get("title"), Some(json!("too late")));
        assert!(runtime.dom().borrow().inner_markup(host).is_empty());
    }

    #[test]
    fn adopt_emits_and_nothing_else() {
        let mut runtime = index_runtime(json!({}));
        let host = runtime.create("wc-index").unwrap();

        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_clone = seen.clone();
        runtime.events(host).unwrap().subscribe(move |event| {
            seen_clone.borrow_mut().push(event.clone());
        });

        let before = runtime.dom().borrow().inner_markup(host);
        runtime.adopt(host);
        assert_eq!(*seen.borrow(), vec![ElementEvent::Adopted]);
        assert_eq!(runtime.dom().borrow().inner_markup(host), before);
    }

    #[test]
    fn duplicate_tag_is_rejected() {
        let mut registry = Registry::new(AppConfig::default());
        registry
            .define("wc-index", Definition::new(|| Index))
            .unwrap();
        assert!(matches!(
            registry.define("wc-index", Definition::new(|| Index)),
            Err(ElementError::DuplicateTag(_))
        ));
    }

    #[test]
    fn unknown_tag_is_rejected() {
        let registry = Registry::new(AppConfig::default());
        let mut runtime = Runtime::new(registry);
        assert!(matches!(
            runtime.create("wc-nope"),
            Err(ElementError::UnknownTag(_))
        ));
    }

    #[test]
    fn component_without_net_capability_sees_none() {
        let mut registry = Registry::new(AppConfig::default());
        stub_net(&mut registry, json!({"title": "T"}));
        // NET deliberately not granted
        registry
            .define("wc-index", Definition::new(|| Index).observe(["subject"]))
            .unwrap();
        let mut runtime = Runtime::new(registry);
        let host = runtime.create("wc-index").unwrap();
        let body = runtime.body();
        runtime.connect(host, body).unwrap();

        // connected() bailed before fetching
        assert_eq!(runtime.properties(host).unwrap().get("title"), None);
    }

    #[test]
    fn click_reaches_runtime_listeners() {
        let mut registry = Registry::new(AppConfig::default());
        registry
            .define("wc-clicky", Definition::new(|| Clicky))
            .unwrap();
        let mut runtime = Runtime::new(registry);

        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_clone = seen.clone();
        runtime.on_click(move |event| {
            seen_clone.borrow_mut().push(event.clone());
        });

        let host = runtime.create("wc-clicky").unwrap();
        let body = runtime.body();
        runtime.connect(host, body).unwrap();

        let uuid = runtime.uuid(host).unwrap();
        assert_eq!(*seen.borrow(), vec![ElementEvent::Clicked { uuid }]);
    }

    #[test]
    fn stage_transitions_are_observable() {
        let mut runtime = index_runtime(json!({}));
        let host = runtime.create("wc-index").unwrap();

        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_clone = seen.clone();
        runtime.stage_signal(host).unwrap().subscribe(move |stage| {
            seen_clone.borrow_mut().push(*stage);
        });

        let body = runtime.body();
        runtime.connect(host, body).unwrap();
        runtime.disconnect(host).unwrap();
        assert_eq!(*seen.borrow(), vec![Stage::Connected, Stage::Disconnected]);
    }

    #[test]
    fn instance_ids_are_namespaced_and_unique() {
        let mut runtime = index_runtime(json!({}));
        let a = runtime.create("wc-index").unwrap();
        let b = runtime.create("wc-index").unwrap();

        let ua = runtime.uuid(a).unwrap();
        let ub = runtime.uuid(b).unwrap();
        assert!(ua.starts_with("wc-"));
        assert_ne!(ua, ub);
    }
}
