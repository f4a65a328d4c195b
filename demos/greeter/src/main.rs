use std::rc::Rc;

use anyhow::Result;
use serde_json::{Value, json};
use trellis_element::prelude::*;

/// Canned sample payload, so the demo runs offline. Swap the `net`
/// installer back to the default to hit a real endpoint.
struct SampleApi;

impl Fetch for SampleApi {
    fn get(&self, _url: &str) -> Result<Value, NetError> {
        Ok(json!({
            "title": "Trellis",
            "items": ["alpha", "beta", "gamma"],
        }))
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

struct Greeter;

impl Component for Greeter {
    fn connected(&mut self, cx: &mut Context<'_>) -> Result<(), HookError> {
        let Some(net) = cx.net() else {
            return Ok(());
        };

        let fetched = net.get("/api/sample.json")?;
        cx.debug("fetched sample payload");

        let properties = cx.properties().clone();
        properties.set("title", fetched.get("title").cloned().unwrap_or(Value::Null))?;
        properties.set(
            "items",
            fetched.get("items").cloned().unwrap_or_else(|| json!([])),
        )?;

        if let Some(cookies) = cx.cookies() {
            cookies.set("greeted", "yes", 0);
        }

        cx.request_render();
        Ok(())
    }

    fn render(&self, cx: &RenderContext<'_>) -> String {
        let items = match cx.model().value("items") {
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| format!("<li>{}</li>", value_text(item)))
                .collect::<String>(),
            _ => String::new(),
        };

        format!(
            "<div>\
             <h1 {}>{}</h1>\
             <p><span {}>{}</span> greets <span {}>{}</span></p>\
             <ul {}>{}</ul>\
             </div>",
            cx.target_attr("title"),
            cx.text("title"),
            cx.target_attr("subject"),
            cx.text("subject"),
            cx.target_attr("object"),
            cx.text("object"),
            cx.target_attr("items"),
            items,
        )
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let config = AppConfig {
        name: "greeter".into(),
        ..AppConfig::default()
    };

    let mut registry = Registry::new(config);
    registry
        .capability_table_mut()
        .install("net", Box::new(|_| CapabilityObject::Net(Rc::new(SampleApi))));
    registry.define(
        "wc-greeter",
        Definition::new(|| Greeter)
            .observe(["subject", "object"])
            .capabilities(CapabilitySet::NET | CapabilitySet::COOKIE),
    )?;

    let mut runtime = Runtime::new(registry);
    let host = runtime.create("wc-greeter")?;
    runtime.set_attribute(host, "subject", "Alice")?;
    runtime.set_attribute(host, "object", "Bob")?;
    runtime.connect(host, runtime.body())?;

    log::info!("connected");
    println!("{}", runtime.dom().borrow().outer_markup(host));

    // attribute mutations re-render only their target span
    runtime.set_attribute(host, "subject", "Carol")?;
    println!("{}", runtime.dom().borrow().outer_markup(host));

    runtime.disconnect(host)?;
    log::info!("disconnected, body is empty again");
    Ok(())
}
