pub use trellis_core::{
    Change, ChangeKind, Scope, Signal, Store, SubId, bind, escape, parse_attribute, signal,
    to_attribute, to_camel_case, unescape, value_text,
};
pub use trellis_dom::{Dom, DomError, NodeKey};
pub use trellis_net::{Clock, CookieJar, Fetch, HttpClient, NetError};

pub use crate::capability::{
    Capabilities, CapabilityObject, CapabilitySet, CapabilityTable, Installer,
};
pub use crate::component::{Component, Context, Model, RenderContext};
pub use crate::config::{AppConfig, CookieConfig, NetConfig};
pub use crate::error::{ElementError, HookError};
pub use crate::events::{ElementEvent, EventBus};
pub use crate::registry::{ComponentFactory, Definition, Registry};
pub use crate::render::{target_attr, target_id};
pub use crate::runtime::{Runtime, Stage};
