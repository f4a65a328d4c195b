use std::collections::HashMap;
use std::rc::Rc;

use bitflags::bitflags;
use trellis_net::{CookieJar, Fetch, HttpClient};

use crate::config::AppConfig;

bitflags! {
    /// Which capability helpers a component type declares.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
    pub struct CapabilitySet: u8 {
        const NET = 1 << 0;
        const COOKIE = 1 << 1;
    }
}

/// Concrete helpers composed into an instance at construction.
#[derive(Clone, Default)]
pub struct Capabilities {
    pub net: Option<Rc<dyn Fetch>>,
    pub cookie: Option<Rc<CookieJar>>,
}

pub enum CapabilityObject {
    Net(Rc<dyn Fetch>),
    Cookie(Rc<CookieJar>),
}

pub type Installer = Box<dyn Fn(&AppConfig) -> CapabilityObject>;

/// Capability name → installer. The registry seeds the defaults; swapping an
/// installer (a canned-data `Fetch`, say) retargets every instance composed
/// afterwards.
pub struct CapabilityTable {
    installers: HashMap<&'static str, Installer>,
}

impl CapabilityTable {
    pub fn with_defaults() -> Self {
        let mut table = Self {
            installers: HashMap::new(),
        };
        table.install(
            "net",
            Box::new(|config: &AppConfig| {
                CapabilityObject::Net(Rc::new(HttpClient::new(config.net.bearer_token.clone())))
            }),
        );
        table.install(
            "cookie",
            Box::new(|config: &AppConfig| {
                CapabilityObject::Cookie(Rc::new(CookieJar::new(
                    config.cookie.domain.clone(),
                    config.cookie.path.clone(),
                )))
            }),
        );
        table
    }

    pub fn install(&mut self, name: &'static str, installer: Installer) {
        self.installers.insert(name, installer);
    }

    pub fn compose(&self, wanted: CapabilitySet, config: &AppConfig) -> Capabilities {
        let mut caps = Capabilities::default();
        if wanted.contains(CapabilitySet::NET) {
            match self.installers.get("net").map(|install| install(config)) {
                Some(CapabilityObject::Net(net)) => caps.net = Some(net),
                Some(_) => log::warn!("installer `net` built a non-net capability"),
                None => {}
            }
        }
        if wanted.contains(CapabilitySet::COOKIE) {
            match self.installers.get("cookie").map(|install| install(config)) {
                Some(CapabilityObject::Cookie(jar)) => caps.cookie = Some(jar),
                Some(_) => log::warn!("installer `cookie` built a non-cookie capability"),
                None => {}
            }
        }
        caps
    }
}
