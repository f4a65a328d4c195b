use std::cell::RefCell;
use std::rc::Rc;

use trellis_core::SubId;

/// Lifecycle notifications, dispatched synchronously to instance listeners.
/// `Clicked` additionally fans out to runtime-level listeners, the analog of
/// a document-level event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ElementEvent {
    AttributeChanged { name: String },
    Connected,
    Disconnected,
    Adopted,
    Rendered,
    TargetRendered { key: String },
    Clicked { uuid: String },
}

#[derive(Clone, Default)]
pub struct EventBus(Rc<RefCell<Vec<Option<Rc<dyn Fn(&ElementEvent)>>>>>);

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, f: impl Fn(&ElementEvent) + 'static) -> SubId {
        let mut subs = self.0.borrow_mut();
        subs.push(Some(Rc::new(f)));
        subs.len() - 1
    }

    pub fn unsubscribe(&self, id: SubId) {
        if let Some(slot) = self.0.borrow_mut().get_mut(id) {
            *slot = None;
        }
    }

    pub fn emit(&self, event: &ElementEvent) {
        let subs: Vec<_> = self.0.borrow().iter().flatten().cloned().collect();
        for s in subs {
            s(event);
        }
    }
}
