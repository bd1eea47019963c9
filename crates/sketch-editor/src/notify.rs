//! Change notification: a payload-free "the drawing changed" signal.
//!
//! Listeners receive a read-only `Scene` of the settled state. Because the
//! view is immutable, a listener cannot mutate the pad and so cannot raise
//! the signal re-entrantly.

use crate::redraw::Scene;

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&Scene<'_>)>;

#[derive(Default)]
pub struct ChangeNotifier {
    listeners: Vec<(ListenerId, Listener)>,
    next_id: u64,
    /// Total number of notifications raised.
    raised: u64,
}

impl std::fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("listeners", &format!("<{} listeners>", self.listeners.len()))
            .field("raised", &self.raised)
            .finish()
    }
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&Scene<'_>) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    /// Deliver one notification to every listener, in subscription order.
    pub fn notify(&mut self, scene: &Scene<'_>) {
        self.raised += 1;
        for (_, listener) in &mut self.listeners {
            listener(scene);
        }
    }

    pub fn raised(&self) -> u64 {
        self.raised
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}
