use super::events::{EventHandled, EventKind, StoryEvent};
use crate::Result;

/// Handler invoked with the shared context and the event
pub type Handler<C> = Box<dyn FnMut(&mut C, &StoryEvent) -> Result<EventHandled>>;

/// Typed subscriptions over the closed set of story events.
///
/// Handlers for the same kind run in registration order. The first error
/// stops dispatch of that event and is returned to the caller.
pub struct EventBus<C> {
    handlers: Vec<(EventKind, Handler<C>)>,
}

impl<C> EventBus<C> {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    pub fn subscribe<F>(&mut self, kind: EventKind, handler: F)
    where
        F: FnMut(&mut C, &StoryEvent) -> Result<EventHandled> + 'static,
    {
        self.handlers.push((kind, Box::new(handler)));
    }

    pub fn dispatch(&mut self, context: &mut C, event: &StoryEvent) -> Result<EventHandled> {
        let kind = event.kind();
        let mut handled = EventHandled::NotHandled;

        for (_, handler) in self.handlers.iter_mut().filter(|(k, _)| *k == kind) {
            if (*handler)(context, event)? == EventHandled::Handled {
                handled = EventHandled::Handled;
            }
        }

        Ok(handled)
    }
}

impl<C> Default for EventBus<C> {
    fn default() -> Self {
        Self::new()
    }
}
