pub mod bus;
pub mod events;

// Re-export the essential types
pub use bus::{EventBus, Handler};
pub use events::{Direction, EventHandled, EventKind, FeatureClick, StepEvent, StoryEvent};
