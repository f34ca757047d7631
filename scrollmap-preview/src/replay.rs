//! Turns a list of scene indices into the step events a scrolling reader produces

use scrollmap::{
    recording::{RecordingObserver, RecordingOverlay, RecordingRenderer},
    Direction, StepEvent, StoryApp, StoryEvent,
};

pub type PreviewApp = StoryApp<RecordingRenderer, RecordingObserver, RecordingOverlay>;

/// Step events for moving through `steps` in order. Each move exits the
/// current section and enters the next, in the direction of travel.
pub fn step_events(steps: &[usize]) -> Vec<StoryEvent> {
    let mut events = Vec::with_capacity(steps.len() * 2);
    let mut current: Option<usize> = None;
    for &index in steps {
        let direction = match current {
            Some(previous) if index < previous => Direction::Up,
            _ => Direction::Down,
        };
        if let Some(previous) = current {
            events.push(StoryEvent::StepExit(StepEvent::new(previous, direction)));
        }
        events.push(StoryEvent::StepEnter(StepEvent::new(index, direction)));
        current = Some(index);
    }
    events
}

pub fn replay(app: &mut PreviewApp, steps: &[usize]) -> scrollmap::Result<()> {
    for event in step_events(steps) {
        let entered = match &event {
            StoryEvent::StepEnter(step) => Some(*step),
            _ => None,
        };
        app.dispatch(event)?;
        if let Some(step) = entered {
            log::info!(
                "step {} ({:?}), cover {}",
                step.index,
                step.direction,
                if app.cover().is_visible() { "shown" } else { "hidden" }
            );
        }
    }
    Ok(())
}
