use crate::grid::Position;

/// Everything the simulation tells its host about.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SnakeEvent {
    ScoreIncrement,
    RoundOver,
    /// A new tail segment exists and needs something to draw it.
    SegmentAdded(Position),
    HeadMoved { position: Position, angle: f32 },
}

/// Receives simulation events. Handed to the simulation when it is built.
pub trait SnakeHost {
    fn on_event(&mut self, event: SnakeEvent);
}

/// Records events in order, handy for hosts that drain them once per frame.
impl SnakeHost for Vec<SnakeEvent> {
    fn on_event(&mut self, event: SnakeEvent) {
        self.push(event);
    }
}

impl<F> SnakeHost for F
where
    F: FnMut(SnakeEvent),
{
    fn on_event(&mut self, event: SnakeEvent) {
        self(event)
    }
}
