use serde::{Deserialize, Serialize};

use crate::components::ball::{Ball, BallId};

/// Receives contacts as the simulation resolves them.
///
/// The rules engine listens to decide fouls; hosts listen for sounds and
/// effects. Listeners are combined with tuples: `(&mut rules, &mut queue)`.
pub trait ContactListener {
    /// Two balls touched. Called once per resolved contact, including
    /// contacts whose impulse was skipped because the balls were separating.
    fn ball_contact(&mut self, a: &Ball, b: &Ball);

    /// A ball dropped into a pocket.
    fn ball_pocketed(&mut self, ball: &Ball);

    /// A ball bounced off a rail.
    fn cushion_contact(&mut self, _ball: &Ball) {}
}

/// Ignores everything.
impl ContactListener for () {
    fn ball_contact(&mut self, _a: &Ball, _b: &Ball) {}
    fn ball_pocketed(&mut self, _ball: &Ball) {}
}

impl<T: ContactListener + ?Sized> ContactListener for &mut T {
    fn ball_contact(&mut self, a: &Ball, b: &Ball) {
        (**self).ball_contact(a, b);
    }

    fn ball_pocketed(&mut self, ball: &Ball) {
        (**self).ball_pocketed(ball);
    }

    fn cushion_contact(&mut self, ball: &Ball) {
        (**self).cushion_contact(ball);
    }
}

impl<A: ContactListener, B: ContactListener> ContactListener for (A, B) {
    fn ball_contact(&mut self, a: &Ball, b: &Ball) {
        self.0.ball_contact(a, b);
        self.1.ball_contact(a, b);
    }

    fn ball_pocketed(&mut self, ball: &Ball) {
        self.0.ball_pocketed(ball);
        self.1.ball_pocketed(ball);
    }

    fn cushion_contact(&mut self, ball: &Ball) {
        self.0.cushion_contact(ball);
        self.1.cushion_contact(ball);
    }
}

/// Something that happened on the table during a sub-step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TableEvent {
    BallContact { a: BallId, b: BallId },
    Cushion { ball: BallId },
    Pocketed { ball: BallId },
}

/// A queue of table events.
/// The simulation pushes while stepping; the host drains once per frame.
pub struct EventQueue {
    events: Vec<TableEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(64),
        }
    }

    pub fn push(&mut self, event: TableEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<TableEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &TableEvent> {
        self.events.iter()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactListener for EventQueue {
    fn ball_contact(&mut self, a: &Ball, b: &Ball) {
        self.push(TableEvent::BallContact { a: a.id, b: b.id });
    }

    fn ball_pocketed(&mut self, ball: &Ball) {
        self.push(TableEvent::Pocketed { ball: ball.id });
    }

    fn cushion_contact(&mut self, ball: &Ball) {
        self.push(TableEvent::Cushion { ball: ball.id });
    }
}
