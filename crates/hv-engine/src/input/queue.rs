/// Pending events a fresh queue has room for without reallocating.
const INITIAL_CAPACITY: usize = 16;

/// Browser input, as delivered by the front-end.
/// Key codes are DOM `keyCode` values; pointer positions are screen pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown { x: f32, y: f32 },
    KeyDown { key_code: u32 },
    KeyUp { key_code: u32 },
}

/// Events collected between two frames, in arrival order.
#[derive(Debug, Default)]
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(INITIAL_CAPACITY),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
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

impl FromIterator<InputEvent> for InputQueue {
    fn from_iter<I: IntoIterator<Item = InputEvent>>(iter: I) -> Self {
        Self {
            events: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iter_keeps_arrival_order() {
        let q: InputQueue = [
            InputEvent::KeyDown { key_code: 65 },
            InputEvent::KeyUp { key_code: 65 },
        ]
        .into_iter()
        .collect();
        let events: Vec<_> = q.iter().copied().collect();
        assert_eq!(events, [InputEvent::KeyDown { key_code: 65 }, InputEvent::KeyUp { key_code: 65 }]);
    }

    #[test]
    fn clear_empties_queue() {
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerDown { x: 10.0, y: 20.0 });
        q.push(InputEvent::KeyDown { key_code: 69 });
        assert_eq!(q.len(), 2);
        q.clear();
        assert!(q.is_empty());
    }
}
