use super::types::InputEvent;

/// Events collected by one `poll_event` call, in arrival order.
#[derive(Debug, Default)]
pub struct InputFrame {
    pub events: Vec<InputEvent>,
}

impl InputFrame {
    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn push_event(&mut self, ev: InputEvent) {
        self.events.push(ev);
    }

    /// True if any collected event asks the application to stop.
    pub fn stop_requested(&self) -> bool {
        self.events.iter().any(InputEvent::is_stop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Key, KeyState};

    fn key(key: Key, state: KeyState) -> InputEvent {
        InputEvent::Key { key, state, repeat: false }
    }

    #[test]
    fn empty_frame_continues() {
        assert!(!InputFrame::default().stop_requested());
    }

    #[test]
    fn close_request_stops() {
        let mut frame = InputFrame::default();
        frame.push_event(key(Key::Unknown(7), KeyState::Pressed));
        frame.push_event(InputEvent::CloseRequested);
        assert!(frame.stop_requested());
    }

    #[test]
    fn escape_press_stops_but_release_does_not() {
        let mut frame = InputFrame::default();
        frame.push_event(key(Key::Escape, KeyState::Released));
        frame.push_event(key(Key::Unknown(44), KeyState::Pressed));
        assert!(!frame.stop_requested());

        frame.push_event(key(Key::Escape, KeyState::Pressed));
        assert!(frame.stop_requested());

        frame.clear();
        assert!(!frame.stop_requested());
    }
}
