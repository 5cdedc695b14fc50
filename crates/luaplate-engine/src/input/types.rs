/// Keyboard key identifier.
///
/// Escape is the only key the canvas reacts to; every other key carries its
/// platform key code.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,
    Unknown(u32),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// Platform-agnostic window/input events.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// The user asked to close the window.
    CloseRequested,

    Key {
        key: Key,
        state: KeyState,
        /// True when event is a key-repeat.
        repeat: bool,
    },
}

impl InputEvent {
    /// Close requests and Escape presses end the frame loop.
    pub fn is_stop(&self) -> bool {
        matches!(
            self,
            InputEvent::CloseRequested
                | InputEvent::Key { key: Key::Escape, state: KeyState::Pressed, .. }
        )
    }
}
