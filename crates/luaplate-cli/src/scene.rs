//! Frame loop driving the script hooks.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use luaplate_engine::{Control, Surface};
use luaplate_script::ScriptHost;

pub const SCENE_BEGIN: &str = "scene_begin";
pub const SCENE_UPDATE: &str = "scene_update";
pub const SCENE_END: &str = "scene_end";

/// Quit request shared by the frame loop and the `quit` binding.
#[derive(Debug, Clone, Default)]
pub struct QuitSignal(Rc<Cell<bool>>);

impl QuitSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&self) {
        self.0.set(true);
    }

    pub fn is_requested(&self) -> bool {
        self.0.get()
    }
}

/// Calls optional hooks and reports their failures.
///
/// A failure is logged at `warn` only when its message differs from the
/// previous failure of the same hook, so a hook failing every frame logs once.
#[derive(Default)]
struct HookRunner {
    last_failure: HashMap<&'static str, String>,
}

impl HookRunner {
    fn call(&mut self, host: &ScriptHost, hook: &'static str) {
        match host.call_function(hook, ()) {
            Ok(true) => {}
            Ok(false) => log::trace!("hook `{hook}` not defined"),
            Err(e) => {
                let message = e.to_string();
                if self.record_failure(hook, message) {
                    log::warn!("`{hook}` failed: {e}");
                }
            }
        }
    }

    /// Stores `message` as the latest failure of `hook`; true if it is new.
    fn record_failure(&mut self, hook: &'static str, message: String) -> bool {
        if self.last_failure.get(hook) == Some(&message) {
            return false;
        }
        self.last_failure.insert(hook, message);
        true
    }
}

/// Runs `scene_begin`, the per-frame loop and `scene_end`.
///
/// The loop ends when the surface asks to stop or `quit` is requested; a frame
/// whose update requested quit is still rendered. Returns the number of
/// rendered frames.
pub fn run_scene<S: Surface>(host: &ScriptHost, surface: &RefCell<S>, quit: &QuitSignal) -> u64 {
    let mut hooks = HookRunner::default();
    let mut frames = 0;

    hooks.call(host, SCENE_BEGIN);
    while !quit.is_requested() {
        if surface.borrow_mut().poll_event() == Control::Stop {
            log::debug!("surface requested stop");
            break;
        }
        hooks.call(host, SCENE_UPDATE);
        surface.borrow_mut().render();
        frames += 1;
    }
    hooks.call(host, SCENE_END);

    frames
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bindings;
    use crate::testing::{Op, RecordingSurface};

    fn setup(src: &str, polls: usize) -> (ScriptHost, Rc<RefCell<RecordingSurface>>, QuitSignal) {
        let host = ScriptHost::from_source("scene", src).unwrap();
        let surface = Rc::new(RefCell::new(RecordingSurface::stopping_after(polls)));
        let quit = QuitSignal::new();
        bindings::register(&host, &surface, &quit).unwrap();
        host.run().unwrap();
        (host, surface, quit)
    }

    fn global(host: &ScriptHost, name: &str) -> i64 {
        host.lua().globals().get(name).unwrap()
    }

    #[test]
    fn loop_runs_without_any_hooks() {
        let (host, surface, quit) = setup("", 3);
        assert_eq!(run_scene(&host, &*surface, &quit), 2);
        assert_eq!(
            surface.borrow().ops,
            vec![Op::Poll, Op::Render, Op::Poll, Op::Render, Op::Poll]
        );
    }

    #[test]
    fn failing_update_does_not_stop_the_loop() {
        let src = "updates = 0 function scene_update() updates = updates + 1 error('boom') end";
        let (host, surface, quit) = setup(src, 4);
        assert_eq!(run_scene(&host, &*surface, &quit), 3);
        assert_eq!(global(&host, "updates"), 3);
    }

    #[test]
    fn quit_renders_current_frame_and_ends_once() {
        let src = r#"
            ends = 0
            function scene_update() draw_point(1, 2) quit() end
            function scene_end() ends = ends + 1 end
        "#;
        let (host, surface, quit) = setup(src, 100);
        assert_eq!(run_scene(&host, &*surface, &quit), 1);
        assert!(quit.is_requested());
        assert_eq!(global(&host, "ends"), 1);

        let surface = surface.borrow();
        let ops = &surface.ops;
        assert_eq!(ops.len(), 3);
        assert_eq!(ops[0], Op::Poll);
        assert!(matches!(ops[1], Op::Point(1, 2, _)));
        assert_eq!(ops[2], Op::Render);
    }

    #[test]
    fn begin_runs_before_first_poll_and_end_after_stop() {
        let src = r#"
            function scene_begin() set_title("hello") end
            function scene_end() fill() end
        "#;
        let (host, surface, quit) = setup(src, 1);
        assert_eq!(run_scene(&host, &*surface, &quit), 0);

        let surface = surface.borrow();
        let ops = &surface.ops;
        assert_eq!(ops[0], Op::SetTitle("hello".into()));
        assert_eq!(ops[1], Op::Poll);
        assert!(matches!(ops[2], Op::Fill(_)));
    }

    #[test]
    fn quit_in_begin_skips_the_loop() {
        let (host, surface, quit) = setup("function scene_begin() quit() end", 100);
        assert_eq!(run_scene(&host, &*surface, &quit), 0);
        assert!(surface.borrow().ops.is_empty());
    }

    #[test]
    fn repeated_failures_are_reported_once() {
        let mut hooks = HookRunner::default();
        assert!(hooks.record_failure(SCENE_UPDATE, "boom".into()));
        assert!(!hooks.record_failure(SCENE_UPDATE, "boom".into()));
        assert!(hooks.record_failure(SCENE_END, "boom".into()));
        assert!(hooks.record_failure(SCENE_UPDATE, "other".into()));
        assert!(hooks.record_failure(SCENE_UPDATE, "boom".into()));
    }
}
