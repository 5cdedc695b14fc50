//! Script-visible drawing functions.
//!
//! Arguments are read permissively: missing or mistyped values read as zero,
//! and integers narrow with truncation (channels to `u8`, packed colors to
//! `u32`). Negative sizes clamp to zero.

use std::cell::RefCell;
use std::rc::Rc;

use luaplate_engine::{Rgba, Surface};
use luaplate_script::{ScriptError, ScriptHost, Stack};

use crate::scene::QuitSignal;

/// Installs every drawing global, plus `quit`, into `host`.
pub fn register<S>(host: &ScriptHost, surface: &Rc<RefCell<S>>, quit: &QuitSignal) -> Result<(), ScriptError>
where
    S: Surface + 'static,
{
    bind(host, surface, "set_color", |s, stack| {
        s.set_color(Rgba::from_packed(stack.value::<i64>(1) as u32));
        Ok(0)
    })?;
    bind(host, surface, "set_color_rgba", |s, stack| {
        let [r, g, b, a] = [1, 2, 3, 4].map(|i| stack.value::<i32>(i) as u8);
        s.set_color(Rgba::new(r, g, b, a));
        Ok(0)
    })?;
    bind(host, surface, "set_title", |s, stack| {
        s.set_title(&stack.value::<String>(1));
        Ok(0)
    })?;
    bind(host, surface, "resize", |s, stack| {
        let [w, h] = [1, 2].map(|i| stack.value::<i32>(i).max(0) as u32);
        s.resize(w, h);
        Ok(0)
    })?;
    bind(host, surface, "fill", |s, _| {
        s.fill();
        Ok(0)
    })?;
    bind(host, surface, "draw_point", |s, stack| {
        let [x, y] = ints::<2>(stack);
        s.draw_point(x, y);
        Ok(0)
    })?;
    bind(host, surface, "draw_line", |s, stack| {
        let [x1, y1, x2, y2] = ints::<4>(stack);
        s.draw_line(x1, y1, x2, y2);
        Ok(0)
    })?;
    bind(host, surface, "draw_rect", |s, stack| {
        let [x, y, w, h] = ints::<4>(stack);
        s.draw_rect(x, y, w, h);
        Ok(0)
    })?;
    bind(host, surface, "fill_rect", |s, stack| {
        let [x, y, w, h] = ints::<4>(stack);
        s.fill_rect(x, y, w, h);
        Ok(0)
    })?;
    bind(host, surface, "get_size", |s, stack| {
        let (w, h) = s.size();
        stack.push(i64::from(w))?;
        stack.push(i64::from(h))?;
        Ok(2)
    })?;
    bind(host, surface, "get_color", |s, stack| {
        let c = s.color();
        for channel in [c.r(), c.g(), c.b(), c.a()] {
            stack.push(i32::from(channel))?;
        }
        Ok(4)
    })?;

    let quit = quit.clone();
    host.register_function("quit", move |_| {
        log::debug!("script requested quit");
        quit.request();
        Ok(0)
    })?;

    Ok(())
}

/// Registers `f` as `name`, handing it the borrowed surface.
fn bind<S, F>(host: &ScriptHost, surface: &Rc<RefCell<S>>, name: &str, f: F) -> Result<(), ScriptError>
where
    S: Surface + 'static,
    F: Fn(&mut S, &mut Stack<'_>) -> Result<usize, ScriptError> + 'static,
{
    let surface = Rc::clone(surface);
    host.register_function(name, move |stack| {
        let mut surface = surface
            .try_borrow_mut()
            .map_err(|_| ScriptError::runtime("surface is already in use"))?;
        f(&mut surface, stack)
    })
}

/// Reads the first `N` arguments as integers.
fn ints<const N: usize>(stack: &Stack<'_>) -> [i32; N] {
    std::array::from_fn(|i| stack.value::<i32>(i as i32 + 1))
}
