use mlua::{Lua, MetaMethod, MultiValue, UserData, UserDataMethods};

use crate::error::ScriptError;
use crate::stack::Stack;

/// Native function signature: reads arguments from the stack, pushes results and
/// returns how many of the pushed values are results.
pub type Callback = dyn Fn(&mut Stack<'_>) -> Result<usize, ScriptError>;

/// A native closure stored inside a Lua userdata value.
///
/// Lua calls it through the `__call` metamethod. The userdata is the first
/// `__call` argument and is split off before the stack is built, so the closure
/// only ever sees its own arguments. The closure is dropped together with the
/// userdata: when the global is rebound and collected, or when the interpreter
/// is closed.
pub(crate) struct NativeCallback {
    name: String,
    callback: Box<Callback>,
}

impl NativeCallback {
    pub(crate) fn new(name: impl Into<String>, callback: Box<Callback>) -> Self {
        Self {
            name: name.into(),
            callback,
        }
    }

    fn invoke(&self, lua: &Lua, args: MultiValue) -> mlua::Result<MultiValue> {
        let mut stack = Stack::new(lua, args);
        let count = (self.callback)(&mut stack)
            .map_err(|err| mlua::Error::RuntimeError(format!("{}: {err}", self.name)))?;
        Ok(stack.into_results(count))
    }
}

impl UserData for NativeCallback {
    fn add_methods<M: UserDataMethods<Self>>(methods: &mut M) {
        methods.add_meta_method(MetaMethod::Call, |lua, this, args: MultiValue| {
            this.invoke(lua, args)
        });
        methods.add_meta_method(MetaMethod::ToString, |_, this, ()| {
            Ok(format!("native function: {}", this.name))
        });
    }
}

impl Drop for NativeCallback {
    fn drop(&mut self) {
        log::trace!("released native callback `{}`", self.name);
    }
}
