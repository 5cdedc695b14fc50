use mlua::{Lua, MultiValue, Value};

use crate::error::{ScriptError, StackError};
use crate::value::{FromStack, IntoStack};

/// Value stack of a single native call.
///
/// Holds exactly the arguments the script passed, followed by any values the
/// callback pushes. Indices are 1-based from the bottom; negative indices count
/// from the top (`-1` is the topmost value). Index `0` never refers to a value.
pub struct Stack<'a> {
    lua: &'a Lua,
    values: Vec<Value>,
}

impl<'a> Stack<'a> {
    pub(crate) fn new(lua: &'a Lua, args: MultiValue) -> Self {
        Self {
            lua,
            values: args.into_iter().collect(),
        }
    }

    /// Number of values currently on the stack.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Reads the value at `index`, requiring a matching Lua type.
    pub fn get<T: FromStack>(&self, index: i32) -> Result<T, StackError> {
        let value = self.slot(index).ok_or(StackError::Missing { index })?;
        T::from_value(value).ok_or_else(|| StackError::TypeMismatch {
            index,
            expected: T::TYPE_NAME,
            found: value.type_name(),
        })
    }

    /// Reads the value at `index` with Lua coercion.
    ///
    /// A missing slot or an unconvertible value yields the type's zero value.
    pub fn value<T: FromStack>(&self, index: i32) -> T {
        match self.slot(index) {
            Some(value) => T::coerce(self.lua, value),
            None => T::coerce(self.lua, &Value::Nil),
        }
    }

    /// Reads the topmost value, requiring a matching Lua type.
    #[inline]
    pub fn top<T: FromStack>(&self) -> Result<T, StackError> {
        self.get(-1)
    }

    /// Pushes a value on top of the stack.
    pub fn push<T: IntoStack>(&mut self, value: T) -> Result<(), ScriptError> {
        let value = value.into_value(self.lua)?;
        self.values.push(value);
        Ok(())
    }

    /// Consumes the stack, keeping the `count` topmost values as call results.
    pub(crate) fn into_results(mut self, count: usize) -> MultiValue {
        let start = self.values.len().saturating_sub(count);
        self.values.drain(start..).collect()
    }

    fn slot(&self, index: i32) -> Option<&Value> {
        let len = self.values.len() as i64;
        let pos = match i64::from(index) {
            0 => return None,
            i if i > 0 => i - 1,
            i => len + i,
        };
        if pos < 0 || pos >= len {
            return None;
        }
        self.values.get(pos as usize)
    }
}
