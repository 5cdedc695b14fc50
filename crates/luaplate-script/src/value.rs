//! Conversions between Lua values and the scalar types native code uses.
//!
//! Two read policies exist side by side:
//! - strict (`FromStack::from_value`): the Lua type must match, otherwise `None`
//! - permissive (`FromStack::coerce`): Lua's own coercion rules, falling back to
//!   the type's zero value (`false`, `0`, `0.0`, `""`)

use mlua::{Lua, Value};

/// A native type readable from the value stack.
pub trait FromStack: Sized {
    /// Lua-side name used in mismatch diagnostics.
    const TYPE_NAME: &'static str;

    /// Strict conversion. `None` when `value` is not of a matching Lua type.
    fn from_value(value: &Value) -> Option<Self>;

    /// Permissive conversion following Lua's `to*` semantics.
    fn coerce(lua: &Lua, value: &Value) -> Self;
}

/// A native type that can be pushed onto the value stack.
pub trait IntoStack {
    fn into_value(self, lua: &Lua) -> mlua::Result<Value>;
}

// ── numbers ───────────────────────────────────────────────────────────────

fn strict_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Integer(i) => Some(*i),
        // Integral floats (e.g. `2^3`) are accepted as integers.
        Value::Number(n) if n.fract() == 0.0 && *n >= i64::MIN as f64 && *n < i64::MAX as f64 => {
            Some(*n as i64)
        }
        _ => None,
    }
}

fn strict_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => Some(*n),
        Value::Integer(i) => Some(*i as f64),
        _ => None,
    }
}

fn coerce_i64(lua: &Lua, value: &Value) -> i64 {
    match value {
        Value::Integer(i) => *i,
        Value::Number(n) => *n as i64,
        other => lua
            .coerce_number(other.clone())
            .ok()
            .flatten()
            .map_or(0, |n| n as i64),
    }
}

fn coerce_f64(lua: &Lua, value: &Value) -> f64 {
    match value {
        Value::Number(n) => *n,
        Value::Integer(i) => *i as f64,
        other => lua.coerce_number(other.clone()).ok().flatten().unwrap_or(0.0),
    }
}

impl FromStack for i64 {
    const TYPE_NAME: &'static str = "integer";

    fn from_value(value: &Value) -> Option<Self> {
        strict_i64(value)
    }

    fn coerce(lua: &Lua, value: &Value) -> Self {
        coerce_i64(lua, value)
    }
}

impl FromStack for i32 {
    const TYPE_NAME: &'static str = "integer";

    fn from_value(value: &Value) -> Option<Self> {
        strict_i64(value).and_then(|i| i32::try_from(i).ok())
    }

    /// Out-of-range values wrap, like a C narrowing cast.
    fn coerce(lua: &Lua, value: &Value) -> Self {
        coerce_i64(lua, value) as i32
    }
}

impl FromStack for f64 {
    const TYPE_NAME: &'static str = "number";

    fn from_value(value: &Value) -> Option<Self> {
        strict_f64(value)
    }

    fn coerce(lua: &Lua, value: &Value) -> Self {
        coerce_f64(lua, value)
    }
}

impl FromStack for f32 {
    const TYPE_NAME: &'static str = "number";

    fn from_value(value: &Value) -> Option<Self> {
        strict_f64(value).map(|n| n as f32)
    }

    fn coerce(lua: &Lua, value: &Value) -> Self {
        coerce_f64(lua, value) as f32
    }
}

// ── booleans & strings ────────────────────────────────────────────────────

impl FromStack for bool {
    const TYPE_NAME: &'static str = "boolean";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Only `nil` and `false` are falsy.
    fn coerce(_lua: &Lua, value: &Value) -> Self {
        !matches!(value, Value::Nil | Value::Boolean(false))
    }
}

impl FromStack for String {
    const TYPE_NAME: &'static str = "string";

    /// Invalid UTF-8 is replaced, so any Lua string reads as a string.
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(s.to_string_lossy()),
            _ => None,
        }
    }

    /// Numbers are formatted the way Lua's `tostring` would.
    fn coerce(lua: &Lua, value: &Value) -> Self {
        lua.coerce_string(value.clone())
            .ok()
            .flatten()
            .map(|s| s.to_string_lossy())
            .unwrap_or_default()
    }
}

// ── pushes ────────────────────────────────────────────────────────────────

impl IntoStack for bool {
    fn into_value(self, _lua: &Lua) -> mlua::Result<Value> {
        Ok(Value::Boolean(self))
    }
}

impl IntoStack for i32 {
    fn into_value(self, _lua: &Lua) -> mlua::Result<Value> {
        Ok(Value::Integer(i64::from(self)))
    }
}

impl IntoStack for i64 {
    fn into_value(self, _lua: &Lua) -> mlua::Result<Value> {
        Ok(Value::Integer(self))
    }
}

impl IntoStack for f32 {
    fn into_value(self, _lua: &Lua) -> mlua::Result<Value> {
        Ok(Value::Number(f64::from(self)))
    }
}

impl IntoStack for f64 {
    fn into_value(self, _lua: &Lua) -> mlua::Result<Value> {
        Ok(Value::Number(self))
    }
}

impl IntoStack for &str {
    fn into_value(self, lua: &Lua) -> mlua::Result<Value> {
        lua.create_string(self).map(Value::String)
    }
}

impl IntoStack for String {
    fn into_value(self, lua: &Lua) -> mlua::Result<Value> {
        lua.create_string(&self).map(Value::String)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(lua: &Lua, text: &str) -> Value {
        Value::String(lua.create_string(text).unwrap())
    }

    #[test]
    fn strict_integer_accepts_integral_floats() {
        assert_eq!(i64::from_value(&Value::Integer(7)), Some(7));
        assert_eq!(i64::from_value(&Value::Number(8.0)), Some(8));
        assert_eq!(i64::from_value(&Value::Number(8.5)), None);
        assert_eq!(i64::from_value(&Value::Nil), None);
    }

    #[test]
    fn strict_string_accepts_invalid_utf8() {
        let lua = Lua::new();
        let raw = Value::String(lua.create_string([0xff, b'a']).unwrap());
        assert_eq!(String::from_value(&raw), Some("\u{FFFD}a".to_owned()));
    }

    #[test]
    fn strict_i32_rejects_out_of_range() {
        assert_eq!(i32::from_value(&Value::Integer(1 << 40)), None);
        assert_eq!(i32::from_value(&Value::Integer(-5)), Some(-5));
    }

    #[test]
    fn coerce_numbers_follows_lua_rules() {
        let lua = Lua::new();
        assert_eq!(i32::coerce(&lua, &Value::Number(3.7)), 3);
        assert_eq!(i32::coerce(&lua, &s(&lua, "42")), 42);
        assert_eq!(i64::coerce(&lua, &s(&lua, "0x10")), 16);
        assert_eq!(f64::coerce(&lua, &s(&lua, " 2.5 ")), 2.5);
        assert_eq!(i32::coerce(&lua, &s(&lua, "nope")), 0);
        assert_eq!(f32::coerce(&lua, &Value::Boolean(true)), 0.0);
        assert_eq!(i64::coerce(&lua, &Value::Nil), 0);
    }

    #[test]
    fn coerce_bool_only_nil_and_false_are_falsy() {
        let lua = Lua::new();
        assert!(!bool::coerce(&lua, &Value::Nil));
        assert!(!bool::coerce(&lua, &Value::Boolean(false)));
        assert!(bool::coerce(&lua, &Value::Integer(0)));
        assert!(bool::coerce(&lua, &s(&lua, "")));
    }

    #[test]
    fn coerce_string_formats_numbers() {
        let lua = Lua::new();
        assert_eq!(String::coerce(&lua, &Value::Integer(10)), "10");
        assert_eq!(String::coerce(&lua, &s(&lua, "hi")), "hi");
        assert_eq!(String::coerce(&lua, &Value::Boolean(true)), "");
        assert_eq!(String::from_value(&Value::Integer(10)), None);
    }

    #[test]
    fn pushes_keep_integer_and_float_apart() {
        let lua = Lua::new();
        assert!(matches!(3i32.into_value(&lua).unwrap(), Value::Integer(3)));
        assert!(matches!(1.5f32.into_value(&lua).unwrap(), Value::Number(n) if n == 1.5));
        let v = "abc".into_value(&lua).unwrap();
        assert_eq!(String::from_value(&v).as_deref(), Some("abc"));
    }
}
