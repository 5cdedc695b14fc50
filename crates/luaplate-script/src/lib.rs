//! Lua script host for **LuaPlate**.
//!
//! This crate has no window or GPU dependencies so the bridge can be used and
//! tested headless.
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`host`] | `ScriptHost`: load, run, register, call, package path |
//! | [`stack`] | `Stack`: arguments and results of one native call |
//! | [`value`] | `FromStack` / `IntoStack` conversions |
//! | [`error`] | `ScriptError`, `StackError` |
//!
//! # Quick start
//!
//! ```rust
//! use luaplate_script::ScriptHost;
//!
//! let host = ScriptHost::from_source("demo", "function double(x) return x * 2 end").unwrap();
//! host.register_function("answer", |stack| {
//!     stack.push(42)?;
//!     Ok(1)
//! }).unwrap();
//! host.run().unwrap();
//!
//! assert_eq!(host.call_function_for::<i64>("double", 21).unwrap(), Some(42));
//! ```

mod callback;

pub mod error;
pub mod host;
pub mod stack;
pub mod value;

pub use callback::Callback;
pub use error::{ScriptError, StackError};
pub use host::ScriptHost;
pub use stack::Stack;
pub use value::{FromStack, IntoStack};
