use std::fs;
use std::path::Path;

use mlua::{Function, IntoLuaMulti, Lua, MultiValue, Table, Value};

use crate::callback::NativeCallback;
use crate::error::{ScriptError, StackError};
use crate::stack::Stack;
use crate::value::FromStack;

/// Owns one Lua interpreter and the compiled main chunk of one script.
///
/// A host only exists in the loaded state: construction compiles the script,
/// dropping the host closes the interpreter (and releases every registered
/// callback with it).
pub struct ScriptHost {
    // Declared before `lua` so the chunk handle is released first.
    chunk: Function,
    lua: Lua,
}

impl ScriptHost {
    /// Reads and compiles a script file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScriptError> {
        let path = path.as_ref();
        let source = fs::read(path).map_err(|source| ScriptError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        // `@` marks the chunk name as a file name in Lua diagnostics.
        Self::compile(format!("@{}", path.display()), &source)
    }

    /// Compiles an in-memory chunk. `name` shows up in diagnostics.
    pub fn from_source(name: &str, source: &str) -> Result<Self, ScriptError> {
        Self::compile(format!("={name}"), source.as_bytes())
    }

    fn compile(chunk_name: String, source: &[u8]) -> Result<Self, ScriptError> {
        let lua = Lua::new();
        let chunk = lua.load(source).set_name(chunk_name.as_str()).into_function()?;
        log::debug!("compiled script {chunk_name}");
        Ok(Self { chunk, lua })
    }

    /// Borrow of the underlying interpreter.
    pub fn lua(&self) -> &Lua {
        &self.lua
    }

    /// Executes the script's top-level body.
    pub fn run(&self) -> Result<(), ScriptError> {
        self.chunk.call::<()>(())?;
        Ok(())
    }

    /// Installs `callback` as the global `name`, replacing any previous binding.
    pub fn register_function<F>(&self, name: &str, callback: F) -> Result<(), ScriptError>
    where
        F: Fn(&mut Stack<'_>) -> Result<usize, ScriptError> + 'static,
    {
        let callback = NativeCallback::new(name, Box::new(callback));
        let userdata = self.lua.create_userdata(callback)?;
        self.lua.globals().set(name, userdata)?;
        log::trace!("registered native function `{name}`");
        Ok(())
    }

    /// Calls the script function `name` with `args`, discarding its results.
    ///
    /// Returns `Ok(false)` without calling anything when the global is absent or
    /// not a function.
    pub fn call_function(&self, name: &str, args: impl IntoLuaMulti) -> Result<bool, ScriptError> {
        let Some(function) = self.lookup(name)? else {
            return Ok(false);
        };
        function.call::<()>(args)?;
        Ok(true)
    }

    /// Calls the script function `name` with `args` and converts its first result.
    ///
    /// Returns `Ok(None)` when the call was skipped (same policy as
    /// [`call_function`](Self::call_function)). A missing or mistyped result is a
    /// [`ScriptError::Conversion`].
    pub fn call_function_for<R: FromStack>(
        &self,
        name: &str,
        args: impl IntoLuaMulti,
    ) -> Result<Option<R>, ScriptError> {
        let Some(function) = self.lookup(name)? else {
            return Ok(None);
        };
        let results: MultiValue = function.call(args)?;
        let first = results.into_iter().next().unwrap_or(Value::Nil);

        match R::from_value(&first) {
            Some(value) => Ok(Some(value)),
            None if first.is_nil() => Err(StackError::Missing { index: -1 }.into()),
            None => Err(StackError::TypeMismatch {
                index: -1,
                expected: R::TYPE_NAME,
                found: first.type_name(),
            }
            .into()),
        }
    }

    /// Appends `path` (a `?` template such as `scripts/?.lua`) to `package.path`.
    pub fn add_package_path(&self, path: &str) -> Result<(), ScriptError> {
        let package: Table = self.lua.globals().get("package")?;
        let current: String = package.get("path")?;
        package.set("path", format!("{current};{path}"))?;
        Ok(())
    }

    fn lookup(&self, name: &str) -> Result<Option<Function>, ScriptError> {
        match self.lua.globals().get::<Value>(name)? {
            Value::Function(function) => Ok(Some(function)),
            Value::Nil => Ok(None),
            other => {
                log::warn!(
                    "global `{name}` is a {} and cannot be called; skipping",
                    other.type_name()
                );
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use super::*;

    fn host(src: &str) -> ScriptHost {
        let host = ScriptHost::from_source("test", src).unwrap();
        host.run().unwrap();
        host
    }

    // ── load / run ────────────────────────────────────────────────────────

    #[test]
    fn syntax_error_fails_to_load() {
        let err = ScriptHost::from_source("broken", "function (").err().unwrap();
        match err {
            ScriptError::Syntax(msg) => assert!(msg.contains("broken"), "{msg}"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = ScriptHost::load("/nonexistent/luaplate/script.lua").err().unwrap();
        assert!(matches!(err, ScriptError::Io { .. }));
    }

    #[test]
    fn load_reads_a_file_from_disk() {
        let path = std::env::temp_dir().join(format!("luaplate-host-{}.lua", std::process::id()));
        fs::write(&path, "answer = 42").unwrap();

        let host = ScriptHost::load(&path).unwrap();
        host.run().unwrap();
        let answer: i64 = host.lua().globals().get("answer").unwrap();
        assert_eq!(answer, 42);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn top_level_error_fails_run() {
        let host = ScriptHost::from_source("boom", "error('top level failure')").unwrap();
        match host.run() {
            Err(ScriptError::Runtime(msg)) => assert!(msg.contains("top level failure"), "{msg}"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    // ── call_function ─────────────────────────────────────────────────────

    #[test]
    fn calling_missing_function_is_skipped() {
        let host = host("");
        assert_eq!(host.call_function("scene_update", ()).unwrap(), false);
        assert_eq!(host.call_function_for::<i32>("scene_update", ()).unwrap(), None);
    }

    #[test]
    fn calling_non_function_global_is_skipped() {
        let host = host("scene_update = 5");
        assert_eq!(host.call_function("scene_update", ()).unwrap(), false);
    }

    #[test]
    fn call_passes_arguments_and_returns_result() {
        let host = host("function add(a, b) return a + b end");
        assert_eq!(host.call_function_for::<i64>("add", (2, 3)).unwrap(), Some(5));
        assert_eq!(host.call_function_for::<f64>("add", (0.5, 1)).unwrap(), Some(1.5));
    }

    #[test]
    fn call_result_type_mismatch_is_reported() {
        let host = host("function name() return 'x' end function nothing() end");
        let err = host.call_function_for::<i32>("name", ()).err().unwrap();
        assert!(matches!(
            err,
            ScriptError::Conversion(StackError::TypeMismatch { expected: "integer", found: "string", .. })
        ));
        let err = host.call_function_for::<bool>("nothing", ()).err().unwrap();
        assert!(matches!(err, ScriptError::Conversion(StackError::Missing { .. })));
    }

    #[test]
    fn raising_function_returns_runtime_error() {
        let host = host("function scene_update() error('frame failed') end");
        match host.call_function("scene_update", ()) {
            Err(ScriptError::Runtime(msg)) => assert!(msg.contains("frame failed"), "{msg}"),
            other => panic!("unexpected result: {other:?}"),
        }
        // The interpreter stays usable after a failed call.
        assert!(host.call_function("scene_update", ()).is_err());
    }

    // ── register_function ─────────────────────────────────────────────────

    #[test]
    fn callback_sees_only_its_own_arguments() {
        let host = host("");
        for i in 0..8 {
            host.register_function(&format!("noop{i}"), |_| Ok(0)).unwrap();
        }

        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        host.register_function("sample", move |stack| {
            let mut out = sink.borrow_mut();
            out.push(stack.len() as i64);
            for i in 1..=stack.len() as i32 {
                out.push(stack.get::<i64>(i)?);
            }
            Ok(0)
        })
        .unwrap();

        host.lua().load("sample(10, 20, 30)").exec().unwrap();
        assert_eq!(*seen.borrow(), vec![3, 10, 20, 30]);
    }

    #[test]
    fn callback_results_are_returned_to_script() {
        let host = host("");
        host.register_function("pair", |stack| {
            stack.push(640)?;
            stack.push(480)?;
            Ok(2)
        })
        .unwrap();

        host.lua()
            .load("local w, h = pair(1, 2, 3) result = w * 1000 + h")
            .exec()
            .unwrap();
        let result: i64 = host.lua().globals().get("result").unwrap();
        assert_eq!(result, 640_480);
    }

    #[test]
    fn callback_error_raises_in_script() {
        let host = host("");
        host.register_function("fail", |_| Err(ScriptError::runtime("bad input"))).unwrap();
        host.lua()
            .load("ok, msg = pcall(fail) msg = tostring(msg)")
            .exec()
            .unwrap();
        let ok: bool = host.lua().globals().get("ok").unwrap();
        let msg: String = host.lua().globals().get("msg").unwrap();
        assert!(!ok);
        assert!(msg.contains("bad input"), "{msg}");
    }

    #[test]
    fn registering_replaces_previous_binding() {
        let host = host("");
        host.register_function("value", |s| {
            s.push(1)?;
            Ok(1)
        })
        .unwrap();
        host.register_function("value", |s| {
            s.push(2)?;
            Ok(1)
        })
        .unwrap();

        host.lua().load("result = value()").exec().unwrap();
        let result: i64 = host.lua().globals().get("result").unwrap();
        assert_eq!(result, 2);
    }

    #[test]
    fn registered_callbacks_are_callable_from_hooks() {
        let calls = Rc::new(Cell::new(0));
        let host = host("function scene_update() tick() tick() end");
        let counter = calls.clone();
        host.register_function("tick", move |_| {
            counter.set(counter.get() + 1);
            Ok(0)
        })
        .unwrap();

        assert!(host.call_function("scene_update", ()).unwrap());
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn closures_are_released_with_the_interpreter() {
        struct Token(Rc<Cell<bool>>);
        impl Drop for Token {
            fn drop(&mut self) {
                self.0.set(true);
            }
        }

        let dropped = Rc::new(Cell::new(false));
        let token = Token(dropped.clone());
        let host = host("");
        host.register_function("hold", move |_| {
            let _held = &token;
            Ok(0)
        })
        .unwrap();

        assert!(!dropped.get());
        drop(host);
        assert!(dropped.get());
    }

    // ── package path ──────────────────────────────────────────────────────

    #[test]
    fn package_path_is_appended() {
        let host = host("");
        host.add_package_path("/opt/scripts/?.lua").unwrap();
        let package: Table = host.lua().globals().get("package").unwrap();
        let path: String = package.get("path").unwrap();
        assert!(path.ends_with(";/opt/scripts/?.lua"), "{path}");
    }

    #[test]
    fn package_path_enables_require() {
        let dir = std::env::temp_dir().join(format!("luaplate-require-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("helper.lua"), "return { value = 7 }").unwrap();

        let host = host("");
        host.add_package_path(&format!("{}/?.lua", dir.display())).unwrap();
        host.lua().load("result = require('helper').value").exec().unwrap();
        let result: i64 = host.lua().globals().get("result").unwrap();
        assert_eq!(result, 7);

        fs::remove_dir_all(&dir).unwrap();
    }
}
