use std::fmt;
use std::path::PathBuf;

/// Failure to read a stack slot as the requested type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StackError {
    /// No value at `index`.
    Missing { index: i32 },
    /// The value at `index` has a different Lua type.
    TypeMismatch {
        index: i32,
        expected: &'static str,
        found: &'static str,
    },
}

impl fmt::Display for StackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StackError::Missing { index } => write!(f, "no value at stack index {index}"),
            StackError::TypeMismatch { index, expected, found } => {
                write!(f, "stack index {index}: expected {expected}, found {found}")
            }
        }
    }
}

impl std::error::Error for StackError {}

/// Error raised across the script boundary.
///
/// `Syntax` and `Runtime` carry the interpreter's diagnostic text verbatim.
#[derive(Debug)]
pub enum ScriptError {
    /// The script file could not be read.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The script failed to compile.
    Syntax(String),
    /// The script raised an error while running.
    Runtime(String),
    /// A value crossing the boundary had the wrong type.
    Conversion(StackError),
}

impl ScriptError {
    /// Builds a runtime error from a native callback's message.
    pub fn runtime(msg: impl Into<String>) -> Self {
        ScriptError::Runtime(msg.into())
    }
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::Io { path, source } => {
                write!(f, "cannot open {}: {source}", path.display())
            }
            ScriptError::Syntax(msg) => write!(f, "syntax error: {msg}"),
            ScriptError::Runtime(msg) => write!(f, "script error: {msg}"),
            ScriptError::Conversion(err) => write!(f, "conversion error: {err}"),
        }
    }
}

impl std::error::Error for ScriptError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScriptError::Io { source, .. } => Some(source),
            ScriptError::Conversion(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StackError> for ScriptError {
    fn from(err: StackError) -> Self {
        ScriptError::Conversion(err)
    }
}

impl From<mlua::Error> for ScriptError {
    fn from(err: mlua::Error) -> Self {
        match err {
            mlua::Error::SyntaxError { message, .. } => ScriptError::Syntax(message),
            other => ScriptError::Runtime(other.to_string()),
        }
    }
}
