//! `luaplate`: runs a Lua script against a drawing canvas.
//!
//! Usage: `luaplate <lua_file>` or `luaplate -v`.

use std::cell::RefCell;
use std::env;
use std::path::Path;
use std::process::ExitCode;
use std::rc::Rc;

use anyhow::{Context, Result};
use luaplate_engine::logging::{init_logging, LoggingConfig};
use luaplate_engine::{Canvas, CanvasConfig};
use luaplate_script::ScriptHost;

use crate::args::{parse_args, Invocation};
use crate::scene::QuitSignal;

mod args;
mod bindings;
mod scene;

#[cfg(test)]
mod testing;

const APP_NAME: &str = "LuaPlate";

fn main() -> ExitCode {
    init_logging(LoggingConfig::default());

    let argv0 = env::args_os()
        .next()
        .map_or_else(|| "luaplate".to_string(), |a| a.to_string_lossy().into_owned());

    let ok = match parse_args(env::args_os()) {
        Ok(invocation) => execute(invocation, &argv0),
        Err(e) => {
            let _ = e.print();
            !e.use_stderr()
        }
    };
    if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}

/// Carries out one invocation; `false` means the process should fail.
fn execute(invocation: Invocation, argv0: &str) -> bool {
    match invocation {
        Invocation::Version => {
            print_version();
            true
        }
        Invocation::Usage => {
            eprintln!("invalid argument.");
            eprintln!("usage: {argv0} <lua_file>");
            false
        }
        Invocation::Run(path) => match run(&path) {
            Ok(()) => true,
            Err(e) => {
                log::debug!("aborting: {e:?}");
                eprintln!("error: {e:#}");
                false
            }
        },
    }
}

fn print_version() {
    println!("{APP_NAME} version {}", env!("CARGO_PKG_VERSION"));
    println!("Copyright (C) the {APP_NAME} contributors. License GPLv3.");
}

fn run(path: &Path) -> Result<()> {
    let host = ScriptHost::load(path)
        .with_context(|| format!("failed to load script `{}`", path.display()))?;
    host.add_package_path(&module_pattern(path))
        .context("failed to extend package.path")?;

    let canvas = Rc::new(RefCell::new(Canvas::new(CanvasConfig::default())));
    let quit = QuitSignal::new();
    bindings::register(&host, &canvas, &quit).context("failed to register script bindings")?;

    host.run()
        .with_context(|| format!("failed to run script `{}`", path.display()))?;

    let frames = scene::run_scene(&host, &*canvas, &quit);
    log::debug!("scene finished after {frames} frames");

    canvas.borrow_mut().close();
    Ok(())
}

/// `require` template for modules next to the script.
fn module_pattern(script: &Path) -> String {
    let dir = match script.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    dir.join("?.lua").to_string_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn module_pattern_uses_script_directory() {
        assert_eq!(module_pattern(Path::new("demos/bounce.lua")), "demos/?.lua");
        assert_eq!(module_pattern(Path::new("bounce.lua")), "./?.lua");
        assert_eq!(module_pattern(Path::new("/srv/plate/main.lua")), "/srv/plate/?.lua");
    }

    #[test]
    fn version_and_usage_exit_codes() {
        assert!(execute(Invocation::Version, "luaplate"));
        assert!(!execute(Invocation::Usage, "luaplate"));
    }

    #[test]
    fn syntax_error_fails_before_opening_a_window() {
        let path = env::temp_dir().join(format!("luaplate-broken-{}.lua", std::process::id()));
        std::fs::write(&path, "function (").unwrap();
        let result = run(&path);
        let failed = !execute(Invocation::Run(path.clone()), "luaplate");
        std::fs::remove_file(&path).unwrap();

        let message = format!("{:#}", result.unwrap_err());
        assert!(message.contains("failed to load script"), "{message}");
        assert!(failed);
    }
}
