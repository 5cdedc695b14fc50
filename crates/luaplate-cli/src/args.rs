use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "luaplate", about = "Run a Lua script against a drawing canvas", long_about = None)]
#[command(disable_version_flag = true)]
pub struct Cli {
    /// Script to load and run
    pub lua_file: Option<PathBuf>,

    /// Print the version banner and exit
    #[arg(short = 'v')]
    pub version: bool,
}

/// What the command line asks for.
#[derive(Debug, PartialEq, Eq)]
pub enum Invocation {
    Version,
    Run(PathBuf),
    /// No script given.
    Usage,
}

pub fn parse_args<I, T>(args: I) -> Result<Invocation, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = Cli::try_parse_from(args)?;
    Ok(if cli.version {
        Invocation::Version
    } else {
        match cli.lua_file {
            Some(path) => Invocation::Run(path),
            None => Invocation::Usage,
        }
    })
}
