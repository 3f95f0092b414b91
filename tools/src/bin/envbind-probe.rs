use std::path::PathBuf;

use clap::Parser;
use envbind::SystemEnv;
use envbind_tools::{VarDecl, init_log, load_env_files, probe};

/// Resolve typed environment variables the way a service would at startup.
///
/// Each declaration is `NAME:KIND[=DEFAULT]`, where KIND is one of
/// string, int, int64, uint, uint64, float64, bool or duration
/// (nanoseconds). Env files are loaded before anything is resolved.
#[derive(Parser, Clone, Debug)]
#[clap(author, version, about, long_about = None)]
struct Opts {
    /// Load variables from a .env file first. Can be repeated.
    #[arg(short = 'f', long = "env-file")]
    env_files: Vec<PathBuf>,
    /// Let env file entries replace variables that are already set.
    #[arg(long = "override")]
    override_existing: bool,
    /// Variable declarations. Example: `HTTP_PORT:uint=8080 DEBUG:bool`
    #[arg(required = true)]
    vars: Vec<VarDecl>,
}

fn main() -> anyhow::Result<()> {
    init_log();
    let opts = Opts::parse();
    load_env_files(&opts.env_files, opts.override_existing)?;
    for resolved in probe(SystemEnv, &opts.vars)? {
        println!("{resolved}");
    }
    Ok(())
}
