mod commands;
mod config;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Args as ClapArgs, Parser, Subcommand};
use kennel_nodes::{TypeRegistry, install_registry, registry};

use crate::config::load_config;

#[derive(Parser, Debug)]
#[command(name = "kennel", about = "Inspect and edit Kennel scene files", version)]
struct Cli {
    /// Scene file; falls back to `[scene] default` in kennel.toml
    #[arg(short, long, global = true)]
    scene: Option<PathBuf>,
    /// Config file (defaults to ./kennel.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Log filter, e.g. `debug` or `kennel_scene=trace`. RUST_LOG wins over this.
    #[arg(long, global = true)]
    log_level: Option<String>,
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Print the node hierarchy
    Tree,
    /// List a node's editable values; `*` marks values that differ from the default
    Show(NodeArgs),
    /// Print one value as a literal
    Get(GetArgs),
    /// Set values (`Path=literal`) and save
    Set(SetArgs),
    /// Reset values to their defaults and save
    Reset(ResetArgs),
    /// Rename a node, updating parent references, and save
    Rename(RenameArgs),
    /// Dump the loaded forest as JSON
    Dump,
}

#[derive(ClapArgs, Debug)]
struct NodeArgs {
    /// Node (section) name
    node: String,
}

#[derive(ClapArgs, Debug)]
struct GetArgs {
    node: String,
    /// Property path, e.g. Theme/FillColor
    path: String,
}

#[derive(ClapArgs, Debug)]
struct SetArgs {
    node: String,
    /// One or more `Path=literal` assignments
    #[arg(required = true, value_name = "PATH=VALUE")]
    assignments: Vec<String>,
    /// Print the resulting document instead of saving
    #[arg(long, default_value_t = false)]
    dry_run: bool,
}

#[derive(ClapArgs, Debug)]
struct ResetArgs {
    node: String,
    #[arg(required = true)]
    paths: Vec<String>,
    /// Print the resulting document instead of saving
    #[arg(long, default_value_t = false)]
    dry_run: bool,
}

#[derive(ClapArgs, Debug)]
struct RenameArgs {
    node: String,
    new_name: String,
    /// Print the resulting document instead of saving
    #[arg(long, default_value_t = false)]
    dry_run: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;
    let level = config.log_level(cli.log_level.as_deref());
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if install_registry(TypeRegistry::with_builtins()).is_err() {
        log::warn!("Type registry was already installed");
    }
    let registry = registry();
    let scene = config.scene_path(cli.scene.as_deref())?;

    let output = match &cli.cmd {
        Cmd::Tree => commands::tree(registry, &scene)?,
        Cmd::Show(a) => commands::show(registry, &scene, &a.node)?,
        Cmd::Get(a) => commands::get(registry, &scene, &a.node, &a.path)?,
        Cmd::Set(a) => commands::set(registry, &scene, &a.node, &a.assignments, a.dry_run)?,
        Cmd::Reset(a) => commands::reset(registry, &scene, &a.node, &a.paths, a.dry_run)?,
        Cmd::Rename(a) => commands::rename(registry, &scene, &a.node, &a.new_name, a.dry_run)?,
        Cmd::Dump => commands::dump(registry, &scene)?,
    };
    print!("{output}");
    Ok(())
}
