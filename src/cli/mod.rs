//! Command-line entry point.

use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tokio::runtime::Runtime;

use crate::core::config::Config;
use crate::supervisor::{MockSupervisor, ScriptedSupervisor, Supervisor};
use crate::ui::chat_loop::run_chat;
use crate::utils::logging::init_debug_logging;

const DEFAULT_THINKING_DELAY_MS: u64 = 400;

#[derive(Parser)]
#[command(
    name = "ponder",
    about = "A terminal chat interface that streams a supervisor's thoughts alongside its answers",
    version
)]
struct Args {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Show thought messages from the start of the session
    #[arg(short = 't', long = "thoughts")]
    thoughts: bool,

    /// Replay supervisor steps from a JSON script instead of the built-in mock
    #[arg(short = 's', long = "script", value_name = "FILE")]
    script: Option<PathBuf>,

    /// Append debug logs to the given file
    #[arg(long = "debug-log", value_name = "FILE")]
    debug_log: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Set a configuration value (prints current config when VALUE is omitted)
    Set {
        key: String,
        value: Option<String>,
    },
    /// Remove a configuration value
    Unset { key: String },
}

pub fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let rt = Runtime::new()?;
    rt.block_on(async_main(args))
}

async fn async_main(args: Args) -> Result<(), Box<dyn Error>> {
    match args.command {
        Some(Commands::Set { key, value }) => {
            let mut config = Config::load()?;
            match value {
                Some(value) => {
                    let confirmation = config.set_key(&key, &value)?;
                    config.save()?;
                    println!("{confirmation}");
                }
                None => config.print_all(),
            }
            Ok(())
        }
        Some(Commands::Unset { key }) => {
            let mut config = Config::load()?;
            let confirmation = config.unset_key(&key)?;
            config.save()?;
            println!("{confirmation}");
            Ok(())
        }
        None => {
            let config = Config::load()?;

            if let Some(path) = &args.debug_log {
                init_debug_logging(path)?;
            }

            let show_thoughts = args.thoughts || config.show_thoughts.unwrap_or(false);

            let supervisor: Arc<dyn Supervisor> = match &args.script {
                Some(path) => Arc::new(
                    ScriptedSupervisor::from_file(path).map_err(|e| e as Box<dyn Error>)?,
                ),
                None => Arc::new(MockSupervisor::new(Duration::from_millis(
                    config.thinking_delay_ms.unwrap_or(DEFAULT_THINKING_DELAY_MS),
                ))),
            };

            run_chat(config, supervisor, show_thoughts).await
        }
    }
}
