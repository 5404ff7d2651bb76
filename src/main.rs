use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use zeroize::Zeroizing;

use poolwizard::audit::ActivityLogger;
use poolwizard::cli::{
    handle_activity_command, handle_blocks_command, handle_check_command, handle_pool_command,
    handle_wizard_command, CheckCommands, PoolCommands, Session, WizardCommands,
};
use poolwizard::config::{ConnectionOptions, Settings, WizardPaths};
use poolwizard::error::WizardError;
use poolwizard::logging;
use poolwizard::services::WizardHandle;
use poolwizard::storage::Storage;

#[derive(Parser)]
#[command(
    name = "poolwizard",
    author = "Kaylee Beyene",
    version,
    about = "Setup wizard and debugging console for a Uniswap V2 pair",
    long_about = "poolwizard walks a Uniswap-V2-style pair on a local dev chain through \
                  initialize, approve and mint, keeps track of progress between runs, \
                  and offers direct calls and read-only checks against the pool."
)]
struct Cli {
    /// JSON-RPC endpoint of the node
    #[arg(long, global = true, env = "RPC_URL")]
    rpc_url: Option<String>,

    /// Hex private key of the signer
    #[arg(long, global = true, env = "PRIVATE_KEY", hide_env_values = true)]
    private_key: Option<String>,

    /// Pair contract address (overrides the settings file)
    #[arg(long = "pool", global = true, env = "POOL_ADDRESS")]
    pool_address: Option<String>,

    /// Prompt for the private key when none is configured
    #[arg(long, global = true)]
    prompt_key: bool,

    /// Gas limit for transactions (overrides the settings file)
    #[arg(long, global = true)]
    gas_limit: Option<u64>,

    /// Increase log detail in poolwizard.log (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive TUI
    #[command(alias = "ui")]
    Tui,

    #[command(flatten)]
    Wizard(WizardCommands),

    /// Direct calls on the pool and its LP token
    #[command(subcommand)]
    Pool(PoolCommands),

    /// Read any balance or allowance
    #[command(subcommand)]
    Check(CheckCommands),

    /// Browse recent blocks, newest first
    Blocks {
        /// Page number, 0 is the newest
        #[arg(short, long, default_value = "0")]
        page: u64,
    },

    /// Show recent wizard activity
    Activity {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Forget local wizard progress
    Reset,

    /// Show configuration
    Config,
}

impl Cli {
    fn connection_options(&self) -> ConnectionOptions {
        ConnectionOptions {
            rpc_url: self.rpc_url.clone(),
            private_key: self.private_key.clone().map(Zeroizing::new),
            pool_address: self.pool_address.clone(),
            prompt_key: self.prompt_key,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths, logging and settings
    let paths = WizardPaths::new()?;
    logging::init(&paths, cli.verbose)?;
    let settings = Settings::load_or_create(&paths)?;

    let options = cli.connection_options();
    let rpc_url_set = cli.rpc_url.as_deref().is_some_and(|u| !u.trim().is_empty());
    let key_set = cli.private_key.as_deref().is_some_and(|k| !k.trim().is_empty());
    let gas = cli.gas_limit;

    let ok = match cli.command {
        Some(Commands::Config) => {
            // Write the defaults out so there is a file to edit
            if !paths.settings_file().exists() {
                settings.save(&paths)?;
            }
            println!("poolwizard Configuration");
            println!("========================");
            println!("Config file:    {}", paths.settings_file().display());
            println!("Data directory: {}", paths.data_dir().display());
            println!("Activity log:   {}", paths.activity_log().display());
            println!("Trace log:      {}", paths.trace_log().display());
            println!();
            println!("Settings:");
            println!("  Pool address:     {}", settings.pool_address);
            println!("  Gas limit:        {}", settings.default_gas_limit);
            println!("  Error banner (s): {}", settings.error_clear_secs);
            println!("  Explorer page:    {}", settings.explorer_page_size);
            println!("  Approve amount:   {}", settings.default_approve_amount);
            println!();
            println!("RPC URL:     {}", if rpc_url_set { "set" } else { "not set" });
            println!("Private key: {}", if key_set { "set" } else { "not set" });
            true
        }
        Some(Commands::Activity { limit }) => {
            let logger = ActivityLogger::new(paths.activity_log());
            handle_activity_command(&logger, limit)?;
            true
        }
        Some(Commands::Reset) => {
            let storage = Storage::open(paths.clone())?;
            storage.wizard.clear()?;
            println!("Wizard progress cleared. It will be rebuilt from the pool on next start.");
            true
        }
        Some(command) => run_connected(&paths, &settings, options, command, gas).await?,
        None => {
            println!("poolwizard - Uniswap V2 pool setup wizard");
            println!();
            println!("Run 'poolwizard --help' for usage information.");
            println!("Run 'poolwizard tui' to launch the interactive interface.");
            true
        }
    };

    if !ok {
        std::process::exit(1);
    }
    Ok(())
}

/// Commands that need a chain connection
async fn run_connected(
    paths: &WizardPaths,
    settings: &Settings,
    options: ConnectionOptions,
    command: Commands,
    gas: Option<u64>,
) -> Result<bool> {
    let mut session = match Session::connect(paths, settings, options) {
        Ok(session) => session,
        Err(err) => {
            report_connection_error(&err);
            return Ok(false);
        }
    };

    let result = match command {
        Commands::Tui => {
            let explorer = Arc::new(session.explorer());
            let handle = WizardHandle::spawn(session.controller);
            let outcome =
                tokio::task::block_in_place(|| poolwizard::tui::run_tui(&handle, explorer));
            handle.shutdown().await;
            outcome?;
            return Ok(true);
        }
        Commands::Blocks { page } => handle_blocks_command(&session.explorer(), page)
            .await
            .map(|()| true),
        command => {
            session.start().await?;
            let controller = &mut session.controller;
            match command {
                Commands::Wizard(cmd) => handle_wizard_command(controller, cmd, gas).await,
                Commands::Pool(cmd) => handle_pool_command(controller, cmd, gas).await,
                Commands::Check(cmd) => handle_check_command(controller, cmd).await,
                _ => Ok(true),
            }
        }
    };

    match result {
        Ok(ok) => Ok(ok),
        Err(err) if err.is_validation() || matches!(err, WizardError::Read(_)) => {
            eprintln!("[ERROR] {}", err.banner());
            Ok(false)
        }
        Err(err) => Err(err.into()),
    }
}

fn report_connection_error(err: &WizardError) {
    eprintln!("[ERROR] {}", err.banner());
    eprintln!("  {}", err);
    eprintln!();
    eprintln!("Set --rpc-url / RPC_URL and --private-key / PRIVATE_KEY, or pass --prompt-key.");
}
