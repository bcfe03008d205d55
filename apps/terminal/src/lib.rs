//! # Clerk Terminal Library
//!
//! Core library for the Clerk POS terminal application.
//! This is the main entry point that configures and runs the shell.
//!
//! ## Module Organization
//! ```text
//! clerk_terminal/
//! ├── lib.rs          ◄─── You are here (setup & shell loop)
//! ├── shell.rs        ◄─── Tokenizer + command dispatch
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── cart.rs     ◄─── Cart state (Arc<Mutex<Cart>>)
//! │   ├── catalog.rs  ◄─── Last-fetched product list
//! │   └── config.rs   ◄─── Terminal configuration
//! ├── commands/
//! │   ├── auth.rs     ◄─── login/logout/register/whoami
//! │   ├── product.rs  ◄─── product list/CRUD
//! │   ├── category.rs ◄─── category list/CRUD
//! │   ├── cart.rs     ◄─── cart manipulation
//! │   ├── sale.rs     ◄─── checkout + receipts
//! │   └── stats.rs    ◄─── dashboard
//! └── error.rs        ◄─── AppError (code + message)
//! ```
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Application Startup                               │
//! │                                                                         │
//! │  1. Initialize Logging ───────────────────────────────────────────────► │
//! │     • tracing-subscriber with env filter, writing to stderr             │
//! │     • Default: WARN, can be overridden with RUST_LOG                    │
//! │                                                                         │
//! │  2. Load Configuration ───────────────────────────────────────────────► │
//! │     • terminal.toml from the platform config dir                        │
//! │     • CLERK_API_URL / flags override the file                           │
//! │                                                                         │
//! │  3. Restore Session ──────────────────────────────────────────────────► │
//! │     • session.json from the platform data dir                           │
//! │     • A restart stays logged in until the server says otherwise         │
//! │                                                                         │
//! │  4. Build State & API Client ─────────────────────────────────────────► │
//! │     • CartState, CatalogState, ConfigState, ApiClient                   │
//! │                                                                         │
//! │  5. Run the Shell Loop ───────────────────────────────────────────────► │
//! │     • read a line, dispatch, print, repeat                              │
//! │     • every error returns to a usable prompt                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod error;
pub mod shell;
pub mod state;

use std::io::{BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use clerk_api::{ApiClient, SessionStore};

pub use error::{AppError, ErrorCode};
use shell::ShellFlow;
use state::{CartState, CatalogState, ConfigState};

// =============================================================================
// CLI Arguments
// =============================================================================

/// Command-line arguments for the `clerk` binary.
#[derive(Debug, Parser)]
#[command(name = "clerk", about = "Clerk POS terminal", version)]
pub struct Cli {
    /// Backend API base URL (overrides config file and CLERK_API_URL)
    #[arg(long)]
    pub api_url: Option<String>,

    /// Path to terminal.toml (defaults to the platform config dir)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Page size for list screens
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Run a single command line and exit (e.g. --exec "products coke")
    #[arg(long)]
    pub exec: Option<String>,
}

// =============================================================================
// Shared Context
// =============================================================================

/// Everything a command needs, threaded explicitly through the dispatcher.
///
/// The session lives inside the ApiClient's SessionStore - injected, never
/// ambient.
pub struct Ctx {
    pub api: ApiClient,
    pub cart: CartState,
    pub catalog: CatalogState,
    pub config: ConfigState,
}

// =============================================================================
// Entry Point
// =============================================================================

/// Runs the terminal application.
pub fn run(cli: Cli) -> Result<(), AppError> {
    init_tracing();

    // Resolve configuration: file, then env, then flags.
    let mut config = ConfigState::load(cli.config)?;
    if let Some(url) = cli.api_url {
        config.api_url = url;
    }
    if let Some(page_size) = cli.page_size {
        config.page_size = page_size.max(1);
    }

    // Restore the persisted session, if any.
    let session = SessionStore::at_default_path()?;
    let api = ApiClient::new(&config.api_url, session)?;

    info!(api_url = %config.api_url, "Starting Clerk POS terminal");

    let ctx = Ctx {
        api,
        cart: CartState::new(),
        catalog: CatalogState::new(),
        config,
    };

    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| AppError::internal(format!("runtime: {}", e)))?;

    // One-shot mode for scripting: run a single command line, exit.
    if let Some(line) = cli.exec {
        runtime.block_on(shell::dispatch(&ctx, &line))?;
        return Ok(());
    }

    print_banner(&ctx);

    // The shell loop itself is synchronous; each command runs to completion
    // on the runtime before the next line is read.
    let stdin = std::io::stdin();
    let mut input = String::new();
    loop {
        print_prompt(&ctx);

        input.clear();
        match stdin.lock().read_line(&mut input) {
            Ok(0) => break, // EOF
            Ok(_) => {}
            Err(e) => return Err(AppError::io(format!("stdin: {}", e))),
        }

        match runtime.block_on(shell::dispatch(&ctx, input.trim())) {
            Ok(ShellFlow::Continue) => {}
            Ok(ShellFlow::Quit) => break,
            // Every failure is surfaced once and the prompt stays usable.
            Err(err) => println!("error: {}", err.message),
        }
    }

    println!("Bye");
    Ok(())
}

fn print_banner(ctx: &Ctx) {
    println!("Clerk POS - {}", ctx.config.store_name);
    println!("Backend: {}", ctx.config.api_url);
    match ctx.api.session().user() {
        Some(user) => println!("Logged in as {} ({})", user.name, user.role),
        None => println!("Not logged in - use `login <username> <password>`"),
    }
    println!("Type `help` for commands.");
}

fn print_prompt(ctx: &Ctx) {
    let prompt = match ctx.api.session().user() {
        Some(user) => format!("{}@clerk> ", user.name),
        None => "clerk> ".to_string(),
    };
    print!("{}", prompt);
    let _ = std::io::stdout().flush();
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=clerk=trace` - Show trace for clerk crates only
/// - Default: WARN, so logs don't interleave with the prompt
///
/// Logs go to stderr; stdout belongs to the screens.
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,clerk=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
