//! # Clerk Terminal Entry Point
//!
//! ## Application Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Clerk POS Terminal                               │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                      Interactive Shell                           │  │
//! │  │  clerk> products coke                                            │  │
//! │  │  clerk> cart add p-1                                             │  │
//! │  │  clerk> checkout                                                 │  │
//! │  └──────────────────────────────┬───────────────────────────────────┘  │
//! │                                 ▼                                       │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                      This crate                                  │  │
//! │  │                                                                  │  │
//! │  │  main.rs ────► Parses args, hands off to lib.rs                 │  │
//! │  │  lib.rs ─────► Logging, config, state, shell loop               │  │
//! │  │  commands/ ──► auth, product, category, cart, sale, stats       │  │
//! │  │  state/ ─────► CartState, CatalogState, ConfigState             │  │
//! │  └──────────────────────────────┬───────────────────────────────────┘  │
//! │                                 ▼                                       │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │              Backend REST service (via clerk-api)                │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use clap::Parser;

fn main() {
    let cli = clerk_terminal::Cli::parse();

    // The actual setup is in lib.rs for better testability
    if let Err(e) = clerk_terminal::run(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
