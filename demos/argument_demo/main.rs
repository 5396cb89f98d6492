//! # argument demo application
//!
//! A sample service entry point that resolves its configuration with the
//! `argument` crate and prints the result. It exists to demonstrate and
//! manually verify the crate's behavior.
//!
//! ## Running
//!
//! ```sh
//! cargo run --example argument_demo -- -port 8080
//! DEMO_PORT=9000 cargo run --example argument_demo -- -timeout 1d2h
//! RUST_LOG=debug cargo run --example argument_demo -- -port 8080 -verbose
//! cargo run --example argument_demo -- --help
//! ```
//!
//! ## Features demonstrated
//!
//! | Feature                  | How to exercise it                                               |
//! |--------------------------|------------------------------------------------------------------|
//! | Defaults                 | `-- -port 8080`                                                  |
//! | Env beats flag           | `DEMO_PORT=9000 cargo run --example argument_demo -- -port 8080` |
//! | Required field           | run with no `-port` and no `DEMO_PORT`                           |
//! | Field validation         | `-- -port 80`                                                    |
//! | Custom decoding          | `-- -port 8080 -brokers kafka:9092,ssl://b:9093`                 |
//! | Custom separator         | `-- -port 8080 -tags "a; b; c"`                                  |
//! | Optional values          | `-- -port 8080 -ratio 0.25`                                      |
//! | Secret display           | `DEMO_PASSWORD=hunter2 DEMO_API_KEY=k cargo run ...`             |
//! | Resolution logging       | `RUST_LOG=debug cargo run ...`                                   |

mod config;

use std::process::ExitCode;

use argument::{Argument, ArgumentError, render_json};
use tracing_subscriber::EnvFilter;

use config::DemoConfig;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let config: DemoConfig = match Argument::builder()
        .program_name("argument-demo")
        .print(true)
        .load()
    {
        Ok(config) => config,
        Err(ArgumentError::Cli(e)) => e.exit(),
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    match serde_json::to_string_pretty(&render_json(&config)) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    }
    if config.verbose {
        println!(
            "listening on {}:{} with {} broker(s)",
            config.host,
            config.port.0,
            config.brokers.len()
        );
    }
    ExitCode::SUCCESS
}
