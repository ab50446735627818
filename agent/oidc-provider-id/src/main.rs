/*!

Reads a custom resource lifecycle event as JSON, from `--event <path>` or from stdin, and writes
the response JSON to stdout. Any failure is written to stderr with a non-zero exit code, which the
deployment engine reports as a failed stack operation.

!*/

use agent_utils::init_agent_logger;
use argh::FromArgs;
use log::LevelFilter;
use oidc_provider_id::{resolve_json, CustomResourceResponse, ResolutionError, Result};
use std::io::Read;
use std::path::PathBuf;

#[derive(FromArgs)]
/// Resolve the OIDC provider id for a custom resource lifecycle event.
struct Args {
    /// set logging verbosity [trace|debug|info|warn|error]. If the environment variable `RUST_LOG`
    /// is present, it overrides the default logging behavior. See https://docs.rs/env_logger/latest
    #[argh(option, default = "LevelFilter::Info")]
    log_level: LevelFilter,

    /// path to a file containing the event. The event is read from stdin when omitted.
    #[argh(option)]
    event: Option<PathBuf>,
}

fn main() {
    let args: Args = argh::from_env();
    init_agent_logger(env!("CARGO_CRATE_NAME"), Some(args.log_level));
    match run(args) {
        Ok(response) => println!("{}", response),
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}

fn run(args: Args) -> Result<CustomResourceResponse> {
    let input = match &args.event {
        Some(path) => {
            std::fs::read_to_string(path).map_err(|source| ResolutionError::ReadEvent {
                from: format!("'{}'", path.display()),
                source,
            })?
        }
        None => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .map_err(|source| ResolutionError::ReadEvent {
                    from: "stdin".to_string(),
                    source,
                })?;
            input
        }
    };
    resolve_json(&input)
}
