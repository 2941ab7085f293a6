use std::{fs, process::ExitCode, sync::Once, time::Duration};

use algorithmique::{
    execute_with_limits,
    execution::{DEFAULT_MAX_CALL_DEPTH, DEFAULT_MAX_STEPS, Limits, Request, Response},
    syntax,
};
use clap::Parser;
use rayon::prelude::*;

/// algorithmique runs programs written in French algorithmic pseudo-code
/// (ALGORITHME, VARIABLES, DEBUT ... FIN).
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Treat CONTENTS as the path of a program file instead of the program
    /// itself.
    #[arg(short, long)]
    file: bool,

    /// A value for LIRE. Repeat the flag to supply several values, in order.
    #[arg(short, long = "input", value_name = "VALUE")]
    inputs: Vec<String>,

    /// Print the JSON response (output, error, variables) instead of the raw
    /// output.
    #[arg(long)]
    json: bool,

    /// Treat CONTENTS as the path of a JSON request `{"source", "inputs"}`.
    #[arg(long, conflicts_with_all = ["file", "batch"])]
    request: bool,

    /// Treat CONTENTS as the path of a JSON array of requests and print a
    /// JSON array of responses, in the same order.
    #[arg(long, conflicts_with = "file")]
    batch: bool,

    /// Cap on loop iterations plus routine calls.
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_STEPS)]
    max_steps: usize,

    /// Cap on nested routine calls.
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_CALL_DEPTH)]
    max_depth: usize,

    /// Wall-clock budget per program, in milliseconds.
    #[arg(long, value_name = "MS")]
    timeout_ms: Option<u64>,

    /// Print the keywords, operators and built-in functions, then exit.
    #[arg(long)]
    syntax: bool,

    #[arg(required_unless_present = "syntax")]
    contents: Option<String>,
}

static TRACING_INIT: Once = Once::new();

/// Installs a `tracing` subscriber writing to stderr.
///
/// Only active when `RUST_LOG` is set, e.g. `RUST_LOG=algorithmique=debug`.
fn init_tracing() {
    TRACING_INIT.call_once(|| {
                    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

                    if std::env::var("RUST_LOG").is_ok() {
                        tracing_subscriber::registry()
                            .with(fmt::layer().with_writer(std::io::stderr)
                                              .with_target(true)
                                              .with_level(true))
                            .with(EnvFilter::from_default_env())
                            .init();
                    }
                });
}

fn read(path: &str) -> Result<String, String> {
    fs::read_to_string(path).map_err(|e| {
                                format!("Failed to read the input file '{path}'. Perhaps this \
                                         file does not exist? ({e})")
                            })
}

fn run(args: Args) -> Result<bool, String> {
    let limits = Limits { max_steps:      args.max_steps,
                          max_call_depth: args.max_depth,
                          timeout:        args.timeout_ms.map(Duration::from_millis), };
    let contents = args.contents.unwrap_or_default();

    if args.batch {
        let requests: Vec<Request> =
            serde_json::from_str(&read(&contents)?).map_err(|e| format!("Invalid batch file: {e}"))?;
        let responses = requests.par_iter()
                                .map(|request| {
                                    execute_with_limits(&request.source, &request.inputs, &limits)
                                        .to_response()
                                })
                                .collect::<Vec<Response>>();
        let all_succeeded = responses.iter().all(|response| response.error.is_none());
        println!("{}",
                 serde_json::to_string_pretty(&responses).map_err(|e| e.to_string())?);
        return Ok(all_succeeded);
    }

    let request = if args.request {
        serde_json::from_str(&read(&contents)?).map_err(|e| format!("Invalid request file: {e}"))?
    } else {
        let source = if args.file { read(&contents)? } else { contents };
        Request { source,
                  inputs: args.inputs }
    };

    let result = execute_with_limits(&request.source, &request.inputs, &limits);

    if args.json {
        println!("{}",
                 serde_json::to_string_pretty(&result.to_response()).map_err(|e| e.to_string())?);
    } else {
        print!("{}", result.output);
        if let Some(error) = &result.error {
            eprintln!("{error}");
        }
    }

    Ok(result.is_success())
}

fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();

    if args.syntax {
        print!("{}", syntax::reference());
        return ExitCode::SUCCESS;
    }

    match run(args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::from(2)
        },
    }
}
