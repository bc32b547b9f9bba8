use clap::Parser as ClapParser;
use jqlite::EvalOptions;
use jqlite::cli::{self, CliError, OutputFormat, RunOptions, RunResult};
use jqlite::evaluator::DEFAULT_MAX_DEPTH;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

#[derive(ClapParser)]
#[command(name = "jqlite")]
#[command(about = "jqlite - a small jq-like filter language for JSON")]
#[command(version)]
#[command(after_help = "Example: jqlite '.posts[0].title' data.json")]
struct Cli {
    /// The filter program, e.g. '.posts | select(.likes > 10)'
    query: String,

    /// JSON file to query (reads from stdin if not provided)
    file: Option<PathBuf>,

    /// Print compact, escaped JSON instead of the display format
    #[arg(long)]
    json: bool,

    /// Only validate query syntax, don't execute
    #[arg(long)]
    syntax_only: bool,

    /// Print a JSON report of tokens, parse steps, and execution trace
    #[arg(long)]
    visualize: bool,

    /// Maximum evaluator recursion depth
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Returns whether the run succeeded; visualize reports embed their own errors.
fn run(cli: Cli) -> Result<bool, CliError> {
    let input = match (&cli.file, cli.syntax_only) {
        (_, true) => None,
        (Some(path), false) => Some(fs::read_to_string(path)?),
        (None, false) if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Some(buffer)
        }
        (None, false) => None,
    };

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Display
    };

    let options = RunOptions {
        query: cli.query,
        input,
        syntax_only: cli.syntax_only,
        visualize: cli.visualize,
        format,
        eval: EvalOptions {
            max_depth: cli.max_depth,
        },
    };

    let result = cli::execute(&options)?;
    println!("{}", result.render(options.format));

    Ok(match &result {
        RunResult::Report(report) => !report.is_error(),
        _ => true,
    })
}
