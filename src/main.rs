mod debug_report;

use chrono::{Local, NaiveDate};
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;
use vestnik::{Context, Options, Registry, extract_verbose_with};

const REGISTRY_ENV: &str = "VESTNIK_REGISTRY";

fn main() {
    init_tracing();

    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    let registry = match &config.registry {
        Some(path) => match Registry::load(path) {
            Ok(registry) => registry,
            Err(err) => {
                eprintln!("error: {err}");
                std::process::exit(1);
            }
        },
        None => Registry::default(),
    };

    let ctx = Context { today: config.today };
    let opts = Options { require_full_name: config.full_names };
    let report = extract_verbose_with(&config.input, &ctx, &opts);
    debug_report::print_run(&report, &registry, config.color);
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_writer(io::stderr)
        .try_init();
}

struct CliConfig {
    input: String,
    today: NaiveDate,
    registry: Option<PathBuf>,
    full_names: bool,
    color: bool,
}

fn parse_args() -> Result<CliConfig, String> {
    let mut input: Option<String> = None;
    let mut today = Local::now().date_naive();
    let mut registry = std::env::var_os(REGISTRY_ENV).map(PathBuf::from);
    let mut full_names = false;
    let mut color = io::stdout().is_terminal();
    let mut args = std::env::args().skip(1).peekable();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("vestnik {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--color" => color = true,
            "--no-color" => color = false,
            "--full-names" => full_names = true,
            "--today" => {
                let value = args.next().ok_or_else(|| "error: --today expects a value".to_string())?;
                today = parse_today(&value)?;
            }
            "--registry" => {
                let value = args.next().ok_or_else(|| "error: --registry expects a value".to_string())?;
                registry = Some(PathBuf::from(value));
            }
            "--input" | "-i" => {
                let value = args.next().ok_or_else(|| "error: --input expects a value".to_string())?;
                set_input(value, &mut input)?;
            }
            "--" => {
                let rest = args.collect::<Vec<_>>().join(" ");
                if !rest.trim().is_empty() {
                    set_input(rest, &mut input)?;
                }
                break;
            }
            _ if arg.starts_with("--today=") => today = parse_today(arg.trim_start_matches("--today="))?,
            _ if arg.starts_with("--registry=") => {
                registry = Some(PathBuf::from(arg.trim_start_matches("--registry=")));
            }
            _ if arg.starts_with("--input=") => {
                set_input(arg.trim_start_matches("--input=").to_string(), &mut input)?;
            }
            _ if arg.starts_with('-') => {
                return Err(format!("error: unknown option '{arg}'"));
            }
            _ => {
                let rest = std::iter::once(arg).chain(args).collect::<Vec<_>>().join(" ");
                set_input(rest, &mut input)?;
                break;
            }
        }
    }

    let input = match input {
        Some(value) => value,
        None => read_stdin_input()?,
    };

    if input.trim().is_empty() {
        return Err(format!("error: no input provided\n\n{}", help_text()));
    }

    Ok(CliConfig { input, today, registry, full_names, color })
}

fn set_input(value: String, input: &mut Option<String>) -> Result<(), String> {
    if input.is_some() {
        return Err("error: input provided multiple times".to_string());
    }
    *input = Some(value);
    Ok(())
}

fn read_stdin_input() -> Result<String, String> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(|err| format!("error: failed to read stdin: {err}"))?;
    Ok(buffer)
}

fn parse_today(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| format!("error: invalid --today '{value}' (expected YYYY-MM-DD)"))
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "vestnik {version}

Finds dates and personal names in Russian announcement text.

Usage:
  vestnik [OPTIONS] [--] <text...>
  vestnik [OPTIONS] --input <text>

Options:
  -i, --input <text>         Text to analyze. If omitted, reads remaining args
                             or stdin when no args are provided.
  --today <date>             Date past dates roll over from, YYYY-MM-DD.
                             Default: the local date.
  --registry <path>          Known-persons JSON used to resolve names.
                             Default: ${registry_env}, if set.
  --full-names               Only report names with a first and last name.
  --color                    Force ANSI color output.
  --no-color                 Disable ANSI color output.
  -h, --help                 Show this help message.
  -V, --version              Print version information.

Logging is controlled with RUST_LOG (e.g. RUST_LOG=vestnik::engine=debug).

Exit codes:
  0  Success.
  1  Registry could not be loaded.
  2  Invalid arguments or missing input.
",
        version = env!("CARGO_PKG_VERSION"),
        registry_env = REGISTRY_ENV
    )
}
