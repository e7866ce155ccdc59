mod debug_report;

use holdings_years::{Context, DEFAULT_MIN_YEAR, Options, parse_verbose_with};
use std::io::{self, IsTerminal, Read};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

fn main() {
    init_tracing();

    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    let ctx = match config.current_year {
        Some(year) => Context::new(year),
        None => Context::default(),
    };
    let opts = Options { min_year: config.min_year };
    let res = parse_verbose_with(&config.input, &ctx, &opts);
    debug_report::print_run(&res, &ctx, config.color);
}

/// Discarded matches are logged at `warn`; `RUST_LOG=holdings_years=trace`
/// shows every rule hit.
fn init_tracing() {
    let filter = EnvFilter::builder().with_default_directive(LevelFilter::WARN.into()).from_env_lossy();
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).with_target(false).init();
}

struct CliConfig {
    input: String,
    current_year: Option<i32>,
    min_year: i32,
    color: bool,
}

fn parse_args() -> Result<CliConfig, String> {
    let mut input: Option<String> = None;
    let mut current_year: Option<i32> = None;
    let mut min_year = DEFAULT_MIN_YEAR;
    let mut color = io::stdout().is_terminal();
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("holdings-years {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--color" => color = true,
            "--no-color" => color = false,
            "--current-year" => {
                let value = args.next().ok_or_else(|| "error: --current-year expects a value".to_string())?;
                current_year = Some(parse_year("--current-year", &value)?);
            }
            "--min-year" => {
                let value = args.next().ok_or_else(|| "error: --min-year expects a value".to_string())?;
                min_year = parse_year("--min-year", &value)?;
            }
            "--input" | "-i" => {
                let value = args.next().ok_or_else(|| "error: --input expects a value".to_string())?;
                if input.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                input = Some(value);
            }
            "--" => {
                let rest = args.collect::<Vec<_>>().join(" ");
                if !rest.trim().is_empty() {
                    if input.is_some() {
                        return Err("error: input provided multiple times".to_string());
                    }
                    input = Some(rest);
                }
                break;
            }
            _ if arg.starts_with("--current-year=") => {
                current_year = Some(parse_year("--current-year", arg.trim_start_matches("--current-year="))?);
            }
            _ if arg.starts_with("--min-year=") => {
                min_year = parse_year("--min-year", arg.trim_start_matches("--min-year="))?;
            }
            _ if arg.starts_with("--input=") => {
                let value = arg.trim_start_matches("--input=");
                if input.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                input = Some(value.to_string());
            }
            _ if arg.starts_with('-') => {
                return Err(format!("error: unknown option '{arg}'"));
            }
            _ => {
                let rest = std::iter::once(arg).chain(args).collect::<Vec<_>>().join(" ");
                if input.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                input = Some(rest);
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

    Ok(CliConfig { input, current_year, min_year, color })
}

fn read_stdin_input() -> Result<String, String> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(|err| format!("error: failed to read stdin: {err}"))?;
    Ok(buffer)
}

fn parse_year(flag: &str, value: &str) -> Result<i32, String> {
    value.trim().parse::<i32>().map_err(|_| format!("error: invalid {flag} '{value}' (expected a year such as 2024)"))
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "holdings-years {version}

Extract the publication years covered by a serial holdings statement.

Usage:
  holdings-years [OPTIONS] [--] <statement...>
  holdings-years [OPTIONS] --input <text>

Options:
  -i, --input <text>         Holdings statement to parse. If omitted, reads
                             remaining args or stdin when no args are provided.
  --current-year <year>      End year for open ranges such as \"1980-\".
                             Default: the local clock.
  --min-year <year>          Earliest plausible year. Default: {min_year}
  --color                    Force ANSI color output.
  --no-color                 Disable ANSI color output.
  -h, --help                 Show this help message.
  -V, --version              Print version information.

Environment:
  RUST_LOG                   Log filter, e.g. holdings_years=debug.

Exit codes:
  0  Success.
  2  Invalid arguments or missing input.
",
        version = env!("CARGO_PKG_VERSION"),
        min_year = DEFAULT_MIN_YEAR
    )
}
