mod debug_report;

use chrono::NaiveDateTime;
use replybot::{Clock, Context, Options, Resolver};
use std::io::{self, BufRead, IsTerminal};
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "REPLYBOT_LOG";

fn main() {
    init_tracing();

    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    let mut context = match config.seed {
        Some(seed) => Context::seeded(seed),
        None => Context::default(),
    };
    if let Some(at) = config.reference_time {
        context = context.with_clock(Clock::Fixed(at));
    }

    let mut resolver = Resolver::new().with_context(context).with_options(Options::default());

    match config.input.as_deref() {
        Some(message) => reply(&mut resolver, message, &config),
        None => {
            let stdin = io::stdin();
            for line in stdin.lock().lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(err) => {
                        eprintln!("error: failed to read stdin: {err}");
                        std::process::exit(1);
                    }
                };
                if line.trim().is_empty() {
                    continue;
                }
                reply(&mut resolver, &line, &config);
            }
        }
    }
}

fn reply(resolver: &mut Resolver, message: &str, config: &CliConfig) {
    if config.verbose {
        let res = resolver.resolve_verbose(message);
        debug_report::print_resolution(message, &res, config.color);
    } else {
        println!("{}", resolver.resolve(message));
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).with_target(false).init();
}

struct CliConfig {
    input: Option<String>,
    seed: Option<u64>,
    reference_time: Option<NaiveDateTime>,
    verbose: bool,
    color: bool,
}

fn parse_args() -> Result<CliConfig, String> {
    let mut input: Option<String> = None;
    let mut seed: Option<u64> = None;
    let mut reference_time: Option<NaiveDateTime> = None;
    let mut verbose = false;
    let mut color = io::stdout().is_terminal();
    let mut args = std::env::args().skip(1).peekable();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("replybot {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "-v" | "--verbose" => verbose = true,
            "--color" => color = true,
            "--no-color" => color = false,
            "--seed" => {
                let value = args.next().ok_or_else(|| "error: --seed expects a value".to_string())?;
                seed = Some(parse_seed(&value)?);
            }
            "--reference" => {
                let value = args.next().ok_or_else(|| "error: --reference expects a value".to_string())?;
                reference_time = Some(parse_reference(&value)?);
            }
            "--input" | "-i" => {
                let value = args.next().ok_or_else(|| "error: --input expects a value".to_string())?;
                set_input(&mut input, value)?;
            }
            "--" => {
                let rest = args.collect::<Vec<_>>().join(" ");
                if !rest.trim().is_empty() {
                    set_input(&mut input, rest)?;
                }
                break;
            }
            _ if arg.starts_with("--seed=") => {
                seed = Some(parse_seed(arg.trim_start_matches("--seed="))?);
            }
            _ if arg.starts_with("--reference=") => {
                reference_time = Some(parse_reference(arg.trim_start_matches("--reference="))?);
            }
            _ if arg.starts_with("--input=") => {
                set_input(&mut input, arg.trim_start_matches("--input=").to_string())?;
            }
            _ if arg.starts_with('-') => {
                return Err(format!("error: unknown option '{arg}'"));
            }
            _ => {
                let rest = std::iter::once(arg).chain(args).collect::<Vec<_>>().join(" ");
                set_input(&mut input, rest)?;
                break;
            }
        }
    }

    Ok(CliConfig { input, seed, reference_time, verbose, color })
}

fn set_input(input: &mut Option<String>, value: String) -> Result<(), String> {
    if input.is_some() {
        return Err("error: input provided multiple times".to_string());
    }
    *input = Some(value);
    Ok(())
}

fn parse_seed(value: &str) -> Result<u64, String> {
    value.parse::<u64>().map_err(|_| format!("error: invalid --seed '{value}' (expected an unsigned integer)"))
}

fn parse_reference(value: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
        .map_err(|_| format!("error: invalid --reference '{value}' (expected YYYY-MM-DDTHH:MM:SS)"))
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "replybot {version}

Offline chatbot: match a message against canned replies by bigram similarity.

Usage:
  replybot [OPTIONS] [--] <message...>
  replybot [OPTIONS] --input <text>
  replybot [OPTIONS] < messages.txt

Options:
  -i, --input <text>         Message to answer. If omitted, reads remaining args,
                             or answers stdin line by line when no args are given.
  --seed <n>                 Seed for coin flips, dice rolls and random picks.
  --reference <timestamp>    Freeze the clock at YYYY-MM-DDTHH:MM:SS.
  -v, --verbose              Print the ranking report instead of just the reply.
  --color                    Force ANSI color output.
  --no-color                 Disable ANSI color output.
  -h, --help                 Show this help message.
  -V, --version              Print version information.

Environment:
  {log_env}=<filter>      Log filter for stderr diagnostics (default: warn).

Exit codes:
  0  Success.
  1  Failed to read stdin.
  2  Invalid arguments.
",
        version = env!("CARGO_PKG_VERSION"),
        log_env = LOG_ENV,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli_config(input: Option<&str>, verbose: bool) -> CliConfig {
        CliConfig { input: input.map(str::to_string), seed: Some(1), reference_time: None, verbose, color: false }
    }

    #[test]
    fn replies_to_the_configured_input_without_consuming_it() {
        let config = cli_config(Some("hi"), false);
        let mut resolver = Resolver::new().with_context(Context::seeded(1));
        if let Some(message) = config.input.as_deref() {
            reply(&mut resolver, message, &config);
            reply(&mut resolver, message, &config);
        }
        assert_eq!(config.input.as_deref(), Some("hi"));

        let verbose = cli_config(Some("thank you"), true);
        reply(&mut resolver, "thank you", &verbose);
    }

    #[test]
    fn input_may_only_be_given_once() {
        let mut input = None;
        assert!(set_input(&mut input, "hi".to_string()).is_ok());
        assert!(set_input(&mut input, "bye".to_string()).is_err());
        assert_eq!(input.as_deref(), Some("hi"));
    }

    #[test]
    fn parses_seed_and_reference() {
        assert_eq!(parse_seed("42"), Ok(42));
        assert!(parse_seed("-1").is_err());

        let at = parse_reference("2025-10-07T15:04:05").unwrap();
        assert_eq!(at.format("%H:%M").to_string(), "15:04");
        assert!(parse_reference("yesterday").is_err());
    }
}
