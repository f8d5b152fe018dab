//! drv - Discrete random variable dashboard
//!
//! Reads the values and probabilities of X from flags or from prompts,
//! prints summary statistics and p.m.f./c.d.f. charts, and optionally the
//! same for a transformation g(X).

mod render;

use std::error::Error;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use clap::Parser;
use drv_stats::{Dashboard, DrvConfig, Session, TransformReport};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "drv")]
#[command(about = "Summary statistics and plots for a discrete random variable")]
struct Args {
    /// Values of x separated by spaces, e.g. "1 2 3"
    #[arg(short, long, allow_hyphen_values = true)]
    support: Option<String>,

    /// Probabilities as decimals or fractions, e.g. "1/4 0.5 1/4"
    #[arg(short, long)]
    probs: Option<String>,

    /// Transformation g(x), e.g. "2*x + 1"
    #[arg(short, long, allow_hyphen_values = true)]
    transform: Option<String>,

    /// Configuration file (.toml or .json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print JSON instead of tables
    #[arg(long)]
    json: bool,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

/// Everything printed in JSON mode
#[derive(Serialize)]
struct Output<'a> {
    session: &'a str,
    dashboard: Dashboard,
    #[serde(skip_serializing_if = "Option::is_none")]
    transform: Option<TransformReport>,
}

fn main() -> Result<(), Box<dyn Error>> {
    // Logs go to stderr so JSON output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;
    if args.print_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }
    let precision = config.display.precision;
    let mut session = Session::with_config(config)?;
    tracing::info!(session = %session.id, "session started");

    let stdin = io::stdin();
    let mut input = stdin.lock();

    match (&args.support, &args.probs) {
        (Some(support), Some(probs)) => {
            session.set_input(support, probs)?;
        }
        _ => prompt_distribution(&mut session, &mut input, &args)?,
    }
    let dashboard = session.dashboard()?;

    let interactive = args.support.is_none() || args.probs.is_none();
    let report = match &args.transform {
        Some(expr) => Some(session.transform(expr)?),
        None if interactive => prompt_transform(&session, &mut input)?,
        None => None,
    };

    if args.json {
        let output = Output {
            session: &session.id,
            dashboard,
            transform: report,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", render::dashboard(&dashboard, precision));
        if let Some(report) = &report {
            println!("{}", render::transform_report(report, precision));
        }
    }

    Ok(())
}

/// Load configuration from a TOML or JSON file, or use defaults
fn load_config(path: Option<&Path>) -> Result<DrvConfig, Box<dyn Error>> {
    let Some(path) = path else {
        return Ok(DrvConfig::default());
    };

    let text = std::fs::read_to_string(path)?;
    let config = match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => DrvConfig::from_json(&text)?,
        _ => DrvConfig::from_toml(&text)?,
    };
    tracing::debug!(path = %path.display(), "loaded configuration");
    Ok(config)
}

/// Ask for whichever inputs were not given as flags until they validate
fn prompt_distribution(
    session: &mut Session,
    input: &mut impl BufRead,
    args: &Args,
) -> Result<(), Box<dyn Error>> {
    loop {
        let support = match &args.support {
            Some(support) => support.clone(),
            None => prompt(input, "Values of x (separated by spaces): ")?,
        };
        let probs = match &args.probs {
            Some(probs) => probs.clone(),
            None => prompt(input, "Probabilities P(X = x), decimals or fractions: ")?,
        };

        match session.set_input(&support, &probs) {
            Ok(_) => return Ok(()),
            Err(e) => eprintln!("Error: {}", e),
        }
    }
}

/// Ask for g(x) until it evaluates; a blank line skips the transformation
fn prompt_transform(
    session: &Session,
    input: &mut impl BufRead,
) -> Result<Option<TransformReport>, Box<dyn Error>> {
    loop {
        let expr = prompt(input, "g(x) in terms of x (blank to skip): ")?;
        if expr.is_empty() {
            return Ok(None);
        }
        match session.transform(&expr) {
            Ok(report) => return Ok(Some(report)),
            Err(e) => eprintln!("Error: {}", e),
        }
    }
}

fn prompt(input: &mut impl BufRead, message: &str) -> io::Result<String> {
    eprint!("{}", message);
    io::stderr().flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "input ended before a value was entered",
        ));
    }
    Ok(line.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn args(support: Option<&str>, probs: Option<&str>) -> Args {
        Args {
            support: support.map(String::from),
            probs: probs.map(String::from),
            transform: None,
            config: None,
            json: false,
            print_config: false,
        }
    }

    #[test]
    fn test_prompt_retries_until_valid() {
        let mut session = Session::new();
        let mut input = Cursor::new("1 2\n0.5 0.4\n1 2\n0.5 0.5\n");
        prompt_distribution(&mut session, &mut input, &args(None, None)).unwrap();
        assert_eq!(session.distribution().unwrap().len(), 2);
    }

    #[test]
    fn test_prompt_only_missing_input() {
        let mut session = Session::new();
        let mut input = Cursor::new("1/4 3/4\n");
        prompt_distribution(&mut session, &mut input, &args(Some("0 1"), None)).unwrap();
        assert_eq!(session.dashboard().unwrap().summary.mean, 0.75);
    }

    #[test]
    fn test_prompt_eof_is_error() {
        let mut session = Session::new();
        let mut input = Cursor::new("");
        assert!(prompt_distribution(&mut session, &mut input, &args(None, None)).is_err());
    }

    #[test]
    fn test_prompt_transform() {
        let mut session = Session::new();
        session.set_input("1 2", "0.5 0.5").unwrap();

        let mut input = Cursor::new("log(x - 1)\n3*x\n");
        let report = prompt_transform(&session, &mut input).unwrap().unwrap();
        assert_eq!(report.summary.mean, 4.5);

        let mut blank = Cursor::new("\n");
        assert!(prompt_transform(&session, &mut blank).unwrap().is_none());
    }

    #[test]
    fn test_args_parse() {
        let args = Args::parse_from(["drv", "-s", "-1 0 1", "-p", "1/3 1/3 1/3", "--json"]);
        assert_eq!(args.support.as_deref(), Some("-1 0 1"));
        assert!(args.json);
        assert!(!args.print_config);
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = std::env::temp_dir().join(format!("drv-cli-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let toml_path = dir.join("drv.toml");
        std::fs::write(&toml_path, "[display]\nprecision = 2\n").unwrap();
        let config = load_config(Some(toml_path.as_path())).unwrap();
        assert_eq!(config.display.precision, 2);

        let json_path = dir.join("drv.json");
        std::fs::write(&json_path, config.to_json().unwrap()).unwrap();
        assert_eq!(load_config(Some(json_path.as_path())).unwrap(), config);

        // The printed form loads back unchanged
        std::fs::write(&toml_path, config.to_toml().unwrap()).unwrap();
        assert_eq!(load_config(Some(toml_path.as_path())).unwrap(), config);

        std::fs::remove_dir_all(&dir).unwrap();
        assert_eq!(load_config(None).unwrap(), DrvConfig::default());
    }
}
