//! voxml - speech markup flattener

use std::io::Read;
use std::process::ExitCode;

use clap::Parser;

use voxml::util::decode_text;
use voxml::{FlattenOptions, Schema, flatten, parse, validate};

#[derive(Parser)]
#[command(name = "voxml")]
#[command(version, about = "Flatten speech markup to plain text with timing estimates", long_about = None)]
#[command(after_help = "EXAMPLES:
    voxml input.xml             Parse, validate, and flatten a document
    voxml --check input.xml     Validate only (exit 1 if issues found)
    voxml --json input.xml      Emit machine-readable JSON")]
struct Cli {
    /// Input file ("-" for stdin)
    #[arg(value_name = "INPUT")]
    input: String,

    /// Speaking rate in words per minute
    #[arg(long, default_value_t = 180.0)]
    wpm: f64,

    /// Validate only; exit nonzero if any issues are found
    #[arg(long)]
    check: bool,

    /// Disable whitespace normalization in the flattened text
    #[arg(long)]
    raw: bool,

    /// Emit JSON instead of human-readable output
    #[arg(long)]
    json: bool,

    /// Suppress validation warnings
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(clean) => {
            if cli.check && !clean {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Returns whether the document validated cleanly.
fn run(cli: &Cli) -> Result<bool, String> {
    let bytes = read_input(&cli.input)?;
    let text = decode_text(&bytes, None);

    let doc = parse(&text).map_err(|e| e.to_string())?;
    let issues = validate(&doc, &Schema::default());

    if cli.check {
        if cli.json {
            let report = serde_json::json!({ "issues": issues });
            println!("{}", to_json(&report)?);
        } else {
            for issue in &issues {
                println!("{issue}");
            }
        }
        return Ok(issues.is_empty());
    }

    let options = FlattenOptions {
        wpm: cli.wpm,
        normalize_whitespace: !cli.raw,
    };
    let result = flatten(&doc, &options);

    if cli.json {
        let report = serde_json::json!({ "issues": issues, "result": result });
        println!("{}", to_json(&report)?);
        return Ok(issues.is_empty());
    }

    if !cli.quiet {
        for issue in &issues {
            eprintln!("warning: {issue}");
        }
    }
    println!("{}", result.text);
    println!("break seconds: {}", result.break_seconds);
    println!("duration seconds: {}", result.duration_seconds);

    Ok(issues.is_empty())
}

fn read_input(path: &str) -> Result<Vec<u8>, String> {
    if path == "-" {
        let mut bytes = Vec::new();
        std::io::stdin()
            .read_to_end(&mut bytes)
            .map_err(|e| e.to_string())?;
        Ok(bytes)
    } else {
        std::fs::read(path).map_err(|e| format!("{path}: {e}"))
    }
}

fn to_json(value: &serde_json::Value) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|e| e.to_string())
}
