use std::{fs, process::ExitCode};

use clap::Parser;
use env_logger::Env;
use rpnexpr::Expression;

/// rpnexpr evaluates and differentiates postfix (reverse Polish) expressions
/// such as `x 2 ^ 3 x * +`.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells rpnexpr to read the expression from a file.
    #[arg(short, long)]
    file: bool,

    /// Binds a variable, for example `--set x=2`. May be repeated.
    #[arg(short, long = "set", value_name = "NAME=VALUE", value_parser = parse_binding)]
    set: Vec<(String, f64)>,

    /// Differentiates with respect to this variable before evaluating. May be
    /// repeated for higher derivatives.
    #[arg(short, long = "derive", value_name = "VAR")]
    derive: Vec<String>,

    /// Only validates the expression and prints every problem found.
    #[arg(short, long)]
    check: bool,

    /// Prints the derivative as postfix text instead of evaluating it.
    #[arg(short, long)]
    print: bool,

    /// Enables debug logging.
    #[arg(short, long)]
    verbose: bool,

    contents: String,
}

fn parse_binding(binding: &str) -> Result<(String, f64), String> {
    let (name, value) = binding.split_once('=')
                               .ok_or_else(|| format!("expected NAME=VALUE, found '{binding}'"))?;
    let value = value.trim()
                     .parse()
                     .map_err(|e| format!("invalid value for '{name}': {e}"))?;
    Ok((name.trim().to_string(), value))
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

    match run(args) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        },
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        },
    }
}

fn run(args: Args) -> Result<String, Box<dyn std::error::Error>> {
    let source = if args.file {
        fs::read_to_string(&args.contents).map_err(|e| {
                                               format!("Failed to read the input file '{}': {e}",
                                                       &args.contents)
                                           })?
    } else {
        args.contents
    };

    let mut expr = Expression::from_postfix(&source)?;
    expr.set_variables(args.set)?;
    for (name, value) in expr.environment().iter() {
        log::debug!("binding {name} = {value}");
    }

    if args.check {
        let result = expr.validate();
        if result.valid {
            return Ok("valid".to_string());
        }
        return Err(result.errors.join("\n").into());
    }

    for var in &args.derive {
        expr = expr.derivative(var)?;
    }

    if args.print {
        return Ok(expr.to_string());
    }

    Ok(expr.evaluate()?.to_string())
}
