//! CLI for rendering HTML-safe templates.
//!
//! ## Usage
//!
//! ```bash
//! # Escaped placeholder
//! bhtml '<p>${name}</p>' --var name='<Tom & Jerry>'
//!
//! # Raw placeholder (trusted markup) and repeated values as a sequence
//! bhtml '<ul>$${items}</ul>' --var items='<li>a</li>' --var items='<li>b</li>'
//!
//! # Template from a file, values from JSON
//! bhtml --file page.html --json values.json
//!
//! # List the placeholders a template expects
//! bhtml --list --file page.html
//!
//! # Generate shell completions
//! source <(COMPLETE=bash bhtml)
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::{CommandFactory, Parser, ValueHint};
use clap_complete::Shell;
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use biscuit_html::{Substitution, TemplateSource, Values};

/// Render HTML-safe templates: ${name} is escaped, $${name} is inserted raw
#[derive(Parser)]
#[command(name = "bhtml", version, about, long_about = None)]
#[command(after_help = AFTER_HELP)]
struct Cli {
    /// Template text (use "-" to read from stdin)
    #[arg(value_name = "TEMPLATE")]
    template: Option<String>,

    /// Read the template from a file instead
    #[arg(short, long, value_name = "PATH", value_hint = ValueHint::FilePath, conflicts_with = "template")]
    file: Option<PathBuf>,

    /// Value for a placeholder; repeat a name to build a sequence
    #[arg(long = "var", value_name = "NAME=VALUE")]
    vars: Vec<String>,

    /// JSON object of placeholder values (use "-" to read from stdin)
    #[arg(long, value_name = "PATH")]
    json: Option<String>,

    /// Print the placeholder names the template uses and exit
    #[arg(short, long)]
    list: bool,

    /// Increase log verbosity (-v, -vv)
    #[arg(short = 'v', action = clap::ArgAction::Count)]
    verbose: u8,
}

const AFTER_HELP: &str = "\
SHELL COMPLETIONS:
  Enable tab completions by adding one line to your shell config:

  Bash (~/.bashrc):
    source <(COMPLETE=bash bhtml)

  Zsh (~/.zshrc):
    source <(COMPLETE=zsh bhtml)

  Fish (~/.config/fish/config.fish):
    COMPLETE=fish bhtml | source

EXAMPLES:
  bhtml '<p>${name}</p>' --var name='<b>'          # <p>&lt;b&gt;</p>
  bhtml '<p>$${html}</p>' --var html='<b>hi</b>'   # <p><b>hi</b></p>
  bhtml --file page.html --json values.json        # Values from JSON
  bhtml --list --file page.html                    # Placeholder names
";

fn main() {
    // Check for shell completion generation before parsing args
    if let Ok(shell_name) = std::env::var("COMPLETE") {
        generate_completions(&shell_name);
        return;
    }

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Show help if no template provided and stdin is a terminal
    if cli.template.is_none() && cli.file.is_none() && io::stdin().is_terminal() {
        let _ = Cli::command().print_help();
        println!();
        return;
    }

    match run(&cli) {
        Ok(output) => println!("{output}"),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

/// Parses the template and either lists its placeholders or renders it.
fn run(cli: &Cli) -> Result<String, String> {
    let text = get_template(cli)?;
    let source = TemplateSource::parse(&text).map_err(|e| e.to_string())?;

    if cli.list {
        return Ok(source.names().join("\n"));
    }

    let values = collect_values(cli)?;
    tracing::debug!(values = values.len(), "collected values");

    source.render(&values).map_err(|e| e.to_string())
}

/// Get template text from positional arg, file, or stdin.
fn get_template(cli: &Cli) -> Result<String, String> {
    if let Some(ref path) = cli.file {
        return fs::read_to_string(path)
            .map_err(|e| format!("Failed to read file '{}': {e}", path.display()));
    }

    match cli.template.as_deref() {
        Some("-") => read_from_stdin(),
        Some(template) => Ok(template.to_string()),
        None => {
            if !io::stdin().is_terminal() {
                read_from_stdin()
            } else {
                Err("No template provided. Use positional argument, --file, or pipe to stdin.".into())
            }
        }
    }
}

/// Merge `--json` and `--var` values; `--var` wins on conflicts.
fn collect_values(cli: &Cli) -> Result<Values, String> {
    let mut values = Values::new();

    if let Some(ref json_path) = cli.json {
        let reads_template_from_stdin =
            cli.file.is_none() && matches!(cli.template.as_deref(), None | Some("-"));
        if json_path == "-" && reads_template_from_stdin {
            return Err("Cannot read both the template and --json values from stdin".into());
        }
        values.extend(read_json_values(json_path)?);
    }

    let mut vars: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for var in &cli.vars {
        let (name, value) = var
            .split_once('=')
            .ok_or_else(|| format!("Invalid --var '{var}': expected NAME=VALUE"))?;
        vars.entry(name.trim().to_string())
            .or_default()
            .push(value.to_string());
    }

    for (name, mut items) in vars {
        let substitution = if items.len() == 1 {
            Substitution::Scalar(items.remove(0))
        } else {
            Substitution::Sequence(items)
        };
        values.insert(name, substitution);
    }

    Ok(values)
}

/// Read a JSON object of values from a file or stdin.
fn read_json_values(path: &str) -> Result<Values, String> {
    let content = if path == "-" {
        read_from_stdin()?
    } else {
        fs::read_to_string(path).map_err(|e| format!("Failed to read file '{path}': {e}"))?
    };

    let parsed: serde_json::Value =
        serde_json::from_str(&content).map_err(|e| format!("Invalid JSON in '{path}': {e}"))?;

    match parsed {
        serde_json::Value::Object(map) => Ok(map
            .into_iter()
            .map(|(name, value)| (name, Substitution::from(value)))
            .collect()),
        _ => Err(format!("JSON values in '{path}' must be an object")),
    }
}

/// Read all of stdin.
fn read_from_stdin() -> Result<String, String> {
    let mut content = String::new();
    io::stdin()
        .read_to_string(&mut content)
        .map_err(|e| format!("Failed to read from stdin: {e}"))?;

    if content.is_empty() {
        return Err("Empty input from stdin".into());
    }

    Ok(content)
}

/// Logs go to stderr; `RUST_LOG` takes precedence over `-v`.
fn init_tracing(verbose: u8) {
    let base_filter = match std::env::var("RUST_LOG") {
        Ok(filter) => filter,
        Err(_) => match verbose {
            0 => "warn".to_string(),
            1 => "warn,biscuit_html=debug".to_string(),
            _ => "debug,biscuit_html=trace".to_string(),
        },
    };

    let filter = EnvFilter::try_new(&base_filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_writer(io::stderr)
                .compact(),
        )
        .init();
}

/// Generate shell completions and exit.
fn generate_completions(shell_name: &str) {
    let shell = match shell_name.to_lowercase().as_str() {
        "bash" => Shell::Bash,
        "zsh" => Shell::Zsh,
        "fish" => Shell::Fish,
        "powershell" => Shell::PowerShell,
        "elvish" => Shell::Elvish,
        _ => {
            eprintln!(
                "Unknown shell: {shell_name}. Supported: bash, zsh, fish, powershell, elvish"
            );
            std::process::exit(1);
        }
    };

    clap_complete::generate(shell, &mut Cli::command(), "bhtml", &mut io::stdout());
}
