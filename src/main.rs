//! Purpose: `bento` CLI entry point.
//! Role: Binary crate root; parses args, builds the client, emits JSON on stdout.
//! Invariants: Results are printed as JSON (pretty on a terminal, compact otherwise).
//! Invariants: Non-interactive errors are emitted as JSON on stderr.
//! Invariants: Process exit code is derived from `api::to_exit_code`.
#![allow(clippy::result_large_err)]
use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum, error::ErrorKind as ClapErrorKind};
use clap_complete::aot::Shell;
use serde_json::{Map, Value, json};
use std::error::Error as StdError;
use tracing_subscriber::EnvFilter;

mod command_dispatch;

use bento::api::{BentoClient, Error, ErrorKind, to_exit_code};
use command_dispatch::dispatch_command;

fn main() {
    init_tracing();
    let exit_code = match run() {
        Ok(()) => 0,
        Err((err, color_mode)) => {
            emit_error(&err, color_mode);
            to_exit_code(err.kind())
        }
    };
    std::process::exit(exit_code);
}

fn run() -> Result<(), (Error, ColorMode)> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ClapErrorKind::DisplayHelp
            | ClapErrorKind::DisplayVersion
            | ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                err.print().map_err(|io_err| {
                    (
                        Error::new(ErrorKind::Usage)
                            .with_message("failed to write help")
                            .with_source(io_err),
                        ColorMode::Auto,
                    )
                })?;
                if matches!(
                    err.kind(),
                    ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
                ) {
                    return Err((
                        Error::new(ErrorKind::Usage).with_message("missing command"),
                        ColorMode::Auto,
                    ));
                }
                return Ok(());
            }
            _ => {
                return Err((
                    Error::new(ErrorKind::Usage)
                        .with_message(clap_error_summary(&err))
                        .with_hint("Run `bento --help` for usage."),
                    ColorMode::Auto,
                ));
            }
        },
    };

    let color_mode = cli.color;
    dispatch_command(cli.command, &cli.credentials).map_err(|err| (err, color_mode))
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn clap_error_summary(err: &clap::Error) -> String {
    let rendered = err.to_string();
    rendered
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(|line| line.trim_start_matches("error: ").to_string())
        .unwrap_or_else(|| "invalid arguments".to_string())
}

#[derive(Parser)]
#[command(
    name = "bento",
    version,
    about = "Command-line client for the Bento marketing API",
    long_about = None,
    after_help = r#"EXAMPLES
  $ export BENTO_SITE_UUID=... BENTO_USERNAME=... BENTO_PASSWORD=...
  $ bento tags list
  $ bento subscriber create ada@example.com
  $ bento commands '[{"command":"add_tag","email":"ada@example.com","query":"vip"}]'
  $ bento batch events @events.json"#,
    arg_required_else_help = true
)]
struct Cli {
    #[command(flatten)]
    credentials: Credentials,
    #[arg(
        long,
        global = true,
        default_value = "auto",
        value_enum,
        help = "Colorize stderr diagnostics: auto|always|never"
    )]
    color: ColorMode,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct Credentials {
    #[arg(long, global = true, env = "BENTO_SITE_UUID", help = "Site identifier")]
    site_uuid: Option<String>,
    #[arg(
        long,
        global = true,
        env = "BENTO_USERNAME",
        help = "API username (publishable key)"
    )]
    username: Option<String>,
    #[arg(
        long,
        global = true,
        env = "BENTO_PASSWORD",
        hide_env_values = true,
        help = "API password (secret key)"
    )]
    password: Option<String>,
    #[arg(
        long,
        global = true,
        env = "BENTO_BASE_URL",
        help = "Override the API base URL (default: https://app.bentonow.com/api/v1)"
    )]
    base_url: Option<String>,
}

impl Credentials {
    fn client(&self) -> Result<BentoClient, Error> {
        let site_uuid = required(&self.site_uuid, "site uuid", "--site-uuid", "BENTO_SITE_UUID")?;
        let username = required(&self.username, "username", "--username", "BENTO_USERNAME")?;
        let password = required(&self.password, "password", "--password", "BENTO_PASSWORD")?;
        let client = BentoClient::new(site_uuid, username, password);
        match self.base_url.as_deref() {
            Some(base_url) if !base_url.is_empty() => client.with_base_url(base_url),
            _ => Ok(client),
        }
    }
}

fn required<'a>(
    value: &'a Option<String>,
    label: &str,
    flag: &str,
    env: &str,
) -> Result<&'a str, Error> {
    match value.as_deref() {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(Error::new(ErrorKind::Usage)
            .with_message(format!("missing {label}"))
            .with_hint(format!("Pass {flag} or set {env}."))),
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ColorMode {
    Auto,
    Always,
    Never,
}

impl ColorMode {
    fn use_color(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    #[command(arg_required_else_help = true, about = "Look up or create a single subscriber")]
    Subscriber {
        #[command(subcommand)]
        command: SubscriberCommand,
    },
    #[command(
        arg_required_else_help = true,
        about = "Import many records in one request",
        after_help = r#"EXAMPLES
  $ bento batch subscribers '[{"email":"ada@example.com","first_name":"Ada"}]'
  $ bento batch events @events.json
  $ cat emails.json | bento batch emails -"#
    )]
    Batch {
        #[command(subcommand)]
        command: BatchCommand,
    },
    #[command(arg_required_else_help = true, about = "Inspect broadcasts")]
    Broadcasts {
        #[command(subcommand)]
        command: BroadcastsCommand,
    },
    #[command(arg_required_else_help = true, about = "List or create custom fields")]
    Fields {
        #[command(subcommand)]
        command: FieldsCommand,
    },
    #[command(arg_required_else_help = true, about = "List or create tags")]
    Tags {
        #[command(subcommand)]
        command: TagsCommand,
    },
    #[command(
        arg_required_else_help = true,
        about = "Run subscriber commands (add_tag, remove_tag, add_field, ...)"
    )]
    Commands {
        #[arg(help = "JSON array of commands: inline, @file, or - for stdin")]
        commands: String,
    },
    #[command(arg_required_else_help = true, about = "Site and segment statistics")]
    Stats {
        #[command(subcommand)]
        command: StatsCommand,
    },
    #[command(arg_required_else_help = true, about = "Experimental utility endpoints")]
    Experimental {
        #[command(subcommand)]
        command: ExperimentalCommand,
    },
    #[command(about = "Generate shell completion scripts")]
    Completion {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
enum SubscriberCommand {
    #[command(about = "Fetch a subscriber by email and/or uuid")]
    Get {
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        uuid: Option<String>,
    },
    #[command(about = "Create a subscriber")]
    Create { email: String },
}

#[derive(Subcommand)]
enum BatchCommand {
    #[command(about = "Import subscribers")]
    Subscribers {
        #[arg(help = "JSON array: inline, @file, or - for stdin")]
        records: String,
    },
    #[command(about = "Send transactional emails")]
    Emails {
        #[arg(help = "JSON array: inline, @file, or - for stdin")]
        records: String,
    },
    #[command(about = "Track events")]
    Events {
        #[arg(help = "JSON array: inline, @file, or - for stdin")]
        records: String,
    },
    #[command(about = "Create broadcasts")]
    Broadcasts {
        #[arg(help = "JSON array: inline, @file, or - for stdin")]
        records: String,
    },
}

#[derive(Subcommand)]
enum BroadcastsCommand {
    #[command(about = "List broadcasts")]
    List,
}

#[derive(Subcommand)]
enum FieldsCommand {
    #[command(about = "List custom fields")]
    List,
    #[command(about = "Create a custom field")]
    Create { key: String },
}

#[derive(Subcommand)]
enum TagsCommand {
    #[command(about = "List tags")]
    List,
    #[command(about = "Create a tag")]
    Create { name: String },
}

#[derive(Subcommand)]
enum StatsCommand {
    #[command(about = "Site-wide statistics")]
    Site,
    #[command(about = "Statistics for one segment")]
    Segment { segment_id: String },
}

#[derive(Subcommand)]
enum ExperimentalCommand {
    #[command(about = "Check a domain and/or IP against blacklists")]
    Blacklist {
        #[arg(long)]
        domain: Option<String>,
        #[arg(long)]
        ip: Option<String>,
    },
    #[command(about = "Validate an email address")]
    ValidateEmail {
        email: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        user_agent: Option<String>,
        #[arg(long)]
        ip: Option<String>,
    },
    #[command(about = "Run content moderation on a string")]
    Moderate { content: String },
    #[command(about = "Guess gender from a first name")]
    Gender { name: String },
    #[command(about = "Geolocate an IP address")]
    Geolocate { ip: String },
}

/// Reads a JSON array argument: inline text, `@path`, or `-` for stdin.
fn read_json_records(input: &str) -> Result<Vec<Value>, Error> {
    let text = if input == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf).map_err(|err| {
            Error::new(ErrorKind::Usage)
                .with_message("failed to read stdin")
                .with_source(err)
        })?;
        buf
    } else if let Some(path) = input.strip_prefix('@') {
        let path = PathBuf::from(path);
        fs::read_to_string(&path).map_err(|err| {
            Error::new(ErrorKind::Usage)
                .with_message(format!("failed to read {}", path.display()))
                .with_source(err)
        })?
    } else {
        input.to_string()
    };

    let value: Value = serde_json::from_str(&text).map_err(|err| {
        Error::new(ErrorKind::Usage)
            .with_message("input is not valid json")
            .with_hint("Pass a JSON array inline, as @file, or via - on stdin.")
            .with_source(err)
    })?;
    match value {
        Value::Array(records) => Ok(records),
        _ => Err(Error::new(ErrorKind::Usage)
            .with_message("input must be a json array")
            .with_hint("Wrap a single record in [ ... ].")),
    }
}

fn emit_json(value: Value) {
    let pretty = io::stdout().is_terminal();
    let json = if pretty {
        serde_json::to_string_pretty(&value)
    } else {
        serde_json::to_string(&value)
    }
    .unwrap_or_else(|_| "{\"error\":\"json encode failed\"}".to_string());
    println!("{json}");
}

#[derive(Copy, Clone, Debug)]
enum AnsiColor {
    Red,
    Yellow,
}

fn colorize_label(label: &str, enabled: bool, color: AnsiColor) -> String {
    if !enabled {
        return label.to_string();
    }
    let code = match color {
        AnsiColor::Red => "31",
        AnsiColor::Yellow => "33",
    };
    format!("\u{1b}[{code}m{label}\u{1b}[0m")
}

fn emit_error(err: &Error, color_mode: ColorMode) {
    let is_tty = io::stderr().is_terminal();
    if is_tty {
        eprintln!("{}", error_text(err, color_mode.use_color(is_tty)));
        return;
    }

    let value = error_json(err);
    let json = serde_json::to_string(&value).unwrap_or_else(|_| {
        "{\"error\":{\"kind\":\"Request\",\"message\":\"json encode failed\"}}".to_string()
    });
    eprintln!("{json}");
}

fn error_message(err: &Error) -> String {
    match err.kind() {
        ErrorKind::Request => err.to_string(),
        ErrorKind::Usage => err
            .message()
            .map(str::to_string)
            .unwrap_or_else(|| "usage error".to_string()),
    }
}

fn error_causes(err: &Error) -> Vec<String> {
    let mut causes = Vec::new();
    let mut cur = err.source();
    while let Some(source) = cur {
        causes.push(source.to_string());
        cur = source.source();
    }
    causes
}

fn error_json(err: &Error) -> Value {
    let mut inner = Map::new();
    inner.insert("kind".to_string(), json!(format!("{:?}", err.kind())));
    inner.insert("message".to_string(), json!(error_message(err)));
    if let Some(hint) = err.hint() {
        inner.insert("hint".to_string(), json!(hint));
    }
    let causes = error_causes(err);
    if !causes.is_empty() {
        inner.insert("causes".to_string(), json!(causes));
    }

    let mut outer = Map::new();
    outer.insert("error".to_string(), Value::Object(inner));
    Value::Object(outer)
}

fn error_text(err: &Error, use_color: bool) -> String {
    let mut lines = vec![format!(
        "{} {}",
        colorize_label("error:", use_color, AnsiColor::Red),
        error_message(err)
    )];

    if let Some(hint) = err.hint() {
        lines.push(format!(
            "{} {hint}",
            colorize_label("hint:", use_color, AnsiColor::Yellow)
        ));
    }

    let causes = error_causes(err);
    if let Some(cause) = causes.first() {
        lines.push(format!(
            "{} {cause}",
            colorize_label("caused by:", use_color, AnsiColor::Yellow)
        ));
    }

    lines.join("\n")
}
