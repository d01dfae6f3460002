use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use opticode_client::prelude::*;
use opticode_client::{render::render_loading, DEFAULT_MODEL, KNOWN_MODELS};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Prints validation warnings to stderr
struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn notify_blocking(&self, message: &str) {
        eprintln!("warning: {message}");
    }
}

fn cli() -> Command {
    Command::new("opticode")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Send code to the OptiCode backend and render its security report")
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Enable debug logging"),
        )
        .subcommand_required(true)
        .subcommand(
            Command::new("analyze")
                .about("Analyze a file (or stdin) and print the rendered report")
                .arg(
                    Arg::new("file")
                        .value_parser(value_parser!(PathBuf))
                        .help("Source file; reads stdin when absent or '-'"),
                )
                .arg(
                    Arg::new("model")
                        .short('m')
                        .long("model")
                        .help("Model identifier (e.g. gemini, groq)"),
                )
                .arg(
                    Arg::new("endpoint")
                        .long("endpoint")
                        .help("Backend base URL"),
                )
                .arg(
                    Arg::new("config")
                        .short('c')
                        .long("config")
                        .value_parser(value_parser!(PathBuf))
                        .help("TOML config file"),
                )
                .arg(
                    Arg::new("timeout")
                        .long("timeout")
                        .value_parser(value_parser!(u64))
                        .help("Request timeout in seconds"),
                )
                .arg(
                    Arg::new("out")
                        .short('o')
                        .long("out")
                        .value_parser(value_parser!(PathBuf))
                        .help("Write the rendered report to this file instead of stdout"),
                )
                .arg(
                    Arg::new("page")
                        .long("page")
                        .action(ArgAction::SetTrue)
                        .help("Wrap the report in a standalone HTML page"),
                ),
        )
        .subcommand(Command::new("models").about("List known model identifiers"))
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// File values first, then command-line overrides
fn resolve_config(args: &ArgMatches) -> Result<ClientConfig> {
    let mut config = match args.get_one::<PathBuf>("config") {
        Some(path) => ClientConfig::load(path)?,
        None => ClientConfig::new(),
    };
    if let Some(endpoint) = args.get_one::<String>("endpoint") {
        config = config.with_endpoint(endpoint.clone());
    }
    if let Some(secs) = args.get_one::<u64>("timeout") {
        config = config.with_timeout_secs(*secs);
    }
    config.validate()?;
    Ok(config)
}

fn read_code(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display())),
        _ => {
            let mut code = String::new();
            std::io::stdin()
                .read_to_string(&mut code)
                .context("reading stdin")?;
            Ok(code)
        }
    }
}

fn standalone_page(fragment: &str) -> String {
    format!(
        concat!(
            "<!DOCTYPE html>\n",
            "<html lang=\"en\">\n",
            "<head><meta charset=\"utf-8\"><title>OptiCode Report</title></head>\n",
            "<body>\n<div id=\"output\">{}</div>\n</body>\n",
            "</html>\n"
        ),
        fragment
    )
}

fn exit_code(outcome: SubmitOutcome) -> i32 {
    match outcome {
        SubmitOutcome::Rendered(_) => 0,
        SubmitOutcome::Failed => 1,
        SubmitOutcome::Aborted => 2,
    }
}

async fn analyze(args: &ArgMatches) -> Result<i32> {
    let config = resolve_config(args)?;
    let model = args
        .get_one::<String>("model")
        .cloned()
        .unwrap_or_else(|| config.default_model.clone());
    let code = read_code(args.get_one::<PathBuf>("file").map(PathBuf::as_path))?;

    let controller = AnalysisController::from_config(&config, StderrNotifier)?;
    let input = FormInput::new(code, model.clone());

    if !input.code.trim().is_empty() {
        eprintln!("{}", render_loading(&model));
    }
    let outcome = controller.submit(input).await;
    tracing::debug!(?outcome, "submission finished");

    if outcome != SubmitOutcome::Aborted {
        let fragment = controller.region().html();
        let report = if args.get_flag("page") {
            standalone_page(&fragment)
        } else {
            fragment
        };
        match args.get_one::<PathBuf>("out") {
            Some(path) => std::fs::write(path, report)
                .with_context(|| format!("writing {}", path.display()))?,
            None => println!("{report}"),
        }
    }

    Ok(exit_code(outcome))
}

fn list_models() {
    for model in KNOWN_MODELS {
        if *model == DEFAULT_MODEL {
            println!("{model} (default)");
        } else {
            println!("{model}");
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let matches = cli().get_matches();
    init_tracing(matches.get_flag("verbose"));

    match matches.subcommand() {
        Some(("analyze", args)) => {
            let code = analyze(args).await?;
            std::process::exit(code);
        }
        Some(("models", _)) => list_models(),
        _ => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn cli_definition_is_valid() {
        cli().debug_assert();
    }

    #[test]
    fn flags_override_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "endpoint = \"http://from-file:3000\"").unwrap();
        writeln!(file, "default_model = \"groq\"").unwrap();

        let path = file.path().to_str().unwrap().to_string();
        let matches = cli().get_matches_from([
            "opticode",
            "analyze",
            "--config",
            &path,
            "--endpoint",
            "http://from-flag:4000",
        ]);
        let (_, args) = matches.subcommand().unwrap();

        let config = resolve_config(args).unwrap();
        assert_eq!(config.endpoint, "http://from-flag:4000");
        assert_eq!(config.default_model, "groq");
    }

    #[test]
    fn bad_endpoint_flag_rejected() {
        let matches = cli().get_matches_from(["opticode", "analyze", "--endpoint", "localhost"]);
        let (_, args) = matches.subcommand().unwrap();
        assert!(resolve_config(args).is_err());
    }

    #[test]
    fn reads_code_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "eval(x)").unwrap();
        assert_eq!(read_code(Some(file.path())).unwrap(), "eval(x)");
    }

    #[test]
    fn exit_codes() {
        assert_eq!(exit_code(SubmitOutcome::Rendered(Verdict::NotSecure)), 0);
        assert_eq!(exit_code(SubmitOutcome::Failed), 1);
        assert_eq!(exit_code(SubmitOutcome::Aborted), 2);
    }

    #[test]
    fn page_wraps_fragment() {
        let page = standalone_page("<p>x</p>");
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<div id=\"output\"><p>x</p></div>"));
    }
}
