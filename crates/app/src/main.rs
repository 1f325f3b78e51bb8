use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use reading_core::Clock;
use services::{
    ApiConfig, ApiError, AppServices, AuthContext, ReadingApi, ReadingService, StaticTokenSource,
};
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    MissingApiBase,
    InvalidApiBase { raw: String },
    InvalidPageSize { raw: String },
    Env(ApiError),
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::MissingApiBase => {
                write!(f, "no backend configured: pass --api-base or set READING_API_BASE")
            }
            ArgsError::InvalidApiBase { raw } => write!(f, "invalid --api-base value: {raw}"),
            ArgsError::InvalidPageSize { raw } => write!(f, "invalid --page-size value: {raw}"),
            ArgsError::Env(err) => write!(f, "invalid environment: {err}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    services: AppServices,
    speech_enabled: bool,
}

impl UiApp for DesktopApp {
    fn clock(&self) -> Clock {
        self.services.clock()
    }

    fn history_page_size(&self) -> u32 {
        self.services.page_size()
    }

    fn speech_enabled(&self) -> bool {
        self.speech_enabled
    }

    fn auth(&self) -> Arc<AuthContext> {
        self.services.auth()
    }

    fn api(&self) -> Arc<dyn ReadingApi> {
        self.services.api()
    }

    fn reading_service(&self) -> Arc<ReadingService> {
        self.services.reading_service()
    }
}

#[derive(Debug)]
struct Args {
    config: ApiConfig,
    token: Option<String>,
    speech_enabled: bool,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- ui [--api-base <url>] [--token <token>] [--page-size <n>] [--no-speech]");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  READING_API_BASE, READING_API_TOKEN, READING_API_PAGE_SIZE, RUST_LOG");
}

impl Args {
    fn parse_ui(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut api_base = None;
        let mut page_size = None;
        let mut token = std::env::var("READING_API_TOKEN")
            .ok()
            .filter(|value| !value.trim().is_empty());
        let mut speech_enabled = true;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--api-base" => api_base = Some(require_value(args, "--api-base")?),
                "--token" => token = Some(require_value(args, "--token")?),
                "--page-size" => {
                    let value = require_value(args, "--page-size")?;
                    let parsed: u32 = value
                        .parse()
                        .ok()
                        .filter(|size| *size > 0)
                        .ok_or_else(|| ArgsError::InvalidPageSize { raw: value.clone() })?;
                    page_size = Some(parsed);
                }
                "--no-speech" => speech_enabled = false,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        let config = match api_base {
            Some(raw) => {
                ApiConfig::new(&raw).map_err(|_| ArgsError::InvalidApiBase { raw: raw.clone() })?
            }
            None => ApiConfig::from_env()
                .map_err(ArgsError::Env)?
                .ok_or(ArgsError::MissingApiBase)?,
        };
        let config = match page_size {
            Some(size) => config.with_page_size(size),
            None => config,
        };

        Ok(Self {
            config,
            token,
            speech_enabled,
        })
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // Launching the UI is the default; `ui` may be spelled out.
    match argv.first().map(String::as_str) {
        None | Some("ui") => {}
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => {}
        Some(first) => {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            return Err(ArgsError::UnknownArg(first.to_string()).into());
        }
    }
    if argv.first().is_some_and(|first| first == "ui") {
        argv.remove(0);
    }

    let mut iter = argv.into_iter();
    let parsed = Args::parse_ui(&mut iter).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    log::info!(
        "using reading backend {} (page size {})",
        parsed.config.base_url(),
        parsed.config.page_size()
    );
    let tokens = Arc::new(StaticTokenSource::new(parsed.token));
    let services = AppServices::http(parsed.config, tokens, Clock::system());
    let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
        services,
        speech_enabled: parsed.speech_enabled,
    });

    let context = build_app_context(&app);

    // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Daily Reading")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

#[tokio::main]
async fn main() {
    env_logger::init();
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
