use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use shelf_core::model::UserProfile;
use shelf_services::{
    AppServices, BookService, IdentityService, ProgressService, ReadingFlow, ReviewService,
};
use shelf_ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidApiUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidApiUrl { raw } => write!(f, "invalid --api-url value: {raw}"),
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
    launch_profile: Option<UserProfile>,
}

impl UiApp for DesktopApp {
    fn api_url(&self) -> String {
        self.services.api_url().to_string()
    }

    fn launch_profile(&self) -> Option<UserProfile> {
        self.launch_profile.clone()
    }

    fn identity(&self) -> Arc<IdentityService> {
        self.services.identity()
    }

    fn books(&self) -> Arc<BookService> {
        self.services.books()
    }

    fn progress(&self) -> Arc<ProgressService> {
        self.services.progress()
    }

    fn reviews(&self) -> Arc<ReviewService> {
        self.services.reviews()
    }

    fn reader(&self) -> Arc<ReadingFlow> {
        self.services.reader()
    }
}

struct Args {
    api_url: String,
    token: Option<String>,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p shelf-app -- [--api-url <url>] [--token <token>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --api-url http://localhost:5000");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  BOOKSHELF_API_URL, BOOKSHELF_TOKEN");
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut api_url = std::env::var("BOOKSHELF_API_URL")
            .ok()
            .map_or_else(|| "http://localhost:5000".into(), normalize_api_url);
        let mut token = std::env::var("BOOKSHELF_TOKEN")
            .ok()
            .filter(|value| !value.trim().is_empty());

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--api-url" => {
                    let value = require_value(args, "--api-url")?;
                    let normalized = normalize_api_url(value.clone());
                    if !normalized.starts_with("http://") && !normalized.starts_with("https://") {
                        return Err(ArgsError::InvalidApiUrl { raw: value });
                    }
                    api_url = normalized;
                }
                "--token" => {
                    let value = require_value(args, "--token")?;
                    token = Some(value).filter(|v| !v.trim().is_empty());
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self { api_url, token })
    }
}

fn normalize_api_url(raw: String) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut iter = std::env::args().skip(1);
    let args = Args::parse(&mut iter).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let services = AppServices::new_http(&args.api_url);

    // Resolve the launch token before the window opens, so the first
    // render already knows who is signed in. A bad token starts the
    // app signed out rather than refusing to start.
    let launch_profile = match args.token {
        None => None,
        Some(token) => match services.identity().sign_in(token).await {
            Ok(profile) => Some(profile),
            Err(e) => {
                tracing::warn!(error = %e, "Launch token rejected, starting signed out");
                None
            }
        },
    };

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
        services,
        launch_profile,
    });
    let context = build_app_context(&app);

    // Dioxus/tao can default to an always-on-top window in some dev
    // setups. Explicitly disable it so the app doesn't behave like a
    // modal window.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Bookshelf")
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
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
