//! Spot My Photo CLI
//!
//! Runs the attendee submission wizard from the command line and prints
//! match results for an attendee.

use clap::{Args, Parser, Subcommand};
use spot_my_photo::{
    capture::{CameraError, MediaCapture, MockCamera, StillImageSource},
    config::{ConfigError, FileConfig},
    context::{AppContext, ContextError},
    matches::ViewState,
    wizard::{WizardError, SUCCESS_NOTICE},
};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

/// Pause between capture attempts while the stream settles.
const CAPTURE_RETRY_DELAY: Duration = Duration::from_millis(200);

#[derive(Debug, Parser)]
#[command(name = "spot-my-photo", version, about = "Find your photos from events")]
struct Cli {
    /// TOML configuration file.
    #[arg(long, global = true, env = "SPOT_MY_PHOTO_CONFIG")]
    config: Option<PathBuf>,

    /// Overrides `api.base_url` from the configuration.
    #[arg(long, global = true, env = "SPOT_MY_PHOTO_API_URL")]
    api_url: Option<String>,

    /// Print Prometheus metrics before exiting.
    #[arg(long, global = true)]
    print_metrics: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Register with a photo so the service can find you in event photos.
    FindPhotos(FindPhotosArgs),
    /// Show the photos matched for an attendee.
    Matches {
        /// Attendee id returned by registration.
        attendee_id: String,
    },
}

#[derive(Debug, Args)]
struct FindPhotosArgs {
    /// Full name.
    #[arg(long)]
    name: String,
    /// Email address; optional when a phone number is given.
    #[arg(long, default_value = "")]
    email: String,
    /// Ten-digit phone number.
    #[arg(long, default_value = "")]
    phone: String,
    /// Consent to the use of the photo.
    #[arg(long)]
    accept_terms: bool,
    /// Use an existing photo instead of a camera.
    #[arg(long, conflicts_with = "device")]
    image: Option<PathBuf>,
    /// Capture from the webcam (requires the `camera` feature).
    #[arg(long)]
    device: bool,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),
    #[error("{0}")]
    Context(#[from] ContextError),
    #[error("{0}")]
    Camera(#[from] CameraError),
    #[error("{0}")]
    Wizard(#[from] WizardError),
    #[error("Phone number must contain only digits.")]
    InvalidPhone,
    #[error("No photo could be captured. Check the camera and try again.")]
    NoSnapshot,
    #[error("{0}")]
    Matches(String),
}

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();
    info!("Spot My Photo v{}", spot_my_photo::VERSION);

    if let Err(e) = run(cli).await {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let mut config = match &cli.config {
        Some(path) => FileConfig::from_file(path)?,
        None => FileConfig::default(),
    };
    if let Some(url) = cli.api_url {
        config.api.base_url = url;
    }

    let context = AppContext::init(config)?;

    let result = match cli.command {
        Command::FindPhotos(args) => find_photos(&context, args).await,
        Command::Matches { attendee_id } => show_matches(&context, &attendee_id).await,
    };

    if cli.print_metrics {
        match context.metrics().encode() {
            Ok(text) => println!("{}", text),
            Err(e) => warn!("Failed to encode metrics: {}", e),
        }
    }

    context.shutdown().await;
    result
}

async fn find_photos(context: &AppContext, args: FindPhotosArgs) -> Result<(), CliError> {
    let mut wizard = context.new_wizard();

    wizard.get_started()?;
    wizard.set_name(args.name.as_str())?;
    wizard.set_email(args.email.as_str())?;
    if !wizard.set_phone(&args.phone)? {
        return Err(CliError::InvalidPhone);
    }
    wizard.proceed_to_capture()?;

    let mut source = open_source(context, &args)?;
    let attempts = context.config().capture.warmup_attempts.max(1);
    let mut captured = false;
    for attempt in 1..=attempts {
        if wizard.capture(source.as_mut())? {
            captured = true;
            break;
        }
        warn!(attempt, "No snapshot yet, retrying");
        tokio::time::sleep(CAPTURE_RETRY_DELAY).await;
    }
    source.close();
    if !captured {
        return Err(CliError::NoSnapshot);
    }

    wizard.set_consent(args.accept_terms)?;
    wizard.submit(context.client()).await?;

    println!("{}", SUCCESS_NOTICE);
    Ok(())
}

fn open_source(
    context: &AppContext,
    args: &FindPhotosArgs,
) -> Result<Box<dyn MediaCapture>, CameraError> {
    let mut source: Box<dyn MediaCapture> = match (&args.image, args.device) {
        (Some(path), _) => Box::new(StillImageSource::new(path)),
        #[cfg(feature = "camera")]
        (None, true) => Box::new(spot_my_photo::capture::DeviceCamera::new()),
        #[cfg(not(feature = "camera"))]
        (None, true) => {
            return Err(CameraError::OpenFailed(
                "built without the `camera` feature".into(),
            ))
        }
        (None, false) => {
            warn!("No image source given, using the synthetic mock camera");
            Box::new(MockCamera::new())
        }
    };

    source.open(&context.config().capture)?;
    Ok(source)
}

async fn show_matches(context: &AppContext, attendee_id: &str) -> Result<(), CliError> {
    let mut view = context.new_match_view();
    view.load(context.client(), attendee_id).await;

    if let ViewState::Error(message) = view.state() {
        return Err(CliError::Matches(message.clone()));
    }
    print!("{}", view.render());
    Ok(())
}
