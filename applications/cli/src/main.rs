/// Waveplay - scripted playback sessions on a simulated engine
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use waveplay_cli::{HostConfig, Session, Step};
use waveplay_playback::{TrackCatalog, TrackSelector};

#[derive(Parser)]
#[command(name = "waveplay")]
#[command(about = "Drive the Waveplay playback coordinator from a terminal", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "WAVEPLAY_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the track catalog
    Catalog,
    /// Show the selector window around a track
    Window {
        /// Catalog index of the current track
        #[arg(short, long, default_value_t = 0)]
        index: usize,
    },
    /// Run a scripted session, e.g. `run tick:0 toggle tick:5 mute`
    Run {
        /// Steps: load:N url:PATH select:N toggle volume:V mute seek:S tick:S drop mount
        steps: Vec<Step>,
    },
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "waveplay=info,waveplay_cli=info,waveplay_playback=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = HostConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Catalog => list_catalog(&config.catalog()?),
        Commands::Window { index } => show_window(&config.catalog()?, index)?,
        Commands::Run { steps } => run(&config, &steps)?,
    }

    Ok(())
}

fn list_catalog(catalog: &TrackCatalog) {
    for track in catalog.tracks() {
        let cover = track.cover.as_deref().unwrap_or("-");
        println!("{:02}  {}  {}  {}", track.number, track.title, track.url, cover);
    }
}

fn show_window(catalog: &TrackCatalog, index: usize) -> anyhow::Result<()> {
    let track = catalog
        .get(index)
        .ok_or_else(|| anyhow::anyhow!("No track at index {index} ({} tracks)", catalog.len()))?;

    let selector = TrackSelector::for_url(catalog, Some(&track.url));
    for item in selector.window(catalog, Some(&track.url)) {
        let marker = if item.is_selected { '>' } else { ' ' };
        println!(
            "{marker} {:<7} [{}] {}  {}",
            format!("{:?}", item.slot).to_lowercase(),
            item.index,
            item.label(),
            item.track.title
        );
    }
    Ok(())
}

fn run(config: &HostConfig, steps: &[Step]) -> anyhow::Result<()> {
    let mut session = Session::start(config)?;
    print_report(&session, "start")?;

    for step in steps {
        session.apply(step)?;
        print_report(&session, step.to_string())?;
    }

    Ok(())
}

fn print_report(session: &Session, step: impl Into<String>) -> anyhow::Result<()> {
    let report = session.report(step);

    match &report.transport {
        Some(transport) => println!(
            "# {}  {} {}/{}  {:?}  vol {:.2}{}",
            report.step,
            transport.title,
            transport.elapsed,
            transport.total,
            transport.play_button,
            transport.slider_value,
            if report.state.is_muted { " (muted)" } else { "" }
        ),
        None => println!("# {}  (no track)", report.step),
    }
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
