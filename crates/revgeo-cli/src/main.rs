mod surface;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use revgeo_core::{AppConfig, Coordinates};
use revgeo_pipeline::{
    ControllerOptions, LocationResolver, LocationSnapshot, MapInteractionController, Waypoints,
};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use crate::surface::{FixedLocator, LoggingSurface};

#[derive(Debug, Parser)]
#[command(name = "revgeo")]
#[command(about = "Resolve map locations into addresses and summaries, and plan a route")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Resolve a point as if it were clicked on the map (sets the origin).
    Resolve(PointArgs),
    /// Search a place by name (sets the destination).
    Search {
        query: String,
    },
    /// Click an origin, search a destination, then route between them.
    Route {
        #[arg(long, allow_hyphen_values = true)]
        from_lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        from_lng: f64,
        /// Destination place name.
        to: String,
    },
    /// Press the home button: resolve the device position (or the fallback).
    Locate {
        #[arg(long, requires = "lng", allow_hyphen_values = true)]
        lat: Option<f64>,
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lng: Option<f64>,
    },
}

#[derive(Debug, Args)]
struct PointArgs {
    #[arg(long, allow_hyphen_values = true)]
    lat: f64,
    #[arg(long, allow_hyphen_values = true)]
    lng: f64,
}

#[derive(Debug, Serialize)]
struct RouteOutput {
    waypoints: Waypoints,
    locations: LocationSnapshot,
}

type Controller = MapInteractionController<LoggingSurface, FixedLocator>;

fn build_controller(
    config: &AppConfig,
    device: Option<Coordinates>,
) -> anyhow::Result<Controller> {
    let resolver =
        LocationResolver::from_config(config).context("failed to build HTTP clients")?;
    Ok(MapInteractionController::new(
        resolver,
        LoggingSurface,
        FixedLocator(device),
        ControllerOptions::from(config),
    ))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn init_tracing(config: &AppConfig) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Arguments first: `--help` must work even with a broken `REVGEO_*` value.
    let cli = Cli::parse();
    let config = revgeo_core::load_app_config()?;
    init_tracing(&config)?;
    tracing::debug!(env = %config.env, ?config, "configuration loaded");

    run(cli, &config).await
}

async fn run(cli: Cli, config: &AppConfig) -> anyhow::Result<()> {
    match cli.command {
        Some(Commands::Resolve(point)) => {
            let at = Coordinates::new(point.lat, point.lng)?;
            let controller = build_controller(config, None)?;
            let record = controller
                .on_click(at)
                .await
                .unwrap_or_else(|| controller.detail());
            print_json(&record)?;
        }
        Some(Commands::Search { query }) => {
            let controller = build_controller(config, None)?;
            let Some(record) = controller.on_search(&query).await else {
                anyhow::bail!("no place found for '{query}'");
            };
            print_json(&record)?;
        }
        Some(Commands::Route {
            from_lat,
            from_lng,
            to,
        }) => {
            let from = Coordinates::new(from_lat, from_lng)?;
            let controller = build_controller(config, None)?;
            controller.on_click(from).await;
            if controller.on_search(&to).await.is_none() {
                anyhow::bail!("no place found for '{to}'");
            }
            let waypoints = controller.navigate();
            print_json(&RouteOutput {
                waypoints,
                locations: controller.store().snapshot(),
            })?;
        }
        Some(Commands::Locate { lat, lng }) => {
            let device = match (lat, lng) {
                (Some(lat), Some(lng)) => Some(Coordinates::new(lat, lng)?),
                _ => None,
            };
            let controller = build_controller(config, device)?;
            let record = controller
                .on_home_button()
                .await
                .unwrap_or_else(|| controller.detail());
            print_json(&record)?;
        }
        None => {
            let controller = build_controller(config, None)?;
            let record = controller.start().await;
            print_json(&record)?;
        }
    }

    Ok(())
}
