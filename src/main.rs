use std::future::Future;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use serde::Serialize;

use exoplanet_sky::catalog::vertices;
use exoplanet_sky::{ExoplanetDataService, ServiceConfig};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Query {
    /// Confirmed exoplanets as scene points
    Confirmed,
    /// Flat starfield particle buffer
    Particles,
    /// ML-scored candidates
    Candidates,
    /// All three, fetched concurrently
    All,
}

/// Query the exoplanet catalog and print scene-ready JSON.
#[derive(Parser, Debug)]
#[command(name = "exoplanet-sky", version)]
struct Cli {
    #[arg(value_enum, default_value_t = Query::All)]
    query: Query,

    /// Catalog service endpoint
    #[arg(long, default_value = exoplanet_sky::config::DEFAULT_BASE_URL)]
    base_url: String,

    /// Row limit (defaults per query: 50 / 1000 / 20)
    #[arg(long)]
    limit: Option<usize>,

    /// Give up on the whole query after this many seconds
    #[arg(long)]
    deadline_secs: Option<u64>,

    /// Print particles as [x, y, z] triples instead of a flat buffer
    #[arg(long)]
    triples: bool,
}

#[derive(Serialize)]
struct AllResults<C, P, M> {
    confirmed: C,
    particles: P,
    candidates: M,
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let service = match ExoplanetDataService::new(ServiceConfig::new(cli.base_url.clone())) {
        Ok(s) => s,
        Err(e) => {
            log::error!("Failed to start: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let deadline = cli.deadline_secs.map(Duration::from_secs);
    let cfg = service.config().clone();

    let output = match cli.query {
        Query::Confirmed => {
            let limit = cli.limit.unwrap_or(cfg.confirmed_limit);
            with_deadline(deadline, service.confirmed_exoplanets(limit))
                .await
                .map(|r| serde_json::to_value(r))
        }
        Query::Particles => {
            let limit = cli.limit.unwrap_or(cfg.particle_limit);
            with_deadline(deadline, service.star_particle_coordinates(limit))
                .await
                .map(|flat| particles_json(&flat, cli.triples))
        }
        Query::Candidates => {
            let limit = cli.limit.unwrap_or(cfg.candidate_limit);
            with_deadline(deadline, service.candidates_with_ml(limit))
                .await
                .map(|r| serde_json::to_value(r))
        }
        Query::All => {
            let all = async {
                tokio::join!(
                    service.confirmed_exoplanets(cli.limit.unwrap_or(cfg.confirmed_limit)),
                    service.star_particle_coordinates(cli.limit.unwrap_or(cfg.particle_limit)),
                    service.candidates_with_ml(cli.limit.unwrap_or(cfg.candidate_limit)),
                )
            };
            with_deadline(deadline, all)
                .await
                .map(|(confirmed, flat, candidates)| {
                    particles_json(&flat, cli.triples).and_then(|particles| {
                        serde_json::to_value(AllResults {
                            confirmed,
                            particles,
                            candidates,
                        })
                    })
                })
        }
    };

    match output {
        Some(Ok(json)) => match serde_json::to_string_pretty(&json) {
            Ok(s) => {
                println!("{}", s);
                ExitCode::SUCCESS
            }
            Err(e) => {
                log::error!("Failed to encode output: {}", e);
                ExitCode::FAILURE
            }
        },
        Some(Err(e)) => {
            log::error!("Failed to encode output: {}", e);
            ExitCode::FAILURE
        }
        None => {
            log::error!("Deadline of {:?} exceeded", deadline.unwrap_or_default());
            ExitCode::FAILURE
        }
    }
}

/// `None` when the deadline elapsed first.
async fn with_deadline<F: Future>(deadline: Option<Duration>, fut: F) -> Option<F::Output> {
    match deadline {
        Some(d) => tokio::time::timeout(d, fut).await.ok(),
        None => Some(fut.await),
    }
}

fn particles_json(flat: &[f64], triples: bool) -> serde_json::Result<serde_json::Value> {
    if triples {
        serde_json::to_value(vertices(flat))
    } else {
        serde_json::to_value(flat)
    }
}
