//! Wayfarer server binary.
//!
//! Reads configuration from flags, the environment and an optional `.env`
//! file, then runs the requested command.

mod args;

use std::sync::Arc;

use anyhow::{Context, Result};
use args::{Args, Commands, ServerArgs};
use clap::Parser;
use log::{info, warn};
use wayfarer_core::{
    DisabledGenerator, GroqConfig, GroqGenerator, TextGenerator, TripPlanner, TripPlannerBuilder,
};
use wayfarer_server::{router, AppState};
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let Args {
        database_file,
        server,
        command,
    } = Args::parse();

    let planner = TripPlannerBuilder::new()
        .with_database_path(database_file)
        .with_generator(generator(&server)?)
        .build()
        .await
        .context("Failed to initialize planner")?;

    match command.unwrap_or(Serve) {
        InitDb => {
            println!("Database ready at {}", planner.database_path().display());
            Ok(())
        }
        Seed => {
            if planner
                .seed_catalogue()
                .await
                .context("Failed to seed catalogue")?
            {
                println!("Seeded sample catalogue");
            } else {
                println!("Catalogue already populated, nothing seeded");
            }
            Ok(())
        }
        Serve => serve(planner, &server).await,
    }
}

fn generator(server: &ServerArgs) -> Result<Arc<dyn TextGenerator>> {
    let Some(api_key) = server.groq_api_key.clone() else {
        warn!("GROQ_API_KEY is not set, text generation is disabled");
        return Ok(Arc::new(DisabledGenerator));
    };
    let config = GroqConfig {
        api_key,
        model: server.groq_model.clone(),
        base_url: server.groq_base_url.clone(),
    };
    let generator = GroqGenerator::new(config).context("Failed to create Groq client")?;
    Ok(Arc::new(generator))
}

async fn serve(planner: TripPlanner, server: &ServerArgs) -> Result<()> {
    info!(
        "Wayfarer started with database {} and generator {}",
        planner.database_path().display(),
        planner.generator_name()
    );

    let app = router(AppState::new(planner));
    let listener = tokio::net::TcpListener::bind(server.bind)
        .await
        .with_context(|| format!("Failed to bind {}", server.bind))?;
    info!("Listening on http://{}", server.bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            info!("Shutting down");
        })
        .await
        .context("HTTP server failed")
}
