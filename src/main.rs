use std::sync::Arc;

use anyhow::Context;
use api::api::start_server;

#[macro_use]
extern crate diesel;
#[macro_use]
extern crate diesel_migrations;

use clap::Parser;
use diesel::{r2d2::ConnectionManager, PgConnection};
use log::{info, warn};

use crate::config::Config;
use crate::repository::{InMemoryTodoRepository, PgTodoRepository};
use crate::service::{TodoManager, TodoService};
mod api;
mod config;
mod models;
mod repository;
mod schema;
mod service;

embed_migrations!();

#[derive(Debug, Parser)]
#[clap(author, version, about, long_about = "Todo list HTTP API")]
struct ServerArgs {
    /// Port to listen on, overrides PORT
    #[clap(short = 'p', long = "port")]
    port: Option<u16>,

    /// Keep todos in process memory instead of PostgreSQL
    #[clap(long = "in-memory")]
    in_memory: bool,
}

/// Connects the storage backend and wraps it in the todo service
fn build_service(config: &Config, in_memory: bool) -> anyhow::Result<Arc<dyn TodoService>> {
    if in_memory {
        warn!("Using in-memory storage, todos are lost on shutdown");
        return Ok(Arc::new(TodoManager::new(InMemoryTodoRepository::new())));
    }

    let database_url = config.require_database_url()?;

    let manager = ConnectionManager::<PgConnection>::new(database_url);

    let pool: models::Pool = r2d2::Pool::builder()
        .build(manager)
        .context("Failed to connect to PG database")?;

    let conn = pool.get()?;
    embedded_migrations::run(&conn).context("Failed to run database migrations")?;
    info!("Database migrations are up to date");

    Ok(Arc::new(TodoManager::new(PgTodoRepository::new(pool))))
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("todo_api=debug,actix_web=info,actix_server=info"),
    )
    .init();

    let args = ServerArgs::parse();

    let mut config = Config::from_env()?;

    if let Some(port) = args.port {
        config.port = port;
    }

    let service = build_service(&config, args.in_memory)?;

    start_server(config, service).await?;

    Ok(())
}
