mod app;
mod cli;
mod commands;
mod configuration;
mod context;
mod location;
mod rest;
mod sheets;
mod table;
mod tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    app::run().await
}
