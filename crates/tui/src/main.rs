use cashflow_tui::{app, config, error::Result, logging};

#[tokio::main]
async fn main() -> Result<()> {
    let config = config::load()?;
    logging::init(&config)?;
    tracing::info!(base_url = %config.base_url, "starting");

    let mut app = app::App::new(config)?;
    app.run().await?;
    Ok(())
}
