use std::sync::Arc;

use doorman_core::config::Config;

#[tokio::main]
async fn main() -> Result<(), doorman_core::Error> {
    doorman_core::logging::init("doorman")?;

    let cfg = Arc::new(Config::load()?);

    doorman_telegram::router::run_polling(cfg)
        .await
        .map_err(|e| doorman_core::Error::External(format!("telegram bot failed: {e}")))?;

    Ok(())
}
