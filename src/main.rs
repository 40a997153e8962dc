mod telemetry;

use hackwatch_engine::Engine;
use hackwatch_infra::{run_migration, setup_context};
use telemetry::{get_subscriber, init_subscriber};
use tracing::info;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    openssl_probe::init_ssl_cert_env_vars();

    let subscriber = get_subscriber("hackwatch_worker".into(), "info".into());
    init_subscriber(subscriber);

    run_migration().await.expect("TO MIGRATE THE DATABASE");
    let context = setup_context().await;

    Engine::new(context).start();
    info!("Worker started. Lifecycle and reminder jobs are scheduled.");

    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received, stopping.");
    Ok(())
}
