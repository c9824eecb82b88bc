use anyhow::bail;
use tracing::info;

use crate::store::Store;
use crate::App;

/// Ping the paste store once and exit non-zero when it is unreachable.
/// Meant for container healthchecks and deploy smoke tests.
pub async fn run(mut app: App) -> anyhow::Result<()> {
    match app.store.ping().await {
        Ok(true) => {
            info!("paste store is reachable");
            Ok(())
        }
        Ok(false) => bail!("paste store did not answer ping"),
        Err(err) => Err(anyhow::Error::new(err).context("paste store ping failed")),
    }
}
