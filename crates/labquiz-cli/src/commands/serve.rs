//! The `labquiz serve` command.

use anyhow::Result;

use crate::StoreArgs;

pub async fn execute(store: StoreArgs, host: Option<String>, port: Option<u16>) -> Result<()> {
    let mut config = super::resolve_config(&store)?;
    if let Some(host) = host {
        config.host = host;
    }
    if let Some(port) = port {
        config.port = port;
    }

    if !config.questions_dir.is_dir() {
        tracing::warn!(
            "questions directory {} does not exist; no courses will be listed",
            config.questions_dir.display()
        );
    }

    labquiz_server::serve(config).await
}
