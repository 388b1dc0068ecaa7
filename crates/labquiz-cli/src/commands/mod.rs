pub mod check;
pub mod init;
pub mod list;
pub mod serve;
pub mod validate;

use anyhow::Result;

use labquiz_server::QuizConfig;

use crate::StoreArgs;

/// Load config and apply the path flags on top.
pub fn resolve_config(store: &StoreArgs) -> Result<QuizConfig> {
    let mut config = labquiz_server::load_config_from(store.config.as_deref())?;
    if let Some(dir) = &store.questions_dir {
        config.questions_dir = dir.clone();
    }
    if let Some(dir) = &store.marker_dir {
        config.marker_dir = dir.clone();
    }
    Ok(config)
}
