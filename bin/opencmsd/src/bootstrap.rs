//! Bootstrap — first-start checks and default content types.

use cms::service::CmsService;
use opencms_core::ServiceError;
use tracing::info;

use crate::config::ServerConfig;

/// Content types every fresh installation starts with: (key, name, segment).
const DEFAULT_TYPES: &[(&str, &str, &str)] = &[
    ("page", "Pages", "pages"),
    ("post", "Posts", "posts"),
];

/// Verify server configuration is usable before touching storage.
pub fn verify_config(config: &ServerConfig) -> anyhow::Result<()> {
    if config.storage.data_dir.is_empty() {
        anyhow::bail!("storage.data_dir is empty in configuration");
    }
    Ok(())
}

/// Ensure the default content types exist. Creates the missing ones.
pub fn ensure_default_types(svc: &CmsService) -> anyhow::Result<()> {
    for (key, name, segment) in DEFAULT_TYPES {
        match svc.get_type(key) {
            Ok(_) => {}
            Err(ServiceError::NotFound(_)) => {
                svc.create_type((*key).to_string(), (*name).to_string(), (*segment).to_string())
                    .map_err(|e| anyhow::anyhow!("cannot create content type '{key}': {e}"))?;
                info!("Created default content type '{key}'");
            }
            Err(e) => return Err(anyhow::anyhow!("cannot check content type '{key}': {e}")),
        }
    }
    Ok(())
}
