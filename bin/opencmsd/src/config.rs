use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Server configuration, loaded from a TOML file.
///
/// ```toml
/// [storage]
/// data_dir = "/var/lib/opencms"
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Base directory for the SQLite and redb database files.
    pub data_dir: String,
}

impl ServerConfig {
    /// Resolve a context name or literal path to a config file path.
    ///
    /// A bare name resolves to `/etc/opencms/<name>.toml`; anything
    /// containing `/` or `.` is taken as a path.
    pub fn resolve_path(name_or_path: &str) -> PathBuf {
        if name_or_path.contains('/') || name_or_path.contains('.') {
            PathBuf::from(name_or_path)
        } else {
            PathBuf::from(format!("/etc/opencms/{name_or_path}.toml"))
        }
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("cannot read {}: {}", path.display(), e))?;
        let config: ServerConfig = toml::from_str(&raw)
            .map_err(|e| anyhow::anyhow!("cannot parse {}: {}", path.display(), e))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_bare_name() {
        assert_eq!(
            ServerConfig::resolve_path("prod"),
            PathBuf::from("/etc/opencms/prod.toml")
        );
    }

    #[test]
    fn resolve_literal_path() {
        assert_eq!(
            ServerConfig::resolve_path("./dev.toml"),
            PathBuf::from("./dev.toml")
        );
    }

    #[test]
    fn parse_minimal_config() {
        let config: ServerConfig = toml::from_str("[storage]\ndata_dir = \"/tmp/opencms\"\n").unwrap();
        assert_eq!(config.storage.data_dir, "/tmp/opencms");
    }

    #[test]
    fn missing_storage_section_fails() {
        assert!(toml::from_str::<ServerConfig>("").is_err());
    }
}
