use std::net::SocketAddr;
use std::path::PathBuf;

use crate::application::services::roster_service::RenamePolicy;

mod bootstrap;

pub use bootstrap::{AppServices, build_services};

/// Runtime configuration, resolved from the environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Directory holding the key-value store files and logs
    pub data_root: PathBuf,

    /// Address the HTTP server binds to
    pub bind_addr: SocketAddr,

    /// How group renames onto existing names are handled
    pub rename_policy: RenamePolicy,
}

impl AppConfig {
    /// Read configuration from `CLASSBOARD_*` environment variables,
    /// falling back to local-use defaults
    pub fn from_env() -> Result<Self, String> {
        let data_root = std::env::var("CLASSBOARD_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data"));

        let bind_addr = match std::env::var("CLASSBOARD_BIND_ADDR") {
            Ok(raw) => raw
                .parse()
                .map_err(|e| format!("invalid CLASSBOARD_BIND_ADDR {raw:?}: {e}"))?,
            Err(_) => SocketAddr::from(([127, 0, 0, 1], 8787)),
        };

        let rename_policy = match std::env::var("CLASSBOARD_RENAME_POLICY") {
            Ok(raw) => raw.parse()?,
            Err(_) => RenamePolicy::default(),
        };

        Ok(Self {
            data_root,
            bind_addr,
            rename_policy,
        })
    }

    pub fn log_dir(&self) -> PathBuf {
        self.data_root.join("logs")
    }
}

#[cfg(test)]
mod tests {
    use crate::application::services::roster_service::RenamePolicy;

    #[test]
    fn rename_policy_parses_case_insensitively() {
        assert_eq!("merge".parse::<RenamePolicy>(), Ok(RenamePolicy::Merge));
        assert_eq!("Reject".parse::<RenamePolicy>(), Ok(RenamePolicy::Reject));
        assert!("other".parse::<RenamePolicy>().is_err());
    }
}
