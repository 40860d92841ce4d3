use std::path::PathBuf;

use btc_data_types::env_var;

/// Environment variable overriding the data home directory.
pub const DATA_HOME_ENV: &str = "BTC_DATA_HOME";

#[derive(Debug, Clone)]
pub struct DataPaths {
    base: PathBuf,
}

impl DataPaths {
    pub fn from_base(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    pub fn base_dir(&self) -> PathBuf {
        self.base.clone()
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.base.join("logs").join("mcp")
    }
}

/// `$BTC_DATA_HOME`, falling back to `~/.btc-data-mcp`.
pub fn default_paths() -> DataPaths {
    let base = env_var::<String>(DATA_HOME_ENV)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".btc-data-mcp")
        });
    DataPaths::from_base(base)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logs_live_under_base() {
        let paths = DataPaths::from_base("/tmp/btc-home");
        assert_eq!(paths.base_dir(), PathBuf::from("/tmp/btc-home"));
        assert_eq!(paths.logs_dir(), PathBuf::from("/tmp/btc-home/logs/mcp"));
    }
}
