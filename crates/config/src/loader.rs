use std::path::Path;

use crate::Config;

pub fn load<P: AsRef<Path>>(path: P) -> crate::Result<Config> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;

    log::debug!("Loaded configuration from {}", path.display());

    Ok(config)
}
