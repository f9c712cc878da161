use serde::Deserialize;
use std::sync::LazyLock;

pub static CONFIG: LazyLock<Config> = LazyLock::new(|| {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.yaml".into());
    let config_file = std::fs::read_to_string(path).expect("failed to open config file");
    serde_yaml::from_str(&config_file).expect("failed to parse config file")
});

#[derive(Deserialize)]
pub struct Config {
    pub detector: Detector,
    pub verification: Verification,
    pub loki: Loki,
}

#[derive(Deserialize)]
pub struct Detector {
    pub url: String,
}

#[derive(Deserialize)]
pub struct Verification {
    pub batch_size: usize,
    pub public_dir: String,
}

#[derive(Deserialize)]
pub struct Loki {
    pub url: String,
}
