use std::path::PathBuf;

use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;

#[derive(Clone, Debug, Deserialize)]
pub struct Settings {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub database_path: String,
    pub static_dir: PathBuf,
}

pub fn get_settings() -> Result<Settings, config::ConfigError> {
    dotenv::dotenv().ok();
    config::Config::builder()
        .set_default("host", "0.0.0.0")?
        .set_default("port", "8080")?
        .set_default("database_path", "interview_prep.db")?
        .set_default("static_dir", "static")?
        .add_source(config::Environment::default())
        .build()?
        .try_deserialize()
}
