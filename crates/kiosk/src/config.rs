use std::path::{Path, PathBuf};
use std::{env, fs};

use directories::ProjectDirs;
use formflow::FlowSettings;
use lazy_static::lazy_static;
use serde::Deserialize;
use tracing::debug;

#[derive(Clone, Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data_dir: PathBuf,
    #[serde(default)]
    pub config_dir: PathBuf,
    #[serde(default)]
    pub flows: FlowSettings,
}

const QUALIFIER: &str = "dev";
const ORGANIZATION: &str = "formflow";

lazy_static! {
    pub static ref PROJECT_NAME: String = env!("CARGO_CRATE_NAME").to_uppercase().to_string();
    pub static ref DATA_FOLDER: Option<PathBuf> =
        env::var(format!("{}_DATA", PROJECT_NAME.clone()))
            .ok()
            .map(PathBuf::from);
    pub static ref CONFIG_FOLDER: Option<PathBuf> =
        env::var(format!("{}_CONFIG", PROJECT_NAME.clone()))
            .ok()
            .map(PathBuf::from);
    pub static ref LOG_ENV: String = format!("{}_LOG_LEVEL", PROJECT_NAME.clone());
}

impl Config {
    /// Layer priority (last wins):
    /// 1) built-in defaults
    /// 2) `config.json5` / `config.toml` in the config directory
    /// 3) `KIOSK__SECTION__KEY` environment variables
    /// 4) the file passed via `--config`
    pub fn new(explicit: Option<&Path>) -> Result<Self, config::ConfigError> {
        let data_dir = get_data_dir();
        let config_dir = get_config_dir();
        let mut builder = config::Config::builder()
            .set_default("data_dir", data_dir.to_string_lossy().into_owned())?
            .set_default("config_dir", config_dir.to_string_lossy().into_owned())?;

        let config_files = [
            ("config.json5", config::FileFormat::Json5),
            ("config.toml", config::FileFormat::Toml),
        ];
        for (file, format) in &config_files {
            let path = config_dir.join(file);
            if path.exists() {
                debug!("using config file {}", path.display());
            }
            builder = builder.add_source(config::File::from(path).format(*format).required(false));
        }

        builder = builder.add_source(
            config::Environment::with_prefix(&PROJECT_NAME)
                .separator("__")
                .try_parsing(true),
        );

        if let Some(path) = explicit {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let cfg: Self = builder.build()?.try_deserialize()?;
        Ok(cfg)
    }
}

pub fn get_data_dir() -> PathBuf {
    if let Some(s) = DATA_FOLDER.clone() {
        s
    } else if let Some(proj_dirs) = project_directory() {
        proj_dirs.data_local_dir().to_path_buf()
    } else {
        PathBuf::from(".").join(".data")
    }
}

pub fn get_config_dir() -> PathBuf {
    if let Some(s) = CONFIG_FOLDER.clone() {
        s
    } else if let Some(proj_dirs) = project_directory() {
        proj_dirs.config_local_dir().to_path_buf()
    } else {
        PathBuf::from(".").join(".config")
    }
}

fn project_directory() -> Option<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, env!("CARGO_PKG_NAME"))
}

pub fn ensure_data_dir_exists(config: &Config) -> std::io::Result<()> {
    if !config.data_dir.exists() {
        fs::create_dir_all(&config.data_dir)?;
    }
    Ok(())
}
