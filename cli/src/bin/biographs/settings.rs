use config::ConfigError;
use std::ops::Deref;

#[derive(Debug, Deserialize)]
pub struct Logging {
    pub debug: bool,
}

#[derive(Debug, Deserialize)]
pub struct Data {
    pub dir: String,
}

/// Defaults for the `sample` command.
#[derive(Debug, Deserialize)]
pub struct Sampler {
    pub score_threshold: f64,
    pub node_attribute: String,
    pub regression: bool,
    pub no_interactions_ratio: f64,
    pub seed: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub logging: Logging,
    pub data: Data,
    pub sampler: Sampler,
}

impl Settings {
    /// Load the included default configuration, overwritten by the optional
    /// configuration file and `BIOGRAPHS_*` environment variables
    /// (e.g. `BIOGRAPHS_DATA__DIR`).
    pub fn with_file<S: Deref<Target = str>>(config_file: Option<S>) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder().add_source(config::File::from_str(
            include_str!("default-settings.toml"),
            config::FileFormat::Toml,
        ));

        if let Some(config_file) = config_file {
            builder = builder.add_source(config::File::new(&config_file, config::FileFormat::Toml));
        }

        builder
            .add_source(
                config::Environment::with_prefix("BIOGRAPHS")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}
