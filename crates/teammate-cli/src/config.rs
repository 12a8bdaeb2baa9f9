use crate::cli::FormArgs;
use crate::error::{CliError, Result};
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use teammate::engine::config as core_config;
use tracing::debug;

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialFormationSection {
    #[serde(rename = "team-size")]
    team_size: Option<usize>,
    #[serde(rename = "team-count")]
    team_count: Option<usize>,
    #[serde(rename = "min-fill")]
    min_fill: Option<f64>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialSearchSection {
    attempts: Option<usize>,
    #[serde(rename = "timeout-secs")]
    timeout_secs: Option<u64>,
    seed: Option<u64>,
}

/// Formation settings read from a TOML file, every key optional.
///
/// ```toml
/// [formation]
/// team-size = 5
/// team-count = 4
/// min-fill = 0.8
///
/// [search]
/// attempts = 4
/// timeout-secs = 30
/// seed = 42
/// ```
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialFormationConfig {
    formation: Option<PartialFormationSection>,
    search: Option<PartialSearchSection>,
}

fn parse_value<T: FromStr>(key: &str, value: &str, kind: &str) -> Result<T> {
    value.trim().parse().map_err(|_| {
        CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value))
    })
}

impl PartialFormationConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Loads the file when one is given, otherwise starts from an empty configuration.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn merge_with_cli(mut self, args: &FormArgs) -> Result<core_config::FormationConfig> {
        self.apply_set_values(&args.set_values)?;

        let formation = self.formation.take().unwrap_or_default();
        let search = self.search.take().unwrap_or_default();

        let mut builder = core_config::FormationConfigBuilder::new()
            .team_size(
                args.team_size
                    .or(formation.team_size)
                    .unwrap_or(core_config::DEFAULT_TEAM_SIZE),
            )
            .attempts(
                args.attempts
                    .or(search.attempts)
                    .unwrap_or(core_config::DEFAULT_ATTEMPTS),
            );

        if let Some(count) = args.team_count.or(formation.team_count) {
            builder = builder.team_count(count);
        }
        if let Some(secs) = args.timeout.or(search.timeout_secs) {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if let Some(seed) = args.seed.or(search.seed) {
            builder = builder.seed(seed);
        }
        let cli_fill = args
            .min_fill
            .map(|ratio| ratio.unwrap_or(core_config::DEFAULT_MIN_FILL_RATIO));
        if let Some(ratio) = cli_fill.or(formation.min_fill) {
            builder = builder.acceptance(core_config::TeamAcceptance::MinimumFill(ratio));
        }

        builder.build().map_err(|e| CliError::Config(e.to_string()))
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let Some((key, value_str)) = kv_pair.split_once('=') else {
                return Err(CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                )));
            };
            let key = key.trim();

            match key {
                "formation.team-size" => {
                    self.formation
                        .get_or_insert_with(Default::default)
                        .team_size = Some(parse_value(key, value_str, "integer")?);
                }
                "formation.team-count" => {
                    self.formation
                        .get_or_insert_with(Default::default)
                        .team_count = Some(parse_value(key, value_str, "integer")?);
                }
                "formation.min-fill" => {
                    self.formation
                        .get_or_insert_with(Default::default)
                        .min_fill = Some(parse_value(key, value_str, "float")?);
                }
                "search.attempts" => {
                    self.search.get_or_insert_with(Default::default).attempts =
                        Some(parse_value(key, value_str, "integer")?);
                }
                "search.timeout-secs" => {
                    self.search
                        .get_or_insert_with(Default::default)
                        .timeout_secs = Some(parse_value(key, value_str, "integer")?);
                }
                "search.seed" => {
                    self.search.get_or_insert_with(Default::default).seed =
                        Some(parse_value(key, value_str, "integer")?);
                }
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }
}
