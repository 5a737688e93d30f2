//! Layering of configuration sources.

use crate::config::loader::ConfigSource;
use crate::config::schema::Config;

/// Combines configuration layers. A field set in a later layer replaces the
/// same field from an earlier one; unset fields fall through.
///
/// # Examples
///
/// ```
/// use railbook::config::{Config, ConfigMerger};
///
/// let mut file = Config { maximum_lock_wait_seconds: Some(5), ..Default::default() };
/// let env = Config { maximum_lock_wait_seconds: Some(1), ..Default::default() };
///
/// ConfigMerger::merge_into(&mut file, &env);
/// assert_eq!(file.maximum_lock_wait_seconds, Some(1));
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Folds `sources`, weakest first, over an empty [`Config`].
    #[must_use]
    pub fn merge(sources: Vec<ConfigSource>) -> Config {
        sources.into_iter().fold(Config::default(), |mut merged, source| {
            Self::merge_into(&mut merged, &source.config);
            merged
        })
    }

    /// Overlays `layer` onto `target`.
    pub fn merge_into(target: &mut Config, layer: &Config) {
        target.maximum_lock_wait_seconds = layer
            .maximum_lock_wait_seconds
            .or(target.maximum_lock_wait_seconds);
        target.disable_autoinit = layer.disable_autoinit.or(target.disable_autoinit);
        target.output_format = layer.output_format.or(target.output_format);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use std::path::PathBuf;

    fn make_source(name: &str, config: Config) -> ConfigSource {
        ConfigSource {
            path: PathBuf::from(format!("{name}.yaml")),
            config,
        }
    }

    #[test]
    fn test_merge_overwrites() {
        let mut target = Config {
            output_format: Some(OutputFormat::Table),
            ..Default::default()
        };
        let source = Config {
            output_format: Some(OutputFormat::Tsv),
            ..Default::default()
        };

        ConfigMerger::merge_into(&mut target, &source);
        assert_eq!(target.output_format, Some(OutputFormat::Tsv));
    }

    #[test]
    fn test_merge_keeps_unset_fields() {
        let mut target = Config {
            disable_autoinit: Some(true),
            ..Default::default()
        };
        ConfigMerger::merge_into(&mut target, &Config::default());
        assert_eq!(target.disable_autoinit, Some(true));
    }

    #[test]
    fn test_merge_sources_in_order() {
        let sources = vec![
            make_source(
                "low",
                Config {
                    maximum_lock_wait_seconds: Some(30),
                    disable_autoinit: Some(true),
                    ..Default::default()
                },
            ),
            make_source(
                "high",
                Config {
                    maximum_lock_wait_seconds: Some(2),
                    ..Default::default()
                },
            ),
        ];

        let merged = ConfigMerger::merge(sources);
        assert_eq!(merged.maximum_lock_wait_seconds, Some(2));
        assert_eq!(merged.disable_autoinit, Some(true));
    }
}
