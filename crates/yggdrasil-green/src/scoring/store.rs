use super::config::{ScoringConfig, ScoringConfigError, ValidationMode};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Source of the scoring weight table. Implementations are asked for a fresh config on
/// every scoring call, so they may reflect edits without a restart.
pub trait ScoringConfigStore: Send + Sync {
    fn load(&self) -> Result<ScoringConfig, ScoringConfigError>;
}

/// Reads the weight table from a JSON document on disk.
#[derive(Debug, Clone)]
pub struct FileScoringConfigStore {
    path: PathBuf,
    mode: ValidationMode,
}

impl FileScoringConfigStore {
    pub fn new<P: AsRef<Path>>(path: P, mode: ValidationMode) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            mode,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoringConfigStore for FileScoringConfigStore {
    fn load(&self) -> Result<ScoringConfig, ScoringConfigError> {
        let location = self.path.display().to_string();
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(ScoringConfigError::NotFound { location });
            }
            Err(source) => return Err(ScoringConfigError::Unreadable { location, source }),
        };

        let config: ScoringConfig =
            serde_json::from_str(&raw).map_err(|source| ScoringConfigError::Malformed {
                location: location.clone(),
                source,
            })?;

        config
            .validate(self.mode)
            .map_err(|violation| ScoringConfigError::Invalid {
                location: location.clone(),
                violation,
            })?;

        debug!(%location, version = %config.version, "scoring config loaded");
        Ok(config)
    }
}

/// Holds a weight table in memory; `None` behaves like an empty store.
#[derive(Debug, Clone, Default)]
pub struct StaticScoringConfigStore {
    config: Option<ScoringConfig>,
    mode: ValidationMode,
}

impl StaticScoringConfigStore {
    pub fn new(config: ScoringConfig, mode: ValidationMode) -> Self {
        Self {
            config: Some(config),
            mode,
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }
}

impl ScoringConfigStore for StaticScoringConfigStore {
    fn load(&self) -> Result<ScoringConfig, ScoringConfigError> {
        let location = "memory".to_string();
        let config = self
            .config
            .clone()
            .ok_or_else(|| ScoringConfigError::NotFound {
                location: location.clone(),
            })?;

        config
            .validate(self.mode)
            .map_err(|violation| ScoringConfigError::Invalid {
                location,
                violation,
            })?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::config::ConfigViolation;
    use crate::scoring::stage::LifecycleStageKind;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write config");
        file
    }

    #[test]
    fn missing_file_reports_not_found() {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = FileScoringConfigStore::new(
            dir.path().join("scoring_config.json"),
            ValidationMode::Strict,
        );

        match store.load() {
            Err(ScoringConfigError::NotFound { location }) => {
                assert!(location.ends_with("scoring_config.json"));
            }
            other => panic!("expected not found, got {other:?}"),
        }
    }

    #[test]
    fn loads_versioned_weights_from_disk() {
        let file = write_config(
            r#"{
                "version": "v1.0",
                "description": "Rule-based weighting",
                "weights": {
                    "materials": 0.35,
                    "production": 0.30,
                    "transport": 0.20,
                    "end_of_life": 0.15
                }
            }"#,
        );
        let store = FileScoringConfigStore::new(file.path(), ValidationMode::Strict);

        let config = store.load().expect("config loads");
        assert_eq!(config.version, "v1.0");
        assert_eq!(config.weights.len(), 4);
        assert_eq!(config.weights[&LifecycleStageKind::Materials], 0.35);
    }

    #[test]
    fn unknown_stage_key_is_invalid() {
        let file = write_config(r#"{"version":"v1.0","weights":{"materials":0.5,"shipping":0.5}}"#);
        let store = FileScoringConfigStore::new(file.path(), ValidationMode::Strict);

        let err = store.load().expect_err("unknown key refused");
        assert!(err.is_invalid());
        assert!(matches!(err, ScoringConfigError::Malformed { .. }));
    }

    #[test]
    fn weight_sum_is_checked_according_to_mode() {
        let contents = r#"{"version":"v0.9","weights":{"materials":0.5,"production":0.3}}"#;
        let file = write_config(contents);

        let strict = FileScoringConfigStore::new(file.path(), ValidationMode::Strict);
        match strict.load() {
            Err(ScoringConfigError::Invalid {
                violation: ConfigViolation::WeightSum { .. },
                ..
            }) => {}
            other => panic!("expected weight sum violation, got {other:?}"),
        }

        let relaxed = FileScoringConfigStore::new(file.path(), ValidationMode::Relaxed);
        let config = relaxed.load().expect("relaxed load succeeds");
        assert_eq!(config.version, "v0.9");
    }

    #[test]
    fn empty_static_store_reports_not_found() {
        let store = StaticScoringConfigStore::empty();
        assert!(matches!(
            store.load(),
            Err(ScoringConfigError::NotFound { .. })
        ));
    }

    #[test]
    fn static_store_validates_on_every_load() {
        let mut config = ScoringConfig::standard();
        config.weights.insert(LifecycleStageKind::Use, -1.0);
        let store = StaticScoringConfigStore::new(config, ValidationMode::Relaxed);

        let err = store.load().expect_err("negative weight refused");
        assert!(err.is_invalid());
    }
}
