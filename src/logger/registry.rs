use super::LogError;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

pub const DEFAULT_LOG_NAME: &str = "default";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogFiles {
    Single(PathBuf),
    Named(BTreeMap<String, PathBuf>),
}

impl From<&str> for LogFiles {
    fn from(value: &str) -> Self {
        Self::Single(PathBuf::from(value))
    }
}

impl From<String> for LogFiles {
    fn from(value: String) -> Self {
        Self::Single(PathBuf::from(value))
    }
}

impl From<&Path> for LogFiles {
    fn from(value: &Path) -> Self {
        Self::Single(value.to_path_buf())
    }
}

impl From<PathBuf> for LogFiles {
    fn from(value: PathBuf) -> Self {
        Self::Single(value)
    }
}

impl<K: Into<String>, P: Into<PathBuf>> From<BTreeMap<K, P>> for LogFiles {
    fn from(value: BTreeMap<K, P>) -> Self {
        Self::Named(
            value
                .into_iter()
                .map(|(name, path)| (name.into(), path.into()))
                .collect(),
        )
    }
}

impl<K: Into<String>, P: Into<PathBuf>> From<HashMap<K, P>> for LogFiles {
    fn from(value: HashMap<K, P>) -> Self {
        Self::Named(
            value
                .into_iter()
                .map(|(name, path)| (name.into(), path.into()))
                .collect(),
        )
    }
}

impl<K: Into<String>, P: Into<PathBuf>, const N: usize> From<[(K, P); N]> for LogFiles {
    fn from(value: [(K, P); N]) -> Self {
        Self::Named(
            value
                .into_iter()
                .map(|(name, path)| (name.into(), path.into()))
                .collect(),
        )
    }
}

impl TryFrom<serde_yaml::Value> for LogFiles {
    type Error = LogError;

    fn try_from(value: serde_yaml::Value) -> Result<Self, Self::Error> {
        use serde_yaml::Value;

        match value {
            Value::String(path) => Ok(Self::Single(PathBuf::from(path))),
            Value::Mapping(mapping) => {
                let mut named = BTreeMap::new();
                for (key, path) in mapping {
                    let (Value::String(key), Value::String(path)) = (key, path) else {
                        return Err(LogError::Construction(
                            "log files mapping must map names to path strings".to_string(),
                        ));
                    };
                    named.insert(key, PathBuf::from(path));
                }
                Ok(Self::Named(named))
            }
            _ => Err(LogError::Construction(
                "expected a single path or a mapping of log names to paths".to_string(),
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRegistry {
    logs: BTreeMap<String, PathBuf>,
}

impl LogRegistry {
    pub fn new(files: LogFiles) -> Result<Self, LogError> {
        let logs = match files {
            LogFiles::Single(path) => BTreeMap::from([(DEFAULT_LOG_NAME.to_string(), path)]),
            LogFiles::Named(logs) => logs,
        };
        if logs.is_empty() {
            return Err(LogError::Construction(
                "at least one log file must be registered".to_string(),
            ));
        }
        for (name, path) in &logs {
            if name.trim().is_empty() {
                return Err(LogError::Construction(
                    "log names must be non-empty".to_string(),
                ));
            }
            if path.as_os_str().is_empty() {
                return Err(LogError::Construction(format!(
                    "log `{name}` has an empty path"
                )));
            }
        }
        Ok(Self { logs })
    }

    pub fn path_of(&self, log_name: &str) -> Result<&Path, LogError> {
        self.logs
            .get(log_name)
            .map(PathBuf::as_path)
            .ok_or_else(|| LogError::UnknownLog {
                log_name: log_name.to_string(),
            })
    }

    pub fn contains(&self, log_name: &str) -> bool {
        self.logs.contains_key(log_name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.logs.keys().map(String::as_str)
    }

    pub(crate) fn resolve_relative_to(&mut self, base: &Path) {
        for path in self.logs.values_mut() {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_path_registers_under_default() {
        let registry = LogRegistry::new(LogFiles::from("app.log")).expect("registry");
        assert_eq!(registry.names().count(), 1);
        assert_eq!(
            registry.path_of(DEFAULT_LOG_NAME).expect("default"),
            Path::new("app.log")
        );
    }

    #[test]
    fn named_mapping_is_used_verbatim() {
        let registry =
            LogRegistry::new(LogFiles::from([("errors", "e.log"), ("access", "a.log")]))
                .expect("registry");
        assert!(!registry.contains(DEFAULT_LOG_NAME));
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["access", "errors"]);
    }

    #[test]
    fn hash_map_input_becomes_named_logs() {
        let files = LogFiles::from(HashMap::from([("access", "a.log"), ("errors", "e.log")]));
        assert_eq!(
            files,
            LogFiles::Named(BTreeMap::from([
                ("access".to_string(), PathBuf::from("a.log")),
                ("errors".to_string(), PathBuf::from("e.log")),
            ]))
        );
        let registry = LogRegistry::new(files).expect("registry");
        assert_eq!(
            registry.path_of("errors").expect("errors"),
            Path::new("e.log")
        );
    }

    #[test]
    fn rejects_empty_mapping_and_blank_names() {
        let empty: BTreeMap<String, PathBuf> = BTreeMap::new();
        assert!(matches!(
            LogRegistry::new(LogFiles::from(empty)),
            Err(LogError::Construction(_))
        ));
        assert!(matches!(
            LogRegistry::new(LogFiles::from([(" ", "a.log")])),
            Err(LogError::Construction(_))
        ));
        assert!(matches!(
            LogRegistry::new(LogFiles::from([("a", "")])),
            Err(LogError::Construction(_))
        ));
    }

    #[test]
    fn unknown_name_is_reported() {
        let registry = LogRegistry::new(LogFiles::from("app.log")).expect("registry");
        let err = registry.path_of("other").expect_err("unknown log");
        assert!(matches!(err, LogError::UnknownLog { log_name } if log_name == "other"));
    }

    #[test]
    fn yaml_sequence_is_a_construction_error() {
        let value: serde_yaml::Value = serde_yaml::from_str("[a.log, b.log]").expect("yaml");
        assert!(matches!(
            LogFiles::try_from(value),
            Err(LogError::Construction(_))
        ));
    }
}
