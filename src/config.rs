use std::path::{Path, PathBuf};

use crate::{
    dataset::MalformedPolicy,
    error::{Error, Result},
    hmm::{tagger::Strategy, trainer::SMOOTHING_FLOOR},
};

/// Everything one tagging run needs, after command-line parsing.
#[derive(Debug, Clone)]
pub struct Config {
    pub training_data: PathBuf,
    pub test_data: PathBuf,
    /// Context order `n`.
    pub order: usize,
    pub strategy: Strategy,
    pub smoothing: f64,
    pub malformed: MalformedPolicy,
}

impl Config {
    pub fn new<P: Into<PathBuf>, Q: Into<PathBuf>>(training_data: P, test_data: Q) -> Self {
        Self {
            training_data: training_data.into(),
            test_data: test_data.into(),
            order: 1,
            strategy: Strategy::default(),
            smoothing: SMOOTHING_FLOOR,
            malformed: MalformedPolicy::default(),
        }
    }

    /// Checks inputs before any model work starts.
    pub fn validate(&self) -> Result<()> {
        check_input_file("training data", &self.training_data)?;
        check_input_file("test data", &self.test_data)?;
        if self.order == 0 {
            return Err(Error::config("context order n must be at least 1"));
        }
        if !(self.smoothing > 0.0 && self.smoothing < 1.0) {
            return Err(Error::config(format!("smoothing floor must be in (0, 1), got {}", self.smoothing)));
        }
        Ok(())
    }
}

/// Fails unless `path` names an existing regular file.
pub fn check_input_file(what: &str, path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(Error::config(format!("{what} file {} does not exist", path.display())));
    }
    if !path.is_file() {
        return Err(Error::config(format!("{what} path {} is not a file", path.display())));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/data/train.txt")
    }

    #[test]
    fn accepts_existing_files() {
        Config::new(fixture(), fixture()).validate().unwrap();
    }

    #[test]
    fn rejects_missing_file() {
        let err = Config::new(fixture(), "tests/data/does-not-exist.txt").validate().unwrap_err();
        match err {
            Error::Config(msg) => assert!(msg.contains("test data"), "{msg}"),
            e => panic!("unexpected error: {e}"),
        }
    }

    #[test]
    fn rejects_directory() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests");
        let err = Config::new(dir, fixture()).validate().unwrap_err();
        match err {
            Error::Config(msg) => assert!(msg.contains("is not a file"), "{msg}"),
            e => panic!("unexpected error: {e}"),
        }
    }

    #[test]
    fn rejects_bad_numbers() {
        let mut config = Config::new(fixture(), fixture());
        config.order = 0;
        assert!(config.validate().is_err());
        config.order = 2;
        config.smoothing = 1.5;
        assert!(config.validate().is_err());
    }
}
