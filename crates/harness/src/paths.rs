//! File layout of a cross-validation run.
//!
//! Every stage reads the previous stage's output from disk, so all of them
//! must agree on file names. [`FoldPaths`] is the only place those names are
//! built:
//!
//! ```text
//! <split_dir>/train_{i}.csv
//! <split_dir>/test_{i}.csv
//! <rec_dir>/recs_{i}.csv
//! <strategy_dir>/strategymodel_{i}.csv
//! ```

use std::path::{Path, PathBuf};

/// The files a stage produces per fold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoldFile {
    Train,
    Test,
    Recommendations,
    StrategyModel,
}

impl FoldFile {
    fn prefix(&self) -> &'static str {
        match self {
            FoldFile::Train => "train",
            FoldFile::Test => "test",
            FoldFile::Recommendations => "recs",
            FoldFile::StrategyModel => "strategymodel",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoldPaths {
    split_dir: PathBuf,
    rec_dir: PathBuf,
    strategy_dir: PathBuf,
}

impl FoldPaths {
    pub fn new(
        split_dir: impl Into<PathBuf>,
        rec_dir: impl Into<PathBuf>,
        strategy_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            split_dir: split_dir.into(),
            rec_dir: rec_dir.into(),
            strategy_dir: strategy_dir.into(),
        }
    }

    /// Default layout under a dataset folder: splits and strategy models in
    /// `model/`, recommendations in `recommendations/`
    pub fn under(data_dir: &Path) -> Self {
        let model_dir = data_dir.join("model");
        Self::new(model_dir.clone(), data_dir.join("recommendations"), model_dir)
    }

    /// Directory holding files of `kind`
    pub fn dir(&self, kind: FoldFile) -> &Path {
        match kind {
            FoldFile::Train | FoldFile::Test => &self.split_dir,
            FoldFile::Recommendations => &self.rec_dir,
            FoldFile::StrategyModel => &self.strategy_dir,
        }
    }

    pub fn path(&self, kind: FoldFile, fold: usize) -> PathBuf {
        self.dir(kind).join(format!("{}_{}.csv", kind.prefix(), fold))
    }

    pub fn train(&self, fold: usize) -> PathBuf {
        self.path(FoldFile::Train, fold)
    }

    pub fn test(&self, fold: usize) -> PathBuf {
        self.path(FoldFile::Test, fold)
    }

    pub fn recommendations(&self, fold: usize) -> PathBuf {
        self.path(FoldFile::Recommendations, fold)
    }

    pub fn strategy_model(&self, fold: usize) -> PathBuf {
        self.path(FoldFile::StrategyModel, fold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let paths = FoldPaths::under(Path::new("data/ml-100k"));

        assert_eq!(paths.train(0), PathBuf::from("data/ml-100k/model/train_0.csv"));
        assert_eq!(paths.test(3), PathBuf::from("data/ml-100k/model/test_3.csv"));
        assert_eq!(
            paths.recommendations(1),
            PathBuf::from("data/ml-100k/recommendations/recs_1.csv")
        );
        assert_eq!(
            paths.strategy_model(4),
            PathBuf::from("data/ml-100k/model/strategymodel_4.csv")
        );
    }
}
