//! Fixed run-time settings shared by the three programs.
//!
//! The programs take no required arguments; every default lives here so the
//! binaries and the tests agree on the same file name, seeds, split and sweep.

use std::path::{Path, PathBuf};

/// File name of the CSV hand-off artifact.
pub const DATA_FILE_NAME: &str = "simple_example.csv";

/// Seed of the noise source used by the data generator.
pub const GENERATOR_SEED: u64 = 4889;

/// Seed of the uncorrelated binary regressor in the confidence-interval lesson.
pub const NUISANCE_SEED: u64 = 4873;

/// Number of leading rows used for training in the overfitting lesson.
pub const TRAIN_ROWS: usize = 15;

/// Polynomial degrees compared by the overfitting lesson.
pub const DEGREES: [usize; 4] = [1, 4, 7, 10];

/// Directory holding the CSV artifact and the rendered figures.
pub fn default_data_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("data")
}

/// Full path of the CSV artifact inside `dir`.
pub fn data_path_in<P: AsRef<Path>>(dir: P) -> PathBuf {
    dir.as_ref().join(DATA_FILE_NAME)
}

/// Default location of the CSV artifact.
pub fn default_data_path() -> PathBuf {
    data_path_in(default_data_dir())
}

/// Directory that figures go to when no explicit output directory is given.
///
/// Figures sit next to the data file they were drawn from.
pub fn figure_dir_for(data_path: &Path) -> PathBuf {
    match data_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_data_path_ends_with_file_name() {
        let path = default_data_path();
        assert_eq!(path.file_name().unwrap(), DATA_FILE_NAME);
        assert_eq!(path.parent().unwrap().file_name().unwrap(), "data");
    }

    #[test]
    fn test_data_path_in_joins_platform_neutrally() {
        let dir = Path::new("some").join("dir");
        let path = data_path_in(&dir);
        assert_eq!(path, dir.join(DATA_FILE_NAME));
    }

    #[test]
    fn test_figure_dir_for_bare_file_name() {
        assert_eq!(figure_dir_for(Path::new("simple_example.csv")), PathBuf::from("."));
    }

    #[test]
    fn test_figure_dir_for_nested_path() {
        let data = Path::new("a").join("b").join(DATA_FILE_NAME);
        assert_eq!(figure_dir_for(&data), Path::new("a").join("b"));
    }

    #[test]
    fn test_degrees_are_increasing() {
        assert!(DEGREES.windows(2).all(|w| w[0] < w[1]));
    }
}
