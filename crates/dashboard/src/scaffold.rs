//! Project scaffolding: directory layout and ignore file for a new
//! house price project.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub const PROJECT_DIRS: [&str; 5] = ["notebooks", "src", "models", "screenshots", "data"];

pub const GITIGNORE: &str = "\
# Rust build output
target/
**/*.rs.bk

# Python / notebooks
__pycache__/
*.py[cod]
.ipynb_checkpoints
.pytest_cache/
.mypy_cache/

# Environments
.env
.venv
env/
venv/

# Editors
.idea/
.vscode/
*.swp

# Logs
*.log

# Model files (if too large)
*.pkl
*.joblib
*.h5
*.model
models/*.json

# Data files
*.csv
*.xlsx
data/raw/
data/processed/
";

pub const NEXT_STEPS: &str = "
PROJECT SETUP COMPLETE

house-price-prediction/
├── notebooks/     # training notebook
├── src/           # application code
├── models/        # exported model, scaler and feature_info JSON
├── screenshots/   # images for the README
├── data/          # additional data files
└── .gitignore

Next steps:

1. Put the training notebook in notebooks/ and export the three artifacts
   (house_price_model.json, house_price_scaler.json, feature_info.json)
   into models/.

2. Start the dashboard:
   house-price-dashboard serve --artifacts-dir models

3. Initialize a git repository:
   git init
   git add .
   git commit -m \"Initial commit: House Price Prediction project\"
";

/// What a scaffold run changed
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScaffoldReport {
    pub created_dirs: Vec<PathBuf>,
    pub existing_dirs: Vec<PathBuf>,
    pub gitignore: PathBuf,
}

/// Create the project layout under `root`
///
/// Existing directories are left alone; `.gitignore` is rewritten.
pub fn scaffold(root: &Path) -> Result<ScaffoldReport> {
    let mut report = ScaffoldReport::default();

    for name in PROJECT_DIRS {
        let dir = root.join(name);
        if dir.is_dir() {
            report.existing_dirs.push(dir);
            continue;
        }
        fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create directory {}", dir.display()))?;
        info!("Created directory: {}/", name);
        report.created_dirs.push(dir);
    }

    let gitignore = root.join(".gitignore");
    fs::write(&gitignore, GITIGNORE)
        .with_context(|| format!("failed to write {}", gitignore.display()))?;
    info!("Created .gitignore file");
    report.gitignore = gitignore;

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_scaffold_creates_layout() {
        let root = TempDir::new().unwrap();
        let report = scaffold(root.path()).unwrap();

        assert_eq!(report.created_dirs.len(), PROJECT_DIRS.len());
        for name in PROJECT_DIRS {
            assert!(root.path().join(name).is_dir(), "{name} missing");
        }

        let ignore = fs::read_to_string(root.path().join(".gitignore")).unwrap();
        assert!(ignore.contains("*.pkl"));
        assert!(ignore.contains("models/*.json"));
        assert!(ignore.contains("data/processed/"));
    }

    #[test]
    fn test_scaffold_is_idempotent() {
        let root = TempDir::new().unwrap();
        fs::create_dir(root.path().join("models")).unwrap();
        fs::write(root.path().join("models").join("keep.txt"), "x").unwrap();

        let first = scaffold(root.path()).unwrap();
        assert_eq!(first.created_dirs.len(), 4);
        assert_eq!(first.existing_dirs, vec![root.path().join("models")]);

        let second = scaffold(root.path()).unwrap();
        assert!(second.created_dirs.is_empty());
        assert_eq!(second.existing_dirs.len(), 5);
        assert!(root.path().join("models").join("keep.txt").exists());
    }
}
