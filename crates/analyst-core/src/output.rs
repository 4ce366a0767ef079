//! Naming and writing the analysis output file.

use crate::artifact::ArtifactPath;
use std::io::Write;
use std::path::{Path, PathBuf};

const OUTPUT_SUFFIX: &str = "_ANALYSIS.txt";

/// `<dir>/<artifact stem>_ANALYSIS.txt`
pub fn output_path_for(artifact: &ArtifactPath, dir: &Path) -> PathBuf {
    dir.join(format!("{}{}", artifact.stem(), OUTPUT_SUFFIX))
}

/// Write the analysis followed by a single trailing newline, replacing any existing file.
pub fn write_analysis(path: &Path, analysis: &str) -> std::io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    writeln!(file, "{analysis}")?;
    file.flush()
}
