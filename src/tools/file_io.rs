//! Byte sources and sinks around the codec: whole-file reads, atomic file writes, stdin and stdout.

use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::error::{HuffError, Result};

/// Suffix given to compressed files.
pub const SUFFIX: &str = "huf";

/// Read the whole input file into memory.
pub fn read_input(path: &Path) -> Result<Vec<u8>> {
    let data = fs::read(path).map_err(|source| HuffError::InputUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Read {} bytes from {}", data.len(), path.display());
    Ok(data)
}

/// Read everything from standard input.
pub fn read_stdin() -> Result<Vec<u8>> {
    let mut data = Vec::new();
    io::stdin()
        .lock()
        .read_to_end(&mut data)
        .map_err(|source| HuffError::InputUnavailable {
            path: PathBuf::from("<stdin>"),
            source,
        })?;
    Ok(data)
}

pub fn write_stdout(data: &[u8]) -> Result<()> {
    let mut out = io::stdout().lock();
    out.write_all(data)?;
    out.flush()?;
    Ok(())
}

/// Write `data` to `path`. The data goes to a temporary file next to the target first and is renamed
/// into place only once fully written, so a failure never leaves a partial output behind.
pub fn write_output(path: &Path, data: &[u8], force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(HuffError::OutputExists {
            path: path.to_path_buf(),
        });
    }
    let tmp = tmp_name(path);
    if let Err(e) = write_then_rename(&tmp, path, data) {
        if fs::remove_file(&tmp).is_err() {
            warn!("Could not remove temporary file {}", tmp.display());
        }
        return Err(e.into());
    }
    debug!("Wrote {} bytes to {}", data.len(), path.display());
    Ok(())
}

fn write_then_rename(tmp: &Path, path: &Path, data: &[u8]) -> io::Result<()> {
    let mut f = File::create(tmp)?;
    f.write_all(data)?;
    f.sync_all()?;
    fs::rename(tmp, path)
}

fn tmp_name(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

/// `name` -> `name.huf`
pub fn compressed_name(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".");
    name.push(SUFFIX);
    PathBuf::from(name)
}

/// `name.huf` -> `name`. Files without the suffix get `.out` appended instead.
pub fn decompressed_name(path: &Path) -> PathBuf {
    match path.extension() {
        Some(ext) if ext == SUFFIX => path.with_extension(""),
        _ => {
            let mut name = path.as_os_str().to_owned();
            name.push(".out");
            PathBuf::from(name)
        }
    }
}

/// Fresh per-process directory under the system temp dir, for tests that touch real files.
#[cfg(test)]
pub(crate) fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("huffzip-{}-{}", std::process::id(), name));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}
