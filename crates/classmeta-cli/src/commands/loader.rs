use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use classmeta_lib::Metadata;
use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read '{}'", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("'{}' is not a metadata envelope or a list of them", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Envelopes {
    One(Metadata),
    Many(Vec<Metadata>),
}

/// Read a file, or stdin for "-".
pub fn load_bytes(path: &Path) -> Result<Vec<u8>, LoadError> {
    let io_error = |source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    };

    if path.as_os_str() == "-" {
        let mut buf = Vec::new();
        io::stdin().read_to_end(&mut buf).map_err(io_error)?;
        return Ok(buf);
    }
    fs::read(path).map_err(io_error)
}

/// Read one JSON envelope or a JSON array of envelopes.
pub fn load_envelopes(path: &Path) -> Result<Vec<Metadata>, LoadError> {
    let bytes = load_bytes(path)?;
    let envelopes =
        serde_json::from_slice::<Envelopes>(&bytes).map_err(|source| LoadError::Json {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(match envelopes {
        Envelopes::One(metadata) => vec![metadata],
        Envelopes::Many(list) => list,
    })
}
