use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// File-level failures. These end the session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("cannot open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot save {}: {source}", path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot revert {}: {source}", path.display())]
    Revert {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
