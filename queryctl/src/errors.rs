use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {

    /* the cluster CLI could not be spawned at all */
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /* kubectl ran but exited nonzero; carries its stderr */
    #[error("kubectl: {0}")]
    Kubectl(String),

    #[error("unparseable kubectl output: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("no {0} found")]
    NotFound(String),

    #[error("timed out after {0}s waiting for completion")]
    WaitTimeout(u64),
}
