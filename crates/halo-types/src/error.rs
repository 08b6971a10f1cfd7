use thiserror::Error;

#[derive(Error, Debug)]
pub enum HaloError {
    #[error("Table parse error in {path} (line {line}): {message}")]
    TableParse {
        path: String,
        line: usize,
        message: String,
    },

    #[error(
        "Field load failed for snapshot {snapshot} ({tensor}, {smoothing} Mpc) at {path}: {message}"
    )]
    FieldLoad {
        snapshot: u32,
        tensor: String,
        smoothing: u32,
        path: String,
        message: String,
    },

    #[error("Grid cell ({i}, {j}, {k}) outside [0, {ngrid})")]
    GridOutOfBounds {
        i: i64,
        j: i64,
        k: i64,
        ngrid: usize,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type HaloResult<T> = Result<T, HaloError>;
