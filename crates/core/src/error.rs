use thiserror::Error;

#[derive(Error, Debug)]
pub enum DriftError {
    #[error("Series '{series}' has {timestamps} timestamps but {values} values")]
    LengthMismatch {
        series: String,
        timestamps: usize,
        values: usize,
    },

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, DriftError>;
