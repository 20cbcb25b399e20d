use thiserror::Error;

#[derive(Error, Debug)]
pub enum SamplerError {
    #[error("Engine unavailable: {0}")]
    EngineUnavailable(String),

    #[error("Engine error: {0}")]
    Engine(String),

    #[error("Period {index} out of range (timeline has {count} periods)")]
    PeriodOutOfRange { index: usize, count: usize },

    #[error("Retry context closed")]
    ContextClosed,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type SResult<T> = Result<T, SamplerError>;
