use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("RA and Dec columns are not the same length (ra={ra}, dec={dec})")]
    LengthMismatch { ra: usize, dec: usize },

    #[error("invalid sky position: ra={ra}, dec={dec}")]
    InvalidPosition { ra: f64, dec: f64 },

    #[error("cutout image unavailable: {0}")]
    ImageUnavailable(String),

    #[error("unrecognized input {token:?} while {step}")]
    InvalidPromptToken { step: &'static str, token: String },

    #[error("classification already committed for this galaxy")]
    DialogueClosed,

    #[error("classification aborted: {0}")]
    Aborted(String),
}

pub type Result<T> = std::result::Result<T, Error>;
