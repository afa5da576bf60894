use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("required field is empty: {0}")]
    MissingField(&'static str),
    #[error("could not generate a unique id after {attempts} attempts")]
    IdExhausted { attempts: usize },
}

pub type Result<T> = std::result::Result<T, ModelError>;
