use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Width and height must be positive integers. Got `{0}`.")]
    InvalidDimension(String),
    #[error("Dimensions must look like `WIDTHxHEIGHT`. Got `{0}`.")]
    ParseDimensions(String),
}
