use airdrop::CheckError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("GitHub client error: {0}")]
    Client(#[from] airdrop::api::Error),
    #[error("{0}")]
    Check(#[from] CheckError),
    #[error("Invalid identity header name: {0}")]
    IdentityHeader(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
