pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("empty roadmap: {message}")]
    EmptyTree { message: String },

    #[error("invalid roadmap config: {message}")]
    InvalidConfig { message: String },
}
