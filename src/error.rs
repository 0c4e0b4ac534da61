use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShopError {
    /// A required request field is absent or empty
    #[error("{0} is required")]
    MissingField(&'static str),

    /// A request field is present but carries an unusable value
    #[error("Invalid value for {0}: {1}")]
    InvalidField(&'static str, String),

    /// Email is already registered
    #[error("Email {0} already registered")]
    EmailAlreadyRegistered(String),

    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Product with given ID not found
    #[error("Product {0} not found")]
    ProductNotFound(String),

    /// A store file exists but does not parse as a JSON array of records
    #[error("Store file {0} is malformed: {1}")]
    MalformedStore(String, String),

    #[error("I/O error on {0}: {1}")]
    Io(String, String),

    #[error("Upload failed: {0}")]
    Upload(String),
}
