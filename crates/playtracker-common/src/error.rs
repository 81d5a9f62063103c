use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("database error: {0}")]
    Database(String),

    #[error("migration error: {0}")]
    Migration(String),

    #[error("template error: {0}")]
    Template(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("web error: {0}")]
    Web(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("not found: {0}")]
    NotFound(String),
}

impl Error {
    /// True for errors caused by bad caller input rather than a server fault.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::Validation(_) | Error::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn error_display_includes_context() {
        let e = Error::Config("bad yaml".into());
        assert_eq!(e.to_string(), "configuration error: bad yaml");

        let e = Error::Migration("001_init.sql failed".into());
        assert_eq!(e.to_string(), "migration error: 001_init.sql failed");

        let e = Error::Validation("unknown outcome".into());
        assert_eq!(e.to_string(), "validation error: unknown outcome");

        let e = Error::NotFound("play 7".into());
        assert_eq!(e.to_string(), "not found: play 7");
    }

    #[test]
    fn only_input_errors_count_as_client_errors() {
        assert!(Error::Validation("x".into()).is_client_error());
        assert!(Error::NotFound("x".into()).is_client_error());
        assert!(!Error::Database("x".into()).is_client_error());
        assert!(!Error::Template("x".into()).is_client_error());
    }
}
