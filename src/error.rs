use std::fmt::{Display, Formatter};

pub type Error = anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;

/// Broad classification of the errors a command can return to the user.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ErrorType {
    /// The home directory or `config.json` is missing or invalid.
    Config,
    /// Reading or writing the data file failed.
    Store,
    /// The request could not be carried out with the arguments given.
    Request,
}

impl Display for ErrorType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ErrorType::Config => "A configuration error occurred",
            ErrorType::Store => "An error occurred while accessing the data file",
            ErrorType::Request => "The request could not be completed",
        };
        f.write_str(s)
    }
}

/// Attaches an `ErrorType` to a result on its way out of a public command handler.
pub trait IntoResult<T> {
    fn pub_result(self, error_type: ErrorType) -> Result<T>;
}

impl<T, E> IntoResult<T> for std::result::Result<T, E>
where
    E: Into<Error>,
{
    fn pub_result(self, error_type: ErrorType) -> Result<T> {
        self.map_err(|e| Into::<Error>::into(e).context(error_type))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn test_pub_result_adds_context() {
        let r: std::result::Result<(), Error> = Err(anyhow!("disk full"));
        let err = r.pub_result(ErrorType::Store).unwrap_err();
        assert_eq!(
            err.to_string(),
            "An error occurred while accessing the data file"
        );
        assert_eq!(err.root_cause().to_string(), "disk full");
    }

    #[test]
    fn test_pub_result_ok_passes_through() {
        let r: std::result::Result<u8, Error> = Ok(7);
        assert_eq!(r.pub_result(ErrorType::Config).unwrap(), 7);
    }
}
