use std::error::Error as StdError;
use std::fmt;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// Any failure while talking to the remote API: transport, HTTP status,
    /// body decoding or an unexpected envelope shape.
    Request,
    /// Bad caller input caught before a request is built.
    Usage,
}

#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    message: Option<String>,
    hint: Option<String>,
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            hint: None,
            source: None,
        }
    }

    /// Shorthand for the request-failure kind every client call reports.
    pub fn request(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Request).with_message(message)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ErrorKind::Request => write!(f, "API request failed")?,
            ErrorKind::Usage => write!(f, "usage error")?,
        }
        if let Some(message) = &self.message {
            write!(f, ": {message}")?;
        }
        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|source| source.as_ref() as &(dyn StdError + 'static))
    }
}

pub fn to_exit_code(kind: ErrorKind) -> i32 {
    match kind {
        ErrorKind::Request => 1,
        ErrorKind::Usage => 2,
    }
}

#[cfg(test)]
mod tests {
    use super::{Error, ErrorKind, to_exit_code};
    use std::error::Error as StdError;

    #[test]
    fn exit_code_mapping_is_stable() {
        let cases = [(ErrorKind::Request, 1), (ErrorKind::Usage, 2)];

        for (kind, code) in cases {
            assert_eq!(to_exit_code(kind), code);
        }
    }

    #[test]
    fn request_errors_display_with_prefix() {
        let err = Error::request("500 Internal Server Error for /fetch/tags");
        assert_eq!(err.kind(), ErrorKind::Request);
        assert_eq!(
            err.to_string(),
            "API request failed: 500 Internal Server Error for /fetch/tags"
        );
    }

    #[test]
    fn source_chain_is_preserved() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = Error::request("connection failed").with_source(io);
        let source = err.source().expect("source");
        assert_eq!(source.to_string(), "refused");
    }

    #[test]
    fn usage_errors_carry_hints() {
        let err = Error::new(ErrorKind::Usage)
            .with_message("missing site uuid")
            .with_hint("Pass --site-uuid or set BENTO_SITE_UUID.");
        assert_eq!(err.to_string(), "usage error: missing site uuid");
        assert_eq!(err.hint(), Some("Pass --site-uuid or set BENTO_SITE_UUID."));
    }
}
