use std::io;

/// A primitive operation failed while a scenario was being measured.
///
/// A corrupted trial would silently bias the mean, so this error always ends the run. The
/// failing call's name leads the message; the OS reason is the error's source.
#[derive(derive_more::Error, derive_more::Display, Debug)]
#[display("{call} failed")]
pub struct PlatformError {
    call: &'static str,
    source: io::Error,
}

impl PlatformError {
    pub fn new(call: &'static str, source: impl Into<io::Error>) -> Self {
        Self {
            call,
            source: source.into(),
        }
    }

    /// The name of the call that failed, e.g. `fork` or `waitpid`.
    pub fn call(&self) -> &'static str {
        self.call
    }
}

/// The harness was asked to do something that has no defined result, such as measuring zero
/// iterations.
#[derive(derive_more::Error, derive_more::Display, Debug)]
pub struct ConfigError {
    msg: String,
}

impl ConfigError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { msg: msg.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_error_is_prefixed_with_call_name() {
        let err = PlatformError::new("fork", nix::errno::Errno::EAGAIN);
        assert_eq!("fork", err.call());
        assert_eq!("fork failed", err.to_string());
    }

    #[test]
    fn platform_error_exposes_source() {
        let err = PlatformError::new("rmdir", io::Error::from(io::ErrorKind::NotFound));
        let source = std::error::Error::source(&err).expect("source should be set");
        assert!(source.to_string().contains("not found"));
    }

    #[test]
    fn config_error_displays_message() {
        let err = ConfigError::new("iterations must be > 0");
        assert_eq!("iterations must be > 0", err.to_string());
    }
}
