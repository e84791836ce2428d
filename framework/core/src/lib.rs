mod barrier;
mod clock;
mod error;

pub mod prelude {
    pub use crate::barrier::{barrier, empty_function, sink};
    pub use crate::clock::{Clock, MonotonicClock, Timestamp};
    pub use crate::error::{ConfigError, PlatformError};
}
