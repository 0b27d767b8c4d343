mod errors;
pub mod constants;
mod timeout;
mod wait_for_element;

pub use errors::{ApyError, RateParseError};
pub use timeout::{validate_optional_timeout, validate_timeout};
pub use wait_for_element::wait_for_visible;
