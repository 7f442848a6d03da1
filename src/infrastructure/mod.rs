pub mod error;
pub mod logging;

pub use error::SuggestError;
pub use logging::setup_logging;
