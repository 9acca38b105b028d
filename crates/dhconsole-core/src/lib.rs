//! Domain layer of the console client: records, errors, configuration types,
//! transport contracts and the pure response parsers.

pub mod config;
pub mod error;
pub mod model;
pub mod parser;
pub mod session;
pub mod transport;

pub use error::{ConsoleError, Result};
pub use session::Session;
pub use transport::{CommandExecutor, EndpointMode, MuipTransport, ServerQuery};
