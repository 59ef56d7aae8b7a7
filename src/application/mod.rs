// Application layer - the wallet engine and the checks its callers run.

pub mod error;
pub mod service;
pub mod validation;

pub use error::*;
pub use service::*;
pub use validation::*;
