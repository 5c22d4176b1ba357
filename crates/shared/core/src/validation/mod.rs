mod error;
mod order_validator;

pub use error::ValidationError;
pub use order_validator::{MAX_PRICE, MAX_QUANTITY, OrderValidator, RequiredCoverage};
