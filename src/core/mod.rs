pub mod currency;
pub mod error;
pub mod form;
pub mod money;
pub mod session;

pub use currency::Currency;
pub use error::{AppError, FieldError, Result};
pub use form::FormNumber;
pub use session::SessionContext;
