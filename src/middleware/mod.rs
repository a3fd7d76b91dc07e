pub mod request_id;
pub mod session;

pub use request_id::{request_id, RequestIdValue, REQUEST_ID_HEADER};
pub use session::{session_from_headers, COMPANY_ID_HEADER, USER_ID_HEADER};
