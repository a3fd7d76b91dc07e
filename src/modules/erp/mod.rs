// ERP backend client module

pub mod backend;
pub mod http_backend;

pub use backend::ErpBackend;
pub use http_backend::HttpErpBackend;
