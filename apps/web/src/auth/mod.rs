pub mod credentials;
pub mod handlers;
pub mod password;
pub mod session;
pub mod store;
