pub mod repositories;
pub mod session;
