pub mod authz;
pub mod config;
pub mod employees;
pub mod http;
pub mod identity;
pub mod requests;
pub mod seed;
