pub mod auth;
pub mod config;
pub mod http_server;
