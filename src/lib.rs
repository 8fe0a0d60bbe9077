pub mod gateway;
pub mod server;
pub mod system;
pub mod version;
pub mod web;
