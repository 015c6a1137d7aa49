pub mod availability;
pub mod config;
pub mod constants;
pub mod form;
pub mod handlers;
pub mod mail;
pub mod models;
pub mod routes;
pub mod state;

#[cfg(test)]
mod testing;
