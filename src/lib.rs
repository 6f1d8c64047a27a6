pub mod api;
pub mod api_docs;
pub mod config;
pub mod db;
pub mod models;
pub mod seed;
pub mod services;
