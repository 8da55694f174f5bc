pub mod config;
pub mod error;
pub mod launcher;
pub mod manifest;
pub mod paths;
pub mod scaffold;
pub mod scene;
pub mod schema;
