// src/components/mod.rs
pub mod auth_panel;
pub mod kiosk;
pub mod location_picker;
