//! foliotui
//!
//! A terminal contact form for a personal portfolio: declarative field
//! validation, a submission state machine, and a rendering-quality tuner
//! that adapts the decorative header to the machine it runs on.

pub mod app;
pub mod config;
pub mod constants;
pub mod contact_client;
pub mod device;
pub mod event;
pub mod form;
pub mod logging;
pub mod notify;
pub mod performance;
pub mod ui;
pub mod validation;
