//! Folio Core - Content model and configuration
//!
//! This crate provides the foundational types for the Folio portfolio:
//! - Typed page content (navigation, services, experience, projects) with a
//!   built-in data set and JSON import
//! - Site/scene configuration with TOML loading and validation

pub mod config;
pub mod content;

pub use config::{ConfigError, FrameloopMode, SceneConfig, SiteConfig, WindowConfig};
pub use content::{
    Content, ContentError, Experience, NavLink, Project, ProjectTag, Service, Technology,
    Testimonial,
};
