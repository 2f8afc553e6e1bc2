// ABOUTME: Template engine module for docbars
// ABOUTME: Provides the helper registry, the Handlebars engine wrapper and render data loading

pub mod data;
pub mod engine;
pub mod error;
pub mod helpers;

pub use data::{load_data, parse_data, DataFormat};
pub use engine::{RenderSettings, TemplateEngine};
pub use error::{Result, TemplateError};
pub use helpers::{register_helpers, Collaborators, HELPER_NAMES};
