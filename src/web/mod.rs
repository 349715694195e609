//! Server-rendered pages.
//!
//! Uses Askama templates from `templates/`. Favorite buttons are plain form
//! posts to the toggle endpoints, which redirect browsers back to the page.
//!
//! # Modules
//!
//! - [`handlers`] - Page handlers
//! - [`forms`] - Form payloads and validation
//! - [`page`] - Layout, flash messages and error pages
//! - [`views`] - Display models
//! - [`routes`] - Page route configuration

pub mod forms;
pub mod handlers;
pub mod page;
pub mod routes;
pub mod views;
