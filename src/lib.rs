//! A small MVC web framework.
//!
//! Requests flow through [`mvc::route`] (path to controller, method and
//! arguments), [`mvc::dispatch`] (controller lookup and invocation) and
//! [`template::Renderer`] (partial inclusion and `{{ key }}` substitution).
//! [`app::App`] ties the three together and turns failures into 404/500
//! bodies; [`server`] and [`handler`] put it behind hyper.

pub mod app;
pub mod config;
pub mod controllers;
pub mod error;
pub mod handler;
pub mod http;
pub mod logger;
pub mod models;
pub mod mvc;
pub mod server;
pub mod template;
