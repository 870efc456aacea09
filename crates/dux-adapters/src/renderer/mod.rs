//! Template engine adapters.

mod handlebars_engine;

pub use handlebars_engine::HandlebarsEngine;
