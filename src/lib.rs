//! Collection-unique, URL-safe slugs maintained on document models.
//!
//! A [`SlugPlugin`](application::slug::SlugPlugin) is applied to a
//! [`ModelDefinition`](application::model::ModelDefinition) once, at
//! definition time. It declares the slug attribute and attaches a
//! before-persist hook which derives a slug from the source attribute and
//! disambiguates it against the collection with a numeric suffix
//! (`my-model`, `my-model-2`, ...). The bound
//! [`Model`](application::model::Model) then exposes `find_by_slug`.

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
