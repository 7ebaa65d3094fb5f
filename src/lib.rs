//! Publish workflow for polymorphic articles (posts and discussions) sharing
//! one base table, with per-kind extension rows, tag associations and media
//! uploads, exposed over an axum HTTP surface backed by PostgreSQL.
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
