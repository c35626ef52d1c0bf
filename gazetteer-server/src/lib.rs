//! Gazetteer lookup server.
//!
//! A read-only web service over a GeoNames-style place dataset: fetch a
//! place by id, page through the whole table, compare two places by name,
//! and suggest names from a prefix.

pub mod config;
pub mod domain;
pub mod query;
pub mod store;
pub mod translit;
pub mod web;
