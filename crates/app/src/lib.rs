//! Shared menu domain, persistence and storage modules.

pub mod admin;
pub mod context;
pub mod database;
pub mod domain;
pub mod images;
pub mod locales;
pub mod uuids;

#[cfg(test)]
mod test;
