//! Menu Domain Concerns

pub mod catalog;
pub mod categories;
pub mod products;
