//! Menu Handlers

pub(crate) mod categories;
pub(crate) mod category;
pub(crate) mod products;
