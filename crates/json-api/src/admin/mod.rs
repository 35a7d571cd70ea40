//! Admin Console

pub(crate) mod categories;
pub(crate) mod dashboard;
mod errors;
mod forms;
pub(crate) mod middleware;
mod models;
pub(crate) mod products;
pub(crate) mod session;
