//! Admin Session Handlers

pub(crate) mod create;
pub(crate) mod delete;
