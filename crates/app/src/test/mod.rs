//! Test support: a Postgres-backed context and in-memory fakes.

mod db;

pub(crate) use context::TestContext;
