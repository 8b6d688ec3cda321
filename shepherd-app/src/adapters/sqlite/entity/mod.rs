//! `SeaORM` entities backing `SqliteStore`.

pub mod booking;
pub mod domain;
