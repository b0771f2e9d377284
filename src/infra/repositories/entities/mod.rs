//! SeaORM entities, kept separate from the domain models.

pub mod user;
