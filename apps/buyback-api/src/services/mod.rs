//! Service layer: stateful operations behind the HTTP routes.

pub mod evaluation;
pub mod inventory;
pub mod lookup;
