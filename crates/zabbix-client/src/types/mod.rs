//! Entity bindings
//!
//! Field names follow the remote object schema exactly. Values are opaque
//! strings passed through unchanged; the server owns their meaning.

// ---------------------------------------------------------------------------
// Macro for Entity impls over a plain `String` id field.
// Generates: Entity with METHOD_PREFIX, IDS_KEY, id(), set_id().
// ---------------------------------------------------------------------------
macro_rules! string_id_entity {
    ($name:ident, $id_field:ident, $prefix:literal, $ids_key:literal) => {
        impl $crate::client::Entity for $name {
            const METHOD_PREFIX: &'static str = $prefix;
            const IDS_KEY: &'static str = $ids_key;

            fn id(&self) -> &str {
                &self.$id_field
            }

            fn set_id(&mut self, id: String) {
                self.$id_field = id;
            }
        }
    };
}

pub(crate) use string_id_entity;

mod action;
mod user;

pub use action::{
    Action, Actions, Condition, Filter, Operation, OperationGroup, OperationTemplate,
};
pub use user::{User, Users};
