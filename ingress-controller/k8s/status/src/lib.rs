#![deny(warnings, rust_2018_idioms)]
#![forbid(unsafe_code)]

mod patch;
mod resource;
mod resource_id;
mod update;

#[cfg(test)]
mod tests;

pub use self::{
    patch::{eq_time_insensitive_conditions, eq_time_insensitive_status, make_patch, Update},
    resource::HasConditions,
    resource_id::ResourceId,
    update::StatusUpdate,
};
