//! Navmesh dataset loading and the runtime mesh database.
//!
//! The dataset is produced by an offline baking tool and consumed here
//! as-is; this crate never mutates the mesh after load.

mod database;
mod dataset;

pub use database::{MeshDatabase, Vertex};
pub use dataset::MeshDataset;
