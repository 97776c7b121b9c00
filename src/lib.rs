pub mod camera;
pub mod cli;
pub mod config;
pub mod core;
pub mod events;
pub mod explode;
pub mod inspect;
pub mod inspector;
pub mod loaders;
pub mod math;
pub mod picking;
pub mod registry;
pub mod scene;

pub use explode::ExplosionEngine;
pub use inspect::{DisplayRecord, InspectionPresenter};
pub use inspector::Inspector;
pub use picking::{PickHit, PickResult, PickingService};
pub use registry::PartRegistry;
pub use scene::{Hierarchy, Mesh, NodeDesc, NodeId};
