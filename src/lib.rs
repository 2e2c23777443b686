//! Bolide - Asteroid Impact Physics Engine
//!
//! A library crate modeling the full arc of an asteroid impact event:
//! atmospheric entry, impact energy, crater scaling, blast and seismic
//! effect radii, post-impact environmental effect fields, heliocentric
//! trajectory propagation with Earth close-approach detection, and
//! deflection mission analysis.
//!
//! All computation is pure and synchronous; every public result type
//! derives `Serialize`/`Deserialize` so consumers can ship results over
//! whatever boundary they like.

pub mod analysis;
pub mod blast;
pub mod crater;
pub mod effects;
pub mod energy;
pub mod entry;
pub mod error;
pub mod mitigation;
pub mod orbit;
pub mod types;

pub use analysis::{complete_impact_analysis, ImpactAnalysis};
pub use error::PhysicsError;
pub use types::{AsteroidParameters, Coordinates};
