//! # Cartesian system conversions
//!
//! Each sub-module converts cartesian position (and, for the mean systems, velocity) vectors
//! between two neighbouring coordinate systems:
//!
//! ```text
//!  FK4 ──┐
//!  FK5 ──┼── ICRS ── Geocentric apparent ── Topocentric ── Observed
//!  Gal ──┘
//! ```
//!
//! | Module | Conversions |
//! |---|---|
//! | [`fk4`] | ICRS ⟷ FK4 (with and without space motion) |
//! | [`fk5`] | FK5 precession with space motion |
//! | [`galactic`] | ICRS ⟷ Galactic |
//! | [`geo`] | ICRS ⟷ geocentric apparent (iterative inverse) |
//! | [`topo`] | geocentric apparent ⟷ topocentric |
//! | [`refraction`] | topocentric ⟷ observed |
//!
//! ## Units
//!
//! - Positions in **AU**.
//! - Velocities in **AU per Julian year**, except FK4 which uses **AU per Besselian year**.
//! - The apparent systems (geocentric, topocentric, observed) carry no velocity.
//!
//! All functions are pure; the only state they read is the immutable
//! [`ApparentParams`](crate::apparent::ApparentParams) and
//! [`ObserverData`](crate::observers::ObserverData) passed explicitly.

pub mod fk4;
pub mod fk5;
pub mod galactic;
pub mod geo;
pub mod refraction;
pub mod topo;
