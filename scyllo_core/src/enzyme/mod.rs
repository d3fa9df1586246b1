//! Enzyme capacity constraints
//!
//! Kinetic parameters are read into a [`catalogue::ReactionCatalogue`], and
//! [`builder::build_constraints`] turns them into network constraints for a chosen
//! [`regime::Regime`].
pub mod builder;
pub mod catalogue;
pub mod regime;
