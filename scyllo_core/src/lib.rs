//! Enzyme constrained flux analysis of scyllo-inositol production.
//!
//! A metabolic model is extended with the production pathway ([`augment`]), lowered into
//! a flow network ([`flexnet`]), constrained with enzyme kinetics ([`enzyme`]) and solved
//! at steady state with a linear programming solver ([`optimize`]). [`pipeline::run`]
//! chains these steps.

pub mod augment;
pub mod configuration;
pub mod enzyme;
pub mod flexnet;
pub mod io;
pub mod metabolic_model;
pub mod optimize;
pub mod pipeline;
