//! Builds enzyme constraints on a flow network
//!
//! Each catalogue entry is dispatched on its (kinetic class, regime) pair to an
//! [`EmissionPlan`], which names the structures and constraints added for the entry.
//! Entries are processed once, in catalogue order, so building twice yields the same
//! constraints in the same order.
use derive_builder::Builder;
use thiserror::Error;
use tracing::{debug, info};

use crate::enzyme::catalogue::{CatalogueEntry, KineticClass, ReactionCatalogue};
use crate::enzyme::regime::Regime;
use crate::flexnet::channel::Direction;
use crate::flexnet::constraint::{ConstraintKind, NetConstraint, Relation};
use crate::flexnet::handler::EnzymeHandler;
use crate::flexnet::stock::Stock;
use crate::flexnet::{FlexNet, NetworkError};
use crate::optimize::objective::Objective;

/// Id of the stock holding the total enzyme abundance
pub const TOTAL_ENZYME_STOCK: &str = "E_total";
/// Default fixed growth rate (h⁻¹)
pub const DEFAULT_GROWTH_RATE: f64 = 0.3;
/// Default upper bound on glucose uptake (mmol gDW⁻¹ h⁻¹)
pub const DEFAULT_UPTAKE_BOUND: f64 = 100.;
/// Forward channel of the biomass reaction
pub const DEFAULT_GROWTH_CHANNEL: &str = "BIOMASS_BS_10_f";
/// Backward channel of the glucose exchange, carrying uptake
pub const DEFAULT_UPTAKE_CHANNEL: &str = "EX_glc__D_e_b";
/// Forward channel of the scyllo-inositol exchange
pub const DEFAULT_PRODUCT_CHANNEL: &str = "EX_scino_f";

/// Id of the per-reaction enzyme stock catalyzing `channel`
pub fn enzyme_stock_id(channel: &str) -> String {
    format!("E_{}", channel)
}

// region Emission Plans
/// Kind of per-reaction capacity bound
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CapacityBound {
    /// `rate <= kcat * ea`
    Upper,
    /// `rate >= kcat * ea`
    Lower,
    Absent,
}

/// Structures and constraints emitted for one catalogue entry
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct EmissionPlan {
    /// Direction of the channel the constraints apply to
    pub target: Direction,
    pub capacity: CapacityBound,
    /// Whether the pool aware bound is emitted
    pub pool: bool,
    /// Whether a per-reaction enzyme stock is created
    pub enzyme_stock: bool,
    /// Direction locked to a rate of 0
    pub lock: Option<Direction>,
}

impl EmissionPlan {
    /// Whether a handler is attached to the target channel
    pub fn has_handler(&self) -> bool {
        self.enzyme_stock || self.pool
    }
}

/// Look up the emission plan of a kinetic class under a regime
///
/// The class fixes the target direction and the shape of the capacity bound. The regime
/// decides which of the capacity bound, the pool aware bound and the direction lock are
/// emitted.
pub fn emission_plan(class: KineticClass, regime: Regime) -> EmissionPlan {
    let target = class.catalyzed_direction();
    // Without capacity bounds the product pathway carries no obligatory throughput
    let capacity = match (class, regime.uses_capacity()) {
        (_, false) => CapacityBound::Absent,
        (KineticClass::ProductPathway, true) => CapacityBound::Lower,
        (_, true) => CapacityBound::Upper,
    };
    let lock = match class.is_reversible() && regime.locks_directions() {
        true => Some(target.reverse()),
        false => None,
    };
    EmissionPlan {
        target,
        capacity,
        pool: regime.uses_pool(),
        enzyme_stock: regime.uses_capacity(),
        lock,
    }
}
// endregion Emission Plans

/// Run parameters and target channels of the constraint builder
#[derive(Builder, Clone, Debug, PartialEq)]
pub struct BuildSettings {
    /// Fixed rate of the growth channel (h⁻¹)
    #[builder(default = "DEFAULT_GROWTH_RATE")]
    pub growth_rate: f64,
    /// Upper bound on the rate of the uptake channel (mmol gDW⁻¹ h⁻¹)
    #[builder(default = "DEFAULT_UPTAKE_BOUND")]
    pub uptake_bound: f64,
    #[builder(default = "DEFAULT_GROWTH_CHANNEL.to_string()", setter(into))]
    pub growth_channel: String,
    #[builder(default = "DEFAULT_UPTAKE_CHANNEL.to_string()", setter(into))]
    pub uptake_channel: String,
    /// Channel whose rate is maximized
    #[builder(default = "DEFAULT_PRODUCT_CHANNEL.to_string()", setter(into))]
    pub product_channel: String,
}

impl Default for BuildSettings {
    fn default() -> Self {
        BuildSettings {
            growth_rate: DEFAULT_GROWTH_RATE,
            uptake_bound: DEFAULT_UPTAKE_BOUND,
            growth_channel: DEFAULT_GROWTH_CHANNEL.to_string(),
            uptake_channel: DEFAULT_UPTAKE_CHANNEL.to_string(),
            product_channel: DEFAULT_PRODUCT_CHANNEL.to_string(),
        }
    }
}

impl BuildSettings {
    fn validate(&self) -> Result<(), BuildError> {
        for (name, value) in [
            ("growth_rate", self.growth_rate),
            ("uptake_bound", self.uptake_bound),
        ] {
            if !(value.is_finite() && value >= 0.) {
                return Err(BuildError::InvalidSetting { name, value });
            }
        }
        Ok(())
    }
}

/// Add the enzyme constraints of `regime` to the network
///
/// # Parameters
/// - network: Network lowered from the model, extended in place
/// - catalogue: Kinetic parameters, processed in order
/// - regime: Which constraint shapes are applied
/// - settings: Growth rate, uptake bound and target channels
///
/// # Returns
/// The objective maximizing the rate of the product channel
///
/// # Errors
/// [`BuildError::UnknownChannel`] if a catalogue entry or target channel is missing
/// from the network, [`BuildError::InvalidSetting`] for a negative or non-finite setting.
/// The network is left untouched on error.
pub fn build_constraints(
    network: &mut FlexNet,
    catalogue: &ReactionCatalogue,
    regime: Regime,
    settings: &BuildSettings,
) -> Result<Objective, BuildError> {
    settings.validate()?;
    validate_channels(network, catalogue, settings)?;

    // Work on a copy so a failure part way through leaves the network unchanged
    let mut staged = network.clone();
    if regime.uses_pool() {
        staged.add_stock(Stock::enzyme(TOTAL_ENZYME_STOCK, catalogue.total_enzyme()))?;
    }
    for entry in catalogue.entries().values() {
        emit_entry(&mut staged, entry, emission_plan(entry.class(), regime))?;
    }
    emit(
        &mut staged,
        NetConstraint::on_rate(
            ConstraintKind::GrowthFix,
            &settings.growth_channel,
            Relation::Equal,
            settings.growth_rate,
        ),
    )?;
    emit(
        &mut staged,
        NetConstraint::on_rate(
            ConstraintKind::UptakeBound,
            &settings.uptake_channel,
            Relation::LessEqual,
            settings.uptake_bound,
        ),
    )?;
    info!(
        regime = %regime,
        constraints = staged.constraints().len() - network.constraints().len(),
        handlers = staged.handlers().len() - network.handlers().len(),
        "built enzyme constraints"
    );
    *network = staged;

    let mut objective = Objective::new_maximize();
    objective.add_linear_term(&settings.product_channel, 1.);
    Ok(objective)
}

/// Check that every channel the catalogue and settings may touch exists
fn validate_channels(
    network: &FlexNet,
    catalogue: &ReactionCatalogue,
    settings: &BuildSettings,
) -> Result<(), BuildError> {
    for entry in catalogue.entries().values() {
        for channel in entry.required_channels() {
            if network.channel(&channel).is_none() {
                return Err(BuildError::UnknownChannel {
                    channel,
                    referenced_by: format!("catalogue entry {}", entry.reaction_id()),
                });
            }
        }
    }
    for (setting, channel) in [
        ("growth_channel", &settings.growth_channel),
        ("uptake_channel", &settings.uptake_channel),
        ("product_channel", &settings.product_channel),
    ] {
        if network.channel(channel).is_none() {
            return Err(BuildError::UnknownChannel {
                channel: channel.clone(),
                referenced_by: setting.to_string(),
            });
        }
    }
    Ok(())
}

fn emit_entry(
    network: &mut FlexNet,
    entry: &CatalogueEntry,
    plan: EmissionPlan,
) -> Result<(), BuildError> {
    let channel = plan.target.channel_id(entry.reaction_id());
    if plan.has_handler() {
        let mut handler = EnzymeHandler::new(&channel);
        if plan.enzyme_stock {
            let stock = enzyme_stock_id(&channel);
            network.add_stock(Stock::enzyme(&stock, entry.ea()))?;
            handler = handler.with_binding(&stock);
        }
        if plan.pool {
            handler = handler.with_pool(TOTAL_ENZYME_STOCK);
        }
        network.add_handler(handler)?;
    }
    match plan.capacity {
        CapacityBound::Upper => emit(
            network,
            NetConstraint::on_rate(
                ConstraintKind::Capacity,
                &channel,
                Relation::LessEqual,
                entry.capacity(),
            ),
        )?,
        CapacityBound::Lower => emit(
            network,
            NetConstraint::on_rate(
                ConstraintKind::ObligatoryFlux,
                &channel,
                Relation::GreaterEqual,
                entry.capacity(),
            ),
        )?,
        CapacityBound::Absent => {}
    }
    if plan.pool {
        emit(
            network,
            NetConstraint::pool_capacity(&channel, TOTAL_ENZYME_STOCK, entry.pool_coefficient()),
        )?;
    }
    if let Some(locked) = plan.lock {
        emit(
            network,
            NetConstraint::on_rate(
                ConstraintKind::DirectionLock,
                &locked.channel_id(entry.reaction_id()),
                Relation::Equal,
                0.,
            ),
        )?;
    }
    Ok(())
}

fn emit(network: &mut FlexNet, constraint: NetConstraint) -> Result<(), BuildError> {
    debug!(constraint = %constraint, "emitting constraint");
    network.add_constraint(constraint)?;
    Ok(())
}

/// Errors raised while building enzyme constraints
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BuildError {
    #[error("Channel {channel} referenced by {referenced_by} is not part of the network")]
    UnknownChannel {
        channel: String,
        referenced_by: String,
    },
    #[error("Setting {name} must be finite and non-negative, got {value}")]
    InvalidSetting { name: &'static str, value: f64 },
    #[error(transparent)]
    Network(#[from] NetworkError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flexnet::constraint::NetVariable;
    use crate::flexnet::handler::HandlerArc;
    use crate::flexnet::stock::StockKind;
    use crate::metabolic_model::model::Model;
    use crate::metabolic_model::reaction::ReactionBuilder;
    use crate::optimize::objective::ObjectiveSense;

    fn test_network() -> FlexNet {
        let mut model = Model::new_empty();
        for (id, lower_bound) in [
            ("R1", 0.),
            ("R2", -1000.),
            ("R3", -1000.),
            ("R4", 0.),
            ("BIOMASS_BS_10", 0.),
            ("EX_glc__D_e", -10.),
            ("EX_scino", 0.),
        ] {
            model
                .add_reaction(
                    ReactionBuilder::default()
                        .id(id)
                        .lower_bound(lower_bound)
                        .upper_bound(1000.)
                        .build()
                        .unwrap(),
                )
                .unwrap();
        }
        FlexNet::from_model(&model).unwrap()
    }

    fn test_catalogue(r1_ea: f64) -> ReactionCatalogue {
        let mut catalogue = ReactionCatalogue::new(0.01).unwrap();
        for entry in [
            CatalogueEntry::new("R1", KineticClass::ForwardOnly, 100., r1_ea, 50.),
            CatalogueEntry::new("R2", KineticClass::ForwardReversibleCatalyzed, 10., 0.5, 20.),
            CatalogueEntry::new("R3", KineticClass::BackwardReversibleCatalyzed, 30., 0.1, 10.),
            CatalogueEntry::new("R4", KineticClass::ProductPathway, 5., 0.2, 4.),
        ] {
            catalogue.add_entry(entry.unwrap()).unwrap();
        }
        catalogue
    }

    fn build(regime: Regime) -> FlexNet {
        let mut net = test_network();
        build_constraints(&mut net, &test_catalogue(0.01), regime, &BuildSettings::default())
            .unwrap();
        net
    }

    fn constraint<'a>(net: &'a FlexNet, id: &str) -> Option<&'a NetConstraint> {
        net.constraints().iter().find(|c| c.id == id)
    }

    fn constraints_on<'a>(net: &'a FlexNet, channel: &str) -> Vec<&'a NetConstraint> {
        let rate = NetVariable::Rate(channel.to_string());
        net.constraints()
            .iter()
            .filter(|c| c.involves(&rate))
            .collect()
    }

    #[test]
    fn plan_table() {
        use CapacityBound::{Absent, Lower, Upper};
        use Direction::{Backward, Forward};
        use KineticClass::*;
        let expected = [
            (ForwardOnly, Regime::Full, Forward, Upper, true, true, None),
            (ForwardOnly, Regime::CapacityOnly, Forward, Upper, false, true, None),
            (ForwardOnly, Regime::PoolOnly, Forward, Absent, true, false, None),
            (ForwardOnly, Regime::Unconstrained, Forward, Absent, false, false, None),
            (ForwardReversibleCatalyzed, Regime::Full, Forward, Upper, true, true, Some(Backward)),
            (ForwardReversibleCatalyzed, Regime::CapacityOnly, Forward, Upper, false, true, Some(Backward)),
            (ForwardReversibleCatalyzed, Regime::PoolOnly, Forward, Absent, true, false, Some(Backward)),
            (ForwardReversibleCatalyzed, Regime::Unconstrained, Forward, Absent, false, false, None),
            (BackwardReversibleCatalyzed, Regime::Full, Backward, Upper, true, true, Some(Forward)),
            (BackwardReversibleCatalyzed, Regime::CapacityOnly, Backward, Upper, false, true, Some(Forward)),
            (BackwardReversibleCatalyzed, Regime::PoolOnly, Backward, Absent, true, false, Some(Forward)),
            (BackwardReversibleCatalyzed, Regime::Unconstrained, Backward, Absent, false, false, None),
            (ProductPathway, Regime::Full, Forward, Lower, true, true, None),
            (ProductPathway, Regime::CapacityOnly, Forward, Lower, false, true, None),
            (ProductPathway, Regime::PoolOnly, Forward, Absent, true, false, None),
            (ProductPathway, Regime::Unconstrained, Forward, Absent, false, false, None),
        ];
        assert_eq!(expected.len(), 16);
        for (class, regime, target, capacity, pool, enzyme_stock, lock) in expected {
            assert_eq!(
                emission_plan(class, regime),
                EmissionPlan {
                    target,
                    capacity,
                    pool,
                    enzyme_stock,
                    lock
                },
                "{} under {}",
                class,
                regime
            );
        }
    }

    #[test]
    fn total_enzyme_matches_pool_plans() {
        for regime in Regime::ALL {
            let net = build(regime);
            let has_total = net.stock(TOTAL_ENZYME_STOCK).is_some();
            for class in KineticClass::ALL {
                assert_eq!(emission_plan(class, regime).pool, has_total, "{}", regime);
            }
            let pool_arcs = net.handlers().values().filter(|h| h.pool.is_some()).count();
            assert_eq!(pool_arcs > 0, has_total, "{}", regime);
        }
    }

    #[test]
    fn capacity_only_single_bound() {
        let net = build(Regime::CapacityOnly);
        let on_r1 = constraints_on(&net, "R1_f");
        assert_eq!(on_r1.len(), 1);
        assert_eq!(on_r1[0].id, "cap_R1_f");
        assert_eq!(on_r1[0].kind, ConstraintKind::Capacity);
        assert_eq!(on_r1[0].relation, Relation::LessEqual);
        assert!((on_r1[0].rhs - 1.).abs() < 1e-12);
        assert!(net.stock(TOTAL_ENZYME_STOCK).is_none());
        assert!(constraint(&net, "pool_R1_f").is_none());
    }

    #[test]
    fn full_adds_pool_bound() {
        let net = build(Regime::Full);
        assert!((constraint(&net, "cap_R1_f").unwrap().rhs - 1.).abs() < 1e-12);
        let pool = constraint(&net, "pool_R1_f").unwrap();
        assert_eq!(pool.relation, Relation::LessEqual);
        assert_eq!(pool.rhs, 0.);
        assert_eq!(
            pool.coefficient(&NetVariable::Rate("R1_f".to_string())),
            1.
        );
        assert!(
            (pool.coefficient(&NetVariable::Level(TOTAL_ENZYME_STOCK.to_string())) + 2.).abs()
                < 1e-12
        );
        let total = net.stock(TOTAL_ENZYME_STOCK).unwrap();
        assert_eq!(total.kind, StockKind::Enzyme);
        assert_eq!(total.level, 0.01);
    }

    #[test]
    fn capacity_scales_with_abundance() {
        let mut base = test_network();
        build_constraints(
            &mut base,
            &test_catalogue(0.01),
            Regime::Full,
            &BuildSettings::default(),
        )
        .unwrap();
        let mut scaled = test_network();
        build_constraints(
            &mut scaled,
            &test_catalogue(0.03),
            Regime::Full,
            &BuildSettings::default(),
        )
        .unwrap();
        for (a, b) in base.constraints().iter().zip(scaled.constraints()) {
            match a.id.as_str() {
                "cap_R1_f" => assert!((b.rhs - 3. * a.rhs).abs() < 1e-12),
                _ => assert_eq!(a, b),
            }
        }
        assert_eq!(scaled.stock("E_R1_f").unwrap().level, 0.03);
    }

    #[test]
    fn direction_locks() {
        for regime in [Regime::Full, Regime::CapacityOnly, Regime::PoolOnly] {
            let net = build(regime);
            // Exactly one direction of each reversible entry is locked
            let lock = constraint(&net, "lock_R2_b").unwrap();
            assert_eq!(lock.relation, Relation::Equal);
            assert_eq!(lock.rhs, 0.);
            assert!(constraint(&net, "lock_R2_f").is_none());
            assert!(constraint(&net, "lock_R3_f").is_some());
            assert!(constraint(&net, "lock_R3_b").is_none());
            // Backward entries are constrained on their backward channel
            assert!(constraints_on(&net, "R3_b")
                .iter()
                .all(|c| c.kind != ConstraintKind::DirectionLock));
            let locks = net
                .constraints()
                .iter()
                .filter(|c| c.kind == ConstraintKind::DirectionLock)
                .count();
            assert_eq!(locks, 2, "{}", regime);
        }
        let net = build(Regime::Unconstrained);
        assert!(net
            .constraints()
            .iter()
            .all(|c| c.kind != ConstraintKind::DirectionLock));
    }

    #[test]
    fn product_pathway_bounds() {
        for regime in [Regime::Full, Regime::CapacityOnly] {
            let net = build(regime);
            let obligatory = constraint(&net, "oblig_R4_f").unwrap();
            assert_eq!(obligatory.relation, Relation::GreaterEqual);
            assert!((obligatory.rhs - 1.).abs() < 1e-12);
            assert!(constraint(&net, "cap_R4_f").is_none());
        }
        let net = build(Regime::PoolOnly);
        let on_r4 = constraints_on(&net, "R4_f");
        assert_eq!(on_r4.len(), 1);
        assert_eq!(on_r4[0].kind, ConstraintKind::PoolCapacity);
        assert_eq!(on_r4[0].relation, Relation::LessEqual);
    }

    #[test]
    fn pool_only_structures() {
        let net = build(Regime::PoolOnly);
        assert!(net.stock("E_R1_f").is_none());
        assert!(net
            .constraints()
            .iter()
            .all(|c| c.kind != ConstraintKind::Capacity
                && c.kind != ConstraintKind::ObligatoryFlux));
        let handler = &net.handlers()["s_R3_b"];
        assert_eq!(
            handler.arcs(),
            vec![
                HandlerArc::Catalysis("R3_b".to_string()),
                HandlerArc::Pool(TOTAL_ENZYME_STOCK.to_string()),
            ]
        );
    }

    #[test]
    fn capacity_only_structures() {
        let net = build(Regime::CapacityOnly);
        let handler = &net.handlers()["s_R3_b"];
        assert_eq!(handler.binding.as_deref(), Some("E_R3_b"));
        assert!(handler.pool.is_none());
        assert_eq!(net.stock("E_R3_b").unwrap().level, 0.1);
        assert_eq!(net.handlers().len(), 4);
    }

    #[test]
    fn none_emits_only_globals() {
        let net = build(Regime::Unconstrained);
        let ids: Vec<&str> = net.constraints().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["growth_BIOMASS_BS_10_f", "uptake_EX_glc__D_e_b"]);
        assert!(net.handlers().is_empty());
        assert!(net.stocks().values().all(|s| !s.is_enzyme()));
    }

    #[test]
    fn globals_and_objective() {
        let mut net = test_network();
        let settings = BuildSettingsBuilder::default()
            .growth_rate(0.2)
            .uptake_bound(7.)
            .build()
            .unwrap();
        let objective =
            build_constraints(&mut net, &test_catalogue(0.01), Regime::Full, &settings).unwrap();
        let growth = constraint(&net, "growth_BIOMASS_BS_10_f").unwrap();
        assert_eq!((growth.relation, growth.rhs), (Relation::Equal, 0.2));
        let uptake = constraint(&net, "uptake_EX_glc__D_e_b").unwrap();
        assert_eq!((uptake.relation, uptake.rhs), (Relation::LessEqual, 7.));
        assert_eq!(objective.sense(), ObjectiveSense::Maximize);
        assert_eq!(objective.terms().len(), 1);
        assert_eq!(objective.terms()[0].variable_id, "EX_scino_f");
    }

    #[test]
    fn deterministic_order() {
        let first = build(Regime::Full);
        let second = build(Regime::Full);
        assert_eq!(first.constraints(), second.constraints());
        let ids: Vec<&str> = first.constraints().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "cap_R1_f",
                "pool_R1_f",
                "cap_R2_f",
                "pool_R2_f",
                "lock_R2_b",
                "cap_R3_b",
                "pool_R3_b",
                "lock_R3_f",
                "oblig_R4_f",
                "pool_R4_f",
                "growth_BIOMASS_BS_10_f",
                "uptake_EX_glc__D_e_b",
            ]
        );
    }

    #[test]
    fn unknown_channel_leaves_network_untouched() {
        let mut net = test_network();
        let mut catalogue = test_catalogue(0.01);
        catalogue
            .add_entry(CatalogueEntry::new("R9", KineticClass::ForwardOnly, 1., 1., 1.).unwrap())
            .unwrap();
        for regime in Regime::ALL {
            assert_eq!(
                build_constraints(&mut net, &catalogue, regime, &BuildSettings::default()),
                Err(BuildError::UnknownChannel {
                    channel: "R9_f".to_string(),
                    referenced_by: "catalogue entry R9".to_string(),
                })
            );
        }
        assert!(net.constraints().is_empty());
        assert!(net.handlers().is_empty());
        assert!(net.stock(TOTAL_ENZYME_STOCK).is_none());
    }

    #[test]
    fn reversible_entry_needs_backward_channel() {
        let mut net = test_network();
        let mut catalogue = ReactionCatalogue::new(0.01).unwrap();
        catalogue
            .add_entry(
                CatalogueEntry::new("R1", KineticClass::ForwardReversibleCatalyzed, 1., 1., 1.)
                    .unwrap(),
            )
            .unwrap();
        assert!(matches!(
            build_constraints(&mut net, &catalogue, Regime::Unconstrained, &BuildSettings::default()),
            Err(BuildError::UnknownChannel { channel, .. }) if channel == "R1_b"
        ));
    }

    #[test]
    fn unknown_target_channel() {
        let mut net = test_network();
        let settings = BuildSettingsBuilder::default()
            .product_channel("EX_nothing_f")
            .build()
            .unwrap();
        assert_eq!(
            build_constraints(&mut net, &test_catalogue(0.01), Regime::Full, &settings),
            Err(BuildError::UnknownChannel {
                channel: "EX_nothing_f".to_string(),
                referenced_by: "product_channel".to_string(),
            })
        );
    }

    #[test]
    fn invalid_settings() {
        let mut net = test_network();
        let settings = BuildSettingsBuilder::default()
            .growth_rate(-0.1)
            .build()
            .unwrap();
        assert_eq!(
            build_constraints(&mut net, &test_catalogue(0.01), Regime::Full, &settings),
            Err(BuildError::InvalidSetting {
                name: "growth_rate",
                value: -0.1
            })
        );
        let settings = BuildSettingsBuilder::default()
            .uptake_bound(f64::INFINITY)
            .build()
            .unwrap();
        assert!(matches!(
            build_constraints(&mut net, &test_catalogue(0.01), Regime::Full, &settings),
            Err(BuildError::InvalidSetting {
                name: "uptake_bound",
                ..
            })
        ));
    }
}
