//! Lowers a metabolic model into a flow network
use indexmap::IndexMap;
use tracing::info;

use crate::flexnet::channel::{Channel, Direction};
use crate::flexnet::stock::Stock;
use crate::flexnet::{FlexNet, NetworkError};
use crate::metabolic_model::model::Model;

impl FlexNet {
    /// Create a network from a metabolic model
    ///
    /// Every metabolite becomes a stock with a level of 0. Every reaction becomes a
    /// forward channel `<id>_f`, and reactions with a negative lower bound also get a
    /// backward channel `<id>_b` with negated stoichiometry. Channel bounds are never
    /// negative.
    ///
    /// # Errors
    /// [`NetworkError::UnknownStock`] if a reaction uses a metabolite missing from the
    /// model, [`NetworkError::DuplicateStock`]/[`NetworkError::DuplicateChannel`] on id
    /// collisions
    pub fn from_model(model: &Model) -> Result<FlexNet, NetworkError> {
        let mut net = FlexNet::new_empty();
        for metabolite in model.metabolites.values() {
            net.add_stock(Stock::metabolite(&metabolite.id))?;
        }
        for reaction in model.reactions.values() {
            net.add_channel(Channel::new(
                &reaction.id,
                Direction::Forward,
                reaction.metabolites.clone(),
                reaction.get_forward_lower_bound(),
                reaction.get_forward_upper_bound(),
            ))?;
            if reaction.is_reversible() {
                let stoichiometry: IndexMap<String, f64> = reaction
                    .metabolites
                    .iter()
                    .map(|(id, coefficient)| (id.clone(), -coefficient))
                    .collect();
                net.add_channel(Channel::new(
                    &reaction.id,
                    Direction::Backward,
                    stoichiometry,
                    reaction.get_backward_lower_bound(),
                    reaction.get_backward_upper_bound(),
                ))?;
            }
        }
        info!(
            stocks = net.stocks().len(),
            channels = net.channels().len(),
            "lowered model into flow network"
        );
        Ok(net)
    }
}
