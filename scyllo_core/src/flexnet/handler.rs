//! Provides the enzyme handler, the catalysis sub-structure regulating a channel
use std::fmt::{Display, Formatter};

/// Links an enzyme stock and/or the total enzyme pool to the channel it catalyzes
///
/// Arcs are read only, they never change the balance of the stocks they read from.
#[derive(Clone, Debug, PartialEq)]
pub struct EnzymeHandler {
    /// Id of the handler, `s_<channel>`
    pub id: String,
    /// Channel regulated by the handler
    pub channel: String,
    /// Per-reaction enzyme stock bound by the handler
    pub binding: Option<String>,
    /// Total enzyme stock the handler draws from
    pub pool: Option<String>,
}

/// An arc of a handler
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HandlerArc {
    /// From the per-reaction enzyme stock
    Binding(String),
    /// To the regulated channel
    Catalysis(String),
    /// From the total enzyme stock
    Pool(String),
}

impl EnzymeHandler {
    /// Create a handler for `channel` with only its catalysis arc
    pub fn new(channel: &str) -> Self {
        EnzymeHandler {
            id: handler_id(channel),
            channel: channel.to_string(),
            binding: None,
            pool: None,
        }
    }

    /// Add a binding arc from `stock`
    pub fn with_binding(mut self, stock: &str) -> Self {
        self.binding = Some(stock.to_string());
        self
    }

    /// Add a pool arc from `stock`
    pub fn with_pool(mut self, stock: &str) -> Self {
        self.pool = Some(stock.to_string());
        self
    }

    /// Arcs of the handler, binding first and pool last
    pub fn arcs(&self) -> Vec<HandlerArc> {
        let mut arcs = Vec::with_capacity(3);
        if let Some(stock) = &self.binding {
            arcs.push(HandlerArc::Binding(stock.clone()));
        }
        arcs.push(HandlerArc::Catalysis(self.channel.clone()));
        if let Some(stock) = &self.pool {
            arcs.push(HandlerArc::Pool(stock.clone()));
        }
        arcs
    }
}

/// Id of the handler regulating `channel`
pub fn handler_id(channel: &str) -> String {
    format!("s_{}", channel)
}

impl Display for EnzymeHandler {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let arcs: Vec<String> = self
            .arcs()
            .iter()
            .map(|arc| match arc {
                HandlerArc::Binding(stock) => format!("{} -o", stock),
                HandlerArc::Catalysis(channel) => format!("-> {}", channel),
                HandlerArc::Pool(stock) => format!("{} -o", stock),
            })
            .collect();
        write!(f, "{}: {}", self.id, arcs.join(", "))
    }
}
