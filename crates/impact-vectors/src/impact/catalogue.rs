use super::selection::{VectorSelection, Weight};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VectorSource {
    OpenSourceObserver,
}

impl VectorSource {
    pub const fn label(self) -> &'static str {
        match self {
            Self::OpenSourceObserver => "OSO",
        }
    }
}

/// Impact vector offered to callers choosing what to score.
///
/// Scoring accepts any column of the dataset; this list only describes the
/// columns the round's data export is known to carry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ImpactVector {
    pub name: &'static str,
    pub description: &'static str,
    pub source: VectorSource,
    pub source_label: &'static str,
}

const fn oso(name: &'static str, description: &'static str) -> ImpactVector {
    ImpactVector {
        name,
        description,
        source: VectorSource::OpenSourceObserver,
        source_label: VectorSource::OpenSourceObserver.label(),
    }
}

const IMPACT_VECTORS: [ImpactVector; 12] = [
    oso(
        "OSO: Total Stars",
        "GitHub stars summed across the project's repositories.",
    ),
    oso(
        "OSO: Total Forks",
        "GitHub forks summed across the project's repositories.",
    ),
    oso(
        "OSO: Contributors Last 6 Months",
        "Distinct code contributors active during the last six months.",
    ),
    oso(
        "OSO: Avg Monthly Active Devs Last 6 Months",
        "Average monthly active developers over the last six months.",
    ),
    oso(
        "OSO: Total Onchain Users",
        "Addresses that have ever interacted with the project's contracts.",
    ),
    oso(
        "OSO: Onchain Users Last 6 Months",
        "Addresses interacting with the project's contracts in the last six months.",
    ),
    oso(
        "OSO: Total Txns",
        "Transactions sent to the project's contracts.",
    ),
    oso(
        "OSO: Total Txn Fees (ETH)",
        "Sequencer fees, in ETH, generated by the project's transactions.",
    ),
    oso(
        "OSO: Txn Fees Last 6 Months (ETH)",
        "Sequencer fees, in ETH, generated over the last six months.",
    ),
    oso(
        "OSO: Date First Download",
        "First package download; older packages score higher.",
    ),
    oso(
        "OSO: Total Downloads",
        "Package downloads across the project's published packages.",
    ),
    oso(
        "OSO: Downloads Last 6 Months",
        "Package downloads over the last six months.",
    ),
];

pub fn impact_vectors() -> &'static [ImpactVector] {
    &IMPACT_VECTORS
}

pub fn find_vector(name: &str) -> Option<&'static ImpactVector> {
    IMPACT_VECTORS.iter().find(|vector| vector.name == name)
}

/// Starting selection presented before a caller picks anything.
pub fn default_selection() -> Vec<VectorSelection> {
    [("OSO: Total Stars", 50.0), ("OSO: Total Onchain Users", 100.0)]
        .into_iter()
        .filter_map(|(name, weight)| Weight::new(weight).map(|w| VectorSelection::new(name, w)))
        .collect()
}
