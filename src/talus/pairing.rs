//! Global greedy one-to-one matching of LOW and HIGH talus lines.
//!
//! 1. Every line is represented by the point at half its arc length.
//! 2. A KD-tree over the HIGH representatives yields, for every LOW line, every
//!    HIGH candidate within `max_distance`.
//! 3. All `(low, high, distance)` triples from the whole dataset are sorted
//!    by distance, then low id, then high id.
//! 4. Walking that list, a triple becomes a pair only if neither line has
//!    been claimed by an earlier (shorter) triple.
//!
//! Lines left without a pair are reported by id; they get no strip.

use hashbrown::HashSet;

use super::{TalusLine, TalusPair, TalusSide};
use crate::ids::TalusId;
use crate::index::KdTree;

/// Result of a pairing run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PairingOutcome {
    /// Confirmed pairs, shortest first.
    pub pairs: Vec<TalusPair>,
    /// Lines of either side left without a partner, by ascending id.
    pub unpaired: Vec<(TalusId, TalusSide)>,
}

#[derive(Copy, Clone, Debug)]
struct Candidate {
    low: TalusId,
    high: TalusId,
    distance: f64,
}

/// Pairs LOW with HIGH lines; see the module docs for the algorithm.
pub fn pair_talus(lines: &[TalusLine], max_distance: f64) -> PairingOutcome {
    let (lows, highs): (Vec<&TalusLine>, Vec<&TalusLine>) =
        lines.iter().partition(|t| t.side == TalusSide::Low);

    let tree = KdTree::build(highs.iter().map(|t| (t.line.midpoint(), t.id)));

    let mut candidates: Vec<Candidate> = lows
        .iter()
        .flat_map(|low| {
            tree.within(low.line.midpoint(), max_distance)
                .into_iter()
                .map(move |hit| Candidate {
                    low: low.id,
                    high: hit.value,
                    distance: hit.distance,
                })
        })
        .collect();
    candidates.sort_by(|a, b| {
        a.distance
            .total_cmp(&b.distance)
            .then(a.low.cmp(&b.low))
            .then(a.high.cmp(&b.high))
    });

    let mut claimed: HashSet<TalusId> = HashSet::with_capacity(lines.len());
    let mut pairs = Vec::new();
    for c in candidates {
        if claimed.contains(&c.low) || claimed.contains(&c.high) {
            continue;
        }
        claimed.insert(c.low);
        claimed.insert(c.high);
        pairs.push(TalusPair {
            low: c.low,
            high: c.high,
            distance: c.distance,
        });
    }

    let mut unpaired: Vec<(TalusId, TalusSide)> = lines
        .iter()
        .filter(|t| !claimed.contains(&t.id))
        .map(|t| (t.id, t.side))
        .collect();
    unpaired.sort();

    log::debug!(
        "pairing: {} LOW, {} HIGH, {} pairs, {} unpaired",
        lows.len(),
        highs.len(),
        pairs.len(),
        unpaired.len()
    );
    PairingOutcome { pairs, unpaired }
}
