use std::collections::HashMap;

use proptest::prelude::*;
use proptest::sample::{select, subsequence};
use serde::Serialize;

/// Responsive breakpoints, the usual layout set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Breakpoint {
    Mobile,
    Tablet,
    Laptop,
    Desktop,
}

impl Breakpoint {
    pub const ALL: [Breakpoint; 4] = [
        Breakpoint::Mobile,
        Breakpoint::Tablet,
        Breakpoint::Laptop,
        Breakpoint::Desktop,
    ];
}

pub fn arb_breakpoint() -> impl Strategy<Value = Breakpoint> {
    select(Breakpoint::ALL.to_vec())
}

/// Distinct breakpoints in arbitrary order.
pub fn arb_layouts() -> impl Strategy<Value = Vec<Breakpoint>> {
    subsequence(Breakpoint::ALL.to_vec(), 0..=Breakpoint::ALL.len()).prop_shuffle()
}

pub fn arb_dict() -> impl Strategy<Value = Vec<(Breakpoint, i32)>> {
    arb_layouts()
        .prop_flat_map(|layouts| {
            let n = layouts.len();
            (Just(layouts), prop::collection::vec(any::<i32>(), n))
        })
        .prop_map(|(layouts, values)| layouts.into_iter().zip(values).collect())
}

/// Old breakpoint to the (possibly repeated, possibly shared) new layouts it backs.
pub fn arb_remapping() -> impl Strategy<Value = HashMap<Breakpoint, Vec<u8>>> {
    prop::collection::hash_map(
        arb_breakpoint(),
        prop::collection::vec(0u8..6, 0..4),
        0..=Breakpoint::ALL.len(),
    )
}

/// Eager remapping over a plain dict: first claim on a new layout wins.
pub fn naive_map_layouts(
    dict: &[(Breakpoint, i32)],
    remapping: &HashMap<Breakpoint, Vec<u8>>,
) -> Vec<(u8, i32)> {
    let mut out: Vec<(u8, i32)> = Vec::new();
    for (old, value) in dict {
        for new in remapping.get(old).into_iter().flatten() {
            if !out.iter().any(|(claimed, _)| claimed == new) {
                out.push((*new, *value));
            }
        }
    }
    out
}
