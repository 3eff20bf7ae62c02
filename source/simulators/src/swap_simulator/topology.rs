// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::{config::MAX_QUBITS, error::Error, state_vector::QubitID};
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::VecDeque;

/// A physical position holding one qubit.
pub type Slot = i32;

/// A fixed undirected graph over slots. Only neighboring slots can exchange
/// their qubits directly.
///
/// Slots are kept in declaration order, and the position of a slot in that
/// order is the index of its qubit in the register.
#[derive(Clone, Debug)]
pub struct Topology {
    slots: Vec<Slot>,
    indices: FxHashMap<Slot, QubitID>,
    /// The neighbors of each slot, by qubit index, in declaration order.
    neighbors: Vec<Vec<Slot>>,
}

impl Topology {
    /// Builds a topology from `(slot, neighbors)` pairs.
    ///
    /// Every edge must be listed from both ends, and every neighbor must be
    /// a declared slot.
    pub fn new(adjacency: Vec<(Slot, Vec<Slot>)>) -> Result<Self, Error> {
        if adjacency.is_empty() || adjacency.len() > MAX_QUBITS {
            return Err(Error::InvalidTopology(format!(
                "a topology should have between 1 and {MAX_QUBITS} slots, got {}",
                adjacency.len()
            )));
        }

        let mut indices = FxHashMap::default();
        for (index, (slot, _)) in adjacency.iter().enumerate() {
            if indices.insert(*slot, index).is_some() {
                return Err(Error::InvalidTopology(format!(
                    "slot {slot} is declared twice"
                )));
            }
        }

        let (slots, neighbors): (Vec<_>, Vec<_>) = adjacency.into_iter().unzip();
        for (slot, slot_neighbors) in slots.iter().zip(&neighbors) {
            for neighbor in slot_neighbors {
                let Some(&neighbor_index) = indices.get(neighbor) else {
                    return Err(Error::InvalidTopology(format!(
                        "slot {slot} lists undeclared neighbor {neighbor}"
                    )));
                };
                if neighbor == slot {
                    return Err(Error::InvalidTopology(format!(
                        "slot {slot} lists itself as a neighbor"
                    )));
                }
                if !neighbors[neighbor_index].contains(slot) {
                    return Err(Error::InvalidTopology(format!(
                        "slot {slot} lists {neighbor} as a neighbor, but not the other way around"
                    )));
                }
            }
        }

        Ok(Self {
            slots,
            indices,
            neighbors,
        })
    }

    /// The seven slots `-3..=3`, arranged as two three-pronged stars joined
    /// through slot 0.
    #[must_use]
    pub fn default_register() -> Self {
        Self::new(vec![
            (-3, vec![-1]),
            (-2, vec![-1]),
            (-1, vec![-3, -2, 0]),
            (0, vec![-1, 1]),
            (1, vec![0, 2, 3]),
            (2, vec![1]),
            (3, vec![1]),
        ])
        .expect("default topology should be valid")
    }

    /// Number of slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[must_use]
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// The qubit index of `slot`.
    pub fn index_of(&self, slot: Slot) -> Result<QubitID, Error> {
        self.indices
            .get(&slot)
            .copied()
            .ok_or(Error::UnknownSlot(slot))
    }

    pub fn neighbors(&self, slot: Slot) -> Result<&[Slot], Error> {
        Ok(&self.neighbors[self.index_of(slot)?])
    }

    #[must_use]
    pub fn are_adjacent(&self, a: Slot, b: Slot) -> bool {
        self.neighbors(a).is_ok_and(|n| n.contains(&b))
    }

    /// A shortest path from `from` to `to`, both included.
    ///
    /// The graph is explored breadth first, visiting neighbors in
    /// declaration order, so among several shortest paths the one found
    /// first in that order is returned.
    pub fn shortest_path(&self, from: Slot, to: Slot) -> Result<Vec<Slot>, Error> {
        self.index_of(from)?;
        self.index_of(to)?;

        let mut parents: FxHashMap<Slot, Slot> = FxHashMap::default();
        let mut visited: FxHashSet<Slot> = FxHashSet::default();
        let mut queue = VecDeque::from([from]);
        visited.insert(from);

        while let Some(current) = queue.pop_front() {
            if current == to {
                break;
            }
            for &neighbor in self.neighbors(current)? {
                if visited.insert(neighbor) {
                    parents.insert(neighbor, current);
                    queue.push_back(neighbor);
                }
            }
        }

        if !visited.contains(&to) {
            return Err(Error::NoPath(from, to));
        }

        let mut path = vec![to];
        let mut current = to;
        while current != from {
            current = parents[&current];
            path.push(current);
        }
        path.reverse();
        Ok(path)
    }
}
