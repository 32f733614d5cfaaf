//! Interface-closure expansion.
//!
//! Walks an interface and everything it transitively extends as an explicit
//! worklist, de-duplicating by substituted identity `(symbol, type args)` so
//! diamond-shaped graphs are visited once per instantiation.

use crate::substitute::{TypeSubstitution, instantiate_interface_ref};
use ifx_common::limits::MAX_CLOSURE_SIZE;
use ifx_model::{InterfaceRef, SemanticModel};
use rustc_hash::FxHashSet;
use std::collections::VecDeque;
use tracing::trace;

/// Expand the full closure of one declared interface reference, self first,
/// then transitively extended interfaces in discovery (base-list) order.
///
/// Returns `None` when the declared reference itself is malformed (wrong
/// arity), which makes the whole interface inert for fixing.
pub fn interface_closure(model: &SemanticModel, root: &InterfaceRef) -> Option<Vec<InterfaceRef>> {
    if !root.symbol.is_valid() || !model.symbol(root.symbol).is_interface() {
        return None;
    }
    if model.symbol(root.symbol).arity() != root.args.len() {
        trace!(
            "wrong arity for {}: expected {}, got {}",
            model.name_of(root.symbol),
            model.symbol(root.symbol).arity(),
            root.args.len()
        );
        return None;
    }

    let mut closure = Vec::new();
    let mut visited: FxHashSet<InterfaceRef> = FxHashSet::default();
    let mut worklist: VecDeque<InterfaceRef> = VecDeque::new();
    worklist.push_back(root.clone());

    while let Some(current) = worklist.pop_front() {
        if closure.len() >= MAX_CLOSURE_SIZE {
            break;
        }
        if !visited.insert(current.clone()) {
            continue;
        }
        let data = model.symbol(current.symbol);
        if data.arity() != current.args.len() {
            // Malformed base reference inside the graph: skip it but keep
            // the rest of the closure usable.
            continue;
        }
        let subst = TypeSubstitution::from_args(&data.type_params, &current.args);
        for base in &data.base_interfaces {
            let substituted = instantiate_interface_ref(model, base, &subst);
            if !visited.contains(&substituted) {
                worklist.push_back(substituted);
            }
        }
        closure.push(current);
    }

    Some(closure)
}
