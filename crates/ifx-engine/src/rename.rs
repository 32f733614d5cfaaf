//! Type-parameter renaming.
//!
//! When an interface member declares its own generic parameters whose names
//! collide with type parameters already in scope at the implementation site,
//! fresh names are chosen by integer suffixing (`T` → `T1` → `T2`, ...) and
//! applied consistently across parameter types, the return type, and every
//! constraint clause, including mutually recursive constraints, which are
//! rewritten simultaneously.
//!
//! Value-parameter names live in a different namespace and are never renamed
//! against type parameters.

use crate::substitute::{TypeSubstitution, instantiate_type};
use ifx_common::limits::MAX_NAME_SUFFIX;
use ifx_common::Atom;
use ifx_model::{MemberSignature, SemanticModel};
use rustc_hash::{FxHashMap, FxHashSet};

/// Mapping from an interface-declared type-parameter name to its fresh name,
/// scoped to one member signature's generation.
pub type RenameMap = FxHashMap<Atom, Atom>;

/// Rename the member's own type parameters away from `forbidden` (the
/// implementer's type parameters plus any outer containing-type parameters).
///
/// Returns the rewritten signature and the rename map (empty when nothing
/// collided).
pub fn rename_type_params(
    model: &SemanticModel,
    signature: &MemberSignature,
    forbidden: &FxHashSet<Atom>,
) -> (MemberSignature, RenameMap) {
    let mut renames = RenameMap::default();
    if signature.type_params.is_empty() {
        return (signature.clone(), renames);
    }

    // Names that the fresh choices must also avoid: the forbidden set, the
    // member's other type parameters, and sibling renames already chosen.
    let mut taken: FxHashSet<Atom> = forbidden.clone();
    for tp in &signature.type_params {
        taken.insert(tp.name);
    }

    for tp in &signature.type_params {
        if !forbidden.contains(&tp.name) {
            continue;
        }
        if let Some(fresh) = fresh_name(model, tp.name, &taken) {
            taken.insert(fresh);
            renames.insert(tp.name, fresh);
        }
    }
    if renames.is_empty() {
        return (signature.clone(), renames);
    }

    // Build one substitution and apply it everywhere at once, so mutually
    // recursive constraints (`where A : IList<B> where B : IList<A>`) are
    // rewritten consistently.
    let mut subst = TypeSubstitution::new();
    for (&old, &new) in &renames {
        subst.insert(old, model.types.type_param(new));
    }

    let mut renamed = signature.clone();
    for tp in &mut renamed.type_params {
        if let Some(&fresh) = renames.get(&tp.name) {
            tp.name = fresh;
        }
        for constraint in &mut tp.constraints {
            *constraint = instantiate_type(model, *constraint, &subst);
        }
    }
    for param in &mut renamed.params {
        param.ty = instantiate_type(model, param.ty, &subst);
    }
    renamed.return_type = instantiate_type(model, renamed.return_type, &subst);

    (renamed, renames)
}

/// Smallest-numbered non-colliding variant of `base`: `T1`, `T2`, ...
fn fresh_name(model: &SemanticModel, base: Atom, taken: &FxHashSet<Atom>) -> Option<Atom> {
    let base_text = model.interner.resolve(base);
    for suffix in 1..=MAX_NAME_SUFFIX {
        let candidate = model.interner.intern(&format!("{base_text}{suffix}"));
        if !taken.contains(&candidate) {
            return Some(candidate);
        }
    }
    None
}
