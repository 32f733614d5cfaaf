//! Synthesized declarations.
//!
//! The synthesizer produces structural declaration nodes; pretty-printing,
//! style options, and import insertion belong to the host renderer. The
//! bundled printer renders these nodes so tests can assert concrete output.

use ifx_common::Atom;
use ifx_model::{InterfaceRef, MemberSignature};

/// Body of a synthesized member (or accessor).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Body {
    /// `throw new System.NotImplementedException();`
    ThrowNotImplemented,
    /// No body: abstract declaration.
    None,
    /// Forward to an existing member: calls, property/indexer access, or
    /// event subscription are derived from the member kind.
    Forward(Receiver),
}

/// Receiver of a forwarded call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Receiver {
    pub member: Atom,
    /// Cast the receiver to this interface before member access (the
    /// receiver's type implements the member only explicitly).
    pub cast_to: Option<InterfaceRef>,
}

/// An ordinary synthesized member.
#[derive(Clone, Debug)]
pub struct MemberDecl {
    /// Substituted, renamed signature.
    pub signature: MemberSignature,
    /// `Some` for explicit interface implementations (`void IGoo.M()`);
    /// explicit members carry no accessibility keyword and no constraint
    /// clauses.
    pub explicit_interface: Option<InterfaceRef>,
    pub is_abstract: bool,
    pub body: Body,
}

/// Visibility of the generated `Dispose(bool)` method.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DisposeBoolVisibility {
    /// `protected virtual`, overridable by derived classes.
    ProtectedVirtual,
    /// `private`, used when the class is sealed.
    Private,
}

/// One synthesized declaration.
#[derive(Clone, Debug)]
pub enum SynthDecl {
    Member(MemberDecl),
    /// `private bool disposedValue;`
    DisposeGuardField { name: Atom },
    /// `protected virtual void Dispose(bool disposing) { ... }` with the
    /// guarded cleanup skeleton.
    DisposeBoolMethod {
        guard: Atom,
        visibility: DisposeBoolVisibility,
    },
    /// The commented-out finalizer template.
    FinalizerComment { class_name: Atom },
    /// `public void Dispose()` (or the explicit-interface form) calling
    /// `Dispose(disposing: true)` and suppressing finalization.
    DisposeMethod { explicit: Option<InterfaceRef> },
}
