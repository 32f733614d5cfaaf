//! Member-stub synthesis.
//!
//! Takes an [`ifx_engine::ImplementationPlan`] and produces declaration
//! nodes ([`SynthDecl`]), plus a reference printer that renders them as
//! source text.

pub mod declaration;
pub mod literals;
pub mod print;
pub mod synthesize;

pub use declaration::{Body, DisposeBoolVisibility, MemberDecl, Receiver, SynthDecl};
pub use literals::{DefaultLiteralRenderer, LiteralRenderer};
pub use print::{print_decls, Printer};
pub use synthesize::synthesize;
