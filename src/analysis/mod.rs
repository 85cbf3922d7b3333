/// Numerical core and the comparison workflows built on top of it.
///
/// ```text
///   Series ──┐
///            ├─► align ─► AlignedPair ─► stats ─► ErrorProfile / ErrorStats
///   Series ──┘
///
///   Expr ─► sample ─► (x, f(x)) ─► roots ─► Vec<RootEstimate>
/// ```
///
/// `align`, `stats` and `roots` are pure functions over slices; `compare`
/// wires them into the pair / exact / multi-method / root-scan workflows.

pub mod align;
pub mod compare;
pub mod roots;
pub mod stats;

pub use align::{align, align_with_tolerance};
pub use roots::find_roots;
pub use stats::{ErrorProfile, analyze, analyze_with};
