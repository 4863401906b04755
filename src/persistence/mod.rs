//! Level bundle import/export
//!
//! Features:
//! - Versioned, tagged JSON envelope (single level or a whole pack)
//! - Lossless round-trip through the `Level` shape
//! - Synchronous file load/save (never on the per-frame path)

pub mod envelope;

pub use envelope::{BUNDLE_VERSION, Bundle, BundleError, PackInfo, load_bundle, save_bundle};
