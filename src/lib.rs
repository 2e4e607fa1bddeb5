// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Software 3D rendering and multi-view interaction for anatomical and
//! molecular visualizations.
//!
//! Somaview projects triangle meshes with a simple perspective camera,
//! shades and depth-sorts them (painter's algorithm), and paints the result
//! onto any 2D surface implementing [`render::DrawSurface`]. Meshes carry
//! named regions (brain lobes, protein domains) that can be outlined,
//! highlighted, and picked under the cursor.
//!
//! # Key entry points
//!
//! - [`engine::Engine`] - owns options, the mesh cache, and every view
//! - [`input::PipController`] - per-view rotate/pan/zoom for a main view
//!   plus picture-in-picture insets
//! - [`render::Renderer`] - the depth-sorted software renderer
//! - [`picking::pick`] - nearest region under a screen point
//! - [`options::Options`] - TOML-backed configuration
//!
//! # Frame model
//!
//! Everything runs on one thread. Input events mutate view state
//! synchronously; an [`engine::AnimationLoop`] then advances auto-rotation
//! and renders each view clipped to its own rectangle. A render or pick in
//! a view always uses that view's camera.

pub mod camera;
pub mod demo;
pub mod engine;
pub mod error;
pub mod input;
pub mod mesh;
pub mod options;
pub mod picking;
pub mod region;
pub mod render;
pub mod util;
#[cfg(feature = "web")]
pub mod web;
