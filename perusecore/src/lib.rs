//! perusecore — shared logic for the peruse image browser
//!
//! Everything in here is plain synchronous code with no GUI dependencies:
//! extension rules and matching, folder scanning, the first-run folder
//! heuristic, the per-user settings store, and the navigation, transform,
//! and autoplay state machines the application drives from its event loop.

pub mod autoplay;
pub mod extensions;
pub mod navigation;
pub mod scan;
pub mod settings;
pub mod startup;
pub mod transform;

pub use autoplay::Autoplay;
pub use extensions::{ExtensionRule, ExtensionSet};
pub use navigation::Navigation;
pub use settings::{SaveFields, Settings, SettingsDoc};
pub use transform::DisplayTransform;
