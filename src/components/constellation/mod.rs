//! Constellation background effect.
//!
//! Draws drifting particles on a full-viewport canvas behind the page and
//! joins nearby pairs with faint lines:
//! - Density tied to viewport area (one particle per 9000 px² by default)
//! - Toroidal wrap at the canvas edges
//! - Connection lines fading out with distance
//! - On/off switch read from `localStorage["particles-enabled"]` every frame
//!
//! # Example
//!
//! ```ignore
//! use constellation_bg::{Constellation, Theme};
//!
//! if let Ok(Some(bg)) = Constellation::activate(Theme::default()) {
//!     bg.forget();
//! }
//! ```

mod canvas;
mod component;
pub mod particles;
mod render;
pub mod settings;
mod state;
pub mod theme;

pub use canvas::{CANVAS_ID, Constellation, ConstellationError};
pub use component::ConstellationBackground;
pub use render::{Surface, render_frame};
pub use state::ConstellationState;
pub use theme::Theme;
