//! Drag a rectangle over an image and rescale the selection to fill the view.
//!
//! The [`widget::magnifier::Magnifier`] receives pointer input, tracks the
//! drag in a [`domain::Selection`], and draws through a
//! [`render::surface::Renderer`]. Placement uses "contain" semantics, see
//! [`render::geometry::compute_contain`].

pub mod capture;
pub mod config;
pub mod domain;
pub mod render;
pub mod session;
pub mod widget;
