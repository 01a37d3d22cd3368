//! HTTP adapters - REST API implementations.

pub mod panel;

pub use panel::{build_handlers, panel_router, PanelHandlers};
