//! Tracing targets for the chrome crate.
//!
//! Horizon Lattice Chrome logs through `tracing`. Install a subscriber in the
//! host application to see the events, and filter them by subsystem with the
//! targets below:
//!
//! ```ignore
//! use tracing_subscriber::EnvFilter;
//!
//! tracing_subscriber::fmt()
//!     .with_env_filter(EnvFilter::new("horizon_lattice_chrome::bridge=trace"))
//!     .init();
//! ```

/// Target names for log filtering.
pub mod targets {
    /// Crate-wide target.
    pub const CHROME: &str = "horizon_lattice_chrome";
    /// Native handle resolution.
    pub const HANDLE: &str = "horizon_lattice_chrome::handle";
    /// Native decoration bridge calls.
    pub const BRIDGE: &str = "horizon_lattice_chrome::bridge";
    /// Title pane state machine transitions.
    pub const TITLE_PANE: &str = "horizon_lattice_chrome::title_pane";
    /// Property change routing.
    pub const ROUTER: &str = "horizon_lattice_chrome::router";
    /// Layout passes.
    pub const LAYOUT: &str = "horizon_lattice_chrome::layout";
}

