//! drv-stats - Discrete random variable statistics
//!
//! This crate computes the dashboard shown for a discrete random variable X
//! entered as a table of values and probabilities:
//!
//! - **Input**: parse and validate support values and probabilities
//!   (decimals or fractions, summing to 1 within 1e-7)
//! - **Summary**: E(X), Var(X), S.D., mode, quartiles and IQR
//! - **Transform**: apply g(x) and summarize g(X) the same way
//! - **Chart**: p.m.f. and c.d.f. bar series for an external renderer
//! - **Session**: per-user state holding the current distribution
//!
//! # Example
//!
//! ```ignore
//! use drv_stats::Session;
//!
//! let mut session = Session::new();
//! session.set_input("1 2 3", "1/4 1/2 1/4")?;
//! let dashboard = session.dashboard()?;
//! assert_eq!(dashboard.summary.mean, 2.0);
//!
//! let report = session.transform("2*x + 1")?;
//! assert_eq!(report.summary.mean, 5.0);
//! ```

pub mod chart;
pub mod config;
pub mod distribution;
pub mod error;
pub mod input;
pub mod session;
pub mod summary;
pub mod transform;

pub use chart::*;
pub use config::*;
pub use distribution::*;
pub use error::*;
pub use input::*;
pub use session::*;
pub use summary::*;
pub use transform::*;

pub use drv_expr::Function1D;

// Setup UniFFI when the feature is enabled
#[cfg(feature = "uniffi")]
uniffi::setup_scaffolding!();
