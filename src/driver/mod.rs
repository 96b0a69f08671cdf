//! Core driver components for the R-Switch.
//!
//! This module contains the building blocks for bringing up the switch:
//!
//! - [`config`] - Configuration types and builder patterns
//! - [`error`] - Error types and result aliases
//! - [`agent`] - Agent mode transitions shared by ETHA and GWCA
//! - [`etha`] / [`gwca`] - Per-agent static configuration
//! - [`forwarding`] - Static MAC port to gateway bridge
//! - [`interrupt`] - Core interrupt lines and per-chain data interrupts
//! - [`switch`] - The [`Switch`] façade running `init` and `open`
//!
//! # Example
//!
//! ```ignore
//! use rswitch_eth::driver::{GatewayPort, MacPort, SwitchConfig};
//!
//! let config = SwitchConfig::new()
//!     .with_mac_port(MacPort::Tsna0)
//!     .with_gateway_port(GatewayPort::Gwca1);
//! ```

// Submodules
pub mod agent;
pub mod config;
pub mod error;
pub mod etha;
pub mod forwarding;
pub mod gwca;
pub mod interrupt;
pub mod switch;

// Re-exports for convenience
pub use agent::{Agent, AgentKind, AgentMode, AgentModeController, AgentRegisters};
pub use config::{ChainConfig, GatewayPort, LinkSpeed, MacPort, State, SwitchConfig};
pub use error::{
    ConfigError, ConfigResult, DmaError, DmaResult, Error, IoError, IoResult, Result, status_code,
};
pub use etha::MacAgent;
pub use forwarding::{Bridge, ForwardingTable};
pub use gwca::GatewayAgent;
pub use interrupt::{CoreInterrupts, DataInterruptStatus, DataInterrupts, InterruptController};
pub use switch::{Switch, SwitchDefault, SwitchSmall};
