//! Error types for the R-Switch driver
//!
//! Errors are organized by domain for better diagnostics:
//! - [`ConfigError`]: Configuration and lifecycle precondition failures
//! - [`DmaError`]: Descriptor chain layout problems
//! - [`IoError`]: Hardware handshakes that did not complete
//!
//! The unified [`Error`] enum wraps all domain errors and is returned
//! by most driver methods. Bring-up is fail-fast: the first error is returned
//! verbatim and nothing is rolled back.

// =============================================================================
// Configuration Errors
// =============================================================================

/// Configuration and initialization errors
///
/// These errors are raised before any register is touched, or when the
/// driver lifecycle is used out of order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Driver already initialized
    AlreadyInitialized,
    /// Invalid configuration parameter
    InvalidConfig,
    /// Invalid PHY address (must be 0-31)
    InvalidPhyAddress,
    /// Invalid MMD device address (must be 0-31)
    InvalidDeviceAddress,
    /// Chain index outside the base descriptor table, or RX and TX share one
    InvalidChainIndex,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ConfigError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ConfigError::AlreadyInitialized => "already initialized",
            ConfigError::InvalidConfig => "invalid configuration",
            ConfigError::InvalidPhyAddress => "invalid PHY address",
            ConfigError::InvalidDeviceAddress => "invalid MMD device address",
            ConfigError::InvalidChainIndex => "invalid descriptor chain index",
        }
    }
}

// =============================================================================
// DMA Errors
// =============================================================================

/// Descriptor chain errors
///
/// These errors relate to laying out a chain before the hardware sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DmaError {
    /// Chain has fewer than two slots
    RingTooSmall,
    /// A receive slot has no buffer bound to it
    BufferNotBound,
    /// Chain index has no entry in the base descriptor table
    ChainIndexOutOfRange,
    /// Address does not fit the 40-bit descriptor pointer
    AddressOutOfRange,
    /// Slot index beyond the end of the chain
    SlotOutOfRange,
    /// Buffers can only be bound to receive chains
    NotReceiveChain,
}

impl core::fmt::Display for DmaError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl DmaError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            DmaError::RingTooSmall => "descriptor ring too small",
            DmaError::BufferNotBound => "receive buffer not bound",
            DmaError::ChainIndexOutOfRange => "chain index out of range",
            DmaError::AddressOutOfRange => "address exceeds descriptor pointer width",
            DmaError::SlotOutOfRange => "slot index out of range",
            DmaError::NotReceiveChain => "buffers bound to a transmit chain",
        }
    }
}

// =============================================================================
// I/O Errors
// =============================================================================

/// Hardware handshake errors
///
/// These errors occur while waiting on the switch or the PHY.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IoError {
    /// A register poll did not observe the expected value in time
    Timeout,
    /// The PHY SERDES handshake did not complete in time
    SerdesTimeout,
    /// Invalid state for operation (e.g., open before init)
    InvalidState,
}

impl core::fmt::Display for IoError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl IoError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            IoError::Timeout => "operation timed out",
            IoError::SerdesTimeout => "SERDES handshake timed out",
            IoError::InvalidState => "invalid state for operation",
        }
    }
}

// =============================================================================
// Unified Error Type
// =============================================================================

/// This enum wraps all domain-specific errors for unified error handling.
///
/// Match on the inner domain error for specific handling:
/// ```ignore
/// match result {
///     Err(Error::Io(IoError::Timeout)) => { /* a handshake stalled */ }
///     Err(Error::Io(IoError::SerdesTimeout)) => { /* PHY never finished */ }
///     Err(Error::Dma(DmaError::BufferNotBound)) => { /* ... */ }
///     _ => {}
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Configuration error
    Config(ConfigError),
    /// DMA error
    Dma(DmaError),
    /// I/O error
    Io(IoError),
}

impl Error {
    /// Numeric status code for C-style callers
    ///
    /// Codes are negative and stable; `0` is reserved for success, see
    /// [`status_code`].
    #[must_use]
    pub const fn code(&self) -> i32 {
        match self {
            Error::Io(IoError::Timeout) => -1,
            Error::Io(IoError::SerdesTimeout) => -2,
            Error::Io(IoError::InvalidState) => -3,
            Error::Config(ConfigError::AlreadyInitialized) => -10,
            Error::Config(ConfigError::InvalidConfig) => -11,
            Error::Config(ConfigError::InvalidPhyAddress) => -12,
            Error::Config(ConfigError::InvalidDeviceAddress) => -13,
            Error::Config(ConfigError::InvalidChainIndex) => -14,
            Error::Dma(DmaError::RingTooSmall) => -20,
            Error::Dma(DmaError::BufferNotBound) => -21,
            Error::Dma(DmaError::ChainIndexOutOfRange) => -22,
            Error::Dma(DmaError::AddressOutOfRange) => -23,
            Error::Dma(DmaError::SlotOutOfRange) => -24,
            Error::Dma(DmaError::NotReceiveChain) => -25,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Config(e) => write!(f, "config: {}", e.as_str()),
            Error::Dma(e) => write!(f, "dma: {}", e.as_str()),
            Error::Io(e) => write!(f, "io: {}", e.as_str()),
        }
    }
}

// From impls for automatic conversion
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<DmaError> for Error {
    fn from(e: DmaError) -> Self {
        Error::Dma(e)
    }
}

impl From<IoError> for Error {
    fn from(e: IoError) -> Self {
        Error::Io(e)
    }
}

/// Result type alias for driver operations
pub type Result<T> = core::result::Result<T, Error>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = core::result::Result<T, ConfigError>;

/// Result type alias for descriptor chain operations
pub type DmaResult<T> = core::result::Result<T, DmaError>;

/// Result type alias for hardware handshakes
pub type IoResult<T> = core::result::Result<T, IoError>;

/// Collapse a bring-up result into a status code (`0` on success)
#[must_use]
pub const fn status_code(result: &Result<()>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(e) => e.code(),
    }
}

#[cfg(test)]
mod tests {
    extern crate std;
    use std::format;

    use super::*;

    #[test]
    fn domain_errors_convert_into_unified_error() {
        let e: Error = IoError::Timeout.into();
        assert_eq!(e, Error::Io(IoError::Timeout));
        let e: Error = DmaError::BufferNotBound.into();
        assert_eq!(e, Error::Dma(DmaError::BufferNotBound));
        let e: Error = ConfigError::InvalidPhyAddress.into();
        assert_eq!(e, Error::Config(ConfigError::InvalidPhyAddress));
    }

    #[test]
    fn display_prefixes_domain() {
        let e = Error::Io(IoError::SerdesTimeout);
        assert_eq!(format!("{e}"), "io: SERDES handshake timed out");
        let e = Error::Dma(DmaError::RingTooSmall);
        assert_eq!(format!("{e}"), "dma: descriptor ring too small");
    }

    #[test]
    fn serdes_timeout_is_distinct_from_register_timeout() {
        assert_ne!(IoError::SerdesTimeout, IoError::Timeout);
        assert_ne!(
            Error::from(IoError::SerdesTimeout).code(),
            Error::from(IoError::Timeout).code()
        );
    }

    #[test]
    fn status_code_is_zero_only_on_success() {
        assert_eq!(status_code(&Ok(())), 0);
        assert_eq!(status_code(&Err(IoError::Timeout.into())), -1);
        assert!(status_code(&Err(ConfigError::AlreadyInitialized.into())) < 0);
    }

    #[test]
    fn error_codes_are_unique() {
        let all = [
            Error::Io(IoError::Timeout),
            Error::Io(IoError::SerdesTimeout),
            Error::Io(IoError::InvalidState),
            Error::Config(ConfigError::AlreadyInitialized),
            Error::Config(ConfigError::InvalidConfig),
            Error::Config(ConfigError::InvalidPhyAddress),
            Error::Config(ConfigError::InvalidDeviceAddress),
            Error::Config(ConfigError::InvalidChainIndex),
            Error::Dma(DmaError::RingTooSmall),
            Error::Dma(DmaError::BufferNotBound),
            Error::Dma(DmaError::ChainIndexOutOfRange),
            Error::Dma(DmaError::AddressOutOfRange),
            Error::Dma(DmaError::SlotOutOfRange),
            Error::Dma(DmaError::NotReceiveChain),
        ];
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(a.code(), b.code(), "{a} / {b}");
            }
        }
    }
}
