use serde::{Deserialize, Serialize};

/// The default amount of blocks a priority request can wait before it expires.
pub const DEFAULT_EXPIRATION_WINDOW: u64 = 101;

/// The configuration of the bridge operation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// The amount of blocks after its enqueue block within which a priority request must be
    /// settled.
    pub expiration_window: u64,
    /// The byte chunk padding is filled with.
    pub padding_byte: u8,
}

impl BridgeConfig {
    /// Returns a new configuration with the provided expiration window.
    pub const fn new(expiration_window: u64) -> Self {
        Self { expiration_window, padding_byte: 0 }
    }

    /// Sets the padding byte.
    pub const fn with_padding_byte(mut self, padding_byte: u8) -> Self {
        self.padding_byte = padding_byte;
        self
    }
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self::new(DEFAULT_EXPIRATION_WINDOW)
    }
}
