//! # I/O Signal Bus
//!
//! The CPU talks to the outside world through a coarse bidirectional signal
//! bus. Each [`step`](crate::step) receives an [`InputSignals`] snapshot and
//! returns a fresh [`OutputSignals`]; the scheduler driving the clock is
//! responsible for wiring device responses into the next step's input.
//!
//! ## The `IN` handshake
//!
//! `IN port` is a request/response handshake spread across steps. When no
//! matching input is present, the step leaves `ip` on the `IN` instruction and
//! raises `required_input_port`, telling devices which port is expected next.
//! Once the scheduler supplies `data` with a matching port and a content byte,
//! the re-executed instruction consumes it into AL and the requirement is
//! cleared implicitly.

/// Highest valid I/O port number.
pub const MAX_PORT: u8 = 15;

/// One byte of device input offered on a port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputData {
    /// The offered byte, or `None` when no device has responded yet
    pub content: Option<u8>,

    /// Port the byte is offered on
    pub port: u8,
}

/// Signals flowing into a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputSignals {
    /// Device response for the `IN` handshake
    pub data: InputData,

    /// Hardware interrupt request line
    pub interrupt: bool,
}

impl InputSignals {
    /// Input carrying a device response byte on `port`.
    ///
    /// # Examples
    ///
    /// ```
    /// use lib8bit::InputSignals;
    ///
    /// let input = InputSignals::with_data(5, 0x7F);
    /// assert_eq!(input.data.port, 5);
    /// assert_eq!(input.data.content, Some(0x7F));
    /// assert!(!input.interrupt);
    /// ```
    pub fn with_data(port: u8, content: u8) -> Self {
        Self {
            data: InputData {
                content: Some(content),
                port,
            },
            interrupt: false,
        }
    }

    /// Input raising the hardware interrupt line.
    pub fn with_interrupt() -> Self {
        Self {
            data: InputData::default(),
            interrupt: true,
        }
    }
}

/// One byte of device output written to a port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputData {
    /// The emitted byte
    pub content: u8,

    /// Port the byte is addressed to
    pub port: u8,
}

/// Signals flowing out of a step.
///
/// Every step starts from a cleared output bus; signals do not accumulate
/// across steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OutputSignals {
    /// Raised by `END`/`HALT`; the only termination indicator
    pub halted: bool,

    /// Port an `IN` instruction is waiting on, if any
    pub required_input_port: Option<u8>,

    /// Byte emitted by `OUT`, if any
    pub data: Option<OutputData>,

    /// Raised by `CLO`: ask the front-end to close device windows
    pub close_windows: bool,
}
