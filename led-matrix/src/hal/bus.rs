//! Register-addressed bus for IS31FL3731-class matrix controllers
//!
//! Every logical register write is one I²C write transaction: the first
//! byte is the register address, the rest is data that the controller
//! auto-increments through.
//!
//! # Register Map
//!
//! ```text
//! 0xFD            command register: selects the bank for later writes
//!   0x00..=0x07   frame banks (picture memory)
//!   0x0B          configuration bank
//!
//! frame bank      0x00  LED on/off    (18 bytes)
//!                 0x12  blink enable  (18 bytes)
//!                 0x24  PWM           (144 bytes)
//!
//! config bank     0x00  mode          0x01  picture frame
//!                 0x05  display opt   0x06  audio sync
//!                 0x0A  shutdown
//! ```

use embedded_hal::i2c::I2c;

/// Default 7-bit bus address
pub const DEFAULT_ADDRESS: u8 = 0x74;

/// Register offsets
pub mod regs {
    pub const COMMAND: u8 = 0xFD;
    pub const BANK_CONFIG: u8 = 0x0B;

    // Configuration bank
    pub const MODE: u8 = 0x00;
    pub const PICTURE_FRAME: u8 = 0x01;
    pub const DISPLAY_OPTION: u8 = 0x05;
    pub const AUDIO_SYNC: u8 = 0x06;
    pub const SHUTDOWN: u8 = 0x0A;

    // Frame bank
    pub const LED_CONTROL: u8 = 0x00;
    pub const BLINK_CONTROL: u8 = 0x12;
    pub const PWM: u8 = 0x24;

    pub const MODE_PICTURE: u8 = 0x00;
    pub const BLINK_ENABLE: u8 = 0x08;
}

/// Bytes in one frame's LED control block
pub const LED_BLOCK_LEN: usize = 18;
/// Bytes in one frame's PWM block
pub const PWM_BLOCK_LEN: usize = 144;

/// Largest payload a single block write carries
const MAX_BLOCK: usize = PWM_BLOCK_LEN;

/// Register bank selected through [`regs::COMMAND`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bank {
    /// Picture memory of one hardware frame
    Frame(Frame),
    /// Configuration registers
    Config,
}

impl Bank {
    pub const fn id(self) -> u8 {
        match self {
            Bank::Frame(frame) => frame.index(),
            Bank::Config => regs::BANK_CONFIG,
        }
    }
}

/// One of the controller's eight hardware frames
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Frame(u8);

impl Frame {
    /// Number of hardware frames
    pub const COUNT: u8 = 8;
    /// Frame used for normal drawing
    pub const DEFAULT: Self = Self(0);
    /// Frame reserved for scrolling text
    pub const SCROLL: Self = Self(7);

    /// Frame `n`, or `None` when `n` is not a hardware frame
    pub const fn new(n: u8) -> Option<Self> {
        if n < Self::COUNT {
            Some(Self(n))
        } else {
            None
        }
    }

    pub const fn index(self) -> u8 {
        self.0
    }

    /// All frames from highest to lowest
    pub fn descending() -> impl Iterator<Item = Frame> {
        (0..Self::COUNT).rev().map(Frame)
    }
}

/// I²C transport bound to one controller address
pub struct RegisterBus<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C: I2c> RegisterBus<I2C> {
    /// Bind a bus to a controller address
    pub const fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    /// Borrow the underlying transport
    pub fn inner(&self) -> &I2C {
        &self.i2c
    }

    pub fn inner_mut(&mut self) -> &mut I2C {
        &mut self.i2c
    }

    /// Release the underlying transport
    pub fn release(self) -> I2C {
        self.i2c
    }

    /// Write a single register
    pub fn write_register(&mut self, reg: u8, value: u8) -> Result<(), I2C::Error> {
        self.i2c.write(self.address, &[reg, value])
    }

    /// Point subsequent register writes at `bank`
    pub fn select_bank(&mut self, bank: Bank) -> Result<(), I2C::Error> {
        self.write_register(regs::COMMAND, bank.id())
    }

    /// Write `data` starting at `reg` as one transaction
    pub fn write_block(&mut self, reg: u8, data: &[u8]) -> Result<(), I2C::Error> {
        let len = data.len().min(MAX_BLOCK);
        let mut buf = [0u8; MAX_BLOCK + 1];
        buf[0] = reg;
        buf[1..=len].copy_from_slice(&data[..len]);
        self.i2c.write(self.address, &buf[..=len])
    }

    /// Write `len` copies of `value` starting at `reg` as one transaction
    pub fn fill_block(&mut self, reg: u8, value: u8, len: usize) -> Result<(), I2C::Error> {
        let len = len.min(MAX_BLOCK);
        let mut buf = [value; MAX_BLOCK + 1];
        buf[0] = reg;
        self.i2c.write(self.address, &buf[..=len])
    }

    /// Write an already framed payload (register byte first)
    pub fn write_raw(&mut self, payload: &[u8]) -> Result<(), I2C::Error> {
        self.i2c.write(self.address, payload)
    }
}
