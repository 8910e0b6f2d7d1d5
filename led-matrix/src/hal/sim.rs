//! Simulated matrix controller
//!
//! [`SimBus`] is an [`I2c`] implementation that records every transaction
//! and applies it to a model of the controller's register banks, so the
//! picture a real device would show can be read back.

use alloc::vec::Vec;
use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, Operation};

use super::bus::{regs, Frame, LED_BLOCK_LEN};

/// Registers in one frame bank (LED, blink and PWM blocks)
pub const FRAME_BANK_LEN: usize = 0xB4;
const CONFIG_BANK_LEN: usize = 0x0D;

/// One recorded write transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub address: u8,
    pub bytes: Vec<u8>,
}

impl Transaction {
    /// Register addressed by this write
    pub fn register(&self) -> Option<u8> {
        self.bytes.first().copied()
    }

    /// Data following the register byte
    pub fn data(&self) -> &[u8] {
        self.bytes.get(1..).unwrap_or(&[])
    }
}

/// Recording, register-modelling bus
pub struct SimBus {
    log: Vec<Transaction>,
    bank: u8,
    frames: [[u8; FRAME_BANK_LEN]; Frame::COUNT as usize],
    config: [u8; CONFIG_BANK_LEN],
    fail_after: Option<usize>,
}

impl SimBus {
    pub fn new() -> Self {
        Self {
            log: Vec::new(),
            bank: 0,
            frames: [[0; FRAME_BANK_LEN]; Frame::COUNT as usize],
            config: [0; CONFIG_BANK_LEN],
            fail_after: None,
        }
    }

    /// Accept `n` more transactions, then fail every one after that
    pub fn fail_after(mut self, n: usize) -> Self {
        self.fail_after = Some(n);
        self
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.log
    }

    pub fn clear_log(&mut self) {
        self.log.clear();
    }

    /// Currently selected bank id
    pub fn bank(&self) -> u8 {
        self.bank
    }

    pub fn config_register(&self, reg: u8) -> u8 {
        self.config.get(reg as usize).copied().unwrap_or(0)
    }

    /// Frame currently shown by the controller
    pub fn display_frame(&self) -> u8 {
        self.config_register(regs::PICTURE_FRAME) & 0x07
    }

    pub fn blink_enabled(&self) -> bool {
        self.config_register(regs::DISPLAY_OPTION) & regs::BLINK_ENABLE != 0
    }

    pub fn is_shut_down(&self) -> bool {
        self.config_register(regs::SHUTDOWN) == 0
    }

    /// LED on/off block of `frame` as sent on the wire
    pub fn led_control(&self, frame: Frame) -> &[u8] {
        let base = regs::LED_CONTROL as usize;
        &self.frames[frame.index() as usize][base..base + LED_BLOCK_LEN]
    }

    /// Blink block of `frame` as sent on the wire
    pub fn blink_control(&self, frame: Frame) -> &[u8] {
        let base = regs::BLINK_CONTROL as usize;
        &self.frames[frame.index() as usize][base..base + LED_BLOCK_LEN]
    }

    pub fn pwm(&self, frame: Frame) -> &[u8] {
        &self.frames[frame.index() as usize][regs::PWM as usize..]
    }

    fn apply(&mut self, bytes: &[u8]) {
        let Some((&reg, data)) = bytes.split_first() else {
            return;
        };
        if reg == regs::COMMAND {
            if let Some(&bank) = data.first() {
                self.bank = bank;
            }
            return;
        }

        let target: &mut [u8] = match self.bank {
            b if b < Frame::COUNT => &mut self.frames[b as usize][..],
            regs::BANK_CONFIG => &mut self.config[..],
            _ => return,
        };
        for (offset, &value) in data.iter().enumerate() {
            if let Some(slot) = target.get_mut(reg as usize + offset) {
                *slot = value;
            }
        }
    }
}

impl Default for SimBus {
    fn default() -> Self {
        Self::new()
    }
}

impl ErrorType for SimBus {
    type Error = ErrorKind;
}

impl I2c for SimBus {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        if let Some(remaining) = self.fail_after.as_mut() {
            if *remaining == 0 {
                return Err(ErrorKind::Bus);
            }
            *remaining -= 1;
        }

        let mut bytes = Vec::new();
        for op in operations.iter_mut() {
            match op {
                Operation::Write(data) => bytes.extend_from_slice(data),
                Operation::Read(buf) => buf.fill(0),
            }
        }
        self.apply(&bytes);
        self.log.push(Transaction { address, bytes });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bank_routing() {
        let mut bus = SimBus::new();
        bus.write(0x74, &[regs::COMMAND, 3]).unwrap();
        bus.write(0x74, &[0x00, 0xAA, 0x55]).unwrap();
        bus.write(0x74, &[regs::COMMAND, regs::BANK_CONFIG]).unwrap();
        bus.write(0x74, &[regs::PICTURE_FRAME, 3]).unwrap();

        let frame = Frame::new(3).unwrap();
        assert_eq!(&bus.led_control(frame)[..2], &[0xAA, 0x55]);
        assert_eq!(bus.display_frame(), 3);
        assert_eq!(bus.transactions().len(), 4);
    }

    #[test]
    fn test_injected_failure() {
        let mut bus = SimBus::new().fail_after(1);
        assert!(bus.write(0x74, &[0, 1]).is_ok());
        assert_eq!(bus.write(0x74, &[0, 1]), Err(ErrorKind::Bus));
        assert_eq!(bus.transactions().len(), 1);
    }
}
