//! Frame protocol for the matrix controller
//!
//! The controller has eight picture frames. Drawing always targets the
//! *write* frame, the panel shows the *display* frame, and the two are
//! switched independently so a new picture can be prepared off screen.
//!
//! # State Machine
//!
//! ```text
//! Uninitialized ──reset()──▶ Configuring ──▶ Idle
//!                                 ▲            │
//!                                 └──reset()───┘
//! ```

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use log::trace;

use super::plane::{Plane, PlanePair};
use crate::hal::bus::{regs, Bank, Frame, RegisterBus, LED_BLOCK_LEN, PWM_BLOCK_LEN};
use crate::layout::{Layout, PLANE_BYTES};

/// Settle time around a shutdown toggle
const SHUTDOWN_SETTLE_MS: u32 = 1;

/// Lifecycle of the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    /// No reset has been sent yet
    Uninitialized,
    /// A reset sequence is in progress
    Configuring,
    /// Ready for drawing
    Idle,
}

/// Register-level driver for frame selection and picture upload
pub struct FrameController<I2C> {
    bus: RegisterBus<I2C>,
    layout: &'static Layout,
    state: ControllerState,
    write_frame: Frame,
    display_frame: Frame,
    blink_enabled: bool,
    blink_frequency: u8,
    brightness: u8,
}

impl<I2C: I2c> FrameController<I2C> {
    pub fn new(bus: RegisterBus<I2C>, layout: &'static Layout) -> Self {
        Self {
            bus,
            layout,
            state: ControllerState::Uninitialized,
            write_frame: Frame::DEFAULT,
            display_frame: Frame::DEFAULT,
            blink_enabled: false,
            blink_frequency: 0,
            brightness: 0,
        }
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub(crate) fn set_state(&mut self, state: ControllerState) {
        self.state = state;
    }

    pub fn bus(&self) -> &RegisterBus<I2C> {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut RegisterBus<I2C> {
        &mut self.bus
    }

    pub fn release(self) -> RegisterBus<I2C> {
        self.bus
    }

    pub fn write_frame(&self) -> Frame {
        self.write_frame
    }

    pub fn display_frame(&self) -> Frame {
        self.display_frame
    }

    pub fn blink_enabled(&self) -> bool {
        self.blink_enabled
    }

    pub fn blink_frequency(&self) -> u8 {
        self.blink_frequency
    }

    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    /// Toggle software shutdown off and back on
    pub fn power_cycle(&mut self, delay: &mut impl DelayNs) -> Result<(), I2C::Error> {
        self.bus.select_bank(Bank::Config)?;
        delay.delay_ms(SHUTDOWN_SETTLE_MS);
        self.bus.write_register(regs::SHUTDOWN, 0)?;
        delay.delay_ms(SHUTDOWN_SETTLE_MS);
        self.bus.write_register(regs::SHUTDOWN, 1)?;
        delay.delay_ms(SHUTDOWN_SETTLE_MS);
        Ok(())
    }

    /// Picture mode with audio sync off; expects the config bank selected
    pub fn configure_picture_mode(&mut self) -> Result<(), I2C::Error> {
        self.bus.write_register(regs::MODE, regs::MODE_PICTURE)?;
        self.bus.write_register(regs::AUDIO_SYNC, 0)
    }

    /// Route subsequent picture writes to `frame`
    pub fn set_write_frame(&mut self, frame: Frame) -> Result<(), I2C::Error> {
        trace!("write frame {}", frame.index());
        self.bus.select_bank(Bank::Frame(frame))?;
        self.write_frame = frame;
        Ok(())
    }

    /// Show `frame` on the panel; the write frame stays selected
    pub fn set_display_frame(&mut self, frame: Frame) -> Result<(), I2C::Error> {
        trace!("display frame {}", frame.index());
        self.bus.select_bank(Bank::Config)?;
        self.bus.write_register(regs::PICTURE_FRAME, frame.index())?;
        self.display_frame = frame;
        self.bus.select_bank(Bank::Frame(self.write_frame))
    }

    /// Enable or disable hardware blinking; `frequency` uses the low three bits
    pub fn set_blink_mode(&mut self, enabled: bool, frequency: u8) -> Result<(), I2C::Error> {
        let frequency = frequency & 0x07;
        let value = (if enabled { regs::BLINK_ENABLE } else { 0 }) | frequency;
        self.bus.select_bank(Bank::Config)?;
        self.bus.write_register(regs::DISPLAY_OPTION, value)?;
        self.blink_enabled = enabled;
        self.blink_frequency = frequency;
        self.bus.select_bank(Bank::Frame(self.write_frame))
    }

    /// Same PWM level for every LED of the write frame
    pub fn set_all_brightness(&mut self, level: u8) -> Result<(), I2C::Error> {
        self.brightness = level;
        self.bus.fill_block(regs::PWM, level, PWM_BLOCK_LEN)
    }

    /// Upload a blink plane to the write frame's blink block
    pub fn write_blinks(&mut self, blinks: &Plane) -> Result<(), I2C::Error> {
        let wire = self.layout.pack(blinks.as_bytes());
        self.bus.write_block(regs::BLINK_CONTROL, &wire)
    }

    /// Upload the planes to the write frame in one transaction
    pub fn flush(&mut self, planes: &PlanePair) -> Result<(), I2C::Error> {
        let mut payload = [0u8; 1 + 2 * PLANE_BYTES];
        payload[0] = regs::LED_CONTROL;
        let pixels = self.layout.pack(planes.pixels.as_bytes());

        let len = if self.blink_enabled {
            // LED block runs straight into the blink block at 0x12
            let blinks = self.layout.pack(planes.blinks.as_bytes());
            payload[1..=LED_BLOCK_LEN].copy_from_slice(&pixels);
            payload[1 + LED_BLOCK_LEN..].copy_from_slice(&blinks);
            1 + 2 * LED_BLOCK_LEN
        } else {
            let n = self.layout.frame_registers;
            payload[1..=n].copy_from_slice(&pixels[..n]);
            1 + n
        };
        self.bus.write_raw(&payload[..len])
    }

    /// Upload a composited world window, blinks following separately
    pub fn flush_composite(&mut self, pixels: &Plane, blinks: &Plane) -> Result<(), I2C::Error> {
        let n = self.layout.frame_registers;
        let wire = self.layout.pack(pixels.as_bytes());
        self.bus.write_block(regs::LED_CONTROL, &wire[..n])?;
        if self.blink_enabled {
            self.write_blinks(blinks)?;
        }
        Ok(())
    }

    /// Upload a single lane (row or column) of the planes
    pub fn flush_lane(&mut self, planes: &PlanePair, lane: i32) -> Result<(), I2C::Error> {
        let Some((reg, bytes, len)) = self.layout.pack_lane(planes.pixels.as_bytes(), lane) else {
            return Ok(());
        };
        self.bus.write_block(reg, &bytes[..len])?;
        if self.blink_enabled {
            if let Some((_, bytes, len)) = self.layout.pack_lane(planes.blinks.as_bytes(), lane) {
                self.bus.write_block(regs::BLINK_CONTROL + reg, &bytes[..len])?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::bus::DEFAULT_ADDRESS;
    use crate::hal::sim::SimBus;
    use crate::layout::{LEDS_16X9, LEDS_9X16};

    fn controller(layout: &'static Layout) -> FrameController<SimBus> {
        FrameController::new(RegisterBus::new(SimBus::new(), DEFAULT_ADDRESS), layout)
    }

    fn log(c: &FrameController<SimBus>) -> std::vec::Vec<std::vec::Vec<u8>> {
        c.bus().inner().transactions().iter().map(|t| t.bytes.clone()).collect()
    }

    #[test]
    fn test_display_frame_restores_write_frame() {
        let mut c = controller(&LEDS_16X9);
        c.set_write_frame(Frame::SCROLL).unwrap();
        c.set_display_frame(Frame::new(3).unwrap()).unwrap();
        assert_eq!(
            log(&c),
            [vec![0xFD, 7], vec![0xFD, 0x0B], vec![0x01, 3], vec![0xFD, 7]]
        );
        assert_eq!(c.bus().inner().display_frame(), 3);
        assert_eq!(c.bus().inner().bank(), 7);
    }

    #[test]
    fn test_blink_mode_register() {
        let mut c = controller(&LEDS_16X9);
        c.set_blink_mode(true, 0x0B).unwrap();
        assert_eq!(log(&c)[1], [0x05, 0x08 | 0x03]);
        assert!(c.bus().inner().blink_enabled());
        c.set_blink_mode(false, 0).unwrap();
        assert!(!c.bus().inner().blink_enabled());
    }

    #[test]
    fn test_flush_without_blink_is_one_transaction() {
        for layout in [&LEDS_16X9, &LEDS_9X16] {
            let mut c = controller(layout);
            let mut planes = PlanePair::new(layout);
            planes.set_pixel(0, 0, true);
            c.flush(&planes).unwrap();
            let log = log(&c);
            assert_eq!(log.len(), 1);
            assert_eq!(log[0][0], 0x00);
            assert_eq!(log[0].len(), 1 + layout.frame_registers);
        }
    }

    #[test]
    fn test_flush_with_blink_carries_both_blocks() {
        let mut c = controller(&LEDS_9X16);
        c.set_blink_mode(true, 1).unwrap();
        let mut planes = PlanePair::new(&LEDS_9X16);
        planes.set_pixel(9, 0, true);
        planes.set_blink(9, 0, true);
        c.flush(&planes).unwrap();

        let last = log(&c).pop().unwrap();
        assert_eq!(last.len(), 37);
        // column 9 is register 1, not mirrored
        assert_eq!(last[1 + 1], 0x01);
        assert_eq!(last[1 + LED_BLOCK_LEN + 1], 0x01);
        assert_eq!(c.bus().inner().blink_control(Frame::DEFAULT)[1], 0x01);
    }

    #[test]
    fn test_flush_lane() {
        let mut c = controller(&LEDS_16X9);
        let mut planes = PlanePair::new(&LEDS_16X9);
        planes.set_pixel(9, 4, true);
        c.flush_lane(&planes, 4).unwrap();
        c.flush_lane(&planes, 12).unwrap();
        assert_eq!(log(&c), [vec![8, 0x00, 0x02]]);
    }

    #[test]
    fn test_brightness_block() {
        let mut c = controller(&LEDS_16X9);
        c.set_all_brightness(42).unwrap();
        assert_eq!(c.brightness(), 42);
        assert!(c.bus().inner().pwm(Frame::DEFAULT).iter().all(|&b| b == 42));
    }

    #[test]
    fn test_errors_propagate() {
        let bus = RegisterBus::new(SimBus::new().fail_after(1), DEFAULT_ADDRESS);
        let mut c = FrameController::new(bus, &LEDS_16X9);
        assert!(c.set_display_frame(Frame::SCROLL).is_err());
        assert_eq!(c.display_frame(), Frame::DEFAULT);
    }
}
