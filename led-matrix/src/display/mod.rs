//! Matrix engine and drawing primitives
//!
//! [`Matrix`] owns the bus, the normal and scroll plane pairs and the
//! optional world. Drawing only edits the active plane pair; nothing
//! reaches the controller until [`Matrix::show`].
//!
//! ```text
//!   set_pixel / plot / draw_text
//!              │
//!              ▼
//!   ┌───────────────────┐     ┌──────────────┐
//!   │ active PlanePair  │◀────│ WorldCanvas  │ (optional)
//!   └─────────┬─────────┘     └──────┬───────┘
//!             └──────── show ────────┘
//!                         ▼
//!                FrameController ──▶ I²C
//! ```

pub mod controller;
pub mod geometry;
pub mod plane;
pub mod world;

pub use controller::{ControllerState, FrameController};
pub use geometry::{Canvas, Shape};
pub use plane::{Direction, Plane, PlanePair};
pub use world::WorldCanvas;

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use log::debug;

use crate::animation::{Animation, ScrollText};
use crate::config::{ConfigError, MatrixConfig};
use crate::hal::bus::{Frame, RegisterBus};
use crate::layout::{Layout, Variant};
use crate::text::{compose, Bitmap, FontProvider, MicroFont, Symbol};

/// Which plane pair drawing goes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ActivePlanes {
    Normal,
    Scroll,
}

/// LED matrix engine for one controller
pub struct Matrix<I2C, F = MicroFont> {
    controller: FrameController<I2C>,
    layout: &'static Layout,
    config: MatrixConfig,
    font: F,
    planes: PlanePair,
    scroll_planes: PlanePair,
    active: ActivePlanes,
    world: Option<WorldCanvas>,
}

impl<I2C: I2c> Matrix<I2C, MicroFont> {
    /// Engine with the default address, settings and built-in font
    pub fn new(i2c: I2C, variant: Variant) -> Self {
        let config = MatrixConfig {
            variant,
            ..MatrixConfig::default()
        };
        Self::build(i2c, config, MicroFont)
    }

    /// Engine from validated settings
    pub fn from_config(i2c: I2C, config: &MatrixConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(i2c, config.clone(), MicroFont))
    }
}

impl<I2C: I2c, F: FontProvider> Matrix<I2C, F> {
    /// Engine drawing text with a custom font
    pub fn with_font(i2c: I2C, config: &MatrixConfig, font: F) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(i2c, config.clone(), font))
    }

    fn build(i2c: I2C, config: MatrixConfig, font: F) -> Self {
        let layout = config.variant.layout();
        let bus = RegisterBus::new(i2c, config.address);
        Self {
            controller: FrameController::new(bus, layout),
            layout,
            config,
            font,
            planes: PlanePair::new(layout),
            scroll_planes: PlanePair::new(layout),
            active: ActivePlanes::Normal,
            world: None,
        }
    }

    pub fn layout(&self) -> &'static Layout {
        self.layout
    }

    pub fn variant(&self) -> Variant {
        self.layout.variant
    }

    pub fn config(&self) -> &MatrixConfig {
        &self.config
    }

    pub fn font(&self) -> &F {
        &self.font
    }

    pub fn state(&self) -> ControllerState {
        self.controller.state()
    }

    /// Borrow the bus (e.g. to inspect a simulated controller)
    pub fn bus(&self) -> &I2C {
        self.controller.bus().inner()
    }

    pub fn bus_mut(&mut self) -> &mut I2C {
        self.controller.bus_mut().inner_mut()
    }

    /// Tear down the engine and hand back the bus
    pub fn release(self) -> I2C {
        self.controller.release().release()
    }

    /// Largest addressable column
    pub fn max_x(&self) -> i32 {
        self.layout.width - 1
    }

    /// Largest addressable row
    pub fn max_y(&self) -> i32 {
        self.layout.height - 1
    }

    /// The plane pair drawing currently goes to
    pub fn planes(&self) -> &PlanePair {
        match self.active {
            ActivePlanes::Normal => &self.planes,
            ActivePlanes::Scroll => &self.scroll_planes,
        }
    }

    fn planes_mut(&mut self) -> &mut PlanePair {
        self.canvas().0
    }

    fn canvas(&mut self) -> (&mut PlanePair, &F) {
        let planes = match self.active {
            ActivePlanes::Normal => &mut self.planes,
            ActivePlanes::Scroll => &mut self.scroll_planes,
        };
        (planes, &self.font)
    }

    // ----- pixels -----

    pub fn set_pixel(&mut self, x: i32, y: i32, on: bool) {
        self.planes_mut().set_pixel(x, y, on);
    }

    pub fn is_pixel(&self, x: i32, y: i32) -> bool {
        self.planes().is_pixel(x, y)
    }

    pub fn set_blink(&mut self, x: i32, y: i32, on: bool) {
        self.planes_mut().set_blink(x, y, on);
    }

    pub fn is_blink(&self, x: i32, y: i32) -> bool {
        self.planes().is_blink(x, y)
    }

    pub fn clear(&mut self) {
        self.planes_mut().clear();
    }

    pub fn invert(&mut self) {
        self.planes_mut().invert();
    }

    pub fn shift(&mut self, direction: Direction) {
        self.planes_mut().shift(direction);
    }

    pub fn mask_row(&mut self, y: i32, and: u32, or: u32) {
        self.planes_mut().mask_row(y, and, or);
    }

    pub fn mask_column(&mut self, x: i32, and: u32, or: u32) {
        self.planes_mut().mask_column(x, and, or);
    }

    // ----- shapes -----

    pub fn plot(&mut self, shape: Shape, x0: i32, y0: i32, x1: i32, y1: i32, on: bool) {
        self.planes_mut().plot(shape, x0, y0, x1, y1, on);
    }

    pub fn plot_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, on: bool) {
        self.planes_mut().plot_line(x0, y0, x1, y1, on);
    }

    pub fn plot_box(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, on: bool) {
        self.planes_mut().plot_box(x0, y0, x1, y1, on);
    }

    pub fn plot_rect(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, on: bool) {
        self.planes_mut().plot_rect(x0, y0, x1, y1, on);
    }

    // ----- images and text -----

    pub fn set_image(&mut self, image: &Bitmap, x: i32, y: i32) {
        compose::set_image(self.planes_mut(), image, x, y);
    }

    /// Draw an icon or arrow
    pub fn draw_symbol(&mut self, symbol: Symbol, x: i32, y: i32) {
        compose::set_image(self.planes_mut(), &symbol.bitmap(), x, y);
    }

    /// Draw icon number `index`; out-of-range numbers draw nothing
    pub fn draw_icon(&mut self, index: usize, x: i32, y: i32) {
        if let Some(symbol) = Symbol::icon(index) {
            self.draw_symbol(symbol, x, y);
        }
    }

    /// Draw arrow number `index` (0 = north, clockwise)
    pub fn draw_arrow(&mut self, index: usize, x: i32, y: i32) {
        if let Some(symbol) = Symbol::arrow(index) {
            self.draw_symbol(symbol, x, y);
        }
    }

    /// Replace the picture; bit x of `rows[y]` is pixel (x, y)
    pub fn set_full_image(&mut self, rows: &[u32]) {
        compose::set_full_image(self.planes_mut(), rows);
    }

    /// Draw one character, returning the columns it used
    pub fn draw_char(&mut self, c: char, x: i32, y: i32) -> i32 {
        let (planes, font) = self.canvas();
        compose::draw_char(planes, font, c, x, y)
    }

    /// Draw text with `{Name}` icon markup
    pub fn draw_text(&mut self, text: &str, x: i32, y: i32) {
        let (planes, font) = self.canvas();
        compose::draw_text(planes, font, text, x, y);
    }

    pub fn measure_text(&self, text: &str) -> i32 {
        compose::measure_text(&self.font, text)
    }

    // ----- controller -----

    /// Bring the controller into a known state
    ///
    /// Power-cycles the chip, selects picture mode, clears every frame at
    /// the configured brightness and leaves frame 0 selected for writing
    /// and display with blinking off.
    pub fn reset(&mut self, delay: &mut impl DelayNs) -> Result<(), I2C::Error> {
        debug!("resetting {} controller", self.layout.variant.name());
        self.controller.set_state(ControllerState::Configuring);
        self.controller.power_cycle(delay)?;
        self.controller.configure_picture_mode()?;
        self.controller.set_blink_mode(true, 1)?;
        self.controller.set_write_frame(Frame::DEFAULT)?;
        self.controller.set_display_frame(Frame::DEFAULT)?;
        self.clear();
        self.world_delete()?;

        let level = self.config.brightness;
        for frame in Frame::descending() {
            self.controller.set_write_frame(frame)?;
            self.controller.set_all_brightness(level)?;
            self.show()?;
        }
        self.controller.set_blink_mode(false, 0)?;
        self.controller.set_state(ControllerState::Idle);
        Ok(())
    }

    pub fn set_write_frame(&mut self, frame: Frame) -> Result<(), I2C::Error> {
        self.controller.set_write_frame(frame)
    }

    pub fn set_display_frame(&mut self, frame: Frame) -> Result<(), I2C::Error> {
        self.controller.set_display_frame(frame)
    }

    pub fn write_frame(&self) -> Frame {
        self.controller.write_frame()
    }

    pub fn display_frame(&self) -> Frame {
        self.controller.display_frame()
    }

    pub fn set_blink_mode(&mut self, enabled: bool, frequency: u8) -> Result<(), I2C::Error> {
        self.controller.set_blink_mode(enabled, frequency)
    }

    /// Toggle blinking at the configured frequency
    pub fn enable_blink(&mut self, enabled: bool) -> Result<(), I2C::Error> {
        self.controller.set_blink_mode(enabled, self.config.blink_frequency)
    }

    pub fn blink_enabled(&self) -> bool {
        self.controller.blink_enabled()
    }

    pub fn set_all_brightness(&mut self, level: u8) -> Result<(), I2C::Error> {
        self.controller.set_all_brightness(level)
    }

    pub fn brightness(&self) -> u8 {
        self.controller.brightness()
    }

    /// Mark every pixel blinking (or none) and upload the blink block
    pub fn set_all_blinks(&mut self, on: bool) -> Result<(), I2C::Error> {
        let planes = match self.active {
            ActivePlanes::Normal => &mut self.planes,
            ActivePlanes::Scroll => &mut self.scroll_planes,
        };
        if on {
            planes.blinks.fill();
        } else {
            planes.blinks.clear();
        }
        self.controller.write_blinks(&planes.blinks)
    }

    /// Send the picture to the write frame
    pub fn show(&mut self) -> Result<(), I2C::Error> {
        let planes = match self.active {
            ActivePlanes::Normal => &self.planes,
            ActivePlanes::Scroll => &self.scroll_planes,
        };
        match &self.world {
            Some(world) => {
                let window = world.composite(&planes.pixels);
                self.controller.flush_composite(&window, &planes.blinks)
            }
            None => self.controller.flush(planes),
        }
    }

    /// Send one row (row-packed) or column (column-packed) only
    ///
    /// Does nothing while a world is active.
    pub fn show_lane(&mut self, lane: i32) -> Result<(), I2C::Error> {
        if self.world.is_some() {
            return Ok(());
        }
        let planes = match self.active {
            ActivePlanes::Normal => &self.planes,
            ActivePlanes::Scroll => &self.scroll_planes,
        };
        self.controller.flush_lane(planes, lane)
    }

    // ----- world -----

    /// Create a world with the panel's default overlay mode
    pub fn world_create(&mut self, width: u16, height: u16) {
        let overlay = self.config.world_overlay.unwrap_or(self.layout.world_overlay);
        self.world_create_with_overlay(width, height, overlay);
    }

    pub fn world_create_with_overlay(&mut self, width: u16, height: u16, overlay: bool) {
        debug!("world {}x{} (overlay {})", width, height, overlay);
        self.world = Some(WorldCanvas::new(self.layout, width, height, overlay));
    }

    /// Drop the world and blank the panel
    pub fn world_delete(&mut self) -> Result<(), I2C::Error> {
        if self.world.take().is_some() {
            debug!("world deleted");
        }
        self.clear();
        self.show()
    }

    pub fn world(&self) -> Option<&WorldCanvas> {
        self.world.as_ref()
    }

    pub fn world_mut(&mut self) -> Option<&mut WorldCanvas> {
        self.world.as_mut()
    }

    pub fn world_clear(&mut self) {
        if let Some(world) = self.world.as_mut() {
            world.clear();
        }
    }

    pub fn world_set_pixel(&mut self, x: i32, y: i32, on: bool) {
        if let Some(world) = self.world.as_mut() {
            world.set_pixel(x, y, on);
        }
    }

    pub fn world_is_pixel(&self, x: i32, y: i32) -> bool {
        self.world.as_ref().is_some_and(|w| w.is_pixel(x, y))
    }

    pub fn world_is_pixel_relative(&self, x: i32, y: i32) -> bool {
        self.world.as_ref().is_some_and(|w| w.is_pixel_relative(x, y))
    }

    pub fn world_plot(&mut self, shape: Shape, x0: i32, y0: i32, x1: i32, y1: i32, on: bool) {
        if let Some(world) = self.world.as_mut() {
            world.plot(shape, x0, y0, x1, y1, on);
        }
    }

    pub fn world_position_frame(&mut self, x: i32, y: i32) {
        if let Some(world) = self.world.as_mut() {
            world.position_frame(x, y);
        }
    }

    pub fn world_move_frame(&mut self, direction: Direction) {
        if let Some(world) = self.world.as_mut() {
            world.move_frame(direction);
        }
    }

    pub fn world_frame_position(&self) -> (i32, i32) {
        self.world.as_ref().map_or((0, 0), WorldCanvas::frame_position)
    }

    pub fn world_frame_max(&self) -> (i32, i32) {
        self.world.as_ref().map_or((0, 0), WorldCanvas::frame_max)
    }

    // ----- scrolling -----

    /// Start scrolling `text` across the panel; see [`ScrollText`]
    pub fn begin_scroll(&mut self, text: &str, delay_ms: u32, y: i32) -> Result<ScrollText<'_, I2C, F>, I2C::Error> {
        ScrollText::start(self, text, delay_ms, y)
    }

    /// Scroll `text` across the panel, blocking until it has passed
    pub fn scroll_text(&mut self, text: &str, delay_ms: u32, y: i32, delay: &mut impl DelayNs) -> Result<(), I2C::Error> {
        let mut scroll = self.begin_scroll(text, delay_ms, y)?;
        scroll.run(delay)
    }

    pub(crate) fn enter_scroll(&mut self) -> Result<(), I2C::Error> {
        self.active = ActivePlanes::Scroll;
        self.controller.set_write_frame(Frame::SCROLL)?;
        self.controller.set_display_frame(Frame::SCROLL)
    }

    pub(crate) fn leave_scroll(&mut self) -> Result<(), I2C::Error> {
        self.active = ActivePlanes::Normal;
        self.controller.set_write_frame(Frame::DEFAULT)?;
        self.controller.set_display_frame(Frame::DEFAULT)
    }

    pub(crate) fn render_tokens(&mut self, tokens: &str, x: i32, y: i32) -> Result<(), I2C::Error> {
        let (planes, font) = self.canvas();
        planes.clear();
        compose::draw_tokens(planes, font, tokens, x, y);
        self.show()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::bus::regs;
    use crate::hal::sim::SimBus;
    use std::vec::Vec;

    struct NoDelay;

    impl DelayNs for NoDelay {
        fn delay_ns(&mut self, _ns: u32) {}
    }

    fn matrix(variant: Variant) -> Matrix<SimBus> {
        let mut m = Matrix::new(SimBus::new(), variant);
        m.reset(&mut NoDelay).unwrap();
        m
    }

    fn displayed(m: &Matrix<SimBus>) -> Plane {
        let bus = m.bus();
        let frame = Frame::new(bus.display_frame()).unwrap();
        Plane::from_bytes(m.layout(), m.layout().unpack(bus.led_control(frame)))
    }

    #[test]
    fn test_reset_sequence() {
        for variant in Variant::ALL {
            let m = matrix(variant);
            let bus = m.bus();
            assert_eq!(m.state(), ControllerState::Idle);
            assert!(!bus.blink_enabled());
            assert!(!bus.is_shut_down());
            assert_eq!(bus.display_frame(), 0);
            assert_eq!(bus.bank(), 0);
            assert_eq!(bus.config_register(regs::AUDIO_SYNC), 0);
            for frame in Frame::descending() {
                assert!(bus.pwm(frame).iter().all(|&b| b == 200));
            }
            // shutdown toggles 0 then 1
            let shutdowns: Vec<u8> = bus
                .transactions()
                .iter()
                .filter(|t| t.register() == Some(regs::SHUTDOWN) && t.bytes.len() == 2)
                .map(|t| t.bytes[1])
                .collect();
            assert_eq!(shutdowns, [0, 1]);
        }
    }

    #[test]
    fn test_show_roundtrips_through_controller() {
        for variant in Variant::ALL {
            let mut m = matrix(variant);
            m.plot_line(0, 0, 6, 5, true);
            m.draw_char('A', 9, 1);
            m.show().unwrap();
            assert_eq!(&displayed(&m), &m.planes().pixels);
        }
    }

    #[test]
    fn test_show_without_blink_is_single_write() {
        let mut m = matrix(Variant::Leds9x16);
        m.bus_mut().clear_log();
        m.set_pixel(1, 1, true);
        m.show().unwrap();
        let log = m.bus().transactions();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].bytes.len(), 18);
        assert_eq!(log[0].register(), Some(0));
    }

    #[test]
    fn test_blinking_pixel_reaches_blink_block() {
        let mut m = matrix(Variant::Leds16x9);
        m.set_blink_mode(true, 2).unwrap();
        m.set_pixel(3, 0, true);
        m.set_blink(3, 0, true);
        m.show().unwrap();
        assert_eq!(m.bus().blink_control(Frame::DEFAULT)[0], 0x08);

        m.set_pixel(3, 0, false);
        assert!(!m.is_blink(3, 0));
    }

    #[test]
    fn test_set_all_blinks() {
        let mut m = matrix(Variant::Leds9x16);
        m.set_all_blinks(true).unwrap();
        let blink = m.bus().blink_control(Frame::DEFAULT);
        assert!(blink[..17].iter().all(|&b| b == 0x7F));
        assert_eq!(blink[17], 0);

        let mut m = matrix(Variant::Leds16x9);
        m.set_all_blinks(true).unwrap();
        assert!(m.bus().blink_control(Frame::DEFAULT).iter().all(|&b| b == 0xFF));
        m.set_all_blinks(false).unwrap();
        assert!(m.bus().blink_control(Frame::DEFAULT).iter().all(|&b| b == 0));
    }

    #[test]
    fn test_show_lane_updates_one_row() {
        let mut m = matrix(Variant::Leds16x9);
        m.bus_mut().clear_log();
        m.set_pixel(12, 5, true);
        m.set_pixel(0, 0, true);
        m.show_lane(5).unwrap();
        assert_eq!(m.bus().transactions().len(), 1);
        let shown = displayed(&m);
        assert!(shown.get(12, 5));
        assert!(!shown.get(0, 0));
    }

    #[test]
    fn test_world_replaces_plane_on_show() {
        let mut m = matrix(Variant::Leds16x9);
        m.world_create(40, 20);
        assert!(m.world().is_some_and(WorldCanvas::overlay));
        m.world_plot(Shape::Line, 0, 0, 39, 0, true);
        m.world_position_frame(10, 0);
        m.set_pixel(0, 5, true);
        m.show().unwrap();

        let shown = displayed(&m);
        assert!((0..16).all(|x| shown.get(x, 0)));
        assert!(shown.get(0, 5));

        m.show_lane(5).unwrap();
        m.world_delete().unwrap();
        assert!(m.world().is_none());
        assert!(displayed(&m).is_empty());
        assert_eq!(m.world_frame_position(), (0, 0));
    }

    #[test]
    fn test_world_with_blink_sends_two_writes() {
        let mut m = matrix(Variant::Leds16x9);
        m.set_blink_mode(true, 1).unwrap();
        m.world_create(20, 12);
        m.world_set_pixel(2, 2, true);
        m.bus_mut().clear_log();
        m.show().unwrap();
        let registers: Vec<_> = m.bus().transactions().iter().map(|t| t.register()).collect();
        assert_eq!(registers, [Some(regs::LED_CONTROL), Some(regs::BLINK_CONTROL)]);
    }

    #[test]
    fn test_world_defaults_per_variant() {
        let mut m = matrix(Variant::Leds9x16);
        m.world_create(30, 10);
        assert!(!m.world().is_some_and(WorldCanvas::overlay));
        assert_eq!(m.world_frame_max(), (14, 4));
        m.world_move_frame(Direction::Right);
        m.world_set_pixel(5, 5, true);
        assert!(m.world_is_pixel(5, 5));
        assert!(m.world_is_pixel_relative(4, 5));
        m.world_clear();
        assert!(!m.world_is_pixel(5, 5));
    }

    #[test]
    fn test_world_viewport_never_passes_edge() {
        for variant in Variant::ALL {
            let mut m = matrix(variant);
            let layout = m.layout();
            m.world_create(40, 40);
            m.world_position_frame(100, 100);
            assert_eq!(
                m.world_frame_position(),
                (40 - layout.physical_width, 40 - layout.physical_height)
            );
        }
    }

    #[test]
    fn test_scroll_restores_frames_and_planes() {
        for variant in Variant::ALL {
            let mut m = matrix(variant);
            m.set_pixel(2, 2, true);
            let before = m.planes().clone();
            m.scroll_text("Hi {Heart}", 0, 1, &mut NoDelay).unwrap();

            assert_eq!(m.write_frame(), Frame::DEFAULT);
            assert_eq!(m.display_frame(), Frame::DEFAULT);
            assert_eq!(m.bus().display_frame(), 0);
            assert_eq!(m.planes(), &before);
        }
    }

    #[test]
    fn test_icons_and_arrows_by_number() {
        let mut m = matrix(Variant::Leds16x9);
        m.draw_icon(37, 0, 0);
        assert!(m.is_pixel(0, 0) && m.is_pixel(4, 4) && !m.is_pixel(2, 2));
        m.clear();
        m.draw_arrow(2, 5, 0);
        assert!(m.is_pixel(5, 2) && m.is_pixel(9, 2));
        m.clear();
        m.draw_icon(40, 0, 0);
        m.draw_arrow(8, 0, 0);
        assert!(m.planes().pixels.is_empty());
    }

    #[test]
    fn test_bus_errors_propagate() {
        let mut m = Matrix::new(SimBus::new().fail_after(3), Variant::Leds16x9);
        assert!(m.reset(&mut NoDelay).is_err());
        assert_eq!(m.state(), ControllerState::Configuring);
        assert!(m.show().is_err());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = MatrixConfig {
            blink_frequency: 9,
            ..MatrixConfig::default()
        };
        assert!(Matrix::from_config(SimBus::new(), &config).is_err());
    }

    #[test]
    fn test_extreme_coordinates_are_silent() {
        for variant in Variant::ALL {
            let mut m = Matrix::new(SimBus::new(), variant);
            m.draw_char('A', i32::MAX, 0);
            m.draw_icon(0, i32::MAX, i32::MAX);
            m.set_pixel(i32::MIN, i32::MAX, true);
            assert!(m.planes().pixels.is_empty());

            m.plot_line(i32::MIN, 0, i32::MAX, 0, true);
            assert_eq!(m.planes().pixels.count() as i32, m.max_x() + 1);

            m.world_create(30, 20);
            m.world_position_frame(5, 5);
            assert!(!m.world_is_pixel_relative(i32::MAX, 0));
            m.world_plot(Shape::Line, i32::MIN, 0, i32::MAX, 1, true);
            assert!(m.world_is_pixel(0, 1) && m.world_is_pixel(29, 1));
            assert!(!m.world_is_pixel(0, 0));
        }
    }

    #[test]
    fn test_lines_are_symmetric_through_engine() {
        for variant in Variant::ALL {
            let mut forward = Matrix::new(SimBus::new(), variant);
            let mut backward = Matrix::new(SimBus::new(), variant);
            for (x0, y0) in [(-3, -2), (0, 0), (4, 7), (15, 1), (19, 11)] {
                for x1 in -3..20 {
                    for y1 in -3..12 {
                        forward.clear();
                        backward.clear();
                        forward.plot_line(x0, y0, x1, y1, true);
                        backward.plot_line(x1, y1, x0, y0, true);
                        assert_eq!(forward.planes(), backward.planes(), "({x0},{y0})-({x1},{y1})");
                    }
                }
            }
        }
    }
}
