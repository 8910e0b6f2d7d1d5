//! Frame-by-frame animations
//!
//! An animation is driven one frame at a time by its caller, who also owns
//! the pause between frames. That keeps the same animation usable from a
//! blocking [`DelayNs`] loop and from an async executor.

use alloc::string::String;

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use log::debug;

use crate::display::Matrix;
use crate::text::{tokenize, FontProvider};
use crate::text::compose::measure_tokens;

/// Animation trait for content played on the panel
pub trait Animation {
    type Error;

    /// Render the next frame; `Some(ms)` is the pause before the following
    /// one, `None` means the animation has finished
    fn step(&mut self) -> Result<Option<u32>, Self::Error>;

    /// Check if the animation has finished
    fn is_complete(&self) -> bool;

    /// Rewind to the first frame
    fn reset(&mut self) -> Result<(), Self::Error>;

    /// Play to the end, blocking between frames
    fn run(&mut self, delay: &mut impl DelayNs) -> Result<(), Self::Error> {
        while let Some(ms) = self.step()? {
            if ms > 0 {
                delay.delay_ms(ms);
            }
        }
        Ok(())
    }
}

/// Text scrolling right to left across the panel
///
/// Drawing happens on the engine's scroll planes in frame 7, leaving the
/// normal picture untouched. The engine stays borrowed for the whole
/// animation; when it finishes (or is dropped early) frame 0 is selected
/// again for writing and display and the normal planes become active.
pub struct ScrollText<'a, I2C: I2c, F: FontProvider> {
    matrix: &'a mut Matrix<I2C, F>,
    tokens: String,
    length: i32,
    counter: i32,
    delay_ms: u32,
    row: i32,
    finished: bool,
}

impl<'a, I2C: I2c, F: FontProvider> ScrollText<'a, I2C, F> {
    pub(crate) fn start(matrix: &'a mut Matrix<I2C, F>, text: &str, delay_ms: u32, row: i32) -> Result<Self, I2C::Error> {
        let tokens = tokenize(text);
        let length = measure_tokens(matrix.font(), &tokens);
        let counter = length + matrix.layout().physical_width;
        debug!("scrolling {} columns of text", length);

        let mut scroll = Self {
            matrix,
            tokens,
            length,
            counter,
            delay_ms,
            row,
            finished: false,
        };
        scroll.matrix.enter_scroll()?;
        Ok(scroll)
    }

    /// Column the text starts at in the next frame
    pub fn offset(&self) -> i32 {
        self.counter - self.length
    }

    /// Rendered width of the text
    pub fn length(&self) -> i32 {
        self.length
    }

    /// Frames still to be drawn
    pub fn frames_remaining(&self) -> u32 {
        if self.finished {
            0
        } else {
            (self.counter + 1).max(0) as u32
        }
    }

    /// The engine being animated (e.g. to inspect the simulated bus)
    pub fn matrix(&self) -> &Matrix<I2C, F> {
        self.matrix
    }

    fn finish(&mut self) -> Result<(), I2C::Error> {
        self.finished = true;
        self.matrix.leave_scroll()
    }
}

impl<I2C: I2c, F: FontProvider> Animation for ScrollText<'_, I2C, F> {
    type Error = I2C::Error;

    fn step(&mut self) -> Result<Option<u32>, I2C::Error> {
        if self.finished {
            return Ok(None);
        }
        if self.counter < 0 {
            self.finish()?;
            return Ok(None);
        }
        let x = self.offset();
        self.matrix.render_tokens(&self.tokens, x, self.row)?;
        self.counter -= 1;
        Ok(Some(self.delay_ms))
    }

    fn is_complete(&self) -> bool {
        self.finished
    }

    fn reset(&mut self) -> Result<(), I2C::Error> {
        if self.finished {
            self.matrix.enter_scroll()?;
            self.finished = false;
        }
        self.counter = self.length + self.matrix.layout().physical_width;
        Ok(())
    }
}

impl<I2C: I2c, F: FontProvider> Drop for ScrollText<'_, I2C, F> {
    fn drop(&mut self) {
        if !self.finished {
            self.finished = true;
            let _ = self.matrix.leave_scroll();
        }
    }
}
