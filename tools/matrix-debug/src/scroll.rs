//! Scroll playback on the tokio runtime
//!
//! Drives [`ScrollText`] frame by frame, sleeping between frames with
//! `tokio::time::sleep` instead of blocking the thread.

use anyhow::Result;
use chrono::Local;
use colored::Colorize;
use led_matrix::{Animation, Matrix, SimBus};
use std::time::Duration;

use crate::bus_error;
use crate::preview::Snapshot;

/// Playback options
#[derive(Debug, Clone)]
pub struct PlaybackConfig {
    pub delay_ms: u32,
    pub row: i32,
    /// Times to play the text
    pub repeat: u32,
    /// Print every frame instead of a progress line
    pub show_frames: bool,
}

/// Summary of a finished playback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackStats {
    pub frames: u32,
    pub text_width: i32,
}

/// Scroll `text` across the simulated panel
pub async fn play(matrix: &mut Matrix<SimBus>, text: &str, config: &PlaybackConfig) -> Result<PlaybackStats> {
    let layout = matrix.layout();
    let mut scroll = matrix
        .begin_scroll(text, config.delay_ms, config.row)
        .map_err(bus_error)?;
    let text_width = scroll.length();
    log::info!(
        "scrolling {} columns over {} frames",
        text_width,
        scroll.frames_remaining()
    );

    let mut frames = 0;
    for pass in 0..config.repeat.max(1) {
        if pass > 0 {
            scroll.reset().map_err(bus_error)?;
        }
        loop {
            let offset = scroll.offset();
            let Some(ms) = scroll.step().map_err(bus_error)? else {
                break;
            };
            frames += 1;
            if config.show_frames {
                println!(
                    "{} frame {} offset {}",
                    Local::now().format("[%H:%M:%S%.3f]").to_string().dimmed(),
                    frames,
                    offset
                );
                Snapshot::capture(scroll.matrix().bus(), layout).print();
            }
            if ms > 0 {
                tokio::time::sleep(Duration::from_millis(u64::from(ms))).await;
            }
        }
    }

    Ok(PlaybackStats { frames, text_width })
}
