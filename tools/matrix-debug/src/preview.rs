//! Terminal previews of the simulated controller
//!
//! Reads back the frame the simulated controller is displaying, so what is
//! printed is what went over the wire, not the engine's own planes.

use colored::Colorize;
use led_matrix::hal::bus::regs;
use led_matrix::hal::{Frame, SimBus, Transaction};
use led_matrix::{Layout, Plane};

/// The displayed frame, decoded back into planes
pub struct Snapshot {
    pub layout: &'static Layout,
    pub frame: Frame,
    pub pixels: Plane,
    pub blinks: Plane,
    pub blink_enabled: bool,
}

impl Snapshot {
    /// Decode the frame the controller currently shows
    pub fn capture(bus: &SimBus, layout: &'static Layout) -> Self {
        let frame = Frame::new(bus.display_frame()).unwrap_or(Frame::DEFAULT);
        Self {
            layout,
            frame,
            pixels: Plane::from_bytes(layout, layout.unpack(bus.led_control(frame))),
            blinks: Plane::from_bytes(layout, layout.unpack(bus.blink_control(frame))),
            blink_enabled: bus.blink_enabled(),
        }
    }

    fn is_fitted(&self, x: i32, y: i32) -> bool {
        x < self.layout.physical_width && y < self.layout.physical_height
    }

    /// Plain rendering: `#` lit, `*` lit and blinking, `.` dark, `:` dark
    /// outside the fitted LEDs
    pub fn to_ascii(&self) -> String {
        let mut out = String::new();
        for y in 0..self.layout.height {
            for x in 0..self.layout.width {
                out.push(self.cell(x, y));
            }
            out.push('\n');
        }
        out
    }

    fn cell(&self, x: i32, y: i32) -> char {
        match (self.pixels.get(x, y), self.blink_enabled && self.blinks.get(x, y)) {
            (true, true) => '*',
            (true, false) => '#',
            (false, _) if self.is_fitted(x, y) => '.',
            (false, _) => ':',
        }
    }

    /// Colored rendering with a frame header
    pub fn print(&self) {
        println!(
            "{} {} frame {} ({} lit)",
            "[*]".cyan().bold(),
            self.layout.variant.name().white(),
            self.frame.index(),
            self.pixels.count()
        );
        for y in 0..self.layout.height {
            let mut line = String::from("  ");
            for x in 0..self.layout.width {
                let cell = match self.cell(x, y) {
                    '*' => "●".yellow().bold(),
                    '#' => "●".red().bold(),
                    ':' => "·".dimmed(),
                    _ => "·".white(),
                };
                line.push_str(&format!("{} ", cell));
            }
            println!("{}", line);
        }
    }
}

/// Human description of one transaction, given the bank selected before it
pub fn describe(transaction: &Transaction, bank: u8) -> String {
    let Some(reg) = transaction.register() else {
        return "empty write".to_string();
    };
    let data = transaction.data();
    if reg == regs::COMMAND {
        return match data.first() {
            Some(&regs::BANK_CONFIG) => "select config bank".to_string(),
            Some(b) => format!("select frame {}", b),
            None => "select (no bank)".to_string(),
        };
    }
    let name = if bank == regs::BANK_CONFIG {
        match reg {
            regs::MODE => "mode",
            regs::PICTURE_FRAME => "picture frame",
            regs::DISPLAY_OPTION => "display option",
            regs::AUDIO_SYNC => "audio sync",
            regs::SHUTDOWN => "shutdown",
            _ => "config register",
        }
    } else {
        match reg {
            r if r < regs::BLINK_CONTROL => "LED control",
            r if r < regs::PWM => "blink control",
            _ => "PWM",
        }
    };
    format!("{} @0x{:02X} <- {}", name, reg, hex(data))
}

fn hex(data: &[u8]) -> String {
    const SHOWN: usize = 18;
    let mut out: Vec<String> = data.iter().take(SHOWN).map(|b| format!("{:02X}", b)).collect();
    if data.len() > SHOWN {
        out.push(format!("... ({} bytes)", data.len()));
    }
    out.join(" ")
}

/// Print a transaction log, tracking bank selection along the way
pub fn print_transactions(log: &[Transaction]) {
    println!("{}", "=".repeat(60));
    println!("{}", format!("Bus Transactions ({})", log.len()).cyan().bold());
    println!("{}", "=".repeat(60));

    let mut bank = 0u8;
    for (i, t) in log.iter().enumerate() {
        println!(
            "  {:>4}  {}  {}",
            i,
            format!("0x{:02X}", t.address).dimmed(),
            describe(t, bank)
        );
        if t.register() == Some(regs::COMMAND) {
            if let Some(&b) = t.data().first() {
                bank = b;
            }
        }
    }
    println!("{}", "=".repeat(60));
}
