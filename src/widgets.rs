/// Clock, battery and meteor helpers for the status widgets
use serde::{Deserialize, Serialize};

/// 12-hour clock label, e.g. `3:07 PM`
pub fn format_clock(hours: u32, minutes: u32) -> String {
    let suffix = if hours % 24 < 12 { "AM" } else { "PM" };
    let hour = match hours % 12 {
        0 => 12,
        h => h,
    };
    format!("{}:{:02} {}", hour, minutes % 60, suffix)
}

/// Current local time as a clock label
pub fn now_label() -> String {
    let date = js_sys::Date::new_0();
    format_clock(date.get_hours(), date.get_minutes())
}

/// Battery state as reported by the battery API
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BatteryStatus {
    /// Charge level between 0.0 and 1.0
    pub level: f64,
    pub charging: bool,
}

impl BatteryStatus {
    pub fn percent(&self) -> u8 {
        (self.level.clamp(0.0, 1.0) * 100.0).round() as u8
    }

    pub fn label(&self) -> String {
        if self.charging {
            format!("⚡ {}%", self.percent())
        } else {
            format!("🔋 {}%", self.percent())
        }
    }
}

/// Horizontal position for a new meteor within a viewport of `width` pixels
pub fn meteor_left(width: f64) -> f64 {
    let mut buf = [0u8; 4];
    let fraction = match getrandom::getrandom(&mut buf) {
        Ok(()) => u32::from_le_bytes(buf) as f64 / u32::MAX as f64,
        Err(e) => {
            log::warn!("No randomness for meteor: {}", e);
            0.5
        }
    };
    (fraction * width.max(0.0)).floor()
}
