//! Human-readable summary strings.
//!
//! Record `summary` methods render through a table of format strings so
//! a host application can localise them. The table installed with
//! [`set_display_strings`] backs the `Display` impls on records; the
//! `summary` methods take the table as an argument so callers (and
//! tests) can use their own without touching process-wide state.

use std::sync::{Arc, RwLock};

use once_cell::sync::Lazy;

/// Format strings used by record summaries.
///
/// Placeholders `{0}` and `{1}` are replaced positionally.
#[derive(Clone, Debug)]
pub struct DisplayStrings {
    /// Percentage; `{0}` is the numeric value.
    pub percent: String,
    /// Blood pressure; `{0}` is systolic, `{1}` diastolic.
    pub blood_pressure: String,
    /// Heart rate; `{0}` is beats per minute.
    pub beats_per_minute: String,
    /// Length; `{0}` is metres.
    pub metres: String,
    /// Mass; `{0}` is kilograms.
    pub kilograms: String,
}

impl Default for DisplayStrings {
    /// The built-in English table.
    fn default() -> Self {
        Self {
            percent: "{0}%".to_string(),
            blood_pressure: "{0}/{1}".to_string(),
            beats_per_minute: "{0} bpm".to_string(),
            metres: "{0} m".to_string(),
            kilograms: "{0} kg".to_string(),
        }
    }
}

impl DisplayStrings {
    /// Formats a unit fraction as a percentage, rounded to one decimal
    /// place.
    pub fn format_percent(&self, fraction: f64) -> String {
        let percent = (fraction * 1000.0).round() / 10.0;
        self.percent.replace("{0}", &percent.to_string())
    }

    /// Formats a systolic/diastolic pair.
    pub fn format_blood_pressure(&self, systolic: u32, diastolic: u32) -> String {
        self.blood_pressure
            .replace("{0}", &systolic.to_string())
            .replace("{1}", &diastolic.to_string())
    }

    /// Formats a pulse in beats per minute.
    pub fn format_beats_per_minute(&self, value: u32) -> String {
        self.beats_per_minute.replace("{0}", &value.to_string())
    }

    /// Formats a length in metres.
    pub fn format_metres(&self, value: f64) -> String {
        self.metres.replace("{0}", &value.to_string())
    }

    /// Formats a mass in kilograms.
    pub fn format_kilograms(&self, value: f64) -> String {
        self.kilograms.replace("{0}", &value.to_string())
    }
}

static DISPLAY_STRINGS: Lazy<RwLock<Arc<DisplayStrings>>> =
    Lazy::new(|| RwLock::new(Arc::new(DisplayStrings::default())));

/// Returns the process-wide display-string table.
pub fn display_strings() -> Arc<DisplayStrings> {
    match DISPLAY_STRINGS.read() {
        Ok(guard) => Arc::clone(&guard),
        Err(poisoned) => Arc::clone(&poisoned.into_inner()),
    }
}

/// Replaces the process-wide display-string table.
pub fn set_display_strings(strings: DisplayStrings) {
    match DISPLAY_STRINGS.write() {
        Ok(mut guard) => *guard = Arc::new(strings),
        Err(poisoned) => *poisoned.into_inner() = Arc::new(strings),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_percent_with_one_decimal() {
        let strings = DisplayStrings::default();
        assert_eq!(strings.format_percent(0.97), "97%");
        assert_eq!(strings.format_percent(0.975), "97.5%");
        assert_eq!(strings.format_percent(1.0), "100%");
    }

    #[test]
    fn formats_pairs_and_units() {
        let strings = DisplayStrings::default();
        assert_eq!(strings.format_blood_pressure(120, 80), "120/80");
        assert_eq!(strings.format_beats_per_minute(62), "62 bpm");
        assert_eq!(strings.format_metres(1.8), "1.8 m");
        assert_eq!(strings.format_kilograms(72.5), "72.5 kg");
    }

    #[test]
    fn swaps_the_process_wide_table() {
        let custom = DisplayStrings {
            percent: "{0} pct".to_string(),
            ..DisplayStrings::default()
        };
        set_display_strings(custom);
        assert_eq!(display_strings().format_percent(0.5), "50 pct");

        set_display_strings(DisplayStrings::default());
        assert_eq!(display_strings().format_percent(0.5), "50%");
    }
}
