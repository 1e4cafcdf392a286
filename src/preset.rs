//! Guitar tuning presets
//!
//! Six open-string targets per tuning, listed from the 1st (highest) string
//! to the 6th (lowest), at the usual two-decimal reference frequencies.

use crate::note::cents_between;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuitarString {
    pub note: &'static str,
    pub frequency: f64,
}

const fn string(note: &'static str, frequency: f64) -> GuitarString {
    GuitarString { note, frequency }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TuningPreset {
    pub name: &'static str,
    pub strings: [GuitarString; 6],
}

/// The open string a measured frequency is closest to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StringTarget {
    /// 1 for the highest string, 6 for the lowest.
    pub number: usize,
    pub string: GuitarString,
    pub cents_offset: f64,
}

pub const STANDARD: TuningPreset = TuningPreset {
    name: "Standard",
    strings: [
        string("E4", 329.63),
        string("B3", 246.94),
        string("G3", 196.00),
        string("D3", 146.83),
        string("A2", 110.00),
        string("E2", 82.41),
    ],
};

pub const DROP_D: TuningPreset = TuningPreset {
    name: "Drop D",
    strings: [
        string("E4", 329.63),
        string("B3", 246.94),
        string("G3", 196.00),
        string("D3", 146.83),
        string("A2", 110.00),
        string("D2", 73.42),
    ],
};

pub const OPEN_G: TuningPreset = TuningPreset {
    name: "Open G",
    strings: [
        string("D4", 293.66),
        string("B3", 246.94),
        string("G3", 196.00),
        string("D3", 146.83),
        string("G2", 98.00),
        string("D2", 73.42),
    ],
};

pub const DADGAD: TuningPreset = TuningPreset {
    name: "DADGAD",
    strings: [
        string("D4", 293.66),
        string("A3", 220.00),
        string("G3", 196.00),
        string("D3", 146.83),
        string("A2", 110.00),
        string("D2", 73.42),
    ],
};

static PRESETS: [TuningPreset; 4] = [STANDARD, DROP_D, OPEN_G, DADGAD];

fn normalize(name: &str) -> impl Iterator<Item = char> + '_ {
    name.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .map(|c| c.to_ascii_lowercase())
}

impl TuningPreset {
    pub fn all() -> &'static [TuningPreset] {
        &PRESETS
    }

    /// Looks a preset up by name, ignoring case, spaces, dashes and underscores.
    pub fn by_name(name: &str) -> Option<&'static TuningPreset> {
        PRESETS
            .iter()
            .find(|preset| normalize(preset.name).eq(normalize(name)))
    }

    /// The string whose open frequency is closest in Hz to `frequency`.
    pub fn nearest_string(&self, frequency: f64) -> StringTarget {
        let mut best = 0;
        let mut min_difference = f64::MAX;

        for (i, string) in self.strings.iter().enumerate() {
            let difference = (string.frequency - frequency).abs();
            if difference < min_difference {
                min_difference = difference;
                best = i;
            }
        }

        let string = self.strings[best];
        StringTarget {
            number: best + 1,
            string,
            cents_offset: cents_between(frequency, string.frequency),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        assert_eq!(TuningPreset::by_name("standard"), Some(&STANDARD));
        assert_eq!(TuningPreset::by_name("drop-d"), Some(&DROP_D));
        assert_eq!(TuningPreset::by_name("Open_G"), Some(&OPEN_G));
        assert_eq!(TuningPreset::by_name("dadgad"), Some(&DADGAD));
        assert_eq!(TuningPreset::by_name("nashville"), None);
        assert_eq!(TuningPreset::all().len(), 4);
    }

    #[test]
    fn test_nearest_string() {
        let low_e = STANDARD.nearest_string(82.0);
        assert_eq!(low_e.number, 6);
        assert_eq!(low_e.string.note, "E2");
        assert!(low_e.cents_offset < 0.0);

        let high_e = STANDARD.nearest_string(331.0);
        assert_eq!(high_e.number, 1);
        assert!(high_e.cents_offset > 0.0);

        let dropped = DROP_D.nearest_string(74.0);
        assert_eq!(dropped.string.note, "D2");
    }

    #[test]
    fn test_strings_descend() {
        for preset in TuningPreset::all() {
            for pair in preset.strings.windows(2) {
                assert!(pair[0].frequency >= pair[1].frequency, "{}", preset.name);
            }
        }
    }
}
