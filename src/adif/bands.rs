// Amateur Radio Band Plan
// Reference: IARU band plans and ADIF 3.1.4 Band Enumeration
//
// Bidirectional lookup between band labels and frequencies. The nominal
// frequency for a band is the value written to FREQ on export.

/// Label returned when a frequency falls outside every known band
pub const UNKNOWN_BAND: &str = "Unknown";

/// One amateur band: label, nominal frequency as written in ADIF, and the
/// inclusive frequency range in MHz used to classify an arbitrary frequency
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandDef {
    pub name: &'static str,
    pub nominal_mhz: &'static str,
    pub lower_mhz: f64,
    pub upper_mhz: f64,
}

impl BandDef {
    const fn new(name: &'static str, nominal_mhz: &'static str, lower_mhz: f64, upper_mhz: f64) -> Self {
        Self { name, nominal_mhz, lower_mhz, upper_mhz }
    }

    pub fn contains(&self, freq_mhz: f64) -> bool {
        (self.lower_mhz..=self.upper_mhz).contains(&freq_mhz)
    }
}

const STANDARD_BANDS: &[BandDef] = &[
    // HF Bands
    BandDef::new("160m", "1.8", 1.8, 2.0),
    BandDef::new("80m", "3.5", 3.5, 4.0),
    BandDef::new("60m", "5.0", 5.0, 5.5),
    BandDef::new("40m", "7.0", 7.0, 7.3),
    BandDef::new("30m", "10.1", 10.1, 10.15),
    BandDef::new("20m", "14.0", 14.0, 14.35),
    BandDef::new("17m", "18.0", 18.0, 18.2),
    BandDef::new("15m", "21.0", 21.0, 21.45),
    BandDef::new("12m", "24.0", 24.0, 24.99),
    BandDef::new("10m", "28.0", 28.0, 29.7),
    // VHF/UHF Bands
    BandDef::new("6m", "50.0", 50.0, 54.0),
    BandDef::new("4m", "70.0", 70.0, 71.0),
    BandDef::new("2m", "144.0", 144.0, 148.0),
    BandDef::new("1.25m", "222.0", 222.0, 225.0),
    BandDef::new("70cm", "432.0", 420.0, 450.0),
    BandDef::new("33cm", "902.0", 902.0, 928.0),
    BandDef::new("23cm", "1240.0", 1240.0, 1300.0),
];

/// Immutable band table, built once and handed to the codec and mapper
#[derive(Debug, Clone)]
pub struct BandPlan {
    bands: &'static [BandDef],
}

impl Default for BandPlan {
    fn default() -> Self {
        Self::standard()
    }
}

impl BandPlan {
    /// The standard amateur allocations from 160m to 23cm
    pub fn standard() -> Self {
        Self { bands: STANDARD_BANDS }
    }

    pub fn bands(&self) -> &[BandDef] {
        self.bands
    }

    /// Classify a frequency in MHz into its enclosing band
    pub fn freq_to_band(&self, freq_mhz: f64) -> &'static str {
        self.bands
            .iter()
            .find(|b| b.contains(freq_mhz))
            .map(|b| b.name)
            .unwrap_or(UNKNOWN_BAND)
    }

    /// Classify a textual frequency (as found in an ADIF FREQ field)
    pub fn freq_str_to_band(&self, freq: &str) -> &'static str {
        match freq.trim().parse::<f64>() {
            Ok(f) => self.freq_to_band(f),
            Err(_) => UNKNOWN_BAND,
        }
    }

    /// Nominal frequency for a band label, exact match on the label
    pub fn band_to_freq(&self, band: &str) -> Option<&'static str> {
        self.bands
            .iter()
            .find(|b| b.name == band)
            .map(|b| b.nominal_mhz)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_freq_to_band() {
        let plan = BandPlan::standard();
        assert_eq!(plan.freq_to_band(7.074), "40m");
        assert_eq!(plan.freq_to_band(14.074), "20m");
        assert_eq!(plan.freq_to_band(3.573), "80m");
        assert_eq!(plan.freq_to_band(50.313), "6m");
        assert_eq!(plan.freq_to_band(144.174), "2m");
        assert_eq!(plan.freq_to_band(432.1), "70cm");
        assert_eq!(plan.freq_to_band(999.0), UNKNOWN_BAND);
    }

    #[test]
    fn test_band_edges_are_inclusive() {
        let plan = BandPlan::standard();
        assert_eq!(plan.freq_to_band(14.0), "20m");
        assert_eq!(plan.freq_to_band(14.35), "20m");
        assert_eq!(plan.freq_to_band(14.36), UNKNOWN_BAND);
    }

    #[test]
    fn test_freq_str_to_band() {
        let plan = BandPlan::standard();
        assert_eq!(plan.freq_str_to_band("14.074"), "20m");
        assert_eq!(plan.freq_str_to_band(" 7.030 "), "40m");
        assert_eq!(plan.freq_str_to_band("abc"), UNKNOWN_BAND);
        assert_eq!(plan.freq_str_to_band(""), UNKNOWN_BAND);
    }

    #[test]
    fn test_band_to_freq() {
        let plan = BandPlan::standard();
        assert_eq!(plan.band_to_freq("20m"), Some("14.0"));
        assert_eq!(plan.band_to_freq("70cm"), Some("432.0"));
        assert_eq!(plan.band_to_freq("20M"), None);
        assert_eq!(plan.band_to_freq("11m"), None);
    }

    #[test]
    fn test_nominal_freq_maps_back_to_band() {
        let plan = BandPlan::standard();
        for band in plan.bands() {
            assert_eq!(plan.freq_str_to_band(band.nominal_mhz), band.name);
        }
    }
}
