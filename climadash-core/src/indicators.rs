//! Headline climate indicators shown above the charts.
//!
//! These are fixed editorial figures, not derived from the table.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KeyIndicator {
    pub label: &'static str,
    pub value: &'static str,
    pub delta: &'static str,
}

pub const KEY_INDICATORS: [KeyIndicator; 3] = [
    KeyIndicator {
        label: "CO₂ Concentration (2020)",
        value: "414 ppm",
        delta: "+2.5 ppm from 2019",
    },
    KeyIndicator {
        label: "Global Temperature Anomaly",
        value: "+1.2°C",
        delta: "Above pre-industrial",
    },
    KeyIndicator {
        label: "Sea Level Rise",
        value: "3.7 mm/year",
        delta: "Accelerating",
    },
];

pub fn key_indicators() -> &'static [KeyIndicator] {
    &KEY_INDICATORS
}

/// The researcher bio shown above the indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AboutSection {
    pub name: &'static str,
    pub affiliation: &'static str,
    pub research_interests: &'static [&'static str],
    pub summary: &'static str,
}

pub const ABOUT: AboutSection = AboutSection {
    name: "Data Researcher",
    affiliation: "Climate Studies Institute",
    research_interests: &[
        "Global temperature trends",
        "CO₂ emissions impact",
        "Climate change mitigation strategies",
    ],
    summary: "This dashboard showcases key indicators of climate change over time.",
};

pub const DASHBOARD_TITLE: &str = "Climate Change Research Dashboard";

pub const DATA_SOURCE_CAPTION: &str = "Data Source: Our World in Data (https://github.com/owid/co2-data)";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_indicators_in_display_order() {
        let labels: Vec<&str> = key_indicators().iter().map(|k| k.label).collect();
        assert_eq!(
            labels,
            vec![
                "CO₂ Concentration (2020)",
                "Global Temperature Anomaly",
                "Sea Level Rise"
            ]
        );
    }

    #[test]
    fn about_section_lists_research_interests() {
        assert_eq!(ABOUT.name, "Data Researcher");
        assert_eq!(ABOUT.affiliation, "Climate Studies Institute");
        assert_eq!(ABOUT.research_interests.len(), 3);
        assert!(ABOUT.research_interests.contains(&"CO₂ emissions impact"));
    }
}
