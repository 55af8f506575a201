//! METAR weather report decoder.
//!
//! `decode` is pure and total: every field degrades independently to
//! its unknown sentinel when its pattern is absent, so a partial or
//! mangled report still yields a usable metrics struct.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::models::Severity;

/// Tokens whose presence anywhere in the report classifies it IFR.
const IFR_TOKENS: &[&str] = &["BKN", "OVC", "VV", "FG", "BR", "TSRA"];

lazy_static! {
    static ref TEMP_RE: Regex = Regex::new(r" (\d{2})/(\d{2}) ").unwrap();
    static ref CLOUD_RE: Regex = Regex::new(r"(FEW|SCT|BKN|OVC)(\d{3})").unwrap();
    static ref WIND_RE: Regex = Regex::new(r" (\d{3})(\d{2})KT").unwrap();
    static ref VIS_RE: Regex = Regex::new(r" (\d{1,2})SM ").unwrap();
    static ref ALTIMETER_RE: Regex = Regex::new(r" A(\d{4})").unwrap();
}

/// Flight-rule category derived from the report text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FlightRules {
    Ifr,
    Vfr,
}

impl FlightRules {
    pub fn label(&self) -> &'static str {
        match self {
            FlightRules::Ifr => "IFR",
            FlightRules::Vfr => "VFR",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            FlightRules::Ifr => "Caution",
            FlightRules::Vfr => "No Warnings",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            FlightRules::Ifr => Severity::Warning,
            FlightRules::Vfr => Severity::Nominal,
        }
    }
}

/// Cloud-cover category of the reported ceiling layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CloudCover {
    Few,
    Scattered,
    Broken,
    Overcast,
}

impl CloudCover {
    fn from_token(token: &str) -> Option<Self> {
        match token {
            "FEW" => Some(CloudCover::Few),
            "SCT" => Some(CloudCover::Scattered),
            "BKN" => Some(CloudCover::Broken),
            "OVC" => Some(CloudCover::Overcast),
            _ => None,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            CloudCover::Few => "Few Clouds",
            CloudCover::Scattered => "Scattered Clouds",
            CloudCover::Broken => "Broken Ceiling",
            CloudCover::Overcast => "Overcast",
        }
    }
}

/// Structured weather metrics decoded from one METAR report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherMetrics {
    pub flight_rules: FlightRules,
    pub temperature_c: Option<i32>,
    pub ceiling_ft: Option<u32>,
    pub ceiling_cover: Option<CloudCover>,
    pub wind_direction_deg: Option<u16>,
    pub wind_speed_kt: Option<u16>,
    pub visibility_sm: Option<u32>,
    pub altimeter_inhg: Option<f64>,
}

impl WeatherMetrics {
    pub fn ceiling_severity(&self) -> Severity {
        match self.ceiling_ft {
            None => Severity::Neutral,
            Some(ft) if ft < 1000 => Severity::Warning,
            Some(ft) if ft < 3000 => Severity::Caution,
            Some(_) => Severity::Nominal,
        }
    }

    pub fn wind_severity(&self) -> Severity {
        match self.wind_speed_kt {
            None => Severity::Neutral,
            Some(kt) if kt < 5 => Severity::Warning,
            Some(kt) if kt < 15 => Severity::Caution,
            Some(_) => Severity::Nominal,
        }
    }

    pub fn visibility_severity(&self) -> Severity {
        match self.visibility_sm {
            None => Severity::Neutral,
            Some(sm) if sm < 3 => Severity::Warning,
            Some(sm) if sm < 5 => Severity::Caution,
            Some(_) => Severity::Nominal,
        }
    }
}

/// Decode a raw METAR report into structured metrics.
///
/// Each field is matched independently over the whole report text.
/// The ceiling takes the *last* cloud-layer token in textual order;
/// the lowest restrictive layer is conventionally listed last, and
/// the original policy is preserved rather than switching to a
/// minimum-wins rule.
pub fn decode(raw: &str) -> WeatherMetrics {
    let flight_rules = if IFR_TOKENS.iter().any(|token| raw.contains(token)) {
        FlightRules::Ifr
    } else {
        FlightRules::Vfr
    };

    let temperature_c = TEMP_RE
        .captures(raw)
        .and_then(|caps| caps[1].parse().ok());

    let (ceiling_ft, ceiling_cover) = match CLOUD_RE.captures_iter(raw).last() {
        Some(caps) => {
            let hundreds: u32 = caps[2].parse().unwrap_or(0);
            (Some(hundreds * 100), CloudCover::from_token(&caps[1]))
        }
        None => (None, None),
    };

    let (wind_direction_deg, wind_speed_kt) = match WIND_RE.captures(raw) {
        Some(caps) => (caps[1].parse().ok(), caps[2].parse().ok()),
        None => (None, None),
    };

    let visibility_sm = VIS_RE
        .captures(raw)
        .and_then(|caps| caps[1].parse().ok());

    let altimeter_inhg = ALTIMETER_RE
        .captures(raw)
        .and_then(|caps| caps[1].parse::<f64>().ok())
        .map(|hundredths| hundredths / 100.0);

    WeatherMetrics {
        flight_rules,
        temperature_c,
        ceiling_ft,
        ceiling_cover,
        wind_direction_deg,
        wind_speed_kt,
        visibility_sm,
        altimeter_inhg,
    }
}
