//! Regex extraction of geometric and physical parameters

use super::{ETCHING, FDM_PRINTING, GENERIC_3D_PRINTING, LITHOGRAPHY};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// A dimension mention, e.g. `12.5 mm`. Units are normalized to
/// `mm`, `cm`, `um`, or `nm`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dimension {
    pub value: f64,
    pub unit: String,
}

impl Dimension {
    pub fn new(value: f64, unit: &str) -> Self {
        Self {
            value,
            unit: unit.to_string(),
        }
    }

    /// Value converted to meters
    pub fn meters(&self) -> f64 {
        let factor = match self.unit.as_str() {
            "mm" => 1e-3,
            "cm" => 1e-2,
            "um" => 1e-6,
            "nm" => 1e-9,
            _ => 1.0,
        };
        self.value * factor
    }

    /// Whether this mention is in the FDM-printable range
    /// (0.1 to 100 on an mm/cm scale)
    pub fn is_printable_scale(&self) -> bool {
        matches!(self.unit.as_str(), "mm" | "cm") && (0.1..=100.0).contains(&self.value)
    }
}

/// Everything mined from one paper's text
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedParams {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub frequency_info: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dimensions: Vec<Dimension>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub manufacturing_methods: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub materials: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub functions: Vec<String>,
}

struct Patterns {
    freq_range: Regex,
    freq_single: Regex,
    freq_band: Regex,
    size_symbol: Regex,
    size_word: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        freq_range: Regex::new(r"(\d+(?:\.\d+)?)\s*-?\s*(\d+(?:\.\d+)?)\s*(ghz|thz)").unwrap(),
        freq_single: Regex::new(r"(\d+(?:\.\d+)?)\s*(ghz|thz)").unwrap(),
        freq_band: Regex::new(r"\b(infrared|ir|terahertz|thz|microwave)\b").unwrap(),
        size_symbol: Regex::new(r"(\d+(?:\.\d+)?)\s*(mm|cm|um|μm|nm)\b").unwrap(),
        size_word: Regex::new(r"(\d+(?:\.\d+)?)\s*(millimeter|centimeter|micrometer|micron)s?\b")
            .unwrap(),
    })
}

fn normalize_unit(unit: &str) -> &'static str {
    match unit {
        "mm" | "millimeter" => "mm",
        "cm" | "centimeter" => "cm",
        "um" | "μm" | "micrometer" | "micron" => "um",
        "nm" => "nm",
        _ => "mm",
    }
}

/// Mine frequency, dimension, manufacturing, material, and function
/// mentions from lowercased title+abstract text
pub fn extract_params(text: &str) -> ExtractedParams {
    let patterns = patterns();
    let mut params = ExtractedParams::default();

    // Frequency: first pattern family with any hit wins
    for regex in [
        &patterns.freq_range,
        &patterns.freq_single,
        &patterns.freq_band,
    ] {
        let matches: Vec<String> = regex
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect();
        if !matches.is_empty() {
            params.frequency_info = matches;
            break;
        }
    }

    // Dimensions: mm/cm focus for FDM printing, sub-mm kept for the
    // scale penalty
    for regex in [&patterns.size_symbol, &patterns.size_word] {
        for capture in regex.captures_iter(text) {
            if let Ok(value) = capture[1].parse::<f64>() {
                params
                    .dimensions
                    .push(Dimension::new(value, normalize_unit(&capture[2])));
            }
        }
    }

    // Manufacturing methods, FDM first
    let contains_any =
        |terms: &[&str]| terms.iter().any(|term| text.contains(term));
    if contains_any(&["fdm", "fused deposition", "filament", "extrusion"]) {
        params.manufacturing_methods.push(FDM_PRINTING.to_string());
        params
            .manufacturing_methods
            .push(GENERIC_3D_PRINTING.to_string());
    } else if contains_any(&["3d print", "additive", "sla", "stereolithography"]) {
        params
            .manufacturing_methods
            .push(GENERIC_3D_PRINTING.to_string());
    }
    if contains_any(&["lithography", "photolithography", "electron beam"]) {
        params.manufacturing_methods.push(LITHOGRAPHY.to_string());
    }
    if contains_any(&["etching", "etch"]) {
        params.manufacturing_methods.push(ETCHING.to_string());
    }

    // Materials: FDM filaments take precedence, generic materials
    // only fill in when no filament matched
    const FDM_MATERIALS: &[&str] = &[
        "pla", "abs", "petg", "tpu", "tpe", "polycarbonate", "nylon", "pva", "support",
    ];
    const GENERAL_MATERIALS: &[&str] = &[
        "metal", "dielectric", "polymer", "silicon", "gold", "copper", "silver", "resin",
    ];
    for term in FDM_MATERIALS {
        if text.contains(term) {
            params.materials.push((*term).to_string());
        }
    }
    if params.materials.is_empty() {
        for term in GENERAL_MATERIALS {
            if text.contains(term) {
                params.materials.push((*term).to_string());
            }
        }
    }

    // Functionality keywords
    const FUNCTION_TERMS: &[&str] = &[
        "absorber",
        "antenna",
        "filter",
        "lens",
        "polarizer",
        "cloaking",
        "negative index",
        "metamaterial",
        "unit cell",
    ];
    for term in FUNCTION_TERMS {
        if text.contains(term) {
            params.functions.push((*term).to_string());
        }
    }

    params
}
