//! PHI detection data models

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// PHI category recognized by the pattern library
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhiCategory {
    /// Personal names
    Name,
    /// Email addresses
    Email,
    /// Telephone and fax numbers
    Phone,
    /// Social Security Numbers
    Ssn,
    /// Calendar dates (birth, admission, discharge)
    Date,
    /// Street addresses
    Address,
    /// ZIP codes
    Zip,
    /// Medical record numbers
    Mrn,
    /// Health plan and insurance member identifiers
    InsuranceId,
    /// Financial account numbers
    AccountNumber,
    /// Certificate and license numbers
    LicenseNumber,
    /// Vehicle identifiers
    VehicleId,
    /// Device identifiers and serial numbers
    DeviceId,
    /// Biometric identifiers
    BiometricId,
    /// Web URLs
    Url,
    /// IP addresses
    IpAddress,
}

impl PhiCategory {
    /// Every category, in matching precedence order
    pub const ALL: [PhiCategory; 16] = [
        Self::Ssn,
        Self::Mrn,
        Self::InsuranceId,
        Self::AccountNumber,
        Self::LicenseNumber,
        Self::BiometricId,
        Self::DeviceId,
        Self::VehicleId,
        Self::Email,
        Self::Url,
        Self::IpAddress,
        Self::Phone,
        Self::Address,
        Self::Date,
        Self::Zip,
        Self::Name,
    ];

    /// Upper-case label used in redaction placeholders
    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "NAME",
            Self::Email => "EMAIL",
            Self::Phone => "PHONE",
            Self::Ssn => "SSN",
            Self::Date => "DATE",
            Self::Address => "ADDRESS",
            Self::Zip => "ZIP",
            Self::Mrn => "MRN",
            Self::InsuranceId => "INSURANCE_ID",
            Self::AccountNumber => "ACCOUNT_NUMBER",
            Self::LicenseNumber => "LICENSE_NUMBER",
            Self::VehicleId => "VEHICLE_ID",
            Self::DeviceId => "DEVICE_ID",
            Self::BiometricId => "BIOMETRIC_ID",
            Self::Url => "URL",
            Self::IpAddress => "IP_ADDRESS",
        }
    }

    /// Snake-case key used in pattern files and configuration
    pub fn key(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Ssn => "ssn",
            Self::Date => "date",
            Self::Address => "address",
            Self::Zip => "zip",
            Self::Mrn => "mrn",
            Self::InsuranceId => "insurance_id",
            Self::AccountNumber => "account_number",
            Self::LicenseNumber => "license_number",
            Self::VehicleId => "vehicle_id",
            Self::DeviceId => "device_id",
            Self::BiometricId => "biometric_id",
            Self::Url => "url",
            Self::IpAddress => "ip_address",
        }
    }

    /// Risk level assigned when a pattern does not declare one
    pub fn default_risk_level(&self) -> RiskLevel {
        match self {
            Self::Ssn | Self::Mrn | Self::InsuranceId | Self::AccountNumber | Self::BiometricId => {
                RiskLevel::High
            }
            Self::Zip | Self::Url => RiskLevel::Low,
            _ => RiskLevel::Medium,
        }
    }

    /// Position in matching order; lower values are applied first
    ///
    /// Specific identifiers come first and the broad name heuristic last.
    pub fn precedence(&self) -> usize {
        Self::ALL
            .iter()
            .position(|c| c == self)
            .unwrap_or(Self::ALL.len())
    }
}

impl fmt::Display for PhiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for PhiCategory {
    type Err = String;

    /// Accepts the snake-case key or the upper-case label, case-insensitively
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.key() == normalized)
            .ok_or_else(|| format!("Unknown PHI category: {s}"))
    }
}

/// Risk level of a PHI pattern
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    #[default]
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(format!(
                "Invalid risk level '{s}'. Must be one of: low, medium, high"
            )),
        }
    }
}

/// Detection sensitivity exposed by configuration
///
/// Pattern-based detection has no thresholds, so the level is carried for
/// surrounding components and does not filter matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SensitivityLevel {
    Low,
    #[default]
    Medium,
    High,
}

impl fmt::Display for SensitivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        };
        f.write_str(s)
    }
}

impl FromStr for SensitivityLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(format!(
                "Invalid sensitivity '{s}'. Must be one of: low, medium, high"
            )),
        }
    }
}

/// A PHI span found in a text
///
/// Offsets are byte offsets into the scanned text, `end` exclusive, and
/// always fall on `char` boundaries.
#[derive(Clone, PartialEq, Eq)]
pub struct DetectionMatch {
    /// Category of the producing pattern
    pub category: PhiCategory,
    /// Matched substring
    pub value: String,
    /// Start byte offset
    pub start: usize,
    /// End byte offset (exclusive)
    pub end: usize,
    /// Risk level of the producing pattern
    pub risk_level: RiskLevel,
    /// Name of the producing pattern
    pub pattern_name: String,
}

impl DetectionMatch {
    /// Length of the span in bytes
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether two spans share at least one byte
    pub fn overlaps(&self, other: &DetectionMatch) -> bool {
        self.start < other.end && other.start < self.end
    }
}

// The matched value is PHI and must not reach logs through `{:?}`.
impl fmt::Debug for DetectionMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DetectionMatch")
            .field("category", &self.category)
            .field("value", &"[REDACTED]")
            .field("start", &self.start)
            .field("end", &self.end)
            .field("risk_level", &self.risk_level)
            .field("pattern_name", &self.pattern_name)
            .finish()
    }
}
