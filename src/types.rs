//! Type definitions for the instance-type catalog
//!
//! Mirrors the shape the KWOK cloud provider reads at startup: one
//! `InstanceTypeOptions` per instance type and architecture, each carrying a
//! resource list and a set of zone-scoped offerings.

use crate::error::CatalogError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Node label selecting the capacity type of an offering
pub const CAPACITY_TYPE_LABEL_KEY: &str = "karpenter.sh/capacity-type";

/// Well-known topology label selecting the availability zone
pub const TOPOLOGY_ZONE_LABEL_KEY: &str = "topology.kubernetes.io/zone";

/// CPU architecture of an instance type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Architecture {
    Amd64,
    Arm64,
}

impl Architecture {
    pub const ALL: [Architecture; 2] = [Architecture::Amd64, Architecture::Arm64];

    pub fn as_str(&self) -> &'static str {
        match self {
            Architecture::Amd64 => "amd64",
            Architecture::Arm64 => "arm64",
        }
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Architecture {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "amd64" => Ok(Architecture::Amd64),
            "arm64" => Ok(Architecture::Arm64),
            other => Err(CatalogError::validation(
                "architecture",
                format!("Unsupported architecture: {}. Use 'amd64' or 'arm64'", other),
            )),
        }
    }
}

/// Operating system; only Linux is generated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperatingSystem {
    Linux,
}

/// Capacity purchase model of an offering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CapacityType {
    OnDemand,
}

impl CapacityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CapacityType::OnDemand => "on-demand",
        }
    }
}

/// Resource kinds carried in a `ResourceList`
///
/// Variant order matches the lexical order of the serialized names, so a
/// `BTreeMap` keyed by this enum serializes with sorted keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ResourceName {
    #[serde(rename = "cpu")]
    Cpu,
    #[serde(rename = "ephemeral-storage")]
    EphemeralStorage,
    #[serde(rename = "memory")]
    Memory,
    #[serde(rename = "pods")]
    Pods,
}

/// Resource quantities of an instance type, keyed by resource kind
pub type ResourceList = BTreeMap<ResourceName, Quantity>;

const BINARY_SUFFIXES: [(&str, u32); 6] = [
    ("Ei", 60),
    ("Pi", 50),
    ("Ti", 40),
    ("Gi", 30),
    ("Mi", 20),
    ("Ki", 10),
];

const DECIMAL_SUFFIXES: [(&str, u32); 6] = [
    ("E", 18),
    ("P", 15),
    ("T", 12),
    ("G", 9),
    ("M", 6),
    ("k", 3),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum QuantityFormat {
    DecimalSI,
    BinarySI,
}

/// Integral Kubernetes-style resource quantity
///
/// Stores the value in base units (cores, bytes, pods) together with the
/// suffix family it was written in. Serializes to the canonical string form
/// (`"16"`, `"32Gi"`), picking the largest suffix that divides the value.
/// Equality and hashing look at the value only; the format affects printing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Quantity {
    value: i64,
    format: QuantityFormat,
}

impl PartialEq for Quantity {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Quantity {}

impl Hash for Quantity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl Quantity {
    /// Plain count (CPU cores, pods)
    pub fn count(n: u32) -> Self {
        Quantity {
            value: i64::from(n),
            format: QuantityFormat::DecimalSI,
        }
    }

    /// Binary-suffixed size in gibibytes (memory, ephemeral storage)
    pub fn gibibytes(n: u32) -> Self {
        Quantity {
            value: i64::from(n) << 30,
            format: QuantityFormat::BinarySI,
        }
    }

    /// Value in base units
    pub fn value(&self) -> i64 {
        self.value
    }

    pub fn as_approximate_f64(&self) -> f64 {
        self.value as f64
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.value == 0 {
            return f.write_str("0");
        }
        match self.format {
            QuantityFormat::BinarySI => {
                for (suffix, shift) in BINARY_SUFFIXES {
                    let unit = 1i64 << shift;
                    if self.value % unit == 0 {
                        return write!(f, "{}{}", self.value / unit, suffix);
                    }
                }
            }
            QuantityFormat::DecimalSI => {
                for (suffix, exp) in DECIMAL_SUFFIXES {
                    let unit = 10i64.pow(exp);
                    if self.value % unit == 0 {
                        return write!(f, "{}{}", self.value / unit, suffix);
                    }
                }
            }
        }
        write!(f, "{}", self.value)
    }
}

impl FromStr for Quantity {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CatalogError::InvalidQuantity(s.to_string());
        let split = s
            .find(|c: char| !(c.is_ascii_digit() || c == '-'))
            .unwrap_or(s.len());
        let (digits, suffix) = s.split_at(split);
        let number: i64 = digits.parse().map_err(|_| invalid())?;

        if suffix.is_empty() {
            return Ok(Quantity {
                value: number,
                format: QuantityFormat::DecimalSI,
            });
        }
        if let Some((_, shift)) = BINARY_SUFFIXES.iter().find(|(name, _)| *name == suffix) {
            let value = number.checked_mul(1i64 << shift).ok_or_else(invalid)?;
            return Ok(Quantity {
                value,
                format: QuantityFormat::BinarySI,
            });
        }
        if let Some((_, exp)) = DECIMAL_SUFFIXES.iter().find(|(name, _)| *name == suffix) {
            let value = number.checked_mul(10i64.pow(*exp)).ok_or_else(invalid)?;
            return Ok(Quantity {
                value,
                format: QuantityFormat::DecimalSI,
            });
        }
        Err(invalid())
    }
}

impl From<Quantity> for String {
    fn from(q: Quantity) -> Self {
        q.to_string()
    }
}

impl TryFrom<String> for Quantity {
    type Error = CatalogError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Selector operator; the catalog only ever emits `In`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeSelectorOperator {
    In,
}

/// A single label requirement scoping an offering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSelectorRequirement {
    pub key: String,
    pub operator: NodeSelectorOperator,
    pub values: Vec<String>,
}

impl NodeSelectorRequirement {
    pub fn in_values(key: &str, values: &[&str]) -> Self {
        NodeSelectorRequirement {
            key: key.to_string(),
            operator: NodeSelectorOperator::In,
            values: values.iter().map(|v| v.to_string()).collect(),
        }
    }
}

/// A zone- and capacity-type-scoped purchase option
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offering {
    pub requirements: Vec<NodeSelectorRequirement>,
    pub price: f64,
    pub available: bool,
}

impl Offering {
    /// Available on-demand offering in a single zone
    pub fn on_demand(zone: &str, price: f64) -> Self {
        Offering {
            requirements: vec![
                NodeSelectorRequirement::in_values(
                    CAPACITY_TYPE_LABEL_KEY,
                    &[CapacityType::OnDemand.as_str()],
                ),
                NodeSelectorRequirement::in_values(TOPOLOGY_ZONE_LABEL_KEY, &[zone]),
            ],
            price,
            available: true,
        }
    }

    fn single_value(&self, key: &str) -> Option<&str> {
        self.requirements
            .iter()
            .find(|r| r.key == key)
            .and_then(|r| r.values.first())
            .map(String::as_str)
    }

    pub fn zone(&self) -> Option<&str> {
        self.single_value(TOPOLOGY_ZONE_LABEL_KEY)
    }

    pub fn capacity_type(&self) -> Option<&str> {
        self.single_value(CAPACITY_TYPE_LABEL_KEY)
    }
}

/// Complete description of one instance type for one architecture
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceTypeOptions {
    pub name: String,
    pub offerings: Vec<Offering>,
    pub architecture: Architecture,
    pub operating_systems: Vec<OperatingSystem>,
    pub resources: ResourceList,
}

impl InstanceTypeOptions {
    pub fn resource(&self, name: ResourceName) -> Option<&Quantity> {
        self.resources.get(&name)
    }

    /// Price shared by all offerings, if there are any
    pub fn price(&self) -> Option<f64> {
        self.offerings.first().map(|o| o.price)
    }
}
