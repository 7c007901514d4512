//! Static resource table for the synthetic instance families
//!
//! Maps a `(family, size)` pair to the CPU, memory, ephemeral storage and pod
//! capacity of that instance type. Values follow AWS EC2 sizing guidelines.
//! Families fall into four shapes:
//!
//! - compute (`c3`, `c5`, `c5a`, `c5ad`, `c6a`, `c6i`): 2 GiB per vCPU
//! - general purpose (`m7i-flex`, `vt1`, `m5a`, `m6g`): 4 GiB per vCPU
//! - memory heavy (`r5a`, `r6g`, `r7g`, `c6g`, `c6gn`, `c7g`): 8 GiB per vCPU
//! - storage heavy (`i3en`): memory heavy plus local NVMe in the TB range
//!
//! The rows are literal constants, not computed from the ratios above.

use std::collections::HashMap;
use std::sync::OnceLock;

/// Zones every instance type is offered in
pub const KWOK_ZONES: [&str; 4] = ["test-zone-a", "test-zone-b", "test-zone-c", "test-zone-d"];

/// Instance families, in generation order
pub const INSTANCE_FAMILIES: [&str; 17] = [
    "m7i-flex", "r5a", "r6g", "r7g", "vt1", "c3", "c5", "c5a", "c5ad", "c6a", "c6g", "c6gn",
    "c6i", "c7g", "i3en", "m5a", "m6g",
];

/// Instance sizes, in generation order
pub const INSTANCE_SIZES: [&str; 9] = [
    "12xlarge", "16xlarge", "2xlarge", "3xlarge", "4xlarge", "6xlarge", "8xlarge", "large",
    "xlarge",
];

/// Capacity of one instance size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SizeSpec {
    pub cpu_count: u32,
    pub memory_gib: u32,
    pub storage_gib: u32,
    pub max_pods: u32,
}

impl SizeSpec {
    pub const fn new(cpu_count: u32, memory_gib: u32, storage_gib: u32, max_pods: u32) -> Self {
        SizeSpec {
            cpu_count,
            memory_gib,
            storage_gib,
            max_pods,
        }
    }

    /// A spec with no CPU or no memory does not describe a real instance type
    pub fn is_defined(&self) -> bool {
        self.cpu_count > 0 && self.memory_gib > 0
    }
}

/// One row of sizes, aligned with `INSTANCE_SIZES`
type SizeRow = [SizeSpec; 9];

const COMPUTE: SizeRow = [
    SizeSpec::new(48, 96, 300, 768),
    SizeSpec::new(64, 128, 400, 1024),
    SizeSpec::new(8, 16, 100, 128),
    SizeSpec::new(12, 24, 150, 192),
    SizeSpec::new(16, 32, 200, 256),
    SizeSpec::new(24, 48, 300, 384),
    SizeSpec::new(32, 64, 400, 512),
    SizeSpec::new(2, 4, 50, 32),
    SizeSpec::new(4, 8, 100, 64),
];

const GENERAL_PURPOSE: SizeRow = [
    SizeSpec::new(48, 192, 300, 768),
    SizeSpec::new(64, 256, 400, 1024),
    SizeSpec::new(8, 32, 100, 128),
    SizeSpec::new(12, 48, 150, 192),
    SizeSpec::new(16, 64, 200, 256),
    SizeSpec::new(24, 96, 300, 384),
    SizeSpec::new(32, 128, 400, 512),
    SizeSpec::new(2, 8, 50, 32),
    SizeSpec::new(4, 16, 100, 64),
];

const MEMORY_HEAVY: SizeRow = [
    SizeSpec::new(48, 384, 300, 768),
    SizeSpec::new(64, 512, 400, 1024),
    SizeSpec::new(8, 64, 100, 128),
    SizeSpec::new(12, 96, 150, 192),
    SizeSpec::new(16, 128, 200, 256),
    SizeSpec::new(24, 192, 300, 384),
    SizeSpec::new(32, 256, 400, 512),
    SizeSpec::new(2, 16, 50, 32),
    SizeSpec::new(4, 32, 100, 64),
];

// Local NVMe: 7.5, 10, 2.5, 3.75, 5, 7.5, 10, 1.25, 2.5 TB
const STORAGE_HEAVY: SizeRow = [
    SizeSpec::new(48, 384, 7500, 768),
    SizeSpec::new(64, 512, 10000, 1024),
    SizeSpec::new(8, 64, 2500, 128),
    SizeSpec::new(12, 96, 3750, 192),
    SizeSpec::new(16, 128, 5000, 256),
    SizeSpec::new(24, 192, 7500, 384),
    SizeSpec::new(32, 256, 10000, 512),
    SizeSpec::new(2, 16, 1250, 32),
    SizeSpec::new(4, 32, 2500, 64),
];

const FAMILY_ROWS: [(&str, &SizeRow); 17] = [
    ("m7i-flex", &GENERAL_PURPOSE),
    ("r5a", &MEMORY_HEAVY),
    ("r6g", &MEMORY_HEAVY),
    ("r7g", &MEMORY_HEAVY),
    ("vt1", &GENERAL_PURPOSE),
    ("c3", &COMPUTE),
    ("c5", &COMPUTE),
    ("c5a", &COMPUTE),
    ("c5ad", &COMPUTE),
    ("c6a", &COMPUTE),
    ("c6g", &MEMORY_HEAVY),
    ("c6gn", &MEMORY_HEAVY),
    ("c6i", &COMPUTE),
    ("c7g", &MEMORY_HEAVY),
    ("i3en", &STORAGE_HEAVY),
    ("m5a", &GENERAL_PURPOSE),
    ("m6g", &GENERAL_PURPOSE),
];

/// Immutable `(family, size) -> SizeSpec` mapping
///
/// Keyed by family, then size. Families without a single defined size have no
/// entry at all.
#[derive(Debug, Clone)]
pub struct ResourceTable {
    entries: HashMap<&'static str, HashMap<&'static str, SizeSpec>>,
}

impl ResourceTable {
    fn from_rows(rows: &[(&'static str, &SizeRow)]) -> Self {
        let mut entries: HashMap<&'static str, HashMap<&'static str, SizeSpec>> =
            HashMap::with_capacity(rows.len());
        for (family, row) in rows {
            for (size, spec) in INSTANCE_SIZES.iter().zip(row.iter()) {
                if spec.is_defined() {
                    entries.entry(*family).or_default().insert(*size, *spec);
                }
            }
        }
        ResourceTable { entries }
    }

    /// Process-wide table, built on first use
    pub fn global() -> &'static ResourceTable {
        static TABLE: OnceLock<ResourceTable> = OnceLock::new();
        TABLE.get_or_init(|| ResourceTable::from_rows(&FAMILY_ROWS))
    }

    /// Capacity of `family.size`, or `None` if that instance type is not offered
    pub fn lookup(&self, family: &str, size: &str) -> Option<SizeSpec> {
        self.entries.get(family)?.get(size).copied()
    }

    /// Number of defined `(family, size)` pairs
    pub fn len(&self) -> usize {
        self.entries.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether any size is defined for `family`
    pub fn has_family(&self, family: &str) -> bool {
        self.entries.contains_key(family)
    }
}

/// Look up a pair in the global table
pub fn lookup(family: &str, size: &str) -> Option<SizeSpec> {
    ResourceTable::global().lookup(family, size)
}

/// Split an instance type name such as `c5.4xlarge` into family and size.
///
/// Families may contain dashes (`m7i-flex`) but never dots, so the split is at
/// the first dot.
pub fn split_instance_type(name: &str) -> Option<(&str, &str)> {
    let (family, size) = name.split_once('.')?;
    if family.is_empty() || size.is_empty() {
        return None;
    }
    Some((family, size))
}
