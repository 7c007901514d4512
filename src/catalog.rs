//! Catalog construction
//!
//! Expands families × sizes × architectures into instance type descriptors,
//! each with one on-demand offering per zone. Pairs missing from the resource
//! table are skipped silently.
//!
//! Output order is fixed: family, then size, then architecture, with offerings
//! in zone order. Generated documents can therefore be diffed against a
//! checked-in copy.

use crate::config::CatalogConfig;
use crate::error::Result;
use crate::instance_table::{ResourceTable, SizeSpec};
use crate::pricing::price_from_resources;
use crate::types::{
    Architecture, InstanceTypeOptions, Offering, OperatingSystem, Quantity, ResourceList,
    ResourceName,
};
use serde::Serialize;
use std::collections::{BTreeSet, HashSet};
use std::hash::Hash;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// Build the catalog from the built-in enumerations
pub fn build() -> Vec<InstanceTypeOptions> {
    build_with(&CatalogConfig::default())
}

/// Build the catalog for the families, sizes, architectures and zones in `config`
pub fn build_with(config: &CatalogConfig) -> Vec<InstanceTypeOptions> {
    build_from_table(ResourceTable::global(), config)
}

/// Entries of `items` with repeats dropped, in first-seen order
fn unique<T: Eq + Hash>(items: &[T]) -> Vec<&T> {
    let mut seen = HashSet::with_capacity(items.len());
    items.iter().filter(|item| seen.insert(*item)).collect()
}

fn build_from_table(
    table: &ResourceTable,
    config: &CatalogConfig,
) -> Vec<InstanceTypeOptions> {
    let families = unique(&config.families);
    let sizes = unique(&config.sizes);
    let architectures = unique(&config.architectures);
    let zones = unique(&config.zones);

    let mut instance_types = Vec::new();

    for family in &families {
        for size in &sizes {
            let Some(spec) = table.lookup(family, size) else {
                debug!("Skipping undefined instance type {}.{}", family, size);
                continue;
            };

            for arch in &architectures {
                instance_types.push(instance_type_options(
                    family,
                    size,
                    &spec,
                    **arch,
                    zones.as_slice(),
                ));
            }
        }
    }

    info!(
        "Generated {} instance types across {} zone(s)",
        instance_types.len(),
        zones.len()
    );
    instance_types
}

/// Resource list for one size: cpu and pods as counts, memory and storage in GiB
pub fn resources_for(spec: &SizeSpec) -> ResourceList {
    let mut resources = ResourceList::new();
    resources.insert(ResourceName::Cpu, Quantity::count(spec.cpu_count));
    resources.insert(ResourceName::Memory, Quantity::gibibytes(spec.memory_gib));
    resources.insert(ResourceName::Pods, Quantity::count(spec.max_pods));
    resources.insert(
        ResourceName::EphemeralStorage,
        Quantity::gibibytes(spec.storage_gib),
    );
    resources
}

/// Price of one size, as it appears on every offering of that instance type
pub fn price_for(spec: &SizeSpec) -> f64 {
    price_from_resources(&resources_for(spec))
}

/// Descriptor for a single `(family, size, architecture)` triple
pub fn instance_type_options<S: AsRef<str>>(
    family: &str,
    size: &str,
    spec: &SizeSpec,
    architecture: Architecture,
    zones: &[S],
) -> InstanceTypeOptions {
    let resources = resources_for(spec);
    let price = price_from_resources(&resources);

    let offerings = zones
        .iter()
        .map(|zone| Offering::on_demand(zone.as_ref(), price))
        .collect();

    InstanceTypeOptions {
        name: format!("{}.{}", family, size),
        offerings,
        architecture,
        operating_systems: vec![OperatingSystem::Linux],
        resources,
    }
}

/// Counters describing a generated catalog
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSummary {
    /// Descriptors (one per instance type and architecture)
    pub descriptors: usize,
    /// Distinct instance type names
    pub instance_types: usize,
    pub offerings: usize,
    pub zones: usize,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

impl CatalogSummary {
    pub fn from_catalog(catalog: &[InstanceTypeOptions]) -> Self {
        let names: BTreeSet<&str> = catalog.iter().map(|it| it.name.as_str()).collect();
        let zones: BTreeSet<&str> = catalog
            .iter()
            .flat_map(|it| it.offerings.iter())
            .filter_map(Offering::zone)
            .collect();
        let prices = catalog.iter().filter_map(InstanceTypeOptions::price);

        CatalogSummary {
            descriptors: catalog.len(),
            instance_types: names.len(),
            offerings: catalog.iter().map(|it| it.offerings.len()).sum(),
            zones: zones.len(),
            min_price: prices.clone().reduce(f64::min),
            max_price: prices.reduce(f64::max),
        }
    }
}

/// Read a catalog document, as the mock provider does at startup
pub fn load_from_reader<R: Read>(reader: R) -> Result<Vec<InstanceTypeOptions>> {
    Ok(serde_json::from_reader(reader)?)
}

pub fn load_from_str(document: &str) -> Result<Vec<InstanceTypeOptions>> {
    Ok(serde_json::from_str(document)?)
}

pub fn load_from_path(path: &Path) -> Result<Vec<InstanceTypeOptions>> {
    let file = std::fs::File::open(path)?;
    load_from_reader(std::io::BufReader::new(file))
}
