//! Catalog output
//!
//! The JSON document is the contract with the consuming mock provider: field
//! names as in `types`, pretty-printed with four-space indentation. The text
//! table is for humans only.

use crate::catalog::CatalogSummary;
use crate::error::Result;
use crate::types::{InstanceTypeOptions, ResourceName};
use comfy_table::{Cell, CellAlignment, Table};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::io::Write;
use std::path::Path;

const INDENT: &[u8] = b"    ";

/// Serialize any value as four-space indented JSON
pub fn to_json_string<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut buf = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    value.serialize(&mut serializer)?;
    let document = String::from_utf8(buf)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
    Ok(document)
}

/// Write the catalog to `writer`.
///
/// The document is encoded fully before anything is written, so a
/// serialization failure leaves the writer untouched.
pub fn write_json<W: Write>(catalog: &[InstanceTypeOptions], mut writer: W) -> Result<()> {
    let document = to_json_string(catalog)?;
    writer.write_all(document.as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Write the catalog to `out`, or to stdout when no path is given
pub fn emit(catalog: &[InstanceTypeOptions], out: Option<&Path>) -> Result<()> {
    match out {
        Some(path) => {
            let document = to_json_string(catalog)?;
            std::fs::write(path, document)?;
            tracing::info!("Wrote {} instance types to {}", catalog.len(), path.display());
            Ok(())
        }
        None => write_json(catalog, std::io::stdout().lock()),
    }
}

fn resource_cell(it: &InstanceTypeOptions, name: ResourceName) -> Cell {
    let text = it
        .resource(name)
        .map(|q| q.to_string())
        .unwrap_or_else(|| "-".to_string());
    Cell::new(text).set_alignment(CellAlignment::Right)
}

/// Render one row per instance type name, architectures collapsed
pub fn render_table(catalog: &[InstanceTypeOptions]) -> String {
    let mut table = Table::new();
    table.set_header(vec![
        "Instance Type",
        "Arch",
        "CPU",
        "Memory",
        "Storage",
        "Pods",
        "Price/hr",
        "Zones",
    ]);

    let mut i = 0;
    while i < catalog.len() {
        let first = &catalog[i];
        let mut archs = vec![first.architecture.as_str()];
        let mut j = i + 1;
        while j < catalog.len() && catalog[j].name == first.name {
            archs.push(catalog[j].architecture.as_str());
            j += 1;
        }

        let price = first
            .price()
            .map(|p| format!("${:.4}", p))
            .unwrap_or_else(|| "-".to_string());
        table.add_row(vec![
            Cell::new(&first.name),
            Cell::new(archs.join(",")),
            resource_cell(first, ResourceName::Cpu),
            resource_cell(first, ResourceName::Memory),
            resource_cell(first, ResourceName::EphemeralStorage),
            resource_cell(first, ResourceName::Pods),
            Cell::new(price).set_alignment(CellAlignment::Right),
            Cell::new(first.offerings.len()).set_alignment(CellAlignment::Right),
        ]);
        i = j;
    }

    table.to_string()
}

pub fn render_summary(summary: &CatalogSummary) -> String {
    let price = |p: Option<f64>| {
        p.map(|p| format!("${:.4}/hr", p))
            .unwrap_or_else(|| "N/A".to_string())
    };
    format!(
        "Instance types: {}\nDescriptors:    {}\nOfferings:      {}\nZones:          {}\nPrice range:    {} - {}",
        summary.instance_types,
        summary.descriptors,
        summary.offerings,
        summary.zones,
        price(summary.min_price),
        price(summary.max_price),
    )
}
