//! Integration tests for catalog generation
//!
//! Exercise the public API the way a consumer regenerating the catalog does:
//! build, inspect descriptors, write, and read the document back.

use kwok_catalog::catalog::{self, load_from_str};
use kwok_catalog::instance_table::{
    lookup, ResourceTable, SizeSpec, INSTANCE_FAMILIES, INSTANCE_SIZES, KWOK_ZONES,
};
use kwok_catalog::sink;
use kwok_catalog::types::{Architecture, InstanceTypeOptions, Quantity, ResourceName};
use kwok_catalog::{build, build_with, CatalogConfig};
use std::collections::HashSet;

const GIB: f64 = 1073741824.0;

fn find<'a>(
    catalog: &'a [InstanceTypeOptions],
    name: &str,
    arch: Architecture,
) -> Option<&'a InstanceTypeOptions> {
    catalog
        .iter()
        .find(|it| it.name == name && it.architecture == arch)
}

#[test]
fn test_descriptor_count_is_twice_defined_pairs() {
    let catalog = build();
    let defined = INSTANCE_FAMILIES
        .iter()
        .flat_map(|f| INSTANCE_SIZES.iter().map(move |s| (*f, *s)))
        .filter(|(f, s)| lookup(f, s).is_some())
        .count();
    assert_eq!(defined, ResourceTable::global().len());
    assert_eq!(catalog.len(), 2 * defined);
}

#[test]
fn test_every_descriptor_has_one_offering_per_zone() {
    for it in build() {
        assert_eq!(it.offerings.len(), KWOK_ZONES.len(), "{}", it.name);
        let zones: HashSet<_> = it.offerings.iter().filter_map(|o| o.zone()).collect();
        assert_eq!(zones.len(), KWOK_ZONES.len());
        for zone in KWOK_ZONES {
            assert!(zones.contains(zone));
        }
    }
}

#[test]
fn test_every_descriptor_prices_from_cpu_and_memory() {
    for it in build() {
        let (family, size) = it.name.split_once('.').unwrap();
        let spec = lookup(family, size).unwrap();
        let expected =
            0.025 * spec.cpu_count as f64 + 0.001 * (spec.memory_gib as f64 * GIB) / 1e9;
        for offering in &it.offerings {
            assert_eq!(offering.price, expected, "{}", it.name);
            assert_eq!(offering.capacity_type(), Some("on-demand"));
            assert!(offering.available);
        }
    }
}

#[test]
fn test_c5_4xlarge() {
    let catalog = build();
    for arch in Architecture::ALL {
        let it = find(&catalog, "c5.4xlarge", arch).unwrap();
        assert_eq!(it.resource(ResourceName::Cpu), Some(&Quantity::count(16)));
        assert_eq!(it.resource(ResourceName::Memory).unwrap().to_string(), "32Gi");
        assert_eq!(
            it.resource(ResourceName::EphemeralStorage).unwrap().to_string(),
            "200Gi"
        );
        assert_eq!(it.resource(ResourceName::Pods).unwrap().to_string(), "256");

        let price = it.price().unwrap();
        assert!((price - 0.434359738368).abs() < 1e-12, "price={}", price);
        assert!(it.offerings.iter().all(|o| o.price == price));
    }
}

#[test]
fn test_i3en_large() {
    assert_eq!(lookup("i3en", "large"), Some(SizeSpec::new(2, 16, 1250, 32)));

    let catalog = build();
    let it = find(&catalog, "i3en.large", Architecture::Arm64).unwrap();
    assert_eq!(
        it.resource(ResourceName::EphemeralStorage).unwrap().to_string(),
        "1250Gi"
    );
    let expected = 0.025 * 2.0 + 0.001 * (16.0 * GIB) / 1e9;
    assert_eq!(it.price(), Some(expected));
}

#[test]
fn test_unsupported_pairs_produce_nothing() {
    let config = CatalogConfig {
        families: vec!["c3".to_string(), "x9z".to_string()],
        sizes: vec!["metal".to_string(), "nano".to_string(), "large".to_string()],
        ..CatalogConfig::default()
    };
    let catalog = build_with(&config);
    assert_eq!(catalog.len(), 2);
    assert!(catalog.iter().all(|it| it.name == "c3.large"));
    assert!(!catalog.iter().any(|it| it.name.starts_with("x9z")));
}

#[test]
fn test_builder_is_deterministic() {
    let first = sink::to_json_string(&build()).unwrap();
    let second = sink::to_json_string(&build()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_document_round_trips_through_loader() {
    let catalog = build();
    let document = sink::to_json_string(&catalog).unwrap();
    let loaded = load_from_str(&document).unwrap();
    assert_eq!(loaded, catalog);
}

#[test]
fn test_load_from_path() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let path = temp_dir.path().join("instance_types.json");
    let catalog = build();
    sink::emit(&catalog, Some(&path)).unwrap();

    let loaded = catalog::load_from_path(&path).unwrap();
    assert_eq!(loaded.len(), 306);
    assert_eq!(loaded[0].name, "m7i-flex.12xlarge");
}

#[test]
fn test_load_from_missing_path_fails() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let result = catalog::load_from_path(&temp_dir.path().join("missing.json"));
    assert!(result.is_err());
}

#[test]
fn test_document_shape() {
    let catalog = build();
    let document = sink::to_json_string(&catalog).unwrap();
    let value: serde_json::Value = serde_json::from_str(&document).unwrap();

    let first = &value[0];
    assert_eq!(first["name"], "m7i-flex.12xlarge");
    assert_eq!(first["architecture"], "amd64");
    assert_eq!(first["operatingSystems"], serde_json::json!(["linux"]));
    assert_eq!(
        first["resources"],
        serde_json::json!({
            "cpu": "48",
            "ephemeral-storage": "300Gi",
            "memory": "192Gi",
            "pods": "768"
        })
    );
    assert_eq!(
        first["offerings"][2]["requirements"],
        serde_json::json!([
            {"key": "karpenter.sh/capacity-type", "operator": "In", "values": ["on-demand"]},
            {"key": "topology.kubernetes.io/zone", "operator": "In", "values": ["test-zone-c"]}
        ])
    );
    assert_eq!(first["offerings"][2]["available"], true);
}
