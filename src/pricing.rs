//! Synthetic pricing for generated instance types
//!
//! Not a real price list: a linear rate over CPU and memory only, so tests
//! can rely on larger instances costing strictly more.

use crate::types::{ResourceList, ResourceName};

/// Hourly rate per vCPU
pub const CPU_RATE: f64 = 0.025;

/// Hourly rate per 1e9 bytes of memory
pub const MEMORY_RATE: f64 = 0.001;

/// Derive an hourly price from a resource list.
///
/// Only `cpu` and `memory` contribute; storage and pods are ignored. Memory is
/// read in bytes and divided by 1e9.
pub fn price_from_resources(resources: &ResourceList) -> f64 {
    let mut price = 0.0;
    for (name, quantity) in resources {
        match name {
            ResourceName::Cpu => price += CPU_RATE * quantity.as_approximate_f64(),
            ResourceName::Memory => price += MEMORY_RATE * quantity.as_approximate_f64() / 1e9,
            _ => {}
        }
    }
    price
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Quantity;

    fn resources(cpu: u32, memory_gib: u32) -> ResourceList {
        let mut list = ResourceList::new();
        list.insert(ResourceName::Cpu, Quantity::count(cpu));
        list.insert(ResourceName::Memory, Quantity::gibibytes(memory_gib));
        list
    }

    #[test]
    fn test_price_cpu_and_memory() {
        let price = price_from_resources(&resources(16, 32));
        let expected = 0.025 * 16.0 + 0.001 * (32.0 * 1073741824.0) / 1e9;
        assert_eq!(price, expected);
        assert!((price - 0.434359738368).abs() < 1e-12);
    }

    #[test]
    fn test_price_ignores_storage_and_pods() {
        let base = resources(2, 16);
        let mut loaded = base.clone();
        loaded.insert(ResourceName::EphemeralStorage, Quantity::gibibytes(1250));
        loaded.insert(ResourceName::Pods, Quantity::count(32));
        assert_eq!(price_from_resources(&base), price_from_resources(&loaded));
    }

    #[test]
    fn test_price_missing_keys_contribute_zero() {
        assert_eq!(price_from_resources(&ResourceList::new()), 0.0);

        let mut cpu_only = ResourceList::new();
        cpu_only.insert(ResourceName::Cpu, Quantity::count(4));
        assert_eq!(price_from_resources(&cpu_only), 0.1);
    }
}
