//! Product filter for nearby-stop queries.
//!
//! The `stopsNearby` endpoint takes a `useProduct` parameter: an 11-digit
//! binary string where each position switches one product category on.

/// A category of transit product that a nearby-stop search can be limited to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductCategory {
    InterCityTrains,
    InterCityFastTrains,
    RegionalTrains,
    OtherTrains,
    STrains,
    Bus,
    ExpressBus,
    NightBus,
    OtherBusses,
    Ferry,
    Metro,
}

impl ProductCategory {
    /// Every train category.
    pub const TRAINS: &'static [ProductCategory] = &[
        ProductCategory::InterCityTrains,
        ProductCategory::InterCityFastTrains,
        ProductCategory::RegionalTrains,
        ProductCategory::STrains,
        ProductCategory::OtherTrains,
    ];

    /// Every bus category.
    pub const BUSSES: &'static [ProductCategory] = &[
        ProductCategory::Bus,
        ProductCategory::ExpressBus,
        ProductCategory::NightBus,
        ProductCategory::OtherBusses,
    ];

    pub const METROS: &'static [ProductCategory] = &[ProductCategory::Metro];

    pub const FERRIES: &'static [ProductCategory] = &[ProductCategory::Ferry];

    /// Position of this category in the bitmask, as a power of two.
    const fn weight(self) -> u16 {
        match self {
            ProductCategory::InterCityTrains => 1024,
            ProductCategory::InterCityFastTrains => 512,
            ProductCategory::RegionalTrains => 256,
            ProductCategory::OtherTrains => 128,
            ProductCategory::STrains => 64,
            ProductCategory::Bus => 32,
            ProductCategory::ExpressBus => 16,
            ProductCategory::NightBus => 8,
            ProductCategory::OtherBusses => 4,
            ProductCategory::Ferry => 2,
            ProductCategory::Metro => 1,
        }
    }
}

/// The highest bit is always set. The API expects 11 digits, and the
/// binary rendering has no leading zeros, so this bit fixes the width.
const RESERVED_BIT: u16 = 1024;

/// Encode a product selection as the `useProduct` bitmask string.
///
/// Duplicates are harmless. An empty selection still yields 11 digits.
///
/// # Examples
///
/// ```
/// use rejseplanen::domain::{ProductCategory, encode_products};
///
/// assert_eq!(encode_products(&[]), "10000000000");
/// assert_eq!(encode_products(&[ProductCategory::Metro]), "10000000001");
/// assert_eq!(encode_products(ProductCategory::BUSSES), "10000111100");
/// ```
pub fn encode_products(products: &[ProductCategory]) -> String {
    let mask = products
        .iter()
        .fold(RESERVED_BIT, |acc, product| acc | product.weight());
    format!("{mask:b}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_selection_sets_reserved_bit_only() {
        assert_eq!(encode_products(&[]), "10000000000");
    }

    #[test]
    fn metro_only() {
        assert_eq!(encode_products(&[ProductCategory::Metro]), "10000000001");
    }

    #[test]
    fn intercity_overlaps_reserved_bit() {
        // 1024 | 1 = 1025
        assert_eq!(
            encode_products(&[ProductCategory::InterCityTrains, ProductCategory::Metro]),
            "10000000001"
        );
    }

    #[test]
    fn all_trains() {
        // 1024 | 512 | 256 | 128 | 64 = 1984
        let encoded = encode_products(ProductCategory::TRAINS);
        assert_eq!(encoded, "11111000000");
        assert_eq!(u16::from_str_radix(&encoded, 2).unwrap(), 1984);
    }

    #[test]
    fn busses_and_ferries() {
        assert_eq!(encode_products(ProductCategory::BUSSES), "10000111100");
        assert_eq!(encode_products(ProductCategory::FERRIES), "10000000010");
        assert_eq!(encode_products(ProductCategory::METROS), "10000000001");
    }

    #[test]
    fn duplicates_are_harmless() {
        assert_eq!(
            encode_products(&[ProductCategory::Bus, ProductCategory::Bus]),
            encode_products(&[ProductCategory::Bus])
        );
    }

    #[test]
    fn weights_are_distinct_powers_of_two() {
        let all: Vec<ProductCategory> = ProductCategory::TRAINS
            .iter()
            .chain(ProductCategory::BUSSES)
            .chain(ProductCategory::METROS)
            .chain(ProductCategory::FERRIES)
            .copied()
            .collect();
        assert_eq!(all.len(), 11);

        let combined = all.iter().fold(0u16, |acc, p| {
            assert!(p.weight().is_power_of_two());
            assert_eq!(acc & p.weight(), 0);
            acc | p.weight()
        });
        assert_eq!(combined, 0b111_1111_1111);
        assert_eq!(encode_products(&all), "11111111111");
    }
}
