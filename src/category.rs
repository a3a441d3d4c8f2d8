/// Fine-label to coarse-category mapping
///
/// The mapping is static configuration data, not branching logic: a fixed
/// table compiled into the binary and materialized into a hash map once at
/// startup. It is never mutated afterward.

use std::collections::HashMap;

/// Category assigned when a fine label is unknown or no match was found
pub const DEFAULT_CATEGORY: &str = "bread";

/// Fine-grained Food101 label -> coarse category
///
/// Covers every fine label the mapped reference corpus can produce.
/// A label absent from this table falls through to the caller's default.
const CATEGORY_TABLE: &[(&str, &str)] = &[
    ("apple_pie", "dessert"),
    ("baby_back_ribs", "meat"),
    ("beignets", "dessert"),
    ("breakfast_burrito", "fried"),
    ("caesar_salad", "vegetable-fruit"),
    ("cannoli", "dessert"),
    ("caprese_salad", "vegetable-fruit"),
    ("cheese_plate", "dairy"),
    ("cheesecake", "dessert"),
    ("chicken_quesadilla", "fried"),
    ("chicken_wings", "meat"),
    ("chocolate_cake", "dessert"),
    ("churros", "dessert"),
    ("clam_chowder", "soup"),
    ("croque_madame", "fried"),
    ("deviled_eggs", "egg"),
    ("filet_mignon", "meat"),
    ("fish_and_chips", "fried"),
    ("french_fries", "fried"),
    ("fried_calamari", "fried"),
    ("fried_rice", "fried"),
    ("frozen_yogurt", "dessert"),
    ("garlic_bread", "bread"),
    ("greek_salad", "vegetable-fruit"),
    ("grilled_cheese_sandwich", "dairy"),
    ("grilled_salmon", "seafood"),
    ("hamburger", "meat"),
    ("hot_and_sour_soup", "soup"),
    ("ice_cream", "dessert"),
    ("lobster_bisque", "soup"),
    ("macarons", "dessert"),
    ("miso_soup", "soup"),
    ("mussels", "seafood"),
    ("omelette", "egg"),
    ("onion_rings", "fried"),
    ("oysters", "seafood"),
    ("panna_cotta", "dessert"),
    ("pizza", "bread"),
    ("pork_chop", "meat"),
    ("prime_rib", "meat"),
    ("ramen", "noodles-pasta"),
    ("red_velvet_cake", "dessert"),
    ("samosa", "fried"),
    ("sashimi", "seafood"),
    ("spaghetti_bolognese", "noodles-pasta"),
    ("spaghetti_carbonara", "noodles-pasta"),
    ("spring_rolls", "fried"),
    ("steak", "meat"),
    ("tiramisu", "dessert"),
    ("waffles", "dessert"),
];

/// Read-only lookup from fine label to coarse category
#[derive(Debug)]
pub struct CategoryTable {
    map: HashMap<&'static str, &'static str>,
}

impl CategoryTable {
    /// Materialize the compiled-in table
    pub fn new() -> Self {
        CategoryTable {
            map: CATEGORY_TABLE.iter().copied().collect(),
        }
    }

    /// Resolve a fine label to its coarse category
    ///
    /// Returns `default` when the label has no entry. A miss here is an
    /// expected outcome (the corpus can carry labels the table does not
    /// anticipate), not an error.
    pub fn resolve<'a>(&'a self, fine_label: &str, default: &'a str) -> &'a str {
        self.map.get(fine_label).copied().unwrap_or(default)
    }

    /// Number of fine labels in the table
    pub fn len(&self) -> usize {
        self.map.len()
    }
}

impl Default for CategoryTable {
    fn default() -> Self {
        Self::new()
    }
}
