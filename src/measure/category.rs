use std::fmt;

use serde::{Deserialize, Serialize};

/// Research area a measure belongs to.
///
/// `Unset` is the classification of a measure built without a category. It is
/// a real variant rather than `Option::None` so that "not classified yet" stays
/// distinct from any deliberate category.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    CorporateFinance,
    Banking,
    MarketMicrostructure,
    #[default]
    Unset,
}

impl Category {
    /// Every assignable category, excluding `Unset`.
    pub const ALL: [Category; 3] = [
        Category::CorporateFinance,
        Category::Banking,
        Category::MarketMicrostructure,
    ];

    pub fn is_set(self) -> bool {
        self != Category::Unset
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Category::CorporateFinance => "Corporate Finance",
            Category::Banking => "Banking",
            Category::MarketMicrostructure => "Market Microstructure",
            Category::Unset => "<unset>",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn default_is_unset() {
        assert_eq!(Category::default(), Category::Unset);
        assert!(!Category::default().is_set());
        assert!(Category::ALL.iter().all(|c| c.is_set()));
    }

    #[rstest]
    #[case(Category::CorporateFinance, "\"CORPORATE_FINANCE\"")]
    #[case(Category::Banking, "\"BANKING\"")]
    #[case(Category::MarketMicrostructure, "\"MARKET_MICROSTRUCTURE\"")]
    #[case(Category::Unset, "\"UNSET\"")]
    fn serializes_with_catalogue_names(#[case] category: Category, #[case] expected: &str) {
        assert_eq!(serde_json::to_string(&category).unwrap(), expected);
        let back: Category = serde_json::from_str(expected).unwrap();
        assert_eq!(back, category);
    }

    #[test]
    fn displays_readable_names() {
        assert_eq!(Category::CorporateFinance.to_string(), "Corporate Finance");
        assert_eq!(Category::MarketMicrostructure.to_string(), "Market Microstructure");
    }
}
