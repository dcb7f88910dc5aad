//! Product catalog: name → image filename lookup.
//!
//! The catalog is an immutable configuration value supplied by the caller
//! (the app loads it from `settings.toml`), not global state. Lookups are
//! case-sensitive exact matches, the way the sheet stores product names.

use std::collections::HashMap;

/// Immutable product-name → image-filename table.
#[derive(Clone, Debug, Default)]
pub struct ProductCatalog {
    images: HashMap<String, String>,
}

impl ProductCatalog {
    #[must_use]
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            images: entries
                .into_iter()
                .map(|(name, file)| (name.into(), file.into()))
                .collect(),
        }
    }

    /// Image filename for a product, if the catalog knows it.
    #[must_use]
    pub fn image_for(&self, product: &str) -> Option<&str> {
        self.images.get(product).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, product: &str) -> bool {
        self.images.contains_key(product)
    }

    /// Product names, sorted for stable display.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.images.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Returns a catalog with externally-stored overrides merged in;
    /// overrides win over the base table.
    #[must_use]
    pub fn merge_overrides<I, K, V>(mut self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (name, file) in overrides {
            self.images.insert(name.into(), file.into());
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_sensitive() {
        let catalog = ProductCatalog::new([("SATRANÇ", "satranc.jpg")]);
        assert_eq!(catalog.image_for("SATRANÇ"), Some("satranc.jpg"));
        assert_eq!(catalog.image_for("satranç"), None);
        assert_eq!(catalog.image_for("YOK"), None);
    }

    #[test]
    fn overrides_win() {
        let catalog = ProductCatalog::new([("ALTIGEN", "altigen.jpg"), ("SATRANÇ", "satranc.jpg")])
            .merge_overrides([("ALTIGEN", "altigen_v2.jpg")]);
        assert_eq!(catalog.image_for("ALTIGEN"), Some("altigen_v2.jpg"));
        assert_eq!(catalog.image_for("SATRANÇ"), Some("satranc.jpg"));
    }

    #[test]
    fn names_are_sorted() {
        let catalog = ProductCatalog::new([("B", "b.jpg"), ("A", "a.jpg")]);
        assert_eq!(catalog.names(), vec!["A", "B"]);
    }
}
