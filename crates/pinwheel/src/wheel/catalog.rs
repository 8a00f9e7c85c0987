use crate::config::{Config, ItemConfig};
use derive_more::{AsRef, Deref, Display, From, Into};
use palette::{Srgb, Srgba, WithAlpha};
use pinput::input::KeySequence;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Deref, From, Into, AsRef)]
pub struct ItemName(String);

impl ItemName {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }
}

/// Read-only view of the selectable items, one per sector.
pub trait Catalog {
    fn sector_count(&self) -> usize;
    fn is_enabled(&self, index: usize) -> bool;
    fn favorite(&self) -> Option<usize>;
    fn key_bind(&self, index: usize) -> Option<KeySequence>;
    fn color(&self, index: usize) -> Option<Srgba<f32>>;
    fn name(&self, index: usize) -> Option<&ItemName>;
}

#[derive(Debug, Clone)]
pub struct Item {
    pub name: ItemName,
    pub enabled: bool,
    pub keys: Option<KeySequence>,
    pub color: Option<Srgb<u8>>,
}

impl Item {
    pub fn from_config(cfg: &ItemConfig) -> Self {
        Self {
            name: ItemName::new(cfg.name.clone()),
            enabled: cfg.enabled,
            keys: cfg.keys.clone(),
            color: cfg.color.map(|c| *c),
        }
    }
}

/// Catalog backed by the `items` table of the configuration.
#[derive(Debug, Clone, Default)]
pub struct ConfigCatalog {
    pub items: Vec<Item>,
    pub favorite: Option<usize>,
}

impl ConfigCatalog {
    pub fn new(items: Vec<Item>, favorite: Option<usize>) -> Self {
        Self { items, favorite }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.items.iter().map(Item::from_config).collect(),
            config.favorite,
        )
    }
}

impl Catalog for ConfigCatalog {
    fn sector_count(&self) -> usize {
        self.items.len()
    }

    fn is_enabled(&self, index: usize) -> bool {
        self.items.get(index).is_some_and(|item| item.enabled)
    }

    fn favorite(&self) -> Option<usize> {
        self.favorite
    }

    fn key_bind(&self, index: usize) -> Option<KeySequence> {
        self.items.get(index).and_then(|item| item.keys.clone())
    }

    fn color(&self, index: usize) -> Option<Srgba<f32>> {
        self.items
            .get(index)
            .and_then(|item| item.color)
            .map(|c| c.into_format::<f32>().with_alpha(1.0))
    }

    fn name(&self, index: usize) -> Option<&ItemName> {
        self.items.get(index).map(|item| &item.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, enabled: bool, keys: Option<&str>) -> Item {
        Item {
            name: ItemName::new(name),
            enabled,
            keys: keys.map(|k| k.parse().unwrap()),
            color: None,
        }
    }

    #[test]
    fn test_lookups_outside_the_catalog_are_empty() {
        let catalog = ConfigCatalog::new(
            vec![item("a", true, Some("Ctrl+1")), item("b", false, None)],
            Some(1),
        );

        assert_eq!(catalog.sector_count(), 2);
        assert!(catalog.is_enabled(0));
        assert!(!catalog.is_enabled(1));
        assert!(!catalog.is_enabled(2));
        assert_eq!(catalog.key_bind(0), Some("Ctrl+1".parse().unwrap()));
        assert_eq!(catalog.key_bind(1), None);
        assert_eq!(catalog.key_bind(5), None);
        assert_eq!(catalog.favorite(), Some(1));
        assert_eq!(catalog.name(1).map(|n| n.as_str()), Some("b"));
    }

    #[test]
    fn test_color_is_converted_to_float_rgba() {
        let mut red = item("red", true, None);
        red.color = Some(Srgb::new(255, 0, 0));
        let catalog = ConfigCatalog::new(vec![red], Some(0));

        let color = catalog.color(0).unwrap();
        assert_eq!(color.color.red, 1.0);
        assert_eq!(color.color.green, 0.0);
        assert_eq!(color.alpha, 1.0);
        assert_eq!(catalog.favorite(), Some(0));
    }
}
