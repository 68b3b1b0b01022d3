//! [`GroupConfig`] builders for tests.

use jsongen_config::{CustomGroup, EntryType, GroupConfig};

/// Fluent builder for [`GroupConfig`], starting from the empty defaults
/// (no blacklist, no custom groups, items and effects enabled).
///
/// ```ignore
/// let config = TestConfigBuilder::new()
///     .blacklist(["spawn_egg"])
///     .group("Weapons", ["sword"])
///     .build();
/// ```
pub struct TestConfigBuilder {
    config: GroupConfig,
}

impl TestConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: GroupConfig::default(),
        }
    }

    pub fn entry_types(mut self, types: impl IntoIterator<Item = EntryType>) -> Self {
        self.config.entry_types = types.into_iter().collect();
        self
    }

    pub fn categories<'a>(mut self, categories: impl IntoIterator<Item = &'a str>) -> Self {
        self.config.categories = categories.into_iter().map(str::to_string).collect();
        self
    }

    pub fn blacklist<'a>(mut self, terms: impl IntoIterator<Item = &'a str>) -> Self {
        self.config.blacklist = terms.into_iter().map(str::to_string).collect();
        self
    }

    /// Append a custom group placed in the default category.
    pub fn group<'a>(mut self, name: &str, keywords: impl IntoIterator<Item = &'a str>) -> Self {
        let keywords: Vec<String> = keywords.into_iter().map(str::to_string).collect();
        self.config
            .custom_groups
            .insert(name.to_string(), CustomGroup::from(keywords));
        self
    }

    /// Append a custom group placed in an explicit category.
    pub fn group_in<'a>(
        mut self,
        category: &str,
        name: &str,
        keywords: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        self.config.custom_groups.insert(
            name.to_string(),
            CustomGroup::Categorized {
                category: category.to_string(),
                keywords: keywords.into_iter().map(str::to_string).collect(),
            },
        );
        self
    }

    pub fn effect_counts(mut self, plain: usize, rare: usize) -> Self {
        self.config.assignment.effect_count = plain;
        self.config.assignment.rare_effect_count = rare;
        self
    }

    pub fn compact_output(mut self) -> Self {
        self.config.output.pretty = false;
        self
    }

    /// The configuration, validated.
    pub fn build(self) -> GroupConfig {
        if let Err(e) = self.config.validate() {
            panic!("test config is invalid: {e}");
        }
        self.config
    }
}

impl Default for TestConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
