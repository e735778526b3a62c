use crate::error::{Error, Result};

/// How sibling names are compared when ordering them for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub enum Collation {
    /// Byte-wise `str` ordering. `B` sorts before `a`.
    #[default]
    Ordinal,
    /// Lowercase-folded comparison, ordinal on ties.
    IgnoreCase,
}

/// HierarchyConfig is handed to the builder and pool at construction time.
///
/// Every field has a default, so a JSON file only needs the keys it wants to
/// override:
///
/// ```json
/// { "separator": "/", "goBackSentinel": true }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct HierarchyConfig {
    /// Character splitting an entry into segments. Archives use `\`.
    #[serde(default = "default_separator")]
    pub separator: char,
    /// Whether sibling deduplication and prefix matching respect case.
    #[serde(rename = "caseSensitive", default)]
    pub case_sensitive: bool,
    /// Insert a `..` node at the head of every discovered child list.
    #[serde(rename = "goBackSentinel", default)]
    pub go_back_sentinel: bool,
    #[serde(default)]
    pub collation: Collation,
    /// Slots constructed up front by a fresh pool.
    #[serde(rename = "initialCapacity", default = "default_initial_capacity")]
    pub initial_capacity: usize,
    /// Multiplier applied to the pool capacity when it runs out of free slots.
    #[serde(rename = "growthFactor", default = "default_growth_factor")]
    pub growth_factor: f64,
}

pub const DEFAULT_SEPARATOR: char = '\\';
pub const DEFAULT_INITIAL_CAPACITY: usize = 64;
pub const DEFAULT_GROWTH_FACTOR: f64 = 1.7;

fn default_separator() -> char {
    DEFAULT_SEPARATOR
}

fn default_initial_capacity() -> usize {
    DEFAULT_INITIAL_CAPACITY
}

fn default_growth_factor() -> f64 {
    DEFAULT_GROWTH_FACTOR
}

impl Default for HierarchyConfig {
    fn default() -> Self {
        HierarchyConfig {
            separator: DEFAULT_SEPARATOR,
            case_sensitive: false,
            go_back_sentinel: false,
            collation: Collation::Ordinal,
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            growth_factor: DEFAULT_GROWTH_FACTOR,
        }
    }
}

impl HierarchyConfig {
    /// Load a HierarchyConfig from a JSON reader
    pub fn from_reader<R: std::io::Read>(reader: R) -> Result<Self> {
        let config: HierarchyConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a HierarchyConfig from a file path
    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.growth_factor.is_finite() || self.growth_factor <= 1.0 {
            return Err(Error::InvalidConfig(format!(
                "growth factor must be a finite number above 1, got {}",
                self.growth_factor
            )));
        }
        if self.separator.is_whitespace() || self.separator.is_control() {
            return Err(Error::InvalidConfig(format!(
                "separator {:?} cannot be whitespace or a control character",
                self.separator
            )));
        }
        Ok(())
    }
}
