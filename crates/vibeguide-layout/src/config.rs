#![forbid(unsafe_code)]

//! Row and layout configuration.

use std::fmt;

/// Weight → width mapping for content-sized blocks.
///
/// Weight is the display width of a stream's name. Long names get wide
/// blocks, medium names medium blocks, everything else narrow blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WidthTiers {
    /// Minimum weight for a `wide` block.
    pub long_threshold: usize,
    /// Minimum weight for a `medium` block.
    pub medium_threshold: usize,
    pub wide: u16,
    pub medium: u16,
    pub narrow: u16,
}

impl Default for WidthTiers {
    fn default() -> Self {
        Self {
            long_threshold: 12,
            medium_threshold: 8,
            wide: 9,
            medium: 6,
            narrow: 3,
        }
    }
}

impl WidthTiers {
    /// Width for an item of the given weight.
    #[must_use]
    pub fn width_for(&self, weight: usize) -> u16 {
        if weight >= self.long_threshold {
            self.wide
        } else if weight >= self.medium_threshold {
            self.medium
        } else {
            self.narrow
        }
    }
}

/// Shape of a single grid row.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RowConfig {
    /// Total width of every row, in grid units.
    pub max_width: u16,
    /// Blocks wider than one unit may only start on multiples of this.
    pub alignment: u16,
    /// Candidate widths for rows without content.
    pub random_widths: Vec<u16>,
    /// Content-sized widths.
    pub tiers: WidthTiers,
}

impl Default for RowConfig {
    fn default() -> Self {
        Self {
            max_width: 45,
            alignment: 3,
            random_widths: vec![2, 3, 4, 6],
            tiers: WidthTiers::default(),
        }
    }
}

impl RowConfig {
    /// Set the row width.
    #[must_use]
    pub fn max_width(mut self, max_width: u16) -> Self {
        self.max_width = max_width;
        self
    }

    /// Set the alignment modulus.
    #[must_use]
    pub fn alignment(mut self, alignment: u16) -> Self {
        self.alignment = alignment;
        self
    }

    /// Set the candidate random widths.
    #[must_use]
    pub fn random_widths(mut self, widths: Vec<u16>) -> Self {
        self.random_widths = widths;
        self
    }

    /// Set the content width tiers.
    #[must_use]
    pub fn tiers(mut self, tiers: WidthTiers) -> Self {
        self.tiers = tiers;
        self
    }

    /// Check the configuration can produce valid rows.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_width == 0 {
            return Err(ConfigError::ZeroMaxWidth);
        }
        if self.alignment == 0 {
            return Err(ConfigError::ZeroAlignment);
        }
        if self.alignment > self.max_width {
            return Err(ConfigError::AlignmentExceedsWidth {
                alignment: self.alignment,
                max_width: self.max_width,
            });
        }
        if self.random_widths.is_empty() {
            return Err(ConfigError::EmptyRandomWidths);
        }
        if self.random_widths.contains(&0) {
            return Err(ConfigError::ZeroWidth("random_widths"));
        }
        for (name, width) in [
            ("tiers.wide", self.tiers.wide),
            ("tiers.medium", self.tiers.medium),
            ("tiers.narrow", self.tiers.narrow),
        ] {
            if width == 0 {
                return Err(ConfigError::ZeroWidth(name));
            }
        }
        Ok(())
    }
}

/// Whole-layout options.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LayoutOptions {
    pub row: RowConfig,
    /// Emit `blank_row_count` blank rows before the content rows.
    pub include_leading_blank_rows: bool,
    /// Blank rows on each padded side.
    pub blank_row_count: usize,
    /// Every n-th content row repeats its predecessor's shape. 0 disables.
    pub repeat_interval: usize,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            row: RowConfig::default(),
            include_leading_blank_rows: false,
            blank_row_count: 4,
            repeat_interval: 4,
        }
    }
}

impl LayoutOptions {
    /// Set the row configuration.
    #[must_use]
    pub fn row(mut self, row: RowConfig) -> Self {
        self.row = row;
        self
    }

    /// Toggle leading blank rows.
    #[must_use]
    pub fn leading_blank_rows(mut self, include: bool) -> Self {
        self.include_leading_blank_rows = include;
        self
    }

    /// Set the blank row count.
    #[must_use]
    pub fn blank_row_count(mut self, count: usize) -> Self {
        self.blank_row_count = count;
        self
    }

    /// Set the repetition interval.
    #[must_use]
    pub fn repeat_interval(mut self, interval: usize) -> Self {
        self.repeat_interval = interval;
        self
    }

    /// Validate the row configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.row.validate()
    }
}

/// Invalid layout configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    ZeroMaxWidth,
    ZeroAlignment,
    AlignmentExceedsWidth { alignment: u16, max_width: u16 },
    EmptyRandomWidths,
    /// A width setting (named) is zero.
    ZeroWidth(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroMaxWidth => write!(f, "row max_width must be positive"),
            Self::ZeroAlignment => write!(f, "row alignment must be positive"),
            Self::AlignmentExceedsWidth {
                alignment,
                max_width,
            } => write!(
                f,
                "alignment {alignment} exceeds row max_width {max_width}"
            ),
            Self::EmptyRandomWidths => write!(f, "random_widths must not be empty"),
            Self::ZeroWidth(name) => write!(f, "{name} must be positive"),
        }
    }
}

impl std::error::Error for ConfigError {}
