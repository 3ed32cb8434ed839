//! Named color palettes
//!
//! The palette is an external collaborator: anything implementing
//! [`NamedPalette`] can drive color assignment. [`ColorLibrary`] is the
//! in-memory implementation.

use sandfill_core::Rgba;

/// A collection of named colors with a stable iteration order
pub trait NamedPalette {
    /// Look up a color by name.
    fn color_by_name(&self, name: &str) -> Option<Rgba>;

    /// All names in palette order.
    fn names(&self) -> Vec<String>;

    /// Whether a color with this name exists.
    fn contains(&self, name: &str) -> bool {
        self.color_by_name(name).is_some()
    }
}

/// One named palette color
#[derive(Debug, Clone, PartialEq)]
pub struct ColorEntry {
    pub name: String,
    pub color: Rgba,
}

/// Ordered list of named colors
///
/// Duplicate names are allowed; lookups return the first match.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColorLibrary {
    entries: Vec<ColorEntry>,
}

impl ColorLibrary {
    /// Create an empty library
    pub fn new() -> Self {
        Self::default()
    }

    /// A basic twelve-color palette.
    pub fn with_defaults() -> Self {
        [
            ("Red", Rgba::rgb(230, 40, 40)),
            ("Orange", Rgba::rgb(245, 140, 30)),
            ("Yellow", Rgba::rgb(250, 220, 50)),
            ("Green", Rgba::rgb(60, 180, 75)),
            ("Cyan", Rgba::rgb(70, 200, 220)),
            ("Blue", Rgba::rgb(40, 90, 220)),
            ("Purple", Rgba::rgb(140, 60, 190)),
            ("Pink", Rgba::rgb(240, 130, 190)),
            ("Brown", Rgba::rgb(140, 90, 50)),
            ("White", Rgba::WHITE),
            ("Gray", Rgba::gray(128)),
            ("Black", Rgba::BLACK),
        ]
        .into_iter()
        .collect()
    }

    /// Append a color.
    pub fn add(&mut self, name: impl Into<String>, color: Rgba) {
        self.entries.push(ColorEntry {
            name: name.into(),
            color,
        });
    }

    /// Builder form of [`ColorLibrary::add`].
    pub fn with_color(mut self, name: impl Into<String>, color: Rgba) -> Self {
        self.add(name, color);
        self
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the library has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in order
    pub fn entries(&self) -> &[ColorEntry] {
        &self.entries
    }
}

impl NamedPalette for ColorLibrary {
    fn color_by_name(&self, name: &str) -> Option<Rgba> {
        self.entries.iter().find(|e| e.name == name).map(|e| e.color)
    }

    fn names(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.name.clone()).collect()
    }
}

impl<S: Into<String>> FromIterator<(S, Rgba)> for ColorLibrary {
    fn from_iter<I: IntoIterator<Item = (S, Rgba)>>(iter: I) -> Self {
        let mut library = ColorLibrary::new();
        for (name, color) in iter {
            library.add(name, color);
        }
        library
    }
}
