//! Category model for tagging availability.
//!
//! A category describes what kind of work an available slot is offered for
//! (Design, Consulting, ...). The catalog gives each label a colour for the
//! grid tags; `CategorySelection` is the set of labels that the next
//! completed drag gesture will stamp onto its slots.

use serde::{Deserialize, Serialize};

/// A named availability category from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier (database primary key)
    pub id: Option<i64>,
    /// Label stamped onto slots (must be unique)
    pub name: String,
    /// Hex color code used for the tag (e.g., "#3B82F6")
    pub color: String,
    /// Whether this category ships with the application (cannot be deleted)
    pub is_system: bool,
}

impl Category {
    /// Create a new category with the given name and color.
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            color: color.into(),
            is_system: false,
        }
    }

    /// Create a built-in category.
    pub fn system(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            is_system: true,
            ..Self::new(name, color)
        }
    }

    /// Validate the category data.
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }
        if name.len() > 50 {
            return Err(CategoryValidationError::NameTooLong);
        }

        if !is_valid_hex_color(&self.color) {
            return Err(CategoryValidationError::InvalidColor);
        }

        Ok(())
    }
}

/// Validation errors for Category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    NameTooLong,
    InvalidColor,
}

impl std::fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
            Self::NameTooLong => write!(f, "Category name must be 50 characters or less"),
            Self::InvalidColor => write!(f, "Invalid color format (use hex like #FF0000)"),
        }
    }
}

impl std::error::Error for CategoryValidationError {}

/// Check if a string is a valid hex color code.
pub(crate) fn is_valid_hex_color(color: &str) -> bool {
    let color = color.trim();
    let Some(hex) = color.strip_prefix('#') else {
        return false;
    };
    // Accept 3, 6, or 8 character hex codes
    matches!(hex.len(), 3 | 6 | 8) && hex.chars().all(|c| c.is_ascii_hexdigit())
}

/// Categories offered on first run.
pub fn default_categories() -> Vec<Category> {
    vec![
        Category::system("Frontend Development", "#3B82F6"),
        Category::system("Backend Development", "#8B5CF6"),
        Category::system("Design", "#EC4899"),
        Category::system("Consulting", "#10B981"),
        Category::system("Project Management", "#F59E0B"),
        Category::system("Support", "#6B7280"),
    ]
}

/// Labels currently chosen for the next completed gesture.
///
/// Keeps insertion order so stored slots list their categories in the
/// order the user picked them. Selecting a label twice is a no-op.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySelection {
    labels: Vec<String>,
}

impl CategorySelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a selection from labels, dropping blanks and duplicates.
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut selection = Self::new();
        for label in labels {
            selection.select(label);
        }
        selection
    }

    /// Add a label if it is not already selected.
    pub fn select(&mut self, label: impl Into<String>) {
        let label = label.into();
        let label = label.trim();
        if label.is_empty() || self.contains(label) {
            return;
        }
        self.labels.push(label.to_string());
    }

    pub fn deselect(&mut self, label: &str) {
        self.labels.retain(|existing| existing != label.trim());
    }

    /// Flip a label on or off. Returns whether it is selected afterwards.
    pub fn toggle(&mut self, label: &str) -> bool {
        if self.contains(label) {
            self.deselect(label);
            false
        } else {
            self.select(label);
            self.contains(label)
        }
    }

    pub fn clear(&mut self) {
        self.labels.clear();
    }

    pub fn contains(&self, label: &str) -> bool {
        let label = label.trim();
        self.labels.iter().any(|existing| existing == label)
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Selected labels in the order they were chosen.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_category_new() {
        let cat = Category::new("Design", "#EC4899");
        assert_eq!(cat.name, "Design");
        assert_eq!(cat.color, "#EC4899");
        assert!(!cat.is_system);
        assert!(cat.id.is_none());
    }

    #[test]
    fn test_category_system() {
        let cat = Category::system("Design", "#EC4899");
        assert!(cat.is_system);
    }

    #[test]
    fn test_validate_empty_name() {
        let cat = Category::new("   ", "#3B82F6");
        assert_eq!(cat.validate(), Err(CategoryValidationError::EmptyName));
    }

    #[test]
    fn test_validate_name_too_long() {
        let cat = Category::new("a".repeat(51), "#3B82F6");
        assert_eq!(cat.validate(), Err(CategoryValidationError::NameTooLong));
    }

    #[test]
    fn test_validate_invalid_color() {
        assert_eq!(
            Category::new("Design", "3B82F6").validate(),
            Err(CategoryValidationError::InvalidColor)
        );
        assert_eq!(
            Category::new("Design", "#GGGGGG").validate(),
            Err(CategoryValidationError::InvalidColor)
        );
    }

    #[test]
    fn test_default_categories_are_valid() {
        let defaults = default_categories();
        assert_eq!(defaults.len(), 6);
        for cat in &defaults {
            assert!(cat.is_system);
            assert!(cat.validate().is_ok());
        }
        assert!(defaults.iter().any(|c| c.name == "Frontend Development"));
    }

    #[test]
    fn test_is_valid_hex_color() {
        assert!(is_valid_hex_color("#FFF"));
        assert!(is_valid_hex_color("#AbCdEf"));
        assert!(is_valid_hex_color("#FF0000FF"));
        assert!(!is_valid_hex_color("FFF"));
        assert!(!is_valid_hex_color("#FFFF"));
        assert!(!is_valid_hex_color(""));
    }

    #[test]
    fn test_selection_keeps_insertion_order() {
        let selection = CategorySelection::from_labels(["Design", "Consulting", "Design"]);
        assert_eq!(
            selection.labels(),
            &["Design".to_string(), "Consulting".to_string()]
        );
    }

    #[test]
    fn test_selection_toggle() {
        let mut selection = CategorySelection::new();
        assert!(selection.toggle("Design"));
        assert!(selection.contains("Design"));
        assert!(!selection.toggle("Design"));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_selection_ignores_blank_labels() {
        let mut selection = CategorySelection::new();
        selection.select("  ");
        assert!(selection.is_empty());
        assert!(!selection.toggle(""));
    }

    #[test]
    fn test_selection_clear() {
        let mut selection = CategorySelection::from_labels(["Design", "Support"]);
        assert_eq!(selection.len(), 2);
        selection.clear();
        assert!(selection.is_empty());
    }
}
