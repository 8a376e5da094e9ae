use std::fmt;

use serde::{Deserialize, Serialize};

/// Closed set of expense classifications.
///
/// Declaration order doubles as the tie-break order when ranking categories
/// with equal totals.
#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
pub enum Category {
    Food,
    Transport,
    Shopping,
    Bills,
    Entertainment,
    #[default]
    Others,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Food,
        Category::Transport,
        Category::Shopping,
        Category::Bills,
        Category::Entertainment,
        Category::Others,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Transport => "Transport",
            Category::Shopping => "Shopping",
            Category::Bills => "Bills",
            Category::Entertainment => "Entertainment",
            Category::Others => "Others",
        }
    }

    /// Maps free-form input onto a category, case-insensitively.
    ///
    /// Absent or unrecognised input falls back to [`Category::Others`].
    pub fn normalize(input: Option<&str>) -> Category {
        let Some(raw) = input else {
            tracing::trace!("no category supplied, using Others");
            return Category::Others;
        };
        let raw = raw.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.display_name().eq_ignore_ascii_case(raw))
            .unwrap_or_else(|| {
                tracing::trace!(input = raw, "unrecognised category, using Others");
                Category::Others
            })
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_matches_display_names_case_insensitively() {
        assert_eq!(Category::normalize(Some("food")), Category::Food);
        assert_eq!(Category::normalize(Some("TRANSPORT")), Category::Transport);
        assert_eq!(
            Category::normalize(Some(" Entertainment ")),
            Category::Entertainment
        );
    }

    #[test]
    fn normalize_falls_back_to_others() {
        assert_eq!(Category::normalize(None), Category::Others);
        assert_eq!(Category::normalize(Some("")), Category::Others);
        assert_eq!(Category::normalize(Some("groceries")), Category::Others);
    }
}
