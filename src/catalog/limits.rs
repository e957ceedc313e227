use super::types::{Category, CategoryLimits};

impl CategoryLimits {
    /// Team composition limits for a category.
    ///
    /// Total over the closed category set; there is no not-found case.
    /// An advisor is mandatory across the board; co-advisors are allowed
    /// from category III up.
    pub fn for_category(category: Category) -> CategoryLimits {
        let (max_members, allows_co_advisor) = match category {
            Category::I | Category::II => (3, false),
            Category::III | Category::IV | Category::V | Category::VI => (3, true),
            Category::VII => (4, true),
            Category::VIII => (5, true),
            Category::Relato => (2, false),
        };

        CategoryLimits {
            category,
            max_members,
            requires_advisor: true,
            allows_co_advisor,
        }
    }
}
