//! Asset category definitions.

use crate::task::Task;

/// Category of source files, each owning one row of the path-mapping table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Templates,
    Markup,
    Styles,
    Scripts,
    Images,
    Fonts,
    Sitemap,
    Robots,
}

impl Category {
    /// All categories, in path-mapping table order.
    pub const ALL: [Self; 8] = [
        Self::Templates,
        Self::Markup,
        Self::Styles,
        Self::Scripts,
        Self::Images,
        Self::Fonts,
        Self::Sitemap,
        Self::Robots,
    ];

    /// Config key under `[paths]` and log prefix.
    pub fn name(self) -> &'static str {
        match self {
            Self::Templates => "templates",
            Self::Markup => "markup",
            Self::Styles => "styles",
            Self::Scripts => "scripts",
            Self::Images => "images",
            Self::Fonts => "fonts",
            Self::Sitemap => "sitemap",
            Self::Robots => "robots",
        }
    }

    /// Task re-run when a source of this category changes.
    pub fn task(self) -> Task {
        match self {
            Self::Templates => Task::Templates,
            Self::Markup => Task::Markup,
            Self::Styles => Task::Styles,
            Self::Scripts => Task::Scripts,
            Self::Images => Task::Images,
            Self::Fonts => Task::Fonts,
            Self::Sitemap => Task::Sitemap,
            Self::Robots => Task::Robots,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    #[test]
    fn test_names_unique() {
        let names: FxHashSet<_> = Category::ALL.iter().map(|c| c.name()).collect();
        assert_eq!(names.len(), Category::ALL.len());
    }

    #[test]
    fn test_task_mapping() {
        assert_eq!(Category::Templates.task(), Task::Templates);
        assert_eq!(Category::Robots.task(), Task::Robots);
        for category in Category::ALL {
            assert_eq!(category.task().name(), category.name());
        }
    }
}
