use crate::tree::entry::{Entry, EntryKind};

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "svg"];
const DOCUMENT_EXTENSIONS: &[&str] = &["pdf", "doc", "docx", "txt", "md"];
const CODE_EXTENSIONS: &[&str] = &[
    "js", "jsx", "ts", "tsx", "py", "java", "cpp", "go", "rs", "php", "html", "css",
];

/// Coarse category of an entry, shared by filtering and iconography.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Folder,
    Image,
    Document,
    Code,
    Other,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::Folder => "Folders",
            Category::Image => "Images",
            Category::Document => "Documents",
            Category::Code => "Code",
            Category::Other => "Other",
        }
    }

    /// List icon: a Nerd Font glyph, or an ASCII tag when icons are disabled.
    pub fn icon(&self, use_icons: bool) -> &'static str {
        if use_icons {
            match self {
                Category::Folder => " ",
                Category::Image => " ",
                Category::Document => " ",
                Category::Code => " ",
                Category::Other => " ",
            }
        } else {
            match self {
                Category::Folder => "[D] ",
                Category::Image => "[I] ",
                Category::Document => "[T] ",
                Category::Code => "[C] ",
                Category::Other => "[F] ",
            }
        }
    }
}

/// Category filter selected in the search bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn matches(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => *c == category,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CategoryFilter::All => "All Files",
            CategoryFilter::Only(c) => c.label(),
        }
    }

    /// Cycle all → folder → image → document → code → all.
    pub fn next(&self) -> Self {
        match self {
            CategoryFilter::All => CategoryFilter::Only(Category::Folder),
            CategoryFilter::Only(Category::Folder) => CategoryFilter::Only(Category::Image),
            CategoryFilter::Only(Category::Image) => CategoryFilter::Only(Category::Document),
            CategoryFilter::Only(Category::Document) => CategoryFilter::Only(Category::Code),
            CategoryFilter::Only(_) => CategoryFilter::All,
        }
    }
}

/// Lowercase extension of the last path segment, if it has one.
pub fn extension(name: &str) -> Option<String> {
    let leaf = name.rsplit('/').next().unwrap_or(name);
    let (_, ext) = leaf.rsplit_once('.')?;
    Some(ext.to_lowercase())
}

/// Classify by name and kind. Total: every input maps to one category.
pub fn classify_name(name: &str, kind: EntryKind) -> Category {
    if kind == EntryKind::Folder {
        return Category::Folder;
    }
    let Some(ext) = extension(name) else {
        return Category::Other;
    };
    let ext = ext.as_str();
    if IMAGE_EXTENSIONS.contains(&ext) {
        Category::Image
    } else if DOCUMENT_EXTENSIONS.contains(&ext) {
        Category::Document
    } else if CODE_EXTENSIONS.contains(&ext) {
        Category::Code
    } else {
        Category::Other
    }
}

pub fn classify(entry: &Entry) -> Category {
    classify_name(&entry.name, entry.kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folders_always_classify_as_folder() {
        for name in ["src", "photo.png", "notes.md", "main.rs", "a/b/c.pdf"] {
            assert_eq!(classify_name(name, EntryKind::Folder), Category::Folder);
        }
    }

    #[test]
    fn closed_tables_map_to_their_category() {
        for ext in IMAGE_EXTENSIONS {
            assert_eq!(classify_name(&format!("x.{}", ext), EntryKind::File), Category::Image);
        }
        for ext in DOCUMENT_EXTENSIONS {
            assert_eq!(
                classify_name(&format!("x.{}", ext), EntryKind::File),
                Category::Document
            );
        }
        for ext in CODE_EXTENSIONS {
            assert_eq!(classify_name(&format!("x.{}", ext), EntryKind::File), Category::Code);
        }
    }

    #[test]
    fn extension_match_is_case_insensitive() {
        assert_eq!(classify_name("README.MD", EntryKind::File), Category::Document);
        assert_eq!(classify_name("Photo.JPEG", EntryKind::File), Category::Image);
    }

    #[test]
    fn unknown_or_missing_extension_is_other() {
        assert_eq!(classify_name("archive.zip", EntryKind::File), Category::Other);
        assert_eq!(classify_name("Makefile", EntryKind::File), Category::Other);
        assert_eq!(classify_name(".gitignore", EntryKind::File), Category::Other);
        assert_eq!(classify_name("", EntryKind::File), Category::Other);
        assert_eq!(classify_name("trailing.", EntryKind::File), Category::Other);
    }

    #[test]
    fn uses_last_segment_of_qualified_name() {
        assert_eq!(classify_name("v1.2/notes", EntryKind::File), Category::Other);
        assert_eq!(classify_name("docs.v2/guide.md", EntryKind::File), Category::Document);
    }

    #[test]
    fn classification_is_deterministic() {
        let names = ["a.rs", "b.png", "c.pdf", "d.bin"];
        let first: Vec<Category> = names.iter().map(|n| classify_name(n, EntryKind::File)).collect();
        let second: Vec<Category> = names.iter().map(|n| classify_name(n, EntryKind::File)).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn filter_cycle_returns_to_all() {
        let mut f = CategoryFilter::All;
        let mut seen = Vec::new();
        for _ in 0..5 {
            f = f.next();
            seen.push(f);
        }
        assert_eq!(seen.last(), Some(&CategoryFilter::All));
        assert_eq!(seen[0], CategoryFilter::Only(Category::Folder));
        assert_eq!(seen[3], CategoryFilter::Only(Category::Code));
    }

    #[test]
    fn filter_all_matches_everything() {
        assert!(CategoryFilter::All.matches(Category::Other));
        assert!(CategoryFilter::Only(Category::Document).matches(Category::Document));
        assert!(!CategoryFilter::Only(Category::Document).matches(Category::Code));
    }
}
