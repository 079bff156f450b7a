use crate::foundation::math::Fnv1a64;

const DEFAULT_TEMPLATES: &[&str] = &[
    "Братья! %s",
    "Друзья! %s",
    "%s навсегда!",
    "%s — это сила!",
    "Вперёд, %s!",
    "%s! %s! %s!",
];

const DEFAULT_KEYWORDS: &[&str] = &["гойда", "гол", "слон", "наш", "медведь"];

/// Caption phrase templates; `%s` marks where the keyword goes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaptionVariants {
    templates: Vec<String>,
    keywords: Vec<String>,
}

impl Default for CaptionVariants {
    fn default() -> Self {
        Self {
            templates: DEFAULT_TEMPLATES.iter().map(|s| s.to_string()).collect(),
            keywords: DEFAULT_KEYWORDS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl CaptionVariants {
    /// Custom templates and keywords. Returns `None` if either list is empty.
    pub fn new(templates: Vec<String>, keywords: Vec<String>) -> Option<Self> {
        if templates.is_empty() || keywords.is_empty() {
            return None;
        }
        Some(Self {
            templates,
            keywords,
        })
    }

    /// Deterministically pick a keyword and template for `seed`.
    ///
    /// The keyword is upper-cased and substituted into every `%s` slot.
    pub fn pick(&self, seed: u64) -> String {
        let mut h = Fnv1a64::new_default();
        h.write_u64(seed);
        let a = h.finish();
        h.write_bytes(b"template");
        let b = h.finish();

        let keyword = &self.keywords[(a % self.keywords.len() as u64) as usize];
        let template = &self.templates[(b % self.templates.len() as u64) as usize];
        template.replace("%s", &keyword.to_uppercase())
    }
}

#[cfg(test)]
#[path = "../tests/unit/variant.rs"]
mod tests;
