// file: src/search/matcher.rs
// description: case-insensitive literal substring matching
// reference: lowercases both phrase and page text, no other normalization

#[derive(Debug, Clone)]
pub struct PhraseMatcher {
    needle: String,
}

impl PhraseMatcher {
    pub fn new(phrase: &str) -> Self {
        Self {
            needle: phrase.to_lowercase(),
        }
    }

    pub fn is_match(&self, text: &str) -> bool {
        text.to_lowercase().contains(&self.needle)
    }
}
