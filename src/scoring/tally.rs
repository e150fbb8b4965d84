use serde::{Deserialize, Serialize};

/// Recognized survey answer categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Affirmative,
    Partial,
    Negative,
    NotApplicable,
}

/// Cell text for each answer category as it appears in the response sheet.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AnswerLabels {
    pub affirmative: String,
    pub partial: String,
    pub negative: String,
    pub not_applicable: String,
}

impl Default for AnswerLabels {
    fn default() -> Self {
        Self {
            affirmative: "Ya".to_string(),
            partial: "Sebagian".to_string(),
            negative: "Tidak".to_string(),
            not_applicable: "Tidak Berlaku".to_string(),
        }
    }
}

impl AnswerLabels {
    /// Exact-match a cell against the four labels. Anything else is `None`.
    pub fn categorize(&self, cell: &str) -> Option<Category> {
        if cell == self.affirmative {
            Some(Category::Affirmative)
        } else if cell == self.partial {
            Some(Category::Partial)
        } else if cell == self.negative {
            Some(Category::Negative)
        } else if cell == self.not_applicable {
            Some(Category::NotApplicable)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryTally {
    pub affirmative: usize,
    pub partial: usize,
    pub negative: usize,
    pub not_applicable: usize,
    /// Every cell looked at, recognized or not.
    pub cells_scanned: usize,
}

impl CategoryTally {
    pub fn recognized(&self) -> usize {
        self.affirmative + self.partial + self.negative + self.not_applicable
    }
}

/// Count recognized answers in a block of cells.
///
/// Blanks and free text are skipped silently; survey sheets legitimately
/// contain both.
pub fn tally<'a, I>(cells: I, answers: &AnswerLabels) -> CategoryTally
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts = CategoryTally::default();
    for cell in cells {
        counts.cells_scanned += 1;
        match answers.categorize(cell) {
            Some(Category::Affirmative) => counts.affirmative += 1,
            Some(Category::Partial) => counts.partial += 1,
            Some(Category::Negative) => counts.negative += 1,
            Some(Category::NotApplicable) => counts.not_applicable += 1,
            None => {}
        }
    }
    counts
}
