use crate::models::{AppData, CategoryTotal, EntryRow, SummaryResponse};

/// The four fixed school stages plus the catch-all bucket. Every class label
/// maps to exactly one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Fundamental1A,
    Fundamental1B,
    Fundamental2,
    EnsinoMedio,
    Outros,
}

impl Category {
    /// Display order for the per-category totals.
    pub const ALL: [Category; 5] = [
        Category::Fundamental1A,
        Category::Fundamental1B,
        Category::Fundamental2,
        Category::EnsinoMedio,
        Category::Outros,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::Fundamental1A => "Fundamental 1 A",
            Category::Fundamental1B => "Fundamental 1 B",
            Category::Fundamental2 => "Fundamental 2",
            Category::EnsinoMedio => "Ensino Médio",
            Category::Outros => "Outros",
        }
    }
}

const FUNDAMENTAL_1A: [&str; 2] = ["1º ANO", "2º ANO"];
const FUNDAMENTAL_1B: [&str; 3] = ["3º ANO", "4º ANO", "5º ANO"];
const FUNDAMENTAL_2: [&str; 4] = ["6º ANO", "7º ANO", "8º ANO", "9º ANO"];
const ENSINO_MEDIO: [&str; 3] = ["1º ANO M", "2º ANO M", "3º ANO M"];

/// Exact set membership, no normalization. Unknown labels land in Outros.
pub fn categorize(label: &str) -> Category {
    if FUNDAMENTAL_1A.contains(&label) {
        Category::Fundamental1A
    } else if FUNDAMENTAL_1B.contains(&label) {
        Category::Fundamental1B
    } else if FUNDAMENTAL_2.contains(&label) {
        Category::Fundamental2
    } else if ENSINO_MEDIO.contains(&label) {
        Category::EnsinoMedio
    } else {
        Category::Outros
    }
}

/// Folds the full store into the snapshot the page renders: one row per
/// stored label (store order), all five category totals, and the overall
/// total. Pure; handlers call it after every mutation.
pub fn build_summary(data: &AppData) -> SummaryResponse {
    let mut per_category = [0u32; Category::ALL.len()];
    let mut total = 0u32;
    let mut entries = Vec::with_capacity(data.counts.len());

    for (label, &students) in &data.counts {
        let category = categorize(label);
        per_category[category as usize] = per_category[category as usize].saturating_add(students);
        total = total.saturating_add(students);
        entries.push(EntryRow {
            label: label.clone(),
            students,
            category: category.label().to_string(),
        });
    }

    let categories = Category::ALL
        .iter()
        .map(|&category| CategoryTotal {
            category: category.label().to_string(),
            students: per_category[category as usize],
        })
        .collect();

    SummaryResponse {
        entries,
        categories,
        total,
    }
}
