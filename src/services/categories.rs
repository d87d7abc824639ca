use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    All,
    Music,
    Podcasts,
    Sports,
    News,
    Education,
    Entertainment,
    Lifestyle,
    Documentaries,
    Interviews,
    Comedy,
    Vlogs,
}

impl Category {
    pub const ALL: [Category; 12] = [
        Category::All,
        Category::Music,
        Category::Podcasts,
        Category::Sports,
        Category::News,
        Category::Education,
        Category::Entertainment,
        Category::Lifestyle,
        Category::Documentaries,
        Category::Interviews,
        Category::Comedy,
        Category::Vlogs,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::All => "All",
            Category::Music => "Music",
            Category::Podcasts => "Podcasts",
            Category::Sports => "Sports",
            Category::News => "News",
            Category::Education => "Education",
            Category::Entertainment => "Entertainment",
            Category::Lifestyle => "Lifestyle",
            Category::Documentaries => "Documentaries",
            Category::Interviews => "Interviews",
            Category::Comedy => "Comedy",
            Category::Vlogs => "Vlogs",
        }
    }

    /// The catch-all value that disables category filtering.
    pub fn is_catch_all(&self) -> bool {
        matches!(self, Category::All)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("Unknown category: {}", s))
    }
}

const KEYWORDS: &[(Category, &[&str])] = &[
    (Category::Music, &["music", "song", "album", "artist"]),
    (Category::Podcasts, &["podcast", "interview", "discussion"]),
    (Category::Sports, &["sport", "football", "basketball", "soccer"]),
    (Category::News, &["news", "breaking", "report", "update"]),
    (Category::Education, &["education", "learn", "tutorial", "lesson"]),
    (Category::Entertainment, &["entertainment", "movie", "show", "tv"]),
    (Category::Lifestyle, &["lifestyle", "health", "fitness", "fashion"]),
    (Category::Documentaries, &["documentary"]),
    (Category::Interviews, &["interview"]),
    (Category::Comedy, &["comedy", "funny", "humor", "joke"]),
    (Category::Vlogs, &["vlog", "daily", "my day", "personal"]),
];

/// Guesses categories from fetched metadata by keyword.
///
/// Every keyword group that matches contributes its category once, in table
/// order. Falls back to `[All]` when nothing matches.
pub fn detect_categories(title: &str, description: &str) -> Vec<Category> {
    let content = format!("{} {}", title, description).to_lowercase();

    let detected: Vec<Category> = KEYWORDS
        .iter()
        .filter(|(_, words)| words.iter().any(|w| content.contains(w)))
        .map(|(category, _)| *category)
        .collect();

    if detected.is_empty() {
        vec![Category::All]
    } else {
        detected
    }
}
