use serde::{Deserialize, Serialize};

/// A stored summary as the listing endpoints return it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub id: i64,
    pub summary_id: String,
    /// Absent from the caller's own listing; `0` there.
    #[serde(default)]
    pub user_id: i64,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    pub summary_text: String,
    pub summary_type: SummaryType,
    pub word_count: u32,
    #[serde(default)]
    pub created_at: String,
}

/// Response of the create-summary call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedSummary {
    pub summary_id: String,
    pub summary: String,
    pub summary_type: SummaryType,
    pub word_count: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryType {
    #[default]
    Paragraph,
    Bullet,
}

impl SummaryType {
    pub const ALL: [SummaryType; 2] = [SummaryType::Paragraph, SummaryType::Bullet];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Paragraph => "paragraph",
            Self::Bullet => "bullet",
        }
    }

    /// Human label for option pickers.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Paragraph => "Paragraph",
            Self::Bullet => "Bullet Points",
        }
    }
}

impl std::fmt::Display for SummaryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SummaryType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "paragraph" => Ok(Self::Paragraph),
            "bullet" | "bullets" => Ok(Self::Bullet),
            _ => Err(format!("unknown summary type: {s}")),
        }
    }
}

/// Target summary length in words. The backend accepts any integer but the
/// client only offers these three.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum SummaryLength {
    Short,
    #[default]
    Medium,
    Long,
}

impl SummaryLength {
    pub const ALL: [SummaryLength; 3] = [
        SummaryLength::Short,
        SummaryLength::Medium,
        SummaryLength::Long,
    ];

    pub fn words(&self) -> u32 {
        match self {
            Self::Short => 50,
            Self::Medium => 75,
            Self::Long => 100,
        }
    }

    pub fn from_words(words: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.words() == words)
    }
}

impl TryFrom<u32> for SummaryLength {
    type Error = String;

    fn try_from(words: u32) -> std::result::Result<Self, Self::Error> {
        Self::from_words(words).ok_or_else(|| format!("unsupported summary length: {words}"))
    }
}

impl From<SummaryLength> for u32 {
    fn from(length: SummaryLength) -> Self {
        length.words()
    }
}

impl std::fmt::Display for SummaryLength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.words())
    }
}

impl std::str::FromStr for SummaryLength {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let words: u32 = s
            .trim()
            .parse()
            .map_err(|_| format!("summary length must be a number of words, got: {s}"))?;
        Self::try_from(words)
    }
}

/// File formats the download endpoint can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DownloadFormat {
    Txt,
    Pdf,
}

impl DownloadFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Txt => "txt",
            Self::Pdf => "pdf",
        }
    }
}

impl std::fmt::Display for DownloadFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

impl std::str::FromStr for DownloadFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "txt" => Ok(Self::Txt),
            "pdf" => Ok(Self::Pdf),
            _ => Err(format!("unknown download format: {s} (expected txt or pdf)")),
        }
    }
}
