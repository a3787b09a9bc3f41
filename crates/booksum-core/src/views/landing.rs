use crate::router::Route;

pub const PRODUCT_NAME: &str = "Book Summarizer";

pub const BADGE: &str = "AI-Powered Intelligence";

pub const HEADLINE: [&str; 2] = ["Stop Drowning in Pages.", "Start Swimming in Ideas."];

pub const PITCH: &str = "Transform lengthy books into actionable insights in seconds. \
Let AI do the heavy lifting while you focus on understanding and applying knowledge.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Feature {
    pub title: &'static str,
    pub description: &'static str,
}

pub const FEATURES: [Feature; 6] = [
    Feature {
        title: "Lightning Fast",
        description: "Get comprehensive summaries in under a minute. No more spending hours on lengthy books.",
    },
    Feature {
        title: "Smart Extraction",
        description: "AI identifies and highlights the most important concepts, themes, and actionable insights.",
    },
    Feature {
        title: "Multiple Formats",
        description: "Choose between bullet points for quick scanning or paragraph format for detailed overviews.",
    },
    Feature {
        title: "Export Anywhere",
        description: "Download your summaries as PDF or TXT files.",
    },
    Feature {
        title: "Your Library",
        description: "Keep all your summaries organized in one place.",
    },
    Feature {
        title: "Privacy First",
        description: "Your books and summaries are private. They are never shared.",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub number: u8,
    pub title: &'static str,
    pub description: &'static str,
}

pub const STEPS: [Step; 3] = [
    Step {
        number: 1,
        title: "Upload Your Book",
        description: "Upload a PDF or text file, or paste your text directly.",
    },
    Step {
        number: 2,
        title: "Choose Your Style",
        description: "Pick bullet points or paragraphs and set the length you want.",
    },
    Step {
        number: 3,
        title: "Get Your Summary",
        description: "Receive a summary in seconds and download it as TXT or PDF.",
    },
];

/// Calls to action on the landing screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LandingAction {
    SignIn,
    GetStarted,
}

impl LandingAction {
    pub fn label(&self) -> &'static str {
        match self {
            Self::SignIn => "Sign In",
            Self::GetStarted => "Get Started",
        }
    }

    pub fn target(&self) -> Route {
        match self {
            Self::SignIn => Route::Login,
            Self::GetStarted => Route::Register,
        }
    }
}
