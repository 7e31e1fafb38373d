use serde::{Deserialize, Serialize};

/// Prompt domain selected by the user.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Category {
    Website,
    #[serde(rename = "App Development")]
    AppDevelopment,
    #[serde(rename = "Image Generation")]
    ImageGeneration,
    #[serde(rename = "Video Generation")]
    VideoGeneration,
    #[serde(rename = "Business Idea")]
    BusinessIdea,
    Study,
    Marketing,
    Coding,
}

/// Writing tone for the rewritten prompt.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Tone {
    Professional,
    Creative,
    Detailed,
    Short,
    Expert,
}

/// Desired depth of the rewritten prompt.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum OutputLength {
    Short,
    Medium,
    Long,
}

/// AI platform the prompt is being optimized for.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Platform {
    ChatGPT,
    Gemini,
    Midjourney,
    Veo,
    #[serde(rename = "General AI")]
    GeneralAI,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Website => "Website",
            Category::AppDevelopment => "App Development",
            Category::ImageGeneration => "Image Generation",
            Category::VideoGeneration => "Video Generation",
            Category::BusinessIdea => "Business Idea",
            Category::Study => "Study",
            Category::Marketing => "Marketing",
            Category::Coding => "Coding",
        }
    }
}

impl Tone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Professional => "Professional",
            Tone::Creative => "Creative",
            Tone::Detailed => "Detailed",
            Tone::Short => "Short",
            Tone::Expert => "Expert",
        }
    }
}

impl OutputLength {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputLength::Short => "Short",
            OutputLength::Medium => "Medium",
            OutputLength::Long => "Long",
        }
    }
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::ChatGPT => "ChatGPT",
            Platform::Gemini => "Gemini",
            Platform::Midjourney => "Midjourney",
            Platform::Veo => "Veo",
            Platform::GeneralAI => "General AI",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::fmt::Display for Tone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::fmt::Display for OutputLength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multi_word_values_serialize_with_spaces() {
        let json = serde_json::to_string(&Category::AppDevelopment).expect("serialize category");
        assert_eq!(json, r#""App Development""#);
        let json = serde_json::to_string(&Platform::GeneralAI).expect("serialize platform");
        assert_eq!(json, r#""General AI""#);
    }

    #[test]
    fn values_roundtrip_through_their_display_strings() {
        let back: Category =
            serde_json::from_str(r#""Business Idea""#).expect("deserialize category");
        assert_eq!(back, Category::BusinessIdea);
        let back: Tone = serde_json::from_str(r#""Expert""#).expect("deserialize tone");
        assert_eq!(back, Tone::Expert);
        let back: OutputLength = serde_json::from_str(r#""Medium""#).expect("deserialize length");
        assert_eq!(back, OutputLength::Medium);
    }

    #[test]
    fn unknown_value_is_rejected() {
        let err = serde_json::from_str::<Platform>(r#""Copilot""#);
        assert!(err.is_err());
    }
}
