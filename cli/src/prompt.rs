use clap::ValueEnum;
use thiserror::Error;

pub const DEFAULT_AUDIENCE: &str = "a general audience";
pub const DEFAULT_GOAL: &str = "engagement";
pub const DEFAULT_NOTES: &str = "None";
pub const DEFAULT_TONE: &str = "not specified";
pub const DEFAULT_KEYWORDS: &str = "not specified";

/// Kind of content to generate ideas for. Each kind has its own form and output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum ContentType {
    /// YouTube video ideas
    Youtube,
    /// Instagram post ideas
    Instagram,
    /// Blog article ideas
    Blog,
}

impl ContentType {
    pub fn label(&self) -> &'static str {
        match self {
            ContentType::Youtube => "YouTube",
            ContentType::Instagram => "Instagram",
            ContentType::Blog => "Blog",
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PromptError {
    #[error("⚠️ Please enter a topic first!")]
    MissingTopic,
}

/// Form fields shared by all content types; unused fields are ignored
#[derive(Debug, Clone, Default)]
pub struct IdeaForm {
    pub topic: String,
    pub audience: String,
    pub goal: String,
    pub tone: String,
    pub notes: String,
    pub keywords: Vec<String>,
}

fn or_default<'a>(value: &'a str, default: &'a str) -> &'a str {
    let value = value.trim();
    if value.is_empty() {
        default
    } else {
        value
    }
}

/// Build the model prompt for one content type.
///
/// Fails without a topic; blank optional fields get their default phrase.
pub fn build_prompt(content_type: ContentType, form: &IdeaForm) -> Result<String, PromptError> {
    let topic = form.topic.trim();
    if topic.is_empty() {
        return Err(PromptError::MissingTopic);
    }

    let tone = or_default(&form.tone, DEFAULT_TONE);
    let notes = or_default(&form.notes, DEFAULT_NOTES);

    let prompt = match content_type {
        ContentType::Youtube => format!(
            "Generate 3 distinct YouTube video ideas for the topic: \"{topic}\". \
             The target audience is: \"{audience}\". The tone is: \"{tone}\". \
             Additional constraints: \"{notes}\". \
             For each idea, provide a catchy title, a short description, and 5 hashtags. \
             Use \"---\" as a separator between each distinct idea.",
            audience = or_default(&form.audience, DEFAULT_AUDIENCE),
        ),
        ContentType::Instagram => format!(
            "Generate 3 distinct Instagram post ideas for the theme: \"{topic}\". \
             The main goal is: \"{goal}\". The tone is: \"{tone}\". \
             Additional constraints: \"{notes}\". \
             For each idea, provide a creative caption and 5 hashtags. \
             Use \"---\" as a separator between each distinct idea.",
            goal = or_default(&form.goal, DEFAULT_GOAL),
        ),
        ContentType::Blog => {
            let keywords = form
                .keywords
                .iter()
                .map(|k| k.trim())
                .filter(|k| !k.is_empty())
                .collect::<Vec<_>>()
                .join(", ");
            format!(
                "Generate 3 distinct blog article ideas for the subject: \"{topic}\". \
                 The target audience is: \"{audience}\". The tone is: \"{tone}\". \
                 Keywords to include: \"{keywords}\". \
                 Additional constraints: \"{notes}\". \
                 For each idea, provide a headline, a short outline, and a meta description. \
                 Use \"---\" as a separator between each distinct idea.",
                audience = or_default(&form.audience, DEFAULT_AUDIENCE),
                keywords = or_default(&keywords, DEFAULT_KEYWORDS),
            )
        }
    };

    Ok(prompt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lavender_core::IDEA_SEPARATOR;

    fn form(topic: &str) -> IdeaForm {
        IdeaForm {
            topic: topic.to_string(),
            ..IdeaForm::default()
        }
    }

    #[test]
    fn test_youtube_prompt_with_defaults() {
        let mut f = form("home workouts");
        f.tone = "Funny".to_string();
        let prompt = build_prompt(ContentType::Youtube, &f).unwrap();

        assert_eq!(
            prompt,
            "Generate 3 distinct YouTube video ideas for the topic: \"home workouts\". \
             The target audience is: \"a general audience\". The tone is: \"Funny\". \
             Additional constraints: \"None\". For each idea, provide a catchy title, \
             a short description, and 5 hashtags. Use \"---\" as a separator between each distinct idea."
        );
    }

    #[test]
    fn test_instagram_prompt_uses_goal() {
        let mut f = form("latte art");
        f.goal = "sales".to_string();
        f.notes = "mention the new menu".to_string();
        let prompt = build_prompt(ContentType::Instagram, &f).unwrap();

        assert!(prompt.starts_with(
            "Generate 3 distinct Instagram post ideas for the theme: \"latte art\"."
        ));
        assert!(prompt.contains("The main goal is: \"sales\"."));
        assert!(prompt.contains("Additional constraints: \"mention the new menu\"."));
        assert!(prompt.contains("The tone is: \"not specified\"."));
    }

    #[test]
    fn test_instagram_default_goal() {
        let prompt = build_prompt(ContentType::Instagram, &form("coffee")).unwrap();
        assert!(prompt.contains("The main goal is: \"engagement\"."));
    }

    #[test]
    fn test_blog_keywords() {
        let mut f = form("rust async");
        f.keywords = vec!["tokio".to_string(), " ".to_string(), " futures ".to_string()];
        let prompt = build_prompt(ContentType::Blog, &f).unwrap();
        assert!(prompt.contains("Keywords to include: \"tokio, futures\"."));

        let prompt = build_prompt(ContentType::Blog, &form("rust async")).unwrap();
        assert!(prompt.contains("Keywords to include: \"not specified\"."));
    }

    #[test]
    fn test_every_prompt_asks_for_separator() {
        for &content_type in ContentType::value_variants() {
            let prompt = build_prompt(content_type, &form("topic")).unwrap();
            assert!(
                prompt.contains(&format!("Use \"{}\" as a separator", IDEA_SEPARATOR)),
                "{:?}",
                content_type
            );
        }
    }

    #[test]
    fn test_blank_topic_is_rejected() {
        for topic in ["", "   ", "\n"] {
            assert_eq!(
                build_prompt(ContentType::Youtube, &form(topic)),
                Err(PromptError::MissingTopic)
            );
        }
        assert_eq!(
            PromptError::MissingTopic.to_string(),
            "⚠️ Please enter a topic first!"
        );
    }
}
