//! System prompt assembly for the diary companion.
//!
//! The prompt is built once when a session is created, from the fixed
//! persona, the user's profile, and their recent diary history. Sections
//! use XML tag boundaries so the model can tell them apart.

use chrono::Datelike;
use dailylog_types::diary::Diary;
use dailylog_types::user::User;

use crate::extract::{CONTENT_END, CONTENT_START, TITLE_END, TITLE_START};

/// How many recent diaries are embedded in the system prompt.
pub const RECENT_DIARY_LIMIT: usize = 10;

/// Fixed persona and style instructions for the diary companion.
pub const DIARY_PERSONA: &str = "\
You are a warm, attentive diary companion. You help the user put their day \
into words: ask about what happened, how it felt, and what stood out. Keep \
your questions short and concrete. Never lecture, never judge.";

/// The assistant message that opens every new session.
pub const OPENING_MESSAGE: &str =
    "Hi! I'm here to help you write today's diary. How was your day?";

/// Builds the session system prompt from persona, profile, and history.
pub struct SystemPromptBuilder;

impl SystemPromptBuilder {
    /// Assemble the complete system prompt.
    ///
    /// Layout:
    /// ```text
    /// <persona>{fixed persona}</persona>
    /// <user_profile>Name: ... Age: ...</user_profile>
    /// <recent_diaries>[2026-08-20] Title: ...</recent_diaries>
    /// <instructions>marker format for the finished entry</instructions>
    /// ```
    pub fn build(user: &User, recent_diaries: &[Diary]) -> String {
        let mut sections = Vec::with_capacity(4);

        sections.push(format!("<persona>\n{DIARY_PERSONA}\n</persona>"));

        let mut profile_lines = Vec::new();
        if let Some(username) = &user.username {
            profile_lines.push(format!("Name: {username}"));
        }
        if let Some(birth) = &user.birth {
            profile_lines.push(format!("Born: {birth}"));
        }
        if let Some(gender) = &user.gender {
            profile_lines.push(format!("Gender: {gender}"));
        }
        if !profile_lines.is_empty() {
            sections.push(format!(
                "<user_profile>\n{}\n</user_profile>",
                profile_lines.join("\n")
            ));
        }

        if !recent_diaries.is_empty() {
            let diary_lines: Vec<String> = recent_diaries
                .iter()
                .take(RECENT_DIARY_LIMIT)
                .map(format_diary_line)
                .collect();
            sections.push(format!(
                "<recent_diaries>\nThe user's most recent diary entries, newest first:\n{}\n</recent_diaries>",
                diary_lines.join("\n")
            ));
        }

        sections.push(format!(
            "<instructions>\n\
             When the user asks you to write the diary entry for them, compose it \
             in the user's voice, first person, past tense. Wrap the result in \
             literal markers on their own lines:\n\
             {TITLE_START}a short title{TITLE_END}\n\
             {CONTENT_START}the full diary entry{CONTENT_END}\n\
             Do not use the markers anywhere else.\n\
             </instructions>"
        ));

        sections.join("\n\n")
    }
}

/// One-line summary of a past diary for the history section.
fn format_diary_line(diary: &Diary) -> String {
    let title = diary.title.as_deref().unwrap_or("(untitled)");
    // A short excerpt is enough context; whole entries would crowd the prompt.
    let excerpt: String = diary.content.chars().take(120).collect();
    format!(
        "- [{:04}-{:02}-{:02}] {title}: {excerpt}",
        diary.writed_at.year(),
        diary.writed_at.month(),
        diary.writed_at.day()
    )
}

/// Illustration prompt for a diary thumbnail.
///
/// Embeds the entry content verbatim so the image reflects the actual day.
pub fn illustration_prompt(content: &str) -> String {
    format!(
        "A soft, warm watercolor illustration capturing the mood of this diary \
         entry. No text, no lettering, gentle colors, simple composition.\n\n\
         Diary entry:\n{content}"
    )
}
