//! Prompt templates for the agent.

use crate::session::Message;
use crate::tools::ToolRegistry;

/// Build the system prompt with tool definitions.
pub fn build_system_prompt(tools: &ToolRegistry) -> String {
    let tool_descriptions = tools
        .list_tools()
        .iter()
        .map(|t| format!("- **{}**: {}", t.name, t.description))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"You are Space Chat, a friendly assistant that answers questions about space.

## Your Capabilities

You can look up live data with the following tools:
{tool_descriptions}

## Rules

1. Call a tool only when the question needs live data. At most one tool can be used per answer.
2. If a tool returns an error, tell the user plainly what could not be fetched.
3. Answer conversationally and keep it short."#
    )
}

/// Flatten the conversation into one prompt.
///
/// Each prior message becomes a `<Role>: <content>` line, in order, followed
/// by `User: <query>`. Nothing is trimmed, deduplicated or windowed.
pub fn build_prompt(history: &[Message], query: &str) -> String {
    let mut lines: Vec<String> = history
        .iter()
        .map(|m| format!("{}: {}", m.role.label(), m.content))
        .collect();
    lines.push(format!("User: {}", query));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_history_is_just_the_query() {
        assert_eq!(
            build_prompt(&[], "Where is the ISS right now?"),
            "User: Where is the ISS right now?"
        );
    }

    #[test]
    fn history_is_serialized_in_order() {
        let history = vec![
            Message::user("Who is in space?"),
            Message::assistant("There are currently 7 people in space."),
            Message::user("Any on Tiangong?"),
            Message::assistant("Yes, three."),
        ];
        assert_eq!(
            build_prompt(&history, "Thanks!"),
            "User: Who is in space?\n\
             Assistant: There are currently 7 people in space.\n\
             User: Any on Tiangong?\n\
             Assistant: Yes, three.\n\
             User: Thanks!"
        );
    }

    #[test]
    fn multiline_content_is_kept_verbatim() {
        let history = vec![Message::assistant("line one\nline two")];
        assert_eq!(
            build_prompt(&history, "ok"),
            "Assistant: line one\nline two\nUser: ok"
        );
    }
}
