//! Append-only turn list owned by one response cycle.

use crate::llm::{ChatMessage, Role, ToolRequest};

#[derive(Debug, Clone, Default)]
pub struct Conversation {
    turns: Vec<ChatMessage>,
}

impl Conversation {
    /// `[system, history..., user]`.
    pub fn start(system_prompt: &str, history: &[ChatMessage], user_query: &str) -> Self {
        let mut turns = Vec::with_capacity(history.len() + 2);
        turns.push(ChatMessage::system(system_prompt));
        turns.extend(history.iter().filter(|m| m.role != Role::System).cloned());
        turns.push(ChatMessage::user(user_query));
        Self { turns }
    }

    /// Record the assistant turn that asked for `requests`.
    pub fn push_tool_requests(&mut self, content: Option<String>, requests: &[ToolRequest]) {
        let calls = requests.iter().map(ToolRequest::to_tool_call).collect();
        self.turns.push(ChatMessage::assistant_tool_calls(content, calls));
    }

    /// Record one tool result as a `tool` turn.
    pub fn push_tool_result(&mut self, request: &ToolRequest, rendered: &str) {
        self.turns.push(ChatMessage::tool(
            request.id.clone(),
            format!("Tool '{}' output: {}", request.name, rendered),
        ));
    }

    pub fn turns(&self) -> &[ChatMessage] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::scripted::request;
    use serde_json::json;

    #[test]
    fn start_wraps_history_between_system_and_user() {
        let history = vec![
            ChatMessage::system("stale system prompt"),
            ChatMessage::user("earlier question"),
            ChatMessage::assistant("earlier answer"),
        ];
        let conversation = Conversation::start("sys", &history, "now");

        let roles: Vec<Role> = conversation.turns().iter().map(|t| t.role).collect();
        assert_eq!(roles, vec![Role::System, Role::User, Role::Assistant, Role::User]);
        assert_eq!(conversation.turns()[0].content.as_deref(), Some("sys"));
        assert_eq!(conversation.turns()[3].content.as_deref(), Some("now"));
    }

    #[test]
    fn tool_round_appends_assistant_then_tool_turns() {
        let mut conversation = Conversation::start("sys", &[], "q");
        let search = request("call_1", "search", json!({"query": "X"}));

        conversation.push_tool_requests(None, std::slice::from_ref(&search));
        conversation.push_tool_result(&search, "doc A");

        assert_eq!(conversation.len(), 4);
        let assistant = &conversation.turns()[2];
        assert_eq!(assistant.role, Role::Assistant);
        assert_eq!(assistant.tool_calls.as_ref().unwrap()[0].function.name, "search");

        let tool = &conversation.turns()[3];
        assert_eq!(tool.role, Role::Tool);
        assert_eq!(tool.tool_call_id.as_deref(), Some("call_1"));
        assert_eq!(tool.content.as_deref(), Some("Tool 'search' output: doc A"));
    }
}
