//! System prompt assembly.

use crate::tools::ToolRegistry;

/// Append the available tools and the output contract to a role prompt.
pub fn build_system_prompt(role_prompt: &str, tools: &ToolRegistry) -> String {
    let role_prompt = role_prompt.trim();
    if tools.is_empty() {
        return role_prompt.to_string();
    }

    let tool_descriptions = tools
        .list_tools()
        .iter()
        .map(|t| format!("- **{}**: {}", t.name, t.description))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"{role_prompt}

## Available Tools

{tool_descriptions}

Use the tools to gather facts instead of guessing. If you need a tool, respond with a tool call; the system will run it and return the result."#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::testing::{as_tool, RecordingTool};
    use serde_json::json;

    #[test]
    fn lists_every_tool() {
        let tools = ToolRegistry::from_tools([
            as_tool(&RecordingTool::returning("arxiv", json!(null))),
            as_tool(&RecordingTool::returning("wikipedia", json!(null))),
        ]);
        let prompt = build_system_prompt("  You are a reviewer.\n", &tools);

        assert!(prompt.starts_with("You are a reviewer.\n\n## Available Tools"));
        assert!(prompt.contains("- **arxiv**: test tool"));
        assert!(prompt.contains("- **wikipedia**: test tool"));
    }

    #[test]
    fn no_tools_leaves_prompt_unchanged() {
        assert_eq!(build_system_prompt("Route the query.", &ToolRegistry::new()), "Route the query.");
    }
}
