//! Known-tool directory for logo annotation.
//!
//! A node whose label names a known external product is rendered with that
//! product's logo and classified as a tool step. Matching is a substring
//! heuristic in both directions; directory order decides ties, so the more
//! specific names come first.

use scribe_canvas::model::ToolRef;

pub struct ToolEntry {
    pub id: &'static str,
    /// Lower-case display name the label is matched against.
    pub name: &'static str,
    /// Domain the host resolves to a logo URL.
    pub domain: &'static str,
}

// Directory names must not contain everyday flow words ("start", "end",
// "wait"): the reverse-containment arm of `match_tool` would claim those
// labels.
pub const TOOL_DIRECTORY: &[ToolEntry] = &[
    ToolEntry { id: "google-sheets", name: "google sheets", domain: "sheets.google.com" },
    ToolEntry { id: "google-drive", name: "google drive", domain: "drive.google.com" },
    ToolEntry { id: "gmail", name: "gmail", domain: "gmail.com" },
    ToolEntry { id: "slack", name: "slack", domain: "slack.com" },
    ToolEntry { id: "salesforce", name: "salesforce", domain: "salesforce.com" },
    ToolEntry { id: "hubspot", name: "hubspot", domain: "hubspot.com" },
    ToolEntry { id: "stripe", name: "stripe", domain: "stripe.com" },
    ToolEntry { id: "shopify", name: "shopify", domain: "shopify.com" },
    ToolEntry { id: "zapier", name: "zapier", domain: "zapier.com" },
    ToolEntry { id: "notion", name: "notion", domain: "notion.so" },
    ToolEntry { id: "airtable", name: "airtable", domain: "airtable.com" },
    ToolEntry { id: "twilio", name: "twilio", domain: "twilio.com" },
    ToolEntry { id: "mailchimp", name: "mailchimp", domain: "mailchimp.com" },
    ToolEntry { id: "jira", name: "jira", domain: "atlassian.com" },
    ToolEntry { id: "github", name: "github", domain: "github.com" },
    ToolEntry { id: "gitlab", name: "gitlab", domain: "gitlab.com" },
    ToolEntry { id: "trello", name: "trello", domain: "trello.com" },
    ToolEntry { id: "asana", name: "asana", domain: "asana.com" },
    ToolEntry { id: "zoom", name: "zoom", domain: "zoom.us" },
    ToolEntry { id: "dropbox", name: "dropbox", domain: "dropbox.com" },
    ToolEntry { id: "discord", name: "discord", domain: "discord.com" },
    ToolEntry { id: "intercom", name: "intercom", domain: "intercom.com" },
    ToolEntry { id: "typeform", name: "typeform", domain: "typeform.com" },
    ToolEntry { id: "webflow", name: "webflow", domain: "webflow.com" },
];

/// Scans the directory for a match against the label.
///
/// The lower-cased, trimmed label matches a tool when it equals the tool
/// name, contains it, or (for tool names of at least four characters) is
/// contained by it. First directory match wins. The reverse-containment arm
/// is deliberately guarded: two- and three-letter names would swallow too
/// many short labels.
pub fn match_tool(label: &str) -> Option<&'static ToolEntry> {
    let needle = label.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }
    TOOL_DIRECTORY.iter().find(|tool| {
        needle == tool.name
            || needle.contains(tool.name)
            || (tool.name.len() >= 4 && tool.name.contains(&needle))
    })
}

impl ToolEntry {
    pub fn to_ref(&self) -> ToolRef {
        ToolRef {
            id: self.id.to_string(),
            domain: self.domain.to_string(),
        }
    }
}
