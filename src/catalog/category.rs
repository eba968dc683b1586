//! File categories and the ordered rules that assign them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// The nine categories a discovered file can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Agents,
    Debug,
    Memory,
    ProjectConfig,
    Settings,
    Todos,
    Plans,
    Skills,
    Other,
}

impl Category {
    /// All categories in priority order.
    pub const ALL: [Self; 9] = [
        Self::Agents,
        Self::Debug,
        Self::Memory,
        Self::ProjectConfig,
        Self::Settings,
        Self::Todos,
        Self::Plans,
        Self::Skills,
        Self::Other,
    ];

    /// Human-readable name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Agents => "Agents",
            Self::Debug => "Debug",
            Self::Memory => "Memory",
            Self::ProjectConfig => "Project Config",
            Self::Settings => "Settings",
            Self::Todos => "Todos",
            Self::Plans => "Plans",
            Self::Skills => "Skills",
            Self::Other => "Other",
        }
    }

    /// Nominal priority, 1 (highest) to 9. Assignment itself follows rule order.
    #[must_use]
    pub const fn priority(self) -> u8 {
        match self {
            Self::Agents => 1,
            Self::Debug => 2,
            Self::Memory => 3,
            Self::ProjectConfig => 4,
            Self::Settings => 5,
            Self::Todos => 6,
            Self::Plans => 7,
            Self::Skills => 8,
            Self::Other => 9,
        }
    }

    /// Stable kebab-case tag, matching the serialized form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Agents => "agents",
            Self::Debug => "debug",
            Self::Memory => "memory",
            Self::ProjectConfig => "project-config",
            Self::Settings => "settings",
            Self::Todos => "todos",
            Self::Plans => "plans",
            Self::Skills => "skills",
            Self::Other => "other",
        }
    }

    /// Parse a kebab-case tag.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == tag)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Input to the classification rules.
#[derive(Debug, Clone)]
pub struct FileFacts<'a> {
    /// File name as found on disk.
    pub name: &'a str,
    /// Absolute path, forward slashes, lower-cased.
    pub path: String,
    /// Lower-cased extension without the dot, empty if none.
    pub extension: String,
    /// Whether the file sits inside a `.claude` directory.
    pub inside_marker: bool,
}

impl<'a> FileFacts<'a> {
    /// Normalize raw inputs for rule matching.
    #[must_use]
    pub fn new(name: &'a str, path: &str, inside_marker: bool) -> Self {
        let extension = Path::new(name)
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        Self {
            name,
            path: path.replace('\\', "/").to_lowercase(),
            extension,
            inside_marker,
        }
    }

    fn path_has(&self, segment: &str) -> bool {
        self.path.contains(segment)
    }
}

type Predicate = fn(&FileFacts<'_>) -> bool;

/// Classification rules, evaluated first-match-wins.
///
/// Matching is plain substring containment on the normalized path, so
/// `/plans/agents/x.md` is agents, not plans.
const RULES: [(Predicate, Category); 11] = [
    (
        |f| f.path_has("/agents/") && f.extension == "md",
        Category::Agents,
    ),
    (|f| f.path_has("/debug/"), Category::Debug),
    (
        |f| f.path_has("/memory/") || f.name.to_lowercase() == "memory.md",
        Category::Memory,
    ),
    (
        |f| f.name == "CLAUDE.md" && !f.inside_marker,
        Category::ProjectConfig,
    ),
    (
        |f| f.name == "settings.json" || f.name == ".clauderc",
        Category::Settings,
    ),
    (
        |f| f.inside_marker && f.extension == "sh" && !f.path_has("/shell-snapshots/"),
        Category::Settings,
    ),
    (|f| f.name == "stats-cache.json", Category::Settings),
    (
        |f| f.path_has("/todos/") || f.path_has("/tasks/"),
        Category::Todos,
    ),
    (|f| f.path_has("/plans/"), Category::Plans),
    (|f| f.path_has("/skills/"), Category::Skills),
    // Only CLAUDE.md inside the marker directory gets here; rule 5 already
    // takes every .clauderc.
    (
        |f| f.name == "CLAUDE.md" || f.name == ".clauderc",
        Category::ProjectConfig,
    ),
];

/// Assign exactly one category to a file.
#[must_use]
pub fn assign_category(name: &str, path: &str, inside_marker: bool) -> Category {
    let facts = FileFacts::new(name, path, inside_marker);
    RULES
        .iter()
        .find(|(matches, _)| matches(&facts))
        .map_or(Category::Other, |(_, category)| *category)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assign(path: &str, inside: bool) -> Category {
        let name = path.rsplit('/').next().unwrap();
        assign_category(name, path, inside)
    }

    #[test]
    fn test_agents_requires_md() {
        assert_eq!(assign("/h/.claude/agents/reviewer.md", true), Category::Agents);
        assert_eq!(assign("/h/.claude/agents/reviewer.json", true), Category::Other);
    }

    #[test]
    fn test_rule_order_beats_specificity() {
        assert_eq!(assign("/h/.claude/plans/agents/x.md", true), Category::Agents);
        assert_eq!(assign("/h/.claude/debug/agents/x.md", true), Category::Agents);
        assert_eq!(assign("/h/.claude/debug/memory.md", true), Category::Debug);
    }

    #[test]
    fn test_debug() {
        assert_eq!(assign("/h/.claude/debug/session.txt", true), Category::Debug);
    }

    #[test]
    fn test_memory() {
        assert_eq!(assign("/h/.claude/memory/notes.txt", true), Category::Memory);
        assert_eq!(assign("/h/.claude/MEMORY.md", true), Category::Memory);
    }

    #[test]
    fn test_claude_md_outside_marker_is_project_config() {
        assert_eq!(assign("/h/projects/app/CLAUDE.md", false), Category::ProjectConfig);
    }

    #[test]
    fn test_claude_md_inside_marker_falls_through_to_rule_11() {
        assert_eq!(assign("/h/.claude/CLAUDE.md", true), Category::ProjectConfig);
        assert_eq!(assign("/h/.claude/plans/CLAUDE.md", true), Category::Plans);
    }

    #[test]
    fn test_settings_files() {
        assert_eq!(assign("/h/.claude/settings.json", true), Category::Settings);
        assert_eq!(assign("/h/app/.clauderc", false), Category::Settings);
        assert_eq!(assign("/h/.claude/.clauderc", true), Category::Settings);
        assert_eq!(assign("/h/.claude/stats-cache.json", true), Category::Settings);
    }

    #[test]
    fn test_shell_scripts() {
        assert_eq!(assign("/h/.claude/hooks/pre.sh", true), Category::Settings);
        assert_eq!(
            assign("/h/.claude/shell-snapshots/snapshot-zsh-1.sh", true),
            Category::Other
        );
        assert_eq!(assign("/h/app/run.sh", false), Category::Other);
    }

    #[test]
    fn test_todos_plans_skills() {
        assert_eq!(assign("/h/.claude/todos/a.json", true), Category::Todos);
        assert_eq!(assign("/h/.claude/tasks/a.json", true), Category::Todos);
        assert_eq!(assign("/h/.claude/plans/p.md", true), Category::Plans);
        assert_eq!(assign("/h/.claude/skills/s/SKILL.md", true), Category::Skills);
    }

    #[test]
    fn test_matching_is_case_insensitive_on_path() {
        assert_eq!(assign("/h/.claude/Plans/p.md", true), Category::Plans);
        assert_eq!(assign("/h/.claude/AGENTS/a.MD", true), Category::Agents);
    }

    #[test]
    fn test_windows_separators_are_normalized() {
        assert_eq!(
            assign_category("a.json", r"C:\u\.claude\todos\a.json", true),
            Category::Todos
        );
    }

    #[test]
    fn test_fallback_other() {
        assert_eq!(assign("/h/.claude/history.log", true), Category::Other);
    }

    #[test]
    fn test_tags_round_trip() {
        for category in Category::ALL {
            assert_eq!(Category::from_tag(category.as_str()), Some(category));
        }
        assert_eq!(Category::from_tag("nope"), None);
    }

    #[test]
    fn test_serde_uses_kebab_case() {
        let json = serde_json::to_string(&Category::ProjectConfig).unwrap();
        assert_eq!(json, "\"project-config\"");
    }

    #[test]
    fn test_priorities_ascend() {
        let priorities: Vec<u8> = Category::ALL.iter().map(|c| c.priority()).collect();
        assert_eq!(priorities, (1..=9).collect::<Vec<_>>());
    }
}
