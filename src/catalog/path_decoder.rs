//! Project identity from encoded directory names and file locations.
//!
//! Claude flattens a project's absolute path into a single directory name
//! under `~/.claude/projects/` by replacing `/` with `-`, so
//! `/home/user/Projects/MyApp` becomes `-home-user-Projects-MyApp`.

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::MARKER_DIR;

/// Directory names that carry no project meaning. Matched case-sensitively.
const PATH_NOISE: &[&str] = &[
    "home",
    "Users",
    "user",
    "Documents",
    "Desktop",
    "Projects",
    "projects",
    "src",
    "dev",
    "code",
    "workspace",
    "repos",
    "Github",
    "github",
    "Repos",
];

/// Whether a file is user-wide or tied to one project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Global,
    Project,
}

impl Scope {
    /// Lower-case label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Global => "global",
            Self::Project => "project",
        }
    }
}

/// Recover a project name from an encoded directory name.
///
/// Returns the last `-`-separated segment that is longer than one character
/// and not common path noise.
#[must_use]
pub fn decode_project_name(encoded: &str) -> Option<String> {
    encoded
        .split('-')
        .rfind(|segment| segment.chars().count() > 1 && !PATH_NOISE.contains(segment))
        .map(str::to_string)
}

/// Determine scope and project name for an absolute path.
///
/// Checked in order:
/// 1. under `<home>/.claude/projects/`: project named by the decoded first component
/// 2. under `<home>/.claude/`: global
/// 3. any other `/.claude/`: project named after the directory holding it
/// 4. a `CLAUDE.md`: project named after its parent directory
///
/// Anything else is global.
#[must_use]
pub fn detect_scope(path: &str, home: &str) -> (Scope, Option<String>) {
    let home = home.strip_suffix('/').unwrap_or(home);
    let marker_base = format!("{home}/{MARKER_DIR}/");
    let projects_base = format!("{marker_base}projects/");

    if let Some(rest) = path.strip_prefix(&projects_base) {
        let project = rest
            .split('/')
            .find(|c| !c.is_empty())
            .and_then(decode_project_name);
        return (Scope::Project, project);
    }

    if path.starts_with(&marker_base) {
        return (Scope::Global, None);
    }

    if let Some(idx) = path.find(&format!("/{MARKER_DIR}/")) {
        let parent = last_component(&path[..idx]);
        return (Scope::Project, parent.map(str::to_string));
    }

    if last_component(path) == Some("CLAUDE.md") {
        let parent = Path::new(path).parent().and_then(|p| p.to_str()).unwrap_or("");
        if let Some(name) = last_component(parent) {
            return (Scope::Project, Some(name.to_string()));
        }
    }

    (Scope::Global, None)
}

/// `"<project>/<file>"` when a project is known, otherwise the file name.
#[must_use]
pub fn display_name(file: &str, project: Option<&str>) -> String {
    match project {
        Some(project) => format!("{project}/{file}"),
        None => file.to_string(),
    }
}

/// Last non-empty `/`-separated component, `None` for `""` and `"/"`.
fn last_component(path: &str) -> Option<&str> {
    path.rsplit('/').find(|c| !c.is_empty())
}
