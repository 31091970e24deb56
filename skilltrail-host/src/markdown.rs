//! Markdown-backed journey content.
//!
//! Each `*.md` file under the content root is one journey: a `---` fenced
//! front-matter block for the metadata, an optional leading paragraph for the
//! journey description, then one `## ` section per phase. Phase sections may
//! open with `key: value` lines (`xp`, `nft`, `mission`, `protocol`, `locked`,
//! `duration`, `icon`); the remaining prose is the phase description. The
//! engine's fill rules apply afterwards, so a phase without a mission or icon
//! renders the same as one loaded from the bundled catalog.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use skilltrail_engine::{ContentProvider, JourneyContent, JourneyMetadata, RawJourney, RawPhase};

/// Failure to read the content root or one of its entries.
#[derive(Debug, thiserror::Error)]
pub enum MarkdownError {
    #[error("cannot read journey content at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Journey provider that scans a directory of markdown files.
///
/// Files that fail to parse are logged and skipped so one malformed journey
/// does not take down the whole catalog; an unreadable root is an error.
#[derive(Debug, Clone)]
pub struct MarkdownContentProvider {
    root: PathBuf,
}

impl MarkdownContentProvider {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ContentProvider for MarkdownContentProvider {
    type Error = MarkdownError;

    fn load_journeys(&self) -> Result<Vec<JourneyContent>, Self::Error> {
        let entries = fs::read_dir(&self.root).map_err(|source| MarkdownError::Io {
            path: self.root.clone(),
            source,
        })?;

        let mut paths: Vec<PathBuf> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "md"))
            .collect();
        // Filename order keeps the catalog stable across platforms.
        paths.sort();

        let mut journeys = Vec::with_capacity(paths.len());
        for path in paths {
            let text = fs::read_to_string(&path).map_err(|source| MarkdownError::Io {
                path: path.clone(),
                source,
            })?;
            match parse_journey(&text) {
                Some(journey) => {
                    debug!("loaded journey '{}' from {}", journey.metadata.slug, path.display());
                    journeys.push(journey);
                }
                None => warn!("skipping malformed journey file {}", path.display()),
            }
        }
        Ok(journeys)
    }
}

/// Parse one journey document. Returns `None` when the front matter is
/// missing or has no title.
fn parse_journey(text: &str) -> Option<JourneyContent> {
    let (front, body) = split_front_matter(text)?;
    let fields = parse_key_values(front);
    let title = fields.get("title").filter(|t| !t.is_empty())?.clone();

    let field = |name: &str| fields.get(name).cloned().unwrap_or_default();
    let metadata = JourneyMetadata {
        title,
        subtitle: field("subtitle"),
        description: String::new(),
        icon: field("icon"),
        profile_type: field("persona"),
        target: field("target"),
        mission_type: fields.get("missionType").cloned(),
        slug: field("slug"),
        tagline: field("tagline"),
    };

    let (description, phases) = parse_body(body);
    let mut raw = RawJourney {
        metadata,
        phases,
        call_to_action: Vec::new(),
        rewards: Vec::new(),
        why_it_matters: field("whyItMatters"),
        final_role: field("finalRole"),
    };
    raw.metadata.description = description;
    Some(raw.into_content())
}

/// Split `---` fenced front matter from the rest of the document.
fn split_front_matter(text: &str) -> Option<(&str, &str)> {
    let rest = text.strip_prefix("---")?;
    let end = rest.find("\n---")?;
    let front = &rest[..end];
    let body = rest[end + 4..].trim_start_matches(['\r', '\n']);
    Some((front, body))
}

/// Parse consecutive `key: value` lines into a map. Lines without a colon
/// are ignored here; callers decide what to do with prose.
fn parse_key_values(block: &str) -> HashMap<String, String> {
    block
        .lines()
        .filter_map(|line| {
            let (key, value) = line.split_once(':')?;
            let key = key.trim();
            if key.is_empty() {
                return None;
            }
            Some((key.to_string(), value.trim().to_string()))
        })
        .collect()
}

/// Split the document body into the journey description and its `## ` phase
/// sections.
fn parse_body(body: &str) -> (String, Vec<RawPhase>) {
    let mut description_lines = Vec::new();
    let mut phases = Vec::new();
    let mut current: Option<(String, Vec<String>)> = None;

    for line in body.lines() {
        if let Some(heading) = line.strip_prefix("## ") {
            if let Some((title, lines)) = current.take() {
                phases.push(build_phase(title, &lines));
            }
            current = Some((heading.trim().to_string(), Vec::new()));
        } else if let Some((_, lines)) = current.as_mut() {
            lines.push(line.to_string());
        } else {
            description_lines.push(line);
        }
    }
    if let Some((title, lines)) = current.take() {
        phases.push(build_phase(title, &lines));
    }

    let description = description_lines.join("\n").trim().to_string();
    (description, phases)
}

/// Build a raw phase from a section: leading `key: value` lines become
/// fields, everything after them is the description.
fn build_phase(title: String, lines: &[String]) -> RawPhase {
    let mut phase = RawPhase {
        title,
        ..RawPhase::default()
    };

    let mut prose_start = 0;
    for (index, line) in lines.iter().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            prose_start = index + 1;
            continue;
        }
        let Some((key, value)) = trimmed.split_once(':') else {
            prose_start = index;
            break;
        };
        let value = value.trim();
        match key.trim() {
            "xp" | "xpReward" => phase.xp_reward = value.parse().ok(),
            "nft" | "nftReward" => phase.nft_reward = Some(value.to_string()),
            "mission" => phase.mission = Some(value.to_string()),
            "protocol" | "protocolPhase" => phase.protocol_phase = Some(value.to_string()),
            "locked" => phase.locked = value.parse().ok(),
            "duration" => phase.duration = Some(value.to_string()),
            "icon" => phase.icon = Some(value.to_string()),
            "name" => phase.name = Some(value.to_string()),
            other => {
                debug!("ignoring unknown phase field '{other}'");
            }
        }
        prose_start = index + 1;
    }

    phase.description = lines[prose_start.min(lines.len())..]
        .join("\n")
        .trim()
        .to_string();
    phase
}
