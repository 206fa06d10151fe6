//! Storage-format body for release pages.

use crate::error::Result;
use crate::release::{OutcomeEntry, RunReport};
use handlebars::Handlebars;
use serde::Serialize;

const PAGE_TEMPLATE: &str = r#"<h1>{{title}}</h1>
{{#if releases}}<h2>Releases</h2>
<ul>
{{#each releases}}<li>{{#if url}}<a href="{{url}}">{{name}}</a>{{else}}{{name}}{{/if}}</li>
{{/each}}</ul>
{{else}}<p>No releases were created.</p>
{{/if}}{{#if failures}}<h2>Not released</h2>
<ul>
{{#each failures}}<li>{{this}}</li>
{{/each}}</ul>
{{/if}}"#;

/// One release linked from the page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleaseLink {
    /// Release name
    pub name: String,
    /// Link to the release, when known
    pub url: Option<String>,
}

impl ReleaseLink {
    /// Link without a URL (e.g. names passed between CI steps)
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: None,
        }
    }
}

#[derive(Serialize)]
struct PageData<'a> {
    title: &'a str,
    releases: &'a [ReleaseLink],
    failures: &'a [String],
}

/// Split a report into page links and failure lines
pub fn links_from_report(report: &RunReport) -> (Vec<ReleaseLink>, Vec<String>) {
    let mut links = Vec::new();
    let mut failures = Vec::new();
    for entry in report.entries() {
        match entry {
            OutcomeEntry::Released {
                release_name,
                release_url,
                ..
            } => links.push(ReleaseLink {
                name: release_name.clone(),
                url: Some(release_url.clone()),
            }),
            OutcomeEntry::Failed { .. } => {
                failures.extend(entry.failure_message());
            }
        }
    }
    (links, failures)
}

/// Render the page body; all values are HTML-escaped
pub fn render_release_page(
    title: &str,
    releases: &[ReleaseLink],
    failures: &[String],
) -> Result<String> {
    let mut registry = Handlebars::new();
    registry.register_template_string("release_page", PAGE_TEMPLATE)?;

    let data = PageData {
        title,
        releases,
        failures,
    };
    Ok(registry.render("release_page", &data)?)
}
