//! `create-page`: publish a release page listing created releases.

use crate::ci::{StepOutputs, StepSummary, read_report};
use crate::cli::{CreatePageArgs, RuntimeConfig};
use crate::confluence::{
    PagePublisher, PageRequest, ReleaseLink, links_from_report, render_release_page,
};
use crate::error::Result;

/// Execute the page command, returning the process exit code
pub(super) async fn execute_page(args: &CreatePageArgs, config: &RuntimeConfig) -> Result<i32> {
    let page_config = args.page_config()?;
    let policy = args.retry.policy()?;

    let mut summary = StepSummary::new(args.sinks.summary_file.clone());
    let outputs = StepOutputs::new(args.sinks.output_file.clone());

    let (releases, failures) = page_content(args)?;
    let body = render_release_page(&args.title, &releases, &failures)?;

    let request = PageRequest {
        space_key: args.space_key.trim().to_string(),
        title: args.title.trim().to_string(),
    };
    let _ = config.output().info(&format!(
        "Publishing '{}' to space {}...",
        request.title, request.space_key
    ));

    let publisher = PagePublisher::new(page_config, policy)?;
    let page = publisher.publish(&request, body).await?;

    config.success_println(&format!("Page created under {}: {}", page.space_name, page.url));
    summary
        .add_heading(1, "Release Page")
        .add_list([
            format!("CONFLUENCE_SPACE: {}", page.space_name),
            format!("CONFLUENCE_PAGE_URL: {}", page.url),
        ]);
    summary.write()?;

    outputs.set("CONFLUENCE_PAGE_ID", &page.id)?;
    outputs.set("CONFLUENCE_PAGE_URL", &page.url)?;

    Ok(0)
}

/// Releases and failure lines from the report file, else from the name/URL lists
fn page_content(args: &CreatePageArgs) -> Result<(Vec<ReleaseLink>, Vec<String>)> {
    if let Some(path) = &args.report_file {
        let report = read_report(path)?;
        return Ok(links_from_report(&report));
    }

    let urls = args.release_urls();
    let releases = args
        .release_names()
        .into_iter()
        .enumerate()
        .map(|(index, name)| ReleaseLink {
            name,
            url: urls.get(index).cloned(),
        })
        .collect();
    Ok((releases, Vec::new()))
}
