//! `create-release`: create one fix-version per project key.

use crate::ci::{StepOutputs, StepSummary, write_report};
use crate::cli::{CreateReleaseArgs, RuntimeConfig};
use crate::error::Result;
use crate::jira::JiraClient;
use crate::release::{ReleaseOrchestrator, RunReport};

/// Execute the release command, returning the process exit code
pub(super) async fn execute_release(args: &CreateReleaseArgs, config: &RuntimeConfig) -> Result<i32> {
    let tracker = args.tracker_config()?;
    let policy = args.retry.policy()?;
    let request = args.release_request()?;

    let mut summary = StepSummary::new(args.sinks.summary_file.clone());
    let outputs = StepOutputs::new(args.sinks.output_file.clone());

    let initial_vars = vec![
        format!("JIRA_URL: {}", tracker.web_url),
        format!("JIRA_API_URL: {}", tracker.api_url),
        format!("JIRA_PROJECT_KEY: {}", request.project_keys().join(",")),
        format!("JIRA_RELEASE_IDENTIFIER: {}", request.identifier()),
        format!("JIRA_RELEASE_NOW: {}", request.release_now()),
    ];
    let _ = config.output().section("Initial Vars");
    for line in &initial_vars {
        config.indent(line);
    }
    summary.add_heading(1, "Initial Vars").add_list(&initial_vars);

    config.println(&format!(
        "🚀 Creating release {} in {} project(s)...",
        request.identifier(),
        request.project_keys().len()
    ));

    let orchestrator = ReleaseOrchestrator::new(JiraClient::new(tracker, policy)?);
    let report = match orchestrator.create_releases(&request).await {
        Ok(report) => report,
        Err(e) => {
            summary
                .add_heading(1, "Release aborted")
                .add_raw(&format!("`{}`\n", e));
            summary.write()?;
            return Err(e);
        }
    };

    for entry in report.entries() {
        let _ = config.output().outcome(entry);
    }

    if let Some(path) = &args.report_file {
        write_report(path, &report)?;
    }

    write_generated_vars(&report, &mut summary, &outputs)?;
    summary.write()?;

    match report.failure_message() {
        Some(message) => {
            config.error_println(&message);
            Ok(1)
        }
        None => {
            config.success_println("🎉 All releases created");
            Ok(0)
        }
    }
}

/// Record the run in the job summary and single-valued step outputs
fn write_generated_vars(
    report: &RunReport,
    summary: &mut StepSummary,
    outputs: &StepOutputs,
) -> Result<()> {
    summary
        .add_heading(1, "Generated Vars")
        .add_release_table(report)
        .add_raw(&format!(
            "_Generated {}_\n",
            chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
        ));

    if let Some(release) = report.final_release() {
        outputs.set("JIRA_RELEASE_NAME", release.name)?;
        outputs.set("JIRA_VERSION_URL", release.url)?;
    }
    outputs.set("JIRA_RELEASE_STATUS", report.status().as_str())?;

    if let Some(message) = report.failure_message() {
        outputs.set("JIRA_RELEASE_FAILURE", &message)?;
    }
    Ok(())
}
