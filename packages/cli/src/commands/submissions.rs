use std::sync::Arc;
use std::time::Duration;

use common::diff::DiffTag;
use console::style;
use cress_client::ClientContext;
use cress_client::feed::{FeedHandle, FeedScope};
use cress_client::submission_view::{self, DetailTab};

use crate::output;

pub async fn list(
    ctx: &ClientContext,
    contest: Option<i64>,
    limit: u32,
    watch: bool,
) -> anyhow::Result<()> {
    let scope = match contest {
        Some(id) => FeedScope::Contest(id),
        None => FeedScope::Global,
    };

    if !watch {
        let submissions = ctx
            .gateway
            .list_submissions(scope.contest_id(), Some(limit))
            .await
            .map_err(|e| anyhow::anyhow!(e.to_string()))?;
        for submission in &submissions {
            output::print_submission_row(submission);
        }
        return Ok(());
    }

    let period = Duration::from_millis(ctx.config.poll.submissions_ms);
    let feed = FeedHandle::start(Arc::clone(&ctx.gateway), scope, period, Some(limit));
    println!("{}", style("Polling; press Ctrl-C to stop.").dim());

    // Repaints when an id appears or a status transitions, covering the
    // pending-to-terminal flip.
    let mut last_rendered: Option<Vec<(i64, String)>> = None;
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            _ = tokio::time::sleep(period) => {
                let latest = feed.latest();
                let fingerprint: Vec<(i64, String)> = latest
                    .iter()
                    .map(|s| (s.id, s.status.to_string()))
                    .collect();
                if last_rendered.as_ref() != Some(&fingerprint) {
                    println!();
                    for submission in &latest {
                        output::print_submission_row(submission);
                    }
                    last_rendered = Some(fingerprint);
                }
            }
        }
    }
    feed.stop();
    Ok(())
}

pub async fn show(ctx: &ClientContext, id: i64) -> anyhow::Result<()> {
    let submission = ctx
        .gateway
        .get_submission(id)
        .await
        .map_err(|e| anyhow::anyhow!(e.to_string()))?;

    output::print_submission_row(&submission);

    match submission_view::default_tab(&submission) {
        DetailTab::TestPoints => {
            for case in &submission.test_case_results {
                let time = case
                    .time_used
                    .map(|t| format!("{t} ms"))
                    .unwrap_or_else(|| "-".to_string());
                println!("  case {:<4} {:<20} {}", case.id, output::status_badge(&case.status), time);

                if case.shows_output() {
                    if let Some(diff) = submission_view::wrong_answer_diff(case) {
                        println!(
                            "    {} same, {} different",
                            diff.same, diff.different
                        );
                        for line in &diff.lines {
                            match line.tag {
                                DiffTag::Added => {
                                    println!("    {}", style(format!("+ {}", line.text)).green())
                                }
                                DiffTag::Removed => {
                                    println!("    {}", style(format!("- {}", line.text)).red())
                                }
                                DiffTag::Same => println!("      {}", line.text),
                            }
                        }
                    } else if let Some(stdout) = &case.output {
                        println!("    {stdout}");
                    }
                }
            }
        }
        DetailTab::SourceCode => {
            if let Some(code) = &submission.code {
                println!("\n{code}");
            }
        }
    }
    Ok(())
}
