use std::path::Path;

use anyhow::Context;
use chrono::Utc;
use console::style;
use cress_client::ClientContext;
use cress_client::access::{EntryOutcome, join_error_message};
use cress_client::leaderboard::{self, CellView, LeaderboardQuery, SortKey, SortOrder};
use cress_client::models::ContestSummary;
use dialoguer::Password;

use crate::output;

pub async fn list(
    ctx: &ClientContext,
    page: u64,
    page_size: u64,
    filter: Option<&str>,
) -> anyhow::Result<()> {
    let contests = match ctx.contests.load(page, page_size, filter).await {
        Ok(list) => list,
        Err(e) => {
            // Paint the cached listing when the refresh fails.
            let Some(cached) = ctx.contests.cached() else {
                return Err(anyhow::anyhow!(e.to_string()));
            };
            println!("{}", style("Showing cached listing; refresh failed.").dim());
            cached
        }
    };
    for contest in &contests.items {
        let lock = if contest.has_password { "locked" } else { "open" };
        println!(
            "{:<6} {:<32} {}  {}  {} participants  {} - {}",
            contest.id,
            contest.name,
            contest.rule,
            lock,
            contest.participant_count,
            contest.start_time.format("%Y-%m-%d %H:%M"),
            contest.end_time.format("%Y-%m-%d %H:%M"),
        );
    }
    println!("page {} ({} contests)", contests.page.max(page), contests.total);
    Ok(())
}

pub async fn join(ctx: &ClientContext, id: i64) -> anyhow::Result<()> {
    let contest = ctx
        .access
        .get_contest(id)
        .await
        .map_err(|e| anyhow::anyhow!(e.to_string()))?;
    let summary = ContestSummary {
        id: contest.id,
        name: contest.name.clone(),
        start_time: contest.start_time,
        end_time: contest.end_time,
        rule: contest.rule,
        has_password: contest.has_password,
        participant_count: contest.participant_count,
    };

    match ctx
        .access
        .enter(&summary, Utc::now())
        .await
        .map_err(|e| anyhow::anyhow!(e.to_string()))?
    {
        EntryOutcome::Navigate(route) => {
            println!("Joined {}. Contest page: {route}", contest.name);
            Ok(())
        }
        EntryOutcome::PasswordRequired => loop {
            let password = Password::new()
                .with_prompt("Contest password")
                .interact()
                .context("Failed to read password")?;
            match ctx
                .access
                .join(id, Some(password), contest.end_time, Utc::now())
                .await
            {
                Ok(()) => {
                    println!(
                        "Joined {}. Contest page: {}",
                        contest.name,
                        cress_client::Route::Contest { id }
                    );
                    return Ok(());
                }
                Err(e) => {
                    println!("{}", style(join_error_message(&e)).red());
                    if e.remaining_attempts().is_none() {
                        return Err(anyhow::anyhow!(e.to_string()));
                    }
                }
            }
        },
    }
}

pub async fn leaderboard(
    ctx: &ClientContext,
    id: i64,
    page: u64,
    page_size: u64,
    sort: &str,
    order: &str,
) -> anyhow::Result<()> {
    let contest = ctx
        .access
        .get_contest(id)
        .await
        .map_err(|e| anyhow::anyhow!(e.to_string()))?;

    let query = LeaderboardQuery {
        page,
        page_size,
        sort: match sort {
            "score" => SortKey::Score,
            _ => SortKey::Rank,
        },
        order: match order {
            "asc" => SortOrder::Asc,
            _ => SortOrder::Desc,
        },
    };
    let board = leaderboard::load(&ctx.gateway, &ctx.access, id, query)
        .await
        .map_err(|e| anyhow::anyhow!(e.to_string()))?;

    print!("{:<6} {:<20} {:>6}", "rank", "user", "score");
    for problem in &contest.problems {
        print!(" {:>8}", problem.title);
    }
    println!();

    for row in &board.items {
        print!("{:<6} {:<20} {:>6}", row.rank, row.username, row.score);
        for problem in &contest.problems {
            let cell = CellView::for_cell(board.score_visible, row.problem_score(problem.id));
            let styled = match &cell {
                CellView::Score { band, .. } => output::band_style(*band).apply_to(cell.text()),
                CellView::Attendance { submitted: true } => {
                    console::Style::new().green().apply_to(cell.text())
                }
                CellView::Attendance { submitted: false } => {
                    console::Style::new().dim().apply_to(cell.text())
                }
            };
            print!(" {styled:>8}");
        }
        println!();
    }
    println!("{} participants", board.total);
    Ok(())
}

pub async fn export(ctx: &ClientContext, id: i64, output: Option<&Path>) -> anyhow::Result<()> {
    let bytes = ctx
        .gateway
        .export_contest(id)
        .await
        .map_err(|e| anyhow::anyhow!(e.to_string()))?;
    let path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| format!("contest-{id}-export.zip").into());
    std::fs::write(&path, &bytes)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}
