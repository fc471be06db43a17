use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use chrono::Utc;
use common::{Language, Pagination, SubmissionStatus};
use console::style;
use cress_client::ClientContext;
use cress_client::workspace::ProblemWorkspace;

use crate::output;

pub async fn list(ctx: &ClientContext, page: u64, page_size: u64) -> anyhow::Result<()> {
    let problems = ctx
        .gateway
        .list_problems(page, page_size)
        .await
        .map_err(|e| anyhow::anyhow!(e.to_string()))?;
    for problem in &problems.items {
        println!(
            "{:<6} {:<40} {}  {}",
            problem.id,
            problem.title,
            problem.difficulty,
            problem.tags_line(),
        );
    }
    let pagination = Pagination::new(page, page_size, problems.total);
    println!(
        "page {}/{} ({} problems)",
        pagination.page,
        pagination.total_pages(),
        pagination.total
    );
    Ok(())
}

pub async fn show(ctx: &ClientContext, id: i64) -> anyhow::Result<()> {
    let problem = ctx
        .gateway
        .get_problem(id)
        .await
        .map_err(|e| anyhow::anyhow!(e.to_string()))?;
    println!("{}", style(&problem.title).bold());
    if let (Some(time), Some(memory)) = (problem.time_limit, problem.memory_limit) {
        println!("time {time} ms / memory {memory} MB");
    }
    if !problem.tags.is_empty() {
        println!("tags: {}", problem.tags_line());
    }
    println!("\n{}", problem.description);
    Ok(())
}

async fn open_workspace(
    ctx: &ClientContext,
    problem: i64,
    contest: Option<i64>,
    order: Option<usize>,
) -> anyhow::Result<ProblemWorkspace> {
    let workspace = match (contest, order) {
        (Some(contest_id), Some(order)) => ProblemWorkspace::open_contest(
            Arc::clone(&ctx.gateway),
            Arc::clone(&ctx.access),
            contest_id,
            order,
        )
        .await,
        _ => ProblemWorkspace::open_problem(Arc::clone(&ctx.gateway), problem, contest).await,
    };
    workspace.map_err(|e| anyhow::anyhow!(e.to_string()))
}

pub async fn submit(
    ctx: &ClientContext,
    problem: i64,
    file: &Path,
    language: &str,
    contest: Option<i64>,
    order: Option<usize>,
) -> anyhow::Result<()> {
    let language: Language = language.parse()?;
    let code = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let workspace = open_workspace(ctx, problem, contest, order).await?;
    workspace.set_language(language);
    workspace.set_code(code);

    match workspace.submit(Utc::now()).await {
        Ok(route) => {
            println!("Submitted. Follow along at {route}");
            Ok(())
        }
        Err(e) => Err(anyhow::anyhow!(e.to_string())),
    }
}

pub async fn run(
    ctx: &ClientContext,
    problem: i64,
    file: &Path,
    language: &str,
    input: Option<&Path>,
) -> anyhow::Result<()> {
    let language: Language = language.parse()?;
    let code = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let input = match input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            use std::io::Read;
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let workspace = open_workspace(ctx, problem, None, None).await?;
    workspace.set_language(language);
    workspace.set_code(code);

    match workspace.run(&input, Utc::now()).await {
        Ok(response) => {
            if let Some(status) = response.status {
                let status: SubmissionStatus = status.into();
                println!("{}", output::status_badge(&status));
            }
            if let Some(stdout) = response.output {
                println!("{stdout}");
            }
            Ok(())
        }
        Err(e) => Err(anyhow::anyhow!(e.to_string())),
    }
}
