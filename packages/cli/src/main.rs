mod commands;
mod output;

use anyhow::Context;
use clap::{Parser, Subcommand};
use cress_client::{ClientConfig, ClientContext};

#[derive(Parser)]
#[command(name = "cress", version, about = "Terminal client for the Cress online judge")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sign in and keep the session for this run.
    Login {
        username: String,
    },
    /// Create an account.
    Register {
        username: String,
        /// Account role requested at registration.
        #[arg(long, default_value = "STUDENT")]
        role: String,
    },
    /// Change the account password.
    Passwd,
    /// Sign out and drop cached contest access.
    Logout,
    /// Show the signed-in user.
    Me,
    /// List problems.
    Problems {
        #[arg(long, default_value_t = 1)]
        page: u64,
        #[arg(long, default_value_t = 20)]
        page_size: u64,
    },
    /// Show one problem.
    Problem {
        id: i64,
    },
    /// Submit a source file.
    Submit {
        #[arg(long)]
        problem: i64,
        #[arg(long)]
        file: std::path::PathBuf,
        #[arg(long)]
        language: String,
        /// Submit within a contest (the problem is looked up by order).
        #[arg(long)]
        contest: Option<i64>,
        /// Problem index inside the contest.
        #[arg(long)]
        order: Option<usize>,
    },
    /// Run a source file against custom input.
    Run {
        #[arg(long)]
        problem: i64,
        #[arg(long)]
        file: std::path::PathBuf,
        #[arg(long)]
        language: String,
        /// Input file; stdin when omitted.
        #[arg(long)]
        input: Option<std::path::PathBuf>,
    },
    /// List submissions, optionally polling until interrupted.
    Submissions {
        #[arg(long)]
        contest: Option<i64>,
        #[arg(long, default_value_t = 20)]
        limit: u32,
        /// Keep polling and repaint on changes.
        #[arg(long)]
        watch: bool,
    },
    /// Show one submission, with the wrong-answer diff when available.
    Submission {
        id: i64,
    },
    /// List contests.
    Contests {
        #[arg(long, default_value_t = 1)]
        page: u64,
        #[arg(long, default_value_t = 20)]
        page_size: u64,
        /// Filter contests by name.
        #[arg(long)]
        filter: Option<String>,
    },
    /// Enter a contest, prompting for a password when required.
    Join {
        id: i64,
    },
    /// Show a contest leaderboard.
    Leaderboard {
        id: i64,
        #[arg(long, default_value_t = 1)]
        page: u64,
        #[arg(long, default_value_t = 20)]
        page_size: u64,
        /// Sort column: rank or score.
        #[arg(long, default_value = "rank")]
        sort: String,
        /// asc or desc.
        #[arg(long, default_value = "desc")]
        order: String,
    },
    /// Download a contest export.
    Export {
        id: i64,
        #[arg(long)]
        output: Option<std::path::PathBuf>,
    },
    /// Show or change editor preferences.
    Prefs {
        #[command(subcommand)]
        action: commands::prefs::PrefsAction,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_target(false).init();

    let config = ClientConfig::load().context("Failed to load config")?;
    let ctx = ClientContext::new(config).context("Failed to initialize client")?;
    ctx.start().await;

    let cli = Cli::parse();
    match cli.command {
        Command::Login { username } => commands::auth::login(&ctx, &username).await,
        Command::Register { username, role } => {
            commands::auth::register(&ctx, &username, &role).await
        }
        Command::Passwd => commands::auth::passwd(&ctx).await,
        Command::Logout => commands::auth::logout(&ctx).await,
        Command::Me => commands::auth::me(&ctx),
        Command::Problems { page, page_size } => {
            commands::problems::list(&ctx, page, page_size).await
        }
        Command::Problem { id } => commands::problems::show(&ctx, id).await,
        Command::Submit {
            problem,
            file,
            language,
            contest,
            order,
        } => commands::problems::submit(&ctx, problem, &file, &language, contest, order).await,
        Command::Run {
            problem,
            file,
            language,
            input,
        } => commands::problems::run(&ctx, problem, &file, &language, input.as_deref()).await,
        Command::Submissions {
            contest,
            limit,
            watch,
        } => commands::submissions::list(&ctx, contest, limit, watch).await,
        Command::Submission { id } => commands::submissions::show(&ctx, id).await,
        Command::Contests {
            page,
            page_size,
            filter,
        } => commands::contests::list(&ctx, page, page_size, filter.as_deref()).await,
        Command::Join { id } => commands::contests::join(&ctx, id).await,
        Command::Leaderboard {
            id,
            page,
            page_size,
            sort,
            order,
        } => commands::contests::leaderboard(&ctx, id, page, page_size, &sort, &order).await,
        Command::Export { id, output } => {
            commands::contests::export(&ctx, id, output.as_deref()).await
        }
        Command::Prefs { action } => commands::prefs::handle(&ctx, action).await,
    }
}
