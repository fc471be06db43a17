use clap::Subcommand;
use cress_client::ClientContext;
use cress_client::models::Theme;

#[derive(Subcommand)]
pub enum PrefsAction {
    /// Print the current preferences.
    Get,
    /// Change preferences; omitted flags keep their value.
    Set {
        #[arg(long)]
        theme: Option<String>,
        #[arg(long)]
        font_family: Option<String>,
        #[arg(long)]
        font_size: Option<u32>,
        #[arg(long)]
        tab_size: Option<u32>,
        #[arg(long)]
        line_numbers: Option<bool>,
        #[arg(long)]
        fold_gutter: Option<bool>,
        #[arg(long)]
        match_brackets: Option<bool>,
    },
}

pub async fn handle(ctx: &ClientContext, action: PrefsAction) -> anyhow::Result<()> {
    match action {
        PrefsAction::Get => {
            let preferences = ctx.preferences.current();
            println!("{}", serde_json::to_string_pretty(&preferences)?);
            Ok(())
        }
        PrefsAction::Set {
            theme,
            font_family,
            font_size,
            tab_size,
            line_numbers,
            fold_gutter,
            match_brackets,
        } => {
            let theme = match theme.as_deref() {
                Some("light") => Some(Theme::Light),
                Some("dark") => Some(Theme::Dark),
                Some("system") => Some(Theme::System),
                Some(other) => anyhow::bail!("unknown theme '{other}'"),
                None => None,
            };
            let updated = ctx
                .preferences
                .update(|p| {
                    if let Some(theme) = theme {
                        p.theme = theme;
                    }
                    if let Some(font_family) = font_family {
                        p.font_family = font_family;
                    }
                    if let Some(font_size) = font_size {
                        p.font_size = font_size;
                    }
                    if let Some(tab_size) = tab_size {
                        p.tab_size = tab_size;
                    }
                    if let Some(line_numbers) = line_numbers {
                        p.line_numbers = line_numbers;
                    }
                    if let Some(fold_gutter) = fold_gutter {
                        p.fold_gutter = fold_gutter;
                    }
                    if let Some(match_brackets) = match_brackets {
                        p.match_brackets = match_brackets;
                    }
                })
                .await;
            println!("{}", serde_json::to_string_pretty(&updated)?);
            Ok(())
        }
    }
}
