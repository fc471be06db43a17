use anyhow::{Context, bail};
use console::style;
use cress_client::ClientContext;
use cress_client::access::{PasswordStrength, password_strength};
use dialoguer::Password;

pub async fn login(ctx: &ClientContext, username: &str) -> anyhow::Result<()> {
    let password = Password::new()
        .with_prompt("Password")
        .interact()
        .context("Failed to read password")?;

    // Audit header; resolution is best-effort and never blocks the login.
    ctx.resolve_identity().await;

    let user = ctx
        .auth
        .login(username, &password, None)
        .await
        .map_err(|e| anyhow::anyhow!(e.to_string()))?;
    println!("Signed in as {}", style(&user.username).bold());
    Ok(())
}

pub async fn register(ctx: &ClientContext, username: &str, role: &str) -> anyhow::Result<()> {
    let password = Password::new()
        .with_prompt("Password")
        .with_confirmation("Confirm password", "Passwords do not match")
        .interact()
        .context("Failed to read password")?;

    match password_strength(&password) {
        Some(PasswordStrength::Weak) => println!("{}", style("Password strength: weak").red()),
        Some(PasswordStrength::Medium) => {
            println!("{}", style("Password strength: medium").yellow())
        }
        Some(PasswordStrength::Strong) => {
            println!("{}", style("Password strength: strong").green())
        }
        None => bail!("Password must not be empty"),
    }

    ctx.resolve_identity().await;
    ctx.auth
        .register(username, &password, role, None)
        .await
        .map_err(|e| anyhow::anyhow!(e.to_string()))?;
    println!("Account created. Sign in with `cress login {username}`.");
    Ok(())
}

pub async fn passwd(ctx: &ClientContext) -> anyhow::Result<()> {
    let old = Password::new()
        .with_prompt("Current password")
        .interact()
        .context("Failed to read password")?;
    let new = Password::new()
        .with_prompt("New password")
        .with_confirmation("Confirm new password", "Passwords do not match")
        .interact()
        .context("Failed to read password")?;

    match password_strength(&new) {
        Some(PasswordStrength::Weak) => println!("{}", style("Password strength: weak").red()),
        Some(PasswordStrength::Medium) => {
            println!("{}", style("Password strength: medium").yellow())
        }
        Some(PasswordStrength::Strong) => {
            println!("{}", style("Password strength: strong").green())
        }
        None => bail!("Password must not be empty"),
    }

    ctx.auth
        .change_password(&old, &new)
        .await
        .map_err(|e| anyhow::anyhow!(e.to_string()))?;
    println!("Password changed.");
    Ok(())
}

pub async fn logout(ctx: &ClientContext) -> anyhow::Result<()> {
    ctx.auth.logout().await;
    println!("Signed out.");
    Ok(())
}

pub fn me(ctx: &ClientContext) -> anyhow::Result<()> {
    match ctx.auth.current_user() {
        Some(user) => {
            let role = if user.is_admin() { "admin" } else { "student" };
            println!("{} (id {}, {role})", style(&user.username).bold(), user.id);
            if user.banned {
                let reason = user.banned_reason.as_deref().unwrap_or("no reason given");
                println!("{}", style(format!("Banned: {reason}")).red());
            }
        }
        None => println!("Not signed in."),
    }
    Ok(())
}
