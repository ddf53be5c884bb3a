//! Todo form demo binary
//!
//! Reads lines from stdin, types each one into the form a character at a
//! time, submits it, and prints the action the host store received.

use std::sync::Arc;
use todo_form::{FormConfig, FormError, TodoForm, action_log_store, bind_add_todo};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todo_form=info,todo_form_runtime=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = FormConfig::from_env();
    tracing::info!(?config, "Starting todo form");

    let host = action_log_store();
    let form = TodoForm::mount(config.clone(), Arc::new(bind_add_todo(&host)));

    println!("=== Todo Form ===");
    println!("Type a todo and press enter. Ctrl-D to quit.\n");
    println!("{}", form.view().await);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        for (idx, ch) in line.char_indices() {
            form.on_change_text(&line[..idx + ch.len_utf8()]).await?;
        }
        println!("{}", form.view().await);

        match form.on_submit().await {
            Ok(event) => {
                tracing::debug!(default_prevented = event.default_prevented(), "Submitted");
            },
            Err(FormError::Dispatch(error)) => {
                println!("!!! {error}");
                continue;
            },
            Err(error) => return Err(error.into()),
        }

        if let Some(action) = host.state(|s| s.actions.last().cloned()).await {
            println!(">>> {}", action.to_json(config.envelope)?);
        }
        println!("{}", form.view().await);
    }

    let received = host.state(|s| s.actions.len()).await;
    println!("\nHost received {received} action(s)");

    form.unmount().await?;
    host.shutdown(config.shutdown_timeout()).await?;

    Ok(())
}
