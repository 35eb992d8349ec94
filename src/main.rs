use anyhow::Context;
use tokio::io::{self, AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinSet;
use tracing::{info, warn};

use chat_dispatcher::services::render::render_terminal;
use chat_dispatcher::{ClientConfig, HttpChatClient, PageState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = ClientConfig::from_env().context("invalid chat client configuration")?;
    let page = PageState::new();
    let client = HttpChatClient::new(&config);
    info!(endpoint = client.endpoint(), "chat client ready");

    let dispatcher = page.dispatcher(client, &config);

    // Print entries as they land, in append order.
    let mut appended = page.transcript.subscribe();
    let labels = config.labels.clone();
    let printer = tokio::spawn(async move {
        loop {
            match appended.recv().await {
                Ok(entry) => println!("{}", render_terminal(&entry, &labels)),
                Err(RecvError::Lagged(skipped)) => warn!(skipped, "transcript printer lagged"),
                Err(RecvError::Closed) => break,
            }
        }
    });

    let mut lines = BufReader::new(io::stdin()).lines();
    let mut in_flight = JoinSet::new();
    while let Some(line) = lines.next_line().await? {
        // Reap finished sends so the set only holds what is still pending.
        while let Some(done) = in_flight.try_join_next() {
            done?;
        }

        page.input.set(line).await;
        let Some(request) = dispatcher.capture().await else {
            continue;
        };
        let dispatcher = dispatcher.clone();
        in_flight.spawn(async move { dispatcher.deliver(request).await });
    }

    // Stdin closed; let pending replies render before exiting.
    while let Some(done) = in_flight.join_next().await {
        done?;
    }
    drop(dispatcher);
    drop(page);
    printer.await?;
    Ok(())
}
