use std::io::BufRead;
use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::api::FlyerApi;
use crate::catalog::load_catalog;
use crate::config::ClientConfig;
use crate::output::Emitter;
use crate::render;
use crate::session::pipeline;
use crate::session::{App, AppEvent, Command};
use crate::telemetry::{self};
use crate::telemetry::ops::browse::Phase as BrowsePhase;

/// flyerplan browse: pick flyers by id from stdin, one session at a time
#[derive(Args, Debug)]
pub struct BrowseCmd {}

#[derive(Debug, Clone, PartialEq)]
enum Input {
    Select(Option<i64>),
    Quit,
}

fn parse_input(line: &str) -> Input {
    match line.trim() {
        "q" | "quit" | "exit" => Input::Quit,
        other => Input::Select(other.parse().ok()),
    }
}

pub async fn run(api: Arc<dyn FlyerApi>, cfg: &ClientConfig, _args: BrowseCmd, out: &mut Emitter) -> Result<()> {
    let log = telemetry::browse();
    let (input_tx, input_rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || read_stdin(input_tx));
    log.info("Type a flyer id and press enter (q to quit).");

    let mut app = App::new();
    drive(&mut app, api, &cfg.postal_code, input_rx, out).await
}

// Plain thread: a blocked stdin read must not hold up runtime shutdown.
fn read_stdin(tx: UnboundedSender<String>) {
    for line in std::io::stdin().lock().lines() {
        let Ok(line) = line else { break };
        if tx.send(line).is_err() {
            break;
        }
    }
}

/// The client event loop. Owns `app`; applies one event at a time and
/// re-renders after each. Ends once input is closed and nothing is in flight.
pub async fn drive(
    app: &mut App,
    api: Arc<dyn FlyerApi>,
    postal_code: &str,
    mut input: UnboundedReceiver<String>,
    out: &mut Emitter,
) -> Result<()> {
    let log = telemetry::browse();
    let (progress_tx, mut progress_rx) = mpsc::unbounded_channel::<AppEvent>();

    out.emit("browse", &render::render(app))?;
    let catalog = load_catalog(api.as_ref(), postal_code).await;
    app.handle(AppEvent::CatalogLoaded(catalog));
    out.emit("browse", &render::render(app))?;

    let mut input_open = true;
    loop {
        if !input_open && !app.in_flight() {
            break;
        }
        let event = tokio::select! {
            line = input.recv(), if input_open => {
                let _s = log.span(&BrowsePhase::Input).entered();
                match line.as_deref().map(parse_input) {
                    Some(Input::Select(id)) => {
                        if app.in_flight() {
                            log.info_kv("selection ignored while processing", [("input", format!("{id:?}"))]);
                            continue;
                        }
                        AppEvent::Select(id)
                    }
                    Some(Input::Quit) | None => {
                        input_open = false;
                        continue;
                    }
                }
            }
            Some(ev) = progress_rx.recv() => ev,
        };

        let cmd = {
            let _s = log.span(&BrowsePhase::Event).entered();
            app.handle(event)
        };
        if let Some(cmd) = cmd {
            spawn_session(cmd, api.clone(), postal_code.to_string(), progress_tx.clone());
        }
        let _s = log.span(&BrowsePhase::Render).entered();
        out.emit("browse", &render::render(app))?;
    }
    Ok(())
}

fn spawn_session(cmd: Command, api: Arc<dyn FlyerApi>, postal_code: String, tx: UnboundedSender<AppEvent>) {
    let Command::RunPipeline { token, flyer } = cmd;
    tokio::spawn(async move {
        let stage_tx = tx.clone();
        let outcome = pipeline::run_pipeline(api.as_ref(), &flyer, &postal_code, |stage| {
            let _ = stage_tx.send(AppEvent::StageStarted { token, stage });
        })
        .await
        .map_err(|e| e.user_message());
        let _ = tx.send(AppEvent::Finished { token, outcome });
    });
}
