use std::sync::mpsc;

use anyhow::Result;

use crate::{
    api::ApiAdapter,
    cli::{Cli, Command},
    domain::clock,
    ui,
    usecases::{
        bootstrap::{self, Bootstrapped},
        contracts::NoopListener,
        shell::DefaultShellOrchestrator,
    },
};

pub fn run(cli: Cli) -> Result<()> {
    let Bootstrapped {
        context,
        log_guard: _log_guard,
    } = bootstrap::bootstrap(cli.config.as_deref())?;

    match cli.command_or_default() {
        Command::Run { peer } => {
            let (event_tx, event_rx) = mpsc::channel();
            let api = ApiAdapter::start(&context.config.api, event_tx)?;

            let now_ms = clock::now_unix_ms();
            let mut orchestrator = DefaultShellOrchestrator::new(
                api,
                NoopListener,
                context.config.messaging.engine_tunables(),
                now_ms,
            );
            orchestrator.start(peer.as_deref(), now_ms);

            let mut event_source = ui::event_source::CrosstermEventSource::new(event_rx);
            ui::shell::start(&context, &mut event_source, &mut orchestrator)
        }
    }
}
