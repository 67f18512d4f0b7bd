//! Terminal order form: one screen, one submit action.

pub mod app;
pub mod ui;

use std::{io, time::Duration};

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tracing::info;

use crate::{exchange::OrderGateway, execution::OrderExecutor};

pub use app::{Field, FormAction, FormApp, FormStatus};

pub async fn run<G: OrderGateway>(executor: &OrderExecutor<G>) -> Result<()> {
    enable_raw_mode()?;
    let mut terminal = match enter_terminal() {
        Ok(terminal) => terminal,
        Err(e) => {
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            let _ = disable_raw_mode();
            return Err(e);
        }
    };

    let res = run_form(&mut terminal, executor).await;

    // Restore the terminal whatever happened in the loop
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn enter_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

async fn run_form<B: Backend, G: OrderGateway>(
    terminal: &mut Terminal<B>,
    executor: &OrderExecutor<G>,
) -> Result<()> {
    let mut app = FormApp::new();

    loop {
        terminal.draw(|f| ui::draw(f, &app))?;

        if !event::poll(Duration::from_millis(200))? {
            continue;
        }

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match app.handle_key(key) {
            FormAction::None => {}
            FormAction::Quit => break,
            FormAction::Submit => {
                app.begin_submit();
                terminal.draw(|f| ui::draw(f, &app))?;

                let outcome = executor.place_order(&app.to_raw_input()).await;
                info!(placed = outcome.is_some(), "Form submission finished");
                app.finish_submit(outcome);
            }
        }
    }

    Ok(())
}
