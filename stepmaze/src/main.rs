//! Interactive terminal driver: poll input, tick the session, redraw.

use std::time::Duration;

use log::Level;
use stepmaze_crossterm::{Input, TerminalView};
use stepmaze_lib::{Config, Outcome, Phase, Session, Status, StatusLine, StatusLog};

const USAGE: &str = "\
usage: stepmaze [--width N] [--height N] [--astar] [--seed N] [--delay MS]

  click  place start, then goal
  g      new maze
  r      clear search, pick new endpoints
  a      toggle A* / Dijkstra for the next search
  q, Esc quit
";

/// Poll interval while waiting on input.
const IDLE_POLL: Duration = Duration::from_millis(50);

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        print!("{USAGE}");
        return Ok(());
    }
    let config = Config::from_args(args)?;
    let status = StatusLog::install(Level::Info)?;
    let mut session = Session::new(config)?;

    let mut view = TerminalView::new();
    view.init()?;
    let result = run(&mut session, &mut view, &status);
    view.close();
    result
}

fn run(
    session: &mut Session,
    view: &mut TerminalView,
    status: &StatusLine,
) -> Result<(), Box<dyn std::error::Error>> {
    let delay = Duration::from_millis(session.config().tick_delay_ms);
    let mut busy = true;
    loop {
        let timeout = if busy { delay } else { IDLE_POLL };
        for input in view.poll_input(timeout)? {
            match input {
                Input::Quit => return Ok(()),
                Input::Regenerate => session.begin_generating()?,
                Input::Reset => session.begin_placing(),
                Input::ToggleAStar => {
                    let use_astar = !session.config().use_astar;
                    session.set_use_astar(use_astar);
                    log::info!("next search: {}", algorithm_name(use_astar));
                }
                Input::Select(p) => {
                    if session.phase() == Phase::Done {
                        session.begin_placing();
                    }
                    if session.select(p).is_ok() {
                        status.clear();
                    }
                }
            }
        }

        let ticked = session.tick();
        match ticked {
            Status::Found | Status::Unreachable => {
                log::info!("{}", describe(session.outcome()));
            }
            Status::Complete if session.phase() == Phase::Placing => {
                log::info!("maze ready, click a start cell");
            }
            _ => {}
        }
        busy = ticked != Status::Idle;

        let line = format!(
            "{:?} | {} | {}",
            session.phase(),
            algorithm_name(session.config().use_astar),
            status.latest().unwrap_or_default()
        );
        view.draw(session.grid(), session.start(), session.goal(), &line)?;
    }
}

fn algorithm_name(use_astar: bool) -> &'static str {
    if use_astar { "A*" } else { "Dijkstra" }
}

fn describe(outcome: Option<Outcome>) -> String {
    match outcome {
        Some(Outcome::Found { length, visited }) => {
            format!("path of {length} steps, {visited} cells visited")
        }
        Some(Outcome::Unreachable) => "goal unreachable".to_string(),
        Some(Outcome::BrokenPath) => "path trace broken".to_string(),
        None => String::new(),
    }
}
