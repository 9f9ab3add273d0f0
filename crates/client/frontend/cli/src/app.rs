//! Glue code tying content loading, the planning session and the terminal together.
use std::io::{self, Write};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use tactics_content::{ConfigLoader, LoadedMap, MapLoader, SKIRMISH_MAP, TablesLoader};
use tactics_core::{Command, CursorOutcome, MapEvent, MoveCostTable, PlanningConfig};

use crate::config::CliConfig;
use crate::input::{InputDebouncer, KeyMapper};
use crate::session::{Session, SessionUpdate};
use crate::terminal;

const POLL_INTERVAL: Duration = Duration::from_millis(100);
const HELP: &str = "arrows/wasd move | enter/z confirm | esc quit";

pub struct CliApp {
    config: CliConfig,
    planning: PlanningConfig,
    session: Session,
}

pub struct CliAppBuilder {
    config: CliConfig,
    map: Option<LoadedMap>,
    table: Option<MoveCostTable>,
}

impl CliAppBuilder {
    pub fn new(config: CliConfig) -> Self {
        Self {
            config,
            map: None,
            table: None,
        }
    }

    /// Use this map instead of the configured map file.
    pub fn map(mut self, map: LoadedMap) -> Self {
        self.map = Some(map);
        self
    }

    /// Use this table instead of the configured move cost overrides.
    pub fn table(mut self, table: MoveCostTable) -> Self {
        self.table = Some(table);
        self
    }

    pub fn build(self) -> Result<CliApp> {
        let CliAppBuilder { config, map, table } = self;

        let planning = match &config.content.config_file {
            Some(path) => config.planning_overrides.apply(
                ConfigLoader::load(path)
                    .with_context(|| format!("loading planning config {}", path.display()))?,
            ),
            None => config.planning.clone(),
        };

        let table = match (table, &config.content.move_costs_file) {
            (Some(table), _) => table,
            (None, Some(path)) => TablesLoader::load(path)
                .with_context(|| format!("loading move costs {}", path.display()))?,
            (None, None) => MoveCostTable::standard().context("building standard move costs")?,
        };

        let map = match (map, &config.content.map_file) {
            (Some(map), _) => map,
            (None, Some(path)) => {
                MapLoader::load(path).with_context(|| format!("loading map {}", path.display()))?
            }
            (None, None) => MapLoader::parse(SKIRMISH_MAP).context("loading built-in map")?,
        };

        tracing::info!(
            budget = planning.move_budget,
            profile = %planning.move_profile,
            resolution = %planning.terrain_resolution,
            width = map.map.width(),
            height = map.map.height(),
            units = map.units.len(),
            "planning session ready"
        );

        let session = Session::new(map, &planning, Arc::new(table));
        Ok(CliApp {
            config,
            planning,
            session,
        })
    }
}

impl CliApp {
    pub fn builder(config: CliConfig) -> CliAppBuilder {
        CliAppBuilder::new(config)
    }

    pub fn planning(&self) -> &PlanningConfig {
        &self.planning
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Runs the configured script headless, or the interactive loop otherwise.
    pub fn run(mut self) -> Result<()> {
        tracing::info!("CLI client starting...");

        let result = match self.config.script.take() {
            Some(script) => self.run_script(&script, &mut io::stdout().lock()),
            None => self.run_interactive(),
        };

        tracing::info!("CLI client exiting");
        result
    }

    /// Feeds `commands` through the session, writing one line per command,
    /// then the final map and status line.
    pub fn run_script<W: Write>(&mut self, commands: &[Command], out: &mut W) -> Result<()> {
        for &command in commands {
            let update = self.session.handle_command(command)?;
            writeln!(out, "{}: {}", command, describe(&update))?;
            if self.config.input.echo_events {
                for event in &update.events {
                    writeln!(out, "  event: {}", describe_event(event))?;
                }
            }
        }

        for row in self.session.render_rows() {
            writeln!(out, "{}", row)?;
        }
        writeln!(out, "{}", self.session.status_line())?;
        Ok(())
    }

    fn run_interactive(&mut self) -> Result<()> {
        let mut stdout = terminal::init()?;
        let _guard = terminal::TerminalGuard;

        let mapper = KeyMapper::new();
        let mut debouncer = InputDebouncer::new(self.config.input.debounce);
        let mut message = HELP.to_string();
        let mut dirty = true;

        loop {
            if dirty {
                let status = self.session.status_line();
                terminal::draw(&mut stdout, &self.session.render_rows(), &[&status, &message])?;
                dirty = false;
            }

            if !event::poll(POLL_INTERVAL)? {
                continue;
            }
            let Event::Key(key) = event::read()? else {
                dirty = true;
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }

            let ctrl_c =
                key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL);
            if key.code == KeyCode::Esc || ctrl_c {
                break;
            }

            let Some(command) = mapper.command_for(key) else {
                continue;
            };
            if !debouncer.accept(Instant::now()) {
                tracing::trace!(%command, "debounced");
                continue;
            }

            let update = self.session.handle_command(command)?;
            message = describe(&update);
            dirty = true;
        }

        terminal::restore()?;
        Ok(())
    }
}

/// Human-readable summary of one processed command.
pub fn describe(update: &SessionUpdate) -> String {
    match &update.outcome {
        CursorOutcome::Ignored => "ignored".to_string(),
        CursorOutcome::Moved { to } => format!("cursor at {}", to),
        CursorOutcome::Blocked { attempted } => format!("{} is off the map", attempted),
        CursorOutcome::SelectionStarted { origin } => format!("planning from {}", origin),
        CursorOutcome::PathUpdated { to, cost } => format!("path to {} costs {}", to, cost),
        CursorOutcome::PathRejected { to, cost } => {
            format!("{} is out of reach (cost {})", to, cost)
        }
        CursorOutcome::Detached { to } => format!("{} does not touch the path", to),
        CursorOutcome::Committed(path) => match &update.execution {
            Some(Ok(execution)) if execution.is_stationary() => {
                format!("{} stays at {}", execution.unit, execution.from)
            }
            Some(Ok(execution)) => format!(
                "{} moved {} -> {} in {} steps",
                execution.unit, execution.from, execution.to, execution.steps
            ),
            Some(Err(err)) => format!("move failed: {}", err),
            None => format!("committed {}", path),
        },
    }
}

fn describe_event(event: &MapEvent) -> String {
    match event {
        MapEvent::UnitAdded { unit, position, .. } => format!("{} added at {}", unit, position),
        MapEvent::UnitRemoved { unit, position, .. } => {
            format!("{} removed from {}", unit, position)
        }
        MapEvent::UnitMoved { unit, from, to, .. } => {
            format!("{} moved {} -> {}", unit, from, to)
        }
        MapEvent::TerrainChanged {
            position,
            previous,
            current,
            ..
        } => format!("{} changed {} -> {}", position, previous, current),
    }
}
