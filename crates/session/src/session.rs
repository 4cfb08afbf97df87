use glam::Vec3;
use mazerun_common::{CellCoord, MazeError, MazeId};
use mazerun_input::Action;
use mazerun_kernel::{Maze, MazeGenerator, SeededRng};
use mazerun_nav::{NavError, Navigator, Path};
use mazerun_render::{CellLayout, Minimap};

use crate::{Bonuses, ConfigError, Countdown, GameConfig, PowerupKind, Powerups};

/// Mixed into a maze seed so powerup draws do not replay the carve draws.
const POWERUP_SEED_SALT: u64 = 0x9e37_79b9_7f4a_7c15;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Maze(#[from] MazeError),
    #[error(transparent)]
    Nav(#[from] NavError),
}

/// Something the front end should react to.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    CellEntered(CellCoord),
    PathUpdated { destination: CellCoord, hops: usize },
    GoalReached { maze: MazeId },
    PowerupCollected { cell: CellCoord, kind: PowerupKind, bonus: f32 },
    MazeRegenerated { maze: MazeId, width: usize, depth: usize },
    TimeUp,
}

/// A running game: the current maze plus everything bound to it.
pub struct GameSession {
    config: GameConfig,
    base_seed: u64,
    level: u64,
    maze: Maze,
    navigator: Navigator,
    layout: CellLayout,
    minimap: Minimap,
    countdown: Countdown,
    powerups: Powerups,
    bonuses: Bonuses,
    spawn: Vec3,
    goal_reached: bool,
    pending: Vec<SessionEvent>,
}

impl GameSession {
    /// Generate the first maze and place the player on its start cell.
    ///
    /// Without a seed one is drawn from entropy; maze `n` of the session is
    /// carved with `seed + n`. Events from entering the start cell are held
    /// until [`take_events`](Self::take_events).
    pub fn new(config: GameConfig, seed: Option<u64>) -> Result<Self, SessionError> {
        config.validate()?;
        let base_seed = seed.unwrap_or_else(|| SeededRng::from_entropy().seed());
        let _span = tracing::info_span!("session_start", base_seed).entered();

        let maze = generate(&config, config.width, config.depth, base_seed)?;
        let powerups = scatter(&config, &maze, base_seed);
        let navigator = Navigator::new(&maze);
        let layout = CellLayout::for_grid(config.layout, maze.grid());
        let minimap = Minimap::for_maze(config.minimap_size, &maze);
        let spawn = layout.cell_to_world(maze.start());

        let mut session = Self {
            countdown: Countdown::new(config.timer_secs),
            config,
            base_seed,
            level: 0,
            maze,
            navigator,
            layout,
            minimap,
            powerups,
            bonuses: Bonuses::default(),
            spawn,
            goal_reached: false,
            pending: Vec::new(),
        };
        session.pending = session.enter_spawn()?;
        Ok(session)
    }

    /// Drain events produced outside [`handle`](Self::handle), such as the
    /// initial spawn.
    pub fn take_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.pending)
    }

    /// The validated config the session was started with.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The current maze, with the active path marked on it.
    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    /// The navigator bound to the current maze.
    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// World layout of the current maze.
    pub fn layout(&self) -> &CellLayout {
        &self.layout
    }

    /// Minimap of the current maze.
    pub fn minimap(&self) -> &Minimap {
        &self.minimap
    }

    /// Time left to finish the current maze.
    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    /// Powerups still waiting in the current maze.
    pub fn powerups(&self) -> &Powerups {
        &self.powerups
    }

    /// Bonuses collected over the whole session.
    pub fn bonuses(&self) -> Bonuses {
        self.bonuses
    }

    /// Number of resets so far.
    pub fn level(&self) -> u64 {
        self.level
    }

    /// World position of the current maze's start cell.
    pub fn spawn_point(&self) -> Vec3 {
        self.spawn
    }

    /// `true` once the countdown has run out.
    pub fn is_over(&self) -> bool {
        self.countdown.is_expired()
    }

    /// Apply one player action. Ignored once time is up.
    pub fn handle(&mut self, action: Action) -> Result<Vec<SessionEvent>, SessionError> {
        if self.is_over() {
            tracing::debug!(?action, "time is up, action ignored");
            return Ok(Vec::new());
        }
        match action {
            Action::MoveTo(pos) => match self.layout.world_to_cell(pos) {
                Ok(cell) => self.move_to(cell),
                Err(err) => {
                    tracing::debug!(%err, "player outside the grid");
                    Ok(Vec::new())
                }
            },
            Action::ClickMinimap { x, y } => match self.minimap.tile_at(x, y) {
                Ok(cell) => self.set_destination(cell),
                Err(_) => Ok(Vec::new()),
            },
            Action::SetDestination(cell) => self.set_destination(cell),
            Action::Reset => self.reset(),
            Action::Noop => Ok(Vec::new()),
        }
    }

    /// Advance the countdown by `dt` seconds.
    pub fn tick(&mut self, dt: f32) -> Option<SessionEvent> {
        if self.countdown.tick(dt) {
            tracing::info!(level = self.level, "time is up");
            Some(SessionEvent::TimeUp)
        } else {
            None
        }
    }

    /// Replace the maze with a bigger one and grant more time.
    ///
    /// Uncollected powerups go with the old maze; the new one gets its own.
    pub fn reset(&mut self) -> Result<Vec<SessionEvent>, SessionError> {
        let cap = self.config.max_dimension;
        let width = (self.maze.width() + self.config.growth).min(cap);
        let depth = (self.maze.depth() + self.config.growth).min(cap);
        let level = self.level + 1;
        let _span = tracing::info_span!("session_reset", level, width, depth).entered();

        let seed = self.base_seed.wrapping_add(level);
        let maze = generate(&self.config, width, depth, seed)?;
        self.level = level;
        self.maze = maze;
        self.powerups = scatter(&self.config, &self.maze, seed);
        self.navigator.rebind(&self.maze);
        self.layout = CellLayout::for_grid(self.config.layout, self.maze.grid());
        self.minimap = Minimap::for_maze(self.config.minimap_size, &self.maze);
        self.spawn = self.layout.cell_to_world(self.maze.start());
        self.countdown.add(self.config.timer_secs);
        self.goal_reached = false;

        let mut events = vec![SessionEvent::MazeRegenerated {
            maze: self.maze.id(),
            width,
            depth,
        }];
        events.extend(self.enter_spawn()?);
        Ok(events)
    }

    fn enter_spawn(&mut self) -> Result<Vec<SessionEvent>, SessionError> {
        let start = self.maze.start();
        self.move_to(start)
    }

    fn move_to(&mut self, cell: CellCoord) -> Result<Vec<SessionEvent>, SessionError> {
        let Some(path) = self.navigator.player_entered(&mut self.maze, cell)? else {
            return Ok(Vec::new());
        };
        let mut events = vec![SessionEvent::CellEntered(cell), path_event(path)];
        if let Some(kind) = self.powerups.take(cell) {
            let bonus = self.config.powerups.bonus;
            self.bonuses.apply(kind, bonus);
            tracing::info!(%cell, ?kind, bonus, "powerup collected");
            events.push(SessionEvent::PowerupCollected { cell, kind, bonus });
        }
        if cell == self.maze.end() && !self.goal_reached {
            self.goal_reached = true;
            tracing::info!(level = self.level, "goal reached");
            events.push(SessionEvent::GoalReached {
                maze: self.maze.id(),
            });
        }
        Ok(events)
    }

    fn set_destination(&mut self, cell: CellCoord) -> Result<Vec<SessionEvent>, SessionError> {
        Ok(self
            .navigator
            .set_destination(&mut self.maze, cell)?
            .map(path_event)
            .into_iter()
            .collect())
    }
}

fn generate(config: &GameConfig, width: usize, depth: usize, seed: u64) -> Result<Maze, MazeError> {
    Ok(MazeGenerator::new(width, depth, config.generator.clone())?.generate_seeded(seed))
}

fn scatter(config: &GameConfig, maze: &Maze, seed: u64) -> Powerups {
    let mut rng = SeededRng::new(seed ^ POWERUP_SEED_SALT);
    Powerups::scatter(maze.grid(), maze.start(), config.powerups.count, &mut rng)
}

fn path_event(path: &Path) -> SessionEvent {
    SessionEvent::PathUpdated {
        destination: path.destination().unwrap_or_default(),
        hops: path.hops(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mazerun_tools::validate;

    fn config() -> GameConfig {
        GameConfig {
            width: 8,
            depth: 6,
            growth: 2,
            max_dimension: 11,
            ..GameConfig::default()
        }
    }

    fn session(seed: u64) -> GameSession {
        GameSession::new(config(), Some(seed)).unwrap()
    }

    fn world(session: &GameSession, cell: CellCoord) -> Vec3 {
        session.layout().cell_to_world(cell)
    }

    #[test]
    fn starts_with_path_to_end() {
        let session = session(1);
        let maze = session.maze();
        assert_eq!(maze.seed(), Some(1));
        assert_eq!(session.spawn_point(), Vec3::ZERO);
        assert_eq!(session.navigator().player(), Some(maze.start()));
        assert_eq!(session.navigator().stats().recomputes, 1);
        assert!(maze.grid()[maze.start()].is_on_path());
        assert!(maze.grid()[maze.end()].is_on_path());
        assert!(validate(maze).is_empty());
    }

    #[test]
    fn same_seed_same_maze() {
        let a = session(5);
        let b = session(5);
        assert_eq!(a.maze().grid(), b.maze().grid());
        assert_ne!(a.maze().id(), b.maze().id());
    }

    #[test]
    fn moving_inside_a_cell_does_not_recompute() {
        let mut session = session(2);
        let nudge = world(&session, CellCoord::new(0, 0)) + Vec3::new(3.0, 1.0, -2.0);
        let events = session.handle(Action::MoveTo(nudge)).unwrap();
        assert!(events.is_empty());
        assert_eq!(session.navigator().stats().recomputes, 1);
    }

    #[test]
    fn walking_the_path_reaches_the_goal_once() {
        let mut session = session(3);
        let cells = session
            .navigator()
            .last_path()
            .unwrap()
            .cells()
            .to_vec();

        let mut goals = 0;
        for (step, &cell) in cells.iter().enumerate().skip(1) {
            let events = session.handle(Action::MoveTo(world(&session, cell))).unwrap();
            assert!(events.contains(&SessionEvent::CellEntered(cell)));
            assert!(events.contains(&SessionEvent::PathUpdated {
                destination: session.maze().end(),
                hops: cells.len() - 1 - step,
            }));
            goals += events
                .iter()
                .filter(|e| matches!(e, SessionEvent::GoalReached { .. }))
                .count();
        }
        assert_eq!(goals, 1);

        // Stepping back and forth on the goal does not fire again.
        let prev = cells[cells.len() - 2];
        let end = session.maze().end();
        session.handle(Action::MoveTo(world(&session, prev))).unwrap();
        let events = session.handle(Action::MoveTo(world(&session, end))).unwrap();
        assert!(!events.iter().any(|e| matches!(e, SessionEvent::GoalReached { .. })));
    }

    #[test]
    fn leaving_the_grid_is_ignored() {
        let mut session = session(4);
        let events = session
            .handle(Action::MoveTo(Vec3::new(-100.0, 0.0, 0.0)))
            .unwrap();
        assert!(events.is_empty());
        assert_eq!(session.navigator().player(), Some(CellCoord::new(0, 0)));
    }

    #[test]
    fn minimap_click_sets_destination() {
        let mut session = session(6);
        let target = if session.maze().end() == CellCoord::new(5, 4) {
            CellCoord::new(4, 4)
        } else {
            CellCoord::new(5, 4)
        };
        let (px, py) = session.minimap().tile_center(target);
        let events = session
            .handle(Action::ClickMinimap { x: px, y: py })
            .unwrap();
        assert_eq!(events.len(), 1);
        assert!(matches!(
            events[0],
            SessionEvent::PathUpdated { destination, .. } if destination == target
        ));
        assert_eq!(session.navigator().destination(), target);
        assert!(session.maze().grid()[target].is_on_path());
    }

    #[test]
    fn minimap_miss_is_ignored() {
        let mut session = session(6);
        let width = session.minimap().pixel_width();
        let events = session
            .handle(Action::ClickMinimap { x: width + 1.0, y: 0.0 })
            .unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn explicit_destination_is_bounds_checked() {
        let mut session = session(7);
        let err = session
            .handle(Action::SetDestination(CellCoord::new(8, 0)))
            .unwrap_err();
        assert!(matches!(
            err,
            SessionError::Nav(NavError::Maze(MazeError::OutOfBounds { .. }))
        ));
    }

    #[test]
    fn reset_builds_an_independent_bigger_maze() {
        let mut session = session(8);
        let old_id = session.maze().id();
        session.handle(Action::SetDestination(CellCoord::new(7, 5))).unwrap();
        session.tick(10.0);

        let events = session.handle(Action::Reset).unwrap();
        let maze = session.maze();
        assert_ne!(maze.id(), old_id);
        assert_eq!((maze.width(), maze.depth()), (10, 8));
        assert_eq!(maze.seed(), Some(9));
        assert_eq!(session.level(), 1);
        assert!(matches!(
            events[0],
            SessionEvent::MazeRegenerated { width: 10, depth: 8, .. }
        ));

        // Navigator follows the new maze from its start to its end.
        assert_eq!(session.navigator().maze_id(), maze.id());
        assert_eq!(session.navigator().destination(), maze.end());
        let path = session.navigator().last_path().unwrap();
        let mut marked = maze.grid().path_cells();
        marked.sort();
        let mut expected = path.cells().to_vec();
        expected.sort();
        assert_eq!(marked, expected);
        assert!(validate(maze).is_empty());

        assert_eq!(session.countdown().remaining(), 110.0);
    }

    #[test]
    fn growth_stops_at_max_dimension() {
        let mut session = session(9);
        for _ in 0..3 {
            session.reset().unwrap();
        }
        let maze = session.maze();
        assert_eq!((maze.width(), maze.depth()), (11, 11));
    }

    #[test]
    fn time_up_fires_once_and_freezes_input() {
        let mut session = session(10);
        assert_eq!(session.tick(59.0), None);
        assert_eq!(session.tick(1.0), Some(SessionEvent::TimeUp));
        assert_eq!(session.tick(1.0), None);
        assert!(session.is_over());

        let before = session.navigator().stats();
        let events = session.handle(Action::Reset).unwrap();
        assert!(events.is_empty());
        assert_eq!(session.navigator().stats(), before);
        assert_eq!(session.level(), 0);
    }

    #[test]
    fn spawn_events_are_held_for_the_caller() {
        let mut session = session(11);
        let start = session.maze().start();
        let events = session.take_events();
        assert_eq!(events[0], SessionEvent::CellEntered(start));
        assert!(matches!(
            events[1],
            SessionEvent::PathUpdated { destination, .. } if destination == session.maze().end()
        ));
        assert!(session.take_events().is_empty());
    }

    #[test]
    fn single_cell_maze_reports_goal_on_spawn() {
        let config = GameConfig {
            width: 1,
            depth: 1,
            ..GameConfig::default()
        };
        let mut session = GameSession::new(config, Some(1)).unwrap();
        let events = session.take_events();
        let cell = CellCoord::new(0, 0);
        assert_eq!(
            events,
            vec![
                SessionEvent::CellEntered(cell),
                SessionEvent::PathUpdated { destination: cell, hops: 0 },
                SessionEvent::GoalReached { maze: session.maze().id() },
            ]
        );
        assert!(session.powerups().is_empty());
    }

    #[test]
    fn powerup_is_collected_once() {
        let mut session = session(12);
        assert_eq!(session.powerups().len(), 3);
        let powerup = *session.powerups().iter().next().unwrap();
        assert_ne!(powerup.cell, session.maze().start());

        let events = session
            .handle(Action::MoveTo(world(&session, powerup.cell)))
            .unwrap();
        assert!(events.contains(&SessionEvent::PowerupCollected {
            cell: powerup.cell,
            kind: powerup.kind,
            bonus: 0.5,
        }));
        let expected = match powerup.kind {
            PowerupKind::Jump => Bonuses { jump: 0.5, speed: 0.0 },
            PowerupKind::Speed => Bonuses { jump: 0.0, speed: 0.5 },
        };
        assert_eq!(session.bonuses(), expected);
        assert_eq!(session.powerups().len(), 2);
        assert!(!session.powerups().contains(powerup.cell));

        let start = session.maze().start();
        session.handle(Action::MoveTo(world(&session, start))).unwrap();
        let events = session
            .handle(Action::MoveTo(world(&session, powerup.cell)))
            .unwrap();
        assert!(!events.iter().any(|e| matches!(e, SessionEvent::PowerupCollected { .. })));
        assert_eq!(session.bonuses(), expected);
    }

    #[test]
    fn reset_replaces_powerups_and_keeps_bonuses() {
        let mut session = session(13);
        let powerup = *session.powerups().iter().next().unwrap();
        session
            .handle(Action::MoveTo(world(&session, powerup.cell)))
            .unwrap();
        let bonuses = session.bonuses();
        assert_eq!(session.powerups().len(), 2);

        session.reset().unwrap();
        let maze = session.maze();
        assert_eq!(session.powerups().len(), 3);
        assert!(!session.powerups().contains(maze.start()));
        assert!(session.powerups().iter().all(|p| maze.grid().contains(p.cell)));
        assert_eq!(session.bonuses(), bonuses);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = GameConfig {
            width: 0,
            ..GameConfig::default()
        };
        let err = GameSession::new(config, Some(1)).err().unwrap();
        assert!(matches!(err, SessionError::Config(ConfigError::Invalid(_))));
    }
}
