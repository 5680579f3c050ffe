//! Game state module - the session that drives one game
//!
//! The session owns the main board, the preview board, the piece queue and the
//! counters. It moves through `Idle → Running ⇄ Paused → GameOver`, and a
//! restart from any phase goes back to `Running` with fresh counters.
//!
//! Gravity works by external ticks: the driver calls [`Session::tick`] at the
//! period the session asks for. Whenever that period changes (start, resume,
//! level up) or ticking must stop (pause, game over), the operation returns a
//! [`TimerCommand`] for the driver's scheduler.
//!
//! Sound and the end-of-game report go to collaborators passed in at
//! construction, so the session runs headless in tests.

use std::time::Duration;

use log::{debug, info};

use crate::board::Board;
use crate::config::{ConfigError, GameConfig};
use crate::pieces::Tetromino;
use crate::rng::PieceQueue;
use crate::scoring::{calculate_hard_drop_score, calculate_level, calculate_lock_score};
use crate::snapshot::GameSnapshot;
use crate::timer::TimerCommand;
use crate::types::{GameAction, PieceKind, SoundCue};

/// Receives sound cues
pub trait SoundSink {
    fn play(&mut self, cue: SoundCue);
}

/// Told once when a game ends, with the final score
pub trait GameOverNotifier {
    fn game_ended(&mut self, final_score: u32);
}

/// Silent
impl SoundSink for () {
    fn play(&mut self, _cue: SoundCue) {}
}

/// Records every cue in order
impl SoundSink for Vec<SoundCue> {
    fn play(&mut self, cue: SoundCue) {
        self.push(cue);
    }
}

impl<T: SoundSink + ?Sized> SoundSink for Box<T> {
    fn play(&mut self, cue: SoundCue) {
        (**self).play(cue);
    }
}

impl GameOverNotifier for () {
    fn game_ended(&mut self, _final_score: u32) {}
}

/// Records every final score in order
impl GameOverNotifier for Vec<u32> {
    fn game_ended(&mut self, final_score: u32) {
        self.push(final_score);
    }
}

impl<T: GameOverNotifier + ?Sized> GameOverNotifier for Box<T> {
    fn game_ended(&mut self, final_score: u32) {
        (**self).game_ended(final_score);
    }
}

/// Lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    /// Constructed, never started
    #[default]
    Idle,
    Running,
    Paused,
    GameOver,
}

/// One game instance
#[derive(Debug, Clone)]
pub struct Session<S = (), N = ()> {
    config: GameConfig,
    board: Board,
    preview: Board,
    queue: PieceQueue,
    score: u32,
    lines: u32,
    level: u32,
    phase: Phase,
    interval: Duration,
    sound: S,
    notifier: N,
}

impl Session {
    /// Session with a seeded random queue and no collaborators
    pub fn new(config: GameConfig, seed: u32) -> Result<Self, ConfigError> {
        Self::with_collaborators(config, PieceQueue::new(seed), (), ())
    }
}

impl<S: SoundSink, N: GameOverNotifier> Session<S, N> {
    /// Validate `config` and build an idle session
    pub fn with_collaborators(
        config: GameConfig,
        queue: PieceQueue,
        sound: S,
        notifier: N,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let board = Board::new(config.board_height, config.board_width)?;
        let preview = Board::new(config.preview_height, config.preview_width)?;
        let interval = config.drop_interval(1);

        Ok(Self {
            config,
            board,
            preview,
            queue,
            score: 0,
            lines: 0,
            level: 1,
            phase: Phase::Idle,
            interval,
            sound,
            notifier,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn is_paused(&self) -> bool {
        self.phase == Phase::Paused
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Current tick period
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Main field, falling piece included
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Preview field showing the next piece
    pub fn preview(&self) -> &Board {
        &self.preview
    }

    pub fn current_piece(&self) -> Option<Tetromino> {
        self.board.active().map(|active| active.piece)
    }

    pub fn next_piece(&self) -> PieceKind {
        self.queue.next()
    }

    pub fn sound(&self) -> &S {
        &self.sound
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Start a new game from any phase.
    ///
    /// Clears both boards, resets the counters, spawns the current piece and
    /// asks for ticks at the level 1 period.
    pub fn start(&mut self) -> TimerCommand {
        self.score = 0;
        self.lines = 0;
        self.level = 1;
        self.interval = self.config.drop_interval(self.level);
        self.board.clear();
        self.preview.clear();
        self.phase = Phase::Running;
        info!("game started, tick interval {:?}", self.interval);

        if !self.spawn_piece() {
            return self.end_game();
        }
        TimerCommand::Arm(self.interval)
    }

    /// Same as [`start`](Session::start)
    pub fn reset(&mut self) -> TimerCommand {
        self.start()
    }

    /// Stop ticking and ignore input. Counters are untouched.
    pub fn pause(&mut self) -> Option<TimerCommand> {
        if self.phase != Phase::Running {
            return None;
        }
        self.phase = Phase::Paused;
        Some(TimerCommand::Disarm)
    }

    /// Resume ticking at the period in effect before the pause
    pub fn resume(&mut self) -> Option<TimerCommand> {
        if self.phase != Phase::Paused {
            return None;
        }
        self.phase = Phase::Running;
        Some(TimerCommand::Arm(self.interval))
    }

    pub fn toggle_pause(&mut self) -> Option<TimerCommand> {
        match self.phase {
            Phase::Running => self.pause(),
            Phase::Paused => self.resume(),
            Phase::Idle | Phase::GameOver => None,
        }
    }

    /// One gravity step.
    ///
    /// Moves the piece down a row, cued like any other move. If it cannot
    /// move it locks: full rows are cleared, counters and score updated, and
    /// the next piece spawned. Only acts while running, so a tick that
    /// arrives after a pause or game over changes nothing.
    pub fn tick(&mut self) -> Option<TimerCommand> {
        if self.phase != Phase::Running {
            return None;
        }
        if self.board.move_down() {
            self.sound.play(SoundCue::Move);
            return None;
        }
        self.lock_piece()
    }

    fn lock_piece(&mut self) -> Option<TimerCommand> {
        let cleared = self.board.clear_full_rows();
        self.lines += cleared as u32;
        if let Some(cue) = SoundCue::for_lines(cleared) {
            debug!("cleared {} line(s), {} total", cleared, self.lines);
            self.sound.play(cue);
        }

        let previous = self.level;
        self.level = calculate_level(self.lines);
        let mut command = None;
        // A clear adds at most 4 lines, so the level rises by one at most.
        if self.level == previous + 1 {
            command = Some(self.level_up());
        }

        self.score = self
            .score
            .saturating_add(calculate_lock_score(cleared, self.level));

        self.queue.advance();
        if !self.spawn_piece() {
            return Some(self.end_game());
        }
        command
    }

    fn level_up(&mut self) -> TimerCommand {
        self.interval = self.config.drop_interval(self.level);
        info!("level up to {}, tick interval {:?}", self.level, self.interval);
        TimerCommand::Arm(self.interval)
    }

    /// Insert the queue's current piece and show the next one in the preview
    fn spawn_piece(&mut self) -> bool {
        if !self.board.insert(Tetromino::new(self.queue.current())) {
            return false;
        }
        self.preview.clear();
        self.preview.insert(Tetromino::new(self.queue.next()));
        true
    }

    fn end_game(&mut self) -> TimerCommand {
        self.phase = Phase::GameOver;
        info!(
            "game over: score {}, lines {}, level {}",
            self.score, self.lines, self.level
        );
        self.notifier.game_ended(self.score);
        TimerCommand::Disarm
    }

    pub fn move_left(&mut self) -> bool {
        self.player_move(0, -1)
    }

    pub fn move_right(&mut self) -> bool {
        self.player_move(0, 1)
    }

    /// Move down one row. Locking is left to the next tick.
    pub fn soft_drop(&mut self) -> bool {
        self.player_move(1, 0)
    }

    fn player_move(&mut self, d_row: i32, d_col: i32) -> bool {
        if self.phase != Phase::Running || !self.board.move_by(d_row, d_col) {
            return false;
        }
        self.sound.play(SoundCue::Move);
        true
    }

    pub fn rotate(&mut self) -> bool {
        if self.phase != Phase::Running || !self.board.rotate() {
            return false;
        }
        self.sound.play(SoundCue::Rotate);
        true
    }

    /// Drop the piece as far as it goes and award the flat bonus.
    ///
    /// Every row fallen is a move and cues like one. The piece locks on the
    /// next tick; returns the distance fallen.
    pub fn hard_drop(&mut self) -> Option<u32> {
        if self.phase != Phase::Running || self.board.active().is_none() {
            return None;
        }
        self.sound.play(SoundCue::HardDrop);
        let mut distance = 0;
        while self.board.move_down() {
            self.sound.play(SoundCue::Move);
            distance += 1;
        }
        self.score = self
            .score
            .saturating_add(calculate_hard_drop_score(distance));
        Some(distance)
    }

    /// Apply a player command.
    ///
    /// Gameplay commands are ignored unless running. Pause toggles and
    /// restart starts over; both hand back the resulting timer command.
    pub fn handle_input(&mut self, action: GameAction) -> Option<TimerCommand> {
        match action {
            GameAction::MoveLeft => {
                self.move_left();
            }
            GameAction::MoveRight => {
                self.move_right();
            }
            GameAction::SoftDrop => {
                self.soft_drop();
            }
            GameAction::Rotate => {
                self.rotate();
            }
            GameAction::HardDrop => {
                self.hard_drop();
            }
            GameAction::Pause => return self.toggle_pause(),
            GameAction::Restart => return Some(self.start()),
        }
        None
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.board.copy_from(&self.board);
        out.preview.copy_from(&self.preview);
        out.score = self.score;
        out.lines = self.lines;
        out.level = self.level;
        out.phase = self.phase;
        out.interval = self.interval;
        out.next = self.queue.next();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Cell, Color};

    type Recorded = Session<Vec<SoundCue>, Vec<u32>>;

    fn session_with(pieces: &[PieceKind], config: GameConfig) -> Recorded {
        Session::with_collaborators(
            config,
            PieceQueue::sequence(pieces.iter().copied()),
            Vec::new(),
            Vec::new(),
        )
        .unwrap()
    }

    fn i_session() -> Recorded {
        session_with(&[PieceKind::I], GameConfig::default())
    }

    /// Fill `row` of the main board except columns 3..=6, the spot a
    /// horizontal I dropped from spawn lands in.
    fn fill_row_except_i_gap(session: &mut Recorded, row: i32) {
        for col in (0..3).chain(7..10) {
            session
                .board_mut()
                .set(row, col, Cell::Filled(Color::Blue));
        }
    }

    fn tick_until_lock(session: &mut Recorded) -> Option<TimerCommand> {
        let score = session.score;
        for _ in 0..100 {
            let command = session.tick();
            if session.score != score || session.phase != Phase::Running {
                return command;
            }
        }
        panic!("piece never locked");
    }

    #[test]
    fn test_new_session_is_idle() {
        let session = Session::new(GameConfig::default(), 12345).unwrap();
        assert_eq!(session.phase(), Phase::Idle);
        assert_eq!(session.score(), 0);
        assert_eq!(session.lines(), 0);
        assert_eq!(session.level(), 1);
        assert!(session.current_piece().is_none());
        assert_eq!(session.interval(), Duration::from_millis(800));
    }

    #[test]
    fn test_invalid_config_fails_fast() {
        let config = GameConfig::default().with_board(2, 10);
        assert!(Session::new(config, 1).is_err());
    }

    #[test]
    fn test_start_spawns_and_arms() {
        let mut session = i_session();
        assert_eq!(
            session.start(),
            TimerCommand::Arm(Duration::from_millis(800))
        );
        assert!(session.is_running());
        assert_eq!(session.current_piece(), Some(Tetromino::new(PieceKind::I)));
        // Preview shows the next I on its own row 1.
        assert!((1..5).all(|col| session.preview().is_occupied(1, col)));
    }

    #[test]
    fn test_tick_moves_piece_down() {
        let mut session = i_session();
        session.start();
        assert_eq!(session.tick(), None);
        assert_eq!(session.board().active().unwrap().pos.row, 1);
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn test_tick_ignored_unless_running() {
        let mut session = i_session();
        assert_eq!(session.tick(), None);

        session.start();
        session.pause();
        let before = session.board().clone();
        assert_eq!(session.tick(), None);
        assert_eq!(session.board(), &before);
    }

    #[test]
    fn test_lock_without_clear_scores_bonus() {
        let mut session = i_session();
        session.start();
        assert_eq!(tick_until_lock(&mut session), None);
        assert_eq!(session.score(), 4);
        assert_eq!(session.lines(), 0);
        // One cue per row fallen, none for the lock itself.
        assert_eq!(session.sound(), &vec![SoundCue::Move; 20]);
    }

    #[test]
    fn test_single_clear_scoring_and_cue() {
        let mut session = i_session();
        session.start();
        fill_row_except_i_gap(&mut session, 21);

        tick_until_lock(&mut session);
        assert_eq!(session.lines(), 1);
        assert_eq!(session.score(), 40 + 4);
        let (last, falls) = session.sound().split_last().unwrap();
        assert_eq!(*last, SoundCue::SingleLineClear);
        assert!(falls.iter().all(|&cue| cue == SoundCue::Move));
        assert!(session.board().is_row_empty(20));
    }

    #[test]
    fn test_score_uses_level_after_clear() {
        let mut session = i_session();
        session.start();
        session.lines = 9;
        fill_row_except_i_gap(&mut session, 21);

        let command = tick_until_lock(&mut session);
        let expected = Duration::from_nanos(43 * 1_000_000_000 / 60);
        assert_eq!(command, Some(TimerCommand::Arm(expected)));
        assert_eq!(session.level(), 2);
        assert_eq!(session.interval(), expected);
        assert_eq!(session.score(), 40 * 2 + 4);
    }

    #[test]
    fn test_level_never_decreases() {
        let mut session = i_session();
        session.start();
        session.lines = 25;
        session.level = 3;
        tick_until_lock(&mut session);
        assert_eq!(session.level(), 3);
    }

    #[test]
    fn test_pause_and_resume_keep_interval() {
        let mut session = i_session();
        session.start();
        session.lines = 9;
        fill_row_except_i_gap(&mut session, 21);
        tick_until_lock(&mut session);
        let interval = session.interval();
        let score = session.score();

        assert_eq!(session.pause(), Some(TimerCommand::Disarm));
        assert!(session.is_paused());
        assert_eq!(session.pause(), None);
        assert!(!session.move_left());
        assert_eq!(session.hard_drop(), None);

        assert_eq!(session.resume(), Some(TimerCommand::Arm(interval)));
        assert_eq!(session.score(), score);
        assert_eq!(session.level(), 2);
    }

    #[test]
    fn test_toggle_pause_via_input() {
        let mut session = i_session();
        assert_eq!(session.handle_input(GameAction::Pause), None);
        session.start();
        assert_eq!(
            session.handle_input(GameAction::Pause),
            Some(TimerCommand::Disarm)
        );
        assert_eq!(
            session.handle_input(GameAction::Pause),
            Some(TimerCommand::Arm(Duration::from_millis(800)))
        );
    }

    #[test]
    fn test_hard_drop_flat_bonus_then_lock() {
        let mut session = i_session();
        session.start();
        assert_eq!(session.hard_drop(), Some(20));
        assert_eq!(session.score(), 4);
        let (first, falls) = session.sound().split_first().unwrap();
        assert_eq!(*first, SoundCue::HardDrop);
        assert_eq!(falls, &[SoundCue::Move; 20]);

        // Lock happens on the next tick and adds the lock bonus.
        session.tick();
        assert_eq!(session.score(), 8);
    }

    #[test]
    fn test_hard_drop_bonus_ignores_distance() {
        let mut session = i_session();
        session.start();
        session.hard_drop();
        assert_eq!(session.hard_drop(), Some(0));
        assert_eq!(session.score(), 8);
    }

    #[test]
    fn test_gravity_and_hard_drop_cue_every_row() {
        let mut session = i_session();
        session.start();
        for _ in 0..3 {
            session.tick();
        }
        assert_eq!(session.sound(), &vec![SoundCue::Move; 3]);

        assert_eq!(session.hard_drop(), Some(17));
        let mut expected = vec![SoundCue::Move; 3];
        expected.push(SoundCue::HardDrop);
        expected.extend([SoundCue::Move; 17]);
        assert_eq!(session.sound(), &expected);

        // Resting piece: the locking tick adds no move cue.
        session.tick();
        assert_eq!(session.sound().len(), expected.len());
    }

    #[test]
    fn test_player_moves_emit_cues() {
        let mut session = i_session();
        session.start();
        session.handle_input(GameAction::MoveLeft);
        session.handle_input(GameAction::SoftDrop);
        session.handle_input(GameAction::Rotate);
        for _ in 0..10 {
            session.handle_input(GameAction::MoveRight);
        }
        let cues = session.sound();
        assert_eq!(&cues[..3], &[SoundCue::Move, SoundCue::Move, SoundCue::Rotate]);
        // Only successful moves make a sound.
        assert!(cues.len() < 13);
    }

    #[test]
    fn test_game_over_on_blocked_spawn() {
        let config = GameConfig::default().with_board(4, 4);
        let mut session = session_with(&[PieceKind::O], config);
        session.start();

        // First O drops to the floor, second stays on top, third cannot spawn.
        session.hard_drop();
        assert_eq!(session.tick(), None);
        assert_eq!(session.score(), 8);

        session.hard_drop();
        assert_eq!(session.tick(), Some(TimerCommand::Disarm));
        assert!(session.is_game_over());
        assert_eq!(session.score(), 16);
        assert_eq!(session.notifier(), &vec![16]);

        // Terminal until restarted.
        assert_eq!(session.tick(), None);
        assert!(!session.rotate());
        assert_eq!(session.resume(), None);
    }

    #[test]
    fn test_restart_resets_counters() {
        let mut session = i_session();
        session.start();
        session.lines = 15;
        session.level = 2;
        session.hard_drop();
        session.tick();

        let command = session.handle_input(GameAction::Restart);
        assert_eq!(
            command,
            Some(TimerCommand::Arm(Duration::from_millis(800)))
        );
        assert_eq!(session.score(), 0);
        assert_eq!(session.lines(), 0);
        assert_eq!(session.level(), 1);
        assert_eq!(
            session.board().cells().iter().filter(|c| c.is_filled()).count(),
            4
        );
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut session = i_session();
        session.start();
        session.hard_drop();

        let snap = session.snapshot();
        assert_eq!(snap.score, 4);
        assert_eq!(snap.phase, Phase::Running);
        assert_eq!(snap.next, PieceKind::I);
        assert_eq!(snap.board.height, 22);
        assert_eq!(snap.board.get(21, 3), Some(Cell::Filled(Color::Cyan)));
        assert_eq!(snap.preview.width, 6);
    }
}
