use clap::Parser;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, MouseButton,
        MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{error, info, warn};
use ratatui::{
    prelude::*,
    style::{Style, Stylize},
    widgets::*,
};
use simplelog::{Config, LevelFilter, WriteLogger};
use snekcore::{
    Arena, ContactOutcome, Difficulty, Direction, ScoreBoard, SnakeConfig, SnakeEvent,
    SnakeSimulation, StepResult, SwipeTranslator,
};
use std::error::Error;
use std::fs::File;
use std::io;
use std::time::{Duration, Instant};

/// Terminal snake.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// 0 = easy, 1 = medium, 2 = hard
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(0..=2))]
    difficulty: u8,

    /// Leave through one wall, come back through the opposite one
    #[arg(short, long)]
    wrap: bool,

    /// Segments the snake starts with
    #[arg(short, long, default_value_t = 4)]
    initial_size: usize,

    /// Obstacles scattered on the board each round
    #[arg(short, long, default_value_t = 0)]
    obstacles: usize,

    /// Mouse drag distance, in terminal cells, that counts as a swipe
    #[arg(long, default_value_t = 3.0)]
    swipe_threshold: f32,

    #[arg(long, default_value = "snekcore.log")]
    log_file: String,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    // Set up logging before anything else
    WriteLogger::init(
        LevelFilter::Info,
        Config::default(),
        File::create(&args.log_file)?,
    )?;

    let config = SnakeConfig {
        initial_size: args.initial_size,
        difficulty: Difficulty::from_level(args.difficulty).unwrap_or_default(),
        move_through_walls: args.wrap,
        swipe_threshold: args.swipe_threshold,
        ..Default::default()
    };
    if let Err(e) = config.validate() {
        error!("Refusing to start: {}", e);
        return Err(e.into());
    }

    info!(
        "Starting snekcore on {} difficulty",
        config.difficulty.label()
    );

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut game = Game::new(config, args.obstacles);
    let outcome = run(&mut terminal, &mut game);

    // Cleanup terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = &outcome {
        error!("Game loop failed: {}", e);
    }
    outcome
}

fn run<B: Backend>(terminal: &mut Terminal<B>, game: &mut Game) -> Result<(), Box<dyn Error>> {
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| game.render(f))?;

        let tick_rate = game.tick_interval();
        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => game.handle_key(key)?,
                Event::Mouse(mouse) => game.handle_mouse(mouse),
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_rate {
            game.update()?;
            last_tick = Instant::now();
        }

        if let GameState::Exit = game.state {
            return Ok(());
        }
    }
}

/// One round in progress: the snake and the board it moves on.
#[derive(Debug)]
struct Round {
    sim: SnakeSimulation<Vec<SnakeEvent>>,
    arena: Arena,
}

#[derive(Debug)]
enum GameState {
    ReadyToStart,
    Playing(Round),
    Paused(Round),
    GameOver { round: Round, new_best: bool },
    Exit,
}

struct Game {
    state: GameState,
    config: SnakeConfig,
    obstacles: usize,
    score: ScoreBoard,
    swipe: SwipeTranslator,
    /// Half extents of the board that fit the terminal, learnt while drawing.
    arena_extents: Option<(i32, i32)>,
}

impl Game {
    fn new(config: SnakeConfig, obstacles: usize) -> Self {
        Game {
            state: GameState::ReadyToStart,
            swipe: SwipeTranslator::new(config.swipe_threshold),
            config,
            obstacles,
            score: ScoreBoard::default(),
            arena_extents: None,
        }
    }

    fn tick_interval(&self) -> Duration {
        match &self.state {
            GameState::Playing(round) => round.sim.tick_interval(),
            _ => self.config.tick_interval(1.0),
        }
    }

    fn start_round(&mut self) -> snekcore::Result<Option<Round>> {
        let Some((half_width, half_height)) = self.arena_extents else {
            return Ok(None);
        };
        if half_width < 2 || half_height < 2 {
            warn!(
                "Terminal too small for a board ({}x{} half extents)",
                half_width, half_height
            );
            return Ok(None);
        }

        let mut arena = Arena::new(half_width, half_height)?;
        let mut sim = SnakeSimulation::new(self.config.clone(), Vec::new())?;
        let mut rng = rand::thread_rng();

        arena.scatter_obstacles(&sim, self.obstacles, &mut rng);
        arena.spawn_food(&sim, &mut rng);
        // Bootstrap events carry no score
        sim.host_mut().clear();
        self.score.reset();

        Ok(Some(Round { sim, arena }))
    }

    fn render(&mut self, frame: &mut Frame) {
        let score_text = match &self.state {
            GameState::Playing(_) | GameState::Paused(_) | GameState::GameOver { .. } => {
                format!(
                    "SNEK    Best: {}    Score: {}    {}x    {}",
                    self.score.best_score(),
                    self.score.score(),
                    self.score.multiplier(),
                    self.config.difficulty.label()
                )
            }
            _ => format!(
                "SNEK    Best: {}    {}",
                self.score.best_score(),
                self.config.difficulty.label()
            ),
        };

        let layout = Layout::default()
            .direction(layout::Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title + score
                Constraint::Min(0),    // Board
            ])
            .split(frame.area());

        frame.render_widget(
            Paragraph::new(score_text)
                .alignment(Alignment::Left)
                .block(Block::default().borders(Borders::ALL)),
            layout[0],
        );

        let block = Block::default().borders(Borders::ALL);
        let inner_area = block.inner(layout[1]);

        match &self.state {
            GameState::ReadyToStart => {
                // Two terminal columns per cell, walls included
                let half_width = (inner_area.width as i32 / 2 - 1) / 2;
                let half_height = (inner_area.height as i32 - 1) / 2;
                self.arena_extents = Some((half_width, half_height));

                frame.render_widget(
                    Paragraph::new("Press SPACE to start")
                        .alignment(Alignment::Center)
                        .block(block),
                    layout[1],
                );
            }
            GameState::Playing(round) => {
                frame.render_widget(block.title("Playing"), layout[1]);
                frame.render_widget(round, inner_area);
            }
            GameState::Paused(round) => {
                frame.render_widget(
                    block.title("Paused. Press SPACE to continue"),
                    layout[1],
                );
                frame.render_widget(round, inner_area);
            }
            GameState::GameOver { round, new_best } => {
                frame.render_widget(block, layout[1]);
                frame.render_widget(round, inner_area);

                let best = if *new_best { "\nNew best score!" } else { "" };
                frame.render_widget(
                    Paragraph::new(format!(
                        "GAME OVER\nFinal Score: {}{}\nPress SPACE to play again",
                        self.score.score(),
                        best
                    ))
                    .alignment(Alignment::Center),
                    inner_area,
                );
            }
            GameState::Exit => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> snekcore::Result {
        let state = std::mem::replace(&mut self.state, GameState::Exit);

        self.state = match state {
            GameState::ReadyToStart => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => GameState::Exit,
                KeyCode::Char(' ') => match self.start_round()? {
                    Some(round) => GameState::Playing(round),
                    None => GameState::ReadyToStart,
                },
                _ => GameState::ReadyToStart,
            },
            GameState::Playing(mut round) => match key.code {
                KeyCode::Char('q') => {
                    let new_best = self.score.finish_round();
                    GameState::GameOver { round, new_best }
                }
                KeyCode::Esc => GameState::Exit,
                KeyCode::Char(' ') => GameState::Paused(round),
                code => {
                    round.sim.set_pending_direction(key_direction(code));
                    GameState::Playing(round)
                }
            },
            GameState::Paused(round) => match key.code {
                KeyCode::Char('q') => {
                    let new_best = self.score.finish_round();
                    GameState::GameOver { round, new_best }
                }
                KeyCode::Esc => GameState::Exit,
                KeyCode::Char(' ') => GameState::Playing(round),
                _ => GameState::Paused(round),
            },
            GameState::GameOver { round, new_best } => match key.code {
                KeyCode::Esc => GameState::Exit,
                KeyCode::Char(' ') | KeyCode::Char('q') => GameState::ReadyToStart,
                _ => GameState::GameOver { round, new_best },
            },
            GameState::Exit => GameState::Exit,
        };
        Ok(())
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let GameState::Playing(round) = &mut self.state else {
            return;
        };

        // Screen rows grow downwards, swipes expect y up
        let (x, y) = (mouse.column as f32, -(mouse.row as f32));
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.swipe.begin(x, y),
            MouseEventKind::Up(MouseButton::Left) => {
                round.sim.set_pending_direction(self.swipe.end(x, y));
            }
            _ => {}
        }
    }

    fn update(&mut self) -> snekcore::Result {
        if let GameState::Playing(round) = &mut self.state {
            if let StepResult::Moved { .. } = round.sim.tick() {
                let mut rng = rand::thread_rng();
                if let Some(ContactOutcome::Grew) = round.arena.resolve(&mut round.sim, &mut rng)? {
                    if round.arena.food().is_none() {
                        info!("Board is full");
                    }
                }
            }
        }
        self.drain_events();
        Ok(())
    }

    /// Feeds simulation events into the score board and moves to game over
    /// once the round has ended.
    fn drain_events(&mut self) {
        let GameState::Playing(round) = &mut self.state else {
            return;
        };

        let mut round_over = false;
        for event in round.sim.host_mut().drain(..) {
            match event {
                SnakeEvent::ScoreIncrement => {
                    if self.score.add_food() {
                        info!("Multiplier now {}x", self.score.multiplier());
                    }
                }
                SnakeEvent::RoundOver => round_over = true,
                SnakeEvent::SegmentAdded(_) | SnakeEvent::HeadMoved { .. } => {}
            }
        }

        if !round_over {
            return;
        }
        if let GameState::Playing(round) = std::mem::replace(&mut self.state, GameState::Exit) {
            let new_best = self.score.finish_round();
            info!("Game over with score {}", self.score.score());
            self.state = GameState::GameOver { round, new_best };
        }
    }
}

fn key_direction(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Up | KeyCode::Char('w') => Some(Direction::Up),
        KeyCode::Down | KeyCode::Char('s') => Some(Direction::Down),
        KeyCode::Left | KeyCode::Char('a') => Some(Direction::Left),
        KeyCode::Right | KeyCode::Char('d') => Some(Direction::Right),
        _ => None,
    }
}

impl Widget for &Round {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let half_width = self.arena.half_width();
        let half_height = self.arena.half_height();

        let mut paint = |x: i32, y: i32, symbol: &str, style: Style| {
            let col = area.x as i32 + 2 * (x + half_width);
            let row = area.y as i32 + (half_height - y);
            if col < area.x as i32
                || row < area.y as i32
                || col + 1 >= (area.x + area.width) as i32
                || row >= (area.y + area.height) as i32
            {
                return;
            }
            buf[(col as u16, row as u16)]
                .set_symbol(symbol)
                .set_style(style);
            buf[(col as u16 + 1, row as u16)]
                .set_symbol(" ")
                .set_style(style);
        };

        let wall_style = Style::default().bg(Color::DarkGray);
        for x in -half_width..=half_width {
            paint(x, half_height, " ", wall_style);
            paint(x, -half_height, " ", wall_style);
        }
        for y in -half_height..=half_height {
            paint(half_width, y, " ", wall_style);
            paint(-half_width, y, " ", wall_style);
        }

        for cell in self.arena.obstacles() {
            paint(cell.x, cell.y, "▓", Style::default().fg(Color::Gray));
        }

        if let Some(food) = self.arena.food() {
            paint(food.x, food.y, "♥", Style::default().light_red());
        }

        let positions = self.sim.positions();
        for cell in positions.iter().skip(1) {
            paint(cell.x, cell.y, " ", Style::default().bg(Color::Green));
        }

        let head = match self.sim.direction() {
            Direction::Up => "▲",
            Direction::Down => "▼",
            Direction::Left => "◀",
            Direction::Right => "▶",
        };
        if let Some(cell) = positions.first() {
            paint(cell.x, cell.y, head, Style::default().yellow().bold());
        }
    }
}
