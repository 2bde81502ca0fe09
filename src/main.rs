use std::io::{self, Write};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::cursor::MoveTo;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::style::{Attribute, Color as CrosstermColor, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, queue};
use tracing_subscriber::EnvFilter;

use typeahead::backend::StaticBackend;
use typeahead::config::SuggestConfig;
use typeahead::input::{KeyCode, KeyEvent};
use typeahead::suggest::SuggestBox;
use typeahead::ui::span::SpanLine;
use typeahead::ui::style::Color;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    match run() {
        Ok(Some(url)) => println!("navigate -> {url}"),
        Ok(None) => {}
        Err(err) => eprintln!("Error: {err}"),
    }
}

fn demo_backend() -> StaticBackend {
    let catalog = vec![
        typeahead::Suggestion::new("Hydro Pump 200", "hydro-pump-200")
            .with_short_desc("Centrifugal pump, 200 l/min"),
        typeahead::Suggestion::new("Hydro Pump 500", "hydro-pump-500")
            .with_short_desc("Centrifugal pump, 500 l/min"),
        typeahead::Suggestion::new("Pump Seal Kit", "pump-seal-kit")
            .with_short_desc("Spare seals for the Hydro series"),
        typeahead::Suggestion::new("Ball Valve DN50", "ball-valve-dn50")
            .with_short_desc("Stainless, full bore"),
        typeahead::Suggestion::new("Gasket Set", "gasket-set"),
        typeahead::Suggestion::new("Pressure Gauge", "pressure-gauge")
            .with_short_desc("0-16 bar, glycerine damped"),
    ];
    StaticBackend::new(catalog).with_latency(Duration::from_millis(120))
}

fn run() -> io::Result<Option<String>> {
    let mut sbox = SuggestBox::new(SuggestConfig::new(), Arc::new(demo_backend()));
    let mut input = String::new();

    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let result = event_loop(&mut stdout, &mut sbox, &mut input);

    execute!(stdout, LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;

    result.map(|navigation| {
        navigation.map(|target| sbox.config().templates.url_for(&target))
    })
}

fn event_loop(
    stdout: &mut io::Stdout,
    sbox: &mut SuggestBox,
    input: &mut String,
) -> io::Result<Option<typeahead::NavigationTarget>> {
    let mut render_requested = true;

    loop {
        if render_requested {
            render(stdout, sbox, input)?;
            render_requested = false;
        }

        let timeout = sbox
            .poll_deadline(Instant::now())
            .unwrap_or(Duration::from_millis(100));
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    let key = KeyEvent::from(key);
                    let response = sbox.handle_key(key);
                    if let Some(target) = response.navigation {
                        return Ok(Some(target));
                    }
                    if response.handled {
                        render_requested |= response.request_render;
                    } else {
                        match key.code {
                            KeyCode::Char(c) => {
                                input.push(c);
                                sbox.handle_input_change(input, Instant::now());
                                render_requested = true;
                            }
                            KeyCode::Backspace => {
                                input.pop();
                                sbox.handle_input_change(input, Instant::now());
                                render_requested = true;
                            }
                            KeyCode::Enter => {
                                let response = sbox.search_now();
                                if let Some(target) = response.navigation {
                                    return Ok(Some(target));
                                }
                            }
                            KeyCode::Esc => return Ok(None),
                            _ => {}
                        }
                    }
                }
                Event::Resize(..) => render_requested = true,
                _ => {}
            }
        }

        render_requested |= sbox.poll(Instant::now()).request_render;
    }
}

fn render(stdout: &mut io::Stdout, sbox: &SuggestBox, input: &str) -> io::Result<()> {
    let width = terminal::size().map(|(w, _)| w as usize).ok();

    queue!(stdout, MoveTo(0, 0), Clear(ClearType::All))?;
    queue!(
        stdout,
        MoveTo(0, 0),
        SetAttribute(Attribute::Dim),
    )?;
    write!(stdout, "type to search, arrows to pick, Enter to go, Esc to quit")?;
    queue!(stdout, ResetColor, SetAttribute(Attribute::Reset), MoveTo(0, 2))?;
    write!(stdout, "Search: {input}")?;

    for (row, line) in sbox.view_with_width(width).iter().enumerate() {
        queue!(stdout, MoveTo(2, 4 + row as u16))?;
        draw_line(stdout, line)?;
    }

    queue!(stdout, MoveTo(8 + input.chars().count() as u16, 2))?;
    stdout.flush()
}

fn draw_line(stdout: &mut io::Stdout, line: &SpanLine) -> io::Result<()> {
    for span in line {
        if let Some(color) = span.style.color {
            queue!(stdout, SetForegroundColor(to_crossterm_color(color)))?;
        }
        if let Some(background) = span.style.background {
            queue!(stdout, SetBackgroundColor(to_crossterm_color(background)))?;
        }
        if span.style.bold {
            queue!(stdout, SetAttribute(Attribute::Bold))?;
        }
        if span.style.dim {
            queue!(stdout, SetAttribute(Attribute::Dim))?;
        }
        write!(stdout, "{}", span.text)?;
        queue!(stdout, ResetColor, SetAttribute(Attribute::Reset))?;
    }
    Ok(())
}

fn to_crossterm_color(color: Color) -> CrosstermColor {
    match color {
        Color::Reset => CrosstermColor::Reset,
        Color::Black => CrosstermColor::Black,
        Color::Red => CrosstermColor::Red,
        Color::Green => CrosstermColor::Green,
        Color::Yellow => CrosstermColor::Yellow,
        Color::Blue => CrosstermColor::Blue,
        Color::Magenta => CrosstermColor::Magenta,
        Color::Cyan => CrosstermColor::Cyan,
        Color::White => CrosstermColor::White,
    }
}
