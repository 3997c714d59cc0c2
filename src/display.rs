use crate::grid::{HEIGHT, WIDTH};
use crate::matrix::{MatrixRam, MAX_BRIGHTNESS};
use crate::seven_seg::{Glyph, NumericDisplay};
use crate::Result;
use log::{info, warn};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tui::backend::CrosstermBackend;
use tui::layout::Rect;
use tui::style::{Color, Style};
use tui::symbols::Marker;
use tui::text::{Span, Spans};
use tui::widgets::canvas::{Canvas, Points};
use tui::widgets::{Block, Borders, Paragraph};
use tui::Terminal;

/// canvas coordinates of every lit LED; y grows downwards on the board, so
/// it's negated for the canvas
fn lit_points(frame: &[u8; WIDTH]) -> Vec<(f64, f64)> {
    let mut points = Vec::new();
    for (x, column) in frame.iter().enumerate() {
        for y in 0..HEIGHT {
            if column & (1 << y) != 0 {
                points.push((x as f64, -(y as f64)));
            }
        }
    }
    points
}

/// red LEDs, dimmer at low duty
fn led_colour(brightness: u8) -> Color {
    let level = u16::from(brightness.min(MAX_BRIGHTNESS));
    Color::Rgb((80 + level * 175 / u16::from(MAX_BRIGHTNESS)) as u8, 0, 0)
}

/// three text rows drawing the digits, most significant on the left
///
///  _     _
/// | |  | _|
/// |_|  ||_
fn segment_rows(segments: &[u8]) -> [String; 3] {
    let lit = |mask: u8, bit: u8, c: char| if mask & (1 << bit) != 0 { c } else { ' ' };
    let mut rows = [String::new(), String::new(), String::new()];
    for &s in segments.iter().rev() {
        // A=6 B=5 C=4 D=3 E=2 F=1 G=0
        rows[0].extend([' ', lit(s, 6, '_'), ' ', ' ']);
        rows[1].extend([lit(s, 1, '|'), lit(s, 0, '_'), lit(s, 5, '|'), ' ']);
        rows[2].extend([lit(s, 2, '|'), lit(s, 3, '_'), lit(s, 4, '|'), ' ']);
    }
    rows
}

/// what was on screen last time, so unchanged passes skip the redraw
#[derive(Clone, PartialEq)]
struct Drawn {
    frame: [u8; WIDTH],
    brightness: u8,
    segments: Vec<u8>,
}

/// the whole front panel in a terminal, rendered using TUI and crossterm:
/// the LED matrix (read back from its display RAM) and the generation
/// readout
pub struct TermPanel {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    ram: Arc<MatrixRam>,
    segments: Vec<u8>,
    digit_delay: Duration,
    drawn: Option<Drawn>,
}

impl TermPanel {
    pub fn new(ram: Arc<MatrixRam>, digits: u8, digit_delay: Duration) -> Result<TermPanel> {
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;
        terminal.hide_cursor()?;
        Ok(TermPanel {
            terminal,
            ram,
            segments: vec![0; digits as usize],
            digit_delay,
            drawn: None,
        })
    }

    fn draw(&mut self, state: &Drawn) -> Result<()> {
        let points = lit_points(&state.frame);
        let colour = led_colour(state.brightness);
        let rows = segment_rows(&state.segments);
        let readout: Vec<Spans> = rows
            .iter()
            .map(|r| Spans::from(Span::styled(r.clone(), Style::default().fg(Color::Red))))
            .collect();

        self.terminal.draw(|f| {
            // clipped to the terminal, which may be smaller than the panel
            let size = f.size();
            let matrix_area = Rect::new(0, 0, 2 + WIDTH as u16, 2 + HEIGHT as u16);
            let readout_area = Rect::new(0, matrix_area.height, matrix_area.width, 5);
            let matrix_area = matrix_area.intersection(size);
            let readout_area = readout_area.intersection(size);

            let canvas = Canvas::default()
                .block(
                    Block::default()
                        .title("LIFE")
                        .borders(Borders::ALL)
                        .style(Style::default().bg(Color::Black)),
                )
                .x_bounds([0.0, (WIDTH - 1) as f64])
                .y_bounds([-((HEIGHT - 1) as f64), 0.0])
                .marker(Marker::Block)
                .paint(|ctx| {
                    ctx.draw(&Points {
                        coords: &points,
                        color: colour,
                    });
                });
            f.render_widget(canvas, matrix_area);

            let paragraph = Paragraph::new(readout.clone()).block(
                Block::default()
                    .title("GEN")
                    .borders(Borders::ALL)
                    .style(Style::default().bg(Color::Black)),
            );
            f.render_widget(paragraph, readout_area);
        })?;
        Ok(())
    }
}

impl Drop for TermPanel {
    fn drop(&mut self) {
        if let Err(e) = self.terminal.show_cursor() {
            warn!("couldn't restore the cursor: {}", e);
        }
    }
}

impl NumericDisplay for TermPanel {
    fn digit_count(&self) -> u8 {
        self.segments.len() as u8
    }

    fn render_digit(&mut self, glyph: Glyph, position: u8) -> Result<()> {
        if let Some(s) = self.segments.get_mut(position as usize) {
            *s = glyph.segments();
        }
        spin_sleep::sleep(self.digit_delay);
        Ok(())
    }

    /// redraw the panel if anything changed since last time
    fn present(&mut self) -> Result<()> {
        let state = Drawn {
            frame: self.ram.frame(),
            brightness: self.ram.brightness(),
            segments: self.segments.clone(),
        };
        if self.drawn.as_ref() != Some(&state) {
            self.draw(&state)?;
            self.drawn = Some(state);
        }
        Ok(())
    }
}

/// headless readout: keeps the multiplexing pace, logs the count whenever
/// it changes
pub struct LogPanel {
    glyphs: Vec<Glyph>,
    digit_delay: Duration,
    last: Option<String>,
}

impl LogPanel {
    pub fn new(digits: u8, digit_delay: Duration) -> Self {
        LogPanel {
            glyphs: vec![Glyph::Blank; digits as usize],
            digit_delay,
            last: None,
        }
    }

    fn reading(&self) -> String {
        self.glyphs
            .iter()
            .rev()
            .map(|g| match g {
                Glyph::Digit(d) => char::from(b'0' + d),
                Glyph::Error => 'E',
                Glyph::Blank => ' ',
            })
            .collect()
    }
}

impl NumericDisplay for LogPanel {
    fn digit_count(&self) -> u8 {
        self.glyphs.len() as u8
    }

    fn render_digit(&mut self, glyph: Glyph, position: u8) -> Result<()> {
        if let Some(g) = self.glyphs.get_mut(position as usize) {
            *g = glyph;
        }
        spin_sleep::sleep(self.digit_delay);
        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        let reading = self.reading();
        if self.last.as_deref() != Some(reading.as_str()) {
            info!("generation [{}]", reading);
            self.last = Some(reading);
        }
        Ok(())
    }
}
