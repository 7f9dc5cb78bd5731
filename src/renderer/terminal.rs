//! Terminal front-end
//!
//! One field unit is one character cell. Frames are composed in a cell buffer
//! and only cells that changed since the last present are written out.

use std::io::{self, Stdout, Write};
use std::ops::Range;
use std::time::Duration;

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
    MouseButton, MouseEventKind,
};
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::{cursor, execute, queue, terminal};
use glam::Vec2;

use super::Surface;
use crate::sim::{InputEvent, PanelView, Rgb, TickInput, Tile};
use crate::vector::VectorExt;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    ch: char,
    fg: Color,
    bg: Color,
}

const BLANK: Cell = Cell {
    ch: ' ',
    fg: Color::White,
    bg: Color::Black,
};

/// Window-space point a click on a cell stands for: the middle of the cell
fn cell_center(column: u16, row: u16) -> Vec2 {
    Vec2::new(column as f32 + 0.5, row as f32 + 0.5)
}

/// First cell whose centre lies at or past `edge`
fn first_cell(edge: f32) -> i32 {
    (edge - 0.5).ceil() as i32
}

/// Cells whose centres fall inside the half-open span `[start, start + len)`,
/// which are exactly the cells a click can hit
fn covered_cells(start: f32, len: f32) -> Range<i32> {
    first_cell(start)..first_cell(start + len)
}

/// Run `undo` if `result` failed, then hand the result back
fn undo_on_err<T>(result: io::Result<T>, undo: impl FnOnce()) -> io::Result<T> {
    if result.is_err() {
        undo();
    }
    result
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Raw-mode, alternate-screen terminal with mouse capture.
///
/// The terminal is restored when this is dropped.
pub struct TerminalSurface {
    out: Stdout,
    w: u16,
    h: u16,
    cur: Vec<Cell>,
    prev: Vec<Cell>,
    /// Force a full repaint on the next present
    stale: bool,
}

impl TerminalSurface {
    pub fn enter() -> io::Result<Self> {
        let (w, h) = terminal::size()?;
        terminal::enable_raw_mode()?;
        let mut out = io::stdout();
        // Nothing restores raw mode if setup fails before Self exists
        undo_on_err(
            execute!(
                out,
                terminal::EnterAlternateScreen,
                EnableMouseCapture,
                cursor::Hide,
                terminal::Clear(terminal::ClearType::All)
            ),
            || {
                let _ = execute!(io::stdout(), DisableMouseCapture, terminal::LeaveAlternateScreen);
                let _ = terminal::disable_raw_mode();
            },
        )?;
        let cells = w as usize * h as usize;
        Ok(Self {
            out,
            w,
            h,
            cur: vec![BLANK; cells],
            prev: vec![BLANK; cells],
            stale: true,
        })
    }

    /// Terminal size in cells
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.w as f32, self.h as f32)
    }

    /// Collect everything that arrived since the last call without blocking
    pub fn poll_input(&mut self) -> io::Result<TickInput> {
        let mut input = TickInput::default();
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(k) if k.kind == KeyEventKind::Press => match k.code {
                    KeyCode::Char('c') if k.modifiers.contains(KeyModifiers::CONTROL) => {
                        input.events.push(InputEvent::Quit);
                    }
                    KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                        input.events.push(InputEvent::Quit);
                    }
                    KeyCode::Char(' ') => input.events.push(InputEvent::TogglePause),
                    _ => {}
                },
                Event::Mouse(m) if m.kind == MouseEventKind::Up(MouseButton::Left) => {
                    input.events.push(InputEvent::Click(cell_center(m.column, m.row)));
                }
                Event::Resize(w, h) => {
                    log::warn!("Terminal resized to {}x{}; layout stays fixed", w, h);
                    self.resize(w, h);
                }
                _ => {}
            }
        }
        Ok(input)
    }

    fn resize(&mut self, w: u16, h: u16) {
        self.w = w;
        self.h = h;
        let cells = w as usize * h as usize;
        self.cur = vec![BLANK; cells];
        self.prev = vec![BLANK; cells];
        self.stale = true;
    }

    fn put(&mut self, x: i32, y: i32, ch: char, fg: Color, bg: Color) {
        if x < 0 || y < 0 || x >= self.w as i32 || y >= self.h as i32 {
            return;
        }
        let i = y as usize * self.w as usize + x as usize;
        self.cur[i] = Cell { ch, fg, bg };
    }

    fn put_str(&mut self, x: i32, y: i32, s: &str, fg: Color, bg: Color) {
        for (i, ch) in s.chars().enumerate() {
            self.put(x + i as i32, y, ch, fg, bg);
        }
    }

    /// Paint every cell a click inside `origin..origin + extent` would land on
    fn fill(&mut self, origin: Vec2, extent: Vec2, bg: Color) {
        let columns = covered_cells(origin.x, extent.x);
        for y in covered_cells(origin.y, extent.y) {
            for x in columns.clone() {
                self.put(x, y, ' ', Color::White, bg);
            }
        }
    }

    /// Write `text` horizontally centred in a span of `width` at row `y`
    fn put_centered(&mut self, x0: f32, width: f32, y: i32, text: &str, fg: Color, bg: Color) {
        let x = x0 + ((width - self.text_size(text).x).max(0.0) / 2.0).floor();
        self.put_str(x as i32, y, text, fg, bg);
    }
}

impl Surface for TerminalSurface {
    fn text_size(&self, text: &str) -> Vec2 {
        Vec2::new(text.chars().count() as f32, 1.0)
    }

    fn clear_field(&mut self, origin: Vec2, extent: Vec2) {
        self.fill(origin, extent, Color::Black);
    }

    fn draw_tile(&mut self, tile: &Tile, _bound: Vec2, _extent: Vec2) {
        let bg = color(tile.color);
        self.fill(tile.body.screen_position(), tile.body.size, bg);
        let text = tile.text_position();
        self.put_str(
            first_cell(text.x),
            first_cell(text.y),
            &tile.key,
            color(tile.text_color),
            bg,
        );
    }

    fn draw_panel(&mut self, origin: Vec2, extent: Vec2, view: &PanelView) {
        self.fill(origin, extent, Color::Black);

        // Goal box: 4/5 of the panel width, inset by 1/10; cells are about
        // twice as tall as wide, so half as many rows
        let box_w = (extent.x * 4.0 / 5.0).floor().max(1.0);
        let box_h = (box_w / 2.0)
            .floor()
            .clamp(3.0, (extent.y / 2.0).floor().max(3.0));
        let box_size = Vec2::new(box_w, box_h);
        let box_origin = origin + Vec2::new((extent.x / 10.0).floor(), 1.0);
        let box_bg = color(view.goal.color);
        self.fill(box_origin, box_size, box_bg);

        let text_size = self.text_size(&view.goal.text);
        let text_at = box_origin + (box_size - text_size).max(Vec2::ZERO).floor_div(2.0);
        self.put_str(
            text_at.x as i32,
            text_at.y as i32,
            &view.goal.text,
            color(view.goal.color.contrast()),
            box_bg,
        );

        let white = color(Rgb::WHITE);
        let black = Color::Black;
        let mut y = (box_origin.y + box_h) as i32 + 1;
        self.put_centered(origin.x, extent.x, y, "Score", white, black);
        y += 1;
        self.put_centered(origin.x, extent.x, y, &view.score.to_string(), white, black);
        y += 2;
        let progress = format!("{} / {}", view.progress, view.total);
        self.put_centered(origin.x, extent.x, y, &progress, white, black);
        if view.paused {
            y += 2;
            self.put_centered(origin.x, extent.x, y, "PAUSED", white, black);
        }
    }

    fn present(&mut self) -> io::Result<()> {
        queue!(self.out, terminal::BeginSynchronizedUpdate)?;
        let mut cur_fg = None::<Color>;
        let mut cur_bg = None::<Color>;

        for y in 0..self.h {
            let row = y as usize * self.w as usize;
            for x in 0..self.w {
                let i = row + x as usize;
                let a = self.cur[i];
                if !self.stale && a == self.prev[i] {
                    continue;
                }
                queue!(self.out, cursor::MoveTo(x, y))?;
                if cur_fg != Some(a.fg) {
                    queue!(self.out, SetForegroundColor(a.fg))?;
                    cur_fg = Some(a.fg);
                }
                if cur_bg != Some(a.bg) {
                    queue!(self.out, SetBackgroundColor(a.bg))?;
                    cur_bg = Some(a.bg);
                }
                queue!(self.out, Print(a.ch))?;
            }
        }

        queue!(self.out, ResetColor, terminal::EndSynchronizedUpdate)?;
        self.out.flush()?;
        self.prev.copy_from_slice(&self.cur);
        self.stale = false;
        Ok(())
    }
}

impl Drop for TerminalSurface {
    fn drop(&mut self) {
        let _ = execute!(
            self.out,
            DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen,
            ResetColor
        );
        let _ = terminal::disable_raw_mode();
    }
}
