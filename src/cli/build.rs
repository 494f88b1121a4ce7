//! Build command implementation - interactive TUI builder.

// Register and immediate arithmetic in the TUI uses intentional
// narrowing casts for display and clamping
#![allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]

use super::CliError;
use super::output::group_nibbles;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use rivet::registers::ABI_NAMES;
use rivet::{FieldKind, Format, InstructionSpec, decompose, encode};
use std::io::stdout;
use std::time::Duration;

/// Execute the build command.
///
/// # Errors
///
/// Returns an error if the TUI fails.
pub(crate) fn execute(format: Format) -> Result<(), CliError> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).map_err(|e| CliError::new(e.to_string()))?;

    let mut app = App::new(format);

    loop {
        terminal
            .draw(|f| ui(f, &app))
            .map_err(|e| CliError::new(e.to_string()))?;

        if event::poll(Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
            && handle_key(&mut app, key.code)
        {
            break;
        }
    }

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    Ok(())
}

/// Which input group receives keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Format,
    Opcode,
    Funct3,
    Funct7,
    Immediate,
    Registers,
}

/// Register operand slots, in the selection order the form walks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Rs1,
    Rs2,
    Rd,
}

/// App state for the TUI.
struct App {
    spec: InstructionSpec,
    focus: Focus,
    cursor: usize,
}

impl App {
    fn new(format: Format) -> Self {
        Self {
            spec: InstructionSpec::new(format),
            focus: Focus::Format,
            cursor: 0,
        }
    }

    /// Focusable groups for the current format, in Tab order.
    fn focus_ring(&self) -> Vec<Focus> {
        let format = self.spec.format;
        let mut ring = vec![Focus::Format, Focus::Opcode, Focus::Funct3];
        if format.uses_funct7() {
            ring.push(Focus::Funct7);
        }
        if format.uses_immediate() {
            ring.push(Focus::Immediate);
        }
        ring.push(Focus::Registers);
        ring
    }

    fn next_focus(&mut self) {
        let ring = self.focus_ring();
        let pos = ring.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = ring[(pos + 1) % ring.len()];
    }

    fn prev_focus(&mut self) {
        let ring = self.focus_ring();
        let pos = ring.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = ring[(pos + ring.len() - 1) % ring.len()];
    }

    /// Switch format: registers reset and the immediate is clamped to
    /// the new slot's range, mirroring the form's behavior.
    fn set_format(&mut self, format: Format) {
        if self.spec.format == format {
            return;
        }
        self.spec.format = format;
        self.spec.rs1 = None;
        self.spec.rs2 = None;
        self.spec.rd = None;
        self.spec.immediate = self.spec.immediate.clamp(0, format.max_unsigned() as i32);
    }

    fn cycle_format(&mut self, step: isize) {
        let pos = Format::ALL
            .iter()
            .position(|f| *f == self.spec.format)
            .unwrap_or(0) as isize;
        let len = Format::ALL.len() as isize;
        let next = (pos + step).rem_euclid(len) as usize;
        self.set_format(Format::ALL[next]);
    }

    /// The first register slot the format needs that is still unset.
    fn next_needed_slot(&self) -> Option<Slot> {
        let format = self.spec.format;
        if format.uses_rs1() && self.spec.rs1.is_none() {
            Some(Slot::Rs1)
        } else if format.uses_rs2() && self.spec.rs2.is_none() {
            Some(Slot::Rs2)
        } else if format.uses_rd() && self.spec.rd.is_none() {
            Some(Slot::Rd)
        } else {
            None
        }
    }

    fn assign_register(&mut self) {
        let index = Some(self.cursor as u8);
        match self.next_needed_slot() {
            Some(Slot::Rs1) => self.spec.rs1 = index,
            Some(Slot::Rs2) => self.spec.rs2 = index,
            Some(Slot::Rd) => self.spec.rd = index,
            None => {}
        }
    }

    fn clear_registers(&mut self) {
        self.spec.rs1 = None;
        self.spec.rs2 = None;
        self.spec.rd = None;
    }

    /// Append a bit to the focused pattern, shifting out the oldest
    /// character once the slot is full (left-to-right entry).
    fn push_bit(&mut self, bit: char) {
        let (field, width) = match self.focus {
            Focus::Opcode => (&mut self.spec.opcode, 7),
            Focus::Funct3 => (&mut self.spec.funct3, 3),
            Focus::Funct7 => (&mut self.spec.funct7, 7),
            _ => return,
        };
        field.push(bit);
        while field.len() > width {
            field.remove(0);
        }
    }

    fn pop_bit(&mut self) {
        let field = match self.focus {
            Focus::Opcode => &mut self.spec.opcode,
            Focus::Funct3 => &mut self.spec.funct3,
            Focus::Funct7 => &mut self.spec.funct7,
            _ => return,
        };
        let _ = field.pop();
    }

    fn max_immediate(&self) -> i32 {
        self.spec.format.max_unsigned() as i32
    }

    fn adjust_immediate(&mut self, delta: i32) {
        self.spec.immediate = self
            .spec
            .immediate
            .saturating_add(delta)
            .clamp(0, self.max_immediate());
    }

    fn push_immediate_digit(&mut self, digit: u32) {
        let grown = i64::from(self.spec.immediate) * 10 + i64::from(digit);
        self.spec.immediate = grown.min(i64::from(self.max_immediate())) as i32;
    }

    fn pop_immediate_digit(&mut self) {
        self.spec.immediate /= 10;
    }
}

/// Handle one key press; returns true when the app should exit.
fn handle_key(app: &mut App, code: KeyCode) -> bool {
    match code {
        KeyCode::Esc | KeyCode::Char('q') => return true,
        KeyCode::Tab => app.next_focus(),
        KeyCode::BackTab => app.prev_focus(),
        _ => match app.focus {
            Focus::Format => match code {
                KeyCode::Left => app.cycle_format(-1),
                KeyCode::Right => app.cycle_format(1),
                KeyCode::Char(c) => {
                    if let Ok(format) = c.to_string().parse::<Format>() {
                        app.set_format(format);
                    }
                }
                _ => {}
            },
            Focus::Opcode | Focus::Funct3 | Focus::Funct7 => match code {
                KeyCode::Char(bit @ ('0' | '1')) => app.push_bit(bit),
                KeyCode::Backspace => app.pop_bit(),
                _ => {}
            },
            Focus::Immediate => match code {
                KeyCode::Char(d @ '0'..='9') => {
                    app.push_immediate_digit(u32::from(d) - u32::from('0'));
                }
                KeyCode::Backspace => app.pop_immediate_digit(),
                KeyCode::Up => app.adjust_immediate(1),
                KeyCode::Down => app.adjust_immediate(-1),
                KeyCode::PageUp => app.adjust_immediate(16),
                KeyCode::PageDown => app.adjust_immediate(-16),
                _ => {}
            },
            Focus::Registers => match code {
                KeyCode::Left => app.cursor = (app.cursor + 31) % 32,
                KeyCode::Right => app.cursor = (app.cursor + 1) % 32,
                KeyCode::Up => app.cursor = (app.cursor + 28) % 32,
                KeyCode::Down => app.cursor = (app.cursor + 4) % 32,
                KeyCode::Enter | KeyCode::Char(' ') => app.assign_register(),
                KeyCode::Char('c') => app.clear_registers(),
                _ => {}
            },
        },
    }
    false
}

fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(18),   // Main content
            Constraint::Length(3), // Footer
        ])
        .split(f.area());

    render_header(f, chunks[0], app);

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[1]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Format selector
            Constraint::Length(6), // Field editors
            Constraint::Length(5), // Bit-field strip
            Constraint::Min(4),    // Output
        ])
        .split(main_chunks[0]);

    render_format_selector(f, left[0], app);
    render_field_editors(f, left[1], app);
    render_bit_strip(f, left[2], app);
    render_output(f, left[3], app);

    render_registers(f, main_chunks[1], app);
    render_footer(f, chunks[2], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let title = format!(
        " Rivet Instruction Builder | {}-type | {} ",
        app.spec.format,
        encode(&app.spec).hex
    );

    let header = Paragraph::new(title)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(header, area);
}

fn render_format_selector(f: &mut Frame, area: Rect, app: &App) {
    let mut spans = Vec::new();
    for format in Format::ALL {
        let style = if format == app.spec.format {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!(" {format} "), style));
        spans.push(Span::raw(" "));
    }

    let lines = vec![
        Line::from(spans),
        Line::from(Span::styled(
            app.spec.format.description(),
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .title(block_title(" Format ", app.focus == Focus::Format));
    let widget = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });

    f.render_widget(widget, area);
}

fn render_field_editors(f: &mut Frame, area: Rect, app: &App) {
    let format = app.spec.format;
    let mut lines = Vec::new();

    lines.push(editor_line(
        "opcode",
        app.spec.opcode_bits(),
        true,
        app.focus == Focus::Opcode,
    ));
    lines.push(editor_line(
        "funct3",
        app.spec.funct3_bits(),
        true,
        app.focus == Focus::Funct3,
    ));
    lines.push(editor_line(
        "funct7",
        app.spec.funct7_bits(),
        format.uses_funct7(),
        app.focus == Focus::Funct7,
    ));

    let imm_value = if format.uses_immediate() {
        format!(
            "{}  (0x{:X})  max 0x{:X}",
            app.spec.immediate,
            app.spec.immediate,
            format.max_unsigned()
        )
    } else {
        String::new()
    };
    lines.push(editor_line(
        "imm",
        imm_value,
        format.uses_immediate(),
        app.focus == Focus::Immediate,
    ));

    let block = Block::default().borders(Borders::ALL).title(" Fields ");
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn editor_line(label: &str, value: String, used: bool, focused: bool) -> Line<'static> {
    if !used {
        return Line::from(Span::styled(
            format!("  {label:<7} (not used by this format)"),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let marker = if focused { "> " } else { "  " };
    let value_style = if focused {
        Style::default().add_modifier(Modifier::REVERSED)
    } else {
        Style::default()
    };

    Line::from(vec![
        Span::styled(
            format!("{marker}{label:<7} "),
            Style::default().fg(Color::Gray),
        ),
        Span::styled(value, value_style),
    ])
}

fn render_bit_strip(f: &mut Frame, area: Rect, app: &App) {
    let fields = decompose(&app.spec);

    let mut value_spans = Vec::new();
    let mut legend_spans = Vec::new();
    for field in &fields {
        let style = Style::default().fg(kind_color(field.kind));
        value_spans.push(Span::styled(field.value.clone(), style));
        value_spans.push(Span::raw(" "));
        legend_spans.push(Span::styled(
            format!("{}({}) ", field.name, field.width),
            style,
        ));
    }

    let lines = vec![Line::from(value_spans), Line::from(legend_spans)];
    let block = Block::default().borders(Borders::ALL).title(" Bit fields ");
    f.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: true }), area);
}

fn render_output(f: &mut Frame, area: Rect, app: &App) {
    let encoded = encode(&app.spec);

    let lines = vec![
        Line::from(format!("Binary: {}", group_nibbles(&encoded.binary))),
        Line::from(format!("Hex:    {}", encoded.hex)),
    ];

    let block = Block::default().borders(Borders::ALL).title(" Output ");
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_registers(f: &mut Frame, area: Rect, app: &App) {
    let mut lines = Vec::new();

    // 8 rows of 4, matching the cursor movement
    for row in 0..8 {
        let mut spans = Vec::new();
        for col in 0..4 {
            let index = row * 4 + col;
            spans.push(Span::styled(register_cell(index), register_style(app, index)));
        }
        lines.push(Line::from(spans));
    }

    lines.push(Line::from(""));
    lines.push(assignment_line(app, Slot::Rs1, app.spec.rs1));
    lines.push(assignment_line(app, Slot::Rs2, app.spec.rs2));
    lines.push(assignment_line(app, Slot::Rd, app.spec.rd));

    lines.push(Line::from(""));
    let hint = match app.next_needed_slot() {
        Some(slot) => format!("Enter assigns {}", slot_label(slot)),
        None => "all slots filled (c to clear)".to_string(),
    };
    lines.push(Line::from(Span::styled(
        hint,
        Style::default().fg(Color::DarkGray),
    )));

    let block = Block::default()
        .borders(Borders::ALL)
        .title(block_title(" Registers ", app.focus == Focus::Registers));
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn register_cell(index: usize) -> String {
    format!("x{index:<2} {:<5}", ABI_NAMES[index])
}

fn register_style(app: &App, index: usize) -> Style {
    let selected = Some(index as u8);
    let mut style = if app.spec.rs1 == selected {
        Style::default().fg(slot_color(Slot::Rs1)).add_modifier(Modifier::BOLD)
    } else if app.spec.rs2 == selected {
        Style::default().fg(slot_color(Slot::Rs2)).add_modifier(Modifier::BOLD)
    } else if app.spec.rd == selected {
        Style::default().fg(slot_color(Slot::Rd)).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    if app.focus == Focus::Registers && app.cursor == index {
        style = style.add_modifier(Modifier::REVERSED);
    }
    style
}

fn assignment_line(app: &App, slot: Slot, value: Option<u8>) -> Line<'static> {
    let used = match slot {
        Slot::Rs1 => app.spec.format.uses_rs1(),
        Slot::Rs2 => app.spec.format.uses_rs2(),
        Slot::Rd => app.spec.format.uses_rd(),
    };

    let text = if !used {
        "not used".to_string()
    } else {
        value.map_or_else(
            || "-".to_string(),
            |r| format!("x{r} ({})", ABI_NAMES[usize::from(r)]),
        )
    };

    let style = if used {
        Style::default().fg(slot_color(slot))
    } else {
        Style::default().fg(Color::DarkGray)
    };

    Line::from(vec![
        Span::styled(format!("{:<4} ", slot_label(slot)), style),
        Span::raw(text),
    ])
}

fn slot_label(slot: Slot) -> &'static str {
    match slot {
        Slot::Rs1 => "rs1",
        Slot::Rs2 => "rs2",
        Slot::Rd => "rd",
    }
}

fn slot_color(slot: Slot) -> Color {
    match slot {
        Slot::Rs1 => Color::Blue,
        Slot::Rs2 => Color::Green,
        Slot::Rd => Color::Magenta,
    }
}

fn kind_color(kind: FieldKind) -> Color {
    match kind {
        FieldKind::Funct7 => Color::Red,
        FieldKind::Rs2 => Color::Green,
        FieldKind::Rs1 => Color::Blue,
        FieldKind::Funct3 => Color::Yellow,
        FieldKind::Rd => Color::Magenta,
        FieldKind::Opcode => Color::Gray,
        FieldKind::Imm => Color::LightMagenta,
    }
}

fn block_title(title: &str, focused: bool) -> Span<'_> {
    if focused {
        Span::styled(
            title,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )
    } else {
        Span::raw(title)
    }
}

fn render_footer(f: &mut Frame, area: Rect, app: &App) {
    let controls = match app.focus {
        Focus::Format => " [Tab] Next  [<-/->] or letter: format  [q] Quit ",
        Focus::Opcode | Focus::Funct3 | Focus::Funct7 => {
            " [0/1] Enter bits  [Backspace] Delete  [Tab] Next  [q] Quit "
        }
        Focus::Immediate => {
            " [0-9] Type value  [Up/Down] +-1  [PgUp/PgDn] +-16  [Backspace] Delete  [q] Quit "
        }
        Focus::Registers => " [Arrows] Move  [Enter] Assign  [c] Clear  [Tab] Next  [q] Quit ",
    };

    let footer = Paragraph::new(controls)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(footer, area);
}
