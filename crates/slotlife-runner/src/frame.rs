//! Terminal frame drawing.

use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Print, Stylize},
    terminal::{Clear, ClearType},
};
use slotlife_world::{Chance, Glyph, Simulation, Tint};
use std::io::{self, Write};

fn queue_glyph<W: Write>(out: &mut W, glyph: Glyph, color: bool) -> io::Result<()> {
    let symbol = glyph.symbol();
    match glyph.tint() {
        Some(Tint::Male) if color => queue!(out, Print(symbol.cyan())),
        Some(Tint::Female) if color => queue!(out, Print(symbol.magenta())),
        Some(Tint::Expecting) if color => queue!(out, Print(symbol.yellow())),
        _ => queue!(out, Print(symbol)),
    }
}

/// Queue one full frame: the grid, a rule, and the status line
pub fn draw<W: Write, C: Chance>(out: &mut W, sim: &Simulation<C>, color: bool) -> io::Result<()> {
    queue!(out, MoveTo(0, 0), Clear(ClearType::All))?;
    for row in sim.render_rows() {
        for glyph in row {
            queue_glyph(out, glyph, color)?;
        }
        queue!(out, Print("\r\n"))?;
    }
    queue!(
        out,
        Print("-".repeat(sim.grid().width())),
        Print("\r\n"),
        Print(format!("{} | Tick: {}\r\n", sim.stats(), sim.ticks()))
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotlife_core::{Position, Sex, WorldConfig};

    const CLEAR_ALL: &str = "\x1b[2J";

    fn empty_world(width: usize, height: usize) -> Simulation {
        Simulation::from_config(&WorldConfig {
            width,
            height,
            seed: Some(1),
            population_density: 0.0,
        })
        .unwrap()
    }

    /// The frame text after the screen-clearing prefix
    fn frame_body(sim: &Simulation, color: bool) -> String {
        let mut out = Vec::new();
        draw(&mut out, sim, color).unwrap();
        let frame = String::from_utf8(out).unwrap();
        let start = frame.find(CLEAR_ALL).unwrap() + CLEAR_ALL.len();
        frame[start..].to_string()
    }

    #[test]
    fn test_plain_frame() {
        let mut sim = empty_world(3, 2);
        sim.spawn(Position::new(1, 0), Sex::Male, 100.0).unwrap();
        sim.spawn(Position::new(2, 1), Sex::Female, 15.0).unwrap();

        let body = frame_body(&sim, false);
        let lines: Vec<&str> = body.lines().collect();

        assert_eq!(
            lines,
            vec![
                " @ ",
                "  .",
                "---",
                "Total: 2 (m/f: 1.0) | Energy: 57.5 (max: 100.0) | Tick: 0"
            ]
        );
    }

    #[test]
    fn test_colored_frame_tints_occupants() {
        let mut sim = empty_world(2, 1);
        sim.spawn(Position::new(0, 0), Sex::Female, 50.0).unwrap();

        let plain = frame_body(&sim, false);
        let colored = frame_body(&sim, true);

        assert!(!plain.contains('\x1b'));
        assert!(colored.contains('\x1b'));
        assert!(colored.contains('O'));
        assert!(colored.ends_with("| Tick: 0\r\n"));
    }
}
