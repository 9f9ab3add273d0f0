//! Terminal setup/teardown and drawing for the interactive client.
use std::io::{self, Stdout, Write};

use anyhow::Result;
use crossterm::{
    cursor::{Hide, MoveTo, MoveToNextLine, Show},
    execute, queue,
    style::Print,
    terminal::{
        Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
        enable_raw_mode,
    },
};

pub fn init() -> Result<Stdout> {
    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, Hide)?;

    Ok(stdout)
}

pub fn restore() -> Result<()> {
    execute!(io::stdout(), Show, LeaveAlternateScreen)?;
    disable_raw_mode()?;
    Ok(())
}

/// Restores the terminal when dropped, including on early return or panic.
pub struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = restore();
    }
}

/// Redraws the whole screen: map rows, then each line of `footer`.
pub fn draw<W: Write>(out: &mut W, rows: &[String], footer: &[&str]) -> Result<()> {
    queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
    let lines = rows
        .iter()
        .map(String::as_str)
        .chain(std::iter::once(""))
        .chain(footer.iter().copied());
    for line in lines {
        queue!(out, Print(line), MoveToNextLine(1))?;
    }
    out.flush()?;
    Ok(())
}
