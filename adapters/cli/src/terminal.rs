use std::io::{BufRead, Write};

use anyhow::{Context, Result as AnyResult};
use grid_walk_rendering::{FrameInput, Glyphs, Presentation, RenderingBackend, Scene};
use log::debug;

use crate::config::KeyBindings;

/// Line-oriented backend: reads words from `input`, draws frames to `output`.
#[derive(Debug)]
pub(crate) struct TerminalBackend<R, W> {
    input: R,
    output: W,
    keys: KeyBindings,
}

impl<R, W> TerminalBackend<R, W>
where
    R: BufRead,
    W: Write,
{
    pub(crate) fn new(input: R, output: W, keys: KeyBindings) -> Self {
        Self {
            input,
            output,
            keys,
        }
    }

    fn draw(&mut self, scene: &Scene, glyphs: &Glyphs) -> AnyResult<()> {
        writeln!(self.output)?;
        for line in scene.render_lines(glyphs) {
            writeln!(self.output, "{line}")?;
        }
        for line in scene.status_lines() {
            writeln!(self.output, "{line}")?;
        }
        self.output.flush().context("failed to flush frame")
    }
}

impl<R, W> RenderingBackend for TerminalBackend<R, W>
where
    R: BufRead,
    W: Write,
{
    fn run<F>(mut self, presentation: Presentation, mut update_scene: F) -> AnyResult<()>
    where
        F: FnMut(FrameInput, &mut Scene) + 'static,
    {
        let Presentation {
            title,
            glyphs,
            mut scene,
        } = presentation;

        writeln!(self.output, "{title}")?;
        writeln!(self.output, "{}", self.keys.help_line())?;
        self.draw(&scene, &glyphs)?;

        let mut line = String::new();
        loop {
            line.clear();
            let read = self
                .input
                .read_line(&mut line)
                .context("failed to read player input")?;
            if read == 0 {
                debug!("[Terminal] input closed");
                return Ok(());
            }

            for word in line.split_whitespace() {
                let Some(input) = self.keys.frame_input(word) else {
                    writeln!(self.output, "Unknown command `{word}`")?;
                    continue;
                };
                if input.quit {
                    debug!("[Terminal] quit requested");
                    return Ok(());
                }
                update_scene(input, &mut scene);
            }

            self.draw(&scene, &glyphs)?;
        }
    }
}
