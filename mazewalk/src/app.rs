use std::{io, time::Duration};

use pmaze::{dims::Dims, Maze, MazeError, MazeParams};
use thiserror::Error;

use crate::{
    renderer::{RenderStyle, TextRenderer},
    settings::{Settings, SettingsError},
};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Maze error: {0}")]
    Maze(#[from] MazeError),
    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),
    #[error("Terminal error: {0}")]
    Io(#[from] io::Error),
    #[error("Cell size must be at least 2x2 characters, got {0}")]
    CellSize(Dims),
    #[error("No path from the entrance to the exit")]
    Unsolved,
}

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub rows: usize,
    pub cols: usize,
    pub seed: Option<u64>,
    pub cell_size: Dims,
    pub delay: Option<Duration>,
    pub solve: bool,
    pub style: RenderStyle,
}

impl RunConfig {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            rows: settings.get_rows(),
            cols: settings.get_cols(),
            seed: None,
            cell_size: settings.get_cell_size(),
            delay: settings.get_delay(),
            solve: true,
            style: RenderStyle {
                commit_char: settings.get_commit_char(),
                undo_char: settings.get_undo_char(),
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct Outcome {
    pub seed: u64,
    /// Cells on the path from the entrance to the exit, `None` if solving was skipped.
    pub path: Option<Vec<Dims>>,
    pub frame: String,
    pub animated: bool,
}

impl Outcome {
    /// One line result shown after the maze.
    pub fn summary(&self) -> String {
        match &self.path {
            Some(path) => format!("Solved, path of {} cells", path.len()),
            None => "Solving skipped".to_string(),
        }
    }
}

/// Generates and optionally solves one maze, drawing it into `out`.
pub fn run<W: io::Write>(config: &RunConfig, out: W) -> Result<Outcome, AppError> {
    if config.cell_size.0 < 2 || config.cell_size.1 < 2 {
        return Err(AppError::CellSize(config.cell_size));
    }

    let mut params = MazeParams::new(config.rows, config.cols).cell_size(config.cell_size);
    if let Some(seed) = config.seed {
        params = params.seed(seed);
    }

    // validate before touching the terminal
    let Dims(cw, ch) = config.cell_size;
    let canvas = i32::try_from(config.cols)
        .ok()
        .zip(i32::try_from(config.rows).ok())
        .filter(|&(cols, rows)| cols > 0 && rows > 0)
        .and_then(|(cols, rows)| {
            Some(Dims(
                cols.checked_mul(cw)?.checked_add(1)?,
                rows.checked_mul(ch)?.checked_add(1)?,
            ))
        })
        .ok_or(MazeError::InvalidDimensions {
            cols: config.cols,
            rows: config.rows,
        })?;

    let mut renderer = TextRenderer::new(canvas, out, config.style, config.delay);
    renderer.begin()?;

    let mut maze = Maze::new(params, &mut renderer)?;
    log::info!("Generated {}x{} maze, seed {}", config.cols, config.rows, maze.seed());

    let path = if config.solve {
        match maze.solve_path(&mut renderer)? {
            Some(path) => Some(path),
            None => {
                renderer.finish()?;
                return Err(AppError::Unsolved);
            }
        }
    } else {
        None
    };

    renderer.finish()?;

    Ok(Outcome {
        seed: maze.seed(),
        path,
        frame: renderer.render(),
        animated: renderer.is_animated(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(rows: usize, cols: usize) -> RunConfig {
        RunConfig {
            rows,
            cols,
            seed: Some(5),
            ..RunConfig::from_settings(&Settings::new())
        }
    }

    #[test]
    fn solves_and_draws() {
        let outcome = run(&config(3, 4), Vec::new()).unwrap();
        assert_eq!(outcome.seed, 5);

        let path = outcome.path.as_ref().unwrap();
        assert_eq!(path.first(), Some(&Dims(0, 0)));
        assert_eq!(path.last(), Some(&Dims(3, 2)));

        let lines: Vec<_> = outcome.frame.lines().collect();
        assert_eq!(outcome.summary(), format!("Solved, path of {} cells", path.len()));
        assert_eq!(lines.len(), 3 * 2 + 1);
        assert!(lines.iter().all(|l| l.chars().count() == 4 * 4 + 1));
        // entrance and exit gaps
        assert!(lines[0].starts_with("+   +"));
        assert!(lines[6].ends_with("+   +"));
        assert!(outcome.frame.contains('*'));
    }

    #[test]
    fn skip_solving() {
        let mut config = config(2, 2);
        config.solve = false;
        let outcome = run(&config, Vec::new()).unwrap();
        assert!(outcome.path.is_none());
        assert!(!outcome.frame.contains('*'));
        assert_eq!(outcome.summary(), "Solving skipped");
    }

    #[test]
    fn rejects_bad_sizes() {
        assert!(matches!(
            run(&config(0, 3), Vec::new()),
            Err(AppError::Maze(MazeError::InvalidDimensions { .. }))
        ));

        let mut small = config(2, 2);
        small.cell_size = Dims(1, 2);
        assert!(matches!(run(&small, Vec::new()), Err(AppError::CellSize(_))));
    }
}
