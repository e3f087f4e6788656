//! Matrix and fire command implementations.

use super::AnimateCommandResult;
use crate::config::duration_from_secs;
use crate::feedback::{AnimationError, FireOptions, MatrixRainOptions};
use crate::ui::TerminalUi;

/// Command-line values that replace `[effects]` settings for one run.
#[derive(Debug, Clone, Default)]
pub struct MatrixOverrides {
    /// Column density.
    pub density: Option<f64>,
    /// Run time in seconds.
    pub duration: Option<f64>,
    /// RNG seed.
    pub seed: Option<u64>,
}

impl MatrixOverrides {
    /// Apply the overrides to options built from config.
    pub fn apply(&self, mut options: MatrixRainOptions) -> Result<MatrixRainOptions, AnimationError> {
        if let Some(density) = self.density {
            options.density = density;
        }
        if let Some(secs) = self.duration {
            options.duration = duration_from_secs(secs)?;
        }
        options.seed = self.seed.or(options.seed);
        Ok(options)
    }
}

/// Command-line values that replace `[effects]` fire settings for one run.
#[derive(Debug, Clone, Default)]
pub struct FireOverrides {
    /// Rows of fire.
    pub height: Option<usize>,
    /// Run time in seconds.
    pub duration: Option<f64>,
    /// Maximum cooling per frame.
    pub cooling: Option<u8>,
    /// RNG seed.
    pub seed: Option<u64>,
}

impl FireOverrides {
    /// Apply the overrides to options built from config.
    pub fn apply(&self, mut options: FireOptions) -> Result<FireOptions, AnimationError> {
        if let Some(height) = self.height {
            options.height = height;
        }
        if let Some(secs) = self.duration {
            options.duration = duration_from_secs(secs)?;
        }
        if let Some(cooling) = self.cooling {
            options.max_cooling = cooling;
        }
        options.seed = self.seed.or(options.seed);
        Ok(options)
    }
}

/// Run matrix rain to completion.
pub fn matrix(ui: &TerminalUi, overrides: &MatrixOverrides) -> AnimateCommandResult {
    let options = overrides.apply(ui.matrix_options()?)?;
    ui.matrix_rain(&options)?.run()?;
    Ok(())
}

/// Run the fire to completion.
pub fn fire(ui: &TerminalUi, overrides: &FireOverrides) -> AnimateCommandResult {
    let options = overrides.apply(ui.fire_options()?)?;
    ui.fire(&options)?.run()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use crate::config::GlowConfig;
    use crate::cli::commands::AnimateCommandError;
    use crate::feedback::ManualClock;
    use crate::lifecycle::ActiveSessions;
    use crate::terminal::{RecordingRenderer, RenderOp};

    fn ui(renderer: Arc<RecordingRenderer>) -> TerminalUi {
        TerminalUi::with_parts(
            GlowConfig::default(),
            renderer,
            Arc::new(ActiveSessions::new()),
            Arc::new(ManualClock::new()),
        )
        .unwrap()
    }

    #[test]
    fn test_matrix_overrides_replace_config() {
        let overrides = MatrixOverrides {
            density: Some(0.5),
            duration: Some(1.5),
            seed: Some(3),
        };
        let options = overrides.apply(MatrixRainOptions::default()).unwrap();
        assert_eq!(options.density, 0.5);
        assert_eq!(options.duration, Duration::from_millis(1500));
        assert_eq!(options.seed, Some(3));
    }

    #[test]
    fn test_fire_overrides_keep_unset_values() {
        let overrides = FireOverrides {
            cooling: Some(0),
            ..FireOverrides::default()
        };
        let options = overrides.apply(FireOptions::default()).unwrap();
        assert_eq!(options.max_cooling, 0);
        assert_eq!(options.height, FireOptions::default().height);
    }

    #[test]
    fn test_matrix_rejects_bad_density() {
        let renderer = Arc::new(RecordingRenderer::new());
        let overrides = MatrixOverrides {
            density: Some(2.0),
            duration: Some(0.0),
            ..MatrixOverrides::default()
        };
        let err = matrix(&ui(renderer.clone()), &overrides).unwrap_err();
        assert!(matches!(
            err,
            AnimateCommandError::Animation(AnimationError::InvalidDensity(_))
        ));
        assert!(renderer.ops().is_empty());
    }

    #[test]
    fn test_fire_runs_and_clears() {
        let renderer = Arc::new(RecordingRenderer::new());
        let overrides = FireOverrides {
            height: Some(3),
            duration: Some(0.02),
            seed: Some(9),
            ..FireOverrides::default()
        };
        fire(&ui(renderer.clone()), &overrides).unwrap();
        assert_eq!(renderer.count(&RenderOp::HideCursor), 1);
        assert_eq!(renderer.count(&RenderOp::ShowCursor), 1);
        assert_eq!(renderer.ops().last(), Some(&RenderOp::Flush));
    }
}
