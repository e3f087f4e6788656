//! Styles command implementation.

use crate::feedback::{render_bar, BarStyle, SpinnerStyle};
use crate::terminal::Theme;

const SAMPLE_WIDTH: usize = 12;
const SAMPLE_FILL: f64 = 0.6;

/// Up to the first eight frames of a spinner style, space separated.
pub fn spinner_sample(style: SpinnerStyle) -> String {
    style
        .glyphs()
        .iter()
        .take(8)
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}

/// A 60% bar in the given style.
pub fn bar_sample(style: BarStyle) -> String {
    render_bar(SAMPLE_FILL, SAMPLE_WIDTH, style.into())
}

/// Print every spinner style, bar style and theme.
pub fn list_styles() {
    println!("\x1b[1mSpinner styles\x1b[0m");
    for style in SpinnerStyle::ALL {
        println!("  \x1b[36m{:<10}\x1b[0m {}", style.name(), spinner_sample(style));
    }
    println!();

    println!("\x1b[1mBar styles\x1b[0m");
    for style in BarStyle::ALL {
        println!("  \x1b[36m{:<10}\x1b[0m [{}]", style.name(), bar_sample(style));
    }
    println!();

    println!("\x1b[1mThemes\x1b[0m");
    for theme in Theme::ALL {
        println!("  \x1b[36m{}\x1b[0m", theme.name());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_sample_classic() {
        assert_eq!(spinner_sample(SpinnerStyle::Classic), "| / - \\");
    }

    #[test]
    fn test_spinner_sample_is_capped() {
        for style in SpinnerStyle::ALL {
            assert!(spinner_sample(style).split(' ').count() <= 8);
        }
    }

    #[test]
    fn test_bar_sample_equals() {
        assert_eq!(bar_sample(BarStyle::Equals), "=======     ");
    }
}
