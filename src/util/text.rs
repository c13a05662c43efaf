//! Text box measurement used for label sizing and axis layout.

/// Width and height of a rendered string.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextBox {
    /// Horizontal extent in pixels.
    pub width: f64,
    /// Vertical extent in pixels.
    pub height: f64,
}

/// Measures a string at a given font size.
///
/// Hosts with access to real font metrics implement this; the core only
/// needs bounding boxes.
pub trait TextMeasure {
    /// Bounding box of `text` rendered at `font_size` pixels.
    fn measure(&self, text: &str, font_size: f64) -> TextBox;
}

/// Fixed-advance approximation: every character is `advance × font_size`
/// wide and a line is `line_height × font_size` tall.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApproxTextMeasure {
    /// Character advance as a fraction of the font size.
    pub advance: f64,
    /// Line height as a fraction of the font size.
    pub line_height: f64,
}

impl Default for ApproxTextMeasure {
    fn default() -> Self {
        Self {
            advance: 0.6,
            line_height: 1.2,
        }
    }
}

impl TextMeasure for ApproxTextMeasure {
    fn measure(&self, text: &str, font_size: f64) -> TextBox {
        let chars = text.chars().count() as f64;
        TextBox {
            width: chars * self.advance * font_size,
            height: if text.is_empty() {
                0.0
            } else {
                self.line_height * font_size
            },
        }
    }
}

impl<T: TextMeasure + ?Sized> TextMeasure for &T {
    fn measure(&self, text: &str, font_size: f64) -> TextBox {
        (**self).measure(text, font_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn approx_scales_with_font_size() {
        let m = ApproxTextMeasure::default();
        let a = m.measure("abcd", 10.0);
        assert!((a.width - 24.0).abs() < 1e-9);
        assert!((a.height - 12.0).abs() < 1e-9);
        let b = m.measure("abcd", 20.0);
        assert!((b.width - 2.0 * a.width).abs() < 1e-9);
    }

    #[test]
    fn counts_chars_not_bytes() {
        let m = ApproxTextMeasure::default();
        assert_eq!(m.measure("äö", 10.0).width, m.measure("ab", 10.0).width);
        assert_eq!(m.measure("", 10.0), TextBox::default());
    }
}
