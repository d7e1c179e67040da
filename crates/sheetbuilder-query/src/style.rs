//! Criteria over the composed style of a cell.
//!
//! Cells without a style are tested against an empty [`Style`], so every
//! property condition fails for them while an empty criterion still passes.
//! The same holds for a missing font or border.

use once_cell::sync::Lazy;
use sheetbuilder_common::{BorderSide, BorderStyle, Color, FontStyle, ForegroundFill, Keyword};
use sheetbuilder_workbook::{Border, Font, Style};

use crate::criterion::Criterion;

static EMPTY_FONT: Lazy<Font> = Lazy::new(Font::default);
static EMPTY_BORDER: Lazy<Border> = Lazy::new(Border::default);

#[derive(Debug, Default)]
pub struct StyleCriterion<'w> {
    inner: Criterion<'w, Style>,
}

impl<'w> StyleCriterion<'w> {
    pub(crate) fn test(&self, style: &Style) -> bool {
        self.inner.test(style)
    }

    pub fn foreground(&mut self, color: Color) -> &mut Self {
        self.inner.push(move |s| s.foreground == Some(color));
        self
    }

    pub fn foreground_matching(&mut self, predicate: impl Fn(Color) -> bool + 'w) -> &mut Self {
        self.inner.push(move |s| s.foreground.is_some_and(&predicate));
        self
    }

    pub fn background(&mut self, color: Color) -> &mut Self {
        self.inner.push(move |s| s.background == Some(color));
        self
    }

    pub fn background_matching(&mut self, predicate: impl Fn(Color) -> bool + 'w) -> &mut Self {
        self.inner.push(move |s| s.background.is_some_and(&predicate));
        self
    }

    pub fn fill(&mut self, fill: ForegroundFill) -> &mut Self {
        self.inner.push(move |s| s.fill == Some(fill));
        self
    }

    pub fn indent(&mut self, indent: u32) -> &mut Self {
        self.inner.push(move |s| s.indent == Some(indent));
        self
    }

    pub fn indent_matching(&mut self, predicate: impl Fn(u32) -> bool + 'w) -> &mut Self {
        self.inner.push(move |s| s.indent.is_some_and(&predicate));
        self
    }

    pub fn rotation(&mut self, rotation: u32) -> &mut Self {
        self.inner.push(move |s| s.rotation == Some(rotation));
        self
    }

    pub fn rotation_matching(&mut self, predicate: impl Fn(u32) -> bool + 'w) -> &mut Self {
        self.inner.push(move |s| s.rotation.is_some_and(&predicate));
        self
    }

    pub fn format(&mut self, format: &str) -> &mut Self {
        let format = format.to_string();
        self.inner.push(move |s| s.format.as_deref() == Some(format.as_str()));
        self
    }

    pub fn format_matching(&mut self, predicate: impl Fn(&str) -> bool + 'w) -> &mut Self {
        self.inner
            .push(move |s| s.format.as_deref().is_some_and(&predicate));
        self
    }

    /// Text wrapping; an unset flag counts as `false`.
    pub fn wrap(&mut self, wrap: bool) -> &mut Self {
        self.inner.push(move |s| s.wrap.unwrap_or(false) == wrap);
        self
    }

    pub fn font<F>(&mut self, build: F) -> &mut Self
    where
        F: FnOnce(&mut FontCriterion<'w>),
    {
        let mut font = FontCriterion::default();
        build(&mut font);
        self.inner
            .push(move |s| font.test(s.font.as_ref().unwrap_or(&EMPTY_FONT)));
        self
    }

    /// Conditions every one of the four borders has to meet.
    pub fn border<F>(&mut self, build: F) -> &mut Self
    where
        F: FnOnce(&mut BorderCriterion<'w>),
    {
        let mut border = BorderCriterion::default();
        build(&mut border);
        self.inner.push(move |s| {
            BorderSide::ALL
                .iter()
                .all(|&side| border.test(s.borders.get(side).unwrap_or(&EMPTY_BORDER)))
        });
        self
    }

    pub fn border_side<F>(&mut self, side: BorderSide, build: F) -> &mut Self
    where
        F: FnOnce(&mut BorderCriterion<'w>),
    {
        let mut border = BorderCriterion::default();
        build(&mut border);
        self.inner
            .push(move |s| border.test(s.borders.get(side).unwrap_or(&EMPTY_BORDER)));
        self
    }

    pub fn having(&mut self, predicate: impl Fn(&Style) -> bool + 'w) -> &mut Self {
        self.inner.push(predicate);
        self
    }
}

#[derive(Debug, Default)]
pub struct FontCriterion<'w> {
    inner: Criterion<'w, Font>,
}

impl<'w> FontCriterion<'w> {
    pub(crate) fn test(&self, font: &Font) -> bool {
        self.inner.test(font)
    }

    pub fn color(&mut self, color: Color) -> &mut Self {
        self.inner.push(move |f| f.color == Some(color));
        self
    }

    pub fn color_matching(&mut self, predicate: impl Fn(Color) -> bool + 'w) -> &mut Self {
        self.inner.push(move |f| f.color.is_some_and(&predicate));
        self
    }

    pub fn size(&mut self, size: f64) -> &mut Self {
        self.inner.push(move |f| f.size == Some(size));
        self
    }

    pub fn size_matching(&mut self, predicate: impl Fn(f64) -> bool + 'w) -> &mut Self {
        self.inner.push(move |f| f.size.is_some_and(&predicate));
        self
    }

    pub fn name(&mut self, name: &str) -> &mut Self {
        let name = name.to_string();
        self.inner.push(move |f| f.name.as_deref() == Some(name.as_str()));
        self
    }

    pub fn name_matching(&mut self, predicate: impl Fn(&str) -> bool + 'w) -> &mut Self {
        self.inner.push(move |f| f.name.as_deref().is_some_and(&predicate));
        self
    }

    /// The font carries every one of `styles`.
    pub fn style(&mut self, styles: &[FontStyle]) -> &mut Self {
        let styles = styles.to_vec();
        self.inner
            .push(move |f| styles.iter().all(|&style| f.has_style(style)));
        self
    }

    pub fn styles_matching(&mut self, predicate: impl Fn(&[FontStyle]) -> bool + 'w) -> &mut Self {
        self.inner.push(move |f| predicate(f.styles().as_slice()));
        self
    }

    pub fn having(&mut self, predicate: impl Fn(&Font) -> bool + 'w) -> &mut Self {
        self.inner.push(predicate);
        self
    }
}

#[derive(Debug, Default)]
pub struct BorderCriterion<'w> {
    inner: Criterion<'w, Border>,
}

impl<'w> BorderCriterion<'w> {
    pub(crate) fn test(&self, border: &Border) -> bool {
        self.inner.test(border)
    }

    pub fn style(&mut self, style: BorderStyle) -> &mut Self {
        self.inner.push(move |b| b.style == Some(style));
        self
    }

    pub fn style_matching(&mut self, predicate: impl Fn(BorderStyle) -> bool + 'w) -> &mut Self {
        self.inner.push(move |b| b.style.is_some_and(&predicate));
        self
    }

    pub fn color(&mut self, color: Color) -> &mut Self {
        self.inner.push(move |b| b.color == Some(color));
        self
    }

    pub fn color_matching(&mut self, predicate: impl Fn(Color) -> bool + 'w) -> &mut Self {
        self.inner.push(move |b| b.color.is_some_and(&predicate));
        self
    }

    pub fn having(&mut self, predicate: impl Fn(&Border) -> bool + 'w) -> &mut Self {
        self.inner.push(predicate);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn framed() -> Style {
        let mut style = Style {
            foreground: Some(Color::from_rgb(0xFF0000)),
            wrap: Some(true),
            format: Some("0.00".into()),
            ..Style::default()
        };
        let mut font = Font {
            size: Some(12.0),
            ..Font::default()
        };
        font.set_style(FontStyle::Bold);
        font.set_style(FontStyle::Italic);
        style.font = Some(font);
        let thin = Border {
            style: Some(BorderStyle::Thin),
            color: Some(Color::black()),
        };
        for side in BorderSide::ALL {
            style.borders.apply(*side, &thin);
        }
        style
    }

    #[test]
    fn style_properties() {
        let style = framed();
        let mut c = StyleCriterion::default();
        c.foreground(Color::from_rgb(0xFF0000))
            .wrap(true)
            .format("0.00")
            .font(|f| {
                f.size(12.0).style(&[FontStyle::Bold, FontStyle::Italic]);
            });
        assert!(c.test(&style));

        let mut c = StyleCriterion::default();
        c.font(|f| {
            f.style(&[FontStyle::Underline]);
        });
        assert!(!c.test(&style));
    }

    #[test]
    fn borders_on_all_or_one_side() {
        let mut style = framed();
        let mut all_thin = StyleCriterion::default();
        all_thin.border(|b| {
            b.style(BorderStyle::Thin);
        });
        assert!(all_thin.test(&style));

        style.borders.left = None;
        assert!(!all_thin.test(&style));

        let mut top = StyleCriterion::default();
        top.border_side(BorderSide::Top, |b| {
            b.color(Color::black());
        });
        assert!(top.test(&style));
    }

    #[test]
    fn missing_properties_fail_but_empty_criteria_pass() {
        let plain = Style::default();
        let mut c = StyleCriterion::default();
        c.font(|_| {});
        assert!(c.test(&plain));
        c.font(|f| {
            f.size(12.0);
        });
        assert!(!c.test(&plain));
        let mut wrap = StyleCriterion::default();
        wrap.wrap(false);
        assert!(wrap.test(&plain));
    }
}
