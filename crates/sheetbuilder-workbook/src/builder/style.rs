use sheetbuilder_common::{
    BorderSide, BorderStyle, BuildError, FontStyle, ForegroundFill, HorizontalAlignment,
    IntoColor, Orientation, Paper, VerticalAlignment,
};

use crate::model::{Border, Font, PageSettings, Style, StyleRegistry, StyleSpec};

const ALL_SIDES: [BorderSide; 4] = [
    BorderSide::Top,
    BorderSide::Bottom,
    BorderSide::Left,
    BorderSide::Right,
];

/// Collects the properties of one style declaration.
#[derive(Debug, Default)]
pub struct StyleDefinition {
    spec: StyleSpec,
}

impl StyleDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluate `f` against a fresh definition.
    pub fn evaluate<F>(f: F) -> Result<StyleSpec, BuildError>
    where
        F: FnOnce(&mut StyleDefinition) -> Result<(), BuildError>,
    {
        let mut def = StyleDefinition::new();
        f(&mut def)?;
        Ok(def.into_spec())
    }

    pub fn into_spec(self) -> StyleSpec {
        self.spec
    }

    fn style(&mut self) -> &mut Style {
        &mut self.spec.patch
    }

    /// Named style whose properties are applied before this one's.
    pub fn base(&mut self, name: &str) -> &mut Self {
        self.spec.base = Some(name.to_string());
        self
    }

    /// Acts as the foreground until a foreground color has been set.
    pub fn background(&mut self, color: impl IntoColor) -> Result<&mut Self, BuildError> {
        let color = color.into_color()?;
        if self.style().foreground.is_none() {
            self.style().foreground = Some(color);
        } else {
            self.style().background = Some(color);
        }
        Ok(self)
    }

    /// Sets the fill color. A previously set foreground moves to the background.
    pub fn foreground(&mut self, color: impl IntoColor) -> Result<&mut Self, BuildError> {
        let color = color.into_color()?;
        let style = self.style();
        if let Some(previous) = style.foreground.replace(color) {
            style.background = Some(previous);
        }
        Ok(self)
    }

    pub fn fill(&mut self, fill: ForegroundFill) -> &mut Self {
        self.style().fill = Some(fill);
        self
    }

    pub fn font<F>(&mut self, f: F) -> Result<&mut Self, BuildError>
    where
        F: FnOnce(&mut FontDefinition<'_>) -> Result<(), BuildError>,
    {
        let font = self.style().font.get_or_insert_with(Font::default);
        f(&mut FontDefinition { font })?;
        Ok(self)
    }

    pub fn indent(&mut self, indent: u32) -> &mut Self {
        self.style().indent = Some(indent);
        self
    }

    pub fn wrap(&mut self) -> &mut Self {
        self.style().wrap = Some(true);
        self
    }

    /// Text rotation in degrees, `0..=180`.
    pub fn rotation(&mut self, degrees: u32) -> Result<&mut Self, BuildError> {
        if degrees > 180 {
            return Err(BuildError::InvalidArgument(format!(
                "Rotation must be between 0 and 180, got {degrees}"
            )));
        }
        self.style().rotation = Some(degrees);
        Ok(self)
    }

    /// Number format pattern, e.g. `d.m.y`.
    pub fn format(&mut self, format: &str) -> &mut Self {
        self.style().format = Some(format.to_string());
        self
    }

    pub fn align(
        &mut self,
        vertical: VerticalAlignment,
        horizontal: HorizontalAlignment,
    ) -> &mut Self {
        let style = self.style();
        style.vertical_alignment = Some(vertical);
        style.horizontal_alignment = Some(horizontal);
        self
    }

    pub fn align_vertical(&mut self, vertical: VerticalAlignment) -> &mut Self {
        self.style().vertical_alignment = Some(vertical);
        self
    }

    pub fn align_horizontal(&mut self, horizontal: HorizontalAlignment) -> &mut Self {
        self.style().horizontal_alignment = Some(horizontal);
        self
    }

    /// Border on all four sides.
    pub fn border<F>(&mut self, f: F) -> Result<&mut Self, BuildError>
    where
        F: FnOnce(&mut BorderDefinition) -> Result<(), BuildError>,
    {
        self.border_sides(&ALL_SIDES, f)
    }

    /// Border on the given sides only.
    pub fn border_sides<F>(&mut self, sides: &[BorderSide], f: F) -> Result<&mut Self, BuildError>
    where
        F: FnOnce(&mut BorderDefinition) -> Result<(), BuildError>,
    {
        let mut def = BorderDefinition::default();
        f(&mut def)?;
        for side in sides {
            self.style().borders.apply(*side, &def.border);
        }
        Ok(self)
    }
}

pub struct FontDefinition<'s> {
    font: &'s mut Font,
}

impl<'s> FontDefinition<'s> {
    pub(crate) fn new(font: &'s mut Font) -> Self {
        Self { font }
    }

    pub fn color(&mut self, color: impl IntoColor) -> Result<&mut Self, BuildError> {
        self.font.color = Some(color.into_color()?);
        Ok(self)
    }

    pub fn size(&mut self, size: f64) -> &mut Self {
        self.font.size = Some(size);
        self
    }

    pub fn name(&mut self, name: &str) -> &mut Self {
        self.font.name = Some(name.to_string());
        self
    }

    pub fn style(&mut self, style: FontStyle) -> &mut Self {
        self.font.set_style(style);
        self
    }

    pub fn styles(&mut self, styles: &[FontStyle]) -> &mut Self {
        for style in styles {
            self.font.set_style(*style);
        }
        self
    }
}

#[derive(Debug, Default)]
pub struct BorderDefinition {
    border: Border,
}

impl BorderDefinition {
    pub fn style(&mut self, style: BorderStyle) -> &mut Self {
        self.border.style = Some(style);
        self
    }

    /// Hex strings and preset names both land in the border color.
    pub fn color(&mut self, color: impl IntoColor) -> Result<&mut Self, BuildError> {
        self.border.color = Some(color.into_color()?);
        Ok(self)
    }
}

pub struct PageDefinition<'s> {
    pub(crate) page: &'s mut PageSettings,
}

impl PageDefinition<'_> {
    pub fn orientation(&mut self, orientation: Orientation) -> &mut Self {
        self.page.orientation = Some(orientation);
        self
    }

    pub fn paper(&mut self, paper: Paper) -> &mut Self {
        self.page.paper = Some(paper);
        self
    }

    /// Fit the printout to `pages` pages wide.
    pub fn fit_width(&mut self, pages: u32) -> &mut Self {
        self.page.fit_width = Some(pages);
        self
    }

    /// Fit the printout to `pages` pages tall.
    pub fn fit_height(&mut self, pages: u32) -> &mut Self {
        self.page.fit_height = Some(pages);
        self
    }
}

/// Style references collected on a row or cell, applied when the cell is done.
#[derive(Debug, Clone, Default)]
pub struct StyleList {
    pub names: Vec<String>,
    pub anonymous: Vec<StyleSpec>,
}

impl StyleList {
    pub fn is_empty(&self) -> bool {
        self.names.is_empty() && self.anonymous.is_empty()
    }

    fn check_defined(registry: &StyleRegistry, name: &str) -> Result<(), BuildError> {
        if registry.is_defined(name) {
            Ok(())
        } else {
            Err(BuildError::UndefinedStyle {
                name: name.to_string(),
            })
        }
    }

    pub fn add_name(&mut self, registry: &StyleRegistry, name: &str) -> Result<(), BuildError> {
        Self::check_defined(registry, name)?;
        self.names.push(name.to_string());
        Ok(())
    }

    pub fn add_spec(&mut self, registry: &StyleRegistry, spec: StyleSpec) -> Result<(), BuildError> {
        if let Some(base) = &spec.base {
            Self::check_defined(registry, base)?;
        }
        self.anonymous.push(spec);
        Ok(())
    }

    /// Named styles composed in order, then the anonymous definitions on top.
    pub fn materialize(
        &self,
        registry: &mut StyleRegistry,
    ) -> Result<Option<std::sync::Arc<Style>>, BuildError> {
        if self.is_empty() {
            return Ok(None);
        }
        let composed = if self.names.is_empty() {
            None
        } else {
            Some(registry.compose(&self.names)?)
        };
        if self.anonymous.is_empty() {
            return Ok(composed);
        }
        let mut style = composed.map(|s| (*s).clone()).unwrap_or_default();
        for spec in &self.anonymous {
            registry.apply_spec(spec, &mut style)?;
        }
        Ok(Some(std::sync::Arc::new(style)))
    }
}

/// Style overloads shared by rows and cells.
pub trait HasStyle: Sized {
    #[doc(hidden)]
    fn style_target(&mut self) -> (&StyleRegistry, &mut StyleList);

    fn style(&mut self, name: &str) -> Result<&mut Self, BuildError> {
        let (registry, list) = self.style_target();
        list.add_name(registry, name)?;
        Ok(self)
    }

    fn style_with<F>(&mut self, f: F) -> Result<&mut Self, BuildError>
    where
        F: FnOnce(&mut StyleDefinition) -> Result<(), BuildError>,
    {
        let spec = StyleDefinition::evaluate(f)?;
        let (registry, list) = self.style_target();
        list.add_spec(registry, spec)?;
        Ok(self)
    }

    fn style_named_with<F>(&mut self, name: &str, f: F) -> Result<&mut Self, BuildError>
    where
        F: FnOnce(&mut StyleDefinition) -> Result<(), BuildError>,
    {
        self.style(name)?;
        self.style_with(f)
    }

    fn styles(&mut self, names: &[&str]) -> Result<&mut Self, BuildError> {
        for name in names {
            self.style(name)?;
        }
        Ok(self)
    }

    fn styles_with<I, F>(&mut self, names: &[&str], definitions: I) -> Result<&mut Self, BuildError>
    where
        I: IntoIterator<Item = F>,
        F: FnOnce(&mut StyleDefinition) -> Result<(), BuildError>,
    {
        self.styles(names)?;
        for f in definitions {
            self.style_with(f)?;
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheetbuilder_common::Color;

    #[test]
    fn background_before_foreground_acts_as_foreground() {
        let spec = StyleDefinition::evaluate(|s| {
            s.background("#ff0000")?;
            Ok(())
        })
        .unwrap();
        assert_eq!(spec.patch.foreground, Some(Color::from_rgb(0xFF0000)));
        assert_eq!(spec.patch.background, None);

        let spec = StyleDefinition::evaluate(|s| {
            s.foreground("red")?.background("blue")?;
            Ok(())
        })
        .unwrap();
        assert_eq!(spec.patch.foreground, Some(Color::from_rgb(0xFF0000)));
        assert_eq!(spec.patch.background, Some(Color::from_rgb(0x0000FF)));
    }

    #[test]
    fn border_preset_color_sets_color_not_style() {
        let spec = StyleDefinition::evaluate(|s| {
            s.border_sides(&[BorderSide::Top, BorderSide::Left], |b| {
                b.color("teal")?;
                Ok(())
            })?;
            Ok(())
        })
        .unwrap();
        let top = spec.patch.borders.get(BorderSide::Top).unwrap();
        assert_eq!(top.color, Color::preset("teal"));
        assert_eq!(top.style, None);
        assert!(spec.patch.borders.get(BorderSide::Bottom).is_none());
    }

    #[test]
    fn rotation_is_bounded() {
        assert!(StyleDefinition::evaluate(|s| s.rotation(181).map(|_| ())).is_err());
        let spec = StyleDefinition::evaluate(|s| s.rotation(90).map(|_| ())).unwrap();
        assert_eq!(spec.patch.rotation, Some(90));
    }

    #[test]
    fn font_flags_accumulate() {
        let spec = StyleDefinition::evaluate(|s| {
            s.font(|f| {
                f.style(FontStyle::Bold).styles(&[FontStyle::Italic]).size(12.0);
                Ok(())
            })?;
            Ok(())
        })
        .unwrap();
        let font = spec.patch.font.unwrap();
        assert!(font.bold && font.italic && !font.underline);
        assert_eq!(font.size, Some(12.0));
    }
}
