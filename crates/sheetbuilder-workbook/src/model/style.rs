//! Composed cell styles.
//!
//! Every property is optional: a [`Style`] used as a patch only overwrites the
//! properties it sets when merged onto another style.

use sheetbuilder_common::{
    BorderSide, BorderStyle, Color, FontStyle, ForegroundFill, HorizontalAlignment,
    VerticalAlignment,
};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Font {
    pub color: Option<Color>,
    pub size: Option<f64>,
    pub name: Option<String>,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikeout: bool,
}

impl Font {
    pub fn has_style(&self, style: FontStyle) -> bool {
        match style {
            FontStyle::Bold => self.bold,
            FontStyle::Italic => self.italic,
            FontStyle::Underline => self.underline,
            FontStyle::Strikeout => self.strikeout,
        }
    }

    pub fn set_style(&mut self, style: FontStyle) {
        match style {
            FontStyle::Bold => self.bold = true,
            FontStyle::Italic => self.italic = true,
            FontStyle::Underline => self.underline = true,
            FontStyle::Strikeout => self.strikeout = true,
        }
    }

    /// Style flags that are switched on, in declaration order.
    pub fn styles(&self) -> Vec<FontStyle> {
        [
            FontStyle::Bold,
            FontStyle::Italic,
            FontStyle::Underline,
            FontStyle::Strikeout,
        ]
        .into_iter()
        .filter(|s| self.has_style(*s))
        .collect()
    }

    pub fn merge(&mut self, patch: &Font) {
        if patch.color.is_some() {
            self.color = patch.color;
        }
        if patch.size.is_some() {
            self.size = patch.size;
        }
        if patch.name.is_some() {
            self.name.clone_from(&patch.name);
        }
        self.bold |= patch.bold;
        self.italic |= patch.italic;
        self.underline |= patch.underline;
        self.strikeout |= patch.strikeout;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Border {
    pub style: Option<BorderStyle>,
    pub color: Option<Color>,
}

impl Border {
    pub fn merge(&mut self, patch: &Border) {
        if patch.style.is_some() {
            self.style = patch.style;
        }
        if patch.color.is_some() {
            self.color = patch.color;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Borders {
    pub top: Option<Border>,
    pub bottom: Option<Border>,
    pub left: Option<Border>,
    pub right: Option<Border>,
}

impl Borders {
    pub fn get(&self, side: BorderSide) -> Option<&Border> {
        self.slot(side).as_ref()
    }

    fn slot(&self, side: BorderSide) -> &Option<Border> {
        match side {
            BorderSide::Top => &self.top,
            BorderSide::Bottom => &self.bottom,
            BorderSide::Left => &self.left,
            BorderSide::Right => &self.right,
        }
    }

    fn slot_mut(&mut self, side: BorderSide) -> &mut Option<Border> {
        match side {
            BorderSide::Top => &mut self.top,
            BorderSide::Bottom => &mut self.bottom,
            BorderSide::Left => &mut self.left,
            BorderSide::Right => &mut self.right,
        }
    }

    /// Overlay `border` onto the given side.
    pub fn apply(&mut self, side: BorderSide, border: &Border) {
        self.slot_mut(side)
            .get_or_insert_with(Border::default)
            .merge(border);
    }

    pub fn merge(&mut self, patch: &Borders) {
        for side in [
            BorderSide::Top,
            BorderSide::Bottom,
            BorderSide::Left,
            BorderSide::Right,
        ] {
            if let Some(border) = patch.get(side) {
                self.apply(side, border);
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.top.is_none() && self.bottom.is_none() && self.left.is_none() && self.right.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Style {
    pub foreground: Option<Color>,
    pub background: Option<Color>,
    pub fill: Option<ForegroundFill>,
    pub font: Option<Font>,
    pub indent: Option<u32>,
    pub rotation: Option<u32>,
    pub wrap: Option<bool>,
    pub format: Option<String>,
    pub vertical_alignment: Option<VerticalAlignment>,
    pub horizontal_alignment: Option<HorizontalAlignment>,
    pub borders: Borders,
}

impl Style {
    /// Overlay `patch`: only the properties it sets are overwritten; font and
    /// borders merge field by field.
    ///
    /// A foreground color without an explicit fill turns an unfilled style into a
    /// solid fill.
    pub fn merge(&mut self, patch: &Style) {
        if let Some(fg) = patch.foreground {
            self.foreground = Some(fg);
            if patch.fill.is_none() && matches!(self.fill, None | Some(ForegroundFill::NoFill)) {
                self.fill = Some(ForegroundFill::SolidForeground);
            }
        }
        if patch.background.is_some() {
            self.background = patch.background;
        }
        if patch.fill.is_some() {
            self.fill = patch.fill;
        }
        if let Some(font) = &patch.font {
            self.font.get_or_insert_with(Font::default).merge(font);
        }
        if patch.indent.is_some() {
            self.indent = patch.indent;
        }
        if patch.rotation.is_some() {
            self.rotation = patch.rotation;
        }
        if patch.wrap.is_some() {
            self.wrap = patch.wrap;
        }
        if patch.format.is_some() {
            self.format.clone_from(&patch.format);
        }
        if patch.vertical_alignment.is_some() {
            self.vertical_alignment = patch.vertical_alignment;
        }
        if patch.horizontal_alignment.is_some() {
            self.horizontal_alignment = patch.horizontal_alignment;
        }
        self.borders.merge(&patch.borders);
    }

    pub fn is_empty(&self) -> bool {
        *self == Style::default()
    }
}
