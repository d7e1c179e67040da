//! Keyword enums used by styles, sheets and pages.
//!
//! Each enum has a fixed table of upper-snake-case names. Lookup from text goes
//! through [`enum_name`], so `fineDots`, `FINE_DOTS` and `FineDots` all resolve
//! to [`ForegroundFill::FineDots`].

use core::fmt;
use core::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::BuildError;

static UPPER_SNAKE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z0-9_]+$").expect("valid regex"));
static INTERIOR_UPPER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(.)(\p{Lu})").expect("valid regex"));

/// Translate a camel-case keyword into its upper-snake-case table name.
///
/// Values already in `^[A-Z0-9_]+$` form are kept. Otherwise every
/// non-overlapping `(.)(\p{Lu})` pair gets a `_` between its characters and
/// the result is uppercased, so `fineDots` becomes `FINE_DOTS` and `abCDE`
/// becomes `AB_CD_E`.
pub fn enum_name(value: &str) -> String {
    if UPPER_SNAKE.is_match(value) {
        return value.to_string();
    }
    INTERIOR_UPPER
        .replace_all(value, "${1}_${2}")
        .to_uppercase()
}

/// Common surface of the keyword enums.
pub trait Keyword: Sized + Copy + 'static {
    /// Human readable kind used in error messages.
    const KIND: &'static str;
    const ALL: &'static [Self];

    fn name(self) -> &'static str;

    /// Look a keyword up by any spelling accepted by [`enum_name`].
    fn parse_keyword(value: &str) -> Result<Self, BuildError> {
        let wanted = enum_name(value.trim());
        Self::ALL
            .iter()
            .copied()
            .find(|k| k.name() == wanted)
            .ok_or_else(|| BuildError::UnknownKeyword {
                kind: Self::KIND,
                value: value.to_string(),
            })
    }
}

macro_rules! keyword_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident : $kind:literal {
            $( $variant:ident => $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
        #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
        $vis enum $name {
            $( $variant ),+
        }

        impl Keyword for $name {
            const KIND: &'static str = $kind;
            const ALL: &'static [Self] = &[ $( $name::$variant ),+ ];

            fn name(self) -> &'static str {
                match self {
                    $( $name::$variant => $text ),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }

        impl FromStr for $name {
            type Err = BuildError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <$name as Keyword>::parse_keyword(s)
            }
        }
    };
}

keyword_enum! {
    /// Fill patterns of a cell background.
    pub enum ForegroundFill: "ForegroundFill" {
        NoFill => "NO_FILL",
        SolidForeground => "SOLID_FOREGROUND",
        FineDots => "FINE_DOTS",
        AltBars => "ALT_BARS",
        SparseDots => "SPARSE_DOTS",
        ThickHorzBands => "THICK_HORZ_BANDS",
        ThickVertBands => "THICK_VERT_BANDS",
        ThickBackwardDiag => "THICK_BACKWARD_DIAG",
        ThickForwardDiag => "THICK_FORWARD_DIAG",
        BigSpots => "BIG_SPOTS",
        Bricks => "BRICKS",
        ThinHorzBands => "THIN_HORZ_BANDS",
        ThinVertBands => "THIN_VERT_BANDS",
        ThinBackwardDiag => "THIN_BACKWARD_DIAG",
        ThinForwardDiag => "THIN_FORWARD_DIAG",
        Squares => "SQUARES",
        Diamonds => "DIAMONDS",
    }
}

keyword_enum! {
    pub enum BorderStyle: "BorderStyle" {
        None => "NONE",
        Thin => "THIN",
        Medium => "MEDIUM",
        Dashed => "DASHED",
        Dotted => "DOTTED",
        Thick => "THICK",
        Double => "DOUBLE",
        Hair => "HAIR",
        MediumDashed => "MEDIUM_DASHED",
        DashDot => "DASH_DOT",
        MediumDashDot => "MEDIUM_DASH_DOT",
        DashDotDot => "DASH_DOT_DOT",
        MediumDashDotDot => "MEDIUM_DASH_DOT_DOT",
        SlantedDashDot => "SLANTED_DASH_DOT",
    }
}

keyword_enum! {
    pub enum BorderSide: "BorderSide" {
        Top => "TOP",
        Bottom => "BOTTOM",
        Left => "LEFT",
        Right => "RIGHT",
    }
}

keyword_enum! {
    pub enum FontStyle: "FontStyle" {
        Bold => "BOLD",
        Italic => "ITALIC",
        Underline => "UNDERLINE",
        Strikeout => "STRIKEOUT",
    }
}

keyword_enum! {
    pub enum VerticalAlignment: "VerticalAlignment" {
        Top => "TOP",
        Center => "CENTER",
        Bottom => "BOTTOM",
        Justify => "JUSTIFY",
        Distributed => "DISTRIBUTED",
    }
}

keyword_enum! {
    pub enum HorizontalAlignment: "HorizontalAlignment" {
        General => "GENERAL",
        Left => "LEFT",
        Center => "CENTER",
        Right => "RIGHT",
        Fill => "FILL",
        Justify => "JUSTIFY",
        CenterSelection => "CENTER_SELECTION",
        Distributed => "DISTRIBUTED",
    }
}

keyword_enum! {
    /// Visibility of a sheet tab.
    pub enum SheetState: "SheetState" {
        Visible => "VISIBLE",
        Hidden => "HIDDEN",
        VeryHidden => "VERY_HIDDEN",
    }
}

keyword_enum! {
    pub enum Orientation: "Orientation" {
        Portrait => "PORTRAIT",
        Landscape => "LANDSCAPE",
    }
}

keyword_enum! {
    pub enum Paper: "Paper" {
        Letter => "LETTER",
        LetterSmall => "LETTER_SMALL",
        Tabloid => "TABLOID",
        Ledger => "LEDGER",
        Legal => "LEGAL",
        Statement => "STATEMENT",
        Executive => "EXECUTIVE",
        A3 => "A3",
        A4 => "A4",
        A4Small => "A4_SMALL",
        A5 => "A5",
        B4 => "B4",
        B5 => "B5",
        Folio => "FOLIO",
        Quarto => "QUARTO",
        Standard10x14 => "STANDARD_10_14",
        Standard11x17 => "STANDARD_11_17",
    }
}

keyword_enum! {
    /// Picture formats a cell image may carry.
    pub enum ImageType: "ImageType" {
        Png => "PNG",
        Jpeg => "JPEG",
        Pict => "PICT",
        Emf => "EMF",
        Wmf => "WMF",
        Dib => "DIB",
    }
}

impl ImageType {
    /// Map a file extension (`png`, `jpg`, ...) to an image type.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(ImageType::Png),
            "jpeg" | "jpg" => Some(ImageType::Jpeg),
            "pict" => Some(ImageType::Pict),
            "emf" => Some(ImageType::Emf),
            "wmf" => Some(ImageType::Wmf),
            "dib" => Some(ImageType::Dib),
            _ => None,
        }
    }

    /// Extensions recognised by [`ImageType::from_extension`], in lookup order.
    pub const EXTENSIONS: &'static [&'static str] =
        &["png", "jpeg", "jpg", "pict", "emf", "wmf", "dib"];
}
