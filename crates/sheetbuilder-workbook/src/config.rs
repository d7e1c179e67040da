/// When pending formulas and links are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolutionScope {
    /// Once, after the whole workbook has been built. Names may be referenced
    /// from any sheet before they are defined.
    #[default]
    Workbook,
    /// After every `sheet(...)` closure. References must be defined by the end
    /// of the sheet that uses them.
    Sheet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildMode {
    /// Workbook-wide resolution, dates detected, sheet names normalized.
    Strict,
    /// Per-sheet resolution for builds that are consumed sheet by sheet.
    Incremental,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildConfig {
    pub resolution: ResolutionScope,
    /// Upgrade ISO-8601 date-time strings read from data documents to dates.
    pub detect_dates: bool,
    /// Trim sheet names and replace characters Excel rejects.
    pub sheet_name_normalization: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self::strict()
    }
}

impl BuildConfig {
    pub fn strict() -> Self {
        Self {
            resolution: ResolutionScope::Workbook,
            detect_dates: true,
            sheet_name_normalization: true,
        }
    }

    pub fn incremental() -> Self {
        Self {
            resolution: ResolutionScope::Sheet,
            ..Self::strict()
        }
    }

    pub fn for_mode(mode: BuildMode) -> Self {
        match mode {
            BuildMode::Strict => Self::strict(),
            BuildMode::Incremental => Self::incremental(),
        }
    }

    pub fn with_resolution(mut self, resolution: ResolutionScope) -> Self {
        self.resolution = resolution;
        self
    }

    pub fn with_date_detection(mut self, detect: bool) -> Self {
        self.detect_dates = detect;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets() {
        assert_eq!(BuildConfig::default(), BuildConfig::strict());
        assert_eq!(
            BuildConfig::for_mode(BuildMode::Incremental).resolution,
            ResolutionScope::Sheet
        );
        assert!(!BuildConfig::strict().with_date_detection(false).detect_dates);
    }
}
