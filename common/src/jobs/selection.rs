//! The file picked in the import modal and the sync/async choice.

/// Files larger than this (5 MiB) switch the import to async mode on selection.
pub const ASYNC_THRESHOLD_BYTES: u64 = 5_242_880;

/// Value of the file input's `accept` attribute.
pub const ACCEPT_ATTR: &str = ".csv,.json,.md";

/// Batch file formats the service accepts. Parsing is done by the service;
/// the console only uses this to label and pre-filter files.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImportFormat {
    Csv,
    Json,
    Markdown,
}

impl ImportFormat {
    pub fn from_file_name(name: &str) -> Option<Self> {
        let (_, ext) = name.rsplit_once('.')?;
        match ext.to_ascii_lowercase().as_str() {
            "csv" => Some(ImportFormat::Csv),
            "json" => Some(ImportFormat::Json),
            "md" | "markdown" => Some(ImportFormat::Markdown),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ImportFormat::Csv => "CSV",
            ImportFormat::Json => "JSON",
            ImportFormat::Markdown => "MD",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub size: u64,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }

    pub fn format(&self) -> Option<ImportFormat> {
        ImportFormat::from_file_name(&self.name)
    }

    pub fn exceeds_async_threshold(&self) -> bool {
        self.size > ASYNC_THRESHOLD_BYTES
    }
}

/// Current file choice plus the async toggle.
///
/// The toggle outlives file changes: a large file turns it on, a small one
/// leaves it as it was, and the user can always turn it back off.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ImportSelection {
    file: Option<SelectedFile>,
    async_mode: bool,
}

impl ImportSelection {
    pub fn file(&self) -> Option<&SelectedFile> {
        self.file.as_ref()
    }

    pub fn async_mode(&self) -> bool {
        self.async_mode
    }

    /// Replaces the chosen file. Returns `true` when this selection forced
    /// async mode on.
    pub fn select(&mut self, file: SelectedFile) -> bool {
        let forced = file.exceeds_async_threshold() && !self.async_mode;
        if file.exceeds_async_threshold() {
            self.async_mode = true;
        }
        self.file = Some(file);
        forced
    }

    pub fn set_async_mode(&mut self, enabled: bool) {
        self.async_mode = enabled;
    }
}
