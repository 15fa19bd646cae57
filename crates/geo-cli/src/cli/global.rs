use clap::ValueEnum;

/// Output mode for reports and brand listings.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Fixed-width text blocks.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Flags every handler needs.
#[derive(Clone, Debug)]
pub struct GlobalFlags {
    pub format: OutputFormat,
    pub quiet: bool,
    pub verbose: bool,
}

/// Analysis blocks that replace the full report when any is selected.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Blocks {
    pub engine_profile: bool,
    pub gap_analysis: bool,
    pub reputation: bool,
}

impl Blocks {
    #[must_use]
    pub const fn any(self) -> bool {
        self.engine_profile || self.gap_analysis || self.reputation
    }
}
